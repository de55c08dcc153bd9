//! Service container - wires repositories into services.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use common::JwtConfig;

use super::{
    AllianceManager, AllianceService, AuthService, Authenticator, DocumentManager,
    DocumentService, ResourceManager, ResourceService, SearchManager, SearchService,
    SectionManager, SectionService, UserManager, UserService,
};
use crate::repository::{
    AllianceRepository, AllianceStore, DocumentRepository, DocumentStore, ResourceRepository,
    ResourceStore, SearchLogRepository, SearchLogStore, SectionRepository, SectionStore,
    UserRepository, UserStore,
};

/// Every repository the services depend on.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub alliances: Arc<dyn AllianceRepository>,
    pub resources: Arc<dyn ResourceRepository>,
    pub sections: Arc<dyn SectionRepository>,
    pub documents: Arc<dyn DocumentRepository>,
    pub search_logs: Arc<dyn SearchLogRepository>,
}

impl Repositories {
    /// SeaORM-backed repositories sharing one connection pool
    pub fn from_connection(db: DatabaseConnection) -> Self {
        Self {
            users: Arc::new(UserStore::new(db.clone())),
            alliances: Arc::new(AllianceStore::new(db.clone())),
            resources: Arc::new(ResourceStore::new(db.clone())),
            sections: Arc::new(SectionStore::new(db.clone())),
            documents: Arc::new(DocumentStore::new(db.clone())),
            search_logs: Arc::new(SearchLogStore::new(db)),
        }
    }
}

/// Centralized access to all application services.
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
    alliance_service: Arc<dyn AllianceService>,
    resource_service: Arc<dyn ResourceService>,
    section_service: Arc<dyn SectionService>,
    document_service: Arc<dyn DocumentService>,
    search_service: Arc<dyn SearchService>,
}

impl Services {
    pub fn from_repositories(repos: Repositories, jwt: JwtConfig) -> Self {
        Self {
            auth_service: Arc::new(Authenticator::new(repos.users.clone(), jwt)),
            user_service: Arc::new(UserManager::new(repos.users)),
            alliance_service: Arc::new(AllianceManager::new(repos.alliances.clone())),
            resource_service: Arc::new(ResourceManager::new(
                repos.resources.clone(),
                repos.sections.clone(),
            )),
            section_service: Arc::new(SectionManager::new(repos.sections.clone())),
            document_service: Arc::new(DocumentManager::new(repos.documents)),
            search_service: Arc::new(SearchManager::new(
                repos.alliances,
                repos.resources,
                repos.sections,
                repos.search_logs,
            )),
        }
    }

    pub fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    pub fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    pub fn alliances(&self) -> Arc<dyn AllianceService> {
        self.alliance_service.clone()
    }

    pub fn resources(&self) -> Arc<dyn ResourceService> {
        self.resource_service.clone()
    }

    pub fn sections(&self) -> Arc<dyn SectionService> {
        self.section_service.clone()
    }

    pub fn documents(&self) -> Arc<dyn DocumentService> {
        self.document_service.clone()
    }

    pub fn search(&self) -> Arc<dyn SearchService> {
        self.search_service.clone()
    }
}
