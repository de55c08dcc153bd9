//! Shared fixtures for the HTTP integration tests.
//!
//! The router runs against in-memory repositories, real services and real
//! JWTs. A SeaORM mock connection stands in for the pool.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::Utc;
use regex::RegexBuilder;
use sea_orm::{DatabaseBackend, MockDatabase};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use common::{AppResult, DatabaseConfig, JwtConfig, ServiceConfig};
use domain::{
    Alliance, CreateAlliance, CreateDocument, CreateResource, CreateSection, Document,
    NewSearchLog, NewUser, PageWindow, Password, Resource, SearchLog, Section, SoftDelete, User,
    UserRole,
};
use portal_service_lib::config::PortalConfig;
use portal_service_lib::infra::Database;
use portal_service_lib::repository::{
    AllianceRepository, DocumentRepository, ResourceRepository, SearchLogRepository,
    SectionRepository, UserRepository,
};
use portal_service_lib::routes::create_router;
use portal_service_lib::service::{Repositories, Services};
use portal_service_lib::state::AppState;

pub const ADMIN_EMAIL: &str = "admin@scalalearning.org";
pub const ADMIN_PASSWORD: &str = "adminpassword";
pub const DIRECTOR_EMAIL: &str = "director@scalalearning.org";
pub const USER_EMAIL: &str = "user@scalalearning.org";

// =============================================================================
// In-memory repositories
// =============================================================================

/// Table shared by the in-memory stores; insertion order is creation order.
struct Table<T>(Mutex<Vec<T>>);

impl<T: Clone> Table<T> {
    fn new() -> Self {
        Self(Mutex::new(Vec::new()))
    }

    fn rows(&self) -> Vec<T> {
        self.0.lock().unwrap().clone()
    }

    fn insert(&self, row: T) -> T {
        self.0.lock().unwrap().push(row.clone());
        row
    }

    fn find(&self, pred: impl Fn(&T) -> bool) -> Option<T> {
        self.0.lock().unwrap().iter().find(|r| pred(r)).cloned()
    }

    fn replace(&self, row: &T, same: impl Fn(&T) -> bool) -> T {
        let mut rows = self.0.lock().unwrap();
        if let Some(slot) = rows.iter_mut().find(|r| same(r)) {
            *slot = row.clone();
        }
        row.clone()
    }
}

fn visible<T: SoftDelete + Clone>(rows: Vec<T>, include_deleted: bool) -> Vec<T> {
    rows.into_iter()
        .filter(|r| include_deleted || r.is_active())
        .collect()
}

/// Mirrors the storage-side `~*` match: case-insensitive regex over fields.
fn matches(patterns: &[String], fields: &[Option<&str>]) -> bool {
    patterns.iter().any(|pattern| {
        let re = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .unwrap();
        fields.iter().flatten().any(|field| re.is_match(field))
    })
}

fn page<T>(hits: Vec<T>, window: PageWindow) -> (Vec<T>, u64) {
    let total = hits.len() as u64;
    let rows = hits
        .into_iter()
        .skip(window.offset() as usize)
        .take(window.limit as usize)
        .collect();
    (rows, total)
}

pub struct InMemoryUsers(Table<User>);

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.0.find(|u| u.id == id))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self.0.find(|u| u.email == email))
    }

    async fn list(&self, include_deleted: bool) -> AppResult<Vec<User>> {
        Ok(visible(self.0.rows(), include_deleted))
    }

    async fn create(&self, user: NewUser) -> AppResult<User> {
        let now = Utc::now();
        Ok(self.0.insert(User {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            role: user.role,
            is_admin: user.is_admin,
            is_active: true,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        }))
    }

    async fn save(&self, user: &User) -> AppResult<User> {
        Ok(self.0.replace(user, |u| u.id == user.id))
    }
}

pub struct InMemorySections(Table<Section>);

#[async_trait]
impl SectionRepository for InMemorySections {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Section>> {
        Ok(self.0.find(|s| s.id == id))
    }

    async fn list(&self, include_deleted: bool) -> AppResult<Vec<Section>> {
        Ok(visible(self.0.rows(), include_deleted))
    }

    async fn create(&self, data: CreateSection) -> AppResult<Section> {
        let now = Utc::now();
        Ok(self.0.insert(Section {
            id: Uuid::new_v4(),
            title: data.title,
            description: data.description,
            is_active: true,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        }))
    }

    async fn save(&self, section: &Section) -> AppResult<Section> {
        Ok(self.0.replace(section, |s| s.id == section.id))
    }

    async fn search(
        &self,
        patterns: &[String],
        window: PageWindow,
    ) -> AppResult<(Vec<Section>, u64)> {
        let hits = visible(self.0.rows(), false)
            .into_iter()
            .filter(|s| {
                matches(
                    patterns,
                    &[Some(s.title.as_str()), Some(s.description.as_str())],
                )
            })
            .collect();
        Ok(page(hits, window))
    }
}

pub struct InMemoryResources(Table<Resource>);

#[async_trait]
impl ResourceRepository for InMemoryResources {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Resource>> {
        Ok(self.0.find(|r| r.id == id))
    }

    async fn list(&self, include_deleted: bool) -> AppResult<Vec<Resource>> {
        Ok(visible(self.0.rows(), include_deleted))
    }

    async fn list_by_section(
        &self,
        section_id: Uuid,
        include_deleted: bool,
    ) -> AppResult<Vec<Resource>> {
        Ok(visible(self.0.rows(), include_deleted)
            .into_iter()
            .filter(|r| r.section_id == section_id)
            .collect())
    }

    async fn create(&self, data: CreateResource) -> AppResult<Resource> {
        let now = Utc::now();
        Ok(self.0.insert(Resource {
            id: Uuid::new_v4(),
            section_id: data.section_id,
            name: data.name,
            description: data.description,
            links: data.links,
            is_active: true,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        }))
    }

    async fn save(&self, resource: &Resource) -> AppResult<Resource> {
        Ok(self.0.replace(resource, |r| r.id == resource.id))
    }

    async fn search(
        &self,
        patterns: &[String],
        window: PageWindow,
    ) -> AppResult<(Vec<Resource>, u64)> {
        let hits = visible(self.0.rows(), false)
            .into_iter()
            .filter(|r| matches(patterns, &[Some(r.name.as_str()), r.description.as_deref()]))
            .collect();
        Ok(page(hits, window))
    }
}

pub struct InMemoryAlliances(Table<Alliance>);

#[async_trait]
impl AllianceRepository for InMemoryAlliances {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Alliance>> {
        Ok(self.0.find(|a| a.id == id))
    }

    async fn list(&self, include_deleted: bool) -> AppResult<Vec<Alliance>> {
        Ok(visible(self.0.rows(), include_deleted))
    }

    async fn create(&self, data: CreateAlliance) -> AppResult<Alliance> {
        let now = Utc::now();
        Ok(self.0.insert(Alliance {
            id: Uuid::new_v4(),
            name: data.name,
            siglas: data.siglas,
            url: data.url,
            logos: data.logos,
            is_active: true,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        }))
    }

    async fn save(&self, alliance: &Alliance) -> AppResult<Alliance> {
        Ok(self.0.replace(alliance, |a| a.id == alliance.id))
    }

    async fn search(
        &self,
        patterns: &[String],
        window: PageWindow,
    ) -> AppResult<(Vec<Alliance>, u64)> {
        let hits = visible(self.0.rows(), false)
            .into_iter()
            .filter(|a| matches(patterns, &[Some(a.name.as_str()), Some(a.siglas.as_str())]))
            .collect();
        Ok(page(hits, window))
    }
}

pub struct InMemoryDocuments(Table<Document>);

#[async_trait]
impl DocumentRepository for InMemoryDocuments {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Document>> {
        Ok(self.0.find(|d| d.id == id))
    }

    async fn list(&self, include_deleted: bool) -> AppResult<Vec<Document>> {
        Ok(visible(self.0.rows(), include_deleted))
    }

    async fn create(&self, data: CreateDocument) -> AppResult<Document> {
        let now = Utc::now();
        Ok(self.0.insert(Document {
            id: Uuid::new_v4(),
            name: data.name,
            description: data.description,
            mime_type: data.mime_type,
            url: data.url,
            file_path: data.file_path,
            size: data.size,
            is_deleted: false,
            deleted_at: None,
            uploaded_by: data.uploaded_by,
            created_at: now,
            updated_at: now,
        }))
    }

    async fn save(&self, document: &Document) -> AppResult<Document> {
        Ok(self.0.replace(document, |d| d.id == document.id))
    }
}

pub struct InMemorySearchLogs(Table<SearchLog>);

#[async_trait]
impl SearchLogRepository for InMemorySearchLogs {
    async fn create(&self, entry: NewSearchLog) -> AppResult<SearchLog> {
        Ok(self.0.insert(SearchLog {
            id: Uuid::new_v4(),
            term: entry.term,
            normalized_term: entry.normalized_term,
            user_role: entry.user_role,
            created_at: Utc::now(),
        }))
    }

    async fn recent(&self, limit: u64) -> AppResult<Vec<SearchLog>> {
        let mut rows = self.0.rows();
        rows.reverse();
        rows.truncate(limit as usize);
        Ok(rows)
    }
}

// =============================================================================
// Test application
// =============================================================================

pub struct TestApp {
    pub router: Router,
    pub users: Arc<InMemoryUsers>,
    pub sections: Arc<InMemorySections>,
    pub resources: Arc<InMemoryResources>,
    pub alliances: Arc<InMemoryAlliances>,
    pub search_logs: Arc<InMemorySearchLogs>,
}

fn test_config() -> PortalConfig {
    PortalConfig {
        server: ServiceConfig::default(),
        database: DatabaseConfig::default(),
        jwt: JwtConfig {
            secret: "integration-test-secret-at-least-32-chars".to_string(),
            expiration_hours: 1,
        },
        cors_origins: vec![],
        static_dir: None,
    }
}

fn seeded_user(name: &str, email: &str, role: Option<UserRole>, password: Option<&str>) -> User {
    let now = Utc::now();
    User {
        id: Uuid::new_v4(),
        name: name.to_string(),
        email: email.to_string(),
        password_hash: password.map(|p| Password::new(p).unwrap().into_string()),
        role,
        is_admin: role.is_none(),
        is_active: true,
        deleted_at: None,
        created_at: now,
        updated_at: now,
    }
}

impl TestApp {
    /// App with one admin, one director and one plain user.
    pub fn new() -> Self {
        let users = Arc::new(InMemoryUsers(Table::new()));
        users
            .0
            .insert(seeded_user("Admin", ADMIN_EMAIL, None, Some(ADMIN_PASSWORD)));
        users.0.insert(seeded_user(
            "Directora",
            DIRECTOR_EMAIL,
            Some(UserRole::Director),
            None,
        ));
        users
            .0
            .insert(seeded_user("Usuario", USER_EMAIL, Some(UserRole::User), None));

        let sections = Arc::new(InMemorySections(Table::new()));
        let resources = Arc::new(InMemoryResources(Table::new()));
        let alliances = Arc::new(InMemoryAlliances(Table::new()));
        let documents = Arc::new(InMemoryDocuments(Table::new()));
        let search_logs = Arc::new(InMemorySearchLogs(Table::new()));

        let config = test_config();
        let repos = Repositories {
            users: users.clone(),
            alliances: alliances.clone(),
            resources: resources.clone(),
            sections: sections.clone(),
            documents,
            search_logs: search_logs.clone(),
        };
        let services = Services::from_repositories(repos, config.jwt.clone());
        let database = Database::from_connection(
            MockDatabase::new(DatabaseBackend::Postgres).into_connection(),
        );

        Self {
            router: create_router(AppState::new(services, database, config)),
            users,
            sections,
            resources,
            alliances,
            search_logs,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request(Method::GET, uri, token, None).await
    }

    /// Log in and return the bearer token.
    pub async fn login(&self, email: &str, password: Option<&str>) -> String {
        let mut body = serde_json::json!({ "email": email });
        if let Some(password) = password {
            body["password"] = Value::from(password);
        }
        let (status, json) = self
            .request(Method::POST, "/api/users/login", None, Some(body))
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {json}");
        json["data"]["token"].as_str().unwrap().to_string()
    }

    pub async fn admin_token(&self) -> String {
        self.login(ADMIN_EMAIL, Some(ADMIN_PASSWORD)).await
    }

    pub async fn director_token(&self) -> String {
        self.login(DIRECTOR_EMAIL, None).await
    }

    pub async fn user_token(&self) -> String {
        self.login(USER_EMAIL, None).await
    }

    pub fn seed_section(&self, title: &str, description: &str) -> Section {
        let now = Utc::now();
        self.sections.0.insert(Section {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: description.to_string(),
            is_active: true,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn seed_alliance(&self, name: &str, siglas: &str) -> Alliance {
        let now = Utc::now();
        self.alliances.0.insert(Alliance {
            id: Uuid::new_v4(),
            name: name.to_string(),
            siglas: siglas.to_string(),
            url: None,
            logos: vec![],
            is_active: true,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn search_log_count(&self) -> usize {
        self.search_logs.0.rows().len()
    }
}
