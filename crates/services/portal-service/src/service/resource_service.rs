//! Resource service.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::{CreateResource, LabelledLink, Resource, SoftDelete, UpdateResource};

use super::{parse_id, soft_deleted};
use crate::repository::{ResourceRepository, SectionRepository};

const UNKNOWN_SECTION: &str = "La sección especificada no existe";

#[async_trait]
pub trait ResourceService: Send + Sync {
    async fn list_resources(&self, include_deleted: bool) -> AppResult<Vec<Resource>>;

    /// `None` when the section id is malformed or unknown
    async fn list_by_section(
        &self,
        section_id: &str,
        include_deleted: bool,
    ) -> AppResult<Option<Vec<Resource>>>;

    async fn get_resource(&self, id: &str) -> AppResult<Option<Resource>>;

    /// The target section must exist and be active
    async fn create_resource(&self, data: CreateResource) -> AppResult<Resource>;

    async fn update_resource(
        &self,
        id: &str,
        changes: UpdateResource,
    ) -> AppResult<Option<Resource>>;

    async fn delete_resource(&self, id: &str) -> AppResult<Option<Resource>>;

    async fn restore_resource(&self, id: &str) -> AppResult<Option<Resource>>;

    /// Links of active resources labelled `label`, ignoring case and accents
    async fn links_by_label(&self, label: &str) -> AppResult<Vec<LabelledLink>>;
}

pub struct ResourceManager {
    repo: Arc<dyn ResourceRepository>,
    sections: Arc<dyn SectionRepository>,
}

impl ResourceManager {
    pub fn new(repo: Arc<dyn ResourceRepository>, sections: Arc<dyn SectionRepository>) -> Self {
        Self { repo, sections }
    }

    async fn find(&self, id: &str) -> AppResult<Option<Resource>> {
        match parse_id(id) {
            Some(id) => self.repo.find_by_id(id).await,
            None => Ok(None),
        }
    }

    async fn ensure_section(&self, section_id: Uuid) -> AppResult<()> {
        match self.sections.find_by_id(section_id).await? {
            Some(section) if section.is_active => Ok(()),
            _ => Err(AppError::bad_request(UNKNOWN_SECTION)),
        }
    }
}

#[async_trait]
impl ResourceService for ResourceManager {
    async fn list_resources(&self, include_deleted: bool) -> AppResult<Vec<Resource>> {
        self.repo.list(include_deleted).await
    }

    async fn list_by_section(
        &self,
        section_id: &str,
        include_deleted: bool,
    ) -> AppResult<Option<Vec<Resource>>> {
        let Some(section_id) = parse_id(section_id) else {
            return Ok(None);
        };
        if self.sections.find_by_id(section_id).await?.is_none() {
            return Ok(None);
        }

        self.repo
            .list_by_section(section_id, include_deleted)
            .await
            .map(Some)
    }

    async fn get_resource(&self, id: &str) -> AppResult<Option<Resource>> {
        self.find(id).await
    }

    async fn create_resource(&self, data: CreateResource) -> AppResult<Resource> {
        self.ensure_section(data.section_id).await?;

        let resource = self.repo.create(data).await?;
        tracing::info!(
            resource_id = %resource.id,
            section_id = %resource.section_id,
            "Resource created"
        );
        Ok(resource)
    }

    async fn update_resource(
        &self,
        id: &str,
        changes: UpdateResource,
    ) -> AppResult<Option<Resource>> {
        let Some(mut resource) = self.find(id).await? else {
            return Ok(None);
        };

        if let Some(section_id) = changes.section_id {
            if section_id != resource.section_id {
                self.ensure_section(section_id).await?;
            }
        }

        resource.apply(changes, Utc::now());
        let saved = self.repo.save(&resource).await?;
        tracing::info!(resource_id = %saved.id, "Resource updated");
        Ok(Some(saved))
    }

    async fn delete_resource(&self, id: &str) -> AppResult<Option<Resource>> {
        let Some(resource) = self.find(id).await?.and_then(soft_deleted) else {
            return Ok(None);
        };

        let saved = self.repo.save(&resource).await?;
        tracing::info!(resource_id = %saved.id, "Resource soft-deleted");
        Ok(Some(saved))
    }

    async fn restore_resource(&self, id: &str) -> AppResult<Option<Resource>> {
        let Some(mut resource) = self.find(id).await? else {
            return Ok(None);
        };

        if !resource.restore(Utc::now()) {
            return Ok(Some(resource));
        }

        let saved = self.repo.save(&resource).await?;
        tracing::info!(resource_id = %saved.id, "Resource restored");
        Ok(Some(saved))
    }

    async fn links_by_label(&self, label: &str) -> AppResult<Vec<LabelledLink>> {
        let resources = self.repo.list(false).await?;

        Ok(resources
            .iter()
            .flat_map(|resource| {
                resource.links_labelled(label).map(|link| LabelledLink {
                    resource_id: resource.id,
                    resource_name: resource.name.clone(),
                    section_id: resource.section_id,
                    label: link.label.clone(),
                    url: link.url.clone(),
                })
            })
            .collect())
    }
}
