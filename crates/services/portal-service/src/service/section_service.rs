//! Section service.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

use common::AppResult;
use domain::{CreateSection, Section, SoftDelete, UpdateSection};

use super::{parse_id, soft_deleted};
use crate::repository::SectionRepository;

#[async_trait]
pub trait SectionService: Send + Sync {
    async fn list_sections(&self, include_deleted: bool) -> AppResult<Vec<Section>>;

    async fn get_section(&self, id: &str) -> AppResult<Option<Section>>;

    async fn create_section(&self, data: CreateSection) -> AppResult<Section>;

    async fn update_section(&self, id: &str, changes: UpdateSection)
        -> AppResult<Option<Section>>;

    /// Leaves the section's resources untouched
    async fn delete_section(&self, id: &str) -> AppResult<Option<Section>>;

    async fn restore_section(&self, id: &str) -> AppResult<Option<Section>>;
}

pub struct SectionManager {
    repo: Arc<dyn SectionRepository>,
}

impl SectionManager {
    pub fn new(repo: Arc<dyn SectionRepository>) -> Self {
        Self { repo }
    }

    async fn find(&self, id: &str) -> AppResult<Option<Section>> {
        match parse_id(id) {
            Some(id) => self.repo.find_by_id(id).await,
            None => Ok(None),
        }
    }
}

#[async_trait]
impl SectionService for SectionManager {
    async fn list_sections(&self, include_deleted: bool) -> AppResult<Vec<Section>> {
        self.repo.list(include_deleted).await
    }

    async fn get_section(&self, id: &str) -> AppResult<Option<Section>> {
        self.find(id).await
    }

    async fn create_section(&self, data: CreateSection) -> AppResult<Section> {
        let section = self.repo.create(data).await?;
        tracing::info!(section_id = %section.id, "Section created");
        Ok(section)
    }

    async fn update_section(
        &self,
        id: &str,
        changes: UpdateSection,
    ) -> AppResult<Option<Section>> {
        let Some(mut section) = self.find(id).await? else {
            return Ok(None);
        };

        section.apply(changes, Utc::now());
        let saved = self.repo.save(&section).await?;
        tracing::info!(section_id = %saved.id, "Section updated");
        Ok(Some(saved))
    }

    async fn delete_section(&self, id: &str) -> AppResult<Option<Section>> {
        let Some(section) = self.find(id).await?.and_then(soft_deleted) else {
            return Ok(None);
        };

        let saved = self.repo.save(&section).await?;
        tracing::info!(section_id = %saved.id, "Section soft-deleted");
        Ok(Some(saved))
    }

    async fn restore_section(&self, id: &str) -> AppResult<Option<Section>> {
        let Some(mut section) = self.find(id).await? else {
            return Ok(None);
        };

        if !section.restore(Utc::now()) {
            return Ok(Some(section));
        }

        let saved = self.repo.save(&section).await?;
        tracing::info!(section_id = %saved.id, "Section restored");
        Ok(Some(saved))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockSectionRepository;
    use uuid::Uuid;

    fn section() -> Section {
        let now = Utc::now();
        Section {
            id: Uuid::new_v4(),
            title: "Matemáticas".to_string(),
            description: "Álgebra y cálculo".to_string(),
            is_active: true,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_update_applies_partial_changes() {
        let existing = section();
        let id = existing.id;

        let mut repo = MockSectionRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        repo.expect_save()
            .withf(|s| s.title == "Física" && s.description == "Álgebra y cálculo")
            .returning(|s| Ok(s.clone()));

        let service = SectionManager::new(Arc::new(repo));
        let updated = service
            .update_section(
                &id.to_string(),
                UpdateSection {
                    title: Some("Física".to_string()),
                    description: None,
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.title, "Física");
    }

    #[tokio::test]
    async fn test_update_unknown_section_is_none() {
        let mut repo = MockSectionRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));
        repo.expect_save().never();

        let service = SectionManager::new(Arc::new(repo));
        let result = service
            .update_section(&Uuid::new_v4().to_string(), UpdateSection::default())
            .await
            .unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete_sets_marker() {
        let existing = section();
        let id = existing.id;

        let mut repo = MockSectionRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        repo.expect_save()
            .withf(|s| !s.is_active && s.deleted_at.is_some())
            .times(1)
            .returning(|s| Ok(s.clone()));

        let service = SectionManager::new(Arc::new(repo));
        let deleted = service.delete_section(&id.to_string()).await.unwrap();

        assert!(deleted.is_some_and(|s| !s.is_active));
    }
}
