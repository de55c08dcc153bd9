//! Document service. Only metadata is managed here; the files themselves
//! live in external storage.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

use common::AppResult;
use domain::{CreateDocument, Document, SoftDelete, UpdateDocument};

use super::{parse_id, soft_deleted};
use crate::repository::DocumentRepository;

#[async_trait]
pub trait DocumentService: Send + Sync {
    async fn list_documents(&self, include_deleted: bool) -> AppResult<Vec<Document>>;

    async fn get_document(&self, id: &str) -> AppResult<Option<Document>>;

    async fn create_document(&self, data: CreateDocument) -> AppResult<Document>;

    async fn update_document(
        &self,
        id: &str,
        changes: UpdateDocument,
    ) -> AppResult<Option<Document>>;

    async fn delete_document(&self, id: &str) -> AppResult<Option<Document>>;

    async fn restore_document(&self, id: &str) -> AppResult<Option<Document>>;
}

pub struct DocumentManager {
    repo: Arc<dyn DocumentRepository>,
}

impl DocumentManager {
    pub fn new(repo: Arc<dyn DocumentRepository>) -> Self {
        Self { repo }
    }

    async fn find(&self, id: &str) -> AppResult<Option<Document>> {
        match parse_id(id) {
            Some(id) => self.repo.find_by_id(id).await,
            None => Ok(None),
        }
    }
}

#[async_trait]
impl DocumentService for DocumentManager {
    async fn list_documents(&self, include_deleted: bool) -> AppResult<Vec<Document>> {
        self.repo.list(include_deleted).await
    }

    async fn get_document(&self, id: &str) -> AppResult<Option<Document>> {
        self.find(id).await
    }

    async fn create_document(&self, data: CreateDocument) -> AppResult<Document> {
        let document = self.repo.create(data).await?;
        tracing::info!(
            document_id = %document.id,
            uploaded_by = ?document.uploaded_by,
            "Document registered"
        );
        Ok(document)
    }

    async fn update_document(
        &self,
        id: &str,
        changes: UpdateDocument,
    ) -> AppResult<Option<Document>> {
        let Some(mut document) = self.find(id).await? else {
            return Ok(None);
        };

        document.apply(changes, Utc::now());
        let saved = self.repo.save(&document).await?;
        tracing::info!(document_id = %saved.id, "Document updated");
        Ok(Some(saved))
    }

    async fn delete_document(&self, id: &str) -> AppResult<Option<Document>> {
        let Some(document) = self.find(id).await?.and_then(soft_deleted) else {
            return Ok(None);
        };

        let saved = self.repo.save(&document).await?;
        tracing::info!(document_id = %saved.id, "Document soft-deleted");
        Ok(Some(saved))
    }

    async fn restore_document(&self, id: &str) -> AppResult<Option<Document>> {
        let Some(mut document) = self.find(id).await? else {
            return Ok(None);
        };

        if !document.restore(Utc::now()) {
            return Ok(Some(document));
        }

        let saved = self.repo.save(&document).await?;
        tracing::info!(document_id = %saved.id, "Document restored");
        Ok(Some(saved))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockDocumentRepository;
    use uuid::Uuid;

    fn document(is_deleted: bool) -> Document {
        let now = Utc::now();
        Document {
            id: Uuid::new_v4(),
            name: "Syllabus".to_string(),
            description: None,
            mime_type: "application/pdf".to_string(),
            url: "https://files.example.com/syllabus.pdf".to_string(),
            file_path: "docs/syllabus.pdf".to_string(),
            size: 1024,
            is_deleted,
            deleted_at: is_deleted.then_some(now),
            uploaded_by: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_delete_flags_is_deleted() {
        let existing = document(false);
        let id = existing.id;

        let mut repo = MockDocumentRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        repo.expect_save()
            .withf(|d| d.is_deleted && d.deleted_at.is_some())
            .times(1)
            .returning(|d| Ok(d.clone()));

        let service = DocumentManager::new(Arc::new(repo));
        let deleted = service.delete_document(&id.to_string()).await.unwrap();
        assert!(deleted.is_some_and(|d| d.is_deleted));
    }

    #[tokio::test]
    async fn test_restore_deleted_document() {
        let existing = document(true);
        let id = existing.id;

        let mut repo = MockDocumentRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        repo.expect_save()
            .withf(|d| !d.is_deleted && d.deleted_at.is_none())
            .times(1)
            .returning(|d| Ok(d.clone()));

        let service = DocumentManager::new(Arc::new(repo));
        let restored = service.restore_document(&id.to_string()).await.unwrap();
        assert!(restored.is_some_and(|d| !d.is_deleted));
    }
}
