//! Document repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::document::{self, ActiveModel, Entity as DocumentEntity};
use common::AppResult;
use domain::{CreateDocument, Document};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Document>>;

    async fn list(&self, include_deleted: bool) -> AppResult<Vec<Document>>;

    async fn create(&self, data: CreateDocument) -> AppResult<Document>;

    async fn save(&self, document: &Document) -> AppResult<Document>;
}

pub struct DocumentStore {
    db: DatabaseConnection,
}

impl DocumentStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DocumentRepository for DocumentStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Document>> {
        let result = DocumentEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Document::from))
    }

    async fn list(&self, include_deleted: bool) -> AppResult<Vec<Document>> {
        let mut query = DocumentEntity::find();
        if !include_deleted {
            query = query.filter(document::Column::IsDeleted.eq(false));
        }

        let models = query
            .order_by_asc(document::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Document::from).collect())
    }

    async fn create(&self, data: CreateDocument) -> AppResult<Document> {
        let now = Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(data.name),
            description: Set(data.description),
            mime_type: Set(data.mime_type),
            url: Set(data.url),
            file_path: Set(data.file_path),
            size: Set(data.size),
            is_deleted: Set(false),
            deleted_at: Set(None),
            uploaded_by: Set(data.uploaded_by),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await?;
        Ok(Document::from(model))
    }

    async fn save(&self, document: &Document) -> AppResult<Document> {
        let model = ActiveModel::from(document).update(&self.db).await?;
        Ok(Document::from(model))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::mock_sql::{empty_db, statements};

    #[tokio::test]
    async fn test_list_hides_deleted_rows() {
        let store = DocumentStore::new(empty_db::<document::Model>());
        assert!(store.list(false).await.unwrap().is_empty());

        let sql = statements(store.db);
        assert_eq!(sql.len(), 1);
        assert!(sql[0].contains("\"is_deleted\" = $1"), "{}", sql[0]);
    }

    #[tokio::test]
    async fn test_list_with_deleted_has_no_filter() {
        let store = DocumentStore::new(empty_db::<document::Model>());
        store.list(true).await.unwrap();

        let sql = statements(store.db);
        assert!(!sql[0].contains("WHERE"), "{}", sql[0]);
        assert!(sql[0].contains("ORDER BY"));
    }
}
