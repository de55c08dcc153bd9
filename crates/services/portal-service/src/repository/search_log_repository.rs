//! Search log repository implementation. Append-only.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, QuerySelect, Set};
use uuid::Uuid;

use super::entities::search_log::{self, ActiveModel, Entity as SearchLogEntity};
use common::AppResult;
use domain::{NewSearchLog, SearchLog};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait SearchLogRepository: Send + Sync {
    async fn create(&self, entry: NewSearchLog) -> AppResult<SearchLog>;

    /// Newest entries first
    async fn recent(&self, limit: u64) -> AppResult<Vec<SearchLog>>;
}

pub struct SearchLogStore {
    db: DatabaseConnection,
}

impl SearchLogStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SearchLogRepository for SearchLogStore {
    async fn create(&self, entry: NewSearchLog) -> AppResult<SearchLog> {
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            term: Set(entry.term),
            normalized_term: Set(entry.normalized_term),
            user_role: Set(entry.user_role),
            created_at: Set(Utc::now()),
        };

        let model = active_model.insert(&self.db).await?;
        Ok(SearchLog::from(model))
    }

    async fn recent(&self, limit: u64) -> AppResult<Vec<SearchLog>> {
        let models = SearchLogEntity::find()
            .order_by_desc(search_log::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(SearchLog::from).collect())
    }
}
