//! Alliance repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use super::entities::alliance::{self, ActiveModel, Entity as AllianceEntity};
use super::entities::LinkList;
use super::matches_any;
use common::AppResult;
use domain::{Alliance, CreateAlliance, PageWindow};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AllianceRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Alliance>>;

    async fn list(&self, include_deleted: bool) -> AppResult<Vec<Alliance>>;

    async fn create(&self, data: CreateAlliance) -> AppResult<Alliance>;

    async fn save(&self, alliance: &Alliance) -> AppResult<Alliance>;

    /// Active alliances whose name or acronym matches any pattern
    async fn search(
        &self,
        patterns: &[String],
        window: PageWindow,
    ) -> AppResult<(Vec<Alliance>, u64)>;
}

pub struct AllianceStore {
    db: DatabaseConnection,
}

impl AllianceStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AllianceRepository for AllianceStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Alliance>> {
        let result = AllianceEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Alliance::from))
    }

    async fn list(&self, include_deleted: bool) -> AppResult<Vec<Alliance>> {
        let mut query = AllianceEntity::find();
        if !include_deleted {
            query = query.filter(alliance::Column::IsActive.eq(true));
        }

        let models = query
            .order_by_asc(alliance::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Alliance::from).collect())
    }

    async fn create(&self, data: CreateAlliance) -> AppResult<Alliance> {
        let now = Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(data.name),
            siglas: Set(data.siglas),
            url: Set(data.url),
            logos: Set(LinkList(data.logos)),
            is_active: Set(true),
            deleted_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await?;
        Ok(Alliance::from(model))
    }

    async fn save(&self, alliance: &Alliance) -> AppResult<Alliance> {
        let model = ActiveModel::from(alliance).update(&self.db).await?;
        Ok(Alliance::from(model))
    }

    async fn search(
        &self,
        patterns: &[String],
        window: PageWindow,
    ) -> AppResult<(Vec<Alliance>, u64)> {
        let query = AllianceEntity::find()
            .filter(alliance::Column::IsActive.eq(true))
            .filter(matches_any(
                &[alliance::Column::Name, alliance::Column::Siglas],
                patterns,
            ));

        let total = query.clone().count(&self.db).await?;
        let models = query
            .order_by_asc(alliance::Column::CreatedAt)
            .offset(window.offset())
            .limit(window.limit)
            .all(&self.db)
            .await?;

        Ok((models.into_iter().map(Alliance::from).collect(), total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::mock_sql::{empty_db, statements};

    #[tokio::test]
    async fn test_list_hides_deleted_rows() {
        let store = AllianceStore::new(empty_db::<alliance::Model>());
        assert!(store.list(false).await.unwrap().is_empty());

        let sql = statements(store.db);
        assert_eq!(sql.len(), 1);
        assert!(sql[0].contains("\"is_active\" = $1"), "{}", sql[0]);
    }

    #[tokio::test]
    async fn test_list_with_deleted_has_no_filter() {
        let store = AllianceStore::new(empty_db::<alliance::Model>());
        store.list(true).await.unwrap();

        let sql = statements(store.db);
        assert!(!sql[0].contains("WHERE"), "{}", sql[0]);
        assert!(sql[0].contains("ORDER BY"));
    }
}
