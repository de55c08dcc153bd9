//! Section repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use super::entities::section::{self, ActiveModel, Entity as SectionEntity};
use super::matches_any;
use common::AppResult;
use domain::{CreateSection, PageWindow, Section};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait SectionRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Section>>;

    async fn list(&self, include_deleted: bool) -> AppResult<Vec<Section>>;

    async fn create(&self, data: CreateSection) -> AppResult<Section>;

    async fn save(&self, section: &Section) -> AppResult<Section>;

    /// Active sections whose title or description matches any pattern,
    /// with the total match count
    async fn search(&self, patterns: &[String], window: PageWindow)
        -> AppResult<(Vec<Section>, u64)>;
}

pub struct SectionStore {
    db: DatabaseConnection,
}

impl SectionStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SectionRepository for SectionStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Section>> {
        let result = SectionEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Section::from))
    }

    async fn list(&self, include_deleted: bool) -> AppResult<Vec<Section>> {
        let mut query = SectionEntity::find();
        if !include_deleted {
            query = query.filter(section::Column::IsActive.eq(true));
        }

        let models = query
            .order_by_asc(section::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Section::from).collect())
    }

    async fn create(&self, data: CreateSection) -> AppResult<Section> {
        let now = Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(data.title),
            description: Set(data.description),
            is_active: Set(true),
            deleted_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await?;
        Ok(Section::from(model))
    }

    async fn save(&self, section: &Section) -> AppResult<Section> {
        let model = ActiveModel::from(section).update(&self.db).await?;
        Ok(Section::from(model))
    }

    async fn search(
        &self,
        patterns: &[String],
        window: PageWindow,
    ) -> AppResult<(Vec<Section>, u64)> {
        let query = SectionEntity::find()
            .filter(section::Column::IsActive.eq(true))
            .filter(matches_any(
                &[section::Column::Title, section::Column::Description],
                patterns,
            ));

        let total = query.clone().count(&self.db).await?;
        let models = query
            .order_by_asc(section::Column::CreatedAt)
            .offset(window.offset())
            .limit(window.limit)
            .all(&self.db)
            .await?;

        Ok((models.into_iter().map(Section::from).collect(), total))
    }
}
