//! Resource repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use super::entities::resource::{self, ActiveModel, Entity as ResourceEntity};
use super::entities::LinkList;
use super::matches_any;
use common::AppResult;
use domain::{CreateResource, PageWindow, Resource};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ResourceRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Resource>>;

    async fn list(&self, include_deleted: bool) -> AppResult<Vec<Resource>>;

    /// Resources of one section, in creation order
    async fn list_by_section(
        &self,
        section_id: Uuid,
        include_deleted: bool,
    ) -> AppResult<Vec<Resource>>;

    async fn create(&self, data: CreateResource) -> AppResult<Resource>;

    async fn save(&self, resource: &Resource) -> AppResult<Resource>;

    /// Active resources whose name or description matches any pattern
    async fn search(
        &self,
        patterns: &[String],
        window: PageWindow,
    ) -> AppResult<(Vec<Resource>, u64)>;
}

pub struct ResourceStore {
    db: DatabaseConnection,
}

impl ResourceStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ResourceRepository for ResourceStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Resource>> {
        let result = ResourceEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Resource::from))
    }

    async fn list(&self, include_deleted: bool) -> AppResult<Vec<Resource>> {
        let mut query = ResourceEntity::find();
        if !include_deleted {
            query = query.filter(resource::Column::IsActive.eq(true));
        }

        let models = query
            .order_by_asc(resource::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Resource::from).collect())
    }

    async fn list_by_section(
        &self,
        section_id: Uuid,
        include_deleted: bool,
    ) -> AppResult<Vec<Resource>> {
        let mut query = ResourceEntity::find().filter(resource::Column::SectionId.eq(section_id));
        if !include_deleted {
            query = query.filter(resource::Column::IsActive.eq(true));
        }

        let models = query
            .order_by_asc(resource::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Resource::from).collect())
    }

    async fn create(&self, data: CreateResource) -> AppResult<Resource> {
        let now = Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            section_id: Set(data.section_id),
            name: Set(data.name),
            description: Set(data.description),
            links: Set(LinkList(data.links)),
            is_active: Set(true),
            deleted_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await?;
        Ok(Resource::from(model))
    }

    async fn save(&self, resource: &Resource) -> AppResult<Resource> {
        let model = ActiveModel::from(resource).update(&self.db).await?;
        Ok(Resource::from(model))
    }

    async fn search(
        &self,
        patterns: &[String],
        window: PageWindow,
    ) -> AppResult<(Vec<Resource>, u64)> {
        let query = ResourceEntity::find()
            .filter(resource::Column::IsActive.eq(true))
            .filter(matches_any(
                &[resource::Column::Name, resource::Column::Description],
                patterns,
            ));

        let total = query.clone().count(&self.db).await?;
        let models = query
            .order_by_asc(resource::Column::CreatedAt)
            .offset(window.offset())
            .limit(window.limit)
            .all(&self.db)
            .await?;

        Ok((models.into_iter().map(Resource::from).collect(), total))
    }
}
