//! Alliance service.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

use common::AppResult;
use domain::{Alliance, CreateAlliance, SoftDelete, UpdateAlliance};

use super::{parse_id, soft_deleted};
use crate::repository::AllianceRepository;

#[async_trait]
pub trait AllianceService: Send + Sync {
    async fn list_alliances(&self, include_deleted: bool) -> AppResult<Vec<Alliance>>;

    async fn get_alliance(&self, id: &str) -> AppResult<Option<Alliance>>;

    async fn create_alliance(&self, data: CreateAlliance) -> AppResult<Alliance>;

    async fn update_alliance(
        &self,
        id: &str,
        changes: UpdateAlliance,
    ) -> AppResult<Option<Alliance>>;

    async fn delete_alliance(&self, id: &str) -> AppResult<Option<Alliance>>;

    async fn restore_alliance(&self, id: &str) -> AppResult<Option<Alliance>>;
}

pub struct AllianceManager {
    repo: Arc<dyn AllianceRepository>,
}

impl AllianceManager {
    pub fn new(repo: Arc<dyn AllianceRepository>) -> Self {
        Self { repo }
    }

    async fn find(&self, id: &str) -> AppResult<Option<Alliance>> {
        match parse_id(id) {
            Some(id) => self.repo.find_by_id(id).await,
            None => Ok(None),
        }
    }
}

#[async_trait]
impl AllianceService for AllianceManager {
    async fn list_alliances(&self, include_deleted: bool) -> AppResult<Vec<Alliance>> {
        self.repo.list(include_deleted).await
    }

    async fn get_alliance(&self, id: &str) -> AppResult<Option<Alliance>> {
        self.find(id).await
    }

    async fn create_alliance(&self, data: CreateAlliance) -> AppResult<Alliance> {
        let alliance = self.repo.create(data).await?;
        tracing::info!(alliance_id = %alliance.id, "Alliance created");
        Ok(alliance)
    }

    async fn update_alliance(
        &self,
        id: &str,
        changes: UpdateAlliance,
    ) -> AppResult<Option<Alliance>> {
        let Some(mut alliance) = self.find(id).await? else {
            return Ok(None);
        };

        alliance.apply(changes, Utc::now());
        let saved = self.repo.save(&alliance).await?;
        tracing::info!(alliance_id = %saved.id, "Alliance updated");
        Ok(Some(saved))
    }

    async fn delete_alliance(&self, id: &str) -> AppResult<Option<Alliance>> {
        let Some(alliance) = self.find(id).await?.and_then(soft_deleted) else {
            return Ok(None);
        };

        let saved = self.repo.save(&alliance).await?;
        tracing::info!(alliance_id = %saved.id, "Alliance soft-deleted");
        Ok(Some(saved))
    }

    async fn restore_alliance(&self, id: &str) -> AppResult<Option<Alliance>> {
        let Some(mut alliance) = self.find(id).await? else {
            return Ok(None);
        };

        if !alliance.restore(Utc::now()) {
            return Ok(Some(alliance));
        }

        let saved = self.repo.save(&alliance).await?;
        tracing::info!(alliance_id = %saved.id, "Alliance restored");
        Ok(Some(saved))
    }
}
