//! Section domain entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::soft_delete::impl_soft_delete_by_active_flag;

/// Thematic grouping of resources.
///
/// Deleting a section leaves its resources untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub is_active: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl_soft_delete_by_active_flag!(Section);

impl Section {
    pub fn apply(&mut self, changes: UpdateSection, at: DateTime<Utc>) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        self.updated_at = at;
    }
}

#[derive(Debug, Clone)]
pub struct CreateSection {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateSection {
    pub title: Option<String>,
    pub description: Option<String>,
}
