//! Alliance domain entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::link::Link;
use crate::soft_delete::impl_soft_delete_by_active_flag;

/// Partner institution shown on the portal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Alliance {
    pub id: Uuid,
    pub name: String,
    /// Acronym
    pub siglas: String,
    pub url: Option<String>,
    pub logos: Vec<Link>,
    pub is_active: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl_soft_delete_by_active_flag!(Alliance);

impl Alliance {
    pub fn apply(&mut self, changes: UpdateAlliance, at: DateTime<Utc>) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(siglas) = changes.siglas {
            self.siglas = siglas;
        }
        if let Some(url) = changes.url {
            self.url = Some(url);
        }
        if let Some(logos) = changes.logos {
            self.logos = logos;
        }
        self.updated_at = at;
    }
}

#[derive(Debug, Clone)]
pub struct CreateAlliance {
    pub name: String,
    pub siglas: String,
    pub url: Option<String>,
    pub logos: Vec<Link>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateAlliance {
    pub name: Option<String>,
    pub siglas: Option<String>,
    pub url: Option<String>,
    pub logos: Option<Vec<Link>>,
}
