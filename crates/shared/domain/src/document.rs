//! Document domain entity.
//!
//! Files live in external storage; the portal keeps their metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::soft_delete::SoftDelete;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// MIME type
    #[serde(rename = "type")]
    pub mime_type: String,
    pub url: String,
    pub file_path: String,
    /// Size in bytes
    pub size: i64,
    pub is_deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub uploaded_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SoftDelete for Document {
    fn is_active(&self) -> bool {
        !self.is_deleted
    }

    fn mark_deleted(&mut self, at: DateTime<Utc>) {
        self.is_deleted = true;
        self.deleted_at = Some(at);
        self.updated_at = at;
    }

    fn mark_restored(&mut self, at: DateTime<Utc>) {
        self.is_deleted = false;
        self.deleted_at = None;
        self.updated_at = at;
    }
}

impl Document {
    pub fn apply(&mut self, changes: UpdateDocument, at: DateTime<Utc>) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(description) = changes.description {
            self.description = Some(description);
        }
        self.updated_at = at;
    }
}

#[derive(Debug, Clone)]
pub struct CreateDocument {
    pub name: String,
    pub description: Option<String>,
    pub mime_type: String,
    pub url: String,
    pub file_path: String,
    pub size: i64,
    pub uploaded_by: Option<Uuid>,
}

/// Only descriptive metadata is editable; storage coordinates are fixed at
/// registration.
#[derive(Debug, Clone, Default)]
pub struct UpdateDocument {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_uses_deleted_flag() {
        let now = Utc::now();
        let mut doc = Document {
            id: Uuid::new_v4(),
            name: "Plan.pdf".to_string(),
            description: None,
            mime_type: "application/pdf".to_string(),
            url: "https://files.example.com/plan.pdf".to_string(),
            file_path: "docs/plan.pdf".to_string(),
            size: 2048,
            is_deleted: false,
            deleted_at: None,
            uploaded_by: None,
            created_at: now,
            updated_at: now,
        };

        assert!(doc.soft_delete(now));
        assert!(doc.is_deleted);
        assert!(!doc.is_active());
        assert!(doc.restore(now));
        assert!(!doc.is_deleted);
    }

    #[test]
    fn test_mime_type_serializes_as_type() {
        let now = Utc::now();
        let doc = Document {
            id: Uuid::new_v4(),
            name: "a".to_string(),
            description: None,
            mime_type: "image/png".to_string(),
            url: "u".to_string(),
            file_path: "p".to_string(),
            size: 1,
            is_deleted: false,
            deleted_at: None,
            uploaded_by: None,
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["type"], "image/png");
        assert_eq!(json["filePath"], "p");
    }
}
