//! Resource domain entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::link::Link;
use crate::search::normalize;
use crate::soft_delete::impl_soft_delete_by_active_flag;

/// Learning resource; belongs to exactly one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: Uuid,
    pub section_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub links: Vec<Link>,
    pub is_active: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl_soft_delete_by_active_flag!(Resource);

impl Resource {
    pub fn apply(&mut self, changes: UpdateResource, at: DateTime<Utc>) {
        if let Some(section_id) = changes.section_id {
            self.section_id = section_id;
        }
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(description) = changes.description {
            self.description = Some(description);
        }
        if let Some(links) = changes.links {
            self.links = links;
        }
        self.updated_at = at;
    }

    /// Links whose label equals `label`, ignoring case and accents.
    pub fn links_labelled<'a>(&'a self, label: &str) -> impl Iterator<Item = &'a Link> + 'a {
        let wanted = normalize(label);
        self.links
            .iter()
            .filter(move |link| normalize(&link.label) == wanted)
    }
}

#[derive(Debug, Clone)]
pub struct CreateResource {
    pub section_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateResource {
    pub section_id: Option<Uuid>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub links: Option<Vec<Link>>,
}

/// A link found by label, with the resource that carries it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct LabelledLink {
    pub resource_id: Uuid,
    pub resource_name: String,
    pub section_id: Uuid,
    pub label: String,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_links_labelled_ignores_case_and_accents() {
        let now = Utc::now();
        let resource = Resource {
            id: Uuid::new_v4(),
            section_id: Uuid::new_v4(),
            name: "Guía".to_string(),
            description: None,
            links: vec![
                Link::new("UNAL", "https://unal.edu.co/a"),
                Link::new("Unál", "https://unal.edu.co/b"),
                Link::new("UdeA", "https://udea.edu.co"),
            ],
            is_active: true,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        };

        let urls: Vec<_> = resource
            .links_labelled("unal")
            .map(|l| l.url.as_str())
            .collect();
        assert_eq!(urls, vec!["https://unal.edu.co/a", "https://unal.edu.co/b"]);
    }
}
