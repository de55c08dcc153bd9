//! Labelled URLs attached to resources (links) and alliances (logos).

use serde::{Deserialize, Serialize};

/// A labelled URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Link {
    /// Display label, usually an alliance acronym
    pub label: String,
    /// Target URL
    pub url: String,
}

impl Link {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
        }
    }
}
