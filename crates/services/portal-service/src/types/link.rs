use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use domain::Link;

/// A labelled URL as sent by clients
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LinkRequest {
    #[validate(length(min = 1, message = "La etiqueta del enlace es obligatoria"))]
    #[schema(example = "UNAL")]
    pub label: String,
    #[validate(url(message = "La URL del enlace no es válida"))]
    #[schema(example = "https://unal.edu.co")]
    pub url: String,
}

impl From<LinkRequest> for Link {
    fn from(req: LinkRequest) -> Self {
        Link::new(req.label.trim(), req.url.trim())
    }
}

/// Convert a list of validated link requests.
pub fn into_links(links: Vec<LinkRequest>) -> Vec<Link> {
    links.into_iter().map(Link::from).collect()
}
