//! OpenAPI documentation.

use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use domain::{
    Alliance, Document, LabelledLink, Link, Resource, SearchLog, SearchMode, Section,
    UserResponse, UserRole,
};

use crate::handlers::{
    alliance_handler::{CreateAllianceRequest, UpdateAllianceRequest},
    document_handler::{CreateDocumentRequest, UpdateDocumentRequest},
    health_handler::{HealthResponse, ServiceHealth},
    resource_handler::{CreateResourceRequest, UpdateResourceRequest},
    section_handler::{CreateSectionRequest, UpdateSectionRequest},
    user_handler::{ChangeRoleRequest, CreateUserRequest, LoginRequest, UpdateUserRequest},
};
use crate::service::{LoginResponse, SearchHits, SearchPagination, SearchResults};
use crate::types::LinkRequest;

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Scala Learning Portal API",
        description = "Educational portal: alliances, sections, resources, documents and search"
    ),
    paths(
        crate::handlers::health_handler::health_check,
        crate::handlers::user_handler::login,
        crate::handlers::user_handler::get_current_user,
        crate::handlers::user_handler::list_users,
        crate::handlers::user_handler::create_user,
        crate::handlers::user_handler::get_user,
        crate::handlers::user_handler::update_user,
        crate::handlers::user_handler::delete_user,
        crate::handlers::user_handler::restore_user,
        crate::handlers::user_handler::change_role,
        crate::handlers::section_handler::list_sections,
        crate::handlers::section_handler::get_section,
        crate::handlers::section_handler::create_section,
        crate::handlers::section_handler::update_section,
        crate::handlers::section_handler::delete_section,
        crate::handlers::section_handler::restore_section,
        crate::handlers::resource_handler::list_resources,
        crate::handlers::resource_handler::list_section_resources,
        crate::handlers::resource_handler::links_by_label,
        crate::handlers::resource_handler::get_resource,
        crate::handlers::resource_handler::create_resource,
        crate::handlers::resource_handler::update_resource,
        crate::handlers::resource_handler::delete_resource,
        crate::handlers::resource_handler::restore_resource,
        crate::handlers::alliance_handler::list_alliances,
        crate::handlers::alliance_handler::get_alliance,
        crate::handlers::alliance_handler::create_alliance,
        crate::handlers::alliance_handler::update_alliance,
        crate::handlers::alliance_handler::delete_alliance,
        crate::handlers::alliance_handler::restore_alliance,
        crate::handlers::document_handler::list_documents,
        crate::handlers::document_handler::get_document,
        crate::handlers::document_handler::create_document,
        crate::handlers::document_handler::update_document,
        crate::handlers::document_handler::delete_document,
        crate::handlers::document_handler::restore_document,
        crate::handlers::search_handler::search,
        crate::handlers::search_handler::recent_searches,
    ),
    components(
        schemas(
            HealthResponse,
            ServiceHealth,
            LoginRequest,
            LoginResponse,
            CreateUserRequest,
            UpdateUserRequest,
            ChangeRoleRequest,
            UserResponse,
            UserRole,
            CreateSectionRequest,
            UpdateSectionRequest,
            Section,
            CreateResourceRequest,
            UpdateResourceRequest,
            Resource,
            LabelledLink,
            CreateAllianceRequest,
            UpdateAllianceRequest,
            Alliance,
            CreateDocumentRequest,
            UpdateDocumentRequest,
            Document,
            Link,
            LinkRequest,
            SearchMode,
            SearchResults,
            SearchHits,
            SearchPagination,
            SearchLog,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Users", description = "Login and account administration"),
        (name = "Sections", description = "Portal sections"),
        (name = "Resources", description = "Learning resources grouped by section"),
        (name = "Alliances", description = "Partner institutions"),
        (name = "Documents", description = "Document metadata"),
        (name = "Search", description = "Public keyword search"),
    )
)]
pub struct ApiDoc;

/// Security scheme modifier.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_area() {
        let doc = ApiDoc::openapi();
        let paths: Vec<_> = doc.paths.paths.keys().cloned().collect();

        for path in [
            "/health",
            "/api/users/login",
            "/api/sections/{id}",
            "/api/resources/links/{label}",
            "/api/documents/restore/{id}",
            "/api/search",
        ] {
            assert!(paths.iter().any(|p| p == path), "missing {path}");
        }
        assert!(doc
            .components
            .is_some_and(|c| c.security_schemes.contains_key("bearer_auth")));
    }
}
