//! Resource handlers.

use axum::{
    extract::{Extension, Path, Query, State},
    routing::{get, patch},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use common::{AppResult, OptionExt};
use domain::{CreateResource, LabelledLink, Resource, UpdateResource};

use crate::extractors::ValidatedJson;
use crate::middleware::{require_director_or_admin, CurrentUser};
use crate::state::AppState;
use crate::types::{into_links, ApiResponse, Created, LinkRequest, ListParams};

const RESOURCE_NOT_FOUND: &str = "Recurso no encontrado";
const SECTION_NOT_FOUND: &str = "Sección no encontrada";

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateResourceRequest {
    /// Owning section
    pub section_id: Uuid,
    #[validate(length(min = 1, max = 200, message = "El nombre es obligatorio"))]
    #[schema(example = "Guía de fracciones")]
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    #[validate(nested)]
    pub links: Vec<LinkRequest>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResourceRequest {
    /// Move the resource to another active section
    pub section_id: Option<Uuid>,
    #[validate(length(min = 1, max = 200, message = "El nombre no puede estar vacío"))]
    pub name: Option<String>,
    pub description: Option<String>,
    /// Replaces the whole link list
    #[validate(nested)]
    pub links: Option<Vec<LinkRequest>>,
}

pub fn resource_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_resources).post(create_resource))
        .route(
            "/:id",
            get(get_resource)
                .put(update_resource)
                .delete(delete_resource),
        )
        .route("/section/:section_id", get(list_section_resources))
        .route("/links/:label", get(links_by_label))
        .route("/restore/:id", patch(restore_resource))
}

/// List resources
#[utoipa::path(
    get,
    path = "/api/resources",
    tag = "Resources",
    security(("bearer_auth" = [])),
    params(ListParams),
    responses(
        (status = 200, description = "List of resources", body = Vec<Resource>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_resources(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<ApiResponse<Vec<Resource>>> {
    let resources = state
        .services
        .resources()
        .list_resources(params.include_deleted)
        .await?;
    Ok(ApiResponse::success(resources))
}

/// List the resources of one section
#[utoipa::path(
    get,
    path = "/api/resources/section/{sectionId}",
    tag = "Resources",
    security(("bearer_auth" = [])),
    params(
        ("sectionId" = String, Path, description = "Section ID"),
        ListParams
    ),
    responses(
        (status = 200, description = "Resources of the section", body = Vec<Resource>),
        (status = 404, description = "Section not found")
    )
)]
pub async fn list_section_resources(
    State(state): State<AppState>,
    Path(section_id): Path<String>,
    Query(params): Query<ListParams>,
) -> AppResult<ApiResponse<Vec<Resource>>> {
    let resources = state
        .services
        .resources()
        .list_by_section(&section_id, params.include_deleted)
        .await?
        .ok_or_not_found(SECTION_NOT_FOUND)?;
    Ok(ApiResponse::success(resources))
}

/// Links of active resources carrying a label
#[utoipa::path(
    get,
    path = "/api/resources/links/{label}",
    tag = "Resources",
    security(("bearer_auth" = [])),
    params(("label" = String, Path, description = "Link label, matched ignoring case and accents")),
    responses(
        (status = 200, description = "Matching links", body = Vec<LabelledLink>)
    )
)]
pub async fn links_by_label(
    State(state): State<AppState>,
    Path(label): Path<String>,
) -> AppResult<ApiResponse<Vec<LabelledLink>>> {
    let links = state.services.resources().links_by_label(&label).await?;
    Ok(ApiResponse::success(links))
}

/// Get a resource by ID
#[utoipa::path(
    get,
    path = "/api/resources/{id}",
    tag = "Resources",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Resource ID")),
    responses(
        (status = 200, description = "Resource", body = Resource),
        (status = 404, description = "Resource not found")
    )
)]
pub async fn get_resource(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Resource>> {
    let resource = state
        .services
        .resources()
        .get_resource(&id)
        .await?
        .ok_or_not_found(RESOURCE_NOT_FOUND)?;
    Ok(ApiResponse::success(resource))
}

/// Create a resource (director or admin)
#[utoipa::path(
    post,
    path = "/api/resources",
    tag = "Resources",
    security(("bearer_auth" = [])),
    request_body = CreateResourceRequest,
    responses(
        (status = 201, description = "Resource created", body = Resource),
        (status = 400, description = "Validation error or unknown section"),
        (status = 403, description = "Forbidden - Director or admin only")
    )
)]
pub async fn create_resource(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateResourceRequest>,
) -> AppResult<Created<Resource>> {
    require_director_or_admin(&current_user)?;

    let resource = state
        .services
        .resources()
        .create_resource(CreateResource {
            section_id: req.section_id,
            name: req.name.trim().to_string(),
            description: req.description,
            links: into_links(req.links),
        })
        .await?;
    Ok(Created::new(resource, "Recurso creado exitosamente"))
}

/// Update a resource (director or admin)
#[utoipa::path(
    put,
    path = "/api/resources/{id}",
    tag = "Resources",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Resource ID")),
    request_body = UpdateResourceRequest,
    responses(
        (status = 200, description = "Resource updated", body = Resource),
        (status = 400, description = "Unknown target section"),
        (status = 403, description = "Forbidden - Director or admin only"),
        (status = 404, description = "Resource not found")
    )
)]
pub async fn update_resource(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateResourceRequest>,
) -> AppResult<ApiResponse<Resource>> {
    require_director_or_admin(&current_user)?;

    let changes = UpdateResource {
        section_id: req.section_id,
        name: req.name.map(|n| n.trim().to_string()),
        description: req.description,
        links: req.links.map(into_links),
    };
    let resource = state
        .services
        .resources()
        .update_resource(&id, changes)
        .await?
        .ok_or_not_found(RESOURCE_NOT_FOUND)?;
    Ok(ApiResponse::with_message(
        resource,
        "Recurso actualizado exitosamente",
    ))
}

/// Soft-delete a resource (director or admin)
#[utoipa::path(
    delete,
    path = "/api/resources/{id}",
    tag = "Resources",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Resource ID")),
    responses(
        (status = 200, description = "Resource deleted", body = Resource),
        (status = 403, description = "Forbidden - Director or admin only"),
        (status = 404, description = "Resource not found or already deleted")
    )
)]
pub async fn delete_resource(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Resource>> {
    require_director_or_admin(&current_user)?;

    let resource = state
        .services
        .resources()
        .delete_resource(&id)
        .await?
        .ok_or_not_found(RESOURCE_NOT_FOUND)?;
    Ok(ApiResponse::with_message(
        resource,
        "Recurso eliminado exitosamente",
    ))
}

/// Restore a resource (director or admin)
#[utoipa::path(
    patch,
    path = "/api/resources/restore/{id}",
    tag = "Resources",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Resource ID")),
    responses(
        (status = 200, description = "Resource restored", body = Resource),
        (status = 403, description = "Forbidden - Director or admin only"),
        (status = 404, description = "Resource not found")
    )
)]
pub async fn restore_resource(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Resource>> {
    require_director_or_admin(&current_user)?;

    let resource = state
        .services
        .resources()
        .restore_resource(&id)
        .await?
        .ok_or_not_found(RESOURCE_NOT_FOUND)?;
    Ok(ApiResponse::with_message(
        resource,
        "Recurso restaurado exitosamente",
    ))
}
