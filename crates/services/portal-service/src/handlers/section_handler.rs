//! Section handlers.

use axum::{
    extract::{Extension, Path, Query, State},
    routing::{get, patch},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use common::{AppResult, OptionExt};
use domain::{CreateSection, Section, UpdateSection};

use crate::extractors::ValidatedJson;
use crate::middleware::{require_admin, require_director_or_admin, CurrentUser};
use crate::state::AppState;
use crate::types::{ApiResponse, Created, ListParams};

const SECTION_NOT_FOUND: &str = "Sección no encontrada";

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateSectionRequest {
    #[validate(length(min = 1, max = 200, message = "El título es obligatorio"))]
    #[schema(example = "Matemáticas")]
    pub title: String,
    #[validate(length(min = 1, message = "La descripción es obligatoria"))]
    #[schema(example = "Recursos de matemáticas para primaria")]
    pub description: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateSectionRequest {
    #[validate(length(min = 1, max = 200, message = "El título no puede estar vacío"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "La descripción no puede estar vacía"))]
    pub description: Option<String>,
}

pub fn section_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_sections).post(create_section))
        .route(
            "/:id",
            get(get_section).put(update_section).delete(delete_section),
        )
        .route("/restore/:id", patch(restore_section))
}

/// List sections
#[utoipa::path(
    get,
    path = "/api/sections",
    tag = "Sections",
    security(("bearer_auth" = [])),
    params(ListParams),
    responses(
        (status = 200, description = "List of sections", body = Vec<Section>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_sections(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<ApiResponse<Vec<Section>>> {
    let sections = state
        .services
        .sections()
        .list_sections(params.include_deleted)
        .await?;
    Ok(ApiResponse::success(sections))
}

/// Get a section by ID
#[utoipa::path(
    get,
    path = "/api/sections/{id}",
    tag = "Sections",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Section ID")),
    responses(
        (status = 200, description = "Section", body = Section),
        (status = 404, description = "Section not found")
    )
)]
pub async fn get_section(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Section>> {
    let section = state
        .services
        .sections()
        .get_section(&id)
        .await?
        .ok_or_not_found(SECTION_NOT_FOUND)?;
    Ok(ApiResponse::success(section))
}

/// Create a section (director or admin)
#[utoipa::path(
    post,
    path = "/api/sections",
    tag = "Sections",
    security(("bearer_auth" = [])),
    request_body = CreateSectionRequest,
    responses(
        (status = 201, description = "Section created", body = Section),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - Director or admin only")
    )
)]
pub async fn create_section(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateSectionRequest>,
) -> AppResult<Created<Section>> {
    require_director_or_admin(&current_user)?;

    let section = state
        .services
        .sections()
        .create_section(CreateSection {
            title: req.title.trim().to_string(),
            description: req.description.trim().to_string(),
        })
        .await?;
    Ok(Created::new(section, "Sección creada exitosamente"))
}

/// Update a section (director or admin)
#[utoipa::path(
    put,
    path = "/api/sections/{id}",
    tag = "Sections",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Section ID")),
    request_body = UpdateSectionRequest,
    responses(
        (status = 200, description = "Section updated", body = Section),
        (status = 403, description = "Forbidden - Director or admin only"),
        (status = 404, description = "Section not found")
    )
)]
pub async fn update_section(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateSectionRequest>,
) -> AppResult<ApiResponse<Section>> {
    require_director_or_admin(&current_user)?;

    let changes = UpdateSection {
        title: req.title.map(|t| t.trim().to_string()),
        description: req.description.map(|d| d.trim().to_string()),
    };
    let section = state
        .services
        .sections()
        .update_section(&id, changes)
        .await?
        .ok_or_not_found(SECTION_NOT_FOUND)?;
    Ok(ApiResponse::with_message(
        section,
        "Sección actualizada exitosamente",
    ))
}

/// Soft-delete a section (admin only); its resources are left untouched
#[utoipa::path(
    delete,
    path = "/api/sections/{id}",
    tag = "Sections",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Section ID")),
    responses(
        (status = 200, description = "Section deleted", body = Section),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Section not found or already deleted")
    )
)]
pub async fn delete_section(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Section>> {
    require_admin(&current_user)?;

    let section = state
        .services
        .sections()
        .delete_section(&id)
        .await?
        .ok_or_not_found(SECTION_NOT_FOUND)?;
    Ok(ApiResponse::with_message(
        section,
        "Sección eliminada exitosamente",
    ))
}

/// Restore a section (admin only)
#[utoipa::path(
    patch,
    path = "/api/sections/restore/{id}",
    tag = "Sections",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Section ID")),
    responses(
        (status = 200, description = "Section restored", body = Section),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Section not found")
    )
)]
pub async fn restore_section(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Section>> {
    require_admin(&current_user)?;

    let section = state
        .services
        .sections()
        .restore_section(&id)
        .await?
        .ok_or_not_found(SECTION_NOT_FOUND)?;
    Ok(ApiResponse::with_message(
        section,
        "Sección restaurada exitosamente",
    ))
}
