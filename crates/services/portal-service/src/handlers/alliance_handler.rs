//! Alliance handlers.

use axum::{
    extract::{Extension, Path, Query, State},
    routing::{get, patch},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use common::{AppResult, OptionExt};
use domain::{Alliance, CreateAlliance, UpdateAlliance};

use crate::extractors::ValidatedJson;
use crate::middleware::{require_admin, CurrentUser};
use crate::state::AppState;
use crate::types::{into_links, ApiResponse, Created, LinkRequest, ListParams};

const ALLIANCE_NOT_FOUND: &str = "Alianza no encontrada";

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAllianceRequest {
    #[validate(length(min = 1, max = 200, message = "El nombre es obligatorio"))]
    #[schema(example = "Universidad Nacional de Colombia")]
    pub name: String,
    /// Acronym
    #[validate(length(min = 1, max = 50, message = "Las siglas son obligatorias"))]
    #[schema(example = "UNAL")]
    pub siglas: String,
    #[validate(url(message = "La URL no es válida"))]
    pub url: Option<String>,
    #[serde(default)]
    #[validate(nested)]
    pub logos: Vec<LinkRequest>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateAllianceRequest {
    #[validate(length(min = 1, max = 200, message = "El nombre no puede estar vacío"))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 50, message = "Las siglas no pueden estar vacías"))]
    pub siglas: Option<String>,
    #[validate(url(message = "La URL no es válida"))]
    pub url: Option<String>,
    /// Replaces the whole logo list
    #[validate(nested)]
    pub logos: Option<Vec<LinkRequest>>,
}

pub fn alliance_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_alliances).post(create_alliance))
        .route(
            "/:id",
            get(get_alliance)
                .put(update_alliance)
                .delete(delete_alliance),
        )
        .route("/restore/:id", patch(restore_alliance))
}

/// List alliances
#[utoipa::path(
    get,
    path = "/api/alliances",
    tag = "Alliances",
    security(("bearer_auth" = [])),
    params(ListParams),
    responses(
        (status = 200, description = "List of alliances", body = Vec<Alliance>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_alliances(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<ApiResponse<Vec<Alliance>>> {
    let alliances = state
        .services
        .alliances()
        .list_alliances(params.include_deleted)
        .await?;
    Ok(ApiResponse::success(alliances))
}

/// Get an alliance by ID
#[utoipa::path(
    get,
    path = "/api/alliances/{id}",
    tag = "Alliances",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Alliance ID")),
    responses(
        (status = 200, description = "Alliance", body = Alliance),
        (status = 404, description = "Alliance not found")
    )
)]
pub async fn get_alliance(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Alliance>> {
    let alliance = state
        .services
        .alliances()
        .get_alliance(&id)
        .await?
        .ok_or_not_found(ALLIANCE_NOT_FOUND)?;
    Ok(ApiResponse::success(alliance))
}

/// Create an alliance
#[utoipa::path(
    post,
    path = "/api/alliances",
    tag = "Alliances",
    security(("bearer_auth" = [])),
    request_body = CreateAllianceRequest,
    responses(
        (status = 201, description = "Alliance created", body = Alliance),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn create_alliance(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateAllianceRequest>,
) -> AppResult<Created<Alliance>> {
    let alliance = state
        .services
        .alliances()
        .create_alliance(CreateAlliance {
            name: req.name.trim().to_string(),
            siglas: req.siglas.trim().to_string(),
            url: req.url,
            logos: into_links(req.logos),
        })
        .await?;
    Ok(Created::new(alliance, "Alianza creada exitosamente"))
}

/// Update an alliance
#[utoipa::path(
    put,
    path = "/api/alliances/{id}",
    tag = "Alliances",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Alliance ID")),
    request_body = UpdateAllianceRequest,
    responses(
        (status = 200, description = "Alliance updated", body = Alliance),
        (status = 404, description = "Alliance not found")
    )
)]
pub async fn update_alliance(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateAllianceRequest>,
) -> AppResult<ApiResponse<Alliance>> {
    let changes = UpdateAlliance {
        name: req.name.map(|n| n.trim().to_string()),
        siglas: req.siglas.map(|s| s.trim().to_string()),
        url: req.url,
        logos: req.logos.map(into_links),
    };
    let alliance = state
        .services
        .alliances()
        .update_alliance(&id, changes)
        .await?
        .ok_or_not_found(ALLIANCE_NOT_FOUND)?;
    Ok(ApiResponse::with_message(
        alliance,
        "Alianza actualizada exitosamente",
    ))
}

/// Soft-delete an alliance (admin only)
#[utoipa::path(
    delete,
    path = "/api/alliances/{id}",
    tag = "Alliances",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Alliance ID")),
    responses(
        (status = 200, description = "Alliance deleted", body = Alliance),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Alliance not found or already deleted")
    )
)]
pub async fn delete_alliance(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Alliance>> {
    require_admin(&current_user)?;

    let alliance = state
        .services
        .alliances()
        .delete_alliance(&id)
        .await?
        .ok_or_not_found(ALLIANCE_NOT_FOUND)?;
    Ok(ApiResponse::with_message(
        alliance,
        "Alianza eliminada exitosamente",
    ))
}

/// Restore an alliance (admin only)
#[utoipa::path(
    patch,
    path = "/api/alliances/restore/{id}",
    tag = "Alliances",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Alliance ID")),
    responses(
        (status = 200, description = "Alliance restored", body = Alliance),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Alliance not found")
    )
)]
pub async fn restore_alliance(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Alliance>> {
    require_admin(&current_user)?;

    let alliance = state
        .services
        .alliances()
        .restore_alliance(&id)
        .await?
        .ok_or_not_found(ALLIANCE_NOT_FOUND)?;
    Ok(ApiResponse::with_message(
        alliance,
        "Alianza restaurada exitosamente",
    ))
}
