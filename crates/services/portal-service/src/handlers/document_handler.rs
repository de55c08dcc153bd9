//! Document handlers. Files live in external storage; these endpoints
//! register and curate their metadata.

use axum::{
    extract::{Extension, Path, Query, State},
    routing::{get, patch},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use common::{AppResult, OptionExt};
use domain::{CreateDocument, Document, UpdateDocument};

use crate::extractors::ValidatedJson;
use crate::middleware::{require_director_or_admin, CurrentUser};
use crate::state::AppState;
use crate::types::{ApiResponse, Created, ListParams};

const DOCUMENT_NOT_FOUND: &str = "Documento no encontrado";

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDocumentRequest {
    #[validate(length(min = 1, max = 255, message = "El nombre es obligatorio"))]
    #[schema(example = "plan-de-estudios.pdf")]
    pub name: String,
    pub description: Option<String>,
    /// MIME type
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "El tipo de archivo es obligatorio"))]
    #[schema(example = "application/pdf")]
    pub mime_type: String,
    #[validate(url(message = "La URL no es válida"))]
    pub url: String,
    #[validate(length(min = 1, message = "La ruta del archivo es obligatoria"))]
    pub file_path: String,
    /// Size in bytes
    #[validate(range(min = 0, message = "El tamaño no puede ser negativo"))]
    pub size: i64,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateDocumentRequest {
    #[validate(length(min = 1, max = 255, message = "El nombre no puede estar vacío"))]
    pub name: Option<String>,
    pub description: Option<String>,
}

pub fn document_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_documents).post(create_document))
        .route(
            "/:id",
            get(get_document)
                .put(update_document)
                .delete(delete_document),
        )
        .route("/restore/:id", patch(restore_document))
}

/// List documents
#[utoipa::path(
    get,
    path = "/api/documents",
    tag = "Documents",
    security(("bearer_auth" = [])),
    params(ListParams),
    responses(
        (status = 200, description = "List of documents", body = Vec<Document>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_documents(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<ApiResponse<Vec<Document>>> {
    let documents = state
        .services
        .documents()
        .list_documents(params.include_deleted)
        .await?;
    Ok(ApiResponse::success(documents))
}

/// Get a document by ID
#[utoipa::path(
    get,
    path = "/api/documents/{id}",
    tag = "Documents",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Document ID")),
    responses(
        (status = 200, description = "Document", body = Document),
        (status = 404, description = "Document not found")
    )
)]
pub async fn get_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Document>> {
    let document = state
        .services
        .documents()
        .get_document(&id)
        .await?
        .ok_or_not_found(DOCUMENT_NOT_FOUND)?;
    Ok(ApiResponse::success(document))
}

/// Register a document (director or admin)
#[utoipa::path(
    post,
    path = "/api/documents",
    tag = "Documents",
    security(("bearer_auth" = [])),
    request_body = CreateDocumentRequest,
    responses(
        (status = 201, description = "Document registered", body = Document),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - Director or admin only")
    )
)]
pub async fn create_document(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateDocumentRequest>,
) -> AppResult<Created<Document>> {
    require_director_or_admin(&current_user)?;

    let document = state
        .services
        .documents()
        .create_document(CreateDocument {
            name: req.name.trim().to_string(),
            description: req.description,
            mime_type: req.mime_type,
            url: req.url,
            file_path: req.file_path,
            size: req.size,
            uploaded_by: Some(current_user.id),
        })
        .await?;
    Ok(Created::new(document, "Documento registrado exitosamente"))
}

/// Update document metadata (director or admin)
#[utoipa::path(
    put,
    path = "/api/documents/{id}",
    tag = "Documents",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Document ID")),
    request_body = UpdateDocumentRequest,
    responses(
        (status = 200, description = "Document updated", body = Document),
        (status = 403, description = "Forbidden - Director or admin only"),
        (status = 404, description = "Document not found")
    )
)]
pub async fn update_document(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateDocumentRequest>,
) -> AppResult<ApiResponse<Document>> {
    require_director_or_admin(&current_user)?;

    let changes = UpdateDocument {
        name: req.name.map(|n| n.trim().to_string()),
        description: req.description,
    };
    let document = state
        .services
        .documents()
        .update_document(&id, changes)
        .await?
        .ok_or_not_found(DOCUMENT_NOT_FOUND)?;
    Ok(ApiResponse::with_message(
        document,
        "Documento actualizado exitosamente",
    ))
}

/// Soft-delete a document (director or admin)
#[utoipa::path(
    delete,
    path = "/api/documents/{id}",
    tag = "Documents",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Document ID")),
    responses(
        (status = 200, description = "Document deleted", body = Document),
        (status = 403, description = "Forbidden - Director or admin only"),
        (status = 404, description = "Document not found or already deleted")
    )
)]
pub async fn delete_document(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Document>> {
    require_director_or_admin(&current_user)?;

    let document = state
        .services
        .documents()
        .delete_document(&id)
        .await?
        .ok_or_not_found(DOCUMENT_NOT_FOUND)?;
    Ok(ApiResponse::with_message(
        document,
        "Documento eliminado exitosamente",
    ))
}

/// Restore a document (director or admin)
#[utoipa::path(
    patch,
    path = "/api/documents/restore/{id}",
    tag = "Documents",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Document ID")),
    responses(
        (status = 200, description = "Document restored", body = Document),
        (status = 403, description = "Forbidden - Director or admin only"),
        (status = 404, description = "Document not found")
    )
)]
pub async fn restore_document(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Document>> {
    require_director_or_admin(&current_user)?;

    let document = state
        .services
        .documents()
        .restore_document(&id)
        .await?
        .ok_or_not_found(DOCUMENT_NOT_FOUND)?;
    Ok(ApiResponse::with_message(
        document,
        "Documento restaurado exitosamente",
    ))
}
