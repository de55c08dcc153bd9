//! User handlers: login, profile and account administration.

use axum::{
    extract::{Extension, Path, Query, State},
    routing::{get, patch, post},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use common::{AppError, AppResult, OptionExt};
use domain::{CreateUser, UpdateUser, UserResponse, UserRole};

use crate::extractors::ValidatedJson;
use crate::middleware::{require_admin, CurrentUser};
use crate::service::LoginResponse;
use crate::state::AppState;
use crate::types::{ApiResponse, Created, ListParams};

const USER_NOT_FOUND: &str = "Usuario no encontrado";

/// Login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "El email no es válido"))]
    #[schema(example = "director@scalalearning.org")]
    pub email: String,
    /// Required for administrator accounts only
    #[schema(example = "password123")]
    pub password: Option<String>,
}

/// User creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 120, message = "El nombre es obligatorio"))]
    #[schema(example = "María Pérez")]
    pub name: String,
    #[validate(email(message = "El email no es válido"))]
    #[schema(example = "maria@scalalearning.org")]
    pub email: String,
    /// Administrators only
    #[validate(length(min = 8, message = "La contraseña debe tener al menos 8 caracteres"))]
    pub password: Option<String>,
    /// Required unless `isAdmin` is set
    pub role: Option<UserRole>,
    #[serde(default)]
    pub is_admin: bool,
}

impl From<CreateUserRequest> for CreateUser {
    fn from(req: CreateUserRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            password: req.password,
            role: req.role,
            is_admin: req.is_admin,
        }
    }
}

/// User update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 120, message = "El nombre no puede estar vacío"))]
    pub name: Option<String>,
    #[validate(email(message = "El email no es válido"))]
    pub email: Option<String>,
}

/// Role change request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ChangeRoleRequest {
    pub role: UserRole,
}

/// Public user routes
pub fn login_routes() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

/// Authenticated user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/me", get(get_current_user))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
        .route("/restore/:id", patch(restore_user))
        .route("/role/:id", patch(change_role))
}

/// Log in and obtain a bearer token
#[utoipa::path(
    post,
    path = "/api/users/login",
    tag = "Users",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> AppResult<ApiResponse<LoginResponse>> {
    let response = state.services.auth().login(&req.email, req.password).await?;
    Ok(ApiResponse::with_message(response, "Inicio de sesión exitoso"))
}

/// Profile of the authenticated caller
#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user profile", body = UserResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Account no longer exists")
    )
)]
pub async fn get_current_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<UserResponse>> {
    let user = state
        .services
        .users()
        .get_user(&current_user.id.to_string())
        .await?
        .ok_or_not_found(USER_NOT_FOUND)?;

    Ok(ApiResponse::success(user.into()))
}

/// List users (admin only)
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(ListParams),
    responses(
        (status = 200, description = "List of users", body = Vec<UserResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only")
    )
)]
pub async fn list_users(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<ApiResponse<Vec<UserResponse>>> {
    require_admin(&current_user)?;

    let users = state.services.users().list_users(params.include_deleted).await?;
    Ok(ApiResponse::success(
        users.into_iter().map(UserResponse::from).collect(),
    ))
}

/// Create a user (admin only)
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn create_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateUserRequest>,
) -> AppResult<Created<UserResponse>> {
    require_admin(&current_user)?;

    let user = state.services.users().create_user(req.into()).await?;
    Ok(Created::new(user.into(), "Usuario creado exitosamente"))
}

/// Get a user by ID (admin only)
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User profile", body = UserResponse),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<UserResponse>> {
    require_admin(&current_user)?;

    let user = state
        .services
        .users()
        .get_user(&id)
        .await?
        .ok_or_not_found(USER_NOT_FOUND)?;

    Ok(ApiResponse::success(user.into()))
}

/// Update a user (admin only)
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn update_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateUserRequest>,
) -> AppResult<ApiResponse<UserResponse>> {
    require_admin(&current_user)?;

    let changes = UpdateUser {
        name: req.name.map(|n| n.trim().to_string()),
        email: req.email,
    };
    let user = state
        .services
        .users()
        .update_user(&id, changes)
        .await?
        .ok_or_not_found(USER_NOT_FOUND)?;

    Ok(ApiResponse::with_message(
        user.into(),
        "Usuario actualizado exitosamente",
    ))
}

/// Soft-delete a user (admin only)
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted", body = UserResponse),
        (status = 400, description = "Cannot delete own account"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "User not found or already deleted")
    )
)]
pub async fn delete_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<UserResponse>> {
    require_admin(&current_user)?;

    if Uuid::parse_str(&id).ok() == Some(current_user.id) {
        return Err(AppError::bad_request("No puedes eliminar tu propia cuenta"));
    }

    let user = state
        .services
        .users()
        .delete_user(&id)
        .await?
        .ok_or_not_found(USER_NOT_FOUND)?;

    Ok(ApiResponse::with_message(
        user.into(),
        "Usuario eliminado exitosamente",
    ))
}

/// Restore a soft-deleted user (admin only)
#[utoipa::path(
    patch,
    path = "/api/users/restore/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User restored", body = UserResponse),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "User not found")
    )
)]
pub async fn restore_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<UserResponse>> {
    require_admin(&current_user)?;

    let user = state
        .services
        .users()
        .restore_user(&id)
        .await?
        .ok_or_not_found(USER_NOT_FOUND)?;

    Ok(ApiResponse::with_message(
        user.into(),
        "Usuario restaurado exitosamente",
    ))
}

/// Change the role of a non-admin user (admin only)
#[utoipa::path(
    patch,
    path = "/api/users/role/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "User ID")),
    request_body = ChangeRoleRequest,
    responses(
        (status = 200, description = "Role changed", body = UserResponse),
        (status = 400, description = "Administrators carry no role"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "User not found")
    )
)]
pub async fn change_role(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<ChangeRoleRequest>,
) -> AppResult<ApiResponse<UserResponse>> {
    require_admin(&current_user)?;

    let user = state
        .services
        .users()
        .change_role(&id, req.role)
        .await?
        .ok_or_not_found(USER_NOT_FOUND)?;

    Ok(ApiResponse::with_message(
        user.into(),
        "Rol actualizado exitosamente",
    ))
}
