//! Route configuration.

use axum::{
    http::{HeaderValue, Method},
    middleware,
    response::IntoResponse,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::AppError;

use crate::handlers::{
    alliance_handler::alliance_routes, document_handler::document_routes,
    health_handler::health_routes, resource_handler::resource_routes,
    search_handler::search_routes, section_handler::section_routes,
    user_handler::{login_routes, user_routes},
};
use crate::middleware::auth_middleware;
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    let auth = || middleware::from_fn_with_state(state.clone(), auth_middleware);

    let api = Router::new()
        // Login and search are public; everything else needs a bearer token
        .nest(
            "/users",
            login_routes().merge(user_routes().route_layer(auth())),
        )
        .nest("/sections", section_routes().route_layer(auth()))
        .nest("/resources", resource_routes().route_layer(auth()))
        .nest("/alliances", alliance_routes().route_layer(auth()))
        .nest("/documents", document_routes().route_layer(auth()))
        .nest("/search", search_routes())
        .fallback(route_not_found);

    let router = Router::new()
        .nest("/health", health_routes())
        .nest("/api", api)
        .merge(SwaggerUi::new("/api-docs").url("/openapi.json", ApiDoc::openapi()));

    // Non-API paths serve the frontend bundle when one is configured
    let router = match &state.config.static_dir {
        Some(dir) => router.fallback_service(
            ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html"))),
        ),
        None => router.fallback(route_not_found),
    };

    router
        .layer(cors_layer(&state.config.cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn route_not_found() -> impl IntoResponse {
    AppError::not_found("Ruta no encontrada")
}

/// Any origin when the list is empty.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let methods = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::PATCH,
        Method::DELETE,
        Method::OPTIONS,
    ];

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(methods)
        .allow_headers(Any)
}
