//! Public search handlers.

use axum::{
    extract::{Query, State},
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::IntoParams;

use common::AppResult;
use domain::{PageWindow, SearchLog, SearchMode};

use crate::service::{SearchRequest, SearchResults};
use crate::state::AppState;
use crate::types::ApiResponse;

/// Raw search query string. Numbers arrive as text so that a malformed
/// `page` or `limit` falls back to its default instead of failing.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Free-text query, at most 200 characters
    pub q: Option<String>,
    /// Page number, clamped to at least 1
    pub page: Option<String>,
    /// Page size, clamped to 1..=50
    pub limit: Option<String>,
    /// `exact` or `smart` (default)
    #[serde(rename = "type")]
    pub mode: Option<String>,
    /// Caller role, recorded in the search log
    pub role: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RecentParams {
    /// Number of entries, clamped to 1..=50
    pub limit: Option<String>,
}

fn number(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|v| v.trim().parse().ok())
}

fn mode(raw: Option<&str>) -> AppResult<SearchMode> {
    match raw.map(str::trim).filter(|m| !m.is_empty()) {
        Some(m) => Ok(m.parse()?),
        None => Ok(SearchMode::default()),
    }
}

pub fn search_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(search))
        .route("/recent", get(recent_searches))
}

/// Search alliances, resources and sections
#[utoipa::path(
    get,
    path = "/api/search",
    tag = "Search",
    params(SearchParams),
    responses(
        (status = 200, description = "Search results", body = SearchResults),
        (status = 400, description = "Missing or invalid query")
    )
)]
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<ApiResponse<SearchResults>> {
    let request = SearchRequest {
        mode: mode(params.mode.as_deref())?,
        window: PageWindow::clamp(
            number(params.page.as_deref()),
            number(params.limit.as_deref()),
        ),
        query: params.q.unwrap_or_default(),
        role: params.role,
    };

    let results = state.services.search().search(request).await?;
    Ok(ApiResponse::success(results))
}

/// Most recent searches, newest first
#[utoipa::path(
    get,
    path = "/api/search/recent",
    tag = "Search",
    params(RecentParams),
    responses(
        (status = 200, description = "Recent search log entries", body = Vec<SearchLog>)
    )
)]
pub async fn recent_searches(
    State(state): State<AppState>,
    Query(params): Query<RecentParams>,
) -> AppResult<ApiResponse<Vec<SearchLog>>> {
    let logs = state
        .services
        .search()
        .recent(number(params.limit.as_deref()))
        .await?;
    Ok(ApiResponse::success(logs))
}
