//! Search service - keyword search across alliances, resources and sections.
//!
//! There is no ranking: each collection is paged independently with the same
//! window and results keep insertion order. `total` is the sum of the three
//! match counts.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use common::{AppError, AppResult};
use domain::search::{clamp_limit, normalize};
use domain::{
    Alliance, NewSearchLog, PageWindow, Resource, SearchLog, SearchMode, SearchPlan, Section,
    MAX_SEARCH_TERM_LENGTH,
};

use crate::repository::{
    AllianceRepository, ResourceRepository, SearchLogRepository, SectionRepository,
};

/// A validated search call
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub query: String,
    pub mode: SearchMode,
    pub window: PageWindow,
    /// Role the caller claims, recorded in the search log only
    pub role: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SearchHits {
    pub alliances: Vec<Alliance>,
    pub resources: Vec<Resource>,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SearchPagination {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    pub query: String,
    pub normalized_query: String,
    #[serde(rename = "type")]
    pub mode: SearchMode,
    pub keywords: Vec<String>,
    pub results: SearchHits,
    pub pagination: SearchPagination,
}

#[async_trait]
pub trait SearchService: Send + Sync {
    /// Run a search and record it in the search log
    async fn search(&self, request: SearchRequest) -> AppResult<SearchResults>;

    /// Newest search log entries
    async fn recent(&self, limit: Option<i64>) -> AppResult<Vec<SearchLog>>;
}

pub struct SearchManager {
    alliances: Arc<dyn AllianceRepository>,
    resources: Arc<dyn ResourceRepository>,
    sections: Arc<dyn SectionRepository>,
    logs: Arc<dyn SearchLogRepository>,
}

impl SearchManager {
    pub fn new(
        alliances: Arc<dyn AllianceRepository>,
        resources: Arc<dyn ResourceRepository>,
        sections: Arc<dyn SectionRepository>,
        logs: Arc<dyn SearchLogRepository>,
    ) -> Self {
        Self {
            alliances,
            resources,
            sections,
            logs,
        }
    }

    async fn record(&self, term: &str, role: Option<String>) {
        let entry = NewSearchLog {
            term: term.to_string(),
            normalized_term: normalize(term),
            user_role: role,
        };

        if let Err(e) = self.logs.create(entry).await {
            tracing::warn!(error = %e, "Failed to record search log");
        }
    }
}

/// Reject blank and over-long queries; returns the trimmed term.
fn validate_query(query: &str) -> AppResult<&str> {
    let term = query.trim();
    if term.is_empty() {
        return Err(AppError::validation(
            "El parámetro de búsqueda 'q' es obligatorio",
        ));
    }
    if term.chars().count() > MAX_SEARCH_TERM_LENGTH {
        return Err(AppError::validation(format!(
            "El término de búsqueda no puede superar {} caracteres",
            MAX_SEARCH_TERM_LENGTH
        )));
    }
    Ok(term)
}

#[async_trait]
impl SearchService for SearchManager {
    async fn search(&self, request: SearchRequest) -> AppResult<SearchResults> {
        let term = validate_query(&request.query)?;
        let role = request
            .role
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());

        self.record(term, role).await;

        let plan = SearchPlan::new(term, request.mode);
        let window = request.window;

        let ((alliances, alliance_total), (resources, resource_total), (sections, section_total)) =
            tokio::try_join!(
                self.alliances.search(&plan.patterns, window),
                self.resources.search(&plan.patterns, window),
                self.sections.search(&plan.patterns, window),
            )?;

        let total = alliance_total + resource_total + section_total;
        tracing::debug!(
            query = term,
            mode = ?request.mode,
            keywords = plan.keywords.len(),
            total,
            "Search completed"
        );

        Ok(SearchResults {
            query: term.to_string(),
            normalized_query: plan.normalized,
            mode: request.mode,
            keywords: plan.keywords,
            results: SearchHits {
                alliances,
                resources,
                sections,
            },
            pagination: SearchPagination {
                page: window.page,
                limit: window.limit,
                total,
            },
        })
    }

    async fn recent(&self, limit: Option<i64>) -> AppResult<Vec<SearchLog>> {
        self.logs.recent(clamp_limit(limit)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{
        MockAllianceRepository, MockResourceRepository, MockSearchLogRepository,
        MockSectionRepository,
    };
    use chrono::Utc;
    use uuid::Uuid;

    fn section(title: &str) -> Section {
        let now = Utc::now();
        Section {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: String::new(),
            is_active: true,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn empty_repos() -> (
        MockAllianceRepository,
        MockResourceRepository,
        MockSectionRepository,
    ) {
        let mut alliances = MockAllianceRepository::new();
        alliances
            .expect_search()
            .returning(|_, _| Ok((vec![], 0)));
        let mut resources = MockResourceRepository::new();
        resources
            .expect_search()
            .returning(|_, _| Ok((vec![], 3)));
        let sections = MockSectionRepository::new();
        (alliances, resources, sections)
    }

    fn request(query: &str, mode: SearchMode) -> SearchRequest {
        SearchRequest {
            query: query.to_string(),
            mode,
            window: PageWindow::clamp(Some(2), Some(100)),
            role: Some("director".to_string()),
        }
    }

    #[tokio::test]
    async fn test_search_sums_totals_and_logs() {
        let (alliances, resources, mut sections) = empty_repos();
        sections
            .expect_search()
            .withf(|patterns, window| patterns.len() == 2 && window.limit == 50)
            .returning(|_, _| Ok((vec![section("Dirección")], 4)));

        let mut logs = MockSearchLogRepository::new();
        logs.expect_create()
            .withf(|entry| {
                entry.term == "El Director de la Alianza"
                    && entry.normalized_term == "el director de la alianza"
                    && entry.user_role.as_deref() == Some("director")
            })
            .times(1)
            .returning(|entry| {
                Ok(SearchLog {
                    id: Uuid::new_v4(),
                    term: entry.term,
                    normalized_term: entry.normalized_term,
                    user_role: entry.user_role,
                    created_at: Utc::now(),
                })
            });

        let service = SearchManager::new(
            Arc::new(alliances),
            Arc::new(resources),
            Arc::new(sections),
            Arc::new(logs),
        );
        let results = service
            .search(request("  El Director de la Alianza ", SearchMode::Smart))
            .await
            .unwrap();

        assert_eq!(results.keywords, vec!["director", "alianza"]);
        assert_eq!(results.pagination.total, 7);
        assert_eq!(results.pagination.page, 2);
        assert_eq!(results.pagination.limit, 50);
        assert_eq!(results.results.sections.len(), 1);
    }

    #[tokio::test]
    async fn test_log_failure_does_not_fail_search() {
        let (alliances, resources, mut sections) = empty_repos();
        sections.expect_search().returning(|_, _| Ok((vec![], 0)));

        let mut logs = MockSearchLogRepository::new();
        logs.expect_create()
            .returning(|_| Err(AppError::internal("disk full")));

        let service = SearchManager::new(
            Arc::new(alliances),
            Arc::new(resources),
            Arc::new(sections),
            Arc::new(logs),
        );

        let results = service
            .search(request("alianza", SearchMode::Exact))
            .await
            .unwrap();
        assert_eq!(results.mode, SearchMode::Exact);
        assert_eq!(results.pagination.total, 3);
    }

    #[tokio::test]
    async fn test_blank_or_long_query_rejected() {
        let service = SearchManager::new(
            Arc::new(MockAllianceRepository::new()),
            Arc::new(MockResourceRepository::new()),
            Arc::new(MockSectionRepository::new()),
            Arc::new(MockSearchLogRepository::new()),
        );

        assert!(matches!(
            service.search(request("   ", SearchMode::Smart)).await,
            Err(AppError::Validation(_))
        ));
        let long = "a".repeat(MAX_SEARCH_TERM_LENGTH + 1);
        assert!(matches!(
            service.search(request(&long, SearchMode::Smart)).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_recent_clamps_limit() {
        let mut logs = MockSearchLogRepository::new();
        logs.expect_recent()
            .withf(|limit| *limit == 50)
            .times(1)
            .returning(|_| Ok(vec![]));

        let service = SearchManager::new(
            Arc::new(MockAllianceRepository::new()),
            Arc::new(MockResourceRepository::new()),
            Arc::new(MockSectionRepository::new()),
            Arc::new(logs),
        );

        assert!(service.recent(Some(500)).await.unwrap().is_empty());
    }
}
