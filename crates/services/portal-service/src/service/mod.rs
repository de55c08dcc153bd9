//! Service layer - business logic.
//!
//! Lookups by id take the raw path segment: a malformed id behaves exactly
//! like an unknown one and yields `None`.

mod alliance_service;
mod auth_service;
mod container;
mod document_service;
mod resource_service;
mod search_service;
mod section_service;
mod user_service;

pub use alliance_service::{AllianceManager, AllianceService};
pub use auth_service::{AuthService, Authenticator, Claims, LoginResponse};
pub use container::{Repositories, Services};
pub use document_service::{DocumentManager, DocumentService};
pub use resource_service::{ResourceManager, ResourceService};
pub use search_service::{
    SearchHits, SearchManager, SearchPagination, SearchRequest, SearchResults, SearchService,
};
pub use section_service::{SectionManager, SectionService};
pub use user_service::{UserManager, UserService};

use chrono::Utc;
use uuid::Uuid;

use domain::SoftDelete;

/// Parse a path id; malformed ids are treated as absent.
pub(crate) fn parse_id(id: &str) -> Option<Uuid> {
    Uuid::parse_str(id).ok()
}

/// Soft delete `record`, or `None` if it was already deleted.
pub(crate) fn soft_deleted<T: SoftDelete>(mut record: T) -> Option<T> {
    record.soft_delete(Utc::now()).then_some(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_rejects_garbage() {
        assert!(parse_id("not-a-uuid").is_none());
        assert!(parse_id("").is_none());
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string()), Some(id));
    }
}
