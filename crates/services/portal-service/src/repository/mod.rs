//! Repository layer for data access.
//!
//! Repositories return every record regardless of its soft delete state
//! unless a method says otherwise; services decide what to expose.

use common::AppError;
use sea_orm::{sea_query::Expr, Condition, DbErr, IdenStatic, SqlErr};

pub mod entities;
mod alliance_repository;
mod document_repository;
mod resource_repository;
mod search_log_repository;
mod section_repository;
mod user_repository;

pub use alliance_repository::{AllianceRepository, AllianceStore};
pub use document_repository::{DocumentRepository, DocumentStore};
pub use resource_repository::{ResourceRepository, ResourceStore};
pub use search_log_repository::{SearchLogRepository, SearchLogStore};
pub use section_repository::{SectionRepository, SectionStore};
pub use user_repository::{UserRepository, UserStore};

#[cfg(any(test, feature = "test-utils"))]
pub use alliance_repository::MockAllianceRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use document_repository::MockDocumentRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use resource_repository::MockResourceRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use search_log_repository::MockSearchLogRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use section_repository::MockSectionRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;

/// Case-insensitive POSIX regex match of any pattern against any column.
pub(crate) fn matches_any<C: IdenStatic>(columns: &[C], patterns: &[String]) -> Condition {
    columns.iter().fold(Condition::any(), |condition, column| {
        patterns.iter().fold(condition, |condition, pattern| {
            condition.add(Expr::cust_with_values(
                format!("\"{}\" ~* ?", column.as_str()),
                [pattern.clone()],
            ))
        })
    })
}

/// Map a unique-constraint violation to a 409 carrying `message`.
pub(crate) fn conflict_on_unique(err: DbErr, message: &str) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::conflict(message),
        _ => AppError::from(err),
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_other_db_errors_stay_internal() {
        let err = conflict_on_unique(DbErr::Custom("connection reset".into()), "taken");
        assert!(matches!(err, AppError::Database(_)));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
