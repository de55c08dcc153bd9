//! Domain layer - Core portal entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! entities, their soft delete lifecycle, password hashing and the search
//! text rules.

pub mod alliance;
pub mod constants;
pub mod document;
pub mod error;
pub mod link;
pub mod password;
pub mod resource;
pub mod search;
pub mod section;
pub mod soft_delete;
pub mod user;

pub use alliance::{Alliance, CreateAlliance, UpdateAlliance};
pub use constants::*;
pub use document::{CreateDocument, Document, UpdateDocument};
pub use error::{DomainError, DomainResult};
pub use link::Link;
pub use password::Password;
pub use resource::{CreateResource, LabelledLink, Resource, UpdateResource};
pub use search::{NewSearchLog, PageWindow, SearchLog, SearchMode, SearchPlan};
pub use section::{CreateSection, Section, UpdateSection};
pub use soft_delete::SoftDelete;
pub use user::{CreateUser, NewUser, UpdateUser, User, UserResponse, UserRole};
