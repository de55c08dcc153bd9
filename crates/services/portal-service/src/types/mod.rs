//! Shared request and response types.

mod link;
mod query;
mod response;

pub use link::{into_links, LinkRequest};
pub use query::ListParams;
pub use response::{ApiResponse, Created};
