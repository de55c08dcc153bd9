//! HTTP handlers, one module per resource.

pub mod alliance_handler;
pub mod document_handler;
pub mod health_handler;
pub mod resource_handler;
pub mod search_handler;
pub mod section_handler;
pub mod user_handler;
