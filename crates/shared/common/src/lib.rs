//! Common utilities shared across the portal crates.
//!
//! This crate provides:
//! - Unified error handling rendered as the portal's JSON error envelope
//! - Configuration structures

pub mod config;
pub mod error;

pub use config::*;
pub use error::{AppError, AppResult, OptionExt};
