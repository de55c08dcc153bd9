//! HTTP middleware.

mod auth;

pub use auth::{
    auth_middleware, require_admin, require_director, require_director_or_admin, CurrentUser,
};
