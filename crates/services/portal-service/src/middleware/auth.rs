//! Authentication middleware and role gates.

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Request},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::{
    UserRole, BEARER_TOKEN_PREFIX, FORBIDDEN_ADMIN, FORBIDDEN_DIRECTOR,
    FORBIDDEN_DIRECTOR_OR_ADMIN,
};

use crate::service::Claims;
use crate::state::AppState;

/// Caller authenticated from the bearer token.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
    pub role: Option<UserRole>,
    pub is_admin: bool,
}

impl CurrentUser {
    pub fn is_director(&self) -> bool {
        self.role.is_some_and(|r| r.is_director())
    }
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email,
            // Unknown role strings grant nothing
            role: claims.role.and_then(|r| r.parse().ok()),
            is_admin: claims.is_admin,
        }
    }
}

/// Director role, exact match.
///
/// No current route is director-only; every curating route also admits
/// administrators through [`require_director_or_admin`]. Kept for
/// director-only endpoints.
pub fn require_director(user: &CurrentUser) -> AppResult<()> {
    if user.is_director() {
        Ok(())
    } else {
        Err(AppError::forbidden(FORBIDDEN_DIRECTOR))
    }
}

/// Director role or the admin flag.
pub fn require_director_or_admin(user: &CurrentUser) -> AppResult<()> {
    if user.is_director() || user.is_admin {
        Ok(())
    } else {
        Err(AppError::forbidden(FORBIDDEN_DIRECTOR_OR_ADMIN))
    }
}

/// Admin flag only.
pub fn require_admin(user: &CurrentUser) -> AppResult<()> {
    if user.is_admin {
        Ok(())
    } else {
        Err(AppError::forbidden(FORBIDDEN_ADMIN))
    }
}

/// Authentication middleware that validates JWT tokens.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_token(&request)?;
    let claims = state.services.auth().verify_token(token)?;

    request.extensions_mut().insert(CurrentUser::from(claims));

    Ok(next.run(request).await)
}

/// Extract bearer token from Authorization header.
fn extract_token(request: &Request<Body>) -> AppResult<&str> {
    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix(BEARER_TOKEN_PREFIX))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(AppError::Unauthorized)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caller(role: Option<UserRole>, is_admin: bool) -> CurrentUser {
        CurrentUser {
            id: Uuid::new_v4(),
            email: "caller@example.com".to_string(),
            role,
            is_admin,
        }
    }

    #[test]
    fn test_director_or_admin_gate() {
        let err = require_director_or_admin(&caller(Some(UserRole::User), false)).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(ref m) if m == FORBIDDEN_DIRECTOR_OR_ADMIN));

        assert!(require_director_or_admin(&caller(Some(UserRole::Director), false)).is_ok());
        assert!(require_director_or_admin(&caller(None, true)).is_ok());
    }

    #[test]
    fn test_director_gate_is_exact() {
        assert!(require_director(&caller(Some(UserRole::Director), false)).is_ok());
        assert!(require_director(&caller(None, true)).is_err());
        assert!(require_director(&caller(Some(UserRole::User), false)).is_err());
    }

    #[test]
    fn test_admin_gate_ignores_role() {
        assert!(require_admin(&caller(None, true)).is_ok());
        let err = require_admin(&caller(Some(UserRole::Director), false)).unwrap_err();
        assert_eq!(err.user_message(), FORBIDDEN_ADMIN);
    }

    #[test]
    fn test_extract_token() {
        let request = Request::builder()
            .header(AUTHORIZATION, "Bearer abc.def")
            .body(Body::empty())
            .unwrap();
        assert_eq!(extract_token(&request).unwrap(), "abc.def");

        let request = Request::builder()
            .header(AUTHORIZATION, "Basic abc")
            .body(Body::empty())
            .unwrap();
        assert!(matches!(extract_token(&request), Err(AppError::Unauthorized)));

        let request = Request::builder().body(Body::empty()).unwrap();
        assert!(matches!(extract_token(&request), Err(AppError::Unauthorized)));
    }

    #[test]
    fn test_claims_with_unknown_role_grant_nothing() {
        let user = CurrentUser::from(Claims {
            sub: Uuid::new_v4(),
            email: "x@example.com".to_string(),
            role: Some("superuser".to_string()),
            is_admin: false,
            exp: 0,
            iat: 0,
        });
        assert!(user.role.is_none());
        assert!(require_director_or_admin(&user).is_err());
    }
}
