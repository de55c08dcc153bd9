//! Authentication service - login and token verification.
//!
//! Administrators authenticate with email and password. Regular users and
//! directors hold no password and are identified by email alone.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use common::{AppError, AppResult, JwtConfig};
use domain::{Password, User, UserResponse, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};

use crate::repository::UserRepository;

/// Hash verified when the account is unknown, so both paths cost the same.
static DUMMY_HASH: Lazy<Option<String>> = Lazy::new(|| {
    Password::new("timing-equalizer-password")
        .ok()
        .map(Password::into_string)
});

/// JWT claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub role: Option<String>,
    pub is_admin: bool,
    pub exp: i64,
    pub iat: i64,
}

/// Returned after a successful login
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user: UserResponse,
    /// JWT access token
    pub token: String,
    /// Always "Bearer"
    pub token_type: String,
    /// Token lifetime in seconds
    pub expires_in: i64,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Authenticate an active account and issue a token
    async fn login(&self, email: &str, password: Option<String>) -> AppResult<LoginResponse>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

/// Concrete implementation of AuthService backed by the user repository.
pub struct Authenticator {
    users: Arc<dyn UserRepository>,
    jwt: JwtConfig,
}

impl Authenticator {
    pub fn new(users: Arc<dyn UserRepository>, jwt: JwtConfig) -> Self {
        Self { users, jwt }
    }

    fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt.secret.as_bytes()
    }

    /// Generate JWT token for a user
    fn generate_token(&self, user: &User) -> AppResult<(String, i64)> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(self.jwt.expiration_hours);

        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            role: user.role.map(|r| r.to_string()),
            is_admin: user.is_admin,
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret_bytes()),
        )?;

        Ok((token, self.jwt.expiration_hours * SECONDS_PER_HOUR))
    }
}

/// Whether `supplied` opens an account protected by `hash`.
fn password_matches(hash: &str, supplied: Option<&str>) -> bool {
    let stored = Password::from_hash(hash.to_string());
    match supplied {
        Some(plain) => stored.verify(plain),
        None => false,
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn login(&self, email: &str, password: Option<String>) -> AppResult<LoginResponse> {
        let email = email.trim().to_lowercase();
        let user = self
            .users
            .find_by_email(&email)
            .await?
            .filter(|u| u.is_active);

        let Some(user) = user else {
            if let Some(hash) = DUMMY_HASH.as_deref() {
                password_matches(hash, password.as_deref());
            }
            tracing::debug!("Login rejected for unknown or inactive account");
            return Err(AppError::InvalidCredentials);
        };

        if let Some(hash) = user.password_hash.as_deref() {
            if !password_matches(hash, password.as_deref()) {
                tracing::debug!(user_id = %user.id, "Login rejected: wrong password");
                return Err(AppError::InvalidCredentials);
            }
        }

        let (token, expires_in) = self.generate_token(&user)?;
        tracing::info!(user_id = %user.id, "User logged in");

        Ok(LoginResponse {
            user: UserResponse::from(user),
            token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in,
        })
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockUserRepository;
    use domain::UserRole;

    const SECRET: &str = "test-secret-key-with-at-least-32-chars";

    fn jwt() -> JwtConfig {
        JwtConfig {
            secret: SECRET.to_string(),
            expiration_hours: 2,
        }
    }

    fn account(password: Option<&str>, role: Option<UserRole>, is_active: bool) -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            name: "Marta".to_string(),
            email: "marta@example.com".to_string(),
            password_hash: password.map(|p| Password::new(p).unwrap().into_string()),
            role,
            is_admin: password.is_some(),
            is_active,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn service_with(user: Option<User>) -> Authenticator {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(move |_| Ok(user.clone()));
        Authenticator::new(Arc::new(repo), jwt())
    }

    #[tokio::test]
    async fn test_admin_login_requires_password() {
        let admin = account(Some("adminpass123"), None, true);
        let service = service_with(Some(admin.clone()));

        let response = service
            .login("Marta@Example.com ", Some("adminpass123".to_string()))
            .await
            .unwrap();
        assert_eq!(response.user.id, admin.id);
        assert_eq!(response.token_type, "Bearer");
        assert_eq!(response.expires_in, 2 * 3600);

        let claims = service.verify_token(&response.token).unwrap();
        assert_eq!(claims.sub, admin.id);
        assert!(claims.is_admin);
        assert_eq!(claims.role, None);

        assert!(matches!(
            service.login("marta@example.com", None).await,
            Err(AppError::InvalidCredentials)
        ));
        assert!(matches!(
            service
                .login("marta@example.com", Some("wrongpass".to_string()))
                .await,
            Err(AppError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_director_logs_in_by_email() {
        let director = account(None, Some(UserRole::Director), true);
        let service = service_with(Some(director));

        let response = service.login("marta@example.com", None).await.unwrap();
        let claims = service.verify_token(&response.token).unwrap();
        assert_eq!(claims.role.as_deref(), Some("director"));
        assert!(!claims.is_admin);
    }

    #[tokio::test]
    async fn test_unknown_or_inactive_account_rejected() {
        let service = service_with(None);
        assert!(matches!(
            service.login("nobody@example.com", None).await,
            Err(AppError::InvalidCredentials)
        ));

        let inactive = account(None, Some(UserRole::User), false);
        let service = service_with(Some(inactive));
        assert!(matches!(
            service.login("marta@example.com", None).await,
            Err(AppError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_verify_rejects_foreign_token() {
        let service = Authenticator::new(Arc::new(MockUserRepository::new()), jwt());
        let other = Authenticator::new(
            Arc::new(MockUserRepository::new()),
            JwtConfig {
                secret: "another-secret-key-with-32-characters!".to_string(),
                expiration_hours: 1,
            },
        );

        let (token, _) = other
            .generate_token(&account(None, Some(UserRole::User), true))
            .unwrap();
        assert!(matches!(service.verify_token(&token), Err(AppError::Jwt(_))));
        assert!(service.verify_token("garbage").is_err());
    }
}
