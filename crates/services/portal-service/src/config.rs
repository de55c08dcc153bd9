//! Portal configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use common::{AppError, AppResult, DatabaseConfig, JwtConfig, ServiceConfig};
use domain::{DEFAULT_JWT_EXPIRATION_HOURS, MIN_JWT_SECRET_LENGTH};

const DEV_JWT_SECRET: &str = "dev-secret-key-minimum-32-chars!!";

/// Portal configuration.
#[derive(Debug, Clone)]
pub struct PortalConfig {
    pub server: ServiceConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    /// Allowed CORS origins; empty means any origin
    pub cors_origins: Vec<String>,
    /// Prebuilt frontend bundle served for non-API paths
    pub static_dir: Option<PathBuf>,
}

fn parsed<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl PortalConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    /// Fails if `JWT_SECRET` is missing in a release build or shorter than
    /// `MIN_JWT_SECRET_LENGTH`.
    pub fn from_env() -> AppResult<Self> {
        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) => secret,
            Err(_) if cfg!(debug_assertions) => {
                tracing::warn!("JWT_SECRET not set, using insecure default for development");
                DEV_JWT_SECRET.to_string()
            }
            Err(_) => {
                return Err(AppError::internal(
                    "JWT_SECRET environment variable must be set in production",
                ))
            }
        };

        if jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(AppError::internal(format!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LENGTH
            )));
        }

        let server_defaults = ServiceConfig::default();
        let database_defaults = DatabaseConfig::default();

        Ok(Self {
            server: ServiceConfig {
                host: env::var("SERVER_HOST").unwrap_or(server_defaults.host),
                port: parsed("SERVER_PORT", server_defaults.port),
                ..server_defaults
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").unwrap_or(database_defaults.url),
                max_connections: parsed(
                    "DATABASE_MAX_CONNECTIONS",
                    database_defaults.max_connections,
                ),
                min_connections: parsed(
                    "DATABASE_MIN_CONNECTIONS",
                    database_defaults.min_connections,
                ),
            },
            jwt: JwtConfig {
                secret: jwt_secret,
                expiration_hours: parsed("JWT_EXPIRATION_HOURS", DEFAULT_JWT_EXPIRATION_HOURS),
            },
            cors_origins: env::var("CORS_ALLOWED_ORIGINS")
                .map(|v| parse_origins(&v))
                .unwrap_or_default(),
            static_dir: env::var("STATIC_DIR")
                .ok()
                .filter(|d| !d.trim().is_empty())
                .map(PathBuf::from),
        })
    }
}

/// Split a comma-separated origin list, dropping blanks.
pub fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins() {
        assert_eq!(
            parse_origins("http://localhost:5173, https://portal.example.org ,,"),
            vec!["http://localhost:5173", "https://portal.example.org"]
        );
        assert!(parse_origins("  ").is_empty());
    }
}
