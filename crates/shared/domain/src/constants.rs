//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// User Roles
// =============================================================================

/// Regular portal user
pub const ROLE_USER: &str = "user";

/// Director role, allowed to curate sections and resources
pub const ROLE_DIRECTOR: &str = "director";

/// All valid role values (administrators carry no role)
pub const VALID_ROLES: &[&str] = &[ROLE_USER, ROLE_DIRECTOR];

/// Check if a role value is valid
pub fn is_valid_role(role: &str) -> bool {
    VALID_ROLES.contains(&role)
}

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Minimum name length requirement
pub const MIN_NAME_LENGTH: usize = 1;

// =============================================================================
// Authentication
// =============================================================================

/// Default JWT token expiration in hours
pub const DEFAULT_JWT_EXPIRATION_HOURS: i64 = 24;

/// Minimum JWT secret length (security requirement)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Seconds per hour (for token expiration calculation)
pub const SECONDS_PER_HOUR: i64 = 3600;

/// Authorization header prefix for Bearer tokens
pub const BEARER_TOKEN_PREFIX: &str = "Bearer ";

/// JWT token type identifier
pub const TOKEN_TYPE_BEARER: &str = "Bearer";

// =============================================================================
// Search
// =============================================================================

/// Default page size for search results
pub const DEFAULT_SEARCH_LIMIT: u64 = 10;

/// Hard cap on search page size
pub const MAX_SEARCH_LIMIT: u64 = 50;

/// Maximum number of keywords extracted from a query
pub const MAX_SEARCH_KEYWORDS: usize = 10;

/// Keywords of this many characters or fewer are discarded
pub const MIN_KEYWORD_EXCLUSIVE_LENGTH: usize = 2;

/// Longest accepted search term, in characters
pub const MAX_SEARCH_TERM_LENGTH: usize = 200;

// =============================================================================
// Role gate messages
// =============================================================================

pub const FORBIDDEN_DIRECTOR: &str = "Acceso denegado: se requiere rol de director";

pub const FORBIDDEN_DIRECTOR_OR_ADMIN: &str =
    "Acceso denegado: se requiere rol de director o administrador";

pub const FORBIDDEN_ADMIN: &str = "Acceso denegado: se requieren permisos de administrador";

// =============================================================================
// Conflict messages
// =============================================================================

pub const EMAIL_TAKEN: &str = "El email ya está registrado";
