//! User domain entity and related types.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{ROLE_DIRECTOR, ROLE_USER};
use crate::error::{DomainError, DomainResult};
use crate::soft_delete::impl_soft_delete_by_active_flag;

/// Portal roles. Administrators carry no role; they are flagged with
/// `is_admin` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Director,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => ROLE_USER,
            UserRole::Director => ROLE_DIRECTOR,
        }
    }

    pub fn is_director(&self) -> bool {
        matches!(self, UserRole::Director)
    }
}

impl FromStr for UserRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_USER => Ok(UserRole::User),
            ROLE_DIRECTOR => Ok(UserRole::Director),
            other => Err(DomainError::validation(format!(
                "Rol inválido '{}'. Debe ser 'user' o 'director'",
                other
            ))),
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User domain entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// Argon2 hash; only administrators have one
    pub password_hash: Option<String>,
    pub role: Option<UserRole>,
    pub is_admin: bool,
    pub is_active: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl_soft_delete_by_active_flag!(User);

impl User {
    /// Whether the account passes the director gate.
    pub fn is_director(&self) -> bool {
        self.role.is_some_and(|r| r.is_director())
    }

    /// Apply a partial update.
    pub fn apply(&mut self, changes: UpdateUser, at: DateTime<Utc>) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(email) = changes.email {
            self.email = email;
        }
        self.updated_at = at;
    }

    /// Change the role of a non-admin account.
    pub fn change_role(&mut self, role: UserRole, at: DateTime<Utc>) -> DomainResult<()> {
        if self.is_admin {
            return Err(DomainError::validation(
                "Los administradores no tienen rol asignable",
            ));
        }
        self.role = Some(role);
        self.updated_at = at;
        Ok(())
    }
}

/// User creation data
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub password: Option<String>,
    pub role: Option<UserRole>,
    pub is_admin: bool,
}

impl CreateUser {
    /// Enforce the account-shape rules: non-admins need a role, admins need a
    /// password and carry no role.
    pub fn check_account_shape(&self) -> DomainResult<()> {
        if self.is_admin {
            if self.role.is_some() {
                return Err(DomainError::validation(
                    "Un administrador no puede tener rol",
                ));
            }
            if self.password.is_none() {
                return Err(DomainError::validation(
                    "La contraseña es obligatoria para administradores",
                ));
            }
        } else if self.role.is_none() {
            return Err(DomainError::validation(
                "El rol es obligatorio para usuarios no administradores",
            ));
        } else if self.password.is_some() {
            return Err(DomainError::validation(
                "Solo los administradores tienen contraseña",
            ));
        }
        Ok(())
    }
}

/// Record handed to storage once the password (if any) is hashed
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub role: Option<UserRole>,
    pub is_admin: bool,
}

/// User update data
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// `user` or `director`; absent for administrators
    pub role: Option<UserRole>,
    pub is_admin: bool,
    pub is_active: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            is_admin: user.is_admin,
            is_active: user.is_active,
            deleted_at: user.deleted_at,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
