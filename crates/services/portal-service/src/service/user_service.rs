//! User service - account administration.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

use common::{AppError, AppResult};
use domain::{
    CreateUser, NewUser, Password, SoftDelete, UpdateUser, User, UserRole, EMAIL_TAKEN,
};

use super::{parse_id, soft_deleted};
use crate::repository::UserRepository;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    async fn list_users(&self, include_deleted: bool) -> AppResult<Vec<User>>;

    async fn get_user(&self, id: &str) -> AppResult<Option<User>>;

    /// Create an account; emails are unique across active and deleted users
    async fn create_user(&self, data: CreateUser) -> AppResult<User>;

    async fn update_user(&self, id: &str, changes: UpdateUser) -> AppResult<Option<User>>;

    /// Assign a role to a non-admin account
    async fn change_role(&self, id: &str, role: UserRole) -> AppResult<Option<User>>;

    /// `None` if unknown or already deleted
    async fn delete_user(&self, id: &str) -> AppResult<Option<User>>;

    /// Active users come back unchanged
    async fn restore_user(&self, id: &str) -> AppResult<Option<User>>;
}

/// Concrete implementation of UserService using repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    async fn find(&self, id: &str) -> AppResult<Option<User>> {
        match parse_id(id) {
            Some(id) => self.repo.find_by_id(id).await,
            None => Ok(None),
        }
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[async_trait]
impl UserService for UserManager {
    async fn list_users(&self, include_deleted: bool) -> AppResult<Vec<User>> {
        self.repo.list(include_deleted).await
    }

    async fn get_user(&self, id: &str) -> AppResult<Option<User>> {
        self.find(id).await
    }

    async fn create_user(&self, data: CreateUser) -> AppResult<User> {
        data.check_account_shape()?;

        let email = normalize_email(&data.email);
        if self.repo.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict(EMAIL_TAKEN));
        }

        let password_hash = data
            .password
            .as_deref()
            .map(Password::new)
            .transpose()?
            .map(Password::into_string);

        let user = self
            .repo
            .create(NewUser {
                name: data.name.trim().to_string(),
                email,
                password_hash,
                role: data.role,
                is_admin: data.is_admin,
            })
            .await?;

        tracing::info!(user_id = %user.id, is_admin = user.is_admin, "User created");
        Ok(user)
    }

    async fn update_user(&self, id: &str, mut changes: UpdateUser) -> AppResult<Option<User>> {
        let Some(mut user) = self.find(id).await? else {
            return Ok(None);
        };

        if let Some(email) = changes.email.take() {
            let email = normalize_email(&email);
            if email != user.email {
                if let Some(other) = self.repo.find_by_email(&email).await? {
                    if other.id != user.id {
                        return Err(AppError::conflict(EMAIL_TAKEN));
                    }
                }
            }
            changes.email = Some(email);
        }

        user.apply(changes, Utc::now());
        let saved = self.repo.save(&user).await?;
        tracing::info!(user_id = %saved.id, "User updated");
        Ok(Some(saved))
    }

    async fn change_role(&self, id: &str, role: UserRole) -> AppResult<Option<User>> {
        let Some(mut user) = self.find(id).await? else {
            return Ok(None);
        };

        user.change_role(role, Utc::now())?;
        let saved = self.repo.save(&user).await?;
        tracing::info!(user_id = %saved.id, role = %role, "User role changed");
        Ok(Some(saved))
    }

    async fn delete_user(&self, id: &str) -> AppResult<Option<User>> {
        let Some(user) = self.find(id).await?.and_then(soft_deleted) else {
            return Ok(None);
        };

        let saved = self.repo.save(&user).await?;
        tracing::info!(user_id = %saved.id, "User soft-deleted");
        Ok(Some(saved))
    }

    async fn restore_user(&self, id: &str) -> AppResult<Option<User>> {
        let Some(mut user) = self.find(id).await? else {
            return Ok(None);
        };

        if !user.restore(Utc::now()) {
            return Ok(Some(user));
        }

        let saved = self.repo.save(&user).await?;
        tracing::info!(user_id = %saved.id, "User restored");
        Ok(Some(saved))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockUserRepository;
    use mockall::predicate::eq;
    use uuid::Uuid;

    fn user(is_active: bool) -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            name: "Luis".to_string(),
            email: "luis@example.com".to_string(),
            password_hash: None,
            role: Some(UserRole::User),
            is_admin: false,
            is_active,
            deleted_at: (!is_active).then_some(now),
            created_at: now,
            updated_at: now,
        }
    }

    fn create_request(email: &str) -> CreateUser {
        CreateUser {
            name: " Luis ".to_string(),
            email: email.to_string(),
            password: None,
            role: Some(UserRole::Director),
            is_admin: false,
        }
    }

    #[tokio::test]
    async fn test_get_user_with_malformed_id_is_none() {
        let repo = MockUserRepository::new();
        let service = UserManager::new(Arc::new(repo));

        assert!(service.get_user("123").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_user_rejects_duplicate_email() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .withf(|email| email == "luis@example.com")
            .returning(|_| Ok(Some(user(false))));
        repo.expect_create().never();

        let service = UserManager::new(Arc::new(repo));
        let result = service.create_user(create_request("LUIS@example.com")).await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_create_user_losing_email_race_is_conflict() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_create()
            .times(1)
            .returning(|_| Err(AppError::conflict(EMAIL_TAKEN)));

        let service = UserManager::new(Arc::new(repo));
        let result = service.create_user(create_request("luis@example.com")).await;

        assert!(matches!(result, Err(AppError::Conflict(msg)) if msg == EMAIL_TAKEN));
    }

    #[tokio::test]
    async fn test_create_user_normalizes_and_persists() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_create()
            .withf(|new_user| {
                new_user.email == "ana@example.com"
                    && new_user.name == "Luis"
                    && new_user.password_hash.is_none()
                    && new_user.role == Some(UserRole::Director)
            })
            .times(1)
            .returning(|new_user| {
                let mut u = user(true);
                u.email = new_user.email;
                u.role = new_user.role;
                Ok(u)
            });

        let service = UserManager::new(Arc::new(repo));
        let created = service
            .create_user(create_request(" Ana@Example.com"))
            .await
            .unwrap();

        assert_eq!(created.email, "ana@example.com");
        assert!(created.is_director());
    }

    #[tokio::test]
    async fn test_create_admin_hashes_password() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_create()
            .withf(|new_user| {
                new_user
                    .password_hash
                    .as_deref()
                    .is_some_and(|h| h.starts_with("$argon2"))
            })
            .returning(|new_user| {
                let mut u = user(true);
                u.is_admin = true;
                u.role = None;
                u.password_hash = new_user.password_hash;
                Ok(u)
            });

        let service = UserManager::new(Arc::new(repo));
        let created = service
            .create_user(CreateUser {
                name: "Root".to_string(),
                email: "root@example.com".to_string(),
                password: Some("rootpassword".to_string()),
                role: None,
                is_admin: true,
            })
            .await
            .unwrap();

        assert!(created.is_admin);
    }

    #[tokio::test]
    async fn test_create_user_without_role_is_rejected() {
        let repo = MockUserRepository::new();
        let service = UserManager::new(Arc::new(repo));

        let mut request = create_request("x@example.com");
        request.role = None;
        assert!(matches!(
            service.create_user(request).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_already_deleted_is_none() {
        let deleted = user(false);
        let id = deleted.id;

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .with(eq(id))
            .returning(move |_| Ok(Some(deleted.clone())));
        repo.expect_save().never();

        let service = UserManager::new(Arc::new(repo));
        assert!(service.delete_user(&id.to_string()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_restore_active_user_is_unchanged() {
        let active = user(true);
        let id = active.id;
        let expected = active.clone();

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(active.clone())));
        repo.expect_save().never();

        let service = UserManager::new(Arc::new(repo));
        let restored = service.restore_user(&id.to_string()).await.unwrap();
        assert_eq!(restored, Some(expected));
    }

    #[tokio::test]
    async fn test_restore_deleted_user_clears_marker() {
        let deleted = user(false);
        let id = deleted.id;

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(deleted.clone())));
        repo.expect_save()
            .withf(|u| u.is_active && u.deleted_at.is_none())
            .times(1)
            .returning(|u| Ok(u.clone()));

        let service = UserManager::new(Arc::new(repo));
        let restored = service.restore_user(&id.to_string()).await.unwrap().unwrap();
        assert!(restored.is_active);
    }
}
