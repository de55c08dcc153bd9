//! User repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use super::conflict_on_unique;
use common::AppResult;
use domain::{NewUser, User, EMAIL_TAKEN};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID, active or not
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find user by email, active or not
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// List users in creation order
    async fn list(&self, include_deleted: bool) -> AppResult<Vec<User>>;

    /// Insert a new user; a stored email yields `AppError::Conflict`
    async fn create(&self, user: NewUser) -> AppResult<User>;

    /// Persist every field of an existing user
    async fn save(&self, user: &User) -> AppResult<User>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?;

        Ok(result.map(User::from))
    }

    async fn list(&self, include_deleted: bool) -> AppResult<Vec<User>> {
        let mut query = UserEntity::find();
        if !include_deleted {
            query = query.filter(user::Column::IsActive.eq(true));
        }

        let models = query
            .order_by_asc(user::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        let now = Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(new_user.name),
            email: Set(new_user.email),
            password_hash: Set(new_user.password_hash),
            role: Set(new_user.role.map(|r| r.as_str().to_string())),
            is_admin: Set(new_user.is_admin),
            is_active: Set(true),
            deleted_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| conflict_on_unique(e, EMAIL_TAKEN))?;
        Ok(User::from(model))
    }

    async fn save(&self, user: &User) -> AppResult<User> {
        let model = ActiveModel::from(user)
            .update(&self.db)
            .await
            .map_err(|e| conflict_on_unique(e, EMAIL_TAKEN))?;
        Ok(User::from(model))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::mock_sql::{empty_db, statements};

    #[tokio::test]
    async fn test_list_hides_deleted_rows() {
        let store = UserStore::new(empty_db::<user::Model>());
        assert!(store.list(false).await.unwrap().is_empty());

        let sql = statements(store.db);
        assert_eq!(sql.len(), 1);
        assert!(sql[0].contains("\"is_active\" = $1"), "{}", sql[0]);
    }

    #[tokio::test]
    async fn test_list_with_deleted_has_no_filter() {
        let store = UserStore::new(empty_db::<user::Model>());
        store.list(true).await.unwrap();

        let sql = statements(store.db);
        assert!(!sql[0].contains("WHERE"), "{}", sql[0]);
        assert!(sql[0].contains("ORDER BY"));
    }
}
