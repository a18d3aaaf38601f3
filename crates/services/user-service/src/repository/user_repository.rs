//! User repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, QueryFilter,
    Set, Unchanged,
};
use thiserror::Error;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use domain::User;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Storage failures. Absence of a record is not one of them.
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

/// User repository trait for dependency injection.
///
/// Lookups return `Ok(None)` when no record matches; `Err` is reserved for
/// infrastructure failures.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user
    async fn create_user(&self, user: &User) -> Result<(), RepositoryError>;

    /// Find user by ID
    async fn get_user(&self, id: &str) -> Result<Option<User>, RepositoryError>;

    /// Find user by exact user name
    async fn get_user_by_user_name(&self, user_name: &str)
        -> Result<Option<User>, RepositoryError>;

    /// Find user by exact email address
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;

    /// Overwrite the stored attributes and password hash of an existing user
    async fn update_user(&self, user: &User) -> Result<(), RepositoryError>;
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
    async fn create_user(&self, user: &User) -> Result<(), RepositoryError> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(user.id.clone()),
            user_name: Set(user.attributes.user_name.clone()),
            email: Set(user.attributes.email.clone()),
            password_hash: Set(user.password_hash.clone()),
            created_at: Set(now),
            modified_at: Set(now),
        };

        active_model.insert(&self.db).await?;
        Ok(())
    }

    async fn get_user(&self, id: &str) -> Result<Option<User>, RepositoryError> {
        let result = UserEntity::find_by_id(id.to_owned()).one(&self.db).await?;

        Ok(result.map(User::from))
    }

    async fn get_user_by_user_name(
        &self,
        user_name: &str,
    ) -> Result<Option<User>, RepositoryError> {
        let result = UserEntity::find()
            .filter(user::Column::UserName.eq(user_name))
            .one(&self.db)
            .await?;

        Ok(result.map(User::from))
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?;

        Ok(result.map(User::from))
    }

    async fn update_user(&self, user: &User) -> Result<(), RepositoryError> {
        // created_at is left untouched; a missing row surfaces as RecordNotUpdated
        let active = ActiveModel {
            id: Unchanged(user.id.clone()),
            user_name: Set(user.attributes.user_name.clone()),
            email: Set(user.attributes.email.clone()),
            password_hash: Set(user.password_hash.clone()),
            created_at: NotSet,
            modified_at: Set(chrono::Utc::now()),
        };

        active.update(&self.db).await?;
        Ok(())
    }
}
