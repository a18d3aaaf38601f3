//! User service - Handles user-related business logic.
//!
//! Every collaborator failure is reclassified here into a [`DomainError`];
//! nothing from the repository or the tools escapes unwrapped. Each method
//! awaits its collaborators one after another and never retries.

use async_trait::async_trait;
use std::sync::Arc;

use domain::patch::{self, Patch};
use domain::{
    DomainError, DomainResult, IdTool, PasswordError, PasswordTool, User, UserAttributes,
};

use crate::repository::{RepositoryError, UserRepository};

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Create, validate and store a new user
    async fn create_user(&self, user_name: &str, email: &str, password: &str)
        -> DomainResult<User>;

    /// Get user by ID
    async fn get_user(&self, user_id: &str) -> DomainResult<User>;

    /// Get user by email
    async fn get_user_by_email(&self, email: &str) -> DomainResult<User>;

    /// Get user by user name
    async fn get_user_by_user_name(&self, user_name: &str) -> DomainResult<User>;

    /// Apply a JSON Patch to the user's attributes
    async fn patch_user(&self, user_id: &str, raw_patch: &[u8]) -> DomainResult<()>;

    /// Look a user up by user name or email and verify the password
    async fn validate_credentials(
        &self,
        user_name: &str,
        email: &str,
        password: &str,
    ) -> DomainResult<User>;
}

/// Concrete implementation of UserService.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
    ids: Arc<dyn IdTool>,
    passwords: Arc<dyn PasswordTool>,
}

impl UserManager {
    /// Create new user service instance with its collaborators
    pub fn new(
        repo: Arc<dyn UserRepository>,
        ids: Arc<dyn IdTool>,
        passwords: Arc<dyn PasswordTool>,
    ) -> Self {
        Self {
            repo,
            ids,
            passwords,
        }
    }

    /// Reject malformed IDs before any I/O
    fn ensure_valid_id(&self, user_id: &str) -> DomainResult<()> {
        if self.ids.is_valid(user_id) {
            Ok(())
        } else {
            Err(DomainError::invalid_input("format of userID is invalid"))
        }
    }
}

/// Patch a copy of the attributes and decode the result.
fn patched_attributes(
    original: &UserAttributes,
    patch: &Patch,
) -> DomainResult<UserAttributes> {
    let current = serde_json::to_vec(original)
        .map_err(|e| system_error("failed to marshal existing user", e))?;

    let patched = patch::apply(patch, &current)?;
    if patch::equal(&current, &patched) {
        return Err(no_change());
    }

    let attributes: UserAttributes = serde_json::from_slice(&patched)
        .map_err(|e| system_error("could not decode patched user", e))?;

    // Keys outside the attribute document are dropped by the decode above
    if &attributes == original {
        return Err(no_change());
    }

    Ok(attributes)
}

/// Classify a collaborator failure as a System error.
fn system_error<E>(message: &'static str, cause: E) -> DomainError
where
    E: std::error::Error + Send + Sync + 'static,
{
    tracing::warn!(error = %cause, "{}", message);
    DomainError::system(message).with_cause(cause)
}

fn no_change() -> DomainError {
    DomainError::invalid_input("patch does not effect any change")
}

/// Map a repository lookup onto the domain taxonomy
fn found(lookup: Result<Option<User>, RepositoryError>) -> DomainResult<User> {
    match lookup {
        Ok(Some(user)) => Ok(user),
        Ok(None) => Err(DomainError::not_found("user does not exist")),
        Err(e) => Err(system_error("failed to retrieve user", e)),
    }
}

#[async_trait]
impl UserService for UserManager {
    #[tracing::instrument(skip(self, password))]
    async fn create_user(
        &self,
        user_name: &str,
        email: &str,
        password: &str,
    ) -> DomainResult<User> {
        if user_name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(DomainError::invalid_input(
                "each of userName, email, password must not be empty",
            ));
        }

        let id = self
            .ids
            .generate()
            .map_err(|e| system_error("failed to generate valid ID", e))?;

        // The hash, not the plaintext, is what gets validated and stored
        let password_hash = self
            .passwords
            .hash(password)
            .map_err(|e| system_error("failed to hash password", e))?;

        let user = User::new(id, user_name.to_string(), email.to_string(), password_hash);
        user.validate(self.ids.as_ref(), self.passwords.as_ref())
            .map_err(|e| {
                DomainError::invalid_input(e.to_string())
                    .wrap_message("user is invalid")
                    .with_cause(e)
            })?;

        self.repo
            .create_user(&user)
            .await
            .map_err(|e| system_error("failed to store new user", e))?;

        tracing::debug!(user_id = %user.id, "user created");
        Ok(user)
    }

    #[tracing::instrument(skip(self))]
    async fn get_user(&self, user_id: &str) -> DomainResult<User> {
        self.ensure_valid_id(user_id)?;
        found(self.repo.get_user(user_id).await)
    }

    #[tracing::instrument(skip(self))]
    async fn get_user_by_email(&self, email: &str) -> DomainResult<User> {
        if email.is_empty() {
            return Err(DomainError::invalid_input("email must not be empty"));
        }
        found(self.repo.get_user_by_email(email).await)
    }

    #[tracing::instrument(skip(self))]
    async fn get_user_by_user_name(&self, user_name: &str) -> DomainResult<User> {
        if user_name.is_empty() {
            return Err(DomainError::invalid_input("username must not be empty"));
        }
        found(self.repo.get_user_by_user_name(user_name).await)
    }

    #[tracing::instrument(skip(self, raw_patch))]
    async fn patch_user(&self, user_id: &str, raw_patch: &[u8]) -> DomainResult<()> {
        self.ensure_valid_id(user_id)?;
        let patch = patch::decode(raw_patch)?;

        let mut user = found(self.repo.get_user(user_id).await)?;

        // Only attributes are exposed to the patch, so id and password stay put
        user.attributes = patched_attributes(&user.attributes, &patch)
            .map_err(|e| e.wrap_message("failed to patch user"))?;

        // The patch grammar knows nothing about field rules; always revalidate
        user.validate(self.ids.as_ref(), self.passwords.as_ref())
            .map_err(|e| {
                DomainError::invalid_input("patch would leave user in invalid state").with_cause(e)
            })?;

        self.repo
            .update_user(&user)
            .await
            .map_err(|e| system_error("failed to update user with patched attributes", e))?;

        tracing::debug!(user_id = %user.id, "user patched");
        Ok(())
    }

    #[tracing::instrument(skip(self, password))]
    async fn validate_credentials(
        &self,
        user_name: &str,
        email: &str,
        password: &str,
    ) -> DomainResult<User> {
        if password.is_empty() {
            return Err(DomainError::invalid_input("password must not be empty"));
        }

        let lookup = if !user_name.is_empty() {
            self.repo.get_user_by_user_name(user_name).await
        } else if !email.is_empty() {
            self.repo.get_user_by_email(email).await
        } else {
            return Err(DomainError::invalid_input("must provide either username or email"));
        };
        let user = found(lookup)?;

        match self.passwords.check(&user.password_hash, password) {
            Ok(()) => Ok(user),
            Err(PasswordError::Mismatch) => {
                Err(DomainError::unauthorized("credentials are invalid"))
            }
            Err(e) => Err(system_error("failed to validate password", e)),
        }
    }
}
