//! User domain entity and its validation rules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::ValidateEmail;

use crate::constants::{MAX_EMAIL_LENGTH, MAX_PASSWORD_HASH_LENGTH, MAX_USER_NAME_LENGTH};
use crate::tools::{IdTool, PasswordTool};

/// Reasons a user fails validation, in the order they are checked.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("id format is invalid")]
    InvalidId,

    #[error("user name must not be empty")]
    EmptyUserName,

    #[error("user name must not be longer than {max} characters")]
    UserNameTooLong { max: usize },

    #[error("email must not be empty")]
    EmptyEmail,

    #[error("email must not be longer than {max} characters")]
    EmailTooLong { max: usize },

    #[error("email format is invalid")]
    InvalidEmail,

    #[error("password must not be empty")]
    EmptyPassword,

    #[error("password must not be longer than {max} characters")]
    PasswordTooLong { max: usize },

    #[error("password hash format is invalid")]
    InvalidPasswordHash,
}

/// The patchable part of a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAttributes {
    pub user_name: String,
    pub email: String,
}

/// User domain entity
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub attributes: UserAttributes,
    /// Stored hash, never plaintext
    #[serde(skip)]
    pub password_hash: String,
    /// Set by the persistence layer
    pub created_at: Option<DateTime<Utc>>,
    /// Set by the persistence layer
    pub modified_at: Option<DateTime<Utc>>,
}

// Don't expose hash in debug output (security)
impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("attributes", &self.attributes)
            .field("password_hash", &"[REDACTED]")
            .field("created_at", &self.created_at)
            .field("modified_at", &self.modified_at)
            .finish()
    }
}

impl User {
    /// Build an in-memory user that has not been persisted yet
    pub fn new(id: String, user_name: String, email: String, password_hash: String) -> Self {
        Self {
            id,
            attributes: UserAttributes { user_name, email },
            password_hash,
            created_at: None,
            modified_at: None,
        }
    }

    /// Check every field invariant.
    ///
    /// Checks run in a fixed order (id, user name, email, password) and the
    /// first failure is returned, so messages are deterministic. The
    /// password is only checked for hash shape, never for strength.
    pub fn validate(
        &self,
        ids: &dyn IdTool,
        passwords: &dyn PasswordTool,
    ) -> Result<(), ValidationError> {
        if !ids.is_valid(&self.id) {
            return Err(ValidationError::InvalidId);
        }

        let user_name = &self.attributes.user_name;
        if user_name.is_empty() {
            return Err(ValidationError::EmptyUserName);
        }
        if user_name.chars().count() > MAX_USER_NAME_LENGTH {
            return Err(ValidationError::UserNameTooLong {
                max: MAX_USER_NAME_LENGTH,
            });
        }

        let email = &self.attributes.email;
        if email.is_empty() {
            return Err(ValidationError::EmptyEmail);
        }
        if email.chars().count() > MAX_EMAIL_LENGTH {
            return Err(ValidationError::EmailTooLong {
                max: MAX_EMAIL_LENGTH,
            });
        }
        if !email.validate_email() {
            return Err(ValidationError::InvalidEmail);
        }

        if self.password_hash.is_empty() {
            return Err(ValidationError::EmptyPassword);
        }
        if self.password_hash.chars().count() > MAX_PASSWORD_HASH_LENGTH {
            return Err(ValidationError::PasswordTooLong {
                max: MAX_PASSWORD_HASH_LENGTH,
            });
        }
        if !passwords.is_valid(&self.password_hash) {
            return Err(ValidationError::InvalidPasswordHash);
        }

        Ok(())
    }
}
