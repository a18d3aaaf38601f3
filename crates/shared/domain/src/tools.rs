//! Collaborator contracts for identifiers and password material.
//!
//! The domain never generates IDs or hashes on its own; it asks these tools
//! and validates what they hand back.

use thiserror::Error;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Failure to produce a fresh identifier.
#[derive(Error, Debug, Clone)]
#[error("id generation failed: {0}")]
pub struct IdError(pub String);

/// Failures reported by a [`PasswordTool`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PasswordError {
    /// Plaintext does not match the stored hash
    #[error("mismatched hash and password")]
    Mismatch,

    /// Stored hash could not be parsed
    #[error("malformed password hash: {0}")]
    Malformed(String),

    /// Hashing itself failed
    #[error("password hashing failed: {0}")]
    Hashing(String),
}

/// Generates and recognises user identifiers.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait IdTool: Send + Sync {
    /// Generate a fresh, globally unique identifier
    fn generate(&self) -> Result<String, IdError>;

    /// Pure format predicate
    fn is_valid(&self, id: &str) -> bool;
}

/// Produces and verifies salted password hashes.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait PasswordTool: Send + Sync {
    /// Hash a plaintext password
    fn hash(&self, plaintext: &str) -> Result<String, PasswordError>;

    /// Check that a value has the shape of a hash this tool produces.
    ///
    /// Says nothing about which plaintext it was made from.
    fn is_valid(&self, hash: &str) -> bool;

    /// Verify a plaintext against a stored hash
    fn check(&self, hash: &str, plaintext: &str) -> Result<(), PasswordError>;
}
