//! Domain layer - Core user entity, validation rules and error taxonomy.
//!
//! This crate is independent of transport and storage. Identifier and
//! password handling are reached through the collaborator traits in
//! [`tools`], and partial updates go through the JSON Patch adapter in
//! [`patch`].

pub mod constants;
pub mod error;
pub mod patch;
pub mod tools;
pub mod user;

pub use constants::*;
pub use error::{DomainError, DomainResult, ErrorCause, ErrorKind};
pub use tools::{IdError, IdTool, PasswordError, PasswordTool};
pub use user::{User, UserAttributes, ValidationError};

#[cfg(any(test, feature = "test-utils"))]
pub use tools::{MockIdTool, MockPasswordTool};
