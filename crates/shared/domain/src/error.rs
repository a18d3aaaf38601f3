//! Domain-level errors.
//!
//! Every failure that leaves the domain service is one of four kinds. The
//! kind drives how an outer layer responds; the message carries context and
//! the optional cause is kept for diagnostics only.

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::constants::{
    CODE_INVALID_INPUT, CODE_RESOURCE_NOT_FOUND, CODE_SYSTEM_ERROR, CODE_UNAUTHORIZED,
    GENERIC_SYSTEM_MESSAGE,
};

/// Closed set of error classifications surfaced by the domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Caller-supplied data is malformed or fails validation
    InvalidInput,
    /// A referenced entity does not exist
    ResourceNotFound,
    /// Credentials do not match
    Unauthorized,
    /// Persistence or infrastructure failure, not the caller's fault
    System,
}

impl ErrorKind {
    /// Stable code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => CODE_INVALID_INPUT,
            ErrorKind::ResourceNotFound => CODE_RESOURCE_NOT_FOUND,
            ErrorKind::Unauthorized => CODE_UNAUTHORIZED,
            ErrorKind::System => CODE_SYSTEM_ERROR,
        }
    }

    /// Whether the caller is responsible for this failure
    pub fn is_caller_fault(&self) -> bool {
        !matches!(self, ErrorKind::System)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Shared, cloneable handle to an underlying error.
pub type ErrorCause = Arc<dyn StdError + Send + Sync>;

/// Error returned by every domain operation.
#[derive(Error, Debug, Clone)]
#[error("{message}")]
pub struct DomainError {
    kind: ErrorKind,
    message: String,
    #[source]
    cause: Option<ErrorCause>,
}

impl DomainError {
    /// Create an error of the given kind without a cause
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            cause: None,
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidInput, message)
    }

    /// Create a resource not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ResourceNotFound, message)
    }

    /// Create an unauthorized error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    /// Create a system error
    pub fn system(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::System, message)
    }

    /// Attach the underlying error that triggered this one
    pub fn with_cause<E>(mut self, cause: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        self.cause = Some(Arc::new(cause));
        self
    }

    /// Prefix the message with higher-level context, keeping kind and cause.
    ///
    /// The result reads `"{prefix}, {message}"`.
    pub fn wrap_message(self, prefix: impl AsRef<str>) -> Self {
        Self {
            message: format!("{}, {}", prefix.as_ref(), self.message),
            ..self
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn cause(&self) -> Option<&ErrorCause> {
        self.cause.as_ref()
    }

    /// Get caller-facing message (hides system details)
    pub fn user_message(&self) -> String {
        match self.kind {
            ErrorKind::System => GENERIC_SYSTEM_MESSAGE.to_string(),
            _ => self.message.clone(),
        }
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
