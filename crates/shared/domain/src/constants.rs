//! Domain-level constants.
//!
//! These constants define the field limits a persisted user must respect.

// =============================================================================
// Validation
// =============================================================================

/// Maximum user name length, in characters
pub const MAX_USER_NAME_LENGTH: usize = 20;

/// Maximum email length, in characters
pub const MAX_EMAIL_LENGTH: usize = 255;

/// Maximum stored password hash length, in characters
pub const MAX_PASSWORD_HASH_LENGTH: usize = 255;

// =============================================================================
// Error codes
// =============================================================================

pub const CODE_INVALID_INPUT: &str = "INVALID_INPUT";
pub const CODE_RESOURCE_NOT_FOUND: &str = "RESOURCE_NOT_FOUND";
pub const CODE_UNAUTHORIZED: &str = "UNAUTHORIZED";
pub const CODE_SYSTEM_ERROR: &str = "SYSTEM_ERROR";

/// Message shown to callers in place of a system error's details
pub const GENERIC_SYSTEM_MESSAGE: &str = "an internal error occurred";
