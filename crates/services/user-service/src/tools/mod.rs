//! Concrete identifier and password tools.

mod id;
mod password;

pub use id::UuidTool;
pub use password::Argon2PasswordTool;
