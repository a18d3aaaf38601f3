//! User Service Library
//!
//! Creation, lookup, JSON Patch updates and credential checks for user
//! records. The use cases live in [`service`]; storage, identifier and
//! password handling are plugged in through traits so the service can be
//! driven by any outer layer. The bundled CLI is one such layer.

pub mod commands;
pub mod config;
pub mod infra;
pub mod repository;
pub mod service;
pub mod tools;

pub use commands::{CommandError, MigrateAction, UserAction};
pub use config::{PasswordConfig, UserServiceConfig};
pub use service::{UserManager, UserService};
