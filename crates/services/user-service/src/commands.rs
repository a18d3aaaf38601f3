//! Operator commands driven by the CLI.

use std::sync::Arc;

use sea_orm::DbErr;
use thiserror::Error;
use tracing::info;

use domain::{DomainError, ErrorKind, PasswordError, User};

use crate::config::UserServiceConfig;
use crate::infra::Database;
use crate::repository::UserStore;
use crate::service::{UserManager, UserService};
use crate::tools::{Argon2PasswordTool, UuidTool};

/// Migration action type.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}

/// User management action type.
#[derive(Debug, Clone)]
pub enum UserAction {
    Create {
        user_name: String,
        email: String,
        password: String,
    },
    Get {
        id: String,
    },
    Patch {
        id: String,
        patch: String,
    },
    Authenticate {
        user_name: Option<String>,
        email: Option<String>,
        password: String,
    },
}

/// Failures surfaced by a command.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("{}: {}", .0.kind(), .0.user_message())]
    Domain(#[from] DomainError),

    #[error("database error: {0}")]
    Database(#[from] DbErr),

    #[error("password tool misconfigured: {0}")]
    PasswordConfig(#[from] PasswordError),

    #[error("could not encode output: {0}")]
    Output(#[from] serde_json::Error),
}

impl CommandError {
    /// Process exit code for this failure
    pub fn exit_code(&self) -> i32 {
        match self {
            CommandError::Domain(e) => match e.kind() {
                ErrorKind::InvalidInput => 2,
                ErrorKind::ResourceNotFound => 3,
                ErrorKind::Unauthorized => 4,
                ErrorKind::System => 1,
            },
            _ => 1,
        }
    }
}

/// Wire the service to its SeaORM store and concrete tools.
pub async fn build_service(config: &UserServiceConfig) -> Result<UserManager, CommandError> {
    let db = Database::connect(config).await?;
    let repo = Arc::new(UserStore::new(db.connection()));
    let passwords = Arc::new(Argon2PasswordTool::new(&config.password)?);

    Ok(UserManager::new(repo, Arc::new(UuidTool), passwords))
}

/// Run migrations.
pub async fn run_migrations(
    config: &UserServiceConfig,
    action: MigrateAction,
) -> Result<(), CommandError> {
    let db = Database::connect_without_migrations(config).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            for status in db.migration_status().await? {
                let marker = if status.applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, status.name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Run a user action and print the resulting user as JSON.
pub async fn run_user_action(
    config: &UserServiceConfig,
    action: UserAction,
) -> Result<(), CommandError> {
    let service = build_service(config).await?;

    if let Some(user) = execute(&service, action).await? {
        println!("{}", serde_json::to_string_pretty(&user)?);
    }

    Ok(())
}

/// Dispatch an action against any [`UserService`].
///
/// A successful patch yields no user; fetch it with `Get` if needed.
pub async fn execute(
    service: &dyn UserService,
    action: UserAction,
) -> Result<Option<User>, DomainError> {
    match action {
        UserAction::Create {
            user_name,
            email,
            password,
        } => service
            .create_user(&user_name, &email, &password)
            .await
            .map(Some),
        UserAction::Get { id } => service.get_user(&id).await.map(Some),
        UserAction::Patch { id, patch } => {
            service.patch_user(&id, patch.as_bytes()).await?;
            info!(user_id = %id, "User patched");
            Ok(None)
        }
        UserAction::Authenticate {
            user_name,
            email,
            password,
        } => service
            .validate_credentials(
                user_name.as_deref().unwrap_or_default(),
                email.as_deref().unwrap_or_default(),
                &password,
            )
            .await
            .map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockUserRepository;
    use domain::{MockIdTool, MockPasswordTool};

    const USER_ID: &str = "9abc46be-3bcd-42b1-aeb2-ac6ff557a580";

    #[tokio::test]
    async fn test_execute_get_and_patch() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_user().returning(|id| {
            Ok(Some(User::new(
                id.to_string(),
                "JohnDoe".to_string(),
                "test@example.com".to_string(),
                "$argon2id$hash".to_string(),
            )))
        });
        repo.expect_update_user().times(1).returning(|_| Ok(()));

        let mut ids = MockIdTool::new();
        ids.expect_is_valid().return_const(true);
        let mut passwords = MockPasswordTool::new();
        passwords.expect_is_valid().return_const(true);

        let service = UserManager::new(Arc::new(repo), Arc::new(ids), Arc::new(passwords));

        let fetched = execute(
            &service,
            UserAction::Get {
                id: USER_ID.to_string(),
            },
        )
        .await
        .unwrap();
        assert_eq!(fetched.map(|u| u.id), Some(USER_ID.to_string()));

        let patched = execute(
            &service,
            UserAction::Patch {
                id: USER_ID.to_string(),
                patch: r#"[{"op":"replace","path":"/user_name","value":"foo"}]"#.to_string(),
            },
        )
        .await
        .unwrap();
        assert!(patched.is_none());
    }

    #[test]
    fn test_exit_codes_follow_error_kind() {
        let cases = [
            (DomainError::invalid_input("bad"), 2),
            (DomainError::not_found("gone"), 3),
            (DomainError::unauthorized("no"), 4),
            (DomainError::system("boom"), 1),
        ];

        for (err, code) in cases {
            assert_eq!(CommandError::from(err).exit_code(), code);
        }
    }

    #[test]
    fn test_domain_error_display_hides_system_details() {
        let err = CommandError::from(DomainError::system("failed to store new user"));
        assert_eq!(err.to_string(), "SYSTEM_ERROR: an internal error occurred");

        let err = CommandError::from(DomainError::not_found("user does not exist"));
        assert_eq!(err.to_string(), "RESOURCE_NOT_FOUND: user does not exist");
    }
}
