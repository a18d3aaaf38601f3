//! User Service - command-line entry point for user management.

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use user_service_lib::{commands, MigrateAction, UserAction, UserServiceConfig};

#[derive(Parser)]
#[command(name = "user-service")]
#[command(about = "User management service")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Database migration commands
    Migrate {
        #[command(subcommand)]
        action: MigrateCommands,
    },
    /// User management commands
    User {
        #[command(subcommand)]
        action: UserCommands,
    },
}

#[derive(Subcommand)]
enum MigrateCommands {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset database and run all migrations
    Fresh,
}

#[derive(Subcommand)]
enum UserCommands {
    /// Create a new user
    Create {
        #[arg(long)]
        user_name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "USER_SERVICE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Show a user by ID
    Get { id: String },
    /// Apply a JSON Patch (RFC 6902) to a user's attributes
    Patch {
        id: String,
        /// Patch document, e.g. '[{"op":"replace","path":"/email","value":"a@b.com"}]'
        #[arg(long)]
        patch: String,
    },
    /// Check a user's credentials
    Authenticate(AuthenticateArgs),
}

#[derive(Args)]
#[group(required = true, multiple = false, id = "login")]
struct LoginKey {
    #[arg(long)]
    user_name: Option<String>,
    #[arg(long)]
    email: Option<String>,
}

#[derive(Args)]
struct AuthenticateArgs {
    #[command(flatten)]
    login: LoginKey,
    #[arg(long, env = "USER_SERVICE_PASSWORD", hide_env_values = true)]
    password: String,
}

impl From<UserCommands> for UserAction {
    fn from(command: UserCommands) -> Self {
        match command {
            UserCommands::Create {
                user_name,
                email,
                password,
            } => UserAction::Create {
                user_name,
                email,
                password,
            },
            UserCommands::Get { id } => UserAction::Get { id },
            UserCommands::Patch { id, patch } => UserAction::Patch { id, patch },
            UserCommands::Authenticate(args) => UserAction::Authenticate {
                user_name: args.login.user_name,
                email: args.login.email,
                password: args.password,
            },
        }
    }
}

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = UserServiceConfig::from_env();
    tracing::debug!(?config, "Configuration loaded");

    let result = match cli.command {
        Commands::Migrate { action } => {
            let action = match action {
                MigrateCommands::Up => MigrateAction::Up,
                MigrateCommands::Down => MigrateAction::Down,
                MigrateCommands::Status => MigrateAction::Status,
                MigrateCommands::Fresh => MigrateAction::Fresh,
            };
            commands::run_migrations(&config, action).await
        }
        Commands::User { action } => commands::run_user_action(&config, action.into()).await,
    };

    if let Err(e) = result {
        tracing::error!("Command failed: {}", e);
        std::process::exit(e.exit_code());
    }
}

/// Initialize tracing subscriber (verbose mode sets debug level)
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
