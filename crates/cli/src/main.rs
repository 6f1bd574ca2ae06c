//! TEDxUC CLI - database migrations and admin management.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! tedx-cli migrate
//!
//! # Create the operator account (password from ADMIN_PASSWORD if not given)
//! tedx-cli admin create -e admin@tedxuc.com
//!
//! # Reset an operator's password
//! tedx-cli admin set-password -e admin@tedxuc.com
//!
//! # Load demo events, registrations and payments
//! tedx-cli seed demo
//! ```
//!
//! # Environment Variables
//!
//! - `ADMIN_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//! - `ADMIN_PASSWORD` - Password for `admin create` / `admin set-password`

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "tedx-cli")]
#[command(author, version, about = "TEDxUC CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage admin accounts
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Seed the database
    Seed {
        #[command(subcommand)]
        target: SeedTarget,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create a new admin account
    Create {
        /// Admin email address
        #[arg(short, long)]
        email: String,

        /// Admin password
        #[arg(short, long, env = "ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Replace an admin's password
    SetPassword {
        /// Admin email address
        #[arg(short, long)]
        email: String,

        /// New password
        #[arg(short, long, env = "ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },
}

#[derive(Subcommand)]
enum SeedTarget {
    /// Demo events with registrations and payments
    Demo,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Admin { action } => match action {
            AdminAction::Create { email, password } => {
                commands::admin::create(&email, &password).await?;
            }
            AdminAction::SetPassword { email, password } => {
                commands::admin::set_password(&email, &password).await?;
            }
        },
        Commands::Seed { target } => match target {
            SeedTarget::Demo => {
                commands::seed::demo().await?;
            }
        },
    }
    Ok(())
}
