//! Subcommand implementations.

pub mod admin;
pub mod migrate;
pub mod seed;

use secrecy::SecretString;
use sqlx::PgPool;

/// Connect using `ADMIN_DATABASE_URL`, falling back to `DATABASE_URL`.
async fn connect() -> Result<PgPool, ConnectError> {
    dotenvy::dotenv().ok();

    let url = std::env::var("ADMIN_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| ConnectError::MissingEnvVar("ADMIN_DATABASE_URL"))?;

    tracing::info!("Connecting to database...");
    Ok(tedxuc_admin::db::create_pool(&SecretString::from(url)).await?)
}

/// Errors that can occur while connecting.
#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
