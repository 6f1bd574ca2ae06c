//! Admin account commands.
//!
//! The admin area has a single operator role, and accounts are only ever
//! created here, never through the web UI.

use tedxuc_admin::db::{AdminRepository, RepositoryError};
use tedxuc_admin::services::{AuthError, hash_password};
use tedxuc_core::{Email, EmailError};
use thiserror::Error;

use super::{ConnectError, connect};

const MIN_PASSWORD_LENGTH: usize = 12;

/// Errors that can occur during admin operations.
#[derive(Debug, Error)]
pub enum AdminError {
    #[error(transparent)]
    Connect(#[from] ConnectError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Password must be at least {MIN_PASSWORD_LENGTH} characters")]
    WeakPassword,

    #[error("Password hashing failed: {0}")]
    Hash(#[from] AuthError),

    #[error("Admin already exists with email: {0}")]
    AdminExists(String),

    #[error("No admin with email: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Repository(RepositoryError),
}

fn validated(email: &str, password: &str) -> Result<(Email, String), AdminError> {
    let email = Email::parse(email)?;
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AdminError::WeakPassword);
    }
    Ok((email, hash_password(password)?))
}

/// Create a new admin account.
pub async fn create(email: &str, password: &str) -> Result<(), AdminError> {
    let (email, password_hash) = validated(email, password)?;
    let pool = connect().await?;

    tracing::info!("Creating admin: {}", email);
    let admin = AdminRepository::new(pool)
        .create(&email, &password_hash)
        .await
        .map_err(|e| match e {
            RepositoryError::Conflict(_) => AdminError::AdminExists(email.to_string()),
            other => AdminError::Repository(other),
        })?;

    tracing::info!("Admin created successfully! ID: {}, Email: {}", admin.id, admin.email);
    Ok(())
}

/// Replace the password of an existing admin.
pub async fn set_password(email: &str, password: &str) -> Result<(), AdminError> {
    let (email, password_hash) = validated(email, password)?;
    let pool = connect().await?;

    AdminRepository::new(pool)
        .update_password(&email, &password_hash)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AdminError::NotFound(email.to_string()),
            other => AdminError::Repository(other),
        })?;

    tracing::info!("Password updated for {}", email);
    tracing::warn!("Sessions issued before the change stay valid until they expire");
    Ok(())
}
