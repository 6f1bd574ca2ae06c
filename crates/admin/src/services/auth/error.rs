//! Admin authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::token::TokenError;

/// Errors that can occur during admin login.
///
/// An unknown email and a wrong password both surface as
/// [`AuthError::InvalidCredentials`].
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email or password missing or blank.
    #[error("email and password are required")]
    MissingCredentials,

    /// No admin with this email, or the password does not match.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Password hashing failed.
    #[error("password hashing failed")]
    PasswordHash,

    /// Issuing the session token failed.
    #[error("token error: {0}")]
    Token(#[from] TokenError),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}
