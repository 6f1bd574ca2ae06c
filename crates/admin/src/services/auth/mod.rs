//! Admin authentication service.
//!
//! Password login for the single operator role. A successful login yields a
//! signed session token; there is no server-side session state.

mod error;

pub use error::AuthError;

use std::sync::LazyLock;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{DateTime, Utc};

use tedxuc_core::Email;

use super::token::{SessionClaims, SessionTokenCodec};
use crate::db::AdminDirectory;

/// Hash verified when the email is unknown, so both failure paths do the
/// same Argon2 work.
static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("tedxuc-admin-unknown-account").ok());

/// A freshly issued session token and its claims.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub claims: SessionClaims,
}

/// Admin login service.
pub struct AdminAuthService<'a> {
    admins: &'a dyn AdminDirectory,
    tokens: &'a SessionTokenCodec,
}

impl<'a> AdminAuthService<'a> {
    /// Create a new admin authentication service.
    #[must_use]
    pub const fn new(admins: &'a dyn AdminDirectory, tokens: &'a SessionTokenCodec) -> Self {
        Self { admins, tokens }
    }

    /// Check credentials and issue a session token.
    ///
    /// # Errors
    ///
    /// See [`Self::login_at`].
    pub async fn login(&self, email: &str, password: &str) -> Result<IssuedToken, AuthError> {
        self.login_at(email, password, Utc::now()).await
    }

    /// Check credentials and issue a session token as of `now`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingCredentials` if either field is blank,
    /// `AuthError::InvalidCredentials` if the email is unknown or the password
    /// is wrong, and `AuthError::Repository` if the admin lookup fails.
    pub async fn login_at(
        &self,
        email: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, AuthError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let admin = match Email::parse(email) {
            Ok(email) => self.admins.find_by_email(&email).await?,
            Err(_) => None,
        };

        let Some(admin) = admin else {
            if let Some(dummy) = DUMMY_HASH.as_deref() {
                let _ = verify_password(password, dummy);
            }
            tracing::info!("admin login rejected");
            return Err(AuthError::InvalidCredentials);
        };

        if let Err(e) = verify_password(password, &admin.password_hash) {
            tracing::info!(admin_id = %admin.id, "admin login rejected");
            return Err(e);
        }

        let (token, claims) = self.tokens.issue_at(&admin.email, now)?;
        tracing::info!(admin_id = %admin.id, "admin logged in");

        Ok(IssuedToken { token, claims })
    }
}

/// Hash a password with Argon2id and a random salt.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use secrecy::SecretString;

    use tedxuc_core::AdminId;

    use super::*;
    use crate::db::InMemoryStore;
    use crate::models::AdminPrincipal;

    const PASSWORD: &str = "correct horse battery staple";

    async fn store_with_admin() -> InMemoryStore {
        let store = InMemoryStore::new();
        store
            .insert_admin(AdminPrincipal {
                id: AdminId::new(),
                email: Email::parse("admin@tedxuc.com").unwrap(),
                password_hash: hash_password(PASSWORD).unwrap(),
                created_at: Utc::now(),
            })
            .await
            .unwrap();
        store
    }

    fn codec() -> SessionTokenCodec {
        SessionTokenCodec::new(&SecretString::from(
            "q7Vb!2xLm#9Rt$4zKp@8Wn^3Yc&6Hd*1F".to_string(),
        ))
    }

    #[test]
    fn test_hash_and_verify_password() {
        let hash = hash_password(PASSWORD).unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password(PASSWORD, &hash).is_ok());
        assert!(verify_password("wrong", &hash).is_err());
    }

    #[tokio::test]
    async fn test_login_issues_token_for_admin() {
        let store = store_with_admin().await;
        let codec = codec();
        let service = AdminAuthService::new(&store, &codec);
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap();

        let issued = service
            .login_at("  Admin@TEDxUC.com ", PASSWORD, now)
            .await
            .unwrap();

        let claims = codec.verify_at(&issued.token, now).unwrap();
        assert_eq!(claims.email.as_str(), "admin@tedxuc.com");
        assert_eq!(claims, issued.claims);
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email_are_indistinguishable() {
        let store = store_with_admin().await;
        let codec = codec();
        let service = AdminAuthService::new(&store, &codec);

        let wrong_password = service.login("admin@tedxuc.com", "nope").await.unwrap_err();
        let unknown_email = service.login("nobody@tedxuc.com", PASSWORD).await.unwrap_err();
        let not_an_email = service.login("admin", PASSWORD).await.unwrap_err();

        assert!(matches!(wrong_password, AuthError::InvalidCredentials));
        assert!(matches!(unknown_email, AuthError::InvalidCredentials));
        assert!(matches!(not_an_email, AuthError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[tokio::test]
    async fn test_blank_fields_are_missing_credentials() {
        let store = store_with_admin().await;
        let codec = codec();
        let service = AdminAuthService::new(&store, &codec);

        for (email, password) in [("", PASSWORD), ("   ", PASSWORD), ("admin@tedxuc.com", "")] {
            assert!(matches!(
                service.login(email, password).await,
                Err(AuthError::MissingCredentials)
            ));
        }
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let store = store_with_admin().await;
        store.fail_reads(true);
        let codec = codec();
        let service = AdminAuthService::new(&store, &codec);

        assert!(matches!(
            service.login("admin@tedxuc.com", PASSWORD).await,
            Err(AuthError::Repository(_))
        ));
    }
}
