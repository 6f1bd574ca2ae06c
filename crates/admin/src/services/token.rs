//! Signed admin session tokens.
//!
//! Tokens are HS256 JWTs carrying the admin's email, role and an issue/expiry
//! pair. Expiry is checked against a caller-supplied clock so the boundary can
//! be tested; the `jsonwebtoken` expiry check (which has leeway) is disabled.
//!
//! A token is valid iff its signature verifies under the server secret and
//! `now < exp`. Tokens cannot be revoked before they expire.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use tedxuc_core::{AdminRole, Email};

/// Lifetime of an admin session token (and of its cookie).
pub const SESSION_TTL: Duration = Duration::hours(8);

/// Claims embedded in an admin session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub email: Email,
    pub role: AdminRole,
    /// Issued-at, seconds since the Unix epoch.
    pub iat: i64,
    /// Expiry, seconds since the Unix epoch. Exclusive.
    pub exp: i64,
}

impl SessionClaims {
    /// Whether the token has expired at `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }
}

/// Reasons a token fails verification.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Not a well-formed token, or the claims do not match the expected shape.
    #[error("malformed token")]
    Malformed,

    /// Signature does not verify under the server secret.
    #[error("invalid token signature")]
    InvalidSignature,

    /// The token's expiry has passed.
    #[error("token expired")]
    Expired,

    /// Signing failed while issuing a token.
    #[error("token encoding failed: {0}")]
    Encoding(String),
}

/// Issues and verifies admin session tokens.
#[derive(Clone)]
pub struct SessionTokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl SessionTokenCodec {
    /// Create a codec from the server secret.
    #[must_use]
    pub fn new(secret: &SecretString) -> Self {
        let secret = secret.expose_secret().as_bytes();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Issue a token for `email` valid for [`SESSION_TTL`] from now.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Encoding` if signing fails.
    pub fn issue(&self, email: &Email) -> Result<(String, SessionClaims), TokenError> {
        self.issue_at(email, Utc::now())
    }

    /// Issue a token as if the current time were `now`.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Encoding` if signing fails.
    pub fn issue_at(
        &self,
        email: &Email,
        now: DateTime<Utc>,
    ) -> Result<(String, SessionClaims), TokenError> {
        let claims = SessionClaims {
            email: email.clone(),
            role: AdminRole::Admin,
            iat: now.timestamp(),
            exp: (now + SESSION_TTL).timestamp(),
        };

        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Encoding(e.to_string()))?;

        Ok((token, claims))
    }

    /// Verify a token against the current time.
    ///
    /// # Errors
    ///
    /// See [`Self::verify_at`].
    pub fn verify(&self, token: &str) -> Result<SessionClaims, TokenError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a token as if the current time were `now`.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::InvalidSignature` if the signature does not verify,
    /// `TokenError::Expired` if `now` is at or past the expiry, and
    /// `TokenError::Malformed` for anything else that is not a valid token.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<SessionClaims, TokenError> {
        let data =
            jsonwebtoken::decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
                .map_err(|e| match e.kind() {
                    ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                    _ => TokenError::Malformed,
                })?;

        let claims = data.claims;
        if claims.is_expired_at(now) {
            return Err(TokenError::Expired);
        }
        Ok(claims)
    }
}
