//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `ADMIN_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//! - `ADMIN_BASE_URL` - Public URL of the site; `https://` turns on `Secure` cookies
//! - `ADMIN_JWT_SECRET` - Session token signing secret (min 32 chars, high entropy)
//!
//! ## Optional
//! - `ADMIN_HOST` - Bind address (default: 127.0.0.1)
//! - `ADMIN_PORT` - Listen port (default: 3001)
//! - `ADMIN_STORE_TIMEOUT_SECS` - Upper bound for a single store round-trip (default: 10)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` / `SENTRY_TRACES_SAMPLE_RATE` - Sampling (default: 1.0)
//!
//! There is no fallback for `ADMIN_JWT_SECRET`; the server refuses
//! to start without a strong secret.

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

const MIN_JWT_SECRET_LENGTH: usize = 32;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;
const DEFAULT_STORE_TIMEOUT_SECS: u64 = 10;

/// Case-insensitive substrings that mark a copied placeholder.
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "change-in-production",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "insert",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Admin application configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL of the site
    pub base_url: String,
    /// Session token signing secret
    pub jwt_secret: SecretString,
    /// Timeout applied to each store round-trip
    pub store_timeout: Duration,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

impl AdminConfig {
    /// Load configuration from environment variables (and `.env`, if present).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required variable is missing, a value does
    /// not parse, or the signing secret is weak.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let database_url = var("ADMIN_DATABASE_URL")
            .or_else(|| var("DATABASE_URL"))
            .map(SecretString::from)
            .ok_or_else(|| ConfigError::MissingEnvVar("ADMIN_DATABASE_URL".to_string()))?;

        let jwt_secret = SecretString::from(required("ADMIN_JWT_SECRET")?);
        validate_jwt_secret(&jwt_secret, "ADMIN_JWT_SECRET")?;

        Ok(Self {
            database_url,
            host: parsed_or("ADMIN_HOST", IpAddr::from([127, 0, 0, 1]))?,
            port: parsed_or("ADMIN_PORT", 3001)?,
            base_url: required("ADMIN_BASE_URL")?,
            jwt_secret,
            store_timeout: parse_timeout_secs(
                "ADMIN_STORE_TIMEOUT_SECS",
                var("ADMIN_STORE_TIMEOUT_SECS").as_deref(),
            )?,
            sentry_dsn: var("SENTRY_DSN"),
            sentry_environment: var("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: parsed_or("SENTRY_SAMPLE_RATE", 1.0)?,
            sentry_traces_sample_rate: parsed_or("SENTRY_TRACES_SAMPLE_RATE", 1.0)?,
        })
    }

    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether cookies carry the `Secure` attribute: only when the site is
    /// served over HTTPS.
    #[must_use]
    pub fn secure_cookies(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

/// Set and non-empty.
fn var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn required(key: &str) -> Result<String, ConfigError> {
    var(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

fn parsed_or<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    var(key).map_or(Ok(default), |raw| {
        raw.trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}

/// Whole seconds, greater than zero.
fn parse_timeout_secs(key: &str, raw: Option<&str>) -> Result<Duration, ConfigError> {
    let secs = match raw {
        None => DEFAULT_STORE_TIMEOUT_SECS,
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?,
    };
    if secs == 0 {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must be greater than zero".to_string(),
        ));
    }
    Ok(Duration::from_secs(secs))
}

/// Reject secrets that are short, look like a placeholder, or have low entropy.
pub(crate) fn validate_jwt_secret(secret: &SecretString, key: &str) -> Result<(), ConfigError> {
    let value = secret.expose_secret();
    let insecure = |reason: String| Err(ConfigError::InsecureSecret(key.to_string(), reason));

    let len = value.chars().count();
    if len < MIN_JWT_SECRET_LENGTH {
        return insecure(format!(
            "must be at least {MIN_JWT_SECRET_LENGTH} characters (got {len})"
        ));
    }

    let lower = value.to_lowercase();
    if let Some(pattern) = PLACEHOLDER_PATTERNS.iter().find(|p| lower.contains(*p)) {
        return insecure(format!("appears to be a placeholder (contains '{pattern}')"));
    }

    let entropy = shannon_entropy(value);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return insecure(format!(
            "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1})"
        ));
    }
    Ok(())
}

/// Shannon entropy in bits per character.
#[allow(clippy::cast_precision_loss)]
fn shannon_entropy(s: &str) -> f64 {
    let mut counts: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *counts.entry(c).or_default() += 1;
    }

    let len = s.chars().count() as f64;
    counts
        .values()
        .map(|&n| n as f64 / len)
        .map(|p| -p * p.log2())
        .sum()
}
