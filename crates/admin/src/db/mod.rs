//! Database access for the admin side.
//!
//! # Tables
//!
//! - `admins` - operator accounts with Argon2 password hashes
//! - `events` - scheduled events
//! - `registrations` - sign-ups, one per person per event
//! - `payments` - payment attempts against registrations
//!
//! Only `admins` is written by this crate at runtime; the other tables belong
//! to the public site and are read here for the dashboard.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/admin/migrations/` and run via:
//! ```bash
//! cargo run -p tedxuc-cli -- migrate
//! ```
//!
//! # Store seams
//!
//! Handlers never touch `PgPool` directly. They go through [`AdminDirectory`]
//! and [`DashboardStore`], which have a Postgres implementation and an
//! in-memory one in [`memory`] used by tests and local demos.

pub mod admin_users;
pub mod dashboard;
pub mod events;
pub mod memory;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use tedxuc_core::Email;

use crate::models::{
    AdminPrincipal, EventOverview, PaymentTotals, RegistrationCounts, RegistrationOverview,
};

pub use admin_users::AdminRepository;
pub use dashboard::DashboardRepository;
pub use events::{EventBatch, EventRepository};
pub use memory::InMemoryStore;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Lookup of admin principals by email.
#[async_trait]
pub trait AdminDirectory: Send + Sync {
    /// Find the admin with this (already normalized) email.
    async fn find_by_email(&self, email: &Email)
    -> Result<Option<AdminPrincipal>, RepositoryError>;
}

/// The four reads behind the admin dashboard.
///
/// Each read is independent; the dashboard service runs them concurrently.
#[async_trait]
pub trait DashboardStore: Send + Sync {
    /// All events ordered by date ascending, each with its registration count.
    async fn list_events(&self) -> Result<Vec<EventOverview>, RepositoryError>;

    /// The `limit` newest registrations with their event and latest payment.
    async fn recent_registrations(
        &self,
        limit: i64,
    ) -> Result<Vec<RegistrationOverview>, RepositoryError>;

    /// Registration counts: total, paid and pending.
    async fn registration_counts(&self) -> Result<RegistrationCounts, RepositoryError>;

    /// Payment counts and revenue from successful payments.
    async fn payment_totals(&self) -> Result<PaymentTotals, RepositoryError>;

    /// Cheap reachability check for readiness probes.
    async fn ping(&self) -> Result<(), RepositoryError>;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
