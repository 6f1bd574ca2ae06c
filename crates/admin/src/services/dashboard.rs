//! Dashboard aggregation.
//!
//! Runs the four store reads concurrently, each under its own timeout, and
//! folds them into one [`DashboardSummary`]. Any failed or timed-out read
//! fails the whole summary; partial dashboards are never returned.
//!
//! The reads are not taken from a single snapshot, so a registration created
//! mid-aggregation may show up in one figure and not another.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

use crate::db::{DashboardStore, RepositoryError};
use crate::models::{DashboardStats, DashboardSummary};

/// Number of registrations in the "recent" list.
pub const RECENT_REGISTRATIONS_LIMIT: i64 = 50;

/// Errors that can occur while building the dashboard.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// One of the reads failed.
    #[error("dashboard read failed: {0}")]
    Repository(#[from] RepositoryError),

    /// One of the reads did not finish in time.
    #[error("dashboard read `{read}` timed out")]
    Timeout { read: &'static str },
}

/// Builds the admin dashboard from a [`DashboardStore`].
pub struct DashboardService<'a> {
    store: &'a dyn DashboardStore,
    read_timeout: Duration,
}

impl<'a> DashboardService<'a> {
    #[must_use]
    pub const fn new(store: &'a dyn DashboardStore, read_timeout: Duration) -> Self {
        Self {
            store,
            read_timeout,
        }
    }

    /// Assemble the dashboard summary.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::Repository` if any read fails and
    /// `DashboardError::Timeout` if any read exceeds the read timeout.
    pub async fn summary(&self) -> Result<DashboardSummary, DashboardError> {
        let (events, registrations, counts, payments) = tokio::try_join!(
            self.bounded("events", self.store.list_events()),
            self.bounded(
                "recent_registrations",
                self.store.recent_registrations(RECENT_REGISTRATIONS_LIMIT),
            ),
            self.bounded("registration_counts", self.store.registration_counts()),
            self.bounded("payment_totals", self.store.payment_totals()),
        )?;

        let stats = DashboardStats {
            total_events: count(events.len()),
            active_events: count(events.iter().filter(|e| e.is_active).count()),
            total_registrations: counts.total,
            paid_registrations: counts.paid,
            pending_registrations: counts.pending,
            total_payments: payments.total,
            successful_payments: payments.successful,
            total_revenue: payments.revenue,
        };

        tracing::debug!(
            events = events.len(),
            registrations = registrations.len(),
            "dashboard summary assembled"
        );

        Ok(DashboardSummary {
            stats,
            events,
            registrations,
        })
    }

    async fn bounded<T>(
        &self,
        read: &'static str,
        fut: impl Future<Output = Result<T, RepositoryError>>,
    ) -> Result<T, DashboardError> {
        match tokio::time::timeout(self.read_timeout, fut).await {
            Ok(result) => result.map_err(|e| {
                tracing::warn!(read, error = %e, "dashboard read failed");
                DashboardError::Repository(e)
            }),
            Err(_) => {
                tracing::warn!(read, timeout = ?self.read_timeout, "dashboard read timed out");
                Err(DashboardError::Timeout { read })
            }
        }
    }
}

fn count(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}
