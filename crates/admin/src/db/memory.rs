//! In-memory implementation of the store traits.
//!
//! Computes the same projections as the Postgres queries over plain vectors
//! for the router tests. Failures and latency can be injected to exercise the
//! dashboard's error paths.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;
use tokio::sync::RwLock;

use tedxuc_core::{Email, PaymentStatus, RegistrationStatus};

use super::{AdminDirectory, DashboardStore, RepositoryError};
use crate::models::{
    AdminPrincipal, Event, EventOverview, EventRef, LatestPayment, Payment, PaymentTotals,
    Registration, RegistrationCounts, RegistrationOverview,
};

#[derive(Debug, Default)]
struct Tables {
    admins: Vec<AdminPrincipal>,
    events: Vec<Event>,
    registrations: Vec<Registration>,
    payments: Vec<Payment>,
}

/// Store backed by vectors behind an async lock.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
    fail_reads: AtomicBool,
    read_delay: Option<Duration>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every dashboard read by `delay`.
    #[must_use]
    pub fn with_read_delay(mut self, delay: Duration) -> Self {
        self.read_delay = Some(delay);
        self
    }

    /// Make every subsequent read fail with a database error.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email is already present.
    pub async fn insert_admin(&self, admin: AdminPrincipal) -> Result<(), RepositoryError> {
        let mut tables = self.tables.write().await;
        if tables.admins.iter().any(|a| a.email == admin.email) {
            return Err(RepositoryError::Conflict(format!(
                "admin {} already exists",
                admin.email
            )));
        }
        tables.admins.push(admin);
        Ok(())
    }

    pub async fn insert_event(&self, event: Event) {
        self.tables.write().await.events.push(event);
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the referenced event is unknown.
    pub async fn insert_registration(
        &self,
        registration: Registration,
    ) -> Result<(), RepositoryError> {
        let mut tables = self.tables.write().await;
        if !tables.events.iter().any(|e| e.id == registration.event_id) {
            return Err(RepositoryError::NotFound);
        }
        tables.registrations.push(registration);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the referenced registration is unknown.
    pub async fn insert_payment(&self, payment: Payment) -> Result<(), RepositoryError> {
        let mut tables = self.tables.write().await;
        if !tables
            .registrations
            .iter()
            .any(|r| r.id == payment.registration_id)
        {
            return Err(RepositoryError::NotFound);
        }
        tables.payments.push(payment);
        Ok(())
    }

    async fn before_read(&self) -> Result<(), RepositoryError> {
        if let Some(delay) = self.read_delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(RepositoryError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

fn count(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

#[async_trait]
impl AdminDirectory for InMemoryStore {
    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<AdminPrincipal>, RepositoryError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(RepositoryError::Database(sqlx::Error::PoolTimedOut));
        }
        let tables = self.tables.read().await;
        Ok(tables.admins.iter().find(|a| &a.email == email).cloned())
    }
}

#[async_trait]
impl DashboardStore for InMemoryStore {
    async fn list_events(&self) -> Result<Vec<EventOverview>, RepositoryError> {
        self.before_read().await?;
        let tables = self.tables.read().await;

        let mut events: Vec<EventOverview> = tables
            .events
            .iter()
            .map(|event| EventOverview {
                id: event.id,
                name: event.name.clone(),
                event_type: event.event_type.clone(),
                date: event.date,
                quota: event.quota,
                price: event.price,
                is_active: event.is_active,
                registered_count: count(
                    tables
                        .registrations
                        .iter()
                        .filter(|r| r.event_id == event.id)
                        .count(),
                ),
            })
            .collect();
        events.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));
        Ok(events)
    }

    async fn recent_registrations(
        &self,
        limit: i64,
    ) -> Result<Vec<RegistrationOverview>, RepositoryError> {
        self.before_read().await?;
        let tables = self.tables.read().await;

        let mut registrations: Vec<&Registration> = tables.registrations.iter().collect();
        registrations.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let limit = usize::try_from(limit).unwrap_or(0);
        registrations
            .into_iter()
            .take(limit)
            .map(|registration| {
                let event = tables
                    .events
                    .iter()
                    .find(|e| e.id == registration.event_id)
                    .ok_or_else(|| {
                        RepositoryError::DataCorruption(format!(
                            "registration {} references a missing event",
                            registration.id
                        ))
                    })?;

                let latest_payment = tables
                    .payments
                    .iter()
                    .filter(|p| p.registration_id == registration.id)
                    .max_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)))
                    .map(|p| LatestPayment {
                        status: p.status,
                        payment_method: p.payment_method.clone(),
                        amount: p.amount,
                    });

                Ok(RegistrationOverview {
                    id: registration.id,
                    registration_number: registration.registration_number.clone(),
                    full_name: registration.full_name.clone(),
                    email: registration.email.clone(),
                    phone_number: registration.phone_number.clone(),
                    gender: registration.gender.clone(),
                    age: registration.age,
                    food_allergy: registration.food_allergy.clone(),
                    status: registration.status,
                    attendance_status: registration.attendance_status,
                    created_at: registration.created_at,
                    event: EventRef {
                        name: event.name.clone(),
                        event_type: event.event_type.clone(),
                    },
                    latest_payment,
                })
            })
            .collect()
    }

    async fn registration_counts(&self) -> Result<RegistrationCounts, RepositoryError> {
        self.before_read().await?;
        let tables = self.tables.read().await;
        let with_status = |status: RegistrationStatus| {
            count(
                tables
                    .registrations
                    .iter()
                    .filter(|r| r.status == status)
                    .count(),
            )
        };

        Ok(RegistrationCounts {
            total: count(tables.registrations.len()),
            paid: with_status(RegistrationStatus::Paid),
            pending: with_status(RegistrationStatus::Pending),
        })
    }

    async fn payment_totals(&self) -> Result<PaymentTotals, RepositoryError> {
        self.before_read().await?;
        let tables = self.tables.read().await;
        let successful: Vec<&Payment> = tables
            .payments
            .iter()
            .filter(|p| p.status == PaymentStatus::Success)
            .collect();

        Ok(PaymentTotals {
            total: count(tables.payments.len()),
            successful: count(successful.len()),
            revenue: successful.iter().map(|p| p.amount).sum::<Decimal>(),
        })
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(RepositoryError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}
