//! Write access to events, registrations and payments.
//!
//! The public site owns these tables. The admin side only writes to them
//! when seeding demo data from the CLI, and always inside one transaction so
//! a failed seed leaves nothing behind.

use sqlx::{PgPool, Postgres, Transaction};

use super::RepositoryError;
use crate::models::{Event, Payment, Registration};

/// Entry point for batched inserts into the event tables.
#[derive(Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Start a batch. Nothing is visible to other connections until
    /// [`EventBatch::commit`]; dropping the batch rolls it back.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if no transaction can be opened.
    pub async fn begin(&self) -> Result<EventBatch, RepositoryError> {
        Ok(EventBatch {
            tx: self.pool.begin().await?,
        })
    }
}

/// Inserts sharing one transaction.
pub struct EventBatch {
    tx: Transaction<'static, Postgres>,
}

impl EventBatch {
    /// Whether a registration with this number already exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn registration_exists(
        &mut self,
        registration_number: &str,
    ) -> Result<bool, RepositoryError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM registrations WHERE registration_number = $1)",
        )
        .bind(registration_number)
        .fetch_one(&mut *self.tx)
        .await?;
        Ok(exists)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn insert_event(&mut self, event: &Event) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO events (id, name, type, date, quota, price, is_active, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(event.id)
        .bind(&event.name)
        .bind(&event.event_type)
        .bind(event.date)
        .bind(event.quota)
        .bind(event.price)
        .bind(event.is_active)
        .bind(event.created_at)
        .execute(&mut *self.tx)
        .await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the registration number is taken.
    pub async fn insert_registration(
        &mut self,
        registration: &Registration,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO registrations (
                id, registration_number, full_name, email, phone_number, gender, age,
                food_allergy, status, attendance_status, event_id, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ",
        )
        .bind(registration.id)
        .bind(&registration.registration_number)
        .bind(&registration.full_name)
        .bind(&registration.email)
        .bind(&registration.phone_number)
        .bind(&registration.gender)
        .bind(registration.age)
        .bind(registration.food_allergy.as_deref())
        .bind(registration.status)
        .bind(registration.attendance_status)
        .bind(registration.event_id)
        .bind(registration.created_at)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                RepositoryError::Conflict(format!(
                    "registration number {} already exists",
                    registration.registration_number
                ))
            }
            other => RepositoryError::Database(other),
        })?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn insert_payment(&mut self, payment: &Payment) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO payments (
                id, registration_id, amount, payment_method, status, transaction_id, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(payment.id)
        .bind(payment.registration_id)
        .bind(payment.amount)
        .bind(&payment.payment_method)
        .bind(payment.status)
        .bind(payment.transaction_id.as_deref())
        .bind(payment.created_at)
        .execute(&mut *self.tx)
        .await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the commit fails.
    pub async fn commit(self) -> Result<(), RepositoryError> {
        self.tx.commit().await?;
        Ok(())
    }
}
