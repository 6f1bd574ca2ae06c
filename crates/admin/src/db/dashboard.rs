//! Dashboard read queries.
//!
//! Each query backs one [`DashboardStore`] method and is a single statement,
//! so the four reads can run on separate pool connections at the same time.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use tedxuc_core::{
    AttendanceStatus, EventId, PaymentStatus, RegistrationId, RegistrationStatus,
};

use super::{DashboardStore, RepositoryError};
use crate::models::{
    EventOverview, EventRef, LatestPayment, PaymentTotals, RegistrationCounts,
    RegistrationOverview,
};

// =============================================================================
// Internal Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct EventOverviewRow {
    id: Uuid,
    name: String,
    event_type: String,
    date: DateTime<Utc>,
    quota: i32,
    price: Decimal,
    is_active: bool,
    registered_count: i64,
}

impl From<EventOverviewRow> for EventOverview {
    fn from(row: EventOverviewRow) -> Self {
        Self {
            id: EventId::from_uuid(row.id),
            name: row.name,
            event_type: row.event_type,
            date: row.date,
            quota: row.quota,
            // NUMERIC(12, 2) columns come back with scale 2.
            price: row.price.normalize(),
            is_active: row.is_active,
            registered_count: row.registered_count,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct RecentRegistrationRow {
    id: Uuid,
    registration_number: String,
    full_name: String,
    email: String,
    phone_number: String,
    gender: String,
    age: i32,
    food_allergy: Option<String>,
    status: RegistrationStatus,
    attendance_status: AttendanceStatus,
    created_at: DateTime<Utc>,
    event_name: String,
    event_type: String,
    payment_status: Option<PaymentStatus>,
    payment_method: Option<String>,
    payment_amount: Option<Decimal>,
}

impl TryFrom<RecentRegistrationRow> for RegistrationOverview {
    type Error = RepositoryError;

    fn try_from(row: RecentRegistrationRow) -> Result<Self, Self::Error> {
        let latest_payment = match (row.payment_status, row.payment_method, row.payment_amount) {
            (Some(status), Some(payment_method), Some(amount)) => Some(LatestPayment {
                status,
                payment_method,
                amount: amount.normalize(),
            }),
            (None, None, None) => None,
            _ => {
                return Err(RepositoryError::DataCorruption(format!(
                    "incomplete payment row for registration {}",
                    row.id
                )));
            }
        };

        Ok(Self {
            id: RegistrationId::from_uuid(row.id),
            registration_number: row.registration_number,
            full_name: row.full_name,
            email: row.email,
            phone_number: row.phone_number,
            gender: row.gender,
            age: row.age,
            food_allergy: row.food_allergy,
            status: row.status,
            attendance_status: row.attendance_status,
            created_at: row.created_at,
            event: EventRef {
                name: row.event_name,
                event_type: row.event_type,
            },
            latest_payment,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct RegistrationCountsRow {
    total: i64,
    paid: i64,
    pending: i64,
}

#[derive(Debug, sqlx::FromRow)]
struct PaymentTotalsRow {
    total: i64,
    successful: i64,
    revenue: Decimal,
}

// =============================================================================
// Repository
// =============================================================================

/// Postgres-backed dashboard reads.
#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DashboardStore for DashboardRepository {
    async fn list_events(&self) -> Result<Vec<EventOverview>, RepositoryError> {
        let rows = sqlx::query_as::<_, EventOverviewRow>(
            r"
            SELECT e.id, e.name, e.type AS event_type, e.date, e.quota, e.price,
                   e.is_active, COUNT(r.id) AS registered_count
            FROM events e
            LEFT JOIN registrations r ON r.event_id = e.id
            GROUP BY e.id
            ORDER BY e.date ASC, e.id ASC
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn recent_registrations(
        &self,
        limit: i64,
    ) -> Result<Vec<RegistrationOverview>, RepositoryError> {
        let rows = sqlx::query_as::<_, RecentRegistrationRow>(
            r"
            SELECT r.id, r.registration_number, r.full_name, r.email, r.phone_number,
                   r.gender, r.age, r.food_allergy, r.status, r.attendance_status,
                   r.created_at,
                   e.name AS event_name, e.type AS event_type,
                   p.status AS payment_status, p.payment_method,
                   p.amount AS payment_amount
            FROM registrations r
            JOIN events e ON e.id = r.event_id
            LEFT JOIN LATERAL (
                SELECT status, payment_method, amount
                FROM payments
                WHERE registration_id = r.id
                ORDER BY created_at DESC, id DESC
                LIMIT 1
            ) p ON TRUE
            ORDER BY r.created_at DESC, r.id DESC
            LIMIT $1
            ",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn registration_counts(&self) -> Result<RegistrationCounts, RepositoryError> {
        let row = sqlx::query_as::<_, RegistrationCountsRow>(
            r"
            SELECT COUNT(*) AS total,
                   COUNT(*) FILTER (WHERE status = 'paid') AS paid,
                   COUNT(*) FILTER (WHERE status = 'pending') AS pending
            FROM registrations
            ",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(RegistrationCounts {
            total: row.total,
            paid: row.paid,
            pending: row.pending,
        })
    }

    async fn payment_totals(&self) -> Result<PaymentTotals, RepositoryError> {
        let row = sqlx::query_as::<_, PaymentTotalsRow>(
            r"
            SELECT COUNT(*) AS total,
                   COUNT(*) FILTER (WHERE status = 'success') AS successful,
                   COALESCE(SUM(amount) FILTER (WHERE status = 'success'), 0) AS revenue
            FROM payments
            ",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(PaymentTotals {
            total: row.total,
            successful: row.successful,
            revenue: row.revenue.normalize(),
        })
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
