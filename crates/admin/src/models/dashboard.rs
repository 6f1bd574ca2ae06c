//! Read-only projections served by the admin dashboard.
//!
//! All types serialize in `camelCase` to match the JSON the dashboard page
//! and API clients consume.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use tedxuc_core::{AttendanceStatus, EventId, PaymentStatus, RegistrationId, RegistrationStatus};

/// An event with the number of registrations it has received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventOverview {
    pub id: EventId,
    pub name: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub date: DateTime<Utc>,
    pub quota: i32,
    pub price: Decimal,
    pub is_active: bool,
    pub registered_count: i64,
}

/// Name and category of the event a registration belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventRef {
    pub name: String,
    #[serde(rename = "type")]
    pub event_type: String,
}

/// The most recent payment attempt of a registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestPayment {
    pub status: PaymentStatus,
    pub payment_method: String,
    pub amount: Decimal,
}

/// A registration row in the "recent registrations" list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationOverview {
    pub id: RegistrationId,
    pub registration_number: String,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub gender: String,
    pub age: i32,
    pub food_allergy: Option<String>,
    pub status: RegistrationStatus,
    pub attendance_status: AttendanceStatus,
    pub created_at: DateTime<Utc>,
    pub event: EventRef,
    /// `None` when no payment has been attempted yet.
    pub latest_payment: Option<LatestPayment>,
}

/// Registration counts by status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegistrationCounts {
    pub total: i64,
    pub paid: i64,
    pub pending: i64,
}

/// Payment counts plus revenue from successful payments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaymentTotals {
    pub total: i64,
    pub successful: i64,
    /// Sum of `amount` over successful payments; zero when there are none.
    pub revenue: Decimal,
}

/// Headline numbers at the top of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_events: i64,
    pub active_events: i64,
    pub total_registrations: i64,
    pub paid_registrations: i64,
    pub pending_registrations: i64,
    pub total_payments: i64,
    pub successful_payments: i64,
    pub total_revenue: Decimal,
}

/// Everything the dashboard shows, assembled in one pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub stats: DashboardStats,
    /// All events ordered by date, earliest first.
    pub events: Vec<EventOverview>,
    /// Newest registrations first, capped at the dashboard limit.
    pub registrations: Vec<RegistrationOverview>,
}
