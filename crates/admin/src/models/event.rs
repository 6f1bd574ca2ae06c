//! Stored event, registration and payment records.
//!
//! These mirror the tables the public site writes to. The admin side only
//! reads them (the CLI seeder is the one exception).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use tedxuc_core::{
    AttendanceStatus, EventId, PaymentId, PaymentStatus, RegistrationId, RegistrationStatus,
};

/// A scheduled event people can register for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub name: String,
    /// Free-form category label, e.g. "main" or "workshop".
    #[serde(rename = "type")]
    pub event_type: String,
    pub date: DateTime<Utc>,
    /// Maximum number of registrations.
    pub quota: i32,
    pub price: Decimal,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// A person's sign-up for one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub id: RegistrationId,
    /// Human-facing reference, unique across registrations.
    pub registration_number: String,
    pub full_name: String,
    /// Registrant's email as entered on the public form.
    pub email: String,
    pub phone_number: String,
    pub gender: String,
    pub age: i32,
    pub food_allergy: Option<String>,
    pub status: RegistrationStatus,
    pub attendance_status: AttendanceStatus,
    pub event_id: EventId,
    pub created_at: DateTime<Utc>,
}

/// One payment attempt against a registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: PaymentId,
    pub registration_id: RegistrationId,
    pub amount: Decimal,
    pub payment_method: String,
    pub status: PaymentStatus,
    pub transaction_id: Option<String>,
    pub created_at: DateTime<Utc>,
}
