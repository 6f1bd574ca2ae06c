//! Demo data for local development.
//!
//! Inserts three events with a spread of registrations and payments so the
//! dashboard has something to show. Everything goes in one transaction. If
//! the first demo registration number is already present the seed is skipped,
//! so running it twice leaves the database unchanged.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use tracing::info;

use tedxuc_admin::db::{EventRepository, RepositoryError};
use tedxuc_admin::models::{Event, Payment, Registration};
use tedxuc_core::{
    AttendanceStatus, EventId, PaymentId, PaymentStatus, RegistrationId, RegistrationStatus,
};

use super::{ConnectError, connect};

/// Errors that can occur while seeding.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error(transparent)]
    Connect(#[from] ConnectError),

    #[error("Insert failed: {0}")]
    Repository(#[from] RepositoryError),
}

/// What [`demo`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    Inserted,
    AlreadySeeded,
}

struct DemoEvent {
    name: &'static str,
    event_type: &'static str,
    days_from_now: i64,
    price: i64,
    is_active: bool,
}

const EVENTS: [DemoEvent; 3] = [
    DemoEvent {
        name: "TEDxUC Main Stage",
        event_type: "main",
        days_from_now: 30,
        price: 150_000,
        is_active: true,
    },
    DemoEvent {
        name: "Design Thinking Workshop",
        event_type: "workshop",
        days_from_now: 14,
        price: 75_000,
        is_active: true,
    },
    DemoEvent {
        name: "Salon Night",
        event_type: "salon",
        days_from_now: -7,
        price: 50_000,
        is_active: false,
    },
];

/// (event index, registration status, payment attempts oldest first)
const REGISTRATIONS: [(usize, RegistrationStatus, &[PaymentStatus]); 8] = [
    (0, RegistrationStatus::Paid, &[PaymentStatus::Failed, PaymentStatus::Success]),
    (0, RegistrationStatus::Paid, &[PaymentStatus::Success]),
    (0, RegistrationStatus::Pending, &[PaymentStatus::Pending]),
    (0, RegistrationStatus::Pending, &[]),
    (1, RegistrationStatus::Paid, &[PaymentStatus::Success]),
    (1, RegistrationStatus::Pending, &[PaymentStatus::Pending]),
    (2, RegistrationStatus::Paid, &[PaymentStatus::Success]),
    (2, RegistrationStatus::Cancelled, &[PaymentStatus::Failed]),
];

/// Rows making up the demo dataset.
struct DemoData {
    events: Vec<Event>,
    registrations: Vec<Registration>,
    payments: Vec<Payment>,
}

fn registration_number(n: i64) -> String {
    format!("TEDXUC-DEMO-{n:03}")
}

fn demo_data(now: DateTime<Utc>) -> DemoData {
    let events: Vec<Event> = EVENTS.iter().map(|e| demo_event(e, now)).collect();
    let mut registrations = Vec::with_capacity(REGISTRATIONS.len());
    let mut payments = Vec::new();

    for (n, (index, status, attempts)) in (1_i64..).zip(REGISTRATIONS) {
        let Some(event) = events.get(index) else {
            continue;
        };
        let created_at = now - Duration::days(10) + Duration::hours(n * 5);
        let registration = demo_registration(n, event, status, created_at);

        for (minutes, payment_status) in (0_i64..).zip(attempts.iter().copied()) {
            payments.push(Payment {
                id: PaymentId::new(),
                registration_id: registration.id,
                amount: event.price,
                payment_method: "bank_transfer".to_string(),
                status: payment_status,
                transaction_id: (payment_status != PaymentStatus::Pending)
                    .then(|| format!("DEMO-{n:03}-{minutes}")),
                created_at: created_at + Duration::minutes(minutes * 15),
            });
        }
        registrations.push(registration);
    }

    DemoData {
        events,
        registrations,
        payments,
    }
}

/// Insert the demo events, registrations and payments.
pub async fn demo() -> Result<SeedOutcome, SeedError> {
    let repo = EventRepository::new(connect().await?);
    let mut batch = repo.begin().await?;

    if batch.registration_exists(&registration_number(1)).await? {
        info!("Demo data already present, skipping");
        return Ok(SeedOutcome::AlreadySeeded);
    }

    let data = demo_data(Utc::now());
    for event in &data.events {
        batch.insert_event(event).await?;
    }
    for registration in &data.registrations {
        batch.insert_registration(registration).await?;
    }
    for payment in &data.payments {
        batch.insert_payment(payment).await?;
    }
    batch.commit().await?;

    info!(
        events = data.events.len(),
        registrations = data.registrations.len(),
        payments = data.payments.len(),
        "Demo data seeded"
    );
    Ok(SeedOutcome::Inserted)
}

fn demo_event(spec: &DemoEvent, now: DateTime<Utc>) -> Event {
    Event {
        id: EventId::new(),
        name: spec.name.to_string(),
        event_type: spec.event_type.to_string(),
        date: now + Duration::days(spec.days_from_now),
        quota: 100,
        price: Decimal::new(spec.price, 0),
        is_active: spec.is_active,
        created_at: now,
    }
}

fn demo_registration(
    n: i64,
    event: &Event,
    status: RegistrationStatus,
    created_at: DateTime<Utc>,
) -> Registration {
    Registration {
        id: RegistrationId::new(),
        registration_number: registration_number(n),
        full_name: format!("Demo Guest {n}"),
        email: format!("guest{n}@example.com"),
        phone_number: "081234567890".to_string(),
        gender: if n % 2 == 0 { "female" } else { "male" }.to_string(),
        age: 18 + i32::try_from(n).unwrap_or(0),
        food_allergy: None,
        status,
        attendance_status: AttendanceStatus::NotAttended,
        event_id: event.id,
        created_at,
    }
}
