//! Shared fixture for router tests.
//!
//! Builds the full admin router over an in-memory store seeded with one admin,
//! three events (two active) and ten registrations (six paid, three pending,
//! one cancelled). Successful payments add up to [`EXPECTED_REVENUE`].

#![allow(dead_code, clippy::unwrap_used)]

use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use chrono::{DateTime, Duration as ChronoDuration, TimeZone, Utc};
use rust_decimal::Decimal;
use secrecy::SecretString;
use tower::ServiceExt;

use tedxuc_admin::config::AdminConfig;
use tedxuc_admin::db::InMemoryStore;
use tedxuc_admin::models::{AdminPrincipal, Event, Payment, Registration};
use tedxuc_admin::services::hash_password;
use tedxuc_admin::state::AppState;
use tedxuc_core::{
    AdminId, AttendanceStatus, Email, EventId, PaymentId, PaymentStatus, RegistrationId,
    RegistrationStatus,
};

pub const ADMIN_EMAIL: &str = "admin@tedxuc.com";
pub const PASSWORD: &str = "correct horse battery staple";
pub const JWT_SECRET: &str = "q7Vb!2xLm#9Rt$4zKp@8Wn^3Yc&6Hd*1F";

/// 3 x 150.000 + 2 x 75.000 + 1 x 50.000
pub const EXPECTED_REVENUE: i64 = 650_000;

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub store: Arc<InMemoryStore>,
}

pub fn config(base_url: &str, store_timeout: Duration) -> AdminConfig {
    AdminConfig {
        database_url: SecretString::from("postgres://unused".to_string()),
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 3001,
        base_url: base_url.to_string(),
        jwt_secret: SecretString::from(JWT_SECRET.to_string()),
        store_timeout,
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 1.0,
    }
}

/// App over the seeded fixture, plain-HTTP base URL.
pub async fn test_app() -> TestApp {
    app_with(
        seeded_store(InMemoryStore::new()).await,
        "http://localhost:3001",
        Duration::from_secs(5),
    )
}

pub fn app_with(store: InMemoryStore, base_url: &str, store_timeout: Duration) -> TestApp {
    let store = Arc::new(store);
    let state = AppState::new(config(base_url, store_timeout), store.clone(), store.clone());
    TestApp {
        router: tedxuc_admin::app(state.clone()),
        state,
        store,
    }
}

fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 11, day, hour, 0, 0).unwrap()
}

/// Events, registrations and payments behind the dashboard fixture.
pub struct FixtureRows {
    pub events: Vec<Event>,
    pub registrations: Vec<Registration>,
    pub payments: Vec<Payment>,
}

/// Three events (two active), ten registrations (six paid, three pending,
/// one cancelled). `TEDXUC-001` fails once before paying; `TEDXUC-009` has
/// no payment at all.
pub fn fixture_rows() -> FixtureRows {
    let main_stage = event("Main Stage", "main", at(20, 9), 150_000, true);
    let workshop = event("Design Workshop", "workshop", at(5, 13), 75_000, true);
    let salon = event("Salon Night", "salon", at(12, 19), 50_000, false);

    // (event, registration status, payment attempts oldest first)
    let plan: [(&Event, RegistrationStatus, &[PaymentStatus]); 10] = [
        (&main_stage, RegistrationStatus::Paid, &[PaymentStatus::Failed, PaymentStatus::Success]),
        (&main_stage, RegistrationStatus::Paid, &[PaymentStatus::Success]),
        (&main_stage, RegistrationStatus::Paid, &[PaymentStatus::Success]),
        (&workshop, RegistrationStatus::Paid, &[PaymentStatus::Success]),
        (&workshop, RegistrationStatus::Paid, &[PaymentStatus::Success]),
        (&salon, RegistrationStatus::Paid, &[PaymentStatus::Success]),
        (&main_stage, RegistrationStatus::Pending, &[PaymentStatus::Pending]),
        (&workshop, RegistrationStatus::Pending, &[PaymentStatus::Pending]),
        (&main_stage, RegistrationStatus::Pending, &[]),
        (&salon, RegistrationStatus::Cancelled, &[PaymentStatus::Failed]),
    ];

    let mut registrations = Vec::new();
    let mut payments = Vec::new();
    let base = Utc.with_ymd_and_hms(2026, 10, 1, 8, 0, 0).unwrap();
    for (n, (ev, status, attempts)) in (1_i64..).zip(plan) {
        let created_at = base + ChronoDuration::hours(n);
        let registration = Registration {
            id: RegistrationId::new(),
            registration_number: format!("TEDXUC-{n:03}"),
            full_name: format!("Guest {n}"),
            email: format!("guest{n}@example.com"),
            phone_number: "081234567890".to_string(),
            gender: if n % 2 == 0 { "female" } else { "male" }.to_string(),
            age: 20,
            food_allergy: (n == 3).then(|| "peanuts".to_string()),
            status,
            attendance_status: AttendanceStatus::NotAttended,
            event_id: ev.id,
            created_at,
        };

        for (minutes, payment_status) in (0_i64..).zip(attempts.iter().copied()) {
            payments.push(Payment {
                id: PaymentId::new(),
                registration_id: registration.id,
                amount: ev.price,
                payment_method: "bank_transfer".to_string(),
                status: payment_status,
                transaction_id: Some(format!("TX-{n}-{minutes}")),
                created_at: created_at + ChronoDuration::minutes(minutes * 10),
            });
        }
        registrations.push(registration);
    }

    FixtureRows {
        events: vec![main_stage, workshop, salon],
        registrations,
        payments,
    }
}

pub fn fixture_admin() -> AdminPrincipal {
    AdminPrincipal {
        id: AdminId::new(),
        email: Email::parse(ADMIN_EMAIL).unwrap(),
        password_hash: hash_password(PASSWORD).unwrap(),
        created_at: Utc::now(),
    }
}

pub async fn seeded_store(store: InMemoryStore) -> InMemoryStore {
    store.insert_admin(fixture_admin()).await.unwrap();

    let rows = fixture_rows();
    for ev in rows.events {
        store.insert_event(ev).await;
    }
    for registration in rows.registrations {
        store.insert_registration(registration).await.unwrap();
    }
    for payment in rows.payments {
        store.insert_payment(payment).await.unwrap();
    }

    store
}

fn event(
    name: &str,
    event_type: &str,
    date: DateTime<Utc>,
    price: i64,
    is_active: bool,
) -> Event {
    Event {
        id: EventId::new(),
        name: name.to_string(),
        event_type: event_type.to_string(),
        date,
        quota: 100,
        price: Decimal::new(price, 0),
        is_active,
        created_at: Utc::now(),
    }
}

// =============================================================================
// Request helpers
// =============================================================================

pub async fn send(router: &Router, request: Request<Body>) -> Response<Body> {
    router.clone().oneshot(request).await.unwrap()
}

pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = cookie {
        builder = builder.header(header::COOKIE, format!("admin-token={token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn post_form(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(token) = cookie {
        builder = builder.header(header::COOKIE, format!("admin-token={token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8_lossy(&bytes).into_owned()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}

/// The raw `Set-Cookie` header for the session cookie, if any.
pub fn session_set_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("admin-token="))
        .map(ToString::to_string)
}

/// The session cookie value a browser would store from this response.
///
/// `None` when there is no session cookie or it was cleared.
pub fn stored_session(response: &Response<Body>) -> Option<String> {
    let header = session_set_cookie(response)?;
    if header.contains("Max-Age=0") {
        return None;
    }
    let value = header
        .trim_start_matches("admin-token=")
        .split(';')
        .next()
        .unwrap_or_default();
    (!value.is_empty()).then(|| value.to_string())
}

pub async fn login(router: &Router) -> String {
    let response = send(
        router,
        post_json(
            "/api/admin/login",
            &serde_json::json!({ "email": ADMIN_EMAIL, "password": PASSWORD }),
        ),
    )
    .await;
    stored_session(&response).unwrap()
}
