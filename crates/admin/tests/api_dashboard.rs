//! Dashboard aggregate served over the JSON API.

#![allow(clippy::unwrap_used)]

mod common;

use std::time::Duration;

use axum::http::StatusCode;
use serde_json::{Value, json};

use common::{EXPECTED_REVENUE, app_with, body_json, get, login, seeded_store, send, test_app};
use tedxuc_admin::db::InMemoryStore;

async fn fetch_dashboard(app: &common::TestApp, token: &str) -> Value {
    let response = send(&app.router, get("/api/admin/dashboard", Some(token))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "success");
    body["data"].clone()
}

#[tokio::test]
async fn test_stats_match_fixture() {
    let app = test_app().await;
    let token = login(&app.router).await;

    let data = fetch_dashboard(&app, &token).await;
    let stats = &data["stats"];

    assert_eq!(stats["totalEvents"], 3);
    assert_eq!(stats["activeEvents"], 2);
    assert_eq!(stats["totalRegistrations"], 10);
    assert_eq!(stats["paidRegistrations"], 6);
    assert_eq!(stats["pendingRegistrations"], 3);
    assert_eq!(stats["totalPayments"], 10);
    assert_eq!(stats["successfulPayments"], 6);
    assert_eq!(stats["totalRevenue"], json!(EXPECTED_REVENUE.to_string()));
}

#[tokio::test]
async fn test_events_ordered_by_date_with_counts() {
    let app = test_app().await;
    let token = login(&app.router).await;

    let data = fetch_dashboard(&app, &token).await;
    let events = data["events"].as_array().unwrap();

    let names: Vec<&str> = events.iter().map(|e| e["name"].as_str().unwrap()).collect();
    assert_eq!(names, ["Design Workshop", "Salon Night", "Main Stage"]);

    let counts: Vec<i64> = events
        .iter()
        .map(|e| e["registeredCount"].as_i64().unwrap())
        .collect();
    assert_eq!(counts, [3, 2, 5]);
    assert_eq!(events[0]["type"], "workshop");
    assert_eq!(events[1]["isActive"], false);
}

#[tokio::test]
async fn test_recent_registrations_newest_first_with_latest_payment() {
    let app = test_app().await;
    let token = login(&app.router).await;

    let data = fetch_dashboard(&app, &token).await;
    let registrations = data["registrations"].as_array().unwrap();

    assert_eq!(registrations.len(), 10);
    assert_eq!(registrations[0]["registrationNumber"], "TEDXUC-010");
    assert_eq!(registrations[9]["registrationNumber"], "TEDXUC-001");

    let first = &registrations[9];
    assert_eq!(first["event"], json!({ "name": "Main Stage", "type": "main" }));
    assert_eq!(first["latestPayment"]["status"], "success");
    assert_eq!(first["latestPayment"]["paymentMethod"], "bank_transfer");

    let unpaid = &registrations[1];
    assert_eq!(unpaid["registrationNumber"], "TEDXUC-009");
    assert!(unpaid["latestPayment"].is_null());

    let cancelled = &registrations[0];
    assert_eq!(cancelled["status"], "cancelled");
    assert_eq!(cancelled["attendanceStatus"], "not_attended");
}

#[tokio::test]
async fn test_dashboard_is_stable_without_writes() {
    let app = test_app().await;
    let token = login(&app.router).await;

    let first = fetch_dashboard(&app, &token).await;
    let second = fetch_dashboard(&app, &token).await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_empty_store_yields_zero_revenue() {
    let app = app_with(
        seeded_admin_only().await,
        "http://localhost:3001",
        Duration::from_secs(5),
    );
    let token = login(&app.router).await;

    let data = fetch_dashboard(&app, &token).await;

    assert_eq!(data["stats"]["totalRevenue"], "0");
    assert_eq!(data["stats"]["totalRegistrations"], 0);
    assert_eq!(data["events"], json!([]));
    assert_eq!(data["registrations"], json!([]));
}

#[tokio::test]
async fn test_store_failure_fails_whole_dashboard() {
    let app = test_app().await;
    let token = login(&app.router).await;
    app.store.fail_reads(true);

    let response = send(&app.router, get("/api/admin/dashboard", Some(&token))).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({ "status": "error", "message": "Internal server error" })
    );
}

#[tokio::test]
async fn test_slow_store_times_out() {
    let store = seeded_store(InMemoryStore::new().with_read_delay(Duration::from_millis(500))).await;
    let app = app_with(store, "http://localhost:3001", Duration::from_millis(20));
    let token = login(&app.router).await;

    let response = send(&app.router, get("/api/admin/dashboard", Some(&token))).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

async fn seeded_admin_only() -> InMemoryStore {
    use chrono::Utc;
    use tedxuc_admin::models::AdminPrincipal;
    use tedxuc_admin::services::hash_password;
    use tedxuc_core::{AdminId, Email};

    let store = InMemoryStore::new();
    store
        .insert_admin(AdminPrincipal {
            id: AdminId::new(),
            email: Email::parse(common::ADMIN_EMAIL).unwrap(),
            password_hash: hash_password(common::PASSWORD).unwrap(),
            created_at: Utc::now(),
        })
        .await
        .unwrap();
    store
}
