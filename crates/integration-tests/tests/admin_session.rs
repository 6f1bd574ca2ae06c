//! Sign-in, dashboard and sign-out against a running admin server.
//!
//! These tests require:
//! - A migrated `PostgreSQL` database holding one admin account and nothing
//!   but `tedx-cli seed demo` data
//! - The admin server running (cargo run -p tedxuc-admin)
//! - `ADMIN_TEST_EMAIL` / `ADMIN_TEST_PASSWORD` in the environment

use reqwest::StatusCode;
use reqwest::header::{LOCATION, SET_COOKIE};
use serde_json::{Value, json};

use tedxuc_integration_tests::{admin_base_url, admin_credentials, client};

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
#[ignore = "Requires running admin server"]
async fn test_readiness_reaches_database() {
    let resp = client()
        .get(format!("{}/health/ready", admin_base_url()))
        .send()
        .await
        .expect("Failed to reach server");

    assert_eq!(resp.status(), StatusCode::OK);
}

// ============================================================================
// Gate
// ============================================================================

#[tokio::test]
#[ignore = "Requires running admin server"]
async fn test_dashboard_redirects_without_session() {
    let resp = client()
        .get(format!("{}/admin", admin_base_url()))
        .send()
        .await
        .expect("Failed to get dashboard");

    assert!(resp.status().is_redirection());
    assert_eq!(
        resp.headers().get(LOCATION).and_then(|v| v.to_str().ok()),
        Some("/admin/login")
    );
}

#[tokio::test]
#[ignore = "Requires running admin server"]
async fn test_api_rejects_without_session() {
    let resp = client()
        .get(format!("{}/api/admin/dashboard", admin_base_url()))
        .send()
        .await
        .expect("Failed to get dashboard data");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = resp.json().await.expect("Invalid JSON");
    assert_eq!(body["status"], "error");
}

/// Numbers produced by `tedx-cli seed demo` on an otherwise empty database.
fn assert_demo_summary(data: &Value) {
    assert_eq!(
        data["stats"],
        json!({
            "totalEvents": 3,
            "activeEvents": 2,
            "totalRegistrations": 8,
            "paidRegistrations": 4,
            "pendingRegistrations": 3,
            "totalPayments": 8,
            "successfulPayments": 4,
            "totalRevenue": "425000",
        })
    );

    let registrations = data["registrations"].as_array().expect("registrations array");
    assert_eq!(registrations.len(), 8);
    assert_eq!(registrations[0]["registrationNumber"], "TEDXUC-DEMO-008");

    let find = |number: &str| {
        registrations
            .iter()
            .find(|r| r["registrationNumber"] == number)
            .unwrap_or_else(|| panic!("{number} missing"))
    };
    // Failed first attempt, then a successful retry.
    let retried = &find("TEDXUC-DEMO-001")["latestPayment"];
    assert_eq!(retried["status"], "success");
    assert_eq!(retried["amount"], "150000");
    assert!(find("TEDXUC-DEMO-004")["latestPayment"].is_null());

    let counts: Vec<i64> = data["events"]
        .as_array()
        .expect("events array")
        .iter()
        .map(|e| e["registeredCount"].as_i64().unwrap_or(-1))
        .collect();
    // Ordered by date: Salon Night (past), workshop, main stage.
    assert_eq!(counts, [2, 2, 4]);
}

// ============================================================================
// Full session
// ============================================================================

#[tokio::test]
#[ignore = "Requires running admin server and an admin account"]
async fn test_login_dashboard_logout() {
    let client = client();
    let base_url = admin_base_url();
    let (email, password) = admin_credentials();

    let resp = client
        .post(format!("{base_url}/api/admin/login"))
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await
        .expect("Failed to log in");
    assert_eq!(resp.status(), StatusCode::OK);
    let set_cookie = resp
        .headers()
        .get(SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(set_cookie.starts_with("admin-token="));
    assert!(set_cookie.contains("HttpOnly"));

    let resp = client
        .get(format!("{base_url}/api/admin/dashboard"))
        .send()
        .await
        .expect("Failed to get dashboard data");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Invalid JSON");
    assert_eq!(body["status"], "success");
    assert_demo_summary(&body["data"]);

    let resp = client
        .get(format!("{base_url}/admin"))
        .send()
        .await
        .expect("Failed to get dashboard page");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .post(format!("{base_url}/api/admin/logout"))
        .send()
        .await
        .expect("Failed to log out");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{base_url}/api/admin/dashboard"))
        .send()
        .await
        .expect("Failed to get dashboard data");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running admin server and an admin account"]
async fn test_wrong_password_is_unauthorized() {
    let (email, _) = admin_credentials();

    let resp = client()
        .post(format!("{}/api/admin/login", admin_base_url()))
        .json(&json!({ "email": email, "password": "definitely-not-the-password" }))
        .send()
        .await
        .expect("Failed to log in");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = resp.json().await.expect("Invalid JSON");
    assert_eq!(body["message"], "Invalid credentials");
}
