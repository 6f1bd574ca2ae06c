//! End-to-end tests for the TEDxUC admin server.
//!
//! The in-process router tests live in `crates/admin/tests`. The tests here
//! talk HTTP to a real server backed by `PostgreSQL`, so they are `#[ignore]`d
//! by default.
//!
//! # Running Tests
//!
//! ```bash
//! tedx-cli migrate
//! tedx-cli admin create -e admin@tedxuc.com   # password from ADMIN_PASSWORD
//! tedx-cli seed demo
//! cargo run -p tedxuc-admin &
//!
//! ADMIN_TEST_EMAIL=admin@tedxuc.com ADMIN_TEST_PASSWORD=... \
//!     cargo test -p tedxuc-integration-tests -- --ignored
//! ```
//!
//! # Environment Variables
//!
//! - `ADMIN_BASE_URL` - Server under test (default: `http://localhost:3001`)
//! - `ADMIN_TEST_EMAIL` / `ADMIN_TEST_PASSWORD` - An existing admin account

use reqwest::{Client, redirect};

/// Base URL for the admin server (configurable via environment).
#[must_use]
pub fn admin_base_url() -> String {
    std::env::var("ADMIN_BASE_URL").unwrap_or_else(|_| "http://localhost:3001".to_string())
}

/// Credentials of the admin account the tests sign in with.
///
/// # Panics
///
/// Panics if `ADMIN_TEST_EMAIL` or `ADMIN_TEST_PASSWORD` is unset.
#[must_use]
pub fn admin_credentials() -> (String, String) {
    let email = std::env::var("ADMIN_TEST_EMAIL").expect("ADMIN_TEST_EMAIL must be set");
    let password = std::env::var("ADMIN_TEST_PASSWORD").expect("ADMIN_TEST_PASSWORD must be set");
    (email, password)
}

/// Client with a cookie jar that does not follow redirects, so gate
/// redirects can be asserted on.
///
/// # Panics
///
/// Panics if the client cannot be built.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .redirect(redirect::Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}
