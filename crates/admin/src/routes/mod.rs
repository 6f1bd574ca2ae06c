//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness
//! GET  /health/ready           - Readiness (store reachable)
//!
//! # JSON API
//! POST /api/admin/login        - Check credentials, set session cookie
//! POST /api/admin/logout       - Clear session cookie
//! GET  /api/admin/dashboard    - Dashboard summary (session required)
//!
//! # Pages (behind the admin gate, except the login page)
//! GET  /admin/login            - Login form
//! POST /admin/login            - Login form submission
//! GET  /admin                  - Dashboard
//! POST /admin/logout           - Logout
//! ```

pub mod api;
pub mod health;
pub mod pages;

use axum::{Router, http::StatusCode};

use crate::state::AppState;

/// All admin routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(api::router())
        .merge(pages::router())
        .fallback(not_found)
}

async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}
