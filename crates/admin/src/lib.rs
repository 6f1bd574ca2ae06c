//! TEDxUC admin library.
//!
//! Operator login, the session gate over `/admin` pages and the dashboard
//! aggregate for the event site. Served by the `tedxuc-admin` binary and
//! exposed as a library so the router can be exercised in tests.
//!
//! # Security
//!
//! The session token is the only credential a browser holds. It is signed
//! with `ADMIN_JWT_SECRET` and cannot be revoked before it expires; rotating
//! the secret invalidates every outstanding session.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

use axum::Router;

use crate::middleware::{admin_gate, security_headers_middleware};
use crate::state::AppState;

/// Build the application router with its state applied.
///
/// The admin gate wraps every route and the fallback, so unknown paths under
/// `/admin` redirect to the login page rather than revealing a 404. Tracing
/// and Sentry layers are added by the binary.
pub fn app(state: AppState) -> Router {
    routes::routes()
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            admin_gate,
        ))
        .layer(axum::middleware::from_fn(security_headers_middleware))
        .with_state(state)
}
