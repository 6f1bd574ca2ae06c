//! HTTP middleware and extractors for admin.
//!
//! # Layers (outermost first, see `main.rs`)
//!
//! 1. Sentry (capture errors and transactions)
//! 2. `TraceLayer` (request tracing)
//! 3. Security headers
//! 4. Admin gate on `/admin/*` pages
//!
//! API handlers check the session themselves with [`RequireAdmin`].

pub mod auth;
pub mod gate;
pub mod security_headers;
pub mod session;

pub use auth::{AdminAuthRejection, RequireAdmin};
pub use gate::{GateDecision, admin_gate};
pub use security_headers::security_headers_middleware;
pub use session::{SESSION_COOKIE_NAME, clear_session_cookie, session_cookie};
