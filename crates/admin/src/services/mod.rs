//! Business logic services for admin.
//!
//! # Services
//!
//! - `auth` - password login issuing session tokens
//! - `dashboard` - concurrent aggregation of dashboard statistics
//! - `token` - signing and verification of session tokens

pub mod auth;
pub mod dashboard;
pub mod token;

pub use auth::{AdminAuthService, AuthError, IssuedToken, hash_password};
pub use dashboard::{DashboardError, DashboardService, RECENT_REGISTRATIONS_LIMIT};
pub use token::{SESSION_TTL, SessionClaims, SessionTokenCodec, TokenError};
