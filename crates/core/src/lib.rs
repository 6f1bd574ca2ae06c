//! TEDxUC Core - Shared types library.
//!
//! This crate provides the domain vocabulary shared by the workspace:
//! - `admin` - Admin API, route gate and dashboard
//! - `cli` - Migrations, admin provisioning and seeding
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access,
//! no HTTP. Database encoding is opt-in through the `postgres` feature.
//!
//! # Modules
//!
//! - [`types`] - Type-safe IDs, validated emails and lifecycle statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
