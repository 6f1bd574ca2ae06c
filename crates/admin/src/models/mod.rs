//! Domain models for the admin side of the event site.
//!
//! - [`admin`]: the operator principal checked at login
//! - [`event`]: stored events, registrations and payments
//! - [`dashboard`]: read-only projections returned by the dashboard

pub mod admin;
pub mod dashboard;
pub mod event;

pub use admin::AdminPrincipal;
pub use dashboard::{
    DashboardStats, DashboardSummary, EventOverview, EventRef, LatestPayment, PaymentTotals,
    RegistrationCounts, RegistrationOverview,
};
pub use event::{Event, Payment, Registration};
