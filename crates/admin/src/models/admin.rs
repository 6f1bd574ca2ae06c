//! Admin principal domain type.

use chrono::{DateTime, Utc};

use tedxuc_core::{AdminId, Email};

/// The operator account allowed into the admin area.
///
/// `password_hash` is an Argon2 PHC string. It never leaves the server, so
/// `Debug` redacts it.
#[derive(Clone)]
pub struct AdminPrincipal {
    pub id: AdminId,
    pub email: Email,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl std::fmt::Debug for AdminPrincipal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminPrincipal")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .field("created_at", &self.created_at)
            .finish()
    }
}
