//! Admin session cookie.
//!
//! The session is nothing but the signed token in an `HttpOnly` cookie;
//! there is no server-side session store.

use axum_extra::extract::cookie::{Cookie, SameSite};
use time::Duration;

use crate::services::SESSION_TTL;

/// Session cookie name for admin.
pub const SESSION_COOKIE_NAME: &str = "admin-token";

/// Cookie carrying a freshly issued session token.
///
/// `Max-Age` matches the token lifetime. `secure` should be on whenever the
/// site is served over HTTPS.
#[must_use]
pub fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, token))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(Duration::seconds(SESSION_TTL.num_seconds()))
        .build()
}

/// Already-expired replacement for the session cookie.
#[must_use]
pub fn clear_session_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, ""))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(Duration::ZERO)
        .build()
}
