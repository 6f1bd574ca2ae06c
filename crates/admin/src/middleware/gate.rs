//! Route gate for the admin pages.
//!
//! Every request under `/admin` other than the login page must carry a valid
//! session cookie. Anything else is redirected to the login page; a cookie
//! that is present but fails verification is cleared on the way out.
//! Verification failures are not distinguished in the response.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use chrono::{DateTime, Utc};

use super::session::{SESSION_COOKIE_NAME, clear_session_cookie};
use crate::services::{SessionClaims, SessionTokenCodec};
use crate::state::AppState;

/// Path of the admin login page; always reachable.
pub const LOGIN_PATH: &str = "/admin/login";

/// Root of the gated page area.
pub const ADMIN_ROOT: &str = "/admin";

/// What the gate does with a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Not a protected path; pass through untouched.
    Bypass,
    /// Protected path with a valid session.
    Allow(SessionClaims),
    /// Protected path without a valid session.
    RedirectToLogin {
        /// A cookie was sent but did not verify.
        clear_cookie: bool,
    },
}

/// Whether `path` is inside the gated area.
///
/// Matches `/admin` and anything below it by path segment, except the login
/// page and anything below it.
#[must_use]
pub fn is_protected(path: &str) -> bool {
    within(path, ADMIN_ROOT) && !within(path, LOGIN_PATH)
}

fn within(path: &str, root: &str) -> bool {
    path.strip_prefix(root)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

/// Decide what to do with a request for `path` carrying `cookie`.
#[must_use]
pub fn decide(
    tokens: &SessionTokenCodec,
    path: &str,
    cookie: Option<&str>,
    now: DateTime<Utc>,
) -> GateDecision {
    if !is_protected(path) {
        return GateDecision::Bypass;
    }

    let Some(token) = cookie else {
        return GateDecision::RedirectToLogin {
            clear_cookie: false,
        };
    };

    match tokens.verify_at(token, now) {
        Ok(claims) => GateDecision::Allow(claims),
        Err(e) => {
            tracing::debug!(path, error = %e, "admin session rejected");
            GateDecision::RedirectToLogin { clear_cookie: true }
        }
    }
}

/// Middleware applying [`decide`] to the current request.
pub async fn admin_gate(
    State(state): State<AppState>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    let cookie = jar.get(SESSION_COOKIE_NAME).map(|c| c.value().to_owned());
    let decision = decide(
        state.tokens(),
        request.uri().path(),
        cookie.as_deref(),
        Utc::now(),
    );

    match decision {
        GateDecision::Bypass | GateDecision::Allow(_) => next.run(request).await,
        GateDecision::RedirectToLogin { clear_cookie: false } => {
            Redirect::to(LOGIN_PATH).into_response()
        }
        GateDecision::RedirectToLogin { clear_cookie: true } => (
            jar.add(clear_session_cookie(state.secure_cookies())),
            Redirect::to(LOGIN_PATH),
        )
            .into_response(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{Duration, TimeZone};
    use secrecy::SecretString;

    use tedxuc_core::Email;

    use super::*;

    fn codec() -> SessionTokenCodec {
        SessionTokenCodec::new(&SecretString::from(
            "q7Vb!2xLm#9Rt$4zKp@8Wn^3Yc&6Hd*1F".to_string(),
        ))
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_protected_paths() {
        assert!(is_protected("/admin"));
        assert!(is_protected("/admin/"));
        assert!(is_protected("/admin/registrations"));

        assert!(!is_protected("/admin/login"));
        assert!(!is_protected("/admin/login/"));
        assert!(!is_protected("/"));
        assert!(!is_protected("/events"));
        assert!(!is_protected("/administrator"));
        assert!(!is_protected("/api/admin/dashboard"));
    }

    #[test]
    fn test_login_page_bypasses_without_cookie() {
        assert_eq!(
            decide(&codec(), "/admin/login", None, now()),
            GateDecision::Bypass
        );
    }

    #[test]
    fn test_missing_cookie_redirects_without_clearing() {
        assert_eq!(
            decide(&codec(), "/admin", None, now()),
            GateDecision::RedirectToLogin {
                clear_cookie: false
            }
        );
    }

    #[test]
    fn test_invalid_cookie_redirects_and_clears() {
        assert_eq!(
            decide(&codec(), "/admin", Some("garbage"), now()),
            GateDecision::RedirectToLogin { clear_cookie: true }
        );
    }

    #[test]
    fn test_valid_cookie_allows() {
        let codec = codec();
        let email = Email::parse("admin@tedxuc.com").unwrap();
        let (token, claims) = codec.issue_at(&email, now()).unwrap();

        assert_eq!(
            decide(&codec, "/admin/registrations", Some(&token), now()),
            GateDecision::Allow(claims)
        );
    }

    #[test]
    fn test_expired_cookie_redirects_and_clears() {
        let codec = codec();
        let email = Email::parse("admin@tedxuc.com").unwrap();
        let (token, _) = codec.issue_at(&email, now()).unwrap();

        assert_eq!(
            decide(&codec, "/admin", Some(&token), now() + Duration::hours(9)),
            GateDecision::RedirectToLogin { clear_cookie: true }
        );
    }
}
