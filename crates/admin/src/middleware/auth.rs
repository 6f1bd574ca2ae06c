//! Authentication extractor for admin handlers.
//!
//! Reads the session cookie and verifies it. API requests get a 401 JSON
//! body on failure; page requests are redirected to the login page.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;

use super::gate::LOGIN_PATH;
use super::session::SESSION_COOKIE_NAME;
use crate::error::ErrorBody;
use crate::services::SessionClaims;
use crate::state::AppState;

/// Extractor that requires a valid admin session.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(RequireAdmin(claims): RequireAdmin) -> impl IntoResponse {
///     format!("Hello, {}!", claims.email)
/// }
/// ```
pub struct RequireAdmin(pub SessionClaims);

/// Error returned when an admin session is required but absent or invalid.
#[derive(Debug)]
pub enum AdminAuthRejection {
    /// Redirect to login page (for HTML requests).
    RedirectToLogin,
    /// No session cookie on an API request.
    MissingToken,
    /// Session cookie present on an API request but did not verify.
    InvalidToken,
}

impl IntoResponse for AdminAuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to(LOGIN_PATH).into_response(),
            Self::MissingToken => {
                (StatusCode::UNAUTHORIZED, Json(ErrorBody::new("Unauthorized"))).into_response()
            }
            Self::InvalidToken => {
                (StatusCode::UNAUTHORIZED, Json(ErrorBody::new("Invalid token"))).into_response()
            }
        }
    }
}

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AdminAuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let is_api = parts.uri.path().starts_with("/api/");
        let jar = CookieJar::from_headers(&parts.headers);

        let Some(cookie) = jar.get(SESSION_COOKIE_NAME) else {
            return Err(if is_api {
                AdminAuthRejection::MissingToken
            } else {
                AdminAuthRejection::RedirectToLogin
            });
        };

        state.tokens().verify(cookie.value()).map(Self).map_err(|e| {
            tracing::debug!(error = %e, "admin session rejected");
            if is_api {
                AdminAuthRejection::InvalidToken
            } else {
                AdminAuthRejection::RedirectToLogin
            }
        })
    }
}
