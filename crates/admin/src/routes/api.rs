//! JSON API for admin clients.
//!
//! Success bodies carry `"status": "success"`; failures use [`ErrorBody`]
//! via [`AppError`].
//!
//! [`ErrorBody`]: crate::error::ErrorBody

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::{get, post},
};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::AppError;
use crate::middleware::{RequireAdmin, clear_session_cookie, session_cookie};
use crate::models::DashboardSummary;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/admin/login", post(login))
        .route("/api/admin/logout", post(logout))
        .route("/api/admin/dashboard", get(dashboard))
}

/// Login request body. Missing fields are treated as blank.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// `{"status": "success", "message": ...}`
#[derive(Debug, Serialize)]
pub struct StatusMessage {
    pub status: &'static str,
    pub message: &'static str,
}

impl StatusMessage {
    const fn success(message: &'static str) -> Self {
        Self {
            status: "success",
            message,
        }
    }
}

/// `{"status": "success", "data": ...}`
#[derive(Debug, Serialize)]
pub struct DataEnvelope<T> {
    pub status: &'static str,
    pub data: T,
}

/// POST /api/admin/login
#[instrument(skip_all)]
async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<StatusMessage>), AppError> {
    let Json(body) = payload.map_err(|e| {
        tracing::debug!(error = %e, "rejected login body");
        AppError::BadRequest("Invalid request body".to_string())
    })?;

    let email = body.email.unwrap_or_default();
    let password = body.password.unwrap_or_default();
    let issued = state.auth().login(&email, &password).await?;

    let jar = jar.add(session_cookie(issued.token, state.secure_cookies()));
    Ok((jar, Json(StatusMessage::success("Login successful"))))
}

/// POST /api/admin/logout
///
/// Always succeeds, with or without a session.
async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Json<StatusMessage>) {
    (
        jar.add(clear_session_cookie(state.secure_cookies())),
        Json(StatusMessage::success("Logged out")),
    )
}

/// GET /api/admin/dashboard
#[instrument(skip_all)]
async fn dashboard(
    RequireAdmin(claims): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<DataEnvelope<DashboardSummary>>, AppError> {
    tracing::debug!(admin = %claims.email, "dashboard requested");
    let summary = state.dashboard().summary().await?;
    Ok(Json(DataEnvelope {
        status: "success",
        data: summary,
    }))
}
