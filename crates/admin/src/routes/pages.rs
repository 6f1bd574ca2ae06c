//! Server-rendered admin pages.
//!
//! Everything here sits behind the admin gate, which lets the login page
//! through and redirects everything else without a valid session.

use askama::Template;
use axum::{
    Form, Router,
    extract::{State, rejection::FormRejection},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use axum_extra::extract::CookieJar;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use crate::error::AppError;
use crate::filters;
use crate::middleware::gate::{ADMIN_ROOT, LOGIN_PATH};
use crate::middleware::{RequireAdmin, SESSION_COOKIE_NAME, clear_session_cookie, session_cookie};
use crate::models::{DashboardStats, DashboardSummary, EventOverview, RegistrationOverview};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin", get(dashboard_page))
        .route("/admin/login", get(login_page).post(login_submit))
        .route("/admin/logout", post(logout))
}

// =============================================================================
// Templates
// =============================================================================

#[derive(Template)]
#[template(path = "login.html")]
struct LoginTemplate {
    email: String,
    error: Option<String>,
}

#[derive(Template)]
#[template(path = "dashboard.html")]
struct DashboardTemplate {
    admin_email: String,
    stats: DashboardStats,
    events: Vec<EventRow>,
    registrations: Vec<RegistrationRow>,
}

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorTemplate {
    message: String,
}

/// Event row for the dashboard table.
#[derive(Debug, Clone)]
struct EventRow {
    name: String,
    event_type: String,
    date: String,
    registered: i64,
    quota: i32,
    price: Decimal,
    is_active: bool,
}

impl From<&EventOverview> for EventRow {
    fn from(event: &EventOverview) -> Self {
        Self {
            name: event.name.clone(),
            event_type: event.event_type.clone(),
            date: event.date.format("%d %b %Y, %H:%M").to_string(),
            registered: event.registered_count,
            quota: event.quota,
            price: event.price,
            is_active: event.is_active,
        }
    }
}

/// Registration row for the dashboard table.
#[derive(Debug, Clone)]
struct RegistrationRow {
    number: String,
    full_name: String,
    email: String,
    event: String,
    status: &'static str,
    attendance: &'static str,
    payment: String,
    created_at: String,
}

impl From<&RegistrationOverview> for RegistrationRow {
    fn from(registration: &RegistrationOverview) -> Self {
        let payment = registration.latest_payment.as_ref().map_or_else(
            || "none".to_string(),
            |p| format!("{} ({})", p.status, p.payment_method),
        );

        Self {
            number: registration.registration_number.clone(),
            full_name: registration.full_name.clone(),
            email: registration.email.clone(),
            event: format!(
                "{} / {}",
                registration.event.name, registration.event.event_type
            ),
            status: registration.status.as_str(),
            attendance: registration.attendance_status.as_str(),
            payment,
            created_at: registration.created_at.format("%d %b %Y, %H:%M").to_string(),
        }
    }
}

fn render(template: &impl Template, status: StatusCode) -> Response {
    match template.render() {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            tracing::error!("Template render error: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Login form fields. Missing fields are treated as blank.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

/// GET /admin/login
///
/// Sends an already signed-in admin straight to the dashboard.
async fn login_page(State(state): State<AppState>, jar: CookieJar) -> Response {
    let signed_in = jar
        .get(SESSION_COOKIE_NAME)
        .is_some_and(|c| state.tokens().verify(c.value()).is_ok());
    if signed_in {
        return Redirect::to(ADMIN_ROOT).into_response();
    }

    render(
        &LoginTemplate {
            email: String::new(),
            error: None,
        },
        StatusCode::OK,
    )
}

/// POST /admin/login
#[instrument(skip_all)]
async fn login_submit(
    State(state): State<AppState>,
    jar: CookieJar,
    form: Result<Form<LoginForm>, FormRejection>,
) -> Response {
    let Ok(Form(form)) = form else {
        return render(
            &LoginTemplate {
                email: String::new(),
                error: Some("Invalid request body".to_string()),
            },
            StatusCode::BAD_REQUEST,
        );
    };

    match state.auth().login(&form.email, &form.password).await {
        Ok(issued) => (
            jar.add(session_cookie(issued.token, state.secure_cookies())),
            Redirect::to(ADMIN_ROOT),
        )
            .into_response(),
        Err(e) => {
            let err = AppError::from(e);
            let status = err.status_code();
            if status.is_server_error() {
                tracing::error!(error = %err, "admin login failed");
            }
            render(
                &LoginTemplate {
                    email: form.email,
                    error: Some(err.public_message()),
                },
                status,
            )
        }
    }
}

/// GET /admin
#[instrument(skip_all)]
async fn dashboard_page(
    RequireAdmin(claims): RequireAdmin,
    State(state): State<AppState>,
) -> Response {
    let summary: DashboardSummary = match state.dashboard().summary().await {
        Ok(summary) => summary,
        Err(e) => {
            let err = AppError::from(e);
            let event_id = sentry::capture_error(&err);
            tracing::error!(error = %err, sentry_event_id = %event_id, "dashboard failed");
            return render(
                &ErrorTemplate {
                    message: "The dashboard could not be loaded. Please try again.".to_string(),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            );
        }
    };

    render(
        &DashboardTemplate {
            admin_email: claims.email.to_string(),
            stats: summary.stats,
            events: summary.events.iter().map(EventRow::from).collect(),
            registrations: summary
                .registrations
                .iter()
                .map(RegistrationRow::from)
                .collect(),
        },
        StatusCode::OK,
    )
}

/// POST /admin/logout
async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    (
        jar.add(clear_session_cookie(state.secure_cookies())),
        Redirect::to(LOGIN_PATH),
    )
}
