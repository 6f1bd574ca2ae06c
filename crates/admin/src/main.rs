//! TEDxUC Admin - operator panel for the event site.
//!
//! Serves the admin API and pages on port 3001 (see `AdminConfig`).
//!
//! # Architecture
//!
//! - Axum web framework
//! - Askama templates for server-side rendering
//! - `PostgreSQL` for admins, events, registrations and payments
//! - Stateless sessions: a signed token in an `HttpOnly` cookie
//!
//! TLS is terminated by the proxy in front of this process. Migrations are
//! applied with `tedx-cli migrate`, never on startup.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::borrow::Cow;
use std::time::Duration;

use axum::Router;
use axum::http::{Request, Response};
use sentry::integrations::tracing::{self as sentry_tracing, EventFilter};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::{Level, Span};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use tedxuc_admin::config::AdminConfig;
use tedxuc_admin::db;
use tedxuc_admin::state::AppState;

fn init_sentry(config: &AdminConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_deref()?;

    let options = sentry::ClientOptions {
        release: sentry::release_name!(),
        environment: config.sentry_environment.clone().map(Cow::Owned),
        sample_rate: config.sentry_sample_rate,
        traces_sample_rate: config.sentry_traces_sample_rate,
        attach_stacktrace: true,
        // Registrant and admin emails stay out of Sentry.
        send_default_pii: false,
        ..Default::default()
    };
    Some(sentry::init((dsn, options)))
}

/// Warnings and errors become Sentry events, info and debug become breadcrumbs.
fn sentry_filter(metadata: &tracing::Metadata<'_>) -> EventFilter {
    match *metadata.level() {
        Level::ERROR | Level::WARN => EventFilter::Event,
        Level::INFO | Level::DEBUG => EventFilter::Breadcrumb,
        Level::TRACE => EventFilter::Ignore,
    }
}

/// JSON logs on Fly.io, human-readable text everywhere else.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "tedxuc_admin=info,tower_http=debug".into());

    let on_fly = std::env::var_os("FLY_APP_NAME").is_some();
    let json = on_fly.then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));
    let text = (!on_fly).then(tracing_subscriber::fmt::layer);

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(text)
        .with(sentry_tracing::layer().event_filter(sentry_filter))
        .init();
}

/// Request spans with status and latency, wrapped in the Sentry layers.
fn instrumented(app: Router) -> Router {
    let trace = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<_>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                status = tracing::field::Empty,
                latency_ms = tracing::field::Empty,
            )
        })
        .on_response(|response: &Response<_>, latency: Duration, span: &Span| {
            span.record("status", response.status().as_u16());
            span.record(
                "latency_ms",
                u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
            );
            DefaultOnResponse::default().on_response(response, latency, span);
        });

    app.layer(trace)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

#[tokio::main]
async fn main() {
    let config = AdminConfig::from_env().expect("Failed to load configuration");

    // Sentry first, so the tracing layer has a client to report to.
    let _sentry = init_sentry(&config);
    init_tracing();

    let pool = db::create_pool(&config.database_url)
        .await
        .expect("Failed to create database pool");

    let addr = config.socket_addr();
    let app = instrumented(tedxuc_admin::app(AppState::with_pool(config, pool)));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");
    tracing::info!("admin listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutting down");
}
