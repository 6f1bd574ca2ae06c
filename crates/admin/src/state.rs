//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AdminConfig;
use crate::db::{AdminDirectory, AdminRepository, DashboardRepository, DashboardStore};
use crate::services::{AdminAuthService, DashboardService, SessionTokenCodec};

/// Application state shared across all handlers.
///
/// Cheap to clone; everything lives behind one `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    tokens: SessionTokenCodec,
    admins: Arc<dyn AdminDirectory>,
    dashboard: Arc<dyn DashboardStore>,
}

impl AppState {
    /// Build state over arbitrary store implementations.
    #[must_use]
    pub fn new(
        config: AdminConfig,
        admins: Arc<dyn AdminDirectory>,
        dashboard: Arc<dyn DashboardStore>,
    ) -> Self {
        let tokens = SessionTokenCodec::new(&config.jwt_secret);
        Self {
            inner: Arc::new(AppStateInner {
                config,
                tokens,
                admins,
                dashboard,
            }),
        }
    }

    /// Build state backed by `PostgreSQL`.
    #[must_use]
    pub fn with_pool(config: AdminConfig, pool: PgPool) -> Self {
        Self::new(
            config,
            Arc::new(AdminRepository::new(pool.clone())),
            Arc::new(DashboardRepository::new(pool)),
        )
    }

    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn tokens(&self) -> &SessionTokenCodec {
        &self.inner.tokens
    }

    #[must_use]
    pub fn dashboard_store(&self) -> &dyn DashboardStore {
        self.inner.dashboard.as_ref()
    }

    /// Login service bound to this state's stores.
    #[must_use]
    pub fn auth(&self) -> AdminAuthService<'_> {
        AdminAuthService::new(self.inner.admins.as_ref(), &self.inner.tokens)
    }

    /// Dashboard service bound to this state's stores.
    #[must_use]
    pub fn dashboard(&self) -> DashboardService<'_> {
        DashboardService::new(self.inner.dashboard.as_ref(), self.inner.config.store_timeout)
    }

    /// Whether session cookies carry the `Secure` attribute.
    #[must_use]
    pub fn secure_cookies(&self) -> bool {
        self.inner.config.secure_cookies()
    }
}
