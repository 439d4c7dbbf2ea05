//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AdminConfig;
use crate::services::email::EmailService;

/// Application state shared across all handlers.
///
/// Cheap to clone; the inner data lives behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    pool: PgPool,
    email: EmailService,
}

impl AppState {
    /// Build the application state.
    ///
    /// # Errors
    ///
    /// Returns error if the SMTP relay cannot be configured.
    pub fn new(
        config: AdminConfig,
        pool: PgPool,
    ) -> Result<Self, lettre::transport::smtp::Error> {
        let email = EmailService::new(&config.email)?;
        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                email,
            }),
        })
    }

    /// Application configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Email service.
    #[must_use]
    pub fn email(&self) -> &EmailService {
        &self.inner.email
    }
}
