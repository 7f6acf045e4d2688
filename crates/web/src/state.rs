//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::TaprytConfig;

/// Error building application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("invalid base_url: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: TaprytConfig,
    pool: PgPool,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured base URL cannot be parsed.
    pub fn new(config: TaprytConfig, pool: PgPool) -> Result<Self, StateError> {
        // Fail fast on a malformed base URL rather than per-request
        url::Url::parse(&config.base_url)?;

        Ok(Self {
            inner: Arc::new(AppStateInner { config, pool }),
        })
    }

    /// Get a reference to the application configuration.
    #[must_use]
    pub fn config(&self) -> &TaprytConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }
}
