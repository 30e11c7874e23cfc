//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Instant;

use crate::config::ServerConfig;
use crate::db::ProfileStore;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the profile store and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    store: ProfileStore,
    started_at: Instant,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Server configuration
    /// * `store` - Profile store engine
    #[must_use]
    pub fn new(config: ServerConfig, store: ProfileStore) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                started_at: Instant::now(),
            }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the profile store.
    #[must_use]
    pub fn store(&self) -> &ProfileStore {
        &self.inner.store
    }

    /// Seconds since the state was created.
    #[must_use]
    pub fn uptime_secs(&self) -> f64 {
        self.inner.started_at.elapsed().as_secs_f64()
    }
}
