//! Application state shared across all handlers.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::config::Config;
use crate::db;
use crate::metrics::Metrics;
use crate::services::PlayerService;
use crate::store::{MemoryPlayerStore, PgPlayerStore, PlayerStore};

/// Shared application state.
///
/// Wrapped in Arc internally so Clone is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Backing player store.
    store: Arc<dyn PlayerStore>,

    /// Player operations.
    players: PlayerService,

    /// Prometheus metrics.
    metrics: Arc<Metrics>,

    /// Path the player API is mounted under.
    api_prefix: String,

    /// Per-request timeout.
    request_timeout: Duration,
}

impl AppState {
    /// Create application state from configuration.
    ///
    /// Connects to PostgreSQL and applies migrations when a database URL is
    /// configured; otherwise players live in process memory.
    pub async fn new(config: &Config) -> Result<Self> {
        let store: Arc<dyn PlayerStore> = match &config.database_url {
            Some(url) => {
                let pool = db::create_pool(url, config.database_max_connections)
                    .await
                    .context("failed to create database pool")?;

                db::run_migrations(&pool)
                    .await
                    .context("failed to run migrations")?;

                info!("connected to PostgreSQL");
                Arc::new(PgPlayerStore::new(pool))
            }
            None => {
                warn!("DATABASE_URL not set, players will not survive a restart");
                Arc::new(MemoryPlayerStore::new())
            }
        };

        Ok(Self::with_store(config, store))
    }

    /// Create application state around an existing store.
    pub fn with_store(config: &Config, store: Arc<dyn PlayerStore>) -> Self {
        let metrics = Arc::new(Metrics::new());
        let players = PlayerService::new(store.clone(), metrics.clone());

        Self {
            inner: Arc::new(AppStateInner {
                store,
                players,
                metrics,
                api_prefix: config.api_prefix.clone(),
                request_timeout: config.request_timeout,
            }),
        }
    }

    /// Get the player service.
    pub fn players(&self) -> &PlayerService {
        &self.inner.players
    }

    /// Get the metrics registry.
    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.inner.metrics
    }

    pub fn api_prefix(&self) -> &str {
        &self.inner.api_prefix
    }

    pub fn request_timeout(&self) -> Duration {
        self.inner.request_timeout
    }

    /// Name of the backing store, for health reporting.
    pub fn store_backend(&self) -> &'static str {
        self.inner.store.backend()
    }

    /// Check if the backing store is reachable.
    pub async fn store_healthy(&self) -> bool {
        self.inner.store.healthy().await
    }
}
