use std::sync::Arc;

use marketplace_core::lifecycle::AdLifecycleGuard;
use marketplace_core::rating::RatingAggregator;
use marketplace_core::search::AdSearchEngine;
use marketplace_db::PgStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: every field is either a pool handle or `Arc`-backed.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool, used directly by the reservation and
    /// feedback CRUD handlers.
    pub pool: marketplace_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Guarded ad mutations.
    pub lifecycle: AdLifecycleGuard,
    /// Ad search over the PostgreSQL-backed ports.
    pub search: AdSearchEngine,
    /// Per-ad rating read-out.
    pub ratings: RatingAggregator,
}

impl AppState {
    /// Wire the domain services to a [`PgStore`] over `pool`.
    pub fn new(pool: marketplace_db::DbPool, config: ServerConfig) -> Self {
        let store = Arc::new(PgStore::new(pool.clone()));

        let lifecycle = AdLifecycleGuard::new(store.clone(), store.clone());
        let search = AdSearchEngine::new(store.clone(), store.clone(), store.clone())
            .with_concurrency(config.search_concurrency);
        let ratings = RatingAggregator::new(store);

        Self {
            pool,
            config: Arc::new(config),
            lifecycle,
            search,
            ratings,
        }
    }
}
