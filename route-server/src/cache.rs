//! Caching layer for route searches.
//!
//! The network never changes after loading, so a search result for a given
//! (origin, destination, penalty) stays valid for the life of the process.
//! The cache is bounded by capacity and TTL only to cap memory use.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::{debug, warn};

use crate::domain::StopName;
use crate::network::Network;
use crate::planner::{Planner, SearchConfig, SearchError, SearchRequest, SearchResult};

/// Cache key for routes: (origin, destination, transfer penalty).
type RouteKey = (StopName, StopName, u32);

/// Cached search result.
type RouteEntry = Arc<SearchResult>;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60 * 60),
            max_capacity: 10_000,
        }
    }
}

/// Cache of completed route searches.
pub struct RouteCache {
    routes: MokaCache<RouteKey, RouteEntry>,
}

impl RouteCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let routes = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { routes }
    }

    /// Get a cached search result.
    pub async fn get(&self, key: &RouteKey) -> Option<RouteEntry> {
        self.routes.get(key).await
    }

    /// Insert a search result into the cache.
    pub async fn insert(&self, key: RouteKey, entry: RouteEntry) {
        self.routes.insert(key, entry).await;
    }

    /// Get cache statistics (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.routes.entry_count()
    }
}

/// Route planner with caching.
///
/// Owns the shared network and runs each search on the blocking pool,
/// cancelling it once the configured timeout elapses. Only successful
/// searches are cached.
pub struct CachedPlanner {
    network: Arc<Network>,
    config: SearchConfig,
    cache: RouteCache,
}

impl CachedPlanner {
    /// Create a new cached planner.
    pub fn new(network: Arc<Network>, config: SearchConfig, cache_config: &CacheConfig) -> Self {
        Self {
            network,
            config,
            cache: RouteCache::new(cache_config),
        }
    }

    /// The network searched by this planner.
    pub fn network(&self) -> &Network {
        &self.network
    }

    /// The search configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Plan a route, using the cache if available.
    pub async fn plan(&self, request: SearchRequest) -> Result<RouteEntry, SearchError> {
        let penalty = request
            .transfer_penalty
            .unwrap_or(self.config.transfer_penalty);
        let key = (request.origin.clone(), request.destination.clone(), penalty);

        // Try cache first
        if let Some(cached) = self.cache.get(&key).await {
            debug!(origin = %key.0, destination = %key.1, penalty, "Route cache hit");
            return Ok(cached);
        }

        let request = request.with_transfer_penalty(penalty);
        let result = Arc::new(self.run_blocking(request).await?);

        self.cache.insert(key, result.clone()).await;

        Ok(result)
    }

    /// Run one search on the blocking pool, bounded by the configured timeout.
    async fn run_blocking(&self, request: SearchRequest) -> Result<SearchResult, SearchError> {
        let cancel = Arc::new(AtomicBool::new(false));

        let task = {
            let network = self.network.clone();
            let config = self.config.clone();
            let cancel = cancel.clone();
            tokio::task::spawn_blocking(move || {
                Planner::new(&network, &config).search_with_cancel(&request, &cancel)
            })
        };

        match tokio::time::timeout(self.config.timeout(), task).await {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => Err(SearchError::Worker(e.to_string())),
            Err(_) => {
                // The worker stops at its next frontier pop.
                cancel.store(true, Ordering::Relaxed);
                warn!(
                    timeout_ms = self.config.timeout_ms,
                    "Route search timed out"
                );
                Err(SearchError::Timeout)
            }
        }
    }

    /// Get cache statistics.
    pub fn cache_entry_count(&self) -> u64 {
        self.cache.entry_count()
    }
}
