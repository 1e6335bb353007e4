//! In-memory caching using moka
//!
//! Caches the settings snapshot and the destination/car type rows the
//! calculator reads on every request. Only rows that exist are cached, so a
//! newly added destination is visible on the next request.

use moka::future::Cache;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::{info, warn};

use crate::pricing::models::{AppSetting, CarTypeInfo, Destination};
use crate::pricing::store::PricingStore;

const SETTINGS_KEY: &str = "settings";

/// Application cache holding pricing inputs
#[derive(Clone)]
pub struct PricingCache {
    /// Settings table snapshot (singleton)
    pub settings: Cache<&'static str, Arc<Vec<AppSetting>>>,
    /// Destinations (id -> Destination)
    pub destinations: Cache<String, Arc<Destination>>,
    /// Car types (id -> CarTypeInfo)
    pub car_types: Cache<String, Arc<CarTypeInfo>>,
}

impl PricingCache {
    /// Create a new cache instance with the given TTLs
    pub fn new(settings_ttl: Duration, reference_ttl: Duration) -> Self {
        Self {
            settings: Cache::builder()
                .max_capacity(1)
                .time_to_live(settings_ttl)
                .build(),

            destinations: Cache::builder()
                .max_capacity(1_000)
                .time_to_live(reference_ttl)
                .build(),

            car_types: Cache::builder()
                .max_capacity(200)
                .time_to_live(reference_ttl)
                .build(),
        }
    }

    pub async fn get_settings(&self) -> Option<Arc<Vec<AppSetting>>> {
        self.settings.get(SETTINGS_KEY).await
    }

    pub async fn put_settings(&self, settings: Vec<AppSetting>) -> Arc<Vec<AppSetting>> {
        let settings = Arc::new(settings);
        self.settings.insert(SETTINGS_KEY, settings.clone()).await;
        settings
    }

    /// Get cache statistics for monitoring
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            settings_cached: self.settings.entry_count() > 0,
            destinations_size: self.destinations.entry_count(),
            car_types_size: self.car_types.entry_count(),
        }
    }
}

impl Default for PricingCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(60), Duration::from_secs(5 * 60))
    }
}

/// Cache statistics for the health endpoint
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub settings_cached: bool,
    pub destinations_size: u64,
    pub car_types_size: u64,
}

/// Start background cache warmer
///
/// Warms the cache on startup and refreshes every `period`.
pub async fn start_cache_warmer(
    cache: PricingCache,
    store: Arc<dyn PricingStore>,
    period: Duration,
) {
    let mut interval = interval(period);
    loop {
        // First tick completes immediately
        interval.tick().await;
        warm_cache(&cache, store.as_ref()).await;
    }
}

/// Load settings and all reference rows into the cache
pub async fn warm_cache(cache: &PricingCache, store: &dyn PricingStore) {
    info!("Starting cache warm-up...");

    match store.app_settings().await {
        Ok(settings) => {
            cache.put_settings(settings).await;
        }
        Err(e) => warn!("Failed to warm settings cache: {}", e),
    }

    match store.destinations().await {
        Ok(destinations) => {
            for destination in destinations {
                cache
                    .destinations
                    .insert(destination.id.clone(), Arc::new(destination))
                    .await;
            }
        }
        Err(e) => warn!("Failed to warm destinations cache: {}", e),
    }

    match store.car_types().await {
        Ok(car_types) => {
            for car_type in car_types {
                cache
                    .car_types
                    .insert(car_type.id.clone(), Arc::new(car_type))
                    .await;
            }
        }
        Err(e) => warn!("Failed to warm car types cache: {}", e),
    }

    cache.settings.run_pending_tasks().await;
    cache.destinations.run_pending_tasks().await;
    cache.car_types.run_pending_tasks().await;

    info!("Cache warm-up complete. Stats: {:?}", cache.stats());
}
