//! Response caches.
//!
//! Three independent moka caches sit in front of the upstreams: decoded
//! feeds (short TTL), walking estimates (long TTL, keyed on a quantised
//! origin) and the station directory snapshot (a day, refreshed in the
//! background). Each is internally synchronised and bounded by both TTL and
//! capacity. Concurrent misses on the same key each go upstream.

mod feeds;
mod stations;
mod walking;

use std::time::Duration;

pub use feeds::{CachedFeedClient, FeedCache};
pub use stations::{CachedSnapshot, StationListCache};
pub use walking::{CachedWalkingClient, QUANTIZE_SCALE, WalkKey, WalkingCache};

/// TTL and size bound for one cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    /// How long an entry stays valid after insertion.
    pub ttl: Duration,
    /// Maximum number of entries; least recently used go first.
    pub max_capacity: u64,
}

impl CachePolicy {
    pub fn new(ttl: Duration, max_capacity: u64) -> Self {
        Self { ttl, max_capacity }
    }

    fn build<K, V>(&self) -> moka::future::Cache<K, V>
    where
        K: std::hash::Hash + Eq + Send + Sync + 'static,
        V: Clone + Send + Sync + 'static,
    {
        moka::future::Cache::builder()
            .time_to_live(self.ttl)
            .max_capacity(self.max_capacity)
            .build()
    }
}

/// Configuration for all three caches.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub feeds: CachePolicy,
    pub walking: CachePolicy,
    pub stations: CachePolicy,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            feeds: CachePolicy::new(Duration::from_secs(30), 64),
            walking: CachePolicy::new(Duration::from_secs(24 * 60 * 60), 10_000),
            stations: CachePolicy::new(Duration::from_secs(24 * 60 * 60), 1),
        }
    }
}
