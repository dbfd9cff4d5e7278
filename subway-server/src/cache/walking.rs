//! Walking estimate cache.

use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::domain::Coordinate;
use crate::walking::{WalkResult, WalkingClient, WalkingError};

use super::CachePolicy;

/// Origin coordinates are rounded to 1/`QUANTIZE_SCALE` of a degree
/// (four decimals, roughly 11 m of latitude).
pub const QUANTIZE_SCALE: f64 = 10_000.0;

/// Cache key for a walking estimate.
///
/// The origin is a rider's position and jitters between requests, so it is
/// quantised. The destination is a station and kept exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WalkKey {
    from_lat: i64,
    from_lon: i64,
    to_lat: u64,
    to_lon: u64,
}

impl WalkKey {
    pub fn new(from: &Coordinate, to: &Coordinate) -> Self {
        Self {
            from_lat: quantize(from.lat),
            from_lon: quantize(from.lon),
            to_lat: to.lat.to_bits(),
            to_lon: to.lon.to_bits(),
        }
    }
}

fn quantize(degrees: f64) -> i64 {
    (degrees * QUANTIZE_SCALE).round() as i64
}

/// Walking estimates by [`WalkKey`].
pub struct WalkingCache {
    entries: MokaCache<WalkKey, WalkResult>,
}

impl WalkingCache {
    pub fn new(policy: &CachePolicy) -> Self {
        Self {
            entries: policy.build(),
        }
    }

    pub async fn get(&self, key: &WalkKey) -> Option<WalkResult> {
        self.entries.get(key).await
    }

    pub async fn insert(&self, key: WalkKey, result: WalkResult) {
        self.entries.insert(key, result).await;
    }
}

/// Walking client with caching.
pub struct CachedWalkingClient {
    client: WalkingClient,
    cache: WalkingCache,
}

impl CachedWalkingClient {
    pub fn new(client: WalkingClient, policy: &CachePolicy) -> Self {
        Self {
            client,
            cache: WalkingCache::new(policy),
        }
    }

    /// Walking estimate from a rider to a station, using cache if available.
    pub async fn route(&self, from: &Coordinate, to: &Coordinate) -> Result<WalkResult, WalkingError> {
        let key = WalkKey::new(from, to);
        if let Some(cached) = self.cache.get(&key).await {
            debug!(?key, "walking cache hit");
            return Ok(cached);
        }

        let result = self.client.route(from, to).await?;
        self.cache.insert(key, result).await;
        Ok(result)
    }
}
