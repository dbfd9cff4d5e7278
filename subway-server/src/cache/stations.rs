//! Station list cache.

use std::sync::Arc;

use moka::future::Cache as MokaCache;
use tokio::sync::RwLock;

use crate::stations::StationSnapshot;

use super::CachePolicy;

/// Result of reading the station list cache.
#[derive(Debug, Clone)]
pub enum CachedSnapshot {
    /// Within its TTL.
    Fresh(Arc<StationSnapshot>),
    /// Expired or evicted; the last stored snapshot, due for refresh.
    Stale(Arc<StationSnapshot>),
}

impl CachedSnapshot {
    pub fn into_inner(self) -> Arc<StationSnapshot> {
        match self {
            CachedSnapshot::Fresh(s) | CachedSnapshot::Stale(s) => s,
        }
    }
}

/// Single-entry cache for the directory snapshot.
///
/// The last stored snapshot outlives its cache entry so readers are never
/// left without a directory.
pub struct StationListCache {
    entry: MokaCache<(), Arc<StationSnapshot>>,
    last_good: RwLock<Arc<StationSnapshot>>,
}

impl StationListCache {
    pub async fn new(policy: &CachePolicy, initial: StationSnapshot) -> Self {
        let initial = Arc::new(initial);
        let entry: MokaCache<(), Arc<StationSnapshot>> = policy.build();
        entry.insert((), initial.clone()).await;
        Self {
            entry,
            last_good: RwLock::new(initial),
        }
    }

    pub async fn get(&self) -> CachedSnapshot {
        match self.entry.get(&()).await {
            Some(snapshot) => CachedSnapshot::Fresh(snapshot),
            None => CachedSnapshot::Stale(self.last_good().await),
        }
    }

    /// Replace the snapshot. Readers holding the previous one keep it.
    pub async fn store(&self, snapshot: StationSnapshot) {
        let snapshot = Arc::new(snapshot);
        *self.last_good.write().await = snapshot.clone();
        self.entry.insert((), snapshot).await;
    }

    /// Restart the TTL on the last stored snapshot without replacing it.
    pub async fn renew(&self) {
        let snapshot = self.last_good().await;
        self.entry.insert((), snapshot).await;
    }

    pub async fn last_good(&self) -> Arc<StationSnapshot> {
        self.last_good.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::domain::Station;

    fn snapshot(ids: &[&str]) -> StationSnapshot {
        StationSnapshot::new(
            ids.iter()
                .map(|id| Station::new(*id, format!("Station {id}"), 40.7, -73.9))
                .collect(),
        )
    }

    #[tokio::test]
    async fn fresh_until_ttl_then_stale() {
        let cache = StationListCache::new(&CachePolicy::new(Duration::from_millis(20), 1), snapshot(&["101"])).await;
        assert!(matches!(cache.get().await, CachedSnapshot::Fresh(_)));

        tokio::time::sleep(Duration::from_millis(60)).await;
        match cache.get().await {
            CachedSnapshot::Stale(s) => assert_eq!(s.len(), 1),
            CachedSnapshot::Fresh(_) => panic!("entry should have expired"),
        }
    }

    #[tokio::test]
    async fn store_swaps_without_touching_readers() {
        let cache = StationListCache::new(&CachePolicy::new(Duration::from_secs(60), 1), snapshot(&["101"])).await;
        let held = cache.get().await.into_inner();

        cache.store(snapshot(&["101", "103"])).await;
        assert_eq!(held.len(), 1);
        assert_eq!(cache.get().await.into_inner().len(), 2);
        assert_eq!(cache.last_good().await.len(), 2);
    }

    #[tokio::test]
    async fn renew_makes_expired_entry_fresh() {
        let cache = StationListCache::new(&CachePolicy::new(Duration::from_millis(20), 1), snapshot(&["101"])).await;
        tokio::time::sleep(Duration::from_millis(60)).await;
        assert!(matches!(cache.get().await, CachedSnapshot::Stale(_)));

        cache.renew().await;
        match cache.get().await {
            CachedSnapshot::Fresh(s) => assert_eq!(s.len(), 1),
            CachedSnapshot::Stale(_) => panic!("renewed entry should be fresh"),
        }
    }
}
