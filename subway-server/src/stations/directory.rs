//! Station directory snapshots.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{info, warn};

use crate::cache::{CachePolicy, CachedSnapshot, StationListCache};
use crate::domain::{Coordinate, Station, base_id};

use super::client::StationClient;
use super::error::StationError;

/// Immutable view of the directory at one point in time.
#[derive(Debug, Clone, Default)]
pub struct StationSnapshot {
    stations: Vec<Station>,
    by_id: HashMap<String, usize>,
}

impl StationSnapshot {
    /// Index `stations`. Later duplicates of a stop id are listed but not
    /// reachable by id.
    pub fn new(stations: Vec<Station>) -> Self {
        let mut by_id = HashMap::with_capacity(stations.len());
        for (i, station) in stations.iter().enumerate() {
            by_id.entry(station.stop_id.clone()).or_insert(i);
        }
        Self { stations, by_id }
    }

    /// All stations in directory order.
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn by_id(&self, stop_id: &str) -> Option<&Station> {
        self.by_id.get(stop_id).map(|&i| &self.stations[i])
    }

    /// Closest station to `coord` and its great-circle distance in metres.
    pub fn nearest(&self, coord: &Coordinate) -> Option<(&Station, f64)> {
        self.stations
            .iter()
            .map(|s| (s, coord.distance_m(&s.coordinate())))
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// Stations whose name contains `query`, ignoring case and surrounding
    /// whitespace, in directory order. A blank query matches nothing.
    pub fn search_by_name<'a>(&'a self, query: &str) -> impl Iterator<Item = &'a Station> + 'a {
        let needle = query.trim().to_lowercase();
        self.stations
            .iter()
            .filter(move |s| !needle.is_empty() && s.name.to_lowercase().contains(&needle))
    }

    /// Directory name for a feed stop id, trying the exact id first and
    /// then its base form.
    pub fn name_for_stop(&self, stop_id: &str) -> Option<&str> {
        self.by_id(stop_id)
            .or_else(|| self.by_id(base_id(stop_id)))
            .map(|s| s.name.as_str())
    }
}

/// The live directory: a cached snapshot that refreshes itself in the
/// background once its entry expires.
pub struct StationDirectory {
    client: Option<StationClient>,
    cache: StationListCache,
    refreshing: AtomicBool,
}

impl StationDirectory {
    /// Load the directory, failing if it cannot be fetched.
    pub async fn bootstrap(client: StationClient, policy: &CachePolicy) -> Result<Arc<Self>, StationError> {
        let stations = client.fetch_directory().await?;
        info!(stations = stations.len(), "loaded station directory");

        Ok(Arc::new(Self {
            client: Some(client),
            cache: StationListCache::new(policy, StationSnapshot::new(stations)).await,
            refreshing: AtomicBool::new(false),
        }))
    }

    /// A fixed directory that never refreshes.
    pub async fn from_stations(stations: Vec<Station>, policy: &CachePolicy) -> Arc<Self> {
        Arc::new(Self {
            client: None,
            cache: StationListCache::new(policy, StationSnapshot::new(stations)).await,
            refreshing: AtomicBool::new(false),
        })
    }

    /// Current snapshot.
    ///
    /// Never waits on the network: an expired snapshot is still returned
    /// while a single background refresh replaces it.
    pub async fn snapshot(self: &Arc<Self>) -> Arc<StationSnapshot> {
        match self.cache.get().await {
            CachedSnapshot::Fresh(snapshot) => snapshot,
            CachedSnapshot::Stale(snapshot) => {
                self.spawn_refresh();
                snapshot
            }
        }
    }

    fn spawn_refresh(self: &Arc<Self>) {
        if self.client.is_none() || self.refreshing.swap(true, Ordering::AcqRel) {
            return;
        }

        let directory = Arc::clone(self);
        tokio::spawn(async move {
            if let Err(e) = directory.refresh().await {
                warn!(error = %e, "station directory refresh failed, keeping previous snapshot");
            }
            directory.refreshing.store(false, Ordering::Release);
        });
    }

    /// Fetch and install a new snapshot, returning its size. On failure the
    /// current snapshot stays in place for another TTL before the next try.
    pub async fn refresh(&self) -> Result<usize, StationError> {
        let Some(client) = &self.client else {
            return Ok(self.cache.last_good().await.len());
        };

        let stations = match client.fetch_directory().await {
            Ok(stations) => stations,
            Err(e) => {
                self.cache.renew().await;
                return Err(e);
            }
        };
        let count = stations.len();
        self.cache.store(StationSnapshot::new(stations)).await;
        info!(stations = count, "refreshed station directory");
        Ok(count)
    }
}
