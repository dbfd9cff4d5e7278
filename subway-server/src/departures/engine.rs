//! Per-station departure aggregation.

use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Datelike, Utc};
use chrono_tz::Tz;
use futures::stream::{FuturesUnordered, StreamExt};
use tokio::time::{Instant, timeout_at};
use tracing::{debug, info, warn};

use crate::domain::{Departure, ServiceCalendar, Station};
use crate::feeds::{FeedError, FeedId, FeedRecord, select_feeds};
use crate::stations::StationSnapshot;
use crate::trips::TripTable;

use super::extract::extract_departure;
use super::headsign::{HeadsignResolver, TerminalStops};
use super::limit::{MAX_PER_ROUTE_DIRECTION, limit_per_route_direction};
use super::matcher::stop_matches;

/// Source of decoded feed records.
///
/// Implemented by the cached feed client; tests substitute canned feeds.
pub trait FeedSource: Send + Sync {
    fn fetch(
        &self,
        feed: FeedId,
    ) -> impl Future<Output = Result<Arc<Vec<FeedRecord>>, FeedError>> + Send;
}

/// Engine settings.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Upper bound on the whole feed fan-out for one query.
    pub query_timeout: Duration,
    /// Zone whose local day picks the service calendar.
    pub timezone: Tz,
}

impl EngineConfig {
    pub fn new() -> Self {
        Self {
            query_timeout: Duration::from_secs(15),
            timezone: chrono_tz::America::New_York,
        }
    }

    pub fn with_query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = timeout;
        self
    }

    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Computes the departure list for a station.
pub struct DepartureEngine<S> {
    source: S,
    trips: TripTable,
    config: EngineConfig,
}

impl<S: FeedSource> DepartureEngine<S> {
    pub fn new(source: S, trips: TripTable, config: EngineConfig) -> Self {
        Self {
            source,
            trips,
            config,
        }
    }

    /// Upcoming departures at `station`, soonest first.
    ///
    /// Feeds that fail or miss the query deadline contribute nothing; the
    /// rest are still used. At most two departures are kept per route and
    /// direction.
    pub async fn departures(
        &self,
        station: &Station,
        stations: &StationSnapshot,
        now: DateTime<Utc>,
    ) -> Vec<Departure> {
        let feeds = select_feeds(station);
        info!(
            station = %station.stop_id,
            name = %station.name,
            routes = ?station.routes,
            feeds = feeds.len(),
            "fetching departures"
        );

        let batches = self.fetch_all(&feeds).await;
        let records = || batches.iter().flat_map(|batch| batch.iter());

        let now_secs = now.timestamp();
        let mut departures: Vec<Departure> = records()
            .filter(|record| stop_matches(&station.stop_id, &record.stop_id))
            .filter_map(|record| extract_departure(record, now_secs))
            .collect();
        departures.sort_by_key(|d| d.epoch_time);
        let mut departures = limit_per_route_direction(departures, MAX_PER_ROUTE_DIRECTION);

        let terminals = {
            let wanted: HashSet<&str> = departures
                .iter()
                .map(|d| d.trip_id.as_str())
                .filter(|id| !id.is_empty())
                .collect();
            TerminalStops::from_records(records(), &wanted)
        };

        let trips = self.trips.current().await;
        let today = ServiceCalendar::for_weekday(now.with_timezone(&self.config.timezone).weekday());
        let resolver = HeadsignResolver::new(&trips, stations, today);
        for departure in &mut departures {
            let headsign = resolver.resolve(&departure.trip_id, &terminals);
            departure.destination_label = headsign.label;
            departure.last_stop_name = headsign.last_stop_name;
        }

        debug!(
            station = %station.stop_id,
            departures = departures.len(),
            calendar = today.as_str(),
            "departures resolved"
        );
        departures
    }

    /// Fetch every feed concurrently, keeping whatever finishes before the
    /// query deadline. Batches come back in feed order.
    async fn fetch_all(&self, feeds: &[FeedId]) -> Vec<Arc<Vec<FeedRecord>>> {
        let deadline = Instant::now() + self.config.query_timeout;
        let mut pending: FuturesUnordered<_> = feeds
            .iter()
            .map(|&feed| async move { (feed, self.source.fetch(feed).await) })
            .collect();

        let mut batches = Vec::with_capacity(feeds.len());
        loop {
            match timeout_at(deadline, pending.next()).await {
                Ok(Some((feed, Ok(records)))) => batches.push((feed, records)),
                Ok(Some((feed, Err(e)))) => {
                    warn!(feed = %feed, error = %e, "feed fetch failed, skipping");
                }
                Ok(None) => break,
                Err(_) => {
                    warn!(
                        outstanding = pending.len(),
                        "query deadline reached, using partial feed results"
                    );
                    break;
                }
            }
        }

        batches.sort_by_key(|(feed, _)| *feed);
        batches.into_iter().map(|(_, records)| records).collect()
    }
}
