//! Trip lookup table.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::ServiceCalendar;

/// One row of the static `trips.txt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripRecord {
    pub route_id: String,
    pub trip_id: String,
    /// Raw `service_id` as published.
    pub service_id: String,
    /// Calendar class named by `service_id`, if any.
    pub calendar: Option<ServiceCalendar>,
    /// Rider-facing headsign.
    pub destination_label: String,
}

impl TripRecord {
    pub fn new(
        route_id: impl Into<String>,
        trip_id: impl Into<String>,
        service_id: impl Into<String>,
        destination_label: impl Into<String>,
    ) -> Self {
        let service_id = service_id.into();
        Self {
            route_id: route_id.into(),
            trip_id: trip_id.into(),
            calendar: ServiceCalendar::classify(&service_id),
            service_id,
            destination_label: destination_label.into(),
        }
    }
}

/// Immutable table of static trips, in archive order.
#[derive(Debug, Clone, Default)]
pub struct TripIndex {
    records: Vec<TripRecord>,
}

impl TripIndex {
    pub fn new(records: Vec<TripRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Static trips whose id contains `feed_trip_id`.
    ///
    /// Live trip ids are a fragment of the static ids (`062350_6..N01R` vs
    /// `AFA23GEN-6046-Weekday-00_062350_6..N01R`), so this is a substring
    /// scan rather than a keyed lookup.
    pub fn matches<'a, 'b>(
        &'a self,
        feed_trip_id: &'b str,
    ) -> impl Iterator<Item = &'a TripRecord> + use<'a, 'b> {
        self.records
            .iter()
            .filter(move |r| !feed_trip_id.is_empty() && r.trip_id.contains(feed_trip_id))
    }

    /// Best static match for a live trip.
    ///
    /// Prefers a match running on `today`'s calendar; otherwise the first
    /// match in archive order.
    pub fn lookup(&self, feed_trip_id: &str, today: ServiceCalendar) -> Option<&TripRecord> {
        let mut first = None;
        for record in self.matches(feed_trip_id) {
            if record.calendar == Some(today) {
                return Some(record);
            }
            first.get_or_insert(record);
        }
        first
    }
}

/// Shared, swappable handle to the current [`TripIndex`].
#[derive(Debug, Clone, Default)]
pub struct TripTable {
    inner: Arc<RwLock<Arc<TripIndex>>>,
}

impl TripTable {
    pub fn new(index: TripIndex) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(index))),
        }
    }

    /// The table as of now. Later replacements do not affect the returned value.
    pub async fn current(&self) -> Arc<TripIndex> {
        self.inner.read().await.clone()
    }

    /// Swap in a freshly loaded table, returning its size.
    pub async fn replace(&self, index: TripIndex) -> usize {
        let count = index.len();
        *self.inner.write().await = Arc::new(index);
        count
    }
}
