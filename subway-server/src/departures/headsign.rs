//! Destination label resolution.

use std::collections::{HashMap, HashSet};

use crate::domain::ServiceCalendar;
use crate::feeds::FeedRecord;
use crate::stations::StationSnapshot;
use crate::trips::TripIndex;

/// Resolved destination text for one departure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headsign {
    /// Static headsign, or the terminal stop's name when there is none.
    /// Empty when neither is known.
    pub label: String,
    /// Directory name of the trip's terminal stop, when it is listed.
    pub last_stop_name: Option<String>,
}

/// Terminal stop of each trip seen in a query's feed records.
#[derive(Debug, Clone, Default)]
pub struct TerminalStops {
    by_trip: HashMap<String, (u32, String)>,
}

impl TerminalStops {
    /// Scan `records` for the highest-sequence stop of each trip in `trips`.
    ///
    /// Ties keep the first record seen.
    pub fn from_records<'a, I>(records: I, trips: &HashSet<&str>) -> Self
    where
        I: IntoIterator<Item = &'a FeedRecord>,
    {
        let mut by_trip: HashMap<String, (u32, String)> = HashMap::new();
        for record in records {
            if !trips.contains(record.trip_id.as_str()) {
                continue;
            }
            match by_trip.get_mut(&record.trip_id) {
                Some(best) if record.sequence_number > best.0 => {
                    *best = (record.sequence_number, record.stop_id.clone());
                }
                Some(_) => {}
                None => {
                    by_trip.insert(
                        record.trip_id.clone(),
                        (record.sequence_number, record.stop_id.clone()),
                    );
                }
            }
        }
        Self { by_trip }
    }

    /// Stop id of the trip's last known stop.
    pub fn last_stop(&self, trip_id: &str) -> Option<&str> {
        self.by_trip.get(trip_id).map(|(_, stop)| stop.as_str())
    }
}

/// Resolves headsigns against one trip index and directory snapshot.
#[derive(Debug, Clone, Copy)]
pub struct HeadsignResolver<'a> {
    trips: &'a TripIndex,
    stations: &'a StationSnapshot,
    today: ServiceCalendar,
}

impl<'a> HeadsignResolver<'a> {
    pub fn new(trips: &'a TripIndex, stations: &'a StationSnapshot, today: ServiceCalendar) -> Self {
        Self {
            trips,
            stations,
            today,
        }
    }

    /// Resolve the headsign for a live trip.
    ///
    /// A static trip whose id contains `trip_id` supplies the label, preferring
    /// one on today's calendar. Failing that the terminal stop's directory
    /// name is used.
    pub fn resolve(&self, trip_id: &str, terminals: &TerminalStops) -> Headsign {
        let last_stop_name = terminals
            .last_stop(trip_id)
            .and_then(|stop| self.stations.name_for_stop(stop))
            .map(str::to_string);

        let label = self
            .trips
            .lookup(trip_id, self.today)
            .map(|trip| trip.destination_label.clone())
            .filter(|label| !label.is_empty())
            .or_else(|| last_stop_name.clone())
            .unwrap_or_default();

        Headsign {
            label,
            last_stop_name,
        }
    }
}
