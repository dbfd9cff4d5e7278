//! Feed record to departure conversion.

use crate::domain::{Departure, direction_of};
use crate::feeds::FeedRecord;

/// Build a departure from a matched record, or `None` if it has no usable
/// time or the time is already past.
///
/// The departure time is preferred over the arrival time; zero counts as
/// absent for both. Headsign fields are left empty.
pub fn extract_departure(record: &FeedRecord, now: i64) -> Option<Departure> {
    let time = record
        .departure_time
        .filter(|&t| t != 0)
        .or(record.arrival_time.filter(|&t| t != 0))?;

    if time < now {
        return None;
    }

    Some(Departure {
        route_id: record.route_id.clone(),
        stop_id: record.stop_id.clone(),
        direction: direction_of(&record.stop_id),
        epoch_time: time,
        eta_seconds: time - now,
        trip_id: record.trip_id.clone(),
        destination_label: String::new(),
        last_stop_name: None,
    })
}
