//! Flattened trip-update records.

use super::proto::FeedMessage;

/// One (trip, stop) pair from a decoded feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedRecord {
    pub route_id: String,
    pub trip_id: String,
    pub stop_id: String,
    /// Unix seconds, if the producer supplied an arrival time.
    pub arrival_time: Option<i64>,
    /// Unix seconds, if the producer supplied a departure time.
    pub departure_time: Option<i64>,
    /// Position of the stop within its trip; higher is later.
    pub sequence_number: u32,
}

/// Flatten every trip update in `message` into records.
///
/// Entities without a trip update, and stop updates without a stop id,
/// are dropped. When the producer omits `stop_sequence` (the subway feeds
/// usually do) the update's position within its trip is used instead.
pub fn flatten(message: &FeedMessage) -> Vec<FeedRecord> {
    let mut records = Vec::new();

    for entity in &message.entity {
        if entity.is_deleted == Some(true) {
            continue;
        }
        let Some(trip_update) = &entity.trip_update else {
            continue;
        };

        let (route_id, trip_id) = trip_update
            .trip
            .as_ref()
            .map(|trip| {
                (
                    trip.route_id.clone().unwrap_or_default(),
                    trip.trip_id.clone().unwrap_or_default(),
                )
            })
            .unwrap_or_default();

        for (position, update) in trip_update.stop_time_update.iter().enumerate() {
            let Some(stop_id) = update.stop_id.as_ref().filter(|id| !id.is_empty()) else {
                continue;
            };

            records.push(FeedRecord {
                route_id: route_id.clone(),
                trip_id: trip_id.clone(),
                stop_id: stop_id.clone(),
                arrival_time: update.arrival.as_ref().and_then(|e| e.time),
                departure_time: update.departure.as_ref().and_then(|e| e.time),
                sequence_number: update
                    .stop_sequence
                    .unwrap_or_else(|| u32::try_from(position).unwrap_or(u32::MAX)),
            });
        }
    }

    records
}
