//! Per route and direction cap.

use std::collections::HashMap;

use crate::domain::Departure;

/// Departures kept for each (route, direction) pair.
pub const MAX_PER_ROUTE_DIRECTION: usize = 2;

/// Keep at most `max` departures per (route, direction), in input order.
///
/// Expects `departures` sorted by time; the first `max` of each group are
/// the soonest.
pub fn limit_per_route_direction(departures: Vec<Departure>, max: usize) -> Vec<Departure> {
    let mut counts: HashMap<(String, _), usize> = HashMap::new();
    departures
        .into_iter()
        .filter(|d| {
            let count = counts
                .entry((d.route_id.clone(), d.direction))
                .or_insert(0);
            if *count < max {
                *count += 1;
                true
            } else {
                false
            }
        })
        .collect()
}
