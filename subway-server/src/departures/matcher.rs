//! Station to feed stop matching.

use crate::domain::base_id;

/// Whether a feed stop id refers to the station `station_stop`.
///
/// Feed ids carry a platform suffix (`635N`) the directory id usually lacks
/// (`635`). An exact match always wins; otherwise the ids match when their
/// base forms agree, including when both bases are empty.
pub fn stop_matches(station_stop: &str, feed_stop: &str) -> bool {
    station_stop == feed_stop || base_id(station_stop) == base_id(feed_stop)
}
