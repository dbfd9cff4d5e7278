//! Route to feed selection.

use std::collections::BTreeSet;
use std::fmt;

use tracing::{info, warn};

use crate::domain::Station;

/// One upstream feed endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FeedId {
    /// Numbered lines and the Grand Central shuttle.
    Numbered,
    Ace,
    Bdfm,
    G,
    Jz,
    L,
    Nqrw,
    StatenIsland,
}

impl FeedId {
    /// Every known feed, in endpoint order.
    pub const ALL: [FeedId; 8] = [
        FeedId::Numbered,
        FeedId::Ace,
        FeedId::Bdfm,
        FeedId::G,
        FeedId::Jz,
        FeedId::L,
        FeedId::Nqrw,
        FeedId::StatenIsland,
    ];

    /// Suffix appended to the feed base URL.
    pub fn suffix(&self) -> &'static str {
        match self {
            FeedId::Numbered => "",
            FeedId::Ace => "-ace",
            FeedId::Bdfm => "-bdfm",
            FeedId::G => "-g",
            FeedId::Jz => "-jz",
            FeedId::L => "-l",
            FeedId::Nqrw => "-nqrw",
            FeedId::StatenIsland => "-si",
        }
    }

    /// Feed publishing a route, by exact route code.
    pub fn for_route(route: &str) -> Option<FeedId> {
        match route {
            "1" | "2" | "3" | "4" | "5" | "6" | "7" | "GS" => Some(FeedId::Numbered),
            // H is the Rockaway Park shuttle, FS the Franklin Avenue shuttle.
            "A" | "C" | "E" | "H" | "FS" => Some(FeedId::Ace),
            "B" | "D" | "F" | "M" => Some(FeedId::Bdfm),
            "G" => Some(FeedId::G),
            "J" | "Z" => Some(FeedId::Jz),
            "L" => Some(FeedId::L),
            "N" | "Q" | "R" | "W" => Some(FeedId::Nqrw),
            "SI" | "SIR" => Some(FeedId::StatenIsland),
            _ => None,
        }
    }
}

impl fmt::Display for FeedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FeedId::Numbered => "gtfs",
            FeedId::Ace => "gtfs-ace",
            FeedId::Bdfm => "gtfs-bdfm",
            FeedId::G => "gtfs-g",
            FeedId::Jz => "gtfs-jz",
            FeedId::L => "gtfs-l",
            FeedId::Nqrw => "gtfs-nqrw",
            FeedId::StatenIsland => "gtfs-si",
        };
        f.write_str(name)
    }
}

/// Feeds a single route code resolves to.
///
/// Express variants carry a trailing `X` and live in their base route's
/// feed. A bare `S` could be any shuttle, so it resolves to both feeds that
/// publish shuttles.
fn feeds_for_route(route: &str) -> Vec<FeedId> {
    if let Some(feed) = FeedId::for_route(route) {
        return vec![feed];
    }
    if route.len() > 1
        && let Some(base) = route.strip_suffix('X')
        && let Some(feed) = FeedId::for_route(base)
    {
        return vec![feed];
    }
    if route == "S" {
        return vec![FeedId::Numbered, FeedId::Ace];
    }
    Vec::new()
}

/// The minimal set of feeds that can contain departures for `station`.
///
/// Falls back to every feed when the station has no route list or none of
/// its routes is recognised.
pub fn select_feeds(station: &Station) -> Vec<FeedId> {
    if station.routes.is_empty() {
        info!(station = %station.name, "no route information, using all feeds");
        return FeedId::ALL.to_vec();
    }

    let mut feeds = BTreeSet::new();
    for route in &station.routes {
        let resolved = feeds_for_route(route);
        if resolved.is_empty() {
            warn!(station = %station.name, route = %route, "unknown route, skipping");
        }
        feeds.extend(resolved);
    }

    if feeds.is_empty() {
        info!(
            station = %station.name,
            routes = ?station.routes,
            "no feeds matched station routes, using all feeds"
        );
        return FeedId::ALL.to_vec();
    }

    feeds.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(routes: &[&str]) -> Station {
        Station::new("TEST", "Test Station", 40.75, -73.98).with_routes(routes.iter().copied())
    }

    #[test]
    fn single_route_single_feed() {
        assert_eq!(select_feeds(&station(&["L"])), vec![FeedId::L]);
    }

    #[test]
    fn shared_feed_deduplicated() {
        assert_eq!(select_feeds(&station(&["N", "W"])), vec![FeedId::Nqrw]);
        assert_eq!(select_feeds(&station(&["A", "C", "E"])), vec![FeedId::Ace]);
    }

    #[test]
    fn times_square_needs_two_feeds() {
        let feeds = select_feeds(&station(&["N", "Q", "R", "W", "1", "2", "3", "7"]));
        assert_eq!(feeds, vec![FeedId::Numbered, FeedId::Nqrw]);
    }

    #[test]
    fn empty_routes_use_all_feeds() {
        let feeds = select_feeds(&station(&[]));
        assert_eq!(feeds.len(), FeedId::ALL.len());
        assert_eq!(feeds, FeedId::ALL.to_vec());
    }

    #[test]
    fn shuttle_maps_to_two_feeds() {
        assert_eq!(
            select_feeds(&station(&["S"])),
            vec![FeedId::Numbered, FeedId::Ace]
        );
    }

    #[test]
    fn express_variant_uses_base_feed() {
        assert_eq!(select_feeds(&station(&["6", "6X"])), vec![FeedId::Numbered]);
        assert_eq!(select_feeds(&station(&["7X"])), vec![FeedId::Numbered]);
        assert_eq!(select_feeds(&station(&["FX"])), vec![FeedId::Bdfm]);
    }

    #[test]
    fn lone_x_is_unknown() {
        assert_eq!(select_feeds(&station(&["X"])), FeedId::ALL.to_vec());
    }

    #[test]
    fn unknown_routes_skipped_individually() {
        assert_eq!(select_feeds(&station(&["T", "G"])), vec![FeedId::G]);
    }

    #[test]
    fn all_unknown_routes_use_all_feeds() {
        assert_eq!(select_feeds(&station(&["T", "QQ"])), FeedId::ALL.to_vec());
    }

    #[test]
    fn every_known_route_has_a_feed() {
        let routes = [
            "1", "2", "3", "4", "5", "6", "7", "A", "B", "C", "D", "E", "F", "G", "J", "L", "M",
            "N", "Q", "R", "W", "Z", "GS", "FS", "H", "SI", "SIR",
        ];
        for route in routes {
            assert!(FeedId::for_route(route).is_some(), "route {route} has no feed");
        }
    }

    #[test]
    fn never_more_than_all_feeds() {
        let every: Vec<&str> = vec![
            "1", "A", "B", "G", "J", "L", "N", "SI", "S", "6X", "GS", "FS", "H",
        ];
        let feeds = select_feeds(&station(&every));
        assert_eq!(feeds.len(), FeedId::ALL.len());
    }

    #[test]
    fn display_names() {
        assert_eq!(FeedId::Numbered.to_string(), "gtfs");
        assert_eq!(FeedId::Nqrw.to_string(), "gtfs-nqrw");
        assert_eq!(FeedId::StatenIsland.suffix(), "-si");
    }
}
