//! Departure aggregation for a single station.
//!
//! Feed records are matched to the station, turned into departures, sorted,
//! capped per route and direction, and finally given a destination label.

mod engine;
mod extract;
mod headsign;
mod limit;
mod matcher;

pub use engine::{DepartureEngine, EngineConfig, FeedSource};
pub use extract::extract_departure;
pub use headsign::{Headsign, HeadsignResolver, TerminalStops};
pub use limit::{MAX_PER_ROUTE_DIRECTION, limit_per_route_direction};
pub use matcher::stop_matches;
