//! Domain types for the subway departures service.
//!
//! These are plain values shared by the feed, directory and web layers.
//! Nothing in here performs I/O.

mod calendar;
mod departure;
mod geo;
mod station;
mod stop_id;

pub use calendar::ServiceCalendar;
pub use departure::{Departure, Direction};
pub use geo::{BoundingBox, Coordinate, haversine_m};
pub use station::Station;
pub use stop_id::{base_id, direction_of};
