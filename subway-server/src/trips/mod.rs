//! Static timetable trip lookup.
//!
//! Loads `trips.txt` out of the static timetable archive into a
//! [`TripIndex`], held behind a [`TripTable`] so refreshes swap the whole
//! table while in-flight queries keep the one they started with.

mod error;
mod index;
mod loader;

pub use error::TripIndexError;
pub use index::{TripIndex, TripRecord, TripTable};
pub use loader::{ArchiveSource, TripLoader, parse_archive, parse_trips};
