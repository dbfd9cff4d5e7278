//! Station directory.
//!
//! Stations and their coordinates come from one CSV, the daytime routes
//! serving each stop from another. The directory is held as an immutable
//! snapshot that is swapped, never edited, when it is refreshed.

mod client;
mod directory;
mod error;
mod parse;

pub use client::{StationClient, StationClientConfig};
pub use directory::{StationDirectory, StationSnapshot};
pub use error::StationError;
pub use parse::{apply_routes, normalize_header, parse_route_mapping, parse_stations};
