//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Departure, Station};
use crate::walking::WalkResult;

/// Query for the nearest station. Values stay as text so bad input can be
/// told apart from missing input.
#[derive(Debug, Default, Deserialize)]
pub struct NearestRequest {
    pub lat: Option<String>,
    pub lon: Option<String>,
}

/// Query for a station by name.
#[derive(Debug, Default, Deserialize)]
pub struct ByNameRequest {
    /// Case-insensitive substring of the station name
    pub name: Option<String>,
}

/// Query for a station by stop id.
#[derive(Debug, Default, Deserialize)]
pub struct ByIdRequest {
    pub id: Option<String>,
}

/// A station in responses.
#[derive(Debug, Serialize)]
pub struct StationResult {
    pub gtfs_stop_id: String,
    pub stop_name: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub routes: Vec<String>,
}

impl From<&Station> for StationResult {
    fn from(station: &Station) -> Self {
        Self {
            gtfs_stop_id: station.stop_id.clone(),
            stop_name: station.name.clone(),
            lat: station.lat,
            lon: station.lon,
            routes: station.routes.clone(),
        }
    }
}

/// One upcoming departure.
#[derive(Debug, Serialize)]
pub struct DepartureResult {
    pub route_id: String,
    pub stop_id: String,
    /// `N`, `S`, `E`, `W` or empty
    pub direction: String,
    /// Unix seconds
    pub unix_time: i64,
    pub eta_seconds: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub trip_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub headsign: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_stop_name: Option<String>,
}

impl From<Departure> for DepartureResult {
    fn from(d: Departure) -> Self {
        Self {
            route_id: d.route_id,
            stop_id: d.stop_id,
            direction: d.direction.as_str().to_string(),
            unix_time: d.epoch_time,
            eta_seconds: d.eta_seconds,
            trip_id: d.trip_id,
            headsign: d.destination_label,
            last_stop_name: d.last_stop_name,
        }
    }
}

/// Walking estimate to the station.
#[derive(Debug, Serialize)]
pub struct WalkingResult {
    pub seconds: f64,
    pub meters: f64,
}

impl From<WalkResult> for WalkingResult {
    fn from(w: WalkResult) -> Self {
        Self {
            seconds: w.seconds,
            meters: w.meters,
        }
    }
}

/// A station with its departures.
#[derive(Debug, Serialize)]
pub struct DeparturesResponse {
    pub station: StationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub walking: Option<WalkingResult>,
    pub departures: Vec<DepartureResult>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
