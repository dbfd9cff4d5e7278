//! HTTP route handlers.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::Utc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::domain::{BoundingBox, Coordinate, Station};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/stops", get(list_stops))
        .route("/api/departures/nearest", get(departures_nearest))
        .route("/api/departures/by-name", get(departures_by_name))
        .route("/api/departures/by-id", get(departures_by_id))
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Every station in the directory.
async fn list_stops(State(state): State<AppState>) -> Json<Vec<StationResult>> {
    let started = Instant::now();
    let snapshot = state.stations.snapshot().await;
    let stations = snapshot.stations().iter().map(StationResult::from).collect();
    info!(elapsed_ms = elapsed_ms(started), "GET /api/stops");
    Json(stations)
}

/// Departures at the station nearest to a point, with a walking estimate.
async fn departures_nearest(
    State(state): State<AppState>,
    Query(req): Query<NearestRequest>,
) -> Result<Json<DeparturesResponse>, AppError> {
    let started = Instant::now();
    let from = parse_coordinate(&req)?;
    if !BoundingBox::NEW_YORK_CITY.contains(&from) {
        return Err(AppError::BadRequest {
            message: "location outside NYC area".to_string(),
        });
    }

    let snapshot = state.stations.snapshot().await;
    let (station, distance) = snapshot.nearest(&from).ok_or_else(|| AppError::Internal {
        message: "station directory is empty".to_string(),
    })?;
    info!(
        lat = from.lat,
        lon = from.lon,
        station = %station.stop_id,
        name = %station.name,
        distance_m = distance.round(),
        "nearest station"
    );

    let to = station.coordinate();
    let (departures, walking) = tokio::join!(
        state.engine.departures(station, &snapshot, Utc::now()),
        state.walking.route(&from, &to),
    );
    let walking = match walking {
        Ok(walk) => Some(walk.into()),
        Err(e) => {
            warn!(error = %e, "walking estimate unavailable");
            None
        }
    };

    let response = departures_response(station, walking, departures);
    info!(elapsed_ms = elapsed_ms(started), "GET /api/departures/nearest");
    Ok(Json(response))
}

/// Departures at the first station whose name contains the query.
async fn departures_by_name(
    State(state): State<AppState>,
    Query(req): Query<ByNameRequest>,
) -> Result<Json<DeparturesResponse>, AppError> {
    let started = Instant::now();
    let name = req.name.as_deref().unwrap_or_default().trim();
    if name.is_empty() {
        return Err(AppError::BadRequest {
            message: "missing name".to_string(),
        });
    }

    let snapshot = state.stations.snapshot().await;
    let mut matches = snapshot.search_by_name(name);
    let station = matches.next().ok_or_else(|| AppError::NotFound {
        message: "no station matched by name".to_string(),
    })?;
    info!(
        query = name,
        station = %station.stop_id,
        other_matches = matches.count(),
        "matched station by name"
    );

    let departures = state.engine.departures(station, &snapshot, Utc::now()).await;
    let response = departures_response(station, None, departures);
    info!(elapsed_ms = elapsed_ms(started), "GET /api/departures/by-name");
    Ok(Json(response))
}

/// Departures at the station with an exact stop id.
async fn departures_by_id(
    State(state): State<AppState>,
    Query(req): Query<ByIdRequest>,
) -> Result<Json<DeparturesResponse>, AppError> {
    let started = Instant::now();
    let id = req.id.as_deref().unwrap_or_default().trim();
    if id.is_empty() {
        return Err(AppError::BadRequest {
            message: "missing id".to_string(),
        });
    }

    let snapshot = state.stations.snapshot().await;
    let station = snapshot.by_id(id).ok_or_else(|| AppError::NotFound {
        message: format!("no station with id {id}"),
    })?;

    let departures = state.engine.departures(station, &snapshot, Utc::now()).await;
    let response = departures_response(station, None, departures);
    info!(elapsed_ms = elapsed_ms(started), "GET /api/departures/by-id");
    Ok(Json(response))
}

/// Both coordinates must be present and numeric.
fn parse_coordinate(req: &NearestRequest) -> Result<Coordinate, AppError> {
    let (Some(lat), Some(lon)) = (
        req.lat.as_deref().filter(|s| !s.is_empty()),
        req.lon.as_deref().filter(|s| !s.is_empty()),
    ) else {
        return Err(AppError::BadRequest {
            message: "missing lat or lon".to_string(),
        });
    };

    match (lat.trim().parse::<f64>(), lon.trim().parse::<f64>()) {
        (Ok(lat), Ok(lon)) if lat.is_finite() && lon.is_finite() => Ok(Coordinate::new(lat, lon)),
        _ => Err(AppError::BadRequest {
            message: "invalid lat or lon".to_string(),
        }),
    }
}

fn departures_response(
    station: &Station,
    walking: Option<WalkingResult>,
    departures: Vec<crate::domain::Departure>,
) -> DeparturesResponse {
    DeparturesResponse {
        station: StationResult::from(station),
        walking,
        departures: departures.into_iter().map(DepartureResult::from).collect(),
    }
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        warn!(status = status.as_u16(), %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
