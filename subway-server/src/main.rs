use std::net::SocketAddr;
use std::time::Duration;

use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use subway_server::cache::{CachedFeedClient, CachedWalkingClient};
use subway_server::config::AppConfig;
use subway_server::departures::DepartureEngine;
use subway_server::feeds::FeedClient;
use subway_server::stations::{StationClient, StationDirectory};
use subway_server::trips::{TripLoader, TripTable};
use subway_server::walking::WalkingClient;
use subway_server::web::{AppState, create_router};

/// How often to reload the static timetable (24 hours).
const TRIP_REFRESH_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "subway_server=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    // Directory and timetable are both required; fail fast if unavailable
    info!("fetching station directory...");
    let station_client = StationClient::new(config.stations.clone())?;
    let stations = StationDirectory::bootstrap(station_client, &config.cache.stations).await?;

    info!(source = ?config.archive, "loading static timetable...");
    let loader = TripLoader::new(
        config.archive.clone(),
        Duration::from_secs(config.archive_timeout_secs),
    )?;
    let trips = TripTable::new(loader.load().await?);

    // Reload the timetable daily, keeping the old one on failure
    let trips_refresh = trips.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(TRIP_REFRESH_INTERVAL);
        interval.tick().await; // First tick is immediate, skip it
        loop {
            interval.tick().await;
            match loader.load().await {
                Ok(index) => {
                    let count = trips_refresh.replace(index).await;
                    info!(trips = count, "refreshed static timetable");
                }
                Err(e) => warn!(error = %e, "failed to refresh static timetable, keeping previous"),
            }
        }
    });

    let feeds = CachedFeedClient::new(FeedClient::new(config.feeds.clone())?, &config.cache.feeds);
    let engine = DepartureEngine::new(feeds, trips, config.engine.clone());
    let walking = CachedWalkingClient::new(
        WalkingClient::new(config.walking.clone())?,
        &config.cache.walking,
    );

    let state = AppState::new(engine, walking, stations);
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(%addr, "subway departures server listening");
    info!("  GET /api/stops");
    info!("  GET /api/departures/nearest?lat=&lon=");
    info!("  GET /api/departures/by-name?name=");
    info!("  GET /api/departures/by-id?id=");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "server error");
        return Err(e.into());
    }
    Ok(())
}
