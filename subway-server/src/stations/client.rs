//! Station directory CSV client.

use std::collections::HashMap;
use std::time::Duration;

use tracing::{info, warn};

use crate::domain::Station;

use super::error::StationError;
use super::parse::{apply_routes, parse_route_mapping, parse_stations};

/// Station list with coordinates (NY Open Data).
const DEFAULT_STATIONS_URL: &str = "https://data.ny.gov/api/views/39hk-dx4f/rows.csv?accessType=DOWNLOAD";

/// Per-stop daytime routes.
const DEFAULT_ROUTES_URL: &str = "http://web.mta.info/developers/data/nyct/subway/Stations.csv";

/// Configuration for the directory client.
#[derive(Debug, Clone)]
pub struct StationClientConfig {
    /// Station list CSV
    pub stations_url: String,
    /// Route mapping CSV
    pub routes_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl StationClientConfig {
    pub fn new() -> Self {
        Self {
            stations_url: DEFAULT_STATIONS_URL.to_string(),
            routes_url: DEFAULT_ROUTES_URL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom station list URL (for testing).
    pub fn with_stations_url(mut self, url: impl Into<String>) -> Self {
        self.stations_url = url.into();
        self
    }

    /// Set a custom route mapping URL (for testing).
    pub fn with_routes_url(mut self, url: impl Into<String>) -> Self {
        self.routes_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for StationClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Downloads the station directory.
#[derive(Debug, Clone)]
pub struct StationClient {
    http: reqwest::Client,
    stations_url: String,
    routes_url: String,
}

impl StationClient {
    pub fn new(config: StationClientConfig) -> Result<Self, StationError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            stations_url: config.stations_url,
            routes_url: config.routes_url,
        })
    }

    async fn download(&self, url: &str, csv: &'static str) -> Result<Vec<u8>, StationError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(StationError::Status {
                csv,
                status: status.as_u16(),
            });
        }
        Ok(response.bytes().await?.to_vec())
    }

    /// Fetch the station list without routes.
    pub async fn fetch_stations(&self) -> Result<Vec<Station>, StationError> {
        let body = self.download(&self.stations_url, "stations").await?;
        parse_stations(body.as_slice())
    }

    /// Fetch the stop id → routes mapping.
    pub async fn fetch_route_mapping(&self) -> Result<HashMap<String, Vec<String>>, StationError> {
        let body = self.download(&self.routes_url, "routes").await?;
        parse_route_mapping(body.as_slice())
    }

    /// Fetch the full directory: stations plus their routes.
    ///
    /// A failed route mapping is not fatal; stations then carry no routes.
    pub async fn fetch_directory(&self) -> Result<Vec<Station>, StationError> {
        let mut stations = self.fetch_stations().await?;
        if stations.is_empty() {
            return Err(StationError::Empty);
        }

        match self.fetch_route_mapping().await {
            Ok(mapping) => {
                let matched = apply_routes(&mut stations, &mapping);
                info!(stops = mapping.len(), matched, "loaded route mapping");
            }
            Err(e) => {
                warn!(error = %e, "route mapping unavailable, stations will query all feeds");
            }
        }

        Ok(stations)
    }
}
