//! OSRM-style foot routing client.

use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::domain::Coordinate;

use super::error::WalkingError;

/// Public OSRM demo server.
const DEFAULT_BASE_URL: &str = "https://router.project-osrm.org";

/// Walking time and distance between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkResult {
    pub seconds: f64,
    pub meters: f64,
}

#[derive(Debug, Deserialize)]
struct RouteResponse {
    #[serde(default)]
    routes: Vec<RouteDto>,
}

#[derive(Debug, Deserialize)]
struct RouteDto {
    duration: f64,
    distance: f64,
}

/// Configuration for the walking client.
#[derive(Debug, Clone)]
pub struct WalkingConfig {
    /// Router base URL
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl WalkingConfig {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for WalkingConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the walking router.
#[derive(Debug, Clone)]
pub struct WalkingClient {
    http: reqwest::Client,
    base_url: String,
}

impl WalkingClient {
    pub fn new(config: WalkingConfig) -> Result<Self, WalkingError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Route URL; the router takes `lon,lat` pairs.
    pub fn url_for(&self, from: &Coordinate, to: &Coordinate) -> String {
        format!(
            "{}/route/v1/foot/{:.6},{:.6};{:.6},{:.6}?overview=false",
            self.base_url, from.lon, from.lat, to.lon, to.lat
        )
    }

    /// Walking estimate along the router's first route.
    pub async fn route(&self, from: &Coordinate, to: &Coordinate) -> Result<WalkResult, WalkingError> {
        let url = self.url_for(from, to);
        let response = self.http.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WalkingError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: RouteResponse = response.json().await?;
        let route = body.routes.first().ok_or(WalkingError::NoRoute)?;
        debug!(seconds = route.duration, meters = route.distance, "walking route");

        Ok(WalkResult {
            seconds: route.duration,
            meters: route.distance,
        })
    }
}
