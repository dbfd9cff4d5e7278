//! Environment configuration.

use std::str::FromStr;
use std::time::Duration;

use crate::cache::CacheConfig;
use crate::departures::EngineConfig;
use crate::feeds::FeedClientConfig;
use crate::stations::StationClientConfig;
use crate::trips::ArchiveSource;
use crate::walking::WalkingConfig;

/// Static timetable archive.
const DEFAULT_GTFS_STATIC: &str = "http://web.mta.info/developers/data/nyct/subway/google_transit.zip";

/// Invalid configuration value.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub stations: StationClientConfig,
    pub archive: ArchiveSource,
    /// Timeout for the archive download, in seconds.
    pub archive_timeout_secs: u64,
    pub feeds: FeedClientConfig,
    pub walking: WalkingConfig,
    pub engine: EngineConfig,
    pub cache: CacheConfig,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`; unset or empty variables take
    /// their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let http_timeout = parse_or(&get, "HTTP_TIMEOUT_SECS", 30)?;

        let mut stations = StationClientConfig::new().with_timeout(http_timeout);
        if let Some(url) = get("STATIONS_CSV") {
            stations = stations.with_stations_url(url);
        }
        if let Some(url) = get("ROUTES_CSV") {
            stations = stations.with_routes_url(url);
        }

        let archive = ArchiveSource::parse(
            get("GTFS_STATIC")
                .as_deref()
                .unwrap_or(DEFAULT_GTFS_STATIC),
        );

        let mut feeds = FeedClientConfig::new().with_timeout(parse_or(&get, "FEED_TIMEOUT_SECS", 10)?);
        if let Some(url) = get("FEED_BASE_URL") {
            feeds = feeds.with_base_url(url);
        }

        let mut walking = WalkingConfig::new();
        if let Some(url) = get("WALKING_BASE_URL") {
            walking = walking.with_base_url(url);
        }

        let engine = EngineConfig::new()
            .with_query_timeout(Duration::from_secs(parse_or(&get, "QUERY_TIMEOUT_SECS", 15)?))
            .with_timezone(parse_or(&get, "TIMEZONE", chrono_tz::America::New_York)?);

        Ok(Self {
            port: parse_or(&get, "PORT", 8080)?,
            stations,
            archive,
            archive_timeout_secs: http_timeout,
            feeds,
            walking,
            engine,
            cache: CacheConfig::default(),
        })
    }
}

fn parse_or<T, G>(get: &G, var: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(var) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value }),
    }
}
