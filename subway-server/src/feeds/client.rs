//! HTTP client for the trip-update feeds.

use std::time::Duration;

use prost::Message;
use tracing::debug;

use super::error::FeedError;
use super::proto::FeedMessage;
use super::record::{FeedRecord, flatten};
use super::selector::FeedId;

/// Default base URL; each feed appends its suffix.
const DEFAULT_BASE_URL: &str = "https://api-endpoint.mta.info/Dataservice/mtagtfsfeeds/nyct%2Fgtfs";

/// Configuration for the feed client.
#[derive(Debug, Clone)]
pub struct FeedClientConfig {
    /// Base URL for feed endpoints
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl FeedClientConfig {
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

impl Default for FeedClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Fetches and decodes feed endpoints.
#[derive(Debug, Clone)]
pub struct FeedClient {
    http: reqwest::Client,
    base_url: String,
}

impl FeedClient {
    pub fn new(config: FeedClientConfig) -> Result<Self, FeedError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Full endpoint URL for a feed.
    pub fn url_for(&self, feed: FeedId) -> String {
        format!("{}{}", self.base_url, feed.suffix())
    }

    /// Fetch one feed and flatten it into records.
    pub async fn fetch(&self, feed: FeedId) -> Result<Vec<FeedRecord>, FeedError> {
        let url = self.url_for(feed);
        let response = self.http.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                FeedError::Timeout(feed)
            } else {
                FeedError::Http(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status {
                feed,
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let message =
            FeedMessage::decode(body.as_ref()).map_err(|source| FeedError::Decode { feed, source })?;

        let records = flatten(&message);
        debug!(
            feed = %feed,
            entities = message.entity.len(),
            records = records.len(),
            "decoded feed"
        );
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = FeedClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn url_appends_suffix() {
        let client =
            FeedClient::new(FeedClientConfig::new().with_base_url("http://localhost:9000/feeds"))
                .unwrap();
        assert_eq!(client.url_for(FeedId::Numbered), "http://localhost:9000/feeds");
        assert_eq!(
            client.url_for(FeedId::Ace),
            "http://localhost:9000/feeds-ace"
        );
    }
}
