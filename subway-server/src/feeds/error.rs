//! Feed client error types.

use super::FeedId;

/// Errors from fetching or decoding one feed.
///
/// These never fail a departures query; the feed just contributes nothing.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Feed endpoint answered with a non-success status
    #[error("feed {feed} returned status {status}")]
    Status { feed: FeedId, status: u16 },

    /// Body was not a valid feed message
    #[error("feed {feed} could not be decoded: {source}")]
    Decode {
        feed: FeedId,
        #[source]
        source: prost::DecodeError,
    },

    /// Per-feed deadline elapsed
    #[error("feed {0} timed out")]
    Timeout(FeedId),
}
