//! Walking router error types.

/// Errors from the pedestrian routing service.
#[derive(Debug, thiserror::Error)]
pub enum WalkingError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Router returned a non-success status
    #[error("router status {status}: {body}")]
    Status { status: u16, body: String },

    /// Router found no route between the points
    #[error("no route")]
    NoRoute,
}
