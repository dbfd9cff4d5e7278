//! Pedestrian routing.
//!
//! Walking estimates are best-effort: callers omit them on any error.

mod client;
mod error;

pub use client::{WalkResult, WalkingClient, WalkingConfig};
pub use error::WalkingError;
