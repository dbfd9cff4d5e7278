//! Live trip-update feeds.
//!
//! The subway publishes GTFS-realtime trip updates split across several
//! endpoints, each covering a fixed group of routes. This module decides
//! which endpoints a station needs, fetches them, and flattens the decoded
//! messages into one [`FeedRecord`] per (trip, stop) pair.

mod client;
mod error;
pub mod proto;
mod record;
mod selector;

pub use client::{FeedClient, FeedClientConfig};
pub use error::FeedError;
pub use record::{FeedRecord, flatten};
pub use selector::{FeedId, select_feeds};
