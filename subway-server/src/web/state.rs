//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::{CachedFeedClient, CachedWalkingClient};
use crate::departures::DepartureEngine;
use crate::stations::StationDirectory;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Departure engine over the cached feed client
    pub engine: Arc<DepartureEngine<CachedFeedClient>>,

    /// Cached walking router
    pub walking: Arc<CachedWalkingClient>,

    /// Station directory
    pub stations: Arc<StationDirectory>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        engine: DepartureEngine<CachedFeedClient>,
        walking: CachedWalkingClient,
        stations: Arc<StationDirectory>,
    ) -> Self {
        Self {
            engine: Arc::new(engine),
            walking: Arc::new(walking),
            stations,
        }
    }
}
