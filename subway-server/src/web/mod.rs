//! Web layer for the subway departures service.
//!
//! JSON endpoints for the station list and for departures by location,
//! name or stop id.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
