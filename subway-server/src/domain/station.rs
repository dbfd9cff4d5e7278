//! Station records from the directory.

use super::Coordinate;

/// A station as listed in the directory.
///
/// `routes` keeps the directory's order and may be empty when no route
/// mapping was available for the stop.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub stop_id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub routes: Vec<String>,
}

impl Station {
    /// Create a station without route information.
    pub fn new(stop_id: impl Into<String>, name: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            stop_id: stop_id.into(),
            name: name.into(),
            lat,
            lon,
            routes: Vec::new(),
        }
    }

    /// Attach serving routes, dropping duplicates but keeping first-seen order.
    pub fn with_routes<I, S>(mut self, routes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_routes(routes);
        self
    }

    /// Replace the serving routes in place; see [`Station::with_routes`].
    pub fn set_routes<I, S>(&mut self, routes: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.routes.clear();
        for route in routes {
            let route = route.into();
            if !self.routes.contains(&route) {
                self.routes.push(route);
            }
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lon)
    }
}
