//! Coordinates, distances and the service area.

/// Mean earth radius in metres.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A WGS84 point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Great-circle distance to `other` in metres.
    pub fn distance_m(&self, other: &Coordinate) -> f64 {
        haversine_m(self.lat, self.lon, other.lat, other.lon)
    }
}

/// Haversine great-circle distance in metres.
pub fn haversine_m(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lon2 - lon1).to_radians();

    let a = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_M * c
}

/// Rectangular service area. Points outside are rejected before any lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// Coarse box around the New York City subway network.
    pub const NEW_YORK_CITY: BoundingBox = BoundingBox {
        min_lat: 40.3,
        max_lat: 41.1,
        min_lon: -74.5,
        max_lon: -73.3,
    };

    /// Edges are inclusive.
    pub fn contains(&self, coord: &Coordinate) -> bool {
        coord.lat >= self.min_lat
            && coord.lat <= self.max_lat
            && coord.lon >= self.min_lon
            && coord.lon <= self.max_lon
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::NEW_YORK_CITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn times_square_to_grand_central() {
        let d = haversine_m(40.7580, -73.9855, 40.7527, -73.9772);
        assert!(d > 800.0 && d < 1100.0, "unexpected distance {d}");
    }

    #[test]
    fn zero_distance_to_self() {
        let c = Coordinate::new(40.7527, -73.9772);
        assert!(c.distance_m(&c).abs() < 1e-6);
    }

    #[test]
    fn bounding_box_rejects_los_angeles() {
        let bbox = BoundingBox::NEW_YORK_CITY;
        assert!(!bbox.contains(&Coordinate::new(34.0522, -118.2437)));
    }

    #[test]
    fn bounding_box_accepts_midtown() {
        let bbox = BoundingBox::NEW_YORK_CITY;
        assert!(bbox.contains(&Coordinate::new(40.76, -73.98)));
    }

    #[test]
    fn bounding_box_edges_inclusive() {
        let bbox = BoundingBox::default();
        assert!(bbox.contains(&Coordinate::new(40.3, -74.5)));
        assert!(bbox.contains(&Coordinate::new(41.1, -73.3)));
        assert!(!bbox.contains(&Coordinate::new(41.1001, -73.9)));
    }
}
