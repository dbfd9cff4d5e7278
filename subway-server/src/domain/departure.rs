//! Departures surfaced to riders.

use std::fmt;

/// Travel direction taken from a platform suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    North,
    South,
    East,
    West,
    /// The feed stop id carried no compass suffix.
    #[default]
    Unknown,
}

impl Direction {
    /// The single-letter form used on the wire; empty for [`Direction::Unknown`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::North => "N",
            Direction::South => "S",
            Direction::East => "E",
            Direction::West => "W",
            Direction::Unknown => "",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One upcoming train at a station.
///
/// Built from a matching feed record; `destination_label` and
/// `last_stop_name` are filled in after limiting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departure {
    pub route_id: String,
    /// Feed stop id, including any platform suffix.
    pub stop_id: String,
    pub direction: Direction,
    /// Unix seconds.
    pub epoch_time: i64,
    pub eta_seconds: i64,
    pub trip_id: String,
    pub destination_label: String,
    pub last_stop_name: Option<String>,
}

impl Departure {
    /// Grouping key used when capping departures per route and direction.
    pub fn route_direction(&self) -> (&str, Direction) {
        (self.route_id.as_str(), self.direction)
    }
}
