//! Directory CSV parsing.

use std::collections::HashMap;
use std::io::Read;

use tracing::debug;

use crate::domain::Station;

use super::error::StationError;

const STATION_COLUMNS: [&str; 4] = ["gtfsstopid", "stopname", "gtfslatitude", "gtfslongitude"];
const ROUTE_COLUMNS: [&str; 2] = ["gtfsstopid", "daytimeroutes"];

/// Canonical header form: lower-case with spaces and `_ - / .` removed.
///
/// `GTFS Stop ID`, `gtfs_stop_id` and `GTFS-Stop-ID` all become `gtfsstopid`.
pub fn normalize_header(header: &str) -> String {
    header
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-' | '/' | '.'))
        .collect()
}

/// Positions of the required columns, in the order given.
fn column_positions<R: Read>(
    reader: &mut csv::Reader<R>,
    csv: &'static str,
    needed: &[&'static str],
) -> Result<Vec<usize>, StationError> {
    let index: HashMap<String, usize> = reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, h)| (normalize_header(h), i))
        .collect();

    debug!(csv, columns = index.len(), "read csv header");

    needed
        .iter()
        .map(|&column| {
            index
                .get(column)
                .copied()
                .ok_or(StationError::MissingColumn { csv, column })
        })
        .collect()
}

/// Parse the station directory CSV.
///
/// Rows without a stop id, or whose coordinates are zero or unparseable,
/// are skipped. Route lists start empty.
pub fn parse_stations<R: Read>(reader: R) -> Result<Vec<Station>, StationError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let cols = column_positions(&mut reader, "stations", &STATION_COLUMNS)?;

    let mut stations = Vec::new();
    for row in reader.records() {
        let row = row?;
        let field = |i: usize| row.get(cols[i]).unwrap_or_default();
        let coord = |i: usize| field(i).trim().parse::<f64>().unwrap_or(0.0);

        let stop_id = field(0);
        let (lat, lon) = (coord(2), coord(3));
        if stop_id.is_empty() || lat == 0.0 || lon == 0.0 {
            continue;
        }
        stations.push(Station::new(stop_id, field(1), lat, lon));
    }
    Ok(stations)
}

/// Parse the route mapping CSV into stop id → daytime routes.
///
/// Routes are whitespace separated (`N W`, `A C E`). Rows with no stop id
/// or no routes are skipped; a later row for the same stop wins.
pub fn parse_route_mapping<R: Read>(reader: R) -> Result<HashMap<String, Vec<String>>, StationError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let cols = column_positions(&mut reader, "routes", &ROUTE_COLUMNS)?;

    let mut mapping = HashMap::new();
    for row in reader.records() {
        let row = row?;
        let stop_id = row.get(cols[0]).unwrap_or_default();
        let routes: Vec<String> = row
            .get(cols[1])
            .unwrap_or_default()
            .split_whitespace()
            .map(str::to_string)
            .collect();
        if stop_id.is_empty() || routes.is_empty() {
            continue;
        }
        mapping.insert(stop_id.to_string(), routes);
    }
    Ok(mapping)
}

/// Attach mapped routes to stations, returning how many stations matched.
pub fn apply_routes(stations: &mut [Station], mapping: &HashMap<String, Vec<String>>) -> usize {
    let mut matched = 0;
    for station in stations.iter_mut() {
        if let Some(routes) = mapping.get(&station.stop_id) {
            station.set_routes(routes.iter().cloned());
            matched += 1;
        }
    }
    matched
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATIONS: &str = "\
Station ID,Complex ID,GTFS Stop ID,Division,Line,Stop Name,Borough,GTFS Latitude,GTFS Longitude
1,1,R01,BMT,Astoria,Astoria-Ditmars Blvd,Q,40.775036,-73.912034
2,2,R03,BMT,Astoria,Astoria Blvd,Q,40.770258,-73.917843
3,3,,BMT,Astoria,No Id,Q,40.1,-73.1
4,4,X99,BMT,Nowhere,Zero Island,Q,0,-73.9
5,5,X98,BMT,Nowhere,Garbage,Q,north,-73.9
";

    const ROUTES: &str = "\
Station ID,GTFS Stop ID,Daytime Routes
1,R01,N W
2,R03,N  W
3,635,4 5 6
4,R05,
";

    #[test]
    fn header_normalisation() {
        assert_eq!(normalize_header("GTFS Stop ID"), "gtfsstopid");
        assert_eq!(normalize_header(" gtfs_stop_id "), "gtfsstopid");
        assert_eq!(normalize_header("GTFS-Latitude"), "gtfslatitude");
        assert_eq!(normalize_header("North/South.Label"), "northsouthlabel");
    }

    #[test]
    fn parses_stations_and_skips_bad_rows() {
        let stations = parse_stations(STATIONS.as_bytes()).unwrap();
        let ids: Vec<&str> = stations.iter().map(|s| s.stop_id.as_str()).collect();
        assert_eq!(ids, vec!["R01", "R03"]);
        assert_eq!(stations[0].name, "Astoria-Ditmars Blvd");
        assert_eq!(stations[0].lat, 40.775036);
        assert!(stations[0].routes.is_empty());
    }

    #[test]
    fn missing_station_column() {
        let csv = "GTFS Stop ID,Stop Name,GTFS Latitude\nR01,Astoria,40.7\n";
        let err = parse_stations(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            StationError::MissingColumn {
                csv: "stations",
                column: "gtfslongitude"
            }
        ));
    }

    #[test]
    fn parses_route_mapping() {
        let mapping = parse_route_mapping(ROUTES.as_bytes()).unwrap();
        assert_eq!(mapping.len(), 3);
        assert_eq!(mapping["R01"], vec!["N", "W"]);
        assert_eq!(mapping["R03"], vec!["N", "W"]);
        assert_eq!(mapping["635"], vec!["4", "5", "6"]);
        assert!(!mapping.contains_key("R05"));
    }

    #[test]
    fn applies_routes_to_matching_stations() {
        let mut stations = parse_stations(STATIONS.as_bytes()).unwrap();
        let mapping = parse_route_mapping(ROUTES.as_bytes()).unwrap();
        assert_eq!(apply_routes(&mut stations, &mapping), 2);
        assert_eq!(stations[1].routes, vec!["N", "W"]);
    }
}
