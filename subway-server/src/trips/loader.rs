//! Static timetable archive loader.

use std::collections::HashMap;
use std::io::{Cursor, Read};
use std::path::PathBuf;
use std::time::Duration;

use tracing::{debug, info};

use super::error::TripIndexError;
use super::index::{TripIndex, TripRecord};

/// Archive member holding the trip table.
const TRIPS_MEMBER: &str = "trips.txt";

/// Where the static archive comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveSource {
    Url(String),
    Path(PathBuf),
}

impl ArchiveSource {
    /// `http://` and `https://` locations are URLs; anything else is a file path.
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            ArchiveSource::Url(location.to_string())
        } else {
            ArchiveSource::Path(PathBuf::from(location))
        }
    }
}

/// Downloads (or reads) the archive and builds a [`TripIndex`].
#[derive(Debug, Clone)]
pub struct TripLoader {
    http: reqwest::Client,
    source: ArchiveSource,
}

impl TripLoader {
    pub fn new(source: ArchiveSource, timeout: Duration) -> Result<Self, TripIndexError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, source })
    }

    /// Load the archive and parse its trip table.
    pub async fn load(&self) -> Result<TripIndex, TripIndexError> {
        let bytes = match &self.source {
            ArchiveSource::Url(url) => {
                let response = self.http.get(url).send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(TripIndexError::Status(status.as_u16()));
                }
                response.bytes().await?.to_vec()
            }
            ArchiveSource::Path(path) => tokio::fs::read(path).await?,
        };

        debug!(bytes = bytes.len(), "read static archive");
        let records = parse_archive(&bytes)?;
        info!(trips = records.len(), "loaded static trips");
        Ok(TripIndex::new(records))
    }
}

/// Extract and parse `trips.txt` from a zip archive.
pub fn parse_archive(bytes: &[u8]) -> Result<Vec<TripRecord>, TripIndexError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    let member = match archive.by_name(TRIPS_MEMBER) {
        Ok(member) => member,
        Err(zip::result::ZipError::FileNotFound) => {
            return Err(TripIndexError::MissingMember(TRIPS_MEMBER));
        }
        Err(e) => return Err(e.into()),
    };
    parse_trips(member)
}

/// Parse a GTFS `trips.txt` table.
///
/// Headers are matched after trimming and lower-casing. Columns other than
/// the four read here are ignored.
pub fn parse_trips<R: Read>(reader: R) -> Result<Vec<TripRecord>, TripIndexError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let columns: HashMap<String, usize> = reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, h)| (h.trim().trim_start_matches('\u{feff}').to_lowercase(), i))
        .collect();

    let column = |name: &'static str| {
        columns
            .get(name)
            .copied()
            .ok_or(TripIndexError::MissingColumn(name))
    };
    let route_col = column("route_id")?;
    let trip_col = column("trip_id")?;
    let service_col = column("service_id")?;
    let headsign_col = column("trip_headsign")?;

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let field = |i: usize| row.get(i).unwrap_or_default().to_string();

        let trip_id = field(trip_col);
        if trip_id.is_empty() {
            continue;
        }

        records.push(TripRecord::new(
            field(route_col),
            trip_id,
            field(service_col),
            field(headsign_col),
        ));
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use crate::domain::ServiceCalendar;

    const TRIPS: &str = "route_id,trip_id,service_id,trip_headsign,direction_id
6,AFA23GEN-6046-Weekday-00_062350_6..N01R,Weekday,Pelham Bay Park,0
6,AFA23GEN-6046-Weekday-00_062400_6..S01R,Weekday,Brooklyn Bridge-City Hall,1
";

    fn zip_with(member: &str, contents: &str) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file(member, zip::write::SimpleFileOptions::default())
            .unwrap();
        writer.write_all(contents.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn parses_trips_table() {
        let records = parse_trips(TRIPS.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].route_id, "6");
        assert_eq!(records[0].destination_label, "Pelham Bay Park");
        assert_eq!(records[0].calendar, Some(ServiceCalendar::Weekday));
        assert_eq!(records[1].destination_label, "Brooklyn Bridge-City Hall");
    }

    #[test]
    fn header_case_and_whitespace_ignored() {
        let csv = " Route_ID , Trip_Id ,SERVICE_ID,Trip_Headsign\n6,t1,Sunday,Wakefield\n";
        let records = parse_trips(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].trip_id, "t1");
        assert_eq!(records[0].calendar, Some(ServiceCalendar::Sunday));
    }

    #[test]
    fn missing_column_is_error() {
        let csv = "trip_id,trip_headsign,route_id\nt1,Fresh Data,6\n";
        let err = parse_trips(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, TripIndexError::MissingColumn("service_id")));
    }

    #[test]
    fn rows_without_trip_id_skipped() {
        let csv = "route_id,trip_id,service_id,trip_headsign\n6,,Weekday,Nowhere\n6,t2,Weekday,Somewhere\n";
        let records = parse_trips(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].trip_id, "t2");
    }

    #[test]
    fn reads_trips_member_from_archive() {
        let archive = zip_with("trips.txt", TRIPS);
        let records = parse_archive(&archive).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn archive_without_trips_member() {
        let archive = zip_with("stops.txt", "stop_id\n101\n");
        let err = parse_archive(&archive).unwrap_err();
        assert!(matches!(err, TripIndexError::MissingMember("trips.txt")));
    }

    #[test]
    fn garbage_is_not_an_archive() {
        let err = parse_archive(b"definitely not a zip").unwrap_err();
        assert!(matches!(err, TripIndexError::Zip(_)));
    }

    #[test]
    fn source_parsing() {
        assert_eq!(
            ArchiveSource::parse("http://web.mta.info/google_transit.zip"),
            ArchiveSource::Url("http://web.mta.info/google_transit.zip".into())
        );
        assert_eq!(
            ArchiveSource::parse("/var/lib/gtfs/google_transit.zip"),
            ArchiveSource::Path(PathBuf::from("/var/lib/gtfs/google_transit.zip"))
        );
    }

    #[tokio::test]
    async fn loads_from_local_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("google_transit.zip");
        std::fs::write(&path, zip_with("trips.txt", TRIPS)).unwrap();

        let loader = TripLoader::new(ArchiveSource::Path(path), Duration::from_secs(5)).unwrap();
        let index = loader.load().await.unwrap();
        assert_eq!(index.len(), 2);
    }

    #[tokio::test]
    async fn missing_local_archive_is_io_error() {
        let loader = TripLoader::new(
            ArchiveSource::parse("/nonexistent/google_transit.zip"),
            Duration::from_secs(5),
        )
        .unwrap();
        assert!(matches!(
            loader.load().await.unwrap_err(),
            TripIndexError::Io(_)
        ));
    }
}
