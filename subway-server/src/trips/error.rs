//! Trip index loading errors.

/// Errors that can occur while loading the static trip table.
#[derive(Debug, thiserror::Error)]
pub enum TripIndexError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Archive download returned a non-success status
    #[error("archive download returned status {0}")]
    Status(u16),

    /// Reading a local archive failed
    #[error("failed to read archive: {0}")]
    Io(#[from] std::io::Error),

    /// Archive is not a readable zip
    #[error("invalid archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Archive lacks a required member
    #[error("{0} not found in archive")]
    MissingMember(&'static str),

    /// CSV parse failure
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Required CSV column absent
    #[error("trips csv missing column '{0}'")]
    MissingColumn(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(
            TripIndexError::MissingMember("trips.txt").to_string(),
            "trips.txt not found in archive"
        );
        assert_eq!(
            TripIndexError::MissingColumn("trip_headsign").to_string(),
            "trips csv missing column 'trip_headsign'"
        );
        assert_eq!(
            TripIndexError::Status(404).to_string(),
            "archive download returned status 404"
        );
    }
}
