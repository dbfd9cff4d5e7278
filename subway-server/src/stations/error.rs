//! Station directory error types.

/// Errors that can occur while loading the station directory.
#[derive(Debug, thiserror::Error)]
pub enum StationError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A CSV download returned a non-success status
    #[error("{csv} download returned status {status}")]
    Status { csv: &'static str, status: u16 },

    /// CSV parse failure
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Required CSV column absent after header normalisation
    #[error("{csv} csv missing column '{column}'")]
    MissingColumn {
        csv: &'static str,
        column: &'static str,
    },

    /// The directory parsed but contained no usable stations
    #[error("station directory is empty")]
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = StationError::MissingColumn {
            csv: "stations",
            column: "gtfsstopid",
        };
        assert_eq!(err.to_string(), "stations csv missing column 'gtfsstopid'");

        let err = StationError::Status {
            csv: "routes",
            status: 502,
        };
        assert_eq!(err.to_string(), "routes download returned status 502");
    }
}
