//! Error types for radius-check

use thiserror::Error;

/// Main error type for radius-check operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Transport(#[from] TransportError),

    #[error("Unexpected geocoding response: {0}")]
    Parse(String),

    #[error("{0}")]
    InvalidQuery(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure to get a successful response out of the geocoding service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The service answered with a non-success status
    #[error("HTTP error! status: {0}")]
    Status(u16),

    /// The request never produced a response
    #[error("Network error: {0}")]
    Network(String),
}

/// Result type alias for radius-check operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_mentions_code() {
        let err = Error::from(TransportError::Status(500));
        assert!(err.to_string().contains("500"));
    }

    #[test]
    fn test_network_error_display() {
        let err = Error::from(TransportError::Network("connection reset".into()));
        assert_eq!(err.to_string(), "Network error: connection reset");
    }
}
