//! Error types for pasalku-probe.

use std::time::Duration;
use thiserror::Error;

/// Result type for pasalku-probe setup operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building probe machinery.
///
/// Probe cycles themselves never fail; see [`TransportError`] for what a
/// single attempt can run into.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid probe configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Client(String),
}

/// Network-level failure of a single health request.
///
/// Always absorbed into a [`crate::ProbeOutcome::NetworkFailure`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// No response within the per-attempt deadline.
    #[error("timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    /// DNS resolution or TCP/TLS connect failed.
    #[error("connection failed: {0}")]
    Connect(String),

    /// Any other failure while sending the request.
    #[error("request failed: {0}")]
    Request(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            // reqwest does not report the configured deadline back
            TransportError::Timeout(Duration::ZERO)
        } else if err.is_connect() {
            TransportError::Connect(err.to_string())
        } else {
            TransportError::Request(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_display() {
        let err = TransportError::Timeout(Duration::from_millis(1500));
        assert_eq!(err.to_string(), "timed out after 1500ms");
    }

    #[test]
    fn test_configuration_display() {
        let err = Error::Configuration("no targets".to_string());
        assert_eq!(err.to_string(), "Configuration error: no targets");
    }
}
