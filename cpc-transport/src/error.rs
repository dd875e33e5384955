//! Error types for the HTTP transport

use thiserror::Error;

/// Errors raised while exchanging a request with the remote server.
///
/// A non-2xx HTTP status is not a transport error: the response is handed
/// back to the caller, which decides how to interpret the body.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The underlying HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    Client(String),

    /// The request did not complete within the configured timeout
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Connection, TLS or I/O failure
    #[error("Network/HTTP error: {0}")]
    Network(String),

    /// The response body could not be read
    #[error("Failed to read response body: {0}")]
    Body(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout(err.to_string())
        } else if err.is_builder() {
            TransportError::Client(err.to_string())
        } else if err.is_body() || err.is_decode() {
            TransportError::Body(err.to_string())
        } else {
            TransportError::Network(err.to_string())
        }
    }
}
