//! Error types exposed by the SMELT reporting layer.

use thiserror::Error;

/// Errors surfaced while talking to SMELT or writing the report.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReportError {
    /// Building the HTTP client failed.
    #[error("failed to configure HTTP client: {message}")]
    Client {
        /// Detail from the underlying client builder.
        message: String,
    },

    /// Networking failed while calling the remote API.
    #[error("network error talking to {url}: {message}")]
    Network {
        /// Request URL that failed.
        url: String,
        /// Transport-level error detail.
        message: String,
    },

    /// The remote API answered with a non-success status.
    #[error("{url} returned status {status}")]
    Status {
        /// Request URL that failed.
        url: String,
        /// HTTP status code of the response.
        status: u16,
    },

    /// A response body could not be decoded.
    #[error("could not decode response from {url}: {message}")]
    Decode {
        /// Request URL whose body was malformed.
        url: String,
        /// Deserialisation error detail.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },
}
