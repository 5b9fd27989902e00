//! Error types for the front-end collaborators and configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for service calls.
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Failure reported by a back-end collaborator.
///
/// Service errors never escape a component: they are logged, shown to the
/// user as a toast and turned into a `*Failed` action where a reducer tracks
/// the request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The request never reached the back end or the connection dropped.
    #[error("Network error: {0}")]
    Network(String),

    /// The requested resource does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The session is missing or expired.
    #[error("Unauthorized")]
    Unauthorized,

    /// The back end answered with an error status.
    #[error("Request rejected with status {status}: {message}")]
    Rejected {
        /// HTTP-like status code
        status: u16,
        /// Message returned by the back end
        message: String,
    },
}

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read configuration file {path}: {source}")]
    Io {
        /// File that was being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The configuration is not valid JSON for [`FrontendConfig`](crate::config::FrontendConfig).
    #[error("Invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// A field holds a value outside its allowed range.
    #[error("Invalid value for {field}: {reason}")]
    Invalid {
        /// Offending field
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },
}
