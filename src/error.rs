//! Error types for PhoneFinder
//!
//! This module defines the error types used across the search and chat
//! controllers, using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for PhoneFinder operations
///
/// Most failures in this crate are non-fatal to the page: controllers
/// degrade to an empty/default state and only surface these errors to the
/// caller so it can decide how to report them.
#[derive(Error, Debug)]
pub enum PhoneFinderError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// The remote service answered with a non-success status
    #[error("Service returned HTTP {status} for {endpoint}")]
    ServiceStatus {
        /// Endpoint path that was called
        endpoint: String,
        /// HTTP status code
        status: u16,
    },

    /// A chat send was attempted while another exchange is pending
    #[error("A chat request is already in flight")]
    RequestInFlight,

    /// Persistence backend errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP transport errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid service URL
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Result type alias for PhoneFinder operations
///
/// Uses `anyhow::Error` so callers can attach context while still being able
/// to downcast to [`PhoneFinderError`].
pub type Result<T> = anyhow::Result<T>;
