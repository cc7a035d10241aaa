//! Error types for the provider directory.
//!
//! This module defines the centralized error type [`DirectoryError`] and a type alias
//! [`Result`] used throughout the crate. All errors are implemented using the
//! `thiserror` crate for automatic `Error` trait implementation.

use thiserror::Error;

/// The main error type for provider directory operations.
///
/// Consolidates every failure the directory can surface, from REST calls against
/// the Nova API to roster snapshot files and configuration parsing. Variants that
/// wrap errors from external crates use `#[from]` for automatic conversion.
///
/// # Examples
///
/// ```
/// use provider_directory::DirectoryError;
///
/// fn check_timeout(secs: u64) -> Result<(), DirectoryError> {
///     if secs == 0 {
///         return Err(DirectoryError::Config("request_timeout_secs must be positive".into()));
///     }
///     Ok(())
/// }
/// assert!(check_timeout(0).is_err());
/// ```
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations (roster snapshots,
    /// configuration files, trace files).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The Nova API answered with a non-success status or an error payload.
    #[error("Nova API error: {0}")]
    Api(String),

    /// A response body or file could not be deserialized into the expected shape.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        /// Endpoint or file the payload came from.
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration is invalid or could not be parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// A roster snapshot file is malformed or could not be written.
    #[error("Roster file error: {0}")]
    RosterFile(String),

    /// The selected organization has no directory data.
    ///
    /// Treated as a recoverable condition: the view shows an error message and
    /// does not navigate to the roster.
    #[error("No organization data found for {0}")]
    OrganizationNotFound(String),
}

/// A specialized `Result` type for provider directory operations.
pub type Result<T> = std::result::Result<T, DirectoryError>;
