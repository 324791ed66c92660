//! Error types for the Cinescout plugin.
//!
//! [`CinescoutError`] is the single error type used across the crate, with a
//! [`Result`] alias for convenience. Variants are derived with `thiserror`.
//!
//! Most of these never reach the user. Only configuration errors are shown
//! directly; search failures are mapped to fixed messages by the
//! orchestrator and everything else is logged.

use thiserror::Error;

/// The main error type for Cinescout operations.
///
/// # Examples
///
/// ```
/// use cinescout::CinescoutError;
///
/// fn require_key(key: Option<&str>) -> Result<&str, CinescoutError> {
///     key.ok_or_else(|| CinescoutError::Config("tmdb_api_key is required".to_string()))
/// }
///
/// assert!(require_key(None).is_err());
/// ```
#[derive(Debug, Error)]
pub enum CinescoutError {
    /// Configuration is invalid or missing a required value.
    ///
    /// Raised once at startup by [`crate::Config::from_zellij`]. The plugin
    /// renders this message instead of issuing any requests.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Reading or writing the local trending store failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Communication with the background worker failed.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// A remote service answered with a non-success HTTP status.
    #[error("HTTP {status} from {service}")]
    Transport {
        /// Which collaborator answered (`"catalog"`, `"trending"`).
        service: &'static str,
        /// HTTP status code returned by the host.
        status: u16,
    },

    /// A response body could not be decoded.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// A host event did not carry the context this plugin attached to it.
    #[error("Protocol error: {0}")]
    Protocol(String),
}

/// A specialized `Result` type for Cinescout operations.
pub type Result<T> = std::result::Result<T, CinescoutError>;
