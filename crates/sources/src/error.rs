//! Error types for the sources crate.

use data_loader::DataLoadError;
use thiserror::Error;

/// Errors that can occur while fetching an attraction list.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("GET {url} returned HTTP {status}")]
    Http { url: String, status: u16 },

    /// The request did not complete within the configured timeout.
    #[error("GET {url} timed out after {timeout_secs}s")]
    Timeout { url: String, timeout_secs: u64 },

    /// Connection-level failure.
    #[error("GET {url} failed: {message}")]
    Network { url: String, message: String },

    /// The body could not be turned into attractions.
    #[error(transparent)]
    Decode(#[from] DataLoadError),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, SourceError>;
