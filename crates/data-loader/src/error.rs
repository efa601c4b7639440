//! Error types for the data-loader crate.
//!
//! Every variant carries the name of the payload it came from (an endpoint
//! path or a file path) so a failed load can be traced back to its source.

use thiserror::Error;

/// Errors that can occur while reading and parsing attraction payloads.
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// A dump file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The payload was not valid JSON.
    #[error("Malformed JSON in {origin}: {source}")]
    Json {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    /// The payload parsed, but the top level is not an object keyed by id.
    #[error("Expected a JSON object keyed by id in {origin}, found {found}")]
    NotAnObject { origin: String, found: String },

    /// One record inside the payload didn't match the attraction shape.
    #[error("Invalid attraction '{id}' in {origin}: {reason}")]
    InvalidRecord {
        origin: String,
        id: String,
        reason: String,
    },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
