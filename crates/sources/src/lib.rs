//! # Sources Crate
//!
//! This crate provides the two attraction lists the map is built from.
//!
//! ## Components
//!
//! ### AttractionSource
//! Async trait for "give me one complete attraction list". The viewer owns
//! one source per list and joins the two fetches.
//!
//! ### HttpAttractionSource
//! Fetches `GET /ehproperties` or `GET /assocattractions` from the backend
//! and parses the keyed JSON body.
//!
//! ### FileAttractionSource
//! Reads a saved copy of the same payload from disk.
//!
//! ## Example Usage
//!
//! ```ignore
//! use sources::{AttractionSource, HttpAttractionSource, SourceConfig};
//!
//! let config = SourceConfig::new("http://localhost:3001");
//! let (eh, assoc) = HttpAttractionSource::pair(&config)?;
//!
//! let (eh_list, assoc_list) = tokio::join!(eh.fetch(), assoc.fetch());
//! ```

// Public modules
pub mod error;
pub mod source;
pub mod http;
pub mod file;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

// Re-export commonly used types
pub use error::{Result, SourceError};
pub use file::FileAttractionSource;
pub use http::{
    ASSOC_ATTRACTIONS_PATH, DEFAULT_BASE_URL, DEFAULT_USER_AGENT, EH_PROPERTIES_PATH,
    HttpAttractionSource, SourceConfig,
};
pub use source::AttractionSource;
