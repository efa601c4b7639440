//! # Data Loader Crate
//!
//! This crate holds the attraction data model and turns backend payloads
//! into it.
//!
//! ## Main Components
//!
//! - **types**: Domain types (Attraction, Ownership, Category)
//! - **parser**: Parse keyed JSON payloads into attraction lists
//! - **index**: The combined attraction list with id lookup
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::AttractionIndex;
//! use std::path::Path;
//!
//! let index = AttractionIndex::load_from_files(Path::new("data"))?;
//! println!("{} attractions", index.len());
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use index::{ASSOC_ATTRACTIONS_FILE, AttractionIndex, EH_PROPERTIES_FILE, IndexSummary};
pub use parser::{parse_attraction_file, parse_attraction_value, parse_attractions};
pub use types::{Attraction, AttractionId, Category, Ownership};
