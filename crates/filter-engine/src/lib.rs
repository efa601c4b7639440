//! Filtering of attractions for the map view.
//!
//! This crate provides:
//! - FilterState, the container for the ownership, popularity and category
//!   filters, including the rule that popularity and category changes clear
//!   the ownership flags
//! - VisibilityRule and one implementation per clause of the predicate
//! - FilterEngine, which ORs the rules together and annotates each record
//!
//! ## Visibility
//! A record is visible when any of these holds:
//! 1. no filter flag is on at all
//! 2. its ownership tag's flag is on
//! 3. the popularity flag is on and the record is popular
//! 4. one of its category labels is selected
//!
//! ## Example Usage
//! ```ignore
//! use filter_engine::{FilterAction, FilterEngine, FilterState};
//!
//! let mut state = FilterState::new();
//! state.apply(&"popular=on".parse::<FilterAction>()?);
//!
//! let engine = FilterEngine::standard();
//! let annotated = engine.apply(index.attractions(), &state);
//! ```

pub mod traits;
pub mod state;
pub mod rules;
pub mod engine;

// Re-export main types
pub use engine::{AnnotatedAttraction, FilterEngine, filter};
pub use state::{CategoryFilter, FilterAction, FilterState, OwnershipFilter};
pub use traits::{FilterContext, VisibilityRule};
