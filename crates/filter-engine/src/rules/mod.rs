//! Rule implementations for the visibility predicate.
//!
//! Each module holds one clause; [`crate::FilterEngine::standard`] installs
//! all of them.

pub mod all_off;
pub mod category;
pub mod ownership;
pub mod popular;

// Re-export for convenience
pub use all_off::AllFiltersOffRule;
pub use category::CategoryRule;
pub use ownership::OwnershipRule;
pub use popular::PopularRule;
