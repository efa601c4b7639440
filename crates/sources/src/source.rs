//! The AttractionSource trait.
//!
//! A source yields one complete attraction list per call. The viewer holds
//! two of them (EH properties and associated attractions) and awaits both
//! before storing anything.

use crate::error::Result;
use async_trait::async_trait;
use data_loader::Attraction;

/// Provider of one attraction list.
///
/// `Send + Sync` so a source can be shared behind an `Arc` and polled from
/// any runtime thread.
#[async_trait]
pub trait AttractionSource: Send + Sync {
    /// Returns the name of this source (for logging/debugging)
    fn name(&self) -> &str;

    /// Fetch the full list. Each call starts from scratch.
    async fn fetch(&self) -> Result<Vec<Attraction>>;
}
