//! Rule for the ownership toggles.

use crate::traits::{FilterContext, VisibilityRule};
use data_loader::{Attraction, Ownership};

/// Matches records carrying `ownership` while that tag's flag is on.
///
/// The standard engine installs one of these per known tag. A record with
/// an unknown tag is never matched.
pub struct OwnershipRule {
    ownership: Ownership,
    name: String,
}

impl OwnershipRule {
    pub fn new(ownership: Ownership) -> Self {
        let name = format!("OwnershipRule({ownership})");
        Self { ownership, name }
    }
}

impl VisibilityRule for OwnershipRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn matches(&self, attraction: &Attraction, context: &FilterContext) -> bool {
        attraction.ownership == self.ownership && context.ownership.allows(&self.ownership)
    }
}
