//! Core trait for the visibility rules.
//!
//! A record is visible when at least one rule matches it. Rules never see
//! each other's verdicts, so they can be added or removed independently.

use crate::state::{FilterState, OwnershipFilter};
use data_loader::Attraction;

/// Everything a rule needs to judge a record, computed once per evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterContext {
    pub ownership: OwnershipFilter,
    pub popular: bool,
    /// Labels of the selected categories.
    pub selected_labels: Vec<&'static str>,
    /// No flag in any dimension is on.
    pub all_off: bool,
}

impl FilterContext {
    pub fn from_state(state: &FilterState) -> Self {
        Self {
            ownership: state.ownership(),
            popular: state.popular(),
            selected_labels: state.categories().selected_labels(),
            all_off: state.is_all_off(),
        }
    }
}

/// One clause of the visibility predicate.
///
/// `Send + Sync` so an engine can be shared behind an `Arc`.
pub trait VisibilityRule: Send + Sync {
    /// Returns the name of this rule (for logging/debugging)
    fn name(&self) -> &str;

    /// Whether this clause alone makes `attraction` visible.
    fn matches(&self, attraction: &Attraction, context: &FilterContext) -> bool;
}
