//! Default rule: with nothing filtered, everything is shown.

use crate::traits::{FilterContext, VisibilityRule};
use data_loader::Attraction;

/// Matches every record while no flag in any dimension is on.
pub struct AllFiltersOffRule;

impl VisibilityRule for AllFiltersOffRule {
    fn name(&self) -> &str {
        "AllFiltersOffRule"
    }

    fn matches(&self, _attraction: &Attraction, context: &FilterContext) -> bool {
        context.all_off
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{CategoryFilter, FilterState, OwnershipFilter};
    use data_loader::{Category, Ownership};

    #[test]
    fn test_matches_only_when_everything_is_off() {
        let attraction = Attraction::new("1", "Anywhere", Ownership::Unknown("x".into()));

        let off = FilterState::from_parts(OwnershipFilter::none(), false, CategoryFilter::new());
        assert!(AllFiltersOffRule.matches(&attraction, &FilterContext::from_state(&off)));

        let popular = FilterState::from_parts(OwnershipFilter::none(), true, CategoryFilter::new());
        assert!(!AllFiltersOffRule.matches(&attraction, &FilterContext::from_state(&popular)));

        let category = FilterState::from_parts(
            OwnershipFilter::none(),
            false,
            [Category::Fort].into_iter().collect(),
        );
        assert!(!AllFiltersOffRule.matches(&attraction, &FilterContext::from_state(&category)));

        let ownership =
            FilterState::from_parts(OwnershipFilter::new(false, true), false, CategoryFilter::new());
        assert!(!AllFiltersOffRule.matches(&attraction, &FilterContext::from_state(&ownership)));
    }
}
