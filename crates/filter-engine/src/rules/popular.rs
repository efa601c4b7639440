//! Rule for the "most popular" toggle.

use crate::traits::{FilterContext, VisibilityRule};
use data_loader::Attraction;

/// Matches popular records while the popularity flag is on.
pub struct PopularRule;

impl VisibilityRule for PopularRule {
    fn name(&self) -> &str {
        "PopularRule"
    }

    fn matches(&self, attraction: &Attraction, context: &FilterContext) -> bool {
        context.popular && attraction.popular
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{CategoryFilter, FilterState, OwnershipFilter};
    use data_loader::Ownership;

    #[test]
    fn test_popular_rule() {
        let popular = Attraction::new("1", "Stonehenge", Ownership::EhProperty).with_popular(true);
        let quiet = Attraction::new("2", "Wayland's Smithy", Ownership::EhProperty);

        let on = FilterContext::from_state(&FilterState::from_parts(
            OwnershipFilter::none(),
            true,
            CategoryFilter::new(),
        ));
        let off = FilterContext::from_state(&FilterState::from_parts(
            OwnershipFilter::none(),
            false,
            CategoryFilter::new(),
        ));

        assert!(PopularRule.matches(&popular, &on));
        assert!(!PopularRule.matches(&quiet, &on));
        assert!(!PopularRule.matches(&popular, &off));
    }
}
