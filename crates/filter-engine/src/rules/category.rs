//! Rule for the category checkboxes.

use crate::traits::{FilterContext, VisibilityRule};
use data_loader::Attraction;

/// Matches records listing at least one selected category label.
///
/// Labels are compared exactly, so `"castle"` on a record does not match
/// the `Castle` category.
pub struct CategoryRule;

impl VisibilityRule for CategoryRule {
    fn name(&self) -> &str {
        "CategoryRule"
    }

    fn matches(&self, attraction: &Attraction, context: &FilterContext) -> bool {
        context
            .selected_labels
            .iter()
            .any(|label| attraction.has_category(label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{CategoryFilter, FilterState, OwnershipFilter};
    use data_loader::{Category, Ownership};

    fn context(categories: CategoryFilter) -> FilterContext {
        FilterContext::from_state(&FilterState::from_parts(OwnershipFilter::none(), false, categories))
    }

    #[test]
    fn test_category_rule() {
        let castle = Attraction::new("1", "Dover Castle", Ownership::EhProperty)
            .with_categories(["Castle", "Fort"]);
        let garden = Attraction::new("2", "Wrest Park", Ownership::EhProperty)
            .with_categories(["Garden", "Historic House"]);

        let ctx = context([Category::Fort, Category::Roman].into_iter().collect());
        assert!(CategoryRule.matches(&castle, &ctx));
        assert!(!CategoryRule.matches(&garden, &ctx));

        let ctx = context([Category::HistoricHouse].into_iter().collect());
        assert!(CategoryRule.matches(&garden, &ctx));
    }

    #[test]
    fn test_no_selection_matches_nothing() {
        let castle = Attraction::new("1", "Dover Castle", Ownership::EhProperty)
            .with_categories(["Castle"]);
        assert!(!CategoryRule.matches(&castle, &context(CategoryFilter::new())));
        assert!(!CategoryRule.matches(&castle, &context(CategoryFilter::empty())));
    }

    #[test]
    fn test_label_match_is_exact() {
        let lower = Attraction::new("1", "Odd Record", Ownership::EhProperty)
            .with_categories(["castle"]);
        let ctx = context([Category::Castle].into_iter().collect());
        assert!(!CategoryRule.matches(&lower, &ctx));
    }
}
