//! The FilterEngine evaluates the visibility rules over an attraction list.
//!
//! Every record comes back annotated with a `visible` flag; nothing is
//! removed and the records themselves are borrowed, not copied. The whole
//! list is re-derived on each call.

use crate::rules::{AllFiltersOffRule, CategoryRule, OwnershipRule, PopularRule};
use crate::state::{CategoryFilter, FilterState, OwnershipFilter};
use crate::traits::{FilterContext, VisibilityRule};
use data_loader::{Attraction, Ownership};
use serde::Serialize;

/// An attraction plus its derived visibility.
///
/// Serializes as the attraction's own fields with `visible` added.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotatedAttraction<'a> {
    #[serde(flatten)]
    pub attraction: &'a Attraction,
    pub visible: bool,
}

/// OR-combination of visibility rules.
///
/// ## Usage
/// ```ignore
/// let engine = FilterEngine::standard();
/// let annotated = engine.apply(index.attractions(), &state);
/// ```
pub struct FilterEngine {
    rules: Vec<Box<dyn VisibilityRule>>,
}

impl FilterEngine {
    /// Create an engine with no rules; it marks every record hidden.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// The four clauses of the viewer's predicate: the all-off default, one
    /// ownership rule per known tag, popularity, and categories.
    pub fn standard() -> Self {
        Ownership::KNOWN
            .into_iter()
            .fold(Self::new().add_rule(AllFiltersOffRule), |engine, ownership| {
                engine.add_rule(OwnershipRule::new(ownership))
            })
            .add_rule(PopularRule)
            .add_rule(CategoryRule)
    }

    /// Add a rule to the engine (builder pattern).
    pub fn add_rule(mut self, rule: impl VisibilityRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Annotate every attraction with its visibility under `state`.
    pub fn apply<'a>(
        &self,
        attractions: &'a [Attraction],
        state: &FilterState,
    ) -> Vec<AnnotatedAttraction<'a>> {
        let context = FilterContext::from_state(state);
        let annotated: Vec<AnnotatedAttraction<'a>> = attractions
            .iter()
            .map(|attraction| AnnotatedAttraction {
                attraction,
                visible: self.is_visible(attraction, &context),
            })
            .collect();

        tracing::debug!(
            "Evaluated {} rules over {} attractions ({} visible)",
            self.rules.len(),
            annotated.len(),
            annotated.iter().filter(|a| a.visible).count()
        );
        annotated
    }

    /// Whether any rule matches.
    pub fn is_visible(&self, attraction: &Attraction, context: &FilterContext) -> bool {
        self.rules.iter().any(|rule| rule.matches(attraction, context))
    }

    /// Names of every rule that matches `attraction`; empty means hidden.
    pub fn explain(&self, attraction: &Attraction, state: &FilterState) -> Vec<&str> {
        let context = FilterContext::from_state(state);
        self.rules
            .iter()
            .filter(|rule| rule.matches(attraction, &context))
            .map(|rule| rule.name())
            .collect()
    }

    pub fn visible_count(&self, attractions: &[Attraction], state: &FilterState) -> usize {
        let context = FilterContext::from_state(state);
        attractions
            .iter()
            .filter(|a| self.is_visible(a, &context))
            .count()
    }
}

impl Default for FilterEngine {
    fn default() -> Self {
        Self::standard()
    }
}

/// Annotate `attractions` with the standard predicate for the given filter
/// values, without going through [`FilterState`]'s setters.
pub fn filter<'a>(
    attractions: &'a [Attraction],
    ownership: &OwnershipFilter,
    popular: bool,
    categories: &CategoryFilter,
) -> Vec<AnnotatedAttraction<'a>> {
    let state = FilterState::from_parts(*ownership, popular, categories.clone());
    FilterEngine::standard().apply(attractions, &state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::Category;

    fn visibility(annotated: &[AnnotatedAttraction<'_>]) -> Vec<bool> {
        annotated.iter().map(|a| a.visible).collect()
    }

    #[test]
    fn test_empty_engine_hides_everything() {
        let attractions = vec![Attraction::new("1", "Anything", Ownership::EhProperty)];
        let annotated = FilterEngine::new().apply(&attractions, &FilterState::new());
        assert_eq!(visibility(&annotated), vec![false]);
    }

    #[test]
    fn test_standard_rule_order() {
        assert_eq!(
            FilterEngine::standard().rule_names(),
            vec![
                "AllFiltersOffRule",
                "OwnershipRule(ehProperty)",
                "OwnershipRule(assocAttraction)",
                "PopularRule",
                "CategoryRule",
            ]
        );
    }

    #[test]
    fn test_popular_only_scenario() {
        let attractions = vec![
            Attraction::new("1", "Castle", Ownership::EhProperty).with_categories(["Castle"]),
            Attraction::new("2", "Garden", Ownership::AssocAttraction)
                .with_popular(true)
                .with_categories(["Garden"]),
        ];

        let annotated = filter(&attractions, &OwnershipFilter::none(), true, &CategoryFilter::empty());
        assert_eq!(visibility(&annotated), vec![false, true]);
    }

    #[test]
    fn test_annotation_borrows_records_in_order() {
        let attractions = vec![
            Attraction::new("a", "First", Ownership::EhProperty),
            Attraction::new("b", "Second", Ownership::AssocAttraction),
        ];
        let annotated = FilterEngine::standard().apply(&attractions, &FilterState::new());

        assert_eq!(annotated.len(), 2);
        assert!(std::ptr::eq(annotated[0].attraction, &attractions[0]));
        assert_eq!(annotated[1].attraction.id, "b");
    }

    #[test]
    fn test_explain_lists_matching_rules() {
        let attraction = Attraction::new("1", "Stonehenge", Ownership::EhProperty)
            .with_popular(true)
            .with_categories(["Prehistoric"]);

        let mut state = FilterState::new();
        state.set_popular(true);
        state.set_category(Category::Prehistoric, true);
        state.set_ownership(&Ownership::EhProperty, true);

        let engine = FilterEngine::standard();
        assert_eq!(
            engine.explain(&attraction, &state),
            vec!["OwnershipRule(ehProperty)", "PopularRule", "CategoryRule"]
        );
    }

    #[test]
    fn test_visible_count() {
        let attractions = vec![
            Attraction::new("1", "A", Ownership::EhProperty),
            Attraction::new("2", "B", Ownership::AssocAttraction),
            Attraction::new("3", "C", Ownership::Unknown("other".into())),
        ];
        let engine = FilterEngine::standard();

        assert_eq!(engine.visible_count(&attractions, &FilterState::new()), 2);

        let off = FilterState::from_parts(OwnershipFilter::none(), false, CategoryFilter::new());
        assert_eq!(engine.visible_count(&attractions, &off), 3);
    }

    #[test]
    fn test_annotated_serializes_flat() {
        let attraction = Attraction::new("9", "Tintagel", Ownership::EhProperty);
        let annotated = AnnotatedAttraction {
            attraction: &attraction,
            visible: true,
        };

        let value = serde_json::to_value(&annotated).unwrap();
        assert_eq!(value["id"], "9");
        assert_eq!(value["ownership"], "ehProperty");
        assert_eq!(value["visible"], true);
    }
}
