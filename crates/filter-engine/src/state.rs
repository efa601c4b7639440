//! Filter state: the three filter dimensions and the rules for changing them.
//!
//! The three dimensions are not independent when changed through
//! [`FilterState`]: any change to the popularity flag or to a category flag
//! switches both ownership flags off, while ownership changes leave the
//! other two dimensions alone. The resulting flags therefore depend on the
//! order in which actions were applied, not only on the last value chosen
//! for each flag.

use data_loader::{Category, Ownership};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

// =============================================================================
// OwnershipFilter
// =============================================================================

/// One independent flag per ownership tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnershipFilter {
    pub eh_property: bool,
    pub assoc_attraction: bool,
}

impl OwnershipFilter {
    pub const fn new(eh_property: bool, assoc_attraction: bool) -> Self {
        Self {
            eh_property,
            assoc_attraction,
        }
    }

    /// Both flags off.
    pub const fn none() -> Self {
        Self::new(false, false)
    }

    /// Both flags on.
    pub const fn all() -> Self {
        Self::new(true, true)
    }

    /// Flag for `ownership`. Unknown tags have no flag and are never allowed.
    pub fn allows(&self, ownership: &Ownership) -> bool {
        match ownership {
            Ownership::EhProperty => self.eh_property,
            Ownership::AssocAttraction => self.assoc_attraction,
            Ownership::Unknown(_) => false,
        }
    }

    /// Set the flag for `ownership`. Returns `false` for unknown tags,
    /// which have no flag to set.
    pub fn set(&mut self, ownership: &Ownership, value: bool) -> bool {
        match ownership {
            Ownership::EhProperty => self.eh_property = value,
            Ownership::AssocAttraction => self.assoc_attraction = value,
            Ownership::Unknown(_) => return false,
        }
        true
    }

    pub fn is_off(&self) -> bool {
        !self.eh_property && !self.assoc_attraction
    }
}

// =============================================================================
// CategoryFilter
// =============================================================================

/// Selection state for every [`Category`].
///
/// A freshly created filter holds an explicit `false` for each category.
/// Categories missing from the map (e.g. a filter built from an empty
/// iterator) read as unselected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CategoryFilter {
    selected: BTreeMap<Category, bool>,
}

impl CategoryFilter {
    /// Every category present and unselected.
    pub fn new() -> Self {
        Self {
            selected: Category::ALL.into_iter().map(|c| (c, false)).collect(),
        }
    }

    /// A filter with no entries at all; equivalent to nothing selected.
    pub fn empty() -> Self {
        Self {
            selected: BTreeMap::new(),
        }
    }

    pub fn set(&mut self, category: Category, value: bool) {
        self.selected.insert(category, value);
    }

    pub fn is_selected(&self, category: Category) -> bool {
        self.selected.get(&category).copied().unwrap_or(false)
    }

    /// Selected categories in declaration order.
    pub fn selected(&self) -> impl Iterator<Item = Category> + '_ {
        self.selected
            .iter()
            .filter(|(_, on)| **on)
            .map(|(category, _)| *category)
    }

    /// Labels of the selected categories, as matched against records.
    pub fn selected_labels(&self) -> Vec<&'static str> {
        self.selected().map(|c| c.label()).collect()
    }

    pub fn is_off(&self) -> bool {
        self.selected.values().all(|on| !on)
    }
}

impl Default for CategoryFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<Category> for CategoryFilter {
    /// Build a filter with exactly the given categories selected.
    fn from_iter<I: IntoIterator<Item = Category>>(iter: I) -> Self {
        let mut filter = Self::new();
        for category in iter {
            filter.set(category, true);
        }
        filter
    }
}

// =============================================================================
// FilterAction
// =============================================================================

/// One user change to one filter flag.
///
/// Parses from `NAME=VALUE`, where `NAME` is `ehProperty`,
/// `assocAttraction`, `popular` or `category:<id>` and `VALUE` is one of
/// `on`, `off`, `true`, `false`, `1`, `0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterAction {
    Ownership(Ownership, bool),
    Popular(bool),
    Category(Category, bool),
}

impl FromStr for FilterAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, value) = s
            .split_once('=')
            .ok_or_else(|| format!("expected NAME=VALUE, got '{s}'"))?;
        let value = parse_switch(value.trim())?;
        let name = name.trim();

        if let Some(category) = name.strip_prefix("category:") {
            return Ok(Self::Category(category.parse()?, value));
        }
        if name == "popular" {
            return Ok(Self::Popular(value));
        }

        match Ownership::from(name.to_string()) {
            Ownership::Unknown(_) => Err(format!("unknown filter '{name}'")),
            ownership => Ok(Self::Ownership(ownership, value)),
        }
    }
}

impl fmt::Display for FilterAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (name, value) = match self {
            Self::Ownership(ownership, value) => (ownership.to_string(), *value),
            Self::Popular(value) => ("popular".to_string(), *value),
            Self::Category(category, value) => (format!("category:{}", category.id()), *value),
        };
        write!(f, "{name}={}", if value { "on" } else { "off" })
    }
}

fn parse_switch(value: &str) -> Result<bool, String> {
    match value.to_ascii_lowercase().as_str() {
        "on" | "true" | "1" => Ok(true),
        "off" | "false" | "0" => Ok(false),
        _ => Err(format!("expected on/off, got '{value}'")),
    }
}

// =============================================================================
// FilterState
// =============================================================================

/// The current value of all three filter dimensions.
///
/// Fields are only reachable through the setters so that the ownership reset
/// cannot be bypassed. Use [`FilterState::from_parts`] to evaluate an
/// arbitrary combination directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    ownership: OwnershipFilter,
    popular: bool,
    categories: CategoryFilter,
}

impl FilterState {
    /// The state a fresh view starts in: both ownership flags on, popularity
    /// off, no categories selected.
    pub fn new() -> Self {
        Self {
            ownership: OwnershipFilter::all(),
            popular: false,
            categories: CategoryFilter::new(),
        }
    }

    pub fn from_parts(ownership: OwnershipFilter, popular: bool, categories: CategoryFilter) -> Self {
        Self {
            ownership,
            popular,
            categories,
        }
    }

    pub fn ownership(&self) -> OwnershipFilter {
        self.ownership
    }

    pub fn popular(&self) -> bool {
        self.popular
    }

    pub fn categories(&self) -> &CategoryFilter {
        &self.categories
    }

    /// True when no flag in any dimension is on.
    pub fn is_all_off(&self) -> bool {
        self.ownership.is_off() && !self.popular && self.categories.is_off()
    }

    /// Change one ownership flag. Other dimensions are untouched.
    pub fn set_ownership(&mut self, ownership: &Ownership, value: bool) {
        if self.ownership.set(ownership, value) {
            debug!("Ownership filter {} set to {}", ownership, value);
        } else {
            debug!("Ignoring ownership filter change for unknown tag '{}'", ownership);
        }
    }

    /// Change the popularity flag; switches both ownership flags off.
    pub fn set_popular(&mut self, value: bool) {
        self.ownership = OwnershipFilter::none();
        self.popular = value;
        debug!("Popular filter set to {}, ownership filter cleared", value);
    }

    /// Change one category flag; switches both ownership flags off.
    pub fn set_category(&mut self, category: Category, value: bool) {
        self.ownership = OwnershipFilter::none();
        self.categories.set(category, value);
        debug!("Category filter {} set to {}, ownership filter cleared", category.id(), value);
    }

    pub fn apply(&mut self, action: &FilterAction) {
        match action {
            FilterAction::Ownership(ownership, value) => self.set_ownership(ownership, *value),
            FilterAction::Popular(value) => self.set_popular(*value),
            FilterAction::Category(category, value) => self.set_category(*category, *value),
        }
    }
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new()
    }
}
