//! AttractionIndex: the combined, in-memory attraction list.
//!
//! The index owns the concatenation of both backend lists (EH properties
//! first, then associated attractions) and an id lookup on top of it.
//! Nothing here is persisted; an index is rebuilt from scratch on every load.

use crate::error::Result;
use crate::parser;
use crate::types::{Attraction, Category, Ownership};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::{info, warn};

/// File holding the EH property dump inside a data directory.
pub const EH_PROPERTIES_FILE: &str = "ehproperties.json";
/// File holding the associated attraction dump inside a data directory.
pub const ASSOC_ATTRACTIONS_FILE: &str = "assocattractions.json";

/// Combined attraction list with an id lookup.
#[derive(Debug, Clone, Default)]
pub struct AttractionIndex {
    attractions: Vec<Attraction>,
    /// Position of the first record with each id.
    by_id: HashMap<String, usize>,
}

/// Record counts, used for summaries and logging.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexSummary {
    pub total: usize,
    pub by_ownership: BTreeMap<String, usize>,
    pub popular: usize,
    pub by_category: BTreeMap<Category, usize>,
}

impl AttractionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the combined list from the two backend lists.
    pub fn from_lists(eh_properties: Vec<Attraction>, assoc_attractions: Vec<Attraction>) -> Self {
        let mut index = Self::new();
        for attraction in eh_properties.into_iter().chain(assoc_attractions) {
            index.insert(attraction);
        }
        index
    }

    /// Load both dump files from `data_dir`.
    ///
    /// The two files are parsed in parallel; the index is only built once
    /// both have been parsed successfully.
    pub fn load_from_files(data_dir: &Path) -> Result<Self> {
        let eh_path = data_dir.join(EH_PROPERTIES_FILE);
        let assoc_path = data_dir.join(ASSOC_ATTRACTIONS_FILE);

        let (eh_properties, assoc_attractions) = rayon::join(
            || parser::parse_attraction_file(&eh_path),
            || parser::parse_attraction_file(&assoc_path),
        );
        let eh_properties = eh_properties?;
        let assoc_attractions = assoc_attractions?;

        info!(
            "Loaded {} EH properties and {} associated attractions from {}",
            eh_properties.len(),
            assoc_attractions.len(),
            data_dir.display()
        );

        Ok(Self::from_lists(eh_properties, assoc_attractions))
    }

    /// Append one record.
    pub fn insert(&mut self, attraction: Attraction) {
        if !attraction.ownership.is_known() {
            warn!(
                "Attraction {} has unrecognised ownership '{}'",
                attraction.id, attraction.ownership
            );
        }

        let position = self.attractions.len();
        if self.by_id.contains_key(&attraction.id) {
            warn!("Duplicate attraction id {}; lookups keep the first", attraction.id);
        } else {
            self.by_id.insert(attraction.id.clone(), position);
        }
        self.attractions.push(attraction);
    }

    pub fn get(&self, id: &str) -> Option<&Attraction> {
        self.by_id.get(id).map(|&i| &self.attractions[i])
    }

    /// All records in load order.
    pub fn attractions(&self) -> &[Attraction] {
        &self.attractions
    }

    pub fn len(&self) -> usize {
        self.attractions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attractions.is_empty()
    }

    /// Records with the given ownership tag.
    pub fn with_ownership<'a>(
        &'a self,
        ownership: &'a Ownership,
    ) -> impl Iterator<Item = &'a Attraction> + 'a {
        self.attractions
            .iter()
            .filter(move |a| &a.ownership == ownership)
    }

    pub fn summary(&self) -> IndexSummary {
        let mut summary = IndexSummary {
            total: self.attractions.len(),
            ..Default::default()
        };

        for attraction in &self.attractions {
            *summary
                .by_ownership
                .entry(attraction.ownership.to_string())
                .or_insert(0) += 1;
            if attraction.popular {
                summary.popular += 1;
            }
            for category in Category::ALL {
                if attraction.has_category(category.label()) {
                    *summary.by_category.entry(category).or_insert(0) += 1;
                }
            }
        }

        summary
    }
}
