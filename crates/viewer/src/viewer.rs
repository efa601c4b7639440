//! # Map Viewer
//!
//! This module holds the state of one map view and coordinates:
//! 1. Fetching both attraction lists concurrently
//! 2. Storing the combined list once both fetches succeed
//! 3. Applying user filter changes
//! 4. Re-deriving visibility and markers from scratch on demand

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, info};

use data_loader::{Attraction, AttractionIndex, Category, IndexSummary, Ownership};
use filter_engine::{AnnotatedAttraction, FilterAction, FilterEngine, FilterState};
use sources::{AttractionSource, FileAttractionSource, HttpAttractionSource, SourceConfig};

use crate::markers::{IconSet, Marker, markers_for};

/// State container for one map view.
///
/// The attraction list starts empty and is replaced wholesale by
/// [`MapViewer::load`]. Filter changes go through the `on_*` handlers so
/// that the ownership reset on popularity/category changes always applies.
pub struct MapViewer {
    eh_properties: Arc<dyn AttractionSource>,
    assoc_attractions: Arc<dyn AttractionSource>,
    engine: Arc<FilterEngine>,
    icons: IconSet,
    index: AttractionIndex,
    filters: FilterState,
}

impl MapViewer {
    /// Create a viewer over two sources, with the standard filter engine,
    /// default icons and the initial filter state.
    pub fn new(
        eh_properties: Arc<dyn AttractionSource>,
        assoc_attractions: Arc<dyn AttractionSource>,
    ) -> Self {
        Self {
            eh_properties,
            assoc_attractions,
            engine: Arc::new(FilterEngine::standard()),
            icons: IconSet::default(),
            index: AttractionIndex::new(),
            filters: FilterState::new(),
        }
    }

    /// Viewer backed by the HTTP endpoints described by `config`.
    pub fn from_config(config: &SourceConfig) -> Result<Self> {
        let (eh, assoc) =
            HttpAttractionSource::pair(config).context("Failed to set up HTTP sources")?;
        info!("Using backend at {}", config.base_url);
        Ok(Self::new(Arc::new(eh), Arc::new(assoc)))
    }

    /// Viewer backed by the dump files in `data_dir`.
    pub fn from_data_dir(data_dir: &Path) -> Self {
        let (eh, assoc) = FileAttractionSource::pair(data_dir);
        info!("Using dump files in {}", data_dir.display());
        Self::new(Arc::new(eh), Arc::new(assoc))
    }

    pub fn with_engine(mut self, engine: FilterEngine) -> Self {
        self.engine = Arc::new(engine);
        self
    }

    pub fn with_icons(mut self, icons: IconSet) -> Self {
        self.icons = icons;
        self
    }

    /// Fetch both lists and store their concatenation.
    ///
    /// Both fetches run concurrently and must both succeed; if either fails
    /// the stored list is left as it was. Returns the number of records
    /// stored.
    pub async fn load(&mut self) -> Result<usize> {
        let start_time = Instant::now();

        let (eh_properties, assoc_attractions) = self.fetch_both().await?;
        info!(
            "Fetched {} EH properties and {} associated attractions",
            eh_properties.len(),
            assoc_attractions.len()
        );

        self.index = AttractionIndex::from_lists(eh_properties, assoc_attractions);

        info!(
            "Loaded {} attractions in {:.2?}",
            self.index.len(),
            start_time.elapsed()
        );
        Ok(self.index.len())
    }

    /// Run both fetches concurrently and wait for both.
    async fn fetch_both(&self) -> Result<(Vec<Attraction>, Vec<Attraction>)> {
        let (eh_result, assoc_result) = tokio::join!(
            self.eh_properties.fetch(),
            self.assoc_attractions.fetch()
        );

        let eh_properties = eh_result
            .with_context(|| format!("Failed to fetch {}", self.eh_properties.name()))?;
        let assoc_attractions = assoc_result
            .with_context(|| format!("Failed to fetch {}", self.assoc_attractions.name()))?;
        Ok((eh_properties, assoc_attractions))
    }

    /// All loaded records, visible or not.
    pub fn attractions(&self) -> &[Attraction] {
        self.index.attractions()
    }

    pub fn get(&self, id: &str) -> Option<&Attraction> {
        self.index.get(id)
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn on_ownership_change(&mut self, ownership: &Ownership, value: bool) {
        self.filters.set_ownership(ownership, value);
    }

    pub fn on_popular_change(&mut self, value: bool) {
        self.filters.set_popular(value);
    }

    pub fn on_category_change(&mut self, category: Category, value: bool) {
        self.filters.set_category(category, value);
    }

    /// Apply a single filter action.
    pub fn apply(&mut self, action: &FilterAction) {
        debug!("Applying filter action {}", action);
        self.filters.apply(action);
    }

    /// Apply filter actions in the order given.
    pub fn apply_all<'a>(&mut self, actions: impl IntoIterator<Item = &'a FilterAction>) {
        for action in actions {
            self.apply(action);
        }
    }

    /// Every loaded record annotated with its current visibility.
    pub fn filtered(&self) -> Vec<AnnotatedAttraction<'_>> {
        self.engine.apply(self.index.attractions(), &self.filters)
    }

    /// Visible records only, in list order.
    pub fn visible(&self) -> Vec<&Attraction> {
        self.filtered()
            .into_iter()
            .filter(|a| a.visible)
            .map(|a| a.attraction)
            .collect()
    }

    pub fn markers(&self) -> Vec<Marker> {
        markers_for(&self.filtered(), &self.icons)
    }

    /// Names of the rules that make `attraction` visible under the current
    /// filters.
    pub fn explain_record(&self, attraction: &Attraction) -> Vec<&str> {
        self.engine.explain(attraction, &self.filters)
    }

    /// Like [`MapViewer::explain_record`] for the first record with `id`.
    /// Ids can repeat across the two lists; use `explain_record` when
    /// walking [`MapViewer::filtered`].
    pub fn explain(&self, id: &str) -> Option<Vec<&str>> {
        let attraction = self.index.get(id)?;
        Some(self.explain_record(attraction))
    }

    pub fn summary(&self) -> IndexSummary {
        self.index.summary()
    }
}
