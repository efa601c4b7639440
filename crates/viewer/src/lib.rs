//! Map viewer for the heritage map.
//!
//! This crate holds the view state that ties the two attraction sources,
//! the filter state and the filter engine together, and turns the visible
//! records into map markers.

pub mod markers;
pub mod viewer;

pub use markers::{IconSet, Marker, markers_for};
pub use viewer::MapViewer;
