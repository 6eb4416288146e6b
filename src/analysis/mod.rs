//! Analysis modules.
//!
//! Turns a flat issue list into the per-instance project/tracker/status tree.

pub mod aggregator;
pub mod ordered_map;

pub use aggregator::*;
pub use ordered_map::OrderedMap;
