//! Contour forest: the nested-polygon output of an image contour tracer.
//!
//! Purpose
//! - Replace parallel arrays of raw hierarchy indices with an arena of
//!   `ContourNode`s addressed by typed `ContourId`s.
//! - Reject inconsistent hierarchies up front (`MalformedHierarchy`) so the
//!   selector can walk parent links without guards.
//!
//! Raw format
//! - One `[next, previous, first_child, parent]` row per polygon, `-1` for
//!   "none" (tree-retrieval mode of common contour tracers).

mod build;
mod types;

pub use build::ForestBuilder;
pub use types::{ContourForest, ContourId, ContourNode, HierarchyLinks, NO_LINK};

#[cfg(test)]
mod tests;
