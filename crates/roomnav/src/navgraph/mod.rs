//! Navigation graph over triangle centroids.
//!
//! Purpose
//! - One node per mesh triangle (its centroid); an undirected edge joins two
//!   triangles that touch and whose centroid segment stays clear of every
//!   obstacle boundary. Weights are Euclidean lengths.
//!
//! Design
//! - Node list, edge list and per-node adjacency lists of edge indices, with
//!   adjacency sorted by weight.
//! - `NavGraph::add_edge` checks the invariants for hand-built graphs; the
//!   builder inserts edges it has already vetted.

mod build;
mod types;

pub use build::build_graph;
pub use types::{Adjacency, GraphCfg, NavEdge, NavGraph, NodeId};
