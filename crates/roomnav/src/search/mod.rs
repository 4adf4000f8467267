//! Shortest path search on the navigation graph.
//!
//! Start and goal snap to their nearest nodes; Dijkstra with a binary heap
//! finds a minimum-weight route between them. A goal in another component is
//! reported as `NavError::Unreachable`, an ordinary outcome for callers.

mod dijkstra;
mod types;

pub use dijkstra::{nearest_node, shortest_path};
pub use types::{Path, PathCfg};
