//! Free-space triangulation.
//!
//! Purpose
//! - Turn the room rectangle plus an obstacle set into a mesh of triangles that
//!   tiles exactly the free space (obstacles are holes).
//!
//! Design
//! - Preconditions are checked explicitly (`validate`) before any triangulation
//!   work so that failures name the offending obstacle.
//! - The triangulation itself is a constrained Delaunay triangulation from
//!   `spade`; hole faces are removed afterwards (`triangulate`).
//! - Delaunay quality refinement is on by default (`MeshCfg::refine`) so narrow
//!   passages are not left as slivers; `MeshCfg::plain()` switches it off.
//! - Optional interior Steiner grid for finer meshes (`MeshCfg::steiner_spacing`).

mod triangulate;
mod types;
mod validate;

pub use triangulate::triangulate;
pub use types::{Mesh, MeshCfg, RefineCfg, MAX_STEINER_POINTS};
pub use validate::validate_obstacles;

#[cfg(test)]
mod tests;
