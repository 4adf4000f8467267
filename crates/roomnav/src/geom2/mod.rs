//! 2D geometry in image pixel space.
//!
//! Purpose
//! - Provide the value types (`Point`, `Polygon`, `Triangle`, `Room`) and the
//!   tolerance-aware predicates the mesh and graph stages depend on.
//! - Keep every predicate closed and distance-based so adjacency and visibility
//!   decisions agree near obstacle walls.
//!
//! Code cross-refs: `predicates::{segments_intersect, boundaries_intersect}`,
//! `hull::convex_hull`, `rand::draw_scene`.

mod hull;
mod predicates;
pub mod rand;
mod types;

pub use hull::{convex_hull, hull_polygon};
pub use predicates::{
    boundaries_intersect, on_ring_boundary, orient, point_in_ring, point_segment_distance,
    regions_intersect, segment_hits_ring, segments_intersect, shared_boundary_length, side,
    strictly_inside,
};
pub use types::{signed_area, Aabb, GeomCfg, Point, Polygon, Room, Triangle};

#[cfg(test)]
mod tests;
