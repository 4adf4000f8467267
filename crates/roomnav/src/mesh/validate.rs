//! Preconditions of the free-space triangulation.

use crate::error::{NavError, NavResult, Stage};
use crate::geom2::{regions_intersect, Room};
use crate::select::ObstacleSet;

/// Obstacles must be simple, non-degenerate, strictly inside the room and
/// pairwise separated (no touching, crossing or nesting).
pub fn validate_obstacles(room: &Room, obstacles: &ObstacleSet, eps: f64) -> NavResult<()> {
    let polys: Vec<_> = obstacles.polygons().collect();
    for (i, poly) in polys.iter().enumerate() {
        let subject = || format!("obstacle {i}");
        if poly.area() <= eps * eps {
            return Err(NavError::geometry(
                Stage::Triangulate,
                subject(),
                "polygon has zero area",
            ));
        }
        if let Some(p) = poly
            .vertices()
            .iter()
            .find(|&&p| !room.contains_strict(p, eps))
        {
            return Err(NavError::geometry(
                Stage::Triangulate,
                subject(),
                format!(
                    "vertex ({}, {}) touches or leaves the {}x{} room",
                    p.x, p.y, room.width, room.height
                ),
            ));
        }
        if !poly.is_simple(eps) {
            return Err(NavError::geometry(
                Stage::Triangulate,
                subject(),
                "polygon boundary intersects itself",
            ));
        }
    }
    let boxes: Vec<_> = polys.iter().map(|p| p.bbox()).collect();
    for i in 0..polys.len() {
        for j in (i + 1)..polys.len() {
            if !boxes[i].overlaps(&boxes[j], eps) {
                continue;
            }
            if regions_intersect(polys[i].vertices(), polys[j].vertices(), eps) {
                return Err(NavError::geometry(
                    Stage::Triangulate,
                    format!("obstacles {i} and {j}"),
                    "obstacles touch, overlap or nest",
                ));
            }
        }
    }
    Ok(())
}
