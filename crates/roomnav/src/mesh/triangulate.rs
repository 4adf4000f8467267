//! Constrained Delaunay triangulation of the room with obstacle holes.

use spade::handles::FixedVertexHandle;
use spade::{
    AngleLimit, ConstrainedDelaunayTriangulation, Point2, RefinementParameters, Triangulation,
};
use tracing::debug;

use crate::error::{NavError, NavResult, Stage};
use crate::geom2::{on_ring_boundary, Point, Room, Triangle};
use crate::select::ObstacleSet;

use super::types::{Mesh, MeshCfg, RefineCfg, MAX_STEINER_POINTS};
use super::validate::validate_obstacles;

type Cdt = ConstrainedDelaunayTriangulation<Point2<f64>>;

/// Triangulate `room` minus `obstacles`.
///
/// Every ring edge (room and obstacles) is a constraint, so each face lies
/// entirely inside or outside every obstacle; faces whose centroid falls inside
/// an obstacle are the holes and are dropped. Refinement only splits
/// constraints into shorter constraints, so this holds for refined meshes too.
pub fn triangulate(room: &Room, obstacles: &ObstacleSet, cfg: &MeshCfg) -> NavResult<Mesh> {
    let eps = cfg.geom.eps;
    validate_obstacles(room, obstacles, eps)?;

    let mut cdt = Cdt::new();
    let corners = insert_ring(&mut cdt, &room.corners(), "room")?;
    constrain_ring(&mut cdt, &corners, "room")?;
    for (i, poly) in obstacles.polygons().enumerate() {
        let subject = format!("obstacle {i}");
        let ring = insert_ring(&mut cdt, poly.vertices(), &subject)?;
        constrain_ring(&mut cdt, &ring, &subject)?;
    }
    let mut steiner = 0usize;
    if let Some(spacing) = cfg.steiner_spacing {
        for p in steiner_points(room, obstacles, spacing)? {
            insert(&mut cdt, p, "steiner point")?;
            steiner += 1;
        }
    }
    let refined = match cfg.refine {
        Some(params) => refine(&mut cdt, room, &params)?,
        None => 0,
    };

    let holes: Vec<_> = obstacles.polygons().collect();
    let mut triangles = Vec::with_capacity(cdt.num_inner_faces());
    for face in cdt.inner_faces() {
        let [a, b, c] = face.vertices().map(|v| {
            let p = v.position();
            Point::new(p.x, p.y)
        });
        let tri = Triangle::new(a, b, c);
        let g = tri.centroid();
        if holes.iter().any(|h| h.contains(g)) {
            continue;
        }
        triangles.push(tri);
    }
    debug!(
        vertices = cdt.num_vertices(),
        steiner,
        refined,
        faces = cdt.num_inner_faces(),
        kept = triangles.len(),
        "free-space mesh"
    );
    Ok(Mesh {
        room: *room,
        triangles,
    })
}

fn insert(cdt: &mut Cdt, p: Point, subject: &str) -> NavResult<FixedVertexHandle> {
    cdt.insert(Point2::new(p.x, p.y)).map_err(|e| {
        NavError::geometry(
            Stage::Triangulate,
            subject,
            format!("cannot insert ({}, {}): {e:?}", p.x, p.y),
        )
    })
}

fn insert_ring(cdt: &mut Cdt, ring: &[Point], subject: &str) -> NavResult<Vec<FixedVertexHandle>> {
    ring.iter().map(|&p| insert(cdt, p, subject)).collect()
}

fn constrain_ring(cdt: &mut Cdt, ring: &[FixedVertexHandle], subject: &str) -> NavResult<()> {
    let n = ring.len();
    for k in 0..n {
        let (from, to) = (ring[k], ring[(k + 1) % n]);
        if from == to {
            return Err(NavError::geometry(
                Stage::Triangulate,
                subject,
                format!("edge {k} collapses onto an existing vertex"),
            ));
        }
        if !cdt.can_add_constraint(from, to) {
            return Err(NavError::geometry(
                Stage::Triangulate,
                subject,
                format!("edge {k} crosses an existing boundary"),
            ));
        }
        cdt.add_constraint(from, to);
    }
    Ok(())
}

/// Run spade's Ruppert refinement over the free space. Hole faces count as
/// outer faces and are never split for their own sake. Returns the number of
/// vertices added.
fn refine(cdt: &mut Cdt, room: &Room, params: &RefineCfg) -> NavResult<usize> {
    let RefineCfg {
        min_angle_deg,
        min_area_fraction,
        max_vertices,
    } = *params;
    if !(min_angle_deg > 0.0 && min_angle_deg <= 34.0) {
        return Err(config_error(format!(
            "refine.min_angle_deg must lie in (0, 34], got {min_angle_deg}"
        )));
    }
    if !(min_area_fraction.is_finite() && min_area_fraction >= 0.0) {
        return Err(config_error(format!(
            "refine.min_area_fraction must be finite and non-negative, got {min_area_fraction}"
        )));
    }
    let before = cdt.num_vertices();
    let result = cdt.refine(
        RefinementParameters::new()
            .exclude_outer_faces(true)
            .with_angle_limit(AngleLimit::from_deg(min_angle_deg))
            .with_min_required_area(min_area_fraction * room.area())
            .with_max_additional_vertices(max_vertices),
    );
    if !result.refinement_complete {
        debug!(max_vertices, "refinement stopped at its vertex cap");
    }
    Ok(cdt.num_vertices() - before)
}

fn config_error(reason: String) -> NavError {
    NavError::geometry(Stage::Triangulate, "config", reason)
}

/// Interior grid points at `spacing`, keeping at least half a spacing away from
/// walls and obstacle boundaries and outside every obstacle.
fn steiner_points(room: &Room, obstacles: &ObstacleSet, spacing: f64) -> NavResult<Vec<Point>> {
    if !(spacing.is_finite() && spacing > 0.0) {
        return Err(config_error(format!(
            "steiner_spacing must be positive, got {spacing}"
        )));
    }
    let (nx, ny) = ((room.width / spacing).floor(), (room.height / spacing).floor());
    if nx * ny > MAX_STEINER_POINTS as f64 {
        return Err(config_error(format!(
            "steiner_spacing {spacing} asks for a {nx}x{ny} grid (limit {MAX_STEINER_POINTS} points)"
        )));
    }
    let clearance = 0.5 * spacing;
    let mut out = Vec::new();
    for i in 1..=nx as usize {
        for j in 1..=ny as usize {
            let p = Point::new(i as f64 * spacing, j as f64 * spacing);
            if room.clearance(p) < clearance {
                continue;
            }
            let blocked = obstacles.polygons().any(|o| {
                (o.bbox().contains(p) && o.contains(p))
                    || on_ring_boundary(p, o.vertices(), clearance)
            });
            if !blocked {
                out.push(p);
            }
        }
    }
    Ok(out)
}
