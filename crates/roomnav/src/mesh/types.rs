//! Mesh value type and triangulator configuration.

use crate::geom2::{GeomCfg, Room, Triangle};

/// Largest interior Steiner grid accepted, in points.
pub const MAX_STEINER_POINTS: usize = 1 << 20;

/// Delaunay quality refinement.
///
/// A plain constrained triangulation of a narrow corridor is a fan of long
/// slivers whose centroid links leave the corridor; refinement keeps every
/// triangle close to equilateral so neighbouring centroids see each other.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RefineCfg {
    /// Smallest interior angle to aim for, in degrees (at most 34).
    pub min_angle_deg: f64,
    /// Triangles smaller than this fraction of the room area are left alone.
    pub min_area_fraction: f64,
    /// Cap on inserted vertices; refinement stops early when it is reached.
    pub max_vertices: usize,
}

impl Default for RefineCfg {
    fn default() -> Self {
        Self {
            min_angle_deg: 25.0,
            min_area_fraction: 1e-6,
            max_vertices: 20_000,
        }
    }
}

/// Triangulator configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshCfg {
    pub geom: GeomCfg,
    /// Quality refinement after all constraints are in; `None` keeps the
    /// plain constrained Delaunay triangulation.
    pub refine: Option<RefineCfg>,
    /// Spacing of an optional interior Steiner grid.
    pub steiner_spacing: Option<f64>,
}

impl MeshCfg {
    /// Plain constrained Delaunay triangulation: no grid, no refinement.
    pub fn plain() -> Self {
        Self {
            refine: None,
            ..Self::default()
        }
    }
}

impl Default for MeshCfg {
    fn default() -> Self {
        Self {
            geom: GeomCfg::default(),
            refine: Some(RefineCfg::default()),
            steiner_spacing: None,
        }
    }
}

/// Triangles tiling the room minus the obstacles.
///
/// Invariants:
/// - interiors are pairwise disjoint;
/// - the union is exactly the free space of `room`.
///
/// Triangle order carries no meaning.
#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    pub room: Room,
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    #[inline]
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Triangle> {
        self.triangles.iter()
    }

    /// Total covered area.
    pub fn area(&self) -> f64 {
        self.triangles.iter().map(Triangle::area).sum()
    }
}
