//! Request, configuration and result types of the planning pipeline.

use std::sync::Arc;

use crate::contour::ContourForest;
use crate::geom2::{GeomCfg, Point};
use crate::mesh::{Mesh, MeshCfg};
use crate::navgraph::{GraphCfg, NavGraph};
use crate::search::{Path, PathCfg};
use crate::select::{ObstacleSet, SelectCfg};

/// Per-stage configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PlannerCfg {
    pub select: SelectCfg,
    pub mesh: MeshCfg,
    pub graph: GraphCfg,
    pub path: PathCfg,
}

impl PlannerCfg {
    /// Use one tolerance for every geometric stage.
    pub fn with_geom(mut self, geom: GeomCfg) -> Self {
        self.mesh.geom = geom;
        self.graph.geom = geom;
        self
    }
}

/// One planning request: a room of `width` x `height` pixels, the contour
/// forest traced from its image, and the two endpoints.
#[derive(Clone, Debug, PartialEq)]
pub struct PlanRequest {
    pub width: f64,
    pub height: f64,
    pub forest: ContourForest,
    pub start: Point,
    pub goal: Point,
}

/// Mesh and graph for one (room, obstacles, config) combination. Shared so a
/// `PlanCache` hit costs two reference-count bumps.
#[derive(Clone, Debug)]
pub struct Navigation {
    pub mesh: Arc<Mesh>,
    pub graph: Arc<NavGraph>,
}

/// Everything a planning request produced.
#[derive(Clone, Debug)]
pub struct Plan {
    pub obstacles: ObstacleSet,
    pub mesh: Arc<Mesh>,
    pub graph: Arc<NavGraph>,
    pub path: Path,
}
