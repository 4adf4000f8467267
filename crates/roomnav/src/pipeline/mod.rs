//! End-to-end planning: forest → obstacles → mesh → graph → path.
//!
//! Purpose
//! - Run the stages in order, each on the previous stage's output, and hand
//!   back every intermediate for diagnostics.
//!
//! Design
//! - Stateless functions; the only cache is the caller-owned `PlanCache`.
//! - Each stage runs inside its own `tracing` span; stage modules log their
//!   counts at `debug`, the pipeline logs one summary at `info`.
//! - Stage errors propagate unchanged. `NavError::Unreachable` is the normal
//!   "no route" outcome and is not logged as a failure here.

mod cache;
mod types;

use tracing::{debug_span, info, instrument};

use crate::error::{NavError, NavResult, Stage};
use crate::geom2::{Point, Room};
use crate::mesh::{triangulate, MeshCfg};
use crate::navgraph::{build_graph, GraphCfg};
use crate::search::shortest_path;
use crate::select::{select_obstacles, ObstacleSet};

pub use cache::{Fingerprint, PlanCache};
pub use types::{Navigation, Plan, PlanRequest, PlannerCfg};

/// Room for a `width` x `height` image, or `InvalidGeometry`.
pub fn room(width: f64, height: f64) -> NavResult<Room> {
    Room::new(width, height).ok_or_else(|| {
        NavError::geometry(
            Stage::Triangulate,
            "room",
            format!("dimensions must be finite and positive, got {width} x {height}"),
        )
    })
}

/// Plan a route for `request`.
#[instrument(skip_all, fields(width = request.width, height = request.height))]
pub fn plan(request: &PlanRequest, cfg: &PlannerCfg) -> NavResult<Plan> {
    let room = room(request.width, request.height)?;
    let obstacles = select(request, &room, cfg)?;
    plan_with_obstacles(&room, obstacles, request.start, request.goal, cfg)
}

/// Plan a route around an obstacle set the caller already holds.
#[instrument(skip_all, fields(obstacles = obstacles.len()))]
pub fn plan_with_obstacles(
    room: &Room,
    obstacles: ObstacleSet,
    start: Point,
    goal: Point,
    cfg: &PlannerCfg,
) -> NavResult<Plan> {
    let nav = navigation(room, &obstacles, &cfg.mesh, &cfg.graph)?;
    finish(obstacles, nav, start, goal, cfg)
}

/// Like `plan`, reusing mesh and graph from `cache` when the selected
/// obstacles and configuration are bit-identical to an earlier request.
#[instrument(skip_all, fields(width = request.width, height = request.height))]
pub fn plan_cached(
    request: &PlanRequest,
    cfg: &PlannerCfg,
    cache: &mut PlanCache,
) -> NavResult<Plan> {
    let room = room(request.width, request.height)?;
    let obstacles = select(request, &room, cfg)?;
    let nav = cache.get_or_build(&room, &obstacles, &cfg.mesh, &cfg.graph)?;
    finish(obstacles, nav, request.start, request.goal, cfg)
}

/// Triangulate and build the graph without searching.
pub fn navigation(
    room: &Room,
    obstacles: &ObstacleSet,
    mesh_cfg: &MeshCfg,
    graph_cfg: &GraphCfg,
) -> NavResult<Navigation> {
    let mesh = {
        let _span = debug_span!("triangulate").entered();
        triangulate(room, obstacles, mesh_cfg)?
    };
    let graph = {
        let _span = debug_span!("graph", triangles = mesh.len()).entered();
        build_graph(&mesh, obstacles, graph_cfg)
    };
    Ok(Navigation {
        mesh: mesh.into(),
        graph: graph.into(),
    })
}

fn select(request: &PlanRequest, room: &Room, cfg: &PlannerCfg) -> NavResult<ObstacleSet> {
    let _span = debug_span!("select", contours = request.forest.len()).entered();
    select_obstacles(&request.forest, room.area(), &cfg.select)
}

fn finish(
    obstacles: ObstacleSet,
    nav: Navigation,
    start: Point,
    goal: Point,
    cfg: &PlannerCfg,
) -> NavResult<Plan> {
    let path = {
        let _span = debug_span!("search", nodes = nav.graph.len()).entered();
        shortest_path(&nav.graph, start, goal, &cfg.path)?
    };
    info!(
        obstacles = obstacles.len(),
        triangles = nav.mesh.len(),
        edges = nav.graph.num_edges(),
        waypoints = path.len(),
        length = path.length,
        "plan"
    );
    Ok(Plan {
        obstacles,
        mesh: nav.mesh,
        graph: nav.graph,
        path,
    })
}
