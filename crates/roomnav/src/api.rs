//! Flat re-export surface for callers that want one import path.
//!
//! Not a stability boundary: names follow the modules they come from.

// Geometry
pub use crate::geom2::{
    convex_hull, hull_polygon, regions_intersect, segments_intersect, Aabb, GeomCfg, Point,
    Polygon, Room, Triangle,
};
// Random scenes
pub use crate::geom2::rand::{draw_scene, ReplayToken as SceneReplay, Scene, SceneCfg};
// Contours and selection
pub use crate::contour::{ContourForest, ContourId, ContourNode, ForestBuilder, HierarchyLinks};
pub use crate::select::{select_obstacles, LayerPolicy, Obstacle, ObstacleSet, SelectCfg};
// Mesh, graph, search
pub use crate::mesh::{triangulate, validate_obstacles, Mesh, MeshCfg, RefineCfg};
pub use crate::navgraph::{build_graph, Adjacency, GraphCfg, NavEdge, NavGraph, NodeId};
pub use crate::search::{nearest_node, shortest_path, Path, PathCfg};
// Pipeline
pub use crate::pipeline::{
    navigation, plan, plan_cached, plan_with_obstacles, room, Fingerprint, Navigation, Plan,
    PlanCache, PlanRequest, PlannerCfg,
};
pub use crate::error::{NavError, NavResult, Stage};
