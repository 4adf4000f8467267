//! Room navigation planner.
//!
//! Turns the traced contours of a top-down room image into a walkable route:
//! obstacle selection (`select`), free-space triangulation (`mesh`), centroid
//! graph (`navgraph`) and Dijkstra search (`search`), wired by `pipeline`.
//!
//! API Policy
//! - Library-first; the `cli` crate is a thin shell over `pipeline`.
//! - `api` is a flat convenience surface; module paths remain the reference.

pub mod api;
pub mod contour;
pub mod error;
pub mod geom2;
pub mod mesh;
pub mod navgraph;
pub mod pipeline;
pub mod search;
pub mod select;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{NavError, NavResult, Stage};
pub use geom2::{GeomCfg, Point};
pub use pipeline::{plan, plan_cached, plan_with_obstacles, Plan, PlanCache, PlanRequest, PlannerCfg};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::contour::{ContourForest, ContourId, ForestBuilder};
    pub use crate::error::{NavError, NavResult};
    pub use crate::geom2::{GeomCfg, Point, Polygon, Room};
    pub use crate::pipeline::{plan, plan_with_obstacles, Plan, PlanRequest, PlannerCfg};
    pub use crate::search::{Path, PathCfg};
    pub use crate::select::{LayerPolicy, ObstacleSet, SelectCfg};
    pub use nalgebra::Vector2 as Vec2;
}
