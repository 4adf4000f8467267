//! Obstacle selection from a contour forest.
//!
//! Model
//! - Contours at least `area_fraction` of the room are background (walls, the
//!   floor outline) and are dropped.
//! - Survivors are grouped by nesting depth and one depth is taken as the
//!   obstacle layer. The default policy picks the depth with the fewest
//!   members: noisy depths (over- or under-segmented edges) tend to produce many
//!   spurious polygons. This is a heuristic, hence `LayerPolicy`.
//! - Each selected contour is replaced by its convex hull, which closes small
//!   concavities left by edge detection.

use std::collections::BTreeMap;

use tracing::debug;

use crate::contour::{ContourForest, ContourId};
use crate::error::{NavError, NavResult, Stage};
use crate::geom2::{hull_polygon, Polygon};

/// Which nesting depth becomes the obstacle layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LayerPolicy {
    /// Depth with the fewest surviving contours. Among equal counts the depth
    /// whose first contour appears latest in forest order wins.
    #[default]
    FewestMembers,
    /// Depth with the most surviving contours (same tie rule).
    MostMembers,
    /// A fixed depth (roots are depth 1); empty if nothing survives there.
    Depth(usize),
}

/// Selector configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SelectCfg {
    /// Contours with `area >= area_fraction * room_area` are discarded.
    pub area_fraction: f64,
    pub policy: LayerPolicy,
}

impl Default for SelectCfg {
    fn default() -> Self {
        Self {
            area_fraction: 0.05,
            policy: LayerPolicy::FewestMembers,
        }
    }
}

/// One obstacle footprint and, when it came from a forest, its source contour.
#[derive(Clone, Debug, PartialEq)]
pub struct Obstacle {
    pub polygon: Polygon,
    pub source: Option<ContourId>,
}

/// Authoritative obstacle set for one planning request.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObstacleSet {
    obstacles: Vec<Obstacle>,
    depth: Option<usize>,
}

impl ObstacleSet {
    /// Obstacles supplied directly by the caller (no forest, no depth).
    pub fn from_polygons(polygons: Vec<Polygon>) -> Self {
        Self {
            obstacles: polygons
                .into_iter()
                .map(|polygon| Obstacle {
                    polygon,
                    source: None,
                })
                .collect(),
            depth: None,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Obstacle> {
        self.obstacles.iter()
    }

    pub fn polygons(&self) -> impl Iterator<Item = &Polygon> {
        self.obstacles.iter().map(|o| &o.polygon)
    }

    /// Selected nesting depth, if the set came from a forest.
    #[inline]
    pub fn depth(&self) -> Option<usize> {
        self.depth
    }

    pub fn total_area(&self) -> f64 {
        self.polygons().map(Polygon::area).sum()
    }
}

/// Select the obstacle layer from `forest`.
///
/// An empty forest, or no survivors, yields an empty set rather than an error.
pub fn select_obstacles(
    forest: &ContourForest,
    room_area: f64,
    cfg: &SelectCfg,
) -> NavResult<ObstacleSet> {
    if !(room_area.is_finite() && room_area > 0.0) {
        return Err(NavError::geometry(
            Stage::Select,
            "room",
            format!("room area must be finite and positive, got {room_area}"),
        ));
    }
    if !(cfg.area_fraction.is_finite() && cfg.area_fraction > 0.0) {
        return Err(NavError::geometry(
            Stage::Select,
            "config",
            format!("area_fraction must be positive, got {}", cfg.area_fraction),
        ));
    }
    let limit = cfg.area_fraction * room_area;

    // depth -> (first appearance rank, members in forest order)
    let mut layers: BTreeMap<usize, (usize, Vec<ContourId>)> = BTreeMap::new();
    let mut survivors = 0usize;
    for (id, node) in forest.iter() {
        if node.polygon.area() >= limit {
            continue;
        }
        let depth = forest.depth(id);
        let rank = layers.len();
        layers.entry(depth).or_insert((rank, Vec::new())).1.push(id);
        survivors += 1;
    }

    let chosen = pick_layer(&layers, cfg.policy);
    debug!(
        candidates = forest.len(),
        survivors,
        depths = layers.len(),
        chosen = ?chosen,
        "obstacle layer"
    );
    let Some(depth) = chosen else {
        return Ok(ObstacleSet::default());
    };

    let members = layers.get(&depth).map(|(_, m)| m.as_slice()).unwrap_or(&[]);
    let mut obstacles = Vec::with_capacity(members.len());
    for &id in members {
        let Some(node) = forest.get(id) else { continue };
        let polygon = hull_polygon(&node.polygon).ok_or_else(|| {
            NavError::geometry(
                Stage::Select,
                format!("contour {}", id.0),
                "convex hull is degenerate (collinear vertices)",
            )
        })?;
        obstacles.push(Obstacle {
            polygon,
            source: Some(id),
        });
    }
    Ok(ObstacleSet {
        obstacles,
        depth: Some(depth),
    })
}

fn pick_layer(
    layers: &BTreeMap<usize, (usize, Vec<ContourId>)>,
    policy: LayerPolicy,
) -> Option<usize> {
    // Visit depths in first-appearance order so later ones win ties.
    let mut order: Vec<(usize, usize, usize)> = layers
        .iter()
        .map(|(&depth, (rank, members))| (*rank, depth, members.len()))
        .collect();
    order.sort_unstable();
    match policy {
        LayerPolicy::Depth(d) => layers.contains_key(&d).then_some(d),
        LayerPolicy::FewestMembers => {
            let mut best: Option<(usize, usize)> = None;
            for (_, depth, count) in order {
                if best.map_or(true, |(_, c)| count <= c) {
                    best = Some((depth, count));
                }
            }
            best.map(|(d, _)| d)
        }
        LayerPolicy::MostMembers => {
            let mut best: Option<(usize, usize)> = None;
            for (_, depth, count) in order {
                if best.map_or(true, |(_, c)| count >= c) {
                    best = Some((depth, count));
                }
            }
            best.map(|(d, _)| d)
        }
    }
}
