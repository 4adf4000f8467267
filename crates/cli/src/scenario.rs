//! Scenario files: room, contours (or explicit obstacles), endpoints and
//! optional configuration overrides, as JSON.

use anyhow::{anyhow, Context, Result};
use roomnav::contour::ContourForest;
use roomnav::geom2::{GeomCfg, Point, Polygon};
use roomnav::mesh::RefineCfg;
use roomnav::navgraph::Adjacency;
use roomnav::select::{LayerPolicy, ObstacleSet};
use roomnav::PlannerCfg;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Scenario {
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub contours: Vec<ContourSpec>,
    /// Explicit obstacle polygons; when present, contours are ignored.
    #[serde(default)]
    pub obstacles: Option<Vec<Vec<[f64; 2]>>>,
    pub start: [f64; 2],
    pub goal: [f64; 2],
    #[serde(default)]
    pub config: ConfigOverrides,
}

/// One traced contour with its `[next, previous, first_child, parent]` row.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ContourSpec {
    pub points: Vec<[f64; 2]>,
    pub hierarchy: [i32; 4],
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LayerSpec {
    FewestMembers,
    MostMembers,
    Depth(usize),
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AdjacencySpec {
    SharedVertexOrEdge,
    SharedEdge,
}

/// Optional overrides on top of `PlannerCfg::default()`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigOverrides {
    pub eps: Option<f64>,
    pub area_fraction: Option<f64>,
    pub layer: Option<LayerSpec>,
    pub steiner_spacing: Option<f64>,
    /// `false` meshes with the plain constrained triangulation.
    pub refine: Option<bool>,
    pub min_angle_deg: Option<f64>,
    pub adjacency: Option<AdjacencySpec>,
    pub include_endpoints: Option<bool>,
}

impl ConfigOverrides {
    pub fn apply(&self, mut cfg: PlannerCfg) -> PlannerCfg {
        if let Some(eps) = self.eps {
            cfg = cfg.with_geom(GeomCfg { eps });
        }
        if let Some(f) = self.area_fraction {
            cfg.select.area_fraction = f;
        }
        if let Some(layer) = self.layer {
            cfg.select.policy = match layer {
                LayerSpec::FewestMembers => LayerPolicy::FewestMembers,
                LayerSpec::MostMembers => LayerPolicy::MostMembers,
                LayerSpec::Depth(d) => LayerPolicy::Depth(d),
            };
        }
        if self.steiner_spacing.is_some() {
            cfg.mesh.steiner_spacing = self.steiner_spacing;
        }
        match self.refine {
            Some(false) => cfg.mesh.refine = None,
            Some(true) => {
                cfg.mesh.refine.get_or_insert_with(RefineCfg::default);
            }
            None => {}
        }
        if let (Some(deg), Some(r)) = (self.min_angle_deg, cfg.mesh.refine.as_mut()) {
            r.min_angle_deg = deg;
        }
        if let Some(adj) = self.adjacency {
            cfg.graph.adjacency = match adj {
                AdjacencySpec::SharedVertexOrEdge => Adjacency::SharedVertexOrEdge,
                AdjacencySpec::SharedEdge => Adjacency::SharedEdge,
            };
        }
        if let Some(b) = self.include_endpoints {
            cfg.path.include_endpoints = b;
        }
        cfg
    }
}

/// Where the obstacles come from.
pub enum Source {
    Forest(ContourForest),
    Obstacles(ObstacleSet),
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn start(&self) -> Point {
        Point::new(self.start[0], self.start[1])
    }

    pub fn goal(&self) -> Point {
        Point::new(self.goal[0], self.goal[1])
    }

    pub fn planner_cfg(&self) -> PlannerCfg {
        self.config.apply(PlannerCfg::default())
    }

    pub fn source(&self) -> Result<Source> {
        if let Some(polys) = &self.obstacles {
            let mut out = Vec::with_capacity(polys.len());
            for (i, pts) in polys.iter().enumerate() {
                let poly = Polygon::from_points(&points(pts)).ok_or_else(|| {
                    anyhow!("obstacle {i} needs at least 3 distinct finite vertices")
                })?;
                out.push(poly);
            }
            return Ok(Source::Obstacles(ObstacleSet::from_polygons(out)));
        }
        let polygons = self.contours.iter().map(|c| points(&c.points)).collect();
        let rows: Vec<[i32; 4]> = self.contours.iter().map(|c| c.hierarchy).collect();
        let forest = ContourForest::from_raw(polygons, &rows).context("building contour forest")?;
        Ok(Source::Forest(forest))
    }
}

fn points(raw: &[[f64; 2]]) -> Vec<Point> {
    raw.iter().map(|&[x, y]| Point::new(x, y)).collect()
}
