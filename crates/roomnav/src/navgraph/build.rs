//! Graph construction over mesh centroids.

use tracing::debug;

use crate::geom2::{
    boundaries_intersect, regions_intersect, segment_hits_ring, shared_boundary_length, Aabb,
    Point, Triangle,
};
use crate::mesh::Mesh;
use crate::select::ObstacleSet;

use super::types::{Adjacency, GraphCfg, NavGraph, NodeId};

/// Build the navigation graph (one node per triangle at its centroid).
///
/// A pair of triangles becomes an edge when they touch (per `cfg.adjacency`)
/// and the straight segment between their centroids meets no obstacle edge.
/// Candidate pairs come from a sweep over bounding boxes sorted by their left
/// edge; only pairs whose boxes overlap get the exact tests.
pub fn build_graph(mesh: &Mesh, obstacles: &ObstacleSet, cfg: &GraphCfg) -> NavGraph {
    let eps = cfg.geom.eps;
    let rings: Vec<[Point; 3]> = mesh.iter().map(Triangle::ring).collect();
    let boxes: Vec<Aabb> = mesh.iter().map(Triangle::bbox).collect();
    let walls: Vec<(&[Point], Aabb)> = obstacles
        .polygons()
        .map(|o| (o.vertices(), o.bbox()))
        .collect();
    let mut graph = NavGraph::with_nodes(mesh.iter().map(Triangle::centroid).collect());

    let mut touching = 0usize;
    let mut blocked = 0usize;
    let mut order: Vec<usize> = (0..rings.len()).collect();
    order.sort_by(|&a, &b| boxes[a].min.x.total_cmp(&boxes[b].min.x));
    for (k, &i) in order.iter().enumerate() {
        for &j in &order[k + 1..] {
            if boxes[j].min.x > boxes[i].max.x + eps {
                break;
            }
            if !boxes[i].overlaps(&boxes[j], eps) {
                continue;
            }
            if !touches(&rings[i], &rings[j], cfg.adjacency, eps) {
                continue;
            }
            touching += 1;
            let (p, q) = (graph.nodes[i], graph.nodes[j]);
            let seg = Aabb {
                min: p.inf(&q),
                max: p.sup(&q),
            };
            let crosses = walls
                .iter()
                .any(|(ring, bb)| seg.overlaps(bb, eps) && segment_hits_ring(p, q, ring, eps));
            if crosses {
                blocked += 1;
                continue;
            }
            let (a, b) = (i.min(j), i.max(j));
            graph.push_edge(NodeId(a), NodeId(b), (q - p).norm());
        }
    }
    debug!(
        nodes = graph.len(),
        touching,
        blocked,
        edges = graph.num_edges(),
        "navigation graph"
    );
    graph
}

fn touches(a: &[Point; 3], b: &[Point; 3], adjacency: Adjacency, eps: f64) -> bool {
    if !(regions_intersect(a, b, eps) && boundaries_intersect(a, b, eps)) {
        return false;
    }
    match adjacency {
        Adjacency::SharedVertexOrEdge => true,
        Adjacency::SharedEdge => shared_boundary_length(a, b, eps) > eps,
    }
}
