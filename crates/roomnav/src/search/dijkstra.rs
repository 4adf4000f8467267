//! Nearest-node lookup and Dijkstra over the navigation graph.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::debug;

use crate::error::{NavError, NavResult, Stage};
use crate::geom2::Point;
use crate::navgraph::{NavGraph, NodeId};

use super::types::{Path, PathCfg};

/// Node closest to `p` by linear scan; the lowest id wins ties.
pub fn nearest_node(graph: &NavGraph, p: Point) -> Option<NodeId> {
    let mut best: Option<(usize, f64)> = None;
    for (i, q) in graph.nodes.iter().enumerate() {
        let d = (q - p).norm_squared();
        if best.map_or(true, |(_, bd)| d < bd) {
            best = Some((i, d));
        }
    }
    best.map(|(i, _)| NodeId(i))
}

/// Shortest path between the nodes nearest to `start` and `goal`.
///
/// `Unreachable` when the two nodes lie in different components; an empty
/// graph or non-finite endpoints are `InvalidGeometry`.
pub fn shortest_path(
    graph: &NavGraph,
    start: Point,
    goal: Point,
    cfg: &PathCfg,
) -> NavResult<Path> {
    for (what, p) in [("start", start), ("goal", goal)] {
        if !(p.x.is_finite() && p.y.is_finite()) {
            return Err(NavError::geometry(
                Stage::Search,
                what,
                format!("coordinates must be finite, got ({}, {})", p.x, p.y),
            ));
        }
    }
    let (Some(s), Some(t)) = (nearest_node(graph, start), nearest_node(graph, goal)) else {
        return Err(NavError::geometry(
            Stage::Search,
            "graph",
            "navigation graph has no nodes",
        ));
    };

    let prev = dijkstra(graph, s, t).ok_or(NavError::Unreachable { start: s, goal: t })?;
    let mut nodes = vec![t];
    let mut cur = t;
    while cur != s {
        match prev[cur.0] {
            Some(p) => {
                nodes.push(p);
                cur = p;
            }
            None => return Err(NavError::Unreachable { start: s, goal: t }),
        }
    }
    nodes.reverse();

    let mut points: Vec<Point> = nodes.iter().map(|n| graph.nodes[n.0]).collect();
    if cfg.include_endpoints {
        points.insert(0, start);
        points.push(goal);
    }
    // fold from +0.0: an empty `sum` of f64 is -0.0
    let length = points
        .windows(2)
        .fold(0.0, |acc: f64, w| acc + (w[1] - w[0]).norm());
    debug!(
        start = s.0,
        goal = t.0,
        hops = nodes.len().saturating_sub(1),
        length,
        "shortest path"
    );
    Ok(Path {
        points,
        nodes,
        length,
    })
}

#[derive(Clone, Copy, Debug)]
struct Entry {
    cost: f64,
    node: usize,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    // Reversed so the max-heap pops the cheapest entry (then the lowest id).
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

/// Predecessor table of a search from `s` that stopped at `t`, or `None` when
/// `t` was never reached.
fn dijkstra(graph: &NavGraph, s: NodeId, t: NodeId) -> Option<Vec<Option<NodeId>>> {
    let n = graph.len();
    let mut dist = vec![f64::INFINITY; n];
    let mut prev: Vec<Option<NodeId>> = vec![None; n];
    let mut heap = BinaryHeap::new();
    dist[s.0] = 0.0;
    heap.push(Entry { cost: 0.0, node: s.0 });
    while let Some(Entry { cost, node }) = heap.pop() {
        if node == t.0 {
            return Some(prev);
        }
        if cost > dist[node] {
            continue;
        }
        for (next, w) in graph.neighbors(NodeId(node)) {
            let cand = cost + w;
            if cand < dist[next.0] {
                dist[next.0] = cand;
                prev[next.0] = Some(NodeId(node));
                heap.push(Entry {
                    cost: cand,
                    node: next.0,
                });
            }
        }
    }
    None
}
