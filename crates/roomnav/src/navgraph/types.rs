//! Data types for the navigation graph.
//!
//! Kept small and explicit to make `build` easy to read.

use crate::error::{NavError, NavResult, Stage};
use crate::geom2::{GeomCfg, Point};

/// Node identifier (index of the source triangle in the mesh).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// Undirected edge between `a` and `b` with its Euclidean length.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NavEdge {
    pub a: NodeId,
    pub b: NodeId,
    pub weight: f64,
}

impl NavEdge {
    /// Endpoint opposite to `from`.
    #[inline]
    pub fn other(&self, from: NodeId) -> NodeId {
        if self.a == from {
            self.b
        } else {
            self.a
        }
    }
}

/// When do two triangles count as touching?
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Adjacency {
    /// Any shared boundary point, a single vertex included.
    #[default]
    SharedVertexOrEdge,
    /// A shared boundary segment of positive length.
    SharedEdge,
}

/// Graph builder configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GraphCfg {
    pub geom: GeomCfg,
    pub adjacency: Adjacency,
}

/// Undirected graph over triangle centroids.
///
/// Adjacency lists hold edge indices and are sorted by increasing weight, so
/// search visits short hops first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NavGraph {
    pub nodes: Vec<Point>,
    pub edges: Vec<NavEdge>,
    pub adj: Vec<Vec<usize>>, // edge indices incident to node k
}

impl NavGraph {
    /// Graph with the given node positions and no edges.
    pub fn with_nodes(nodes: Vec<Point>) -> Self {
        let adj = vec![Vec::new(); nodes.len()];
        Self {
            nodes,
            edges: Vec::new(),
            adj,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> Option<Point> {
        self.nodes.get(id.0).copied()
    }

    /// Neighbours of `id` with edge weights, shortest first.
    pub fn neighbors(&self, id: NodeId) -> impl Iterator<Item = (NodeId, f64)> + '_ {
        self.adj
            .get(id.0)
            .into_iter()
            .flatten()
            .map(move |&e| (self.edges[e].other(id), self.edges[e].weight))
    }

    pub fn contains_edge(&self, a: NodeId, b: NodeId) -> bool {
        self.neighbors(a).any(|(n, _)| n == b)
    }

    /// Add an edge after checking the graph invariants (no self-loops, no
    /// duplicates, finite non-negative weight, known endpoints).
    pub fn add_edge(&mut self, a: NodeId, b: NodeId, weight: f64) -> NavResult<usize> {
        let n = self.len();
        let reject = |reason: String| {
            Err(NavError::geometry(
                Stage::Graph,
                format!("edge {}-{}", a.0, b.0),
                reason,
            ))
        };
        if a.0 >= n || b.0 >= n {
            return reject(format!("endpoint out of range (graph has {n} nodes)"));
        }
        if a == b {
            return reject("self-loop".into());
        }
        if !(weight.is_finite() && weight >= 0.0) {
            return reject(format!("weight must be finite and non-negative, got {weight}"));
        }
        if self.contains_edge(a, b) {
            return reject("duplicate edge".into());
        }
        Ok(self.push_edge(a, b, weight))
    }

    /// Unchecked insert; callers guarantee the invariants `add_edge` checks.
    pub(super) fn push_edge(&mut self, a: NodeId, b: NodeId, weight: f64) -> usize {
        let idx = self.edges.len();
        self.edges.push(NavEdge { a, b, weight });
        for end in [a, b] {
            let list = &self.adj[end.0];
            let at = list.partition_point(|&e| self.edges[e].weight <= weight);
            self.adj[end.0].insert(at, idx);
        }
        idx
    }
}
