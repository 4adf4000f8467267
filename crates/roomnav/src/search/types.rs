//! Search configuration and result path.

use crate::geom2::Point;
use crate::navgraph::NodeId;

/// Path search configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PathCfg {
    /// Prepend the literal start and append the literal goal to the centroid
    /// sequence (and count those legs in `Path::length`).
    pub include_endpoints: bool,
}

/// Shortest route through the navigation graph.
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    /// Coordinates in travel order.
    pub points: Vec<Point>,
    /// Graph nodes visited, start node first.
    pub nodes: Vec<NodeId>,
    /// Total length of the polyline through `points`.
    pub length: f64,
}

impl Path {
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<Point> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<Point> {
        self.points.last().copied()
    }
}
