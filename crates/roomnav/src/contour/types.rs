//! Data types for the contour forest.
//!
//! Kept small and explicit; construction and validation live in `build`.

use crate::geom2::Polygon;

/// Identifier of a contour inside its forest (arena index).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContourId(pub usize);

/// Sentinel used by raw hierarchy rows for "no link".
pub const NO_LINK: i32 = -1;

/// Hierarchy links of one contour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HierarchyLinks {
    pub next: Option<ContourId>,
    pub prev: Option<ContourId>,
    pub first_child: Option<ContourId>,
    pub parent: Option<ContourId>,
}

/// A traced contour plus its position in the hierarchy.
#[derive(Clone, Debug, PartialEq)]
pub struct ContourNode {
    pub polygon: Polygon,
    pub links: HierarchyLinks,
}

/// Validated forest of contours.
///
/// Invariants (checked at construction):
/// - every link targets an existing node, never the node itself;
/// - sibling links are mutual and siblings share a parent;
/// - a node's children are exactly the chain starting at its first child;
/// - parent chains are acyclic.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContourForest {
    pub(super) nodes: Vec<ContourNode>,
}

impl ContourForest {
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn get(&self, id: ContourId) -> Option<&ContourNode> {
        self.nodes.get(id.0)
    }

    /// Nodes in input order.
    pub fn iter(&self) -> impl Iterator<Item = (ContourId, &ContourNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (ContourId(i), n))
    }

    pub fn roots(&self) -> impl Iterator<Item = ContourId> + '_ {
        self.iter()
            .filter(|(_, n)| n.links.parent.is_none())
            .map(|(id, _)| id)
    }

    /// Direct children of `id` in sibling order.
    pub fn children(&self, id: ContourId) -> Vec<ContourId> {
        let mut out = Vec::new();
        let mut cur = self.get(id).and_then(|n| n.links.first_child);
        while let Some(c) = cur {
            if out.len() >= self.nodes.len() {
                break;
            }
            out.push(c);
            cur = self.nodes[c.0].links.next;
        }
        out
    }

    /// Nesting depth: hops to the root, with roots at depth 1.
    pub fn depth(&self, id: ContourId) -> usize {
        let mut depth = 1;
        let mut cur = id;
        while let Some(p) = self.get(cur).and_then(|n| n.links.parent) {
            depth += 1;
            cur = p;
            if depth > self.nodes.len() {
                // Unreachable for validated forests.
                break;
            }
        }
        depth
    }
}
