//! Forest construction from raw tracer output, and a small builder for callers
//! that know parents but not sibling links.

use crate::error::{NavError, NavResult, Stage};
use crate::geom2::{Point, Polygon};

use super::types::{ContourForest, ContourId, ContourNode, HierarchyLinks, NO_LINK};

impl ContourForest {
    /// Build from polygons plus raw `[next, prev, first_child, parent]` rows.
    ///
    /// `-1` marks an absent link. Link errors are `MalformedHierarchy`; a
    /// polygon with fewer than three distinct vertices is `InvalidGeometry`.
    pub fn from_raw(polygons: Vec<Vec<Point>>, links: &[[i32; 4]]) -> NavResult<Self> {
        if polygons.len() != links.len() {
            return Err(NavError::hierarchy(
                polygons.len().min(links.len()),
                format!(
                    "{} polygons but {} hierarchy rows",
                    polygons.len(),
                    links.len()
                ),
            ));
        }
        let n = polygons.len();
        let mut nodes = Vec::with_capacity(n);
        for (i, (pts, row)) in polygons.into_iter().zip(links).enumerate() {
            let polygon = Polygon::from_points(&pts).ok_or_else(|| {
                NavError::geometry(
                    Stage::Select,
                    format!("contour {i}"),
                    format!("needs at least 3 distinct finite vertices, got {}", pts.len()),
                )
            })?;
            let link = |k: usize, what: &str| -> NavResult<Option<ContourId>> {
                let v = row[k];
                if v == NO_LINK {
                    Ok(None)
                } else if v < 0 || v as usize >= n {
                    Err(NavError::hierarchy(
                        i,
                        format!("{what} link {v} out of range (forest has {n} nodes)"),
                    ))
                } else {
                    Ok(Some(ContourId(v as usize)))
                }
            };
            let links = HierarchyLinks {
                next: link(0, "next")?,
                prev: link(1, "previous")?,
                first_child: link(2, "first-child")?,
                parent: link(3, "parent")?,
            };
            nodes.push(ContourNode { polygon, links });
        }
        Self::from_nodes(nodes)
    }

    /// Validate pre-linked nodes.
    pub fn from_nodes(nodes: Vec<ContourNode>) -> NavResult<Self> {
        validate(&nodes)?;
        Ok(Self { nodes })
    }
}

fn validate(nodes: &[ContourNode]) -> NavResult<()> {
    let n = nodes.len();
    let get = |id: ContourId, from: usize| node_at(nodes, id, from);
    for (i, node) in nodes.iter().enumerate() {
        let l = node.links;
        for (what, target) in [
            ("next", l.next),
            ("previous", l.prev),
            ("first-child", l.first_child),
            ("parent", l.parent),
        ] {
            if let Some(t) = target {
                get(t, i)?;
                if t.0 == i {
                    return Err(NavError::hierarchy(i, format!("{what} link points to itself")));
                }
            }
        }
        if let Some(nx) = l.next {
            let other = get(nx, i)?;
            if other.links.prev != Some(ContourId(i)) {
                return Err(NavError::hierarchy(
                    i,
                    format!("next sibling {} does not link back", nx.0),
                ));
            }
            if other.links.parent != l.parent {
                return Err(NavError::hierarchy(
                    i,
                    format!("sibling {} has a different parent", nx.0),
                ));
            }
        }
        if let Some(pv) = l.prev {
            if get(pv, i)?.links.next != Some(ContourId(i)) {
                return Err(NavError::hierarchy(
                    i,
                    format!("previous sibling {} does not link forward", pv.0),
                ));
            }
        }
        if let Some(c) = l.first_child {
            let child = get(c, i)?;
            if child.links.parent != Some(ContourId(i)) {
                return Err(NavError::hierarchy(
                    i,
                    format!("first child {} names another parent", c.0),
                ));
            }
            if child.links.prev.is_some() {
                return Err(NavError::hierarchy(
                    i,
                    format!("first child {} has a previous sibling", c.0),
                ));
            }
        }
    }

    // Sibling chains terminate.
    for i in 0..n {
        let mut cur = nodes[i].links.next;
        let mut steps = 0;
        while let Some(s) = cur {
            steps += 1;
            if steps > n {
                return Err(NavError::hierarchy(i, "cycle in sibling chain"));
            }
            cur = nodes[s.0].links.next;
        }
    }
    // Every child sits in its parent's chain.
    let mut listed = vec![false; n];
    for node in nodes {
        let mut cur = node.links.first_child;
        while let Some(c) = cur {
            listed[c.0] = true;
            cur = nodes[c.0].links.next;
        }
    }
    for (i, node) in nodes.iter().enumerate() {
        if let Some(p) = node.links.parent {
            if !listed[i] {
                return Err(NavError::hierarchy(
                    i,
                    format!("missing from the child list of parent {}", p.0),
                ));
            }
        }
    }

    // Parent chains are acyclic.
    for i in 0..n {
        let mut cur = nodes[i].links.parent;
        let mut steps = 0;
        while let Some(p) = cur {
            steps += 1;
            if steps > n {
                return Err(NavError::hierarchy(i, "cycle in parent chain"));
            }
            cur = nodes[p.0].links.parent;
        }
    }
    Ok(())
}

fn node_at(nodes: &[ContourNode], id: ContourId, from: usize) -> NavResult<&ContourNode> {
    nodes
        .get(id.0)
        .ok_or_else(|| NavError::hierarchy(from, format!("dangling link to {}", id.0)))
}

/// Incremental forest builder: push polygons with their parent and the
/// sibling/child links are filled in.
#[derive(Debug, Default)]
pub struct ForestBuilder {
    nodes: Vec<ContourNode>,
}

impl ForestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a contour as the last child of `parent` (or as a new root).
    pub fn push(&mut self, points: &[Point], parent: Option<ContourId>) -> NavResult<ContourId> {
        let id = ContourId(self.nodes.len());
        let polygon = Polygon::from_points(points).ok_or_else(|| {
            NavError::geometry(
                Stage::Select,
                format!("contour {}", id.0),
                "needs at least 3 distinct finite vertices",
            )
        })?;
        if let Some(p) = parent {
            if p.0 >= self.nodes.len() {
                return Err(NavError::hierarchy(id.0, format!("unknown parent {}", p.0)));
            }
        }
        let last_sibling = self
            .nodes
            .iter()
            .enumerate()
            .rev()
            .find(|(_, n)| n.links.parent == parent)
            .map(|(i, _)| ContourId(i));
        if let Some(s) = last_sibling {
            self.nodes[s.0].links.next = Some(id);
        } else if let Some(p) = parent {
            self.nodes[p.0].links.first_child = Some(id);
        }
        self.nodes.push(ContourNode {
            polygon,
            links: HierarchyLinks {
                next: None,
                prev: last_sibling,
                first_child: None,
                parent,
            },
        });
        Ok(id)
    }

    pub fn build(self) -> NavResult<ContourForest> {
        ContourForest::from_nodes(self.nodes)
    }
}
