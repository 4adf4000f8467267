//! Caller-owned cache of meshes and graphs keyed by exact input bits.

use std::collections::{HashMap, VecDeque};

use tracing::trace;

use crate::error::NavResult;
use crate::geom2::Room;
use crate::mesh::MeshCfg;
use crate::navgraph::{Adjacency, GraphCfg};
use crate::select::ObstacleSet;

use super::types::Navigation;
use super::navigation;

/// Exact fingerprint of everything that determines a `Navigation`.
///
/// Coordinates enter by bit pattern, so `0.0` and `-0.0` are different keys
/// and there is no tolerance: only a bit-identical input hits.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Fingerprint(Vec<u64>);

impl Fingerprint {
    pub fn new(room: &Room, obstacles: &ObstacleSet, mesh: &MeshCfg, graph: &GraphCfg) -> Self {
        let mut words = vec![room.width.to_bits(), room.height.to_bits()];
        words.push(mesh.geom.eps.to_bits());
        match mesh.refine {
            Some(r) => words.extend([
                1,
                r.min_angle_deg.to_bits(),
                r.min_area_fraction.to_bits(),
                r.max_vertices as u64,
            ]),
            None => words.push(0),
        }
        match mesh.steiner_spacing {
            Some(s) => words.extend([1, s.to_bits()]),
            None => words.push(0),
        }
        words.push(graph.geom.eps.to_bits());
        words.push(match graph.adjacency {
            Adjacency::SharedVertexOrEdge => 0,
            Adjacency::SharedEdge => 1,
        });
        words.push(obstacles.len() as u64);
        for poly in obstacles.polygons() {
            words.push(poly.len() as u64);
            for p in poly.vertices() {
                words.extend([p.x.to_bits(), p.y.to_bits()]);
            }
        }
        Self(words)
    }
}

/// Bounded map from `Fingerprint` to `Navigation` with FIFO eviction.
///
/// Nothing is shared between caches; callers decide lifetime and scope.
#[derive(Debug)]
pub struct PlanCache {
    capacity: usize,
    entries: HashMap<Fingerprint, Navigation>,
    order: VecDeque<Fingerprint>,
    hits: u64,
    misses: u64,
}

impl Default for PlanCache {
    fn default() -> Self {
        Self::with_capacity(16)
    }
}

impl PlanCache {
    /// A cache holding at most `capacity` entries (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
            hits: 0,
            misses: 0,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(hits, misses)` since construction or the last `clear`.
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }

    pub fn get(&self, key: &Fingerprint) -> Option<&Navigation> {
        self.entries.get(key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
        self.hits = 0;
        self.misses = 0;
    }

    /// Cached navigation for these inputs, building (and inserting) it on a
    /// miss. Build errors are returned and nothing is cached.
    pub fn get_or_build(
        &mut self,
        room: &Room,
        obstacles: &ObstacleSet,
        mesh: &MeshCfg,
        graph: &GraphCfg,
    ) -> NavResult<Navigation> {
        let key = Fingerprint::new(room, obstacles, mesh, graph);
        if let Some(nav) = self.entries.get(&key) {
            self.hits += 1;
            trace!(hits = self.hits, "plan cache hit");
            return Ok(nav.clone());
        }
        self.misses += 1;
        let nav = navigation(room, obstacles, mesh, graph)?;
        if self.entries.len() >= self.capacity {
            if let Some(old) = self.order.pop_front() {
                self.entries.remove(&old);
            }
        }
        self.order.push_back(key.clone());
        self.entries.insert(key, nav.clone());
        trace!(misses = self.misses, len = self.entries.len(), "plan cache miss");
        Ok(nav)
    }
}
