//! Basic 2D types used across the planner.
//!
//! - `Point`: pixel-space coordinates (`nalgebra::Vector2<f64>`).
//! - `Polygon`: closed simple ring, no consecutive duplicates, any winding.
//! - `Triangle`, `Room`, `Aabb`.
//! - `GeomCfg`: the single distance tolerance used by predicates.

use nalgebra::Vector2;

use super::predicates::{on_ring_boundary, point_in_ring, segments_intersect};

/// Point in image pixel space.
pub type Point = Vector2<f64>;

/// Geometry configuration (tolerances).
///
/// `eps` is a distance in pixels: points closer than `eps` to a line or
/// segment count as lying on it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeomCfg {
    pub eps: f64,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self { eps: 1e-9 }
    }
}

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Point,
    pub max: Point,
}

impl Aabb {
    pub fn from_points(pts: &[Point]) -> Option<Self> {
        let first = *pts.first()?;
        let mut min = first;
        let mut max = first;
        for p in &pts[1..] {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Some(Self { min, max })
    }

    /// Closed overlap test with slack `eps`.
    #[inline]
    pub fn overlaps(&self, other: &Aabb, eps: f64) -> bool {
        self.min.x <= other.max.x + eps
            && other.min.x <= self.max.x + eps
            && self.min.y <= other.max.y + eps
            && other.min.y <= self.max.y + eps
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// Closed polygon ring.
///
/// Invariants:
/// - at least 3 vertices;
/// - no two consecutive vertices are equal (including last→first);
/// - winding is whatever the caller supplied.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    pts: Vec<Point>,
}

impl Polygon {
    /// Build from an open or explicitly closed vertex list.
    ///
    /// Consecutive exact duplicates are dropped. Returns `None` when fewer than
    /// three vertices remain or any coordinate is non-finite.
    pub fn from_points(points: &[Point]) -> Option<Self> {
        if points.iter().any(|p| !(p.x.is_finite() && p.y.is_finite())) {
            return None;
        }
        let mut pts: Vec<Point> = points.to_vec();
        pts.dedup();
        while pts.len() > 1 && pts.first() == pts.last() {
            pts.pop();
        }
        if pts.len() < 3 {
            return None;
        }
        let mut distinct = pts.clone();
        distinct.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
        distinct.dedup();
        if distinct.len() < 3 {
            return None;
        }
        Some(Self { pts })
    }

    #[inline]
    pub fn vertices(&self) -> &[Point] {
        &self.pts
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pts.is_empty()
    }

    /// Edges `(p_k, p_{k+1})`, wrapping around.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.pts.len();
        (0..n).map(move |k| (self.pts[k], self.pts[(k + 1) % n]))
    }

    /// Shoelace area, positive for counterclockwise rings.
    pub fn signed_area(&self) -> f64 {
        signed_area(&self.pts)
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    pub fn bbox(&self) -> Aabb {
        // Invariant: pts is non-empty.
        Aabb::from_points(&self.pts).unwrap_or(Aabb {
            min: Point::zeros(),
            max: Point::zeros(),
        })
    }

    /// Strict interior membership (even-odd rule).
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        point_in_ring(p, &self.pts)
    }

    #[inline]
    pub fn on_boundary(&self, p: Point, eps: f64) -> bool {
        on_ring_boundary(p, &self.pts, eps)
    }

    /// No two non-adjacent edges intersect and adjacent edges meet only at
    /// their shared vertex.
    pub fn is_simple(&self, eps: f64) -> bool {
        let n = self.pts.len();
        if n == 3 {
            return signed_area(&self.pts).abs() > 0.0;
        }
        for i in 0..n {
            let (a1, a2) = (self.pts[i], self.pts[(i + 1) % n]);
            for j in (i + 1)..n {
                let adjacent = j == i + 1 || (i == 0 && j == n - 1);
                if adjacent {
                    continue;
                }
                let (b1, b2) = (self.pts[j], self.pts[(j + 1) % n]);
                if segments_intersect(a1, a2, b1, b2, eps) {
                    return false;
                }
            }
        }
        true
    }
}

/// Triangle of the free-space mesh.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    pub a: Point,
    pub b: Point,
    pub c: Point,
}

impl Triangle {
    #[inline]
    pub fn new(a: Point, b: Point, c: Point) -> Self {
        Self { a, b, c }
    }

    #[inline]
    pub fn ring(&self) -> [Point; 3] {
        [self.a, self.b, self.c]
    }

    /// Arithmetic mean of the three vertices.
    #[inline]
    pub fn centroid(&self) -> Point {
        (self.a + self.b + self.c) / 3.0
    }

    #[inline]
    pub fn area(&self) -> f64 {
        0.5 * super::predicates::orient(self.a, self.b, self.c).abs()
    }

    pub fn edges(&self) -> [(Point, Point); 3] {
        [(self.a, self.b), (self.b, self.c), (self.c, self.a)]
    }

    pub fn bbox(&self) -> Aabb {
        Aabb {
            min: Point::new(
                self.a.x.min(self.b.x).min(self.c.x),
                self.a.y.min(self.b.y).min(self.c.y),
            ),
            max: Point::new(
                self.a.x.max(self.b.x).max(self.c.x),
                self.a.y.max(self.b.y).max(self.c.y),
            ),
        }
    }
}

/// Axis-aligned planning domain `(0,0)–(width,height)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Room {
    pub width: f64,
    pub height: f64,
}

impl Room {
    /// `None` unless both dimensions are finite and positive.
    pub fn new(width: f64, height: f64) -> Option<Self> {
        let ok = width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0;
        ok.then_some(Self { width, height })
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Corners in counterclockwise order starting at the origin.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(0.0, 0.0),
            Point::new(self.width, 0.0),
            Point::new(self.width, self.height),
            Point::new(0.0, self.height),
        ]
    }

    /// Distance from `p` to the nearest wall, negative outside.
    #[inline]
    pub fn clearance(&self, p: Point) -> f64 {
        p.x.min(p.y).min(self.width - p.x).min(self.height - p.y)
    }

    /// Strictly inside with at least `eps` clearance.
    #[inline]
    pub fn contains_strict(&self, p: Point, eps: f64) -> bool {
        self.clearance(p) > eps
    }
}

/// Shoelace signed area of an open ring.
pub fn signed_area(ring: &[Point]) -> f64 {
    let n = ring.len();
    if n < 3 {
        return 0.0;
    }
    let mut acc = 0.0;
    for k in 0..n {
        let p = ring[k];
        let q = ring[(k + 1) % n];
        acc += p.x * q.y - q.x * p.y;
    }
    0.5 * acc
}
