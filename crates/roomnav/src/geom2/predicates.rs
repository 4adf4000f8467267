//! Orientation and intersection predicates with distance tolerances.
//!
//! Conventions
//! - `eps` is a distance in pixels. A point within `eps` of a segment lies on it.
//! - Intersection tests are closed: touching counts as intersecting.
//! - Rings are open vertex slices (last vertex connects back to the first).

use super::types::{Aabb, Point};

/// Twice the signed area of triangle `abc`; positive when `c` is left of `a→b`.
#[inline]
pub fn orient(a: Point, b: Point, c: Point) -> f64 {
    let ab = b - a;
    let ac = c - a;
    ab.x * ac.y - ab.y * ac.x
}

/// Side of `c` relative to the directed line `a→b`: `1` left, `-1` right, `0`
/// within `eps` of the line.
#[inline]
pub fn side(a: Point, b: Point, c: Point, eps: f64) -> i8 {
    let len = (b - a).norm();
    if len <= eps {
        return if (c - a).norm() <= eps { 0 } else { 1 };
    }
    let dist = orient(a, b, c) / len;
    if dist > eps {
        1
    } else if dist < -eps {
        -1
    } else {
        0
    }
}

/// Euclidean distance from `p` to the closed segment `ab`.
pub fn point_segment_distance(p: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let len2 = ab.norm_squared();
    if len2 == 0.0 {
        return (p - a).norm();
    }
    let t = ((p - a).dot(&ab) / len2).clamp(0.0, 1.0);
    (p - (a + ab * t)).norm()
}

/// Closed segment intersection: proper crossing, or any endpoint within `eps`
/// of the other segment.
pub fn segments_intersect(p1: Point, p2: Point, q1: Point, q2: Point, eps: f64) -> bool {
    if point_segment_distance(p1, q1, q2) <= eps
        || point_segment_distance(p2, q1, q2) <= eps
        || point_segment_distance(q1, p1, p2) <= eps
        || point_segment_distance(q2, p1, p2) <= eps
    {
        return true;
    }
    let d1 = side(q1, q2, p1, eps);
    let d2 = side(q1, q2, p2, eps);
    let d3 = side(p1, p2, q1, eps);
    let d4 = side(p1, p2, q2, eps);
    d1 * d2 < 0 && d3 * d4 < 0
}

/// Even-odd membership of `p` in the ring. Boundary points may land on
/// either side; use `on_ring_boundary` when that matters.
pub fn point_in_ring(p: Point, ring: &[Point]) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let a = ring[i];
        let b = ring[j];
        if (a.y > p.y) != (b.y > p.y) {
            let x_cross = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

pub fn on_ring_boundary(p: Point, ring: &[Point], eps: f64) -> bool {
    ring_edges(ring).any(|(a, b)| point_segment_distance(p, a, b) <= eps)
}

/// Strictly inside: in the ring and not within `eps` of its boundary.
#[inline]
pub fn strictly_inside(p: Point, ring: &[Point], eps: f64) -> bool {
    point_in_ring(p, ring) && !on_ring_boundary(p, ring, eps)
}

fn ring_edges(ring: &[Point]) -> impl Iterator<Item = (Point, Point)> + '_ {
    let n = ring.len();
    (0..n).map(move |k| (ring[k], ring[(k + 1) % n]))
}

/// Does the segment `pq` touch any edge of the ring?
pub fn segment_hits_ring(p: Point, q: Point, ring: &[Point], eps: f64) -> bool {
    ring_edges(ring).any(|(a, b)| segments_intersect(p, q, a, b, eps))
}

/// Do the boundaries of two rings share at least one point?
pub fn boundaries_intersect(a: &[Point], b: &[Point], eps: f64) -> bool {
    ring_edges(a).any(|(p, q)| segment_hits_ring(p, q, b, eps))
}

/// Do the closed regions bounded by two rings share at least one point?
pub fn regions_intersect(a: &[Point], b: &[Point], eps: f64) -> bool {
    match (Aabb::from_points(a), Aabb::from_points(b)) {
        (Some(ba), Some(bb)) if !ba.overlaps(&bb, eps) => return false,
        (None, _) | (_, None) => return false,
        _ => {}
    }
    boundaries_intersect(a, b, eps)
        || a.first().is_some_and(|&p| point_in_ring(p, b))
        || b.first().is_some_and(|&p| point_in_ring(p, a))
}

/// Length of the boundary segment the two rings share (sum over collinear
/// overlapping edge pairs).
pub fn shared_boundary_length(a: &[Point], b: &[Point], eps: f64) -> f64 {
    let mut total = 0.0;
    for (p1, p2) in ring_edges(a) {
        for (q1, q2) in ring_edges(b) {
            total += collinear_overlap(p1, p2, q1, q2, eps);
        }
    }
    total
}

fn collinear_overlap(p1: Point, p2: Point, q1: Point, q2: Point, eps: f64) -> f64 {
    if side(p1, p2, q1, eps) != 0 || side(p1, p2, q2, eps) != 0 {
        return 0.0;
    }
    let dir = p2 - p1;
    let len = dir.norm();
    if len <= eps {
        return 0.0;
    }
    let u = dir / len;
    let (s0, s1): (f64, f64) = (0.0, len);
    let t0 = (q1 - p1).dot(&u);
    let t1 = (q2 - p1).dot(&u);
    let (t_lo, t_hi) = if t0 <= t1 { (t0, t1) } else { (t1, t0) };
    (s1.min(t_hi) - s0.max(t_lo)).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    #[test]
    fn crossing_and_touching_segments() {
        let eps = 1e-9;
        assert!(segments_intersect(
            vector![0.0, 0.0],
            vector![2.0, 2.0],
            vector![0.0, 2.0],
            vector![2.0, 0.0],
            eps
        ));
        // T-junction counts as touching.
        assert!(segments_intersect(
            vector![0.0, 0.0],
            vector![2.0, 0.0],
            vector![1.0, 0.0],
            vector![1.0, 3.0],
            eps
        ));
        // Parallel, disjoint.
        assert!(!segments_intersect(
            vector![0.0, 0.0],
            vector![2.0, 0.0],
            vector![0.0, 1.0],
            vector![2.0, 1.0],
            eps
        ));
        // Collinear, disjoint.
        assert!(!segments_intersect(
            vector![0.0, 0.0],
            vector![1.0, 0.0],
            vector![2.0, 0.0],
            vector![3.0, 0.0],
            eps
        ));
    }

    #[test]
    fn ring_membership() {
        let sq = [
            vector![0.0, 0.0],
            vector![4.0, 0.0],
            vector![4.0, 4.0],
            vector![0.0, 4.0],
        ];
        assert!(point_in_ring(vector![2.0, 2.0], &sq));
        assert!(!point_in_ring(vector![5.0, 2.0], &sq));
        assert!(on_ring_boundary(vector![4.0, 1.0], &sq, 1e-9));
        assert!(!strictly_inside(vector![4.0, 1.0], &sq, 1e-9));
    }

    #[test]
    fn shared_edge_length_between_triangles() {
        let t1 = [vector![0.0, 0.0], vector![2.0, 0.0], vector![0.0, 2.0]];
        let t2 = [vector![2.0, 0.0], vector![2.0, 2.0], vector![0.0, 2.0]];
        let t3 = [vector![2.0, 0.0], vector![4.0, 0.0], vector![4.0, -2.0]];
        let l = shared_boundary_length(&t1, &t2, 1e-9);
        assert!((l - 8f64.sqrt()).abs() < 1e-9);
        // Only a vertex in common.
        assert!(shared_boundary_length(&t1, &t3, 1e-9) < 1e-12);
        assert!(boundaries_intersect(&t1, &t3, 1e-9));
    }

    #[test]
    fn partially_overlapping_edges_share_the_clipped_length() {
        let lower = [vector![0.0, 0.0], vector![4.0, 0.0], vector![2.0, -3.0]];
        let upper = [vector![2.0, 0.0], vector![6.0, 0.0], vector![4.0, 3.0]];
        let l = shared_boundary_length(&lower, &upper, 1e-9);
        assert!((l - 2.0).abs() < 1e-9, "{l}");
        assert_eq!(l, shared_boundary_length(&upper, &lower, 1e-9));
    }

    #[test]
    fn nested_regions_intersect_without_boundary_contact() {
        let outer = [
            vector![0.0, 0.0],
            vector![10.0, 0.0],
            vector![10.0, 10.0],
            vector![0.0, 10.0],
        ];
        let inner = [vector![4.0, 4.0], vector![6.0, 4.0], vector![5.0, 6.0]];
        assert!(regions_intersect(&outer, &inner, 1e-9));
        assert!(!boundaries_intersect(&outer, &inner, 1e-9));
    }
}
