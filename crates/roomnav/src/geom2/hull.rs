use super::predicates::orient;
use super::types::{Point, Polygon};

/// Convex hull in counter-clockwise order (monotone chain).
///
/// Points on a hull edge are not kept as vertices. Returns `None` when fewer
/// than three non-collinear points remain.
pub fn convex_hull(points: &[Point]) -> Option<Vec<Point>> {
    let mut pts = points.to_vec();
    pts.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    pts.dedup_by(|a, b| (*a - *b).norm() < 1e-12);
    if pts.len() < 3 {
        return None;
    }
    let mut lower = half_hull(pts.iter());
    let mut upper = half_hull(pts.iter().rev());
    // each chain ends where the other starts
    lower.pop();
    upper.pop();
    lower.append(&mut upper);
    (lower.len() >= 3).then_some(lower)
}

/// One monotone chain: keep only left turns.
fn half_hull<'a>(pts: impl Iterator<Item = &'a Point>) -> Vec<Point> {
    let mut chain: Vec<Point> = Vec::new();
    for &p in pts {
        while let [.., a, b] = chain[..] {
            if orient(a, b, p) > 0.0 {
                break;
            }
            chain.pop();
        }
        chain.push(p);
    }
    chain
}

/// Convex hull of a polygon's vertices as a new polygon.
pub fn hull_polygon(poly: &Polygon) -> Option<Polygon> {
    let hull = convex_hull(poly.vertices())?;
    Polygon::from_points(&hull)
}
