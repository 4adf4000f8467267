use super::*;
use nalgebra::vector;

#[test]
fn polygon_drops_duplicates_and_closing_point() {
    let p = Polygon::from_points(&[
        vector![0.0, 0.0],
        vector![1.0, 0.0],
        vector![1.0, 0.0],
        vector![1.0, 1.0],
        vector![0.0, 0.0],
    ])
    .unwrap();
    assert_eq!(p.len(), 3);
    assert!((p.area() - 0.5).abs() < 1e-12);
}

#[test]
fn polygon_needs_three_distinct_vertices() {
    assert!(Polygon::from_points(&[vector![0.0, 0.0], vector![1.0, 0.0]]).is_none());
    // Four entries, two distinct vertices.
    assert!(Polygon::from_points(&[
        vector![0.0, 0.0],
        vector![1.0, 0.0],
        vector![0.0, 0.0],
        vector![1.0, 0.0]
    ])
    .is_none());
    assert!(Polygon::from_points(&[
        vector![0.0, 0.0],
        vector![f64::NAN, 0.0],
        vector![1.0, 1.0]
    ])
    .is_none());
}

#[test]
fn winding_does_not_change_area_or_membership() {
    let ccw = [
        vector![0.0, 0.0],
        vector![3.0, 0.0],
        vector![3.0, 2.0],
        vector![0.0, 2.0],
    ];
    let mut cw = ccw;
    cw.reverse();
    let a = Polygon::from_points(&ccw).unwrap();
    let b = Polygon::from_points(&cw).unwrap();
    assert!(a.signed_area() > 0.0 && b.signed_area() < 0.0);
    assert!((a.area() - b.area()).abs() < 1e-12);
    assert!(a.contains(vector![1.0, 1.0]) && b.contains(vector![1.0, 1.0]));
}

#[test]
fn bowtie_is_not_simple() {
    let bowtie = Polygon::from_points(&[
        vector![0.0, 0.0],
        vector![2.0, 2.0],
        vector![2.0, 0.0],
        vector![0.0, 2.0],
    ])
    .unwrap();
    assert!(!bowtie.is_simple(1e-9));
    let square = Polygon::from_points(&[
        vector![0.0, 0.0],
        vector![2.0, 0.0],
        vector![2.0, 2.0],
        vector![0.0, 2.0],
    ])
    .unwrap();
    assert!(square.is_simple(1e-9));
}

#[test]
fn triangle_centroid_and_area() {
    let t = Triangle::new(vector![0.0, 0.0], vector![3.0, 0.0], vector![0.0, 3.0]);
    assert!((t.centroid() - vector![1.0, 1.0]).norm() < 1e-12);
    assert!((t.area() - 4.5).abs() < 1e-12);
    let bb = t.bbox();
    assert_eq!(bb.min, vector![0.0, 0.0]);
    assert_eq!(bb.max, vector![3.0, 3.0]);
}

#[test]
fn room_dimensions_and_clearance() {
    assert!(Room::new(0.0, 10.0).is_none());
    assert!(Room::new(f64::INFINITY, 10.0).is_none());
    let r = Room::new(100.0, 50.0).unwrap();
    assert_eq!(r.area(), 5000.0);
    assert!((r.clearance(vector![10.0, 45.0]) - 5.0).abs() < 1e-12);
    assert!(r.contains_strict(vector![50.0, 25.0], 1e-9));
    assert!(!r.contains_strict(vector![0.0, 25.0], 1e-9));
    assert!(r.clearance(vector![-1.0, 25.0]) < 0.0);
}

#[test]
fn aabb_overlap_is_closed() {
    let a = Aabb::from_points(&[vector![0.0, 0.0], vector![1.0, 1.0]]).unwrap();
    let b = Aabb::from_points(&[vector![1.0, 0.0], vector![2.0, 1.0]]).unwrap();
    let c = Aabb::from_points(&[vector![1.5, 0.0], vector![2.0, 1.0]]).unwrap();
    assert!(a.overlaps(&b, 0.0));
    assert!(!a.overlaps(&c, 0.0));
    assert!(a.contains(vector![0.5, 0.5]));
}
