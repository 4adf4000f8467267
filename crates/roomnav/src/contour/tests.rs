use super::*;
use crate::error::NavError;
use crate::geom2::Point;
use nalgebra::vector;

fn square(x0: f64, y0: f64, s: f64) -> Vec<Point> {
    vec![
        vector![x0, y0],
        vector![x0 + s, y0],
        vector![x0 + s, y0 + s],
        vector![x0, y0 + s],
    ]
}

/// Outer box (0) with two children (1, 2); child 2 holds a grandchild (3).
fn nested_raw() -> (Vec<Vec<Point>>, Vec<[i32; 4]>) {
    let polys = vec![
        square(0.0, 0.0, 100.0),
        square(10.0, 10.0, 20.0),
        square(50.0, 50.0, 30.0),
        square(60.0, 60.0, 5.0),
    ];
    let links = vec![[-1, -1, 1, -1], [2, -1, -1, 0], [-1, 1, 3, 0], [-1, -1, -1, 2]];
    (polys, links)
}

#[test]
fn raw_forest_depths_and_children() {
    let (polys, links) = nested_raw();
    let f = ContourForest::from_raw(polys, &links).unwrap();
    assert_eq!(f.len(), 4);
    assert_eq!(f.roots().collect::<Vec<_>>(), vec![ContourId(0)]);
    assert_eq!(f.children(ContourId(0)), vec![ContourId(1), ContourId(2)]);
    assert_eq!(f.depth(ContourId(0)), 1);
    assert_eq!(f.depth(ContourId(1)), 2);
    assert_eq!(f.depth(ContourId(3)), 3);
}

#[test]
fn builder_matches_raw_links() {
    let (polys, links) = nested_raw();
    let raw = ContourForest::from_raw(polys.clone(), &links).unwrap();
    let mut b = ForestBuilder::new();
    let root = b.push(&polys[0], None).unwrap();
    b.push(&polys[1], Some(root)).unwrap();
    let c2 = b.push(&polys[2], Some(root)).unwrap();
    b.push(&polys[3], Some(c2)).unwrap();
    assert_eq!(b.build().unwrap(), raw);
}

#[test]
fn out_of_range_link_is_malformed() {
    let (polys, mut links) = nested_raw();
    links[3][3] = 9;
    let err = ContourForest::from_raw(polys, &links).unwrap_err();
    assert!(matches!(err, NavError::MalformedHierarchy { node: 3, .. }));
}

#[test]
fn one_sided_sibling_link_is_malformed() {
    let (polys, mut links) = nested_raw();
    links[2][1] = -1; // 1.next = 2 but 2.prev = none
    let err = ContourForest::from_raw(polys, &links).unwrap_err();
    assert!(matches!(err, NavError::MalformedHierarchy { .. }));
}

#[test]
fn parent_cycle_is_malformed() {
    let polys = vec![square(0.0, 0.0, 10.0), square(20.0, 0.0, 10.0)];
    // Each is the other's only child.
    let links = vec![[-1, -1, 1, 1], [-1, -1, 0, 0]];
    let err = ContourForest::from_raw(polys, &links).unwrap_err();
    assert!(matches!(err, NavError::MalformedHierarchy { .. }));
}

#[test]
fn root_sibling_cycle_is_malformed() {
    let polys = vec![square(0.0, 0.0, 10.0), square(20.0, 0.0, 10.0)];
    let links = vec![[1, 1, -1, -1], [0, 0, -1, -1]];
    let err = ContourForest::from_raw(polys, &links).unwrap_err();
    assert!(matches!(err, NavError::MalformedHierarchy { .. }));
}

#[test]
fn child_missing_from_parent_list_is_malformed() {
    let polys = vec![square(0.0, 0.0, 50.0), square(10.0, 10.0, 5.0)];
    let links = vec![[-1, -1, -1, -1], [-1, -1, -1, 0]];
    let err = ContourForest::from_raw(polys, &links).unwrap_err();
    assert!(matches!(err, NavError::MalformedHierarchy { node: 1, .. }));
}

#[test]
fn row_count_mismatch_is_malformed() {
    let (polys, mut links) = nested_raw();
    links.pop();
    assert!(matches!(
        ContourForest::from_raw(polys, &links),
        Err(NavError::MalformedHierarchy { .. })
    ));
}

#[test]
fn degenerate_contour_is_invalid_geometry() {
    let polys = vec![vec![vector![0.0, 0.0], vector![1.0, 1.0]]];
    let err = ContourForest::from_raw(polys, &[[-1, -1, -1, -1]]).unwrap_err();
    assert!(matches!(err, NavError::InvalidGeometry { .. }));
}

#[test]
fn empty_forest_is_valid() {
    let f = ContourForest::from_raw(Vec::new(), &[]).unwrap();
    assert!(f.is_empty());
}
