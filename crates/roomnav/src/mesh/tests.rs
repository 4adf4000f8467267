use super::*;
use crate::error::{NavError, Stage};
use crate::geom2::rand::{draw_scene, ReplayToken, SceneCfg};
use crate::geom2::{side, strictly_inside, Point, Polygon, Room, Triangle};
use crate::select::ObstacleSet;
use nalgebra::vector;
use proptest::prelude::*;

fn square(x0: f64, y0: f64, s: f64) -> Polygon {
    Polygon::from_points(&[
        vector![x0, y0],
        vector![x0 + s, y0],
        vector![x0 + s, y0 + s],
        vector![x0, y0 + s],
    ])
    .unwrap()
}

fn room100() -> Room {
    Room::new(100.0, 100.0).unwrap()
}

fn interiors_overlap(t: &Triangle, u: &Triangle) -> bool {
    let eps = 1e-9;
    for (p1, p2) in t.edges() {
        for (q1, q2) in u.edges() {
            let a = side(q1, q2, p1, eps) * side(q1, q2, p2, eps);
            let b = side(p1, p2, q1, eps) * side(p1, p2, q2, eps);
            if a < 0 && b < 0 {
                return true;
            }
        }
    }
    let inside = |p: Point, tri: &Triangle| strictly_inside(p, &tri.ring(), eps);
    t.ring().iter().any(|&p| inside(p, u))
        || u.ring().iter().any(|&p| inside(p, t))
        || inside(t.centroid(), u)
        || inside(u.centroid(), t)
}

fn assert_tiles(mesh: &Mesh, obstacles: &ObstacleSet) {
    let expected = mesh.room.area() - obstacles.total_area();
    assert!(
        (mesh.area() - expected).abs() < 1e-6 * mesh.room.area(),
        "covered {} expected {}",
        mesh.area(),
        expected
    );
    for (i, t) in mesh.iter().enumerate() {
        assert!(t.area() > 0.0);
        for p in t.ring() {
            assert!(mesh.room.clearance(p) >= -1e-9);
        }
        for o in obstacles.polygons() {
            assert!(!o.contains(t.centroid()));
        }
        for u in &mesh.triangles[i + 1..] {
            assert!(!interiors_overlap(t, u), "{t:?} overlaps {u:?}");
        }
    }
}

#[test]
fn empty_room_is_two_triangles() {
    let obstacles = ObstacleSet::default();
    let mesh = triangulate(&room100(), &obstacles, &MeshCfg::default()).unwrap();
    assert_eq!(mesh.len(), 2);
    assert_tiles(&mesh, &obstacles);
}

fn min_angle_deg(t: &Triangle) -> f64 {
    let [a, b, c] = t.ring();
    let angle = |p: Point, q: Point, r: Point| (q - p).angle(&(r - p)).to_degrees();
    angle(a, b, c).min(angle(b, c, a)).min(angle(c, a, b))
}

#[test]
fn square_obstacle_is_a_hole() {
    let obstacles = ObstacleSet::from_polygons(vec![square(40.0, 40.0, 20.0)]);
    let mesh = triangulate(&room100(), &obstacles, &MeshCfg::plain()).unwrap();
    // 8 vertices with 4 on the hull give 2n - 2 - h = 10 faces; 2 fill the hole.
    assert_eq!(mesh.len(), 8);
    assert_tiles(&mesh, &obstacles);
}

#[test]
fn default_mesh_is_refined_to_well_shaped_triangles() {
    let obstacles = ObstacleSet::from_polygons(vec![square(40.0, 40.0, 20.0)]);
    let plain = triangulate(&room100(), &obstacles, &MeshCfg::plain()).unwrap();
    let mesh = triangulate(&room100(), &obstacles, &MeshCfg::default()).unwrap();
    assert!(mesh.len() > plain.len());
    assert_tiles(&mesh, &obstacles);
    let worst = mesh.iter().map(min_angle_deg).fold(f64::INFINITY, f64::min);
    assert!(worst >= 20.0, "smallest angle {worst}");
}

#[test]
fn bad_refinement_angle_is_rejected() {
    for min_angle_deg in [0.0, 50.0, f64::NAN] {
        let cfg = MeshCfg {
            refine: Some(RefineCfg {
                min_angle_deg,
                ..RefineCfg::default()
            }),
            ..MeshCfg::default()
        };
        let err = triangulate(&room100(), &ObstacleSet::default(), &cfg).unwrap_err();
        assert!(err.to_string().contains("min_angle_deg"), "{err}");
    }
}

#[test]
fn clockwise_and_counterclockwise_obstacles_both_work() {
    let ccw = square(10.0, 10.0, 10.0);
    let mut cw_pts = square(60.0, 60.0, 10.0).vertices().to_vec();
    cw_pts.reverse();
    let cw = Polygon::from_points(&cw_pts).unwrap();
    let obstacles = ObstacleSet::from_polygons(vec![ccw, cw]);
    let mesh = triangulate(&room100(), &obstacles, &MeshCfg::default()).unwrap();
    assert_tiles(&mesh, &obstacles);
}

#[test]
fn steiner_grid_refines_without_changing_coverage() {
    let obstacles = ObstacleSet::from_polygons(vec![square(40.0, 40.0, 20.0)]);
    let coarse = triangulate(&room100(), &obstacles, &MeshCfg::plain()).unwrap();
    let cfg = MeshCfg {
        steiner_spacing: Some(10.0),
        ..MeshCfg::plain()
    };
    let fine = triangulate(&room100(), &obstacles, &cfg).unwrap();
    assert!(fine.len() > 4 * coarse.len());
    assert_tiles(&fine, &obstacles);
}

#[test]
fn bad_steiner_spacing_is_rejected() {
    let cfg = MeshCfg {
        steiner_spacing: Some(0.0),
        ..MeshCfg::default()
    };
    assert!(triangulate(&room100(), &ObstacleSet::default(), &cfg).is_err());
}

#[test]
fn oversized_steiner_grid_is_rejected() {
    let room = Room::new(1000.0, 1000.0).unwrap();
    let cfg = MeshCfg {
        steiner_spacing: Some(1e-6),
        ..MeshCfg::default()
    };
    let err = triangulate(&room, &ObstacleSet::default(), &cfg).unwrap_err();
    assert!(matches!(
        err,
        NavError::InvalidGeometry {
            stage: Stage::Triangulate,
            ..
        }
    ));
    assert!(err.to_string().contains("steiner_spacing"), "{err}");
}

#[test]
fn obstacle_touching_wall_is_invalid() {
    let obstacles = ObstacleSet::from_polygons(vec![square(0.0, 40.0, 20.0)]);
    let err = triangulate(&room100(), &obstacles, &MeshCfg::default()).unwrap_err();
    assert!(matches!(
        err,
        NavError::InvalidGeometry {
            stage: Stage::Triangulate,
            ..
        }
    ));
}

#[test]
fn obstacle_outside_room_is_invalid() {
    let obstacles = ObstacleSet::from_polygons(vec![square(90.0, 40.0, 20.0)]);
    assert!(triangulate(&room100(), &obstacles, &MeshCfg::default()).is_err());
}

#[test]
fn overlapping_touching_and_nested_obstacles_are_invalid() {
    let cases = [
        vec![square(10.0, 10.0, 20.0), square(20.0, 20.0, 20.0)],
        vec![square(10.0, 10.0, 20.0), square(30.0, 10.0, 20.0)],
        vec![square(10.0, 10.0, 40.0), square(20.0, 20.0, 5.0)],
    ];
    for polys in cases {
        let obstacles = ObstacleSet::from_polygons(polys);
        let err = triangulate(&room100(), &obstacles, &MeshCfg::default()).unwrap_err();
        assert!(matches!(err, NavError::InvalidGeometry { .. }), "{err}");
    }
}

#[test]
fn self_intersecting_obstacle_is_invalid() {
    let bowtie = Polygon::from_points(&[
        vector![20.0, 20.0],
        vector![40.0, 40.0],
        vector![40.0, 20.0],
        vector![20.0, 40.0],
    ])
    .unwrap();
    let obstacles = ObstacleSet::from_polygons(vec![bowtie]);
    assert!(triangulate(&room100(), &obstacles, &MeshCfg::default()).is_err());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn random_scenes_tile_free_space(seed in any::<u64>(), count in 0usize..6) {
        let cfg = SceneCfg { obstacles: count, ..SceneCfg::default() };
        let scene = draw_scene(cfg, ReplayToken { seed, index: 0 }).unwrap();
        let obstacles = ObstacleSet::from_polygons(scene.obstacles);
        let mesh = triangulate(&scene.room, &obstacles, &MeshCfg::default()).unwrap();
        let expected = scene.room.area() - obstacles.total_area();
        prop_assert!((mesh.area() - expected).abs() < 1e-6 * scene.room.area());
        prop_assert!(mesh.iter().all(|t| obstacles.polygons().all(|o| !o.contains(t.centroid()))));
    }
}
