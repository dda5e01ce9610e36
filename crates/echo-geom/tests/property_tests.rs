// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]
#![allow(clippy::expect_used, clippy::unwrap_used)]
use proptest::prelude::*;
use proptest::test_runner::{Config as PropConfig, RngAlgorithm, TestRng, TestRunner};

use echo_geom::{ClosestPointsKind, Cube, Line, Vec3};

fn coord() -> impl Strategy<Value = f64> + Clone {
    -1.0e3..1.0e3_f64
}

fn vec3() -> impl Strategy<Value = Vec3> + Clone {
    prop::array::uniform3(coord()).prop_map(|c| Vec3::try_from(c).expect("finite"))
}

fn angle() -> impl Strategy<Value = f64> + Clone {
    -10.0..10.0_f64
}

fn sin_between(a: &Line, b: &Line) -> f64 {
    let d1 = a.direction().expect("non-degenerate");
    let d2 = b.direction().expect("non-degenerate");
    d1.cross(&d2).expect("unit vectors").magnitude()
}

fn close(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol * a.abs().max(b.abs()).max(1.0)
}

proptest! {
    #[test]
    fn magnitude_is_non_negative(v in vec3()) {
        let m = v.magnitude();
        prop_assert!(m >= 0.0);
        prop_assert_eq!(m == 0.0, v == Vec3::ZERO);
    }

    #[test]
    fn normalize_yields_unit_vector_in_same_direction(v in vec3()) {
        prop_assume!(v.magnitude() > 1e-6);
        let n = v.normalize().unwrap();
        prop_assert!(close(n.magnitude(), 1.0, 1e-12));
        prop_assert!(n.dot(&v) > 0.0);
    }

    #[test]
    fn cross_is_anti_commutative(a in vec3(), b in vec3()) {
        let ab = a.cross(&b).unwrap();
        let ba = b.cross(&a).unwrap().scale(-1.0).unwrap();
        prop_assert_eq!(ab, ba);
    }

    #[test]
    fn rotation_round_trips(v in vec3(), theta in angle()) {
        let tol = 1e-12 * v.magnitude().max(1.0);
        let x = v.rotate_x(theta).and_then(|r| r.rotate_x(-theta)).unwrap();
        let y = v.rotate_y(theta).and_then(|r| r.rotate_y(-theta)).unwrap();
        let z = v.rotate_z(theta).and_then(|r| r.rotate_z(-theta)).unwrap();
        prop_assert!(x.distance_to(&v) <= tol);
        prop_assert!(y.distance_to(&v) <= tol);
        prop_assert!(z.distance_to(&v) <= tol);
    }

    #[test]
    fn rotation_preserves_length(v in vec3(), theta in angle()) {
        let m = v.magnitude();
        prop_assert!(close(v.rotate_x(theta).unwrap().magnitude(), m, 1e-12));
        prop_assert!(close(v.rotate_y(theta).unwrap().magnitude(), m, 1e-12));
        prop_assert!(close(v.rotate_z(theta).unwrap().magnitude(), m, 1e-12));
    }

    #[test]
    fn closest_pair_gap_is_perpendicular_to_both_lines(
        p1 in vec3(), p2 in vec3(), q1 in vec3(), q2 in vec3()
    ) {
        let a = Line::new(p1, p2);
        let b = Line::new(q1, q2);
        prop_assume!(a.length() > 1.0 && b.length() > 1.0);
        prop_assume!(sin_between(&a, &b) > 0.1);
        let cp = a.closest_points_with(&b).unwrap();
        prop_assert_eq!(cp.kind(), ClosestPointsKind::Unique);
        let d1 = a.direction().unwrap();
        let d2 = b.direction().unwrap();
        let gap = cp.on_other().sub(&cp.on_self()).unwrap();
        prop_assert!(gap.dot(&d1).abs() <= 1e-6);
        prop_assert!(gap.dot(&d2).abs() <= 1e-6);
    }

    #[test]
    fn shortest_distance_never_exceeds_defining_point_gap(
        p1 in vec3(), p2 in vec3(), q1 in vec3(), q2 in vec3()
    ) {
        let a = Line::new(p1, p2);
        let b = Line::new(q1, q2);
        prop_assume!(a.length() > 1.0 && b.length() > 1.0);
        prop_assume!(a.is_parallel(&b) || sin_between(&a, &b) > 0.1);
        let dist = a.shortest_distance_to(&b).unwrap();
        prop_assert!(dist >= 0.0);
        prop_assert!(dist <= p1.distance_to(&q1) + 1e-6);
    }

    #[test]
    fn cube_survives_vertex_round_trip(
        center in prop::array::uniform3(-100.0..100.0_f64),
        side in 0.01..100.0_f64,
    ) {
        let center = Vec3::try_from(center).unwrap();
        let cube = Cube::from_center_and_side(center, side).unwrap();
        let rebuilt = Cube::from_vertices(&cube.vertices()).unwrap();
        prop_assert!(rebuilt.center().distance_to(&center) <= 1e-12 * 200.0);
        prop_assert!(close(rebuilt.side(), side, 1e-9));
        prop_assert_eq!(rebuilt.vertices(), cube.vertices());
    }

    #[test]
    fn cube_rotation_keeps_center_and_edge_lengths(
        center in prop::array::uniform3(-100.0..100.0_f64),
        side in 0.01..100.0_f64,
        theta in angle(),
    ) {
        let cube = Cube::from_center_and_side(Vec3::try_from(center).unwrap(), side).unwrap();
        let turned = cube.rotate_y(theta).unwrap();
        prop_assert_eq!(turned.center(), cube.center());
        for edge in turned.edges() {
            prop_assert!((edge.length() - side).abs() <= 1e-9 * 200.0);
        }
    }
}

#[test]
fn proptest_seed_pinned_rotation_round_trip() {
    const SEED_BYTES: [u8; 32] = [
        0x47, 0x45, 0x4f, 0x4d, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 0, 0, 0,
    ];

    let rng = TestRng::from_seed(RngAlgorithm::ChaCha, &SEED_BYTES);
    let mut runner = TestRunner::new_with_rng(PropConfig::default(), rng);

    runner
        .run(&(vec3(), angle()), |(v, theta)| {
            let cube = Cube::from_center_and_side(v, 1.0).expect("cube");
            let back = cube
                .rotate_z(theta)
                .and_then(|c| c.rotate_z(-theta))
                .expect("rotation");
            for (got, want) in back.vertices().iter().zip(cube.vertices()) {
                prop_assert!(got.distance_to(&want) <= 1e-9);
            }
            Ok(())
        })
        .expect("proptest with pinned seed should complete");
}
