//! Integration tests for the conversion engine: random round trips through
//! every representation, cross-path agreement, degenerate angles and the
//! batch converter.

use std::f64::consts::{PI, TAU};

use approx::assert_abs_diff_eq;
use ebsdrot::{
    ax2ro, convert_array, eu2om, eu2qu, om2eu, qu2om, ro2ax, AxisAngle, ConvertConfig, Euler,
    OrientationArray, QuatLayout, Quaternion, RepresentationKind, Rodrigues, Rotation,
};
use nalgebra::UnitQuaternion;
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};
use rand_distr::{Distribution, Normal};

/// Uniformly distributed rotation from four Gaussians.
fn random_quaternion(rng: &mut StdRng) -> Quaternion<f64> {
    let normal = Normal::new(0.0, 1.0).unwrap();
    let q = Quaternion::new(
        normal.sample(rng),
        normal.sample(rng),
        normal.sample(rng),
        normal.sample(rng),
    );
    q.normalize().to_positive_scalar()
}

fn random_euler(rng: &mut StdRng) -> Euler<f64> {
    Euler::new(
        rng.random_range(0.0..TAU),
        rng.random_range(0.01..PI - 0.01),
        rng.random_range(0.0..TAU),
    )
}

fn matrix_of(r: &Rotation<f64>) -> [f64; 9] {
    match r.convert_to(RepresentationKind::OrientationMatrix) {
        Rotation::OrientationMatrix(m) => m.0,
        other => panic!("expected a matrix, got {:?}", other.kind()),
    }
}

#[test]
fn test_euler_matrix_round_trip() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..2000 {
        let e = random_euler(&mut rng);
        let back = om2eu(&eu2om(&e));
        assert_abs_diff_eq!(back.phi1, e.phi1, epsilon = 1e-6);
        assert_abs_diff_eq!(back.phi, e.phi, epsilon = 1e-6);
        assert_abs_diff_eq!(back.phi2, e.phi2, epsilon = 1e-6);
    }
}

#[test]
fn test_quaternion_path_matches_direct_matrix() {
    let mut rng = StdRng::seed_from_u64(43);
    for _ in 0..2000 {
        let e = random_euler(&mut rng);
        let direct = eu2om(&e);
        let via_q = qu2om(&eu2qu(&e));
        for k in 0..9 {
            assert_abs_diff_eq!(direct.0[k], via_q.0[k], epsilon = 1e-6);
        }
    }
}

#[test]
fn test_matrix_agrees_with_nalgebra() {
    let mut rng = StdRng::seed_from_u64(44);
    for _ in 0..500 {
        let q = random_quaternion(&mut rng);
        let ours = qu2om(&q);
        let theirs = UnitQuaternion::from_quaternion(q.to_nalgebra()).to_rotation_matrix();
        for r in 0..3 {
            for c in 0..3 {
                assert_abs_diff_eq!(ours.get(r, c), theirs[(r, c)], epsilon = 1e-12);
            }
        }
    }
}

#[test]
fn test_every_route_preserves_the_rotation() {
    let mut rng = StdRng::seed_from_u64(45);
    for _ in 0..200 {
        let start = Rotation::Quaternion(random_quaternion(&mut rng));
        let reference = matrix_of(&start);
        for src in RepresentationKind::ALL {
            let s = start.convert_to(src);
            for dst in RepresentationKind::ALL {
                let d = s.convert_to(dst);
                let m = matrix_of(&d);
                for k in 0..9 {
                    assert!(
                        (m[k] - reference[k]).abs() < 1e-6,
                        "{} -> {}: entry {} {} vs {}",
                        src,
                        dst,
                        k,
                        m[k],
                        reference[k]
                    );
                }
            }
        }
    }
}

#[test]
fn test_outputs_satisfy_their_checks() {
    let mut rng = StdRng::seed_from_u64(46);
    for _ in 0..300 {
        let start = Rotation::Quaternion(random_quaternion(&mut rng));
        for dst in RepresentationKind::ALL {
            let out = start.convert_to(dst);
            let res = out.check();
            assert!(res.is_ok(), "{}: {}", dst, res);
        }
    }
}

#[test]
fn test_half_turn_rodrigues() {
    let ax = AxisAngle::new([0.0_f64, 0.0, 1.0], PI);
    let ro = ax2ro(&ax);
    assert!(ro.length.is_infinite());
    let back = ro2ax(&ro);
    assert_abs_diff_eq!(back.angle, PI, epsilon = 1e-12);

    let ro = Rodrigues::new([0.0_f64, 0.0, 1.0], f64::INFINITY);
    let ax = ro2ax(&ro);
    assert_eq!(ax.axis, [0.0, 0.0, 1.0]);
    assert_abs_diff_eq!(ax.angle, PI, epsilon = 1e-12);
}

#[test]
fn test_concrete_scenarios() {
    let om = eu2om(&Euler::new(0.0_f64, 0.0, 0.0));
    assert_eq!(om.0, [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);

    let mut out = [0.0_f64; 4];
    ebsdrot::convert_tuple(
        RepresentationKind::Quaternion,
        RepresentationKind::AxisAngle,
        &[1.0, 0.0, 0.0, 0.0],
        &mut out,
        QuatLayout::ScalarVector,
    )
    .unwrap();
    assert_eq!(out, [0.0, 0.0, 1.0, 0.0]);
}

#[test]
fn test_single_precision_batch_matches_double() {
    let _ = tracing_subscriber::fmt().with_env_filter("info").try_init();
    let mut rng = StdRng::seed_from_u64(47);
    let n = 5000;
    let mut e64 = Vec::with_capacity(n * 3);
    for _ in 0..n {
        e64.extend_from_slice(&random_euler(&mut rng).as_array());
    }
    let e32: Vec<f32> = e64.iter().map(|v| *v as f32).collect();

    let config = ConvertConfig::default();
    let a64 = OrientationArray::new("f64", RepresentationKind::Euler, e64).unwrap();
    let a32 = OrientationArray::new("f32", RepresentationKind::Euler, e32).unwrap();
    for dst in [
        RepresentationKind::OrientationMatrix,
        RepresentationKind::Quaternion,
        RepresentationKind::Homochoric,
    ] {
        let r64 = convert_array(&a64, dst, &config).unwrap();
        let r32 = convert_array(&a32, dst, &config).unwrap();
        for (x, y) in r64.data.iter().zip(&r32.data) {
            assert!((x - *y as f64).abs() < 1e-4, "{}: {} vs {}", dst, x, y);
        }
    }
}

#[test]
fn test_layouts_agree_up_to_permutation() {
    let mut rng = StdRng::seed_from_u64(48);
    let data: Vec<f64> = (0..30).map(|_| rng.random_range(0.0..3.0)).collect();
    let eu = OrientationArray::new("layout", RepresentationKind::Euler, data).unwrap();
    let vs = convert_array(&eu, RepresentationKind::Quaternion, &ConvertConfig::with_layout(QuatLayout::VectorScalar)).unwrap();
    let sv = convert_array(&eu, RepresentationKind::Quaternion, &ConvertConfig::with_layout(QuatLayout::ScalarVector)).unwrap();
    for (a, b) in vs.tuples().zip(sv.tuples()) {
        assert_eq!([a[3], a[0], a[1], a[2]], [b[0], b[1], b[2], b[3]]);
    }
}

#[test]
fn test_negated_quaternion_gives_same_ro_ho_cu() {
    let q = eu2qu(&Euler::new(0.3_f64, 0.6, 1.1));
    let nq = q.negate();

    let (ro, nro) = (ebsdrot::qu2ro(&q), ebsdrot::qu2ro(&nq));
    assert!(nro.length.is_finite());
    assert_abs_diff_eq!(nro.length, ro.length, epsilon = 1e-12);
    for k in 0..3 {
        assert_abs_diff_eq!(nro.axis[k], ro.axis[k], epsilon = 1e-12);
    }

    let (ho, nho) = (ebsdrot::qu2ho(&q), ebsdrot::qu2ho(&nq));
    assert!(ebsdrot::ho_check(&nho).is_ok());
    for k in 0..3 {
        assert_abs_diff_eq!(nho.0[k], ho.0[k], epsilon = 1e-12);
    }

    let (cu, ncu) = (ebsdrot::qu2cu(&q), ebsdrot::qu2cu(&nq));
    assert!(cu.0.iter().any(|v| v.abs() > 0.1));
    for k in 0..3 {
        assert_abs_diff_eq!(ncu.0[k], cu.0[k], epsilon = 1e-12);
    }
}
