//! Integration tests for the Laue classes: misorientation invariants,
//! fundamental-zone reduction and histogram binning over every class.

use std::f64::consts::PI;

use approx::assert_relative_eq;
use ebsdrot::{ax2ro, eu2qu, qu2ro, ro2ax, AxisAngle, Euler, LaueClass, Quaternion};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

fn random_quaternion(rng: &mut StdRng) -> Quaternion<f64> {
    eu2qu(&Euler::new(
        rng.random_range(0.0..2.0 * PI),
        (1.0 - 2.0 * rng.random::<f64>()).acos(),
        rng.random_range(0.0..2.0 * PI),
    ))
}

#[test]
fn test_misorientation_of_identical_orientations_is_zero() {
    let mut rng = StdRng::seed_from_u64(100);
    for class in LaueClass::ALL {
        for _ in 0..20 {
            let q = random_quaternion(&mut rng);
            let m = class.calculate_misorientation(&q, &q);
            assert!(m.angle.abs() < 1e-6, "{}: {}", class, m.angle);
        }
    }
}

#[test]
fn test_cubic_identity_scenario() {
    let q = Quaternion::new(1.0_f64, 0.0, 0.0, 0.0);
    let m = LaueClass::Cubic.calculate_misorientation(&q, &q);
    assert_eq!(m.angle, 0.0);
    assert_eq!(m.axis, [0.0, 0.0, 1.0]);
}

#[test]
fn test_misorientation_is_symmetry_invariant() {
    let mut rng = StdRng::seed_from_u64(101);
    for class in LaueClass::ALL {
        for _ in 0..20 {
            let q1 = random_quaternion(&mut rng);
            let q2 = random_quaternion(&mut rng);
            let base = class.calculate_misorientation(&q1, &q2).angle;
            for i in 0..class.num_sym_ops() {
                let op = class.quat_sym_op(i);
                let moved = op.multiply(&q1);
                let angle = class.calculate_misorientation(&moved, &q2).angle;
                assert!(
                    (angle - base).abs() < 1e-6,
                    "{} op {}: {} vs {}",
                    class,
                    i,
                    angle,
                    base
                );
            }
        }
    }
}

#[test]
fn test_misorientation_never_exceeds_plain_rotation() {
    let mut rng = StdRng::seed_from_u64(102);
    for class in LaueClass::ALL {
        for _ in 0..50 {
            let q1 = random_quaternion(&mut rng);
            let q2 = random_quaternion(&mut rng);
            let plain = LaueClass::Triclinic.calculate_misorientation(&q1, &q2).angle;
            let sym = class.calculate_misorientation(&q1, &q2).angle;
            assert!(sym <= plain + 1e-9, "{}", class);
            assert!((0.0..=PI + 1e-12).contains(&sym));
        }
    }
}

#[test]
fn test_known_cubic_misorientation() {
    // 60° about [111] is a Σ3 twin; already minimal under m3m.
    let s = 1.0 / 3.0_f64.sqrt();
    let twin = ebsdrot::ax2qu(&AxisAngle::new([s, s, s], PI / 3.0));
    let id = Quaternion::identity();
    let m = LaueClass::Cubic.calculate_misorientation(&twin, &id);
    assert_relative_eq!(m.angle, PI / 3.0, epsilon = 1e-9);
    for k in 0..3 {
        assert_relative_eq!(m.axis[k].abs(), s, epsilon = 1e-9);
    }

    // 90° about z collapses to the identity.
    let quarter = ebsdrot::ax2qu(&AxisAngle::new([0.0, 0.0, 1.0], PI / 2.0));
    assert!(LaueClass::Cubic.calculate_misorientation(&quarter, &id).angle < 1e-9);
    assert!(LaueClass::Tetragonal.calculate_misorientation(&quarter, &id).angle < 1e-9);
    let ortho = LaueClass::OrthoRhombic.calculate_misorientation(&quarter, &id);
    assert_relative_eq!(ortho.angle, PI / 2.0, epsilon = 1e-9);
}

#[test]
fn test_small_misorientations_keep_full_precision() {
    for angle in [1e-7, 1e-5, 1e-3] {
        let q = ebsdrot::ax2qu(&AxisAngle::new([0.0, 0.6, 0.8], angle));
        let id = Quaternion::identity();
        for class in LaueClass::ALL {
            let m = class.calculate_misorientation(&q, &id);
            assert_relative_eq!(m.angle, angle, max_relative = 1e-9);
        }
    }
}

#[test]
fn test_odf_bins_are_bounded() {
    let mut rng = StdRng::seed_from_u64(103);
    for class in LaueClass::ALL {
        for _ in 0..500 {
            let ro = qu2ro(&random_quaternion(&mut rng));
            let fz = class.odf_fz_rod(&ro);
            assert!(class.odf_bin(&fz) < class.odf_size(), "{}", class);
            assert!(class.odf_bin(&ro) < class.odf_size(), "{}", class);
            let mfz = class.mdf_fz_rod(&ro);
            assert!(class.miso_bin(&mfz) < class.mdf_size(), "{}", class);
        }
    }
}

#[test]
fn test_odf_fz_rod_is_nearest_origin() {
    let mut rng = StdRng::seed_from_u64(104);
    for class in LaueClass::ALL {
        for _ in 0..50 {
            let q = random_quaternion(&mut rng);
            let fz = class.odf_fz_rod(&qu2ro(&q));
            let fz_angle = ro2ax(&fz).angle;
            for i in 0..class.num_sym_ops() {
                let other = class.quat_sym_op(i).multiply(&q).to_positive_scalar();
                let v = other.vector();
                let angle = 2.0 * (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt().atan2(other.w);
                assert!(fz_angle <= angle + 1e-9, "{} op {}", class, i);
            }
        }
    }
}

#[test]
fn test_odf_fz_rod_handles_half_turns() {
    let ro = ax2ro(&AxisAngle::new([1.0, 0.0, 0.0], PI));
    assert!(ro.length.is_infinite());
    let fz = LaueClass::Cubic.odf_fz_rod(&ro);
    assert!(fz.length.is_finite() && fz.length.abs() < 1e-9, "{:?}", fz);
}

#[test]
fn test_sampling_covers_the_odf_grid() {
    let mut rng = StdRng::seed_from_u64(105);
    let class = LaueClass::CubicLow;
    for _ in 0..200 {
        let choose = rng.random_range(0..class.odf_size());
        let random = [rng.random::<f64>(), rng.random::<f64>(), rng.random::<f64>()];
        let eu = class.determine_euler_angles(random, choose);
        assert!(ebsdrot::eu_check(&eu).is_ok(), "{:?}", eu);
        let ro = class.determine_rodrigues_vector(random, choose);
        let ax = ro2ax(&ro);
        assert!(ax.angle >= 0.0 && ax.angle <= PI + 1e-12);
    }
}

#[test]
fn test_random_equivalent_preserves_misorientation() {
    let mut rng = StdRng::seed_from_u64(106);
    let eu = Euler::new(0.3, 0.8, 1.9);
    let reference = Euler::new(1.1, 0.4, 0.2);
    for class in LaueClass::ALL {
        let base = class.calculate_misorientation(&eu2qu(&eu), &eu2qu(&reference)).angle;
        for _ in 0..10 {
            let other = class.random_symmetric_equivalent(&eu, &mut rng);
            let angle = class.calculate_misorientation(&eu2qu(&other), &eu2qu(&reference)).angle;
            assert!((angle - base).abs() < 1e-6, "{}", class);
        }
    }
}

#[test]
fn test_nearest_quat_ignores_quaternion_sign() {
    let mut rng = StdRng::seed_from_u64(107);
    for class in LaueClass::ALL {
        for _ in 0..200 {
            let q1 = random_quaternion(&mut rng);
            let q2 = random_quaternion(&mut rng);
            let near = class.nearest_quat(&q1, &q2);
            let flipped = class.nearest_quat(&q1.negate(), &q2);
            let brute = (0..class.num_sym_ops())
                .map(|i| class.quat_sym_op(i).multiply(&q2).dot(&q1).abs())
                .fold(0.0_f64, f64::max);
            assert_relative_eq!(near.dot(&q1).abs(), brute, epsilon = 1e-12);
            assert_relative_eq!(flipped.dot(&q1).abs(), brute, epsilon = 1e-12);
            assert!(near.w >= 0.0);
        }
    }
}

#[test]
fn test_slip_metrics_through_laue_class() {
    let sf = LaueClass::Cubic.schmid_factor([1.0, 2.0, 3.0]).unwrap();
    assert!(sf.factor > 0.4 && sf.factor <= 0.5, "{:?}", sf);
    assert!(sf.slip_system < 12);
    assert!(LaueClass::Hexagonal.schmid_factor([0.0, 0.0, 1.0]).is_err());

    // Basal slip under a load inclined 45° from c in the a-c plane.
    let basal = LaueClass::Hexagonal
        .schmid_factor_for_system([1.0, 0.0, 1.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0])
        .unwrap();
    assert_relative_eq!(basal.factor, 0.5, epsilon = 1e-12);

    let mut rng = StdRng::seed_from_u64(108);
    let ld = [0.0, 0.0, 1.0];
    for _ in 0..20 {
        let q1 = random_quaternion(&mut rng);
        let q2 = random_quaternion(&mut rng);
        let m = LaueClass::Cubic.m_prime(&q1, &q2, ld).unwrap();
        assert!((0.0..=1.0 + 1e-12).contains(&m));
        for max_sf in [true, false] {
            let f1 = LaueClass::Cubic.f1(&q1, &q2, ld, max_sf).unwrap();
            let f1spt = LaueClass::Cubic.f1spt(&q1, &q2, ld, max_sf).unwrap();
            let f7 = LaueClass::Cubic.f7(&q1, &q2, ld, max_sf).unwrap();
            assert!(f1 >= 0.0 && f1spt >= 0.0 && f7 >= 0.0);
        }
        assert!(LaueClass::Tetragonal.f1(&q1, &q2, ld, true).is_err());
    }
}
