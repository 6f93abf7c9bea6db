//! Slip-system metrics: Schmid factors and slip-transfer parameters.
//!
//! Only m3m carries a built-in slip family, the twelve {111}⟨110⟩ systems of
//! FCC metals. Arbitrary plane/direction pairs can be evaluated for any
//! class through [`LaueClass::schmid_factor_for_system`], which enumerates the class
//! operators.
//!
//! Slip-transfer parameters between grains 1 and 2 under load direction `l`,
//! for slip plane normals `n` and directions `d` in the sample frame:
//!
//! - m′ = `abs(n1·n2) · abs(d1·d2)`, on the most stressed system of each grain
//! - F1 = `m · abs(l·d1) · Σ abs(d1·d2)`
//! - F1spt = F1 `· Σ abs(n1·n2)`
//! - F7 = `abs(l·d1)² · Σ abs(d1·d2)`
//!
//! where `m` is the Schmid factor of the grain 1 system and the sums run over
//! every system of grain 2.

use anyhow::ensure;

use super::tables::SymmetryTable;
use super::LaueClass;
use crate::convert::qu2om;
use crate::representation::Quaternion;

const SLIP_COUNT: usize = 12;

/// {111}⟨110⟩ slip planes, crystal frame.
const SLIP_PLANES: [[f64; 3]; SLIP_COUNT] = [
    [1.0, 1.0, 1.0],
    [1.0, 1.0, 1.0],
    [1.0, 1.0, 1.0],
    [1.0, 1.0, -1.0],
    [1.0, 1.0, -1.0],
    [1.0, 1.0, -1.0],
    [1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [-1.0, 1.0, 1.0],
    [-1.0, 1.0, 1.0],
    [-1.0, 1.0, 1.0],
];

/// Slip directions matching [`SLIP_PLANES`] index by index.
const SLIP_DIRECTIONS: [[f64; 3]; SLIP_COUNT] = [
    [0.0, 1.0, -1.0],
    [1.0, 0.0, -1.0],
    [1.0, -1.0, 0.0],
    [1.0, -1.0, 0.0],
    [1.0, 0.0, 1.0],
    [0.0, 1.0, 1.0],
    [1.0, 1.0, 0.0],
    [0.0, 1.0, 1.0],
    [1.0, 0.0, -1.0],
    [1.0, 1.0, 0.0],
    [1.0, 0.0, 1.0],
    [0.0, 1.0, -1.0],
];

/// Highest Schmid factor found and the slip system carrying it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SchmidFactor {
    /// `cos φ · cos λ`, in `[0, 0.5]`.
    pub factor: f64,
    /// Index of the slip system (built-in family) or symmetry operator.
    pub slip_system: usize,
    /// Angle φ between load and slip-plane normal, radians.
    pub plane_angle: f64,
    /// Angle λ between load and slip direction, radians.
    pub direction_angle: f64,
}

// ── Vector helpers ──────────────────────────────────────────────────────────

fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn normalized(v: [f64; 3]) -> anyhow::Result<[f64; 3]> {
    let n = dot(v, v).sqrt();
    ensure!(n > 0.0 && n.is_finite(), "vector {:?} has no direction", v);
    Ok(v.map(|c| c / n))
}

fn has_slip_family(class: LaueClass) -> anyhow::Result<()> {
    ensure!(
        class == LaueClass::Cubic,
        "no built-in slip family for Laue class {}",
        class
    );
    Ok(())
}

// ── Schmid factors ──────────────────────────────────────────────────────────

fn best_of(candidates: impl Iterator<Item = (usize, f64, f64)>) -> SchmidFactor {
    let mut best = SchmidFactor::default();
    let mut found = false;
    for (index, cos_phi, cos_lambda) in candidates {
        let factor = cos_phi * cos_lambda;
        if factor > best.factor || !found {
            found = true;
            best = SchmidFactor {
                factor,
                slip_system: index,
                plane_angle: cos_phi.min(1.0).acos(),
                direction_angle: cos_lambda.min(1.0).acos(),
            };
        }
    }
    best
}

/// Highest Schmid factor of the built-in slip family for a crystal-frame
/// load direction.
pub(crate) fn schmid_factor(class: LaueClass, load: [f64; 3]) -> anyhow::Result<SchmidFactor> {
    has_slip_family(class)?;
    let l = normalized(load)?;
    let mut candidates = Vec::with_capacity(SLIP_COUNT);
    for i in 0..SLIP_COUNT {
        let n = normalized(SLIP_PLANES[i])?;
        let d = normalized(SLIP_DIRECTIONS[i])?;
        candidates.push((i, dot(l, n).abs(), dot(l, d).abs()));
    }
    Ok(best_of(candidates.into_iter()))
}

/// Highest Schmid factor over the symmetric equivalents of one slip system.
///
/// Equivalents whose plane normal points to negative z are skipped, since
/// they repeat a system already counted.
pub(crate) fn schmid_factor_for_system(
    table: &SymmetryTable,
    load: [f64; 3],
    plane: [f64; 3],
    direction: [f64; 3],
) -> anyhow::Result<SchmidFactor> {
    let l = normalized(load)?;
    let n = normalized(plane)?;
    let d = normalized(direction)?;
    let candidates = table.mats.iter().enumerate().filter_map(|(i, m)| {
        let sp = m * nalgebra::Vector3::from(n);
        if sp[2] < 0.0 {
            return None;
        }
        let sd = m * nalgebra::Vector3::from(d);
        let cos_phi = dot(l, [sp[0], sp[1], sp[2]]).abs();
        let cos_lambda = dot(l, [sd[0], sd[1], sd[2]]).abs();
        Some((i, cos_phi, cos_lambda))
    });
    Ok(best_of(candidates))
}

// ── Slip transfer ───────────────────────────────────────────────────────────

/// Slip planes and directions of the built-in family in the sample frame.
struct SampleSlip {
    planes: [[f64; 3]; SLIP_COUNT],
    directions: [[f64; 3]; SLIP_COUNT],
}

impl SampleSlip {
    fn new(q: &Quaternion<f64>) -> anyhow::Result<Self> {
        let gt = qu2om(q).transpose();
        let mut planes = [[0.0; 3]; SLIP_COUNT];
        let mut directions = [[0.0; 3]; SLIP_COUNT];
        for i in 0..SLIP_COUNT {
            planes[i] = normalized(gt.mul_vec(SLIP_PLANES[i]))?;
            directions[i] = normalized(gt.mul_vec(SLIP_DIRECTIONS[i]))?;
        }
        Ok(Self { planes, directions })
    }

    /// `(schmid factor, |l·d|)` of system `i`.
    fn schmid(&self, i: usize, ld: [f64; 3]) -> (f64, f64) {
        let dc = dot(ld, self.directions[i]).abs();
        let pc = dot(ld, self.planes[i]).abs();
        (dc * pc, dc)
    }

    /// First system with the highest Schmid factor.
    fn most_stressed(&self, ld: [f64; 3]) -> usize {
        let mut best = 0.0;
        let mut index = 0;
        for i in 0..SLIP_COUNT {
            let (sf, _) = self.schmid(i, ld);
            if sf > best {
                best = sf;
                index = i;
            }
        }
        index
    }
}

/// Luster–Morris m′ between the most stressed systems of two grains.
pub(crate) fn m_prime(
    class: LaueClass,
    q1: &Quaternion<f64>,
    q2: &Quaternion<f64>,
    ld: [f64; 3],
) -> anyhow::Result<f64> {
    has_slip_family(class)?;
    let ld = normalized(ld)?;
    let (g1, g2) = (SampleSlip::new(q1)?, SampleSlip::new(q2)?);
    let (i, j) = (g1.most_stressed(ld), g2.most_stressed(ld));
    Ok(dot(g1.planes[i], g2.planes[j]).abs() * dot(g1.directions[i], g2.directions[j]).abs())
}

/// Shared driver for F1, F1spt and F7.
///
/// `metric(schmid, |l·d1|, Σ|d1·d2|, Σ|n1·n2|)` is evaluated for the
/// systems of grain 1. With `max_sf` the value of the first system with the
/// highest Schmid factor is returned, otherwise the largest value over all
/// systems.
fn transfer(
    class: LaueClass,
    q1: &Quaternion<f64>,
    q2: &Quaternion<f64>,
    ld: [f64; 3],
    max_sf: bool,
    metric: impl Fn(f64, f64, f64, f64) -> f64,
) -> anyhow::Result<f64> {
    has_slip_family(class)?;
    let ld = normalized(ld)?;
    let (g1, g2) = (SampleSlip::new(q1)?, SampleSlip::new(q2)?);

    let mut best_sf = 0.0;
    let mut result = 0.0_f64;
    for i in 0..SLIP_COUNT {
        let (sf, dc) = g1.schmid(i, ld);
        if max_sf && sf <= best_sf {
            continue;
        }
        let mut total_dir = 0.0;
        let mut total_plane = 0.0;
        for j in 0..SLIP_COUNT {
            total_dir += dot(g1.directions[i], g2.directions[j]).abs();
            total_plane += dot(g1.planes[i], g2.planes[j]).abs();
        }
        let value = metric(sf, dc, total_dir, total_plane);
        if max_sf {
            best_sf = sf;
            result = value;
        } else {
            result = result.max(value);
        }
    }
    Ok(result)
}

pub(crate) fn f1(
    class: LaueClass,
    q1: &Quaternion<f64>,
    q2: &Quaternion<f64>,
    ld: [f64; 3],
    max_sf: bool,
) -> anyhow::Result<f64> {
    transfer(class, q1, q2, ld, max_sf, |sf, dc, dir, _| sf * dc * dir)
}

pub(crate) fn f1spt(
    class: LaueClass,
    q1: &Quaternion<f64>,
    q2: &Quaternion<f64>,
    ld: [f64; 3],
    max_sf: bool,
) -> anyhow::Result<f64> {
    transfer(class, q1, q2, ld, max_sf, |sf, dc, dir, plane| sf * dc * dir * plane)
}

pub(crate) fn f7(
    class: LaueClass,
    q1: &Quaternion<f64>,
    q2: &Quaternion<f64>,
    ld: [f64; 3],
    max_sf: bool,
) -> anyhow::Result<f64> {
    transfer(class, q1, q2, ld, max_sf, |_, dc, dir, _| dc * dc * dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::eu2qu;
    use crate::laue::tables::table;
    use crate::representation::Euler;
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::{RngExt, SeedableRng};

    #[test]
    fn test_slip_systems_lie_in_their_planes() {
        for i in 0..SLIP_COUNT {
            assert_eq!(dot(SLIP_PLANES[i], SLIP_DIRECTIONS[i]), 0.0, "system {}", i);
        }
    }

    #[test]
    fn test_schmid_factor_along_cube_axis() {
        // [001] loading of FCC: 1/√3 · 1/√2 on eight systems.
        let sf = schmid_factor(LaueClass::Cubic, [0.0, 0.0, 1.0]).unwrap();
        assert_abs_diff_eq!(sf.factor, 1.0 / 6.0_f64.sqrt(), epsilon = 1e-12);
        assert_eq!(sf.slip_system, 0);
        assert_abs_diff_eq!(sf.plane_angle.cos(), 1.0 / 3.0_f64.sqrt(), epsilon = 1e-12);
        assert_abs_diff_eq!(sf.direction_angle.cos(), 1.0 / 2.0_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_family_and_operator_enumeration_agree() {
        let mut rng = StdRng::seed_from_u64(21);
        let t = table(LaueClass::Cubic);
        for _ in 0..200 {
            let load = [
                rng.random_range(-1.0..1.0),
                rng.random_range(-1.0..1.0),
                rng.random_range(-1.0..1.0),
            ];
            let family = schmid_factor(LaueClass::Cubic, load).unwrap();
            let ops = schmid_factor_for_system(t, load, [1.0, 1.0, 1.0], [0.0, 1.0, -1.0]).unwrap();
            assert_abs_diff_eq!(family.factor, ops.factor, epsilon = 1e-12);
            assert!(family.factor <= 0.5 + 1e-12);
        }
    }

    #[test]
    fn test_missing_slip_family_is_an_error() {
        assert!(schmid_factor(LaueClass::Tetragonal, [0.0, 0.0, 1.0]).is_err());
        let q = Quaternion::identity();
        assert!(m_prime(LaueClass::OrthoRhombic, &q, &q, [0.0, 0.0, 1.0]).is_err());
        assert!(schmid_factor(LaueClass::Cubic, [0.0, 0.0, 0.0]).is_err());
        // Explicit systems work for every class.
        let sf = schmid_factor_for_system(
            table(LaueClass::Tetragonal),
            [0.0, 0.3, 1.0],
            [1.0, 0.0, 1.0],
            [-1.0, 0.0, 1.0],
        )
        .unwrap();
        assert!(sf.factor > 0.0 && sf.factor <= 0.5);
    }

    #[test]
    fn test_transfer_metrics() {
        let ld = [0.2, -0.4, 1.0];
        let q1 = eu2qu(&Euler::new(0.3, 0.7, 1.2));
        let q2 = eu2qu(&Euler::new(2.1, 0.4, 0.5));
        let c = LaueClass::Cubic;

        assert_abs_diff_eq!(m_prime(c, &q1, &q1, ld).unwrap(), 1.0, epsilon = 1e-12);
        let m12 = m_prime(c, &q1, &q2, ld).unwrap();
        assert!((0.0..=1.0 + 1e-12).contains(&m12));
        assert_abs_diff_eq!(m12, m_prime(c, &q2, &q1, ld).unwrap(), epsilon = 1e-12);

        for metric in [f1, f1spt, f7] {
            let at_max_sf = metric(c, &q1, &q2, ld, true).unwrap();
            let over_all = metric(c, &q1, &q2, ld, false).unwrap();
            assert!(at_max_sf > 0.0 && at_max_sf.is_finite());
            assert!(over_all >= at_max_sf - 1e-12);
        }

        // The load direction is normalized internally.
        let scaled = [2.0 * ld[0], 2.0 * ld[1], 2.0 * ld[2]];
        assert_abs_diff_eq!(
            f7(c, &q1, &q2, ld, true).unwrap(),
            f7(c, &q1, &q2, scaled, true).unwrap(),
            epsilon = 1e-12
        );
    }
}
