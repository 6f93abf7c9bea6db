//! Misorientation and fundamental-zone reduction over a symmetry table.
//!
//! All searches compose each operator on the left (`op · q`) and keep the
//! first operator that reaches the optimum, so ties resolve in table order.

use super::tables::SymmetryTable;
use super::LaueClass;
use crate::convert::{ax2ro, qu2ro, ro2ax, ro2qu};
use crate::representation::{AxisAngle, Quaternion, Rodrigues};

const SQRT_2: f64 = std::f64::consts::SQRT_2;

/// Minimal-angle misorientation by enumerating the table.
pub(crate) fn misorientation_search(
    table: &SymmetryTable,
    q1: &Quaternion<f64>,
    q2: &Quaternion<f64>,
) -> AxisAngle<f64> {
    let qr = q1.multiply(&q2.conjugate());
    let mut best_angle = f64::MAX;
    let mut best_axis = [0.0, 0.0, 1.0];
    for op in &table.quats {
        let qc = op.multiply(&qr).to_positive_scalar();
        let v = qc.vector();
        let n = norm3(v);
        let angle = 2.0 * n.atan2(qc.w);
        if angle < best_angle {
            best_angle = angle;
            best_axis = if n == 0.0 { [0.0, 0.0, 1.0] } else { v.map(|c| c / n) };
        }
    }
    AxisAngle::new(best_axis, best_angle)
}

/// Closed form for m3m.
///
/// Sorting the magnitudes of `q1·q2*` as `a ≤ b ≤ c ≤ d`, the largest
/// scalar part reachable by a cubic operator is the maximum of `d`,
/// `(c + d)/√2` and `(a + b + c + d)/2`. The axis is reported in the
/// reduced frame of the winning case.
pub(crate) fn misorientation_cubic(q1: &Quaternion<f64>, q2: &Quaternion<f64>) -> AxisAngle<f64> {
    let qc = q1.multiply(&q2.conjugate());
    let mut s = [qc.x.abs(), qc.y.abs(), qc.z.abs(), qc.w.abs()];
    s.sort_by(|a, b| a.total_cmp(b));
    let [a, b, c, d] = s;

    let w1 = d;
    let w2 = (c + d) / SQRT_2;
    let w3 = (a + b + c + d) / 2.0;
    let (w, v) = if w3 > w1.max(w2) {
        (w3, [(a - b + c - d) / 2.0, (a + b - c - d) / 2.0, (-a + b + c - d) / 2.0])
    } else if w2 > w1 {
        (w2, [(a - b) / SQRT_2, (a + b) / SQRT_2, (c - d) / SQRT_2])
    } else {
        (w1, [a, b, c])
    };

    // atan2 keeps small angles accurate where acos(w ≈ 1) would not.
    let n = norm3(v);
    let angle = 2.0 * n.atan2(w);
    let axis = if n == 0.0 || !n.is_finite() {
        [0.0, 0.0, 1.0]
    } else {
        v.map(|c| c / n)
    };
    AxisAngle::new(axis, angle)
}

fn norm3(v: [f64; 3]) -> f64 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

/// Symmetric equivalent of `q2` closest to `q1`, scalar part non-negative.
///
/// `q` and `-q` are the same orientation, so candidates are ranked by the
/// magnitude of their dot product with `q1`.
pub(crate) fn nearest_quat(
    table: &SymmetryTable,
    q1: &Quaternion<f64>,
    q2: &Quaternion<f64>,
) -> Quaternion<f64> {
    let mut largest = f64::MIN;
    let mut best = *q2;
    for op in &table.quats {
        let qc = op.multiply(q2);
        let dot = qc.dot(q1).abs();
        if dot > largest {
            largest = dot;
            best = qc;
        }
    }
    best.to_positive_scalar()
}

/// Symmetric equivalent of `q` with the smallest rotation angle.
pub(crate) fn fz_quat(table: &SymmetryTable, q: &Quaternion<f64>) -> Quaternion<f64> {
    let mut smallest = f64::MAX;
    let mut best = *q;
    for op in &table.quats {
        let qc = op.multiply(q);
        let dist = 1.0 - qc.w * qc.w;
        if dist < smallest {
            smallest = dist;
            best = qc;
        }
    }
    best.to_positive_scalar()
}

/// Equivalent Rodrigues vector nearest the origin.
///
/// Composing Rodrigues vectors directly breaks down when either factor is a
/// half-turn, so the composition runs on quaternions; minimum Rodrigues norm
/// and maximum `|w|` select the same operator.
pub(crate) fn odf_fz_rod(table: &SymmetryTable, ro: &Rodrigues<f64>) -> Rodrigues<f64> {
    qu2ro(&fz_quat(table, &ro2qu(ro)))
}

/// Misorientation fundamental zone: reduce to the ODF zone, then fold the
/// axis with the class rule. The angle is unchanged.
pub(crate) fn mdf_fz_rod(table: &SymmetryTable, ro: &Rodrigues<f64>) -> Rodrigues<f64> {
    let ax = ro2ax(&odf_fz_rod(table, ro));
    let axis = fold_axis(table.class, ax.axis);
    ax2ro(&AxisAngle::new(axis, ax.angle))
}

/// Rotate the in-plane part of `v` to azimuth `theta`.
fn with_azimuth(v: [f64; 3], theta: f64) -> [f64; 3] {
    let rho = v[0].hypot(v[1]);
    let (s, c) = theta.sin_cos();
    [rho * c, rho * s, v[2]]
}

fn azimuth(v: [f64; 3]) -> f64 {
    v[1].atan2(v[0])
}

/// Flip the whole axis into the upper half-space.
fn upper(v: [f64; 3]) -> [f64; 3] {
    if v[2] < 0.0 {
        v.map(|c| -c)
    } else {
        v
    }
}

fn fold_axis(class: LaueClass, axis: [f64; 3]) -> [f64; 3] {
    use LaueClass::*;
    let deg = std::f64::consts::PI / 180.0;
    match class {
        Cubic | CubicLow => {
            let mut n = axis.map(f64::abs);
            n.sort_by(|a, b| b.total_cmp(a));
            n
        }
        Tetragonal | OrthoRhombic => axis.map(f64::abs),
        Hexagonal => {
            let n = axis.map(f64::abs);
            let mut theta = azimuth(n);
            if theta > 60.0 * deg {
                theta = 120.0 * deg - theta;
            }
            if theta > 30.0 * deg {
                theta = 60.0 * deg - theta;
            }
            with_azimuth(n, theta)
        }
        HexagonalLow => {
            let n = [axis[0], axis[1], axis[2].abs()];
            with_azimuth(n, azimuth(n).rem_euclid(60.0 * deg))
        }
        Trigonal => {
            let n = upper(axis);
            let mut theta = azimuth(n).rem_euclid(120.0 * deg);
            if theta < 30.0 * deg {
                theta = 60.0 * deg - theta;
            }
            if theta > 90.0 * deg {
                theta = 180.0 * deg - theta;
            }
            with_azimuth(n, theta)
        }
        TrigonalLow => {
            let n = upper(axis);
            with_azimuth(n, azimuth(n).rem_euclid(120.0 * deg))
        }
        TetragonalLow => {
            let n = [axis[0], axis[1], axis[2].abs()];
            with_azimuth(n, azimuth(n).rem_euclid(90.0 * deg))
        }
        Monoclinic => {
            let mut n = axis;
            n[1] = n[1].abs();
            if n[2] < 0.0 {
                n[0] = -n[0];
                n[2] = -n[2];
            }
            n
        }
        Triclinic => upper(axis),
    }
}
