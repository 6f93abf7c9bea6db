//! Closed-form conversions between rotation representations.
//!
//! Functions are named `<src>2<dst>` after the two-letter codes of
//! [`RepresentationKind::short_name`](crate::RepresentationKind::short_name).
//! This module holds the direct formulas; pairs without one are composed in
//! [`routes`], and the cube/ball mapping lives in [`lambert`].
//!
//! All formulas follow D. Rowenhorst et al., "Consistent representations of
//! and conversions between 3D rotations", MSMSE 23 (2015) 083501, with the
//! passive convention `P = +1` ([`PASSIVE`]).
//!
//! # Degenerate inputs
//!
//! - Zero rotation: axis-angle results use the identity sentinel
//!   `([0, 0, 1], 0)`, Rodrigues and homochoric results are all zero.
//! - Half-turn: the Rodrigues length is `+∞`; no formula divides by `sin(ω/2)`
//!   close to zero.
//! - Gimbal lock (Φ = 0 or π): φ2 is set to 0 and φ1 carries the whole
//!   rotation about the z axis.
//!
//! Inputs are never rejected. Invalid values produce best-effort output;
//! use [`check`](crate::check) first when that matters.

pub mod lambert;
pub mod routes;

pub use lambert::{cu2ho, ho2cu};
pub use routes::*;

use crate::constants::{PASSIVE, TFIT};
use crate::real::{clamp_unit, close_enough, Real};
use crate::representation::{
    AxisAngle, Euler, Homochoric, OrientationMatrix, Quaternion, Rodrigues,
};

#[inline]
fn p<T: Real>() -> T {
    T::lit(PASSIVE)
}

/// Map a negative angle into `[0, period)`. The offset of 100π keeps the
/// dividend positive so that the sign of `%` never matters.
#[inline]
fn wrap_negative<T: Real>(angle: T, period: T) -> T {
    if angle < T::zero() {
        (angle + T::lit(100.0) * T::PI()) % period
    } else {
        angle
    }
}

fn normalize_euler<T: Real>(phi1: T, phi: T, phi2: T) -> Euler<T> {
    let two_pi = T::TAU();
    Euler::new(
        wrap_negative(phi1, two_pi),
        wrap_negative(phi, T::PI()),
        wrap_negative(phi2, two_pi),
    )
}

#[inline]
fn norm3<T: Real>(v: [T; 3]) -> T {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

/// `(¾(ω − sin ω))^(1/3)`, the homochoric radius for angle ω.
#[inline]
pub(crate) fn homochoric_radius<T: Real>(omega: T) -> T {
    (T::lit(0.75) * (omega - omega.sin())).cbrt()
}

// ── Euler angles ────────────────────────────────────────────────────────────

/// Euler angles to orientation matrix. Entries below 1e-7 in magnitude are
/// flushed to zero.
pub fn eu2om<T: Real>(e: &Euler<T>) -> OrientationMatrix<T> {
    let eps = T::lit(1.0e-7);
    let (s1, c1) = e.phi1.sin_cos();
    let (s, c) = e.phi.sin_cos();
    let (s2, c2) = e.phi2.sin_cos();
    let mut om = [
        c1 * c2 - s1 * s2 * c,
        s1 * c2 + c1 * s2 * c,
        s2 * s,
        -c1 * s2 - s1 * c2 * c,
        -s1 * s2 + c1 * c2 * c,
        c2 * s,
        s1 * s,
        -c1 * s,
        c,
    ];
    for v in om.iter_mut() {
        if v.abs() < eps {
            *v = T::zero();
        }
    }
    OrientationMatrix(om)
}

/// Euler angles to axis-angle pair.
pub fn eu2ax<T: Real>(e: &Euler<T>) -> AxisAngle<T> {
    let thr = T::lit(1.0e-6);
    let half = T::lit(0.5);
    let t = (e.phi * half).tan();
    let sig = half * (e.phi1 + e.phi2);
    let del = half * (e.phi1 - e.phi2);
    let tau = (t * t + sig.sin() * sig.sin()).sqrt();

    let alpha = if close_enough(sig, T::FRAC_PI_2(), thr) {
        T::PI()
    } else {
        T::lit(2.0) * (tau / sig.cos()).atan()
    };
    if alpha.abs() < thr {
        return AxisAngle::identity();
    }

    let pp = p::<T>();
    let mut axis = [
        -pp * t * del.cos() / tau,
        -pp * t * del.sin() / tau,
        -pp * sig.sin() / tau,
    ];
    let mut angle = alpha;
    if alpha < T::zero() {
        axis = axis.map(|v| -v);
        angle = -angle;
    }
    AxisAngle::new(axis, angle)
}

/// Euler angles to Rodrigues vector, through [`eu2ax`].
pub fn eu2ro<T: Real>(e: &Euler<T>) -> Rodrigues<T> {
    let thr = T::lit(1.0e-6);
    let ax = eu2ax(e);
    let t = ax.angle;
    if (t - T::PI()).abs() < thr {
        return Rodrigues::new(ax.axis, T::infinity());
    }
    if t == T::zero() {
        return Rodrigues::zero();
    }
    Rodrigues::new(ax.axis, (t * T::lit(0.5)).tan())
}

/// Euler angles to quaternion with a non-negative scalar part.
pub fn eu2qu<T: Real>(e: &Euler<T>) -> Quaternion<T> {
    let half = T::lit(0.5);
    let ee = [e.phi1 * half, e.phi * half, e.phi2 * half];
    let (s_phi, c_phi) = ee[1].sin_cos();
    let (sm, cm) = (ee[0] - ee[2]).sin_cos();
    let (sp, cp) = (ee[0] + ee[2]).sin_cos();
    let pp = p::<T>();
    let q = Quaternion::new(c_phi * cp, -pp * s_phi * cm, -pp * s_phi * sm, -pp * c_phi * sp);
    q.to_positive_scalar()
}

// ── Orientation matrix ──────────────────────────────────────────────────────

/// Orientation matrix to Euler angles.
///
/// When `|om[8]| ≈ 1` the matrix is a pure rotation about z and φ2 is set
/// to zero.
pub fn om2eu<T: Real>(om: &OrientationMatrix<T>) -> Euler<T> {
    let o = &om.0;
    let tol = T::lit(1.0e-6);
    let (phi1, phi, phi2) = if !close_enough(o[8].abs(), T::one(), tol) {
        let phi = o[8].acos();
        let zeta = T::one() / (T::one() - o[8] * o[8]).sqrt();
        (
            (o[6] * zeta).atan2(-o[7] * zeta),
            phi,
            (o[2] * zeta).atan2(o[5] * zeta),
        )
    } else if close_enough(o[8], T::one(), tol) {
        (o[1].atan2(o[0]), T::zero(), T::zero())
    } else {
        (-(-o[1]).atan2(o[0]), T::PI(), T::zero())
    };
    normalize_euler(phi1, phi, phi2)
}

/// Orientation matrix to quaternion.
///
/// The magnitudes come from the diagonal, the signs from the off-diagonal
/// differences. A final pass aligns the vector part with the axis recovered
/// through [`om2eu`] and [`eu2ax`], which resolves sign ambiguities near
/// half-turns.
pub fn om2qu<T: Real>(om: &OrientationMatrix<T>) -> Quaternion<T> {
    let o = &om.0;
    let thr = T::OM2QU_THRESHOLD;
    let root = |v: T| {
        if v.abs() <= thr {
            T::zero()
        } else {
            v.max(T::zero()).sqrt()
        }
    };
    let one = T::one();
    let half = T::lit(0.5);
    let s = root(o[0] + o[4] + o[8] + one);
    let s1 = root(o[0] - o[4] - o[8] + one);
    let s2 = root(-o[0] + o[4] - o[8] + one);
    let s3 = root(-o[0] - o[4] + o[8] + one);

    let pp = p::<T>();
    let mut q = Quaternion::new(s * half, s1 * half, s2 * half, s3 * half);
    if o[7] < o[5] {
        q.x = -pp * q.x;
    }
    if o[2] < o[6] {
        q.y = -pp * q.y;
    }
    if o[3] < o[1] {
        q.z = -pp * q.z;
    }
    let n = q.norm();
    if n != T::zero() {
        q = Quaternion::new(q.w / n, q.x / n, q.y / n, q.z / n);
    }

    let oax = eu2ax(&om2eu(om));
    if oax.axis[0] * q.x < T::zero() {
        q.x = -q.x;
    }
    if oax.axis[1] * q.y < T::zero() {
        q.y = -q.y;
    }
    if oax.axis[2] * q.z < T::zero() {
        q.z = -q.z;
    }
    q
}

/// Orientation matrix to axis-angle pair, through [`om2qu`].
pub fn om2ax<T: Real>(om: &OrientationMatrix<T>) -> AxisAngle<T> {
    qu2ax(&om2qu(om))
}

// ── Axis-angle ──────────────────────────────────────────────────────────────

/// Axis-angle pair to orientation matrix.
pub fn ax2om<T: Real>(a: &AxisAngle<T>) -> OrientationMatrix<T> {
    let (s, c) = a.angle.sin_cos();
    let omc = T::one() - c;
    let [a0, a1, a2] = a.axis;
    let mut res = [T::zero(); 9];
    res[0] = a0 * a0 * omc + c;
    res[4] = a1 * a1 * omc + c;
    res[8] = a2 * a2 * omc + c;

    // The passive convention stores the transpose of the active matrix.
    let (i01, i10, i12, i21, i02, i20) = if PASSIVE == 1.0 {
        (3, 1, 7, 5, 6, 2)
    } else {
        (1, 3, 5, 7, 2, 6)
    };
    let q = omc * a0 * a1;
    res[i01] = q + s * a2;
    res[i10] = q - s * a2;
    let q = omc * a1 * a2;
    res[i12] = q + s * a0;
    res[i21] = q - s * a0;
    let q = omc * a2 * a0;
    res[i02] = q - s * a1;
    res[i20] = q + s * a1;
    OrientationMatrix(res)
}

/// Axis-angle pair to quaternion.
pub fn ax2qu<T: Real>(a: &AxisAngle<T>) -> Quaternion<T> {
    if a.angle == T::zero() {
        return Quaternion::identity();
    }
    let (s, c) = (a.angle * T::lit(0.5)).sin_cos();
    Quaternion::new(c, a.axis[0] * s, a.axis[1] * s, a.axis[2] * s)
}

/// Axis-angle pair to homochoric vector.
pub fn ax2ho<T: Real>(a: &AxisAngle<T>) -> Homochoric<T> {
    let f = homochoric_radius(a.angle);
    Homochoric(a.axis.map(|v| v * f))
}

/// Axis-angle pair to Rodrigues vector. Angles within 1e-7 of π give an
/// infinite length.
pub fn ax2ro<T: Real>(a: &AxisAngle<T>) -> Rodrigues<T> {
    if a.angle == T::zero() {
        return Rodrigues::zero();
    }
    let length = if (a.angle - T::PI()).abs() < T::lit(1.0e-7) {
        T::infinity()
    } else {
        (a.angle * T::lit(0.5)).tan()
    };
    Rodrigues::new(a.axis, length)
}

// ── Rodrigues vector ────────────────────────────────────────────────────────

/// Rodrigues vector to axis-angle pair.
pub fn ro2ax<T: Real>(r: &Rodrigues<T>) -> AxisAngle<T> {
    let ta = r.length;
    if ta == T::zero() {
        return AxisAngle::identity();
    }
    if ta == T::infinity() {
        return AxisAngle::new(r.axis, T::PI());
    }
    let angle = T::lit(2.0) * ta.atan();
    let n = norm3(r.axis);
    if n == T::zero() {
        return AxisAngle::identity();
    }
    AxisAngle::new(r.axis.map(|v| v / n), angle)
}

/// Rodrigues vector to homochoric vector.
pub fn ro2ho<T: Real>(r: &Rodrigues<T>) -> Homochoric<T> {
    let [a, b, c] = r.axis;
    if (a == T::zero() && b == T::zero() && c == T::zero()) || r.length == T::zero() {
        return Homochoric([T::zero(); 3]);
    }
    let f = if r.length == T::infinity() {
        T::lit(0.75) * T::PI()
    } else {
        let t = T::lit(2.0) * r.length.atan();
        T::lit(0.75) * (t - t.sin())
    };
    let f = f.cbrt();
    Homochoric(r.axis.map(|v| v * f))
}

// ── Quaternion ──────────────────────────────────────────────────────────────

/// Quaternion to Euler angles.
pub fn qu2eu<T: Real>(q: &Quaternion<T>) -> Euler<T> {
    let two = T::lit(2.0);
    let (w, x, y, z) = (q.w, q.x, q.y, q.z);
    let q03 = w * w + z * z;
    let q12 = x * x + y * y;
    let chi = (q03 * q12).sqrt();
    let pp = p::<T>();

    let (phi1, phi, phi2) = if chi == T::zero() {
        if q12 == T::zero() {
            ((-pp * two * w * z).atan2(w * w - z * z), T::zero(), T::zero())
        } else {
            ((two * x * y).atan2(x * x - y * y), T::PI(), T::zero())
        }
    } else {
        let phi = (two * chi).atan2(q03 - q12);
        let chi = T::one() / chi;
        if PASSIVE == 1.0 {
            (
                ((-w * y + x * z) * chi).atan2((-w * x - y * z) * chi),
                phi,
                ((w * y + x * z) * chi).atan2((-w * x + y * z) * chi),
            )
        } else {
            (
                ((w * y + x * z) * chi).atan2((w * x - y * z) * chi),
                phi,
                ((-w * y + x * z) * chi).atan2((w * x + y * z) * chi),
            )
        }
    };
    normalize_euler(phi1, phi, phi2)
}

/// Quaternion to orientation matrix.
pub fn qu2om<T: Real>(q: &Quaternion<T>) -> OrientationMatrix<T> {
    let two = T::lit(2.0);
    let (w, x, y, z) = (q.w, q.x, q.y, q.z);
    let qq = w * w - (x * x + y * y + z * z);
    let om = OrientationMatrix([
        qq + two * x * x,
        two * (x * y - w * z),
        two * (x * z + w * y),
        two * (y * x + w * z),
        qq + two * y * y,
        two * (y * z - w * x),
        two * (z * x - w * y),
        two * (z * y + w * x),
        qq + two * z * z,
    ]);
    if PASSIVE == 1.0 {
        om
    } else {
        om.transpose()
    }
}

/// Quaternion to axis-angle pair.
///
/// The quaternion is first mapped to its non-negative-scalar equivalent so
/// that the axis and angle describe the same rotation.
pub fn qu2ax<T: Real>(q: &Quaternion<T>) -> AxisAngle<T> {
    let qo = q.to_positive_scalar();
    let omega = T::lit(2.0) * clamp_unit(qo.w).acos();
    if omega < T::lit(1.0e-12) {
        return AxisAngle::new([T::zero(), T::zero(), p::<T>()], T::zero());
    }
    let n = norm3(qo.vector());
    if n == T::zero() {
        return AxisAngle::identity();
    }
    AxisAngle::new(qo.vector().map(|v| v / n), omega)
}

/// Quaternion to Rodrigues vector. `q` and `-q` give the same result.
pub fn qu2ro<T: Real>(q: &Quaternion<T>) -> Rodrigues<T> {
    let q = q.to_positive_scalar();
    let thr = T::lit(1.0e-8);
    if q.w < thr {
        return Rodrigues::new(q.vector(), T::infinity());
    }
    let s = norm3(q.vector());
    if s < thr {
        return Rodrigues::zero();
    }
    Rodrigues::new(q.vector().map(|v| v / s), clamp_unit(q.w).acos().tan())
}

/// Quaternion to homochoric vector. `q` and `-q` give the same result.
pub fn qu2ho<T: Real>(q: &Quaternion<T>) -> Homochoric<T> {
    let q = q.to_positive_scalar();
    let omega = T::lit(2.0) * clamp_unit(q.w).acos();
    let n = norm3(q.vector());
    if omega == T::zero() || n == T::zero() {
        return Homochoric([T::zero(); 3]);
    }
    let f = homochoric_radius(omega) / n;
    Homochoric(q.vector().map(|v| v * f))
}

// ── Homochoric vector ───────────────────────────────────────────────────────

/// Homochoric vector to axis-angle pair, inverting the radius with the
/// [`TFIT`] polynomial.
pub fn ho2ax<T: Real>(h: &Homochoric<T>) -> AxisAngle<T> {
    let [h0, h1, h2] = h.0;
    let hmag = h0 * h0 + h1 * h1 + h2 * h2;
    if hmag == T::zero() {
        return AxisAngle::identity();
    }
    let inv = T::one() / hmag.sqrt();
    let hn = h.0.map(|v| v * inv);

    let mut s = T::lit(TFIT[0]) + T::lit(TFIT[1]) * hmag;
    let mut hm = hmag;
    for c in TFIT.iter().skip(2) {
        hm = hm * hmag;
        s = s + T::lit(*c) * hm;
    }
    let s = T::lit(2.0) * clamp_unit(s).acos();
    let angle = if (s - T::PI()).abs() < T::lit(1.0e-8) { T::PI() } else { s };
    AxisAngle::new(hn, angle)
}
