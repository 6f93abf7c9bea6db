//! Advisory validity checks, one per representation.
//!
//! A check never fails a conversion: it reports a [`CheckResult`] and the
//! caller decides what to do with it. Batch conversion only logs failures
//! (see [`converter`](crate::converter)).
//!
//! Codes: `1` means valid, negative codes identify the first failed test.

use std::fmt;

use crate::constants::{AP_HALF, R1};
use crate::real::Real;
use crate::representation::{
    AxisAngle, Cubochoric, Euler, Homochoric, OrientationMatrix, Quaternion, Rodrigues, Rotation,
};

/// Tolerance on the Rodrigues axis norm.
const RO_AXIS_TOLERANCE: f64 = 1.0e-6;

/// Outcome of a validity check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    /// `1` for valid input, otherwise a negative failure code.
    pub code: i32,
    /// Empty when valid.
    pub message: String,
}

impl CheckResult {
    pub fn ok() -> Self {
        Self { code: 1, message: String::new() }
    }

    fn fail(code: i32, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }

    pub fn is_ok(&self) -> bool {
        self.code > 0
    }
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_ok() {
            f.write_str("ok")
        } else {
            write!(f, "[{}] {}", self.code, self.message)
        }
    }
}

/// Range checks on φ1, Φ, φ2. The last failing angle determines the code.
pub fn eu_check<T: Real>(eu: &Euler<T>) -> CheckResult {
    let two_pi = T::TAU();
    let mut res = CheckResult::ok();
    if eu.phi1 < T::zero() || eu.phi1 > two_pi {
        res = CheckResult::fail(
            -1,
            "rotations:eu_check:: phi1 Euler angle outside of valid range [0,2pi]",
        );
    }
    if eu.phi < T::zero() || eu.phi > T::PI() {
        res = CheckResult::fail(
            -2,
            "rotations:eu_check:: Phi Euler angle outside of valid range [0,pi]",
        );
    }
    if eu.phi2 < T::zero() || eu.phi2 > two_pi {
        res = CheckResult::fail(
            -3,
            "rotations:eu_check:: phi2 Euler angle outside of valid range [0,2pi]",
        );
    }
    res
}

/// Determinant positive and unity, and `|M·Mᵀ| ≈ I` over all nine entries.
pub fn om_check<T: Real>(om: &OrientationMatrix<T>) -> CheckResult {
    let threshold = T::OM_TOLERANCE;
    let det = om.determinant();
    if det < T::zero() {
        return CheckResult::fail(
            -1,
            format!("rotations:om_check:: Determinant of rotation matrix must be positive: {}", det),
        );
    }
    if (det - T::one()).abs() > threshold {
        return CheckResult::fail(
            -2,
            format!(
                "rotations:om_check:: Determinant ({}) of rotation matrix must be unity (1.0)",
                det
            ),
        );
    }

    let product = om.multiply(&om.transpose());
    for row in 0..3 {
        for col in 0..3 {
            let expected = if row == col { T::one() } else { T::zero() };
            let value = product.get(row, col).abs();
            if (expected - value).abs() > threshold {
                return CheckResult::fail(
                    -3,
                    format!(
                        "rotations:om_check:: rotation matrix times transpose must be identity matrix: ({}, {}) = {}",
                        row, col, value
                    ),
                );
            }
        }
    }
    CheckResult::ok()
}

/// Non-negative scalar part and unit norm.
pub fn qu_check<T: Real>(qu: &Quaternion<T>) -> CheckResult {
    if qu.w < T::zero() {
        return CheckResult::fail(-1, "rotations:qu_check:: quaternion must have positive scalar part");
    }
    if (qu.norm() - T::one()).abs() > T::NORM_TOLERANCE {
        return CheckResult::fail(-2, "rotations:qu_check:: quaternion must have unit norm");
    }
    CheckResult::ok()
}

/// Angle in `[0, π]` and unit axis.
pub fn ax_check<T: Real>(ax: &AxisAngle<T>) -> CheckResult {
    if ax.angle < T::zero() || ax.angle > T::PI() {
        return CheckResult::fail(-1, "rotations:ax_check:: angle must be in range [0,pi]");
    }
    let [a, b, c] = ax.axis;
    let r = (a * a + b * b + c * c).sqrt();
    if (r - T::one()).abs() > T::NORM_TOLERANCE {
        return CheckResult::fail(
            -2,
            "rotations:ax_check:: axis-angle axis vector must have unit norm",
        );
    }
    CheckResult::ok()
}

/// Non-negative length and unit axis.
pub fn ro_check<T: Real>(ro: &Rodrigues<T>) -> CheckResult {
    if ro.length < T::zero() {
        return CheckResult::fail(
            -1,
            "rotations:ro_check:: Rodrigues-Frank vector has negative length",
        );
    }
    let [a, b, c] = ro.axis;
    let ttl = (a * a + b * b + c * c).sqrt();
    if (ttl - T::one()).abs() > T::lit(RO_AXIS_TOLERANCE) {
        return CheckResult::fail(
            -2,
            "rotations:ro_check:: Rodrigues-Frank axis vector not normalized",
        );
    }
    CheckResult::ok()
}

/// Inside or on the homochoric ball.
pub fn ho_check<T: Real>(ho: &Homochoric<T>) -> CheckResult {
    if ho.norm() > T::lit(R1) {
        return CheckResult::fail(-1, "rotations:ho_check:: homochoric vector outside homochoric ball");
    }
    CheckResult::ok()
}

/// Inside or on the cubochoric cube.
pub fn cu_check<T: Real>(cu: &Cubochoric<T>) -> CheckResult {
    let max_value = T::lit(AP_HALF);
    if cu.0.iter().any(|v| v.abs() > max_value) {
        return CheckResult::fail(-1, "rotations:cu_check:: cubochoric vector outside cube");
    }
    CheckResult::ok()
}

impl<T: Real> Rotation<T> {
    /// Run the check matching this value's kind.
    pub fn check(&self) -> CheckResult {
        match self {
            Rotation::Euler(v) => eu_check(v),
            Rotation::OrientationMatrix(v) => om_check(v),
            Rotation::Quaternion(v) => qu_check(v),
            Rotation::AxisAngle(v) => ax_check(v),
            Rotation::Rodrigues(v) => ro_check(v),
            Rotation::Homochoric(v) => ho_check(v),
            Rotation::Cubochoric(v) => cu_check(v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_euler_ranges() {
        assert!(eu_check(&Euler::new(0.1_f64, 0.2, 0.3)).is_ok());
        assert_eq!(eu_check(&Euler::new(-0.1_f64, 0.2, 0.3)).code, -1);
        assert_eq!(eu_check(&Euler::new(0.1_f64, 3.5, 0.3)).code, -2);
        assert_eq!(eu_check(&Euler::new(0.1_f64, 0.2, 7.0)).code, -3);
    }

    #[test]
    fn test_om_check_detects_every_off_diagonal_entry() {
        // Only the last row is skewed; a check that stops after one row
        // would miss this.
        let m = OrientationMatrix([1.0_f64, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.01, 1.0]);
        let res = om_check(&m);
        assert_eq!(res.code, -3, "{}", res);
        assert!(res.message.contains("(1, 2)"), "{}", res.message);
    }

    #[test]
    fn test_om_check_determinant() {
        let mirror = OrientationMatrix([-1.0_f32, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);
        assert_eq!(om_check(&mirror).code, -1);
        let scaled = OrientationMatrix([1.1_f64, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);
        assert_eq!(om_check(&scaled).code, -2);
        assert!(om_check(&OrientationMatrix::<f64>::identity()).is_ok());
    }

    fn skewed<T: Real>(eps: f64) -> OrientationMatrix<T> {
        let (o, z) = (T::one(), T::zero());
        OrientationMatrix([o, z, z, z, o, T::lit(eps), z, z, o])
    }

    #[test]
    fn test_om_tolerance_follows_width() {
        assert!(om_check(&skewed::<f32>(2.0e-6)).is_ok());
        assert!(om_check(&skewed::<f64>(2.0e-6)).is_ok());
        assert_eq!(om_check(&skewed::<f32>(1.0e-4)).code, -3);
        assert_eq!(om_check(&skewed::<f64>(1.0e-4)).code, -3);
    }

    #[test]
    fn test_quaternion_and_axis_checks() {
        assert_eq!(qu_check(&Quaternion::new(-1.0_f64, 0.0, 0.0, 0.0)).code, -1);
        assert_eq!(qu_check(&Quaternion::new(0.9_f64, 0.0, 0.0, 0.0)).code, -2);
        assert!(qu_check(&Quaternion::new(0.6_f32, 0.8, 0.0, 0.0)).is_ok());

        assert_eq!(ax_check(&AxisAngle::new([0.0_f64, 0.0, 1.0], 4.0)).code, -1);
        assert_eq!(ax_check(&AxisAngle::new([0.0_f64, 0.5, 1.0], 1.0)).code, -2);
        assert!(ax_check(&AxisAngle::new([0.0_f64, 0.0, 1.0], PI)).is_ok());
    }

    #[test]
    fn test_rodrigues_homochoric_cubochoric() {
        assert_eq!(ro_check(&Rodrigues::new([0.0_f64, 0.0, 1.0], -1.0)).code, -1);
        assert_eq!(ro_check(&Rodrigues::new([0.0_f64, 1.0, 1.0], 1.0)).code, -2);
        assert!(ro_check(&Rodrigues::new([0.0_f64, 0.0, 1.0], f64::INFINITY)).is_ok());

        assert_eq!(ho_check(&Homochoric([1.0_f64, 1.0, 0.0])).code, -1);
        assert!(ho_check(&Homochoric([0.5_f64, 0.5, 0.5])).is_ok());

        assert_eq!(cu_check(&Cubochoric([1.1_f64, 0.0, 0.0])).code, -1);
        assert!(cu_check(&Cubochoric([1.07_f64, -1.07, 1.07])).is_ok());
    }

    #[test]
    fn test_rotation_dispatch() {
        let r = Rotation::Euler(Euler::new(0.0_f64, 4.0, 0.0));
        let res = r.check();
        assert!(!res.is_ok());
        assert!(res.to_string().contains("eu_check"));
    }
}
