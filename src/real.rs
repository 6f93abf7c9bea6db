//! Floating-point abstraction shared by every conversion routine.
//!
//! The engine runs at two independent widths, `f32` and `f64`. Each width
//! carries its own tolerances; nothing in the crate silently changes the
//! working precision. Width changes go through [`Real::as_f64`] /
//! [`Real::lit`] (see [`Rotation::cast`](crate::Rotation::cast)).

use std::fmt::{Debug, Display};

use num_traits::{Float, FloatConst};

/// Scalar type accepted by the conversion engine.
pub trait Real:
    Float + FloatConst + Default + Debug + Display + Send + Sync + 'static
{
    /// Tolerance on `|‖v‖ − 1|` used by the quaternion and axis-angle checks.
    const NORM_TOLERANCE: Self;
    /// Radicands below this are treated as zero when extracting a quaternion
    /// from an orientation matrix.
    const OM2QU_THRESHOLD: Self;
    /// Tolerance for the determinant and orthogonality tests of an
    /// orientation matrix.
    const OM_TOLERANCE: Self;

    /// Convert a literal. Constants in this crate are all exactly or nearly
    /// representable at both widths.
    fn lit(v: f64) -> Self;

    /// Widen to `f64`.
    fn as_f64(self) -> f64;
}

impl Real for f32 {
    const NORM_TOLERANCE: f32 = 1.0e-6;
    const OM2QU_THRESHOLD: f32 = 1.0e-6;
    const OM_TOLERANCE: f32 = 1.0e-5;

    #[inline]
    fn lit(v: f64) -> f32 {
        v as f32
    }

    #[inline]
    fn as_f64(self) -> f64 {
        self as f64
    }
}

impl Real for f64 {
    const NORM_TOLERANCE: f64 = 1.0e-10;
    const OM2QU_THRESHOLD: f64 = 1.0e-10;
    const OM_TOLERANCE: f64 = 1.0e-5;

    #[inline]
    fn lit(v: f64) -> f64 {
        v
    }

    #[inline]
    fn as_f64(self) -> f64 {
        self
    }
}

/// `|a − b| <= tol`
#[inline]
pub(crate) fn close_enough<T: Real>(a: T, b: T, tol: T) -> bool {
    (a - b).abs() <= tol
}

/// Clamp into `[-1, 1]` before `acos`, so rounding never produces NaN.
#[inline]
pub(crate) fn clamp_unit<T: Real>(v: T) -> T {
    v.max(-T::one()).min(T::one())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widths_have_distinct_tolerances() {
        assert!((f32::NORM_TOLERANCE as f64) > f64::NORM_TOLERANCE);
        assert!((f32::OM2QU_THRESHOLD as f64) > f64::OM2QU_THRESHOLD);
    }

    #[test]
    fn test_clamp_unit() {
        assert_eq!(clamp_unit(1.0000001_f64), 1.0);
        assert_eq!(clamp_unit(-2.0_f32), -1.0);
        assert_eq!(clamp_unit(0.25_f64), 0.25);
    }
}
