//! Apply a rotation to vectors and second-rank tensors.
//!
//! A passive rotation re-expresses a fixed vector in the rotated frame, which
//! is what an orientation matrix does directly (`M·v`). An active rotation
//! moves the vector within a fixed frame (`Mᵀ·v`).

use crate::real::Real;
use crate::representation::{OrientationMatrix, Quaternion};

/// Whether a rotation moves the object or the reference frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotationSense {
    Active,
    #[default]
    Passive,
}

/// Rotate `v` with an orientation matrix.
pub fn rotate_vector_om<T: Real>(om: &OrientationMatrix<T>, v: [T; 3], sense: RotationSense) -> [T; 3] {
    match sense {
        RotationSense::Passive => om.mul_vec(v),
        RotationSense::Active => om.transpose().mul_vec(v),
    }
}

/// Rotate `v` with a unit quaternion. Agrees with [`rotate_vector_om`] for
/// `om = qu2om(qu)`.
pub fn rotate_vector_qu<T: Real>(qu: &Quaternion<T>, v: [T; 3], sense: RotationSense) -> [T; 3] {
    let q = match sense {
        RotationSense::Passive => *qu,
        RotationSense::Active => qu.conjugate(),
    };
    // q v q*, expanded: v + 2w(u×v) + 2u×(u×v)
    let u = q.vector();
    let cross = |a: [T; 3], b: [T; 3]| {
        [
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ]
    };
    let two = T::lit(2.0);
    let uv = cross(u, v);
    let uuv = cross(u, uv);
    [
        v[0] + two * (q.w * uv[0] + uuv[0]),
        v[1] + two * (q.w * uv[1] + uuv[1]),
        v[2] + two * (q.w * uv[2] + uuv[2]),
    ]
}

/// Rotate a second-rank tensor: passive `M·A·Mᵀ`, active `Mᵀ·A·M`.
pub fn rotate_tensor2_om<T: Real>(
    om: &OrientationMatrix<T>,
    tensor: &[[T; 3]; 3],
    sense: RotationSense,
) -> [[T; 3]; 3] {
    let m = match sense {
        RotationSense::Passive => *om,
        RotationSense::Active => om.transpose(),
    };
    let mut out = [[T::zero(); 3]; 3];
    for (i, row) in out.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            let mut acc = T::zero();
            for k in 0..3 {
                for l in 0..3 {
                    acc = acc + m.get(i, k) * m.get(j, l) * tensor[k][l];
                }
            }
            *cell = acc;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::{eu2om, eu2qu, qu2om};
    use crate::representation::Euler;

    #[test]
    fn test_quaternion_and_matrix_agree() {
        let e = Euler::new(0.7_f64, 1.3, -0.4);
        let q = eu2qu(&e);
        let om = qu2om(&q);
        let v = [0.3, -1.2, 0.8];
        for sense in [RotationSense::Passive, RotationSense::Active] {
            let a = rotate_vector_om(&om, v, sense);
            let b = rotate_vector_qu(&q, v, sense);
            for k in 0..3 {
                assert!((a[k] - b[k]).abs() < 1e-12, "{:?}: {:?} vs {:?}", sense, a, b);
            }
        }
    }

    #[test]
    fn test_active_undoes_passive() {
        let om = eu2om(&Euler::new(0.2_f64, 0.9, 2.2));
        let v = [1.0, 2.0, 3.0];
        let back = rotate_vector_om(&om, rotate_vector_om(&om, v, RotationSense::Passive), RotationSense::Active);
        for k in 0..3 {
            assert!((back[k] - v[k]).abs() < 1e-12);
        }
    }

    #[test]
    fn test_tensor_trace_is_invariant() {
        let om = eu2om(&Euler::new(1.0_f64, 0.5, 0.25));
        let a = [[2.0, 0.1, 0.0], [0.1, 3.0, 0.4], [0.0, 0.4, 5.0]];
        let r = rotate_tensor2_om(&om, &a, RotationSense::Passive);
        let trace = r[0][0] + r[1][1] + r[2][2];
        assert!((trace - 10.0).abs() < 1e-12);
        let back = rotate_tensor2_om(&om, &r, RotationSense::Active);
        for i in 0..3 {
            for j in 0..3 {
                assert!((back[i][j] - a[i][j]).abs() < 1e-12);
            }
        }
    }
}
