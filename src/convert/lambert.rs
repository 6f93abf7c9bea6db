//! Equal-volume mapping between the cubochoric cube and the homochoric ball.
//!
//! The cube is split into six square pyramids with apex at the origin. Each
//! point is permuted into the pyramid aligned with +z/−z, mapped through the
//! square-to-disc Lambert projection, and permuted back. Points outside the
//! domain map to the origin and emit a `tracing::debug!` diagnostic.

use tracing::debug;

use crate::constants::{AP_HALF, BETA, PI12, PREF, PREK, R1, R2, R24, SC, SQRT_PI};
use crate::real::{clamp_unit, Real};
use crate::representation::{Cubochoric, Homochoric};

/// Which of the six pyramids contains `xyz`; 1/2 are ±z, 3/4 ±x, 5/6 ±y.
fn pyramid<T: Real>(xyz: &[T; 3]) -> u8 {
    let [x, y, z] = *xyz;
    if x.abs() <= z && y.abs() <= z {
        1
    } else if x.abs() <= -z && y.abs() <= -z {
        2
    } else if z.abs() <= x && y.abs() <= x {
        3
    } else if z.abs() <= -x && y.abs() <= -x {
        4
    } else if x.abs() <= y && z.abs() <= y {
        5
    } else {
        6
    }
}

/// Rotate the pyramid's apex axis onto z.
fn to_z_pyramid<T: Real>(p: u8, v: [T; 3]) -> [T; 3] {
    match p {
        3 | 4 => [v[1], v[2], v[0]],
        5 | 6 => [v[2], v[0], v[1]],
        _ => v,
    }
}

fn from_z_pyramid<T: Real>(p: u8, v: [T; 3]) -> [T; 3] {
    match p {
        3 | 4 => [v[2], v[0], v[1]],
        5 | 6 => [v[1], v[2], v[0]],
        _ => v,
    }
}

#[inline]
fn sign<T: Real>(v: T) -> T {
    if v < T::zero() {
        -T::one()
    } else {
        T::one()
    }
}

/// Cubochoric to homochoric.
pub fn cu2ho<T: Real>(cu: &Cubochoric<T>) -> Homochoric<T> {
    let c = cu.0;
    let zero = T::zero();
    if c.iter().any(|v| v.abs() > T::lit(AP_HALF)) {
        debug!("cubochoric vector {:?} lies outside the cube", c);
        return Homochoric([zero; 3]);
    }
    if c.iter().all(|v| *v == zero) {
        return Homochoric([zero; 3]);
    }

    let p = pyramid(&c);
    let s = to_z_pyramid(p, c);
    let sc = T::lit(SC);
    let (x, y, z) = (s[0] * sc, s[1] * sc, s[2] * sc);
    let pref = T::lit(PREF);

    let lam = if x == zero && y == zero {
        [zero, zero, pref * z]
    } else {
        let r2 = T::lit(R2);
        let pi12 = T::lit(PI12);
        let prek = T::lit(PREK);
        let (t1, t2) = if y.abs() <= x.abs() {
            let (sn, cs) = (pi12 * y / x).sin_cos();
            let q = prek * x / (r2 - cs).sqrt();
            ((r2 * cs - T::one()) * q, r2 * sn * q)
        } else {
            let (sn, cs) = (pi12 * x / y).sin_cos();
            let q = prek * y / (r2 - cs).sqrt();
            (r2 * sn * q, (r2 * cs - T::one()) * q)
        };
        let c = t1 * t1 + t2 * t2;
        let s = T::PI() * c / (T::lit(24.0) * z * z);
        let c = T::lit(SQRT_PI) * c / T::lit(R24) / z;
        let q = (T::one() - s).max(zero).sqrt();
        [t1 * q, t2 * q, pref * z - c]
    };
    Homochoric(from_z_pyramid(p, lam))
}

/// Homochoric to cubochoric.
pub fn ho2cu<T: Real>(ho: &Homochoric<T>) -> Cubochoric<T> {
    let h = ho.0;
    let zero = T::zero();
    let rs = ho.norm();
    if rs > T::lit(R1) {
        debug!("homochoric vector {:?} lies outside the ball", h);
        return Cubochoric([zero; 3]);
    }
    if rs == zero {
        return Cubochoric([zero; 3]);
    }

    let p = pyramid(&h);
    let s = to_z_pyramid(p, h);

    // ball → cylinder-like intermediate
    let f = (T::lit(2.0) * rs / (rs + s[2].abs())).sqrt();
    let (x3, y3, z3) = (s[0] * f, s[1] * f, s[2]);

    // disc → square
    let qxy = x3 * x3 + y3 * y3;
    let sx = sign(x3);
    let sy = sign(y3);
    let (t1, t2) = if qxy == zero {
        (zero, zero)
    } else {
        let r2 = T::lit(R2);
        let pi12 = T::lit(PI12);
        let pre = T::lit(BETA) / r2 / T::lit(R1);
        if y3.abs() <= x3.abs() {
            let q2xy = qxy + x3 * x3;
            let sq2xy = q2xy.sqrt();
            let q = pre * (q2xy * qxy / (q2xy - x3.abs() * sq2xy)).sqrt();
            let tt = clamp_unit((y3 * y3 + x3.abs() * sq2xy) / r2 / qxy);
            let ac = tt.acos();
            (q * sx, q * sy * ac / pi12)
        } else {
            let q2xy = qxy + y3 * y3;
            let sq2xy = q2xy.sqrt();
            let q = pre * (q2xy * qxy / (q2xy - y3.abs() * sq2xy)).sqrt();
            let tt = clamp_unit((x3 * x3 + y3.abs() * sq2xy) / r2 / qxy);
            let ac = tt.acos();
            (q * sx * ac / pi12, q * sy)
        }
    };

    let sc = T::lit(SC);
    let xyz = [t1 / sc, t2 / sc, sign(z3) * rs / T::lit(PREF) / sc];
    Cubochoric(from_z_pyramid(p, xyz))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::AP;
    use rand::rngs::StdRng;
    use rand::{RngExt, SeedableRng};

    #[test]
    fn test_face_centre_maps_to_ball_surface() {
        let h = cu2ho(&Cubochoric([AP_HALF, 0.0, 0.0]));
        assert!((h.0[0] - R1).abs() < 1e-12, "{:?}", h);
        assert!(h.0[1].abs() < 1e-12 && h.0[2].abs() < 1e-12);
    }

    #[test]
    fn test_cube_ball_round_trip() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..5000 {
            let c = [
                rng.random_range(-AP / 2.0..AP / 2.0),
                rng.random_range(-AP / 2.0..AP / 2.0),
                rng.random_range(-AP / 2.0..AP / 2.0),
            ];
            let h = cu2ho(&Cubochoric(c));
            assert!(h.norm() <= R1 + 1e-12);
            let back = ho2cu(&h);
            for k in 0..3 {
                assert!((back.0[k] - c[k]).abs() < 1e-9, "{:?} -> {:?} -> {:?}", c, h, back);
            }
        }
    }

    #[test]
    fn test_out_of_domain_maps_to_origin() {
        assert_eq!(cu2ho(&Cubochoric([2.0_f64, 0.0, 0.0])).0, [0.0; 3]);
        assert_eq!(ho2cu(&Homochoric([1.0_f64, 1.0, 1.0])).0, [0.0; 3]);
    }

    #[test]
    fn test_pyramid_selection() {
        assert_eq!(pyramid(&[0.1_f64, 0.2, 0.5]), 1);
        assert_eq!(pyramid(&[0.1_f64, 0.2, -0.5]), 2);
        assert_eq!(pyramid(&[0.5_f64, 0.2, 0.1]), 3);
        assert_eq!(pyramid(&[-0.5_f64, 0.2, 0.1]), 4);
        assert_eq!(pyramid(&[0.1_f64, 0.5, 0.2]), 5);
        assert_eq!(pyramid(&[0.1_f64, -0.5, 0.2]), 6);
    }
}
