//! Conversions without a direct formula, and dispatch by kind.
//!
//! The intermediate representation of every composite route is fixed, since
//! it affects rounding:
//!
//! | pair | route |
//! |---|---|
//! | ax → eu | ax → om → eu |
//! | eu → ho | eu → ax → ho |
//! | om → ro | om → eu → ro |
//! | om → ho | om → ax → ho |
//! | ro → om | ro → ax → om |
//! | ro → eu | ro → om → eu |
//! | ro → qu | ro → ax → qu |
//! | ho → eu/om/ro/qu | ho → ax → … |
//! | * → cu | * → ho → cu |
//! | cu → * | cu → ho → * |

use super::*;
use crate::representation::{Cubochoric, QuatLayout, RepresentationKind, Rotation};

pub fn ax2eu<T: Real>(a: &AxisAngle<T>) -> Euler<T> {
    om2eu(&ax2om(a))
}

pub fn eu2ho<T: Real>(e: &Euler<T>) -> Homochoric<T> {
    ax2ho(&eu2ax(e))
}

pub fn om2ro<T: Real>(om: &OrientationMatrix<T>) -> Rodrigues<T> {
    eu2ro(&om2eu(om))
}

pub fn om2ho<T: Real>(om: &OrientationMatrix<T>) -> Homochoric<T> {
    ax2ho(&om2ax(om))
}

pub fn ro2om<T: Real>(r: &Rodrigues<T>) -> OrientationMatrix<T> {
    ax2om(&ro2ax(r))
}

pub fn ro2eu<T: Real>(r: &Rodrigues<T>) -> Euler<T> {
    om2eu(&ro2om(r))
}

pub fn ro2qu<T: Real>(r: &Rodrigues<T>) -> Quaternion<T> {
    ax2qu(&ro2ax(r))
}

pub fn ho2eu<T: Real>(h: &Homochoric<T>) -> Euler<T> {
    ax2eu(&ho2ax(h))
}

pub fn ho2om<T: Real>(h: &Homochoric<T>) -> OrientationMatrix<T> {
    ax2om(&ho2ax(h))
}

pub fn ho2ro<T: Real>(h: &Homochoric<T>) -> Rodrigues<T> {
    ax2ro(&ho2ax(h))
}

pub fn ho2qu<T: Real>(h: &Homochoric<T>) -> Quaternion<T> {
    ax2qu(&ho2ax(h))
}

// ── through homochoric to the cube ──

pub fn eu2cu<T: Real>(e: &Euler<T>) -> Cubochoric<T> {
    ho2cu(&eu2ho(e))
}

pub fn om2cu<T: Real>(om: &OrientationMatrix<T>) -> Cubochoric<T> {
    ho2cu(&om2ho(om))
}

pub fn ax2cu<T: Real>(a: &AxisAngle<T>) -> Cubochoric<T> {
    ho2cu(&ax2ho(a))
}

pub fn ro2cu<T: Real>(r: &Rodrigues<T>) -> Cubochoric<T> {
    ho2cu(&ro2ho(r))
}

pub fn qu2cu<T: Real>(q: &Quaternion<T>) -> Cubochoric<T> {
    ho2cu(&qu2ho(q))
}

// ── from the cube through homochoric ──

pub fn cu2eu<T: Real>(c: &Cubochoric<T>) -> Euler<T> {
    ho2eu(&cu2ho(c))
}

pub fn cu2om<T: Real>(c: &Cubochoric<T>) -> OrientationMatrix<T> {
    ho2om(&cu2ho(c))
}

pub fn cu2ax<T: Real>(c: &Cubochoric<T>) -> AxisAngle<T> {
    ho2ax(&cu2ho(c))
}

pub fn cu2ro<T: Real>(c: &Cubochoric<T>) -> Rodrigues<T> {
    ho2ro(&cu2ho(c))
}

pub fn cu2qu<T: Real>(c: &Cubochoric<T>) -> Quaternion<T> {
    ho2qu(&cu2ho(c))
}

// ── dispatch ────────────────────────────────────────────────────────────────

impl<T: Real> Rotation<T> {
    /// Convert to `dst`. Converting to the same kind returns a copy.
    pub fn convert_to(&self, dst: RepresentationKind) -> Rotation<T> {
        use RepresentationKind as K;
        match (self, dst) {
            (Rotation::Euler(v), K::Euler) => Rotation::Euler(*v),
            (Rotation::Euler(v), K::OrientationMatrix) => Rotation::OrientationMatrix(eu2om(v)),
            (Rotation::Euler(v), K::Quaternion) => Rotation::Quaternion(eu2qu(v)),
            (Rotation::Euler(v), K::AxisAngle) => Rotation::AxisAngle(eu2ax(v)),
            (Rotation::Euler(v), K::Rodrigues) => Rotation::Rodrigues(eu2ro(v)),
            (Rotation::Euler(v), K::Homochoric) => Rotation::Homochoric(eu2ho(v)),
            (Rotation::Euler(v), K::Cubochoric) => Rotation::Cubochoric(eu2cu(v)),

            (Rotation::OrientationMatrix(v), K::Euler) => Rotation::Euler(om2eu(v)),
            (Rotation::OrientationMatrix(v), K::OrientationMatrix) => Rotation::OrientationMatrix(*v),
            (Rotation::OrientationMatrix(v), K::Quaternion) => Rotation::Quaternion(om2qu(v)),
            (Rotation::OrientationMatrix(v), K::AxisAngle) => Rotation::AxisAngle(om2ax(v)),
            (Rotation::OrientationMatrix(v), K::Rodrigues) => Rotation::Rodrigues(om2ro(v)),
            (Rotation::OrientationMatrix(v), K::Homochoric) => Rotation::Homochoric(om2ho(v)),
            (Rotation::OrientationMatrix(v), K::Cubochoric) => Rotation::Cubochoric(om2cu(v)),

            (Rotation::Quaternion(v), K::Euler) => Rotation::Euler(qu2eu(v)),
            (Rotation::Quaternion(v), K::OrientationMatrix) => Rotation::OrientationMatrix(qu2om(v)),
            (Rotation::Quaternion(v), K::Quaternion) => Rotation::Quaternion(*v),
            (Rotation::Quaternion(v), K::AxisAngle) => Rotation::AxisAngle(qu2ax(v)),
            (Rotation::Quaternion(v), K::Rodrigues) => Rotation::Rodrigues(qu2ro(v)),
            (Rotation::Quaternion(v), K::Homochoric) => Rotation::Homochoric(qu2ho(v)),
            (Rotation::Quaternion(v), K::Cubochoric) => Rotation::Cubochoric(qu2cu(v)),

            (Rotation::AxisAngle(v), K::Euler) => Rotation::Euler(ax2eu(v)),
            (Rotation::AxisAngle(v), K::OrientationMatrix) => Rotation::OrientationMatrix(ax2om(v)),
            (Rotation::AxisAngle(v), K::Quaternion) => Rotation::Quaternion(ax2qu(v)),
            (Rotation::AxisAngle(v), K::AxisAngle) => Rotation::AxisAngle(*v),
            (Rotation::AxisAngle(v), K::Rodrigues) => Rotation::Rodrigues(ax2ro(v)),
            (Rotation::AxisAngle(v), K::Homochoric) => Rotation::Homochoric(ax2ho(v)),
            (Rotation::AxisAngle(v), K::Cubochoric) => Rotation::Cubochoric(ax2cu(v)),

            (Rotation::Rodrigues(v), K::Euler) => Rotation::Euler(ro2eu(v)),
            (Rotation::Rodrigues(v), K::OrientationMatrix) => Rotation::OrientationMatrix(ro2om(v)),
            (Rotation::Rodrigues(v), K::Quaternion) => Rotation::Quaternion(ro2qu(v)),
            (Rotation::Rodrigues(v), K::AxisAngle) => Rotation::AxisAngle(ro2ax(v)),
            (Rotation::Rodrigues(v), K::Rodrigues) => Rotation::Rodrigues(*v),
            (Rotation::Rodrigues(v), K::Homochoric) => Rotation::Homochoric(ro2ho(v)),
            (Rotation::Rodrigues(v), K::Cubochoric) => Rotation::Cubochoric(ro2cu(v)),

            (Rotation::Homochoric(v), K::Euler) => Rotation::Euler(ho2eu(v)),
            (Rotation::Homochoric(v), K::OrientationMatrix) => Rotation::OrientationMatrix(ho2om(v)),
            (Rotation::Homochoric(v), K::Quaternion) => Rotation::Quaternion(ho2qu(v)),
            (Rotation::Homochoric(v), K::AxisAngle) => Rotation::AxisAngle(ho2ax(v)),
            (Rotation::Homochoric(v), K::Rodrigues) => Rotation::Rodrigues(ho2ro(v)),
            (Rotation::Homochoric(v), K::Homochoric) => Rotation::Homochoric(*v),
            (Rotation::Homochoric(v), K::Cubochoric) => Rotation::Cubochoric(ho2cu(v)),

            (Rotation::Cubochoric(v), K::Euler) => Rotation::Euler(cu2eu(v)),
            (Rotation::Cubochoric(v), K::OrientationMatrix) => Rotation::OrientationMatrix(cu2om(v)),
            (Rotation::Cubochoric(v), K::Quaternion) => Rotation::Quaternion(cu2qu(v)),
            (Rotation::Cubochoric(v), K::AxisAngle) => Rotation::AxisAngle(cu2ax(v)),
            (Rotation::Cubochoric(v), K::Rodrigues) => Rotation::Rodrigues(cu2ro(v)),
            (Rotation::Cubochoric(v), K::Homochoric) => Rotation::Homochoric(cu2ho(v)),
            (Rotation::Cubochoric(v), K::Cubochoric) => Rotation::Cubochoric(*v),
        }
    }
}

/// Convert one flat tuple from `src` to `dst`.
///
/// `input` and `output` must hold exactly the component counts of their kinds.
/// Quaternions on either side are read/written in `layout`.
pub fn convert_tuple<T: Real>(
    src: RepresentationKind,
    dst: RepresentationKind,
    input: &[T],
    output: &mut [T],
    layout: QuatLayout,
) -> anyhow::Result<()> {
    Rotation::from_slice(src, input, layout)?
        .convert_to(dst)
        .write_to(output, layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn max_diff(a: &[f64], b: &[f64]) -> f64 {
        a.iter().zip(b).map(|(x, y)| (x - y).abs()).fold(0.0, f64::max)
    }

    #[test]
    fn test_every_pair_returns_the_destination_kind() {
        let start = Rotation::Euler(Euler::new(0.4_f64, 1.1, 2.3));
        for src in RepresentationKind::ALL {
            let s = start.convert_to(src);
            for dst in RepresentationKind::ALL {
                let d = s.convert_to(dst);
                assert_eq!(d.kind(), dst, "{} -> {}", src, dst);
            }
        }
    }

    #[test]
    fn test_every_pair_preserves_the_rotation() {
        let reference = eu2om(&Euler::new(0.4_f64, 1.1, 2.3));
        let start = Rotation::OrientationMatrix(reference);
        for src in RepresentationKind::ALL {
            let s = start.convert_to(src);
            for dst in RepresentationKind::ALL {
                let back = s.convert_to(dst).convert_to(RepresentationKind::OrientationMatrix);
                let Rotation::OrientationMatrix(m) = back else {
                    panic!("expected matrix");
                };
                let d = max_diff(&m.0, &reference.0);
                assert!(d < 1e-6, "{} -> {}: max diff {}", src, dst, d);
            }
        }
    }

    #[test]
    fn test_rodrigues_half_turn_to_axis_angle() {
        let r = Rotation::Rodrigues(Rodrigues::new([0.0_f64, 0.0, 1.0], f64::INFINITY));
        let Rotation::AxisAngle(ax) = r.convert_to(RepresentationKind::AxisAngle) else {
            panic!("expected axis-angle");
        };
        assert_eq!(ax.as_array(), [0.0, 0.0, 1.0, PI]);
    }

    #[test]
    fn test_convert_tuple_scalar_first_identity() {
        let mut out = [9.0_f64; 4];
        convert_tuple(
            RepresentationKind::Quaternion,
            RepresentationKind::AxisAngle,
            &[1.0, 0.0, 0.0, 0.0],
            &mut out,
            QuatLayout::ScalarVector,
        )
        .unwrap();
        assert_eq!(out, [0.0, 0.0, 1.0, 0.0]);

        let mut bad = [0.0_f64; 3];
        assert!(convert_tuple(
            RepresentationKind::Quaternion,
            RepresentationKind::AxisAngle,
            &[1.0, 0.0, 0.0, 0.0],
            &mut bad,
            QuatLayout::ScalarVector,
        )
        .is_err());
    }
}
