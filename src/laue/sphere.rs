//! Unit-sphere coordinates of crystal pole families, the input to
//! pole-figure rendering.
//!
//! For every orientation `g` and every direction `v` of a family, the sample
//! frame direction `gᵀ·v` is stored followed by its antipode, so each
//! orientation contributes `6 · directions` floats per family.

use std::f64::consts::FRAC_1_SQRT_2;

use super::LaueClass;
use crate::convert::eu2om;
use crate::representation::{Euler, OrientationMatrix};

const S3: f64 = 0.577_350_269_189_625_8;
const H: f64 = 0.866_025_403_784_438_6;

/// Projected directions of one pole family.
#[derive(Debug, Clone)]
pub struct PoleFamily {
    /// Miller(-Bravais) label, e.g. `"011"` or `"11-20"`.
    pub label: &'static str,
    /// Crystal-frame unit directions (one per pole, antipodes implied).
    pub directions: Vec<[f64; 3]>,
    /// `[x, y, z]` triples, `2 · directions.len()` per orientation.
    pub coords: Vec<f32>,
}

impl PoleFamily {
    /// Number of sphere points written per orientation.
    pub fn points_per_orientation(&self) -> usize {
        2 * self.directions.len()
    }
}

/// Pole-family coordinates for a batch of orientations.
#[derive(Debug, Clone)]
pub struct SphereCoords {
    pub num_orientations: usize,
    pub families: Vec<PoleFamily>,
}

fn families(class: LaueClass) -> Vec<(&'static str, Vec<[f64; 3]>)> {
    use LaueClass::*;
    let r = FRAC_1_SQRT_2;
    match class {
        Cubic | CubicLow => vec![
            ("001", vec![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]),
            (
                "011",
                vec![
                    [r, r, 0.0],
                    [r, 0.0, r],
                    [0.0, r, r],
                    [-r, r, 0.0],
                    [-r, 0.0, r],
                    [0.0, -r, r],
                ],
            ),
            ("111", vec![[S3, S3, S3], [-S3, S3, S3], [S3, -S3, S3], [S3, S3, -S3]]),
        ],
        Hexagonal | HexagonalLow | Trigonal | TrigonalLow => vec![
            ("0001", vec![[0.0, 0.0, 1.0]]),
            ("11-20", vec![[1.0, 0.0, 0.0], [-0.5, H, 0.0], [-0.5, -H, 0.0]]),
            ("2-1-10", vec![[H, 0.5, 0.0], [0.0, 1.0, 0.0], [-H, 0.5, 0.0]]),
        ],
        Tetragonal | TetragonalLow => vec![
            ("001", vec![[0.0, 0.0, 1.0]]),
            ("100", vec![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]),
            ("110", vec![[r, r, 0.0], [-r, r, 0.0]]),
        ],
        OrthoRhombic | Monoclinic | Triclinic => vec![
            ("001", vec![[0.0, 0.0, 1.0]]),
            ("100", vec![[1.0, 0.0, 0.0]]),
            ("010", vec![[0.0, 1.0, 0.0]]),
        ],
    }
}

fn fill(g: &OrientationMatrix<f64>, directions: &[[f64; 3]], out: &mut [f32]) {
    let gt = g.transpose();
    for (v, slot) in directions.iter().zip(out.chunks_exact_mut(6)) {
        let p = gt.mul_vec(*v);
        for k in 0..3 {
            slot[k] = p[k] as f32;
            slot[k + 3] = -p[k] as f32;
        }
    }
}

pub(crate) fn sphere_coords_from_eulers(class: LaueClass, eulers: &[Euler<f32>]) -> SphereCoords {
    let to_matrix = |e: &Euler<f32>| eu2om(&Euler::new(e.phi1 as f64, e.phi as f64, e.phi2 as f64));

    #[cfg(feature = "parallel")]
    let mats: Vec<OrientationMatrix<f64>> = {
        use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
        eulers.par_iter().map(to_matrix).collect()
    };
    #[cfg(not(feature = "parallel"))]
    let mats: Vec<OrientationMatrix<f64>> = eulers.iter().map(to_matrix).collect();

    let families = families(class)
        .into_iter()
        .map(|(label, directions)| {
            let per = 6 * directions.len();
            let mut coords = vec![0.0_f32; per * mats.len()];

            #[cfg(feature = "parallel")]
            {
                use rayon::iter::{IndexedParallelIterator, IntoParallelRefIterator, ParallelIterator};
                use rayon::slice::ParallelSliceMut;
                coords
                    .par_chunks_mut(per)
                    .zip(mats.par_iter())
                    .for_each(|(out, g)| fill(g, &directions, out));
            }
            #[cfg(not(feature = "parallel"))]
            for (out, g) in coords.chunks_mut(per).zip(mats.iter()) {
                fill(g, &directions, out);
            }

            PoleFamily {
                label,
                directions,
                coords,
            }
        })
        .collect();

    SphereCoords {
        num_orientations: eulers.len(),
        families,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_reproduces_directions() {
        let sc = sphere_coords_from_eulers(LaueClass::Cubic, &[Euler::new(0.0, 0.0, 0.0)]);
        assert_eq!(sc.families.len(), 3);
        let f111 = &sc.families[2];
        assert_eq!(f111.label, "111");
        assert_eq!(f111.coords.len(), 24);
        for (i, d) in f111.directions.iter().enumerate() {
            for k in 0..3 {
                assert!((f111.coords[i * 6 + k] as f64 - d[k]).abs() < 1e-6);
                assert!((f111.coords[i * 6 + 3 + k] as f64 + d[k]).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_points_are_unit_and_sized_per_class() {
        let eulers: Vec<Euler<f32>> = (0..257)
            .map(|i| {
                let t = i as f32 / 257.0;
                Euler::new(6.0 * t, 3.0 * t, 1.0 + 5.0 * t)
            })
            .collect();
        for class in LaueClass::ALL {
            let sc = sphere_coords_from_eulers(class, &eulers);
            assert_eq!(sc.num_orientations, 257);
            for fam in &sc.families {
                assert_eq!(fam.coords.len(), 257 * 3 * fam.points_per_orientation());
                for p in fam.coords.chunks_exact(3) {
                    let n = (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt();
                    assert!((n - 1.0).abs() < 1e-5, "{} {}: {}", class, fam.label, n);
                }
            }
        }
    }

    #[test]
    fn test_quarter_turn_moves_x_pole() {
        // φ1 = 90°: sample-frame image of crystal [100] is gᵀ·x = (0, 1, 0).
        let sc = sphere_coords_from_eulers(
            LaueClass::OrthoRhombic,
            &[Euler::new(std::f32::consts::FRAC_PI_2, 0.0, 0.0)],
        );
        let f100 = &sc.families[1];
        assert_eq!(f100.label, "100");
        assert!(f100.coords[0].abs() < 1e-6);
        assert!((f100.coords[1] - 1.0).abs() < 1e-6);
    }
}
