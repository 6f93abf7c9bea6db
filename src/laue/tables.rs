//! Compiled-in symmetry operator tables, one per Laue class.
//!
//! Each table stores its operators as unit quaternions. The matrix and
//! Rodrigues forms are derived from those quaternions when the table is
//! first touched, so the three forms always index the same physical
//! operator. Tables are built once behind a [`LazyLock`] and never mutated.
//!
//! | Class | Ops | ODF bins | Half-range angles |
//! |-------|-----|----------|-------------------|
//! | Cubic m3m | 24 | 18³ | π/4 |
//! | Cubic m3 | 12 | 36³ | π/2 |
//! | Hexagonal 6/mmm | 12 | 36·36·12 | π/2, π/2, π/6 |
//! | Hexagonal 6/m | 6 | 72·72·12 | π, π, π/6 |
//! | Trigonal -3m | 6 | 36·36·24 | π/2, π/2, π/3 |
//! | Trigonal -3 | 3 | 72·72·24 | π, π, π/3 |
//! | Tetragonal 4/mmm | 8 | 36·36·18 | π/2, π/2, π/4 |
//! | Tetragonal 4/m | 4 | 72·72·18 | π, π, π/4 |
//! | OrthoRhombic mmm | 4 | 36³ | π/2 |
//! | Monoclinic 2/m | 2 | 72·36·72 | π, π/2, π |
//! | Triclinic -1 | 1 | 72³ | π |

use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_2, FRAC_PI_3, FRAC_PI_4, FRAC_PI_6, PI};
use std::sync::LazyLock;

use nalgebra::Matrix3;

use super::LaueClass;
use crate::constants::ROD_INFINITY;
use crate::convert::{homochoric_radius, qu2om};
use crate::representation::Quaternion;

/// Operator table and histogram constants for one Laue class.
#[derive(Debug, Clone)]
pub struct SymmetryTable {
    pub class: LaueClass,
    pub quats: Vec<Quaternion<f64>>,
    pub mats: Vec<Matrix3<f64>>,
    /// Rodrigues vectors `tan(ω/2)·n`; half-turns use [`ROD_INFINITY`].
    pub rods: Vec<[f64; 3]>,
    pub has_inversion: bool,
    pub odf_num_bins: [usize; 3],
    /// Homochoric half-width of the binned region along each axis.
    pub odf_dim_init: [f64; 3],
    pub odf_dim_step: [f64; 3],
    pub mdf_plot_bins: usize,
}

impl SymmetryTable {
    pub fn num_ops(&self) -> usize {
        self.quats.len()
    }

    pub fn odf_size(&self) -> usize {
        self.odf_num_bins.iter().product()
    }

    /// The misorientation histogram uses the ODF grid.
    pub fn mdf_size(&self) -> usize {
        self.odf_size()
    }
}

static TABLES: LazyLock<Vec<SymmetryTable>> =
    LazyLock::new(|| LaueClass::ALL.iter().map(|c| build(*c)).collect());

/// Shared read-only table for `class`.
pub fn table(class: LaueClass) -> &'static SymmetryTable {
    &TABLES[class.index()]
}

// ── Operator lists, (x, y, z, w) ────────────────────────────────────────────

const R: f64 = FRAC_1_SQRT_2;
const S3: f64 = 0.866_025_403_784_438_6;

const CUBIC: [[f64; 4]; 24] = [
    [0.0, 0.0, 0.0, 1.0],
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [R, 0.0, 0.0, R],
    [0.0, R, 0.0, R],
    [0.0, 0.0, R, R],
    [-R, 0.0, 0.0, R],
    [0.0, -R, 0.0, R],
    [0.0, 0.0, -R, R],
    [R, R, 0.0, 0.0],
    [-R, R, 0.0, 0.0],
    [0.0, R, R, 0.0],
    [0.0, -R, R, 0.0],
    [R, 0.0, R, 0.0],
    [-R, 0.0, R, 0.0],
    [0.5, 0.5, 0.5, 0.5],
    [-0.5, -0.5, -0.5, 0.5],
    [0.5, -0.5, 0.5, 0.5],
    [-0.5, 0.5, -0.5, 0.5],
    [-0.5, 0.5, 0.5, 0.5],
    [0.5, -0.5, -0.5, 0.5],
    [-0.5, -0.5, 0.5, 0.5],
    [0.5, 0.5, -0.5, 0.5],
];

const CUBIC_LOW: [[f64; 4]; 12] = [
    [0.0, 0.0, 0.0, 1.0],
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.5, 0.5, 0.5, 0.5],
    [-0.5, -0.5, -0.5, 0.5],
    [0.5, -0.5, 0.5, 0.5],
    [-0.5, 0.5, -0.5, 0.5],
    [-0.5, 0.5, 0.5, 0.5],
    [0.5, -0.5, -0.5, 0.5],
    [-0.5, -0.5, 0.5, 0.5],
    [0.5, 0.5, -0.5, 0.5],
];

const HEXAGONAL: [[f64; 4]; 12] = [
    [0.0, 0.0, 0.0, 1.0],
    [0.0, 0.0, 0.5, S3],
    [0.0, 0.0, S3, 0.5],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, S3, -0.5],
    [0.0, 0.0, 0.5, -S3],
    [1.0, 0.0, 0.0, 0.0],
    [S3, 0.5, 0.0, 0.0],
    [0.5, S3, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [-0.5, S3, 0.0, 0.0],
    [-S3, 0.5, 0.0, 0.0],
];

const HEXAGONAL_LOW: [[f64; 4]; 6] = [
    [0.0, 0.0, 0.0, 1.0],
    [0.0, 0.0, 0.5, S3],
    [0.0, 0.0, S3, 0.5],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, S3, -0.5],
    [0.0, 0.0, 0.5, -S3],
];

const TRIGONAL: [[f64; 4]; 6] = [
    [0.0, 0.0, 0.0, 1.0],
    [0.0, 0.0, S3, 0.5],
    [0.0, 0.0, S3, -0.5],
    [1.0, 0.0, 0.0, 0.0],
    [0.5, S3, 0.0, 0.0],
    [-0.5, S3, 0.0, 0.0],
];

const TRIGONAL_LOW: [[f64; 4]; 3] = [
    [0.0, 0.0, 0.0, 1.0],
    [0.0, 0.0, S3, 0.5],
    [0.0, 0.0, S3, -0.5],
];

const TETRAGONAL: [[f64; 4]; 8] = [
    [0.0, 0.0, 0.0, 1.0],
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, R, -R],
    [0.0, 0.0, R, R],
    [R, R, 0.0, 0.0],
    [-R, R, 0.0, 0.0],
];

const TETRAGONAL_LOW: [[f64; 4]; 4] = [
    [0.0, 0.0, 0.0, 1.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, R, R],
    [0.0, 0.0, R, -R],
];

const ORTHORHOMBIC: [[f64; 4]; 4] = [
    [0.0, 0.0, 0.0, 1.0],
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
];

const MONOCLINIC: [[f64; 4]; 2] = [[0.0, 0.0, 0.0, 1.0], [0.0, 1.0, 0.0, 0.0]];

const TRICLINIC: [[f64; 4]; 1] = [[0.0, 0.0, 0.0, 1.0]];

// ── Construction ────────────────────────────────────────────────────────────

struct Layout {
    ops: &'static [[f64; 4]],
    bins: [usize; 3],
    half_range: [f64; 3],
    mdf_plot_bins: usize,
}

fn layout(class: LaueClass) -> Layout {
    use LaueClass::*;
    let (ops, bins, half_range, mdf_plot_bins): (&'static [[f64; 4]], _, _, _) = match class {
        Cubic => (&CUBIC, [18, 18, 18], [FRAC_PI_4; 3], 13),
        CubicLow => (&CUBIC_LOW, [36, 36, 36], [FRAC_PI_2; 3], 18),
        Hexagonal => (&HEXAGONAL, [36, 36, 12], [FRAC_PI_2, FRAC_PI_2, FRAC_PI_6], 36),
        HexagonalLow => (&HEXAGONAL_LOW, [72, 72, 12], [PI, PI, FRAC_PI_6], 36),
        Trigonal => (&TRIGONAL, [36, 36, 24], [FRAC_PI_2, FRAC_PI_2, FRAC_PI_3], 36),
        TrigonalLow => (&TRIGONAL_LOW, [72, 72, 24], [PI, PI, FRAC_PI_3], 36),
        Tetragonal => (&TETRAGONAL, [36, 36, 18], [FRAC_PI_2, FRAC_PI_2, FRAC_PI_4], 20),
        TetragonalLow => (&TETRAGONAL_LOW, [72, 72, 18], [PI, PI, FRAC_PI_4], 36),
        OrthoRhombic => (&ORTHORHOMBIC, [36, 36, 36], [FRAC_PI_2; 3], 36),
        Monoclinic => (&MONOCLINIC, [72, 36, 72], [PI, FRAC_PI_2, PI], 36),
        Triclinic => (&TRICLINIC, [72, 72, 72], [PI; 3], 36),
    };
    Layout {
        ops,
        bins,
        half_range,
        mdf_plot_bins,
    }
}

/// Rodrigues form of an operator; half-turns scale the axis so that its
/// largest component is [`ROD_INFINITY`].
fn rod_of(q: &Quaternion<f64>) -> [f64; 3] {
    let v = q.vector();
    if q.w.abs() < 1e-12 {
        let m = v.iter().fold(0.0_f64, |a, c| a.max(c.abs()));
        if m == 0.0 {
            return [0.0; 3];
        }
        return v.map(|c| if c.abs() < 1e-12 { 0.0 } else { c / m * ROD_INFINITY });
    }
    v.map(|c| c / q.w)
}

fn build(class: LaueClass) -> SymmetryTable {
    let l = layout(class);
    let quats: Vec<Quaternion<f64>> = l
        .ops
        .iter()
        .map(|[x, y, z, w]| Quaternion::new(*w, *x, *y, *z))
        .collect();
    debug_assert!(
        quats.iter().all(|q| (q.norm() - 1.0).abs() < 1e-12),
        "{:?} operator table holds a non-unit quaternion",
        class
    );
    let mats = quats.iter().map(|q| qu2om(q).to_matrix3()).collect();
    let rods = quats.iter().map(rod_of).collect();

    let odf_dim_init = l.half_range.map(homochoric_radius);
    let mut odf_dim_step = [0.0; 3];
    for k in 0..3 {
        odf_dim_step[k] = odf_dim_init[k] / (l.bins[k] / 2) as f64;
    }

    SymmetryTable {
        class,
        quats,
        mats,
        rods,
        has_inversion: true,
        odf_num_bins: l.bins,
        odf_dim_init,
        odf_dim_step,
        mdf_plot_bins: l.mdf_plot_bins,
    }
}
