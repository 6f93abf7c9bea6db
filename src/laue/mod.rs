//! Crystal symmetry: the eleven Laue classes.
//!
//! [`LaueClass`] is a closed set of tags. Every operation dispatches to one
//! shared algorithm run over the class's [`SymmetryTable`]; only the
//! misorientation shortcut for m3m and the misorientation fundamental-zone
//! axis rule differ per class.
//!
//! # Operations
//!
//! | Method | Result |
//! |--------|--------|
//! | [`calculate_misorientation`](LaueClass::calculate_misorientation) | minimal-angle axis-angle between two orientations |
//! | [`nearest_quat`](LaueClass::nearest_quat) | equivalent of `q2` closest to `q1` |
//! | [`fz_quat`](LaueClass::fz_quat) | equivalent with the smallest rotation angle |
//! | [`odf_fz_rod`](LaueClass::odf_fz_rod) | equivalent Rodrigues vector nearest the origin |
//! | [`mdf_fz_rod`](LaueClass::mdf_fz_rod) | misorientation fundamental-zone Rodrigues vector |
//! | [`odf_bin`](LaueClass::odf_bin), [`miso_bin`](LaueClass::miso_bin) | homochoric histogram index |
//! | [`schmid_factor`](LaueClass::schmid_factor) | highest Schmid factor of the slip family |
//! | [`m_prime`](LaueClass::m_prime), [`f1`](LaueClass::f1), [`f7`](LaueClass::f7) | slip-transfer parameters |
//!
//! # Example
//!
//! ```
//! use ebsdrot::{eu2qu, Euler, LaueClass};
//!
//! let q1 = eu2qu(&Euler::from_degrees(10.0_f64, 20.0, 30.0));
//! let q2 = eu2qu(&Euler::from_degrees(100.0_f64, 20.0, 30.0));
//! let m = LaueClass::Cubic.calculate_misorientation(&q1, &q2);
//! assert!(m.angle.to_degrees() < 62.81);
//! ```

pub mod binning;
pub mod misorientation;
pub mod slip;
pub mod sphere;
pub mod tables;

use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use nalgebra::Matrix3;
use rand::RngExt;

pub use slip::SchmidFactor;
pub use sphere::{PoleFamily, SphereCoords};
pub use tables::SymmetryTable;

use crate::representation::{AxisAngle, Euler, Quaternion, Rodrigues};

/// Laue class of a crystal phase.
///
/// Discriminants follow the material-symmetry index used by EBSD file
/// readers (see [`LaueClass::from_index`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LaueClass {
    /// 6/mmm
    Hexagonal = 0,
    /// m3m
    #[default]
    Cubic = 1,
    /// 6/m
    HexagonalLow = 2,
    /// m3
    CubicLow = 3,
    /// -1
    Triclinic = 4,
    /// 2/m
    Monoclinic = 5,
    /// mmm
    OrthoRhombic = 6,
    /// 4/m
    TetragonalLow = 7,
    /// 4/mmm
    Tetragonal = 8,
    /// -3
    TrigonalLow = 9,
    /// -3m
    Trigonal = 10,
}

impl LaueClass {
    /// All classes in index order.
    pub const ALL: [LaueClass; 11] = [
        LaueClass::Hexagonal,
        LaueClass::Cubic,
        LaueClass::HexagonalLow,
        LaueClass::CubicLow,
        LaueClass::Triclinic,
        LaueClass::Monoclinic,
        LaueClass::OrthoRhombic,
        LaueClass::TetragonalLow,
        LaueClass::Tetragonal,
        LaueClass::TrigonalLow,
        LaueClass::Trigonal,
    ];

    pub fn from_index(index: u32) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Display name, e.g. `"Cubic m3m"`.
    pub fn name(self) -> &'static str {
        match self {
            LaueClass::Hexagonal => "Hexagonal 6/mmm",
            LaueClass::Cubic => "Cubic m3m",
            LaueClass::HexagonalLow => "Hexagonal 6/m",
            LaueClass::CubicLow => "Cubic m3 (Tetrahedral)",
            LaueClass::Triclinic => "Triclinic -1",
            LaueClass::Monoclinic => "Monoclinic 2/m",
            LaueClass::OrthoRhombic => "OrthoRhombic mmm",
            LaueClass::TetragonalLow => "Tetragonal 4/m",
            LaueClass::Tetragonal => "Tetragonal 4/mmm",
            LaueClass::TrigonalLow => "Trigonal -3",
            LaueClass::Trigonal => "Trigonal -3m",
        }
    }

    /// Hermann–Mauguin symbol of the Laue group.
    pub fn symbol(self) -> &'static str {
        match self {
            LaueClass::Hexagonal => "6/mmm",
            LaueClass::Cubic => "m3m",
            LaueClass::HexagonalLow => "6/m",
            LaueClass::CubicLow => "m3",
            LaueClass::Triclinic => "-1",
            LaueClass::Monoclinic => "2/m",
            LaueClass::OrthoRhombic => "mmm",
            LaueClass::TetragonalLow => "4/m",
            LaueClass::Tetragonal => "4/mmm",
            LaueClass::TrigonalLow => "-3",
            LaueClass::Trigonal => "-3m",
        }
    }

    pub fn table(self) -> &'static SymmetryTable {
        tables::table(self)
    }

    // ── Operator accessors ──────────────────────────────────────────────────

    pub fn num_sym_ops(self) -> usize {
        self.table().num_ops()
    }

    pub fn has_inversion(self) -> bool {
        self.table().has_inversion
    }

    pub fn odf_num_bins(self) -> [usize; 3] {
        self.table().odf_num_bins
    }

    pub fn odf_size(self) -> usize {
        self.table().odf_size()
    }

    pub fn mdf_size(self) -> usize {
        self.table().mdf_size()
    }

    pub fn mdf_plot_bins(self) -> usize {
        self.table().mdf_plot_bins
    }

    /// Operator `i` as a unit quaternion. Panics if `i >= num_sym_ops()`.
    pub fn quat_sym_op(self, i: usize) -> Quaternion<f64> {
        self.table().quats[i]
    }

    /// Operator `i` as a rotation matrix.
    pub fn mat_sym_op(self, i: usize) -> Matrix3<f64> {
        self.table().mats[i]
    }

    pub fn mat_sym_op_f32(self, i: usize) -> Matrix3<f32> {
        self.table().mats[i].map(|v| v as f32)
    }

    /// Operator `i` as a Rodrigues vector; half-turns carry a `1e10` stand-in
    /// for infinite length.
    pub fn rod_sym_op(self, i: usize) -> [f64; 3] {
        self.table().rods[i]
    }

    // ── Misorientation and fundamental zones ────────────────────────────────

    /// Minimal-angle rotation relating `q1` to `q2` up to symmetry.
    ///
    /// Identical inputs give angle 0 with axis `[0, 0, 1]`.
    pub fn calculate_misorientation(self, q1: &Quaternion<f64>, q2: &Quaternion<f64>) -> AxisAngle<f64> {
        match self {
            LaueClass::Cubic => misorientation::misorientation_cubic(q1, q2),
            _ => misorientation::misorientation_search(self.table(), q1, q2),
        }
    }

    /// Single-precision wrapper; the search runs in `f64`.
    pub fn calculate_misorientation_f32(self, q1: &Quaternion<f32>, q2: &Quaternion<f32>) -> AxisAngle<f32> {
        let up = |q: &Quaternion<f32>| Quaternion::new(q.w as f64, q.x as f64, q.y as f64, q.z as f64);
        let m = self.calculate_misorientation(&up(q1), &up(q2));
        AxisAngle::new(m.axis.map(|v| v as f32), m.angle as f32)
    }

    /// Symmetric equivalent of `q2` whose dot product with `q1` has the largest
    /// magnitude, returned with a non-negative scalar part.
    pub fn nearest_quat(self, q1: &Quaternion<f64>, q2: &Quaternion<f64>) -> Quaternion<f64> {
        misorientation::nearest_quat(self.table(), q1, q2)
    }

    /// Symmetric equivalent of `q` closest to the identity, scalar part ≥ 0.
    pub fn fz_quat(self, q: &Quaternion<f64>) -> Quaternion<f64> {
        misorientation::fz_quat(self.table(), q)
    }

    pub fn odf_fz_rod(self, ro: &Rodrigues<f64>) -> Rodrigues<f64> {
        misorientation::odf_fz_rod(self.table(), ro)
    }

    pub fn mdf_fz_rod(self, ro: &Rodrigues<f64>) -> Rodrigues<f64> {
        misorientation::mdf_fz_rod(self.table(), ro)
    }

    // ── Binning ─────────────────────────────────────────────────────────────

    /// ODF histogram index in `[0, odf_size())`.
    pub fn odf_bin(self, ro: &Rodrigues<f64>) -> usize {
        binning::odf_bin(self.table(), ro)
    }

    /// MDF histogram index in `[0, mdf_size())`.
    pub fn miso_bin(self, ro: &Rodrigues<f64>) -> usize {
        binning::miso_bin(self.table(), ro)
    }

    /// Euler angles of a point in ODF bin `choose`, jittered by
    /// `random ∈ [0,1)³` and reduced to the fundamental zone.
    pub fn determine_euler_angles(self, random: [f64; 3], choose: usize) -> Euler<f64> {
        binning::determine_euler_angles(self.table(), random, choose)
    }

    /// Rodrigues vector of a point in MDF bin `choose`, reduced to the
    /// misorientation fundamental zone.
    pub fn determine_rodrigues_vector(self, random: [f64; 3], choose: usize) -> Rodrigues<f64> {
        binning::determine_rodrigues_vector(self.table(), random, choose)
    }

    /// Apply a uniformly chosen symmetry operator to `eu`.
    pub fn random_symmetric_equivalent<R: RngExt + ?Sized>(self, eu: &Euler<f64>, rng: &mut R) -> Euler<f64> {
        binning::random_symmetric_equivalent(self.table(), eu, rng)
    }

    /// Pole-family sphere coordinates for every orientation.
    pub fn sphere_coords_from_eulers(self, eulers: &[Euler<f32>]) -> SphereCoords {
        sphere::sphere_coords_from_eulers(self, eulers)
    }

    // ── Slip systems ────────────────────────────────────────────────────────

    /// Highest Schmid factor of the built-in slip family for a crystal-frame
    /// load direction. Only m3m ({111}⟨110⟩) has one; other classes fail.
    pub fn schmid_factor(self, load: [f64; 3]) -> anyhow::Result<SchmidFactor> {
        slip::schmid_factor(self, load)
    }

    /// Highest Schmid factor over the symmetric equivalents of the slip
    /// system `(plane, direction)`. `slip_system` is the operator index.
    pub fn schmid_factor_for_system(
        self,
        load: [f64; 3],
        plane: [f64; 3],
        direction: [f64; 3],
    ) -> anyhow::Result<SchmidFactor> {
        slip::schmid_factor_for_system(self.table(), load, plane, direction)
    }

    /// Luster–Morris m′ between two grains loaded along sample direction `ld`.
    pub fn m_prime(self, q1: &Quaternion<f64>, q2: &Quaternion<f64>, ld: [f64; 3]) -> anyhow::Result<f64> {
        slip::m_prime(self, q1, q2, ld)
    }

    /// Fracture-initiation parameter F1. With `max_sf` only the most stressed
    /// system of grain 1 is scored, otherwise the best system.
    pub fn f1(self, q1: &Quaternion<f64>, q2: &Quaternion<f64>, ld: [f64; 3], max_sf: bool) -> anyhow::Result<f64> {
        slip::f1(self, q1, q2, ld, max_sf)
    }

    /// F1 weighted by slip-plane alignment.
    pub fn f1spt(self, q1: &Quaternion<f64>, q2: &Quaternion<f64>, ld: [f64; 3], max_sf: bool) -> anyhow::Result<f64> {
        slip::f1spt(self, q1, q2, ld, max_sf)
    }

    pub fn f7(self, q1: &Quaternion<f64>, q2: &Quaternion<f64>, ld: [f64; 3], max_sf: bool) -> anyhow::Result<f64> {
        slip::f7(self, q1, q2, ld, max_sf)
    }
}

impl fmt::Display for LaueClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LaueClass {
    type Err = anyhow::Error;

    /// Accepts the variant name, the display name or the symbol,
    /// case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        LaueClass::ALL
            .iter()
            .copied()
            .find(|c| {
                s.eq_ignore_ascii_case(c.name())
                    || s.eq_ignore_ascii_case(c.symbol())
                    || s.eq_ignore_ascii_case(&format!("{:?}", c))
            })
            .ok_or_else(|| anyhow!("unknown Laue class '{}'", s))
    }
}
