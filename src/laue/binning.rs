//! Homochoric histogram binning for ODF/MDF accumulation and the inverse
//! bin-centre sampling used by texture generators.

use rand::RngExt;

use super::misorientation::{mdf_fz_rod, odf_fz_rod};
use super::tables::SymmetryTable;
use crate::convert::{eu2qu, ho2ro, qu2eu, ro2eu, ro2ho};
use crate::representation::{Euler, Homochoric, Rodrigues};

/// Flat bin index of a homochoric point: per axis
/// `floor((h + init) / step)` clamped to `[0, bins - 1]`, combined as
/// `i0 + i1·n0 + i2·n0·n1`.
pub(crate) fn homochoric_bin(table: &SymmetryTable, ho: &Homochoric<f64>) -> usize {
    let bins = table.odf_num_bins;
    let mut idx = [0usize; 3];
    for k in 0..3 {
        let v = ((ho.0[k] + table.odf_dim_init[k]) / table.odf_dim_step[k]).floor();
        // NaN falls through to 0
        idx[k] = if v >= bins[k] as f64 {
            bins[k] - 1
        } else if v > 0.0 {
            v as usize
        } else {
            0
        };
    }
    idx[0] + idx[1] * bins[0] + idx[2] * bins[0] * bins[1]
}

pub(crate) fn odf_bin(table: &SymmetryTable, ro: &Rodrigues<f64>) -> usize {
    homochoric_bin(table, &ro2ho(ro))
}

/// Same grid as the ODF.
pub(crate) fn miso_bin(table: &SymmetryTable, ro: &Rodrigues<f64>) -> usize {
    homochoric_bin(table, &ro2ho(ro))
}

/// Homochoric point inside bin `choose`, offset by `random ∈ [0,1)³`.
fn bin_point(table: &SymmetryTable, random: [f64; 3], choose: usize) -> Homochoric<f64> {
    let [n0, n1, _] = table.odf_num_bins;
    let phi = [choose % n0, (choose / n0) % n1, choose / (n0 * n1)];
    let mut h = [0.0; 3];
    for k in 0..3 {
        let step = table.odf_dim_step[k];
        h[k] = step * phi[k] as f64 + step * random[k] - table.odf_dim_init[k];
    }
    Homochoric(h)
}

pub(crate) fn determine_euler_angles(table: &SymmetryTable, random: [f64; 3], choose: usize) -> Euler<f64> {
    let ro = ho2ro(&bin_point(table, random, choose));
    ro2eu(&odf_fz_rod(table, &ro))
}

pub(crate) fn determine_rodrigues_vector(
    table: &SymmetryTable,
    random: [f64; 3],
    choose: usize,
) -> Rodrigues<f64> {
    let ro = ho2ro(&bin_point(table, random, choose));
    mdf_fz_rod(table, &ro)
}

/// Apply a uniformly chosen operator to `eu`.
pub(crate) fn random_symmetric_equivalent<R: RngExt + ?Sized>(
    table: &SymmetryTable,
    eu: &Euler<f64>,
    rng: &mut R,
) -> Euler<f64> {
    let op = &table.quats[rng.random_range(0..table.num_ops())];
    qu2eu(&op.multiply(&eu2qu(eu)))
}
