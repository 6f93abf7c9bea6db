//! Numeric constants of the cube/ball/homochoric mappings.
//!
//! All values follow D. Rosca, A. Morawiec & M. De Graef, "A new method of
//! constructing a grid in the space of 3D rotations and its applications to
//! texture analysis", MSMSE 22 (2014) 075013.

/// Rotation sign convention, +1 = passive. Fixed for the whole process.
pub const PASSIVE: f64 = 1.0;

/// Edge length of the cubochoric cube, π^(2/3).
pub const AP: f64 = 2.145_029_397_111_025;
/// Half cube edge; the largest allowed cubochoric component magnitude.
pub const AP_HALF: f64 = AP / 2.0;
/// Scale between the cube and the equal-volume inscribed pyramid frame.
pub const SC: f64 = 0.897_772_786_961_286;
/// π^(5/6) / 6^(1/6) / 2
pub const BETA: f64 = 0.962_874_509_979_126;
/// Radius of the homochoric ball, (3π/4)^(1/3).
pub const R1: f64 = 1.330_670_039_491_469;
pub const R2: f64 = std::f64::consts::SQRT_2;
pub const PI12: f64 = std::f64::consts::PI / 12.0;
pub const PREK: f64 = 1.643_456_402_972_504;
pub const R24: f64 = 4.898_979_485_566_356;
/// √(6/π)
pub const PREF: f64 = 1.381_976_597_885_342;
/// √π
pub const SQRT_PI: f64 = 1.772_453_850_905_516;

/// Polynomial fit of `cos(ω/2)` as a function of `|h|²` used to invert the
/// homochoric map. Maximum angular error is about 2e-9 rad over [0, π].
pub const TFIT: [f64; 16] = [
    1.000_000_000_001_885_2,
    -0.500_000_000_219_484_7,
    -0.024_999_992_127_593_126,
    -0.003_928_701_544_781_374,
    -0.000_815_270_153_545_043_8,
    -0.000_200_950_042_611_971_2,
    -0.000_023_979_867_760_717_56,
    -0.000_082_028_689_266_058_41,
    0.000_124_487_150_420_900_92,
    -0.000_174_911_421_482_257_7,
    0.000_170_348_193_414_005_4,
    -0.000_120_620_650_041_168_28,
    0.000_059_719_705_868_660_826,
    -0.000_019_807_567_239_656_47,
    0.000_003_953_714_684_212_874,
    -0.000_000_365_550_014_397_195_44,
];

/// Stand-in for an infinite Rodrigues component in the symmetry tables.
pub const ROD_INFINITY: f64 = 1.0e10;
