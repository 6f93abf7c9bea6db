//! # ebsdrot
//!
//! Rotation **representation conversions** and **crystal-symmetry reductions**
//! for EBSD orientation data.
//!
//! A 3D rotation can be written in seven interchangeable forms. `ebsdrot`
//! converts between any two of them, at 32- or 64-bit precision, and reduces
//! orientations to their crystallographically unique representative under
//! one of the eleven Laue classes.
//!
//! ## Features
//!
//! - **Seven representations**: Bunge Euler angles, orientation matrix,
//!   quaternion, axis-angle, Rodrigues–Frank vector, homochoric and
//!   cubochoric vectors
//! - **All 49 conversion pairs**: direct closed forms where they exist, fixed
//!   composite routes elsewhere, with explicit handling of zero rotations,
//!   half-turns and gimbal lock
//! - **Advisory validity checks**: one per representation, never fatal
//! - **Batch conversion**: flat arrays converted in parallel chunks with
//!   [rayon](https://docs.rs/rayon) (default `parallel` feature)
//! - **Laue classes**: symmetry operators, misorientation, fundamental-zone
//!   reduction, homochoric ODF/MDF binning, pole-figure sphere coordinates
//! - **Selectable quaternion layout**: scalar-first or vector-first memory
//!   order at every quaternion boundary
//!
//! ## Example
//!
//! ```
//! use ebsdrot::{
//!     convert_array, ConvertConfig, Euler, LaueClass, OrientationArray, RepresentationKind,
//!     eu2qu,
//! };
//!
//! // Single values
//! let q = eu2qu(&Euler::from_degrees(90.0_f64, 0.0, 0.0));
//! assert!((q.w - 0.5_f64.sqrt()).abs() < 1e-12);
//!
//! // Whole arrays
//! let eulers = OrientationArray::new(
//!     "phase 1",
//!     RepresentationKind::Euler,
//!     vec![0.1_f32, 0.2, 0.3, 1.0, 0.5, 2.0],
//! )
//! .unwrap();
//! let quats = convert_array(&eulers, RepresentationKind::Quaternion, &ConvertConfig::default())
//!     .unwrap();
//! assert_eq!(quats.num_tuples(), 2);
//!
//! // Symmetry
//! let m = LaueClass::Cubic.calculate_misorientation(&q, &q);
//! assert!(m.angle.abs() < 1e-6);
//! ```
//!
//! ## Conventions
//!
//! - Rotations are **passive** ([`constants::PASSIVE`] = +1).
//! - Euler angles are radians in `[0, 2π] × [0, π] × [0, 2π]`.
//! - Quaternions returned by the engine have a non-negative scalar part.
//! - Rodrigues vectors are stored as unit axis plus length; a half-turn has
//!   length `+∞`.
//!
//! ## Credits
//!
//! - D. Rowenhorst, A. D. Rollett, G. S. Rohrer, M. Groeber, M. Jackson,
//!   P. J. Konijnenberg & M. De Graef, "Consistent representations of and
//!   conversions between 3D rotations," MSMSE 23 (2015) 083501
//! - D. Rosca, A. Morawiec & M. De Graef, "A new method of constructing a grid
//!   in the space of 3D rotations and its applications to texture analysis,"
//!   MSMSE 22 (2014) 075013
//! - The EMsoft and EbsdLib projects, whose conventions this crate follows
//!

pub mod check;
pub mod constants;
pub mod convert;
pub mod converter;
pub mod laue;
mod real;
pub mod representation;
pub mod rotate;

pub use check::{
    ax_check, cu_check, eu_check, ho_check, om_check, qu_check, ro_check, CheckResult,
};
pub use convert::*;
pub use converter::{convert_array, convert_slice, ConvertConfig, OrientationArray};
pub use laue::{LaueClass, PoleFamily, SchmidFactor, SphereCoords, SymmetryTable};
pub use real::Real;
pub use representation::{
    AxisAngle, Cubochoric, Euler, Homochoric, OrientationMatrix, QuatLayout, Quaternion,
    RepresentationKind, Rodrigues, Rotation,
};
pub use rotate::{rotate_tensor2_om, rotate_vector_om, rotate_vector_qu, RotationSense};

// Double-precision aliases for the common case
pub type EulerD = Euler<f64>;
pub type QuaternionD = Quaternion<f64>;
pub type AxisAngleD = AxisAngle<f64>;
pub type RodriguesD = Rodrigues<f64>;
