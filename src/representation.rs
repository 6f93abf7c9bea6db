//! The seven rotation parameterizations as small fixed-size value types.
//!
//! Every type is a plain `Copy` tuple over a [`Real`] scalar. Construction
//! never validates; use [`check`](crate::check) when the domain invariants
//! matter. The [`Rotation`] enum tags a value with its kind so that arrays of
//! mixed provenance can be dispatched by [`RepresentationKind`].
//!
//! | kind | components | domain |
//! |---|---|---|
//! | [`Euler`] | 3 | φ1∈[0,2π], Φ∈[0,π], φ2∈[0,2π] |
//! | [`OrientationMatrix`] | 9 | row-major, orthogonal, det = +1 |
//! | [`Quaternion`] | 4 | unit norm, w ≥ 0 |
//! | [`AxisAngle`] | 4 | unit axis, ω∈[0,π] |
//! | [`Rodrigues`] | 4 | unit axis, tan(ω/2) ≥ 0, may be +∞ |
//! | [`Homochoric`] | 3 | ‖h‖ ≤ R1 |
//! | [`Cubochoric`] | 3 | max\|c\| ≤ π^(2/3)/2 |

use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, ensure};

use crate::real::Real;

// ── Kinds ───────────────────────────────────────────────────────────────────

/// Identifies one of the seven parameterizations.
///
/// The declaration order is the canonical order used by array converters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepresentationKind {
    Euler,
    OrientationMatrix,
    Quaternion,
    AxisAngle,
    Rodrigues,
    Homochoric,
    Cubochoric,
}

impl RepresentationKind {
    /// All kinds in canonical order.
    pub const ALL: [RepresentationKind; 7] = [
        RepresentationKind::Euler,
        RepresentationKind::OrientationMatrix,
        RepresentationKind::Quaternion,
        RepresentationKind::AxisAngle,
        RepresentationKind::Rodrigues,
        RepresentationKind::Homochoric,
        RepresentationKind::Cubochoric,
    ];

    /// Number of scalars per tuple.
    pub fn component_count(self) -> usize {
        match self {
            RepresentationKind::Euler => 3,
            RepresentationKind::OrientationMatrix => 9,
            RepresentationKind::Quaternion => 4,
            RepresentationKind::AxisAngle => 4,
            RepresentationKind::Rodrigues => 4,
            RepresentationKind::Homochoric => 3,
            RepresentationKind::Cubochoric => 3,
        }
    }

    /// Human-readable name, e.g. `"Orientation Matrix"`.
    pub fn name(self) -> &'static str {
        match self {
            RepresentationKind::Euler => "Euler",
            RepresentationKind::OrientationMatrix => "Orientation Matrix",
            RepresentationKind::Quaternion => "Quaternion",
            RepresentationKind::AxisAngle => "Axis-Angle",
            RepresentationKind::Rodrigues => "Rodrigues",
            RepresentationKind::Homochoric => "Homochoric",
            RepresentationKind::Cubochoric => "Cubochoric",
        }
    }

    /// Two-letter code used in conversion function names (`eu`, `om`, ...).
    pub fn short_name(self) -> &'static str {
        match self {
            RepresentationKind::Euler => "eu",
            RepresentationKind::OrientationMatrix => "om",
            RepresentationKind::Quaternion => "qu",
            RepresentationKind::AxisAngle => "ax",
            RepresentationKind::Rodrigues => "ro",
            RepresentationKind::Homochoric => "ho",
            RepresentationKind::Cubochoric => "cu",
        }
    }

    /// Position in [`RepresentationKind::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for RepresentationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RepresentationKind {
    type Err = anyhow::Error;

    /// Accepts the full name or the two-letter code, case-insensitively.
    fn from_str(s: &str) -> anyhow::Result<Self> {
        let needle = s.trim();
        RepresentationKind::ALL
            .iter()
            .copied()
            .find(|k| {
                k.name().eq_ignore_ascii_case(needle) || k.short_name().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| anyhow!("unknown rotation representation '{}'", s))
    }
}

/// Memory order of the four quaternion components in a flat array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum QuatLayout {
    /// `(w, x, y, z)`
    ScalarVector,
    /// `(x, y, z, w)`
    #[default]
    VectorScalar,
}

impl QuatLayout {
    /// Indices of `(w, x, y, z)` in a flat 4-tuple.
    #[inline]
    pub fn indices(self) -> [usize; 4] {
        match self {
            QuatLayout::ScalarVector => [0, 1, 2, 3],
            QuatLayout::VectorScalar => [3, 0, 1, 2],
        }
    }
}

// ── Value types ─────────────────────────────────────────────────────────────

/// Bunge Euler angles (ZXZ), radians.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Euler<T> {
    pub phi1: T,
    pub phi: T,
    pub phi2: T,
}

impl<T: Real> Euler<T> {
    pub fn new(phi1: T, phi: T, phi2: T) -> Self {
        Self { phi1, phi, phi2 }
    }

    pub fn from_degrees(phi1: T, phi: T, phi2: T) -> Self {
        Self::new(phi1.to_radians(), phi.to_radians(), phi2.to_radians())
    }

    pub fn as_array(&self) -> [T; 3] {
        [self.phi1, self.phi, self.phi2]
    }

    /// Fold into the Euler domain without changing the rotation.
    ///
    /// φ1 and φ2 wrap into `[0, 2π)`. Φ wraps into `[0, 2π)` first; a value
    /// above π becomes `2π − Φ` with φ1 and φ2 shifted by π, which is the
    /// same rotation.
    pub fn reduced(&self) -> Self {
        let two_pi = T::TAU();
        let pi = T::PI();
        let wrap = |v: T| {
            let r = v % two_pi;
            if r < T::zero() {
                r + two_pi
            } else {
                r
            }
        };
        let phi = wrap(self.phi);
        if phi > pi {
            Self::new(wrap(self.phi1 + pi), two_pi - phi, wrap(self.phi2 + pi))
        } else {
            Self::new(wrap(self.phi1), phi, wrap(self.phi2))
        }
    }

    /// `true` when every angle already lies in its domain.
    pub fn in_domain(&self) -> bool {
        let two_pi = T::TAU();
        (T::zero()..=two_pi).contains(&self.phi1)
            && (T::zero()..=T::PI()).contains(&self.phi)
            && (T::zero()..=two_pi).contains(&self.phi2)
    }
}

/// Row-major 3×3 rotation matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientationMatrix<T>(pub [T; 9]);

impl<T: Real> OrientationMatrix<T> {
    pub fn identity() -> Self {
        let (o, z) = (T::one(), T::zero());
        Self([o, z, z, z, o, z, z, z, o])
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> T {
        self.0[row * 3 + col]
    }

    pub fn transpose(&self) -> Self {
        let m = &self.0;
        Self([m[0], m[3], m[6], m[1], m[4], m[7], m[2], m[5], m[8]])
    }

    pub fn determinant(&self) -> T {
        let m = &self.0;
        m[0] * (m[4] * m[8] - m[5] * m[7]) - m[1] * (m[3] * m[8] - m[5] * m[6])
            + m[2] * (m[3] * m[7] - m[4] * m[6])
    }

    /// Matrix product `self · rhs`.
    pub fn multiply(&self, rhs: &Self) -> Self {
        let mut out = [T::zero(); 9];
        for r in 0..3 {
            for c in 0..3 {
                out[r * 3 + c] = (0..3).fold(T::zero(), |acc, k| acc + self.get(r, k) * rhs.get(k, c));
            }
        }
        Self(out)
    }

    /// `self · v`
    pub fn mul_vec(&self, v: [T; 3]) -> [T; 3] {
        let m = &self.0;
        [
            m[0] * v[0] + m[1] * v[1] + m[2] * v[2],
            m[3] * v[0] + m[4] * v[1] + m[5] * v[2],
            m[6] * v[0] + m[7] * v[1] + m[8] * v[2],
        ]
    }

    pub fn to_matrix3(&self) -> nalgebra::Matrix3<T> {
        nalgebra::Matrix3::from_row_slice(&self.0)
    }

    pub fn from_matrix3(m: &nalgebra::Matrix3<T>) -> Self {
        let mut out = [T::zero(); 9];
        for r in 0..3 {
            for c in 0..3 {
                out[r * 3 + c] = m[(r, c)];
            }
        }
        Self(out)
    }
}

impl<T: Real> Default for OrientationMatrix<T> {
    fn default() -> Self {
        Self::identity()
    }
}

/// Rotation quaternion stored as scalar part `w` and vector part `(x, y, z)`.
///
/// The in-memory layout of flat arrays is chosen with [`QuatLayout`] at the
/// point where values are read or written; the struct itself has no layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quaternion<T> {
    pub w: T,
    pub x: T,
    pub y: T,
    pub z: T,
}

impl<T: Real> Quaternion<T> {
    pub fn new(w: T, x: T, y: T, z: T) -> Self {
        Self { w, x, y, z }
    }

    pub fn identity() -> Self {
        Self::new(T::one(), T::zero(), T::zero(), T::zero())
    }

    /// Read four components laid out as `layout`.
    pub fn from_array(v: [T; 4], layout: QuatLayout) -> Self {
        let [w, x, y, z] = layout.indices();
        Self::new(v[w], v[x], v[y], v[z])
    }

    /// Write four components laid out as `layout`.
    pub fn to_array(&self, layout: QuatLayout) -> [T; 4] {
        let [w, x, y, z] = layout.indices();
        let mut out = [T::zero(); 4];
        out[w] = self.w;
        out[x] = self.x;
        out[y] = self.y;
        out[z] = self.z;
        out
    }

    pub fn vector(&self) -> [T; 3] {
        [self.x, self.y, self.z]
    }

    pub fn conjugate(&self) -> Self {
        Self::new(self.w, -self.x, -self.y, -self.z)
    }

    pub fn negate(&self) -> Self {
        Self::new(-self.w, -self.x, -self.y, -self.z)
    }

    pub fn norm(&self) -> T {
        self.dot(self).sqrt()
    }

    pub fn normalize(&self) -> Self {
        let n = self.norm();
        if n == T::zero() {
            return *self;
        }
        Self::new(self.w / n, self.x / n, self.y / n, self.z / n)
    }

    /// Four-component dot product.
    pub fn dot(&self, other: &Self) -> T {
        self.w * other.w + self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Hamilton product `self · rhs`.
    pub fn multiply(&self, rhs: &Self) -> Self {
        let (a, b) = (self, rhs);
        Self::new(
            a.w * b.w - a.x * b.x - a.y * b.y - a.z * b.z,
            a.w * b.x + a.x * b.w + a.y * b.z - a.z * b.y,
            a.w * b.y + a.y * b.w + a.z * b.x - a.x * b.z,
            a.w * b.z + a.z * b.w + a.x * b.y - a.y * b.x,
        )
    }

    /// The equivalent quaternion with a non-negative scalar part.
    pub fn to_positive_scalar(&self) -> Self {
        if self.w < T::zero() {
            self.negate()
        } else {
            *self
        }
    }

    pub fn to_nalgebra(&self) -> nalgebra::Quaternion<T> {
        nalgebra::Quaternion::new(self.w, self.x, self.y, self.z)
    }

    /// nalgebra stores `(i, j, k, w)` in `coords`.
    pub fn from_nalgebra(q: &nalgebra::Quaternion<T>) -> Self {
        Self::new(q.coords[3], q.coords[0], q.coords[1], q.coords[2])
    }
}

impl<T: Real> Default for Quaternion<T> {
    fn default() -> Self {
        Self::identity()
    }
}

/// Unit rotation axis and rotation angle in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisAngle<T> {
    pub axis: [T; 3],
    pub angle: T,
}

impl<T: Real> AxisAngle<T> {
    pub fn new(axis: [T; 3], angle: T) -> Self {
        Self { axis, angle }
    }

    /// Zero rotation, reported with the conventional axis `[0, 0, 1]`.
    pub fn identity() -> Self {
        Self::new([T::zero(), T::zero(), T::one()], T::zero())
    }

    pub fn as_array(&self) -> [T; 4] {
        [self.axis[0], self.axis[1], self.axis[2], self.angle]
    }
}

impl<T: Real> Default for AxisAngle<T> {
    fn default() -> Self {
        Self::identity()
    }
}

/// Rodrigues–Frank vector as unit axis plus length `tan(ω/2)`.
///
/// The length is `+∞` for a half-turn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rodrigues<T> {
    pub axis: [T; 3],
    pub length: T,
}

impl<T: Real> Rodrigues<T> {
    pub fn new(axis: [T; 3], length: T) -> Self {
        Self { axis, length }
    }

    /// The all-zero identity vector.
    pub fn zero() -> Self {
        Self::new([T::zero(); 3], T::zero())
    }

    pub fn as_array(&self) -> [T; 4] {
        [self.axis[0], self.axis[1], self.axis[2], self.length]
    }

    /// Three-component form `axis · length`. Half-turns produce infinite
    /// components along non-zero axis directions.
    pub fn to_vector(&self) -> [T; 3] {
        let scale = |a: T| {
            if a == T::zero() {
                T::zero()
            } else {
                a * self.length
            }
        };
        [scale(self.axis[0]), scale(self.axis[1]), scale(self.axis[2])]
    }

    /// Split a three-component Rodrigues vector into axis and length.
    pub fn from_vector(v: [T; 3]) -> Self {
        let len = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
        if len == T::zero() {
            return Self::zero();
        }
        Self::new([v[0] / len, v[1] / len, v[2] / len], len)
    }
}

impl<T: Real> Default for Rodrigues<T> {
    fn default() -> Self {
        Self::zero()
    }
}

/// Homochoric (equal-volume ball) vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Homochoric<T>(pub [T; 3]);

impl<T: Real> Homochoric<T> {
    pub fn norm(&self) -> T {
        let h = &self.0;
        (h[0] * h[0] + h[1] * h[1] + h[2] * h[2]).sqrt()
    }
}

/// Cubochoric (equal-volume cube) vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cubochoric<T>(pub [T; 3]);

// ── Tagged union ────────────────────────────────────────────────────────────

/// A rotation in any of the seven representations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rotation<T> {
    Euler(Euler<T>),
    OrientationMatrix(OrientationMatrix<T>),
    Quaternion(Quaternion<T>),
    AxisAngle(AxisAngle<T>),
    Rodrigues(Rodrigues<T>),
    Homochoric(Homochoric<T>),
    Cubochoric(Cubochoric<T>),
}

impl<T: Real> Rotation<T> {
    pub fn kind(&self) -> RepresentationKind {
        match self {
            Rotation::Euler(_) => RepresentationKind::Euler,
            Rotation::OrientationMatrix(_) => RepresentationKind::OrientationMatrix,
            Rotation::Quaternion(_) => RepresentationKind::Quaternion,
            Rotation::AxisAngle(_) => RepresentationKind::AxisAngle,
            Rotation::Rodrigues(_) => RepresentationKind::Rodrigues,
            Rotation::Homochoric(_) => RepresentationKind::Homochoric,
            Rotation::Cubochoric(_) => RepresentationKind::Cubochoric,
        }
    }

    /// Parse one tuple of `kind` from a flat slice.
    pub fn from_slice(kind: RepresentationKind, v: &[T], layout: QuatLayout) -> anyhow::Result<Self> {
        ensure!(
            v.len() == kind.component_count(),
            "{} needs {} components, got {}",
            kind,
            kind.component_count(),
            v.len()
        );
        Ok(match kind {
            RepresentationKind::Euler => Rotation::Euler(Euler::new(v[0], v[1], v[2])),
            RepresentationKind::OrientationMatrix => {
                let mut m = [T::zero(); 9];
                m.copy_from_slice(v);
                Rotation::OrientationMatrix(OrientationMatrix(m))
            }
            RepresentationKind::Quaternion => {
                Rotation::Quaternion(Quaternion::from_array([v[0], v[1], v[2], v[3]], layout))
            }
            RepresentationKind::AxisAngle => {
                Rotation::AxisAngle(AxisAngle::new([v[0], v[1], v[2]], v[3]))
            }
            RepresentationKind::Rodrigues => {
                Rotation::Rodrigues(Rodrigues::new([v[0], v[1], v[2]], v[3]))
            }
            RepresentationKind::Homochoric => Rotation::Homochoric(Homochoric([v[0], v[1], v[2]])),
            RepresentationKind::Cubochoric => Rotation::Cubochoric(Cubochoric([v[0], v[1], v[2]])),
        })
    }

    /// Write this tuple into `out`, which must hold exactly
    /// `self.kind().component_count()` values.
    pub fn write_to(&self, out: &mut [T], layout: QuatLayout) -> anyhow::Result<()> {
        let kind = self.kind();
        ensure!(
            out.len() == kind.component_count(),
            "{} writes {} components, output holds {}",
            kind,
            kind.component_count(),
            out.len()
        );
        match self {
            Rotation::Euler(e) => out.copy_from_slice(&e.as_array()),
            Rotation::OrientationMatrix(m) => out.copy_from_slice(&m.0),
            Rotation::Quaternion(q) => out.copy_from_slice(&q.to_array(layout)),
            Rotation::AxisAngle(a) => out.copy_from_slice(&a.as_array()),
            Rotation::Rodrigues(r) => out.copy_from_slice(&r.as_array()),
            Rotation::Homochoric(h) => out.copy_from_slice(&h.0),
            Rotation::Cubochoric(c) => out.copy_from_slice(&c.0),
        }
        Ok(())
    }

    /// Components as an owned vector.
    pub fn to_vec(&self, layout: QuatLayout) -> Vec<T> {
        let mut out = vec![T::zero(); self.kind().component_count()];
        // Length matches by construction.
        let _ = self.write_to(&mut out, layout);
        out
    }

    /// Change the scalar width explicitly.
    pub fn cast<U: Real>(&self) -> Rotation<U> {
        let c = |v: T| U::lit(v.as_f64());
        let c3 = |v: [T; 3]| [c(v[0]), c(v[1]), c(v[2])];
        match self {
            Rotation::Euler(e) => Rotation::Euler(Euler::new(c(e.phi1), c(e.phi), c(e.phi2))),
            Rotation::OrientationMatrix(m) => {
                Rotation::OrientationMatrix(OrientationMatrix(m.0.map(c)))
            }
            Rotation::Quaternion(q) => {
                Rotation::Quaternion(Quaternion::new(c(q.w), c(q.x), c(q.y), c(q.z)))
            }
            Rotation::AxisAngle(a) => Rotation::AxisAngle(AxisAngle::new(c3(a.axis), c(a.angle))),
            Rotation::Rodrigues(r) => Rotation::Rodrigues(Rodrigues::new(c3(r.axis), c(r.length))),
            Rotation::Homochoric(h) => Rotation::Homochoric(Homochoric(c3(h.0))),
            Rotation::Cubochoric(cu) => Rotation::Cubochoric(Cubochoric(c3(cu.0))),
        }
    }
}
