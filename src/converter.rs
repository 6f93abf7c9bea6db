//! Batch conversion of flat orientation arrays.
//!
//! An [`OrientationArray`] is a named, flat buffer of tuples of one
//! [`RepresentationKind`]. [`convert_array`] turns it into another kind;
//! [`convert_slice`] does the same on borrowed buffers.
//!
//! # Execution
//!
//! The tuple range is split into chunks of [`ConvertConfig::chunk_size`]
//! tuples. With the `parallel` feature (default) chunks run on the rayon
//! pool; every tuple writes only its own output slot, so no locking is
//! needed. Without the feature the chunks run in order on the calling thread.
//!
//! # Sanitizing
//!
//! When [`ConvertConfig::sanitize`] is set, out-of-domain Euler inputs are
//! folded into the Euler domain on a private copy (the rotation is
//! unchanged, see [`Euler::reduced`]), and orientation-matrix inputs
//! are checked with [`om_check`]; failing tuples are reported through
//! `tracing::warn!` and still converted.

use std::borrow::Cow;
use std::time::Instant;

use anyhow::ensure;
use tracing::{debug, warn};

use crate::check::om_check;
use crate::convert::convert_tuple;
use crate::real::Real;
use crate::representation::{Euler, OrientationMatrix, QuatLayout, RepresentationKind, Rotation};

// ── Configuration ───────────────────────────────────────────────────────────

/// Parameters controlling a batch conversion.
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    /// Memory order of quaternion components, on both input and output.
    /// Default: [`QuatLayout::VectorScalar`].
    pub layout: QuatLayout,
    /// Tuples per work chunk. Default 4096.
    pub chunk_size: usize,
    /// Fold Euler inputs into their domain and report bad matrices before
    /// converting.
    /// Default: true.
    pub sanitize: bool,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            layout: QuatLayout::VectorScalar,
            chunk_size: 4096,
            sanitize: true,
        }
    }
}

impl ConvertConfig {
    /// Default configuration with a specific quaternion layout.
    pub fn with_layout(layout: QuatLayout) -> Self {
        Self {
            layout,
            ..Default::default()
        }
    }
}

// ── Orientation arrays ──────────────────────────────────────────────────────

/// A named flat array of orientation tuples of a single kind.
#[derive(Debug, Clone, PartialEq)]
pub struct OrientationArray<T> {
    /// Label used in diagnostics only.
    pub name: String,
    pub kind: RepresentationKind,
    pub data: Vec<T>,
}

impl<T: Real> OrientationArray<T> {
    /// Wrap `data`; its length must be a multiple of the kind's component count.
    pub fn new(name: impl Into<String>, kind: RepresentationKind, data: Vec<T>) -> anyhow::Result<Self> {
        let name = name.into();
        ensure!(
            data.len() % kind.component_count() == 0,
            "array '{}' of {} has {} values, not a multiple of {}",
            name,
            kind,
            data.len(),
            kind.component_count()
        );
        Ok(Self { name, kind, data })
    }

    /// Build an array from rotation values, which must all be of `kind`.
    pub fn from_rotations(
        name: impl Into<String>,
        kind: RepresentationKind,
        rotations: &[Rotation<T>],
        layout: QuatLayout,
    ) -> anyhow::Result<Self> {
        let count = kind.component_count();
        let mut data = vec![T::zero(); rotations.len() * count];
        for (r, out) in rotations.iter().zip(data.chunks_exact_mut(count)) {
            r.write_to(out, layout)?;
        }
        Self::new(name, kind, data)
    }

    pub fn num_tuples(&self) -> usize {
        self.data.len() / self.kind.component_count()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Raw components of tuple `i`, or `None` past the end.
    pub fn tuple(&self, i: usize) -> Option<&[T]> {
        let count = self.kind.component_count();
        self.data.get(i * count..(i + 1) * count)
    }

    /// Tuple `i` as a typed rotation.
    pub fn rotation(&self, i: usize, layout: QuatLayout) -> anyhow::Result<Rotation<T>> {
        let n = self.num_tuples();
        let values = self.tuple(i).ok_or_else(|| {
            anyhow::anyhow!("tuple {} out of range for array '{}' of {} tuples", i, self.name, n)
        })?;
        Rotation::from_slice(self.kind, values, layout)
    }

    /// Iterate over raw tuples.
    pub fn tuples(&self) -> std::slice::ChunksExact<'_, T> {
        self.data.chunks_exact(self.kind.component_count())
    }

    /// Convert into another representation. See [`convert_array`].
    pub fn convert(&self, dst: RepresentationKind, config: &ConvertConfig) -> anyhow::Result<Self> {
        convert_array(self, dst, config)
    }
}

// ── Conversion entry points ─────────────────────────────────────────────────

/// Convert every tuple of `input` to `dst`, returning a new array with the
/// same name. Converting to the same kind copies the data unchanged.
pub fn convert_array<T: Real>(
    input: &OrientationArray<T>,
    dst: RepresentationKind,
    config: &ConvertConfig,
) -> anyhow::Result<OrientationArray<T>> {
    let mut data = vec![T::zero(); input.num_tuples() * dst.component_count()];
    convert_named(&input.name, input.kind, dst, &input.data, &mut data, config)?;
    Ok(OrientationArray {
        name: input.name.clone(),
        kind: dst,
        data,
    })
}

/// Convert a flat slice of `src` tuples into `output`, which must hold
/// exactly as many `dst` tuples.
pub fn convert_slice<T: Real>(
    src: RepresentationKind,
    dst: RepresentationKind,
    input: &[T],
    output: &mut [T],
    config: &ConvertConfig,
) -> anyhow::Result<()> {
    convert_named("<slice>", src, dst, input, output, config)
}

fn convert_named<T: Real>(
    name: &str,
    src: RepresentationKind,
    dst: RepresentationKind,
    input: &[T],
    output: &mut [T],
    config: &ConvertConfig,
) -> anyhow::Result<()> {
    let src_count = src.component_count();
    let dst_count = dst.component_count();
    ensure!(config.chunk_size > 0, "chunk_size must be positive");
    ensure!(
        input.len() % src_count == 0,
        "input '{}' has {} values, not a multiple of {} ({})",
        name,
        input.len(),
        src_count,
        src
    );
    let n = input.len() / src_count;
    ensure!(
        output.len() == n * dst_count,
        "output for '{}' holds {} values, expected {} ({} x {})",
        name,
        output.len(),
        n * dst_count,
        n,
        dst_count
    );

    if src == dst {
        output.copy_from_slice(input);
        return Ok(());
    }

    let t0 = Instant::now();
    let input = if config.sanitize {
        sanitize(name, src, input)
    } else {
        Cow::Borrowed(input)
    };

    let layout = config.layout;
    let convert_chunk = |(inp, out): (&[T], &mut [T])| -> anyhow::Result<()> {
        for (i, o) in inp.chunks_exact(src_count).zip(out.chunks_exact_mut(dst_count)) {
            convert_tuple(src, dst, i, o, layout)?;
        }
        Ok(())
    };

    let in_chunk = config.chunk_size * src_count;
    let out_chunk = config.chunk_size * dst_count;

    #[cfg(feature = "parallel")]
    {
        use rayon::iter::{IndexedParallelIterator, ParallelIterator};
        use rayon::slice::{ParallelSlice, ParallelSliceMut};
        input
            .par_chunks(in_chunk)
            .zip(output.par_chunks_mut(out_chunk))
            .try_for_each(convert_chunk)?;
    }

    #[cfg(not(feature = "parallel"))]
    {
        input
            .chunks(in_chunk)
            .zip(output.chunks_mut(out_chunk))
            .try_for_each(convert_chunk)?;
    }

    debug!(
        "Converted {} tuples of '{}' from {} to {} in {:.3} ms",
        n,
        name,
        src,
        dst,
        t0.elapsed().as_secs_f64() * 1e3
    );
    Ok(())
}

/// Pre-conversion pass; borrows the input when there is nothing to change.
fn sanitize<'a, T: Real>(name: &str, kind: RepresentationKind, input: &'a [T]) -> Cow<'a, [T]> {
    match kind {
        RepresentationKind::Euler => {
            let mut owned = input.to_vec();
            for (i, e) in owned.chunks_exact_mut(3).enumerate() {
                let eu = Euler::new(e[0], e[1], e[2]);
                if !eu.in_domain() {
                    debug!("Array '{}' tuple {}: Euler angles folded into domain", name, i);
                    e.copy_from_slice(&eu.reduced().as_array());
                }
            }
            Cow::Owned(owned)
        }
        RepresentationKind::OrientationMatrix => {
            for (i, m) in input.chunks_exact(9).enumerate() {
                let mut values = [T::zero(); 9];
                values.copy_from_slice(m);
                let res = om_check(&OrientationMatrix(values));
                if !res.is_ok() {
                    warn!("Array '{}' tuple {}: {}", name, i, res.message);
                }
            }
            Cow::Borrowed(input)
        }
        _ => Cow::Borrowed(input),
    }
}
