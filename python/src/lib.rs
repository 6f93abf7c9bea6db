//! Python bindings for ebsdrot via PyO3.
//!
//! Exposes rotation conversions and Laue-class operations to Python as the
//! `pyebsdrot` module.

mod helpers;

use numpy::ndarray;
use numpy::{PyArray1, PyArray2, PyReadonlyArray1, PyReadonlyArray2};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use ebsdrot::{
    convert_slice, ConvertConfig, Euler, LaueClass, Quaternion, RepresentationKind, Rodrigues,
    Rotation,
};

use helpers::{flatten_tuples, parse_kind, parse_layout, runtime_err};

// ═══════════════════════════════════════════════════════════════════════════
// convert / check: flat representation arrays
// ═══════════════════════════════════════════════════════════════════════════

/// Convert an array of rotations from one representation to another.
///
/// Args:
///     values: N x k numpy array, k being the component count of `src`
///         (eu 3, om 9, qu 4, ax 4, ro 4, ho 3, cu 3).
///     src: Source representation name or two-letter code.
///     dst: Destination representation name or two-letter code.
///     layout: Quaternion memory order, "vector_scalar" (default) or "scalar_vector".
///
/// Returns:
///     N x k' numpy array in the destination representation.
#[pyfunction]
#[pyo3(signature = (values, src, dst, layout = "vector_scalar"))]
fn convert<'py>(
    py: Python<'py>,
    values: PyReadonlyArray2<f64>,
    src: &str,
    dst: &str,
    layout: &str,
) -> PyResult<Bound<'py, PyArray2<f64>>> {
    let src = parse_kind(src)?;
    let dst = parse_kind(dst)?;
    let config = ConvertConfig::with_layout(parse_layout(layout)?);
    let (n, input) = flatten_tuples(&values, src)?;

    let width = dst.component_count();
    let mut output = vec![0.0_f64; n * width];
    py.detach(|| convert_slice(src, dst, &input, &mut output, &config))
        .map_err(runtime_err)?;

    let out = ndarray::Array2::from_shape_vec((n, width), output)
        .map_err(|e| PyValueError::new_err(e.to_string()))?;
    Ok(PyArray2::from_owned_array(py, out))
}

/// Run the validity check for every row of `values`.
///
/// Returns:
///     dict with keys 'codes' (int32 array, 1 = valid) and 'messages'
///     (list of str, empty for valid rows).
#[pyfunction]
#[pyo3(signature = (values, kind, layout = "vector_scalar"))]
fn check<'py>(
    py: Python<'py>,
    values: PyReadonlyArray2<f64>,
    kind: &str,
    layout: &str,
) -> PyResult<Bound<'py, PyDict>> {
    let kind = parse_kind(kind)?;
    let layout = parse_layout(layout)?;
    let (_, flat) = flatten_tuples(&values, kind)?;

    let mut codes = Vec::new();
    let mut messages = Vec::new();
    for tuple in flat.chunks_exact(kind.component_count()) {
        let res = Rotation::from_slice(kind, tuple, layout)
            .map_err(runtime_err)?
            .check();
        codes.push(res.code);
        messages.push(res.message);
    }

    let dict = PyDict::new(py);
    dict.set_item("codes", PyArray1::from_vec(py, codes))?;
    dict.set_item("messages", messages)?;
    Ok(dict)
}

// ═══════════════════════════════════════════════════════════════════════════
// PyLaueClass: wraps LaueClass
// ═══════════════════════════════════════════════════════════════════════════

/// One of the eleven Laue classes.
///
/// Example:
///     cubic = pyebsdrot.LaueClass("m3m")
///     angle, axis = cubic.misorientation(q1, q2)
#[pyclass(name = "LaueClass")]
struct PyLaueClass {
    inner: LaueClass,
}

fn quat(v: &PyReadonlyArray1<f64>) -> PyResult<Quaternion<f64>> {
    match v.as_slice()? {
        [w, x, y, z] => Ok(Quaternion::new(*w, *x, *y, *z)),
        _ => Err(PyValueError::new_err("quaternion must have 4 components (w, x, y, z)")),
    }
}

fn rod(v: &PyReadonlyArray1<f64>) -> PyResult<Rodrigues<f64>> {
    match v.as_slice()? {
        [x, y, z, len] => Ok(Rodrigues::new([*x, *y, *z], *len)),
        _ => Err(PyValueError::new_err("Rodrigues vector must have 4 components")),
    }
}

#[pymethods]
impl PyLaueClass {
    /// Look up a class by name, symbol ("m3m", "6/mmm", ...) or index 0-10.
    #[new]
    fn new(class: &Bound<'_, PyAny>) -> PyResult<Self> {
        let inner = if let Ok(index) = class.extract::<u32>() {
            LaueClass::from_index(index)
                .ok_or_else(|| PyValueError::new_err(format!("no Laue class with index {}", index)))?
        } else {
            let name: String = class.extract()?;
            name.parse::<LaueClass>()
                .map_err(|e| PyValueError::new_err(e.to_string()))?
        };
        Ok(PyLaueClass { inner })
    }

    /// Minimal misorientation between two (w, x, y, z) quaternions.
    ///
    /// Returns:
    ///     (angle_rad, axis) with axis a length-3 numpy array.
    fn misorientation<'py>(
        &self,
        py: Python<'py>,
        q1: PyReadonlyArray1<f64>,
        q2: PyReadonlyArray1<f64>,
    ) -> PyResult<(f64, Bound<'py, PyArray1<f64>>)> {
        let m = self.inner.calculate_misorientation(&quat(&q1)?, &quat(&q2)?);
        Ok((m.angle, PyArray1::from_vec(py, m.axis.to_vec())))
    }

    /// Symmetric equivalent of `q` with the smallest rotation angle, as (w, x, y, z).
    fn fz_quat<'py>(&self, py: Python<'py>, q: PyReadonlyArray1<f64>) -> PyResult<Bound<'py, PyArray1<f64>>> {
        let fz = self.inner.fz_quat(&quat(&q)?);
        Ok(PyArray1::from_vec(py, vec![fz.w, fz.x, fz.y, fz.z]))
    }

    /// ODF histogram bin of a fundamental-zone Rodrigues vector (x, y, z, length).
    fn odf_bin(&self, ro: PyReadonlyArray1<f64>) -> PyResult<usize> {
        Ok(self.inner.odf_bin(&rod(&ro)?))
    }

    /// MDF histogram bin of a Rodrigues vector (x, y, z, length).
    fn miso_bin(&self, ro: PyReadonlyArray1<f64>) -> PyResult<usize> {
        Ok(self.inner.miso_bin(&rod(&ro)?))
    }

    /// Pole-figure coordinates for an N x 3 array of Bunge Euler angles.
    ///
    /// Returns:
    ///     dict mapping each pole-family label to an M x 3 float32 array.
    fn sphere_coords<'py>(&self, py: Python<'py>, eulers: PyReadonlyArray2<f64>) -> PyResult<Bound<'py, PyDict>> {
        let (_, flat) = flatten_tuples(&eulers, RepresentationKind::Euler)?;
        let eulers: Vec<Euler<f32>> = flat
            .chunks_exact(3)
            .map(|e| Euler::new(e[0] as f32, e[1] as f32, e[2] as f32))
            .collect();
        let class = self.inner;
        let coords = py.detach(|| class.sphere_coords_from_eulers(&eulers));

        let dict = PyDict::new(py);
        for fam in coords.families {
            let rows = fam.coords.len() / 3;
            let arr = ndarray::Array2::from_shape_vec((rows, 3), fam.coords)
                .map_err(|e| PyValueError::new_err(e.to_string()))?;
            dict.set_item(fam.label, PyArray2::from_owned_array(py, arr))?;
        }
        Ok(dict)
    }

    /// Number of proper-rotation symmetry operators.
    #[getter]
    fn num_sym_ops(&self) -> usize {
        self.inner.num_sym_ops()
    }

    /// Display name, e.g. "Cubic m3m".
    #[getter]
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    /// Hermann–Mauguin symbol.
    #[getter]
    fn symbol(&self) -> &'static str {
        self.inner.symbol()
    }

    /// Total number of ODF histogram bins.
    #[getter]
    fn odf_size(&self) -> usize {
        self.inner.odf_size()
    }

    fn __repr__(&self) -> String {
        format!("LaueClass('{}', ops={})", self.inner.symbol(), self.inner.num_sym_ops())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Module definition
// ═══════════════════════════════════════════════════════════════════════════

/// pyebsdrot: rotation representations and Laue-class symmetry
///
/// Conversions between Euler angles, orientation matrices, quaternions,
/// axis-angle pairs, Rodrigues, homochoric and cubochoric vectors.
#[pymodule]
fn pyebsdrot(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyLaueClass>()?;
    m.add_function(wrap_pyfunction!(convert, m)?)?;
    m.add_function(wrap_pyfunction!(check, m)?)?;
    Ok(())
}
