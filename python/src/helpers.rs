use numpy::PyReadonlyArray2;
use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use ebsdrot::{QuatLayout, RepresentationKind};

/// Parse a representation name (`"eu"`, `"Quaternion"`, ...).
pub(crate) fn parse_kind(name: &str) -> PyResult<RepresentationKind> {
    name.parse::<RepresentationKind>()
        .map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Parse a quaternion layout name.
pub(crate) fn parse_layout(name: &str) -> PyResult<QuatLayout> {
    match name.to_ascii_lowercase().replace('-', "_").as_str() {
        "vector_scalar" | "xyzw" => Ok(QuatLayout::VectorScalar),
        "scalar_vector" | "wxyz" => Ok(QuatLayout::ScalarVector),
        _ => Err(PyValueError::new_err(format!(
            "unknown quaternion layout '{}' (expected 'vector_scalar' or 'scalar_vector')",
            name
        ))),
    }
}

/// Flatten an `N x count` array for `kind`, rejecting a mismatched width.
pub(crate) fn flatten_tuples(
    values: &PyReadonlyArray2<f64>,
    kind: RepresentationKind,
) -> PyResult<(usize, Vec<f64>)> {
    let arr = values.as_array();
    let ncols = arr.shape()[1];
    if ncols != kind.component_count() {
        return Err(PyValueError::new_err(format!(
            "{} values need {} columns, got {}",
            kind,
            kind.component_count(),
            ncols
        )));
    }
    Ok((arr.shape()[0], arr.iter().copied().collect()))
}

pub(crate) fn runtime_err(e: anyhow::Error) -> PyErr {
    PyRuntimeError::new_err(e.to_string())
}
