//! Helpers for the Python bindings: buffer extraction and read-mode flags.
//!
//! Every item is compiled only with the `python-bindings` feature.

#[cfg(feature = "python-bindings")]
use numpy::PyReadonlyArray1;

#[cfg(feature = "python-bindings")]
use pyo3::{
    exceptions::{PyTypeError, PyValueError},
    prelude::*,
    types::PyAny,
};

/// Copy a 1-D float64 array-like (`numpy.ndarray`, `pandas.Series` or a
/// sequence of floats) into an owned buffer.
#[cfg(feature = "python-bindings")]
pub fn extract_f64_vec<'py>(raw_data: &Bound<'py, PyAny>) -> PyResult<Vec<f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        return Ok(arr_ro.as_array().to_vec());
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            return Ok(series_ro.as_array().to_vec());
        }
    }

    raw_data.extract::<Vec<f64>>().map_err(|_| {
        PyTypeError::new_err("expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64")
    })
}

/// Copy a 1-D int32 array-like into an owned buffer. `None` yields an empty
/// buffer.
#[cfg(feature = "python-bindings")]
pub fn extract_i32_vec<'py>(raw_data: Option<&Bound<'py, PyAny>>) -> PyResult<Vec<i32>> {
    let Some(raw_data) = raw_data else {
        return Ok(Vec::new());
    };
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<i32>>() {
        return Ok(arr_ro.as_array().to_vec());
    }
    raw_data.extract::<Vec<i32>>().map_err(|_| {
        PyTypeError::new_err("expected a 1-D numpy.ndarray or sequence of int32")
    })
}

/// Which accessor form a Python call maps to.
#[cfg(feature = "python-bindings")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadMode {
    /// Read the constrained value and validate it.
    Plain,
    /// Read the unconstrained value and transform it.
    Constrain,
    /// Transform and add the log-Jacobian to the reader's accumulator.
    Jacobian,
}

#[cfg(feature = "python-bindings")]
impl ReadMode {
    /// Map the `constrain` / `jacobian` keyword flags onto a mode.
    ///
    /// # Errors
    /// - `ValueError` if `jacobian` is set without `constrain`.
    pub fn from_flags(constrain: bool, jacobian: bool) -> PyResult<ReadMode> {
        match (constrain, jacobian) {
            (false, false) => Ok(ReadMode::Plain),
            (true, false) => Ok(ReadMode::Constrain),
            (true, true) => Ok(ReadMode::Jacobian),
            (false, true) => Err(PyValueError::new_err("jacobian=True requires constrain=True")),
        }
    }
}
