//! param_reader — sequential unconstrained-to-constrained parameter reader.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes the reader to Python via the `param_reader` extension module.
//! The reader consumes a flat, ordered stream of reals and integers (as a
//! sampler produces in unconstrained space) and rebuilds the constrained
//! variables a model declares, optionally accumulating the log-absolute
//! Jacobian of every transform.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules: [`io`] (the reader and its accessor
//!   families) and [`math`] (scalar capability, validation predicates and
//!   constraining transforms).
//! - When `python-bindings` is enabled, define the [`ParamReader`]
//!   `#[pyclass]` and the `#[pymodule]` initializer.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work lives in the inner modules; this file performs only
//!   FFI glue, flag mapping and error conversion.
//! - The Python reader owns copies of its buffers and its own log-probability
//!   accumulator; Rust callers borrow their buffers and own the accumulator.
//!
//! Conventions
//! -----------
//! - Matrices read from the stream are column-major in the stream and are
//!   returned to Python as ordinary 2-D `numpy` arrays.
//! - Errors from core Rust code are propagated as [`io::ReaderError`] /
//!   [`math::ValidationError`] and converted to `ValueError` at the PyO3
//!   boundary.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code constructs [`io::Reader::new`] over borrowed slices and
//!   calls the accessor for each declared variable in declaration order.
//! - Python code constructs `ParamReader(scalars, integers=None)` and calls
//!   the same accessors with `constrain=` / `jacobian=` flags.
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each module; `tests/` drives complete read
//!   passes through the public API.

pub mod io;
pub mod math;
pub mod utils;

/// Name of the Python extension module; equals the `[lib]` name.
pub const PY_MODULE_NAME: &str = "param_reader";

#[cfg(feature = "python-bindings")]
use numpy::{IntoPyArray, PyArray1, PyArray2};

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    io::{Reader, ReaderResult, ScalarConstraint},
    utils::{ReadMode, extract_f64_vec, extract_i32_vec},
};

/// ParamReader — Python-facing reader over owned float64 / int32 buffers.
///
/// Purpose
/// -------
/// Let Python code walk an unconstrained parameter vector the same way the
/// Rust [`Reader`] does, accumulating Jacobian terms into an internal
/// log-probability total.
///
/// Parameters
/// ----------
/// Constructed from Python via `ParamReader(scalars, integers=None)`:
/// - `scalars`: 1-D array-like of `float64`.
/// - `integers`: optional 1-D array-like of `int32`; empty when `None`.
///
/// Fields
/// ------
/// - `inner`: [`Reader`] owning copies of both buffers.
/// - `log_prob`: accumulator incremented by calls with `jacobian=True`.
///
/// Notes
/// -----
/// - Every constrained accessor takes `constrain=False, jacobian=False`.
///   `constrain=True` reads the unconstrained representation and transforms
///   it; `jacobian=True` additionally adds the log-Jacobian to `log_prob`.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "param_reader")]
pub struct ParamReader {
    inner: Reader<'static, f64>,
    log_prob: f64,
}

#[cfg(feature = "python-bindings")]
impl ParamReader {
    fn dispatch<R, P, C, J>(&mut self, mode: ReadMode, plain: P, constrain: C, jacobian: J) -> PyResult<R>
    where
        P: FnOnce(&mut Reader<'static, f64>) -> ReaderResult<R>,
        C: FnOnce(&mut Reader<'static, f64>) -> ReaderResult<R>,
        J: FnOnce(&mut Reader<'static, f64>, &mut f64) -> ReaderResult<R>,
    {
        let out = match mode {
            ReadMode::Plain => plain(&mut self.inner),
            ReadMode::Constrain => constrain(&mut self.inner),
            ReadMode::Jacobian => jacobian(&mut self.inner, &mut self.log_prob),
        };
        Ok(out?)
    }

    fn scalar_with(&mut self, constraint: ScalarConstraint<f64>, mode: ReadMode) -> PyResult<f64> {
        self.dispatch(
            mode,
            |r| r.scalar_checked(&constraint),
            |r| r.scalar_constrained(&constraint),
            |r, lp| r.scalar_constrained_lp(&constraint, lp),
        )
    }
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl ParamReader {
    #[new]
    #[pyo3(signature = (scalars, integers = None), text_signature = "(scalars, /, integers=None)")]
    pub fn new<'py>(
        scalars: &Bound<'py, PyAny>, integers: Option<&Bound<'py, PyAny>>,
    ) -> PyResult<ParamReader> {
        let data_r = extract_f64_vec(scalars)?;
        let data_i = extract_i32_vec(integers)?;
        Ok(ParamReader { inner: Reader::from_owned(data_r, data_i), log_prob: 0.0 })
    }

    // ---- Cursor state ----

    #[getter]
    pub fn available(&self) -> usize {
        self.inner.available()
    }

    #[getter]
    pub fn available_i(&self) -> usize {
        self.inner.available_i()
    }

    #[getter]
    pub fn position(&self) -> usize {
        self.inner.position()
    }

    #[getter]
    pub fn int_position(&self) -> usize {
        self.inner.int_position()
    }

    #[getter]
    pub fn log_prob(&self) -> f64 {
        self.log_prob
    }

    /// Return the accumulated log-Jacobian and reset it to zero.
    pub fn take_log_prob(&mut self) -> f64 {
        std::mem::take(&mut self.log_prob)
    }

    // ---- Integers ----

    /// Next integer.
    pub fn integer(&mut self) -> PyResult<i32> {
        Ok(self.inner.integer()?)
    }

    #[pyo3(signature = (lb = None, ub = None))]
    pub fn integer_bounded(&mut self, lb: Option<i32>, ub: Option<i32>) -> PyResult<i32> {
        let value = match (lb, ub) {
            (None, None) => self.inner.integer()?,
            (Some(lb), None) => self.inner.integer_lb(lb)?,
            (None, Some(ub)) => self.inner.integer_ub(ub)?,
            (Some(lb), Some(ub)) => self.inner.integer_lub(lb, ub)?,
        };
        Ok(value)
    }

    // ---- Unconstrained shapes ----

    /// Next real.
    pub fn scalar(&mut self) -> PyResult<f64> {
        Ok(self.inner.scalar()?)
    }

    /// Next `m` reals as a 1-D array.
    pub fn vector<'py>(&mut self, py: Python<'py>, m: usize) -> PyResult<Bound<'py, PyArray1<f64>>> {
        Ok(self.inner.vector(m)?.into_pyarray(py))
    }

    /// Next `n * m` reals as an `n×m` array, column-major.
    pub fn matrix<'py>(
        &mut self, py: Python<'py>, n: usize, m: usize,
    ) -> PyResult<Bound<'py, PyArray2<f64>>> {
        Ok(self.inner.matrix(n, m)?.into_pyarray(py))
    }

    // ---- Scalar families ----

    #[pyo3(signature = (lb = f64::NEG_INFINITY, ub = f64::INFINITY, constrain = false, jacobian = false))]
    pub fn scalar_lub(&mut self, lb: f64, ub: f64, constrain: bool, jacobian: bool) -> PyResult<f64> {
        let mode = ReadMode::from_flags(constrain, jacobian)?;
        self.scalar_with(ScalarConstraint::LowerUpper(lb, ub), mode)
    }

    #[pyo3(signature = (offset = 0.0, multiplier = 1.0, constrain = false, jacobian = false))]
    pub fn scalar_offset_multiplier(
        &mut self, offset: f64, multiplier: f64, constrain: bool, jacobian: bool,
    ) -> PyResult<f64> {
        let mode = ReadMode::from_flags(constrain, jacobian)?;
        self.scalar_with(ScalarConstraint::OffsetMultiplier(offset, multiplier), mode)
    }

    #[pyo3(signature = (constrain = false, jacobian = false))]
    pub fn scalar_pos(&mut self, constrain: bool, jacobian: bool) -> PyResult<f64> {
        self.scalar_with(ScalarConstraint::Positive, ReadMode::from_flags(constrain, jacobian)?)
    }

    #[pyo3(signature = (constrain = false, jacobian = false))]
    pub fn prob(&mut self, constrain: bool, jacobian: bool) -> PyResult<f64> {
        self.scalar_with(ScalarConstraint::Probability, ReadMode::from_flags(constrain, jacobian)?)
    }

    #[pyo3(signature = (constrain = false, jacobian = false))]
    pub fn corr(&mut self, constrain: bool, jacobian: bool) -> PyResult<f64> {
        self.scalar_with(ScalarConstraint::Correlation, ReadMode::from_flags(constrain, jacobian)?)
    }

    // ---- Vector families ----

    #[pyo3(signature = (m, lb = f64::NEG_INFINITY, ub = f64::INFINITY, constrain = false, jacobian = false))]
    pub fn vector_lub<'py>(
        &mut self, py: Python<'py>, m: usize, lb: f64, ub: f64, constrain: bool, jacobian: bool,
    ) -> PyResult<Bound<'py, PyArray1<f64>>> {
        let constraint = ScalarConstraint::LowerUpper(lb, ub);
        let out = self.dispatch(
            ReadMode::from_flags(constrain, jacobian)?,
            |r| r.vector_checked(&constraint, m),
            |r| r.vector_constrained(&constraint, m),
            |r, lp| r.vector_constrained_lp(&constraint, m, lp),
        )?;
        Ok(out.into_pyarray(py))
    }

    #[pyo3(signature = (k, constrain = false, jacobian = false))]
    pub fn unit_vector<'py>(
        &mut self, py: Python<'py>, k: usize, constrain: bool, jacobian: bool,
    ) -> PyResult<Bound<'py, PyArray1<f64>>> {
        let out = self.dispatch(
            ReadMode::from_flags(constrain, jacobian)?,
            |r| r.unit_vector(k),
            |r| r.unit_vector_constrain(k),
            |r, lp| r.unit_vector_constrain_lp(k, lp),
        )?;
        Ok(out.into_pyarray(py))
    }

    #[pyo3(signature = (k, constrain = false, jacobian = false))]
    pub fn simplex<'py>(
        &mut self, py: Python<'py>, k: usize, constrain: bool, jacobian: bool,
    ) -> PyResult<Bound<'py, PyArray1<f64>>> {
        let out = self.dispatch(
            ReadMode::from_flags(constrain, jacobian)?,
            |r| r.simplex(k),
            |r| r.simplex_constrain(k),
            |r, lp| r.simplex_constrain_lp(k, lp),
        )?;
        Ok(out.into_pyarray(py))
    }

    #[pyo3(signature = (k, constrain = false, jacobian = false))]
    pub fn ordered<'py>(
        &mut self, py: Python<'py>, k: usize, constrain: bool, jacobian: bool,
    ) -> PyResult<Bound<'py, PyArray1<f64>>> {
        let out = self.dispatch(
            ReadMode::from_flags(constrain, jacobian)?,
            |r| r.ordered(k),
            |r| r.ordered_constrain(k),
            |r, lp| r.ordered_constrain_lp(k, lp),
        )?;
        Ok(out.into_pyarray(py))
    }

    #[pyo3(signature = (k, constrain = false, jacobian = false))]
    pub fn positive_ordered<'py>(
        &mut self, py: Python<'py>, k: usize, constrain: bool, jacobian: bool,
    ) -> PyResult<Bound<'py, PyArray1<f64>>> {
        let out = self.dispatch(
            ReadMode::from_flags(constrain, jacobian)?,
            |r| r.positive_ordered(k),
            |r| r.positive_ordered_constrain(k),
            |r, lp| r.positive_ordered_constrain_lp(k, lp),
        )?;
        Ok(out.into_pyarray(py))
    }

    // ---- Matrix families ----

    #[pyo3(signature = (m, n, constrain = false, jacobian = false))]
    pub fn cholesky_factor_cov<'py>(
        &mut self, py: Python<'py>, m: usize, n: usize, constrain: bool, jacobian: bool,
    ) -> PyResult<Bound<'py, PyArray2<f64>>> {
        let out = self.dispatch(
            ReadMode::from_flags(constrain, jacobian)?,
            |r| r.cholesky_factor_cov(m, n),
            |r| r.cholesky_factor_cov_constrain(m, n),
            |r, lp| r.cholesky_factor_cov_constrain_lp(m, n, lp),
        )?;
        Ok(out.into_pyarray(py))
    }

    #[pyo3(signature = (k, constrain = false, jacobian = false))]
    pub fn cholesky_factor_corr<'py>(
        &mut self, py: Python<'py>, k: usize, constrain: bool, jacobian: bool,
    ) -> PyResult<Bound<'py, PyArray2<f64>>> {
        let out = self.dispatch(
            ReadMode::from_flags(constrain, jacobian)?,
            |r| r.cholesky_factor_corr(k),
            |r| r.cholesky_factor_corr_constrain(k),
            |r, lp| r.cholesky_factor_corr_constrain_lp(k, lp),
        )?;
        Ok(out.into_pyarray(py))
    }

    #[pyo3(signature = (k, constrain = false, jacobian = false))]
    pub fn cov_matrix<'py>(
        &mut self, py: Python<'py>, k: usize, constrain: bool, jacobian: bool,
    ) -> PyResult<Bound<'py, PyArray2<f64>>> {
        let out = self.dispatch(
            ReadMode::from_flags(constrain, jacobian)?,
            |r| r.cov_matrix(k),
            |r| r.cov_matrix_constrain(k),
            |r, lp| r.cov_matrix_constrain_lp(k, lp),
        )?;
        Ok(out.into_pyarray(py))
    }

    #[pyo3(signature = (k, constrain = false, jacobian = false))]
    pub fn corr_matrix<'py>(
        &mut self, py: Python<'py>, k: usize, constrain: bool, jacobian: bool,
    ) -> PyResult<Bound<'py, PyArray2<f64>>> {
        let out = self.dispatch(
            ReadMode::from_flags(constrain, jacobian)?,
            |r| r.corr_matrix(k),
            |r| r.corr_matrix_constrain(k),
            |r, lp| r.corr_matrix_constrain_lp(k, lp),
        )?;
        Ok(out.into_pyarray(py))
    }
}

/// param_reader — PyO3 module initializer for the Python extension.
///
/// The initializer's name must equal the `[lib]` name in `Cargo.toml`
/// ([`PY_MODULE_NAME`]): the shared library is `libparam_reader` and Python
/// looks up `PyInit_param_reader` in it.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn param_reader<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    m.add_class::<ParamReader>()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Agreement between the compiled library name and the Python module
    //   name used by `#[pymodule]` and `#[pyclass(module = ...)]`.
    //
    // They intentionally DO NOT cover:
    // - Importing the extension; that needs a Python interpreter.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // The extension's `PyInit_*` symbol is derived from the `[lib]` name, so
    // the module name must match the crate name the library is built as.
    //
    // Given
    // -----
    // - `CARGO_CRATE_NAME` for this library target.
    //
    // Expect
    // ------
    // - It equals `PY_MODULE_NAME`.
    fn python_module_name_matches_library_name() {
        // Arrange
        let crate_name = env!("CARGO_CRATE_NAME");

        // Act / Assert
        assert_eq!(crate_name, PY_MODULE_NAME);
    }
}
