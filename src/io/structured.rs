//! Structured families: unit vectors, simplexes, ordered vectors, Cholesky
//! factors, covariance and correlation matrices.
//!
//! Purpose
//! -------
//! Read a structured constrained value either directly (plain form: read the
//! constrained representation, validate it) or from its unconstrained free
//! vector (constrain forms: read the free vector, transform it).
//!
//! Consumption table
//! -----------------
//! | family | plain | constrain |
//! |---|---|---|
//! | `unit_vector(k)` | `k` | `k` |
//! | `simplex(k)` | `k` | `k - 1` |
//! | `ordered(k)`, `positive_ordered(k)` | `k` | `k` |
//! | `cholesky_factor_cov(m, n)` | `m·n` | `n(n+1)/2 + (m-n)·n` |
//! | `cholesky_factor_corr(k)` | `k·k` | `k(k-1)/2` |
//! | `cov_matrix(k)` | `k·k` | `k + k(k-1)/2` |
//! | `corr_matrix(k)` | `k·k` | `k(k-1)/2` |
//!
//! The constrain-side sizes are exposed in [`free_size`].
//!
//! Invariants & assumptions
//! ------------------------
//! - `unit_vector(0)` and `simplex(0)` fail with `InvalidShape` before any
//!   read, in every form.
//! - Shape failures from [`free_size`] are raised before any read.
//! - Transforms are trusted to produce valid output; constrain forms do not
//!   re-validate.
use crate::{
    io::{errors::ReaderResult, reader::Reader},
    math::{matrix_transforms as mt, real::Real, validation, vector_transforms as vt},
};
use ndarray::{Array1, Array2};

/// Length of the unconstrained free vector for each structured family.
pub mod free_size {
    use crate::io::errors::{ReaderError, ReaderResult};

    fn overflow(family: &'static str) -> ReaderError {
        ReaderError::InvalidShape { family, reason: "free parameter count overflows usize".to_string() }
    }

    fn nonzero(family: &'static str, k: usize) -> ReaderResult<usize> {
        if k == 0 {
            return Err(ReaderError::InvalidShape {
                family,
                reason: "size must be positive".to_string(),
            });
        }
        Ok(k)
    }

    /// `k(k-1)/2`, with overflow checking.
    fn strict_lower(family: &'static str, k: usize) -> ReaderResult<usize> {
        let product = k.checked_mul(k.saturating_sub(1)).ok_or_else(|| overflow(family))?;
        Ok(product / 2)
    }

    /// `k`, for `k > 0`.
    pub fn unit_vector(k: usize) -> ReaderResult<usize> {
        nonzero("param_reader::io::unit_vector", k)
    }

    /// `k - 1`, for `k > 0`.
    pub fn simplex(k: usize) -> ReaderResult<usize> {
        Ok(nonzero("param_reader::io::simplex", k)? - 1)
    }

    /// `k`.
    pub fn ordered(k: usize) -> usize {
        k
    }

    /// `k`.
    pub fn positive_ordered(k: usize) -> usize {
        k
    }

    /// `n(n+1)/2 + (m-n)·n` for an `m×n` factor; requires `m >= n`.
    pub fn cholesky_factor_cov(m: usize, n: usize) -> ReaderResult<usize> {
        const FAMILY: &str = "param_reader::io::cholesky_factor_cov";
        if m < n {
            return Err(ReaderError::InvalidShape {
                family: FAMILY,
                reason: format!("{m} rows is fewer than {n} columns"),
            });
        }
        let triangle = strict_lower(FAMILY, n)?.checked_add(n).ok_or_else(|| overflow(FAMILY))?;
        let trapezoid = (m - n).checked_mul(n).ok_or_else(|| overflow(FAMILY))?;
        triangle.checked_add(trapezoid).ok_or_else(|| overflow(FAMILY))
    }

    /// `k(k-1)/2`.
    pub fn cholesky_factor_corr(k: usize) -> ReaderResult<usize> {
        strict_lower("param_reader::io::cholesky_factor_corr", k)
    }

    /// `k + k(k-1)/2`.
    pub fn cov_matrix(k: usize) -> ReaderResult<usize> {
        const FAMILY: &str = "param_reader::io::cov_matrix";
        strict_lower(FAMILY, k)?.checked_add(k).ok_or_else(|| overflow(FAMILY))
    }

    /// `k(k-1)/2`.
    pub fn corr_matrix(k: usize) -> ReaderResult<usize> {
        strict_lower("param_reader::io::corr_matrix", k)
    }
}

const VECTOR: &str = "Constrained vector";
const MATRIX: &str = "Constrained matrix";

impl<'a, T: Real> Reader<'a, T> {
    // ---- Unit vector ----

    /// `k` reals, checked to have unit norm.
    ///
    /// # Errors
    /// - `InvalidShape` when `k == 0`, before any read.
    pub fn unit_vector(&mut self, k: usize) -> ReaderResult<Array1<T>> {
        let size = free_size::unit_vector(k)?;
        let y = self.vector(size)?;
        validation::check_unit_vector("param_reader::io::unit_vector", VECTOR, y.view())?;
        Ok(y)
    }

    /// `k` reals projected onto the unit sphere.
    pub fn unit_vector_constrain(&mut self, k: usize) -> ReaderResult<Array1<T>> {
        let size = free_size::unit_vector(k)?;
        let y = self.vector(size)?;
        Ok(vt::unit_vector_constrain(y.view())?)
    }

    /// `k` reals projected onto the unit sphere, adding `-½‖y‖²` to `lp`.
    pub fn unit_vector_constrain_lp(&mut self, k: usize, lp: &mut T) -> ReaderResult<Array1<T>> {
        let size = free_size::unit_vector(k)?;
        let y = self.vector(size)?;
        Ok(vt::unit_vector_constrain_lp(y.view(), lp)?)
    }

    // ---- Simplex ----

    /// `k` reals, checked to be non-negative and sum to one.
    ///
    /// # Errors
    /// - `InvalidShape` when `k == 0`, before any read.
    pub fn simplex(&mut self, k: usize) -> ReaderResult<Array1<T>> {
        free_size::simplex(k)?;
        let x = self.vector(k)?;
        validation::check_simplex("param_reader::io::simplex", VECTOR, x.view())?;
        Ok(x)
    }

    /// `k - 1` reals mapped onto the `k`-simplex.
    pub fn simplex_constrain(&mut self, k: usize) -> ReaderResult<Array1<T>> {
        let size = free_size::simplex(k)?;
        let y = self.vector(size)?;
        Ok(vt::simplex_constrain(y.view()))
    }

    /// `k - 1` reals mapped onto the `k`-simplex, adding the stick-breaking log-Jacobian
    /// to `lp`.
    pub fn simplex_constrain_lp(&mut self, k: usize, lp: &mut T) -> ReaderResult<Array1<T>> {
        let size = free_size::simplex(k)?;
        let y = self.vector(size)?;
        Ok(vt::simplex_constrain_lp(y.view(), lp))
    }

    // ---- Ordered ----

    /// `k` reals, checked to be strictly increasing.
    pub fn ordered(&mut self, k: usize) -> ReaderResult<Array1<T>> {
        let y = self.vector(k)?;
        validation::check_ordered("param_reader::io::ordered", VECTOR, y.view())?;
        Ok(y)
    }

    /// `k` reals mapped to a strictly increasing vector.
    pub fn ordered_constrain(&mut self, k: usize) -> ReaderResult<Array1<T>> {
        let x = self.vector(free_size::ordered(k))?;
        Ok(vt::ordered_constrain(x.view()))
    }

    /// [`Reader::ordered_constrain`], adding the log-Jacobian to `lp`.
    pub fn ordered_constrain_lp(&mut self, k: usize, lp: &mut T) -> ReaderResult<Array1<T>> {
        let x = self.vector(free_size::ordered(k))?;
        Ok(vt::ordered_constrain_lp(x.view(), lp))
    }

    /// `k` reals, checked to be non-negative and strictly increasing.
    pub fn positive_ordered(&mut self, k: usize) -> ReaderResult<Array1<T>> {
        let y = self.vector(k)?;
        validation::check_positive_ordered("param_reader::io::positive_ordered", VECTOR, y.view())?;
        Ok(y)
    }

    /// `k` reals mapped to a positive, strictly increasing vector.
    pub fn positive_ordered_constrain(&mut self, k: usize) -> ReaderResult<Array1<T>> {
        let x = self.vector(free_size::positive_ordered(k))?;
        Ok(vt::positive_ordered_constrain(x.view()))
    }

    /// [`Reader::positive_ordered_constrain`], adding the log-Jacobian to `lp`.
    pub fn positive_ordered_constrain_lp(
        &mut self, k: usize, lp: &mut T,
    ) -> ReaderResult<Array1<T>> {
        let x = self.vector(free_size::positive_ordered(k))?;
        Ok(vt::positive_ordered_constrain_lp(x.view(), lp))
    }

    // ---- Cholesky factor (covariance) ----

    /// `m×n` column-major matrix, checked to be a Cholesky factor.
    pub fn cholesky_factor_cov(&mut self, m: usize, n: usize) -> ReaderResult<Array2<T>> {
        let y = self.matrix(m, n)?;
        validation::check_cholesky_factor("param_reader::io::cholesky_factor_cov", MATRIX, y.view())?;
        Ok(y)
    }

    /// `m×n` Cholesky factor from `n(n+1)/2 + (m-n)·n` free values.
    ///
    /// # Errors
    /// - `InvalidShape` when `m < n`, before any read.
    pub fn cholesky_factor_cov_constrain(&mut self, m: usize, n: usize) -> ReaderResult<Array2<T>> {
        let x = self.vector(free_size::cholesky_factor_cov(m, n)?)?;
        Ok(mt::cholesky_factor_constrain(x.view(), m, n)?)
    }

    /// [`Reader::cholesky_factor_cov_constrain`], adding the log-Jacobian to `lp`.
    pub fn cholesky_factor_cov_constrain_lp(
        &mut self, m: usize, n: usize, lp: &mut T,
    ) -> ReaderResult<Array2<T>> {
        let x = self.vector(free_size::cholesky_factor_cov(m, n)?)?;
        Ok(mt::cholesky_factor_constrain_lp(x.view(), m, n, lp)?)
    }

    // ---- Cholesky factor (correlation) ----

    /// `k×k` column-major matrix, checked to be the Cholesky factor of a
    /// correlation matrix.
    pub fn cholesky_factor_corr(&mut self, k: usize) -> ReaderResult<Array2<T>> {
        let y = self.matrix(k, k)?;
        validation::check_cholesky_factor_corr(
            "param_reader::io::cholesky_factor_corr",
            MATRIX,
            y.view(),
        )?;
        Ok(y)
    }

    /// `k(k-1)/2` reals mapped to the Cholesky factor of a `k×k` correlation matrix.
    pub fn cholesky_factor_corr_constrain(&mut self, k: usize) -> ReaderResult<Array2<T>> {
        let x = self.vector(free_size::cholesky_factor_corr(k)?)?;
        Ok(mt::cholesky_corr_constrain(x.view(), k)?)
    }

    /// [`Reader::cholesky_factor_corr_constrain`], adding the log-Jacobian to `lp`.
    pub fn cholesky_factor_corr_constrain_lp(
        &mut self, k: usize, lp: &mut T,
    ) -> ReaderResult<Array2<T>> {
        let x = self.vector(free_size::cholesky_factor_corr(k)?)?;
        Ok(mt::cholesky_corr_constrain_lp(x.view(), k, lp)?)
    }

    // ---- Covariance matrix ----

    /// `k×k` column-major matrix, checked to be symmetric positive definite.
    pub fn cov_matrix(&mut self, k: usize) -> ReaderResult<Array2<T>> {
        let y = self.matrix(k, k)?;
        validation::check_cov_matrix("param_reader::io::cov_matrix", MATRIX, y.view())?;
        Ok(y)
    }

    /// `k + k(k-1)/2` reals mapped to a `k×k` covariance matrix.
    pub fn cov_matrix_constrain(&mut self, k: usize) -> ReaderResult<Array2<T>> {
        let x = self.vector(free_size::cov_matrix(k)?)?;
        Ok(mt::cov_matrix_constrain(x.view(), k)?)
    }

    /// [`Reader::cov_matrix_constrain`], adding the log-Jacobian to `lp`.
    pub fn cov_matrix_constrain_lp(&mut self, k: usize, lp: &mut T) -> ReaderResult<Array2<T>> {
        let x = self.vector(free_size::cov_matrix(k)?)?;
        Ok(mt::cov_matrix_constrain_lp(x.view(), k, lp)?)
    }

    // ---- Correlation matrix ----

    /// `k×k` column-major matrix, checked to be a correlation matrix.
    pub fn corr_matrix(&mut self, k: usize) -> ReaderResult<Array2<T>> {
        let y = self.matrix(k, k)?;
        validation::check_corr_matrix("param_reader::io::corr_matrix", MATRIX, y.view())?;
        Ok(y)
    }

    /// `k(k-1)/2` reals mapped to a `k×k` correlation matrix.
    pub fn corr_matrix_constrain(&mut self, k: usize) -> ReaderResult<Array2<T>> {
        let x = self.vector(free_size::corr_matrix(k)?)?;
        Ok(mt::corr_matrix_constrain(x.view(), k)?)
    }

    /// [`Reader::corr_matrix_constrain`], adding the log-Jacobian to `lp`.
    pub fn corr_matrix_constrain_lp(&mut self, k: usize, lp: &mut T) -> ReaderResult<Array2<T>> {
        let x = self.vector(free_size::corr_matrix(k)?)?;
        Ok(mt::corr_matrix_constrain_lp(x.view(), k, lp)?)
    }
}
