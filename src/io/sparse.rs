//! Sparse matrix reads keyed by explicit non-zero coordinates.
//!
//! Purpose
//! -------
//! Read one real per listed non-zero cell, in the order the coordinates are
//! given, and assemble an `n×m` compressed sparse column matrix from the
//! resulting `(row, col, value)` triplets.
//!
//! Key behaviors
//! -------------
//! - `row_idx` and `col_idx` must have equal length and name cells inside
//!   the `n×m` shape; violations fail with `InvalidShape` before any read.
//! - A request with `n == 0` or `m == 0` returns an empty matrix and reads
//!   nothing.
//! - Availability for all `row_idx.len()` values is checked before the first
//!   read.
//! - Duplicate coordinates are summed by the triplet conversion.
//!
//! Conventions
//! -----------
//! - Bounded families mirror the dense batch families: plain forms validate
//!   each value, constrain forms transform each value, `_lp` forms add one
//!   Jacobian term per non-zero.
use crate::{
    io::{
        constraint::ScalarConstraint,
        errors::{ReaderError, ReaderResult},
        reader::Reader,
    },
    math::real::Real,
};
use sprs::{CsMat, TriMat};

fn check_coordinates(
    row_idx: &[usize], col_idx: &[usize], n: usize, m: usize,
) -> ReaderResult<()> {
    const FAMILY: &str = "param_reader::io::sparse_matrix";
    if row_idx.len() != col_idx.len() {
        return Err(ReaderError::InvalidShape {
            family: FAMILY,
            reason: format!(
                "{} row indices but {} column indices",
                row_idx.len(),
                col_idx.len()
            ),
        });
    }
    for (k, (&row, &col)) in row_idx.iter().zip(col_idx).enumerate() {
        if row >= n || col >= m {
            return Err(ReaderError::InvalidShape {
                family: FAMILY,
                reason: format!("non-zero {k} at ({row}, {col}) lies outside {n} x {m}"),
            });
        }
    }
    Ok(())
}

impl<'a, T: Real> Reader<'a, T> {
    fn fill_sparse<F>(
        &mut self, row_idx: &[usize], col_idx: &[usize], n: usize, m: usize, mut next: F,
    ) -> ReaderResult<CsMat<T>>
    where
        F: FnMut(&mut Self) -> ReaderResult<T>,
    {
        if n == 0 || m == 0 {
            return Ok(TriMat::new((n, m)).to_csc());
        }
        check_coordinates(row_idx, col_idx, n, m)?;
        let nnz = row_idx.len();
        self.ensure_available(nnz)?;
        let mut triplets = TriMat::with_capacity((n, m), nnz);
        for (&row, &col) in row_idx.iter().zip(col_idx) {
            triplets.add_triplet(row, col, next(self)?);
        }
        Ok(triplets.to_csc())
    }

    // ---- Unconstrained ----

    /// One real per listed non-zero, assembled into an `n×m` sparse matrix.
    ///
    /// # Errors
    /// - `InvalidShape` for mismatched or out-of-range coordinates.
    /// - `BufferExhausted` if fewer than `row_idx.len()` reals remain.
    pub fn sparse_matrix(
        &mut self, row_idx: &[usize], col_idx: &[usize], n: usize, m: usize,
    ) -> ReaderResult<CsMat<T>> {
        self.fill_sparse(row_idx, col_idx, n, m, |r| r.scalar())
    }

    /// Same as [`Reader::sparse_matrix`].
    pub fn sparse_matrix_constrain(
        &mut self, row_idx: &[usize], col_idx: &[usize], n: usize, m: usize,
    ) -> ReaderResult<CsMat<T>> {
        self.sparse_matrix(row_idx, col_idx, n, m)
    }

    /// Same as [`Reader::sparse_matrix`]; `lp` is left untouched.
    pub fn sparse_matrix_constrain_lp(
        &mut self, row_idx: &[usize], col_idx: &[usize], n: usize, m: usize, _lp: &mut T,
    ) -> ReaderResult<CsMat<T>> {
        self.sparse_matrix(row_idx, col_idx, n, m)
    }

    // ---- Generic entry points ----

    /// One real per listed non-zero, each validated against `constraint`.
    pub fn sparse_matrix_checked(
        &mut self, constraint: &ScalarConstraint<T>, row_idx: &[usize], col_idx: &[usize],
        n: usize, m: usize,
    ) -> ReaderResult<CsMat<T>> {
        self.fill_sparse(row_idx, col_idx, n, m, |r| r.scalar_checked(constraint))
    }

    /// One real per listed non-zero, each mapped through `constraint`.
    pub fn sparse_matrix_constrained(
        &mut self, constraint: &ScalarConstraint<T>, row_idx: &[usize], col_idx: &[usize],
        n: usize, m: usize,
    ) -> ReaderResult<CsMat<T>> {
        self.fill_sparse(row_idx, col_idx, n, m, |r| r.scalar_constrained(constraint))
    }

    /// One real per listed non-zero, each mapped through `constraint` with Jacobian.
    pub fn sparse_matrix_constrained_lp(
        &mut self, constraint: &ScalarConstraint<T>, row_idx: &[usize], col_idx: &[usize],
        n: usize, m: usize, lp: &mut T,
    ) -> ReaderResult<CsMat<T>> {
        self.fill_sparse(row_idx, col_idx, n, m, |r| r.scalar_constrained_lp(constraint, lp))
    }

    // ---- Bounded families ----

    /// One real per listed non-zero, each checked to be `>= lb`.
    pub fn sparse_matrix_lb(
        &mut self, lb: T, row_idx: &[usize], col_idx: &[usize], n: usize, m: usize,
    ) -> ReaderResult<CsMat<T>> {
        self.sparse_matrix_checked(&ScalarConstraint::Lower(lb), row_idx, col_idx, n, m)
    }

    /// One real per listed non-zero, each mapped to `[lb, ∞)`.
    pub fn sparse_matrix_lb_constrain(
        &mut self, lb: T, row_idx: &[usize], col_idx: &[usize], n: usize, m: usize,
    ) -> ReaderResult<CsMat<T>> {
        self.sparse_matrix_constrained(&ScalarConstraint::Lower(lb), row_idx, col_idx, n, m)
    }

    /// One real per listed non-zero, each mapped to `[lb, ∞)`, adding one log-Jacobian
    /// term per element to `lp`.
    pub fn sparse_matrix_lb_constrain_lp(
        &mut self, lb: T, row_idx: &[usize], col_idx: &[usize], n: usize, m: usize, lp: &mut T,
    ) -> ReaderResult<CsMat<T>> {
        self.sparse_matrix_constrained_lp(&ScalarConstraint::Lower(lb), row_idx, col_idx, n, m, lp)
    }

    /// One real per listed non-zero, each checked to be `<= ub`.
    pub fn sparse_matrix_ub(
        &mut self, ub: T, row_idx: &[usize], col_idx: &[usize], n: usize, m: usize,
    ) -> ReaderResult<CsMat<T>> {
        self.sparse_matrix_checked(&ScalarConstraint::Upper(ub), row_idx, col_idx, n, m)
    }

    /// One real per listed non-zero, each mapped to `(-∞, ub]`.
    pub fn sparse_matrix_ub_constrain(
        &mut self, ub: T, row_idx: &[usize], col_idx: &[usize], n: usize, m: usize,
    ) -> ReaderResult<CsMat<T>> {
        self.sparse_matrix_constrained(&ScalarConstraint::Upper(ub), row_idx, col_idx, n, m)
    }

    /// One real per listed non-zero, each mapped to `(-∞, ub]`, adding one log-Jacobian
    /// term per element to `lp`.
    pub fn sparse_matrix_ub_constrain_lp(
        &mut self, ub: T, row_idx: &[usize], col_idx: &[usize], n: usize, m: usize, lp: &mut T,
    ) -> ReaderResult<CsMat<T>> {
        self.sparse_matrix_constrained_lp(&ScalarConstraint::Upper(ub), row_idx, col_idx, n, m, lp)
    }

    /// One real per listed non-zero, each checked to lie in `[lb, ub]`.
    pub fn sparse_matrix_lub(
        &mut self, lb: T, ub: T, row_idx: &[usize], col_idx: &[usize], n: usize, m: usize,
    ) -> ReaderResult<CsMat<T>> {
        self.sparse_matrix_checked(&ScalarConstraint::LowerUpper(lb, ub), row_idx, col_idx, n, m)
    }

    /// One real per listed non-zero, each mapped to `[lb, ub]`.
    pub fn sparse_matrix_lub_constrain(
        &mut self, lb: T, ub: T, row_idx: &[usize], col_idx: &[usize], n: usize, m: usize,
    ) -> ReaderResult<CsMat<T>> {
        self.sparse_matrix_constrained(&ScalarConstraint::LowerUpper(lb, ub), row_idx, col_idx, n, m)
    }

    /// One real per listed non-zero, each mapped to `[lb, ub]`, adding one log-Jacobian
    /// term per element to `lp`.
    #[allow(clippy::too_many_arguments)]
    pub fn sparse_matrix_lub_constrain_lp(
        &mut self, lb: T, ub: T, row_idx: &[usize], col_idx: &[usize], n: usize, m: usize,
        lp: &mut T,
    ) -> ReaderResult<CsMat<T>> {
        let constraint = ScalarConstraint::LowerUpper(lb, ub);
        self.sparse_matrix_constrained_lp(&constraint, row_idx, col_idx, n, m, lp)
    }

    /// One real per listed non-zero, each returned as read (no validation).
    pub fn sparse_matrix_offset_multiplier(
        &mut self, offset: T, multiplier: T, row_idx: &[usize], col_idx: &[usize], n: usize,
        m: usize,
    ) -> ReaderResult<CsMat<T>> {
        let constraint = ScalarConstraint::OffsetMultiplier(offset, multiplier);
        self.sparse_matrix_checked(&constraint, row_idx, col_idx, n, m)
    }

    /// One real per listed non-zero, each mapped to `offset + multiplier · x`.
    pub fn sparse_matrix_offset_multiplier_constrain(
        &mut self, offset: T, multiplier: T, row_idx: &[usize], col_idx: &[usize], n: usize,
        m: usize,
    ) -> ReaderResult<CsMat<T>> {
        let constraint = ScalarConstraint::OffsetMultiplier(offset, multiplier);
        self.sparse_matrix_constrained(&constraint, row_idx, col_idx, n, m)
    }

    /// One real per listed non-zero, each mapped to `offset + multiplier · x`, adding one
    /// log-Jacobian term per element to `lp`.
    #[allow(clippy::too_many_arguments)]
    pub fn sparse_matrix_offset_multiplier_constrain_lp(
        &mut self, offset: T, multiplier: T, row_idx: &[usize], col_idx: &[usize], n: usize,
        m: usize, lp: &mut T,
    ) -> ReaderResult<CsMat<T>> {
        let constraint = ScalarConstraint::OffsetMultiplier(offset, multiplier);
        self.sparse_matrix_constrained_lp(&constraint, row_idx, col_idx, n, m, lp)
    }
}
