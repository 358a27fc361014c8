//! Element-wise constrained reads for vectors, row vectors and matrices.
//!
//! Purpose
//! -------
//! Apply one [`ScalarConstraint`] to every element of a dense container.
//! Each element is produced by one scalar-level read, so a batch read of `k`
//! elements consumes exactly `k` reals and, in the `_lp` forms, adds `k`
//! Jacobian terms.
//!
//! Key behaviors
//! -------------
//! - Availability for the whole container is checked before the first
//!   element is read; an exhausted buffer leaves the cursor unchanged.
//! - Matrices are filled column by column (outer loop over columns, inner
//!   over rows), matching the column-major layout of [`Reader::matrix`].
//! - Per-element failures (validation, bound consistency) surface at the
//!   failing element, after the preceding elements were consumed.
//!
//! Conventions
//! -----------
//! - Generic entry points take the constraint explicitly
//!   (`vector_checked`, `vector_constrained`, `vector_constrained_lp`, …);
//!   the named families (`vector_lb`, `matrix_lub_constrain_lp`, …) are thin
//!   wrappers over them.
use crate::{
    io::{
        constraint::ScalarConstraint,
        errors::ReaderResult,
        reader::{Reader, checked_size},
    },
    math::real::Real,
};
use ndarray::{Array1, Array2, ShapeBuilder};

impl<'a, T: Real> Reader<'a, T> {
    // ---- Fill primitives ----

    fn fill_vector<F>(&mut self, m: usize, mut next: F) -> ReaderResult<Array1<T>>
    where
        F: FnMut(&mut Self) -> ReaderResult<T>,
    {
        self.ensure_available(m)?;
        let mut out = Vec::with_capacity(m);
        for _ in 0..m {
            out.push(next(self)?);
        }
        Ok(Array1::from(out))
    }

    fn fill_row_vector<F>(&mut self, m: usize, next: F) -> ReaderResult<Array2<T>>
    where
        F: FnMut(&mut Self) -> ReaderResult<T>,
    {
        let values = self.fill_vector(m, next)?;
        Ok(values.into_shape_with_order((1, m))?)
    }

    fn fill_matrix<F>(&mut self, n: usize, m: usize, mut next: F) -> ReaderResult<Array2<T>>
    where
        F: FnMut(&mut Self) -> ReaderResult<T>,
    {
        let size = checked_size("matrix", n, m)?;
        self.ensure_available(size)?;
        let mut out = Vec::with_capacity(size);
        for _col in 0..m {
            for _row in 0..n {
                out.push(next(self)?);
            }
        }
        Ok(Array2::from_shape_vec((n, m).f(), out)?)
    }

    // ---- Generic entry points ----

    /// `m` reals, each validated against `constraint`.
    pub fn vector_checked(
        &mut self, constraint: &ScalarConstraint<T>, m: usize,
    ) -> ReaderResult<Array1<T>> {
        self.fill_vector(m, |r| r.scalar_checked(constraint))
    }

    /// `m` reals, each mapped through `constraint`.
    pub fn vector_constrained(
        &mut self, constraint: &ScalarConstraint<T>, m: usize,
    ) -> ReaderResult<Array1<T>> {
        self.fill_vector(m, |r| r.scalar_constrained(constraint))
    }

    /// `m` reals, each mapped through `constraint` with Jacobian.
    pub fn vector_constrained_lp(
        &mut self, constraint: &ScalarConstraint<T>, m: usize, lp: &mut T,
    ) -> ReaderResult<Array1<T>> {
        self.fill_vector(m, |r| r.scalar_constrained_lp(constraint, lp))
    }

    /// `m` reals as a `(1, m)` row vector, each validated against `constraint`.
    pub fn row_vector_checked(
        &mut self, constraint: &ScalarConstraint<T>, m: usize,
    ) -> ReaderResult<Array2<T>> {
        self.fill_row_vector(m, |r| r.scalar_checked(constraint))
    }

    /// `m` reals as a `(1, m)` row vector, each mapped through `constraint`.
    pub fn row_vector_constrained(
        &mut self, constraint: &ScalarConstraint<T>, m: usize,
    ) -> ReaderResult<Array2<T>> {
        self.fill_row_vector(m, |r| r.scalar_constrained(constraint))
    }

    /// `m` reals as a `(1, m)` row vector, each mapped through `constraint` with
    /// Jacobian.
    pub fn row_vector_constrained_lp(
        &mut self, constraint: &ScalarConstraint<T>, m: usize, lp: &mut T,
    ) -> ReaderResult<Array2<T>> {
        self.fill_row_vector(m, |r| r.scalar_constrained_lp(constraint, lp))
    }

    /// `n×m` reals in column-major order, each validated against `constraint`.
    pub fn matrix_checked(
        &mut self, constraint: &ScalarConstraint<T>, n: usize, m: usize,
    ) -> ReaderResult<Array2<T>> {
        self.fill_matrix(n, m, |r| r.scalar_checked(constraint))
    }

    /// `n×m` reals in column-major order, each mapped through `constraint`.
    pub fn matrix_constrained(
        &mut self, constraint: &ScalarConstraint<T>, n: usize, m: usize,
    ) -> ReaderResult<Array2<T>> {
        self.fill_matrix(n, m, |r| r.scalar_constrained(constraint))
    }

    /// `n×m` reals in column-major order, each mapped through `constraint` with Jacobian.
    pub fn matrix_constrained_lp(
        &mut self, constraint: &ScalarConstraint<T>, n: usize, m: usize, lp: &mut T,
    ) -> ReaderResult<Array2<T>> {
        self.fill_matrix(n, m, |r| r.scalar_constrained_lp(constraint, lp))
    }

    // ---- Vector families ----

    /// `m` reals as a vector, each checked to be `>= lb`.
    pub fn vector_lb(&mut self, lb: T, m: usize) -> ReaderResult<Array1<T>> {
        self.vector_checked(&ScalarConstraint::Lower(lb), m)
    }

    /// `m` reals as a vector, each mapped to `[lb, ∞)`.
    pub fn vector_lb_constrain(&mut self, lb: T, m: usize) -> ReaderResult<Array1<T>> {
        self.vector_constrained(&ScalarConstraint::Lower(lb), m)
    }

    /// `m` reals as a vector, each mapped to `[lb, ∞)`, adding one log-Jacobian term per
    /// element to `lp`.
    pub fn vector_lb_constrain_lp(&mut self, lb: T, m: usize, lp: &mut T) -> ReaderResult<Array1<T>> {
        self.vector_constrained_lp(&ScalarConstraint::Lower(lb), m, lp)
    }

    /// `m` reals as a vector, each checked to be `<= ub`.
    pub fn vector_ub(&mut self, ub: T, m: usize) -> ReaderResult<Array1<T>> {
        self.vector_checked(&ScalarConstraint::Upper(ub), m)
    }

    /// `m` reals as a vector, each mapped to `(-∞, ub]`.
    pub fn vector_ub_constrain(&mut self, ub: T, m: usize) -> ReaderResult<Array1<T>> {
        self.vector_constrained(&ScalarConstraint::Upper(ub), m)
    }

    /// `m` reals as a vector, each mapped to `(-∞, ub]`, adding one log-Jacobian term per
    /// element to `lp`.
    pub fn vector_ub_constrain_lp(&mut self, ub: T, m: usize, lp: &mut T) -> ReaderResult<Array1<T>> {
        self.vector_constrained_lp(&ScalarConstraint::Upper(ub), m, lp)
    }

    /// `m` reals as a vector, each checked to lie in `[lb, ub]`.
    pub fn vector_lub(&mut self, lb: T, ub: T, m: usize) -> ReaderResult<Array1<T>> {
        self.vector_checked(&ScalarConstraint::LowerUpper(lb, ub), m)
    }

    /// `m` reals as a vector, each mapped to `[lb, ub]`.
    pub fn vector_lub_constrain(&mut self, lb: T, ub: T, m: usize) -> ReaderResult<Array1<T>> {
        self.vector_constrained(&ScalarConstraint::LowerUpper(lb, ub), m)
    }

    /// `m` reals as a vector, each mapped to `[lb, ub]`, adding one log-Jacobian term per
    /// element to `lp`.
    pub fn vector_lub_constrain_lp(
        &mut self, lb: T, ub: T, m: usize, lp: &mut T,
    ) -> ReaderResult<Array1<T>> {
        self.vector_constrained_lp(&ScalarConstraint::LowerUpper(lb, ub), m, lp)
    }

    /// `m` reals as a vector, each returned as read (no validation).
    pub fn vector_offset_multiplier(
        &mut self, offset: T, multiplier: T, m: usize,
    ) -> ReaderResult<Array1<T>> {
        self.vector_checked(&ScalarConstraint::OffsetMultiplier(offset, multiplier), m)
    }

    /// `m` reals as a vector, each mapped to `offset + multiplier · x`.
    pub fn vector_offset_multiplier_constrain(
        &mut self, offset: T, multiplier: T, m: usize,
    ) -> ReaderResult<Array1<T>> {
        self.vector_constrained(&ScalarConstraint::OffsetMultiplier(offset, multiplier), m)
    }

    /// `m` reals as a vector, each mapped to `offset + multiplier · x`, adding one
    /// log-Jacobian term per element to `lp`.
    pub fn vector_offset_multiplier_constrain_lp(
        &mut self, offset: T, multiplier: T, m: usize, lp: &mut T,
    ) -> ReaderResult<Array1<T>> {
        self.vector_constrained_lp(&ScalarConstraint::OffsetMultiplier(offset, multiplier), m, lp)
    }

    // ---- Row vector families ----

    /// `m` reals as a `(1, m)` row vector, each checked to be `>= lb`.
    pub fn row_vector_lb(&mut self, lb: T, m: usize) -> ReaderResult<Array2<T>> {
        self.row_vector_checked(&ScalarConstraint::Lower(lb), m)
    }

    /// `m` reals as a `(1, m)` row vector, each mapped to `[lb, ∞)`.
    pub fn row_vector_lb_constrain(&mut self, lb: T, m: usize) -> ReaderResult<Array2<T>> {
        self.row_vector_constrained(&ScalarConstraint::Lower(lb), m)
    }

    /// `m` reals as a `(1, m)` row vector, each mapped to `[lb, ∞)`, adding one
    /// log-Jacobian term per element to `lp`.
    pub fn row_vector_lb_constrain_lp(
        &mut self, lb: T, m: usize, lp: &mut T,
    ) -> ReaderResult<Array2<T>> {
        self.row_vector_constrained_lp(&ScalarConstraint::Lower(lb), m, lp)
    }

    /// `m` reals as a `(1, m)` row vector, each checked to be `<= ub`.
    pub fn row_vector_ub(&mut self, ub: T, m: usize) -> ReaderResult<Array2<T>> {
        self.row_vector_checked(&ScalarConstraint::Upper(ub), m)
    }

    /// `m` reals as a `(1, m)` row vector, each mapped to `(-∞, ub]`.
    pub fn row_vector_ub_constrain(&mut self, ub: T, m: usize) -> ReaderResult<Array2<T>> {
        self.row_vector_constrained(&ScalarConstraint::Upper(ub), m)
    }

    /// `m` reals as a `(1, m)` row vector, each mapped to `(-∞, ub]`, adding one
    /// log-Jacobian term per element to `lp`.
    pub fn row_vector_ub_constrain_lp(
        &mut self, ub: T, m: usize, lp: &mut T,
    ) -> ReaderResult<Array2<T>> {
        self.row_vector_constrained_lp(&ScalarConstraint::Upper(ub), m, lp)
    }

    /// `m` reals as a `(1, m)` row vector, each checked to lie in `[lb, ub]`.
    pub fn row_vector_lub(&mut self, lb: T, ub: T, m: usize) -> ReaderResult<Array2<T>> {
        self.row_vector_checked(&ScalarConstraint::LowerUpper(lb, ub), m)
    }

    /// `m` reals as a `(1, m)` row vector, each mapped to `[lb, ub]`.
    pub fn row_vector_lub_constrain(&mut self, lb: T, ub: T, m: usize) -> ReaderResult<Array2<T>> {
        self.row_vector_constrained(&ScalarConstraint::LowerUpper(lb, ub), m)
    }

    /// `m` reals as a `(1, m)` row vector, each mapped to `[lb, ub]`, adding one
    /// log-Jacobian term per element to `lp`.
    pub fn row_vector_lub_constrain_lp(
        &mut self, lb: T, ub: T, m: usize, lp: &mut T,
    ) -> ReaderResult<Array2<T>> {
        self.row_vector_constrained_lp(&ScalarConstraint::LowerUpper(lb, ub), m, lp)
    }

    /// `m` reals as a `(1, m)` row vector, each returned as read (no validation).
    pub fn row_vector_offset_multiplier(
        &mut self, offset: T, multiplier: T, m: usize,
    ) -> ReaderResult<Array2<T>> {
        self.row_vector_checked(&ScalarConstraint::OffsetMultiplier(offset, multiplier), m)
    }

    /// `m` reals as a `(1, m)` row vector, each mapped to `offset + multiplier · x`.
    pub fn row_vector_offset_multiplier_constrain(
        &mut self, offset: T, multiplier: T, m: usize,
    ) -> ReaderResult<Array2<T>> {
        self.row_vector_constrained(&ScalarConstraint::OffsetMultiplier(offset, multiplier), m)
    }

    /// `m` reals as a `(1, m)` row vector, each mapped to `offset + multiplier · x`,
    /// adding one log-Jacobian term per element to `lp`.
    pub fn row_vector_offset_multiplier_constrain_lp(
        &mut self, offset: T, multiplier: T, m: usize, lp: &mut T,
    ) -> ReaderResult<Array2<T>> {
        self.row_vector_constrained_lp(&ScalarConstraint::OffsetMultiplier(offset, multiplier), m, lp)
    }

    // ---- Matrix families ----

    /// `n×m` reals in column-major order, each checked to be `>= lb`.
    pub fn matrix_lb(&mut self, lb: T, n: usize, m: usize) -> ReaderResult<Array2<T>> {
        self.matrix_checked(&ScalarConstraint::Lower(lb), n, m)
    }

    /// `n×m` reals in column-major order, each mapped to `[lb, ∞)`.
    pub fn matrix_lb_constrain(&mut self, lb: T, n: usize, m: usize) -> ReaderResult<Array2<T>> {
        self.matrix_constrained(&ScalarConstraint::Lower(lb), n, m)
    }

    /// `n×m` reals in column-major order, each mapped to `[lb, ∞)`, adding one
    /// log-Jacobian term per element to `lp`.
    pub fn matrix_lb_constrain_lp(
        &mut self, lb: T, n: usize, m: usize, lp: &mut T,
    ) -> ReaderResult<Array2<T>> {
        self.matrix_constrained_lp(&ScalarConstraint::Lower(lb), n, m, lp)
    }

    /// `n×m` reals in column-major order, each checked to be `<= ub`.
    pub fn matrix_ub(&mut self, ub: T, n: usize, m: usize) -> ReaderResult<Array2<T>> {
        self.matrix_checked(&ScalarConstraint::Upper(ub), n, m)
    }

    /// `n×m` reals in column-major order, each mapped to `(-∞, ub]`.
    pub fn matrix_ub_constrain(&mut self, ub: T, n: usize, m: usize) -> ReaderResult<Array2<T>> {
        self.matrix_constrained(&ScalarConstraint::Upper(ub), n, m)
    }

    /// `n×m` reals in column-major order, each mapped to `(-∞, ub]`, adding one
    /// log-Jacobian term per element to `lp`.
    pub fn matrix_ub_constrain_lp(
        &mut self, ub: T, n: usize, m: usize, lp: &mut T,
    ) -> ReaderResult<Array2<T>> {
        self.matrix_constrained_lp(&ScalarConstraint::Upper(ub), n, m, lp)
    }

    /// `n×m` reals in column-major order, each checked to lie in `[lb, ub]`.
    pub fn matrix_lub(&mut self, lb: T, ub: T, n: usize, m: usize) -> ReaderResult<Array2<T>> {
        self.matrix_checked(&ScalarConstraint::LowerUpper(lb, ub), n, m)
    }

    /// `n×m` reals in column-major order, each mapped to `[lb, ub]`.
    pub fn matrix_lub_constrain(
        &mut self, lb: T, ub: T, n: usize, m: usize,
    ) -> ReaderResult<Array2<T>> {
        self.matrix_constrained(&ScalarConstraint::LowerUpper(lb, ub), n, m)
    }

    /// `n×m` reals in column-major order, each mapped to `[lb, ub]`, adding one
    /// log-Jacobian term per element to `lp`.
    pub fn matrix_lub_constrain_lp(
        &mut self, lb: T, ub: T, n: usize, m: usize, lp: &mut T,
    ) -> ReaderResult<Array2<T>> {
        self.matrix_constrained_lp(&ScalarConstraint::LowerUpper(lb, ub), n, m, lp)
    }

    /// `n×m` reals in column-major order, each returned as read (no validation).
    pub fn matrix_offset_multiplier(
        &mut self, offset: T, multiplier: T, n: usize, m: usize,
    ) -> ReaderResult<Array2<T>> {
        self.matrix_checked(&ScalarConstraint::OffsetMultiplier(offset, multiplier), n, m)
    }

    /// `n×m` reals in column-major order, each mapped to `offset + multiplier · x`.
    pub fn matrix_offset_multiplier_constrain(
        &mut self, offset: T, multiplier: T, n: usize, m: usize,
    ) -> ReaderResult<Array2<T>> {
        self.matrix_constrained(&ScalarConstraint::OffsetMultiplier(offset, multiplier), n, m)
    }

    /// `n×m` reals in column-major order, each mapped to `offset + multiplier · x`,
    /// adding one log-Jacobian term per element to `lp`.
    pub fn matrix_offset_multiplier_constrain_lp(
        &mut self, offset: T, multiplier: T, n: usize, m: usize, lp: &mut T,
    ) -> ReaderResult<Array2<T>> {
        self.matrix_constrained_lp(&ScalarConstraint::OffsetMultiplier(offset, multiplier), n, m, lp)
    }
}
