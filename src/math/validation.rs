//! Domain-validity predicates for constrained scalars, vectors and matrices.
//!
//! Purpose
//! -------
//! Decide whether a freshly extracted value already lies in its constrained
//! space. The reader's plain accessors call exactly one predicate per
//! constrained family and propagate the resulting [`ValidationError`]
//! unchanged.
//!
//! Key behaviors
//! -------------
//! - Scalar predicates: finiteness, positivity, one- and two-sided bounds.
//! - Vector predicates: unit vector, simplex, ordered, positive ordered.
//! - Matrix predicates: lower triangularity, Cholesky factors (covariance and
//!   correlation), symmetry, positive definiteness, covariance and
//!   correlation matrices.
//!
//! Invariants & assumptions
//! ------------------------
//! - NaN never satisfies a predicate: every comparison is written so that a
//!   NaN operand takes the failing branch.
//! - Approximate equalities (unit norms, simplex sums, symmetry, unit
//!   diagonals) use the shared absolute tolerance [`CONSTRAINT_TOLERANCE`].
//! - Positive definiteness is decided by a Cholesky decomposition of an
//!   `f64` copy of the matrix in `nalgebra`.
//!
//! Conventions
//! -----------
//! - Every predicate takes a `function` label (the caller) and a `name`
//!   label (the value) that are carried verbatim into the error.
//! - Predicates return `ValidationResult<()>` and never panic on invalid
//!   inputs. This module performs no I/O and no logging.
use crate::math::{
    errors::{ValidationError, ValidationResult},
    real::Real,
};
use nalgebra::DMatrix;
use ndarray::{ArrayView1, ArrayView2};

/// Absolute tolerance for approximate equality constraints.
pub const CONSTRAINT_TOLERANCE: f64 = 1e-8;

// ---- Scalars ----------------------------------------------------------------

/// Check that `x` is finite.
pub fn check_finite<T: Real>(function: &'static str, name: &'static str, x: T) -> ValidationResult<()> {
    if !x.is_finite() {
        return Err(ValidationError::NotFinite { function, name, value: x.as_f64() });
    }
    Ok(())
}

/// Check that `x` is strictly positive.
pub fn check_positive<T: Real>(function: &'static str, name: &'static str, x: T) -> ValidationResult<()> {
    if !(x > T::zero()) {
        return Err(ValidationError::NotPositive { function, name, value: x.as_f64() });
    }
    Ok(())
}

/// Check that `x` is strictly positive and finite.
pub fn check_positive_finite<T: Real>(
    function: &'static str, name: &'static str, x: T,
) -> ValidationResult<()> {
    check_positive(function, name, x)?;
    check_finite(function, name, x)
}

/// Check that `x >= lb`.
pub fn check_greater_or_equal<T: Real>(
    function: &'static str, name: &'static str, x: T, lb: T,
) -> ValidationResult<()> {
    if !(x >= lb) {
        return Err(ValidationError::BelowLowerBound {
            function,
            name,
            value: x.as_f64(),
            lb: lb.as_f64(),
        });
    }
    Ok(())
}

/// Check that `x <= ub`.
pub fn check_less_or_equal<T: Real>(
    function: &'static str, name: &'static str, x: T, ub: T,
) -> ValidationResult<()> {
    if !(x <= ub) {
        return Err(ValidationError::AboveUpperBound {
            function,
            name,
            value: x.as_f64(),
            ub: ub.as_f64(),
        });
    }
    Ok(())
}

/// Check that `lb <= x <= ub`.
pub fn check_bounded<T: Real>(
    function: &'static str, name: &'static str, x: T, lb: T, ub: T,
) -> ValidationResult<()> {
    if !(x >= lb && x <= ub) {
        return Err(ValidationError::OutOfBounds {
            function,
            name,
            value: x.as_f64(),
            lb: lb.as_f64(),
            ub: ub.as_f64(),
        });
    }
    Ok(())
}

// ---- Vectors ----------------------------------------------------------------

fn check_nonzero_size(function: &'static str, name: &'static str, size: usize) -> ValidationResult<()> {
    if size == 0 {
        return Err(ValidationError::ZeroSize { function, name });
    }
    Ok(())
}

/// Check that `theta` is non-empty with squared norm within tolerance of one.
pub fn check_unit_vector<T: Real>(
    function: &'static str, name: &'static str, theta: ArrayView1<'_, T>,
) -> ValidationResult<()> {
    check_nonzero_size(function, name, theta.len())?;
    let squared_norm = theta.iter().fold(T::zero(), |acc, &v| acc + v * v);
    if !((T::one() - squared_norm).abs() <= T::lit(CONSTRAINT_TOLERANCE)) {
        return Err(ValidationError::NotUnitVector {
            function,
            name,
            squared_norm: squared_norm.as_f64(),
        });
    }
    Ok(())
}

/// Check that `theta` is non-empty, sums to one within tolerance and has no
/// negative entries.
pub fn check_simplex<T: Real>(
    function: &'static str, name: &'static str, theta: ArrayView1<'_, T>,
) -> ValidationResult<()> {
    check_nonzero_size(function, name, theta.len())?;
    let sum = theta.iter().fold(T::zero(), |acc, &v| acc + v);
    if !((T::one() - sum).abs() <= T::lit(CONSTRAINT_TOLERANCE)) {
        return Err(ValidationError::SimplexSumNotOne { function, name, sum: sum.as_f64() });
    }
    for (index, &value) in theta.iter().enumerate() {
        if !(value >= T::zero()) {
            return Err(ValidationError::SimplexNegativeEntry {
                function,
                name,
                index,
                value: value.as_f64(),
            });
        }
    }
    Ok(())
}

/// Check that `y` is strictly increasing.
pub fn check_ordered<T: Real>(
    function: &'static str, name: &'static str, y: ArrayView1<'_, T>,
) -> ValidationResult<()> {
    for index in 1..y.len() {
        if !(y[index] > y[index - 1]) {
            return Err(ValidationError::NotOrdered {
                function,
                name,
                index,
                previous: y[index - 1].as_f64(),
                value: y[index].as_f64(),
            });
        }
    }
    Ok(())
}

/// Check that `y` is strictly increasing with a non-negative first entry.
pub fn check_positive_ordered<T: Real>(
    function: &'static str, name: &'static str, y: ArrayView1<'_, T>,
) -> ValidationResult<()> {
    if let Some(&first) = y.get(0) {
        if !(first >= T::zero()) {
            return Err(ValidationError::NegativeFirstEntry {
                function,
                name,
                value: first.as_f64(),
            });
        }
    }
    check_ordered(function, name, y)
}

// ---- Matrices ---------------------------------------------------------------

fn check_square<T: Real>(
    function: &'static str, name: &'static str, y: ArrayView2<'_, T>,
) -> ValidationResult<()> {
    if y.nrows() != y.ncols() {
        return Err(ValidationError::NotSquare { function, name, rows: y.nrows(), cols: y.ncols() });
    }
    Ok(())
}

/// Check that every entry strictly above the diagonal is zero.
pub fn check_lower_triangular<T: Real>(
    function: &'static str, name: &'static str, y: ArrayView2<'_, T>,
) -> ValidationResult<()> {
    for col in 1..y.ncols() {
        for row in 0..col.min(y.nrows()) {
            let value = y[[row, col]];
            if value != T::zero() {
                return Err(ValidationError::NotLowerTriangular {
                    function,
                    name,
                    row,
                    col,
                    value: value.as_f64(),
                });
            }
        }
    }
    Ok(())
}

fn check_positive_diagonal<T: Real>(
    function: &'static str, name: &'static str, y: ArrayView2<'_, T>,
) -> ValidationResult<()> {
    for index in 0..y.nrows().min(y.ncols()) {
        let value = y[[index, index]];
        if !(value > T::zero()) {
            return Err(ValidationError::NonPositiveDiagonal {
                function,
                name,
                index,
                value: value.as_f64(),
            });
        }
    }
    Ok(())
}

/// Check that `y` is a Cholesky factor of a covariance matrix: at least one
/// column, no more columns than rows, lower triangular (trapezoidal) with a
/// strictly positive diagonal.
pub fn check_cholesky_factor<T: Real>(
    function: &'static str, name: &'static str, y: ArrayView2<'_, T>,
) -> ValidationResult<()> {
    if y.nrows() < y.ncols() {
        return Err(ValidationError::TooFewRows { function, name, rows: y.nrows(), cols: y.ncols() });
    }
    check_nonzero_size(function, name, y.ncols())?;
    check_lower_triangular(function, name, y)?;
    check_positive_diagonal(function, name, y)
}

/// Check that `y` is a Cholesky factor of a correlation matrix: square,
/// non-empty, lower triangular, positive diagonal and unit-length rows.
pub fn check_cholesky_factor_corr<T: Real>(
    function: &'static str, name: &'static str, y: ArrayView2<'_, T>,
) -> ValidationResult<()> {
    check_square(function, name, y)?;
    check_nonzero_size(function, name, y.nrows())?;
    check_lower_triangular(function, name, y)?;
    check_positive_diagonal(function, name, y)?;
    for (row, values) in y.outer_iter().enumerate() {
        let squared_norm = values.iter().fold(T::zero(), |acc, &v| acc + v * v);
        if !((T::one() - squared_norm).abs() <= T::lit(CONSTRAINT_TOLERANCE)) {
            return Err(ValidationError::RowNotUnitLength {
                function,
                name,
                row,
                squared_norm: squared_norm.as_f64(),
            });
        }
    }
    Ok(())
}

/// Check that `y` is square and symmetric within tolerance.
pub fn check_symmetric<T: Real>(
    function: &'static str, name: &'static str, y: ArrayView2<'_, T>,
) -> ValidationResult<()> {
    check_square(function, name, y)?;
    let k = y.nrows();
    for col in 1..k {
        for row in 0..col {
            let (upper, lower) = (y[[row, col]], y[[col, row]]);
            if !((upper - lower).abs() <= T::lit(CONSTRAINT_TOLERANCE)) {
                return Err(ValidationError::NotSymmetric {
                    function,
                    name,
                    row,
                    col,
                    upper: upper.as_f64(),
                    lower: lower.as_f64(),
                });
            }
        }
    }
    Ok(())
}

/// Check that `y` is symmetric, free of NaN and positive definite.
pub fn check_pos_definite<T: Real>(
    function: &'static str, name: &'static str, y: ArrayView2<'_, T>,
) -> ValidationResult<()> {
    check_symmetric(function, name, y)?;
    check_nonzero_size(function, name, y.nrows())?;
    let k = y.nrows();
    let mut dense = DMatrix::<f64>::zeros(k, k);
    // nalgebra storage is column-major.
    for col in 0..k {
        for row in 0..k {
            let value = y[[row, col]];
            if value.is_nan() {
                return Err(ValidationError::MatrixHasNaN { function, name, row, col });
            }
            dense[(row, col)] = value.as_f64();
        }
    }
    if dense.cholesky().is_none() {
        return Err(ValidationError::NotPositiveDefinite { function, name });
    }
    Ok(())
}

/// Check that `y` is a covariance matrix (square, symmetric, positive definite).
pub fn check_cov_matrix<T: Real>(
    function: &'static str, name: &'static str, y: ArrayView2<'_, T>,
) -> ValidationResult<()> {
    check_pos_definite(function, name, y)
}

/// Check that `y` is a correlation matrix: square, non-empty, unit diagonal
/// within tolerance, symmetric and positive definite.
pub fn check_corr_matrix<T: Real>(
    function: &'static str, name: &'static str, y: ArrayView2<'_, T>,
) -> ValidationResult<()> {
    check_square(function, name, y)?;
    check_nonzero_size(function, name, y.nrows())?;
    for index in 0..y.nrows() {
        let value = y[[index, index]];
        if !((value - T::one()).abs() <= T::lit(CONSTRAINT_TOLERANCE)) {
            return Err(ValidationError::DiagonalNotUnit {
                function,
                name,
                index,
                value: value.as_f64(),
            });
        }
    }
    check_pos_definite(function, name, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Scalar predicates on valid values, boundary values and NaN.
    // - Vector predicates (unit vector, simplex, ordered, positive ordered).
    // - Matrix predicates (triangularity, Cholesky factors, symmetry,
    //   positive definiteness, covariance and correlation matrices).
    //
    // They intentionally DO NOT cover:
    // - The reader accessors that call these predicates; those live in
    //   `io::*` unit tests and the integration tests.
    // -------------------------------------------------------------------------

    const F: &str = "test";
    const N: &str = "x";

    #[test]
    // Purpose
    // -------
    // Scalar predicates accept boundary values and reject NaN.
    //
    // Given
    // -----
    // - Tiny positive values, values equal to their bounds, NaN and +inf.
    //
    // Expect
    // ------
    // - Boundary values pass; zero fails positivity; NaN is `OutOfBounds`;
    //   +inf is `NotFinite`.
    fn scalar_predicates_accept_boundaries_and_reject_nan() {
        // Arrange
        let nan = f64::NAN;

        // Act / Assert
        assert!(check_positive(F, N, 1e-300_f64).is_ok());
        assert!(check_positive(F, N, 0.0_f64).is_err());
        assert!(check_greater_or_equal(F, N, 2.0_f64, 2.0).is_ok());
        assert!(check_less_or_equal(F, N, 2.0_f64, 2.0).is_ok());
        assert!(check_bounded(F, N, 0.0_f64, 0.0, 1.0).is_ok());
        assert!(check_bounded(F, N, 1.0_f64, 0.0, 1.0).is_ok());
        assert!(matches!(
            check_bounded(F, N, nan, 0.0, 1.0),
            Err(ValidationError::OutOfBounds { .. })
        ));
        assert!(matches!(
            check_positive_finite(F, N, f64::INFINITY),
            Err(ValidationError::NotFinite { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // `check_unit_vector` accepts unit-norm vectors and rejects empty or
    // off-norm vectors.
    //
    // Given
    // -----
    // - `[0.6, 0.8]`, `[1, 1]` and an empty vector.
    //
    // Expect
    // ------
    // - Ok, `NotUnitVector` and `ZeroSize`.
    fn check_unit_vector_cases() {
        // Arrange
        let ok = array![0.6_f64, 0.8];
        let off = array![1.0_f64, 1.0];
        let empty = ndarray::Array1::<f64>::zeros(0);

        // Act / Assert
        assert!(check_unit_vector(F, N, ok.view()).is_ok());
        assert!(matches!(
            check_unit_vector(F, N, off.view()),
            Err(ValidationError::NotUnitVector { .. })
        ));
        assert!(matches!(
            check_unit_vector(F, N, empty.view()),
            Err(ValidationError::ZeroSize { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // `check_simplex` reports the sum before individual negative entries.
    //
    // Given
    // -----
    // - `[0.5, 0.5]` (valid), `[0.5, 0.6]` (bad sum), `[1.5, -0.5]` (negative).
    //
    // Expect
    // ------
    // - Ok, `SimplexSumNotOne`, and `SimplexNegativeEntry { index: 1 }`.
    fn check_simplex_cases() {
        // Arrange
        let ok = array![0.5_f64, 0.5];
        let bad_sum = array![0.5_f64, 0.6];
        let negative = array![1.5_f64, -0.5];

        // Act / Assert
        assert!(check_simplex(F, N, ok.view()).is_ok());
        assert!(matches!(
            check_simplex(F, N, bad_sum.view()),
            Err(ValidationError::SimplexSumNotOne { .. })
        ));
        assert!(matches!(
            check_simplex(F, N, negative.view()),
            Err(ValidationError::SimplexNegativeEntry { index: 1, .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Ordered predicates require strict increase; positive ordered also
    // requires a non-negative first entry.
    //
    // Given
    // -----
    // - `[-1, 0, 3]`, `[1, 1]`, `[0, 0.5]` and `[-0.1, 0.5]`.
    //
    // Expect
    // ------
    // - Ok, `NotOrdered { index: 1 }`, Ok and `NegativeFirstEntry`.
    fn ordered_predicates() {
        // Arrange
        let increasing = array![-1.0_f64, 0.0, 3.0];
        let tied = array![1.0_f64, 1.0];
        let from_zero = array![0.0_f64, 0.5];
        let negative_start = array![-0.1_f64, 0.5];

        // Act / Assert
        assert!(check_ordered(F, N, increasing.view()).is_ok());
        assert!(matches!(
            check_ordered(F, N, tied.view()),
            Err(ValidationError::NotOrdered { index: 1, .. })
        ));
        assert!(check_positive_ordered(F, N, from_zero.view()).is_ok());
        assert!(matches!(
            check_positive_ordered(F, N, negative_start.view()),
            Err(ValidationError::NegativeFirstEntry { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // `check_cholesky_factor` accepts a lower-trapezoidal factor and rejects
    // wide matrices, upper entries and non-positive diagonals.
    //
    // Given
    // -----
    // - A valid 3×2 factor, a 2×3 matrix, a 2×2 with a non-zero (0, 1) entry
    //   and a 2×2 with a zero diagonal entry.
    //
    // Expect
    // ------
    // - Ok, `TooFewRows`, `NotLowerTriangular { row: 0, col: 1 }` and
    //   `NonPositiveDiagonal { index: 1 }`.
    fn check_cholesky_factor_cases() {
        // Arrange
        let tall = array![[1.0_f64, 0.0], [0.5, 2.0], [3.0, -1.0]];
        let wide = array![[1.0_f64, 0.0, 0.0], [0.5, 2.0, 0.0]];
        let upper = array![[1.0_f64, 0.1], [0.5, 2.0]];
        let bad_diag = array![[1.0_f64, 0.0], [0.5, 0.0]];

        // Act / Assert
        assert!(check_cholesky_factor(F, N, tall.view()).is_ok());
        assert!(matches!(
            check_cholesky_factor(F, N, wide.view()),
            Err(ValidationError::TooFewRows { .. })
        ));
        assert!(matches!(
            check_cholesky_factor(F, N, upper.view()),
            Err(ValidationError::NotLowerTriangular { row: 0, col: 1, .. })
        ));
        assert!(matches!(
            check_cholesky_factor(F, N, bad_diag.view()),
            Err(ValidationError::NonPositiveDiagonal { index: 1, .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // `check_cholesky_factor_corr` requires unit-length rows.
    //
    // Given
    // -----
    // - `[[1, 0], [0.5, sqrt(0.75)]]` and `[[1, 0], [0.5, 0.5]]`.
    //
    // Expect
    // ------
    // - Ok, then `RowNotUnitLength { row: 1 }`.
    fn check_cholesky_factor_corr_cases() {
        // Arrange
        let s = 0.75_f64.sqrt();
        let ok = array![[1.0_f64, 0.0], [0.5, s]];
        let bad = array![[1.0_f64, 0.0], [0.5, 0.5]];

        // Act / Assert
        assert!(check_cholesky_factor_corr(F, N, ok.view()).is_ok());
        assert!(matches!(
            check_cholesky_factor_corr(F, N, bad.view()),
            Err(ValidationError::RowNotUnitLength { row: 1, .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Covariance and correlation predicates distinguish symmetry, definiteness
    // and unit-diagonal failures.
    //
    // Given
    // -----
    // - A valid covariance matrix, an asymmetric one, an indefinite one and a
    //   valid correlation matrix.
    //
    // Expect
    // ------
    // - The covariance checks return Ok, `NotSymmetric { row: 0, col: 1 }`
    //   and `NotPositiveDefinite`; the correlation check accepts the
    //   correlation matrix and rejects the covariance with `DiagonalNotUnit`.
    fn cov_and_corr_matrix_cases() {
        // Arrange
        let cov = array![[2.0_f64, 0.5], [0.5, 1.0]];
        let asym = array![[2.0_f64, 0.5], [0.4, 1.0]];
        let indefinite = array![[1.0_f64, 2.0], [2.0, 1.0]];
        let corr = array![[1.0_f64, 0.3], [0.3, 1.0]];

        // Act / Assert
        assert!(check_cov_matrix(F, N, cov.view()).is_ok());
        assert!(matches!(
            check_cov_matrix(F, N, asym.view()),
            Err(ValidationError::NotSymmetric { row: 0, col: 1, .. })
        ));
        assert!(matches!(
            check_cov_matrix(F, N, indefinite.view()),
            Err(ValidationError::NotPositiveDefinite { .. })
        ));
        assert!(check_corr_matrix(F, N, corr.view()).is_ok());
        assert!(matches!(
            check_corr_matrix(F, N, cov.view()),
            Err(ValidationError::DiagonalNotUnit { index: 0, .. })
        ));
    }
}
