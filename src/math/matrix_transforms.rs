//! Matrix transforms: Cholesky factors, covariance and correlation matrices.
//!
//! Purpose
//! -------
//! Map a flat vector of free (unconstrained) values onto a structured matrix
//! and, in the `_lp` forms, add the log-absolute-Jacobian determinant of the
//! map to a caller-owned accumulator.
//!
//! Free-vector layouts
//! -------------------
//! - `cholesky_factor_constrain(x, M, N)`: `N(N+1)/2 + (M-N)N` values fill the
//!   lower trapezoid row by row; diagonal entries are stored on the log scale.
//! - `cholesky_corr_constrain(y, K)`: `K(K-1)/2` values, `tanh`-mapped to
//!   canonical partial correlations and consumed row by row.
//! - `cov_matrix_constrain(x, K)`: `K + K(K-1)/2` values fill a lower
//!   triangular `L` row by row with a log-scale diagonal; the result is `L Lᵀ`.
//! - `corr_matrix_constrain(x, K)`: `K(K-1)/2` values, `tanh`-mapped to
//!   canonical partial correlations and consumed column by column.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every transform validates the free-vector length against the requested
//!   shape and returns [`ValidationError::SizeMismatch`] otherwise.
//! - Outputs are valid members of their family for every finite input; no
//!   post-hoc validation is performed.
//! - `L Lᵀ` products are assembled symmetrically entry by entry, so results
//!   are exactly symmetric.
use crate::math::{
    errors::{ValidationError, ValidationResult},
    real::Real,
    scalar_transforms::{corr_constrain, corr_constrain_lp},
};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

fn check_size(function: &'static str, expected: usize, actual: usize) -> ValidationResult<()> {
    if expected != actual {
        return Err(ValidationError::SizeMismatch {
            function,
            name: "free parameter vector",
            expected,
            actual,
        });
    }
    Ok(())
}

/// `L Lᵀ` for a lower-triangular `L`, filled symmetrically.
pub fn multiply_lower_tri_self_transpose<T: Real>(l: ArrayView2<'_, T>) -> Array2<T> {
    let k = l.nrows();
    let mut out = Array2::<T>::zeros((k, k));
    for i in 0..k {
        for j in 0..=i {
            let mut acc = T::zero();
            for t in 0..(j + 1).min(l.ncols()) {
                acc = acc + l[[i, t]] * l[[j, t]];
            }
            out[[i, j]] = acc;
            out[[j, i]] = acc;
        }
    }
    out
}

// ---- Cholesky factor of a covariance matrix --------------------------------

fn fill_cholesky_factor<T: Real>(
    x: ArrayView1<'_, T>, m: usize, n: usize, mut lp: Option<&mut T>,
) -> ValidationResult<Array2<T>> {
    const FUNCTION: &str = "cholesky_factor_constrain";
    if m < n {
        return Err(ValidationError::TooFewRows {
            function: FUNCTION,
            name: "Cholesky factor",
            rows: m,
            cols: n,
        });
    }
    check_size(FUNCTION, n * (n + 1) / 2 + (m - n) * n, x.len())?;

    let mut y = Array2::<T>::zeros((m, n));
    let mut values = x.iter().copied();
    let mut next = || values.next().unwrap_or_else(T::nan);
    for row in 0..n {
        for col in 0..row {
            y[[row, col]] = next();
        }
        let log_diag = next();
        if let Some(lp) = lp.as_deref_mut() {
            *lp = *lp + log_diag;
        }
        y[[row, row]] = log_diag.exp();
    }
    for row in n..m {
        for col in 0..n {
            y[[row, col]] = next();
        }
    }
    Ok(y)
}

/// Build an `m×n` Cholesky factor (`m >= n`) from `n(n+1)/2 + (m-n)n` free
/// values.
pub fn cholesky_factor_constrain<T: Real>(
    x: ArrayView1<'_, T>, m: usize, n: usize,
) -> ValidationResult<Array2<T>> {
    fill_cholesky_factor(x, m, n, None)
}

/// [`cholesky_factor_constrain`], adding the sum of the log-scale diagonal
/// values to `lp`.
pub fn cholesky_factor_constrain_lp<T: Real>(
    x: ArrayView1<'_, T>, m: usize, n: usize, lp: &mut T,
) -> ValidationResult<Array2<T>> {
    fill_cholesky_factor(x, m, n, Some(lp))
}

// ---- Cholesky factor of a correlation matrix -------------------------------

fn fill_cholesky_corr<T: Real>(
    z: &Array1<T>, k: usize, mut lp: Option<&mut T>,
) -> Array2<T> {
    let mut x = Array2::<T>::zeros((k, k));
    if k == 0 {
        return x;
    }
    x[[0, 0]] = T::one();
    let mut pos = 0;
    for i in 1..k {
        x[[i, 0]] = z[pos];
        pos += 1;
        let mut sum_sqs = x[[i, 0]] * x[[i, 0]];
        for j in 1..i {
            if let Some(lp) = lp.as_deref_mut() {
                *lp = *lp + T::lit(0.5) * (-sum_sqs).ln_1p();
            }
            x[[i, j]] = z[pos] * (T::one() - sum_sqs).sqrt();
            pos += 1;
            sum_sqs = sum_sqs + x[[i, j]] * x[[i, j]];
        }
        x[[i, i]] = (T::one() - sum_sqs).sqrt();
    }
    x
}

/// Build a `k×k` Cholesky factor of a correlation matrix from `k(k-1)/2`
/// free values.
pub fn cholesky_corr_constrain<T: Real>(
    y: ArrayView1<'_, T>, k: usize,
) -> ValidationResult<Array2<T>> {
    check_size("cholesky_corr_constrain", k * k.saturating_sub(1) / 2, y.len())?;
    let z = y.mapv(corr_constrain);
    Ok(fill_cholesky_corr(&z, k, None))
}

/// [`cholesky_corr_constrain`] with its log-Jacobian added to `lp`.
pub fn cholesky_corr_constrain_lp<T: Real>(
    y: ArrayView1<'_, T>, k: usize, lp: &mut T,
) -> ValidationResult<Array2<T>> {
    check_size("cholesky_corr_constrain", k * k.saturating_sub(1) / 2, y.len())?;
    let z = y.mapv(|v| corr_constrain_lp(v, lp));
    Ok(fill_cholesky_corr(&z, k, Some(lp)))
}

// ---- Covariance matrix ------------------------------------------------------

fn cov_factor<T: Real>(x: ArrayView1<'_, T>, k: usize) -> ValidationResult<Array2<T>> {
    check_size("cov_matrix_constrain", k + k * k.saturating_sub(1) / 2, x.len())?;
    let mut l = Array2::<T>::zeros((k, k));
    let mut values = x.iter().copied();
    let mut next = || values.next().unwrap_or_else(T::nan);
    for row in 0..k {
        for col in 0..row {
            l[[row, col]] = next();
        }
        l[[row, row]] = next().exp();
    }
    Ok(l)
}

/// Build a `k×k` covariance matrix `L Lᵀ` from `k + k(k-1)/2` free values.
pub fn cov_matrix_constrain<T: Real>(x: ArrayView1<'_, T>, k: usize) -> ValidationResult<Array2<T>> {
    let l = cov_factor(x, k)?;
    Ok(multiply_lower_tri_self_transpose(l.view()))
}

/// [`cov_matrix_constrain`], adding `k ln 2 + Σ_j (k - j + 1) ln L_jj` to `lp`.
pub fn cov_matrix_constrain_lp<T: Real>(
    x: ArrayView1<'_, T>, k: usize, lp: &mut T,
) -> ValidationResult<Array2<T>> {
    let l = cov_factor(x, k)?;
    *lp = *lp + T::lit(k as f64) * T::lit(2.0).ln();
    for j in 0..k {
        *lp = *lp + T::lit((k - j + 1) as f64) * l[[j, j]].ln();
    }
    Ok(multiply_lower_tri_self_transpose(l.view()))
}

// ---- Correlation matrix -----------------------------------------------------

/// Cholesky factor of a correlation matrix from canonical partial
/// correlations stored column by column.
fn read_corr_l<T: Real>(cpcs: &Array1<T>, k: usize) -> Array2<T> {
    let mut l = Array2::<T>::zeros((k, k));
    if k == 0 {
        return l;
    }
    l[[0, 0]] = T::one();
    if k == 1 {
        return l;
    }
    // acc[r - 1] is the squared length still available to row r.
    let mut acc = vec![T::one(); k - 1];
    let mut position = 0;
    for col in 0..k - 1 {
        if col > 0 {
            l[[col, col]] = acc[col - 1].sqrt();
        }
        let pull = k - 1 - col;
        for offset in 0..pull {
            let row = col + 1 + offset;
            let cpc = cpcs[position + offset];
            l[[row, col]] = cpc * acc[row - 1].sqrt();
            acc[row - 1] = acc[row - 1] * (T::one() - cpc * cpc);
        }
        position += pull;
    }
    l[[k - 1, k - 1]] = acc[k - 2].sqrt();
    l
}

/// Build a `k×k` correlation matrix from `k(k-1)/2` free values.
pub fn corr_matrix_constrain<T: Real>(x: ArrayView1<'_, T>, k: usize) -> ValidationResult<Array2<T>> {
    check_size("corr_matrix_constrain", k * k.saturating_sub(1) / 2, x.len())?;
    let cpcs = x.mapv(corr_constrain);
    let l = read_corr_l(&cpcs, k);
    Ok(multiply_lower_tri_self_transpose(l.view()))
}

/// [`corr_matrix_constrain`] with its log-Jacobian added to `lp`.
pub fn corr_matrix_constrain_lp<T: Real>(
    x: ArrayView1<'_, T>, k: usize, lp: &mut T,
) -> ValidationResult<Array2<T>> {
    check_size("corr_matrix_constrain", k * k.saturating_sub(1) / 2, x.len())?;
    let cpcs = x.mapv(|v| corr_constrain_lp(v, lp));
    if k > 1 {
        let mut acc = T::zero();
        let mut pos = 0;
        for col in 0..=k - 2 {
            for _ in col + 1..k {
                let cpc = cpcs[pos];
                acc = acc + T::lit((k - col - 2) as f64) * (-(cpc * cpc)).ln_1p();
                pos += 1;
            }
        }
        *lp = *lp + T::lit(0.5) * acc;
    }
    let l = read_corr_l(&cpcs, k);
    Ok(multiply_lower_tri_self_transpose(l.view()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::validation::{
        check_cholesky_factor, check_cholesky_factor_corr, check_corr_matrix, check_cov_matrix,
    };
    use approx::assert_relative_eq;
    use finitediff::FiniteDiff;
    use nalgebra::DMatrix;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Validity of every matrix transform output under the matching
    //   predicate, for generic free values.
    // - Layout of the free vector (row-wise fill, log-scale diagonal).
    // - Size validation.
    // - Agreement of every `_lp` increment with log |det J| of the map from
    //   the free values to the matrix's free entries, by central differences.
    //
    // They intentionally DO NOT cover:
    // - Reader consumption; see `io::structured`.
    // -------------------------------------------------------------------------

    /// log |det J| of `f` at `y` by central differences, where `f` returns
    /// exactly one output per free value.
    fn fd_log_abs_det<F>(f: F, y: &Array1<f64>) -> f64
    where
        F: Fn(ArrayView1<'_, f64>) -> Vec<f64>,
    {
        let d = y.len();
        let image = |v: &Vec<f64>| f(ArrayView1::from(v.as_slice()));
        let jac = y.to_vec().central_jacobian(&image);
        DMatrix::from_fn(d, d, |i, j| jac[i][j]).determinant().abs().ln()
    }

    /// Entries `(i, j)` with `j < i`, row by row.
    fn strictly_lower(a: &Array2<f64>) -> Vec<f64> {
        let mut out = Vec::new();
        for i in 0..a.nrows() {
            for j in 0..i.min(a.ncols()) {
                out.push(a[[i, j]]);
            }
        }
        out
    }

    /// Entries `(i, j)` with `j <= i`, row by row.
    fn lower(a: &Array2<f64>) -> Vec<f64> {
        let mut out = Vec::new();
        for i in 0..a.nrows() {
            for j in 0..(i + 1).min(a.ncols()) {
                out.push(a[[i, j]]);
            }
        }
        out
    }

    #[test]
    // Purpose
    // -------
    // The 3×2 Cholesky factor is filled row by row with an exponentiated
    // diagonal, and the Jacobian sums the log-scale diagonal values.
    //
    // Given
    // -----
    // - x = [a, b, c, d, e] with layout
    //   [[e^a, 0], [b, e^c], [d, e]].
    //
    // Expect
    // ------
    // - The exact matrix above, lp = a + c, and lp equal to the
    //   finite-difference log-determinant over the lower trapezoid.
    fn cholesky_factor_layout_and_jacobian() {
        // Arrange
        let x = array![0.1_f64, 2.0, -0.3, 4.0, 5.0];
        let mut lp = 0.0;

        // Act
        let y = cholesky_factor_constrain_lp(x.view(), 3, 2, &mut lp).unwrap();
        let fd = fd_log_abs_det(
            |v| lower(&cholesky_factor_constrain(v, 3, 2).unwrap()),
            &x,
        );

        // Assert
        assert_relative_eq!(y[[0, 0]], 0.1_f64.exp());
        assert_eq!(y[[0, 1]], 0.0);
        assert_eq!(y[[1, 0]], 2.0);
        assert_relative_eq!(y[[1, 1]], (-0.3_f64).exp());
        assert_eq!(y[[2, 0]], 4.0);
        assert_eq!(y[[2, 1]], 5.0);
        assert_relative_eq!(lp, 0.1 - 0.3);
        assert_relative_eq!(lp, fd, epsilon = 1e-6, max_relative = 1e-6);
        assert!(check_cholesky_factor("t", "y", y.view()).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Size and shape mismatches are reported instead of panicking.
    //
    // Given
    // -----
    // - Two free values, requested as a 2×2 factor and as a 1×2 factor.
    //
    // Expect
    // ------
    // - `SizeMismatch { expected: 3, actual: 2 }` and `TooFewRows`.
    fn cholesky_factor_rejects_bad_sizes() {
        // Arrange
        let x = array![0.0_f64, 0.0];

        // Act
        let square = cholesky_factor_constrain(x.view(), 2, 2);
        let wide = cholesky_factor_constrain(x.view(), 1, 2);

        // Assert
        assert!(matches!(square, Err(ValidationError::SizeMismatch { expected: 3, actual: 2, .. })));
        assert!(matches!(wide, Err(ValidationError::TooFewRows { .. })));
    }

    #[test]
    // Purpose
    // -------
    // Cholesky-correlation factors have unit-length rows for arbitrary input,
    // and the Jacobian matches the free-to-strictly-lower map.
    //
    // Given
    // -----
    // - Six free values (K = 4).
    //
    // Expect
    // ------
    // - A valid correlation Cholesky factor, identical from both forms, with
    //   lp equal to the finite-difference log-determinant to 1e-6.
    fn cholesky_corr_rows_are_unit_length_and_jacobian_matches() {
        // Arrange
        let y = array![0.3_f64, -1.2, 2.5, 0.0, -0.7, 1.1];
        let mut lp = 0.0;

        // Act
        let plain = cholesky_corr_constrain(y.view(), 4).unwrap();
        let with_lp = cholesky_corr_constrain_lp(y.view(), 4, &mut lp).unwrap();
        let fd = fd_log_abs_det(
            |v| strictly_lower(&cholesky_corr_constrain(v, 4).unwrap()),
            &y,
        );

        // Assert
        assert!(check_cholesky_factor_corr("t", "L", plain.view()).is_ok());
        assert_eq!(plain, with_lp);
        assert_relative_eq!(lp, fd, epsilon = 1e-6, max_relative = 1e-6);
    }

    #[test]
    // Purpose
    // -------
    // A 1×1 covariance matrix is exp(x)², with Jacobian ln 2 + 2x.
    //
    // Given
    // -----
    // - x = [0.4].
    //
    // Expect
    // ------
    // - S = [[e^0.8]] and lp = ln 2 + 0.8.
    fn cov_matrix_scalar_case() {
        // Arrange
        let x = array![0.4_f64];
        let mut lp = 0.0;

        // Act
        let s = cov_matrix_constrain_lp(x.view(), 1, &mut lp).unwrap();

        // Assert
        assert_relative_eq!(s[[0, 0]], (0.8_f64).exp(), epsilon = 1e-12);
        assert_relative_eq!(lp, 2.0_f64.ln() + 2.0 * 0.4, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Covariance outputs are symmetric positive definite and the Jacobian
    // matches the free-to-lower-triangle map.
    //
    // Given
    // -----
    // - Six free values (K = 3).
    //
    // Expect
    // ------
    // - `check_cov_matrix` passes; lp equals the finite-difference
    //   log-determinant over the lower triangle (diagonal included) to 1e-6.
    fn cov_matrix_is_valid_and_jacobian_matches() {
        // Arrange
        let x = array![0.2_f64, -0.5, 0.1, 1.5, -2.0, 0.3];
        let mut lp = 0.0;

        // Act
        let s = cov_matrix_constrain_lp(x.view(), 3, &mut lp).unwrap();
        let fd = fd_log_abs_det(|v| lower(&cov_matrix_constrain(v, 3).unwrap()), &x);

        // Assert
        assert!(check_cov_matrix("t", "S", s.view()).is_ok());
        assert_eq!(s, cov_matrix_constrain(x.view(), 3).unwrap());
        assert_relative_eq!(lp, fd, epsilon = 1e-6, max_relative = 1e-6);
    }

    #[test]
    // Purpose
    // -------
    // Correlation outputs have a unit diagonal and are positive definite;
    // the 2×2 case reduces to tanh of the single free value.
    //
    // Given
    // -----
    // - Three free values (K = 3) and a single free value 0.5 (K = 2).
    //
    // Expect
    // ------
    // - `check_corr_matrix` passes for K = 3; R[0, 1] = tanh(0.5) and a
    //   unit diagonal for K = 2.
    fn corr_matrix_is_valid() {
        // Arrange
        let x = array![0.9_f64, -0.4, 1.7];
        let x2 = array![0.5_f64];

        // Act
        let r = corr_matrix_constrain(x.view(), 3).unwrap();
        let r2 = corr_matrix_constrain(x2.view(), 2).unwrap();

        // Assert
        assert!(check_corr_matrix("t", "R", r.view()).is_ok());
        assert_relative_eq!(r2[[0, 1]], 0.5_f64.tanh(), epsilon = 1e-12);
        assert_relative_eq!(r2[[1, 1]], 1.0, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // The correlation-matrix Jacobian matches the map from the free values
    // to the strictly lower triangle, for K = 3 and K = 4.
    //
    // Given
    // -----
    // - Three and six generic free values.
    //
    // Expect
    // ------
    // - lp equals the finite-difference log-determinant to 1e-6 and both
    //   forms return the same matrix.
    fn corr_matrix_jacobian_matches_finite_difference() {
        // Arrange
        let cases = [
            (3_usize, array![0.9_f64, -0.4, 1.7]),
            (4_usize, array![0.3_f64, -1.2, 0.8, 0.0, -0.7, 1.1]),
        ];

        for (k, x) in cases {
            let mut lp = 0.0;

            // Act
            let r = corr_matrix_constrain_lp(x.view(), k, &mut lp).unwrap();
            let fd = fd_log_abs_det(|v| strictly_lower(&corr_matrix_constrain(v, k).unwrap()), &x);

            // Assert
            assert_eq!(r, corr_matrix_constrain(x.view(), k).unwrap());
            assert_relative_eq!(lp, fd, epsilon = 1e-6, max_relative = 1e-6);
        }
    }
}
