//! Vector transforms: unit vector, simplex, ordered and positive ordered.
//!
//! Layout conventions
//! ------------------
//! - `unit_vector`, `ordered` and `positive_ordered` map `K` free values to a
//!   length-`K` result.
//! - `simplex` maps `K - 1` free values to a length-`K` result by stick
//!   breaking; an empty input yields the one-point simplex `[1]`.
//!
//! Each transform has a pure form and an `_lp` form that adds the
//! log-absolute-Jacobian determinant to a caller-owned accumulator.
use crate::math::{
    errors::ValidationResult,
    real::Real,
    scalar_transforms::{inv_logit, log1p_exp},
    validation,
};
use ndarray::{Array1, ArrayView1};

fn squared_norm<T: Real>(y: ArrayView1<'_, T>) -> ValidationResult<T> {
    let sn = y.dot(&y);
    validation::check_positive_finite("unit_vector_constrain", "squared norm", sn)?;
    Ok(sn)
}

/// Project `y` onto the unit sphere.
///
/// # Errors
/// - The squared norm of `y` is zero or not finite.
pub fn unit_vector_constrain<T: Real>(y: ArrayView1<'_, T>) -> ValidationResult<Array1<T>> {
    let norm = squared_norm(y)?.sqrt();
    Ok(y.mapv(|v| v / norm))
}

/// [`unit_vector_constrain`], adding `-½‖y‖²` to `lp`.
pub fn unit_vector_constrain_lp<T: Real>(
    y: ArrayView1<'_, T>, lp: &mut T,
) -> ValidationResult<Array1<T>> {
    let sn = squared_norm(y)?;
    *lp = *lp - T::lit(0.5) * sn;
    let norm = sn.sqrt();
    Ok(y.mapv(|v| v / norm))
}

/// Stick-breaking map from `K - 1` free values onto the `K`-simplex.
///
/// `z_k = inv_logit(y_k - ln(K - 1 - k))` centres the break points so that
/// `y = 0` maps to the uniform simplex.
fn stick_breaking<T: Real>(y: ArrayView1<'_, T>, mut lp: Option<&mut T>) -> Array1<T> {
    let k_minus_1 = y.len();
    let mut x = Array1::<T>::zeros(k_minus_1 + 1);
    let mut stick_len = T::one();
    for (k, &y_k) in y.iter().enumerate() {
        let adj_y_k = y_k - T::lit((k_minus_1 - k) as f64).ln();
        let z_k = inv_logit(adj_y_k);
        x[k] = stick_len * z_k;
        if let Some(lp) = lp.as_deref_mut() {
            *lp = *lp + stick_len.ln() - log1p_exp(-adj_y_k) - log1p_exp(adj_y_k);
        }
        stick_len = stick_len - x[k];
    }
    x[k_minus_1] = stick_len;
    x
}

/// Map `K - 1` free values onto the `K`-simplex.
pub fn simplex_constrain<T: Real>(y: ArrayView1<'_, T>) -> Array1<T> {
    stick_breaking(y, None)
}

/// [`simplex_constrain`] with its log-Jacobian added to `lp`.
pub fn simplex_constrain_lp<T: Real>(y: ArrayView1<'_, T>, lp: &mut T) -> Array1<T> {
    stick_breaking(y, Some(lp))
}

/// `y_0 = x_0`, `y_k = y_{k-1} + exp(x_k)`.
pub fn ordered_constrain<T: Real>(x: ArrayView1<'_, T>) -> Array1<T> {
    let mut y = x.to_owned();
    for k in 1..y.len() {
        y[k] = y[k - 1] + x[k].exp();
    }
    y
}

/// [`ordered_constrain`], adding `Σ_{k≥1} x_k` to `lp`.
pub fn ordered_constrain_lp<T: Real>(x: ArrayView1<'_, T>, lp: &mut T) -> Array1<T> {
    for &x_k in x.iter().skip(1) {
        *lp = *lp + x_k;
    }
    ordered_constrain(x)
}

/// `y_0 = exp(x_0)`, `y_k = y_{k-1} + exp(x_k)`.
pub fn positive_ordered_constrain<T: Real>(x: ArrayView1<'_, T>) -> Array1<T> {
    let mut y = x.mapv(|v| v.exp());
    for k in 1..y.len() {
        y[k] = y[k - 1] + y[k];
    }
    y
}

/// [`positive_ordered_constrain`], adding `Σ x_k` to `lp`.
pub fn positive_ordered_constrain_lp<T: Real>(x: ArrayView1<'_, T>, lp: &mut T) -> Array1<T> {
    for &x_k in x.iter() {
        *lp = *lp + x_k;
    }
    positive_ordered_constrain(x)
}
