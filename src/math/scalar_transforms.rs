//! Scalar transforms from ℝ into constrained scalar domains.
//!
//! Each transform comes in two forms: a pure map `f(x, params…)` and an
//! `_lp` overload that also adds `log |f'(x)|` to a caller-owned
//! accumulator. The pure form never evaluates the Jacobian term.
//!
//! The logistic helpers follow the guarded strategy used for the softplus
//! transforms: large-magnitude inputs are routed through the branch that
//! cannot overflow, so every transform stays finite for finite input.
use crate::math::{errors::ValidationResult, real::Real, validation};

// ---- Logistic helpers -------------------------------------------------------

/// Numerically stable `ln(1 + exp(x))`.
#[inline]
pub fn log1p_exp<T: Real>(x: T) -> T {
    if x > T::zero() { x + (-x).exp().ln_1p() } else { x.exp().ln_1p() }
}

/// Logistic sigmoid `1 / (1 + exp(-x))` without overflow in either tail.
#[inline]
pub fn inv_logit<T: Real>(x: T) -> T {
    if x < T::zero() {
        let exp_x = x.exp();
        exp_x / (T::one() + exp_x)
    } else {
        T::one() / (T::one() + (-x).exp())
    }
}

/// `ln(inv_logit(x)) + ln(1 - inv_logit(x))`, the log-derivative of the
/// logistic sigmoid.
#[inline]
fn log_inv_logit_deriv<T: Real>(x: T) -> T {
    -x.abs() - T::lit(2.0) * (-x.abs()).exp().ln_1p()
}

// ---- Positive ---------------------------------------------------------------

/// `exp(x)`.
#[inline]
pub fn positive_constrain<T: Real>(x: T) -> T {
    x.exp()
}

/// `exp(x)`, adding `x` to `lp`.
#[inline]
pub fn positive_constrain_lp<T: Real>(x: T, lp: &mut T) -> T {
    *lp = *lp + x;
    x.exp()
}

// ---- One-sided bounds -------------------------------------------------------

/// `exp(x) + lb`; identity when `lb` is `-∞`.
#[inline]
pub fn lb_constrain<T: Real>(x: T, lb: T) -> T {
    if lb == T::neg_infinity() { x } else { x.exp() + lb }
}

/// [`lb_constrain`] with its log-Jacobian `x` added to `lp`.
#[inline]
pub fn lb_constrain_lp<T: Real>(x: T, lb: T, lp: &mut T) -> T {
    if lb == T::neg_infinity() {
        return x;
    }
    *lp = *lp + x;
    x.exp() + lb
}

/// `ub - exp(x)`; identity when `ub` is `+∞`.
#[inline]
pub fn ub_constrain<T: Real>(x: T, ub: T) -> T {
    if ub == T::infinity() { x } else { ub - x.exp() }
}

/// [`ub_constrain`] with its log-Jacobian `x` added to `lp`.
#[inline]
pub fn ub_constrain_lp<T: Real>(x: T, ub: T, lp: &mut T) -> T {
    if ub == T::infinity() {
        return x;
    }
    *lp = *lp + x;
    ub - x.exp()
}

// ---- Two-sided bounds -------------------------------------------------------

/// `lb + (ub - lb) · inv_logit(x)`.
///
/// Infinite bounds fall back to the one-sided transforms, or to the
/// identity when both are infinite. The caller guarantees `lb <= ub`.
#[inline]
pub fn lub_constrain<T: Real>(x: T, lb: T, ub: T) -> T {
    match (lb == T::neg_infinity(), ub == T::infinity()) {
        (true, true) => x,
        (true, false) => ub_constrain(x, ub),
        (false, true) => lb_constrain(x, lb),
        (false, false) => lb + (ub - lb) * inv_logit(x),
    }
}

/// [`lub_constrain`] with `ln(ub - lb) + ln σ'(x)` added to `lp`.
#[inline]
pub fn lub_constrain_lp<T: Real>(x: T, lb: T, ub: T, lp: &mut T) -> T {
    match (lb == T::neg_infinity(), ub == T::infinity()) {
        (true, true) => x,
        (true, false) => ub_constrain_lp(x, ub, lp),
        (false, true) => lb_constrain_lp(x, lb, lp),
        (false, false) => {
            let diff = ub - lb;
            *lp = *lp + diff.ln() + log_inv_logit_deriv(x);
            lb + diff * inv_logit(x)
        }
    }
}

// ---- Affine -----------------------------------------------------------------

fn check_offset_multiplier<T: Real>(offset: T, multiplier: T) -> ValidationResult<()> {
    validation::check_finite("offset_multiplier_constrain", "offset", offset)?;
    validation::check_positive_finite("offset_multiplier_constrain", "multiplier", multiplier)
}

/// `offset + multiplier · x`.
///
/// # Errors
/// - `offset` is not finite, or `multiplier` is not positive and finite.
#[inline]
pub fn offset_multiplier_constrain<T: Real>(x: T, offset: T, multiplier: T) -> ValidationResult<T> {
    check_offset_multiplier(offset, multiplier)?;
    Ok(offset + multiplier * x)
}

/// [`offset_multiplier_constrain`] with `ln(multiplier)` added to `lp`.
#[inline]
pub fn offset_multiplier_constrain_lp<T: Real>(
    x: T, offset: T, multiplier: T, lp: &mut T,
) -> ValidationResult<T> {
    check_offset_multiplier(offset, multiplier)?;
    *lp = *lp + multiplier.ln();
    Ok(offset + multiplier * x)
}

// ---- Probability and correlation -------------------------------------------

/// `inv_logit(x)`, mapping ℝ → (0, 1).
#[inline]
pub fn prob_constrain<T: Real>(x: T) -> T {
    inv_logit(x)
}

/// [`prob_constrain`] with `ln σ'(x)` added to `lp`.
#[inline]
pub fn prob_constrain_lp<T: Real>(x: T, lp: &mut T) -> T {
    *lp = *lp + log_inv_logit_deriv(x);
    inv_logit(x)
}

/// `tanh(x)`, mapping ℝ → (-1, 1).
#[inline]
pub fn corr_constrain<T: Real>(x: T) -> T {
    x.tanh()
}

/// [`corr_constrain`] with `ln(1 - tanh²(x))` added to `lp`.
#[inline]
pub fn corr_constrain_lp<T: Real>(x: T, lp: &mut T) -> T {
    let tanh_x = x.tanh();
    *lp = *lp + (-(tanh_x * tanh_x)).ln_1p();
    tanh_x
}
