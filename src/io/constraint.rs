//! Scalar constraint kinds and the reader methods that apply them.
//!
//! [`ScalarConstraint`] materializes the per-element constraint used by
//! scalar, batch (vector / row vector / matrix) and sparse reads. Each kind
//! has three behaviors:
//! - `validate`: the value is already constrained; check it.
//! - `constrain`: the value is unconstrained; map it into the domain.
//! - `constrain_lp`: as `constrain`, adding the log-Jacobian to `lp`.
//!
//! Two-sided kinds check `lb <= ub` in every behavior and report
//! [`ReaderError::BoundInconsistent`] otherwise. The offset/multiplier kind
//! performs no validation in plain mode; its parameters are checked by the
//! transform in the constrain modes.
use crate::{
    io::{
        errors::{ReaderError, ReaderResult},
        reader::Reader,
    },
    math::{real::Real, scalar_transforms as st, validation},
};

const NAME: &str = "Constrained scalar";

/// Constraint applied to a single real.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScalarConstraint<T> {
    /// All of ℝ.
    Unconstrained,
    /// `(0, ∞)`.
    Positive,
    /// `[lb, ∞)`.
    Lower(T),
    /// `(-∞, ub]`.
    Upper(T),
    /// `[lb, ub]`.
    LowerUpper(T, T),
    /// Affine `offset + multiplier · x`.
    OffsetMultiplier(T, T),
    /// `[0, 1]`.
    Probability,
    /// `[-1, 1]`.
    Correlation,
}

impl<T: Real> ScalarConstraint<T> {
    /// Diagnostic label of the reader family this kind backs.
    pub fn family(&self) -> &'static str {
        match self {
            ScalarConstraint::Unconstrained => "param_reader::io::scalar",
            ScalarConstraint::Positive => "param_reader::io::scalar_pos",
            ScalarConstraint::Lower(_) => "param_reader::io::scalar_lb",
            ScalarConstraint::Upper(_) => "param_reader::io::scalar_ub",
            ScalarConstraint::LowerUpper(..) => "param_reader::io::scalar_lub",
            ScalarConstraint::OffsetMultiplier(..) => "param_reader::io::scalar_offset_multiplier",
            ScalarConstraint::Probability => "param_reader::io::prob",
            ScalarConstraint::Correlation => "param_reader::io::corr",
        }
    }

    fn check_bounds(&self) -> ReaderResult<()> {
        if let ScalarConstraint::LowerUpper(lb, ub) = *self {
            if lb > ub {
                return Err(ReaderError::BoundInconsistent {
                    family: self.family(),
                    lb: lb.as_f64(),
                    ub: ub.as_f64(),
                });
            }
        }
        Ok(())
    }

    /// Check that `x` already satisfies the constraint and return it.
    ///
    /// # Errors
    /// - `BoundInconsistent` when `lb > ub`.
    /// - `Validation` when `x` is outside the domain (NaN never passes).
    pub fn validate(&self, x: T) -> ReaderResult<T> {
        self.check_bounds()?;
        let function = self.family();
        match *self {
            ScalarConstraint::Unconstrained | ScalarConstraint::OffsetMultiplier(..) => {}
            ScalarConstraint::Positive => validation::check_positive(function, NAME, x)?,
            ScalarConstraint::Lower(lb) => validation::check_greater_or_equal(function, NAME, x, lb)?,
            ScalarConstraint::Upper(ub) => validation::check_less_or_equal(function, NAME, x, ub)?,
            ScalarConstraint::LowerUpper(lb, ub) => {
                validation::check_bounded(function, NAME, x, lb, ub)?
            }
            ScalarConstraint::Probability => {
                validation::check_bounded(function, NAME, x, T::zero(), T::one())?
            }
            ScalarConstraint::Correlation => {
                validation::check_bounded(function, NAME, x, -T::one(), T::one())?
            }
        }
        Ok(x)
    }

    /// Map the unconstrained `x` into the domain.
    pub fn constrain(&self, x: T) -> ReaderResult<T> {
        self.check_bounds()?;
        Ok(match *self {
            ScalarConstraint::Unconstrained => x,
            ScalarConstraint::Positive => st::positive_constrain(x),
            ScalarConstraint::Lower(lb) => st::lb_constrain(x, lb),
            ScalarConstraint::Upper(ub) => st::ub_constrain(x, ub),
            ScalarConstraint::LowerUpper(lb, ub) => st::lub_constrain(x, lb, ub),
            ScalarConstraint::OffsetMultiplier(offset, multiplier) => {
                st::offset_multiplier_constrain(x, offset, multiplier)?
            }
            ScalarConstraint::Probability => st::prob_constrain(x),
            ScalarConstraint::Correlation => st::corr_constrain(x),
        })
    }

    /// [`ScalarConstraint::constrain`], adding the log-Jacobian to `lp`.
    pub fn constrain_lp(&self, x: T, lp: &mut T) -> ReaderResult<T> {
        self.check_bounds()?;
        Ok(match *self {
            ScalarConstraint::Unconstrained => x,
            ScalarConstraint::Positive => st::positive_constrain_lp(x, lp),
            ScalarConstraint::Lower(lb) => st::lb_constrain_lp(x, lb, lp),
            ScalarConstraint::Upper(ub) => st::ub_constrain_lp(x, ub, lp),
            ScalarConstraint::LowerUpper(lb, ub) => st::lub_constrain_lp(x, lb, ub, lp),
            ScalarConstraint::OffsetMultiplier(offset, multiplier) => {
                st::offset_multiplier_constrain_lp(x, offset, multiplier, lp)?
            }
            ScalarConstraint::Probability => st::prob_constrain_lp(x, lp),
            ScalarConstraint::Correlation => st::corr_constrain_lp(x, lp),
        })
    }
}

impl<'a, T: Real> Reader<'a, T> {
    /// Read one real and validate it against `constraint`.
    pub fn scalar_checked(&mut self, constraint: &ScalarConstraint<T>) -> ReaderResult<T> {
        let x = self.scalar()?;
        constraint.validate(x)
    }

    /// Read one unconstrained real and map it through `constraint`.
    pub fn scalar_constrained(&mut self, constraint: &ScalarConstraint<T>) -> ReaderResult<T> {
        let x = self.scalar()?;
        constraint.constrain(x)
    }

    /// Read one unconstrained real, map it through `constraint` and add the
    /// log-Jacobian to `lp`.
    pub fn scalar_constrained_lp(
        &mut self, constraint: &ScalarConstraint<T>, lp: &mut T,
    ) -> ReaderResult<T> {
        let x = self.scalar()?;
        constraint.constrain_lp(x, lp)
    }
}
