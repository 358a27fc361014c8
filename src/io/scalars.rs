//! Named scalar families: bounded, affine, positive, probability and
//! correlation reads.
//!
//! Every family reads exactly one real. Plain forms validate the value as
//! read; `_constrain` forms map it from ℝ; `_constrain_lp` forms also add the
//! log-Jacobian to the caller's accumulator. All checks run after the value
//! is consumed.
use crate::{
    io::{constraint::ScalarConstraint, errors::ReaderResult, reader::Reader},
    math::real::Real,
};

impl<'a, T: Real> Reader<'a, T> {
    // ---- Lower bound ----

    /// Next real, checked to be `>= lb`.
    pub fn scalar_lb(&mut self, lb: T) -> ReaderResult<T> {
        self.scalar_checked(&ScalarConstraint::Lower(lb))
    }

    /// Next real mapped to `[lb, ∞)`.
    pub fn scalar_lb_constrain(&mut self, lb: T) -> ReaderResult<T> {
        self.scalar_constrained(&ScalarConstraint::Lower(lb))
    }

    /// Next real mapped to `[lb, ∞)`, with Jacobian.
    pub fn scalar_lb_constrain_lp(&mut self, lb: T, lp: &mut T) -> ReaderResult<T> {
        self.scalar_constrained_lp(&ScalarConstraint::Lower(lb), lp)
    }

    // ---- Upper bound ----

    /// Next real, checked to be `<= ub`.
    pub fn scalar_ub(&mut self, ub: T) -> ReaderResult<T> {
        self.scalar_checked(&ScalarConstraint::Upper(ub))
    }

    /// Next real mapped to `(-∞, ub]`.
    pub fn scalar_ub_constrain(&mut self, ub: T) -> ReaderResult<T> {
        self.scalar_constrained(&ScalarConstraint::Upper(ub))
    }

    /// Next real mapped to `(-∞, ub]`, with Jacobian.
    pub fn scalar_ub_constrain_lp(&mut self, ub: T, lp: &mut T) -> ReaderResult<T> {
        self.scalar_constrained_lp(&ScalarConstraint::Upper(ub), lp)
    }

    // ---- Lower and upper bound ----

    /// Next real, checked to lie in `[lb, ub]`.
    ///
    /// # Errors
    /// - `BoundInconsistent` when `lb > ub`, after the value is consumed.
    pub fn scalar_lub(&mut self, lb: T, ub: T) -> ReaderResult<T> {
        self.scalar_checked(&ScalarConstraint::LowerUpper(lb, ub))
    }

    /// Next real mapped to `[lb, ub]`.
    pub fn scalar_lub_constrain(&mut self, lb: T, ub: T) -> ReaderResult<T> {
        self.scalar_constrained(&ScalarConstraint::LowerUpper(lb, ub))
    }

    /// Next real mapped to `[lb, ub]`, with Jacobian.
    pub fn scalar_lub_constrain_lp(&mut self, lb: T, ub: T, lp: &mut T) -> ReaderResult<T> {
        self.scalar_constrained_lp(&ScalarConstraint::LowerUpper(lb, ub), lp)
    }

    // ---- Offset / multiplier ----

    /// Next real, unchecked.
    pub fn scalar_offset_multiplier(&mut self, offset: T, multiplier: T) -> ReaderResult<T> {
        self.scalar_checked(&ScalarConstraint::OffsetMultiplier(offset, multiplier))
    }

    /// `offset + multiplier · x` for the next real `x`.
    pub fn scalar_offset_multiplier_constrain(
        &mut self, offset: T, multiplier: T,
    ) -> ReaderResult<T> {
        self.scalar_constrained(&ScalarConstraint::OffsetMultiplier(offset, multiplier))
    }

    /// `offset + multiplier · x`, adding `ln(multiplier)` to `lp`.
    pub fn scalar_offset_multiplier_constrain_lp(
        &mut self, offset: T, multiplier: T, lp: &mut T,
    ) -> ReaderResult<T> {
        self.scalar_constrained_lp(&ScalarConstraint::OffsetMultiplier(offset, multiplier), lp)
    }

    // ---- Positive ----

    /// Next real, checked to be strictly positive.
    pub fn scalar_pos(&mut self) -> ReaderResult<T> {
        self.scalar_checked(&ScalarConstraint::Positive)
    }

    /// Next real mapped to `(0, ∞)` by `exp`.
    pub fn scalar_pos_constrain(&mut self) -> ReaderResult<T> {
        self.scalar_constrained(&ScalarConstraint::Positive)
    }

    /// Next real mapped to `(0, ∞)` by `exp`, adding the log-Jacobian to `lp`.
    pub fn scalar_pos_constrain_lp(&mut self, lp: &mut T) -> ReaderResult<T> {
        self.scalar_constrained_lp(&ScalarConstraint::Positive, lp)
    }

    // ---- Probability ----

    /// Next real, checked to lie in `[0, 1]`.
    pub fn prob(&mut self) -> ReaderResult<T> {
        self.scalar_checked(&ScalarConstraint::Probability)
    }

    /// Next real mapped to `(0, 1)` by the inverse logit.
    pub fn prob_constrain(&mut self) -> ReaderResult<T> {
        self.scalar_constrained(&ScalarConstraint::Probability)
    }

    /// Next real mapped to `(0, 1)` by the inverse logit, adding the log-Jacobian to
    /// `lp`.
    pub fn prob_constrain_lp(&mut self, lp: &mut T) -> ReaderResult<T> {
        self.scalar_constrained_lp(&ScalarConstraint::Probability, lp)
    }

    // ---- Correlation ----

    /// Next real, checked to lie in `[-1, 1]`.
    pub fn corr(&mut self) -> ReaderResult<T> {
        self.scalar_checked(&ScalarConstraint::Correlation)
    }

    /// Next real mapped to `(-1, 1)` by `tanh`.
    pub fn corr_constrain(&mut self) -> ReaderResult<T> {
        self.scalar_constrained(&ScalarConstraint::Correlation)
    }

    /// Next real mapped to `(-1, 1)` by `tanh`, adding the log-Jacobian to `lp`.
    pub fn corr_constrain_lp(&mut self, lp: &mut T) -> ReaderResult<T> {
        self.scalar_constrained_lp(&ScalarConstraint::Correlation, lp)
    }
}

#[cfg(test)]
mod tests {
    use crate::io::{errors::ReaderError, reader::Reader};
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - One-real consumption for every scalar family, including on failure.
    // - Jacobian accumulation only in the `_lp` forms.
    //
    // They intentionally DO NOT cover:
    // - Per-kind validation tables; see `io::constraint`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // A failed plain check still consumes exactly one real.
    //
    // Given
    // -----
    // - reals = [-1.0, 0.25], reading `scalar_pos` then `prob`.
    //
    // Expect
    // ------
    // - `scalar_pos` fails with a validation error and the cursor is at 1;
    //   `prob` then returns 0.25.
    fn failed_check_consumes_one_real() {
        // Arrange
        let reals = [-1.0_f64, 0.25];
        let mut reader = Reader::new(&reals, &[]);

        // Act
        let first = reader.scalar_pos();
        let second = reader.prob();

        // Assert
        assert!(matches!(first, Err(ReaderError::Validation(_))));
        assert_eq!(second, Ok(0.25));
        assert_eq!(reader.position(), 2);
    }

    #[test]
    // Purpose
    // -------
    // Constrain forms consume one real each and only `_lp` forms move `lp`.
    //
    // Given
    // -----
    // - reals = [0, 0, 0, 1] read through `scalar_lub_constrain(0, 4)`, its
    //   `_lp` form, `scalar_offset_multiplier_constrain_lp(1, 2)` and
    //   `scalar_pos_constrain_lp`.
    //
    // Expect
    // ------
    // - Values 2, 2, 1 and e; `lp = 0 + ln 2 + 1`; buffer fully consumed.
    fn jacobian_accumulates_only_in_lp_forms() {
        // Arrange
        let reals = [0.0_f64, 0.0, 0.0, 1.0];
        let mut reader = Reader::new(&reals, &[]);
        let mut lp = 0.0;

        // Act
        let a = reader.scalar_lub_constrain(0.0, 4.0).unwrap();
        let b = reader.scalar_lub_constrain_lp(0.0, 4.0, &mut lp).unwrap();
        let c = reader.scalar_offset_multiplier_constrain_lp(1.0, 2.0, &mut lp).unwrap();
        let d = reader.scalar_pos_constrain_lp(&mut lp).unwrap();

        // Assert
        assert_relative_eq!(a, 2.0);
        assert_relative_eq!(b, 2.0);
        assert_relative_eq!(c, 1.0);
        assert_relative_eq!(d, 1.0_f64.exp());
        // ln(4) + ln(1/4) from the lub read, ln 2 from the affine read, 1 from exp.
        assert_relative_eq!(lp, 2.0_f64.ln() + 1.0, epsilon = 1e-12);
        assert_eq!(reader.available(), 0);
    }

    #[test]
    // Purpose
    // -------
    // Inconsistent bounds are reported after the value is consumed.
    //
    // Given
    // -----
    // - reals = [0.5], `scalar_lub(2, 1)`.
    //
    // Expect
    // ------
    // - `BoundInconsistent` with the cursor at 1.
    fn lub_with_inconsistent_bounds_consumes_then_fails() {
        // Arrange
        let reals = [0.5_f64];
        let mut reader = Reader::new(&reals, &[]);

        // Act
        let err = reader.scalar_lub(2.0, 1.0).unwrap_err();

        // Assert
        assert!(matches!(err, ReaderError::BoundInconsistent { .. }));
        assert_eq!(reader.position(), 1);
    }
}
