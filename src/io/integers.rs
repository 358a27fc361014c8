//! Bounded integer reads.
//!
//! Integers have no transform, so every family only checks bounds. The
//! integer is always consumed before any check; for `integer_lub` bound
//! consistency is checked first, then the lower bound, then the upper bound.
use crate::{
    io::{
        errors::{ReaderError, ReaderResult},
        reader::Reader,
    },
    math::real::Real,
};

fn check_lb(value: i32, lb: i32) -> ReaderResult<i32> {
    if value < lb {
        return Err(ReaderError::IntegerBelowLowerBound { value, lb });
    }
    Ok(value)
}

fn check_ub(value: i32, ub: i32) -> ReaderResult<i32> {
    if value > ub {
        return Err(ReaderError::IntegerAboveUpperBound { value, ub });
    }
    Ok(value)
}

impl<'a, T: Real> Reader<'a, T> {
    /// Next integer, checked to be `>= lb`.
    pub fn integer_lb(&mut self, lb: i32) -> ReaderResult<i32> {
        let value = self.integer()?;
        check_lb(value, lb)
    }

    /// Next integer, checked to be `<= ub`.
    pub fn integer_ub(&mut self, ub: i32) -> ReaderResult<i32> {
        let value = self.integer()?;
        check_ub(value, ub)
    }

    /// Next integer, checked to lie in `[lb, ub]`.
    ///
    /// # Errors
    /// - `BoundInconsistent` when `lb > ub`.
    /// - `IntegerBelowLowerBound` / `IntegerAboveUpperBound` on a range
    ///   violation.
    ///
    /// The integer cursor advances in every case except exhaustion.
    pub fn integer_lub(&mut self, lb: i32, ub: i32) -> ReaderResult<i32> {
        let value = self.integer()?;
        if lb > ub {
            return Err(ReaderError::BoundInconsistent {
                family: "param_reader::io::integer_lub",
                lb: f64::from(lb),
                ub: f64::from(ub),
            });
        }
        check_ub(check_lb(value, lb)?, ub)
    }

    // ---- Constrain aliases ----

    /// Same as [`Reader::integer_lb`].
    pub fn integer_lb_constrain(&mut self, lb: i32) -> ReaderResult<i32> {
        self.integer_lb(lb)
    }

    /// Same as [`Reader::integer_lb`]; `lp` is left untouched.
    pub fn integer_lb_constrain_lp(&mut self, lb: i32, _lp: &mut T) -> ReaderResult<i32> {
        self.integer_lb(lb)
    }

    /// Same as [`Reader::integer_ub`].
    pub fn integer_ub_constrain(&mut self, ub: i32) -> ReaderResult<i32> {
        self.integer_ub(ub)
    }

    /// Same as [`Reader::integer_ub`]; `lp` is left untouched.
    pub fn integer_ub_constrain_lp(&mut self, ub: i32, _lp: &mut T) -> ReaderResult<i32> {
        self.integer_ub(ub)
    }

    /// Same as [`Reader::integer_lub`].
    pub fn integer_lub_constrain(&mut self, lb: i32, ub: i32) -> ReaderResult<i32> {
        self.integer_lub(lb, ub)
    }

    /// Same as [`Reader::integer_lub`]; `lp` is left untouched.
    pub fn integer_lub_constrain_lp(&mut self, lb: i32, ub: i32, _lp: &mut T) -> ReaderResult<i32> {
        self.integer_lub(lb, ub)
    }
}
