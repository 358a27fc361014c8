//! Scalar capability trait shared by the reader and the math layer.
//!
//! [`Real`] is the minimal set of operations the reader needs from its
//! element type: construction from a double, total arithmetic, comparisons
//! and the elementary functions used by the transforms. It is blanket
//! implemented, so `f32`, `f64` and any `num_traits::Float` type that can be
//! built from an `f64` qualify without extra code.
use num_traits::{Float, FromPrimitive, ToPrimitive};
use std::fmt::{Debug, Display};

/// Element type of the scalar buffer and of every constrained output.
pub trait Real: Float + FromPrimitive + Debug + Display + 'static {
    /// Construct `Self` from a double. Values not representable in `Self`
    /// become NaN, which every validity predicate rejects.
    #[inline]
    fn lit(x: f64) -> Self {
        <Self as FromPrimitive>::from_f64(x).unwrap_or_else(Self::nan)
    }

    /// Project to `f64` for diagnostics carried in error values.
    #[inline]
    fn as_f64(self) -> f64 {
        ToPrimitive::to_f64(&self).unwrap_or(f64::NAN)
    }
}

impl<T> Real for T where T: Float + FromPrimitive + Debug + Display + 'static {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // `lit` and `as_f64` round-trip ordinary doubles for both float widths.
    //
    // Given
    // -----
    // - 0.25 as `f64` and -2.5 as `f32`, both exactly representable.
    //
    // Expect
    // ------
    // - `as_f64` returns the original double for both widths.
    fn lit_and_as_f64_round_trip_for_f32_and_f64() {
        // Arrange
        let wide = <f64 as Real>::lit(0.25);
        let narrow = <f32 as Real>::lit(-2.5);

        // Act / Assert
        assert_eq!(wide.as_f64(), 0.25);
        assert_eq!(narrow.as_f64(), -2.5);
    }
}
