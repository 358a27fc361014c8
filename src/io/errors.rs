//! Errors for the parameter reader (exhaustion, shape, bounds, validation).
//!
//! This module defines [`ReaderError`], the single error type returned by
//! every [`Reader`](crate::io::Reader) accessor, and the [`ReaderResult`]
//! alias. Validation failures from the math layer are wrapped unchanged in
//! [`ReaderError::Validation`] so the predicate's own diagnostics survive.
//!
//! ## Conventions
//! - Cursor positions and counts are 0-based `usize` values.
//! - A returned error says nothing about cursor position: integer bound
//!   checks and plain-mode validation run after consumption, exhaustion and
//!   shape errors are raised before it. Callers abandon the whole read pass.
use crate::math::errors::ValidationError;

/// Result alias for reader operations that may produce [`ReaderError`].
pub type ReaderResult<T> = Result<T, ReaderError>;

/// Which of the two borrowed sequences a read was drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Buffer {
    /// The real-valued sequence, tracked by the scalar cursor.
    Scalar,
    /// The integer sequence, tracked by the integer cursor.
    Integer,
}

impl std::fmt::Display for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Buffer::Scalar => write!(f, "scalar"),
            Buffer::Integer => write!(f, "integer"),
        }
    }
}

/// Unified error type for reader accessors.
#[derive(Debug, Clone, PartialEq)]
pub enum ReaderError {
    // ---- Cursor ----
    /// Fewer unread elements remain than the read requires.
    BufferExhausted { buffer: Buffer, requested: usize, available: usize },

    // ---- Shape ----
    /// Requested dimensions are not valid for the family.
    InvalidShape { family: &'static str, reason: String },

    /// Dense layout of a consumed run failed.
    Layout { text: String },

    // ---- Bounds ----
    /// Lower bound exceeds upper bound.
    BoundInconsistent { family: &'static str, lb: f64, ub: f64 },

    /// Integer is below its inclusive lower bound.
    IntegerBelowLowerBound { value: i32, lb: i32 },

    /// Integer is above its inclusive upper bound.
    IntegerAboveUpperBound { value: i32, ub: i32 },

    // ---- Validation ----
    /// A plain-mode value failed its domain predicate, or a transform
    /// parameter was invalid.
    Validation(ValidationError),
}

impl ReaderError {
    /// `true` for errors raised before the scalar or integer cursor moved.
    pub fn is_pre_consumption(&self) -> bool {
        matches!(self, ReaderError::BufferExhausted { .. } | ReaderError::InvalidShape { .. })
    }
}

impl std::error::Error for ReaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReaderError::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for ReaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Cursor ----
            ReaderError::BufferExhausted { buffer, requested, available } => {
                write!(
                    f,
                    "{buffer} buffer exhausted: requested {requested} value(s), {available} remaining"
                )
            }

            // ---- Shape ----
            ReaderError::InvalidShape { family, reason } => {
                write!(f, "invalid shape for {family}: {reason}")
            }
            ReaderError::Layout { text } => {
                write!(f, "failed to lay out matrix: {text}")
            }

            // ---- Bounds ----
            ReaderError::BoundInconsistent { family, lb, ub } => {
                write!(
                    f,
                    "{family}: lower bound {lb} must be less than or equal to upper bound {ub}"
                )
            }
            ReaderError::IntegerBelowLowerBound { value, lb } => {
                write!(f, "integer {value} is below the lower bound {lb}")
            }
            ReaderError::IntegerAboveUpperBound { value, ub } => {
                write!(f, "integer {value} is above the upper bound {ub}")
            }

            // ---- Validation ----
            ReaderError::Validation(err) => write!(f, "{err}"),
        }
    }
}

impl From<ValidationError> for ReaderError {
    fn from(err: ValidationError) -> ReaderError {
        ReaderError::Validation(err)
    }
}

impl From<ndarray::ShapeError> for ReaderError {
    fn from(err: ndarray::ShapeError) -> ReaderError {
        ReaderError::Layout { text: err.to_string() }
    }
}

/// Convert a [`ReaderError`] into a Python `ValueError` with the error message.
#[cfg(feature = "python-bindings")]
impl From<ReaderError> for pyo3::PyErr {
    fn from(err: ReaderError) -> pyo3::PyErr {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - `Display` output of the cursor and bound variants.
    // - Wrapping of `ValidationError` and `ndarray::ShapeError` via `From`.
    //
    // They intentionally DO NOT cover:
    // - When each variant is raised; see the accessor modules.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Exhaustion messages name the buffer and both counts.
    //
    // Given
    // -----
    // - `BufferExhausted { Integer, requested: 1, available: 0 }`.
    //
    // Expect
    // ------
    // - A message starting with "integer buffer exhausted" that names both
    //   counts.
    fn buffer_exhausted_display_names_buffer_and_counts() {
        // Arrange
        let err = ReaderError::BufferExhausted {
            buffer: Buffer::Integer,
            requested: 1,
            available: 0,
        };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.starts_with("integer buffer exhausted"));
        assert!(msg.contains("requested 1"));
        assert!(msg.contains("0 remaining"));
    }

    #[test]
    // Purpose
    // -------
    // Validation failures are wrapped unchanged and exposed as the source.
    //
    // Given
    // -----
    // - A `NotPositive` validation error converted with `into()`.
    //
    // Expect
    // ------
    // - Same message, the inner error as `source()`, and equality with
    //   `ReaderError::Validation(inner)`.
    fn validation_error_is_wrapped_unchanged() {
        // Arrange
        let inner = ValidationError::NotPositive {
            function: "param_reader::io::scalar_pos",
            name: "Constrained scalar",
            value: -2.0,
        };

        // Act
        let err: ReaderError = inner.clone().into();

        // Assert
        assert_eq!(err.to_string(), inner.to_string());
        assert!(err.source().is_some());
        assert_eq!(err, ReaderError::Validation(inner));
    }

    #[test]
    // Purpose
    // -------
    // `ndarray` layout failures map to `Layout`.
    //
    // Given
    // -----
    // - An `ndarray::ShapeError` from laying out 2 values as length 3.
    //
    // Expect
    // ------
    // - `ReaderError::Layout`.
    fn shape_error_maps_to_layout() {
        // Arrange
        let shape_err = ndarray::Array1::from_shape_vec(3, vec![1.0_f64, 2.0]).unwrap_err();

        // Act
        let err: ReaderError = shape_err.into();

        // Assert
        assert!(matches!(err, ReaderError::Layout { .. }));
    }
}
