//! Validation failures raised by the domain predicates and the transforms.
//!
//! Every variant carries the `function` label of the caller (e.g.
//! `"param_reader::io::simplex"`) and the `name` of the value being checked,
//! so a failure can be traced back to the accessor that produced it without
//! any logging. Offending values are projected to `f64` for display.

/// Result alias for validation predicates and fallible transforms.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Domain-validity failure for a scalar, vector or matrix.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    // ---- Scalars ----
    /// Value is NaN or ±∞.
    NotFinite { function: &'static str, name: &'static str, value: f64 },

    /// Value is not strictly positive.
    NotPositive { function: &'static str, name: &'static str, value: f64 },

    /// Value is below an inclusive lower bound.
    BelowLowerBound { function: &'static str, name: &'static str, value: f64, lb: f64 },

    /// Value is above an inclusive upper bound.
    AboveUpperBound { function: &'static str, name: &'static str, value: f64, ub: f64 },

    /// Value lies outside the closed interval `[lb, ub]`.
    OutOfBounds { function: &'static str, name: &'static str, value: f64, lb: f64, ub: f64 },

    // ---- Shapes ----
    /// A structure that must be non-empty has size zero.
    ZeroSize { function: &'static str, name: &'static str },

    /// Free-parameter vector length does not match the requested shape.
    SizeMismatch { function: &'static str, name: &'static str, expected: usize, actual: usize },

    /// Matrix must be square.
    NotSquare { function: &'static str, name: &'static str, rows: usize, cols: usize },

    /// Matrix must have at least as many rows as columns.
    TooFewRows { function: &'static str, name: &'static str, rows: usize, cols: usize },

    // ---- Vectors ----
    /// Squared Euclidean norm differs from one beyond tolerance.
    NotUnitVector { function: &'static str, name: &'static str, squared_norm: f64 },

    /// Simplex entries do not sum to one.
    SimplexSumNotOne { function: &'static str, name: &'static str, sum: f64 },

    /// Simplex entry is negative (or NaN).
    SimplexNegativeEntry { function: &'static str, name: &'static str, index: usize, value: f64 },

    /// Entry is not strictly greater than its predecessor.
    NotOrdered {
        function: &'static str,
        name: &'static str,
        index: usize,
        previous: f64,
        value: f64,
    },

    /// First entry of a positive ordered vector is negative.
    NegativeFirstEntry { function: &'static str, name: &'static str, value: f64 },

    // ---- Matrices ----
    /// Entry above the diagonal is non-zero.
    NotLowerTriangular {
        function: &'static str,
        name: &'static str,
        row: usize,
        col: usize,
        value: f64,
    },

    /// Diagonal entry is not strictly positive.
    NonPositiveDiagonal { function: &'static str, name: &'static str, index: usize, value: f64 },

    /// Row of a Cholesky factor of a correlation matrix is not unit length.
    RowNotUnitLength { function: &'static str, name: &'static str, row: usize, squared_norm: f64 },

    /// `y[row, col]` and `y[col, row]` differ beyond tolerance.
    NotSymmetric {
        function: &'static str,
        name: &'static str,
        row: usize,
        col: usize,
        upper: f64,
        lower: f64,
    },

    /// Diagonal entry of a correlation matrix differs from one.
    DiagonalNotUnit { function: &'static str, name: &'static str, index: usize, value: f64 },

    /// Matrix contains NaN entries.
    MatrixHasNaN { function: &'static str, name: &'static str, row: usize, col: usize },

    /// Cholesky decomposition failed.
    NotPositiveDefinite { function: &'static str, name: &'static str },
}

impl std::error::Error for ValidationError {}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Scalars ----
            ValidationError::NotFinite { function, name, value } => {
                write!(f, "{function}: {name} is {value}, but must be finite")
            }
            ValidationError::NotPositive { function, name, value } => {
                write!(f, "{function}: {name} is {value}, but must be positive")
            }
            ValidationError::BelowLowerBound { function, name, value, lb } => {
                write!(f, "{function}: {name} is {value}, but must be greater than or equal to {lb}")
            }
            ValidationError::AboveUpperBound { function, name, value, ub } => {
                write!(f, "{function}: {name} is {value}, but must be less than or equal to {ub}")
            }
            ValidationError::OutOfBounds { function, name, value, lb, ub } => {
                write!(f, "{function}: {name} is {value}, but must be in the interval [{lb}, {ub}]")
            }

            // ---- Shapes ----
            ValidationError::ZeroSize { function, name } => {
                write!(f, "{function}: {name} has size 0, but must have a non-zero size")
            }
            ValidationError::SizeMismatch { function, name, expected, actual } => {
                write!(f, "{function}: {name} has size {actual}, but must have size {expected}")
            }
            ValidationError::NotSquare { function, name, rows, cols } => {
                write!(f, "{function}: {name} is {rows}x{cols}, but must be square")
            }
            ValidationError::TooFewRows { function, name, rows, cols } => {
                write!(
                    f,
                    "{function}: {name} has {rows} rows and {cols} columns; rows must be >= columns"
                )
            }

            // ---- Vectors ----
            ValidationError::NotUnitVector { function, name, squared_norm } => {
                write!(
                    f,
                    "{function}: {name} is not a valid unit vector; sum of squares is {squared_norm}, \
                     but should be 1"
                )
            }
            ValidationError::SimplexSumNotOne { function, name, sum } => {
                write!(
                    f,
                    "{function}: {name} is not a valid simplex; sum of entries is {sum}, but should be 1"
                )
            }
            ValidationError::SimplexNegativeEntry { function, name, index, value } => {
                write!(
                    f,
                    "{function}: {name} is not a valid simplex; entry {index} is {value}, \
                     but should be >= 0"
                )
            }
            ValidationError::NotOrdered { function, name, index, previous, value } => {
                write!(
                    f,
                    "{function}: {name} is not a valid ordered vector; entry {index} is {value}, \
                     but must be greater than the previous entry {previous}"
                )
            }
            ValidationError::NegativeFirstEntry { function, name, value } => {
                write!(
                    f,
                    "{function}: {name} is not a valid positive_ordered vector; first entry is \
                     {value}, but must be >= 0"
                )
            }

            // ---- Matrices ----
            ValidationError::NotLowerTriangular { function, name, row, col, value } => {
                write!(
                    f,
                    "{function}: {name} is not lower triangular; entry ({row}, {col}) is {value}"
                )
            }
            ValidationError::NonPositiveDiagonal { function, name, index, value } => {
                write!(
                    f,
                    "{function}: {name} diagonal entry {index} is {value}, but must be positive"
                )
            }
            ValidationError::RowNotUnitLength { function, name, row, squared_norm } => {
                write!(
                    f,
                    "{function}: {name} row {row} has squared norm {squared_norm}, but should be 1"
                )
            }
            ValidationError::NotSymmetric { function, name, row, col, upper, lower } => {
                write!(
                    f,
                    "{function}: {name} is not symmetric; entry ({row}, {col}) is {upper} but \
                     entry ({col}, {row}) is {lower}"
                )
            }
            ValidationError::DiagonalNotUnit { function, name, index, value } => {
                write!(
                    f,
                    "{function}: {name} is not a valid correlation matrix; diagonal entry {index} \
                     is {value}, but should be 1"
                )
            }
            ValidationError::MatrixHasNaN { function, name, row, col } => {
                write!(f, "{function}: {name} has NaN at entry ({row}, {col})")
            }
            ValidationError::NotPositiveDefinite { function, name } => {
                write!(f, "{function}: {name} is not positive definite")
            }
        }
    }
}

/// Convert a [`ValidationError`] into a Python `ValueError` with the error message.
#[cfg(feature = "python-bindings")]
impl From<ValidationError> for pyo3::PyErr {
    fn from(err: ValidationError) -> pyo3::PyErr {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // `Display` names the calling function, the value label and the
    // offending value.
    //
    // Given
    // -----
    // - A `BelowLowerBound` error from a scalar lower-bound read.
    //
    // Expect
    // ------
    // - The message contains all three pieces of context.
    fn display_includes_function_name_and_value() {
        // Arrange
        let err = ValidationError::BelowLowerBound {
            function: "param_reader::io::scalar_lb",
            name: "Constrained scalar",
            value: -1.5,
            lb: 0.0,
        };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains("param_reader::io::scalar_lb"));
        assert!(msg.contains("Constrained scalar"));
        assert!(msg.contains("-1.5"));
    }
}
