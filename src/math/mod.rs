//! math — scalar type, validation predicates and constraining transforms.
//!
//! Purpose
//! -------
//! Provide the numerical layer underneath the parameter reader: a generic
//! real-number bound ([`Real`]), the domain-validity predicates used by the
//! reader's plain accessors, and the unconstrained-to-constrained transforms
//! (with and without Jacobian bookkeeping) used by its constrain accessors.
//!
//! Key behaviors
//! -------------
//! - [`validation`] decides whether a value already lies in its constrained
//!   space and reports a structured [`ValidationError`] otherwise.
//! - [`scalar_transforms`], [`vector_transforms`] and [`matrix_transforms`]
//!   map free values into positive, bounded, affine, probability,
//!   correlation, unit-vector, simplex, ordered, Cholesky-factor, covariance
//!   and correlation spaces.
//! - Every transform has a pure form and an `_lp` form that adds the
//!   log-absolute-Jacobian determinant to a caller-owned accumulator.
//!
//! Invariants & assumptions
//! ------------------------
//! - Transforms are deterministic and side-effect free apart from the
//!   accumulator passed to the `_lp` forms.
//! - For finite input every transform returns a member of its target space
//!   (up to floating-point rounding within [`CONSTRAINT_TOLERANCE`]).
//!
//! Conventions
//! -----------
//! - Vectors are `ndarray::Array1<T>`, matrices `ndarray::Array2<T>`.
//! - This layer performs no I/O and no logging.

pub mod errors;
pub mod matrix_transforms;
pub mod real;
pub mod scalar_transforms;
pub mod validation;
pub mod vector_transforms;

pub use self::errors::{ValidationError, ValidationResult};
pub use self::real::Real;
pub use self::validation::CONSTRAINT_TOLERANCE;

pub mod prelude {
    pub use super::errors::{ValidationError, ValidationResult};
    pub use super::real::Real;
    pub use super::scalar_transforms::{inv_logit, log1p_exp};
    pub use super::validation::CONSTRAINT_TOLERANCE;
}
