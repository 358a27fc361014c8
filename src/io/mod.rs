//! io — sequential reader over a flat unconstrained parameter stream.
//!
//! Purpose
//! -------
//! Rebuild the structured, constrained variables a model declares from the
//! flat real and integer sequences a sampler works with, optionally adding
//! the log-absolute-Jacobian of each transform to a caller-owned
//! log-probability accumulator.
//!
//! Key behaviors
//! -------------
//! - [`reader`]: the [`Reader`] type with its two cursors and the dense shape
//!   primitives (`integer`, `scalar`, `std_vector`, `vector`, `row_vector`,
//!   column-major `matrix`).
//! - [`constraint`]: [`ScalarConstraint`], the per-element constraint kind,
//!   with `scalar_checked` / `scalar_constrained` / `scalar_constrained_lp`.
//! - [`scalars`] and [`integers`]: named scalar families and bounded integers.
//! - [`batch`]: element-wise constrained vectors, row vectors and matrices.
//! - [`structured`]: unit vectors, simplexes, ordered vectors, Cholesky
//!   factors, covariance and correlation matrices, plus [`free_size`].
//! - [`sparse`]: sparse matrices from explicit non-zero coordinates.
//!
//! Invariants & assumptions
//! ------------------------
//! - Both cursors only move forward. How far a read moves them depends on
//!   the requested shape alone, never on the values read.
//! - Bulk reads check availability before advancing; `BufferExhausted` and
//!   `InvalidShape` leave both cursors unchanged.
//! - Integer bound checks and plain-mode validation run after consumption;
//!   after such an error the read pass should be abandoned.
//! - Calls without an accumulator never evaluate a Jacobian.
//!
//! Conventions
//! -----------
//! - Each constrained family exposes a plain form (`x`), a constrain form
//!   (`x_constrain`) and a Jacobian form (`x_constrain_lp(…, lp)`).
//! - The reader performs no I/O and no logging; every failure is returned
//!   as a [`ReaderError`].

pub mod batch;
pub mod constraint;
pub mod errors;
pub mod integers;
pub mod reader;
pub mod scalars;
pub mod sparse;
pub mod structured;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::constraint::ScalarConstraint;
pub use self::errors::{Buffer, ReaderError, ReaderResult};
pub use self::reader::Reader;
pub use self::structured::free_size;

pub mod prelude {
    pub use super::constraint::ScalarConstraint;
    pub use super::errors::{Buffer, ReaderError, ReaderResult};
    pub use super::reader::Reader;
    pub use super::structured::free_size;
}
