//! Reader — two monotone cursors over a real and an integer sequence.
//!
//! Purpose
//! -------
//! Own the read positions into the flat unconstrained parameter stream and
//! assemble raw values into scalars, vectors, row vectors and column-major
//! matrices. Constrained families are layered on top of these primitives in
//! the sibling modules (`scalars`, `batch`, `structured`, `sparse`).
//!
//! Key behaviors
//! -------------
//! - [`Reader::integer`] and [`Reader::scalar`] return the next element and
//!   advance their cursor by one.
//! - Bulk reads ([`Reader::std_vector`], [`Reader::vector`],
//!   [`Reader::row_vector`], [`Reader::matrix`]) check availability for the
//!   whole run before advancing, so a failed read leaves the cursor where it
//!   was.
//! - [`Reader::matrix`] lays the run out column-major: element `(i, j)` is
//!   the `(j * n + i)`-th consumed scalar.
//!
//! Invariants & assumptions
//! ------------------------
//! - `pos <= data_r.len()` and `int_pos <= data_i.len()` at all times; both
//!   cursors only move forward and only through the accessors.
//! - The borrowed sequences are never resized or mutated.
//! - A reader is single-owner; accessors take `&mut self`.
//!
//! Conventions
//! -----------
//! - Integers are `i32`; reals are any [`Real`].
//! - Row vectors are `Array2<T>` of shape `(1, m)`.
use crate::{
    io::errors::{Buffer, ReaderError, ReaderResult},
    math::real::Real,
};
use ndarray::{Array1, Array2, ArrayView2, ShapeBuilder};
use std::borrow::Cow;

/// Sequential reader over a real and an integer sequence.
///
/// Fields
/// ------
/// - `data_r`: real-valued input, borrowed (or owned for [`Reader::from_owned`]).
/// - `data_i`: integer input.
/// - `pos`: index of the next unread real.
/// - `int_pos`: index of the next unread integer.
#[derive(Debug, Clone)]
pub struct Reader<'a, T: Real> {
    data_r: Cow<'a, [T]>,
    data_i: Cow<'a, [i32]>,
    pos: usize,
    int_pos: usize,
}

impl<'a, T: Real> Reader<'a, T> {
    /// Borrow `data_r` and `data_i` for the reader's lifetime, with both
    /// cursors at zero.
    pub fn new(data_r: &'a [T], data_i: &'a [i32]) -> Self {
        Reader { data_r: Cow::Borrowed(data_r), data_i: Cow::Borrowed(data_i), pos: 0, int_pos: 0 }
    }

    /// Number of unread reals.
    pub fn available(&self) -> usize {
        self.data_r.len() - self.pos
    }

    /// Number of unread integers.
    pub fn available_i(&self) -> usize {
        self.data_i.len() - self.int_pos
    }

    /// Index of the next unread real.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Index of the next unread integer.
    pub fn int_position(&self) -> usize {
        self.int_pos
    }

    // ---- Cursor primitives ----

    /// Fail with `BufferExhausted` unless `n` reals remain.
    pub(crate) fn ensure_available(&self, n: usize) -> ReaderResult<()> {
        let available = self.available();
        if n > available {
            return Err(ReaderError::BufferExhausted { buffer: Buffer::Scalar, requested: n, available });
        }
        Ok(())
    }

    /// Next `n` reals; the cursor advances only on success.
    pub(crate) fn take(&mut self, n: usize) -> ReaderResult<&[T]> {
        self.ensure_available(n)?;
        let start = self.pos;
        self.pos += n;
        Ok(&self.data_r[start..start + n])
    }

    // ---- Integers ----

    /// Next integer.
    ///
    /// # Errors
    /// - `BufferExhausted` if the integer cursor is at the end.
    pub fn integer(&mut self) -> ReaderResult<i32> {
        let available = self.available_i();
        if available == 0 {
            return Err(ReaderError::BufferExhausted {
                buffer: Buffer::Integer,
                requested: 1,
                available,
            });
        }
        let value = self.data_i[self.int_pos];
        self.int_pos += 1;
        Ok(value)
    }

    /// Same as [`Reader::integer`]; integers have no transform.
    pub fn integer_constrain(&mut self) -> ReaderResult<i32> {
        self.integer()
    }

    /// Same as [`Reader::integer`]; `lp` is left untouched.
    pub fn integer_constrain_lp(&mut self, _lp: &mut T) -> ReaderResult<i32> {
        self.integer()
    }

    // ---- Scalars ----

    /// Next real.
    ///
    /// # Errors
    /// - `BufferExhausted` if the scalar cursor is at the end.
    pub fn scalar(&mut self) -> ReaderResult<T> {
        Ok(self.take(1)?[0])
    }

    /// Same as [`Reader::scalar`].
    pub fn scalar_constrain(&mut self) -> ReaderResult<T> {
        self.scalar()
    }

    /// Same as [`Reader::scalar`]; `lp` is left untouched.
    pub fn scalar_constrain_lp(&mut self, _lp: &mut T) -> ReaderResult<T> {
        self.scalar()
    }

    // ---- Dense shapes ----

    /// Copy the next `m` reals, in order.
    pub fn std_vector(&mut self, m: usize) -> ReaderResult<Vec<T>> {
        Ok(self.take(m)?.to_vec())
    }

    /// Next `m` reals as a column vector.
    pub fn vector(&mut self, m: usize) -> ReaderResult<Array1<T>> {
        Ok(Array1::from(self.std_vector(m)?))
    }

    /// Same as [`Reader::vector`].
    pub fn vector_constrain(&mut self, m: usize) -> ReaderResult<Array1<T>> {
        self.vector(m)
    }

    /// Same as [`Reader::vector`]; `lp` is left untouched.
    pub fn vector_constrain_lp(&mut self, m: usize, _lp: &mut T) -> ReaderResult<Array1<T>> {
        self.vector(m)
    }

    /// Next `m` reals as a `(1, m)` row vector.
    pub fn row_vector(&mut self, m: usize) -> ReaderResult<Array2<T>> {
        Ok(Array2::from_shape_vec((1, m), self.std_vector(m)?)?)
    }

    /// Same as [`Reader::row_vector`].
    pub fn row_vector_constrain(&mut self, m: usize) -> ReaderResult<Array2<T>> {
        self.row_vector(m)
    }

    /// Same as [`Reader::row_vector`]; `lp` is left untouched.
    pub fn row_vector_constrain_lp(&mut self, m: usize, _lp: &mut T) -> ReaderResult<Array2<T>> {
        self.row_vector(m)
    }

    /// Next `n * m` reals as an `n×m` matrix in column-major order.
    ///
    /// # Errors
    /// - `InvalidShape` if `n * m` overflows.
    /// - `BufferExhausted` if fewer than `n * m` reals remain.
    pub fn matrix(&mut self, n: usize, m: usize) -> ReaderResult<Array2<T>> {
        let size = checked_size("matrix", n, m)?;
        let run = self.take(size)?;
        Ok(ArrayView2::from_shape((n, m).f(), run)?.to_owned())
    }

    /// Same as [`Reader::matrix`].
    pub fn matrix_constrain(&mut self, n: usize, m: usize) -> ReaderResult<Array2<T>> {
        self.matrix(n, m)
    }

    /// Same as [`Reader::matrix`]; `lp` is left untouched.
    pub fn matrix_constrain_lp(&mut self, n: usize, m: usize, _lp: &mut T) -> ReaderResult<Array2<T>> {
        self.matrix(n, m)
    }
}

impl<T: Real> Reader<'static, T> {
    /// Build a reader that owns its buffers.
    pub fn from_owned(data_r: Vec<T>, data_i: Vec<i32>) -> Self {
        Reader { data_r: Cow::Owned(data_r), data_i: Cow::Owned(data_i), pos: 0, int_pos: 0 }
    }
}

/// `n * m`, or `InvalidShape` on overflow.
pub(crate) fn checked_size(family: &'static str, n: usize, m: usize) -> ReaderResult<usize> {
    n.checked_mul(m).ok_or_else(|| ReaderError::InvalidShape {
        family,
        reason: format!("{n} x {m} elements overflow usize"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Cursor bookkeeping for integer, scalar and bulk reads.
    // - Column-major matrix layout and row-vector shape.
    // - Exhaustion checks leaving the cursor unchanged.
    //
    // They intentionally DO NOT cover:
    // - Constrained families; see the sibling modules.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Integers are returned in order and a read past the end fails.
    //
    // Given
    // -----
    // - integers = [3, 5].
    //
    // Expect
    // ------
    // - 3 then 5, then `BufferExhausted` with the cursor left at 2.
    fn integers_are_read_in_order_then_exhaust() {
        // Arrange
        let reals: [f64; 0] = [];
        let ints = [3, 5];
        let mut reader = Reader::new(&reals, &ints);

        // Act / Assert
        assert_eq!(reader.integer().unwrap(), 3);
        assert_eq!(reader.int_position(), 1);
        assert_eq!(reader.integer().unwrap(), 5);
        assert_eq!(reader.available_i(), 0);
        assert_eq!(
            reader.integer(),
            Err(ReaderError::BufferExhausted { buffer: Buffer::Integer, requested: 1, available: 0 })
        );
        assert_eq!(reader.int_position(), 2);
    }

    #[test]
    // Purpose
    // -------
    // `matrix(n, m)` arranges the consumed run column-major.
    //
    // Given
    // -----
    // - reals = [1, 2, 3, 4, 5, 6], request `matrix(2, 3)`.
    //
    // Expect
    // ------
    // - [[1, 3, 5], [2, 4, 6]] and cursor at 6.
    fn matrix_is_column_major() {
        // Arrange
        let reals = [1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0];
        let mut reader = Reader::new(&reals, &[]);

        // Act
        let x = reader.matrix(2, 3).unwrap();

        // Assert
        assert_eq!(x, array![[1.0, 3.0, 5.0], [2.0, 4.0, 6.0]]);
        assert_eq!(reader.position(), 6);
        assert_eq!(reader.available(), 0);
    }

    #[test]
    // Purpose
    // -------
    // A bulk read larger than the remainder fails without moving the cursor.
    //
    // Given
    // -----
    // - reals = [1, 2, 3] with one scalar already read.
    //
    // Expect
    // ------
    // - `vector(3)` fails with `BufferExhausted { requested: 3, available: 2 }`
    //   and `matrix(2, 2)` fails; the cursor stays at 1 throughout.
    fn bulk_read_past_end_leaves_cursor_unchanged() {
        // Arrange
        let reals = [1.0_f64, 2.0, 3.0];
        let mut reader = Reader::new(&reals, &[]);
        reader.scalar().unwrap();

        // Act
        let err = reader.vector(3).unwrap_err();
        let after_vector = reader.position();
        let matrix = reader.matrix(2, 2);

        // Assert
        assert_eq!(
            err,
            ReaderError::BufferExhausted { buffer: Buffer::Scalar, requested: 3, available: 2 }
        );
        assert_eq!(after_vector, 1);
        assert!(matrix.is_err());
        assert_eq!(reader.position(), 1);
    }

    #[test]
    // Purpose
    // -------
    // Zero-length reads are no-ops on the cursor, even on an empty buffer.
    //
    // Given
    // -----
    // - An empty reader and zero-length requests of every dense shape.
    //
    // Expect
    // ------
    // - Empty results of the requested shapes; the cursor stays at 0.
    fn zero_length_reads_do_not_move_cursor() {
        // Arrange
        let mut reader = Reader::<f64>::new(&[], &[]);

        // Act
        let std_vector = reader.std_vector(0).unwrap();
        let vector = reader.vector(0).unwrap();
        let row_vector = reader.row_vector(0).unwrap();
        let matrix = reader.matrix(0, 4).unwrap();

        // Assert
        assert!(std_vector.is_empty());
        assert_eq!(vector.len(), 0);
        assert_eq!(row_vector.dim(), (1, 0));
        assert_eq!(matrix.dim(), (0, 4));
        assert_eq!(reader.position(), 0);
    }

    #[test]
    // Purpose
    // -------
    // Pass-through constrain forms return the plain value and leave `lp`
    // alone; owned readers behave like borrowing ones.
    //
    // Given
    // -----
    // - An owned reader over reals [0.5, 1.5, 2.5] and integers [7]; `lp = -1`.
    //
    // Expect
    // ------
    // - 7, 0.5 and [[1.5, 2.5]] from the `_lp` forms; `lp` still -1.
    fn pass_through_forms_leave_lp_untouched() {
        // Arrange
        let mut reader = Reader::from_owned(vec![0.5_f64, 1.5, 2.5], vec![7]);
        let mut lp = -1.0;

        // Act
        let int = reader.integer_constrain_lp(&mut lp).unwrap();
        let scalar = reader.scalar_constrain_lp(&mut lp).unwrap();
        let row = reader.row_vector_constrain_lp(2, &mut lp).unwrap();

        // Assert
        assert_eq!(int, 7);
        assert_eq!(scalar, 0.5);
        assert_eq!(row, array![[1.5, 2.5]]);
        assert_eq!(lp, -1.0);
    }

    #[test]
    // Purpose
    // -------
    // Overflowing shapes are rejected as `InvalidShape`.
    //
    // Given
    // -----
    // - An empty reader and `matrix(usize::MAX, 2)`.
    //
    // Expect
    // ------
    // - `InvalidShape` labelled `matrix`, not a panic or an exhaustion error.
    fn overflowing_shape_is_invalid() {
        // Arrange
        let mut reader = Reader::<f64>::new(&[], &[]);

        // Act
        let result = reader.matrix(usize::MAX, 2);

        // Assert
        assert!(matches!(result, Err(ReaderError::InvalidShape { family: "matrix", .. })));
    }
}
