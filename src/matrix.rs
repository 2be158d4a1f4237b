//! Matrices over an arbitrary field, with Gauss-Jordan elimination
//!
//! A [`Matrix`] borrows the [`Field`] it computes with and owns its cells.
//! Cells start out unset; row operations and reductions require every cell
//! they touch to be populated and fail with [`MatrixError::Unset`] otherwise.
//!
//! All arithmetic goes through the field, so the same reduction code serves
//! Z_p, GF(2^n), or any other [`Field`] implementation.

use crate::field::{Field, FieldError};
use log::trace;
use std::fmt;
use thiserror::Error;

/// Errors that can occur during matrix operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MatrixError {
    #[error("Invalid number of rows or columns: {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("Row {row} has {actual} columns, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Index ({row}, {col}) out of bounds for {rows}x{cols} matrix")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Row index {row} out of bounds for {rows} rows")]
    RowOutOfBounds { row: usize, rows: usize },

    #[error("Cell ({row}, {col}) has no value")]
    Unset { row: usize, col: usize },

    #[error("Matrix dimensions are not square: {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    #[error("Matrix is not invertible")]
    NotInvertible,

    #[error("Incompatible matrix sizes for multiplication: {lhs_cols} columns vs {rhs_rows} rows")]
    IncompatibleDimensions { lhs_cols: usize, rhs_rows: usize },

    #[error(transparent)]
    Field(#[from] FieldError),
}

/// Result type for matrix operations
pub type MatrixResult<T> = Result<T, MatrixError>;

/// A mutable `rows x cols` matrix of field elements, stored row-major
///
/// Dimensions are fixed at construction.
pub struct Matrix<'f, F: Field> {
    rows: usize,
    cols: usize,
    values: Vec<Option<F::Elem>>,
    field: &'f F,
}

impl<'f, F: Field> Matrix<'f, F> {
    /// Creates a blank matrix with every cell unset
    pub fn new(rows: usize, cols: usize, field: &'f F) -> MatrixResult<Self> {
        if rows == 0 || cols == 0 {
            return Err(MatrixError::InvalidDimensions { rows, cols });
        }
        Ok(Self {
            rows,
            cols,
            values: vec![None; rows * cols],
            field,
        })
    }

    /// Creates a fully populated matrix from row vectors
    pub fn from_rows(field: &'f F, rows: Vec<Vec<F::Elem>>) -> MatrixResult<Self> {
        let row_count = rows.len();
        let cols = rows.first().map_or(0, Vec::len);
        let mut matrix = Self::new(row_count, cols, field)?;

        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != cols {
                return Err(MatrixError::RaggedRows {
                    row: i,
                    expected: cols,
                    actual: row.len(),
                });
            }
            for (j, val) in row.into_iter().enumerate() {
                matrix.values[i * cols + j] = Some(val);
            }
        }
        Ok(matrix)
    }

    /// Creates an `n x n` identity matrix
    pub fn identity(n: usize, field: &'f F) -> MatrixResult<Self> {
        let mut matrix = Self::new(n, n, field)?;
        for i in 0..n {
            for j in 0..n {
                let val = if i == j { field.one() } else { field.zero() };
                matrix.values[i * n + j] = Some(val);
            }
        }
        Ok(matrix)
    }

    #[inline]
    pub fn row_count(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn column_count(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn field(&self) -> &'f F {
        self.field
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> MatrixResult<usize> {
        if row >= self.rows || col >= self.cols {
            return Err(MatrixError::IndexOutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(row * self.cols + col)
    }

    #[inline]
    fn check_row(&self, row: usize) -> MatrixResult<()> {
        if row >= self.rows {
            return Err(MatrixError::RowOutOfBounds {
                row,
                rows: self.rows,
            });
        }
        Ok(())
    }

    /// Returns the cell at (row, col), which may be unset
    pub fn get(&self, row: usize, col: usize) -> MatrixResult<Option<F::Elem>> {
        let idx = self.index(row, col)?;
        Ok(self.values[idx].clone())
    }

    /// Returns the value at (row, col), failing if the cell is unset
    pub fn value(&self, row: usize, col: usize) -> MatrixResult<F::Elem> {
        let idx = self.index(row, col)?;
        self.values[idx]
            .clone()
            .ok_or(MatrixError::Unset { row, col })
    }

    pub fn set(&mut self, row: usize, col: usize, val: F::Elem) -> MatrixResult<()> {
        let idx = self.index(row, col)?;
        self.values[idx] = Some(val);
        Ok(())
    }

    /// Swaps two rows. Swapping a row with itself is a no-op.
    pub fn swap_rows(&mut self, row0: usize, row1: usize) -> MatrixResult<()> {
        self.check_row(row0)?;
        self.check_row(row1)?;
        if row0 == row1 {
            return Ok(());
        }
        for j in 0..self.cols {
            self.values.swap(row0 * self.cols + j, row1 * self.cols + j);
        }
        Ok(())
    }

    /// row *= factor
    pub fn multiply_row(&mut self, row: usize, factor: &F::Elem) -> MatrixResult<()> {
        self.check_row(row)?;
        for j in 0..self.cols {
            let val = self.field.multiply(&self.value(row, j)?, factor)?;
            self.values[row * self.cols + j] = Some(val);
        }
        Ok(())
    }

    /// dest_row += src_row * factor
    pub fn add_rows(
        &mut self,
        src_row: usize,
        dest_row: usize,
        factor: &F::Elem,
    ) -> MatrixResult<()> {
        self.check_row(src_row)?;
        self.check_row(dest_row)?;
        for j in 0..self.cols {
            let scaled = self.field.multiply(&self.value(src_row, j)?, factor)?;
            let val = self.field.add(&self.value(dest_row, j)?, &scaled)?;
            self.values[dest_row * self.cols + j] = Some(val);
        }
        Ok(())
    }

    /// Returns `self * other` as a new matrix
    pub fn multiply(&self, other: &Matrix<'f, F>) -> MatrixResult<Matrix<'f, F>> {
        if self.cols != other.rows {
            return Err(MatrixError::IncompatibleDimensions {
                lhs_cols: self.cols,
                rhs_rows: other.rows,
            });
        }

        let mut result = Matrix::new(self.rows, other.cols, self.field)?;
        for i in 0..self.rows {
            for j in 0..other.cols {
                let mut sum = self.field.zero();
                for k in 0..self.cols {
                    let term = self
                        .field
                        .multiply(&self.value(i, k)?, &other.value(k, j)?)?;
                    sum = self.field.add(&term, &sum)?;
                }
                result.set(i, j, sum)?;
            }
        }
        Ok(result)
    }

    /// Returns the transpose as a new matrix. Unset cells stay unset.
    pub fn transpose(&self) -> Matrix<'f, F> {
        let mut values = Vec::with_capacity(self.values.len());
        for j in 0..self.cols {
            for i in 0..self.rows {
                values.push(self.values[i * self.cols + j].clone());
            }
        }
        Matrix {
            rows: self.cols,
            cols: self.rows,
            values,
            field: self.field,
        }
    }

    // First row at or below `start` with a non-zero entry in `col`
    fn find_pivot_row(&self, start: usize, col: usize) -> MatrixResult<Option<usize>> {
        for row in start..self.rows {
            if !self.field.is_zero(&self.value(row, col)?)? {
                return Ok(Some(row));
            }
        }
        Ok(None)
    }

    /// Converts this matrix to reduced row echelon form by Gauss-Jordan elimination
    ///
    /// Pivots are taken from the topmost eligible row; field arithmetic is exact
    /// so no partial pivoting is needed. Runs in O(rows * cols * min(rows, cols)).
    pub fn reduced_row_echelon_form(&mut self) -> MatrixResult<()> {
        let (rows, cols) = (self.rows, self.cols);

        // Forward elimination to row echelon form
        let mut num_pivots = 0;
        for j in 0..cols {
            if num_pivots >= rows {
                break;
            }
            let Some(pivot_row) = self.find_pivot_row(num_pivots, j)? else {
                continue;
            };
            self.swap_rows(num_pivots, pivot_row)?;
            let pivot_row = num_pivots;
            num_pivots += 1;

            let rec = self.field.reciprocal(&self.value(pivot_row, j)?)?;
            self.multiply_row(pivot_row, &rec)?;

            for i in (pivot_row + 1)..rows {
                let factor = self.field.negate(&self.value(i, j)?)?;
                self.add_rows(pivot_row, i, &factor)?;
            }
        }

        // Back-substitution
        for i in (0..num_pivots).rev() {
            let mut pivot_col = None;
            for j in 0..cols {
                if !self.field.is_zero(&self.value(i, j)?)? {
                    pivot_col = Some(j);
                    break;
                }
            }
            let Some(pivot_col) = pivot_col else {
                continue;
            };

            for above in (0..i).rev() {
                let factor = self.field.negate(&self.value(above, pivot_col)?)?;
                self.add_rows(i, above, &factor)?;
            }
        }

        trace!("rref {}x{}: {} pivots", rows, cols, num_pivots);
        Ok(())
    }

    /// Replaces this matrix with its inverse
    ///
    /// Fails if the matrix is not square or is singular, leaving it unchanged.
    pub fn invert(&mut self) -> MatrixResult<()> {
        let n = self.rows;
        if n != self.cols {
            return Err(MatrixError::NotSquare {
                rows: self.rows,
                cols: self.cols,
            });
        }

        // Augmented [self | identity]
        let mut temp = Matrix::new(n, n * 2, self.field)?;
        for i in 0..n {
            for j in 0..n {
                temp.set(i, j, self.value(i, j)?)?;
                let ident = if i == j { self.field.one() } else { self.field.zero() };
                temp.set(i, j + n, ident)?;
            }
        }

        temp.reduced_row_echelon_form()?;

        for i in 0..n {
            for j in 0..n {
                let expected = if i == j { self.field.one() } else { self.field.zero() };
                if !self.field.equals(&temp.value(i, j)?, &expected)? {
                    return Err(MatrixError::NotInvertible);
                }
            }
        }

        for i in 0..n {
            for j in 0..n {
                self.values[i * n + j] = Some(temp.value(i, j + n)?);
            }
        }
        Ok(())
    }

    /// Returns the determinant, leaving this matrix in row echelon form
    ///
    /// Leading coefficients of the resulting rows are one, not the original pivots.
    pub fn determinant_and_ref(&mut self) -> MatrixResult<F::Elem> {
        let n = self.rows;
        if n != self.cols {
            return Err(MatrixError::NotSquare {
                rows: self.rows,
                cols: self.cols,
            });
        }

        let mut det = self.field.one();
        let mut num_pivots = 0;
        for j in 0..n {
            let Some(pivot_row) = self.find_pivot_row(num_pivots, j)? else {
                continue;
            };
            if pivot_row != num_pivots {
                self.swap_rows(num_pivots, pivot_row)?;
                det = self.field.negate(&det)?;
            }
            let pivot_row = num_pivots;
            num_pivots += 1;

            let pivot = self.value(pivot_row, j)?;
            let rec = self.field.reciprocal(&pivot)?;
            self.multiply_row(pivot_row, &rec)?;
            det = self.field.multiply(&pivot, &det)?;

            for i in (pivot_row + 1)..n {
                let factor = self.field.negate(&self.value(i, j)?)?;
                self.add_rows(pivot_row, i, &factor)?;
            }
        }

        if num_pivots < n {
            Ok(self.field.zero())
        } else {
            Ok(det)
        }
    }
}

impl<F: Field> Clone for Matrix<'_, F> {
    fn clone(&self) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            values: self.values.clone(),
            field: self.field,
        }
    }
}

impl<F: Field> fmt::Debug for Matrix<'_, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matrix")
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .field("values", &self.values)
            .finish()
    }
}

impl<F: Field> fmt::Display for Matrix<'_, F>
where
    F::Elem: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for i in 0..self.rows {
            if i > 0 {
                write!(f, ",\n ")?;
            }
            write!(f, "[")?;
            for j in 0..self.cols {
                if j > 0 {
                    write!(f, ", ")?;
                }
                match &self.values[i * self.cols + j] {
                    Some(val) => write!(f, "{}", val)?,
                    None => write!(f, "_")?,
                }
            }
            write!(f, "]")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::PrimeField;

    fn gf11() -> PrimeField {
        PrimeField::new(11).unwrap()
    }

    #[test]
    fn test_new_rejects_empty_dimensions() {
        let f = gf11();
        assert_eq!(
            Matrix::new(0, 3, &f).unwrap_err(),
            MatrixError::InvalidDimensions { rows: 0, cols: 3 }
        );
        assert!(Matrix::new(3, 0, &f).is_err());
    }

    #[test]
    fn test_cells_start_unset() {
        let f = gf11();
        let mut m = Matrix::new(2, 2, &f).unwrap();
        assert_eq!(m.get(1, 1).unwrap(), None);
        assert_eq!(m.value(1, 1), Err(MatrixError::Unset { row: 1, col: 1 }));
        m.set(1, 1, 4).unwrap();
        assert_eq!(m.get(1, 1).unwrap(), Some(4));
        assert_eq!(m.value(1, 1).unwrap(), 4);
    }

    #[test]
    fn test_bounds_checks() {
        let f = gf11();
        let mut m = Matrix::new(2, 3, &f).unwrap();
        assert!(matches!(
            m.get(2, 0),
            Err(MatrixError::IndexOutOfBounds { .. })
        ));
        assert!(m.set(0, 3, 1).is_err());
        assert_eq!(
            m.swap_rows(0, 2),
            Err(MatrixError::RowOutOfBounds { row: 2, rows: 2 })
        );
    }

    #[test]
    fn test_swap_same_row_is_noop() {
        let f = gf11();
        let mut m = Matrix::from_rows(&f, vec![vec![1, 2], vec![3, 4]]).unwrap();
        m.swap_rows(1, 1).unwrap();
        assert_eq!(m.value(1, 0).unwrap(), 3);
        m.swap_rows(0, 1).unwrap();
        assert_eq!(m.value(0, 0).unwrap(), 3);
        assert_eq!(m.value(1, 1).unwrap(), 2);
    }

    #[test]
    fn test_row_operations() {
        let f = gf11();
        let mut m = Matrix::from_rows(&f, vec![vec![1, 2], vec![3, 4]]).unwrap();
        m.multiply_row(0, &5).unwrap();
        assert_eq!(m.value(0, 0).unwrap(), 5);
        assert_eq!(m.value(0, 1).unwrap(), 10);
        m.add_rows(0, 1, &2).unwrap();
        assert_eq!(m.value(1, 0).unwrap(), 2); // 3 + 10
        assert_eq!(m.value(1, 1).unwrap(), 2); // 4 + 20
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let f = gf11();
        let err = Matrix::from_rows(&f, vec![vec![1, 2], vec![3]]).unwrap_err();
        assert_eq!(
            err,
            MatrixError::RaggedRows {
                row: 1,
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_rref_with_unset_cell_fails() {
        let f = gf11();
        let mut m = Matrix::new(1, 2, &f).unwrap();
        m.set(0, 0, 1).unwrap();
        assert!(matches!(
            m.reduced_row_echelon_form(),
            Err(MatrixError::Unset { .. })
        ));
    }

    #[test]
    fn test_transpose_and_display() {
        let f = gf11();
        let mut m = Matrix::new(2, 3, &f).unwrap();
        m.set(0, 0, 1).unwrap();
        m.set(0, 2, 5).unwrap();
        m.set(1, 1, 7).unwrap();
        let t = m.transpose();
        assert_eq!(t.row_count(), 3);
        assert_eq!(t.column_count(), 2);
        assert_eq!(t.get(2, 0).unwrap(), Some(5));
        assert_eq!(m.to_string(), "[[1, _, 5],\n [_, 7, _]]");
    }

    #[test]
    fn test_invert_2x2() {
        let f = gf11();
        let mut m = Matrix::from_rows(&f, vec![vec![2, 3], vec![4, 5]]).unwrap();
        let original = m.clone();
        m.invert().unwrap();
        let prod = original.multiply(&m).unwrap();
        for i in 0..2 {
            for j in 0..2 {
                assert_eq!(prod.value(i, j).unwrap(), u64::from(i == j));
            }
        }
    }

    #[test]
    fn test_invert_singular_leaves_matrix_unchanged() {
        let f = gf11();
        let mut m = Matrix::from_rows(&f, vec![vec![7, 3], vec![2, 4]]).unwrap();
        assert_eq!(m.invert(), Err(MatrixError::NotInvertible));
        assert_eq!(m.value(0, 0).unwrap(), 7);
        assert_eq!(m.value(1, 1).unwrap(), 4);

        let mut rect = Matrix::from_rows(&f, vec![vec![1, 2, 3]]).unwrap();
        assert!(matches!(rect.invert(), Err(MatrixError::NotSquare { .. })));
    }

    #[test]
    fn test_determinant_2x2() {
        let f = gf11();
        let mut m = Matrix::from_rows(&f, vec![vec![2, 3], vec![4, 5]]).unwrap();
        // 2*5 - 3*4 = -2 = 9 (mod 11)
        assert_eq!(m.determinant_and_ref().unwrap(), 9);

        let mut swapped = Matrix::from_rows(&f, vec![vec![0, 1], vec![1, 0]]).unwrap();
        assert_eq!(swapped.determinant_and_ref().unwrap(), 10);
    }

    #[test]
    fn test_multiply_dimension_mismatch() {
        let f = gf11();
        let a = Matrix::from_rows(&f, vec![vec![1, 2]]).unwrap();
        let b = Matrix::from_rows(&f, vec![vec![1, 2]]).unwrap();
        assert_eq!(
            a.multiply(&b).unwrap_err(),
            MatrixError::IncompatibleDimensions {
                lhs_cols: 2,
                rhs_rows: 1
            }
        );
    }
}
