//! Dense byte matrices with algebra over GF(2^8)
//!
//! Storage is a flat row-major byte buffer with strided indexing. Inversion
//! uses Gauss-Jordan elimination on an augmented working copy; the matrix a
//! caller holds is never mutated by it.

use crate::error::{Error, Result};
use crate::galois;

/// A dense matrix of GF(2^8) elements
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    rows: usize,
    columns: usize,
    data: Vec<u8>,
}

impl Matrix {
    /// Create a zero matrix with the given dimensions
    pub fn new(rows: usize, columns: usize) -> Result<Self> {
        if rows == 0 || columns == 0 {
            return Err(Error::InvalidShape(format!(
                "matrix dimensions must be positive, got {rows} x {columns}"
            )));
        }
        Ok(Matrix {
            rows,
            columns,
            data: vec![0u8; rows * columns],
        })
    }

    /// Create a matrix from explicit rows
    ///
    /// Every row must have the same length.
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self> {
        if rows.is_empty() || rows[0].is_empty() {
            return Err(Error::InvalidShape(
                "matrix must have at least one row and one column".to_string(),
            ));
        }
        let columns = rows[0].len();
        for (r, row) in rows.iter().enumerate() {
            if row.len() != columns {
                return Err(Error::ShapeMismatch(format!(
                    "row {r} has {} columns, expected {columns}",
                    row.len()
                )));
            }
        }

        let mut data = Vec::with_capacity(rows.len() * columns);
        for row in rows {
            data.extend_from_slice(row);
        }
        Ok(Matrix {
            rows: rows.len(),
            columns,
            data,
        })
    }

    /// Create an identity matrix of size `n`
    pub fn identity(n: usize) -> Result<Self> {
        let mut matrix = Matrix::new(n, n)?;
        for i in 0..n {
            matrix.data[i * n + i] = 1;
        }
        Ok(matrix)
    }

    /// Create the Vandermonde matrix with `V[r][c] = r^c` in the field
    ///
    /// Any square subset of its rows is invertible, which is what makes the
    /// systematic generator construction work.
    pub fn vandermonde(rows: usize, columns: usize) -> Result<Self> {
        let mut matrix = Matrix::new(rows, columns)?;
        for r in 0..rows {
            for c in 0..columns {
                matrix.data[r * columns + c] = galois::exp(r as u8, c);
            }
        }
        Ok(matrix)
    }

    /// Number of rows
    #[inline]
    pub fn row_count(&self) -> usize {
        self.rows
    }

    /// Number of columns
    #[inline]
    pub fn column_count(&self) -> usize {
        self.columns
    }

    /// Get the element at (`r`, `c`)
    pub fn get(&self, r: usize, c: usize) -> Result<u8> {
        self.check_index(r, c)?;
        Ok(self.data[r * self.columns + c])
    }

    /// Set the element at (`r`, `c`)
    pub fn set(&mut self, r: usize, c: usize, value: u8) -> Result<()> {
        self.check_index(r, c)?;
        self.data[r * self.columns + c] = value;
        Ok(())
    }

    /// Get a copy of row `r`
    pub fn get_row(&self, r: usize) -> Result<Vec<u8>> {
        if r >= self.rows {
            return Err(Error::IndexOutOfRange(format!(
                "row {r} in a {} x {} matrix",
                self.rows, self.columns
            )));
        }
        Ok(self.row(r).to_vec())
    }

    /// Row `r` as a slice of the backing buffer
    ///
    /// Used on the coding hot path so parity rows and decode rows need no
    /// per-call copies. `r` must be in range.
    #[inline]
    pub(crate) fn row(&self, r: usize) -> &[u8] {
        &self.data[r * self.columns..(r + 1) * self.columns]
    }

    /// Multiply this matrix by `rhs`
    pub fn times(&self, rhs: &Matrix) -> Result<Matrix> {
        if self.columns != rhs.rows {
            return Err(Error::ShapeMismatch(format!(
                "cannot multiply {} x {} by {} x {}",
                self.rows, self.columns, rhs.rows, rhs.columns
            )));
        }

        let mut product = Matrix::new(self.rows, rhs.columns)?;
        for r in 0..self.rows {
            for c in 0..rhs.columns {
                let mut value = 0u8;
                for i in 0..self.columns {
                    value ^= galois::multiply(
                        self.data[r * self.columns + i],
                        rhs.data[i * rhs.columns + c],
                    );
                }
                product.data[r * rhs.columns + c] = value;
            }
        }
        Ok(product)
    }

    /// Concatenate `right` onto this matrix horizontally
    pub fn augment(&self, right: &Matrix) -> Result<Matrix> {
        if self.rows != right.rows {
            return Err(Error::ShapeMismatch(format!(
                "cannot augment {} rows with {} rows",
                self.rows, right.rows
            )));
        }

        let columns = self.columns + right.columns;
        let mut result = Matrix::new(self.rows, columns)?;
        for r in 0..self.rows {
            result.data[r * columns..r * columns + self.columns].copy_from_slice(self.row(r));
            result.data[r * columns + self.columns..(r + 1) * columns]
                .copy_from_slice(right.row(r));
        }
        Ok(result)
    }

    /// Extract the sub-matrix of half-open row range `rmin..rmax` and column
    /// range `cmin..cmax`
    pub fn sub_matrix(&self, rmin: usize, cmin: usize, rmax: usize, cmax: usize) -> Result<Matrix> {
        if rmax > self.rows || cmax > self.columns {
            return Err(Error::IndexOutOfRange(format!(
                "sub-matrix ({rmin}, {cmin})..({rmax}, {cmax}) of a {} x {} matrix",
                self.rows, self.columns
            )));
        }
        if rmin >= rmax || cmin >= cmax {
            return Err(Error::InvalidShape(format!(
                "empty sub-matrix range ({rmin}, {cmin})..({rmax}, {cmax})"
            )));
        }

        let mut result = Matrix::new(rmax - rmin, cmax - cmin)?;
        for r in rmin..rmax {
            for c in cmin..cmax {
                result.data[(r - rmin) * result.columns + (c - cmin)] =
                    self.data[r * self.columns + c];
            }
        }
        Ok(result)
    }

    /// Swap two rows in place
    pub fn swap_rows(&mut self, r1: usize, r2: usize) -> Result<()> {
        if r1 >= self.rows || r2 >= self.rows {
            return Err(Error::IndexOutOfRange(format!(
                "swap of rows {r1} and {r2} in a {} x {} matrix",
                self.rows, self.columns
            )));
        }
        if r1 == r2 {
            return Ok(());
        }
        for c in 0..self.columns {
            self.data
                .swap(r1 * self.columns + c, r2 * self.columns + c);
        }
        Ok(())
    }

    /// Compute the inverse of a square matrix
    ///
    /// Returns `Error::Singular` when the matrix has no inverse.
    pub fn invert(&self) -> Result<Matrix> {
        if self.rows != self.columns {
            return Err(Error::ShapeMismatch(format!(
                "cannot invert a {} x {} matrix",
                self.rows, self.columns
            )));
        }

        let mut work = self.augment(&Matrix::identity(self.rows)?)?;
        work.gaussian_elimination()?;
        work.sub_matrix(0, self.rows, self.rows, self.rows * 2)
    }

    /// Gauss-Jordan elimination over GF(2^8), reducing the left square block
    /// of `self` to the identity
    fn gaussian_elimination(&mut self) -> Result<()> {
        let n = self.rows;

        for r in 0..n {
            // The pivot must be nonzero; scan below and swap if it is not.
            if self.data[r * self.columns + r] == 0 {
                let found = (r + 1..n).find(|&below| self.data[below * self.columns + r] != 0);
                match found {
                    Some(below) => self.swap_rows(r, below)?,
                    None => return Err(Error::Singular),
                }
            }

            // Scale the pivot row so the pivot becomes 1.
            let pivot = self.data[r * self.columns + r];
            if pivot != 1 {
                let scale = galois::divide(1, pivot)?;
                for c in 0..self.columns {
                    let index = r * self.columns + c;
                    self.data[index] = galois::multiply(self.data[index], scale);
                }
            }

            // Clear everything below the pivot.
            for below in r + 1..n {
                let scale = self.data[below * self.columns + r];
                if scale != 0 {
                    for c in 0..self.columns {
                        let value = galois::multiply(scale, self.data[r * self.columns + c]);
                        self.data[below * self.columns + c] ^= value;
                    }
                }
            }
        }

        // Back-substitute to clear everything above each pivot.
        for d in 0..n {
            for above in 0..d {
                let scale = self.data[above * self.columns + d];
                if scale != 0 {
                    for c in 0..self.columns {
                        let value = galois::multiply(scale, self.data[d * self.columns + c]);
                        self.data[above * self.columns + c] ^= value;
                    }
                }
            }
        }

        Ok(())
    }

    fn check_index(&self, r: usize, c: usize) -> Result<()> {
        if r >= self.rows || c >= self.columns {
            return Err(Error::IndexOutOfRange(format!(
                "({r}, {c}) in a {} x {} matrix",
                self.rows, self.columns
            )));
        }
        Ok(())
    }
}
