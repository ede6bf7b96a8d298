//! Flat row-major i32 matrices, plus the reference implementations the
//! optimized kernels are checked against.
//!
//! [`Matrix`] is also the host adapter: [`Matrix::from_rows`] turns a
//! list-of-rows into the flat buffer the kernels expect and rejects anything
//! that isn't a non-empty rectangle of i32 values; [`Matrix::to_rows`] goes
//! back the other way.

pub mod naive_ijk;
pub mod transpose;

use crate::error::{MatmulError, Result};

/// A dense `rows × cols` matrix stored row-major in one contiguous buffer.
///
/// Invariant: `rows > 0`, `cols > 0` and `data.len() == rows * cols`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<i32>,
}

impl Matrix {
    /// Wrap an existing row-major buffer.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<i32>) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(MatmulError::MalformedInput(format!(
                "matrix dimensions must be positive, got {}x{}",
                rows, cols
            )));
        }
        if rows.checked_mul(cols) != Some(data.len()) {
            return Err(MatmulError::MalformedInput(format!(
                "{}x{} matrix needs {} elements, got {}",
                rows,
                cols,
                rows.saturating_mul(cols),
                data.len()
            )));
        }
        Ok(Self { rows, cols, data })
    }

    /// A zero-filled matrix. Allocation failure is reported, not aborted on.
    pub fn zeros(rows: usize, cols: usize) -> Result<Self> {
        let data = try_alloc_zeroed(rows, cols)?;
        Self::from_vec(rows, cols, data)
    }

    /// The `size × size` identity matrix.
    pub fn identity(size: usize) -> Result<Self> {
        let mut m = Self::zeros(size, size)?;
        for i in 0..size {
            m.data[i * size + i] = 1;
        }
        Ok(m)
    }

    /// Build a matrix from a list of rows.
    ///
    /// Accepts anything whose elements convert losslessly into `i32`, so a
    /// host handing over `i64` values gets an error for out-of-range ones
    /// instead of silent truncation.
    ///
    /// ```
    /// use imatmul::Matrix;
    ///
    /// let m = Matrix::from_rows(&[vec![1i64, 2, 3], vec![4, 5, 6]]).unwrap();
    /// assert_eq!((m.rows(), m.cols()), (2, 3));
    /// assert!(Matrix::from_rows(&[vec![1, 2], vec![3]]).is_err());
    /// ```
    pub fn from_rows<R, T>(rows: &[R]) -> Result<Self>
    where
        R: AsRef<[T]>,
        T: Copy + TryInto<i32>,
    {
        let first = rows
            .first()
            .ok_or_else(|| MatmulError::MalformedInput("empty matrix".to_string()))?;
        let cols = first.as_ref().len();
        if cols == 0 {
            return Err(MatmulError::MalformedInput(
                "rows must not be empty".to_string(),
            ));
        }

        let mut data = try_with_capacity(rows.len(), cols)?;

        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(MatmulError::MalformedInput(format!(
                    "row {} has {} elements, expected {}",
                    i,
                    row.len(),
                    cols
                )));
            }
            for (j, &value) in row.iter().enumerate() {
                let value = value.try_into().map_err(|_| {
                    MatmulError::MalformedInput(format!(
                        "element ({}, {}) does not fit in i32",
                        i, j
                    ))
                })?;
                data.push(value);
            }
        }

        Self::from_vec(rows.len(), cols, data)
    }

    /// Convert back into a list of rows.
    pub fn to_rows(&self) -> Vec<Vec<i32>> {
        self.data.chunks_exact(self.cols).map(<[i32]>::to_vec).collect()
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Element at row `i`, column `j`.
    pub fn get(&self, i: usize, j: usize) -> Option<i32> {
        if i < self.rows && j < self.cols {
            Some(self.data[i * self.cols + j])
        } else {
            None
        }
    }

    /// The row-major backing buffer.
    pub fn as_slice(&self) -> &[i32] {
        &self.data
    }

    /// Give up the matrix and keep its row-major buffer.
    pub fn into_vec(self) -> Vec<i32> {
        self.data
    }
}

/// Allocate a zeroed `rows * cols` buffer without aborting on failure.
pub(crate) fn try_alloc_zeroed(rows: usize, cols: usize) -> Result<Vec<i32>> {
    let mut buf = try_with_capacity(rows, cols)?;
    // try_with_capacity already checked this product
    buf.resize(rows * cols, 0);
    Ok(buf)
}

fn try_with_capacity(rows: usize, cols: usize) -> Result<Vec<i32>> {
    let elements = rows
        .checked_mul(cols)
        .ok_or(MatmulError::OutOfMemory {
            elements: usize::MAX,
        })?;
    let mut buf = Vec::new();
    buf.try_reserve_exact(elements)
        .map_err(|_| MatmulError::OutOfMemory { elements })?;
    Ok(buf)
}
