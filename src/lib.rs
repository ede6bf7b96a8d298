//! Multi-threaded i32 matrix multiplication, built from scratch.
//!
//! Three things make it fast: cache blocking over rows, columns and the
//! reduction dimension, 4-lane SIMD dot products (SSE4.1 on x86_64, NEON on
//! aarch64, a portable fallback elsewhere), and splitting the output rows
//! between worker threads that never touch each other's rows.
//!
//! ## Usage
//!
//! ```
//! use imatmul::{Matrix, multiply};
//!
//! let a = Matrix::from_rows(&[[1, 2], [3, 4]]).unwrap();
//! let b = Matrix::from_rows(&[[5, 6], [7, 8]]).unwrap();
//!
//! let c = multiply(&a, &b).unwrap();
//! assert_eq!(c.to_rows(), vec![vec![19, 22], vec![43, 50]]);
//! ```
//!
//! Worker count, block size and threading strategy are configurable:
//!
//! ```
//! use imatmul::{Config, Dispatch, Matrix, multiply_with};
//!
//! let a = Matrix::from_vec(256, 256, vec![1; 256 * 256]).unwrap();
//! let b = Matrix::from_vec(256, 256, vec![2; 256 * 256]).unwrap();
//!
//! let config = Config::default().workers(8).block_size(32).dispatch(Dispatch::Pool);
//! let c = multiply_with(&a, &b, &config).unwrap();
//! assert_eq!(c.get(0, 0), Some(512));
//! ```
//!
//! Arithmetic wraps on overflow; keeping values in range is up to the
//! caller.
//!
//! ## What's inside
//!
//! - SSE4.1 / NEON / portable 4-lane dot-product kernels
//! - Three-level cache blocking (default 64)
//! - Row-range partitioning across scoped threads or a rayon pool

pub mod blocked;
pub mod config;
pub mod error;
pub mod kernels;
pub mod matrix;
pub mod threaded;

pub use config::{Config, DEFAULT_BLOCK_SIZE, DEFAULT_WORKERS, Dispatch};
pub use error::{MatmulError, Result};
pub use kernels::Isa;
pub use matrix::Matrix;
pub use matrix::naive_ijk::matmul_naive_ijk;
pub use threaded::partition::{RowRange, partition};

/// Matrix multiply: C = A × B, with the default [`Config`].
///
/// A is n×m, B is m×p, C comes back n×p. Uses 4 workers and 64-wide
/// blocks, and picks the best SIMD kernel for the CPU.
///
/// # Errors
///
/// [`MatmulError::InvalidDimensions`] if `A.cols != B.rows`,
/// [`MatmulError::OutOfMemory`] if the result can't be allocated.
pub fn multiply(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    multiply_with(a, b, &Config::default())
}

/// Same as [`multiply`] with explicit settings.
pub fn multiply_with(a: &Matrix, b: &Matrix, config: &Config) -> Result<Matrix> {
    threaded::dispatch::matmul_parallel(a, b, config)
}

/// List-of-rows entry point for host bindings.
///
/// Validates both inputs (non-empty, rectangular, every element fits in
/// i32), multiplies with the default config and hands the product back as
/// rows.
///
/// ```
/// let c = imatmul::multiply_rows(&[vec![2]], &[vec![3]]).unwrap();
/// assert_eq!(c, vec![vec![6]]);
/// ```
pub fn multiply_rows<R, T>(a: &[R], b: &[R]) -> Result<Vec<Vec<i32>>>
where
    R: AsRef<[T]>,
    T: Copy + TryInto<i32>,
{
    let a = Matrix::from_rows(a)?;
    let b = Matrix::from_rows(b)?;
    Ok(multiply(&a, &b)?.to_rows())
}
