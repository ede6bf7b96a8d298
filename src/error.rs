//! Error types for matrix multiplication.

use thiserror::Error;

/// Result type for matmul operations
pub type Result<T> = std::result::Result<T, MatmulError>;

/// Everything that can make a multiply call fail.
///
/// All of these are raised before any worker thread starts; the kernels
/// themselves never fail.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MatmulError {
    /// Inner dimensions don't agree (A.cols != B.rows)
    #[error("matmul dimension mismatch: [{a_rows}x{a_cols}] @ [{b_rows}x{b_cols}]")]
    InvalidDimensions {
        a_rows: usize,
        a_cols: usize,
        b_rows: usize,
        b_cols: usize,
    },

    /// A buffer of `elements` i32 values could not be allocated
    #[error("out of memory allocating {elements} elements")]
    OutOfMemory { elements: usize },

    /// Host-side input isn't a well-formed rectangular integer matrix
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// Dispatcher configuration is unusable (zero workers, zero block size)
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
