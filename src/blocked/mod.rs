//! Cache-blocked GEMM over a range of output rows.
//!
//! The output is walked in `block × block` tiles, and each tile's reduction
//! is split into `block`-long slices of K so the A rows and B columns being
//! dotted stay resident in L1/L2 while they're reused. The innermost
//! reduction is handed to one of the SIMD kernels in [`crate::kernels`].
//!
//! Available implementations:
//! - `gemm_rows`: i32 row-range kernel used by every dispatcher worker

pub mod gemm_rows;
