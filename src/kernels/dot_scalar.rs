//! Portable 4-lane dot product.

use super::LANES;

/// Dot product with a `[i32; 4]` accumulator and a scalar tail.
///
/// Same accumulator layout as the SIMD kernels, which is usually enough
/// for the compiler to auto-vectorize it.
pub fn dot_scalar(a: &[i32], b: &[i32]) -> i32 {
    let len = a.len().min(b.len());
    let main = len - len % LANES;

    let mut acc = [0i32; LANES];
    for (ca, cb) in a[..main]
        .chunks_exact(LANES)
        .zip(b[..main].chunks_exact(LANES))
    {
        for lane in 0..LANES {
            acc[lane] = acc[lane].wrapping_add(ca[lane].wrapping_mul(cb[lane]));
        }
    }

    let mut sum = acc.iter().fold(0i32, |s, &x| s.wrapping_add(x));
    for k in main..len {
        sum = sum.wrapping_add(a[k].wrapping_mul(b[k]));
    }
    sum
}
