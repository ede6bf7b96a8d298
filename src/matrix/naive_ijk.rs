/// Reference i32 product in plain i-j-k order.
///
/// Every cell is one dot product of a row of A with a column of B, read
/// with stride `n`. No blocking, no SIMD, no threads: this is the function
/// the fast paths are tested and benchmarked against. Overflow wraps,
/// matching the optimized kernels bit for bit.
///
/// # Arguments
///
/// * `a` - Matrix A (m × k), row-major
/// * `b` - Matrix B (k × n), row-major
/// * `c` - Matrix C (m × n), row-major, accumulated into (C += A * B)
/// * `m` - Rows of A and C
/// * `n` - Columns of B and C
/// * `k` - Columns of A, rows of B
pub fn matmul_naive_ijk(a: &[i32], b: &[i32], c: &mut [i32], m: usize, n: usize, k: usize) {
    for i in 0..m {
        for j in 0..n {
            let mut sum = c[i * n + j];
            for p in 0..k {
                sum = sum.wrapping_add(a[i * k + p].wrapping_mul(b[p * n + j]));
            }
            c[i * n + j] = sum;
        }
    }
}
