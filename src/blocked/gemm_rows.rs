//! Blocked i32 GEMM for one worker's share of the output rows.

use crate::kernels::DotFn;

/// Cache-blocked `C[start..end, :] += A[start..end, :] × B`.
///
/// B is taken pre-transposed (`bt`, n × k) so the column of B feeding each
/// output cell is a contiguous slice instead of a stride-`n` walk.
///
/// `c_rows` holds only this worker's rows: row `i` of the full output lives
/// at `c_rows[(i - start) * n..]`. Each k-block adds into the cell, so
/// `c_rows` must start out zeroed (or hold whatever the caller wants
/// accumulated onto).
///
/// An empty range (`start == end`) does nothing.
///
/// # Arguments
///
/// * `a` - Matrix A (m × k), row-major
/// * `bt` - Transposed matrix B^T (n × k), row-major
/// * `c_rows` - Output rows `start..end` of C (m × n), row-major
/// * `start`, `end` - Row range of C this call owns
/// * `block` - Tile edge, must be at least 1
/// * `dot` - Dot-product kernel for the innermost reduction
#[allow(clippy::too_many_arguments)]
pub fn matmul_blocked_rows(
    a: &[i32],
    bt: &[i32],
    c_rows: &mut [i32],
    n: usize,
    k: usize,
    start: usize,
    end: usize,
    block: usize,
    dot: DotFn,
) {
    debug_assert!(block > 0, "block size must be positive");
    debug_assert!(start <= end);
    debug_assert_eq!(c_rows.len(), (end - start) * n);
    debug_assert!(a.len() >= end * k);
    debug_assert_eq!(bt.len(), n * k);

    // Row blocks
    for ii in (start..end).step_by(block) {
        let max_i = (ii + block).min(end);

        // Column blocks
        for jj in (0..n).step_by(block) {
            let max_j = (jj + block).min(n);

            // Reduction blocks: every pass adds another partial sum into the tile
            for kk in (0..k).step_by(block) {
                let max_k = (kk + block).min(k);

                for i in ii..max_i {
                    let a_seg = &a[i * k + kk..i * k + max_k];
                    let c_off = (i - start) * n;
                    let c_row = &mut c_rows[c_off + jj..c_off + max_j];

                    for (cell, j) in c_row.iter_mut().zip(jj..max_j) {
                        let b_seg = &bt[j * k + kk..j * k + max_k];
                        *cell = cell.wrapping_add(dot(a_seg, b_seg));
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernels::Isa;
    use crate::matrix::naive_ijk::matmul_naive_ijk;
    use crate::matrix::transpose::transpose;

    fn run_full(a: &[i32], b: &[i32], m: usize, n: usize, k: usize, block: usize) -> Vec<i32> {
        let mut bt = vec![0; k * n];
        transpose(b, &mut bt, k, n);
        let mut c = vec![0; m * n];
        matmul_blocked_rows(a, &bt, &mut c, n, k, 0, m, block, Isa::detect().dot_fn());
        c
    }

    fn naive(a: &[i32], b: &[i32], m: usize, n: usize, k: usize) -> Vec<i32> {
        let mut c = vec![0; m * n];
        matmul_naive_ijk(a, b, &mut c, m, n, k);
        c
    }

    #[test]
    fn test_2x2() {
        let c = run_full(&[1, 2, 3, 4], &[5, 6, 7, 8], 2, 2, 2, 64);
        assert_eq!(c, vec![19, 22, 43, 50]);
    }

    #[test]
    fn test_block_sizes_agree_with_naive() {
        let (m, n, k) = (13, 11, 17);
        let a: Vec<i32> = (0..m * k).map(|i| (i % 7) as i32 - 3).collect();
        let b: Vec<i32> = (0..k * n).map(|i| (i % 5) as i32 - 2).collect();
        let expected = naive(&a, &b, m, n, k);

        for block in [1, 2, 3, 4, 5, 8, 16, 64] {
            assert_eq!(run_full(&a, &b, m, n, k, block), expected, "block {}", block);
        }
    }

    #[test]
    fn test_partial_row_range_only_touches_its_rows() {
        let (m, n, k) = (6, 3, 5);
        let a: Vec<i32> = (0..m * k).map(|i| i as i32).collect();
        let b: Vec<i32> = (0..k * n).map(|i| (i as i32) - 4).collect();
        let expected = naive(&a, &b, m, n, k);

        let mut bt = vec![0; k * n];
        transpose(&b, &mut bt, k, n);

        let mut c_rows = vec![0; 2 * n];
        matmul_blocked_rows(&a, &bt, &mut c_rows, n, k, 2, 4, 2, Isa::Scalar.dot_fn());
        assert_eq!(c_rows, expected[2 * n..4 * n]);
    }

    #[test]
    fn test_empty_range_is_noop() {
        let a = vec![1; 4];
        let bt = vec![1; 4];
        let mut c_rows: Vec<i32> = vec![];
        matmul_blocked_rows(&a, &bt, &mut c_rows, 2, 2, 1, 1, 64, Isa::Scalar.dot_fn());
        assert!(c_rows.is_empty());
    }

    #[test]
    fn test_accumulates_onto_existing_values() {
        let mut bt = vec![0; 4];
        transpose(&[5, 6, 7, 8], &mut bt, 2, 2);
        let mut c = vec![1; 4];
        matmul_blocked_rows(&[1, 2, 3, 4], &bt, &mut c, 2, 2, 0, 2, 1, Isa::Scalar.dot_fn());
        assert_eq!(c, vec![20, 23, 44, 51]);
    }
}
