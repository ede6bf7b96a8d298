//! Parallel i32 GEMM: validate, allocate, fan out over row ranges, join.

use std::thread;

use log::{debug, trace};
use rayon::prelude::*;

use super::partition::{RowRange, partition};
use crate::blocked::gemm_rows::matmul_blocked_rows;
use crate::config::{Config, Dispatch};
use crate::error::{MatmulError, Result};
use crate::kernels::DotFn;
use crate::matrix::transpose::transpose;
use crate::matrix::{Matrix, try_alloc_zeroed};

/// Read-only state every worker shares.
struct RowKernel<'a> {
    a: &'a [i32],
    bt: &'a [i32],
    n: usize,
    k: usize,
    block: usize,
    dot: DotFn,
}

impl RowKernel<'_> {
    fn run(&self, range: RowRange, c_rows: &mut [i32]) {
        trace!("worker rows {}..{}", range.start, range.end);
        matmul_blocked_rows(
            self.a,
            self.bt,
            c_rows,
            self.n,
            self.k,
            range.start,
            range.end,
            self.block,
            self.dot,
        );
    }
}

/// Multi-threaded `C = A × B`.
///
/// Checks shapes and config, allocates C (zeroed) and a transposed copy of
/// B, splits the rows of C between `config.workers` workers and runs the
/// blocked kernel on each. Returns once every worker has finished.
///
/// Every error is raised before any worker starts. Allocation failures
/// come back as [`MatmulError::OutOfMemory`], with whatever was already
/// allocated dropped on the way out.
pub fn matmul_parallel(a: &Matrix, b: &Matrix, config: &Config) -> Result<Matrix> {
    config.validate()?;
    if a.cols() != b.rows() {
        return Err(MatmulError::InvalidDimensions {
            a_rows: a.rows(),
            a_cols: a.cols(),
            b_rows: b.rows(),
            b_cols: b.cols(),
        });
    }

    let (m, k, n) = (a.rows(), a.cols(), b.cols());
    let isa = config.resolve_isa();

    // Everything is allocated before `partition` and the spawn below, so an
    // allocation failure returns here with no worker started.
    let mut c = try_alloc_zeroed(m, n)?;
    let mut bt = try_alloc_zeroed(n, k)?;
    transpose(b.as_slice(), &mut bt, k, n);

    let ranges = partition(m, config.workers);
    debug!(
        "matmul [{}x{}] @ [{}x{}]: {} workers, block {}, {:?}, {:?}",
        m, k, k, n, config.workers, config.block_size, isa, config.dispatch
    );

    let kernel = RowKernel {
        a: a.as_slice(),
        bt: &bt,
        n,
        k,
        block: config.block_size,
        dot: isa.dot_fn(),
    };
    let work = split_rows(&mut c, &ranges, n);

    if work.len() == 1 {
        // One worker: no point spawning anything
        for (range, c_rows) in work {
            kernel.run(range, c_rows);
        }
    } else {
        match config.dispatch {
            Dispatch::Scoped => {
                let kernel = &kernel;
                // The scope joins every worker (and re-raises a worker panic)
                thread::scope(|s| {
                    for (range, c_rows) in work {
                        s.spawn(move || kernel.run(range, c_rows));
                    }
                });
            }
            Dispatch::Pool => {
                work.into_par_iter()
                    .for_each(|(range, c_rows)| kernel.run(range, c_rows));
            }
        }
    }

    Matrix::from_vec(m, n, c)
}

/// Carve `c` into one mutable slice per range, in order.
///
/// `ranges` must be contiguous and start at row 0, which is what
/// [`partition`] produces.
fn split_rows<'c>(
    c: &'c mut [i32],
    ranges: &[RowRange],
    n: usize,
) -> Vec<(RowRange, &'c mut [i32])> {
    let mut rest = c;
    let mut out = Vec::with_capacity(ranges.len());
    for &range in ranges {
        let (head, tail) = std::mem::take(&mut rest).split_at_mut(range.len() * n);
        out.push((range, head));
        rest = tail;
    }
    debug_assert!(rest.is_empty());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernels::Isa;
    use crate::matrix::naive_ijk::matmul_naive_ijk;

    fn filled(rows: usize, cols: usize, seed: i32) -> Matrix {
        let data = (0..(rows * cols) as i32)
            .map(|i| (i * 7 + seed) % 19 - 9)
            .collect();
        Matrix::from_vec(rows, cols, data).unwrap()
    }

    fn naive(a: &Matrix, b: &Matrix) -> Vec<i32> {
        let mut c = vec![0; a.rows() * b.cols()];
        matmul_naive_ijk(
            a.as_slice(),
            b.as_slice(),
            &mut c,
            a.rows(),
            b.cols(),
            a.cols(),
        );
        c
    }

    #[test]
    fn test_split_rows_shapes() {
        let mut c = vec![0; 10 * 3];
        let ranges = partition(10, 4);
        let parts = split_rows(&mut c, &ranges, 3);
        let lens: Vec<usize> = parts.iter().map(|(_, s)| s.len()).collect();
        assert_eq!(lens, vec![6, 6, 6, 12]);
    }

    #[test]
    fn test_dimension_mismatch() {
        let a = filled(2, 3, 1);
        let b = filled(2, 3, 2);
        let err = matmul_parallel(&a, &b, &Config::default()).unwrap_err();
        assert_eq!(
            err,
            MatmulError::InvalidDimensions {
                a_rows: 2,
                a_cols: 3,
                b_rows: 2,
                b_cols: 3,
            }
        );
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_unallocatable_output_is_out_of_memory() {
        // 2^23 × 1 @ 1 × 2^23: the inputs are 32 MiB each, C would be
        // 2^46 elements (256 TiB), past any user address space
        let rows = 1 << 23;
        let a = Matrix::zeros(rows, 1).unwrap();
        let b = Matrix::zeros(1, rows).unwrap();
        for dispatch in [Dispatch::Scoped, Dispatch::Pool] {
            let config = Config::default().dispatch(dispatch);
            let err = matmul_parallel(&a, &b, &config).unwrap_err();
            assert_eq!(
                err,
                MatmulError::OutOfMemory {
                    elements: rows * rows
                }
            );
        }
    }

    #[test]
    fn test_invalid_config() {
        let a = filled(2, 2, 1);
        let err = matmul_parallel(&a, &a, &Config::default().workers(0)).unwrap_err();
        assert!(matches!(err, MatmulError::InvalidConfig(_)));
    }

    #[test]
    fn test_strategies_and_worker_counts_agree() {
        let a = filled(37, 23, 3);
        let b = filled(23, 29, 5);
        let expected = naive(&a, &b);

        for dispatch in [Dispatch::Scoped, Dispatch::Pool] {
            for workers in [1, 2, 3, 4, 7, 64] {
                let config = Config::default()
                    .workers(workers)
                    .block_size(8)
                    .dispatch(dispatch);
                let c = matmul_parallel(&a, &b, &config).unwrap();
                assert_eq!(c.as_slice(), &expected[..], "{:?} x{}", dispatch, workers);
            }
        }
    }

    #[test]
    fn test_more_workers_than_rows() {
        let a = filled(2, 5, 1);
        let b = filled(5, 3, 2);
        let c = matmul_parallel(&a, &b, &Config::default().workers(8)).unwrap();
        assert_eq!(c.as_slice(), &naive(&a, &b)[..]);
    }

    #[test]
    fn test_forced_scalar_isa() {
        let a = filled(9, 7, 4);
        let b = filled(7, 6, 8);
        let c = matmul_parallel(&a, &b, &Config::default().isa(Isa::Scalar)).unwrap();
        assert_eq!(c.as_slice(), &naive(&a, &b)[..]);
    }
}
