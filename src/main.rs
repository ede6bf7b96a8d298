//! Benchmark runner for the i32 matmul implementations.
//!
//! Inputs are `a[i][j] = i + j`. Set `RUST_LOG=debug` to see the
//! dispatcher's decisions.

use imatmul::{Config, Dispatch, Isa, Matrix, matmul_naive_ijk, multiply_with};
use std::time::Instant;

fn main() -> imatmul::Result<()> {
    env_logger::init();

    println!("=== i32 Matrix Multiplication Benchmark ===\n");

    let sizes = [256, 512, 1024];
    let iterations = 3;
    let workers = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(imatmul::DEFAULT_WORKERS);

    println!("SIMD: {:?}, workers: {}\n", Isa::detect(), workers);

    for &size in &sizes {
        println!("Matrix: {}×{}", size, size);
        println!("{}", "-".repeat(50));

        let a = generate_matrix(size)?;
        let b = generate_matrix(size)?;

        let (naive_ms, naive_c) = bench_naive(&a, &b);
        print_corner(&naive_c, size);

        let configs = [
            ("Blocked, 1 worker", Config::default().workers(1)),
            ("Blocked, scalar", Config::default().workers(1).isa(Isa::Scalar)),
            ("Scoped threads", Config::default().workers(workers)),
            (
                "Rayon pool",
                Config::default().workers(workers).dispatch(Dispatch::Pool),
            ),
        ];

        println!(
            "1. {:18} {:8.2} ms  {:6.2} GOPS  (1.0×)",
            "Naive (i-j-k)",
            naive_ms,
            gops(size, naive_ms)
        );
        for (i, (name, config)) in configs.iter().enumerate() {
            let (time_ms, c) = bench_config(&a, &b, config, iterations)?;
            let status = if c.as_slice() == &naive_c[..] { "" } else { "  MISMATCH" };
            println!(
                "{}. {:18} {:8.2} ms  {:6.2} GOPS  ({:.1}×){}",
                i + 2,
                name,
                time_ms,
                gops(size, time_ms),
                naive_ms / time_ms,
                status
            );
        }
        println!();
    }

    println!("GOPS = billion integer multiply-adds ×2 per second.");
    println!("Speedup relative to Naive (i-j-k). Higher is better.\n");
    Ok(())
}

fn generate_matrix(size: usize) -> imatmul::Result<Matrix> {
    let data = (0..size)
        .flat_map(|i| (0..size).map(move |j| (i + j) as i32))
        .collect();
    Matrix::from_vec(size, size, data)
}

/// Time the naive reference (single run, it's slow)
fn bench_naive(a: &Matrix, b: &Matrix) -> (f64, Vec<i32>) {
    let (m, k, n) = (a.rows(), a.cols(), b.cols());
    let mut c = vec![0; m * n];
    let start = Instant::now();
    matmul_naive_ijk(a.as_slice(), b.as_slice(), &mut c, m, n, k);
    (start.elapsed().as_secs_f64() * 1000.0, c)
}

/// Average time over `iterations` runs after one warmup
fn bench_config(
    a: &Matrix,
    b: &Matrix,
    config: &Config,
    iterations: usize,
) -> imatmul::Result<(f64, Matrix)> {
    let mut c = multiply_with(a, b, config)?;

    let mut total = 0.0;
    for _ in 0..iterations {
        let start = Instant::now();
        c = multiply_with(a, b, config)?;
        total += start.elapsed().as_secs_f64();
    }

    Ok((total / iterations as f64 * 1000.0, c))
}

fn gops(size: usize, time_ms: f64) -> f64 {
    2.0 * (size * size * size) as f64 / (time_ms / 1000.0) / 1e9
}

fn print_corner(c: &[i32], size: usize) {
    for row in c.chunks_exact(size).take(2) {
        println!("{:?}", &row[..2]);
    }
}
