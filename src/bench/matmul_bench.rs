use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use imatmul::{Config, Dispatch, Isa, Matrix, multiply_with};

fn square(size: usize, seed: i32) -> Matrix {
    let data = (0..(size * size) as i32)
        .map(|i| (i.wrapping_mul(31) ^ seed) % 100)
        .collect();
    Matrix::from_vec(size, size, data).unwrap()
}

fn bench_matmul(c: &mut Criterion) {
    let mut group = c.benchmark_group("matmul_i32");
    group.sample_size(10);

    for size in [128, 256, 512] {
        let a = square(size, 7);
        let b = square(size, 13);
        group.throughput(Throughput::Elements((2 * size * size * size) as u64));

        let configs = [
            ("scalar_1t", Config::default().workers(1).isa(Isa::Scalar)),
            ("simd_1t", Config::default().workers(1)),
            ("scoped_4t", Config::default()),
            ("pool_4t", Config::default().dispatch(Dispatch::Pool)),
        ];

        for (name, config) in configs {
            group.bench_with_input(BenchmarkId::new(name, size), &size, |bench, _| {
                bench.iter(|| multiply_with(black_box(&a), black_box(&b), &config).unwrap())
            });
        }
    }

    group.finish();
}

fn bench_block_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("block_size");
    group.sample_size(10);

    let a = square(512, 3);
    let b = square(512, 5);
    for block in [16, 32, 64, 128] {
        let config = Config::default().block_size(block);
        group.bench_with_input(BenchmarkId::from_parameter(block), &block, |bench, _| {
            bench.iter(|| multiply_with(black_box(&a), black_box(&b), &config).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_matmul, bench_block_size);
criterion_main!(benches);
