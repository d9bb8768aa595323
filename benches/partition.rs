//! Benchmarks for the partition coordinators.
//!
//! Compares the parallel and sequential strategies over random inputs at a
//! few sizes. Each iteration starts from a fresh copy since both strategies
//! rearrange their input in place.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use lanesplit::{compute_parallel, compute_sequential};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const LANES: usize = 4;

fn random_input(len: usize) -> Vec<i32> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..len).map(|_| rng.gen()).collect()
}

fn bench_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("partition");

    for len in [1_024usize, 65_536, 1_048_576] {
        let input = random_input(len);
        group.throughput(Throughput::Elements(len as u64));

        group.bench_with_input(BenchmarkId::new("sequential", len), &input, |b, input| {
            b.iter_batched_ref(
                || input.clone(),
                |data| black_box(compute_sequential(data, LANES)),
                criterion::BatchSize::LargeInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("parallel", len), &input, |b, input| {
            b.iter_batched_ref(
                || input.clone(),
                |data| black_box(compute_parallel(data, LANES)),
                criterion::BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_strategies);
criterion_main!(benches);
