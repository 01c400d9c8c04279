//! Criterion benchmarks: sequential vs fork-join leapfrog on a line.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use fdstep_bench::string_profile;

/// One step on 100K points, sequential.
fn bench_leapfrog_step_100k(c: &mut Criterion) {
    let mut engine = string_profile(100_000, None).unwrap();
    c.bench_function("leapfrog_step_100k", |b| {
        b.iter(|| {
            engine.step().unwrap();
            black_box(engine.current_result().unwrap()[50_000]);
        });
    });
}

/// One step on 100K points across worker counts.
fn bench_threaded_step_100k(c: &mut Criterion) {
    let mut group = c.benchmark_group("threaded_step_100k");
    for threads in [1usize, 2, 4, 8] {
        let mut engine = string_profile(100_000, Some(threads)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(threads), &threads, |b, _| {
            b.iter(|| {
                engine.step().unwrap();
                black_box(engine.current_result().unwrap()[50_000]);
            });
        });
    }
    group.finish();
}

/// 1000 steps on a 1K-point string, including engine construction.
fn bench_1000_steps_1k(c: &mut Criterion) {
    c.bench_function("1000_steps_1k", |b| {
        b.iter(|| {
            let mut engine = string_profile(1_000, None).unwrap();
            engine.run(1000).unwrap();
            black_box(engine.current_time().unwrap());
        });
    });
}

criterion_group!(
    benches,
    bench_leapfrog_step_100k,
    bench_threaded_step_100k,
    bench_1000_steps_1k
);
criterion_main!(benches);
