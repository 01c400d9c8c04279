//! Criterion micro-benchmarks for history rotation without a scheme.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use fdstep_arena::HistoryRing;
use fdstep_test_utils::pseudo_random;

/// Rotate, fill and publish a 3-deep ring of 10K cells.
fn bench_ring_cycle_10k(c: &mut Criterion) {
    let mut ring = HistoryRing::with_extents(3, &[10_000]).unwrap();
    let data = pseudo_random(10_000, 42);
    ring.seed(0, &data).unwrap();
    ring.seed(1, &data).unwrap();
    c.bench_function("ring_cycle_10k", |b| {
        b.iter(|| {
            let mut frame = ring.begin_step();
            let (previous, next) = frame.parts();
            next.copy_from_slice(previous[1]);
            drop(frame);
            ring.publish().unwrap();
            black_box(ring.latest().unwrap()[0]);
        });
    });
}

/// Seed one slot from little-endian float32 bytes.
fn bench_seed_bytes_10k(c: &mut Criterion) {
    let mut ring = HistoryRing::with_extents(2, &[10_000]).unwrap();
    let bytes: Vec<u8> = pseudo_random(10_000, 7)
        .iter()
        .flat_map(|&v| (v as f32).to_le_bytes())
        .collect();
    c.bench_function("seed_bytes_f32_10k", |b| {
        b.iter(|| {
            ring.seed_bytes(0, "float32", black_box(&bytes)).unwrap();
        });
    });
}

criterion_group!(benches, bench_ring_cycle_10k, bench_seed_bytes_10k);
criterion_main!(benches);
