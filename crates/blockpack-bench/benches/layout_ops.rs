//! Criterion micro-benchmarks for layout fill, churn, and collapse.

use blockpack::Extent3;
use blockpack_bench::{bench_layout, churn, random_extents, BENCH_CAPACITY};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Benchmark: fill a 64³ layout with 8³ blocks until exhaustion.
fn bench_fill_64(c: &mut Criterion) {
    c.bench_function("layout_fill_64", |b| {
        b.iter(|| {
            let mut layout = bench_layout();
            let block = Extent3::new(8, 8, 8);
            let mut count = 0u32;
            while layout.allocate(block).is_some() {
                count += 1;
            }
            black_box(count);
        });
    });
}

/// Benchmark: steady-state churn with up to 24 live regions.
fn bench_churn_64(c: &mut Criterion) {
    let extents = random_extents(42, 512, 16);
    c.bench_function("layout_churn_64", |b| {
        b.iter(|| {
            let mut layout = bench_layout();
            black_box(churn(&mut layout, &extents, 24));
        });
    });
}

/// Benchmark: split into halves, free both (collapsing back to the
/// root), and re-allocate the full volume.
fn bench_collapse_64(c: &mut Criterion) {
    let half = Extent3::new(32, 64, 64);
    c.bench_function("layout_collapse_64", |b| {
        b.iter(|| {
            let mut layout = bench_layout();
            let first = layout.allocate(half).unwrap();
            let second = layout.allocate(half).unwrap();
            layout.free(first, half);
            layout.free(second, half);
            black_box(layout.allocate(BENCH_CAPACITY).unwrap());
        });
    });
}

criterion_group!(
    benches,
    bench_fill_64,
    bench_churn_64,
    bench_collapse_64
);
criterion_main!(benches);
