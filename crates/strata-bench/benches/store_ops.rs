//! Criterion micro-benchmarks for segmented store allocation and access.

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use strata_bench::{BenchLayout, BENCH_LEN};
use strata_store::SegmentedStore;

/// Benchmark: Allocate a 100K-element store spanning primary + partitions.
fn bench_store_alloc_100k(c: &mut Criterion) {
    c.bench_function("store_alloc_100k", |b| {
        b.iter(|| {
            let store = SegmentedStore::<i64, BenchLayout>::new(BENCH_LEN).unwrap();
            black_box(store);
        });
    });
}

/// Benchmark: Write every wide index, native and partitioned.
fn bench_store_wide_set_100k(c: &mut Criterion) {
    let mut store = SegmentedStore::<i64, BenchLayout>::new(BENCH_LEN).unwrap();
    c.bench_function("store_wide_set_100k", |b| {
        b.iter(|| {
            for i in 0..BENCH_LEN {
                store.set(i, i as i64);
            }
            black_box(store.get(BENCH_LEN - 1));
        });
    });
}

/// Benchmark: Read every wide index.
fn bench_store_wide_get_100k(c: &mut Criterion) {
    let store = SegmentedStore::<i64, BenchLayout>::from_fn(BENCH_LEN, |i| i as i64).unwrap();
    c.bench_function("store_wide_get_100k", |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for i in 0..BENCH_LEN {
                sum = sum.wrapping_add(store.get(i));
            }
            black_box(sum);
        });
    });
}

/// Benchmark: Sequential iteration, for comparison with indexed reads.
fn bench_store_iter_100k(c: &mut Criterion) {
    let store = SegmentedStore::<i64, BenchLayout>::from_fn(BENCH_LEN, |i| i as i64).unwrap();
    c.bench_function("store_iter_100k", |b| {
        b.iter(|| black_box(store.iter().fold(0i64, i64::wrapping_add)));
    });
}

criterion_group!(
    benches,
    bench_store_alloc_100k,
    bench_store_wide_set_100k,
    bench_store_wide_get_100k,
    bench_store_iter_100k
);
criterion_main!(benches);
