//! Criterion benchmarks for the policy cores.
//!
//! Run with `cargo bench --bench ops`.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use cachecore::policy::lfu::LfuCache;
use cachecore::policy::lru::LruCache;

const CAPACITY: usize = 4_096;
const OPS: u64 = 10_000;

fn bench_lru_get_hit(c: &mut Criterion) {
    let mut group = c.benchmark_group("lru/get_hit");
    group.throughput(Throughput::Elements(OPS));
    group.bench_function(BenchmarkId::from_parameter(CAPACITY), |b| {
        let mut cache = LruCache::new(CAPACITY);
        for i in 0..CAPACITY as u64 {
            cache.insert(i, i);
        }
        b.iter(|| {
            for i in 0..OPS {
                black_box(cache.get(&(i % CAPACITY as u64)));
            }
        });
    });
    group.finish();
}

fn bench_lru_insert_evicting(c: &mut Criterion) {
    let mut group = c.benchmark_group("lru/insert_evicting");
    group.throughput(Throughput::Elements(OPS));
    group.bench_function(BenchmarkId::from_parameter(CAPACITY), |b| {
        let mut cache = LruCache::new(CAPACITY);
        let mut next_key = 0u64;
        b.iter(|| {
            for _ in 0..OPS {
                cache.insert(black_box(next_key), next_key);
                next_key = next_key.wrapping_add(1);
            }
        });
    });
    group.finish();
}

fn bench_lfu_get_hit(c: &mut Criterion) {
    let mut group = c.benchmark_group("lfu/get_hit");
    group.throughput(Throughput::Elements(OPS));
    group.bench_function(BenchmarkId::from_parameter(CAPACITY), |b| {
        let mut cache = LfuCache::new(CAPACITY);
        for i in 0..CAPACITY as u64 {
            cache.insert(i, i);
        }
        b.iter(|| {
            for i in 0..OPS {
                black_box(cache.get(&(i % CAPACITY as u64)));
            }
        });
    });
    group.finish();
}

fn bench_lfu_insert_evicting(c: &mut Criterion) {
    let mut group = c.benchmark_group("lfu/insert_evicting");
    group.throughput(Throughput::Elements(OPS));
    group.bench_function(BenchmarkId::from_parameter(CAPACITY), |b| {
        let mut cache = LfuCache::new(CAPACITY);
        let mut next_key = 0u64;
        b.iter(|| {
            for _ in 0..OPS {
                cache.insert(black_box(next_key), next_key);
                next_key = next_key.wrapping_add(1);
            }
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_lru_get_hit,
    bench_lru_insert_evicting,
    bench_lfu_get_hit,
    bench_lfu_insert_evicting
);
criterion_main!(benches);
