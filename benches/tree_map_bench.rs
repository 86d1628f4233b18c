//! Benchmark for TreeMap vs standard BTreeMap.
//!
//! Compares the arena-backed red-black TreeMap against Rust's standard
//! BTreeMap for insertion, lookup, erasure, and in-order traversal.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use redblack::map::TreeMap;
use std::collections::BTreeMap;
use std::hint::black_box;

/// Deterministic shuffled keys so random-order insertion is reproducible.
fn scrambled_keys(size: i32) -> Vec<i32> {
    (0..size)
        .map(|index| index.wrapping_mul(7919).rem_euclid(size.max(1)))
        .collect()
}

// =============================================================================
// insert Benchmark
// =============================================================================

fn benchmark_insert(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("insert");

    for size in [100, 1000, 10000] {
        let keys = scrambled_keys(size);

        // TreeMap insert
        group.bench_with_input(BenchmarkId::new("TreeMap", size), &keys, |bencher, keys| {
            bencher.iter(|| {
                let mut map = TreeMap::new();
                for &key in keys {
                    map.insert(black_box(key), black_box(key * 2));
                }
                black_box(map)
            });
        });

        // Standard BTreeMap insert
        group.bench_with_input(BenchmarkId::new("BTreeMap", size), &keys, |bencher, keys| {
            bencher.iter(|| {
                let mut map = BTreeMap::new();
                for &key in keys {
                    map.entry(black_box(key)).or_insert(black_box(key * 2));
                }
                black_box(map)
            });
        });
    }

    group.finish();
}

// =============================================================================
// find Benchmark
// =============================================================================

fn benchmark_find(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("find");

    for size in [100, 1000, 10000] {
        // Prepare data
        let tree_map: TreeMap<i32, i32> = (0..size).map(|index| (index, index * 2)).collect();
        let standard_map: BTreeMap<i32, i32> = (0..size).map(|index| (index, index * 2)).collect();

        // TreeMap at
        group.bench_with_input(BenchmarkId::new("TreeMap", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut sum = 0;
                for key in 0..size {
                    if let Ok(&value) = tree_map.at(&black_box(key)) {
                        sum += value;
                    }
                }
                black_box(sum)
            });
        });

        // Standard BTreeMap get
        group.bench_with_input(BenchmarkId::new("BTreeMap", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut sum = 0;
                for key in 0..size {
                    if let Some(&value) = standard_map.get(&black_box(key)) {
                        sum += value;
                    }
                }
                black_box(sum)
            });
        });
    }

    group.finish();
}

// =============================================================================
// erase Benchmark
// =============================================================================

fn benchmark_erase(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("erase");

    for size in [100, 1000, 10000] {
        let keys = scrambled_keys(size);
        let tree_map: TreeMap<i32, i32> = (0..size).map(|index| (index, index)).collect();
        let standard_map: BTreeMap<i32, i32> = (0..size).map(|index| (index, index)).collect();

        // TreeMap erase through cursors
        group.bench_with_input(BenchmarkId::new("TreeMap", size), &keys, |bencher, keys| {
            bencher.iter_batched(
                || tree_map.clone(),
                |mut map| {
                    for key in keys {
                        let position = map.find(key);
                        let _ = black_box(map.erase(position));
                    }
                    black_box(map)
                },
                criterion::BatchSize::LargeInput,
            );
        });

        // Standard BTreeMap remove
        group.bench_with_input(BenchmarkId::new("BTreeMap", size), &keys, |bencher, keys| {
            bencher.iter_batched(
                || standard_map.clone(),
                |mut map| {
                    for key in keys {
                        black_box(map.remove(key));
                    }
                    black_box(map)
                },
                criterion::BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

// =============================================================================
// iteration Benchmark
// =============================================================================

fn benchmark_iteration(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("iteration");

    for size in [100, 1000, 10000] {
        let tree_map: TreeMap<i32, i32> = (0..size).map(|index| (index, index * 2)).collect();
        let standard_map: BTreeMap<i32, i32> = (0..size).map(|index| (index, index * 2)).collect();

        // TreeMap iter
        group.bench_with_input(BenchmarkId::new("TreeMap", size), &size, |bencher, _| {
            bencher.iter(|| {
                let sum: i32 = tree_map.iter().map(|(_, &value)| value).sum();
                black_box(sum)
            });
        });

        // TreeMap cursor walk
        group.bench_with_input(
            BenchmarkId::new("TreeMapCursor", size),
            &size,
            |bencher, _| {
                bencher.iter(|| {
                    let mut sum = 0;
                    let mut cursor = tree_map.const_begin();
                    while let Ok((_, &value)) = cursor.get(&tree_map) {
                        sum += value;
                        if cursor.move_next(&tree_map).is_err() {
                            break;
                        }
                    }
                    black_box(sum)
                });
            },
        );

        // Standard BTreeMap iter
        group.bench_with_input(BenchmarkId::new("BTreeMap", size), &size, |bencher, _| {
            bencher.iter(|| {
                let sum: i32 = standard_map.values().sum();
                black_box(sum)
            });
        });
    }

    group.finish();
}

// =============================================================================
// Criterion Group and Main
// =============================================================================

criterion_group!(
    benches,
    benchmark_insert,
    benchmark_find,
    benchmark_erase,
    benchmark_iteration
);

criterion_main!(benches);
