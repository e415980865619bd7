//! Criterion benchmarks for the placement strategies.
//!
//! Uses synthetic instances with deterministic preferences to compare the
//! loop cost of both strategies at growing scale.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use u_placement::compare::run_both;
use u_placement::round::{PlacementConfig, PlacementRunner};
use u_placement::store::{Candidate, EntityStore, Slot};
use u_placement::strategy::{Greedy, Heuristic};

// ===========================================================================
// Synthetic instance: `n` candidates, `n / 4` slots, capacity for everyone
// ===========================================================================

fn instance(n: usize) -> EntityStore {
    let slot_count = (n / 4).max(1);
    let capacity = n.div_ceil(slot_count);
    let candidates = (0..n)
        .map(|i| {
            let prefs = (0..5).map(|k| format!("F{}", (i * 31 + k * 7) % slot_count));
            let priority = (i * 37 % 400) as f64 / 100.0;
            Candidate::new(format!("S{i}"), prefs, priority)
        })
        .collect();
    let slots = (0..slot_count)
        .map(|i| Slot::new(format!("F{i}"), capacity))
        .collect();
    EntityStore::new(candidates, slots).expect("synthetic ids are unique")
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_greedy(c: &mut Criterion) {
    let mut group = c.benchmark_group("greedy");
    group.sample_size(10);

    for &n in &[50, 200, 1000] {
        let store = instance(n);
        let config = PlacementConfig::default().with_seed(42);
        group.bench_with_input(
            BenchmarkId::from_parameter(n),
            &(store, config),
            |b, (s, c)| {
                b.iter(|| {
                    let result = PlacementRunner::run(&Greedy, black_box(s), black_box(c));
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

fn bench_heuristic(c: &mut Criterion) {
    let mut group = c.benchmark_group("heuristic");
    group.sample_size(10);

    for &n in &[50, 200, 1000] {
        let store = instance(n);
        let config = PlacementConfig::default().with_seed(42);
        group.bench_with_input(
            BenchmarkId::from_parameter(n),
            &(store, config),
            |b, (s, c)| {
                b.iter(|| {
                    let result = PlacementRunner::run(&Heuristic, black_box(s), black_box(c));
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

fn bench_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("compare");
    group.sample_size(10);

    let store = instance(500);
    let config = PlacementConfig::default().with_seed(7);
    group.bench_function("n500", |b| {
        b.iter(|| black_box(run_both(black_box(&store), black_box(&config))))
    });
    group.finish();
}

criterion_group!(benches, bench_greedy, bench_heuristic, bench_compare);
criterion_main!(benches);
