// ============================================================================
// Matching Engine Benchmarks
// ============================================================================
//
// Benchmark Categories:
// 1. Book Operations - Resting order insertion and cancellation
// 2. Full Matching - End-to-end sweeps through populated books
// ============================================================================

use cda_engine::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;

fn populated_engine(tradable: &Tradable, depth: u64) -> MatchingEngine {
    let mut engine = MatchingEngineBuilder::new("BENCH")
        .with_tradable(tradable.clone())
        .with_reference_price(1_000)
        .build(Arc::new(NoOpEventHandler))
        .unwrap();

    for i in 0..depth {
        let ask = Order::limit_ask("maker", tradable.clone(), 1_001 + i, 10, i).unwrap();
        engine.find_match(ask).unwrap();
        let bid = Order::limit_bid("maker", tradable.clone(), 1_000 - i, 10, depth + i).unwrap();
        engine.find_match(bid).unwrap();
    }
    engine
}

// ============================================================================
// Book Operation Benchmarks
// ============================================================================

fn benchmark_rest_and_cancel(c: &mut Criterion) {
    let mut group = c.benchmark_group("rest_and_cancel");

    for depth in [10u64, 100, 1_000].iter() {
        let tradable = Tradable::new("BENCH");

        group.bench_with_input(BenchmarkId::new("rest", depth), depth, |b, &depth| {
            b.iter_batched(
                || populated_engine(&tradable, depth),
                |mut engine| {
                    // Deep out-of-the-money bid: rests without matching
                    let order =
                        Order::limit_bid("taker", tradable.clone(), 1, 10, 10 * depth).unwrap();
                    black_box(engine.find_match(order).unwrap());
                },
                criterion::BatchSize::SmallInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("cancel", depth), depth, |b, &depth| {
            b.iter_batched(
                || {
                    let mut engine = populated_engine(&tradable, depth);
                    let order =
                        Order::limit_bid("taker", tradable.clone(), 1, 10, 10 * depth).unwrap();
                    engine.find_match(order.clone()).unwrap();
                    (engine, order)
                },
                |(mut engine, order)| {
                    black_box(engine.cancel(&order));
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

// ============================================================================
// Full Matching Benchmarks
// ============================================================================

fn benchmark_matching_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("matching_sweep");

    for levels in [1u64, 10, 100].iter() {
        let tradable = Tradable::new("BENCH");

        group.bench_with_input(
            BenchmarkId::new("sweep_levels", levels),
            levels,
            |b, &levels| {
                b.iter_batched(
                    || populated_engine(&tradable, levels.max(10)),
                    |mut engine| {
                        // Crosses `levels` asks and consumes each in full
                        let order = Order::market_bid(
                            "taker",
                            tradable.clone(),
                            10 * levels,
                            u64::MAX,
                        )
                        .unwrap();
                        black_box(engine.find_match(order).unwrap());
                    },
                    criterion::BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

criterion_group!(benches, benchmark_rest_and_cancel, benchmark_matching_sweep);
criterion_main!(benches);
