use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use matching_engine::MatchingEngine;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use types::numeric::{Price, Quantity};
use types::order::{NewOrder, Side};

/// Random flow: even side and type mix, limit prices 90.00-110.00, qty 1-100
fn generate_orders(count: usize, seed: u64) -> Vec<NewOrder> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let side = if rng.gen_bool(0.5) { Side::Buy } else { Side::Sell };
            let quantity = Quantity::new(rng.gen_range(1..=100));
            if rng.gen_bool(0.5) {
                let cents: i64 = rng.gen_range(9_000..=11_000);
                NewOrder::limit(side, Price::from_scaled(cents, 2), quantity)
            } else {
                NewOrder::market(side, quantity)
            }
        })
        .collect()
}

/// Benchmark for submit_order over a pre-generated random flow
fn bench_submit(c: &mut Criterion) {
    let mut group = c.benchmark_group("submit_order");

    for &count in &[1_000usize, 10_000, 100_000] {
        let orders = generate_orders(count, 0);
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("random_flow", count), &orders, |b, orders| {
            b.iter_batched(
                || MatchingEngine::with_capacity(count),
                |mut engine| {
                    for (ts, order) in orders.iter().enumerate() {
                        let _ = black_box(engine.submit_order_at(*order, ts as i64));
                    }
                    engine
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

/// Benchmark for resting and cancelling deep in one level
fn bench_cancel(c: &mut Criterion) {
    let mut group = c.benchmark_group("cancel_order");

    for &depth in &[10usize, 100, 1_000] {
        group.bench_with_input(BenchmarkId::new("level_depth", depth), &depth, |b, &depth| {
            b.iter_batched(
                || {
                    let mut engine = MatchingEngine::with_capacity(depth);
                    let ids: Vec<_> = (0..depth)
                        .filter_map(|_| {
                            let order = NewOrder::limit(Side::Buy, Price::from_u64(100), Quantity::new(1));
                            engine.submit_order_at(order, 0).ok()?.resting_order_id
                        })
                        .collect();
                    (engine, ids)
                },
                |(mut engine, ids)| {
                    // Newest first walks the whole queue each time
                    for id in ids.iter().rev() {
                        black_box(engine.cancel_order(*id));
                    }
                    engine
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_submit, bench_cancel);
criterion_main!(benches);
