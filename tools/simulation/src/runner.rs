//! Batch submission with timing
//!
//! Feeds a pre-generated batch through the engine. Pool exhaustion is
//! counted as a rejected order rather than aborting the run.

use std::time::Instant;

use matching_engine::MatchingEngine;
use tracing::{info, warn};
use types::order::NewOrder;

use crate::metrics::RunMetrics;

/// Submit every order, timing the batch as a whole.
pub fn run_batch(engine: &mut MatchingEngine, orders: &[NewOrder]) -> RunMetrics {
    let mut metrics = RunMetrics::new();
    info!(orders = orders.len(), "Starting batch run");

    let start = Instant::now();
    for order in orders {
        submit_one(engine, *order, &mut metrics);
    }
    metrics.set_elapsed(start.elapsed().as_nanos() as u64);
    metrics.update_book_depth(engine.resting_order_count());

    log_completion(&metrics);
    metrics
}

/// Submit every order, timing each submission into the latency histogram.
///
/// Slower than `run_batch` because of the per-order clock reads.
pub fn run_with_latency(engine: &mut MatchingEngine, orders: &[NewOrder]) -> RunMetrics {
    let mut metrics = RunMetrics::new();
    info!(orders = orders.len(), "Starting latency run");

    let start = Instant::now();
    for order in orders {
        let submitted = Instant::now();
        submit_one(engine, *order, &mut metrics);
        metrics.record_latency(submitted.elapsed().as_nanos() as u64);
        metrics.update_book_depth(engine.resting_order_count());
    }
    metrics.set_elapsed(start.elapsed().as_nanos() as u64);

    log_completion(&metrics);
    metrics
}

fn submit_one(engine: &mut MatchingEngine, order: NewOrder, metrics: &mut RunMetrics) {
    match engine.submit_order(order) {
        Ok(result) => metrics.record_result(&result),
        Err(err) => {
            if metrics.rejected == 0 {
                warn!(error = %err, "First rejected submission");
            }
            metrics.record_rejection(err.is_pool_exhausted());
        }
    }
}

fn log_completion(metrics: &RunMetrics) {
    info!(
        orders = metrics.total_orders,
        trades = metrics.total_trades,
        rejected = metrics.rejected,
        elapsed_ms = metrics.elapsed_ns / 1_000_000,
        orders_per_sec = metrics.orders_per_second() as u64,
        "Run complete"
    );
}
