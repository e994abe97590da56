//! Throughput benchmark driver
//!
//! Usage: `throughput [ORDER_COUNT] [SEED]`. Log level via `RUST_LOG`.

use std::process::ExitCode;

use matching_engine::{EngineConfig, MatchingEngine};
use simulation::flow::{OrderFlowConfig, OrderFlowGenerator};
use simulation::runner::run_batch;
use simulation::scripted::walkthrough;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_ORDER_COUNT: usize = 2_500_000;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let order_count = match args.next().map(|arg| arg.parse::<usize>()) {
        None => DEFAULT_ORDER_COUNT,
        Some(Ok(count)) => count,
        Some(Err(err)) => {
            error!(error = %err, "Invalid order count");
            return ExitCode::FAILURE;
        }
    };
    let seed = match args.next().map(|arg| arg.parse::<u64>()) {
        None => 0,
        Some(Ok(seed)) => seed,
        Some(Err(err)) => {
            error!(error = %err, "Invalid seed");
            return ExitCode::FAILURE;
        }
    };

    match walkthrough() {
        Ok(run) => {
            for step in &run.steps {
                info!(step = step.description, trades = step.result.trades.len(), "Walkthrough");
            }
            println!("{}", run.final_book);
        }
        Err(err) => {
            error!(error = %err, "Walkthrough failed");
            return ExitCode::FAILURE;
        }
    }

    let flow = OrderFlowConfig { seed, ..Default::default() };
    let orders = OrderFlowGenerator::new(flow).generate(order_count);
    info!(orders = orders.len(), seed, "Order flow generated");

    let mut engine = match MatchingEngine::new(EngineConfig::with_pool_capacity(order_count.max(1))) {
        Ok(engine) => engine,
        Err(err) => {
            error!(error = %err, "Invalid engine configuration");
            return ExitCode::FAILURE;
        }
    };
    let metrics = run_batch(&mut engine, &orders);

    info!(
        best_bid = ?engine.best_bid(),
        best_ask = ?engine.best_ask(),
        resting = engine.resting_order_count(),
        "Final book"
    );
    println!("{}", metrics.summary());
    ExitCode::SUCCESS
}
