//! Fixed walkthrough of the basic book behaviours
//!
//! Resting, a non-crossing order, a partial fill that rests its remainder,
//! and a sweep across two levels.

use matching_engine::{MatchingEngine, SubmitResult};
use tracing::info;
use types::errors::EngineError;
use types::numeric::{Price, Quantity};
use types::order::{NewOrder, Side};

/// One submitted step and what the engine returned for it.
#[derive(Debug, Clone)]
pub struct Step {
    pub description: &'static str,
    pub request: NewOrder,
    pub result: SubmitResult,
}

/// Outcome of the walkthrough.
#[derive(Debug, Clone)]
pub struct Walkthrough {
    pub steps: Vec<Step>,
    /// Book rendering after the final step
    pub final_book: String,
}

/// The scripted orders, in submission order.
pub fn script() -> Vec<(&'static str, NewOrder)> {
    vec![
        ("Buy 10 @ 100", limit(Side::Buy, 100, 10)),
        ("Sell 5 @ 101", limit(Side::Sell, 101, 5)),
        ("Sell 15 @ 99", limit(Side::Sell, 99, 15)),
        ("Buy 100 @ 105", limit(Side::Buy, 105, 100)),
    ]
}

/// Run the script against a fresh engine.
pub fn walkthrough() -> Result<Walkthrough, EngineError> {
    let mut engine = MatchingEngine::with_capacity(16);
    let mut steps = Vec::new();

    for (description, request) in script() {
        let result = engine.submit_order(request)?;
        info!(
            step = description,
            order_id = %result.order_id,
            trades = result.trades.len(),
            resting = result.is_resting(),
            "Scripted order submitted"
        );
        steps.push(Step { description, request, result });
    }

    Ok(Walkthrough { steps, final_book: engine.render() })
}

fn limit(side: Side, price: u64, qty: u64) -> NewOrder {
    NewOrder::limit(side, Price::from_u64(price), Quantity::new(qty))
}
