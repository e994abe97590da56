//! Running counters kept by the engine

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use types::numeric::Quantity;
use types::trade::Trade;

/// Aggregate engine activity since construction
///
/// Volume and notional saturate rather than overflow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineStats {
    pub orders_accepted: u64,
    pub orders_rejected: u64,
    pub orders_rested: u64,
    pub trades_executed: u64,
    pub volume: Quantity,
    pub notional: Decimal,
    pub cancels: u64,
    pub market_remainders_discarded: u64,
}

impl EngineStats {
    pub fn record_trades(&mut self, trades: &[Trade]) {
        for trade in trades {
            self.trades_executed += 1;
            self.volume = self.volume.saturating_add(trade.quantity);
            self.notional = self
                .notional
                .checked_add(trade.notional())
                .unwrap_or(Decimal::MAX);
        }
    }
}
