//! Trade execution logic
//!
//! Turns one incoming/resting fill into a `Trade` and owns the trade
//! sequence counter.

use types::ids::OrderId;
use types::numeric::{Price, Quantity};
use types::order::Side;
use types::trade::Trade;

/// Match executor for handling trade generation
#[derive(Debug, Clone)]
pub struct MatchExecutor {
    sequence_counter: u64,
}

impl MatchExecutor {
    /// Create a new match executor with starting sequence number
    pub fn new(starting_sequence: u64) -> Self {
        Self {
            sequence_counter: starting_sequence,
        }
    }

    /// Get next sequence number (monotonically increasing)
    fn next_sequence(&mut self) -> u64 {
        let seq = self.sequence_counter;
        self.sequence_counter += 1;
        seq
    }

    /// Sequence the next trade will carry
    pub fn peek_sequence(&self) -> u64 {
        self.sequence_counter
    }

    /// Execute a trade between the incoming (taker) and resting (maker) order
    ///
    /// `price` is the resting order's level price.
    ///
    /// # Panics
    /// Panics on a zero quantity; the matcher never produces one
    pub fn execute_trade(
        &mut self,
        taker_order_id: OrderId,
        maker_order_id: OrderId,
        taker_side: Side,
        price: Price,
        quantity: Quantity,
        timestamp: i64,
    ) -> Trade {
        assert!(!quantity.is_zero(), "Trade quantity must be positive");

        let sequence = self.next_sequence();
        Trade::new(
            sequence,
            taker_order_id,
            maker_order_id,
            taker_side,
            price,
            quantity,
            timestamp,
        )
    }
}
