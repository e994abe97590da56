//! Trade execution types
//!
//! A trade always prints at the resting (maker) order's price.

use crate::ids::OrderId;
use crate::numeric::{Price, Quantity};
use crate::order::Side;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One execution between an incoming order and a resting order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    pub sequence: u64, // Monotonic per engine

    // Order references
    pub buyer_order_id: OrderId,
    pub seller_order_id: OrderId,

    // Execution details
    pub price: Price,
    pub quantity: Quantity,
    /// Side of the incoming (liquidity-taking) order
    pub aggressor_side: Side,

    pub executed_at: i64, // Unix nanos
}

impl Trade {
    /// Build a trade from the incoming/resting pair
    ///
    /// Buyer and seller are resolved from the aggressor side.
    pub fn new(
        sequence: u64,
        taker_order_id: OrderId,
        maker_order_id: OrderId,
        aggressor_side: Side,
        price: Price,
        quantity: Quantity,
        executed_at: i64,
    ) -> Self {
        let (buyer_order_id, seller_order_id) = match aggressor_side {
            Side::Buy => (taker_order_id, maker_order_id),
            Side::Sell => (maker_order_id, taker_order_id),
        };

        Self {
            sequence,
            buyer_order_id,
            seller_order_id,
            price,
            quantity,
            aggressor_side,
            executed_at,
        }
    }

    /// The incoming order's id
    pub fn taker_order_id(&self) -> OrderId {
        match self.aggressor_side {
            Side::Buy => self.buyer_order_id,
            Side::Sell => self.seller_order_id,
        }
    }

    /// The resting order's id
    pub fn maker_order_id(&self) -> OrderId {
        match self.aggressor_side {
            Side::Buy => self.seller_order_id,
            Side::Sell => self.buyer_order_id,
        }
    }

    /// Calculate trade value (price × quantity)
    pub fn notional(&self) -> Decimal {
        self.quantity.notional(self.price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buy_aggressor_roles() {
        let trade = Trade::new(
            1,
            OrderId::new(4),
            OrderId::new(2),
            Side::Buy,
            Price::from_u64(99),
            Quantity::new(5),
            1708123456789000000,
        );

        assert_eq!(trade.buyer_order_id, OrderId::new(4));
        assert_eq!(trade.seller_order_id, OrderId::new(2));
        assert_eq!(trade.taker_order_id(), OrderId::new(4));
        assert_eq!(trade.maker_order_id(), OrderId::new(2));
    }

    #[test]
    fn test_sell_aggressor_roles() {
        let trade = Trade::new(
            2,
            OrderId::new(3),
            OrderId::new(1),
            Side::Sell,
            Price::from_u64(100),
            Quantity::new(10),
            1708123456789000000,
        );

        assert_eq!(trade.buyer_order_id, OrderId::new(1));
        assert_eq!(trade.seller_order_id, OrderId::new(3));
        assert_eq!(trade.taker_order_id(), OrderId::new(3));
        assert_eq!(trade.maker_order_id(), OrderId::new(1));
    }

    #[test]
    fn test_trade_notional() {
        let trade = Trade::new(
            1,
            OrderId::new(2),
            OrderId::new(1),
            Side::Buy,
            "100.25".parse().unwrap(),
            Quantity::new(4),
            0,
        );

        assert_eq!(trade.notional(), Decimal::from(401));
    }
}
