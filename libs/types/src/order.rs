//! Order lifecycle types
//!
//! An order moves `New -> PartiallyFilled* -> Filled`, or ends early as
//! `Canceled` (resting limit order pulled by the caller) or `Discarded`
//! (market order remainder with no contra liquidity left).

use crate::errors::OrderError;
use crate::ids::{ClientOrderId, OrderId};
use crate::numeric::{Price, Quantity};
use serde::{Deserialize, Serialize};

/// Order side (buyer or seller)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Buy order (bid)
    Buy,
    /// Sell order (ask)
    Sell,
}

/// Order type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderType {
    /// Rests at its price when not fully matched
    Limit,
    /// Takes the best available prices; never rests
    Market,
}

/// Order status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Accepted, nothing executed yet
    New,
    /// Some quantity executed, remainder still live
    PartiallyFilled,
    /// Remaining quantity reached zero (terminal)
    Filled,
    /// Removed from the book by the caller (terminal)
    Canceled,
    /// Market order remainder dropped for lack of liquidity (terminal)
    Discarded,
}

impl OrderStatus {
    /// Check if status is terminal (no further transitions possible)
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderStatus::Filled | OrderStatus::Canceled | OrderStatus::Discarded
        )
    }
}

/// Submission request
///
/// Carries everything the caller decides. Identity and timestamp are
/// assigned by the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrder {
    pub side: Side,
    pub order_type: OrderType,
    /// Required for limit orders, ignored for market orders
    pub price: Option<Price>,
    pub quantity: Quantity,
    #[serde(default)]
    pub client_order_id: ClientOrderId,
}

impl NewOrder {
    /// Limit order request
    pub fn limit(side: Side, price: Price, quantity: Quantity) -> Self {
        Self {
            side,
            order_type: OrderType::Limit,
            price: Some(price),
            quantity,
            client_order_id: ClientOrderId::default(),
        }
    }

    /// Market order request
    pub fn market(side: Side, quantity: Quantity) -> Self {
        Self {
            side,
            order_type: OrderType::Market,
            price: None,
            quantity,
            client_order_id: ClientOrderId::default(),
        }
    }

    /// Attach a caller correlation token
    pub fn with_client_order_id(mut self, client_order_id: ClientOrderId) -> Self {
        self.client_order_id = client_order_id;
        self
    }

    /// Check the request can enter the book
    pub fn validate(&self) -> Result<(), OrderError> {
        if self.quantity.is_zero() {
            return Err(OrderError::InvalidQuantity("quantity must be positive".to_string()));
        }
        if self.order_type == OrderType::Limit && self.price.is_none() {
            return Err(OrderError::MissingLimitPrice);
        }
        Ok(())
    }
}

/// Order record as held in the order pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: OrderId,
    pub client_order_id: ClientOrderId,
    pub side: Side,
    pub order_type: OrderType,
    /// Limit price; `Price::ZERO` placeholder for market orders
    pub price: Price,
    pub original_quantity: Quantity,
    /// Unfilled quantity; the order is filled exactly when this is zero
    pub quantity: Quantity,
    pub filled_quantity: Quantity,
    pub status: OrderStatus,
    pub created_at: i64, // Unix nanos
}

impl Order {
    /// Build the record for an accepted request
    pub fn from_request(order_id: OrderId, request: &NewOrder, created_at: i64) -> Self {
        Self {
            order_id,
            client_order_id: request.client_order_id,
            side: request.side,
            order_type: request.order_type,
            price: request.price.unwrap_or(Price::ZERO),
            original_quantity: request.quantity,
            quantity: request.quantity,
            filled_quantity: Quantity::zero(),
            status: OrderStatus::New,
            created_at,
        }
    }

    /// Check quantity invariant: filled + remaining = original
    pub fn check_invariant(&self) -> bool {
        self.filled_quantity + self.quantity == self.original_quantity
    }

    /// Check if order is completely filled
    pub fn is_filled(&self) -> bool {
        self.quantity.is_zero()
    }

    /// A limit order with quantity left may rest in the book
    pub fn is_resting_candidate(&self) -> bool {
        self.order_type == OrderType::Limit && !self.quantity.is_zero()
    }

    /// Apply an execution of `fill_quantity`
    ///
    /// # Panics
    /// Panics if the fill would exceed the remaining quantity
    pub fn fill(&mut self, fill_quantity: Quantity) {
        self.quantity = self
            .quantity
            .checked_sub(fill_quantity)
            .expect("Fill would exceed order quantity");
        self.filled_quantity += fill_quantity;

        self.status = if self.is_filled() {
            OrderStatus::Filled
        } else if !self.filled_quantity.is_zero() {
            OrderStatus::PartiallyFilled
        } else {
            self.status
        };

        debug_assert!(self.check_invariant(), "Invariant violated after fill");
    }

    /// Mark a resting order as canceled
    ///
    /// # Panics
    /// Panics if order is already in terminal state
    pub fn cancel(&mut self) {
        assert!(!self.status.is_terminal(), "Cannot cancel terminal order");
        self.status = OrderStatus::Canceled;
    }

    /// Mark an unfilled market remainder as dropped
    pub fn discard(&mut self) {
        debug_assert_eq!(self.order_type, OrderType::Market);
        self.status = OrderStatus::Discarded;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limit_order(qty: u64) -> Order {
        let request = NewOrder::limit(Side::Buy, Price::from_u64(100), Quantity::new(qty));
        Order::from_request(OrderId::FIRST, &request, 1708123456789000000)
    }

    #[test]
    fn test_order_creation() {
        let order = limit_order(10);

        assert_eq!(order.status, OrderStatus::New);
        assert!(order.check_invariant());
        assert!(order.is_resting_candidate());
        assert!(!order.is_filled());
    }

    #[test]
    fn test_order_fill() {
        let mut order = limit_order(10);

        // Partial fill
        order.fill(Quantity::new(3));
        assert_eq!(order.status, OrderStatus::PartiallyFilled);
        assert_eq!(order.quantity, Quantity::new(7));
        assert!(order.check_invariant());

        // Complete fill
        order.fill(Quantity::new(7));
        assert_eq!(order.status, OrderStatus::Filled);
        assert!(order.is_filled());
        assert!(!order.is_resting_candidate());
        assert!(order.check_invariant());
    }

    #[test]
    #[should_panic(expected = "Fill would exceed order quantity")]
    fn test_order_overfill_panics() {
        let mut order = limit_order(10);
        order.fill(Quantity::new(11));
    }

    #[test]
    fn test_order_cancel() {
        let mut order = limit_order(10);
        order.cancel();
        assert_eq!(order.status, OrderStatus::Canceled);
        assert!(order.status.is_terminal());
    }

    #[test]
    #[should_panic(expected = "Cannot cancel terminal order")]
    fn test_cancel_terminal_panics() {
        let mut order = limit_order(10);
        order.fill(Quantity::new(10));
        order.cancel();
    }

    #[test]
    fn test_market_order_never_rests() {
        let request = NewOrder::market(Side::Sell, Quantity::new(5));
        let mut order = Order::from_request(OrderId::new(9), &request, 0);

        assert!(!order.is_resting_candidate());
        assert_eq!(order.price, Price::ZERO);

        order.discard();
        assert_eq!(order.status, OrderStatus::Discarded);
        assert!(order.status.is_terminal());
    }

    #[test]
    fn test_request_validation() {
        let zero = NewOrder::limit(Side::Buy, Price::from_u64(100), Quantity::zero());
        assert!(matches!(zero.validate(), Err(OrderError::InvalidQuantity(_))));

        let mut no_price = NewOrder::limit(Side::Buy, Price::from_u64(100), Quantity::new(1));
        no_price.price = None;
        assert_eq!(no_price.validate(), Err(OrderError::MissingLimitPrice));

        assert!(NewOrder::market(Side::Buy, Quantity::new(1)).validate().is_ok());
    }

    #[test]
    fn test_client_order_id_passthrough() {
        let request = NewOrder::limit(Side::Sell, Price::from_u64(101), Quantity::new(5))
            .with_client_order_id(ClientOrderId::new(777));
        let order = Order::from_request(OrderId::new(3), &request, 0);
        assert_eq!(order.client_order_id, ClientOrderId::new(777));
    }

    #[test]
    fn test_order_serialization() {
        let request = NewOrder::limit(Side::Sell, "3000.50".parse().unwrap(), Quantity::new(2));
        let order = Order::from_request(OrderId::new(5), &request, 1708123456789000000);

        let json = serde_json::to_string(&order).unwrap();
        let deserialized: Order = serde_json::from_str(&json).unwrap();

        assert_eq!(order, deserialized);
        assert!(json.contains("\"SELL\""));
    }
}
