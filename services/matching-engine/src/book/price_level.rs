//! Price level implementation with FIFO queue
//!
//! A price level contains all resting orders at one exact price on one side.
//! Orders are kept in arrival order to enforce time priority: the front of
//! the queue is always matched first.

use std::collections::VecDeque;
use types::numeric::Quantity;

use crate::pool::OrderHandle;

/// A price level containing orders at a specific price
///
/// Holds pool handles, not order records. The aggregate quantity is kept
/// in step by the caller as orders fill or leave. It is held as `u128` so
/// that many near-`u64::MAX` orders at one price cannot overflow it.
#[derive(Debug, Clone)]
pub struct PriceLevel {
    /// Queue of orders at this price level (FIFO order)
    orders: VecDeque<OrderHandle>,
    /// Total remaining quantity at this level, in units
    total_units: u128,
}

impl PriceLevel {
    /// Create a new empty price level
    pub fn new() -> Self {
        Self {
            orders: VecDeque::new(),
            total_units: 0,
        }
    }

    /// Append an order at the back of the queue (time priority)
    pub fn push_back(&mut self, handle: OrderHandle, quantity: Quantity) {
        self.orders.push_back(handle);
        self.total_units += u128::from(quantity.as_u64());
    }

    /// Oldest order at this level
    pub fn front(&self) -> Option<OrderHandle> {
        self.orders.front().copied()
    }

    /// Remove the oldest order, whose remaining quantity is already
    /// accounted for via `reduce_total`
    pub fn pop_front(&mut self) -> Option<OrderHandle> {
        self.orders.pop_front()
    }

    /// Remove an order anywhere in the queue
    ///
    /// Linear in level depth. `remaining` is the order's unfilled quantity.
    /// Returns false if the handle is not queued here.
    pub fn remove(&mut self, handle: OrderHandle, remaining: Quantity) -> bool {
        match self.orders.iter().position(|queued| *queued == handle) {
            Some(position) => {
                self.orders.remove(position);
                self.reduce_total(remaining);
                true
            }
            None => false,
        }
    }

    /// Account for quantity executed against an order at this level
    pub fn reduce_total(&mut self, quantity: Quantity) {
        self.total_units = self.total_units.saturating_sub(u128::from(quantity.as_u64()));
    }

    /// Check if the price level is empty
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Get the total quantity at this price level, capped at `u64::MAX`
    pub fn total_quantity(&self) -> Quantity {
        Quantity::new(u64::try_from(self.total_units).unwrap_or(u64::MAX))
    }

    /// Exact total remaining units at this level
    pub fn total_units(&self) -> u128 {
        self.total_units
    }

    /// Get the number of orders at this level
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    /// Handles in time priority order
    pub fn iter(&self) -> impl Iterator<Item = OrderHandle> + '_ {
        self.orders.iter().copied()
    }
}

impl Default for PriceLevel {
    fn default() -> Self {
        Self::new()
    }
}
