//! Ask (sell-side) order book
//!
//! Maintains resting sell orders sorted by price ascending (best ask first).
//! Uses BTreeMap for deterministic iteration order.

use std::collections::BTreeMap;
use types::numeric::{Price, Quantity};

use super::price_level::PriceLevel;
use crate::pool::OrderHandle;

/// Ask (sell) side order book
///
/// Orders are sorted by price ascending, so the lowest ask is first.
/// At each price level, orders are maintained in FIFO order.
#[derive(Debug, Clone)]
pub struct AskBook {
    /// Price levels sorted ascending (lowest price first)
    levels: BTreeMap<Price, PriceLevel>,
}

impl AskBook {
    /// Create a new empty ask book
    pub fn new() -> Self {
        Self {
            levels: BTreeMap::new(),
        }
    }

    /// Append an order to the back of its price level
    pub fn insert(&mut self, price: Price, handle: OrderHandle, quantity: Quantity) {
        self.levels
            .entry(price)
            .or_insert_with(PriceLevel::new)
            .push_back(handle, quantity);
    }

    /// Remove an order from the ask book
    ///
    /// Returns true if the order was found and removed. An emptied level
    /// is dropped.
    pub fn remove(&mut self, handle: OrderHandle, price: Price, remaining: Quantity) -> bool {
        if let Some(level) = self.levels.get_mut(&price) {
            if level.remove(handle, remaining) {
                if level.is_empty() {
                    self.levels.remove(&price);
                }
                return true;
            }
        }
        false
    }

    /// Get the best ask (lowest price) with its aggregate quantity
    pub fn best_ask(&self) -> Option<(Price, Quantity)> {
        self.levels
            .iter()
            .next()
            .map(|(price, level)| (*price, level.total_quantity()))
    }

    /// Get the best ask price
    pub fn best_ask_price(&self) -> Option<Price> {
        self.levels.keys().next().copied()
    }

    /// Get mutable reference to the best ask level
    pub(crate) fn best_ask_level_mut(&mut self) -> Option<(Price, &mut PriceLevel)> {
        self.levels
            .iter_mut()
            .next()
            .map(|(price, level)| (*price, level))
    }

    /// Drop a price level outright
    pub(crate) fn remove_level(&mut self, price: Price) -> Option<PriceLevel> {
        self.levels.remove(&price)
    }

    /// Get depth snapshot (top N price levels)
    pub fn depth_snapshot(&self, depth: usize) -> Vec<(Price, Quantity)> {
        self.levels()
            .take(depth)
            .map(|(price, level)| (price, level.total_quantity()))
            .collect()
    }

    /// Levels best-first (lowest price first)
    pub fn levels(&self) -> impl Iterator<Item = (Price, &PriceLevel)> + '_ {
        self.levels.iter().map(|(price, level)| (*price, level))
    }

    /// Check if the ask book is empty
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Get the total number of price levels
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Get the total number of resting orders
    pub fn order_count(&self) -> usize {
        self.levels.values().map(PriceLevel::order_count).sum()
    }
}

impl Default for AskBook {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::OrderPool;
    use types::ids::OrderId;
    use types::order::{NewOrder, Order, Side};

    fn insert_order(book: &mut AskBook, pool: &mut OrderPool, price: &str, qty: u64) -> OrderHandle {
        let price: Price = price.parse().unwrap();
        let request = NewOrder::limit(Side::Sell, price, Quantity::new(qty));
        let id = OrderId::new(pool.in_use() as u64 + 1);
        let handle = pool.acquire(Order::from_request(id, &request, 0)).unwrap();
        book.insert(price, handle, Quantity::new(qty));
        handle
    }

    #[test]
    fn test_ask_book_insert() {
        let mut pool = OrderPool::new(4);
        let mut book = AskBook::new();

        insert_order(&mut book, &mut pool, "101", 5);

        assert_eq!(book.level_count(), 1);
        assert!(!book.is_empty());
    }

    #[test]
    fn test_ask_book_best_ask() {
        let mut pool = OrderPool::new(4);
        let mut book = AskBook::new();

        insert_order(&mut book, &mut pool, "100", 10);
        insert_order(&mut book, &mut pool, "101", 20); // Higher price
        insert_order(&mut book, &mut pool, "99.5", 15); // Lower price (best ask)

        let (best_price, best_qty) = book.best_ask().unwrap();
        assert_eq!(best_price, "99.5".parse().unwrap()); // Lowest price
        assert_eq!(best_qty, Quantity::new(15));
    }

    #[test]
    fn test_ask_book_remove() {
        let mut pool = OrderPool::new(4);
        let mut book = AskBook::new();
        let handle = insert_order(&mut book, &mut pool, "100", 10);

        assert!(book.remove(handle, Price::from_u64(100), Quantity::new(10)));
        assert!(book.is_empty());
    }

    #[test]
    fn test_ask_book_depth_snapshot() {
        let mut pool = OrderPool::new(4);
        let mut book = AskBook::new();

        insert_order(&mut book, &mut pool, "100", 10);
        insert_order(&mut book, &mut pool, "101", 20);
        insert_order(&mut book, &mut pool, "99", 15);
        insert_order(&mut book, &mut pool, "102", 5);

        let depth = book.depth_snapshot(2);

        // Should return top 2 levels (lowest prices first)
        assert_eq!(depth.len(), 2);
        assert_eq!(depth[0].0, Price::from_u64(99));
        assert_eq!(depth[1].0, Price::from_u64(100));
    }

    #[test]
    fn test_ask_book_decimal_scale_shares_level() {
        let mut pool = OrderPool::new(4);
        let mut book = AskBook::new();

        insert_order(&mut book, &mut pool, "100.10", 1);
        insert_order(&mut book, &mut pool, "100.1", 2);

        assert_eq!(book.level_count(), 1);
        assert_eq!(book.order_count(), 2);
        assert_eq!(book.best_ask(), Some(("100.1".parse().unwrap(), Quantity::new(3))));
    }
}
