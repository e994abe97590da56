//! Matching engine core
//!
//! Single-instrument order book: owns both side books, the order pool, the
//! order-id index and the trade executor. All calls are synchronous and
//! expect a single writer; wrap the engine in a lock to share it.

use std::collections::HashMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};
use types::errors::EngineError;
use types::ids::OrderId;
use types::numeric::{Price, Quantity};
use types::order::{NewOrder, Order, OrderStatus, OrderType, Side};
use types::time::now_nanos;
use types::trade::Trade;

use crate::book::{AskBook, BidBook, PriceLevel};
use crate::config::{ConfigError, EngineConfig};
use crate::matching::{crossing, MatchExecutor};
use crate::pool::{OrderHandle, OrderPool};
use crate::stats::EngineStats;

/// Main matching engine
pub struct MatchingEngine {
    bids: BidBook,
    asks: AskBook,
    /// Resting orders by id, for cancellation
    order_index: HashMap<OrderId, OrderHandle>,
    /// Storage for every live order record
    pool: OrderPool,
    /// Trade executor with sequence generation
    executor: MatchExecutor,
    next_order_id: OrderId,
    stats: EngineStats,
}

/// Result of submitting an order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitResult {
    /// Id assigned to the submitted order
    pub order_id: OrderId,
    /// Executions in match order
    pub trades: Vec<Trade>,
    /// Set when a limit remainder was added to the book
    pub resting_order_id: Option<OrderId>,
    pub status: OrderStatus,
    /// Unfilled quantity (resting, or discarded for market orders)
    pub remaining: Quantity,
}

impl SubmitResult {
    /// Total quantity executed by this submission
    pub fn filled_quantity(&self) -> Quantity {
        self.trades.iter().map(|trade| trade.quantity).sum()
    }

    pub fn is_resting(&self) -> bool {
        self.resting_order_id.is_some()
    }
}

/// Order book snapshot for market data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBookSnapshot {
    /// Bid levels, best first
    pub bids: Vec<(Price, Quantity)>,
    /// Ask levels, best first
    pub asks: Vec<(Price, Quantity)>,
}

impl MatchingEngine {
    /// Validate the config and create an engine, preallocating the order pool
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    /// Create an engine with default settings and a specific pool size
    ///
    /// # Panics
    /// Panics if `pool_capacity` does not fit a `u32` slot index
    pub fn with_capacity(pool_capacity: usize) -> Self {
        Self::build(EngineConfig::with_pool_capacity(pool_capacity))
    }

    fn build(config: EngineConfig) -> Self {
        info!(
            pool_capacity = config.pool_capacity,
            starting_trade_sequence = config.starting_trade_sequence,
            "MatchingEngine initialized"
        );

        Self {
            bids: BidBook::new(),
            asks: AskBook::new(),
            order_index: HashMap::with_capacity(config.pool_capacity),
            pool: OrderPool::new(config.pool_capacity),
            executor: MatchExecutor::new(config.starting_trade_sequence),
            next_order_id: OrderId::FIRST,
            stats: EngineStats::default(),
        }
    }

    /// Submit an order stamped with the current time
    pub fn submit_order(&mut self, request: NewOrder) -> Result<SubmitResult, EngineError> {
        self.submit_order_at(request, now_nanos())
    }

    /// Submit an order with an explicit timestamp (Unix nanos)
    ///
    /// Storage is acquired before matching, so a full pool rejects the
    /// order without touching the book. Trades are final once returned.
    pub fn submit_order_at(
        &mut self,
        request: NewOrder,
        timestamp: i64,
    ) -> Result<SubmitResult, EngineError> {
        if let Err(err) = request.validate() {
            self.stats.orders_rejected += 1;
            warn!(error = %err, side = ?request.side, "Order rejected");
            return Err(err.into());
        }

        let order_id = self.next_order_id;
        let mut order = Order::from_request(order_id, &request, timestamp);
        let handle = match self.pool.acquire(order) {
            Ok(handle) => handle,
            Err(err) => {
                self.stats.orders_rejected += 1;
                warn!(
                    order_id = %order_id,
                    capacity = self.pool.capacity(),
                    "Order pool exhausted, order rejected"
                );
                return Err(err.into());
            }
        };
        self.next_order_id = order_id.next();
        self.stats.orders_accepted += 1;

        let trades = match order.side {
            Side::Buy => self.match_against_asks(&mut order, timestamp),
            Side::Sell => self.match_against_bids(&mut order, timestamp),
        };
        self.stats.record_trades(&trades);

        let resting_order_id = if order.is_resting_candidate() {
            self.rest(handle, order);
            Some(order_id)
        } else {
            if !order.is_filled() {
                order.discard();
                self.stats.market_remainders_discarded += 1;
                debug!(
                    order_id = %order_id,
                    discarded = %order.quantity,
                    "Market order remainder discarded"
                );
            }
            if let Err(err) = self.pool.release(handle) {
                error!(order_id = %order_id, error = %err, "Failed to release incoming order");
            }
            None
        };

        Ok(SubmitResult {
            order_id,
            trades,
            resting_order_id,
            status: order.status,
            remaining: order.quantity,
        })
    }

    /// Add a limit remainder to its side and the id index
    fn rest(&mut self, handle: OrderHandle, order: Order) {
        debug_assert_eq!(order.order_type, OrderType::Limit, "Market orders never rest");

        match self.pool.get_mut(handle) {
            Some(slot) => *slot = order,
            None => {
                error!(order_id = %order.order_id, "Incoming order handle went stale before resting");
                return;
            }
        }

        match order.side {
            Side::Buy => self.bids.insert(order.price, handle, order.quantity),
            Side::Sell => self.asks.insert(order.price, handle, order.quantity),
        }
        self.order_index.insert(order.order_id, handle);
        self.stats.orders_rested += 1;

        debug!(
            order_id = %order.order_id,
            side = ?order.side,
            price = %order.price,
            quantity = %order.quantity,
            "Order resting"
        );
    }

    /// Match incoming buy order against asks, best (lowest) price first
    fn match_against_asks(&mut self, order: &mut Order, timestamp: i64) -> Vec<Trade> {
        let mut trades = Vec::new();

        while !order.is_filled() {
            let Some((ask_price, ask_level)) = self.asks.best_ask_level_mut() else {
                break;
            };
            if !crossing::incoming_can_match(order.side, order.order_type, order.price, ask_price) {
                break;
            }

            match_level(
                ask_level,
                ask_price,
                order,
                &mut self.pool,
                &mut self.order_index,
                &mut self.executor,
                &mut trades,
                timestamp,
            );

            let drained = ask_level.is_empty();
            if drained {
                self.asks.remove_level(ask_price);
            }
        }

        trades
    }

    /// Match incoming sell order against bids, best (highest) price first
    fn match_against_bids(&mut self, order: &mut Order, timestamp: i64) -> Vec<Trade> {
        let mut trades = Vec::new();

        while !order.is_filled() {
            let Some((bid_price, bid_level)) = self.bids.best_bid_level_mut() else {
                break;
            };
            if !crossing::incoming_can_match(order.side, order.order_type, order.price, bid_price) {
                break;
            }

            match_level(
                bid_level,
                bid_price,
                order,
                &mut self.pool,
                &mut self.order_index,
                &mut self.executor,
                &mut trades,
                timestamp,
            );

            let drained = bid_level.is_empty();
            if drained {
                self.bids.remove_level(bid_price);
            }
        }

        trades
    }

    /// Cancel a resting order
    ///
    /// Returns false for unknown, filled or already-canceled ids.
    pub fn cancel_order(&mut self, order_id: OrderId) -> bool {
        self.remove_order(order_id).is_some()
    }

    /// Cancel a resting order and hand back its final record
    pub fn remove_order(&mut self, order_id: OrderId) -> Option<Order> {
        let handle = self.order_index.remove(&order_id)?;

        let Some(order) = self.pool.get(handle).copied() else {
            error!(order_id = %order_id, "Indexed order has a stale handle");
            return None;
        };

        let unlinked = match order.side {
            Side::Buy => self.bids.remove(handle, order.price, order.quantity),
            Side::Sell => self.asks.remove(handle, order.price, order.quantity),
        };
        if !unlinked {
            error!(order_id = %order_id, price = %order.price, "Indexed order missing from its price level");
        }

        let mut canceled = match self.pool.release(handle) {
            Ok(order) => order,
            Err(err) => {
                error!(order_id = %order_id, error = %err, "Failed to release canceled order");
                return None;
            }
        };
        canceled.cancel();
        self.stats.cancels += 1;

        debug!(
            order_id = %order_id,
            side = ?canceled.side,
            price = %canceled.price,
            unfilled = %canceled.quantity,
            "Order canceled"
        );

        Some(canceled)
    }

    /// Highest resting bid price, if any
    pub fn best_bid(&self) -> Option<Price> {
        self.bids.best_bid_price()
    }

    /// Lowest resting ask price, if any
    pub fn best_ask(&self) -> Option<Price> {
        self.asks.best_ask_price()
    }

    /// Best ask minus best bid, when both sides are present
    pub fn spread(&self) -> Option<Decimal> {
        Some(self.best_ask()?.as_decimal() - self.best_bid()?.as_decimal())
    }

    /// Midpoint of the best bid and ask, when both sides are present
    pub fn mid_price(&self) -> Option<Decimal> {
        let bid = self.best_bid()?.as_decimal();
        let ask = self.best_ask()?.as_decimal();
        Some((bid + ask) / Decimal::TWO)
    }

    /// Look up a resting order
    pub fn order(&self, order_id: OrderId) -> Option<&Order> {
        let handle = self.order_index.get(&order_id)?;
        self.pool.get(*handle)
    }

    /// Get order book snapshot (top `depth` levels per side)
    pub fn depth_snapshot(&self, depth: usize) -> OrderBookSnapshot {
        OrderBookSnapshot {
            bids: self.bids.depth_snapshot(depth),
            asks: self.asks.depth_snapshot(depth),
        }
    }

    /// Diagnostic dump of every level and its orders
    pub fn render(&self) -> String {
        self.to_string()
    }

    pub fn resting_order_count(&self) -> usize {
        self.order_index.len()
    }

    pub fn bid_level_count(&self) -> usize {
        self.bids.level_count()
    }

    pub fn ask_level_count(&self) -> usize {
        self.asks.level_count()
    }

    /// Free order slots
    pub fn pool_available(&self) -> usize {
        self.pool.available()
    }

    pub fn pool_capacity(&self) -> usize {
        self.pool.capacity()
    }

    pub fn stats(&self) -> &EngineStats {
        &self.stats
    }

    /// Verify the book's structural invariants
    ///
    /// Every queued order resolves, is indexed under its own id, sits on
    /// its own side and price with positive quantity, levels are non-empty
    /// with matching totals and FIFO ids, the book is not crossed, and the
    /// pool holds exactly the resting orders.
    pub fn check_invariants(&self) -> bool {
        let mut queued = 0;

        for (price, level) in self.bids.levels() {
            if !self.check_level(Side::Buy, price, level, &mut queued) {
                return false;
            }
        }
        for (price, level) in self.asks.levels() {
            if !self.check_level(Side::Sell, price, level, &mut queued) {
                return false;
            }
        }

        let uncrossed = match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => bid < ask,
            _ => true,
        };

        uncrossed && queued == self.order_index.len() && self.pool.in_use() == queued
    }

    fn check_level(&self, side: Side, price: Price, level: &PriceLevel, queued: &mut usize) -> bool {
        if level.is_empty() {
            return false;
        }

        let mut total: u128 = 0;
        let mut previous: Option<OrderId> = None;

        for handle in level.iter() {
            let Some(order) = self.pool.get(handle) else {
                return false;
            };
            let indexed = self.order_index.get(&order.order_id) == Some(&handle);
            let in_time_order = previous.map_or(true, |prev| prev < order.order_id);

            if !indexed
                || !in_time_order
                || order.side != side
                || order.price != price
                || !order.is_resting_candidate()
                || !order.check_invariant()
            {
                return false;
            }

            previous = Some(order.order_id);
            total += u128::from(order.quantity.as_u64());
            *queued += 1;
        }

        total == level.total_units()
    }

    fn fmt_level(&self, f: &mut fmt::Formatter<'_>, price: Price, level: &PriceLevel) -> fmt::Result {
        write!(f, "Price: {price}, Orders:")?;
        for handle in level.iter() {
            if let Some(order) = self.pool.get(handle) {
                write!(f, " [ID: {}, Qty: {}]", order.order_id, order.quantity)?;
            }
        }
        writeln!(f)
    }
}

impl fmt::Display for MatchingEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Order Book State:")?;
        writeln!(f, "Bids:")?;
        for (price, level) in self.bids.levels() {
            self.fmt_level(f, price, level)?;
        }
        writeln!(f, "Asks:")?;
        for (price, level) in self.asks.levels() {
            self.fmt_level(f, price, level)?;
        }
        Ok(())
    }
}

impl Default for MatchingEngine {
    fn default() -> Self {
        Self::build(EngineConfig::default())
    }
}

/// Drain one price level against the incoming order, oldest order first
///
/// Stops when the incoming order is filled or the level is empty. Filled
/// resting orders leave the queue, the id index and the pool immediately.
#[allow(clippy::too_many_arguments)]
fn match_level(
    level: &mut PriceLevel,
    level_price: Price,
    taker: &mut Order,
    pool: &mut OrderPool,
    order_index: &mut HashMap<OrderId, OrderHandle>,
    executor: &mut MatchExecutor,
    trades: &mut Vec<Trade>,
    timestamp: i64,
) {
    while !taker.is_filled() {
        let Some(maker_handle) = level.front() else {
            break;
        };
        let Some(maker) = pool.get_mut(maker_handle) else {
            error!(
                index = maker_handle.index(),
                price = %level_price,
                "Stale handle at front of price level, dropping it"
            );
            level.pop_front();
            continue;
        };

        let trade_qty = taker.quantity.min(maker.quantity);
        trades.push(executor.execute_trade(
            taker.order_id,
            maker.order_id,
            taker.side,
            level_price,
            trade_qty,
            timestamp,
        ));

        taker.fill(trade_qty);
        maker.fill(trade_qty);
        level.reduce_total(trade_qty);

        if maker.is_filled() {
            let maker_id = maker.order_id;
            level.pop_front();
            order_index.remove(&maker_id);
            if let Err(err) = pool.release(maker_handle) {
                error!(order_id = %maker_id, error = %err, "Failed to release filled order");
            }
        }
    }
}
