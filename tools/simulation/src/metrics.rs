//! Performance metrics for a simulation run
//!
//! Tracks submissions, trades, rests, discards, a latency histogram and
//! throughput.

use matching_engine::SubmitResult;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use types::order::OrderStatus;

/// Latency histogram bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatencyBucket {
    pub label: String,
    pub lower_ns: u64,
    pub upper_ns: u64,
    pub count: u64,
}

/// Aggregated run metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMetrics {
    pub total_orders: u64,
    pub accepted: u64,
    pub rejected: u64,
    pub pool_exhausted: u64,
    pub total_trades: u64,
    pub total_volume: u64,
    pub total_notional: Decimal,
    pub rested: u64,
    pub filled: u64,
    pub discarded: u64,
    pub max_resting_orders: usize,
    pub latency_buckets: Vec<LatencyBucket>,
    pub elapsed_ns: u64,
}

impl RunMetrics {
    /// Create empty metrics with default latency buckets.
    pub fn new() -> Self {
        Self {
            total_orders: 0,
            accepted: 0,
            rejected: 0,
            pool_exhausted: 0,
            total_trades: 0,
            total_volume: 0,
            total_notional: Decimal::ZERO,
            rested: 0,
            filled: 0,
            discarded: 0,
            max_resting_orders: 0,
            latency_buckets: default_buckets(),
            elapsed_ns: 0,
        }
    }

    /// Record an accepted submission.
    pub fn record_result(&mut self, result: &SubmitResult) {
        self.total_orders += 1;
        self.accepted += 1;

        for trade in &result.trades {
            self.total_trades += 1;
            self.total_volume = self.total_volume.saturating_add(trade.quantity.as_u64());
            self.total_notional = self
                .total_notional
                .checked_add(trade.notional())
                .unwrap_or(Decimal::MAX);
        }

        if result.is_resting() {
            self.rested += 1;
        }
        match result.status {
            OrderStatus::Filled => self.filled += 1,
            OrderStatus::Discarded => self.discarded += 1,
            _ => {}
        }
    }

    /// Record a rejected submission.
    pub fn record_rejection(&mut self, pool_exhausted: bool) {
        self.total_orders += 1;
        self.rejected += 1;
        if pool_exhausted {
            self.pool_exhausted += 1;
        }
    }

    /// Record latency in nanoseconds.
    pub fn record_latency(&mut self, latency_ns: u64) {
        for bucket in &mut self.latency_buckets {
            if latency_ns >= bucket.lower_ns && latency_ns < bucket.upper_ns {
                bucket.count += 1;
                return;
            }
        }
        // Overflow bucket (last)
        if let Some(last) = self.latency_buckets.last_mut() {
            last.count += 1;
        }
    }

    /// Update max resting order count.
    pub fn update_book_depth(&mut self, resting: usize) {
        if resting > self.max_resting_orders {
            self.max_resting_orders = resting;
        }
    }

    /// Set elapsed time.
    pub fn set_elapsed(&mut self, ns: u64) {
        self.elapsed_ns = ns;
    }

    /// Throughput: orders per second.
    pub fn orders_per_second(&self) -> f64 {
        if self.elapsed_ns == 0 {
            return 0.0;
        }
        self.total_orders as f64 / (self.elapsed_ns as f64 / 1_000_000_000.0)
    }

    /// Build a summary string.
    pub fn summary(&self) -> String {
        format!(
            "Orders: {} | Rejected: {} | Trades: {} | Rested: {} | Discarded: {} | Volume: {} | Throughput: {:.0} orders/s",
            self.total_orders,
            self.rejected,
            self.total_trades,
            self.rested,
            self.discarded,
            self.total_volume,
            self.orders_per_second(),
        )
    }

    /// Export metrics as pretty JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl Default for RunMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Default latency histogram buckets.
fn default_buckets() -> Vec<LatencyBucket> {
    vec![
        LatencyBucket { label: "<100ns".into(), lower_ns: 0, upper_ns: 100, count: 0 },
        LatencyBucket { label: "100ns-1μs".into(), lower_ns: 100, upper_ns: 1_000, count: 0 },
        LatencyBucket { label: "1-10μs".into(), lower_ns: 1_000, upper_ns: 10_000, count: 0 },
        LatencyBucket { label: "10-100μs".into(), lower_ns: 10_000, upper_ns: 100_000, count: 0 },
        LatencyBucket { label: "100μs-1ms".into(), lower_ns: 100_000, upper_ns: 1_000_000, count: 0 },
        LatencyBucket { label: ">1ms".into(), lower_ns: 1_000_000, upper_ns: u64::MAX, count: 0 },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use matching_engine::MatchingEngine;
    use types::numeric::{Price, Quantity};
    use types::order::{NewOrder, Side};

    #[test]
    fn test_metrics_creation() {
        let metrics = RunMetrics::new();
        assert_eq!(metrics.total_orders, 0);
        assert_eq!(metrics.total_trades, 0);
        assert_eq!(metrics.latency_buckets.len(), 6);
    }

    #[test]
    fn test_record_results() {
        let mut engine = MatchingEngine::with_capacity(8);
        let mut metrics = RunMetrics::new();

        let rest = engine
            .submit_order_at(NewOrder::limit(Side::Sell, Price::from_u64(100), Quantity::new(5)), 0)
            .unwrap();
        metrics.record_result(&rest);

        let take = engine
            .submit_order_at(NewOrder::market(Side::Buy, Quantity::new(8)), 1)
            .unwrap();
        metrics.record_result(&take);

        assert_eq!(metrics.total_orders, 2);
        assert_eq!(metrics.rested, 1);
        assert_eq!(metrics.total_trades, 1);
        assert_eq!(metrics.total_volume, 5);
        assert_eq!(metrics.total_notional, Decimal::from(500));
        assert_eq!(metrics.discarded, 1);
    }

    #[test]
    fn test_record_rejection() {
        let mut metrics = RunMetrics::new();
        metrics.record_rejection(true);
        metrics.record_rejection(false);

        assert_eq!(metrics.rejected, 2);
        assert_eq!(metrics.pool_exhausted, 1);
    }

    #[test]
    fn test_latency_buckets() {
        let mut metrics = RunMetrics::new();
        metrics.record_latency(50);
        metrics.record_latency(500);
        metrics.record_latency(5_000_000);

        assert_eq!(metrics.latency_buckets[0].count, 1);
        assert_eq!(metrics.latency_buckets[1].count, 1);
        assert_eq!(metrics.latency_buckets[5].count, 1);
    }

    #[test]
    fn test_throughput() {
        let mut metrics = RunMetrics::new();
        metrics.total_orders = 1_000;
        metrics.set_elapsed(500_000_000);

        assert!((metrics.orders_per_second() - 2_000.0).abs() < 1e-9);
        assert!(metrics.summary().contains("Orders: 1000"));
    }

    #[test]
    fn test_json_reports_only_recorded_counters() {
        let mut metrics = RunMetrics::new();
        metrics.record_rejection(true);
        let json = metrics.to_json().unwrap();

        assert!(json.contains("\"pool_exhausted\": 1"));
        assert!(!json.contains("cancel"));
    }

    #[test]
    fn test_export_json_roundtrip() {
        let metrics = RunMetrics::new();
        let json = metrics.to_json().unwrap();
        let parsed: RunMetrics = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, metrics);
    }
}
