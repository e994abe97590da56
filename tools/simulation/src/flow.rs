//! Random order-flow generator
//!
//! Deterministic for a given seed. The default mix matches the reference
//! benchmark: even buy/sell and limit/market split, limit prices uniform
//! over 90.00-110.00 in cents, quantities 1-100.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use types::numeric::{Price, Quantity};
use types::order::{NewOrder, Side};

/// Configuration for the order-flow generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderFlowConfig {
    /// Probability of a buy (0.0 to 1.0)
    pub buy_ratio: f64,
    /// Probability of a market order (0.0 to 1.0)
    pub market_order_ratio: f64,
    /// Lowest limit price, in units of 10^-price_scale
    pub min_price_ticks: i64,
    /// Highest limit price, in units of 10^-price_scale
    pub max_price_ticks: i64,
    /// Decimal places of generated prices
    pub price_scale: u32,
    pub min_quantity: u64,
    pub max_quantity: u64,
    pub seed: u64,
}

impl Default for OrderFlowConfig {
    fn default() -> Self {
        Self {
            buy_ratio: 0.5,
            market_order_ratio: 0.5,
            min_price_ticks: 9_000,
            max_price_ticks: 11_000,
            price_scale: 2,
            min_quantity: 1,
            max_quantity: 100,
            seed: 0,
        }
    }
}

/// Seeded generator of order requests.
pub struct OrderFlowGenerator {
    config: OrderFlowConfig,
    rng: ChaCha8Rng,
    generated: u64,
}

impl OrderFlowGenerator {
    /// Create a generator; the same config always yields the same flow.
    pub fn new(config: OrderFlowConfig) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self {
            config,
            rng,
            generated: 0,
        }
    }

    /// Generate the next order request.
    pub fn next_order(&mut self) -> NewOrder {
        let side = if self.rng.gen_bool(self.config.buy_ratio) {
            Side::Buy
        } else {
            Side::Sell
        };
        let quantity = Quantity::new(
            self.rng
                .gen_range(self.config.min_quantity..=self.config.max_quantity),
        );

        self.generated += 1;

        if self.rng.gen_bool(self.config.market_order_ratio) {
            NewOrder::market(side, quantity)
        } else {
            let ticks = self
                .rng
                .gen_range(self.config.min_price_ticks..=self.config.max_price_ticks);
            NewOrder::limit(side, Price::from_scaled(ticks, self.config.price_scale), quantity)
        }
    }

    /// Pre-generate a batch of `count` requests.
    pub fn generate(&mut self, count: usize) -> Vec<NewOrder> {
        let mut orders = Vec::with_capacity(count);
        orders.extend((0..count).map(|_| self.next_order()));
        orders
    }

    /// Number of requests produced so far.
    pub fn generated(&self) -> u64 {
        self.generated
    }
}

impl Iterator for OrderFlowGenerator {
    type Item = NewOrder;

    fn next(&mut self) -> Option<NewOrder> {
        Some(self.next_order())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::order::OrderType;

    #[test]
    fn test_deterministic_output() {
        let mut g1 = OrderFlowGenerator::new(OrderFlowConfig::default());
        let mut g2 = OrderFlowGenerator::new(OrderFlowConfig::default());

        assert_eq!(g1.generate(500), g2.generate(500));
        assert_eq!(g1.generated(), 500);
    }

    #[test]
    fn test_different_seeds_different_output() {
        let mut g1 = OrderFlowGenerator::new(OrderFlowConfig { seed: 1, ..Default::default() });
        let mut g2 = OrderFlowGenerator::new(OrderFlowConfig { seed: 2, ..Default::default() });

        assert_ne!(g1.generate(50), g2.generate(50));
    }

    #[test]
    fn test_order_validity() {
        let mut generator = OrderFlowGenerator::new(OrderFlowConfig::default());
        let low: Price = "90".parse().unwrap();
        let high: Price = "110".parse().unwrap();

        for order in generator.by_ref().take(1_000) {
            assert!(order.validate().is_ok());
            assert!((1..=100).contains(&order.quantity.as_u64()));
            match order.order_type {
                OrderType::Limit => {
                    let price = order.price.unwrap();
                    assert!(price >= low && price <= high);
                }
                OrderType::Market => assert!(order.price.is_none()),
            }
        }
    }

    #[test]
    fn test_all_limit_mix() {
        let config = OrderFlowConfig {
            market_order_ratio: 0.0,
            ..Default::default()
        };
        let mut generator = OrderFlowGenerator::new(config);

        assert!(generator
            .generate(200)
            .iter()
            .all(|o| o.order_type == OrderType::Limit));
    }

    proptest::proptest! {
        #[test]
        fn prop_config_bounds_respected(
            seed in proptest::prelude::any::<u64>(),
            min in 1i64..500,
            width in 0i64..500,
            max_qty in 1u64..1_000,
        ) {
            let config = OrderFlowConfig {
                seed,
                min_price_ticks: min,
                max_price_ticks: min + width,
                max_quantity: max_qty,
                ..Default::default()
            };
            let mut generator = OrderFlowGenerator::new(config);
            for order in generator.generate(64) {
                proptest::prop_assert!(order.validate().is_ok());
                proptest::prop_assert!(order.quantity.as_u64() <= max_qty);
                if let Some(price) = order.price {
                    proptest::prop_assert!(price >= Price::from_scaled(min, 2));
                    proptest::prop_assert!(price <= Price::from_scaled(min + width, 2));
                }
            }
        }
    }
}
