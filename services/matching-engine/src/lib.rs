//! Matching Engine Service
//!
//! Single-instrument limit order book implementing price-time priority
//! matching with partial fills.
//!
//! **Key Invariants:**
//! - Price-time priority strictly enforced
//! - Trades print at the resting order's price
//! - Conservation of quantity
//! - A resting order is in exactly one price level and the id index
//! - No order storage is allocated after construction

pub mod book;
pub mod matching;
pub mod pool;
pub mod config;
pub mod stats;
pub mod engine;

pub use config::{ConfigError, EngineConfig};
pub use engine::{MatchingEngine, OrderBookSnapshot, SubmitResult};
pub use pool::{OrderHandle, OrderPool};
