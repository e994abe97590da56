//! Order-flow driver for the matching engine
//!
//! External collaborator of the engine: generates synthetic flow, feeds it
//! through the public submit/cancel surface and measures throughput. The
//! engine crate does not depend on anything here.
//!
//! # Modules
//! - `flow`: Seeded random order generator
//! - `metrics`: Run counters, latency histogram and JSON export
//! - `runner`: Batch submission with timing
//! - `scripted`: Fixed walkthrough of the basic book behaviours

pub mod flow;
pub mod metrics;
pub mod runner;
pub mod scripted;
