//! Matching logic module
//!
//! Crossing rules and trade sequencing for price-time priority matching.

pub mod crossing;
pub mod executor;

pub use crossing::incoming_can_match;
pub use executor::MatchExecutor;
