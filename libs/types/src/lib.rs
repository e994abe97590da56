//! Types library for the limit order book matching engine
//!
//! This library provides the record types shared by the matching engine and
//! its drivers, keeping prices exact and identifiers strongly typed.
//!
//! # Modules
//! - `ids`: Identifiers (OrderId, ClientOrderId)
//! - `numeric`: Fixed-point price and integer quantity types
//! - `order`: Order lifecycle types
//! - `trade`: Trade execution types
//! - `time`: Unix-nanosecond timestamps
//! - `errors`: Error taxonomy

// Public modules
pub mod ids;
pub mod numeric;
pub mod order;
pub mod trade;
pub mod time;
pub mod errors;
