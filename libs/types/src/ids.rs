//! Identifier types for order book entities
//!
//! Order ids are assigned by the book at submission time: sequential,
//! starting at 1, never reused while the order is live. Client order ids
//! are opaque correlation tokens carried through untouched.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Book-assigned order identifier
///
/// Ordering follows assignment order, so a lower id always arrived earlier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(u64);

impl OrderId {
    /// The first id a fresh book hands out
    pub const FIRST: OrderId = OrderId(1);

    /// Wrap a raw id
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw value
    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// The id assigned after this one
    pub const fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Caller-supplied correlation token
///
/// Never inspected by matching logic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientOrderId(u64);

impl ClientOrderId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ClientOrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_id_sequence() {
        let first = OrderId::FIRST;
        assert_eq!(first.as_u64(), 1);
        assert_eq!(first.next(), OrderId::new(2));
        assert!(first < first.next(), "Earlier ids must sort first");
    }

    #[test]
    fn test_order_id_serialization() {
        let id = OrderId::new(42);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "42");

        let deserialized: OrderId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }

    #[test]
    fn test_client_order_id_default() {
        assert_eq!(ClientOrderId::default().as_u64(), 0);
        assert_eq!(ClientOrderId::new(7).to_string(), "7");
    }
}
