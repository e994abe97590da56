//! Error types for the matching engine
//!
//! Error taxonomy using thiserror. Cancelling an unknown order is not an
//! error and has no variant here.

use thiserror::Error;

/// Top-level engine error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Pool error: {0}")]
    Pool(#[from] PoolError),

    #[error("Order error: {0}")]
    Order(#[from] OrderError),
}

impl EngineError {
    /// True when the submission failed for lack of order storage
    pub fn is_pool_exhausted(&self) -> bool {
        matches!(self, EngineError::Pool(PoolError::Exhausted { .. }))
    }
}

/// Order storage errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    #[error("Order pool exhausted: all {capacity} slots in use")]
    Exhausted { capacity: usize },

    #[error("Stale order handle: slot {index} generation {generation}")]
    StaleHandle { index: u32, generation: u32 },
}

/// Order validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("Limit order requires a price")]
    MissingLimitPrice,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_error_display() {
        let err = PoolError::Exhausted { capacity: 16 };
        assert_eq!(err.to_string(), "Order pool exhausted: all 16 slots in use");
    }

    #[test]
    fn test_engine_error_from_pool_error() {
        let engine_err: EngineError = PoolError::Exhausted { capacity: 1 }.into();
        assert!(engine_err.is_pool_exhausted());
        assert!(engine_err.to_string().starts_with("Pool error"));
    }

    #[test]
    fn test_engine_error_from_order_error() {
        let engine_err: EngineError = OrderError::MissingLimitPrice.into();
        assert!(matches!(engine_err, EngineError::Order(_)));
        assert!(!engine_err.is_pool_exhausted());
    }
}
