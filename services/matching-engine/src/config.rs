//! Engine configuration
//!
//! Plain serde struct with defaults; callers load it from wherever they
//! keep settings and hand it to `MatchingEngine::new`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Slots preallocated when no capacity is configured
pub const DEFAULT_POOL_CAPACITY: usize = 2_500_000;

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Pool capacity {capacity} exceeds the maximum of {max}")]
    CapacityTooLarge { capacity: usize, max: usize },
}

/// Configuration for the matching engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Order slots preallocated at construction; the pool never grows
    pub pool_capacity: usize,
    /// Sequence number carried by the first trade
    pub starting_trade_sequence: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            pool_capacity: DEFAULT_POOL_CAPACITY,
            starting_trade_sequence: 1,
        }
    }
}

impl EngineConfig {
    /// Default config with a specific pool size
    pub fn with_pool_capacity(pool_capacity: usize) -> Self {
        Self {
            pool_capacity,
            ..Self::default()
        }
    }

    /// Parse and validate a JSON config; missing fields take defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the config can build an engine
    pub fn validate(&self) -> Result<(), ConfigError> {
        let max = u32::MAX as usize;
        if self.pool_capacity > max {
            return Err(ConfigError::CapacityTooLarge {
                capacity: self.pool_capacity,
                max,
            });
        }
        Ok(())
    }
}
