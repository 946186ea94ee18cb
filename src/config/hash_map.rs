//! Hash map sizing configuration.

use super::{parse_env_var, Config};
use crate::error::{ArboraError, Result};
use serde::{Deserialize, Serialize};

/// Initial table size and growth threshold for either hash map.
///
/// The capacity is rounded up to the next prime (at least 3) when a map is
/// built. Open addressing additionally needs a load factor below 1.0; see
/// [`HashMapConfig::validate_open_addressing`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HashMapConfig {
    /// Requested number of slots or buckets
    pub initial_capacity: usize,
    /// Grow once `len / capacity` would exceed this
    pub max_load_factor: f64,
}

impl HashMapConfig {
    /// Default table size for both maps
    pub const DEFAULT_CAPACITY: usize = 19;
    /// Default load factor for open addressing
    pub const OPEN_ADDRESSING_LOAD_FACTOR: f64 = 0.75;
    /// Default load factor for separate chaining
    pub const CHAINING_LOAD_FACTOR: f64 = 1.0;

    /// Defaults for [`OpenHashMap`](crate::OpenHashMap): 19 slots, 0.75
    pub fn open_addressing() -> Self {
        Self {
            initial_capacity: Self::DEFAULT_CAPACITY,
            max_load_factor: Self::OPEN_ADDRESSING_LOAD_FACTOR,
        }
    }

    /// Defaults for [`ChainedHashMap`](crate::ChainedHashMap): 19 buckets, 1.0
    pub fn chaining() -> Self {
        Self {
            initial_capacity: Self::DEFAULT_CAPACITY,
            max_load_factor: Self::CHAINING_LOAD_FACTOR,
        }
    }

    /// Large table, low load: fewer probes at the cost of memory
    pub fn sparse() -> Self {
        Self {
            initial_capacity: 1021,
            max_load_factor: 0.5,
        }
    }

    /// Small table, high load: chaining only, longer chains
    pub fn dense() -> Self {
        Self {
            initial_capacity: Self::DEFAULT_CAPACITY,
            max_load_factor: 4.0,
        }
    }

    /// Same with a different capacity
    pub fn with_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    /// Same with a different load factor
    pub fn with_load_factor(mut self, max_load_factor: f64) -> Self {
        self.max_load_factor = max_load_factor;
        self
    }

    /// [`Config::validate`] plus the `< 1.0` bound open addressing needs
    pub fn validate_open_addressing(&self) -> Result<()> {
        self.validate()?;
        if self.max_load_factor >= 1.0 {
            return Err(ArboraError::configuration(format!(
                "open addressing needs max_load_factor below 1.0, got {}",
                self.max_load_factor
            )));
        }
        Ok(())
    }
}

impl Default for HashMapConfig {
    fn default() -> Self {
        Self::open_addressing()
    }
}

impl Config for HashMapConfig {
    const KIND: &'static str = "hash map";

    fn validate(&self) -> Result<()> {
        if !self.max_load_factor.is_finite() || self.max_load_factor <= 0.0 {
            return Err(ArboraError::configuration(format!(
                "max_load_factor must be a positive number, got {}",
                self.max_load_factor
            )));
        }
        Ok(())
    }

    fn from_env_with_prefix(prefix: &str) -> Result<Self> {
        let mut config = Self::default();
        config.initial_capacity =
            parse_env_var(&format!("{}HASH_CAPACITY", prefix), config.initial_capacity);
        config.max_load_factor =
            parse_env_var(&format!("{}HASH_LOAD_FACTOR", prefix), config.max_load_factor);
        config.validate()?;
        Ok(config)
    }
}
