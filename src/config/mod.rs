//! Configuration for the hash maps and the benchmark harness
//!
//! Every configuration type implements [`Config`], which covers validation,
//! initialization from `ARBORA_`-prefixed environment variables, and JSON
//! persistence.
//!
//! - [`HashMapConfig`]: initial table size and growth threshold
//! - [`BenchmarkConfig`]: data sizes, sample sizes, seed and structure list
//!
//! ```rust
//! use arbora::config::{Config, HashMapConfig};
//!
//! let config = HashMapConfig::chaining();
//! assert!(config.validate().is_ok());
//! assert_eq!(config.max_load_factor, 1.0);
//! ```
//!
//! Environment initialization:
//!
//! ```rust
//! use arbora::config::{BenchmarkConfig, Config};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // reads ARBORA_BENCH_SEED, ARBORA_BENCH_SIZES, ...
//! let config = BenchmarkConfig::from_env()?;
//!
//! // same variables under another prefix
//! let config = BenchmarkConfig::from_env_with_prefix("WORDBENCH_")?;
//! # Ok(())
//! # }
//! ```

use crate::error::{ArboraError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::env;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

pub mod benchmark;
pub mod hash_map;


pub use benchmark::BenchmarkConfig;
pub use hash_map::HashMapConfig;

/// Prefix used by [`Config::from_env`]
pub const ENV_PREFIX: &str = "ARBORA_";

/// Common configuration behaviour: validation, environment and file loading.
pub trait Config: Clone + fmt::Debug + Serialize + DeserializeOwned {
    /// Label used in error messages, e.g. `"hash map"`
    const KIND: &'static str;

    /// Validate the configuration for correctness and consistency.
    ///
    /// # Returns
    ///
    /// `Ok(())` if the configuration is valid, a configuration error otherwise.
    fn validate(&self) -> Result<()>;

    /// Initialize from environment variables with the `ARBORA_` prefix.
    ///
    /// Unset variables keep their default value.
    fn from_env() -> Result<Self>
    where
        Self: Default,
    {
        Self::from_env_with_prefix(ENV_PREFIX)
    }

    /// Initialize from environment variables with a custom prefix.
    fn from_env_with_prefix(prefix: &str) -> Result<Self>
    where
        Self: Default;

    /// Save the configuration as pretty-printed JSON.
    fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let serialized = serde_json::to_string_pretty(self).map_err(|e| {
            ArboraError::configuration(format!("Failed to serialize {} config: {}", Self::KIND, e))
        })?;
        std::fs::write(path, serialized).map_err(|e| {
            ArboraError::configuration(format!("Failed to write {} config file: {}", Self::KIND, e))
        })?;
        Ok(())
    }

    /// Load and validate a configuration saved with [`Config::save_to_file`].
    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ArboraError::configuration(format!("Failed to read {} config file: {}", Self::KIND, e))
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            ArboraError::configuration(format!("Failed to parse {} config file: {}", Self::KIND, e))
        })?;
        config.validate()?;
        Ok(config)
    }
}

/// Parse an environment variable, keeping `default` when it is unset or unparsable.
///
/// An unparsable value is reported with a `warn!` before falling back.
pub fn parse_env_var<T>(var_name: &str, default: T) -> T
where
    T: FromStr + fmt::Debug,
    T::Err: fmt::Display,
{
    let Ok(raw) = env::var(var_name) else {
        return default;
    };
    match raw.trim().parse() {
        Ok(value) => value,
        Err(e) => {
            log::warn!(
                "ignoring {}={:?} ({}), using default {:?}",
                var_name,
                raw,
                e,
                default
            );
            default
        }
    }
}

/// Parse a boolean environment variable.
///
/// Accepts "true", "1", "yes", "on" (case-insensitive) as true, everything
/// else as false.
pub fn parse_env_bool(var_name: &str, default: bool) -> bool {
    env::var(var_name)
        .ok()
        .map(|s| {
            let s = s.to_lowercase();
            matches!(s.as_str(), "true" | "1" | "yes" | "on")
        })
        .unwrap_or(default)
}

/// Parse a comma-separated environment variable.
///
/// Unset keeps `default`; an unparsable item is a configuration error.
pub fn parse_env_list<T>(var_name: &str, default: Vec<T>) -> Result<Vec<T>>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    let Ok(raw) = env::var(var_name) else {
        return Ok(default);
    };
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| {
            item.parse().map_err(|e| {
                ArboraError::configuration(format!("{}: cannot parse '{}': {}", var_name, item, e))
            })
        })
        .collect()
}
