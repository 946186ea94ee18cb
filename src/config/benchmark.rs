//! Benchmark harness configuration.

use super::{parse_env_bool, parse_env_list, parse_env_var, Config, HashMapConfig};
use crate::error::{ArboraError, Result};
use crate::structure::StructureKind;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Parameters of a [`Benchmark`](crate::harness::Benchmark) run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkConfig {
    /// Number of generated items per round
    pub data_sizes: Vec<usize>,
    /// Items looked up in the search phase
    pub search_sample: usize,
    /// Items removed in the remove phase
    pub remove_sample: usize,
    /// Length of generated lowercase keys
    pub string_length: usize,
    /// Smallest generated integer
    pub int_min: i32,
    /// Largest generated integer
    pub int_max: i32,
    /// Seed for data generation and shuffles
    pub seed: u64,
    /// Structures to exercise, in order
    pub structures: Vec<StructureKind>,
    /// Where the CSV report goes
    pub csv_path: PathBuf,
    /// Print each operation's stats block as it completes
    pub verbose: bool,
    /// Sizing of the open addressing map
    pub open_hash: HashMapConfig,
    /// Sizing of the chaining map
    pub chained_hash: HashMapConfig,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            data_sizes: vec![100, 500, 1000],
            search_sample: 100,
            remove_sample: 50,
            string_length: 8,
            int_min: 1,
            int_max: 10_000,
            seed: 42,
            structures: StructureKind::ALL.to_vec(),
            csv_path: PathBuf::from("performance_results.csv"),
            verbose: false,
            open_hash: HashMapConfig::open_addressing(),
            chained_hash: HashMapConfig::chaining(),
        }
    }
}

impl BenchmarkConfig {
    /// Small sizes for smoke runs
    pub fn quick() -> Self {
        Self {
            data_sizes: vec![20, 60],
            search_sample: 10,
            remove_sample: 5,
            ..Self::default()
        }
    }

    /// Adds larger rounds to the default sizes
    pub fn extended() -> Self {
        Self {
            data_sizes: vec![100, 500, 1000, 5000, 10_000],
            int_max: 100_000,
            ..Self::default()
        }
    }
}

impl Config for BenchmarkConfig {
    const KIND: &'static str = "benchmark";

    fn validate(&self) -> Result<()> {
        if self.data_sizes.is_empty() {
            return Err(ArboraError::configuration("data_sizes must not be empty"));
        }
        if self.data_sizes.contains(&0) {
            return Err(ArboraError::configuration("data sizes must be greater than 0"));
        }
        if self.string_length == 0 {
            return Err(ArboraError::configuration("string_length must be greater than 0"));
        }
        if self.int_min > self.int_max {
            return Err(ArboraError::configuration(format!(
                "int_min {} exceeds int_max {}",
                self.int_min, self.int_max
            )));
        }
        if self.structures.is_empty() {
            return Err(ArboraError::configuration("at least one structure is required"));
        }
        self.open_hash.validate_open_addressing()?;
        self.chained_hash.validate()?;
        Ok(())
    }

    fn from_env_with_prefix(prefix: &str) -> Result<Self> {
        let mut config = Self::default();
        config.data_sizes = parse_env_list(&format!("{}BENCH_SIZES", prefix), config.data_sizes)?;
        config.search_sample =
            parse_env_var(&format!("{}BENCH_SEARCH_SAMPLE", prefix), config.search_sample);
        config.remove_sample =
            parse_env_var(&format!("{}BENCH_REMOVE_SAMPLE", prefix), config.remove_sample);
        config.string_length =
            parse_env_var(&format!("{}BENCH_STRING_LENGTH", prefix), config.string_length);
        config.int_min = parse_env_var(&format!("{}BENCH_INT_MIN", prefix), config.int_min);
        config.int_max = parse_env_var(&format!("{}BENCH_INT_MAX", prefix), config.int_max);
        config.seed = parse_env_var(&format!("{}BENCH_SEED", prefix), config.seed);
        config.structures =
            parse_env_list(&format!("{}BENCH_STRUCTURES", prefix), config.structures)?;
        config.csv_path = parse_env_var(&format!("{}BENCH_CSV", prefix), config.csv_path);
        config.verbose = parse_env_bool(&format!("{}BENCH_VERBOSE", prefix), config.verbose);
        config.open_hash = HashMapConfig::from_env_with_prefix(&format!("{}OPEN_", prefix))?;
        config.chained_hash = HashMapConfig::chaining()
            .with_capacity(parse_env_var(
                &format!("{}CHAINED_HASH_CAPACITY", prefix),
                HashMapConfig::DEFAULT_CAPACITY,
            ))
            .with_load_factor(parse_env_var(
                &format!("{}CHAINED_HASH_LOAD_FACTOR", prefix),
                HashMapConfig::CHAINING_LOAD_FACTOR,
            ));
        config.validate()?;
        Ok(config)
    }
}
