//! Benchmark runner
//!
//! For each configured data size, generates random integers and random
//! lowercase strings, then times three phases on every selected structure:
//!
//! 1. **Insert** every generated item
//! 2. **Search** for a shuffled sample of them
//! 3. **Remove** another shuffled sample
//!
//! Trees run twice per round (integers, then `(String, i32)` pairs); hash maps
//! run on the pairs only. Each phase is bracketed by
//! [`perf::start_operation`] / [`perf::end_operation`] and recorded as a
//! [`TestResult`].

use std::fmt::{self, Debug};

use serde::{Deserialize, Serialize};

use crate::config::{BenchmarkConfig, Config};
use crate::dev_infrastructure::perf::{self, OperationStats};
use crate::error::Result;
use crate::key::Keyed;
use crate::structure::{AssociativeStructure, StructureFactory, StructureKind};

/// A timed benchmark phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Insert every item
    Insert,
    /// Look up a sample
    Search,
    /// Remove a sample
    Remove,
}

impl Phase {
    /// Label used in reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Insert => "Insert",
            Phase::Search => "Search",
            Phase::Remove => "Remove",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of benchmark output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    /// Display name of the structure
    pub structure_name: String,
    /// Which phase was timed
    pub operation: Phase,
    /// Items processed in the phase
    pub data_size: usize,
    /// Counters and elapsed time
    pub stats: OperationStats,
}

/// Seeded benchmark over the structures named in a [`BenchmarkConfig`]
pub struct Benchmark {
    config: BenchmarkConfig,
    rng: fastrand::Rng,
    results: Vec<TestResult>,
}

impl Benchmark {
    /// Validate `config` and prepare a run
    pub fn new(config: BenchmarkConfig) -> Result<Self> {
        config.validate()?;
        let rng = fastrand::Rng::with_seed(config.seed);
        Ok(Self {
            config,
            rng,
            results: Vec::new(),
        })
    }

    /// The configuration in use
    pub fn config(&self) -> &BenchmarkConfig {
        &self.config
    }

    /// Rows recorded so far
    pub fn results(&self) -> &[TestResult] {
        &self.results
    }

    /// `count` integers drawn uniformly from the configured range
    pub fn random_ints(&mut self, count: usize) -> Vec<i32> {
        let range = self.config.int_min..=self.config.int_max;
        (0..count).map(|_| self.rng.i32(range.clone())).collect()
    }

    /// `count` lowercase ASCII strings of the configured length
    pub fn random_strings(&mut self, count: usize) -> Vec<String> {
        let len = self.config.string_length;
        (0..count)
            .map(|_| (0..len).map(|_| self.rng.lowercase()).collect())
            .collect()
    }

    /// Run every round and return all rows
    pub fn run(&mut self) -> Result<&[TestResult]> {
        let ints = StructureFactory::<i32>::with_hash_configs(
            self.config.open_hash.clone(),
            self.config.chained_hash.clone(),
        )?;
        let pairs = StructureFactory::<(String, i32)>::with_hash_configs(
            self.config.open_hash.clone(),
            self.config.chained_hash.clone(),
        )?;

        for size in self.config.data_sizes.clone() {
            log::info!("benchmark round with data size {}", size);
            let int_data = self.random_ints(size);
            let pair_data: Vec<(String, i32)> = self
                .random_strings(size)
                .into_iter()
                .map(|s| (s, 1))
                .collect();

            for kind in self.config.structures.clone() {
                if kind.is_tree() {
                    let mut structure = ints.create_kind(kind)?;
                    self.run_structure(structure.as_mut(), &int_data, "integers")?;
                }
                let mut structure = pairs.create_kind(kind)?;
                self.run_structure(structure.as_mut(), &pair_data, "string pairs")?;
            }
        }
        Ok(&self.results)
    }

    /// Run the three phases for one structure and one data set
    pub fn run_structure<T>(
        &mut self,
        structure: &mut dyn AssociativeStructure<T>,
        data: &[T],
        label: &str,
    ) -> Result<()>
    where
        T: Keyed + Clone + Debug,
    {
        let name = structure.name();
        log::info!("testing {} with {}", name, label);

        self.measure(name, Phase::Insert, data.len(), label, || {
            for item in data {
                structure.insert(item.clone())?;
            }
            Ok(())
        })?;

        let search = self.sample(data, self.config.search_sample);
        let mut found = 0;
        self.measure(name, Phase::Search, search.len(), label, || {
            found = search.iter().filter(|item| structure.contains(item.key())).count();
            Ok(())
        })?;
        log::info!("found {} out of {} elements", found, search.len());

        let remove = self.sample(data, self.config.remove_sample);
        self.measure(name, Phase::Remove, remove.len(), label, || {
            for item in &remove {
                structure.remove(item.key())?;
            }
            Ok(())
        })
    }

    /// First `n` items of a shuffled copy of `data`
    fn sample<T: Clone>(&mut self, data: &[T], n: usize) -> Vec<T> {
        let mut copy = data.to_vec();
        self.rng.shuffle(&mut copy);
        copy.truncate(n);
        copy
    }

    fn measure<F>(&mut self, name: &str, phase: Phase, size: usize, label: &str, body: F) -> Result<()>
    where
        F: FnOnce() -> Result<()>,
    {
        perf::start_operation(&format!("{} - {} {} {}", name, phase, size, label));
        let outcome = body();
        let stats = perf::end_operation();
        outcome?;
        if self.config.verbose {
            stats.print();
        }
        self.results.push(TestResult {
            structure_name: name.to_string(),
            operation: phase,
            data_size: size,
            stats,
        });
        Ok(())
    }
}

/// Benchmark one structure kind with the default configuration and `data`
pub fn quick_run(kind: StructureKind, data: &[i32]) -> Result<Vec<TestResult>> {
    let mut bench = Benchmark::new(BenchmarkConfig::default())?;
    let factory = StructureFactory::<i32>::with_defaults()?;
    let mut structure = factory.create_kind(kind)?;
    bench.run_structure(structure.as_mut(), data, "integers")?;
    Ok(bench.results)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> BenchmarkConfig {
        BenchmarkConfig {
            data_sizes: vec![30],
            search_sample: 10,
            remove_sample: 5,
            ..BenchmarkConfig::default()
        }
    }

    #[test]
    fn test_row_layout() {
        let mut bench = Benchmark::new(small_config()).unwrap();
        let results = bench.run().unwrap();
        // trees: 2 data sets x 3 phases, hash maps: 1 x 3
        assert_eq!(results.len(), 2 * 6 + 2 * 3);

        let ops: Vec<Phase> = results.iter().take(3).map(|r| r.operation).collect();
        assert_eq!(ops, vec![Phase::Insert, Phase::Search, Phase::Remove]);
        let sizes: Vec<usize> = results.iter().take(3).map(|r| r.data_size).collect();
        assert_eq!(sizes, vec![30, 10, 5]);
        assert_eq!(results[0].structure_name, "AVL Tree");
        assert!(results[0].stats.operation_name.starts_with("AVL Tree - Insert 30 integers"));
    }

    #[test]
    fn test_counters_per_kind() {
        let mut bench = Benchmark::new(small_config()).unwrap();
        let results = bench.run().unwrap();
        for row in results {
            let hashed = row.structure_name.contains("HashMap");
            if hashed {
                assert_eq!(row.stats.rotations, 0);
                assert_eq!(row.stats.color_changes, 0);
            }
            if row.operation == Phase::Search {
                assert_eq!(row.stats.insertion_fixups, 0);
                assert_eq!(row.stats.deletion_fixups, 0);
                assert_eq!(row.stats.rotations, 0);
            }
            assert!(row.stats.key_comparisons > 0, "{:?}", row);
        }
    }

    #[test]
    fn test_seed_makes_data_reproducible() {
        let mut a = Benchmark::new(small_config()).unwrap();
        let mut b = Benchmark::new(small_config()).unwrap();
        assert_eq!(a.random_ints(50), b.random_ints(50));
        assert_eq!(a.random_strings(5), b.random_strings(5));
    }

    #[test]
    fn test_generated_data_respects_config() {
        let config = BenchmarkConfig {
            int_min: -3,
            int_max: 3,
            string_length: 4,
            ..small_config()
        };
        let mut bench = Benchmark::new(config).unwrap();
        assert!(bench.random_ints(200).iter().all(|n| (-3..=3).contains(n)));
        assert!(bench
            .random_strings(20)
            .iter()
            .all(|s| s.len() == 4 && s.chars().all(|c| c.is_ascii_lowercase())));
    }

    #[test]
    fn test_single_structure_selection() {
        let config = BenchmarkConfig {
            structures: vec![StructureKind::OpenHash],
            ..small_config()
        };
        let mut bench = Benchmark::new(config).unwrap();
        let results = bench.run().unwrap();
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|r| r.structure_name == "OpenHashMap"));
    }

    #[test]
    fn test_quick_run() {
        let data: Vec<i32> = (1..=64).collect();
        let results = quick_run(StructureKind::RedBlack, &data).unwrap();
        assert_eq!(results.len(), 3);
        assert!(results[0].stats.rotations > 0);
        assert!(results[0].stats.insertion_fixups > 0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = BenchmarkConfig {
            data_sizes: vec![],
            ..BenchmarkConfig::default()
        };
        assert!(Benchmark::new(config).is_err());
    }
}
