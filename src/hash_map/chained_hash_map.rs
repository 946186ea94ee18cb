//! Separate chaining hash map

use std::fmt::Write;
use std::hash::BuildHasher;

use ahash::RandomState;

use super::{bucket_index, next_prime, sanitize_load_factor};
use crate::config::HashMapConfig;
use crate::dev_infrastructure::perf;
use crate::error::Result;
use crate::key::Keyed;
use crate::structure::NodeHandle;

/// Hash map with one insertion-ordered chain per bucket
#[derive(Debug, Clone)]
pub struct ChainedHashMap<T, S = RandomState> {
    buckets: Vec<Vec<T>>,
    len: usize,
    max_load_factor: f64,
    hasher: S,
}

impl<T: Keyed> ChainedHashMap<T, RandomState> {
    /// Empty map with 19 buckets and load factor 1.0
    pub fn new() -> Self {
        Self::with_config(&HashMapConfig::chaining())
    }

    /// Empty map sized and loaded per `config`
    pub fn with_config(config: &HashMapConfig) -> Self {
        Self::with_config_and_hasher(config, RandomState::new())
    }
}

impl<T: Keyed> Default for ChainedHashMap<T, RandomState> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Keyed, S: BuildHasher> ChainedHashMap<T, S> {
    /// Empty map using a caller-supplied hasher
    ///
    /// A non-positive or non-finite load factor is replaced by 1.0.
    pub fn with_config_and_hasher(config: &HashMapConfig, hasher: S) -> Self {
        let max_load_factor =
            sanitize_load_factor(config.max_load_factor, HashMapConfig::CHAINING_LOAD_FACTOR, None);
        Self {
            buckets: empty_buckets(next_prime(config.initial_capacity)),
            len: 0,
            max_load_factor,
            hasher,
        }
    }

    /// Insert an entry; `Ok(false)` when its key is already present
    pub fn insert(&mut self, entry: T) -> Result<bool> {
        if self.position(entry.key()).is_some() {
            return Ok(false);
        }
        if (self.len + 1) as f64 > self.max_load_factor * self.buckets.len() as f64 {
            self.rehash(next_prime(self.buckets.len() * 2));
        }
        let bucket = self.bucket_of(entry.key());
        self.buckets[bucket].push(entry);
        self.len += 1;
        Ok(true)
    }

    /// Remove the entry with `key`, returning it
    pub fn remove(&mut self, key: &T::Key) -> Result<Option<T>> {
        let Some((bucket, pos)) = self.position(key) else {
            return Ok(None);
        };
        self.len -= 1;
        Ok(Some(self.buckets[bucket].remove(pos)))
    }

    /// True when `key` is stored
    pub fn contains(&self, key: &T::Key) -> bool {
        self.position(key).is_some()
    }

    /// Borrow the entry stored under `key`
    pub fn get(&self, key: &T::Key) -> Option<&T> {
        let (bucket, pos) = self.position(key)?;
        self.buckets[bucket].get(pos)
    }

    /// Payload access to the entry stored under `key`
    pub fn get_node(&mut self, key: &T::Key) -> Option<NodeHandle<'_, T>> {
        let (bucket, pos) = self.position(key)?;
        self.buckets[bucket].get_mut(pos).map(NodeHandle::new)
    }

    /// Drop every entry, keeping the bucket count
    pub fn clear(&mut self) {
        self.buckets.iter_mut().for_each(Vec::clear);
        self.len = 0;
    }

    fn bucket_of(&self, key: &T::Key) -> usize {
        bucket_index(&self.hasher, key, self.buckets.len())
    }

    /// Bucket and chain position of `key`, counting each entry examined
    fn position(&self, key: &T::Key) -> Option<(usize, usize)> {
        let bucket = self.bucket_of(key);
        perf::record(perf::Counter::SearchDepth);
        self.buckets[bucket]
            .iter()
            .position(|entry| {
                perf::record(perf::Counter::NodesVisited);
                perf::record_comparison();
                entry.key() == key
            })
            .map(|pos| (bucket, pos))
    }

    fn rehash(&mut self, new_size: usize) {
        log::debug!(
            "chained hash map rehash: {} -> {} buckets ({} entries)",
            self.buckets.len(),
            new_size,
            self.len
        );
        let old = std::mem::replace(&mut self.buckets, empty_buckets(new_size));
        for entry in old.into_iter().flatten() {
            let bucket = self.bucket_of(entry.key());
            self.buckets[bucket].push(entry);
        }
    }
}

impl<T, S> ChainedHashMap<T, S> {
    /// Number of stored entries
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when nothing is stored
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of buckets
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Configured growth threshold
    #[inline]
    pub fn max_load_factor(&self) -> f64 {
        self.max_load_factor
    }

    /// Current `len / capacity`
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.buckets.len() as f64
    }

    /// Length of the longest chain
    pub fn longest_chain(&self) -> usize {
        self.buckets.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Entries bucket by bucket, each chain in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.buckets.iter().flatten()
    }
}

impl<T: Keyed, S> ChainedHashMap<T, S> {
    /// One line per bucket: `[i]: (k1) (k2) `
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (i, bucket) in self.buckets.iter().enumerate() {
            let _ = write!(out, "[{}]: ", i);
            for entry in bucket {
                let _ = write!(out, "({:?}) ", entry.key());
            }
            out.push('\n');
        }
        out
    }
}

fn empty_buckets<T>(size: usize) -> Vec<Vec<T>> {
    std::iter::repeat_with(Vec::new).take(size).collect()
}
