//! Open addressing hash map with linear probing

use std::hash::BuildHasher;

use ahash::RandomState;

use super::{bucket_index, next_prime, sanitize_load_factor};
use crate::config::HashMapConfig;
use crate::dev_infrastructure::perf;
use crate::error::Result;
use crate::key::Keyed;
use crate::structure::NodeHandle;

/// Outcome of probing for a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Occupied(usize),
    Empty(usize),
}

/// Hash map storing entries inline in a prime-sized slot table
///
/// Collisions walk forward one slot at a time. Removal shifts later members
/// of the probe run back into the hole, so lookups never need tombstones.
#[derive(Debug, Clone)]
pub struct OpenHashMap<T, S = RandomState> {
    table: Vec<Option<T>>,
    len: usize,
    max_load_factor: f64,
    hasher: S,
}

impl<T: Keyed> OpenHashMap<T, RandomState> {
    /// Empty map with 19 slots and load factor 0.75
    pub fn new() -> Self {
        Self::with_config(&HashMapConfig::open_addressing())
    }

    /// Empty map sized and loaded per `config`
    pub fn with_config(config: &HashMapConfig) -> Self {
        Self::with_config_and_hasher(config, RandomState::new())
    }
}

impl<T: Keyed> Default for OpenHashMap<T, RandomState> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Keyed, S: BuildHasher> OpenHashMap<T, S> {
    /// Empty map using a caller-supplied hasher
    ///
    /// A load factor outside `(0, 1)` is replaced by 0.75.
    pub fn with_config_and_hasher(config: &HashMapConfig, hasher: S) -> Self {
        let max_load_factor = sanitize_load_factor(
            config.max_load_factor,
            HashMapConfig::OPEN_ADDRESSING_LOAD_FACTOR,
            Some(1.0),
        );
        Self {
            table: empty_table(next_prime(config.initial_capacity)),
            len: 0,
            max_load_factor,
            hasher,
        }
    }

    /// Insert an entry; `Ok(false)` when its key is already present
    pub fn insert(&mut self, entry: T) -> Result<bool> {
        if let Slot::Occupied(_) = self.probe(entry.key()) {
            return Ok(false);
        }
        if (self.len + 1) as f64 > self.max_load_factor * self.table.len() as f64 {
            self.rehash(next_prime(self.table.len() * 2));
        }
        match self.probe(entry.key()) {
            Slot::Empty(idx) => {
                self.table[idx] = Some(entry);
                self.len += 1;
                Ok(true)
            }
            Slot::Occupied(_) => Ok(false),
        }
    }

    /// Remove the entry with `key`, returning it
    pub fn remove(&mut self, key: &T::Key) -> Result<Option<T>> {
        let Slot::Occupied(idx) = self.probe(key) else {
            return Ok(None);
        };
        let removed = self.table[idx].take();
        self.len -= 1;
        self.backward_shift(idx);
        Ok(removed)
    }

    /// True when `key` is stored
    pub fn contains(&self, key: &T::Key) -> bool {
        matches!(self.probe(key), Slot::Occupied(_))
    }

    /// Borrow the entry stored under `key`
    pub fn get(&self, key: &T::Key) -> Option<&T> {
        match self.probe(key) {
            Slot::Occupied(idx) => self.table[idx].as_ref(),
            Slot::Empty(_) => None,
        }
    }

    /// Payload access to the entry stored under `key`
    pub fn get_node(&mut self, key: &T::Key) -> Option<NodeHandle<'_, T>> {
        match self.probe(key) {
            Slot::Occupied(idx) => self.table[idx].as_mut().map(NodeHandle::new),
            Slot::Empty(_) => None,
        }
    }

    /// Drop every entry, keeping the table size
    pub fn clear(&mut self) {
        self.table.iter_mut().for_each(|slot| *slot = None);
        self.len = 0;
    }

    fn home(&self, key: &T::Key) -> usize {
        bucket_index(&self.hasher, key, self.table.len())
    }

    /// Walk the probe run for `key`, counting each slot examined
    fn probe(&self, key: &T::Key) -> Slot {
        let size = self.table.len();
        let mut idx = self.home(key);
        for _ in 0..size {
            perf::record_visit();
            match &self.table[idx] {
                None => return Slot::Empty(idx),
                Some(entry) => {
                    perf::record_comparison();
                    if entry.key() == key {
                        return Slot::Occupied(idx);
                    }
                }
            }
            idx = (idx + 1) % size;
        }
        // a full table has no empty slot to offer; inserts grow before this
        Slot::Empty(idx)
    }

    /// Close the hole at `hole` by pulling back entries whose home precedes it
    fn backward_shift(&mut self, mut hole: usize) {
        let size = self.table.len();
        let mut cursor = hole;
        loop {
            cursor = (cursor + 1) % size;
            let home = match &self.table[cursor] {
                None => break,
                Some(entry) => self.home(entry.key()),
            };
            // entries whose home lies cyclically in (hole, cursor] stay put
            let stays = if hole <= cursor {
                hole < home && home <= cursor
            } else {
                hole < home || home <= cursor
            };
            if !stays {
                self.table[hole] = self.table[cursor].take();
                hole = cursor;
            }
        }
    }

    fn rehash(&mut self, new_size: usize) {
        log::debug!(
            "open hash map rehash: {} -> {} slots ({} entries)",
            self.table.len(),
            new_size,
            self.len
        );
        let old = std::mem::replace(&mut self.table, empty_table(new_size));
        for entry in old.into_iter().flatten() {
            let mut idx = self.home(entry.key());
            while self.table[idx].is_some() {
                idx = (idx + 1) % new_size;
            }
            self.table[idx] = Some(entry);
        }
    }
}

impl<T, S> OpenHashMap<T, S> {
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

    /// Number of slots in the table
    #[inline]
    pub fn capacity(&self) -> usize {
        self.table.len()
    }

    /// Configured growth threshold
    #[inline]
    pub fn max_load_factor(&self) -> f64 {
        self.max_load_factor
    }

    /// Current `len / capacity`
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.table.len() as f64
    }

    /// Entries in slot order
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.table.iter().flatten()
    }

    /// Occupied slots with their indices
    pub fn occupied_slots(&self) -> Vec<(usize, &T)> {
        self.table
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|e| (i, e)))
            .collect()
    }
}

impl<T: Keyed, S> OpenHashMap<T, S> {
    /// One line per slot: `[i]: key` or `[i]: ` when empty
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (i, slot) in self.table.iter().enumerate() {
            match slot {
                Some(entry) => out.push_str(&format!("[{}]: {:?}\n", i, entry.key())),
                None => out.push_str(&format!("[{}]: \n", i)),
            }
        }
        out
    }
}

fn empty_table<T>(size: usize) -> Vec<Option<T>> {
    std::iter::repeat_with(|| None).take(size).collect()
}
