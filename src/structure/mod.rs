//! One interface over every associative structure
//!
//! [`AssociativeStructure`] is implemented by both trees and both hash maps
//! and is object safe, so callers can pick a structure at run time through
//! [`StructureFactory`] and drive it as a `Box<dyn AssociativeStructure<T>>`.
//!
//! ```rust
//! use arbora::{AssociativeStructure, StructureFactory};
//!
//! let factory = StructureFactory::<(String, u32)>::with_defaults().unwrap();
//! let mut words = factory.create("rb").unwrap();
//! for w in ["b", "a", "b"] {
//!     let key = w.to_string();
//!     if words.contains(&key) {
//!         if let Some(mut node) = words.get_node(&key) {
//!             *node.payload_mut().unwrap() += 1;
//!         }
//!     } else {
//!         words.insert((key, 1)).unwrap();
//!     }
//! }
//! let content: Vec<_> = words.ordered_content().into_iter().cloned().collect();
//! assert_eq!(content, vec![("a".to_string(), 1), ("b".to_string(), 2)]);
//! ```

pub mod factory;
pub mod set;

pub use factory::{create_structure, StructureFactory, StructureKind};
pub use set::{AvlSet, RedBlackSet, Set};

use std::fmt::Debug;
use std::hash::BuildHasher;

use crate::error::Result;
use crate::hash_map::{ChainedHashMap, OpenHashMap};
use crate::key::Keyed;
use crate::tree::{Rebalance, SearchTree};

/// Mutable access to a stored entry's payload
///
/// The key stays read-only: changing it in place would break the ordering or
/// hashing that located the entry.
#[derive(Debug)]
pub struct NodeHandle<'a, T> {
    entry: &'a mut T,
}

impl<'a, T: Keyed> NodeHandle<'a, T> {
    pub(crate) fn new(entry: &'a mut T) -> Self {
        Self { entry }
    }

    /// The whole entry, read-only
    pub fn entry(&self) -> &T {
        self.entry
    }

    /// The entry's key
    pub fn key(&self) -> &T::Key {
        self.entry.key()
    }

    /// The entry's payload, if it has one
    pub fn payload(&self) -> Option<&T::Payload> {
        self.entry.payload()
    }

    /// The entry's payload for in-place update
    pub fn payload_mut(&mut self) -> Option<&mut T::Payload> {
        self.entry.payload_mut()
    }
}

/// Operations shared by the trees and the hash maps
pub trait AssociativeStructure<T: Keyed> {
    /// Display name, e.g. `"AVL Tree"`
    fn name(&self) -> &'static str;

    /// Insert `entry`; `Ok(false)` leaves an existing entry with the same key untouched
    fn insert(&mut self, entry: T) -> Result<bool>;

    /// Remove and return the entry stored under `key`
    fn remove(&mut self, key: &T::Key) -> Result<Option<T>>;

    /// True when `key` is stored
    fn contains(&self, key: &T::Key) -> bool;

    /// Borrow the entry stored under `key`
    fn get(&self, key: &T::Key) -> Option<&T>;

    /// Payload access to the entry stored under `key`
    fn get_node(&mut self, key: &T::Key) -> Option<NodeHandle<'_, T>>;

    /// Number of stored entries
    fn len(&self) -> usize;

    /// True when nothing is stored
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry
    fn clear(&mut self);

    /// Text dump of the internal layout
    fn render(&self) -> String;

    /// Print [`render`](AssociativeStructure::render) to stdout
    fn show(&self) {
        print!("{}", self.render());
    }

    /// Entries in ascending key order
    fn ordered_content(&self) -> Vec<&T>;
}

impl<T, B> AssociativeStructure<T> for SearchTree<T, B>
where
    T: Keyed + Debug,
    B: Rebalance,
{
    fn name(&self) -> &'static str {
        SearchTree::name(self)
    }

    fn insert(&mut self, entry: T) -> Result<bool> {
        SearchTree::insert(self, entry)
    }

    fn remove(&mut self, key: &T::Key) -> Result<Option<T>> {
        SearchTree::remove(self, key)
    }

    fn contains(&self, key: &T::Key) -> bool {
        SearchTree::contains(self, key)
    }

    fn get(&self, key: &T::Key) -> Option<&T> {
        SearchTree::get(self, key)
    }

    fn get_node(&mut self, key: &T::Key) -> Option<NodeHandle<'_, T>> {
        SearchTree::get_node(self, key)
    }

    fn len(&self) -> usize {
        SearchTree::len(self)
    }

    fn clear(&mut self) {
        SearchTree::clear(self)
    }

    fn render(&self) -> String {
        SearchTree::render(self)
    }

    fn ordered_content(&self) -> Vec<&T> {
        SearchTree::ordered_content(self)
    }
}

macro_rules! impl_for_hash_map {
    ($map:ident, $name:literal) => {
        impl<T: Keyed, S: BuildHasher> AssociativeStructure<T> for $map<T, S> {
            fn name(&self) -> &'static str {
                $name
            }

            fn insert(&mut self, entry: T) -> Result<bool> {
                $map::insert(self, entry)
            }

            fn remove(&mut self, key: &T::Key) -> Result<Option<T>> {
                $map::remove(self, key)
            }

            fn contains(&self, key: &T::Key) -> bool {
                $map::contains(self, key)
            }

            fn get(&self, key: &T::Key) -> Option<&T> {
                $map::get(self, key)
            }

            fn get_node(&mut self, key: &T::Key) -> Option<NodeHandle<'_, T>> {
                $map::get_node(self, key)
            }

            fn len(&self) -> usize {
                $map::len(self)
            }

            fn clear(&mut self) {
                $map::clear(self)
            }

            fn render(&self) -> String {
                $map::render(self)
            }

            fn ordered_content(&self) -> Vec<&T> {
                let mut entries: Vec<&T> = $map::iter(self).collect();
                entries.sort_by(|a, b| a.key().cmp(b.key()));
                entries
            }
        }
    };
}

impl_for_hash_map!(OpenHashMap, "OpenHashMap");
impl_for_hash_map!(ChainedHashMap, "ChainedHashMap");
