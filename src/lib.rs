//! # Arbora: instrumented associative data structures
//!
//! Four in-memory associative structures behind one interface, each reporting
//! the work it does (rotations, comparisons, fixup steps, recolors) to a
//! per-thread performance tracker.
//!
//! ## Key Features
//!
//! - **AVL and Red-Black trees** sharing one arena-backed core and one
//!   rotation engine; only the balancing discipline differs
//! - **Hash maps** with open addressing or separate chaining over prime-sized
//!   tables
//! - **Uniform interface** ([`AssociativeStructure`]) with run-time selection
//!   through [`StructureFactory`]
//! - **Key extraction** ([`Keyed`]): scalars are their own key, `(K, V)` pairs
//!   are keyed by `K` with an updatable payload
//! - **Ordered sets** ([`Set`]) with union, difference, intersection and
//!   symmetric difference over either tree
//! - **Benchmark harness** producing a summary table and CSV report
//!
//! ## Quick Start
//!
//! ```rust
//! use arbora::{AssociativeStructure, AvlTree, OpenHashMap, RedBlackTree};
//!
//! let mut avl = AvlTree::new();
//! for k in [30, 20, 40, 10, 25] {
//!     avl.insert(k).unwrap();
//! }
//! assert_eq!(avl.minimum().unwrap(), &10);
//! assert_eq!(avl.successor(&25).unwrap(), &30);
//!
//! let mut rb = RedBlackTree::new();
//! rb.insert(("apple".to_string(), 1)).unwrap();
//! assert!(rb.contains(&"apple".to_string()));
//!
//! let mut map: OpenHashMap<(String, u32)> = OpenHashMap::new();
//! map.insert(("pear".to_string(), 3)).unwrap();
//! assert_eq!(AssociativeStructure::len(&map), 1);
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod dev_infrastructure;
pub mod error;
pub mod harness;
pub mod hash_map;
pub mod key;
pub mod logger;
pub mod structure;
pub mod tree;

pub use error::{ArboraError, Result};
pub use hash_map::{ChainedHashMap, OpenHashMap};
pub use key::Keyed;
pub use structure::{
    create_structure, AssociativeStructure, NodeHandle, Set, StructureFactory, StructureKind,
};
pub use tree::{AvlTree, RedBlackTree};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log the library version at debug level
pub fn init() {
    log::debug!("Initializing arbora v{}", VERSION);
}
