//! Self-balancing binary search trees
//!
//! Both trees share one arena-backed core ([`SearchTree`]) and one rotation
//! engine ([`rotation::rotate`]); they differ only in the balancing discipline
//! plugged into the core:
//!
//! - [`AvlTree`]: height balance, rebalanced by [`avl_fixup`]
//! - [`RedBlackTree`]: color balance, rebalanced by [`rb_insert`] and
//!   [`rb_delete`]
//!
//! Entries are ordered by their [`Keyed::key`](crate::Keyed::key). Inserting
//! a key that is already present leaves the tree unchanged.

pub mod avl;
pub mod avl_fixup;
pub mod node;
pub mod rb_delete;
pub mod rb_insert;
pub mod red_black;
pub mod rotation;
pub mod search_tree;
pub mod traversal;

pub use avl::{AvlBalance, AvlTree};
pub use node::{Color, Direction, NodeId};
pub use red_black::{RedBlackBalance, RedBlackTree};
pub use search_tree::{Rebalance, SearchTree};
pub use traversal::Iter;
