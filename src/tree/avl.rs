//! AVL tree
//!
//! Height-balanced search tree: every node's subtrees differ in height by at
//! most one, which bounds the height by roughly `1.44 · log2(n + 2)`.
//!
//! ```rust
//! use arbora::AvlTree;
//!
//! let mut tree = AvlTree::new();
//! for k in [30, 20, 40, 10, 25, 35, 50, 5, 15] {
//!     tree.insert(k).unwrap();
//! }
//! assert_eq!(tree.remove(&30).unwrap(), Some(30));
//! assert_eq!(tree.len(), 8);
//! tree.validate().unwrap();
//! ```

use crate::error::{ArboraError, Result};
use crate::key::Keyed;

use super::avl_fixup::{rebalance_after_delete, rebalance_after_insert};
use super::node::NodeId;
use super::search_tree::{Rebalance, SearchTree};

/// Height-balancing discipline
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AvlBalance;

/// AVL tree over entries of type `T`
pub type AvlTree<T> = SearchTree<T, AvlBalance>;

impl Rebalance for AvlBalance {
    const NAME: &'static str = "AVL Tree";

    fn after_insert<T: Keyed>(tree: &mut SearchTree<T, Self>, node: NodeId) -> Result<()> {
        rebalance_after_insert(tree, node)
    }

    fn remove_node<T: Keyed>(tree: &mut SearchTree<T, Self>, node: NodeId) -> Result<T> {
        let target = tree.removal_target(node)?;
        let parent = tree.parent_of(target)?;
        let removed = tree.splice(target)?;
        rebalance_after_delete(tree, parent)?;
        Ok(removed.entry)
    }

    fn check_balance<T: Keyed>(tree: &SearchTree<T, Self>) -> Result<()> {
        let mut stack: Vec<NodeId> = tree.root.into_iter().collect();
        while let Some(id) = stack.pop() {
            let node = tree.arena.node(id)?;
            let left = tree.arena.height_of(node.left);
            let right = tree.arena.height_of(node.right);
            if node.height != 1 + left.max(right) {
                return Err(ArboraError::invalid_structure(format!(
                    "stale height {} at {:?} (children {} and {})",
                    node.height,
                    node.entry.key(),
                    left,
                    right
                )));
            }
            if left.abs_diff(right) > 1 {
                return Err(ArboraError::invalid_structure(format!(
                    "balance factor {} at {:?}",
                    right as i64 - left as i64,
                    node.entry.key()
                )));
            }
            stack.extend(node.left);
            stack.extend(node.right);
        }
        Ok(())
    }
}
