//! Red-Black tree
//!
//! Color-balanced search tree: the root is BLACK, no RED node has a RED
//! child, and every root-to-leaf path crosses the same number of BLACK nodes.
//! Together these bound the height by `2 · log2(n + 1)`.
//!
//! ```rust
//! use arbora::{RedBlackTree, tree::Color};
//!
//! let mut tree = RedBlackTree::new();
//! for k in 1..=7 {
//!     tree.insert(k).unwrap();
//! }
//! assert_eq!(tree.root_color(), Some(Color::Black));
//! assert!(tree.height() - 1 <= 3);
//! tree.validate().unwrap();
//! ```

use crate::error::{ArboraError, Result};
use crate::key::Keyed;

use super::node::{Color, NodeId};
use super::rb_delete;
use super::rb_insert::fixup_after_insert;
use super::search_tree::{Rebalance, SearchTree};

/// Color-balancing discipline
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RedBlackBalance;

/// Red-Black tree over entries of type `T`
pub type RedBlackTree<T> = SearchTree<T, RedBlackBalance>;

impl Rebalance for RedBlackBalance {
    const NAME: &'static str = "Red-Black Tree";

    fn after_insert<T: Keyed>(tree: &mut SearchTree<T, Self>, node: NodeId) -> Result<()> {
        fixup_after_insert(tree, node)
    }

    fn remove_node<T: Keyed>(tree: &mut SearchTree<T, Self>, node: NodeId) -> Result<T> {
        rb_delete::remove_node(tree, node)
    }

    fn check_balance<T: Keyed>(tree: &SearchTree<T, Self>) -> Result<()> {
        if tree.root_color() == Some(Color::Red) {
            return Err(ArboraError::invalid_structure("root is red"));
        }
        subtree_black_height(tree, tree.root).map(|_| ())
    }
}

/// Black height of the subtree at `id`, checking the red and black rules
fn subtree_black_height<T: Keyed, B>(tree: &SearchTree<T, B>, id: Option<NodeId>) -> Result<usize> {
    let Some(id) = id else {
        return Ok(0);
    };
    let node = tree.arena.node(id)?;
    if node.color == Color::Red
        && (tree.color(node.left) == Color::Red || tree.color(node.right) == Color::Red)
    {
        return Err(ArboraError::invalid_structure(format!(
            "red node {:?} has a red child",
            node.entry.key()
        )));
    }
    let left = subtree_black_height(tree, node.left)?;
    let right = subtree_black_height(tree, node.right)?;
    if left != right {
        return Err(ArboraError::invalid_structure(format!(
            "black heights {} and {} differ below {:?}",
            left,
            right,
            node.entry.key()
        )));
    }
    Ok(left + usize::from(node.color == Color::Black))
}

impl<T: Keyed> SearchTree<T, RedBlackBalance> {
    /// BLACK nodes on the path from the root to its leftmost empty link
    pub fn black_height(&self) -> usize {
        let mut count = 0;
        let mut cursor = self.root;
        while let Some(node) = cursor.and_then(|id| self.arena.get(id)) {
            if node.color == Color::Black {
                count += 1;
            }
            cursor = node.left;
        }
        count
    }
}
