//! AVL rebalancing walks
//!
//! Both walks climb from a starting node to the root, refreshing heights and
//! repairing the first node whose balance factor leaves `[-1, 1]`. Insertion
//! chooses between the single and double rotation by comparing the inserted
//! key with the heavy child's key; deletion looks at the heavy child's own
//! balance instead, since there is no inserted key to follow.

use std::cmp::Ordering;

use crate::dev_infrastructure::perf;
use crate::error::Result;
use crate::key::Keyed;

use super::node::{Direction, NodeId};
use super::rotation::{rotate, HeightPolicy};
use super::search_tree::SearchTree;

/// Shape of an imbalance at a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AvlCase {
    /// Balance factor within `[-1, 1]`
    Balanced,
    /// Left-heavy, heavy grandchild on the outside
    LeftLeft,
    /// Left-heavy, heavy grandchild on the inside
    LeftRight,
    /// Right-heavy, heavy grandchild on the outside
    RightRight,
    /// Right-heavy, heavy grandchild on the inside
    RightLeft,
}

/// Which walk is running, for counting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Walk {
    Insert,
    Delete,
}

/// Classify `node` during the insertion walk for the leaf `inserted`
pub fn classify_insertion<T: Keyed, B>(
    tree: &SearchTree<T, B>,
    node: NodeId,
    inserted: NodeId,
) -> Result<AvlCase> {
    let balance = tree.arena.balance_factor(node)?;
    let key = tree.arena.node(inserted)?.entry.key();
    if balance < -1 {
        let Some(left) = tree.child_of(node, Direction::Left)? else {
            return Ok(AvlCase::Balanced);
        };
        perf::record_comparison();
        return Ok(match key.cmp(tree.arena.node(left)?.entry.key()) {
            Ordering::Less => AvlCase::LeftLeft,
            _ => AvlCase::LeftRight,
        });
    }
    if balance > 1 {
        let Some(right) = tree.child_of(node, Direction::Right)? else {
            return Ok(AvlCase::Balanced);
        };
        perf::record_comparison();
        return Ok(match key.cmp(tree.arena.node(right)?.entry.key()) {
            Ordering::Greater => AvlCase::RightRight,
            _ => AvlCase::RightLeft,
        });
    }
    Ok(AvlCase::Balanced)
}

/// Classify `node` during the deletion walk
pub fn classify_deletion<T, B>(tree: &SearchTree<T, B>, node: NodeId) -> Result<AvlCase> {
    let balance = tree.arena.balance_factor(node)?;
    if balance < -1 {
        let Some(left) = tree.child_of(node, Direction::Left)? else {
            return Ok(AvlCase::Balanced);
        };
        return Ok(if tree.arena.balance_factor(left)? <= 0 {
            AvlCase::LeftLeft
        } else {
            AvlCase::LeftRight
        });
    }
    if balance > 1 {
        let Some(right) = tree.child_of(node, Direction::Right)? else {
            return Ok(AvlCase::Balanced);
        };
        return Ok(if tree.arena.balance_factor(right)? >= 0 {
            AvlCase::RightRight
        } else {
            AvlCase::RightLeft
        });
    }
    Ok(AvlCase::Balanced)
}

/// Apply the rotations for `case` at `node`, returning the subtree's new root
pub fn apply<T, B>(tree: &mut SearchTree<T, B>, node: NodeId, case: AvlCase) -> Result<NodeId> {
    match case {
        AvlCase::Balanced => Ok(node),
        AvlCase::LeftLeft => rotate::<T, B, HeightPolicy>(tree, node, Direction::Right),
        AvlCase::RightRight => rotate::<T, B, HeightPolicy>(tree, node, Direction::Left),
        AvlCase::LeftRight => {
            if let Some(left) = tree.child_of(node, Direction::Left)? {
                rotate::<T, B, HeightPolicy>(tree, left, Direction::Left)?;
            }
            rotate::<T, B, HeightPolicy>(tree, node, Direction::Right)
        }
        AvlCase::RightLeft => {
            if let Some(right) = tree.child_of(node, Direction::Right)? {
                rotate::<T, B, HeightPolicy>(tree, right, Direction::Right)?;
            }
            rotate::<T, B, HeightPolicy>(tree, node, Direction::Left)
        }
    }
}

fn walk<T, B, F>(tree: &mut SearchTree<T, B>, start: Option<NodeId>, which: Walk, classify: F) -> Result<()>
where
    F: Fn(&SearchTree<T, B>, NodeId) -> Result<AvlCase>,
{
    let mut cursor = start;
    while let Some(id) = cursor {
        tree.arena.update_height(id)?;
        let case = classify(tree, id)?;
        let subtree_root = if case == AvlCase::Balanced {
            id
        } else {
            log::trace!("avl {:?} fixup {:?} at {:?}", which, case, id);
            match which {
                Walk::Insert => perf::record_insertion_fixup(),
                Walk::Delete => perf::record_deletion_fixup(),
            }
            apply(tree, id, case)?
        };
        cursor = tree.parent_of(subtree_root)?;
    }
    Ok(())
}

/// Rebalance from the parent of the freshly linked leaf `inserted` upward
pub fn rebalance_after_insert<T: Keyed, B>(tree: &mut SearchTree<T, B>, inserted: NodeId) -> Result<()> {
    let start = tree.parent_of(inserted)?;
    walk(tree, start, Walk::Insert, |t, id| classify_insertion(t, id, inserted))
}

/// Rebalance from `start`, the parent of a physically removed node, upward
pub fn rebalance_after_delete<T, B>(tree: &mut SearchTree<T, B>, start: Option<NodeId>) -> Result<()> {
    walk(tree, start, Walk::Delete, classify_deletion)
}
