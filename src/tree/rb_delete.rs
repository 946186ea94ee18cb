//! Red-Black deletion
//!
//! Removal first reduces to a node with at most one child by trading entries
//! with the in-order successor. That node is then unlinked directly when it
//! is RED, or when it is BLACK with a RED child that can take over its
//! blackness. The one remaining shape, a BLACK leaf, leaves its path one
//! black node short: the leaf stays linked as a placeholder while the
//! double-black walk below repairs the deficiency, and is unlinked afterwards.
//!
//! Case names describe the deficient node `n`, its sibling `s` and the
//! nephews `near` (child of `s` on `n`'s side) and `far`:
//!
//! | case      | situation                         | action                                   |
//! |-----------|-----------------------------------|------------------------------------------|
//! | CaseRoot  | `n` is the root                   | paint BLACK, done                        |
//! | Case1     | `n` is RED                        | paint BLACK, done                        |
//! | Case2L/R  | `s` RED                           | rotate at parent toward `n`, re-evaluate |
//! | Case3     | `s` BLACK, both nephews BLACK     | paint `s` RED, continue from parent      |
//! | Case4LL/RR| `s` BLACK, `near` RED, `far` BLACK| rotate at `s` away from `n`, re-evaluate |
//! | Case5LR/RL| `s` BLACK, `far` RED              | rotate at parent toward `n`, `far` BLACK |
//!
//! The rotations swap colors, which performs the recoloring each case calls
//! for: in Case2 the sibling turns BLACK and the parent RED, in Case4 the near
//! nephew turns BLACK and the sibling RED, and in Case5 the sibling takes the
//! parent's color while the parent turns BLACK.

use crate::dev_infrastructure::perf;
use crate::error::{ArboraError, Result};

use super::node::{Color, Direction, NodeId};
use super::rotation::{rotate, ColorSwapPolicy};
use super::search_tree::SearchTree;

/// Situation of the deficient node during the double-black walk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeletionCase {
    /// Deficiency reached the root
    CaseRoot,
    /// Deficient node is RED
    Case1,
    /// RED sibling, node on the left
    Case2L,
    /// RED sibling, node on the right
    Case2R,
    /// BLACK sibling with two BLACK nephews
    Case3,
    /// Node on the left, near (left) nephew RED
    Case4LL,
    /// Node on the right, near (right) nephew RED
    Case4RR,
    /// Node on the left, far (right) nephew RED
    Case5LR,
    /// Node on the right, far (left) nephew RED
    Case5RL,
}

/// A deficient node and its relatives, captured before each decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeletionContext {
    /// The node carrying the missing black
    pub node: NodeId,
    /// Its parent
    pub parent: Option<NodeId>,
    /// Which side of the parent the node hangs on
    pub side: Option<Direction>,
    /// The parent's other child
    pub sibling: Option<NodeId>,
    /// Sibling's child on the node's side
    pub near_nephew: Option<NodeId>,
    /// Sibling's child away from the node
    pub far_nephew: Option<NodeId>,
}

impl DeletionContext {
    /// Capture the relatives of `node`
    pub fn new<T, B>(tree: &SearchTree<T, B>, node: NodeId) -> Result<Self> {
        let mut ctx = Self {
            node,
            parent: None,
            side: None,
            sibling: None,
            near_nephew: None,
            far_nephew: None,
        };
        ctx.update_relatives(tree)?;
        Ok(ctx)
    }

    /// Re-read parent, sibling and nephews from the tree
    pub fn update_relatives<T, B>(&mut self, tree: &SearchTree<T, B>) -> Result<()> {
        self.parent = tree.parent_of(self.node)?;
        self.side = tree.side_of(self.node)?;
        self.sibling = match (self.parent, self.side) {
            (Some(p), Some(side)) => tree.child_of(p, side.opposite())?,
            _ => None,
        };
        (self.near_nephew, self.far_nephew) = match (self.sibling, self.side) {
            (Some(s), Some(side)) => (tree.child_of(s, side)?, tree.child_of(s, side.opposite())?),
            _ => (None, None),
        };
        Ok(())
    }

    /// Decide which case applies
    ///
    /// A non-root BLACK node short one black always has a sibling; its
    /// absence means the tree was already broken.
    pub fn classify<T, B>(&self, tree: &SearchTree<T, B>) -> Result<DeletionCase> {
        if tree.root == Some(self.node) {
            return Ok(DeletionCase::CaseRoot);
        }
        if tree.color(Some(self.node)) == Color::Red {
            return Ok(DeletionCase::Case1);
        }
        let (Some(sibling), Some(side)) = (self.sibling, self.side) else {
            return Err(ArboraError::invalid_structure(format!(
                "double-black node {:?} has no sibling",
                self.node
            )));
        };
        let left = side == Direction::Left;
        if tree.color(Some(sibling)) == Color::Red {
            return Ok(if left { DeletionCase::Case2L } else { DeletionCase::Case2R });
        }
        if tree.color(self.far_nephew) == Color::Red {
            return Ok(if left { DeletionCase::Case5LR } else { DeletionCase::Case5RL });
        }
        if tree.color(self.near_nephew) == Color::Red {
            return Ok(if left { DeletionCase::Case4LL } else { DeletionCase::Case4RR });
        }
        Ok(DeletionCase::Case3)
    }

    /// Apply `case`; returns the node to examine next, or `None` when the
    /// deficiency is resolved
    pub fn apply<T, B>(&self, tree: &mut SearchTree<T, B>, case: DeletionCase) -> Result<Option<NodeId>> {
        match case {
            DeletionCase::CaseRoot | DeletionCase::Case1 => {
                tree.set_color(self.node, Color::Black)?;
                Ok(None)
            }
            DeletionCase::Case2L | DeletionCase::Case2R => {
                let (parent, side) = self.parent_and_side()?;
                rotate::<T, B, ColorSwapPolicy>(tree, parent, side)?;
                Ok(Some(self.node))
            }
            DeletionCase::Case3 => {
                let (parent, _) = self.parent_and_side()?;
                if let Some(sibling) = self.sibling {
                    tree.set_color(sibling, Color::Red)?;
                }
                Ok(Some(parent))
            }
            DeletionCase::Case4LL | DeletionCase::Case4RR => {
                let (_, side) = self.parent_and_side()?;
                let sibling = self
                    .sibling
                    .ok_or_else(|| ArboraError::invalid_structure("near-nephew case without a sibling"))?;
                rotate::<T, B, ColorSwapPolicy>(tree, sibling, side.opposite())?;
                Ok(Some(self.node))
            }
            DeletionCase::Case5LR | DeletionCase::Case5RL => {
                let (parent, side) = self.parent_and_side()?;
                rotate::<T, B, ColorSwapPolicy>(tree, parent, side)?;
                if let Some(far) = self.far_nephew {
                    tree.set_color(far, Color::Black)?;
                }
                Ok(None)
            }
        }
    }

    fn parent_and_side(&self) -> Result<(NodeId, Direction)> {
        match (self.parent, self.side) {
            (Some(p), Some(side)) => Ok((p, side)),
            _ => Err(ArboraError::invalid_structure(format!(
                "deficient node {:?} has no parent",
                self.node
            ))),
        }
    }
}

/// Repair the missing black below `node`, which stays linked throughout
pub fn fixup_double_black<T, B>(tree: &mut SearchTree<T, B>, node: NodeId) -> Result<()> {
    let mut cursor = Some(node);
    while let Some(id) = cursor {
        let ctx = DeletionContext::new(tree, id)?;
        let case = ctx.classify(tree)?;
        log::trace!("rb delete fixup {:?} at {:?}", case, id);
        perf::record_deletion_fixup();
        cursor = ctx.apply(tree, case)?;
    }
    Ok(())
}

/// Remove the entry stored at `node` and rebalance
pub fn remove_node<T, B>(tree: &mut SearchTree<T, B>, node: NodeId) -> Result<T> {
    let target = tree.removal_target(node)?;
    let (color, child) = {
        let n = tree.arena.node(target)?;
        (n.color, n.left.or(n.right))
    };

    if color == Color::Red {
        return Ok(tree.splice(target)?.entry);
    }
    if let Some(child) = child {
        if tree.color(Some(child)) == Color::Red {
            let removed = tree.splice(target)?;
            tree.set_color(child, Color::Black)?;
            return Ok(removed.entry);
        }
    }
    if tree.root != Some(target) {
        fixup_double_black(tree, target)?;
    }
    Ok(tree.splice(target)?.entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::RedBlackTree;

    fn tree(keys: &[i32]) -> RedBlackTree<i32> {
        let mut t = RedBlackTree::new();
        for &k in keys {
            t.insert(k).unwrap();
        }
        t
    }

    fn paint(tree: &mut RedBlackTree<i32>, key: i32, color: Color) {
        let id = tree.find(&key).unwrap();
        tree.arena.node_mut(id).unwrap().color = color;
    }

    fn case_of(tree: &RedBlackTree<i32>, key: i32) -> DeletionCase {
        let id = tree.find(&key).unwrap();
        DeletionContext::new(tree, id).unwrap().classify(tree).unwrap()
    }

    #[test]
    fn test_context_nephews() {
        // 20 B; 10 B, 30 B; 25 R, 35 R under 30
        let t = tree(&[20, 10, 30, 25, 35]);
        let ctx = DeletionContext::new(&t, t.find(&10).unwrap()).unwrap();
        assert_eq!(ctx.side, Some(Direction::Left));
        assert_eq!(ctx.sibling, t.find(&30));
        assert_eq!(ctx.near_nephew, t.find(&25));
        assert_eq!(ctx.far_nephew, t.find(&35));
    }

    #[test]
    fn test_classification() {
        let mut t = tree(&[20, 10, 30, 25, 35]);
        assert_eq!(case_of(&t, 20), DeletionCase::CaseRoot);
        assert_eq!(case_of(&t, 25), DeletionCase::Case1);
        assert_eq!(case_of(&t, 10), DeletionCase::Case5LR);

        paint(&mut t, 35, Color::Black);
        assert_eq!(case_of(&t, 10), DeletionCase::Case4LL);

        paint(&mut t, 25, Color::Black);
        assert_eq!(case_of(&t, 10), DeletionCase::Case3);

        paint(&mut t, 30, Color::Red);
        assert_eq!(case_of(&t, 10), DeletionCase::Case2L);
    }

    #[test]
    fn test_mirrored_classification() {
        let mut t = tree(&[20, 10, 30, 5, 15]);
        assert_eq!(case_of(&t, 30), DeletionCase::Case5RL);
        paint(&mut t, 5, Color::Black);
        assert_eq!(case_of(&t, 30), DeletionCase::Case4RR);
    }

    #[test]
    fn test_missing_sibling_is_invalid() {
        let mut t = tree(&[20, 10]);
        paint(&mut t, 10, Color::Black);
        let id = t.find(&10).unwrap();
        let err = DeletionContext::new(&t, id).unwrap().classify(&t).unwrap_err();
        assert_eq!(err.category(), "structure");
    }

    #[test]
    fn test_remove_red_leaf_needs_no_fixup() {
        let mut t = tree(&[20, 10, 30]);
        perf::reset();
        assert_eq!(t.remove(&10).unwrap(), Some(10));
        assert_eq!(perf::snapshot().deletion_fixups, 0);
        t.validate().unwrap();
    }

    #[test]
    fn test_remove_black_with_red_child() {
        let mut t = tree(&[20, 10, 30, 5]);
        // 10 and 30 are black after the recolor, 5 is red
        assert_eq!(t.remove(&10).unwrap(), Some(10));
        assert_eq!(t.color(t.find(&5)), Color::Black);
        t.validate().unwrap();
    }

    #[test]
    fn test_remove_black_leaf_far_nephew() {
        let mut t = tree(&[20, 10, 30, 35]);
        perf::reset();
        assert_eq!(t.remove(&10).unwrap(), Some(10));
        assert_eq!(perf::snapshot().deletion_fixups, 1);
        assert_eq!(t.root.and_then(|r| t.arena.get(r)).map(|n| n.entry), Some(30));
        t.validate().unwrap();
    }

    #[test]
    fn test_remove_black_leaf_near_nephew() {
        let mut t = tree(&[20, 10, 30, 25]);
        assert_eq!(t.remove(&10).unwrap(), Some(10));
        assert_eq!(t.root.and_then(|r| t.arena.get(r)).map(|n| n.entry), Some(25));
        t.validate().unwrap();
    }

    #[test]
    fn test_remove_black_leaf_propagates() {
        let mut t = tree(&[20, 10, 30]);
        paint(&mut t, 10, Color::Black);
        paint(&mut t, 30, Color::Black);
        t.validate().unwrap();

        perf::reset();
        assert_eq!(t.remove(&10).unwrap(), Some(10));
        // Case3 at 10, then CaseRoot at 20
        assert_eq!(perf::snapshot().deletion_fixups, 2);
        assert_eq!(t.color(t.find(&30)), Color::Red);
        t.validate().unwrap();
    }

    #[test]
    fn test_remove_internal_node_uses_successor() {
        let mut t = tree(&[20, 10, 30, 25, 35]);
        assert_eq!(t.remove(&30).unwrap(), Some(30));
        assert!(!t.contains(&30));
        assert_eq!(t.iter().copied().collect::<Vec<_>>(), vec![10, 20, 25, 35]);
        t.validate().unwrap();
    }

    #[test]
    fn test_remove_last_node() {
        let mut t = tree(&[1]);
        assert_eq!(t.remove(&1).unwrap(), Some(1));
        assert!(t.is_empty());
        assert_eq!(t.len(), 0);
    }
}
