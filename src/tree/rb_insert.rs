//! Red-Black insertion fixup
//!
//! After a RED leaf is linked, the walk classifies the current node against
//! its parent, grandparent and uncle, applies the matching recolor or
//! rotation, and continues upward until it leaves the tree.
//!
//! | case   | condition                                   | action                                |
//! |--------|---------------------------------------------|---------------------------------------|
//! | Root   | no parent or no grandparent                 | paint the root BLACK                  |
//! | NoFixup| parent BLACK, or node and parent differ     | none                                  |
//! | Case1  | uncle RED                                   | parent, uncle BLACK; grandparent RED  |
//! | Case2A | node right of a left parent                 | LEFT at parent, RIGHT at grandparent  |
//! | Case2B | node left of a right parent                 | RIGHT at parent, LEFT at grandparent  |
//! | Case3A | node left of a left parent                  | RIGHT at grandparent                  |
//! | Case3B | node right of a right parent                | LEFT at grandparent                   |
//!
//! Rotations swap colors, so the lifted node takes the grandparent's BLACK
//! and the grandparent turns RED without separate recoloring.

use crate::dev_infrastructure::perf;
use crate::error::Result;

use super::node::{Color, Direction, NodeId};
use super::rotation::{rotate, ColorSwapPolicy};
use super::search_tree::SearchTree;

/// Situation of a node during the insertion walk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InsertionCase {
    /// Node is the root or hangs directly below it
    Root,
    /// Nothing to repair at this node
    NoFixup,
    /// Red uncle: recolor and continue from the grandparent
    Case1,
    /// Zig-zag with a left parent
    Case2A,
    /// Zig-zag with a right parent
    Case2B,
    /// Straight line on the left
    Case3A,
    /// Straight line on the right
    Case3B,
}

impl InsertionCase {
    /// True for the cases that change colors or shape
    pub fn is_corrective(self) -> bool {
        !matches!(self, InsertionCase::Root | InsertionCase::NoFixup)
    }
}

/// A node and its relatives, captured before each decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertionContext {
    /// The node being examined
    pub node: NodeId,
    /// Its parent
    pub parent: Option<NodeId>,
    /// Its parent's parent
    pub grandparent: Option<NodeId>,
    /// The grandparent's other child
    pub uncle: Option<NodeId>,
}

impl InsertionContext {
    /// Capture the relatives of `node`
    pub fn new<T, B>(tree: &SearchTree<T, B>, node: NodeId) -> Result<Self> {
        let mut ctx = Self {
            node,
            parent: None,
            grandparent: None,
            uncle: None,
        };
        ctx.update_relatives(tree)?;
        Ok(ctx)
    }

    /// Re-read parent, grandparent and uncle from the tree
    pub fn update_relatives<T, B>(&mut self, tree: &SearchTree<T, B>) -> Result<()> {
        self.parent = tree.parent_of(self.node)?;
        self.grandparent = match self.parent {
            Some(p) => tree.parent_of(p)?,
            None => None,
        };
        self.uncle = match (self.parent, self.grandparent) {
            (Some(p), Some(g)) => {
                let side = tree.side_of(p)?.unwrap_or(Direction::Left);
                tree.child_of(g, side.opposite())?
            }
            _ => None,
        };
        Ok(())
    }

    /// Decide which case applies
    pub fn classify<T, B>(&self, tree: &SearchTree<T, B>) -> Result<InsertionCase> {
        let (Some(parent), Some(_)) = (self.parent, self.grandparent) else {
            return Ok(InsertionCase::Root);
        };
        let node_color = tree.color(Some(self.node));
        let parent_color = tree.color(Some(parent));
        if parent_color == Color::Black || node_color != parent_color {
            return Ok(InsertionCase::NoFixup);
        }
        if tree.color(self.uncle) == Color::Red {
            return Ok(InsertionCase::Case1);
        }
        let parent_side = tree.side_of(parent)?;
        let node_side = tree.side_of(self.node)?;
        Ok(match (parent_side, node_side) {
            (Some(Direction::Left), Some(Direction::Right)) => InsertionCase::Case2A,
            (Some(Direction::Right), Some(Direction::Left)) => InsertionCase::Case2B,
            (Some(Direction::Left), _) => InsertionCase::Case3A,
            _ => InsertionCase::Case3B,
        })
    }

    /// Apply `case` and return the node the walk continues from
    pub fn apply<T, B>(&self, tree: &mut SearchTree<T, B>, case: InsertionCase) -> Result<Option<NodeId>> {
        match case {
            InsertionCase::Root => {
                if tree.root == Some(self.node) {
                    tree.set_color(self.node, Color::Black)?;
                }
            }
            InsertionCase::NoFixup => {}
            InsertionCase::Case1 => {
                let (Some(parent), Some(grandparent)) = (self.parent, self.grandparent) else {
                    return Ok(None);
                };
                tree.set_color(parent, Color::Black)?;
                if let Some(uncle) = self.uncle {
                    tree.set_color(uncle, Color::Black)?;
                }
                if tree.root != Some(grandparent) {
                    tree.set_color(grandparent, Color::Red)?;
                }
                return Ok(Some(grandparent));
            }
            InsertionCase::Case2A | InsertionCase::Case2B => {
                let (Some(parent), Some(grandparent)) = (self.parent, self.grandparent) else {
                    return Ok(None);
                };
                let first = if case == InsertionCase::Case2A {
                    Direction::Left
                } else {
                    Direction::Right
                };
                rotate::<T, B, ColorSwapPolicy>(tree, parent, first)?;
                rotate::<T, B, ColorSwapPolicy>(tree, grandparent, first.opposite())?;
            }
            InsertionCase::Case3A | InsertionCase::Case3B => {
                let Some(grandparent) = self.grandparent else {
                    return Ok(None);
                };
                let dir = if case == InsertionCase::Case3A {
                    Direction::Right
                } else {
                    Direction::Left
                };
                rotate::<T, B, ColorSwapPolicy>(tree, grandparent, dir)?;
            }
        }
        tree.parent_of(self.node)
    }
}

/// Restore the Red-Black invariants after linking the RED leaf `node`
pub fn fixup_after_insert<T, B>(tree: &mut SearchTree<T, B>, node: NodeId) -> Result<()> {
    let mut cursor = Some(node);
    while let Some(id) = cursor {
        let ctx = InsertionContext::new(tree, id)?;
        let case = ctx.classify(tree)?;
        if case.is_corrective() {
            log::trace!("rb insert fixup {:?} at {:?}", case, id);
            perf::record_insertion_fixup();
        }
        cursor = ctx.apply(tree, case)?;
    }
    Ok(())
}
