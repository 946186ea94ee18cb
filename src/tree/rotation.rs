//! Single rotations shared by both balanced trees
//!
//! A LEFT rotation at `n` lifts `n.right` into `n`'s place; a RIGHT rotation
//! lifts `n.left`. The lifted child's inner subtree moves across to `n`, and
//! the link that referenced `n` (parent slot or tree root) is redirected. The
//! per-tree bookkeeping that follows the relinking is a [`RotationPolicy`]:
//! AVL refreshes heights, Red-Black swaps the two colors.

use crate::dev_infrastructure::perf;
use crate::error::{ArboraError, Result};

use super::node::{Direction, NodeArena, NodeId};
use super::search_tree::SearchTree;

/// Bookkeeping applied after the links of a rotation are rewritten
pub trait RotationPolicy {
    /// `pivot` is the node rotated down, `lifted` the child that replaced it
    fn after_rotation<T>(arena: &mut NodeArena<T>, pivot: NodeId, lifted: NodeId) -> Result<()>;
}

/// Recompute `height(pivot)` then `height(lifted)`
#[derive(Debug, Clone, Copy, Default)]
pub struct HeightPolicy;

impl RotationPolicy for HeightPolicy {
    fn after_rotation<T>(arena: &mut NodeArena<T>, pivot: NodeId, lifted: NodeId) -> Result<()> {
        arena.update_height(pivot)?;
        arena.update_height(lifted)
    }
}

/// Swap the colors of pivot and lifted child
///
/// The lifted node inherits the pivot's color, so the subtree keeps the color
/// its parent saw, and the pivot takes the child's former color.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorSwapPolicy;

impl RotationPolicy for ColorSwapPolicy {
    fn after_rotation<T>(arena: &mut NodeArena<T>, pivot: NodeId, lifted: NodeId) -> Result<()> {
        let pivot_color = arena.node(pivot)?.color;
        let lifted_color = arena.node(lifted)?.color;
        if pivot_color != lifted_color {
            arena.node_mut(pivot)?.color = lifted_color;
            arena.node_mut(lifted)?.color = pivot_color;
            perf::add(perf::Counter::ColorChanges, 2);
        }
        Ok(())
    }
}

/// Rotate at `node` in direction `dir`, returning the new local subtree root
///
/// Fails with `InvalidStructure` when the child on the opposite side of `dir`
/// is missing.
pub fn rotate<T, B, P: RotationPolicy>(
    tree: &mut SearchTree<T, B>,
    node: NodeId,
    dir: Direction,
) -> Result<NodeId> {
    let lifted = tree.child_of(node, dir.opposite())?.ok_or_else(|| {
        ArboraError::invalid_structure(format!(
            "invalid rotation: {:?} rotation at {:?} without a {:?} child",
            dir,
            node,
            dir.opposite()
        ))
    })?;
    let inner = tree.child_of(lifted, dir)?;
    let parent = tree.parent_of(node)?;

    tree.arena.node_mut(node)?.set_child(dir.opposite(), inner);
    if let Some(inner) = inner {
        tree.arena.node_mut(inner)?.parent = Some(node);
    }

    tree.replace_child(parent, node, Some(lifted))?;

    tree.arena.node_mut(lifted)?.set_child(dir, Some(node));
    tree.arena.node_mut(node)?.parent = Some(lifted);

    P::after_rotation(&mut tree.arena, node, lifted)?;
    perf::record_rotation();
    Ok(lifted)
}
