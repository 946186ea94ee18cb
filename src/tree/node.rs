//! Tree nodes and the arena that owns them
//!
//! Nodes are stored in a slab indexed by [`NodeId`]. Child links express
//! structural ownership; the `parent` link is a plain back-reference used by
//! the fixup walks. Freed slots are recycled through a free list.

use crate::error::{ArboraError, Result};

/// Node color used by the Red-Black tree; AVL nodes carry it unused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// Red node
    Red,
    /// Black node
    Black,
}

/// Side of a binary node, also the direction of a rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Left child / left rotation
    Left,
    /// Right child / right rotation
    Right,
}

impl Direction {
    /// The other side
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Index of a node inside its arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// A binary tree node
#[derive(Debug, Clone)]
pub struct Node<T> {
    /// The stored entry; its key is immutable while linked
    pub entry: T,
    /// Levels in the subtree rooted here; a leaf has height 1
    pub height: u32,
    /// Red-Black color
    pub color: Color,
    /// Left child
    pub left: Option<NodeId>,
    /// Right child
    pub right: Option<NodeId>,
    /// Structural parent
    pub parent: Option<NodeId>,
}

impl<T> Node<T> {
    /// Fresh unlinked node: RED, height 1, no relatives
    pub fn new(entry: T) -> Self {
        Self {
            entry,
            height: 1,
            color: Color::Red,
            left: None,
            right: None,
            parent: None,
        }
    }

    /// Child on the given side
    #[inline]
    pub fn child(&self, dir: Direction) -> Option<NodeId> {
        match dir {
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    /// Replace the child on the given side
    #[inline]
    pub fn set_child(&mut self, dir: Direction, child: Option<NodeId>) {
        match dir {
            Direction::Left => self.left = child,
            Direction::Right => self.right = child,
        }
    }

    /// True when the node has no children
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Slab of nodes with slot reuse
#[derive(Debug, Clone)]
pub struct NodeArena<T> {
    slots: Vec<Option<Node<T>>>,
    free_list: Vec<NodeId>,
    live: usize,
}

impl<T> Default for NodeArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> NodeArena<T> {
    /// Empty arena
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            live: 0,
        }
    }

    /// Number of live nodes
    #[inline]
    pub fn len(&self) -> usize {
        self.live
    }

    /// True when no node is live
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Store a new node and return its id
    pub fn alloc(&mut self, node: Node<T>) -> NodeId {
        self.live += 1;
        if let Some(id) = self.free_list.pop() {
            self.slots[id.index()] = Some(node);
            id
        } else {
            let id = NodeId(self.slots.len() as u32);
            self.slots.push(Some(node));
            id
        }
    }

    /// Remove a node, returning it; the slot becomes reusable
    pub fn free(&mut self, id: NodeId) -> Result<Node<T>> {
        let node = self
            .slots
            .get_mut(id.index())
            .and_then(Option::take)
            .ok_or_else(|| ArboraError::invalid_structure(format!("free of vacant node {:?}", id)))?;
        self.free_list.push(id);
        self.live -= 1;
        Ok(node)
    }

    /// Borrow a live node
    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&Node<T>> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    /// Mutably borrow a live node
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node<T>> {
        self.slots.get_mut(id.index()).and_then(Option::as_mut)
    }

    /// Borrow a live node, failing on a dangling id
    #[inline]
    pub fn node(&self, id: NodeId) -> Result<&Node<T>> {
        self.get(id)
            .ok_or_else(|| ArboraError::invalid_structure(format!("dangling node {:?}", id)))
    }

    /// Mutably borrow a live node, failing on a dangling id
    #[inline]
    pub fn node_mut(&mut self, id: NodeId) -> Result<&mut Node<T>> {
        self.get_mut(id)
            .ok_or_else(|| ArboraError::invalid_structure(format!("dangling node {:?}", id)))
    }

    /// Exchange the entries of two live nodes, leaving links untouched
    pub fn swap_entries(&mut self, a: NodeId, b: NodeId) -> Result<()> {
        if a == b {
            return Ok(());
        }
        let (lo, hi) = if a.index() < b.index() { (a, b) } else { (b, a) };
        let (head, tail) = self.slots.split_at_mut(hi.index());
        match (head.get_mut(lo.index()), tail.first_mut()) {
            (Some(Some(x)), Some(Some(y))) => {
                std::mem::swap(&mut x.entry, &mut y.entry);
                Ok(())
            }
            _ => Err(ArboraError::invalid_structure("entry swap on vacant node")),
        }
    }

    /// Drop every node
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_list.clear();
        self.live = 0;
    }

    /// Height of an optional subtree; absent is 0
    #[inline]
    pub fn height_of(&self, id: Option<NodeId>) -> u32 {
        id.and_then(|id| self.get(id)).map_or(0, |n| n.height)
    }

    /// Color of an optional node; absent counts as BLACK
    #[inline]
    pub fn color_of(&self, id: Option<NodeId>) -> Color {
        id.and_then(|id| self.get(id)).map_or(Color::Black, |n| n.color)
    }

    /// Recompute a node's height from its children
    pub fn update_height(&mut self, id: NodeId) -> Result<()> {
        let (left, right) = {
            let node = self.node(id)?;
            (node.left, node.right)
        };
        let height = 1 + self.height_of(left).max(self.height_of(right));
        self.node_mut(id)?.height = height;
        Ok(())
    }

    /// `height(right) - height(left)`
    pub fn balance_factor(&self, id: NodeId) -> Result<i64> {
        let node = self.node(id)?;
        Ok(self.height_of(node.right) as i64 - self.height_of(node.left) as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_node_is_red_leaf() {
        let node = Node::new(5);
        assert_eq!(node.color, Color::Red);
        assert_eq!(node.height, 1);
        assert!(node.is_leaf());
        assert!(node.parent.is_none());
    }

    #[test]
    fn test_direction_opposite() {
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Right.opposite(), Direction::Left);
    }

    #[test]
    fn test_arena_reuses_freed_slots() {
        let mut arena = NodeArena::new();
        let a = arena.alloc(Node::new(1));
        let b = arena.alloc(Node::new(2));
        assert_eq!(arena.len(), 2);

        let freed = arena.free(a).unwrap();
        assert_eq!(freed.entry, 1);
        assert!(arena.get(a).is_none());

        let c = arena.alloc(Node::new(3));
        assert_eq!(c, a);
        assert_eq!(arena.node(c).unwrap().entry, 3);
        assert_eq!(arena.node(b).unwrap().entry, 2);
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn test_double_free_is_invalid_structure() {
        let mut arena = NodeArena::new();
        let a = arena.alloc(Node::new(1));
        arena.free(a).unwrap();
        let err = arena.free(a).unwrap_err();
        assert_eq!(err.category(), "structure");
    }

    #[test]
    fn test_swap_entries() {
        let mut arena = NodeArena::new();
        let a = arena.alloc(Node::new("a"));
        let b = arena.alloc(Node::new("b"));
        arena.swap_entries(b, a).unwrap();
        assert_eq!(arena.node(a).unwrap().entry, "b");
        assert_eq!(arena.node(b).unwrap().entry, "a");
        arena.swap_entries(a, a).unwrap();
        assert_eq!(arena.node(a).unwrap().entry, "b");
    }

    #[test]
    fn test_height_and_balance() {
        let mut arena = NodeArena::new();
        let root = arena.alloc(Node::new(2));
        let right = arena.alloc(Node::new(3));
        arena.node_mut(root).unwrap().right = Some(right);
        arena.node_mut(right).unwrap().parent = Some(root);
        arena.update_height(root).unwrap();

        assert_eq!(arena.node(root).unwrap().height, 2);
        assert_eq!(arena.balance_factor(root).unwrap(), 1);
        assert_eq!(arena.height_of(None), 0);
        assert_eq!(arena.color_of(None), Color::Black);
    }
}
