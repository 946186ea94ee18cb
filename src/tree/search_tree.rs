//! Shared binary search tree core
//!
//! [`SearchTree`] owns the node arena and root and implements everything the
//! AVL and Red-Black trees have in common: descent, placement, neighbour
//! queries, splicing, link validation and teardown. The balancing discipline is
//! a type parameter implementing [`Rebalance`], so the two trees are
//! `SearchTree<T, AvlBalance>` and `SearchTree<T, RedBlackBalance>`.

use std::cmp::Ordering;
use std::collections::VecDeque;
use std::marker::PhantomData;

use crate::dev_infrastructure::perf;
use crate::error::{ArboraError, Result};
use crate::key::Keyed;
use crate::structure::NodeHandle;

use super::node::{Color, Direction, Node, NodeArena, NodeId};

/// Balancing discipline plugged into a [`SearchTree`]
///
/// `after_insert` receives a freshly linked leaf and restores the discipline's
/// invariants. `remove_node` unlinks the entry stored at `node` (which may
/// have two children) and returns it with the invariants restored.
pub trait Rebalance: Sized {
    /// Display name of trees using this discipline
    const NAME: &'static str;

    /// Restore balance after `node` was linked as a new leaf
    fn after_insert<T: Keyed>(tree: &mut SearchTree<T, Self>, node: NodeId) -> Result<()>;

    /// Remove the entry at `node` and restore balance
    fn remove_node<T: Keyed>(tree: &mut SearchTree<T, Self>, node: NodeId) -> Result<T>;

    /// Check the discipline-specific invariants
    fn check_balance<T: Keyed>(tree: &SearchTree<T, Self>) -> Result<()>;
}

/// Result of a key descent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Probe {
    /// The key is stored at this node
    Found(NodeId),
    /// The key is absent; a new node belongs under `parent` on `side`
    Vacant {
        parent: Option<NodeId>,
        side: Direction,
    },
}

/// Binary search tree over an arena, parameterized by its balancing discipline
#[derive(Debug, Clone)]
pub struct SearchTree<T, B> {
    pub(crate) arena: NodeArena<T>,
    pub(crate) root: Option<NodeId>,
    _balance: PhantomData<B>,
}

impl<T, B> Default for SearchTree<T, B> {
    fn default() -> Self {
        Self {
            arena: NodeArena::new(),
            root: None,
            _balance: PhantomData,
        }
    }
}

impl<T, B> SearchTree<T, B> {
    /// Number of stored entries
    #[inline]
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// True when the tree stores nothing
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of levels; an empty tree has height 0
    pub fn height(&self) -> usize {
        let mut levels = 0;
        let mut frontier: Vec<NodeId> = self.root.into_iter().collect();
        while !frontier.is_empty() {
            levels += 1;
            frontier = frontier
                .iter()
                .filter_map(|&id| self.arena.get(id))
                .flat_map(|n| n.left.into_iter().chain(n.right))
                .collect();
        }
        levels
    }

    /// Drop every node
    pub fn clear(&mut self) {
        if !self.is_empty() {
            log::debug!("clearing tree with {} nodes", self.len());
        }
        self.arena.clear();
        self.root = None;
    }

    /// Color of the root, if any
    pub fn root_color(&self) -> Option<Color> {
        self.root.and_then(|id| self.arena.get(id)).map(|n| n.color)
    }

    #[inline]
    pub(crate) fn parent_of(&self, id: NodeId) -> Result<Option<NodeId>> {
        Ok(self.arena.node(id)?.parent)
    }

    #[inline]
    pub(crate) fn child_of(&self, id: NodeId, dir: Direction) -> Result<Option<NodeId>> {
        Ok(self.arena.node(id)?.child(dir))
    }

    /// Which side of its parent `id` hangs on; `None` for the root
    pub(crate) fn side_of(&self, id: NodeId) -> Result<Option<Direction>> {
        let Some(parent) = self.parent_of(id)? else {
            return Ok(None);
        };
        let p = self.arena.node(parent)?;
        if p.left == Some(id) {
            Ok(Some(Direction::Left))
        } else if p.right == Some(id) {
            Ok(Some(Direction::Right))
        } else {
            Err(ArboraError::invalid_structure(format!(
                "node {:?} is not a child of its parent {:?}",
                id, parent
            )))
        }
    }

    /// Point whatever referenced `old` under `parent` (or the root) at `new`
    pub(crate) fn replace_child(
        &mut self,
        parent: Option<NodeId>,
        old: NodeId,
        new: Option<NodeId>,
    ) -> Result<()> {
        match parent {
            None => self.root = new,
            Some(p) => {
                let node = self.arena.node_mut(p)?;
                if node.left == Some(old) {
                    node.left = new;
                } else if node.right == Some(old) {
                    node.right = new;
                } else {
                    return Err(ArboraError::invalid_structure(format!(
                        "node {:?} is not a child of {:?}",
                        old, p
                    )));
                }
            }
        }
        if let Some(n) = new {
            self.arena.node_mut(n)?.parent = parent;
        }
        Ok(())
    }

    /// Write a color, counting it when it actually changes
    pub(crate) fn set_color(&mut self, id: NodeId, color: Color) -> Result<()> {
        let node = self.arena.node_mut(id)?;
        if node.color != color {
            node.color = color;
            perf::record_color_change();
        }
        Ok(())
    }

    #[inline]
    pub(crate) fn color(&self, id: Option<NodeId>) -> Color {
        self.arena.color_of(id)
    }

    /// Leftmost node of the subtree at `id`
    pub(crate) fn subtree_min(&self, mut id: NodeId) -> Result<NodeId> {
        while let Some(left) = self.arena.node(id)?.left {
            perf::record_visit();
            id = left;
        }
        Ok(id)
    }

    /// Rightmost node of the subtree at `id`
    pub(crate) fn subtree_max(&self, mut id: NodeId) -> Result<NodeId> {
        while let Some(right) = self.arena.node(id)?.right {
            perf::record_visit();
            id = right;
        }
        Ok(id)
    }

    /// In-order neighbour of `id` on the given side
    pub(crate) fn neighbour(&self, id: NodeId, dir: Direction) -> Result<Option<NodeId>> {
        if let Some(child) = self.child_of(id, dir)? {
            let edge = match dir {
                Direction::Right => self.subtree_min(child)?,
                Direction::Left => self.subtree_max(child)?,
            };
            return Ok(Some(edge));
        }
        let mut current = id;
        while let Some(parent) = self.parent_of(current)? {
            if self.child_of(parent, dir)? != Some(current) {
                return Ok(Some(parent));
            }
            current = parent;
        }
        Ok(None)
    }

    /// Unlink a node with at most one child, promoting that child
    pub(crate) fn splice(&mut self, id: NodeId) -> Result<Node<T>> {
        let (parent, child) = {
            let node = self.arena.node(id)?;
            if node.left.is_some() && node.right.is_some() {
                return Err(ArboraError::invalid_structure(format!(
                    "cannot splice node {:?} with two children",
                    id
                )));
            }
            (node.parent, node.left.or(node.right))
        };
        self.replace_child(parent, id, child)?;
        self.arena.free(id)
    }

    /// Node to physically unlink when removing the entry at `id`
    ///
    /// A node with two children trades entries with its in-order successor,
    /// which has at most one child and is returned instead.
    pub(crate) fn removal_target(&mut self, id: NodeId) -> Result<NodeId> {
        let (left, right) = {
            let node = self.arena.node(id)?;
            (node.left, node.right)
        };
        match (left, right) {
            (Some(_), Some(right)) => {
                let successor = self.subtree_min(right)?;
                self.arena.swap_entries(id, successor)?;
                Ok(successor)
            }
            _ => Ok(id),
        }
    }
}

impl<T: Keyed, B: Rebalance> SearchTree<T, B> {
    /// Create an empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Display name of the balancing discipline
    pub fn name(&self) -> &'static str {
        B::NAME
    }

    /// Insert an entry; `Ok(false)` when its key is already present
    ///
    /// A duplicate leaves the stored entry, payload included, untouched.
    pub fn insert(&mut self, entry: T) -> Result<bool> {
        match self.probe(entry.key()) {
            Probe::Found(_) => Ok(false),
            Probe::Vacant { parent, side } => {
                let id = self.attach(entry, parent, side)?;
                B::after_insert(self, id)?;
                Ok(true)
            }
        }
    }

    /// Remove the entry with `key`, returning it
    pub fn remove(&mut self, key: &T::Key) -> Result<Option<T>> {
        match self.find(key) {
            Some(id) => B::remove_node(self, id).map(Some),
            None => Ok(None),
        }
    }

    /// True when `key` is stored
    pub fn contains(&self, key: &T::Key) -> bool {
        self.find(key).is_some()
    }

    /// Borrow the entry stored under `key`
    pub fn get(&self, key: &T::Key) -> Option<&T> {
        self.find(key)
            .and_then(|id| self.arena.get(id))
            .map(|n| &n.entry)
    }

    /// Payload access to the entry stored under `key`
    pub fn get_node(&mut self, key: &T::Key) -> Option<NodeHandle<'_, T>> {
        let id = self.find(key)?;
        self.arena.get_mut(id).map(|n| NodeHandle::new(&mut n.entry))
    }

    /// Smallest entry
    pub fn minimum(&self) -> Result<&T> {
        let root = self.root.ok_or_else(|| ArboraError::not_found("minimum of an empty tree"))?;
        let id = self.subtree_min(root)?;
        Ok(&self.arena.node(id)?.entry)
    }

    /// Largest entry
    pub fn maximum(&self) -> Result<&T> {
        let root = self.root.ok_or_else(|| ArboraError::not_found("maximum of an empty tree"))?;
        let id = self.subtree_max(root)?;
        Ok(&self.arena.node(id)?.entry)
    }

    /// Entry immediately after `key` in key order
    pub fn successor(&self, key: &T::Key) -> Result<&T> {
        self.neighbour_entry(key, Direction::Right, "successor")
    }

    /// Entry immediately before `key` in key order
    pub fn predecessor(&self, key: &T::Key) -> Result<&T> {
        self.neighbour_entry(key, Direction::Left, "predecessor")
    }

    fn neighbour_entry(&self, key: &T::Key, dir: Direction, what: &str) -> Result<&T> {
        if self.is_empty() {
            return Err(ArboraError::not_found(format!("{} in an empty tree", what)));
        }
        let id = self
            .find(key)
            .ok_or_else(|| ArboraError::not_found(format!("{:?} is not in the tree", key)))?;
        let next = self
            .neighbour(id, dir)?
            .ok_or_else(|| ArboraError::not_found(format!("no {} for {:?}", what, key)))?;
        Ok(&self.arena.node(next)?.entry)
    }

    /// Check BST ordering, parent links, node count and the balancing invariants
    pub fn validate(&self) -> Result<()> {
        self.check_links()?;
        B::check_balance(self)
    }

    /// Descend towards `key`, counting every node examined
    pub(crate) fn probe(&self, key: &T::Key) -> Probe {
        let mut parent = None;
        let mut side = Direction::Left;
        let mut cursor = self.root;
        while let Some(id) = cursor {
            let Some(node) = self.arena.get(id) else {
                break;
            };
            perf::record_visit();
            perf::record_comparison();
            match key.cmp(node.entry.key()) {
                Ordering::Less => {
                    parent = Some(id);
                    side = Direction::Left;
                    cursor = node.left;
                }
                Ordering::Greater => {
                    parent = Some(id);
                    side = Direction::Right;
                    cursor = node.right;
                }
                Ordering::Equal => return Probe::Found(id),
            }
        }
        Probe::Vacant { parent, side }
    }

    pub(crate) fn find(&self, key: &T::Key) -> Option<NodeId> {
        match self.probe(key) {
            Probe::Found(id) => Some(id),
            Probe::Vacant { .. } => None,
        }
    }

    /// Link a fresh RED leaf at a vacant position
    pub(crate) fn attach(&mut self, entry: T, parent: Option<NodeId>, side: Direction) -> Result<NodeId> {
        let id = self.arena.alloc(Node::new(entry));
        match parent {
            None => self.root = Some(id),
            Some(p) => {
                self.arena.node_mut(p)?.set_child(side, Some(id));
                self.arena.node_mut(id)?.parent = Some(p);
            }
        }
        Ok(id)
    }

    fn check_links(&self) -> Result<()> {
        let Some(root) = self.root else {
            return if self.arena.is_empty() {
                Ok(())
            } else {
                Err(ArboraError::invalid_structure("empty tree owns live nodes"))
            };
        };
        if self.parent_of(root)?.is_some() {
            return Err(ArboraError::invalid_structure("root has a parent"));
        }

        let mut reached = 0usize;
        let mut queue = VecDeque::from([root]);
        while let Some(id) = queue.pop_front() {
            reached += 1;
            let node = self.arena.node(id)?;
            for (dir, child) in [(Direction::Left, node.left), (Direction::Right, node.right)] {
                let Some(child) = child else { continue };
                let c = self.arena.node(child)?;
                if c.parent != Some(id) {
                    return Err(ArboraError::invalid_structure(format!(
                        "child {:?} does not point back to {:?}",
                        child, id
                    )));
                }
                let ordered = match dir {
                    Direction::Left => c.entry.key() < node.entry.key(),
                    Direction::Right => c.entry.key() > node.entry.key(),
                };
                if !ordered {
                    return Err(ArboraError::invalid_structure(format!(
                        "{:?} child {:?} out of order under {:?}",
                        dir,
                        c.entry.key(),
                        node.entry.key()
                    )));
                }
                queue.push_back(child);
            }
        }
        if reached != self.len() {
            return Err(ArboraError::invalid_structure(format!(
                "{} nodes reachable but {} live",
                reached,
                self.len()
            )));
        }

        let keys: Vec<&T::Key> = self.iter().map(|entry| entry.key()).collect();
        if keys.windows(2).any(|w| w[0] >= w[1]) {
            return Err(ArboraError::invalid_structure("in-order keys not strictly ascending"));
        }
        Ok(())
    }
}
