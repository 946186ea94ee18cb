//! Traversals and the sideways tree dump

use std::collections::VecDeque;
use std::fmt::{Debug, Write};
use std::iter::FusedIterator;

use super::node::{NodeArena, NodeId};
use super::search_tree::SearchTree;

/// In-order iterator over a tree's entries
#[derive(Debug)]
pub struct Iter<'a, T> {
    arena: &'a NodeArena<T>,
    stack: Vec<NodeId>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    fn new(arena: &'a NodeArena<T>, root: Option<NodeId>) -> Self {
        let mut iter = Self {
            arena,
            stack: Vec::new(),
            remaining: arena.len(),
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut cursor: Option<NodeId>) {
        while let Some(id) = cursor {
            self.stack.push(id);
            cursor = self.arena.get(id).and_then(|n| n.left);
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let arena = self.arena;
        let id = self.stack.pop()?;
        let node = arena.get(id)?;
        self.push_left_spine(node.right);
        self.remaining = self.remaining.saturating_sub(1);
        Some(&node.entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

impl<'a, T, B> IntoIterator for &'a SearchTree<T, B> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, B> SearchTree<T, B> {
    /// Entries in ascending key order
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.arena, self.root)
    }

    /// Entries in ascending key order, collected
    pub fn ordered_content(&self) -> Vec<&T> {
        self.iter().collect()
    }

    /// Visit entries left, node, right
    pub fn in_order<F: FnMut(&T)>(&self, mut visit: F) {
        self.iter().for_each(|e| visit(e));
    }

    /// Visit entries node, left, right
    pub fn pre_order<F: FnMut(&T)>(&self, mut visit: F) {
        let mut stack: Vec<NodeId> = self.root.into_iter().collect();
        while let Some(id) = stack.pop() {
            let Some(node) = self.arena.get(id) else { continue };
            visit(&node.entry);
            stack.extend(node.right);
            stack.extend(node.left);
        }
    }

    /// Visit entries node, right, left
    pub fn reverse_pre_order<F: FnMut(&T)>(&self, mut visit: F) {
        let mut stack: Vec<NodeId> = self.root.into_iter().collect();
        while let Some(id) = stack.pop() {
            let Some(node) = self.arena.get(id) else { continue };
            visit(&node.entry);
            stack.extend(node.left);
            stack.extend(node.right);
        }
    }

    /// Visit entries left, right, node
    pub fn post_order<F: FnMut(&T)>(&self, mut visit: F) {
        // reversed (node, right, left) is (left, right, node)
        let mut order = Vec::with_capacity(self.len());
        let mut stack: Vec<NodeId> = self.root.into_iter().collect();
        while let Some(id) = stack.pop() {
            let Some(node) = self.arena.get(id) else { continue };
            order.push(id);
            stack.extend(node.left);
            stack.extend(node.right);
        }
        for id in order.into_iter().rev() {
            if let Some(node) = self.arena.get(id) {
                visit(&node.entry);
            }
        }
    }

    /// Visit entries level by level, left to right
    pub fn bfs<F: FnMut(&T)>(&self, mut visit: F) {
        let mut queue: VecDeque<NodeId> = self.root.into_iter().collect();
        while let Some(id) = queue.pop_front() {
            let Some(node) = self.arena.get(id) else { continue };
            visit(&node.entry);
            queue.extend(node.left);
            queue.extend(node.right);
        }
    }
}

impl<T: Debug, B> SearchTree<T, B> {
    /// Sideways dump: right subtree above, left below, `#` for a missing
    /// child of an internal node
    pub fn render(&self) -> String {
        let mut out = String::new();
        if self.root.is_some() {
            self.render_node(self.root, &mut String::new(), &mut out);
        }
        out
    }

    fn render_node(&self, id: Option<NodeId>, path: &mut String, out: &mut String) {
        let node = id.and_then(|id| self.arena.get(id));
        let internal = node.is_some_and(|n| !n.is_leaf());

        if internal {
            path.push('r');
            self.render_node(node.and_then(|n| n.right), path, out);
            path.pop();
        }

        let bytes = path.as_bytes();
        for pair in bytes.windows(2) {
            out.push_str(if pair[0] != pair[1] { "│   " } else { "    " });
        }
        match bytes.last() {
            Some(b'r') => out.push_str("┌───"),
            Some(_) => out.push_str("└───"),
            None => {}
        }
        match node {
            Some(n) => {
                let _ = writeln!(out, "{:?}", n.entry);
            }
            None => out.push_str("#\n"),
        }

        if internal {
            path.push('l');
            self.render_node(node.and_then(|n| n.left), path, out);
            path.pop();
        }
    }
}
