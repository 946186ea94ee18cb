//! Ordered sets backed by a balanced tree
//!
//! [`Set`] stores its members in a [`SearchTree`] and builds every algebraic
//! result as a fresh set by walking one operand in order and probing the
//! other. `+` is union, `-` is difference and `&` is intersection; each
//! returns `Result<Set>` because building the result inserts into a tree.
//!
//! ```rust
//! use arbora::structure::AvlSet;
//!
//! let a = AvlSet::from_entries([1, 2, 3, 4]).unwrap();
//! let b = AvlSet::from_entries([3, 4, 5]).unwrap();
//!
//! let union = (&a + &b).unwrap();
//! assert_eq!(union.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
//! let common = (&a & &b).unwrap();
//! assert!(common.is_subset(&a) && common.is_subset(&b));
//! ```

use std::fmt::{self, Debug};
use std::ops::{Add, BitAnd, Sub};

use crate::error::Result;
use crate::key::Keyed;
use crate::tree::{AvlBalance, Iter, Rebalance, RedBlackBalance, SearchTree};

/// Set over an AVL tree
pub type AvlSet<T> = Set<T, AvlBalance>;

/// Set over a Red-Black tree
pub type RedBlackSet<T> = Set<T, RedBlackBalance>;

/// Ordered set of entries, unique by key
#[derive(Clone)]
pub struct Set<T, B = AvlBalance> {
    elements: SearchTree<T, B>,
}

impl<T: Keyed, B: Rebalance> Default for Set<T, B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Keyed, B: Rebalance> Set<T, B> {
    /// Create an empty set
    pub fn new() -> Self {
        Self {
            elements: SearchTree::new(),
        }
    }

    /// Build a set from entries; later duplicates are ignored
    pub fn from_entries<I: IntoIterator<Item = T>>(entries: I) -> Result<Self> {
        let mut set = Self::new();
        for entry in entries {
            set.insert(entry)?;
        }
        Ok(set)
    }

    /// Add a member; `Ok(false)` when its key is already present
    pub fn insert(&mut self, entry: T) -> Result<bool> {
        self.elements.insert(entry)
    }

    /// Remove and return the member with `key`
    pub fn remove(&mut self, key: &T::Key) -> Result<Option<T>> {
        self.elements.remove(key)
    }

    /// True when a member has `key`
    pub fn contains(&self, key: &T::Key) -> bool {
        self.elements.contains(key)
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// True when the set has no members
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Remove every member
    pub fn clear(&mut self) {
        self.elements.clear();
    }

    /// Members in key order
    pub fn iter(&self) -> Iter<'_, T> {
        self.elements.iter()
    }

    /// True when every member of `self` is also in `other`
    pub fn is_subset(&self, other: &Self) -> bool {
        self.iter().all(|e| other.contains(e.key()))
    }
}

impl<T: Keyed + Clone, B: Rebalance> Set<T, B> {
    fn collect_from<'a, I>(members: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        let mut result = Self::new();
        for entry in members {
            result.insert(entry.clone())?;
        }
        Ok(result)
    }

    /// Members of either set; on a shared key the entry from `self` is kept
    pub fn union(&self, other: &Self) -> Result<Self> {
        Self::collect_from(self.iter().chain(other.iter()))
    }

    /// Members of `self` whose key is absent from `other`
    pub fn difference(&self, other: &Self) -> Result<Self> {
        Self::collect_from(self.iter().filter(|e| !other.contains(e.key())))
    }

    /// Members of `self` whose key is also in `other`
    pub fn intersection(&self, other: &Self) -> Result<Self> {
        Self::collect_from(self.iter().filter(|e| other.contains(e.key())))
    }

    /// Members of exactly one of the two sets
    pub fn symmetric_difference(&self, other: &Self) -> Result<Self> {
        let left = self.iter().filter(|e| !other.contains(e.key()));
        let right = other.iter().filter(|e| !self.contains(e.key()));
        Self::collect_from(left.chain(right))
    }
}

impl<T: Keyed + Debug, B: Rebalance> Set<T, B> {
    /// Text dump of the backing tree
    pub fn render(&self) -> String {
        self.elements.render()
    }

    /// Print [`Set::render`] to stdout
    pub fn show(&self) {
        print!("{}", self.render());
    }
}

impl<T: Keyed + Clone, B: Rebalance> Add<&Set<T, B>> for &Set<T, B> {
    type Output = Result<Set<T, B>>;

    fn add(self, other: &Set<T, B>) -> Self::Output {
        self.union(other)
    }
}

impl<T: Keyed + Clone, B: Rebalance> Sub<&Set<T, B>> for &Set<T, B> {
    type Output = Result<Set<T, B>>;

    fn sub(self, other: &Set<T, B>) -> Self::Output {
        self.difference(other)
    }
}

impl<T: Keyed + Clone, B: Rebalance> BitAnd<&Set<T, B>> for &Set<T, B> {
    type Output = Result<Set<T, B>>;

    fn bitand(self, other: &Set<T, B>) -> Self::Output {
        self.intersection(other)
    }
}

/// Two sets are equal when their in-order key sequences match
impl<T: Keyed, B: Rebalance> PartialEq for Set<T, B> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().map(Keyed::key).eq(other.iter().map(Keyed::key))
    }
}

impl<T: Keyed, B: Rebalance> Eq for Set<T, B> {}

impl<T: Keyed + Debug, B> Debug for Set<T, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.elements.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys<T: Keyed<Key = i32>, B: Rebalance>(set: &Set<T, B>) -> Vec<i32> {
        set.iter().map(|e| *e.key()).collect()
    }

    fn algebra<B: Rebalance>() {
        let a = Set::<i32, B>::from_entries([5, 1, 3, 7, 9]).unwrap();
        let b = Set::<i32, B>::from_entries([3, 4, 5, 6]).unwrap();

        assert_eq!(keys(&(&a + &b).unwrap()), vec![1, 3, 4, 5, 6, 7, 9]);
        assert_eq!(keys(&(&a - &b).unwrap()), vec![1, 7, 9]);
        assert_eq!(keys(&(&b - &a).unwrap()), vec![4, 6]);
        assert_eq!(keys(&(&a & &b).unwrap()), vec![3, 5]);
        assert_eq!(keys(&a.symmetric_difference(&b).unwrap()), vec![1, 4, 6, 7, 9]);
        assert_eq!(
            a.symmetric_difference(&b).unwrap(),
            b.symmetric_difference(&a).unwrap()
        );

        // operands are left untouched
        assert_eq!(keys(&a), vec![1, 3, 5, 7, 9]);
        assert_eq!(b.len(), 4);
    }

    #[test]
    fn test_algebra_avl() {
        algebra::<AvlBalance>();
    }

    #[test]
    fn test_algebra_red_black() {
        algebra::<RedBlackBalance>();
    }

    fn subset_and_equality<B: Rebalance>() {
        let small = Set::<i32, B>::from_entries([2, 4]).unwrap();
        let big = Set::<i32, B>::from_entries([1, 2, 3, 4]).unwrap();
        let empty = Set::<i32, B>::new();

        assert!(small.is_subset(&big));
        assert!(!big.is_subset(&small));
        assert!(empty.is_subset(&small));
        assert!(big.is_subset(&big));

        // insertion order does not matter
        let shuffled = Set::<i32, B>::from_entries([4, 3, 2, 1, 2]).unwrap();
        assert_eq!(big, shuffled);
        assert_ne!(big, small);
        assert_eq!((&big & &small).unwrap(), small);
        assert_eq!((&small - &big).unwrap(), empty);
        assert!((&big - &big).unwrap().is_empty());
    }

    #[test]
    fn test_subset_and_equality_avl() {
        subset_and_equality::<AvlBalance>();
    }

    #[test]
    fn test_subset_and_equality_red_black() {
        subset_and_equality::<RedBlackBalance>();
    }

    #[test]
    fn test_results_are_balanced_trees() {
        let evens = RedBlackSet::from_entries((0..200).step_by(2)).unwrap();
        let threes = RedBlackSet::from_entries((0..200).step_by(3)).unwrap();
        let union = (&evens + &threes).unwrap();
        union.elements.validate().unwrap();
        assert_eq!(union.len(), 100 + 67 - 34);

        let avl = AvlSet::from_entries(0..100).unwrap();
        let diff = (&avl - &AvlSet::from_entries(0..50).unwrap()).unwrap();
        diff.elements.validate().unwrap();
        assert_eq!(keys(&diff), (50..100).collect::<Vec<_>>());
    }

    #[test]
    fn test_pairs_keep_left_payload_on_union() {
        let left = AvlSet::from_entries([("a".to_string(), 1), ("b".to_string(), 2)]).unwrap();
        let right = AvlSet::from_entries([("b".to_string(), 20), ("c".to_string(), 30)]).unwrap();
        let union = (&left + &right).unwrap();
        let entries: Vec<_> = union.iter().cloned().collect();
        assert_eq!(
            entries,
            vec![
                ("a".to_string(), 1),
                ("b".to_string(), 2),
                ("c".to_string(), 30)
            ]
        );
        assert!(union.contains(&"c".to_string()));
        assert_eq!(format!("{:?}", left), r#"{("a", 1), ("b", 2)}"#);
    }
}
