//! Fixed-input scenarios for the AVL and Red-Black trees.

use arbora::dev_infrastructure::perf;
use arbora::tree::Color;
use arbora::{ArboraError, AvlTree, RedBlackTree};

fn avl(keys: &[i32]) -> AvlTree<i32> {
    let mut tree = AvlTree::new();
    for &k in keys {
        tree.insert(k).unwrap();
    }
    tree
}

fn rb(keys: &[i32]) -> RedBlackTree<i32> {
    let mut tree = RedBlackTree::new();
    for &k in keys {
        tree.insert(k).unwrap();
    }
    tree
}

#[test]
fn rb_insert_sequence_valid_at_every_step() {
    let mut tree = RedBlackTree::new();
    for k in [15, 10, 20, 8, 12, 25, 6, 11, 13, 22, 27] {
        tree.insert(k).unwrap();
        tree.validate().unwrap();
        assert_eq!(tree.root_color(), Some(Color::Black));
    }
    assert_eq!(
        tree.iter().copied().collect::<Vec<_>>(),
        vec![6, 8, 10, 11, 12, 13, 15, 20, 22, 25, 27]
    );
}

#[test]
fn avl_remove_root_of_nine() {
    let mut tree = avl(&[30, 20, 40, 10, 25, 35, 50, 5, 15]);
    assert_eq!(tree.remove(&30).unwrap(), Some(30));
    tree.validate().unwrap();
    assert_eq!(tree.len(), 8);
    assert!(!tree.contains(&30));
    assert!(tree.height() <= 4);
}

#[test]
fn rb_ascending_seven() {
    let tree = rb(&[1, 2, 3, 4, 5, 6, 7]);
    tree.validate().unwrap();
    // height counts levels; three edges from the root to the deepest node
    assert!(tree.height() - 1 <= 3);
    assert_eq!(tree.root_color(), Some(Color::Black));
}

#[test]
fn successor_and_predecessor_follow_in_order() {
    let keys = [11, 2, 14, 1, 7, 5, 8, 15, 4];
    let mut sorted = keys.to_vec();
    sorted.sort();

    let avl_tree = avl(&keys);
    let rb_tree = rb(&keys);
    for pair in sorted.windows(2) {
        assert_eq!(avl_tree.successor(&pair[0]).unwrap(), &pair[1]);
        assert_eq!(avl_tree.predecessor(&pair[1]).unwrap(), &pair[0]);
        assert_eq!(rb_tree.successor(&pair[0]).unwrap(), &pair[1]);
        assert_eq!(rb_tree.predecessor(&pair[1]).unwrap(), &pair[0]);
    }

    assert!(matches!(avl_tree.successor(&15), Err(ArboraError::NotFound { .. })));
    assert!(matches!(rb_tree.predecessor(&1), Err(ArboraError::NotFound { .. })));
    assert!(matches!(avl_tree.successor(&3), Err(ArboraError::NotFound { .. })));
    assert_eq!(avl_tree.minimum().unwrap(), &1);
    assert_eq!(rb_tree.maximum().unwrap(), &15);
}

#[test]
fn empty_tree_queries() {
    let tree: AvlTree<i32> = AvlTree::new();
    assert!(tree.minimum().is_err());
    assert!(tree.maximum().is_err());
    assert!(tree.successor(&1).is_err());
    assert!(tree.predecessor(&1).is_err());
    assert_eq!(tree.height(), 0);
    assert!(tree.render().is_empty());
    assert!(!tree.contains(&1));
}

#[test]
fn duplicate_insert_is_noop() {
    let mut tree = RedBlackTree::new();
    assert!(tree.insert(("k".to_string(), 1)).unwrap());
    assert!(!tree.insert(("k".to_string(), 2)).unwrap());
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.get(&"k".to_string()), Some(&("k".to_string(), 1)));
}

#[test]
fn traversal_orders() {
    let tree = avl(&[4, 2, 6, 1, 3, 5, 7]);
    let mut pre = Vec::new();
    tree.pre_order(|k| pre.push(*k));
    assert_eq!(pre, vec![4, 2, 1, 3, 6, 5, 7]);

    let mut post = Vec::new();
    tree.post_order(|k| post.push(*k));
    assert_eq!(post, vec![1, 3, 2, 5, 7, 6, 4]);

    let mut bfs = Vec::new();
    tree.bfs(|k| bfs.push(*k));
    assert_eq!(bfs, vec![4, 2, 6, 1, 3, 5, 7]);

    let mut reverse = Vec::new();
    tree.reverse_pre_order(|k| reverse.push(*k));
    assert_eq!(reverse, vec![4, 6, 7, 5, 2, 3, 1]);
}

#[test]
fn rb_counters_reflect_work() {
    let mut tree = RedBlackTree::new();
    perf::start_operation("ascending inserts");
    for k in 1..=7 {
        tree.insert(k).unwrap();
    }
    let insert = perf::end_operation();
    assert!(insert.rotations > 0);
    assert!(insert.insertion_fixups > 0);
    assert!(insert.color_changes > 0);
    assert_eq!(insert.deletion_fixups, 0);

    perf::start_operation("lookups");
    for k in 1..=7 {
        assert!(tree.contains(&k));
    }
    let search = perf::end_operation();
    assert_eq!(search.rotations, 0);
    assert!(search.key_comparisons >= 7);
    assert_eq!(search.nodes_visited, search.search_depth);
}

#[test]
fn avl_counters_reflect_work() {
    let mut tree = AvlTree::new();
    perf::start_operation("avl ascending");
    for k in 1..=3 {
        tree.insert(k).unwrap();
    }
    let stats = perf::end_operation();
    // one single left rotation at the root
    assert_eq!(stats.rotations, 1);
    assert_eq!(stats.insertion_fixups, 1);
    assert_eq!(stats.color_changes, 0);
}

#[test]
fn clear_then_reuse() {
    let mut tree = rb(&[5, 3, 8]);
    tree.clear();
    assert!(tree.is_empty());
    assert_eq!(tree.len(), 0);
    tree.insert(1).unwrap();
    tree.validate().unwrap();
    assert_eq!(tree.len(), 1);
}
