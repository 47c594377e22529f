use avltree::AvlTree;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[test]
fn in_order_traversal_is_sorted() {
    init_tracing();

    let mut tree = AvlTree::new();
    for value in [5, 3, 8, 1, 4, 7, 9] {
        tree.insert(value);
        tree.assert_valid();
    }

    assert_eq!(tree.to_vec(), [&1, &3, &4, &5, &7, &8, &9]);
    assert_eq!(tree.size(), 7);

    // AVL height bound: ~1.44 * log2(n + 1); for 7 nodes that allows at
    // most 4 levels.
    let height = {
        fn height<T>(node: Option<&avltree::Node<T>>) -> usize {
            node.map_or(0, |n| 1 + height(n.left()).max(height(n.right())))
        }
        height(tree.root())
    };
    assert!(height <= 4, "tree of 7 nodes has height {height}");
}

#[test]
fn ascending_inserts_trigger_left_rotation() {
    init_tracing();

    let mut tree = AvlTree::new();
    for value in [10, 20, 30] {
        tree.insert(value);
        tree.assert_valid();
    }

    // The pathological right-leaning insert must have been fixed by a
    // single left rotation: 20 is now the root with 10 and 30 as children.
    let root = tree.root().unwrap();
    assert_eq!(*root.value(), 20);
    assert_eq!(root.left().map(|n| *n.value()), Some(10));
    assert_eq!(root.right().map(|n| *n.value()), Some(30));
}

#[test]
fn split_then_join_restores_the_multiset() {
    init_tracing();

    let mut tree: AvlTree<u32> = (1..=7).collect();
    tree.assert_valid();

    // 1..=7 inserted in order builds the perfect tree rooted at 4; pick a
    // non-root value with children to split below.
    let detached = tree.split(&2).expect("2 is a non-root value");
    detached.assert_valid();
    tree.assert_valid();

    assert_eq!(detached.to_vec(), [&1, &2, &3]);
    assert_eq!(tree.to_vec(), [&4, &5, &6, &7]);
    assert_eq!(tree.size() + detached.size(), 7);

    tree.join(detached);
    tree.assert_valid();
    assert_eq!(tree.to_vec(), [&1, &2, &3, &4, &5, &6, &7]);
    assert_eq!(tree.size(), 7);
}

#[test]
fn split_on_root_or_absent_value_yields_nothing() {
    init_tracing();

    let mut tree: AvlTree<u32> = (1..=7).collect();

    assert!(tree.split(&4).is_none(), "4 is the root");
    assert!(tree.split(&99).is_none(), "99 is absent");
    assert_eq!(tree.size(), 7);
    tree.assert_valid();

    let mut empty: AvlTree<u32> = AvlTree::new();
    assert!(empty.split(&1).is_none());
}

#[test]
fn split_detaches_a_deep_subtree_and_repairs_the_rump() {
    init_tracing();

    // A larger tree where the detached subtree is tall enough that the
    // remaining branch must be repaired by more than one local rotation.
    let mut tree: AvlTree<u32> = (0..64).collect();
    tree.assert_valid();

    let left_child = *tree.root().unwrap().left().unwrap().value();
    let detached = tree.split(&left_child).unwrap();

    detached.assert_valid();
    tree.assert_valid();
    assert_eq!(tree.size() + detached.size(), 64);

    let mut all: Vec<u32> = tree.iter().copied().collect();
    all.extend(detached.iter().copied());
    all.sort_unstable();
    assert_eq!(all, (0..64).collect::<Vec<_>>());
}

#[test]
fn join_counts_each_value_once() {
    init_tracing();

    let mut left: AvlTree<u32> = [1, 3, 5].into_iter().collect();
    let right: AvlTree<u32> = [2, 4, 6].into_iter().collect();

    left.join(right);
    left.assert_valid();
    assert_eq!(left.size(), 6);
    assert_eq!(left.to_vec(), [&1, &2, &3, &4, &5, &6]);
}

#[test]
fn join_preserves_duplicates() {
    init_tracing();

    let mut left: AvlTree<u32> = [1, 2, 2].into_iter().collect();
    let right: AvlTree<u32> = [2, 3].into_iter().collect();

    left.join(right);
    left.assert_valid();
    assert_eq!(left.size(), 5);
    assert_eq!(left.count(&2), 3);
}

#[test]
fn consuming_iteration_yields_ascending_order() {
    init_tracing();

    let tree: AvlTree<i32> = [5, -1, 3, 0, 12].into_iter().collect();
    let values: Vec<i32> = tree.into_iter().collect();
    assert_eq!(values, [-1, 0, 3, 5, 12]);
}

#[test]
fn borrowed_key_lookup() {
    init_tracing();

    let tree: AvlTree<String> = ["pear", "apple", "fig"]
        .into_iter()
        .map(String::from)
        .collect();

    assert_eq!(tree.find("fig").map(String::as_str), Some("fig"));
    assert!(tree.contains("apple"));
    assert!(!tree.contains("quince"));
    assert_eq!(tree.min().map(String::as_str), Some("apple"));
    assert_eq!(tree.max().map(String::as_str), Some("pear"));
}
