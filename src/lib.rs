//! # A generic self-balancing AVL tree.
//!
//! [`AvlTree`] is a *self-balancing binary search tree* that keeps every
//! node's left and right subtree heights within one of each other, bounding
//! the tree height by ~1.44log2(n) and therefore lookups, insertions and
//! deletions by O(log n). On top of the core search-tree operations it
//! supports structural surgery ([`split`][AvlTree::split],
//! [`join`][AvlTree::join], [`deep_clone`][AvlTree::deep_clone]) and
//! in-order functional traversal ([`filter`][AvlTree::filter],
//! [`for_each`][AvlTree::for_each], [`fold`][AvlTree::fold]).
//!
//! This crate is self-contained, fuzzed, and fully `no_std` (it requires
//! `alloc` for the heap-owned nodes).
//!
//! ## when to use this
//!
//! - **want binary search** - the tree is a *sorted* collection that is
//!   efficient to search.
//! - **need multiset semantics** - duplicate values are permitted; equal
//!   values are routed to the right on insertion and
//!   [`count`][AvlTree::count] reports multiplicity.
//! - **need subtree surgery** - [`split`][AvlTree::split] detaches the
//!   subtree below a value into an independently owned tree, and
//!   [`join`][AvlTree::join] merges one tree into another.
//!
//! ## when not to use this
//!
//! - **edit more than you search** - every mutation rebalances on the way
//!   back up; if lookups are rare a plain `Vec` may win.
//! - **need concurrent access** - the tree is a shared-nothing single-owner
//!   structure with no internal locking.
//!
//! ## features
//!
//! | Feature | Default | Explanation                                                                             |
//! |:--------|:--------|:----------------------------------------------------------------------------------------|
//! | `dot`   | `false` | Enables the `AvlTree::dot` method, which allows display of the tree in [graphviz format] |
//!
//! [graphviz format]: https://graphviz.org/doc/info/lang.html

#![cfg_attr(not(test), no_std)]

extern crate alloc;

mod balance;
#[cfg(feature = "dot")]
mod dot;
mod iter;
mod node;

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;

use tracing::trace;

#[cfg(feature = "dot")]
pub use dot::Dot;
pub use iter::{IntoIter, Iter};
pub use node::Node;

use crate::balance::{concat, rebalance};
use crate::node::{Link, Side};

/// A generic self-balancing AVL tree.
///
/// The tree exclusively owns its node graph; detaching a subtree
/// ([`split`][Self::split]) or adopting one ([`from_root`][Self::from_root])
/// transfers exclusive ownership, so no two trees ever share a live node.
///
/// After every public operation the following invariants hold:
///
/// 1. *Ordering*: an in-order traversal yields a non-decreasing sequence.
/// 2. *Balance*: every node's subtree height difference is -1, 0 or 1.
/// 3. *Size*: [`size`][Self::size] equals the number of live nodes.
pub struct AvlTree<T> {
    pub(crate) root: Link<T>,
    size: usize,
}

impl<T> Default for AvlTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> AvlTree<T> {
    /// Creates a new, empty tree.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            root: None,
            size: 0,
        }
    }

    /// Creates a tree adopting a detached subtree as its root.
    ///
    /// The element count is recomputed by a full traversal, since a detached
    /// subtree carries no count of its own.
    pub(crate) fn from_root(root: Box<Node<T>>) -> Self {
        let size = root.subtree_len();
        Self {
            root: Some(root),
            size,
        }
    }

    /// Returns the number of values in the tree.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the tree contains no values.
    pub fn is_empty(&self) -> bool {
        debug_assert_eq!(self.root.is_none(), self.size == 0);
        self.size == 0
    }

    /// Returns the root node, if any.
    ///
    /// Intended for read-only diagnostics such as pretty-printers; the tree
    /// shape below is reachable through [`Node::left`] and [`Node::right`].
    pub fn root(&self) -> Option<&Node<T>> {
        self.root.as_deref()
    }

    pub(crate) fn into_root(self) -> Link<T> {
        self.root
    }

    /// Returns a reference to the smallest value, or `None` if the tree is
    /// empty.
    pub fn min(&self) -> Option<&T> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Some(&node.value)
    }

    /// Returns a reference to the largest value, or `None` if the tree is
    /// empty.
    pub fn max(&self) -> Option<&T> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Some(&node.value)
    }

    /// Gets an iterator over the values of the tree, in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Materializes the in-order sequence as a `Vec` of references.
    pub fn to_vec(&self) -> Vec<&T> {
        self.iter().collect()
    }

    /// Collects references to all values for which `pred` holds, in
    /// ascending order.
    pub fn filter<P>(&self, mut pred: P) -> Vec<&T>
    where
        P: FnMut(&T) -> bool,
    {
        self.iter().filter(|value| pred(value)).collect()
    }

    /// Applies `f` to every value, in ascending order.
    pub fn for_each<F>(&self, f: F)
    where
        F: FnMut(&T),
    {
        self.iter().for_each(f);
    }

    /// In-order left-to-right fold over the values, starting from `init`.
    pub fn fold<B, F>(&self, init: B, f: F) -> B
    where
        F: FnMut(B, &T) -> B,
    {
        self.iter().fold(init, f)
    }

    /// Removes all values from the tree.
    pub fn clear(&mut self) {
        self.root = None;
        self.size = 0;
    }

    #[cfg(feature = "dot")]
    pub fn dot(&self) -> Dot<'_, T> {
        Dot { tree: self }
    }
}

impl<T: Ord> AvlTree<T> {
    /// Inserts a value into the tree.
    ///
    /// Duplicates are permitted: inserting a value equal to one already
    /// present places the new occurrence in the right subtree of its equal.
    pub fn insert(&mut self, value: T) {
        let root = self.root.take();
        self.root = Some(insert_at(root, value));
        self.size += 1;
        trace!(size = self.size, "inserted value");
    }

    /// Returns a reference to a value equal to `value`, or `None` if no such
    /// value is in the tree.
    ///
    /// The lookup is a comparison-guided descent; with duplicates present it
    /// returns the first equal value encountered on that path.
    ///
    /// The argument may be any borrowed form of `T`, but the ordering on the
    /// borrowed form *must* match the ordering on `T`.
    pub fn find<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut curr = self.root.as_deref();
        while let Some(node) = curr {
            match value.cmp(node.value.borrow()) {
                Ordering::Less => curr = node.left.as_deref(),
                Ordering::Greater => curr = node.right.as_deref(),
                Ordering::Equal => return Some(&node.value),
            }
        }
        None
    }

    /// Returns `true` if the tree contains a value equal to `value`.
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(value).is_some()
    }

    /// Counts the values equal to `value` by a full in-order traversal, so
    /// duplicates are counted rather than merely detected.
    pub fn count<Q>(&self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.iter().filter(|v| (*v).borrow() == value).count()
    }

    /// Removes one value equal to `value` from the tree, returning it.
    ///
    /// Returns `None` - and leaves the size untouched - if no equal value
    /// was present.
    pub fn remove<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let (root, removed) = remove_at(self.root.take(), value);
        self.root = root;
        if removed.is_some() {
            self.size -= 1;
            trace!(size = self.size, "removed value");
        }
        removed
    }

    /// Removes and returns the smallest value, or `None` if the tree is
    /// empty.
    pub fn pop_min(&mut self) -> Option<T> {
        let root = self.root.take()?;
        let (root, min) = take_min(root);
        self.root = root;
        self.size -= 1;
        Some(min)
    }

    /// Removes and returns the largest value, or `None` if the tree is
    /// empty.
    pub fn pop_max(&mut self) -> Option<T> {
        let root = self.root.take()?;
        let (root, max) = take_max(root);
        self.root = root;
        self.size -= 1;
        Some(max)
    }

    /// Detaches the subtree rooted at the node holding `value` into an
    /// independently owned tree.
    ///
    /// Returns `None` - leaving the tree untouched - if `value` is absent or
    /// held by the root (the whole tree is not a splittable subtree). The
    /// remaining tree is repaired on the way back up so both results uphold
    /// the balance invariant.
    pub fn split<Q>(&mut self, value: &Q) -> Option<AvlTree<T>>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let root = self.root.as_deref()?;
        if value.cmp(root.value.borrow()) == Ordering::Equal {
            return None;
        }

        let (rump, detached) = extract_subtree(self.root.take(), value);
        self.root = rump;

        let detached = AvlTree::from_root(detached?);
        self.size -= detached.size;
        trace!(
            remaining = self.size,
            detached = detached.size,
            "split off subtree"
        );
        Some(detached)
    }

    /// Moves every value of `other` into this tree, in ascending order.
    ///
    /// The size grows by exactly one per inserted value.
    pub fn join(&mut self, other: AvlTree<T>) {
        trace!(own = self.size, other = other.size, "joining trees");
        for value in other {
            self.insert(value);
        }
    }

    /// Deep-copies the entire node structure into a new tree.
    ///
    /// Returns `None` if this tree is empty.
    pub fn deep_clone(&self) -> Option<AvlTree<T>>
    where
        T: Clone,
    {
        let root = self.root.as_deref()?;
        Some(AvlTree::from_root(clone_subtree(root)))
    }

    /// Asserts all three tree invariants: ordering, balance (including the
    /// cached heights being accurate) and size consistency.
    #[track_caller]
    pub fn assert_valid(&self)
    where
        T: fmt::Debug,
    {
        let mut count = 0;
        if let Some(root) = self.root.as_deref() {
            Self::assert_valid_inner(root, &mut count);
        }
        assert_eq!(
            self.size, count,
            "size invariant violation: stored size does not match the number of live nodes"
        );
    }

    /// Validates the subtree rooted at `node`, returning its height and the
    /// extreme values it contains.
    #[track_caller]
    fn assert_valid_inner<'a>(node: &'a Node<T>, count: &mut usize) -> (u8, &'a T, &'a T)
    where
        T: fmt::Debug,
    {
        *count += 1;

        let mut min = &node.value;
        let mut max = &node.value;
        let mut left_height = 0;
        let mut right_height = 0;

        if let Some(left) = node.left.as_deref() {
            let (height, subtree_min, subtree_max) = Self::assert_valid_inner(left, count);
            assert!(
                subtree_max <= &node.value,
                "ordering violation: left subtree of {:?} contains {subtree_max:?}",
                node.value
            );
            left_height = height;
            min = subtree_min;
        }

        if let Some(right) = node.right.as_deref() {
            let (height, subtree_min, subtree_max) = Self::assert_valid_inner(right, count);
            assert!(
                subtree_min >= &node.value,
                "ordering violation: right subtree of {:?} contains {subtree_min:?}",
                node.value
            );
            right_height = height;
            max = subtree_max;
        }

        let height = 1 + left_height.max(right_height);
        assert_eq!(
            node.height, height,
            "stale cached height at {:?}",
            node.value
        );

        let bf = i16::from(left_height) - i16::from(right_height);
        assert!(
            (-1..=1).contains(&bf),
            "balance violation at {:?}: height difference {bf}",
            node.value
        );

        (height, min, max)
    }
}

/// Inserts `value` into the subtree `link`, rebalancing on the way back up,
/// and returns the new subtree root.
fn insert_at<T: Ord>(link: Link<T>, value: T) -> Box<Node<T>> {
    let Some(mut node) = link else {
        return Node::new(value);
    };

    match value.cmp(&node.value) {
        Ordering::Less => node.left = Some(insert_at(node.left.take(), value)),
        // duplicates are routed right
        Ordering::Equal | Ordering::Greater => {
            node.right = Some(insert_at(node.right.take(), value));
        }
    }

    rebalance(node)
}

/// Removes one value equal to `value` from the subtree `link`, rebalancing
/// on the way back up. Returns the new subtree root and the removed value.
fn remove_at<T, Q>(link: Link<T>, value: &Q) -> (Link<T>, Option<T>)
where
    T: Borrow<Q> + Ord,
    Q: Ord + ?Sized,
{
    let Some(mut node) = link else {
        return (None, None);
    };

    match value.cmp(node.value.borrow()) {
        Ordering::Less => {
            let (left, removed) = remove_at(node.left.take(), value);
            node.left = left;
            if removed.is_none() {
                // nothing changed below, skip the rebalance walk
                return (Some(node), None);
            }
            (Some(rebalance(node)), removed)
        }
        Ordering::Greater => {
            let (right, removed) = remove_at(node.right.take(), value);
            node.right = right;
            if removed.is_none() {
                return (Some(node), None);
            }
            (Some(rebalance(node)), removed)
        }
        Ordering::Equal => remove_node(node),
    }
}

/// Unlinks `node` itself, promoting its sole child if it has at most one, or
/// replacing its value with the in-order successor (the minimum of the right
/// subtree) if it has two.
fn remove_node<T: Ord>(mut node: Box<Node<T>>) -> (Link<T>, Option<T>) {
    match (node.left.take(), node.right.take()) {
        (None, None) => {
            let Node { value, .. } = *node;
            (None, Some(value))
        }
        (Some(child), None) | (None, Some(child)) => {
            let Node { value, .. } = *node;
            (Some(child), Some(value))
        }
        (Some(left), Some(right)) => {
            let (right, successor) = take_min(right);
            let removed = core::mem::replace(&mut node.value, successor);
            node.left = Some(left);
            node.right = right;
            (Some(rebalance(node)), Some(removed))
        }
    }
}

/// Detaches the minimum node of the subtree `node`, rebalancing on the way
/// back up. Returns the new subtree root and the extracted value.
fn take_min<T: Ord>(mut node: Box<Node<T>>) -> (Link<T>, T) {
    if let Some(left) = node.left.take() {
        let (left, min) = take_min(left);
        node.left = left;
        (Some(rebalance(node)), min)
    } else {
        let right = node.right.take();
        let Node { value, .. } = *node;
        (right, value)
    }
}

/// Mirror of [`take_min`] for the maximum.
fn take_max<T: Ord>(mut node: Box<Node<T>>) -> (Link<T>, T) {
    if let Some(right) = node.right.take() {
        let (right, max) = take_max(right);
        node.right = right;
        (Some(rebalance(node)), max)
    } else {
        let left = node.left.take();
        let Node { value, .. } = *node;
        (left, value)
    }
}

/// Deep-copies the subtree rooted at `node`: the node-level clone primitive
/// produces a childless copy of each value, and the children are reattached
/// here. The shape is identical, so the cached height carries over.
fn clone_subtree<T: Clone>(node: &Node<T>) -> Box<Node<T>> {
    let mut copy = node.clone_value();
    copy.left = node.left.as_deref().map(clone_subtree);
    copy.right = node.right.as_deref().map(clone_subtree);
    copy.height = node.height;
    copy
}

/// Detaches the subtree rooted at the node holding `value` by a
/// comparison-guided descent. Returns the repaired rump subtree and the
/// detached subtree, or the subtree unchanged if `value` is absent.
///
/// Detaching a whole subtree can shrink a branch by far more than one level,
/// so a plain bottom-up rotation pass is not enough; instead each ancestor
/// on the search path is rebuilt with [`concat`], which re-joins its
/// remaining subtrees at whatever relative height they now have.
fn extract_subtree<T, Q>(link: Link<T>, value: &Q) -> (Link<T>, Option<Box<Node<T>>>)
where
    T: Borrow<Q> + Ord,
    Q: Ord + ?Sized,
{
    let Some(mut node) = link else {
        return (None, None);
    };

    let side = match value.cmp(node.value.borrow()) {
        Ordering::Equal => return (None, Some(node)),
        Ordering::Less => Side::Left,
        Ordering::Greater => Side::Right,
    };

    let (child, detached) = extract_subtree(node.take_child(side), value);
    if detached.is_none() {
        node.replace_child(side, child);
        return (Some(node), None);
    }

    node.replace_child(side, child);
    let Node {
        value: mid, left, right, ..
    } = *node;
    (Some(concat(left, mid, right)), detached)
}

impl<T: Ord> Extend<T> for AvlTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: Ord> FromIterator<T> for AvlTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T> IntoIterator for AvlTree<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

impl<'a, T> IntoIterator for &'a AvlTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for AvlTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use rand::prelude::SliceRandom;

    use super::*;

    #[test]
    fn random_inserts_and_removals() {
        let mut tree: AvlTree<usize> = AvlTree::new();

        let mut rng = rand::rng();

        let mut nums = (0..50).collect::<Vec<_>>();
        nums.shuffle(&mut rng);

        for i in nums.clone() {
            tree.insert(i);
            tree.assert_valid();
        }
        assert_eq!(tree.size(), 50);

        nums.shuffle(&mut rng);

        for i in nums {
            assert_eq!(tree.remove(&i), Some(i));
            tree.assert_valid();
        }
        assert!(tree.is_empty());
    }

    #[test]
    fn random_inserts_and_searches() {
        let mut tree: AvlTree<usize> = AvlTree::new();

        let mut rng = rand::rng();

        let mut nums = (0..50).collect::<Vec<_>>();
        nums.shuffle(&mut rng);

        for i in nums.clone() {
            tree.insert(i);
        }

        nums.shuffle(&mut rng);

        for i in nums {
            assert_eq!(tree.find(&i), Some(&i));
        }
    }

    #[test]
    fn find_on_empty_tree() {
        let tree: AvlTree<u32> = AvlTree::new();
        assert_eq!(tree.find(&17), None);
        assert_eq!(tree.min(), None);
        assert_eq!(tree.max(), None);
    }

    #[test]
    fn remove_absent_value_leaves_size_alone() {
        let mut tree: AvlTree<u32> = [1, 2, 3].into_iter().collect();
        assert_eq!(tree.remove(&42), None);
        assert_eq!(tree.size(), 3);
        tree.assert_valid();
    }

    #[test]
    fn duplicates_are_counted() {
        let mut tree = AvlTree::new();
        for value in [5, 3, 5, 8, 5] {
            tree.insert(value);
        }
        tree.assert_valid();

        assert_eq!(tree.size(), 5);
        assert_eq!(tree.count(&5), 3);
        assert_eq!(tree.count(&3), 1);
        assert_eq!(tree.count(&4), 0);

        assert_eq!(tree.remove(&5), Some(5));
        tree.assert_valid();
        assert_eq!(tree.count(&5), 2);
        assert_eq!(tree.size(), 4);
    }

    #[test]
    fn pop_min_and_max() {
        let mut tree: AvlTree<i32> = [4, 2, 7, 1, 9].into_iter().collect();

        assert_eq!(tree.pop_min(), Some(1));
        assert_eq!(tree.pop_max(), Some(9));
        tree.assert_valid();
        assert_eq!(tree.size(), 3);
        assert_eq!(tree.to_vec(), [&2, &4, &7]);

        let mut empty: AvlTree<i32> = AvlTree::new();
        assert_eq!(empty.pop_min(), None);
        assert_eq!(empty.pop_max(), None);
    }

    #[test]
    fn functional_traversals() {
        let tree: AvlTree<i32> = [5, 3, 8, 1, 4].into_iter().collect();

        assert_eq!(tree.filter(|v| v % 2 == 1), [&1, &3, &5]);
        assert_eq!(tree.fold(0, |acc, v| acc + v), 21);

        let mut seen = Vec::new();
        tree.for_each(|v| seen.push(*v));
        assert_eq!(seen, [1, 3, 4, 5, 8]);
    }

    #[test]
    fn deep_clone_is_independent() {
        let tree: AvlTree<i32> = [5, 3, 8].into_iter().collect();
        let mut clone = tree.deep_clone().unwrap();
        clone.assert_valid();
        assert_eq!(tree.to_vec(), clone.to_vec());

        clone.insert(4);
        clone.remove(&8);
        assert_eq!(tree.to_vec(), [&3, &5, &8]);
        assert_eq!(clone.to_vec(), [&3, &4, &5]);

        let empty: AvlTree<i32> = AvlTree::new();
        assert!(empty.deep_clone().is_none());
    }
}
