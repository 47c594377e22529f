//! The balancing engine: imbalance detection and the four rotation cases.
//!
//! All functions here are stateless with respect to the tree object and
//! operate purely on the subtree they are handed, returning the (possibly
//! new) subtree root. Heights are cached on the nodes, so detecting an
//! imbalance and performing a rotation are both O(1).

use alloc::boxed::Box;

use crate::node::{Link, Node, Side, balance_factor, height};

/// Single rotation towards `side`: the child opposite `side` becomes the new
/// subtree root, its near subtree is handed over to the old root, and the
/// old root becomes the new root's `side` child.
///
/// `rotate(node, Side::Left)` is the "RR" case, `rotate(node, Side::Right)`
/// the "LL" case.
pub(crate) fn rotate<T>(mut node: Box<Node<T>>, side: Side) -> Box<Node<T>> {
    // A rotation is only ever requested towards the shorter side, so the
    // rising child must exist.
    let mut new_root = node
        .take_child(side.opposite())
        .expect("rotation requires a child opposite the rotation direction");

    node.replace_child(side.opposite(), new_root.take_child(side));
    node.update_height();

    new_root.replace_child(side, Some(node));
    new_root.update_height();
    new_root
}

/// Double rotation: first rotate the child opposite `side` away from the
/// root, then rotate the root itself towards `side`.
///
/// `double_rotate(node, Side::Left)` is the "RL" case,
/// `double_rotate(node, Side::Right)` the "LR" case.
pub(crate) fn double_rotate<T>(mut node: Box<Node<T>>, side: Side) -> Box<Node<T>> {
    let child = node
        .take_child(side.opposite())
        .expect("double rotation requires a child opposite the rotation direction");

    node.replace_child(side.opposite(), Some(rotate(child, side.opposite())));
    rotate(node, side)
}

/// Restores the balance invariant at `node`, assuming both subtrees are
/// themselves balanced and at most two apart.
///
/// A rotation fires only when the height difference magnitude exceeds 1;
/// a difference of -1, 0 or 1 is a no-op. Which of the four cases applies
/// is decided by the taller child's own balance factor.
pub(crate) fn rebalance<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    node.update_height();

    let bf = node.balance_factor();
    if bf < -1 {
        // Right-heavy. A right child leaning right (or even) is fixed by a
        // single left rotation, one leaning left needs the double rotation.
        if balance_factor(&node.right) <= 0 {
            rotate(node, Side::Left)
        } else {
            double_rotate(node, Side::Left)
        }
    } else if bf > 1 {
        // Left-heavy, mirrored.
        if balance_factor(&node.left) >= 0 {
            rotate(node, Side::Right)
        } else {
            double_rotate(node, Side::Right)
        }
    } else {
        node
    }
}

/// Joins two balanced subtrees of arbitrary relative height around a middle
/// value, where everything in `left` is ≤ `value` ≤ everything in `right`.
///
/// Descends along the taller side until the height difference shrinks to at
/// most one, attaches there, and repairs each ancestor on the way back up.
/// This is what keeps the rump tree balanced after [`crate::AvlTree::split`]
/// detaches a whole subtree at once.
pub(crate) fn concat<T>(left: Link<T>, value: T, right: Link<T>) -> Box<Node<T>> {
    let (hl, hr) = (height(&left), height(&right));

    if hl > hr + 1 {
        let mut root = left.expect("taller subtree cannot be absent");
        root.right = Some(concat(root.right.take(), value, right));
        rebalance(root)
    } else if hr > hl + 1 {
        let mut root = right.expect("taller subtree cannot be absent");
        root.left = Some(concat(left, value, root.left.take()));
        rebalance(root)
    } else {
        let mut node = Node::new(value);
        node.left = left;
        node.right = right;
        node.update_height();
        node
    }
}
