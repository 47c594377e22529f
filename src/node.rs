use alloc::boxed::Box;
use core::fmt;

/// An owned (possibly absent) subtree.
///
/// Every subtree is exclusively owned by its parent node, or by the tree
/// itself in the case of the root. Detaching a subtree moves the `Box` out,
/// so two trees can never share a live node.
pub(crate) type Link<T> = Option<Box<Node<T>>>;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => f.write_str("left"),
            Side::Right => f.write_str("right"),
        }
    }
}

impl Side {
    pub(crate) fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// A node of an [`AvlTree`][crate::AvlTree].
///
/// Holds a value plus ownership of up to two children. The height of the
/// subtree rooted here is cached and kept up to date by every structural
/// edit, so computing a balance factor never walks the tree.
pub struct Node<T> {
    pub(crate) value: T,
    pub(crate) height: u8,
    pub(crate) left: Link<T>,
    pub(crate) right: Link<T>,
}

/// Height of a possibly-absent subtree; an absent subtree has height 0 and
/// a leaf has height 1.
#[inline]
pub(crate) fn height<T>(link: &Link<T>) -> u8 {
    link.as_deref().map_or(0, |node| node.height)
}

/// Balance factor of a possibly-absent subtree. Absent subtrees are
/// trivially balanced.
#[inline]
pub(crate) fn balance_factor<T>(link: &Link<T>) -> i16 {
    link.as_deref().map_or(0, Node::balance_factor)
}

impl<T> Node<T> {
    pub(crate) fn new(value: T) -> Box<Self> {
        Box::new(Self {
            value,
            height: 1,
            left: None,
            right: None,
        })
    }

    /// Returns a reference to the value held by this node.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Returns the left child, if any.
    pub fn left(&self) -> Option<&Node<T>> {
        self.left.as_deref()
    }

    /// Returns the right child, if any.
    pub fn right(&self) -> Option<&Node<T>> {
        self.right.as_deref()
    }

    /// Height difference between the left and right subtree.
    #[inline]
    pub(crate) fn balance_factor(&self) -> i16 {
        i16::from(height(&self.left)) - i16::from(height(&self.right))
    }

    /// Recomputes the cached height from the children's cached heights.
    ///
    /// Must be called after every edit to `left` or `right`, bottom-up.
    #[inline]
    pub(crate) fn update_height(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
    }

    #[cfg(feature = "dot")]
    #[inline]
    pub(crate) fn child(&self, side: Side) -> &Link<T> {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    #[inline]
    pub(crate) fn take_child(&mut self, side: Side) -> Link<T> {
        match side {
            Side::Left => self.left.take(),
            Side::Right => self.right.take(),
        }
    }

    #[inline]
    pub(crate) fn replace_child(&mut self, side: Side, child: Link<T>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    /// Number of nodes in the subtree rooted here.
    pub(crate) fn subtree_len(&self) -> usize {
        1 + self.left.as_deref().map_or(0, Node::subtree_len)
            + self.right.as_deref().map_or(0, Node::subtree_len)
    }

    /// Node-level clone primitive: copies the value, children stay absent.
    /// The recursive clone in [`crate::AvlTree::deep_clone`] reattaches them.
    pub(crate) fn clone_value(&self) -> Box<Node<T>>
    where
        T: Clone,
    {
        Node::new(self.value.clone())
    }
}

impl<T: fmt::Debug> fmt::Debug for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("value", &self.value)
            .field("height", &self.height)
            .field("left", &self.left)
            .field("right", &self.right)
            .finish()
    }
}
