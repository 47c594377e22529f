use alloc::boxed::Box;
use alloc::vec::Vec;
use core::iter::FusedIterator;

use crate::AvlTree;
use crate::node::{Link, Node};

/// An iterator over references to the values of an [`AvlTree`], in ascending
/// order.
///
/// The iterator borrows the tree for its entire lifetime, so the tree cannot
/// be mutated while iteration is in progress.
pub struct Iter<'a, T> {
    // Stack of nodes whose value and right subtree are still pending; the
    // top of the stack is the next value in order.
    stack: Vec<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(tree: &'a AvlTree<T>) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: tree.size(),
        };
        iter.push_left_spine(tree.root.as_deref());
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a Node<T>>) {
        while let Some(curr) = node {
            self.stack.push(curr);
            node = curr.left.as_deref();
        }
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

/// A consuming iterator over the values of an [`AvlTree`], in ascending
/// order.
pub struct IntoIter<T> {
    stack: Vec<Box<Node<T>>>,
    remaining: usize,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(tree: AvlTree<T>) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: tree.size(),
        };
        iter.push_left_spine(tree.into_root());
        iter
    }

    fn push_left_spine(&mut self, mut link: Link<T>) {
        while let Some(mut node) = link {
            link = node.left.take();
            self.stack.push(node);
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let mut node = self.stack.pop()?;
        let right = node.right.take();
        self.push_left_spine(right);
        self.remaining -= 1;

        let Node { value, .. } = *node;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}
