//! In-order iterators.
//!
//! Both iterators keep an explicit stack of the nodes on the path to the
//! next element instead of recursing, so they can be suspended between
//! elements.

use std::iter::FusedIterator;
use std::vec;

use crate::index::btree::node::Node;

/// Borrowing in-order iterator, created by [`BTree::iter`](crate::BTree::iter).
pub struct Iter<'a, T> {
    /// Nodes on the current path with the index of their next key.
    stack: Vec<(&'a Node<T>, usize)>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: len,
        };
        if let Some(root) = root {
            iter.descend(root);
        }
        iter
    }

    /// Push `node` and its leftmost descendants.
    fn descend(&mut self, mut node: &'a Node<T>) {
        loop {
            self.stack.push((node, 0));
            match node.children.first() {
                Some(first) => node = &**first,
                None => break,
            }
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        loop {
            let (node, next_key) = self.stack.last_mut()?;
            let node: &'a Node<T> = *node;
            if *next_key == node.keys.len() {
                self.stack.pop();
                continue;
            }

            let key = &node.keys[*next_key];
            *next_key += 1;
            if let Some(child) = node.children.get(*next_key) {
                self.descend(child);
            }
            self.remaining -= 1;
            return Some(key);
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

/// One node being consumed by [`IntoIter`].
struct Frame<T> {
    keys: vec::IntoIter<T>,
    children: vec::IntoIter<Box<Node<T>>>,
}

/// Consuming in-order iterator, created by [`BTree::drain`](crate::BTree::drain)
/// or `BTree::into_iter`.
///
/// Each node is released as soon as its last element has been yielded.
/// Elements not yet yielded are dropped with the iterator.
pub struct IntoIter<T> {
    stack: Vec<Frame<T>>,
    remaining: usize,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(root: Option<Box<Node<T>>>, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: len,
        };
        if let Some(root) = root {
            iter.descend(root);
        }
        iter
    }

    fn descend(&mut self, mut node: Box<Node<T>>) {
        loop {
            let Node { keys, children, .. } = *node;
            let mut children = children.into_iter();
            let first = children.next();
            self.stack.push(Frame {
                keys: keys.into_iter(),
                children,
            });
            match first {
                Some(child) => node = child,
                None => break,
            }
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        loop {
            let frame = self.stack.last_mut()?;
            match frame.keys.next() {
                Some(key) => {
                    if let Some(child) = frame.children.next() {
                        self.descend(child);
                    }
                    self.remaining -= 1;
                    return Some(key);
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}
