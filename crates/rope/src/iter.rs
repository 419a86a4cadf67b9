//! Iterators

use smallvec::{SmallVec, smallvec};

use crate::node::Node;

/// Leaf texts in document order. Walks with an explicit stack, so it is safe
/// on arbitrarily deep trees.
pub struct Chunks<'a, M> {
    stack: SmallVec<[&'a Node<M>; 32]>,
}

impl<'a, M> Chunks<'a, M> {
    pub(crate) fn new(root: &'a Node<M>) -> Self {
        Self {
            stack: smallvec![root],
        }
    }
}

impl<'a, M> Iterator for Chunks<'a, M> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            match node {
                Node::Leaf(leaf) => {
                    if !leaf.text().is_empty() {
                        return Some(leaf.text());
                    }
                }
                Node::Concat(concat) => {
                    self.stack.push(&concat.right);
                    self.stack.push(&concat.left);
                }
            }
        }
        None
    }
}

/// Character iterator
pub struct Chars<'a, M> {
    chunks: Chunks<'a, M>,
    current: std::str::Chars<'a>,
}

impl<'a, M> Chars<'a, M> {
    pub(crate) fn new(root: &'a Node<M>) -> Self {
        Self {
            chunks: Chunks::new(root),
            current: "".chars(),
        }
    }
}

impl<M> Iterator for Chars<'_, M> {
    type Item = char;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(c) = self.current.next() {
                return Some(c);
            }
            self.current = self.chunks.next()?.chars();
        }
    }
}
