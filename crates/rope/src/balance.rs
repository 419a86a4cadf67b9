//! Concatenation and rebalancing
//!
//! A node of depth `d` is balanced when `FIBONACCI[d + 2] <= len`. Any node
//! failing that check is rebuilt from its leaves into a minimum-depth tree.
//! See "Ropes: an Alternative to Strings" (Boehm, Atkinson, Plass).

use std::sync::Arc;

use once_cell::sync::Lazy;
use smallvec::{SmallVec, smallvec};

use crate::iter::Chunks;
use crate::metrics::MetricsCalculator;
use crate::node::{Node, NodeRef};

/// 1, 2, 3, 5, 8, ... up to the largest term that fits in a `u64`
static FIBONACCI: Lazy<Vec<u64>> = Lazy::new(|| {
    let mut table = Vec::with_capacity(96);
    let (mut a, mut b) = (0u64, 1u64);
    while let Some(next) = a.checked_add(b) {
        a = b;
        b = next;
        table.push(b);
    }
    table
});

pub(crate) fn is_balanced<M>(node: &Node<M>) -> bool {
    FIBONACCI
        .get(node.depth() + 2)
        .is_some_and(|&min_len| min_len <= node.len() as u64)
}

/// Builds nodes for one rope: carries the calculator and the split length
pub(crate) struct Builder<'a, C> {
    calculator: &'a C,
    split_length: usize,
}

impl<'a, C: MetricsCalculator> Builder<'a, C> {
    pub(crate) fn new(calculator: &'a C, split_length: usize) -> Self {
        Self {
            calculator,
            split_length,
        }
    }

    pub(crate) fn leaf(&self, text: impl Into<String>) -> NodeRef<C::Metrics> {
        Arc::new(Node::leaf(text.into(), self.calculator))
    }

    /// Inserted text, chunked like initial content when it exceeds one leaf
    pub(crate) fn text(&self, text: &str) -> NodeRef<C::Metrics> {
        if text.len() < self.split_length {
            return self.leaf(text);
        }
        let leaves: Vec<_> = crate::chunk_text(text, self.split_length)
            .into_iter()
            .map(|chunk| self.leaf(chunk))
            .collect();
        self.merge(&leaves)
    }

    pub(crate) fn empty(&self) -> NodeRef<C::Metrics> {
        self.leaf(String::new())
    }

    fn concat_node(&self, left: NodeRef<C::Metrics>, right: NodeRef<C::Metrics>) -> NodeRef<C::Metrics> {
        Arc::new(Node::concat(left, right, self.calculator))
    }

    /// Plain concatenation followed by a rebalance, without leaf coalescing
    pub(crate) fn join(&self, left: NodeRef<C::Metrics>, right: NodeRef<C::Metrics>) -> NodeRef<C::Metrics> {
        if left.is_empty() {
            return right;
        }
        if right.is_empty() {
            return left;
        }
        self.rebalance(self.concat_node(left, right))
    }

    /// Concatenate two subtrees, coalescing small leaves at the seam so that
    /// repeated single-char edits at one spot do not fragment the tree.
    pub(crate) fn concat(&self, left: NodeRef<C::Metrics>, right: NodeRef<C::Metrics>) -> NodeRef<C::Metrics> {
        if left.is_empty() {
            return right;
        }
        if right.is_empty() {
            return left;
        }
        match (&*left, &*right) {
            (Node::Leaf(_), Node::Leaf(_)) if left.len() + right.len() < self.split_length => {
                return self.leaf(collect_text(&[&left, &right]));
            }
            (Node::Leaf(_), Node::Concat(concat)) if left.len() + concat.left.len() < self.split_length => {
                let merged = self.leaf(collect_text(&[&left, &concat.left]));
                return self.rebalance(self.concat_node(merged, Arc::clone(&concat.right)));
            }
            (Node::Concat(concat), Node::Leaf(_)) if concat.right.len() + right.len() < self.split_length => {
                let merged = self.leaf(collect_text(&[&concat.right, &right]));
                return self.rebalance(self.concat_node(Arc::clone(&concat.left), merged));
            }
            _ => {}
        }
        self.rebalance(self.concat_node(left, right))
    }

    /// Return `node` untouched if balanced, else rebuild it from its leaves
    pub(crate) fn rebalance(&self, node: NodeRef<C::Metrics>) -> NodeRef<C::Metrics> {
        if matches!(*node, Node::Leaf(_)) || is_balanced(&node) {
            return node;
        }
        let leaves = collect_leaves(&node);
        tracing::trace!(
            depth = node.depth(),
            len = node.len(),
            leaves = leaves.len(),
            "rebuilding unbalanced rope node"
        );
        self.merge(&leaves)
    }

    /// Build a minimum-depth tree over `leaves` by bisecting at the midpoint
    pub(crate) fn merge(&self, leaves: &[NodeRef<C::Metrics>]) -> NodeRef<C::Metrics> {
        match leaves {
            [] => self.empty(),
            [leaf] => Arc::clone(leaf),
            _ => {
                let mid = leaves.len() / 2;
                self.concat_node(self.merge(&leaves[..mid]), self.merge(&leaves[mid..]))
            }
        }
    }
}

/// Non-empty leaves of `root`, left to right
pub(crate) fn collect_leaves<M>(root: &NodeRef<M>) -> Vec<NodeRef<M>> {
    let mut leaves = Vec::new();
    let mut stack: SmallVec<[&NodeRef<M>; 32]> = smallvec![root];
    while let Some(node) = stack.pop() {
        match &**node {
            Node::Leaf(leaf) => {
                if !leaf.text().is_empty() {
                    leaves.push(Arc::clone(node));
                }
            }
            Node::Concat(concat) => {
                stack.push(&concat.right);
                stack.push(&concat.left);
            }
        }
    }
    leaves
}

fn collect_text<M>(nodes: &[&NodeRef<M>]) -> String {
    let mut text = String::new();
    for node in nodes {
        for chunk in Chunks::new(node) {
            text.push_str(chunk);
        }
    }
    text
}
