//! Rope tree nodes
//!
//! Nodes are immutable once built. Edits construct new nodes and share the
//! untouched subtrees through `Arc`, so older ropes stay valid.

use std::sync::Arc;

use crate::balance::Builder;
use crate::metrics::MetricsCalculator;

pub(crate) type NodeRef<M> = Arc<Node<M>>;

/// Rope node
#[derive(Debug)]
pub(crate) enum Node<M> {
    Leaf(Leaf<M>),
    Concat(Concat<M>),
}

/// A contiguous run of text
#[derive(Debug)]
pub(crate) struct Leaf<M> {
    text: String,
    /// Length in chars
    len: usize,
    metrics: M,
}

/// Ordered concatenation of two subtrees
#[derive(Debug)]
pub(crate) struct Concat<M> {
    pub(crate) left: NodeRef<M>,
    pub(crate) right: NodeRef<M>,
    len: usize,
    depth: usize,
    metrics: M,
}

impl<M> Leaf<M> {
    pub(crate) fn text(&self) -> &str {
        &self.text
    }

    /// Text between two char offsets
    fn substr(&self, start: usize, end: usize) -> &str {
        let from = byte_offset(&self.text, start);
        let to = from + byte_offset(&self.text[from..], end - start);
        &self.text[from..to]
    }
}

impl<M> Node<M> {
    pub(crate) fn leaf<C>(text: String, calculator: &C) -> Self
    where
        C: MetricsCalculator<Metrics = M>,
    {
        let metrics = calculator.metrics(&text);
        Node::Leaf(Leaf {
            len: text.chars().count(),
            text,
            metrics,
        })
    }

    pub(crate) fn concat<C>(left: NodeRef<M>, right: NodeRef<M>, calculator: &C) -> Self
    where
        C: MetricsCalculator<Metrics = M>,
    {
        Node::Concat(Concat {
            len: left.len() + right.len(),
            depth: left.depth().max(right.depth()) + 1,
            metrics: calculator.join(left.metrics(), right.metrics()),
            left,
            right,
        })
    }

    pub(crate) fn len(&self) -> usize {
        match self {
            Node::Leaf(leaf) => leaf.len,
            Node::Concat(concat) => concat.len,
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Height of the subtree; leaves have depth 0
    pub(crate) fn depth(&self) -> usize {
        match self {
            Node::Leaf(_) => 0,
            Node::Concat(concat) => concat.depth,
        }
    }

    pub(crate) fn metrics(&self) -> &M {
        match self {
            Node::Leaf(leaf) => &leaf.metrics,
            Node::Concat(concat) => &concat.metrics,
        }
    }

    /// Char at `index`, or `None` when out of bounds
    pub(crate) fn get(&self, mut index: usize) -> Option<char> {
        let mut node = self;
        loop {
            match node {
                Node::Leaf(leaf) => return leaf.text.chars().nth(index),
                Node::Concat(concat) => {
                    let left_len = concat.left.len();
                    if index < left_len {
                        node = &concat.left;
                    } else {
                        index -= left_len;
                        node = &concat.right;
                    }
                }
            }
        }
    }

    /// Sub-rope covering `start..end`; the caller validates the bounds.
    /// A request for the whole node returns the node itself.
    pub(crate) fn slice<C>(self: &Arc<Self>, start: usize, end: usize, builder: &Builder<'_, C>) -> NodeRef<M>
    where
        C: MetricsCalculator<Metrics = M>,
    {
        if start == 0 && end == self.len() {
            return Arc::clone(self);
        }
        match &**self {
            Node::Leaf(leaf) => builder.leaf(leaf.substr(start, end)),
            Node::Concat(concat) => {
                let left_len = concat.left.len();
                if end <= left_len {
                    return concat.left.slice(start, end, builder);
                }
                if start >= left_len {
                    return concat.right.slice(start - left_len, end - left_len, builder);
                }
                let left = concat.left.slice(start, left_len, builder);
                let right = concat.right.slice(0, end - left_len, builder);
                builder.concat(left, right)
            }
        }
    }

    /// Split into `..index` and `index..`
    pub(crate) fn split<C>(self: &Arc<Self>, index: usize, builder: &Builder<'_, C>) -> (NodeRef<M>, NodeRef<M>)
    where
        C: MetricsCalculator<Metrics = M>,
    {
        match &**self {
            Node::Leaf(leaf) => {
                if index == 0 {
                    (builder.empty(), Arc::clone(self))
                } else if index >= leaf.len {
                    (Arc::clone(self), builder.empty())
                } else {
                    let at = byte_offset(&leaf.text, index);
                    (builder.leaf(&leaf.text[..at]), builder.leaf(&leaf.text[at..]))
                }
            }
            Node::Concat(concat) => {
                let left_len = concat.left.len();
                if index < left_len {
                    let (left, rest) = concat.left.split(index, builder);
                    (builder.rebalance(left), builder.join(rest, Arc::clone(&concat.right)))
                } else if index > left_len {
                    let (rest, right) = concat.right.split(index - left_len, builder);
                    (builder.join(Arc::clone(&concat.left), rest), builder.rebalance(right))
                } else {
                    (Arc::clone(&concat.left), Arc::clone(&concat.right))
                }
            }
        }
    }

    /// Remove `len` chars starting at `start`
    pub(crate) fn delete<C>(self: &Arc<Self>, start: usize, len: usize, builder: &Builder<'_, C>) -> NodeRef<M>
    where
        C: MetricsCalculator<Metrics = M>,
    {
        if len == 0 {
            return Arc::clone(self);
        }
        match &**self {
            Node::Leaf(leaf) => {
                let from = byte_offset(&leaf.text, start);
                let to = from + byte_offset(&leaf.text[from..], len);
                let mut text = String::with_capacity(leaf.text.len() - (to - from));
                text.push_str(&leaf.text[..from]);
                text.push_str(&leaf.text[to..]);
                builder.leaf(text)
            }
            Node::Concat(_) => {
                let (head, rest) = self.split(start, builder);
                let (_, tail) = rest.split(len, builder);
                builder.concat(head, tail)
            }
        }
    }
}

/// Byte offset of the char at `char_index`, or `text.len()` past the end
pub(crate) fn byte_offset(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map_or(text.len(), |(at, _)| at)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LineMetricsCalculator, NoMetrics};

    fn leaf(text: &str) -> NodeRef<()> {
        Arc::new(Node::leaf(text.to_string(), &NoMetrics))
    }

    #[test]
    fn test_byte_offset() {
        assert_eq!(byte_offset("héllo", 0), 0);
        assert_eq!(byte_offset("héllo", 2), 3);
        assert_eq!(byte_offset("héllo", 5), 6);
        assert_eq!(byte_offset("héllo", 9), 6);
    }

    #[test]
    fn test_leaf_counts_chars() {
        let node = leaf("añb");
        assert_eq!(node.len(), 3);
        assert_eq!(node.depth(), 0);
        assert_eq!(node.get(1), Some('ñ'));
        assert_eq!(node.get(3), None);
    }

    #[test]
    fn test_concat_caches_len_depth_metrics() {
        let calc = LineMetricsCalculator;
        let left = Arc::new(Node::leaf("ab\nc".to_string(), &calc));
        let right = Arc::new(Node::leaf("d\nef".to_string(), &calc));
        let node = Node::concat(left, right, &calc);

        assert_eq!(node.len(), 8);
        assert_eq!(node.depth(), 1);
        assert_eq!(node.metrics(), &calc.metrics("ab\ncd\nef"));
        assert_eq!(node.get(3), Some('c'));
        assert_eq!(node.get(4), Some('d'));
        assert_eq!(node.get(8), None);
    }

    #[test]
    fn test_leaf_slice_identity() {
        let builder = Builder::new(&NoMetrics, 200);
        let node = leaf("hello");
        assert!(Arc::ptr_eq(&node.slice(0, 5, &builder), &node));

        let part = node.slice(1, 3, &builder);
        assert!(matches!(&*part, Node::Leaf(l) if l.text() == "el"));
    }

    #[test]
    fn test_concat_slice_identity() {
        let builder = Builder::new(&NoMetrics, 200);
        let node = Arc::new(Node::concat(leaf("abc"), leaf("def"), &NoMetrics));
        assert!(Arc::ptr_eq(&node.slice(0, 6, &builder), &node));

        if let Node::Concat(concat) = &*node {
            assert!(Arc::ptr_eq(&node.slice(3, 6, &builder), &concat.right));
        }
    }

    #[test]
    fn test_split_at_child_boundary_shares_children() {
        let builder = Builder::new(&NoMetrics, 200);
        let left = leaf("abc");
        let right = leaf("def");
        let node = Arc::new(Node::concat(Arc::clone(&left), Arc::clone(&right), &NoMetrics));

        let (a, b) = node.split(3, &builder);
        assert!(Arc::ptr_eq(&a, &left));
        assert!(Arc::ptr_eq(&b, &right));
    }

    #[test]
    fn test_leaf_delete() {
        let builder = Builder::new(&NoMetrics, 200);
        let node = leaf("abcdef");
        let deleted = node.delete(1, 3, &builder);
        assert_eq!(deleted.len(), 3);
        assert!(matches!(&*deleted, Node::Leaf(l) if l.text() == "aef"));
    }
}
