//! # Foxkit Rope
//!
//! A persistent rope with pluggable metrics. Every edit returns a new
//! [`Rope`] that shares its untouched subtrees with the old one, so keeping
//! old ropes around (undo history, reader snapshots) is cheap.
//!
//! Offsets, lengths and columns are counted in `char`s.

mod balance;
mod config;
mod error;
mod iter;
mod line_metrics;
mod metrics;
mod node;
mod point;

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use balance::Builder;
use node::NodeRef;

pub use config::{RopeConfig, SPLIT_LENGTH};
pub use error::{ConfigError, Result, RopeError};
pub use iter::{Chars, Chunks};
pub use line_metrics::{LineLengthMetric, LineMetrics, LineMetricsCalculator, LineRope};
pub use metrics::{MetricsCalculator, NoMetrics};
pub use point::Point;

/// Rope - an immutable, balanced tree of text chunks
pub struct Rope<C: MetricsCalculator = LineMetricsCalculator> {
    root: NodeRef<C::Metrics>,
    calculator: C,
    config: RopeConfig,
}

impl Rope<LineMetricsCalculator> {
    /// Create an empty rope
    pub fn new() -> Self {
        Self::with_calculator("", LineMetricsCalculator)
    }

    /// Create a rope from a string
    pub fn from_str(text: &str) -> Self {
        Self::with_calculator(text, LineMetricsCalculator)
    }
}

impl<C: MetricsCalculator> Rope<C> {
    pub fn with_calculator(text: &str, calculator: C) -> Self {
        Self::with_config(text, calculator, RopeConfig::default())
    }

    /// Chunk `text` into leaves of `config.split_length` chars and build a
    /// balanced tree over them
    pub fn with_config(text: &str, calculator: C, config: RopeConfig) -> Self {
        Self::from_chunks(chunk_text(text, config.split_length()), calculator, config)
    }

    /// Build a rope from pre-chunked text, one leaf per non-empty chunk.
    /// Chunks are expected to be about `config.split_length` chars long.
    pub fn from_chunks<I, S>(chunks: I, calculator: C, config: RopeConfig) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let builder = Builder::new(&calculator, config.split_length());
        let leaves: Vec<_> = chunks
            .into_iter()
            .map(Into::into)
            .filter(|chunk: &String| !chunk.is_empty())
            .map(|chunk| builder.leaf(chunk))
            .collect();
        tracing::trace!(leaves = leaves.len(), "building rope from chunks");
        let root = builder.merge(&leaves);
        Self {
            root,
            calculator,
            config,
        }
    }

    fn builder(&self) -> Builder<'_, C> {
        Builder::new(&self.calculator, self.config.split_length())
    }

    fn with_root(&self, root: NodeRef<C::Metrics>) -> Self {
        Self {
            root,
            calculator: self.calculator.clone(),
            config: self.config,
        }
    }

    /// Get total length in chars
    pub fn len(&self) -> usize {
        self.root.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Height of the tree; a single leaf has depth 0
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Metrics of the whole document
    pub fn metrics(&self) -> &C::Metrics {
        self.root.metrics()
    }

    pub fn calculator(&self) -> &C {
        &self.calculator
    }

    pub fn config(&self) -> RopeConfig {
        self.config
    }

    /// Char at `index`
    pub fn get(&self, index: usize) -> Result<char> {
        RopeError::check_index(index, self.len())?;
        self.root.get(index).ok_or(RopeError::IndexOutOfRange {
            index,
            valid: 0..self.len(),
        })
    }

    /// Sub-rope covering `range`
    pub fn slice(&self, range: Range<usize>) -> Result<Self> {
        RopeError::check_range(&range, self.len())?;
        Ok(self.with_root(self.root.slice(range.start, range.end, &self.builder())))
    }

    /// Insert text before the char at `index`; `index == len()` appends
    pub fn insert(&self, index: usize, text: &str) -> Result<Self> {
        let len = self.len();
        if index > len {
            return Err(RopeError::IndexOutOfRange {
                index,
                valid: 0..len + 1,
            });
        }
        if index == 0 {
            return Ok(self.prepend(text));
        }
        if index == len {
            return Ok(self.append(text));
        }
        let builder = self.builder();
        let (left, right) = self.root.split(index, &builder);
        let left = builder.concat(left, builder.text(text));
        Ok(self.with_root(builder.concat(left, right)))
    }

    pub fn prepend(&self, text: &str) -> Self {
        let builder = self.builder();
        self.with_root(builder.concat(builder.text(text), Arc::clone(&self.root)))
    }

    pub fn append(&self, text: &str) -> Self {
        let builder = self.builder();
        self.with_root(builder.concat(Arc::clone(&self.root), builder.text(text)))
    }

    /// Remove the chars in `range`
    pub fn delete(&self, range: Range<usize>) -> Result<Self> {
        RopeError::check_range(&range, self.len())?;
        if range.is_empty() {
            return Ok(self.clone());
        }
        let root = self.root.delete(range.start, range.len(), &self.builder());
        Ok(self.with_root(root))
    }

    /// Replace the chars in `range` with `text`
    pub fn replace(&self, range: Range<usize>, text: &str) -> Result<Self> {
        let start = range.start;
        self.delete(range)?.insert(start, text)
    }

    /// Iterate over leaf texts
    pub fn chunks(&self) -> Chunks<'_, C::Metrics> {
        Chunks::new(&self.root)
    }

    pub fn chars(&self) -> Chars<'_, C::Metrics> {
        Chars::new(&self.root)
    }

    /// Check whether two ropes share the same root node
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.root, &other.root)
    }
}

/// Split `text` into pieces of `split_length` chars; the last may be shorter
pub fn chunk_text(text: &str, split_length: usize) -> Vec<&str> {
    let split_length = split_length.max(1);
    let mut chunks = Vec::with_capacity(text.len() / split_length + 1);
    let mut start = 0;
    for (count, (at, _)) in text.char_indices().enumerate() {
        if count > 0 && count % split_length == 0 {
            chunks.push(&text[start..at]);
            start = at;
        }
    }
    if start < text.len() {
        chunks.push(&text[start..]);
    }
    chunks
}

impl<C: MetricsCalculator> Clone for Rope<C> {
    fn clone(&self) -> Self {
        self.with_root(Arc::clone(&self.root))
    }
}

impl Default for Rope<LineMetricsCalculator> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: MetricsCalculator> fmt::Display for Rope<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for chunk in self.chunks() {
            f.write_str(chunk)?;
        }
        Ok(())
    }
}

impl<C: MetricsCalculator> fmt::Debug for Rope<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rope({} chars, depth {})", self.len(), self.depth())
    }
}

impl<C: MetricsCalculator> PartialEq for Rope<C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.chars().eq(other.chars())
    }
}

impl<C: MetricsCalculator> Eq for Rope<C> {}

impl<C: MetricsCalculator> PartialEq<str> for Rope<C> {
    fn eq(&self, other: &str) -> bool {
        self.chars().eq(other.chars())
    }
}

impl<C: MetricsCalculator> PartialEq<&str> for Rope<C> {
    fn eq(&self, other: &&str) -> bool {
        self.chars().eq(other.chars())
    }
}

impl From<&str> for Rope {
    fn from(s: &str) -> Self {
        Self::from_str(s)
    }
}

impl From<String> for Rope {
    fn from(s: String) -> Self {
        Self::from_str(&s)
    }
}
