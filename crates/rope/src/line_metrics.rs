//! Line metrics and the line-oriented queries built on them
//!
//! A line's length never includes its terminating `'\n'`, and the start of
//! line `k` is the offset just past the `k`-th `'\n'`. `'\r'` is an ordinary
//! character.

use memchr::memchr_iter;

use crate::error::{Result, RopeError};
use crate::metrics::MetricsCalculator;
use crate::node::{Node, byte_offset};
use crate::{Point, Rope};

/// Line statistics of a region of text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineMetrics {
    /// Number of `'\n'` in the region
    pub newlines: usize,
    pub lengths: LineLengthMetric,
}

/// Line lengths of a region, split by whether it contains a break
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineLengthMetric {
    /// No break: the whole region is part of one line
    WithoutBreaks(usize),
    /// At least one break
    WithBreaks {
        /// Partial line touching the left edge
        left: usize,
        /// Longest line fully enclosed between two breaks, 0 if none
        max_inner: usize,
        /// Partial line touching the right edge
        right: usize,
    },
}

impl LineLengthMetric {
    pub fn max_line_length(&self) -> usize {
        match *self {
            Self::WithoutBreaks(len) => len,
            Self::WithBreaks {
                left,
                max_inner,
                right,
            } => left.max(max_inner).max(right),
        }
    }
}

/// Calculator for [`LineMetrics`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineMetricsCalculator;

impl MetricsCalculator for LineMetricsCalculator {
    type Metrics = LineMetrics;

    fn metrics(&self, text: &str) -> LineMetrics {
        let mut breaks = memchr_iter(b'\n', text.as_bytes());
        let Some(first) = breaks.next() else {
            return LineMetrics {
                newlines: 0,
                lengths: LineLengthMetric::WithoutBreaks(text.chars().count()),
            };
        };

        // '\n' is ASCII, so every break sits on a char boundary
        let mut newlines = 1;
        let mut max_inner = 0;
        let mut last = first;
        for at in breaks {
            max_inner = max_inner.max(text[last + 1..at].chars().count());
            last = at;
            newlines += 1;
        }

        LineMetrics {
            newlines,
            lengths: LineLengthMetric::WithBreaks {
                left: text[..first].chars().count(),
                max_inner,
                right: text[last + 1..].chars().count(),
            },
        }
    }

    fn join(&self, left: &LineMetrics, right: &LineMetrics) -> LineMetrics {
        use LineLengthMetric::{WithBreaks, WithoutBreaks};

        let lengths = match (left.lengths, right.lengths) {
            (WithoutBreaks(l), WithoutBreaks(r)) => WithoutBreaks(l + r),
            (WithoutBreaks(l), WithBreaks { left, max_inner, right }) => WithBreaks {
                left: l + left,
                max_inner,
                right,
            },
            (WithBreaks { left, max_inner, right }, WithoutBreaks(r)) => WithBreaks {
                left,
                max_inner,
                right: right + r,
            },
            (
                WithBreaks {
                    left: outer_left,
                    max_inner: left_inner,
                    right: seam_left,
                },
                WithBreaks {
                    left: seam_right,
                    max_inner: right_inner,
                    right: outer_right,
                },
            ) => WithBreaks {
                left: outer_left,
                // The two partial lines at the seam are one logical line
                max_inner: left_inner.max(seam_left + seam_right).max(right_inner),
                right: outer_right,
            },
        };

        LineMetrics {
            newlines: left.newlines + right.newlines,
            lengths,
        }
    }
}

/// Rope carrying [`LineMetrics`]
pub type LineRope = Rope<LineMetricsCalculator>;

impl LineRope {
    /// Number of lines; always at least 1
    pub fn line_count(&self) -> usize {
        self.metrics().newlines + 1
    }

    /// Length of the longest line
    pub fn max_line_length(&self) -> usize {
        self.metrics().lengths.max_line_length()
    }

    /// Offset of the first char of line `line`.
    ///
    /// `line == line_count()` is accepted and yields `len()`, the offset one
    /// past the last line.
    pub fn line_to_offset(&self, line: usize) -> Result<usize> {
        if line > self.line_count() {
            return Err(RopeError::LineOutOfRange {
                line,
                line_count: self.line_count(),
            });
        }
        if line == 0 {
            return Ok(0);
        }

        let mut node = &*self.root;
        let mut offset = 0;
        let mut breaks = 0;
        loop {
            match node {
                Node::Concat(concat) => {
                    let left_breaks = concat.left.metrics().newlines;
                    if breaks + left_breaks >= line {
                        node = &concat.left;
                    } else {
                        offset += concat.left.len();
                        breaks += left_breaks;
                        node = &concat.right;
                    }
                }
                Node::Leaf(leaf) => {
                    let text = leaf.text();
                    return Ok(match memchr_iter(b'\n', text.as_bytes()).nth(line - breaks - 1) {
                        Some(at) => offset + text[..at].chars().count() + 1,
                        None => offset + node.len(),
                    });
                }
            }
        }
    }

    /// Length of line `line`, excluding its line break
    pub fn line_length(&self, line: usize) -> Result<usize> {
        self.check_line(line)?;
        Ok(self.lines_rope(line, line + 1)?.max_line_length())
    }

    /// Lines `from..to` as a rope sharing this rope's nodes
    pub fn lines_rope(&self, from: usize, to: usize) -> Result<Self> {
        let start = self.line_to_offset(from)?;
        let end = self.line_to_offset(to)?;
        self.slice(start..end)
    }

    /// Text of lines `from..to`, including their line breaks
    pub fn lines(&self, from: usize, to: usize) -> Result<String> {
        Ok(self.lines_rope(from, to)?.to_string())
    }

    /// Line `line`, including its trailing line break if it has one
    pub fn line(&self, line: usize) -> Result<Self> {
        self.check_line(line)?;
        self.lines_rope(line, line + 1)
    }

    /// Translate an offset in `0..=len()` to a line and column
    pub fn offset_to_point(&self, offset: usize) -> Result<Point> {
        if offset > self.len() {
            return Err(RopeError::IndexOutOfRange {
                index: offset,
                valid: 0..self.len() + 1,
            });
        }
        let line = self.breaks_before(offset);
        Ok(Point::new(line, offset - self.line_to_offset(line)?))
    }

    /// Translate a line and column to an offset. The column may point at the
    /// end of the line but not past it.
    pub fn point_to_offset(&self, point: Point) -> Result<usize> {
        let line_length = self.line_length(point.line)?;
        if point.column > line_length {
            return Err(RopeError::ColumnOutOfRange {
                line: point.line,
                column: point.column,
                line_length,
            });
        }
        Ok(self.line_to_offset(point.line)? + point.column)
    }

    fn check_line(&self, line: usize) -> Result<()> {
        if line < self.line_count() {
            Ok(())
        } else {
            Err(RopeError::LineOutOfRange {
                line,
                line_count: self.line_count(),
            })
        }
    }

    /// Number of `'\n'` strictly before `offset`
    fn breaks_before(&self, mut offset: usize) -> usize {
        let mut node = &*self.root;
        let mut breaks = 0;
        loop {
            match node {
                Node::Concat(concat) => {
                    let left_len = concat.left.len();
                    if offset < left_len {
                        node = &concat.left;
                    } else {
                        offset -= left_len;
                        breaks += concat.left.metrics().newlines;
                        node = &concat.right;
                    }
                }
                Node::Leaf(leaf) => {
                    let text = leaf.text();
                    let prefix = &text[..byte_offset(text, offset)];
                    return breaks + memchr_iter(b'\n', prefix.as_bytes()).count();
                }
            }
        }
    }
}
