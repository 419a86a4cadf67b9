//! Buffer snapshots

use rope::Rope;

use crate::BufferId;

/// An immutable snapshot of a buffer. Cloning is O(1) and snapshots may be
/// read from any thread while the buffer keeps changing.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Buffer ID
    pub id: BufferId,
    /// Version at snapshot time
    pub version: u64,
    /// Rope snapshot
    pub rope: Rope,
}

impl Snapshot {
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    pub fn len(&self) -> usize {
        self.rope.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.rope.line_count()
    }

    /// Text of lines `from..to`
    pub fn lines(&self, from: usize, to: usize) -> rope::Result<String> {
        self.rope.lines(from, to)
    }
}
