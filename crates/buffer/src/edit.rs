//! Edit operations

use std::ops::Range;

use rope::Rope;

/// An edit expressed in char offsets of the rope it applies to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    Insert { offset: usize, text: String },
    Delete { range: Range<usize> },
    Replace { range: Range<usize>, text: String },
}

impl Edit {
    pub fn insert(offset: usize, text: impl Into<String>) -> Self {
        Self::Insert {
            offset,
            text: text.into(),
        }
    }

    pub fn delete(range: Range<usize>) -> Self {
        Self::Delete { range }
    }

    pub fn replace(range: Range<usize>, text: impl Into<String>) -> Self {
        Self::Replace {
            range,
            text: text.into(),
        }
    }

    /// Apply to `rope`, returning the edited rope. `rope` itself is untouched.
    pub fn apply(&self, rope: &Rope) -> rope::Result<Rope> {
        match self {
            Self::Insert { offset, text } => rope.insert(*offset, text),
            Self::Delete { range } => rope.delete(range.clone()),
            Self::Replace { range, text } => rope.replace(range.clone(), text),
        }
    }

    /// Range covered by the edit's result
    pub fn range(&self) -> Range<usize> {
        match self {
            Self::Insert { offset, text } => *offset..*offset + text.chars().count(),
            Self::Delete { range } => range.start..range.start,
            Self::Replace { range, text } => range.start..range.start + text.chars().count(),
        }
    }
}
