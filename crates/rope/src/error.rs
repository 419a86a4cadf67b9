//! Rope errors

use std::ops::Range;

/// Result alias for rope operations
pub type Result<T> = std::result::Result<T, RopeError>;

/// Errors raised by rope queries and edits.
///
/// All of them are caller-detectable: the rope never clamps an offset on
/// its own, so validate (or clamp) before calling.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RopeError {
    #[error("Index out of range: {index} (valid range {valid:?})")]
    IndexOutOfRange { index: usize, valid: Range<usize> },
    #[error("Invalid range {start}..{end} for rope of length {len}")]
    InvalidRange { start: usize, end: usize, len: usize },
    #[error("Line out of range: {line} (line count {line_count})")]
    LineOutOfRange { line: usize, line_count: usize },
    #[error("Column {column} is past the end of line {line} (length {line_length})")]
    ColumnOutOfRange {
        line: usize,
        column: usize,
        line_length: usize,
    },
}

impl RopeError {
    pub(crate) fn check_index(index: usize, len: usize) -> Result<()> {
        if index < len {
            Ok(())
        } else {
            Err(Self::IndexOutOfRange { index, valid: 0..len })
        }
    }

    pub(crate) fn check_range(range: &Range<usize>, len: usize) -> Result<()> {
        if range.start <= range.end && range.end <= len {
            Ok(())
        } else {
            Err(Self::InvalidRange {
                start: range.start,
                end: range.end,
                len,
            })
        }
    }
}

/// Errors raised while loading a [`RopeConfig`](crate::RopeConfig)
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to parse rope config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Split length must be at least 1, got {0}")]
    InvalidSplitLength(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_index() {
        assert!(RopeError::check_index(2, 3).is_ok());
        assert_eq!(
            RopeError::check_index(3, 3),
            Err(RopeError::IndexOutOfRange { index: 3, valid: 0..3 })
        );
    }

    #[test]
    fn test_check_range() {
        assert!(RopeError::check_range(&(0..0), 0).is_ok());
        assert!(RopeError::check_range(&(1..3), 3).is_ok());
        assert!(RopeError::check_range(&(1..4), 3).is_err());
        #[allow(clippy::reversed_empty_ranges)]
        let reversed = 2..1;
        assert_eq!(
            RopeError::check_range(&reversed, 3),
            Err(RopeError::InvalidRange { start: 2, end: 1, len: 3 })
        );
    }

    #[test]
    fn test_display() {
        let err = RopeError::InvalidRange { start: 4, end: 2, len: 3 };
        assert_eq!(err.to_string(), "Invalid range 4..2 for rope of length 3");
    }
}
