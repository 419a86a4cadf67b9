//! Line/column positions

use std::cmp::Ordering;
use std::fmt;

/// A position in text as a zero-based line and a char column within it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub line: usize,
    pub column: usize,
}

impl Point {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    pub fn zero() -> Self {
        Self::default()
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> Ordering {
        self.line
            .cmp(&other.line)
            .then(self.column.cmp(&other.column))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_ordering() {
        assert!(Point::new(0, 9) < Point::new(1, 0));
        assert!(Point::new(2, 3) < Point::new(2, 4));
        assert_eq!(Point::zero(), Point::new(0, 0));
    }

    #[test]
    fn test_point_display_is_one_based() {
        assert_eq!(Point::new(0, 0).to_string(), "1:1");
        assert_eq!(Point::new(4, 2).to_string(), "5:3");
    }
}
