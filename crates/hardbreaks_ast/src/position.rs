//! Source positions attached to nodes.
//!
//! These follow the unist `position` shape so that trees produced by other
//! unist tools deserialize unchanged.

use serde::{Deserialize, Serialize};

/// A place in source text.
///
/// Lines and columns are 1-indexed, the offset is a 0-indexed byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// Byte offset (0-indexed).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,
}

impl Point {
    /// Creates a new point.
    #[inline]
    pub const fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset: Some(offset),
        }
    }
}

/// The range of source text a node was produced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Place of the first character.
    pub start: Point,
    /// Place just past the last character.
    pub end: Point,
}

impl Position {
    /// Creates a new position.
    #[inline]
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Returns the byte range, when both points carry offsets.
    pub fn byte_range(&self) -> Option<std::ops::Range<usize>> {
        Some(self.start.offset?..self.end.offset?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_range() {
        let position = Position::new(Point::new(1, 1, 0), Point::new(2, 3, 8));
        assert_eq!(position.byte_range(), Some(0..8));
    }

    #[test]
    fn test_byte_range_without_offsets() {
        let start = Point {
            line: 1,
            column: 1,
            offset: None,
        };
        let position = Position::new(start, Point::new(1, 4, 3));
        assert_eq!(position.byte_range(), None);
    }

    #[test]
    fn test_deserialize_unist_shape() {
        let json = r#"{"start":{"line":1,"column":1,"offset":0},"end":{"line":1,"column":6}}"#;
        let position: Position = serde_json::from_str(json).unwrap();
        assert_eq!(position.start, Point::new(1, 1, 0));
        assert_eq!(position.end.offset, None);
        assert_eq!(position.end.column, 6);
    }
}
