//! Source coordinates for trackable items
//!
//! Positions address spans of the original markdown text. Lines and columns
//! are 1-indexed; columns count bytes within their line, and the end column
//! is exclusive (one past the last byte of the span on the end line).

use serde::{Deserialize, Serialize};

/// A span of source text in 1-indexed line/column coordinates
///
/// A position with only a start (`line`/`column`) is "open"; one with both
/// end fields recorded is "closed". Positions are only meaningful against
/// the exact source text they were computed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// Starting line (1-indexed)
    pub line: u32,

    /// Starting column on the starting line (1-indexed, byte-based)
    pub column: u32,

    /// Ending line (1-indexed), if known
    pub end_line: Option<u32>,

    /// Ending column on the ending line (1-indexed, exclusive), if known
    pub end_column: Option<u32>,
}

impl Position {
    /// Create a closed position covering `(line, column)` to `(end_line, end_column)`
    pub fn new(line: u32, column: u32, end_line: u32, end_column: u32) -> Self {
        Self {
            line,
            column,
            end_line: Some(end_line),
            end_column: Some(end_column),
        }
    }

    /// Create an open position with only a start coordinate
    pub fn open(line: u32, column: u32) -> Self {
        Self {
            line,
            column,
            end_line: None,
            end_column: None,
        }
    }

    /// The end coordinate as a pair, if both end fields are recorded
    pub fn end(&self) -> Option<(u32, u32)> {
        self.end_line.zip(self.end_column)
    }

    /// Extend this position's end to cover `other`'s end, if that is later
    ///
    /// Used when a container item must span its descendants: a parent's
    /// recorded end moves forward to its last child's end but never back.
    pub fn extend_to(&mut self, other: &Position) {
        let Some((other_line, other_column)) = other.end() else {
            return;
        };

        match self.end() {
            Some((line, column)) if (line, column) >= (other_line, other_column) => {}
            _ => {
                self.end_line = Some(other_line);
                self.end_column = Some(other_column);
            }
        }
    }
}
