//! Error types for slice extraction

use thiserror::Error;

/// Errors raised when a recorded position cannot address the current text
///
/// Every variant is a caller-input error: the position and the text no
/// longer agree, and recovering silently would corrupt the extracted
/// content. Callers should re-parse the current text for fresh positions
/// instead of retrying with the same ones.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SliceError {
    /// The item only has a start coordinate recorded
    #[error("item has no recorded end position")]
    MissingEndPosition,

    /// The start line does not exist in the text
    #[error("start line {line} is outside the document ({line_count} lines)")]
    StartLineOutOfBounds {
        /// Requested 1-indexed start line
        line: u32,
        /// Number of lines in the text
        line_count: u32,
    },

    /// The end line does not exist in the text
    #[error("end line {end_line} is outside the document ({line_count} lines)")]
    EndLineOutOfBounds {
        /// Requested 1-indexed end line
        end_line: u32,
        /// Number of lines in the text
        line_count: u32,
    },

    /// The end line precedes the start line
    #[error("end line {end_line} precedes start line {line}")]
    EndBeforeStart {
        /// Requested 1-indexed start line
        line: u32,
        /// Requested 1-indexed end line
        end_line: u32,
    },

    /// A column falls outside its line
    #[error("column {column} is outside line {line} ({line_length} bytes)")]
    ColumnOutOfBounds {
        /// Line the column was checked against (1-indexed)
        line: u32,
        /// Offending 1-indexed column
        column: u32,
        /// Byte length of that line
        line_length: u32,
    },
}
