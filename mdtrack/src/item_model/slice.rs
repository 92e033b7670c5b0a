//! Source slice recovery from recorded positions
//!
//! Given the current source text and a closed position, returns the exact
//! substring the position spans. This is a pure function of its inputs: it
//! keeps no cache, validates nothing about the *meaning* of the recovered
//! text, and leaves staleness detection to the caller.

use super::error::SliceError;
use super::position::Position;

/// Extract the exact source substring spanned by `position`
///
/// The text is split on `\n` only; callers are responsible for consistent
/// line endings. The start column is inclusive and the end column exclusive,
/// both 1-indexed and byte-based.
///
/// # Parameters
/// * `source` - The current full source text
/// * `position` - A closed position previously computed against `source`
///
/// # Returns
/// * `Ok(String)` - The spanned text, descendants included for inflated items
/// * `Err(SliceError)` - The position cannot address this text
pub fn extract_markdown_slice(source: &str, position: &Position) -> Result<String, SliceError> {
    let (end_line, end_column) = position.end().ok_or(SliceError::MissingEndPosition)?;

    let lines: Vec<&str> = source.split('\n').collect();
    let line_count = lines.len() as u32;

    if position.line < 1 || position.line > line_count {
        return Err(SliceError::StartLineOutOfBounds {
            line: position.line,
            line_count,
        });
    }
    if end_line < 1 || end_line > line_count {
        return Err(SliceError::EndLineOutOfBounds {
            end_line,
            line_count,
        });
    }
    if end_line < position.line {
        return Err(SliceError::EndBeforeStart {
            line: position.line,
            end_line,
        });
    }

    let start_text = lines[(position.line - 1) as usize];
    let end_text = lines[(end_line - 1) as usize];

    let start_col = checked_column(position.line, position.column, start_text)?;
    let end_col = checked_column(end_line, end_column, end_text)?;

    if position.line == end_line {
        // Tolerate reversed columns the way substring semantics do.
        let (from, to) = if start_col <= end_col {
            (start_col, end_col)
        } else {
            (end_col, start_col)
        };
        return Ok(byte_span(start_text, from, to));
    }

    let mut parts = Vec::with_capacity((end_line - position.line + 1) as usize);
    parts.push(byte_span(start_text, start_col, start_text.len()));
    for line in &lines[position.line as usize..(end_line - 1) as usize] {
        parts.push((*line).to_string());
    }
    parts.push(byte_span(end_text, 0, end_col));

    Ok(parts.join("\n"))
}

/// Convert a 1-indexed column to a 0-indexed byte offset within `line_text`
fn checked_column(line: u32, column: u32, line_text: &str) -> Result<usize, SliceError> {
    let line_length = line_text.len() as u32;

    let out_of_bounds = SliceError::ColumnOutOfBounds {
        line,
        column,
        line_length,
    };

    let zero_based = column.checked_sub(1).ok_or(out_of_bounds.clone())?;
    if zero_based > line_length {
        return Err(out_of_bounds);
    }

    Ok(zero_based as usize)
}

/// Byte-range substring of a single line
///
/// Stale positions may land mid-character; lossy recovery keeps the
/// function total for any in-bounds byte range.
fn byte_span(line: &str, from: usize, to: usize) -> String {
    String::from_utf8_lossy(&line.as_bytes()[from..to]).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_single_line() {
        let source = "# Header Title";
        let position = Position::new(1, 1, 1, 15);

        let slice = extract_markdown_slice(source, &position).unwrap();

        assert_eq!(slice, "# Header Title");
    }

    #[test]
    fn test_slice_multi_line_with_descendants() {
        // Arrange: a header whose end was inflated over its list children
        let source = "# Main Header\n\n- Item 1\n- Item 2\n\n## Sub Header";
        let position = Position::new(1, 1, 4, 9);

        // Act
        let slice = extract_markdown_slice(source, &position).unwrap();

        // Assert: blank trailing line and the next header are excluded
        assert_eq!(slice, "# Main Header\n\n- Item 1\n- Item 2");
    }

    #[test]
    fn test_slice_inner_span() {
        let source = "alpha\nbravo\ncharlie";
        let position = Position::new(2, 3, 3, 4);

        let slice = extract_markdown_slice(source, &position).unwrap();

        assert_eq!(slice, "avo\ncha");
    }

    #[test]
    fn test_slice_missing_end_position() {
        let position = Position::open(1, 1);

        let err = extract_markdown_slice("# Header", &position).unwrap_err();

        assert_eq!(err, SliceError::MissingEndPosition);
    }

    #[test]
    fn test_slice_start_line_out_of_bounds() {
        let position = Position::new(5, 1, 6, 1);

        let err = extract_markdown_slice("one\ntwo", &position).unwrap_err();

        assert_eq!(
            err,
            SliceError::StartLineOutOfBounds {
                line: 5,
                line_count: 2
            }
        );
    }

    #[test]
    fn test_slice_zero_start_line_out_of_bounds() {
        // Degenerate zero coordinates must surface as errors, not panics.
        let position = Position::new(0, 0, 1, 1);

        let err = extract_markdown_slice("one", &position).unwrap_err();

        assert_eq!(
            err,
            SliceError::StartLineOutOfBounds {
                line: 0,
                line_count: 1
            }
        );
    }

    #[test]
    fn test_slice_end_line_out_of_bounds() {
        let position = Position::new(1, 1, 9, 1);

        let err = extract_markdown_slice("one\ntwo\nthree", &position).unwrap_err();

        assert_eq!(
            err,
            SliceError::EndLineOutOfBounds {
                end_line: 9,
                line_count: 3
            }
        );
    }

    #[test]
    fn test_slice_end_before_start() {
        let position = Position::new(3, 1, 1, 2);

        let err = extract_markdown_slice("one\ntwo\nthree", &position).unwrap_err();

        assert_eq!(
            err,
            SliceError::EndBeforeStart {
                line: 3,
                end_line: 1
            }
        );
    }

    #[test]
    fn test_slice_column_out_of_bounds() {
        let position = Position::new(1, 1, 1, 40);

        let err = extract_markdown_slice("short", &position).unwrap_err();

        assert_eq!(
            err,
            SliceError::ColumnOutOfBounds {
                line: 1,
                column: 40,
                line_length: 5
            }
        );
    }

    #[test]
    fn test_slice_column_one_past_end_is_allowed() {
        let source = "abc";
        let position = Position::new(1, 1, 1, 4);

        let slice = extract_markdown_slice(source, &position).unwrap();

        assert_eq!(slice, "abc");
    }

    #[test]
    fn test_slice_stale_position_still_returns_text() {
        // The position was computed against "# Main Header" before a line
        // was inserted above it; in-bounds coordinates must still yield
        // *some* string, and detecting the mismatch is the caller's job.
        let edited = "<!-- note -->\n# Main Header\n\n- Item 1";
        let stale = Position::new(1, 1, 1, 14);

        let slice = extract_markdown_slice(edited, &stale).unwrap();

        assert_eq!(slice, "<!-- note -->");
    }

    #[test]
    fn test_slice_empty_span() {
        let position = Position::new(1, 2, 1, 2);

        let slice = extract_markdown_slice("abc", &position).unwrap();

        assert_eq!(slice, "");
    }
}
