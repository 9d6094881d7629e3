//! Core types used throughout the project.

use tower_lsp::lsp_types;

/// A range in source code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceRange {
    pub start: SourcePosition,
    pub end: SourcePosition,
}

impl From<lsp_types::Range> for SourceRange {
    fn from(range: lsp_types::Range) -> Self {
        Self { start: range.start.into(), end: range.end.into() }
    }
}

impl From<SourceRange> for lsp_types::Range {
    fn from(range: SourceRange) -> Self {
        Self { start: range.start.into(), end: range.end.into() }
    }
}

/// A position in source code (0-indexed, UTF-16 column per LSP).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourcePosition {
    pub line: u32,
    pub character: u32,
}

impl From<lsp_types::Position> for SourcePosition {
    fn from(position: lsp_types::Position) -> Self {
        Self { line: position.line, character: position.character }
    }
}

impl From<SourcePosition> for lsp_types::Position {
    fn from(position: SourcePosition) -> Self {
        Self { line: position.line, character: position.character }
    }
}

/// Resolves a position to a byte offset in `text`.
///
/// Columns are UTF-16 code units. A column past the end of the line is
/// clamped to the line end. Returns `None` when the line does not exist.
#[allow(clippy::cast_possible_truncation)] // len_utf16() is always 1 or 2
fn offset_at(text: &str, position: SourcePosition) -> Option<usize> {
    let mut line_start = 0usize;
    if position.line > 0 {
        let mut line = 0u32;
        for (idx, ch) in text.char_indices() {
            if ch == '\n' {
                line += 1;
                line_start = idx + 1;
                if line == position.line {
                    break;
                }
            }
        }
        if line < position.line {
            return None;
        }
    }

    let rest = text.get(line_start..)?;
    let mut units = 0u32;
    for (idx, ch) in rest.char_indices() {
        if units >= position.character || ch == '\n' {
            return Some(line_start + idx);
        }
        units += ch.len_utf16() as u32;
    }
    Some(text.len())
}

/// Extracts the text covered by `range`.
///
/// Returns `None` when the range lies outside the document or is inverted.
#[must_use]
pub fn text_in_range(text: &str, range: SourceRange) -> Option<&str> {
    let start = offset_at(text, range.start)?;
    let end = offset_at(text, range.end)?;
    if start > end {
        return None;
    }
    text.get(start..end)
}
