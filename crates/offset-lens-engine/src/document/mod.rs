//! Host text buffer contract and the rope-backed document.
//!
//! The offset engine never owns text. It reads line text, the line count and
//! the line-ending style from a [`TextSource`] on every query, so a source that
//! changes between queries simply yields different answers.

pub mod buffer;

use std::borrow::Cow;
use std::fmt;

pub use buffer::Document;

/// An editor position. `column` counts UTF-16 code units, as editor buffers do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Whole-document line terminator style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LineEnding {
    #[default]
    Lf,
    Crlf,
}

impl LineEnding {
    /// Physical terminator text.
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::Crlf => "\r\n",
        }
    }

    /// UTF-8 bytes one terminator occupies on disk.
    pub fn byte_len(self) -> usize {
        self.as_str().len()
    }
}

impl fmt::Display for LineEnding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineEnding::Lf => f.write_str("LF"),
            LineEnding::Crlf => f.write_str("CRLF"),
        }
    }
}

/// Read-only view of a line-oriented text buffer.
pub trait TextSource {
    /// Number of lines; a document always has at least one (possibly empty) line.
    fn line_count(&self) -> usize;

    /// Text of `line` without its terminator. Lines past the end are empty.
    fn line_text(&self, line: usize) -> Cow<'_, str>;

    fn line_ending(&self) -> LineEnding;

    /// Logical text between two positions, terminators rendered as `"\n"`.
    /// Meant for short previews; the navigator never calls it.
    fn text_in_range(&self, start: Position, end: Position) -> String;
}

/// Byte index inside `line` of the UTF-16 `column`.
///
/// A column that splits a surrogate pair rounds down to the start of the pair;
/// columns past the end clamp to the line length.
pub(crate) fn byte_index_of_column(line: &str, column: usize) -> usize {
    let mut units = 0;
    for (index, ch) in line.char_indices() {
        if units >= column {
            return index;
        }
        units += ch.len_utf16();
        if units > column {
            return index;
        }
    }
    line.len()
}
