use std::borrow::Cow;
use std::fmt;

use xi_rope::{LinesMetric, Rope};

use super::{LineEnding, Position, TextSource, byte_index_of_column};

/// An immutable text document backed by an `xi_rope::Rope`.
///
/// The rope holds *logical* text: every line terminator found on load (`\r\n`,
/// `\n` or a lone `\r`) is stored as a single `\n`. The physical style is kept
/// separately in `line_ending` and applied again by [`Document::to_bytes`].
///
/// ```rust
/// # use offset_lens_engine::{Document, LineEnding, TextSource};
/// let doc = Document::from_bytes(b"a\r\nb\r\n").unwrap();
/// assert_eq!(doc.line_ending(), LineEnding::Crlf);
/// assert_eq!(doc.line_count(), 3);
/// assert_eq!(doc.line_text(1), "b");
/// assert_eq!(doc.to_bytes(), b"a\r\nb\r\n");
/// ```
#[derive(Clone)]
pub struct Document {
    buffer: Rope,
    line_ending: LineEnding,
}

impl Document {
    /// Create a document from raw bytes, detecting the line-ending style.
    pub fn from_bytes(bytes: &[u8]) -> anyhow::Result<Self> {
        let text = std::str::from_utf8(bytes)?;
        Ok(Self::from_text(text))
    }

    /// Create a document from text, detecting the line-ending style.
    ///
    /// CRLF is chosen only when `\r\n` pairs strictly outnumber the other
    /// terminators; a document without terminators is LF.
    pub fn from_text(text: &str) -> Self {
        let (normalized, line_ending) = normalize_line_endings(text);
        log::debug!(
            "loaded document: {} bytes, {} line endings",
            text.len(),
            line_ending
        );
        Self {
            buffer: Rope::from(normalized.as_ref()),
            line_ending,
        }
    }

    /// Same text rendered with a different physical line-ending style.
    #[must_use]
    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    /// Physical bytes of the document, terminators rendered in its style.
    pub fn to_bytes(&self) -> Vec<u8> {
        let text = self.buffer.to_string();
        match self.line_ending {
            LineEnding::Lf => text.into_bytes(),
            LineEnding::Crlf => text.replace('\n', "\r\n").into_bytes(),
        }
    }

    /// Logical text, terminators as `\n`.
    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    /// Rope byte offset (logical text) of a position, clamped to its line.
    fn rope_offset(&self, position: Position) -> usize {
        if position.line >= self.line_count() {
            return self.buffer.len();
        }
        let line = self.line_text(position.line);
        self.buffer.offset_of_line(position.line) + byte_index_of_column(&line, position.column)
    }
}

impl TextSource for Document {
    fn line_count(&self) -> usize {
        self.buffer.measure::<LinesMetric>() + 1
    }

    fn line_text(&self, line: usize) -> Cow<'_, str> {
        let count = self.line_count();
        if line >= count {
            return Cow::Borrowed("");
        }
        let start = self.buffer.offset_of_line(line);
        let end = if line + 1 < count {
            // Exclude the `\n` that ends this line.
            self.buffer.offset_of_line(line + 1) - 1
        } else {
            self.buffer.len()
        };
        self.buffer.slice_to_cow(start..end)
    }

    fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    fn text_in_range(&self, start: Position, end: Position) -> String {
        let (start, end) = if start <= end { (start, end) } else { (end, start) };
        let from = self.rope_offset(start);
        let to = self.rope_offset(end);
        self.buffer.slice_to_cow(from..to).into_owned()
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("len", &self.buffer.len())
            .field("lines", &self.line_count())
            .field("line_ending", &self.line_ending)
            .finish()
    }
}

/// Collapse every terminator to `\n` and pick the dominant physical style.
fn normalize_line_endings(text: &str) -> (Cow<'_, str>, LineEnding) {
    if !text.contains('\r') {
        return (Cow::Borrowed(text), LineEnding::Lf);
    }

    let mut crlf = 0usize;
    let mut other = 0usize;
    let mut normalized = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\r' if chars.peek() == Some(&'\n') => {
                chars.next();
                crlf += 1;
                normalized.push('\n');
            }
            '\r' | '\n' => {
                other += 1;
                normalized.push('\n');
            }
            _ => normalized.push(ch),
        }
    }

    let line_ending = if crlf > other {
        LineEnding::Crlf
    } else {
        LineEnding::Lf
    };
    (Cow::Owned(normalized), line_ending)
}
