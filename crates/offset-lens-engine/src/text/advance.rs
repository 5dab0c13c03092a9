use crate::document::{Position, TextSource};

/// One logical character of a document and where it starts.
///
/// `ch` is `Some('\n')` for a line terminator (one character whatever the
/// physical line ending) and `None` for the end-of-document record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharInfo {
    pub position: Position,
    pub ch: Option<char>,
}

impl CharInfo {
    pub fn is_end(&self) -> bool {
        self.ch.is_none()
    }

    pub fn is_line_break(&self) -> bool {
        self.ch == Some('\n')
    }

    /// The character as a string; empty for the end-of-document record.
    pub fn text(&self) -> String {
        self.ch.map(String::from).unwrap_or_default()
    }
}

/// What sits under a cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unit {
    Char { ch: char, width: usize },
    LineBreak,
    EndOfDocument,
}

/// Walks a text source one logical character at a time.
///
/// The current line is held as UTF-16 code units so columns can be compared
/// with editor positions directly.
struct Cursor<'a, D: TextSource + ?Sized> {
    source: &'a D,
    line_count: usize,
    line: usize,
    column: usize,
    units: Vec<u16>,
}

impl<'a, D: TextSource + ?Sized> Cursor<'a, D> {
    fn new(source: &'a D, position: Position) -> Self {
        let mut cursor = Self {
            source,
            line_count: source.line_count(),
            line: position.line,
            column: position.column,
            units: Vec::new(),
        };
        cursor.load_line();
        cursor
    }

    fn load_line(&mut self) {
        self.units = self.source.line_text(self.line).encode_utf16().collect();
    }

    fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    fn current(&self) -> Unit {
        if self.column < self.units.len() {
            // A high surrogate followed by its low half decodes as one
            // character two units wide.
            match char::decode_utf16(self.units[self.column..].iter().copied()).next() {
                Some(Ok(ch)) => Unit::Char {
                    ch,
                    width: ch.len_utf16(),
                },
                _ => Unit::Char {
                    ch: char::REPLACEMENT_CHARACTER,
                    width: 1,
                },
            }
        } else if self.line + 1 < self.line_count {
            Unit::LineBreak
        } else {
            Unit::EndOfDocument
        }
    }

    /// Move past the current unit. Returns false at end of document.
    fn step(&mut self) -> bool {
        match self.current() {
            Unit::Char { width, .. } => {
                self.column += width;
                true
            }
            Unit::LineBreak => {
                self.line += 1;
                self.column = 0;
                self.load_line();
                true
            }
            Unit::EndOfDocument => false,
        }
    }
}

/// The position `count` logical characters after `position`, or `None` when
/// the end of the document comes first.
///
/// Stepping off the end of a line onto the next one consumes one character,
/// the line terminator.
pub fn advance<D: TextSource + ?Sized>(
    source: &D,
    position: Position,
    count: usize,
) -> Option<Position> {
    if position.line >= source.line_count() {
        return None;
    }
    let mut cursor = Cursor::new(source, position);
    for _ in 0..count {
        if !cursor.step() {
            return None;
        }
    }
    Some(cursor.position())
}

/// Position just after the last character of the document.
pub fn end_position<D: TextSource + ?Sized>(source: &D) -> Position {
    let last = source.line_count().saturating_sub(1);
    let column = source.line_text(last).encode_utf16().count();
    Position::new(last, column)
}

/// Lazy sequence of characters from the start of `starting_line` to the end of
/// the document, closed by an end-of-document record.
pub struct CharPositions<'a, D: TextSource + ?Sized> {
    cursor: Cursor<'a, D>,
    done: bool,
}

pub fn char_positions<D: TextSource + ?Sized>(
    source: &D,
    starting_line: usize,
) -> CharPositions<'_, D> {
    let start = if starting_line < source.line_count() {
        Position::new(starting_line, 0)
    } else {
        end_position(source)
    };
    CharPositions {
        cursor: Cursor::new(source, start),
        done: false,
    }
}

impl<D: TextSource + ?Sized> Iterator for CharPositions<'_, D> {
    type Item = CharInfo;

    fn next(&mut self) -> Option<CharInfo> {
        if self.done {
            return None;
        }

        let position = self.cursor.position();
        let ch = match self.cursor.current() {
            Unit::Char { ch, .. } => Some(ch),
            Unit::LineBreak => Some('\n'),
            Unit::EndOfDocument => {
                self.done = true;
                None
            }
        };
        self.cursor.step();
        Some(CharInfo { position, ch })
    }
}
