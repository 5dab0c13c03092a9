use crate::document::{Position, TextSource};

use super::{OffsetKind, Offsets};

/// Which offsets the line table computes.
///
/// An untracked offset stays at its start value (0) in every [`LineInfo`] and
/// must not be compared against anything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TrackedOffsets {
    #[default]
    Both,
    BytesOnly,
    CharsOnly,
}

impl TrackedOffsets {
    /// Track just the offsets of `kind`.
    pub fn only(kind: OffsetKind) -> Self {
        match kind {
            OffsetKind::Byte => TrackedOffsets::BytesOnly,
            OffsetKind::Char => TrackedOffsets::CharsOnly,
        }
    }

    pub fn tracks(self, kind: OffsetKind) -> bool {
        matches!(
            (self, kind),
            (TrackedOffsets::Both, _)
                | (TrackedOffsets::BytesOnly, OffsetKind::Byte)
                | (TrackedOffsets::CharsOnly, OffsetKind::Char)
        )
    }
}

/// A line of the document with the offsets of its first character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineInfo {
    /// Column 0 of the line.
    pub position: Position,
    /// Line text without its terminator.
    pub text: String,
    pub offsets: Offsets,
}

/// Lazy line table. Clone it to restart from the same point.
pub struct LineStarts<'a, D: TextSource + ?Sized> {
    source: &'a D,
    line: usize,
    line_count: usize,
    next: Offsets,
    tracked: TrackedOffsets,
    terminator_bytes: usize,
}

/// Iterate the lines of `source` with their starting offsets, beginning at
/// `(byte 0, char 0)` on line 0.
pub fn line_starts<D: TextSource + ?Sized>(
    source: &D,
    tracked: TrackedOffsets,
) -> LineStarts<'_, D> {
    LineStarts {
        source,
        line: 0,
        line_count: source.line_count(),
        next: Offsets::ZERO,
        tracked,
        terminator_bytes: source.line_ending().byte_len(),
    }
}

impl<D: TextSource + ?Sized> Iterator for LineStarts<'_, D> {
    type Item = LineInfo;

    fn next(&mut self) -> Option<LineInfo> {
        if self.line >= self.line_count {
            return None;
        }

        let text = self.source.line_text(self.line).into_owned();
        let info = LineInfo {
            position: Position::new(self.line, 0),
            offsets: self.next,
            text,
        };

        if self.tracked.tracks(OffsetKind::Byte) {
            self.next.byte += info.text.len() + self.terminator_bytes;
        }
        if self.tracked.tracks(OffsetKind::Char) {
            self.next.char += info.text.chars().count() + 1;
        }
        self.line += 1;

        Some(info)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.line_count.saturating_sub(self.line);
        (remaining, Some(remaining))
    }
}

impl<D: TextSource + ?Sized> ExactSizeIterator for LineStarts<'_, D> {}

impl<D: TextSource + ?Sized> Clone for LineStarts<'_, D> {
    fn clone(&self) -> Self {
        Self {
            source: self.source,
            line: self.line,
            line_count: self.line_count,
            next: self.next,
            tracked: self.tracked,
            terminator_bytes: self.terminator_bytes,
        }
    }
}
