//! Resolving byte and character offsets into editor selections.
//!
//! Resolution walks the line table with one line of lookahead so that whole
//! lines ending before the target are skipped without scanning their
//! characters. The line that can contain the target is then scanned character
//! by character from its own start offsets.
//!
//! A byte offset that falls strictly inside a multi-byte character (or inside
//! a CRLF terminator) selects that whole character rather than snapping to one
//! of its edges. Offsets past the end of the document resolve to the
//! end-of-document position; navigation never fails for overshooting.

#[cfg(test)]
mod tests;

use crate::document::{Position, TextSource, byte_index_of_column};
use crate::parse::ParsedOffset;
use crate::text::advance::end_position;
use crate::text::details::step_offsets;
use crate::text::{LineInfo, OffsetKind, Offsets, TrackedOffsets, char_positions, line_starts};

/// An editor selection. `anchor == active` is a plain cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Selection {
    pub anchor: Position,
    pub active: Position,
}

impl Selection {
    pub const fn new(anchor: Position, active: Position) -> Self {
        Self { anchor, active }
    }

    pub const fn cursor(position: Position) -> Self {
        Self::new(position, position)
    }

    pub fn is_empty(&self) -> bool {
        self.anchor == self.active
    }

    pub fn start(&self) -> Position {
        self.anchor.min(self.active)
    }

    pub fn end(&self) -> Position {
        self.anchor.max(self.active)
    }
}

/// Resolve an absolute UTF-8 byte offset.
pub fn resolve_byte<D: TextSource + ?Sized>(source: &D, target: usize) -> Selection {
    resolve_offset(source, OffsetKind::Byte, target)
}

/// Resolve an absolute character offset.
pub fn resolve_char<D: TextSource + ?Sized>(source: &D, target: usize) -> Selection {
    resolve_offset(source, OffsetKind::Char, target)
}

/// Resolve a user-entered offset.
///
/// Relative offsets are added to the offset of `cursor` in the same
/// coordinate system as `kind`.
pub fn resolve<D: TextSource + ?Sized>(
    source: &D,
    kind: OffsetKind,
    offset: ParsedOffset,
    cursor: Position,
) -> Selection {
    let target = target_offset(source, kind, offset, cursor);
    resolve_offset(source, kind, target)
}

/// The absolute target of `offset`. Relative moves before the start of the
/// document clamp to 0.
pub fn target_offset<D: TextSource + ?Sized>(
    source: &D,
    kind: OffsetKind,
    offset: ParsedOffset,
    cursor: Position,
) -> usize {
    let magnitude = usize::try_from(offset.value.unsigned_abs()).unwrap_or(usize::MAX);
    if !offset.is_relative {
        return if offset.value < 0 { 0 } else { magnitude };
    }

    let anchor = offsets_at(source, cursor).get(kind);
    if offset.value < 0 {
        anchor.saturating_sub(magnitude)
    } else {
        anchor.saturating_add(magnitude)
    }
}

/// Resolve `target` in the coordinate system `kind`.
pub fn resolve_offset<D: TextSource + ?Sized>(
    source: &D,
    kind: OffsetKind,
    target: usize,
) -> Selection {
    log::debug!("resolving {} offset {target}", kind.as_str());

    let Some(line) = containing_line(source, kind, target) else {
        return Selection::cursor(end_position(source));
    };
    log::trace!(
        "scanning line {} from {} offset {}",
        line.position.line,
        kind.as_str(),
        line.offsets.get(kind)
    );

    let line_ending = source.line_ending();
    let mut offsets = line.offsets;
    let mut previous: Option<Position> = None;

    for info in char_positions(source, line.position.line) {
        let offset = offsets.get(kind);
        match kind {
            OffsetKind::Char if offset >= target => return Selection::cursor(info.position),
            OffsetKind::Byte if offset == target => return Selection::cursor(info.position),
            OffsetKind::Byte if offset > target => {
                // The target sits inside the previous character.
                return match previous {
                    Some(start) => Selection::new(start, info.position),
                    None => Selection::cursor(info.position),
                };
            }
            _ => {}
        }

        let Some(ch) = info.ch else {
            log::debug!(
                "{} offset {target} is past the end of the document",
                kind.as_str()
            );
            return Selection::cursor(info.position);
        };
        offsets = step_offsets(offsets, ch, line_ending);
        previous = Some(info.position);
    }

    Selection::cursor(end_position(source))
}

/// The last line whose start offset is `<= target`, found by looking one line
/// ahead. Only the offsets of `kind` are computed.
fn containing_line<D: TextSource + ?Sized>(
    source: &D,
    kind: OffsetKind,
    target: usize,
) -> Option<LineInfo> {
    let mut lines = line_starts(source, TrackedOffsets::only(kind)).peekable();
    let mut current = lines.next()?;
    while let Some(next) = lines.next_if(|next| next.offsets.get(kind) <= target) {
        current = next;
    }
    Some(current)
}

/// Byte and character offsets of `position`.
///
/// Columns past the end of their line clamp to the end of the line; lines past
/// the end of the document clamp to the end of the document.
pub fn offsets_at<D: TextSource + ?Sized>(source: &D, position: Position) -> Offsets {
    let Some(line) = line_starts(source, TrackedOffsets::Both)
        .take(position.line.saturating_add(1))
        .last()
    else {
        return Offsets::ZERO;
    };

    let column = if line.position.line == position.line {
        position.column
    } else {
        usize::MAX
    };
    let prefix = &line.text[..byte_index_of_column(&line.text, column)];
    Offsets::new(
        line.offsets.byte + prefix.len(),
        line.offsets.char + prefix.chars().count(),
    )
}
