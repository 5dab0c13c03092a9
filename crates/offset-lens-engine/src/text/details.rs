use std::str::Chars;

use crate::document::LineEnding;
use crate::error::NavError;

use super::Offsets;

/// Everything there is to know about one logical character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharDetails {
    /// The logical character. A line terminator is `'\n'` whatever the style.
    pub ch: char,
    /// UTF-8 bytes of the physical rendering (`\r\n` for a CRLF terminator).
    pub bytes: Vec<u8>,
    /// UTF-16 code units of the physical rendering.
    pub code_units: Vec<u16>,
    /// Offsets of the first byte / unit of this character.
    pub offsets: Offsets,
}

impl CharDetails {
    pub fn new(ch: char, line_ending: LineEnding, offsets: Offsets) -> Self {
        let mut buf = [0u8; 4];
        let physical: &str = if ch == '\n' {
            line_ending.as_str()
        } else {
            ch.encode_utf8(&mut buf)
        };
        Self {
            ch,
            bytes: physical.as_bytes().to_vec(),
            code_units: physical.encode_utf16().collect(),
            offsets,
        }
    }

    pub fn code_point(&self) -> u32 {
        u32::from(self.ch)
    }

    pub fn is_line_break(&self) -> bool {
        self.ch == '\n'
    }

    /// Offsets of the character that follows this one.
    pub fn next_offsets(&self) -> Offsets {
        Offsets::new(self.offsets.byte + self.bytes.len(), self.offsets.char + 1)
    }
}

/// Offsets after `ch`, without materializing its encodings.
pub(crate) fn step_offsets(offsets: Offsets, ch: char, line_ending: LineEnding) -> Offsets {
    let bytes = if ch == '\n' {
        line_ending.byte_len()
    } else {
        ch.len_utf8()
    };
    Offsets::new(offsets.byte + bytes, offsets.char + 1)
}

/// Lazy [`CharDetails`] sequence over normalized text.
#[derive(Debug, Clone)]
pub struct CharDetailsIter<'a> {
    chars: Chars<'a>,
    line_ending: LineEnding,
    next: Offsets,
}

/// Decompose `text` into characters, starting the running offsets at `start`.
///
/// `text` must use `\n` for every terminator. Any `\r` means line endings were
/// not normalized upstream and is reported instead of guessed at.
pub fn char_details(
    text: &str,
    line_ending: LineEnding,
    start: Offsets,
) -> Result<CharDetailsIter<'_>, NavError> {
    if let Some(index) = text.chars().position(|ch| ch == '\r') {
        return Err(NavError::UnpairedLineTerminator {
            char_offset: start.char + index,
        });
    }
    Ok(CharDetailsIter {
        chars: text.chars(),
        line_ending,
        next: start,
    })
}

impl Iterator for CharDetailsIter<'_> {
    type Item = CharDetails;

    fn next(&mut self) -> Option<CharDetails> {
        let ch = self.chars.next()?;
        let details = CharDetails::new(ch, self.line_ending, self.next);
        self.next = details.next_offsets();
        Some(details)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.chars.size_hint()
    }
}
