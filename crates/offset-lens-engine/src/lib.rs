//! Translation between editor positions, code-point offsets and UTF-8 byte
//! offsets.
//!
//! ```rust
//! use offset_lens_engine::{Document, Position, Selection, resolve_byte, resolve_char};
//!
//! let doc = Document::from_bytes("a\r\nbæΩ😀x\r\nc".as_bytes()).unwrap();
//!
//! // Byte 9 is inside the four-byte 😀, so the whole character is selected.
//! assert_eq!(
//!     resolve_byte(&doc, 9),
//!     Selection::new(Position::new(1, 3), Position::new(1, 5))
//! );
//! // A CRLF terminator is a single character.
//! assert_eq!(resolve_char(&doc, 5), Selection::cursor(Position::new(1, 3)));
//! ```

pub mod document;
pub mod error;
pub mod io;
pub mod navigate;
pub mod parse;
pub mod text;

// Re-export key types for easier usage
pub use document::{Document, LineEnding, Position, TextSource};
pub use error::NavError;
pub use navigate::{
    Selection, offsets_at, resolve, resolve_byte, resolve_char, resolve_offset, target_offset,
};
pub use parse::{ParsedOffset, parse_code_point, parse_offset};
pub use text::advance::end_position;
pub use text::{
    CharDetails, CharInfo, LineInfo, OffsetKind, Offsets, TrackedOffsets, advance, char_details,
    char_positions, line_starts,
};
