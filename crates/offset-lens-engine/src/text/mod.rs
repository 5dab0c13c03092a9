pub mod advance;
pub mod details;
pub mod lines;

pub use advance::{CharInfo, CharPositions, advance, char_positions};
pub use details::{CharDetails, CharDetailsIter, char_details};
pub use lines::{LineInfo, LineStarts, TrackedOffsets, line_starts};

/// Absolute offsets from the start of a document.
///
/// `byte` counts UTF-8 bytes of the physical encoding (terminators are 1 or 2
/// bytes), `char` counts logical characters (every terminator is 1).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Offsets {
    pub byte: usize,
    pub char: usize,
}

impl Offsets {
    pub const ZERO: Offsets = Offsets { byte: 0, char: 0 };

    pub const fn new(byte: usize, char: usize) -> Self {
        Self { byte, char }
    }

    /// The offset in one coordinate system.
    pub fn get(self, kind: OffsetKind) -> usize {
        match kind {
            OffsetKind::Byte => self.byte,
            OffsetKind::Char => self.char,
        }
    }
}

/// Which coordinate system an offset is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OffsetKind {
    Byte,
    Char,
}

impl OffsetKind {
    pub fn as_str(self) -> &'static str {
        match self {
            OffsetKind::Byte => "byte",
            OffsetKind::Char => "char",
        }
    }
}
