use thiserror::Error;

/// Errors reported by the offset engine.
///
/// Out-of-range targets are deliberately absent: resolving past the end of a
/// document lands on the end-of-document position instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavError {
    #[error("Invalid offset: {0:?}")]
    InvalidOffset(String),

    #[error("Invalid code point: {0:?}")]
    InvalidCodePoint(String),

    /// A `\r` reached the character decomposer. Line endings must be collapsed
    /// to a single `\n` before decomposition.
    #[error("Unpaired line terminator at character offset {char_offset}")]
    UnpairedLineTerminator { char_offset: usize },
}
