//! Parsing of user-entered offsets and code points.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::NavError;

/// An offset as typed by the user.
///
/// A leading sign makes the offset relative to the cursor; `-` also negates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedOffset {
    pub is_relative: bool,
    pub value: i64,
}

impl ParsedOffset {
    pub const fn absolute(value: i64) -> Self {
        Self {
            is_relative: false,
            value,
        }
    }

    pub const fn relative(value: i64) -> Self {
        Self {
            is_relative: true,
            value,
        }
    }
}

/// Largest Unicode code point.
pub const MAX_CODE_POINT: u32 = 0x10FFFF;

fn offset_regex() -> &'static Regex {
    static OFFSET_REGEX: OnceLock<Regex> = OnceLock::new();
    OFFSET_REGEX.get_or_init(|| {
        Regex::new(r"^([+-])?(?:0[xX]([0-9a-fA-F]+)|([0-9]+))$").expect("Invalid offset regex")
    })
}

fn code_point_regex() -> &'static Regex {
    static CODE_POINT_REGEX: OnceLock<Regex> = OnceLock::new();
    CODE_POINT_REGEX.get_or_init(|| {
        Regex::new(r"^(?:(?:0[xX]|\\[xXuU]|[uU]\+)([0-9a-fA-F]+)|([0-9]+))$")
            .expect("Invalid code point regex")
    })
}

/// Parse `[+|-](decimal | 0x hex)`.
///
/// ```rust
/// # use offset_lens_engine::{parse_offset, ParsedOffset};
/// assert_eq!(parse_offset("+0x0a").unwrap(), ParsedOffset::relative(10));
/// assert_eq!(parse_offset("-10").unwrap(), ParsedOffset::relative(-10));
/// assert_eq!(parse_offset("42").unwrap(), ParsedOffset::absolute(42));
/// ```
pub fn parse_offset(input: &str) -> Result<ParsedOffset, NavError> {
    let invalid = || NavError::InvalidOffset(input.to_string());
    let trimmed = input.trim();
    let caps = offset_regex().captures(trimmed).ok_or_else(invalid)?;

    let magnitude = match (caps.get(2), caps.get(3)) {
        (Some(hex), _) => i64::from_str_radix(hex.as_str(), 16),
        (None, Some(dec)) => dec.as_str().parse::<i64>(),
        (None, None) => return Err(invalid()),
    }
    .map_err(|_| invalid())?;

    Ok(match caps.get(1).map(|sign| sign.as_str()) {
        Some("-") => ParsedOffset::relative(-magnitude),
        Some(_) => ParsedOffset::relative(magnitude),
        None => ParsedOffset::absolute(magnitude),
    })
}

/// Parse a code point written as decimal, `0x..`, `\x..`, `\u..` or `U+..`.
///
/// ```rust
/// # use offset_lens_engine::parse_code_point;
/// assert_eq!(parse_code_point("U+41").unwrap(), 65);
/// assert_eq!(parse_code_point("\\u00e6").unwrap(), 0xE6);
/// ```
pub fn parse_code_point(input: &str) -> Result<u32, NavError> {
    let invalid = || NavError::InvalidCodePoint(input.to_string());
    let trimmed = input.trim();
    let caps = code_point_regex().captures(trimmed).ok_or_else(invalid)?;

    let value = match (caps.get(1), caps.get(2)) {
        (Some(hex), _) => u32::from_str_radix(hex.as_str(), 16),
        (None, Some(dec)) => dec.as_str().parse::<u32>(),
        (None, None) => return Err(invalid()),
    }
    .map_err(|_| invalid())?;

    if value > MAX_CODE_POINT {
        return Err(invalid());
    }
    Ok(value)
}
