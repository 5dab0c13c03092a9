//! Character reports: one row per character with its position, offsets and
//! encodings.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use offset_lens_engine::{
    CharDetails, LineEnding, Offsets, Position, Selection, TextSource, TrackedOffsets,
    char_positions, line_starts, offsets_at, resolve_char,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub position: Position,
    pub details: CharDetails,
}

/// Up to `count` characters starting at `from`.
///
/// A `from` column in the middle of a surrogate pair starts at the character
/// containing it.
pub fn collect_rows<D: TextSource + ?Sized>(
    source: &D,
    from: Position,
    count: usize,
) -> Vec<ReportRow> {
    let mut offsets = offsets_at(source, from);
    let start = resolve_char(source, offsets.char).active;
    let line_ending = source.line_ending();

    char_positions(source, start.line)
        .skip_while(|info| info.position < start)
        .map_while(|info| {
            let details = CharDetails::new(info.ch?, line_ending, offsets);
            offsets = details.next_offsets();
            Some(ReportRow {
                position: info.position,
                details,
            })
        })
        .take(count)
        .collect()
}

pub fn render(rows: &[ReportRow]) -> String {
    let mut out = String::new();
    writeln!(
        out,
        "{:<9} {:>6} {:>6} {:<9} {:<12} {:<10} TEXT",
        "POSITION", "BYTE", "CHAR", "CODEPOINT", "UTF-8", "UTF-16"
    )
    .unwrap();
    for row in rows {
        let details = &row.details;
        writeln!(
            out,
            "{:<9} {:>6} {:>6} {:<9} {:<12} {:<10} {}",
            row.position.to_string(),
            details.offsets.byte,
            details.offsets.char,
            format_code_point(details.code_point()),
            hex_bytes(&details.bytes),
            hex_units(&details.code_units),
            visible(details),
        )
        .unwrap();
    }
    out
}

pub fn format_code_point(code_point: u32) -> String {
    format!("U+{code_point:04X}")
}

pub fn hex_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn hex_units(units: &[u16]) -> String {
    units
        .iter()
        .map(|u| format!("{u:04X}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// The physical text of a character with control characters escaped.
fn visible(details: &CharDetails) -> String {
    String::from_utf8_lossy(&details.bytes)
        .escape_debug()
        .to_string()
}

/// The selected text, or the rest of the line after a cursor, cut to
/// `max_chars` characters.
pub fn preview<D: TextSource + ?Sized>(
    source: &D,
    selection: Selection,
    max_chars: usize,
) -> String {
    let text = if selection.is_empty() {
        let line_end = Position::new(selection.active.line, usize::MAX);
        source.text_in_range(selection.active, line_end)
    } else {
        source.text_in_range(selection.start(), selection.end())
    };

    let mut chars = text.chars();
    let mut shown: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        shown.push('…');
    }
    shown
}

/// Where a `goto` landed: the selection, its offsets and a preview.
pub fn describe_selection<D: TextSource + ?Sized>(
    source: &D,
    selection: Selection,
    preview_chars: usize,
) -> String {
    let start = offsets_at(source, selection.start());
    let mut out = String::new();
    if selection.is_empty() {
        writeln!(out, "cursor    {}", selection.active).unwrap();
        writeln!(out, "offsets   byte {}, char {}", start.byte, start.char).unwrap();
    } else {
        let end = offsets_at(source, selection.end());
        writeln!(out, "selection {}-{}", selection.start(), selection.end()).unwrap();
        writeln!(
            out,
            "offsets   byte {}..{}, char {}..{}",
            start.byte, end.byte, start.char, end.char
        )
        .unwrap();
    }
    writeln!(
        out,
        "preview   {:?}",
        preview(source, selection, preview_chars)
    )
    .unwrap();
    out
}

/// A code point with its UTF-8 and UTF-16 encodings.
pub fn describe_code_point(ch: char) -> String {
    let details = CharDetails::new(ch, LineEnding::Lf, Offsets::ZERO);
    let mut out = String::new();
    writeln!(
        out,
        "{} {}",
        format_code_point(details.code_point()),
        visible(&details)
    )
    .unwrap();
    writeln!(out, "UTF-8   {}", hex_bytes(&details.bytes)).unwrap();
    writeln!(out, "UTF-16  {}", hex_units(&details.code_units)).unwrap();
    out
}

/// Start offsets and text of every line.
pub fn render_line_table<D: TextSource + ?Sized>(source: &D) -> String {
    let mut out = String::new();
    for info in line_starts(source, TrackedOffsets::Both) {
        writeln!(
            out,
            "{}: byte {} char {} {:?}",
            info.position.line, info.offsets.byte, info.offsets.char, info.text
        )
        .unwrap();
    }
    out
}

/// Picks `report-N.txt` names inside a directory, one past the highest
/// number already present.
#[derive(Debug, Clone)]
pub struct ReportNamer {
    dir: PathBuf,
}

impl ReportNamer {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn next_path(&self) -> std::io::Result<PathBuf> {
        let highest = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries
                .filter_map(|entry| entry.ok())
                .filter_map(|entry| report_number(&entry.file_name().to_string_lossy()))
                .max()
                .unwrap_or(0),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => 0,
            Err(e) => return Err(e),
        };
        let next = highest.checked_add(1).ok_or_else(|| {
            std::io::Error::other(format!(
                "no report number left after report-{highest}.txt in {}",
                self.dir.display()
            ))
        })?;
        Ok(self.dir.join(format!("report-{next}.txt")))
    }
}

fn report_number(file_name: &str) -> Option<u32> {
    file_name
        .strip_prefix("report-")?
        .strip_suffix(".txt")?
        .parse()
        .ok()
}
