//! Navigation tests: the worked LF/CRLF scenarios plus properties checked over
//! every offset of a handful of documents.

use pretty_assertions::assert_eq;
use rstest::rstest;

use super::*;
use crate::document::{Document, LineEnding};
use crate::text::{CharDetails, advance, char_details};

fn pos(line: usize, column: usize) -> Position {
    Position::new(line, column)
}

fn crlf_doc() -> Document {
    Document::from_text("a\r\nbæΩ😀x\r\nc")
}

fn lf_doc() -> Document {
    Document::from_text("a\nbæΩ😀x\nc")
}

/// Every character of `doc` with its details and position, end record excluded.
fn all_chars(doc: &Document) -> Vec<(Position, CharDetails)> {
    let ending = doc.line_ending();
    let mut offsets = Offsets::ZERO;
    char_positions(doc, 0)
        .filter_map(|info| {
            let ch = info.ch?;
            let details = CharDetails::new(ch, ending, offsets);
            offsets = details.next_offsets();
            Some((info.position, details))
        })
        .collect()
}

fn total(doc: &Document) -> Offsets {
    offsets_at(doc, end_position(doc))
}

// Worked scenarios

#[rstest]
#[case::first_char(0, Selection::cursor(pos(0, 0)))]
#[case::inside_first_crlf(2, Selection::new(pos(0, 1), pos(1, 0)))]
#[case::line_start(3, Selection::cursor(pos(1, 0)))]
#[case::inside_ae(5, Selection::new(pos(1, 1), pos(1, 2)))]
#[case::emoji_start(8, Selection::cursor(pos(1, 3)))]
#[case::inside_emoji(9, Selection::new(pos(1, 3), pos(1, 5)))]
#[case::inside_emoji_last_byte(11, Selection::new(pos(1, 3), pos(1, 5)))]
#[case::after_emoji(12, Selection::cursor(pos(1, 5)))]
#[case::last_char(15, Selection::cursor(pos(2, 0)))]
#[case::document_end(16, Selection::cursor(pos(2, 1)))]
#[case::past_end(1000, Selection::cursor(pos(2, 1)))]
fn crlf_byte_resolution(#[case] target: usize, #[case] expected: Selection) {
    assert_eq!(resolve_byte(&crlf_doc(), target), expected);
}

#[rstest]
#[case::first_char(0, Selection::cursor(pos(0, 0)))]
#[case::lf_terminator(1, Selection::cursor(pos(0, 1)))]
#[case::emoji_start(7, Selection::cursor(pos(1, 3)))]
#[case::inside_emoji(8, Selection::new(pos(1, 3), pos(1, 5)))]
#[case::after_emoji(11, Selection::cursor(pos(1, 5)))]
#[case::document_end(14, Selection::cursor(pos(2, 1)))]
fn lf_byte_resolution(#[case] target: usize, #[case] expected: Selection) {
    assert_eq!(resolve_byte(&lf_doc(), target), expected);
}

#[rstest]
#[case::first_char(0, pos(0, 0))]
#[case::terminator(1, pos(0, 1))]
#[case::second_line(2, pos(1, 0))]
#[case::emoji(5, pos(1, 3))]
#[case::after_emoji(6, pos(1, 5))]
#[case::second_terminator(7, pos(1, 6))]
#[case::last_line(8, pos(2, 0))]
#[case::document_end(9, pos(2, 1))]
#[case::past_end(50, pos(2, 1))]
fn char_resolution_ignores_line_ending_style(#[case] target: usize, #[case] expected: Position) {
    assert_eq!(resolve_char(&crlf_doc(), target), Selection::cursor(expected));
    assert_eq!(resolve_char(&lf_doc(), target), Selection::cursor(expected));
}

#[test]
fn char_offsets_match_across_styles() {
    let lf: Vec<usize> = all_chars(&lf_doc()).iter().map(|(_, d)| d.offsets.char).collect();
    let crlf: Vec<usize> = all_chars(&crlf_doc()).iter().map(|(_, d)| d.offsets.char).collect();
    assert_eq!(lf, crlf);
    assert_eq!(total(&lf_doc()), Offsets::new(14, 9));
    assert_eq!(total(&crlf_doc()), Offsets::new(16, 9));
}

// Properties over whole documents

const DOCUMENTS: &[&str] = &[
    "a\nbæΩ😀x\nc",
    "",
    "\n\n",
    "😀😀\n𝄞\n",
    "plain ascii\nsecond line",
    "ü\nΩ\n\n日本語テキスト\n🎉 done",
];

fn documents() -> impl Iterator<Item = Document> {
    DOCUMENTS.iter().flat_map(|text| {
        [LineEnding::Lf, LineEnding::Crlf]
            .into_iter()
            .map(|ending| Document::from_text(text).with_line_ending(ending))
    })
}

#[test]
fn boundary_bytes_give_cursors_and_inner_bytes_select_the_character() {
    for doc in documents() {
        for (position, details) in all_chars(&doc) {
            let next = advance(&doc, position, 1).unwrap();
            assert_eq!(
                resolve_byte(&doc, details.offsets.byte),
                Selection::cursor(position),
                "boundary of {:?} in {doc:?}",
                details.ch
            );
            for inner in 1..details.bytes.len() {
                assert_eq!(
                    resolve_byte(&doc, details.offsets.byte + inner),
                    Selection::new(position, next),
                    "byte {inner} of {:?} in {doc:?}",
                    details.ch
                );
            }
        }
    }
}

#[test]
fn char_resolution_finds_smallest_offset_at_or_after_target() {
    for doc in documents() {
        let chars = all_chars(&doc);
        let end = total(&doc).char;
        for target in 0..end + 3 {
            let resolved = resolve_char(&doc, target);
            assert!(resolved.is_empty());
            let landed = offsets_at(&doc, resolved.active).char;
            let expected = chars
                .iter()
                .map(|(_, d)| d.offsets.char)
                .find(|&offset| offset >= target)
                .unwrap_or(end);
            assert_eq!(landed, expected, "char {target} in {doc:?}");
        }
    }
}

#[test]
fn decomposed_offsets_round_trip() {
    for doc in documents() {
        for (position, details) in all_chars(&doc) {
            assert_eq!(
                resolve_char(&doc, details.offsets.char).active,
                position
            );
            assert_eq!(
                resolve_byte(&doc, details.offsets.byte).active,
                position
            );
            assert_eq!(offsets_at(&doc, position), details.offsets);
        }
    }
}

#[test]
fn line_scan_agrees_with_decomposing_whole_text() {
    for doc in documents() {
        let from_text: Vec<CharDetails> = char_details(&doc.text(), doc.line_ending(), Offsets::ZERO)
            .unwrap()
            .collect();
        let from_lines: Vec<CharDetails> = all_chars(&doc).into_iter().map(|(_, d)| d).collect();
        assert_eq!(from_text, from_lines);
    }
}

#[test]
fn overshooting_lands_on_document_end() {
    for doc in documents() {
        let end = Selection::cursor(end_position(&doc));
        let totals = total(&doc);
        assert_eq!(resolve_byte(&doc, totals.byte), end);
        assert_eq!(resolve_byte(&doc, totals.byte + 7), end);
        assert_eq!(resolve_char(&doc, totals.char + 7), end);
    }
}

// Relative resolution

#[rstest]
#[case::forward_chars(OffsetKind::Char, ParsedOffset::relative(3), pos(1, 1), pos(1, 5))]
#[case::backward_chars(OffsetKind::Char, ParsedOffset::relative(-2), pos(1, 1), pos(0, 1))]
#[case::clamps_at_start(OffsetKind::Char, ParsedOffset::relative(-99), pos(1, 1), pos(0, 0))]
#[case::absolute_ignores_cursor(OffsetKind::Char, ParsedOffset::absolute(8), pos(1, 1), pos(2, 0))]
#[case::forward_bytes(OffsetKind::Byte, ParsedOffset::relative(4), pos(1, 1), pos(1, 3))]
#[case::backward_bytes(OffsetKind::Byte, ParsedOffset::relative(-1), pos(1, 0), pos(0, 1))]
fn relative_offsets_use_cursor_in_same_coordinates(
    #[case] kind: OffsetKind,
    #[case] offset: ParsedOffset,
    #[case] cursor: Position,
    #[case] expected_start: Position,
) {
    let selection = resolve(&crlf_doc(), kind, offset, cursor);
    assert_eq!(selection.start(), expected_start);
}

#[test]
fn relative_byte_move_into_a_character_selects_it() {
    // Cursor on "b" (byte 3); +6 lands on byte 9, inside 😀.
    let selection = resolve(
        &crlf_doc(),
        OffsetKind::Byte,
        ParsedOffset::relative(6),
        pos(1, 0),
    );
    assert_eq!(selection, Selection::new(pos(1, 3), pos(1, 5)));
}

#[rstest]
#[case::origin(pos(0, 0), Offsets::new(0, 0))]
#[case::crlf_terminator(pos(0, 1), Offsets::new(1, 1))]
#[case::second_line(pos(1, 0), Offsets::new(3, 2))]
#[case::after_emoji(pos(1, 5), Offsets::new(12, 6))]
#[case::mid_surrogate_rounds_down(pos(1, 4), Offsets::new(8, 5))]
#[case::column_past_line_end(pos(0, 40), Offsets::new(1, 1))]
#[case::line_past_document_end(pos(9, 0), Offsets::new(16, 9))]
fn offsets_of_positions(#[case] position: Position, #[case] expected: Offsets) {
    assert_eq!(offsets_at(&crlf_doc(), position), expected);
}

#[test]
fn selection_bounds_are_ordered() {
    let selection = Selection::new(pos(2, 0), pos(1, 4));
    assert_eq!(selection.start(), pos(1, 4));
    assert_eq!(selection.end(), pos(2, 0));
    assert!(!selection.is_empty());
    assert!(Selection::cursor(pos(0, 0)).is_empty());
}
