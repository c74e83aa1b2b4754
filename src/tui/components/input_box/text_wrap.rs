//! Row layout for the input box.
//!
//! Height, visible text and cursor placement all go through [`wrap_rows`],
//! so the three can't disagree about where a symptom description breaks.
//! Arabic and English prose both separate words with ASCII spaces; a word
//! wider than the box is split.

use std::borrow::Cow;

use textwrap::{Options, WordSeparator};

/// Top + bottom borders
pub(super) const VERTICAL_OVERHEAD: u16 = 2;
/// Rows shown before the box scrolls internally
pub(super) const MAX_VISIBLE_LINES: u16 = 5;
/// Border plus one column of padding
const SIDE_INSET: u16 = 2;
pub(super) const CONTENT_OFFSET_X: u16 = SIDE_INSET;
pub(super) const CONTENT_OFFSET_Y: u16 = 1;

/// Text columns inside a box `area_width` wide. 0 if too narrow.
pub(super) fn inner_width(area_width: u16) -> u16 {
    area_width.saturating_sub(SIDE_INSET * 2)
}

/// Display rows for `text` at `width` columns. Never empty; a trailing
/// newline ends with an empty row for the cursor.
pub(super) fn wrap_rows(text: &str, width: u16) -> Vec<Cow<'_, str>> {
    if width == 0 {
        return vec![Cow::Borrowed("")];
    }

    let options = Options::new(usize::from(width))
        .break_words(true)
        .word_separator(WordSeparator::AsciiSpace);
    let mut rows = textwrap::wrap(text, options);
    if rows.is_empty() || (text.ends_with('\n') && !rows.last().is_some_and(|r| r.is_empty())) {
        rows.push(Cow::Borrowed(""));
    }
    rows
}

pub(super) fn row_count(text: &str, width: u16) -> u16 {
    u16::try_from(wrap_rows(text, width).len()).unwrap_or(u16::MAX)
}

/// Byte offset of the character ending at `pos`.
pub(super) fn char_before(text: &str, pos: usize) -> usize {
    text[..pos]
        .chars()
        .next_back()
        .map_or(0, |c| pos - c.len_utf8())
}

/// Byte offset just past the character starting at `pos`.
pub(super) fn char_after(text: &str, pos: usize) -> usize {
    text[pos..]
        .chars()
        .next()
        .map_or(pos, |c| pos + c.len_utf8())
}
