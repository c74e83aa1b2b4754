//! Cursor position tracking for the InputBox.
//!
//! `CursorState` owns the cursor byte offset and the scroll offset. The text
//! itself is owned by `InputBox` and passed in explicitly.

use ratatui::layout::Rect;
use unicode_width::UnicodeWidthStr;

use super::text_wrap::{
    CONTENT_OFFSET_X, CONTENT_OFFSET_Y, MAX_VISIBLE_LINES, inner_width, row_count, wrap_rows,
};

pub(super) struct CursorState {
    /// Cursor position as byte offset in buffer (0..=buffer.len())
    pub pos: usize,
    /// Line offset for internal scrolling (0 when content fits in viewport)
    pub scroll_offset: u16,
}

impl CursorState {
    pub fn new() -> Self {
        Self {
            pos: 0,
            scroll_offset: 0,
        }
    }

    /// Reset cursor to start (used after Submit clears the buffer).
    pub fn reset(&mut self) {
        self.pos = 0;
        self.scroll_offset = 0;
    }

    /// Wrapped (row, display column) of the cursor within the content area.
    pub fn line_and_column(&self, buffer: &str, width: u16) -> (u16, u16) {
        if width == 0 {
            return (0, 0);
        }

        let before = &buffer[..self.pos];
        let row = row_count(before, width).saturating_sub(1);

        // Column from the last logical line; wrapping trims trailing spaces,
        // so measure the raw text rather than the wrapped row.
        let logical = before.rsplit('\n').next().unwrap_or(before);
        let segments = wrap_rows(logical, width);
        let prev_width: usize = segments[..segments.len() - 1]
            .iter()
            .map(|seg| seg.width())
            .sum();
        let column = logical.width().saturating_sub(prev_width) as u16;

        (row, column)
    }

    /// Update scroll offset to keep the cursor line visible.
    pub fn update_scroll_offset(&mut self, buffer: &str, content_width: u16) {
        let width = inner_width(content_width);
        if row_count(buffer, width) <= MAX_VISIBLE_LINES {
            self.scroll_offset = 0;
            return;
        }

        let (row, _) = self.line_and_column(buffer, width);
        if row < self.scroll_offset {
            self.scroll_offset = row;
        } else if row >= self.scroll_offset + MAX_VISIBLE_LINES {
            self.scroll_offset = row.saturating_sub(MAX_VISIBLE_LINES - 1);
        }
    }

    /// Screen (column, row) for the terminal cursor.
    pub fn screen_pos(&self, buffer: &str, area: Rect) -> (u16, u16) {
        let width = inner_width(area.width);
        let (row, column) = self.line_and_column(buffer, width);
        let visible_row = row.saturating_sub(self.scroll_offset);
        (
            area.x + CONTENT_OFFSET_X + column.min(width),
            area.y + CONTENT_OFFSET_Y + visible_row,
        )
    }
}
