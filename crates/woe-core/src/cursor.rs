//! Cursor Model: a (line, byte column) position that never splits a UTF-8 sequence.
//!
//! `cy` ranges over `0..=rows.len()`; `cy == rows.len()` is the virtual line past the end of
//! the buffer (where typing appends a new row). `cx` is a byte offset into the row's `chars`
//! and always sits on a lead byte or at the row end.

use crate::row::Row;
use crate::rows::RowStore;
use crate::utf8;

/// Cursor position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    /// Byte column within the row.
    pub cx: usize,
    /// Zero-based line index.
    pub cy: usize,
}

/// Visual column for byte offset `cx` in `row`, expanding tabs to `tab_width`.
///
/// Monotonically non-decreasing in `cx`.
pub fn convert_cx_to_rx(row: &Row, cx: usize, tab_width: usize) -> usize {
    row.cx_to_rx(cx, tab_width)
}

impl Cursor {
    /// Create a cursor at byte column `cx` of line `cy`.
    pub fn new(cx: usize, cy: usize) -> Self {
        Self { cx, cy }
    }

    fn row<'a>(&self, rows: &'a RowStore) -> Option<&'a Row> {
        rows.get(self.cy)
    }

    /// Step right over one code point. No-op at the row end.
    pub fn move_right(&mut self, rows: &RowStore) {
        if let Some(row) = self.row(rows) {
            self.cx = utf8::next_boundary(row.chars(), self.cx);
        }
    }

    /// Step left over one code point, skipping its continuation bytes. No-op at column 0.
    pub fn move_left(&mut self, rows: &RowStore) {
        if let Some(row) = self.row(rows) {
            self.cx = utf8::prev_boundary(row.chars(), self.cx);
        }
    }

    /// Like [`Cursor::move_right`], but from the last character of a line jump to the start of
    /// the next line. Stays put on the last line of the buffer.
    pub fn move_right_or_wrap(&mut self, rows: &RowStore) {
        let Some(row) = self.row(rows) else {
            return;
        };

        if row.is_empty() || self.cx >= utf8::last_char_start(row.chars()) {
            if self.cy + 1 < rows.len() {
                self.cy += 1;
                self.cx = 0;
            }
        } else {
            self.move_right(rows);
        }
    }

    /// Like [`Cursor::move_left`], but from column 0 jump to the last character of the
    /// previous line. Stays put on the first line.
    pub fn move_left_or_wrap(&mut self, rows: &RowStore) {
        if self.cx != 0 {
            self.move_left(rows);
        } else if self.cy > 0 {
            self.cy -= 1;
            self.move_to_line_end(rows);
        }
    }

    /// Move one line up (stops at the first line).
    pub fn move_up(&mut self) {
        self.cy = self.cy.saturating_sub(1);
    }

    /// Move one line down (stops at the last row).
    pub fn move_down(&mut self, rows: &RowStore) {
        if self.cy + 1 < rows.len() {
            self.cy += 1;
        }
    }

    /// Move to column 0.
    pub fn move_to_line_start(&mut self) {
        self.cx = 0;
    }

    /// Move onto the last character of the current line.
    pub fn move_to_line_end(&mut self, rows: &RowStore) {
        if let Some(row) = self.row(rows) {
            self.cx = utf8::last_char_start(row.chars());
        }
    }

    /// Jump to 1-based line `line`, clamped to `0..=rows.len()`.
    pub fn move_to_line(&mut self, line: usize, rows: &RowStore) {
        self.cy = line.saturating_sub(1).min(rows.len());
        self.clamp_to_last_char(rows);
    }

    /// Jump to 1-based byte column `column`, clamped to `0..=size`.
    pub fn move_to_column(&mut self, column: usize, rows: &RowStore) {
        self.cx = match self.row(rows) {
            Some(row) => {
                let cx = column.saturating_sub(1).min(row.size());
                utf8::snap_to_boundary(row.chars(), cx)
            }
            None => 0,
        };
    }

    /// Repair `cx` after the current row changed underneath it.
    ///
    /// - no row or an empty row => `cx = 0`
    /// - `cx` beyond the row => the start of the last code point
    /// - `cx` inside a multi-byte sequence => the start of that sequence
    pub fn fix_cx_after_mutation(&mut self, rows: &RowStore) {
        self.cx = match self.row(rows) {
            Some(row) if !row.is_empty() => {
                if self.cx > row.size() {
                    utf8::last_char_start(row.chars())
                } else {
                    utf8::snap_to_boundary(row.chars(), self.cx)
                }
            }
            _ => 0,
        };
    }

    /// Keep the cursor on a character after vertical motion: like
    /// [`Cursor::fix_cx_after_mutation`], but `cx == size` also moves back onto the last
    /// character.
    pub fn clamp_to_last_char(&mut self, rows: &RowStore) {
        if let Some(row) = self.row(rows)
            && !row.is_empty()
            && self.cx >= row.size()
        {
            self.cx = utf8::last_char_start(row.chars());
            return;
        }
        self.fix_cx_after_mutation(rows);
    }
}
