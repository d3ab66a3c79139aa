//! A single line of text and its tab-expanded render cache.
//!
//! `chars` holds the raw bytes of the line (no trailing newline). `render` is derived from
//! `chars` by expanding each `'\t'` to the next tab stop and is rebuilt by every mutating
//! method, so the two never disagree.

use std::borrow::Cow;

use crate::utf8;

/// Default tab width (in cells) used when a caller does not configure one.
pub const DEFAULT_TAB_WIDTH: usize = 2;

/// Number of cells a byte occupies when it starts at `cell_offset_in_line`.
///
/// Tabs advance to the next multiple of `tab_width`, continuation bytes occupy no cell, and
/// every other byte (ASCII or UTF-8 lead byte) occupies one cell.
pub fn cell_width_at(byte: u8, cell_offset_in_line: usize, tab_width: usize) -> usize {
    if byte == b'\t' {
        let tab_width = tab_width.max(1);
        tab_width - cell_offset_in_line % tab_width
    } else if utf8::is_continuation(byte) {
        0
    } else {
        1
    }
}

/// One line of the buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    chars: Vec<u8>,
    render: Vec<u8>,
}

impl Row {
    /// Create a row from raw bytes, building its render cache.
    pub fn new(chars: impl Into<Vec<u8>>, tab_width: usize) -> Self {
        let mut row = Self {
            chars: chars.into(),
            render: Vec::new(),
        };
        row.update_render(tab_width);
        row
    }

    /// Raw bytes of the line.
    pub fn chars(&self) -> &[u8] {
        &self.chars
    }

    /// Tab-expanded bytes used for drawing.
    pub fn render(&self) -> &[u8] {
        &self.render
    }

    /// Length of `chars` in bytes.
    pub fn size(&self) -> usize {
        self.chars.len()
    }

    /// Length of `render` in bytes.
    pub fn render_size(&self) -> usize {
        self.render.len()
    }

    /// Returns `true` if the line holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// The line decoded as UTF-8, with invalid sequences replaced.
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.chars)
    }

    /// Visual column of byte offset `cx` after tab expansion.
    ///
    /// Scans `chars[..cx]`: continuation bytes add nothing, tabs jump to the next multiple of
    /// `tab_width`, every other byte adds one column. `cx` past the end is clamped.
    pub fn cx_to_rx(&self, cx: usize, tab_width: usize) -> usize {
        let tab_width = tab_width.max(1);
        let mut rx = 0usize;
        for &byte in &self.chars[..cx.min(self.chars.len())] {
            if byte == b'\t' {
                rx += (tab_width - 1) - (rx % tab_width);
            } else if utf8::is_continuation(byte) {
                continue;
            }
            rx += 1;
        }
        rx
    }

    pub(crate) fn insert_byte(&mut self, at: usize, byte: u8, tab_width: usize) {
        let at = at.min(self.chars.len());
        self.chars.insert(at, byte);
        self.update_render(tab_width);
    }

    /// Remove the code point starting at `at`. Returns `false` when `at` is out of range.
    pub(crate) fn delete_char(&mut self, at: usize, tab_width: usize) -> bool {
        let len = utf8::char_len_at(&self.chars, at);
        if len == 0 {
            return false;
        }
        self.chars.drain(at..at + len);
        self.update_render(tab_width);
        true
    }

    pub(crate) fn append(&mut self, bytes: &[u8], tab_width: usize) {
        self.chars.extend_from_slice(bytes);
        self.update_render(tab_width);
    }

    /// Truncate the line at `at` and return the removed tail.
    pub(crate) fn split_off(&mut self, at: usize, tab_width: usize) -> Vec<u8> {
        let at = at.min(self.chars.len());
        let tail = self.chars.split_off(at);
        self.update_render(tab_width);
        tail
    }

    fn update_render(&mut self, tab_width: usize) {
        let tab_width = tab_width.max(1);
        let tabs = self.chars.iter().filter(|&&b| b == b'\t').count();

        self.render.clear();
        self.render.reserve(self.chars.len() + tabs * (tab_width - 1));

        let mut col = 0usize;
        for &byte in &self.chars {
            let width = cell_width_at(byte, col, tab_width);
            if byte == b'\t' {
                self.render.extend(std::iter::repeat_n(b' ', width));
            } else {
                self.render.push(byte);
            }
            col += width;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_expands_tabs_to_next_stop() {
        let row = Row::new("\tab", 4);
        assert_eq!(row.render(), b"    ab");

        let row = Row::new("a\tb", 4);
        assert_eq!(row.render(), b"a   b");

        let row = Row::new("abcd\te", 4);
        assert_eq!(row.render(), b"abcd    e");
    }

    #[test]
    fn test_tab_stops_count_code_points_not_bytes() {
        // "é" is two bytes but a single column, so the tab fills 3 cells.
        let row = Row::new("é\tx", 4);
        assert_eq!(row.render(), "é   x".as_bytes());
        assert_eq!(row.cx_to_rx(3, 4), 4);
    }

    #[test]
    fn test_cx_to_rx() {
        let row = Row::new("a\tbc", 2);
        assert_eq!(row.cx_to_rx(0, 2), 0);
        assert_eq!(row.cx_to_rx(1, 2), 1);
        assert_eq!(row.cx_to_rx(2, 2), 2);
        assert_eq!(row.cx_to_rx(3, 2), 3);
        assert_eq!(row.cx_to_rx(100, 2), 4);
    }

    #[test]
    fn test_delete_char_removes_whole_code_point() {
        let mut row = Row::new("a中b", 2);
        assert!(row.delete_char(1, 2));
        assert_eq!(row.chars(), b"ab");
        assert!(!row.delete_char(2, 2));
    }

    #[test]
    fn test_delete_char_clamps_truncated_sequence() {
        let mut row = Row::new(vec![b'a', 0xE4, 0xB8], 2);
        assert!(row.delete_char(1, 2));
        assert_eq!(row.chars(), b"a");
    }

    #[test]
    fn test_insert_byte_past_end_appends() {
        let mut row = Row::new("ab", 2);
        row.insert_byte(10, b'\t', 2);
        assert_eq!(row.chars(), b"ab\t");
        assert_eq!(row.render(), b"ab  ");
    }

    #[test]
    fn test_split_off_keeps_boundary_byte_on_the_right() {
        let mut row = Row::new("hello", 2);
        let tail = row.split_off(2, 2);
        assert_eq!(row.chars(), b"he");
        assert_eq!(tail, b"llo");
    }
}
