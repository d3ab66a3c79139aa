//! Frame assembly.
//!
//! A [`Frame`] is everything the host needs to paint one screen: the visible text rows, the
//! status bar, the message line and where to put the terminal cursor. Building a frame performs
//! no I/O; [`Frame::to_ansi`] encodes it for hosts that write VT100 sequences themselves.

use std::fmt::Write as _;
use std::time::Instant;

use crate::editor::Editor;
use crate::utf8;

/// Banner shown in an empty buffer.
pub const WELCOME: &str = concat!("Woe -- version ", env!("CARGO_PKG_VERSION"));

/// One screen worth of output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Text area rows, already clipped to the viewport.
    pub lines: Vec<String>,
    /// Status bar text, padded to the terminal width (drawn in reverse video).
    pub status_bar: String,
    /// Message line text (may be empty).
    pub message: String,
    /// Cursor position on screen as `(row, column)`, 0-based.
    pub cursor: (usize, usize),
}

impl Frame {
    /// Encode the frame as a VT100 byte stream that repaints the whole screen.
    pub fn to_ansi(&self) -> String {
        let mut out = String::with_capacity(
            self.lines.iter().map(|line| line.len() + 5).sum::<usize>() + 64,
        );
        out.push_str("\x1b[?25l\x1b[H");
        for line in &self.lines {
            out.push_str(line);
            out.push_str("\x1b[K\r\n");
        }
        out.push_str("\x1b[7m");
        out.push_str(&self.status_bar);
        out.push_str("\x1b[m\r\n");
        out.push_str("\x1b[K");
        out.push_str(&self.message);
        let _ = write!(out, "\x1b[{};{}H", self.cursor.0 + 1, self.cursor.1 + 1);
        out.push_str("\x1b[?25h");
        out
    }
}

/// Byte offset of code-point column `column` in `bytes` (the end if the row is shorter).
fn column_to_byte(bytes: &[u8], column: usize) -> usize {
    let mut at = 0;
    for _ in 0..column {
        if at >= bytes.len() {
            break;
        }
        at = utf8::next_boundary(bytes, at);
    }
    at
}

/// The code-point columns `[start, start + width)` of a render row.
fn clip_columns(render: &[u8], start: usize, width: usize) -> &[u8] {
    let begin = column_to_byte(render, start);
    let rest = &render[begin..];
    &rest[..column_to_byte(rest, width)]
}

fn take_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

fn welcome_line(cols: usize) -> String {
    let banner = take_chars(WELCOME, cols);
    let mut padding = (cols - banner.chars().count()) / 2;
    let mut line = String::with_capacity(cols);
    if padding > 0 {
        line.push('~');
        padding -= 1;
    }
    line.extend(std::iter::repeat_n(' ', padding));
    line.push_str(banner);
    line
}

impl Editor {
    /// Recompute the cursor's render column and scroll the viewport onto the cursor.
    pub fn compute_scroll(&mut self) {
        self.rx = self
            .rows
            .get(self.cursor.cy)
            .map_or(0, |row| row.cx_to_rx(self.cursor.cx, self.rows.tab_width()));
        self.viewport.scroll_to(self.cursor.cy, self.rx);
    }

    /// Scroll and build the frame for the current state.
    pub fn render_frame(&mut self) -> Frame {
        self.render_frame_at(Instant::now())
    }

    /// Like [`Editor::render_frame`], judging status message age against `now`.
    pub fn render_frame_at(&mut self, now: Instant) -> Frame {
        self.compute_scroll();
        Frame {
            lines: self.draw_rows(),
            status_bar: self.draw_status_bar(),
            message: self.draw_message(now),
            cursor: (
                self.cursor.cy.saturating_sub(self.viewport.row_offset),
                self.rx.saturating_sub(self.viewport.col_offset),
            ),
        }
    }

    fn draw_rows(&self) -> Vec<String> {
        let cols = self.viewport.cols();
        let text_rows = self.viewport.rows();
        (0..text_rows)
            .map(|y| {
                let file_row = y + self.viewport.row_offset;
                match self.rows.get(file_row) {
                    Some(row) => {
                        let visible = clip_columns(row.render(), self.viewport.col_offset, cols);
                        String::from_utf8_lossy(visible).into_owned()
                    }
                    None if self.rows.is_empty() && y == text_rows / 3 => welcome_line(cols),
                    None => "~".to_string(),
                }
            })
            .collect()
    }

    fn draw_status_bar(&self) -> String {
        let cols = self.viewport.cols();
        let name = self
            .filename
            .as_deref()
            .map_or_else(|| "[No Name]".to_string(), |path| path.display().to_string());
        let left = format!(
            "{:.20} - {} lines {}",
            name,
            self.rows.len(),
            if self.is_dirty() { "(modified)" } else { "" }
        );
        let right = format!(
            "{} {}/{} {}/{}",
            self.mode.name(),
            self.cursor.cx + 1,
            self.rows.get(self.cursor.cy).map_or(0, |row| row.size()),
            self.cursor.cy + 1,
            self.rows.len()
        );

        let left_len = left.chars().count();
        if left_len > cols {
            return take_chars(&left, cols).to_string();
        }
        let right_len = right.chars().count();
        let padding = cols.saturating_sub(left_len + right_len);
        let mut bar = String::with_capacity(cols);
        bar.push_str(&left);
        bar.extend(std::iter::repeat_n(' ', padding));
        bar.push_str(&right);
        take_chars(&bar, cols).to_string()
    }

    fn draw_message(&self, now: Instant) -> String {
        let cols = self.viewport.cols();
        if let Some(prompt) = &self.prompt {
            return take_chars(&prompt.display(), cols).to_string();
        }
        match &self.status {
            Some(message) if message.is_visible(now, self.config.message_timeout()) => {
                take_chars(message.text(), cols).to_string()
            }
            _ => String::new(),
        }
    }
}
