//! Modal key dispatch.
//!
//! ```text
//!            space            q/Q/h/s/f/other
//!   Normal ---------> Command ----------------> Normal
//!     |  ^                 (s without a name, f: prompt first)
//!   i a|  |Esc ^L ^C
//!   A o|  |
//!   O  v  |
//!   Insert
//!
//!   Normal --digit--> NumberPrefix(n) --digit--> NumberPrefix(10n + d)
//!                          | g: jump to line n, motion key, cancel or other
//!                          v
//!                        Normal
//! ```
//!
//! While a prompt is open every key goes to it, whatever the mode.

use tracing::{debug, trace};

use crate::editor::{DIRTY_QUIT_WARNING, Editor};
use crate::key::Key;
use crate::mode::Mode;
use crate::prompt::{PromptEvent, PromptKind};

/// What the host should do after a key has been processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Keep reading keys.
    Continue,
    /// Leave the editor.
    Quit,
}

impl Editor {
    /// Interpret one key in the current mode.
    pub fn process_key(&mut self, key: Key) -> Outcome {
        trace!(?key, mode = %self.mode, "key");

        if self.prompt.is_some() {
            self.prompt_key(key);
            return Outcome::Continue;
        }

        match self.mode {
            Mode::Command => return self.command_mode(key),
            Mode::Normal => self.normal_mode(key),
            Mode::Insert => self.insert_mode(key),
            Mode::NumberPrefix(value) => self.number_prefix_mode(value, key),
        }
        Outcome::Continue
    }

    fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            debug!(from = %self.mode, to = %mode, "mode change");
        }
        self.mode = mode;
    }

    /// Keys that behave the same in Normal, Insert and NumberPrefix.
    fn special_move(&mut self, key: Key) -> bool {
        if !key.is_special_move() {
            return false;
        }
        match key {
            Key::Delete => self.delete_under_cursor(),
            Key::Backspace | Key::Ctrl('h') => self.delete_char(),
            Key::PageUp => self.page_up(),
            Key::PageDown => self.page_down(),
            Key::Home => self.cursor.move_to_line_start(),
            Key::End => self.cursor.move_to_line_end(&self.rows),
            Key::Up | Key::Down | Key::Left | Key::Right => self.move_cursor(key),
            _ => return false,
        }
        true
    }

    fn current_row_is_empty(&self) -> bool {
        self.rows.get(self.cursor.cy).is_none_or(|row| row.is_empty())
    }

    fn normal_mode(&mut self, key: Key) {
        if self.special_move(key) {
            return;
        }

        let Key::Char(c) = key else {
            return;
        };
        match c {
            ' ' => self.set_mode(Mode::Command),
            'i' => self.set_mode(Mode::Insert),
            'a' => {
                if !self.current_row_is_empty() {
                    self.cursor.move_right(&self.rows);
                }
                self.set_mode(Mode::Insert);
            }
            'A' => {
                if !self.current_row_is_empty() {
                    self.cursor.move_to_line_end(&self.rows);
                    self.cursor.move_right(&self.rows);
                }
                self.set_mode(Mode::Insert);
            }
            'o' => {
                self.open_row_below();
                self.set_mode(Mode::Insert);
            }
            'O' => {
                self.open_row_above();
                self.set_mode(Mode::Insert);
            }
            '0'..='9' => {
                self.set_mode(Mode::NumberPrefix(0));
                self.number_prefix_mode(0, key);
            }
            'x' => {
                self.delete_under_cursor();
                self.cursor.clamp_to_last_char(&self.rows);
            }
            'X' => self.delete_char(),
            'h' => self.move_cursor(Key::Left),
            'l' => self.move_cursor(Key::Right),
            'k' => self.move_cursor(Key::Up),
            'j' => self.move_cursor(Key::Down),
            'H' => self.page_top(),
            'L' => self.page_bottom(),
            'K' => self.page_up(),
            'J' => self.page_down(),
            '^' => self.cursor.move_to_line_start(),
            '$' => self.cursor.move_to_line_end(&self.rows),
            'n' => self.search_next(),
            'p' => self.search_previous(),
            _ => {}
        }
    }

    fn insert_mode(&mut self, key: Key) {
        if self.special_move(key) {
            return;
        }

        match key {
            Key::Enter => self.insert_newline(),
            k if k.is_cancel() => {
                self.set_mode(Mode::Normal);
                let at_end = self
                    .rows
                    .get(self.cursor.cy)
                    .is_some_and(|row| self.cursor.cx >= row.size());
                if self.cursor.cx > 0 && at_end {
                    self.cursor.move_left(&self.rows);
                }
            }
            Key::Ctrl('i') => self.insert_char(b'\t'),
            _ => {
                if let Some(c) = key.printable() {
                    // printable() only yields ASCII
                    self.insert_char(c as u8);
                }
            }
        }
    }

    fn number_prefix_mode(&mut self, value: u32, key: Key) {
        if self.special_move(key) {
            self.set_mode(Mode::Normal);
            return;
        }

        match key {
            Key::Char(c) if c.is_ascii_digit() => {
                let digit = c.to_digit(10).unwrap_or(0);
                let value = value.saturating_mul(10).saturating_add(digit);
                self.set_mode(Mode::NumberPrefix(value));
            }
            Key::Char('g') => {
                self.move_to_line(value as usize);
                self.set_mode(Mode::Normal);
            }
            _ => self.set_mode(Mode::Normal),
        }
    }

    fn command_mode(&mut self, key: Key) -> Outcome {
        match key {
            Key::Char('q') => {
                if self.is_dirty() {
                    self.set_status(DIRTY_QUIT_WARNING);
                    self.set_mode(Mode::Normal);
                } else {
                    debug!("quit requested");
                    return Outcome::Quit;
                }
            }
            Key::Char('Q') => {
                debug!(dirty = self.is_dirty(), "force quit requested");
                return Outcome::Quit;
            }
            Key::Char('h') => {
                self.show_help();
                self.set_mode(Mode::Normal);
            }
            Key::Char('s') => {
                self.save();
                if self.prompt.is_none() {
                    self.set_mode(Mode::Normal);
                }
            }
            Key::Char('f') => self.open_prompt(PromptKind::Search),
            _ => self.set_mode(Mode::Normal),
        }
        Outcome::Continue
    }

    fn prompt_key(&mut self, key: Key) {
        let Some(prompt) = self.prompt.as_mut() else {
            return;
        };
        let kind = prompt.kind();

        match prompt.handle_key(key) {
            PromptEvent::Pending => {}
            PromptEvent::Cancelled => {
                self.prompt = None;
                self.set_mode(Mode::Normal);
                match kind {
                    PromptKind::SaveAs => self.set_status("without filename!"),
                    PromptKind::Search => self.status = None,
                }
            }
            PromptEvent::Submitted(input) => {
                self.prompt = None;
                self.set_mode(Mode::Normal);
                match kind {
                    PromptKind::SaveAs => self.save_as(input),
                    PromptKind::Search => self.search(&input),
                }
            }
        }
    }
}
