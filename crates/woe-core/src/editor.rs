//! The editor instance: buffer, cursor, viewport, mode and collaborators in one value.
//!
//! Key dispatch lives in [`crate::dispatch`] and frame assembly in [`crate::render`]; both are
//! further `impl Editor` blocks over the state defined here.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::config::EditorConfig;
use crate::cursor::Cursor;
use crate::key::Key;
use crate::mode::Mode;
use crate::prompt::{Prompt, PromptKind};
use crate::rows::RowStore;
use crate::search::{RegexSearcher, SearchMatch, SearchOptions, SearchState, Searcher};
use crate::storage::{DocumentStore, FileStore};
use crate::viewport::Viewport;

/// Shown by `<leader>h`.
pub const HELP_MESSAGE: &str =
    "Help: <leader>q = quit; <leader>h = help; <leader>s = save; <leader>f = search";

/// Shown when `<leader>q` is pressed with unsaved changes.
pub const DIRTY_QUIT_WARNING: &str = "Use <leader>Q force leave";

/// Shown when `n`/`p` is pressed without a result set.
pub const NO_SEARCH_RESULT: &str = "without search result...";

/// Terminal size assumed until the host calls [`Editor::resize`].
pub const DEFAULT_TERMINAL_SIZE: (usize, usize) = (24, 80);

/// A message for the message line, timestamped when set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    text: String,
    time: Instant,
}

impl StatusMessage {
    /// Create a message stamped with `time`.
    pub fn new(text: impl Into<String>, time: Instant) -> Self {
        Self {
            text: text.into(),
            time,
        }
    }

    /// Message text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// When the message was set.
    pub fn time(&self) -> Instant {
        self.time
    }

    /// Returns `true` while the message is younger than `timeout` at `now`.
    pub fn is_visible(&self, now: Instant, timeout: Duration) -> bool {
        !self.text.is_empty() && now.saturating_duration_since(self.time) < timeout
    }
}

/// A modal text editor over one document.
pub struct Editor {
    pub(crate) rows: RowStore,
    pub(crate) cursor: Cursor,
    pub(crate) viewport: Viewport,
    pub(crate) rx: usize,
    pub(crate) mode: Mode,
    pub(crate) filename: Option<PathBuf>,
    pub(crate) status: Option<StatusMessage>,
    pub(crate) prompt: Option<Prompt>,
    pub(crate) search: SearchState,
    pub(crate) config: EditorConfig,
    store: Box<dyn DocumentStore>,
    searcher: Box<dyn Searcher>,
}

impl fmt::Debug for Editor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Editor")
            .field("rows", &self.rows.len())
            .field("cursor", &self.cursor)
            .field("viewport", &self.viewport)
            .field("mode", &self.mode)
            .field("filename", &self.filename)
            .field("dirty", &self.rows.is_dirty())
            .finish_non_exhaustive()
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Editor {
    /// Create an empty editor that reads and writes the local file system.
    pub fn new(config: EditorConfig) -> Self {
        let searcher = RegexSearcher::new(SearchOptions::default(), config.max_search_results);
        Self::with_collaborators(config, Box::new(FileStore), Box::new(searcher))
    }

    /// Create an empty editor with explicit storage and search collaborators.
    pub fn with_collaborators(
        config: EditorConfig,
        store: Box<dyn DocumentStore>,
        searcher: Box<dyn Searcher>,
    ) -> Self {
        let (term_rows, term_cols) = DEFAULT_TERMINAL_SIZE;
        Self {
            rows: RowStore::new(config.tab_width),
            cursor: Cursor::default(),
            viewport: Viewport::for_terminal(term_rows, term_cols),
            rx: 0,
            mode: Mode::Normal,
            filename: None,
            status: None,
            prompt: None,
            search: SearchState::default(),
            config,
            store,
            searcher,
        }
    }

    // ---------------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------------

    /// The buffer.
    pub fn rows(&self) -> &RowStore {
        &self.rows
    }

    /// Cursor position.
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Scroll window.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Render column of the cursor, as of the last [`Editor::compute_scroll`].
    pub fn rx(&self) -> usize {
        self.rx
    }

    /// Current mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// File name the buffer is saved to, if any.
    pub fn filename(&self) -> Option<&Path> {
        self.filename.as_deref()
    }

    /// Returns `true` if there are unsaved changes.
    pub fn is_dirty(&self) -> bool {
        self.rows.is_dirty()
    }

    /// Last status message, visible or not.
    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    /// The pending prompt, if any.
    pub fn prompt(&self) -> Option<&Prompt> {
        self.prompt.as_ref()
    }

    /// The last search result set.
    pub fn search_state(&self) -> &SearchState {
        &self.search
    }

    /// Active configuration.
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Move the cursor, repairing the column for the target row.
    pub fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor.cy = cursor.cy.min(self.rows.len());
        self.cursor.cx = cursor.cx;
        self.cursor.fix_cx_after_mutation(&self.rows);
    }

    // ---------------------------------------------------------------------
    // Document lifecycle
    // ---------------------------------------------------------------------

    /// Replace the buffer with pre-split lines. The document starts clean.
    pub fn load_lines<I, L>(&mut self, lines: I)
    where
        I: IntoIterator<Item = L>,
        L: AsRef<[u8]>,
    {
        self.rows = RowStore::from_lines(lines, self.config.tab_width);
        self.cursor = Cursor::default();
        self.viewport.reset();
        self.search.clear();
    }

    /// Open `path` through the storage collaborator.
    ///
    /// A file that does not exist yet becomes an empty buffer with that name. Other failures
    /// are reported on the message line and leave the buffer unnamed, so a later save asks
    /// for a file name instead of overwriting the unreadable file.
    pub fn open(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref();

        match self.store.load(path) {
            Ok(lines) => {
                info!(path = %path.display(), lines = lines.len(), "opened file");
                self.load_lines(lines);
                self.filename = Some(path.to_path_buf());
            }
            Err(err) if err.is_not_found() => {
                info!(path = %path.display(), "new file");
                self.load_lines(std::iter::empty::<&[u8]>());
                self.filename = Some(path.to_path_buf());
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to open file");
                self.load_lines(std::iter::empty::<&[u8]>());
                self.filename = None;
                self.set_status(format!("Can't open {}: {}", path.display(), err.io()));
            }
        }
    }

    /// Save to the current file name, or ask for one first.
    pub fn save(&mut self) {
        match self.filename.clone() {
            Some(path) => self.write_to(&path),
            None => self.open_prompt(PromptKind::SaveAs),
        }
    }

    /// Adopt `path` as the file name and save to it.
    pub fn save_as(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        self.filename = Some(path.clone());
        self.write_to(&path);
    }

    fn write_to(&mut self, path: &Path) {
        let content = self.rows.to_bytes();
        match self.store.save(path, &content) {
            Ok(()) => {
                info!(path = %path.display(), bytes = content.len(), "saved file");
                self.rows.mark_clean();
                self.set_status(format!("save {} success", path.display()));
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to save file");
                self.set_status(format!("Can't save {}: {}", path.display(), err.io()));
            }
        }
    }

    /// Drop the document and reset cursor, viewport and mode.
    pub fn close(&mut self) {
        debug!("closing document");
        self.rows.clear();
        self.filename = None;
        self.cursor = Cursor::default();
        self.viewport.reset();
        self.rx = 0;
        self.mode = Mode::Normal;
        self.prompt = None;
        self.search.clear();
    }

    /// Adapt to a new terminal size (the text area is two rows shorter).
    pub fn resize(&mut self, term_rows: usize, term_cols: usize) {
        let viewport = Viewport::for_terminal(term_rows, term_cols);
        self.viewport.resize(viewport.rows(), viewport.cols());
    }

    // ---------------------------------------------------------------------
    // Messages and prompts
    // ---------------------------------------------------------------------

    /// Show `text` on the message line from now on.
    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage::new(text, Instant::now()));
    }

    /// Show the key help.
    pub fn show_help(&mut self) {
        self.set_status(HELP_MESSAGE);
    }

    /// Open an input prompt on the message line. Keys go to it until it resolves.
    pub fn open_prompt(&mut self, kind: PromptKind) {
        self.prompt = Some(Prompt::new(kind));
    }

    // ---------------------------------------------------------------------
    // Edit operations
    // ---------------------------------------------------------------------

    /// Insert a row holding `bytes`.
    ///
    /// While the cursor is on a real line the row goes in at the cursor's line, whatever `at`
    /// says; only on the virtual end line is `at` used. Either way the index is clamped to
    /// `0..=len`.
    pub fn insert_row(&mut self, at: usize, bytes: &[u8]) {
        let at = if self.cursor.cy != self.rows.len() {
            self.cursor.cy
        } else {
            at
        };
        self.rows.insert_row(at.min(self.rows.len()), bytes);
    }

    /// Remove row `at`, keeping the cursor inside the buffer.
    pub fn delete_row(&mut self, at: usize) {
        self.rows.delete_row(at);
        self.cursor.cy = self.cursor.cy.min(self.rows.len());
        self.cursor.fix_cx_after_mutation(&self.rows);
    }

    /// Insert one byte at the cursor and advance past it.
    ///
    /// Typing on the virtual end line appends a new row first.
    pub fn insert_char(&mut self, byte: u8) {
        if self.cursor.cy == self.rows.len() {
            let end = self.rows.len();
            self.rows.insert_row(end, b"");
        }
        self.rows.insert_char_in_row(self.cursor.cy, self.cursor.cx, byte);
        self.cursor.cx += 1;
    }

    /// Backspace: delete the code point before the cursor, or at column 0 join this row onto
    /// the previous one.
    pub fn delete_char(&mut self) {
        let cy = self.cursor.cy;
        if cy >= self.rows.len() || (self.cursor.cx == 0 && cy == 0) {
            return;
        }

        if self.cursor.cx > 0 {
            self.cursor.move_left(&self.rows);
            self.rows.delete_char_in_row(cy, self.cursor.cx);
        } else {
            let Some(tail) = self.rows.get(cy).map(|row| row.chars().to_vec()) else {
                return;
            };
            let joint = self.rows.get(cy - 1).map_or(0, |row| row.size());
            self.rows.append_to_row(cy - 1, &tail);
            self.rows.delete_row(cy);
            self.cursor.cy = cy - 1;
            self.cursor.cx = joint;
        }
        self.cursor.fix_cx_after_mutation(&self.rows);
    }

    /// Delete the code point under the cursor. No-op at the row end.
    pub fn delete_under_cursor(&mut self) {
        let Some(row) = self.rows.get(self.cursor.cy) else {
            return;
        };
        if self.cursor.cx >= row.size() {
            return;
        }
        self.rows.delete_char_in_row(self.cursor.cy, self.cursor.cx);
        self.cursor.fix_cx_after_mutation(&self.rows);
    }

    /// Enter: split the current row at the cursor and move to the start of the lower half.
    ///
    /// - at column 0 an empty row is inserted above
    /// - at or past the row end an empty row is inserted below
    /// - otherwise `[0, cx)` stays and `[cx, size)` moves to a new row below
    pub fn insert_newline(&mut self) {
        let cy = self.cursor.cy;
        if self.cursor.cx == 0 {
            self.rows.insert_row(cy.min(self.rows.len()), b"");
        } else {
            let Some(size) = self.rows.get(cy).map(|row| row.size()) else {
                return;
            };
            if self.cursor.cx >= size {
                self.rows.insert_row(cy + 1, b"");
            } else if let Some(tail) = self.rows.split_row(cy, self.cursor.cx) {
                self.rows.insert_row(cy + 1, &tail);
            }
        }
        self.cursor.cy = cy + 1;
        self.cursor.cx = 0;
    }

    /// `o`: open an empty row below the cursor and move onto it.
    pub fn open_row_below(&mut self) {
        if !self.rows.is_empty() {
            self.cursor.cy = (self.cursor.cy + 1).min(self.rows.len());
        }
        self.cursor.cx = 0;
        self.insert_row(self.cursor.cy, b"");
    }

    /// `O`: open an empty row at the cursor's line, pushing it down.
    pub fn open_row_above(&mut self) {
        self.cursor.cx = 0;
        self.insert_row(self.cursor.cy, b"");
    }

    // ---------------------------------------------------------------------
    // Motion
    // ---------------------------------------------------------------------

    /// Arrow-key motion. Left/Right wrap across lines.
    pub fn move_cursor(&mut self, key: Key) {
        match key {
            Key::Up => self.cursor.move_up(),
            Key::Down => self.cursor.move_down(&self.rows),
            Key::Left => self.cursor.move_left_or_wrap(&self.rows),
            Key::Right => self.cursor.move_right_or_wrap(&self.rows),
            _ => return,
        }
        self.cursor.clamp_to_last_char(&self.rows);
    }

    /// Jump one text-area height up, stopping at the first line.
    pub fn page_up(&mut self) {
        if self.cursor.cy == 0 {
            return;
        }
        let page = self.viewport.rows();
        if self.viewport.row_offset <= page {
            self.cursor.cy = 0;
        } else {
            self.cursor.cy = self.cursor.cy.saturating_sub(page);
        }
        self.cursor.clamp_to_last_char(&self.rows);
    }

    /// Jump one text-area height down, stopping at the last line.
    pub fn page_down(&mut self) {
        let len = self.rows.len();
        if self.cursor.cy >= len {
            return;
        }
        let page = self.viewport.rows();
        if self.viewport.row_offset + 2 * page >= len {
            self.cursor.cy = len - 1;
        } else {
            self.cursor.cy = (self.cursor.cy + page).min(len - 1);
        }
        self.cursor.clamp_to_last_char(&self.rows);
    }

    /// `H`: move to the top line of the visible page.
    pub fn page_top(&mut self) {
        self.cursor.cy = self.viewport.row_offset.min(self.rows.len());
        self.cursor.clamp_to_last_char(&self.rows);
    }

    /// `L`: move to the bottom line of the visible page.
    pub fn page_bottom(&mut self) {
        let bottom = (self.viewport.row_offset + self.viewport.rows()).saturating_sub(1);
        self.cursor.cy = bottom.min(self.rows.len().saturating_sub(1));
        self.cursor.clamp_to_last_char(&self.rows);
    }

    /// Jump to 1-based line `line`.
    pub fn move_to_line(&mut self, line: usize) {
        self.cursor.move_to_line(line, &self.rows);
    }

    /// Jump to 1-based byte column `column` of the current line.
    pub fn move_to_column(&mut self, column: usize) {
        self.cursor.move_to_column(column, &self.rows);
    }

    // ---------------------------------------------------------------------
    // Search
    // ---------------------------------------------------------------------

    /// Search the buffer for `query` and jump to the first match.
    pub fn search(&mut self, query: &str) {
        let content = self.rows.to_bytes();
        match self.searcher.search(query, &content) {
            Ok(matches) => {
                debug!(query, matches = matches.len(), "search finished");
                self.search.set(matches);
                self.search_next();
            }
            Err(err) => {
                debug!(query, error = %err, "search failed");
                self.search.clear();
                self.set_status(err.to_string());
            }
        }
    }

    /// `n`: jump to the next match, wrapping around.
    pub fn search_next(&mut self) {
        let found = self.search.next();
        self.jump_to_match(found);
    }

    /// `p`: jump to the previous match, wrapping around.
    pub fn search_previous(&mut self) {
        let found = self.search.prev();
        self.jump_to_match(found);
    }

    /// Forget the last result set.
    pub fn clear_search(&mut self) {
        self.search.clear();
    }

    fn jump_to_match(&mut self, found: Option<SearchMatch>) {
        match found {
            Some(m) => {
                self.move_to_line(m.line);
                self.move_to_column(m.column);
            }
            None => self.set_status(NO_SEARCH_RESULT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn editor(lines: &[&str]) -> Editor {
        let mut editor = Editor::default();
        editor.load_lines(lines.iter().copied());
        editor
    }

    fn contents(editor: &Editor) -> Vec<String> {
        editor
            .rows()
            .rows()
            .iter()
            .map(|row| row.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_insert_row_follows_cursor_line() {
        let mut editor = editor(&["a", "b", "c"]);
        editor.set_cursor(Cursor::new(0, 1));
        editor.insert_row(3, b"x");
        assert_eq!(contents(&editor), vec!["a", "x", "b", "c"]);
    }

    #[test]
    fn test_insert_row_on_virtual_line_uses_index() {
        let mut editor = editor(&["a", "b"]);
        editor.set_cursor(Cursor::new(0, 2));
        editor.insert_row(99, b"z");
        assert_eq!(contents(&editor), vec!["a", "b", "z"]);
    }

    #[test]
    fn test_typing_into_empty_buffer_creates_row() {
        let mut editor = Editor::default();
        for b in b"hi" {
            editor.insert_char(*b);
        }
        assert_eq!(contents(&editor), vec!["hi"]);
        assert_eq!(editor.cursor(), Cursor::new(2, 0));
        assert!(editor.is_dirty());
    }

    #[test]
    fn test_backspace_joins_rows() {
        let mut editor = editor(&["ab", "cd"]);
        editor.set_cursor(Cursor::new(0, 1));
        editor.delete_char();
        assert_eq!(contents(&editor), vec!["abcd"]);
        assert_eq!(editor.cursor(), Cursor::new(2, 0));
    }

    #[test]
    fn test_backspace_at_origin_is_noop() {
        let mut editor = editor(&["ab"]);
        editor.delete_char();
        assert_eq!(contents(&editor), vec!["ab"]);
        assert!(!editor.is_dirty());
    }

    #[test]
    fn test_backspace_removes_whole_code_point() {
        let mut editor = editor(&["hé!"]);
        editor.set_cursor(Cursor::new(3, 0));
        editor.delete_char();
        assert_eq!(contents(&editor), vec!["h!"]);
        assert_eq!(editor.cursor().cx, 1);
    }

    #[test]
    fn test_newline_cases() {
        let mut editor = editor(&["hello", "world"]);
        editor.set_cursor(Cursor::new(5, 0));
        editor.insert_newline();
        assert_eq!(contents(&editor), vec!["hello", "", "world"]);
        assert_eq!(editor.cursor(), Cursor::new(0, 1));

        editor.set_cursor(Cursor::new(0, 2));
        editor.insert_newline();
        assert_eq!(contents(&editor), vec!["hello", "", "", "world"]);
        assert_eq!(editor.cursor(), Cursor::new(0, 3));

        editor.set_cursor(Cursor::new(2, 3));
        editor.insert_newline();
        assert_eq!(contents(&editor), vec!["hello", "", "", "wo", "rld"]);
        assert_eq!(editor.cursor(), Cursor::new(0, 4));
    }

    #[test]
    fn test_open_rows() {
        let mut editor = editor(&["a", "b"]);
        editor.open_row_below();
        assert_eq!(contents(&editor), vec!["a", "", "b"]);
        assert_eq!(editor.cursor(), Cursor::new(0, 1));

        editor.set_cursor(Cursor::new(0, 2));
        editor.open_row_above();
        assert_eq!(contents(&editor), vec!["a", "", "", "b"]);
        assert_eq!(editor.cursor(), Cursor::new(0, 2));
    }

    #[test]
    fn test_paging() {
        let lines: Vec<String> = (1..=100).map(|n| n.to_string()).collect();
        let mut editor = Editor::default();
        editor.load_lines(&lines);
        editor.resize(12, 80);

        editor.page_down();
        assert_eq!(editor.cursor().cy, 10);
        editor.compute_scroll();
        editor.page_down();
        assert_eq!(editor.cursor().cy, 20);

        editor.set_cursor(Cursor::new(0, 95));
        editor.compute_scroll();
        editor.page_down();
        assert_eq!(editor.cursor().cy, 99);

        editor.compute_scroll();
        editor.page_up();
        assert_eq!(editor.cursor().cy, 89);

        editor.set_cursor(Cursor::new(0, 5));
        editor.compute_scroll();
        editor.page_up();
        assert_eq!(editor.cursor().cy, 0);
    }

    #[test]
    fn test_page_top_and_bottom() {
        let lines: Vec<String> = (1..=5).map(|n| n.to_string()).collect();
        let mut editor = Editor::default();
        editor.load_lines(&lines);
        editor.page_bottom();
        assert_eq!(editor.cursor().cy, 4);
        editor.page_top();
        assert_eq!(editor.cursor().cy, 0);
    }

    #[test]
    fn test_search_jumps_and_wraps() {
        let mut editor = editor(&["foo", "bar", "foo bar"]);
        editor.search("foo");
        assert_eq!(editor.cursor(), Cursor::new(0, 0));
        editor.search_next();
        assert_eq!(editor.cursor(), Cursor::new(0, 2));
        editor.search_next();
        assert_eq!(editor.cursor(), Cursor::new(0, 0));
        editor.search_previous();
        assert_eq!(editor.cursor(), Cursor::new(0, 2));
    }

    #[test]
    fn test_search_without_results() {
        let mut editor = editor(&["abc"]);
        editor.search("zzz");
        assert_eq!(editor.status().map(|s| s.text()), Some(NO_SEARCH_RESULT));
        editor.search("(");
        assert!(
            editor
                .status()
                .is_some_and(|s| s.text().starts_with("Invalid pattern"))
        );
    }

    #[test]
    fn test_close_resets_everything() {
        let mut editor = editor(&["abc", "def"]);
        editor.set_cursor(Cursor::new(1, 1));
        editor.mode = Mode::Insert;
        editor.close();
        assert!(editor.rows().is_empty());
        assert_eq!(editor.cursor(), Cursor::default());
        assert_eq!(editor.mode(), Mode::Normal);
        assert_eq!(editor.filename(), None);
    }

    #[test]
    fn test_status_message_expiry() {
        let now = Instant::now();
        let message = StatusMessage::new("hi", now);
        assert!(message.is_visible(now, Duration::from_secs(5)));
        assert!(!message.is_visible(now + Duration::from_secs(5), Duration::from_secs(5)));
    }
}
