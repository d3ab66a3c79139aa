//! Row Store: the ordered list of rows plus the change counter.
//!
//! Every mutating method bumps the change counter; the document is dirty while the counter is
//! non-zero. Row indices and byte offsets are clamped rather than rejected, so an out-of-range
//! call is either a no-op or applies at the nearest valid position.

use crate::row::{DEFAULT_TAB_WIDTH, Row};

/// Ordered sequence of [`Row`]s with contiguous indices `0..len()`.
#[derive(Debug, Clone)]
pub struct RowStore {
    rows: Vec<Row>,
    tab_width: usize,
    changes: u64,
}

impl Default for RowStore {
    fn default() -> Self {
        Self::new(DEFAULT_TAB_WIDTH)
    }
}

impl RowStore {
    /// Create an empty store that expands tabs to `tab_width` cells.
    pub fn new(tab_width: usize) -> Self {
        Self {
            rows: Vec::new(),
            tab_width: tab_width.max(1),
            changes: 0,
        }
    }

    /// Build a store from pre-split lines (line terminators already removed).
    ///
    /// The change counter starts at 0: a freshly loaded document is clean.
    pub fn from_lines<I, L>(lines: I, tab_width: usize) -> Self
    where
        I: IntoIterator<Item = L>,
        L: AsRef<[u8]>,
    {
        let tab_width = tab_width.max(1);
        let rows = lines
            .into_iter()
            .map(|line| Row::new(line.as_ref(), tab_width))
            .collect();
        Self {
            rows,
            tab_width,
            changes: 0,
        }
    }

    /// Tab width (in cells) used by the render cache.
    pub fn tab_width(&self) -> usize {
        self.tab_width
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the store holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row at `at`, if any.
    pub fn get(&self, at: usize) -> Option<&Row> {
        self.rows.get(at)
    }

    /// All rows in order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of mutations since the last load/save.
    pub fn changes(&self) -> u64 {
        self.changes
    }

    /// Returns `true` if there are unsaved changes.
    pub fn is_dirty(&self) -> bool {
        self.changes > 0
    }

    /// Reset the change counter (after a successful save).
    pub fn mark_clean(&mut self) {
        self.changes = 0;
    }

    /// Insert a new row holding `bytes` at index `at` (clamped to `0..=len()`).
    pub fn insert_row(&mut self, at: usize, bytes: &[u8]) {
        let at = at.min(self.rows.len());
        self.rows.insert(at, Row::new(bytes, self.tab_width));
        self.bump();
    }

    /// Remove the row at `at`. No-op outside `0..len()`.
    pub fn delete_row(&mut self, at: usize) {
        if at >= self.rows.len() {
            return;
        }
        self.rows.remove(at);
        self.bump();
    }

    /// Append `bytes` to the end of row `row`.
    pub fn append_to_row(&mut self, row: usize, bytes: &[u8]) {
        let tab_width = self.tab_width;
        let Some(target) = self.rows.get_mut(row) else {
            return;
        };
        target.append(bytes, tab_width);
        self.bump();
    }

    /// Insert one byte into row `row` at byte offset `at`.
    ///
    /// An `at` past the end of the row inserts at the end.
    pub fn insert_char_in_row(&mut self, row: usize, at: usize, byte: u8) {
        let tab_width = self.tab_width;
        let Some(target) = self.rows.get_mut(row) else {
            return;
        };
        target.insert_byte(at, byte, tab_width);
        self.bump();
    }

    /// Delete the whole code point starting at byte offset `at` of row `row`.
    ///
    /// The number of bytes removed follows the lead byte and is clamped to the row end.
    /// No-op when `at` is outside `0..size`.
    pub fn delete_char_in_row(&mut self, row: usize, at: usize) {
        let tab_width = self.tab_width;
        let Some(target) = self.rows.get_mut(row) else {
            return;
        };
        if target.delete_char(at, tab_width) {
            self.bump();
        }
    }

    /// Truncate row `row` at byte offset `at`, returning the removed tail.
    pub fn split_row(&mut self, row: usize, at: usize) -> Option<Vec<u8>> {
        let tab_width = self.tab_width;
        let target = self.rows.get_mut(row)?;
        let tail = target.split_off(at, tab_width);
        self.bump();
        Some(tail)
    }

    /// Drop every row and reset the change counter.
    pub fn clear(&mut self) {
        self.rows.clear();
        self.changes = 0;
    }

    /// The save buffer: every row followed by `'\n'`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let total: usize = self.rows.iter().map(|row| row.size() + 1).sum();
        let mut buf = Vec::with_capacity(total);
        for row in &self.rows {
            buf.extend_from_slice(row.chars());
            buf.push(b'\n');
        }
        buf
    }

    fn bump(&mut self) {
        self.changes = self.changes.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn contents(store: &RowStore) -> Vec<String> {
        store
            .rows()
            .iter()
            .map(|row| row.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_from_lines_is_clean() {
        let store = RowStore::from_lines(["a", "b"], 2);
        assert_eq!(store.len(), 2);
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_insert_and_delete_rows() {
        let mut store = RowStore::from_lines(["a", "c"], 2);
        store.insert_row(1, b"b");
        store.insert_row(99, b"d");
        assert_eq!(contents(&store), vec!["a", "b", "c", "d"]);

        store.delete_row(0);
        store.delete_row(10);
        assert_eq!(contents(&store), vec!["b", "c", "d"]);
        assert_eq!(store.changes(), 3);
    }

    #[test]
    fn test_out_of_range_row_edits_are_noops() {
        let mut store = RowStore::from_lines(["abc"], 2);
        store.insert_char_in_row(5, 0, b'x');
        store.delete_char_in_row(0, 3);
        store.append_to_row(1, b"zz");
        assert_eq!(contents(&store), vec!["abc"]);
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_row_edits_refresh_render_cache() {
        let mut store = RowStore::from_lines(["ab"], 4);
        store.insert_char_in_row(0, 1, b'\t');
        assert_eq!(store.get(0).map(Row::render), Some(&b"a   b"[..]));

        store.delete_char_in_row(0, 1);
        assert_eq!(store.get(0).map(Row::render), Some(&b"ab"[..]));
    }

    #[test]
    fn test_to_bytes_terminates_every_row() {
        let store = RowStore::from_lines(["hello", "", "world"], 2);
        assert_eq!(store.to_bytes(), b"hello\n\nworld\n".to_vec());
        assert_eq!(RowStore::default().to_bytes(), Vec::<u8>::new());
    }

    #[test]
    fn test_clear_resets_changes() {
        let mut store = RowStore::from_lines(["a"], 2);
        store.append_to_row(0, b"b");
        assert!(store.is_dirty());
        store.clear();
        assert!(store.is_empty());
        assert!(!store.is_dirty());
    }
}
