//! Viewport: the visible window over the buffer.

/// Rows reserved below the text area (status bar + message line).
pub const RESERVED_ROWS: usize = 2;

/// Scroll offsets plus the size of the text area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    /// First buffer row shown at the top of the text area.
    pub row_offset: usize,
    /// First render column shown at the left edge of the text area.
    pub col_offset: usize,
    rows: usize,
    cols: usize,
}

impl Viewport {
    /// Create a viewport whose text area is `rows` x `cols` cells.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            row_offset: 0,
            col_offset: 0,
            rows,
            cols,
        }
    }

    /// Create a viewport for a terminal of the given size, leaving room for the status bar and
    /// message line.
    pub fn for_terminal(terminal_rows: usize, terminal_cols: usize) -> Self {
        Self::new(terminal_rows.saturating_sub(RESERVED_ROWS), terminal_cols)
    }

    /// Height of the text area.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Width of the text area.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Change the text area size, keeping the offsets.
    pub fn resize(&mut self, rows: usize, cols: usize) {
        self.rows = rows;
        self.cols = cols;
    }

    /// Scroll back to the top-left corner.
    pub fn reset(&mut self) {
        self.row_offset = 0;
        self.col_offset = 0;
    }

    /// Shift the offsets so that line `cy` and render column `rx` are visible.
    pub fn scroll_to(&mut self, cy: usize, rx: usize) {
        if cy < self.row_offset {
            self.row_offset = cy;
        }
        if self.rows > 0 && cy >= self.row_offset + self.rows {
            self.row_offset = cy + 1 - self.rows;
        }
        if rx < self.col_offset {
            self.col_offset = rx;
        }
        if self.cols > 0 && rx >= self.col_offset + self.cols {
            self.col_offset = rx + 1 - self.cols;
        }
    }

    /// Returns `true` if line `cy` is inside the visible row band.
    pub fn contains_row(&self, cy: usize) -> bool {
        cy >= self.row_offset && cy < self.row_offset + self.rows
    }

    /// Returns `true` if render column `rx` is inside the visible column band.
    pub fn contains_col(&self, rx: usize) -> bool {
        rx >= self.col_offset && rx < self.col_offset + self.cols
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_terminal_reserves_bottom_rows() {
        let viewport = Viewport::for_terminal(24, 80);
        assert_eq!(viewport.rows(), 22);
        assert_eq!(viewport.cols(), 80);
        assert_eq!(Viewport::for_terminal(1, 10).rows(), 0);
    }

    #[test]
    fn test_scroll_down_and_back_up() {
        let mut viewport = Viewport::new(10, 20);
        viewport.scroll_to(15, 0);
        assert_eq!(viewport.row_offset, 6);
        assert!(viewport.contains_row(15));

        viewport.scroll_to(3, 0);
        assert_eq!(viewport.row_offset, 3);
        assert!(viewport.contains_row(3));
    }

    #[test]
    fn test_scroll_horizontally() {
        let mut viewport = Viewport::new(10, 20);
        viewport.scroll_to(0, 25);
        assert_eq!(viewport.col_offset, 6);
        assert!(viewport.contains_col(25));

        viewport.scroll_to(0, 2);
        assert_eq!(viewport.col_offset, 2);
    }

    #[test]
    fn test_zero_sized_viewport_does_not_underflow() {
        let mut viewport = Viewport::new(0, 0);
        viewport.scroll_to(5, 5);
        assert_eq!(viewport.row_offset, 0);
        assert_eq!(viewport.col_offset, 0);
    }
}
