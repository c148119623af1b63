//! In-memory buffer source for assembling screens by hand.
//!
//! `MemoryGrid` owns a plain row buffer and implements [`BufferSource`].
//! It exists for callers without a live terminal — tests, fixtures, and
//! programs that assemble cell content directly.

use unicode_width::UnicodeWidthChar;

use crate::cell::Cell;
use crate::source::{BufferSource, CellMetrics, CursorPosition, FontSpec, GridSize};
use crate::theme::Theme;

/// An owned screen buffer with setters for every source-visible property.
#[derive(Debug, Clone)]
pub struct MemoryGrid {
    size: GridSize,
    /// All buffered rows; the viewport indexes into this.
    buffer: Vec<Vec<Cell>>,
    viewport_top: usize,
    font: FontSpec,
    theme: Theme,
    cursor: CursorPosition,
    cell_metrics: Option<CellMetrics>,
}

impl MemoryGrid {
    /// Creates a grid of default cells with the viewport at the top.
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            size: GridSize { cols, rows },
            buffer: vec![vec![Cell::default(); cols]; rows],
            viewport_top: 0,
            font: FontSpec::default(),
            theme: Theme::default(),
            cursor: CursorPosition::default(),
            cell_metrics: None,
        }
    }

    /// Replaces the grid dimensions, resetting the buffer to default cells.
    pub fn resize(&mut self, cols: usize, rows: usize) {
        self.size = GridSize { cols, rows };
        self.buffer = vec![vec![Cell::default(); cols]; rows];
        self.viewport_top = 0;
    }

    /// Appends one row to the buffer, padding or truncating to the grid
    /// width. Combined with [`set_viewport_top`](Self::set_viewport_top)
    /// this models a scrolling feed.
    pub fn push_row(&mut self, mut cells: Vec<Cell>) {
        cells.resize(self.size.cols, Cell::default());
        self.buffer.push(cells);
    }

    /// Writes one cell at buffer position (`col`, `row`).
    pub fn set_cell(&mut self, col: usize, row: usize, cell: Cell) {
        if let Some(slot) = self.buffer.get_mut(row).and_then(|r| r.get_mut(col)) {
            *slot = cell;
        }
    }

    /// Returns the cell at buffer position (`col`, `row`).
    pub fn cell(&self, col: usize, row: usize) -> Option<&Cell> {
        self.buffer.get(row).and_then(|r| r.get(col))
    }

    /// Writes `text` into buffer row `row` starting at `col`.
    ///
    /// Wide characters occupy two columns with a spacer cell after the
    /// head; combining marks attach to the preceding base cell. Text past
    /// the right edge is dropped.
    pub fn set_text(&mut self, col: usize, row: usize, text: &str) {
        if row >= self.buffer.len() {
            return;
        }
        let mut col = col;
        for ch in text.chars() {
            if UnicodeWidthChar::width(ch) == Some(0) {
                self.attach_zerowidth(col, row, ch);
                continue;
            }
            if col >= self.size.cols {
                break;
            }
            let cell = Cell::new(ch);
            let width = usize::from(cell.width);
            self.buffer[row][col] = cell;
            if width == 2 && col + 1 < self.size.cols {
                self.buffer[row][col + 1] = Cell::spacer();
            }
            col += width.max(1);
        }
    }

    /// Fills buffer row `row` with copies of `cell`.
    pub fn fill_row(&mut self, row: usize, cell: &Cell) {
        if let Some(cells) = self.buffer.get_mut(row) {
            cells.fill(cell.clone());
        }
    }

    pub fn set_viewport_top(&mut self, top: usize) {
        self.viewport_top = top;
    }

    pub fn set_font(&mut self, font: FontSpec) {
        self.font = font;
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn set_cursor(&mut self, col: i32, row: i32) {
        self.cursor = CursorPosition { col, row };
    }

    pub fn set_cell_metrics(&mut self, metrics: Option<CellMetrics>) {
        self.cell_metrics = metrics;
    }

    /// Attach a combining mark to the nearest base cell left of `col`.
    fn attach_zerowidth(&mut self, col: usize, row: usize, ch: char) {
        let Some(cells) = self.buffer.get_mut(row) else {
            return;
        };
        let mut idx = col.min(cells.len());
        while idx > 0 {
            idx -= 1;
            if cells[idx].width > 0 {
                cells[idx].push_zerowidth(ch);
                return;
            }
        }
    }
}

impl BufferSource for MemoryGrid {
    fn grid_size(&self) -> GridSize {
        self.size
    }

    fn viewport_top(&self) -> usize {
        self.viewport_top
    }

    fn font(&self) -> FontSpec {
        self.font.clone()
    }

    fn theme(&self) -> Theme {
        self.theme.clone()
    }

    fn cursor(&self) -> CursorPosition {
        self.cursor
    }

    fn row(&self, index: usize) -> Option<&[Cell]> {
        self.buffer.get(index).map(Vec::as_slice)
    }

    fn cell_metrics(&self) -> Option<CellMetrics> {
        self.cell_metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_default_cells() {
        let grid = MemoryGrid::new(4, 2);
        assert_eq!(grid.grid_size(), GridSize { cols: 4, rows: 2 });
        assert_eq!(grid.viewport_top(), 0);
        assert_eq!(grid.cell(3, 1), Some(&Cell::default()));
        assert_eq!(grid.cell(4, 0), None);
    }

    #[test]
    fn set_text_places_wide_spacers() {
        let mut grid = MemoryGrid::new(5, 1);
        grid.set_text(0, 0, "a漢b");
        assert_eq!(grid.cell(0, 0).and_then(|c| c.ch), Some('a'));
        let head = grid.cell(1, 0).cloned().unwrap_or_default();
        assert_eq!(head.ch, Some('漢'));
        assert_eq!(head.width, 2);
        assert_eq!(grid.cell(2, 0).map(|c| c.width), Some(0));
        assert_eq!(grid.cell(3, 0).and_then(|c| c.ch), Some('b'));
    }

    #[test]
    fn set_text_attaches_combining_marks() {
        let mut grid = MemoryGrid::new(4, 1);
        grid.set_text(0, 0, "e\u{0301}");
        let cell = grid.cell(0, 0).cloned().unwrap_or_default();
        assert_eq!(cell.ch, Some('e'));
        assert_eq!(cell.zerowidth(), &['\u{0301}']);
    }

    #[test]
    fn combining_mark_skips_wide_spacer() {
        let mut grid = MemoryGrid::new(4, 1);
        grid.set_text(0, 0, "漢\u{0301}");
        let head = grid.cell(0, 0).cloned().unwrap_or_default();
        assert_eq!(head.zerowidth(), &['\u{0301}']);
        assert!(grid.cell(1, 0).is_some_and(|c| c.zerowidth().is_empty()));
    }

    #[test]
    fn set_text_clips_at_right_edge() {
        let mut grid = MemoryGrid::new(3, 1);
        grid.set_text(1, 0, "abcdef");
        assert_eq!(grid.cell(1, 0).and_then(|c| c.ch), Some('a'));
        assert_eq!(grid.cell(2, 0).and_then(|c| c.ch), Some('b'));
    }

    #[test]
    fn rows_outside_buffer_are_none() {
        let mut grid = MemoryGrid::new(2, 2);
        assert!(grid.row(1).is_some());
        assert!(grid.row(2).is_none());
        grid.set_viewport_top(1);
        // Viewport now extends one row past the buffer.
        assert!(grid.row(grid.viewport_top() + 1).is_none());
    }

    #[test]
    fn push_row_models_scrollback() {
        let mut grid = MemoryGrid::new(2, 2);
        grid.push_row(vec![Cell::new('x')]);
        grid.set_viewport_top(1);
        assert_eq!(grid.row(2).and_then(|r| r[0].ch), Some('x'));
        // Padded to grid width.
        assert_eq!(grid.row(2).map(<[Cell]>::len), Some(2));
    }

    #[test]
    fn resize_resets_buffer() {
        let mut grid = MemoryGrid::new(2, 1);
        grid.set_text(0, 0, "ab");
        grid.resize(3, 2);
        assert_eq!(grid.grid_size(), GridSize { cols: 3, rows: 2 });
        assert_eq!(grid.cell(0, 0), Some(&Cell::default()));
    }
}
