//! Read-only interface to the screen buffer being captured.
//!
//! The capture pipeline never owns terminal state; it reads whatever buffer
//! a [`BufferSource`] exposes at render time. Implementations are expected
//! to be cheap to query — every render walks the full viewport.

use crate::cell::Cell;
use crate::theme::Theme;

/// Grid dimensions in cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GridSize {
    pub cols: usize,
    pub rows: usize,
}

/// Font parameters supplied by the buffer source.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    /// Font size in pixels at scale factor 1.
    pub size: f32,
    /// Font family name, resolved against the system database.
    pub family: String,
    /// Line height as a multiple of the font size.
    pub line_height: f32,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            size: 15.0,
            family: String::from("monospace"),
            line_height: 1.0,
        }
    }
}

/// Cursor position in viewport-relative cell coordinates.
///
/// Either coordinate may be negative or past the grid edge when the cursor
/// sits outside the visible region (scrolled-back views); such cursors are
/// simply not drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CursorPosition {
    pub col: i32,
    pub row: i32,
}

/// Exact cell pixel dimensions measured by the source's own renderer.
///
/// When available these take precedence over the approximation derived from
/// the font size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMetrics {
    pub width: f32,
    pub height: f32,
}

/// A snapshot view of a terminal screen buffer.
///
/// `row` uses absolute buffer indices; the visible region starts at
/// [`viewport_top`](Self::viewport_top). Returning `None` for a row is not
/// an error — rows may be momentarily unavailable while the source mutates,
/// and the renderer leaves them as background.
pub trait BufferSource {
    /// Visible grid dimensions.
    fn grid_size(&self) -> GridSize;

    /// Absolute buffer index of the first visible row.
    fn viewport_top(&self) -> usize;

    /// Font the buffer is displayed with.
    fn font(&self) -> FontSpec;

    /// Active color theme.
    fn theme(&self) -> Theme;

    /// Cursor position relative to the viewport.
    fn cursor(&self) -> CursorPosition;

    /// The cells of buffer row `index`, if currently available.
    fn row(&self, index: usize) -> Option<&[Cell]>;

    /// Exact cell metrics, when the source can measure them.
    fn cell_metrics(&self) -> Option<CellMetrics> {
        None
    }
}
