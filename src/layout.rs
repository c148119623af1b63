//! Cell and raster geometry.
//!
//! One layout is computed per frame from the source's font, the active
//! scale factor, and the grid dimensions. Exact cell metrics from the
//! source take precedence; otherwise cell size is approximated from the
//! font size alone.

use crate::source::{CellMetrics, FontSpec, GridSize};

/// Advance-width ratio used when the source cannot supply exact metrics.
///
/// A typical monospace glyph advance is close to 0.6 of the point size;
/// real metrics replace this whenever available.
const APPROX_WIDTH_RATIO: f32 = 0.6;

/// Per-frame pixel geometry: cell box and full raster dimensions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Layout {
    /// Cell width in pixels.
    pub cell_width: usize,
    /// Cell height in pixels.
    pub cell_height: usize,
    /// Raster width in pixels (`cols * cell_width`).
    pub width: usize,
    /// Raster height in pixels (`rows * cell_height`).
    pub height: usize,
}

impl Layout {
    /// Computes the layout for one frame.
    ///
    /// Fractional cell dimensions round up so every cell maps to a whole
    /// pixel box.
    pub fn compute(
        font: &FontSpec,
        scale: f32,
        grid: GridSize,
        exact: Option<CellMetrics>,
    ) -> Self {
        let (cell_width, cell_height) = match exact {
            Some(metrics) => (
                (metrics.width * scale).ceil().max(0.0) as usize,
                (metrics.height * scale).ceil().max(0.0) as usize,
            ),
            None => (
                (font.size * APPROX_WIDTH_RATIO * scale).ceil().max(0.0) as usize,
                (font.size * font.line_height * scale).ceil().max(0.0) as usize,
            ),
        };
        Self {
            cell_width,
            cell_height,
            width: grid.cols * cell_width,
            height: grid.rows * cell_height,
        }
    }
}
