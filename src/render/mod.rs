//! Frame rendering.
//!
//! `Renderer` walks the source's viewport and produces one RGBA frame:
//! clear to the theme background, draw every available cell, overlay the
//! cursor. The raster is reused across frames and reallocated only when
//! the computed dimensions change.

mod draw;


use crate::color::Palette;
use crate::layout::Layout;
use crate::options::{OptionsUpdate, RenderOptions};
use crate::paint::GlyphPainter;
use crate::raster::Raster;
use crate::source::BufferSource;

/// Opacity of the cursor overlay rectangle.
const CURSOR_ALPHA: f32 = 0.5;

/// Turns buffer snapshots into RGBA frames.
pub struct Renderer {
    painter: Box<dyn GlyphPainter>,
    raster: Raster,
    options: RenderOptions,
}

impl Renderer {
    /// Creates a renderer with default options.
    pub fn new(painter: Box<dyn GlyphPainter>) -> Self {
        Self::with_options(painter, RenderOptions::default())
    }

    /// Creates a renderer with explicit options.
    pub fn with_options(painter: Box<dyn GlyphPainter>, options: RenderOptions) -> Self {
        Self {
            painter,
            raster: Raster::new(),
            options,
        }
    }

    /// Current render options.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Applies an options update. Fields left `None` keep their value.
    pub fn set_options(&mut self, update: OptionsUpdate) {
        self.options.merge(update);
    }

    /// The most recently rendered frame (empty before the first render).
    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    /// Renders one frame from `source` and returns it.
    ///
    /// Rows the source cannot provide are left as background; a cursor
    /// outside the viewport is not drawn.
    pub fn render(&mut self, source: &dyn BufferSource) -> &Raster {
        let grid = source.grid_size();
        let font = source.font();
        let scale = self.options.effective_scale_factor();
        let layout = Layout::compute(&font, scale, grid, source.cell_metrics());
        let realloc = self.raster.ensure_size(layout.width, layout.height);
        log::trace!(
            "render {}x{} cells at {}x{} px (realloc: {realloc})",
            grid.cols,
            grid.rows,
            layout.width,
            layout.height,
        );

        let palette = Palette::with_options(&source.theme(), self.options.bold_is_bright);
        self.raster.fill(palette.background());
        if layout.cell_width == 0 || layout.cell_height == 0 {
            return &self.raster;
        }

        let font_px = font.size * scale;
        self.painter.prepare(&font.family, font_px);

        let top = source.viewport_top();
        for row in 0..grid.rows {
            let Some(cells) = source.row(top + row) else {
                continue;
            };
            for (col, cell) in cells.iter().enumerate().take(grid.cols) {
                draw::draw_cell(
                    &mut self.raster,
                    self.painter.as_mut(),
                    &palette,
                    &layout,
                    font_px,
                    cell,
                    col,
                    row,
                );
            }
        }

        if self.options.show_cursor {
            let cursor = source.cursor();
            let in_grid = cursor.col >= 0
                && cursor.row >= 0
                && (cursor.col as usize) < grid.cols
                && (cursor.row as usize) < grid.rows;
            if in_grid {
                self.raster.blend_rect(
                    cursor.col as usize * layout.cell_width,
                    cursor.row as usize * layout.cell_height,
                    layout.cell_width,
                    layout.cell_height,
                    palette.cursor_color(),
                    CURSOR_ALPHA,
                );
            }
        }

        &self.raster
    }
}
