//! Per-cell drawing: background, glyph, combining marks, decorations.

use crate::cell::{Cell, CellFlags};
use crate::color::Palette;
use crate::layout::Layout;
use crate::paint::{FontStyle, GlyphPainter, GlyphRequest};
use crate::raster::Raster;

/// Glyph opacity for dim cells. Dim reduces coverage, not color.
const DIM_GLYPH_ALPHA: f32 = 0.5;

/// Draws one cell at grid position (`col`, `row`).
///
/// Spacer cells (width 0) are skipped entirely; their wide head already
/// painted this column. Cells without a glyph paint background only.
pub(super) fn draw_cell(
    raster: &mut Raster,
    painter: &mut dyn GlyphPainter,
    palette: &Palette,
    layout: &Layout,
    font_px: f32,
    cell: &Cell,
    col: usize,
    row: usize,
) {
    if cell.width == 0 {
        return;
    }

    let x = col * layout.cell_width;
    let y = row * layout.cell_height;
    let span = layout.cell_width * usize::from(cell.width);
    let fg = palette.resolve_fg(cell);
    let bg = palette.resolve_bg(cell);

    // The frame clear already painted the default background.
    if bg != palette.background() {
        raster.fill_rect(x, y, span, layout.cell_height, bg);
    }

    let Some(ch) = cell.ch else {
        return;
    };

    if !cell.flags.contains(CellFlags::HIDDEN) {
        let request = GlyphRequest {
            ch,
            style: FontStyle::from_cell_flags(cell.flags),
            px: font_px,
            x,
            y,
            width: span,
            height: layout.cell_height,
            color: fg,
            alpha: if cell.flags.contains(CellFlags::DIM) {
                DIM_GLYPH_ALPHA
            } else {
                1.0
            },
        };
        painter.paint(raster, &request);
        for &mark in cell.zerowidth() {
            painter.paint(raster, &GlyphRequest { ch: mark, ..request });
        }
    }

    if cell.flags.contains(CellFlags::UNDERLINE) {
        raster.fill_rect(x, y + layout.cell_height - 1, span, 1, fg);
    }
    if cell.flags.contains(CellFlags::STRIKETHROUGH) {
        raster.fill_rect(x, y + layout.cell_height / 2, span, 1, fg);
    }
    if cell.flags.contains(CellFlags::OVERLINE) {
        raster.fill_rect(x, y, span, 1, fg);
    }
}
