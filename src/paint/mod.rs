//! Glyph painting seam between the cell rasterizer and a font backend.
//!
//! The renderer hands fully resolved draw requests (position, color,
//! alpha) to a [`GlyphPainter`]; the painter owns font selection, glyph
//! rasterization, and caching. Tests substitute deterministic painters,
//! production uses [`FontPainter`].

mod font;

pub use font::FontPainter;

use crate::cell::CellFlags;
use crate::raster::Raster;
use vte::ansi::Rgb;

/// Font variant selected from cell attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontStyle {
    Regular = 0,
    Bold = 1,
    Italic = 2,
    BoldItalic = 3,
}

impl FontStyle {
    /// Map cell flags to the appropriate font style.
    pub fn from_cell_flags(flags: CellFlags) -> Self {
        match (
            flags.contains(CellFlags::BOLD),
            flags.contains(CellFlags::ITALIC),
        ) {
            (true, true) => Self::BoldItalic,
            (true, false) => Self::Bold,
            (false, true) => Self::Italic,
            (false, false) => Self::Regular,
        }
    }
}

/// One glyph draw request, fully resolved by the renderer.
///
/// `x`/`y` is the top-left corner of the cell box and `width`/`height` its
/// pixel extent (already doubled for wide characters). Painters center the
/// font's em box vertically in the cell: the em top sits at
/// `y + (height - px) / 2`.
#[derive(Debug, Clone, Copy)]
pub struct GlyphRequest {
    pub ch: char,
    pub style: FontStyle,
    /// Font pixel size, already multiplied by the scale factor.
    pub px: f32,
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
    pub color: Rgb,
    /// Glyph opacity; 1.0 except for dim cells.
    pub alpha: f32,
}

/// Draws single glyphs into a raster.
///
/// Painting never fails: a glyph the backend cannot produce is simply not
/// painted, leaving the cell background visible.
pub trait GlyphPainter {
    /// Called once per frame before any [`paint`](Self::paint) call.
    /// Backends resolving named font families react to family changes here.
    fn prepare(&mut self, _family: &str, _px: f32) {}

    /// Paints one glyph into `raster`.
    fn paint(&mut self, raster: &mut Raster, request: &GlyphRequest);
}
