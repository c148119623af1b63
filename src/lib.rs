//! Headless terminal screen capture.
//!
//! This crate renders the visible contents of a terminal screen buffer
//! into an RGBA raster and exports it as a bitmap, compressed image
//! bytes, or a base64 data URL. It owns no terminal state: a
//! [`BufferSource`] exposes cells, theme, font, and cursor, and
//! [`ScreenCapture`] turns that view into pixels on demand.
//!
//! ```
//! use gridshot::{CaptureFormat, CaptureOptions, CaptureOutput, MemoryGrid, ScreenCapture};
//! # use gridshot::{GlyphPainter, GlyphRequest, Raster};
//! # struct NullPainter;
//! # impl GlyphPainter for NullPainter {
//! #     fn paint(&mut self, _raster: &mut Raster, _request: &GlyphRequest) {}
//! # }
//!
//! let mut grid = MemoryGrid::new(80, 24);
//! grid.set_text(0, 0, "$ cargo test");
//! # let painter = Box::new(NullPainter);
//! let mut capture = ScreenCapture::with_source(painter, grid);
//! let options = CaptureOptions {
//!     format: CaptureFormat::Blob,
//!     ..CaptureOptions::default()
//! };
//! let png = capture.capture(&options)?;
//! assert!(matches!(png, CaptureOutput::Blob(_)));
//! # Ok::<(), gridshot::Error>(())
//! ```
//!
//! Production callers paint glyphs with [`FontPainter`]; anything
//! implementing [`GlyphPainter`] can stand in where fonts are unwanted.

#![deny(unsafe_code)]

pub mod capture;
pub mod cell;
pub mod color;
pub mod error;
pub mod export;
pub mod grid;
pub mod layout;
pub mod options;
pub mod paint;
pub mod raster;
pub mod render;
pub mod source;
pub mod theme;

pub use capture::{Dimensions, ScreenCapture};
pub use cell::{Cell, CellFlags};
pub use color::{builtin_palette, theme_band, Color, NamedColor, Palette, Rgb};
pub use error::{Error, Result};
pub use export::{CaptureFormat, CaptureOptions, CaptureOutput};
pub use grid::MemoryGrid;
pub use layout::Layout;
pub use options::{OptionsUpdate, RenderOptions};
pub use paint::{FontPainter, FontStyle, GlyphPainter, GlyphRequest};
pub use raster::{Raster, Rect};
pub use render::Renderer;
pub use source::{BufferSource, CellMetrics, CursorPosition, FontSpec, GridSize};
pub use theme::{parse_hex_color, Theme};
