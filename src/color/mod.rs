//! Color types and palette resolution.
//!
//! Re-exports the `vte::ansi` color vocabulary used on cells and provides
//! the 270-entry `Palette` that maps indexed, named, and direct-RGB colors
//! to concrete pixels under a theme.

pub mod palette;

pub use palette::{builtin_palette, theme_band, Palette, Rgb};
pub use vte::ansi::{Color, NamedColor};
