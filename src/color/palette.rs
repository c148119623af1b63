//! 270-entry color palette for snapshot rendering.
//!
//! Layout: 0–15 themed ANSI band, 16–231 6×6×6 cube, 232–255 grayscale
//! ramp, 256–269 named semantic slots (foreground, background, cursor, dim
//! variants, bright/dim foreground). Entries 16–255 are process-wide
//! constants; the band and the semantic slots follow the theme.

use std::sync::LazyLock;

use vte::ansi::{Color, NamedColor};

pub use vte::ansi::Rgb;

use crate::cell::{Cell, CellFlags};
use crate::theme::Theme;

/// Total palette entries: 256 indexed + 14 named semantic slots.
pub const NUM_COLORS: usize = 270;

/// Built-in ANSI colors (indices 0–15), classic xterm values.
const ANSI_COLORS: [Rgb; 16] = [
    Rgb { r: 0x00, g: 0x00, b: 0x00 }, // 0  Black
    Rgb { r: 0xcd, g: 0x00, b: 0x00 }, // 1  Red
    Rgb { r: 0x00, g: 0xcd, b: 0x00 }, // 2  Green
    Rgb { r: 0xcd, g: 0xcd, b: 0x00 }, // 3  Yellow
    Rgb { r: 0x00, g: 0x00, b: 0xee }, // 4  Blue
    Rgb { r: 0xcd, g: 0x00, b: 0xcd }, // 5  Magenta
    Rgb { r: 0x00, g: 0xcd, b: 0xcd }, // 6  Cyan
    Rgb { r: 0xe5, g: 0xe5, b: 0xe5 }, // 7  White
    Rgb { r: 0x7f, g: 0x7f, b: 0x7f }, // 8  Bright Black
    Rgb { r: 0xff, g: 0x00, b: 0x00 }, // 9  Bright Red
    Rgb { r: 0x00, g: 0xff, b: 0x00 }, // 10 Bright Green
    Rgb { r: 0xff, g: 0xff, b: 0x00 }, // 11 Bright Yellow
    Rgb { r: 0x5c, g: 0x5c, b: 0xff }, // 12 Bright Blue
    Rgb { r: 0xff, g: 0x00, b: 0xff }, // 13 Bright Magenta
    Rgb { r: 0x00, g: 0xff, b: 0xff }, // 14 Bright Cyan
    Rgb { r: 0xff, g: 0xff, b: 0xff }, // 15 Bright White
];

/// Default foreground when the theme leaves it unset (white).
pub const DEFAULT_FOREGROUND: Rgb = Rgb { r: 0xff, g: 0xff, b: 0xff };
/// Default background when the theme leaves it unset (black).
pub const DEFAULT_BACKGROUND: Rgb = Rgb { r: 0x00, g: 0x00, b: 0x00 };
/// Default cursor color when the theme leaves it unset (white).
pub const DEFAULT_CURSOR: Rgb = Rgb { r: 0xff, g: 0xff, b: 0xff };

static BUILTIN: LazyLock<[Rgb; NUM_COLORS]> = LazyLock::new(build_builtin_palette);

/// The palette table with no theme applied.
///
/// Built once per process. Indices 16–255 keep exactly these values in
/// every themed palette.
pub fn builtin_palette() -> &'static [Rgb; NUM_COLORS] {
    &BUILTIN
}

/// The 16-color ANSI band for `theme`, falling back slot-wise to the
/// built-in colors.
pub fn theme_band(theme: &Theme) -> [Rgb; 16] {
    let mut band = ANSI_COLORS;
    for (index, slot) in band.iter_mut().enumerate() {
        if let Some(rgb) = theme.ansi(index) {
            *slot = rgb;
        }
    }
    band
}

/// Themed color palette resolving cell colors to concrete `Rgb` values.
///
/// Built per frame from the source's theme; cheap to construct (one table
/// copy plus the themed slots).
#[derive(Debug, Clone)]
pub struct Palette {
    /// Live palette entries, indexable by `NamedColor as usize`.
    colors: [Rgb; NUM_COLORS],
    /// Promote bold cells using ANSI 0–7 to the bright band 8–15.
    bold_is_bright: bool,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: *builtin_palette(),
            bold_is_bright: false,
        }
    }
}

impl Palette {
    /// Builds the palette for `theme` with default options.
    pub fn new(theme: &Theme) -> Self {
        Self::with_options(theme, false)
    }

    /// Builds the palette for `theme`, optionally promoting bold cells on
    /// ANSI 0–7 to their bright counterparts.
    pub fn with_options(theme: &Theme, bold_is_bright: bool) -> Self {
        let mut colors = *builtin_palette();
        colors[..16].copy_from_slice(&theme_band(theme));

        let foreground = theme.foreground.unwrap_or(DEFAULT_FOREGROUND);
        colors[NamedColor::Foreground as usize] = foreground;
        colors[NamedColor::Background as usize] = theme.background.unwrap_or(DEFAULT_BACKGROUND);
        colors[NamedColor::Cursor as usize] = theme.cursor.unwrap_or(DEFAULT_CURSOR);

        // Dim variants track the themed band at 2/3 brightness.
        for i in 0..8 {
            colors[NamedColor::DimBlack as usize + i] = dim(colors[i]);
        }
        colors[NamedColor::BrightForeground as usize] = foreground;
        colors[NamedColor::DimForeground as usize] = dim(foreground);

        Self { colors, bold_is_bright }
    }

    /// Resolve a `vte::ansi::Color` to an `Rgb` value.
    pub fn resolve(&self, color: Color) -> Rgb {
        match color {
            Color::Spec(rgb) => rgb,
            Color::Indexed(idx) => self.colors[idx as usize],
            Color::Named(name) => {
                let idx = name as usize;
                if idx < NUM_COLORS {
                    self.colors[idx]
                } else {
                    self.foreground()
                }
            }
        }
    }

    /// Resolved foreground for a cell: bold promotion applied, then the
    /// inverse swap.
    pub fn resolve_fg(&self, cell: &Cell) -> Rgb {
        if cell.flags.contains(CellFlags::INVERSE) {
            self.resolve(cell.bg)
        } else {
            self.resolve_flagged(cell.fg, cell.flags)
        }
    }

    /// Resolved background for a cell, honoring the inverse swap.
    pub fn resolve_bg(&self, cell: &Cell) -> Rgb {
        if cell.flags.contains(CellFlags::INVERSE) {
            self.resolve_flagged(cell.fg, cell.flags)
        } else {
            self.resolve(cell.bg)
        }
    }

    /// Default foreground color.
    pub fn foreground(&self) -> Rgb {
        self.colors[NamedColor::Foreground as usize]
    }

    /// Default background color.
    pub fn background(&self) -> Rgb {
        self.colors[NamedColor::Background as usize]
    }

    /// Cursor color.
    pub fn cursor_color(&self) -> Rgb {
        self.colors[NamedColor::Cursor as usize]
    }

    /// Like [`Self::resolve`], promoting ANSI 0–7 to 8–15 for bold cells
    /// when the palette was built with `bold_is_bright`.
    fn resolve_flagged(&self, color: Color, flags: CellFlags) -> Rgb {
        if self.bold_is_bright && flags.contains(CellFlags::BOLD) {
            match color {
                Color::Indexed(idx @ 0..=7) => return self.colors[idx as usize + 8],
                Color::Named(name) if (name as usize) < 8 => {
                    return self.colors[name as usize + 8];
                }
                _ => {}
            }
        }
        self.resolve(color)
    }
}

/// Build the built-in xterm-256 table plus default semantic slots.
fn build_builtin_palette() -> [Rgb; NUM_COLORS] {
    let mut colors = [Rgb { r: 0, g: 0, b: 0 }; NUM_COLORS];

    // 0–15: ANSI colors.
    colors[..16].copy_from_slice(&ANSI_COLORS);

    // 16–231: 6×6×6 color cube.
    for r in 0..6u8 {
        for g in 0..6u8 {
            for b in 0..6u8 {
                let idx = 16 + (r as usize * 36) + (g as usize * 6) + b as usize;
                colors[idx] = Rgb {
                    r: cube_channel(r),
                    g: cube_channel(g),
                    b: cube_channel(b),
                };
            }
        }
    }

    // 232–255: grayscale ramp.
    for i in 0..24u8 {
        let v = 8 + i * 10;
        colors[232 + i as usize] = Rgb { r: v, g: v, b: v };
    }

    // Named semantic slots.
    colors[NamedColor::Foreground as usize] = DEFAULT_FOREGROUND;
    colors[NamedColor::Background as usize] = DEFAULT_BACKGROUND;
    colors[NamedColor::Cursor as usize] = DEFAULT_CURSOR;

    // Dim variants (2/3 brightness of ANSI 0–7).
    for i in 0..8 {
        colors[NamedColor::DimBlack as usize + i] = dim(colors[i]);
    }

    // Bright/dim foreground.
    colors[NamedColor::BrightForeground as usize] = DEFAULT_FOREGROUND;
    colors[NamedColor::DimForeground as usize] = dim(DEFAULT_FOREGROUND);

    colors
}

/// Cube channel value for level 0–5: 0, then 95 + 40 per step.
fn cube_channel(level: u8) -> u8 {
    if level == 0 { 0 } else { 55 + level * 40 }
}

/// Reduce a color to 2/3 brightness for dim variants.
fn dim(c: Rgb) -> Rgb {
    Rgb {
        r: (c.r as u16 * 2 / 3) as u8,
        g: (c.g as u16 * 2 / 3) as u8,
        b: (c.b as u16 * 2 / 3) as u8,
    }
}
