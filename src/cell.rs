//! Snapshot grid cell representation with attributes and flags.

use std::sync::Arc;

use bitflags::bitflags;
use unicode_width::UnicodeWidthChar;
use vte::ansi::{Color, NamedColor};

bitflags! {
    /// Bitflags for cell text attributes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CellFlags: u16 {
        const BOLD          = 0b0000_0001;
        const DIM           = 0b0000_0010;
        const ITALIC        = 0b0000_0100;
        const UNDERLINE     = 0b0000_1000;
        const INVERSE       = 0b0001_0000;
        /// Concealed text: background and decorations render, the glyph does not.
        const HIDDEN        = 0b0010_0000;
        const STRIKETHROUGH = 0b0100_0000;
        const OVERLINE      = 0b1000_0000;
    }
}

/// A single cell of a screen buffer snapshot.
///
/// `ch` is `None` for cells that carry no glyph at all; those cells still
/// paint their background but skip glyph and decoration drawing. A space is
/// a real glyph and draws its decorations.
///
/// `width` is the display width in columns: 2 for a wide character's head,
/// 0 for the spacer cell occupying the column after it, 1 otherwise.
#[derive(Debug, Clone)]
pub struct Cell {
    pub ch: Option<char>,
    pub fg: Color,
    pub bg: Color,
    pub flags: CellFlags,
    pub width: u8,
    zerowidth: Option<Arc<Vec<char>>>,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: Some(' '),
            fg: Color::Named(NamedColor::Foreground),
            bg: Color::Named(NamedColor::Background),
            flags: CellFlags::empty(),
            width: 1,
            zerowidth: None,
        }
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.ch == other.ch
            && self.fg == other.fg
            && self.bg == other.bg
            && self.flags == other.flags
            && self.width == other.width
            && self.zerowidth() == other.zerowidth()
    }
}

impl Eq for Cell {}

impl Cell {
    /// Creates a cell holding `ch` with default colors and its Unicode
    /// display width.
    pub fn new(ch: char) -> Self {
        let width = UnicodeWidthChar::width(ch).unwrap_or(1);
        Self {
            ch: Some(ch),
            width: width.min(2) as u8,
            ..Self::default()
        }
    }

    /// Creates the width-0 continuation cell that follows a wide character.
    pub fn spacer() -> Self {
        Self {
            ch: None,
            width: 0,
            ..Self::default()
        }
    }

    /// Creates a cell with no glyph. Only its background is painted.
    pub fn empty() -> Self {
        Self {
            ch: None,
            ..Self::default()
        }
    }

    /// Returns the zero-width combining characters attached to this cell.
    pub fn zerowidth(&self) -> &[char] {
        match &self.zerowidth {
            Some(chars) => chars,
            None => &[],
        }
    }

    /// Attaches a zero-width combining character to this cell.
    pub fn push_zerowidth(&mut self, ch: char) {
        let chars = self.zerowidth.get_or_insert_with(|| Arc::new(Vec::new()));
        Arc::make_mut(chars).push(ch);
    }

    /// Replaces the cell's colors, returning the modified cell.
    #[must_use]
    pub fn with_colors(mut self, fg: Color, bg: Color) -> Self {
        self.fg = fg;
        self.bg = bg;
        self
    }

    /// Replaces the cell's attribute flags, returning the modified cell.
    #[must_use]
    pub fn with_flags(mut self, flags: CellFlags) -> Self {
        self.flags = flags;
        self
    }
}
