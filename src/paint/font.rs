//! fontdue-backed glyph painter with system font discovery.
//!
//! Families resolve through `fontdb`; glyph bitmaps come from `fontdue`
//! and are cached per `(char, style, size)`. Style variants that the
//! family lacks fall back to the regular face, missing glyphs to U+FFFD,
//! and finally to painting nothing.

use std::collections::HashMap;

use super::{FontStyle, GlyphPainter, GlyphRequest};
use crate::error::{Error, Result};
use crate::raster::Raster;

/// Families tried in order when the requested one is unavailable.
const FALLBACK_FAMILIES: &[&str] = &[
    "DejaVu Sans Mono",
    "Liberation Mono",
    "JetBrains Mono",
    "Fira Code",
    "Menlo",
    "Monaco",
    "Consolas",
    "Courier New",
    "Noto Sans Mono",
];

/// Quantized size cache key (26.6 fixed point).
fn size_key(px: f32) -> u32 {
    (px * 64.0).round().max(0.0) as u32
}

/// Production [`GlyphPainter`] drawing anti-aliased glyphs from real fonts.
pub struct FontPainter {
    db: fontdb::Database,
    /// Family the last frame asked for; resolution may have fallen back.
    requested: String,
    regular: fontdue::Font,
    /// Bold, Italic, BoldItalic faces; absent ones use the regular face.
    variants: [Option<fontdue::Font>; 3],
    cache: HashMap<(char, FontStyle, u32), (fontdue::Metrics, Vec<u8>)>,
}

impl FontPainter {
    /// Loads `family` from the system font database.
    ///
    /// Falls back through [`FALLBACK_FAMILIES`] and the system monospace
    /// default before giving up.
    pub fn new(family: &str) -> Result<Self> {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        log::debug!("font database holds {} faces", db.len());
        Self::with_database(db, family)
    }

    /// Like [`new`](Self::new) with a caller-prepared database, for
    /// embedded fonts or test fixtures.
    pub fn with_database(db: fontdb::Database, family: &str) -> Result<Self> {
        let mut loaded = load_family(&db, family);
        if loaded.is_none() {
            loaded = FALLBACK_FAMILIES.iter().find_map(|name| {
                let fonts = load_family(&db, name)?;
                log::warn!("font family {family:?} not found, using {name:?}");
                Some(fonts)
            });
        }
        if loaded.is_none() {
            loaded = generic_monospace(&db).and_then(|name| {
                let fonts = load_family(&db, &name)?;
                log::warn!("font family {family:?} not found, using system monospace {name:?}");
                Some(fonts)
            });
        }
        let (regular, variants) = loaded.ok_or_else(|| Error::FontUnavailable(family.to_owned()))?;
        Ok(Self {
            db,
            requested: family.to_owned(),
            regular,
            variants,
            cache: HashMap::new(),
        })
    }

    /// Ensure a glyph is cached for the given style and size.
    fn ensure(&mut self, ch: char, style: FontStyle, px: f32) {
        let key = (ch, style, size_key(px));
        if !self.cache.contains_key(&key) {
            let glyph = self.rasterize_with_fallback(ch, style, px);
            self.cache.insert(key, glyph);
        }
    }

    /// Rasterize a glyph through the fallback chain.
    fn rasterize_with_fallback(
        &self,
        ch: char,
        style: FontStyle,
        px: f32,
    ) -> (fontdue::Metrics, Vec<u8>) {
        // 1. Requested style variant.
        let styled = self.font_for(style);
        if styled.has_glyph(ch) {
            return styled.rasterize(ch, px);
        }

        // 2. Regular face.
        if style != FontStyle::Regular && self.regular.has_glyph(ch) {
            return self.regular.rasterize(ch, px);
        }

        // 3. Replacement character.
        if self.regular.has_glyph('\u{FFFD}') {
            return self.regular.rasterize('\u{FFFD}', px);
        }

        // 4. Last resort: empty glyph.
        (fontdue::Metrics::default(), Vec::new())
    }

    fn font_for(&self, style: FontStyle) -> &fontdue::Font {
        match style {
            FontStyle::Regular => &self.regular,
            _ => self.variants[style as usize - 1]
                .as_ref()
                .unwrap_or(&self.regular),
        }
    }

    fn ascent(&self, style: FontStyle, px: f32) -> f32 {
        self.font_for(style)
            .horizontal_line_metrics(px)
            .map_or(px * 0.8, |m| m.ascent)
    }
}

impl GlyphPainter for FontPainter {
    fn prepare(&mut self, family: &str, _px: f32) {
        if family == self.requested {
            return;
        }
        self.requested = family.to_owned();
        match load_family(&self.db, family) {
            Some((regular, variants)) => {
                self.regular = regular;
                self.variants = variants;
                self.cache.clear();
                log::debug!("switched to font family {family:?}");
            }
            None => {
                log::warn!("font family {family:?} not found, keeping current fonts");
            }
        }
    }

    fn paint(&mut self, raster: &mut Raster, request: &GlyphRequest) {
        self.ensure(request.ch, request.style, request.px);
        let ascent = self.ascent(request.style, request.px);
        let key = (request.ch, request.style, size_key(request.px));
        let Some((metrics, coverage)) = self.cache.get(&key) else {
            return;
        };
        if metrics.width == 0 || metrics.height == 0 {
            return;
        }

        // Center the em box vertically in the cell, then place the bitmap
        // relative to the baseline.
        let em_top = request.y as f32 + (request.height as f32 - request.px) / 2.0;
        let baseline = em_top + ascent;
        let left = request.x as i32 + metrics.xmin;
        let top = (baseline - metrics.height as f32 - metrics.ymin as f32).round() as i32;

        for (row, line) in coverage.chunks_exact(metrics.width).enumerate() {
            let y = top + row as i32;
            if y < 0 {
                continue;
            }
            for (col, &cov) in line.iter().enumerate() {
                if cov == 0 {
                    continue;
                }
                let x = left + col as i32;
                if x < 0 {
                    continue;
                }
                let alpha = f32::from(cov) / 255.0 * request.alpha;
                raster.blend_pixel(x as usize, y as usize, request.color, alpha);
            }
        }
    }
}

/// Loads the regular face and style variants for `family`.
fn load_family(
    db: &fontdb::Database,
    family: &str,
) -> Option<(fontdue::Font, [Option<fontdue::Font>; 3])> {
    let regular = load_face(db, family, fontdb::Weight::NORMAL, fontdb::Style::Normal)?;
    let variants = [
        load_face(db, family, fontdb::Weight::BOLD, fontdb::Style::Normal),
        load_face(db, family, fontdb::Weight::NORMAL, fontdb::Style::Italic),
        load_face(db, family, fontdb::Weight::BOLD, fontdb::Style::Italic),
    ];
    Some((regular, variants))
}

/// Queries one face and parses it with fontdue.
fn load_face(
    db: &fontdb::Database,
    family: &str,
    weight: fontdb::Weight,
    style: fontdb::Style,
) -> Option<fontdue::Font> {
    let query = fontdb::Query {
        families: &[fontdb::Family::Name(family)],
        weight,
        style,
        ..fontdb::Query::default()
    };
    let id = db.query(&query)?;
    db.with_face_data(id, |data, index| {
        let settings = fontdue::FontSettings {
            collection_index: index,
            ..fontdue::FontSettings::default()
        };
        fontdue::Font::from_bytes(data, settings).ok()
    })?
}

/// The concrete family name behind the generic system monospace, if any.
fn generic_monospace(db: &fontdb::Database) -> Option<String> {
    let query = fontdb::Query {
        families: &[fontdb::Family::Monospace],
        ..fontdb::Query::default()
    };
    let id = db.query(&query)?;
    let name = db.face(id)?.families.first()?.0.clone();
    Some(name)
}
