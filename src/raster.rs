//! RGBA8 pixel surface with the drawing primitives the renderer needs.
//!
//! All drawing clips silently at the surface edge; coordinates are in
//! pixels with the origin at the top-left corner.

use vte::ansi::Rgb;

/// Destination rectangle for blits, in target pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

/// A tightly packed RGBA8 image buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Raster {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Raster {
    /// Creates an empty 0×0 raster. The first [`ensure_size`](Self::ensure_size)
    /// allocates it.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a zeroed raster of the given dimensions.
    pub fn with_size(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height * 4],
        }
    }

    /// Surface width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Surface height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The raw pixel bytes, row-major RGBA8.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Reallocates the surface if the dimensions changed.
    ///
    /// Returns `true` when a reallocation happened; the previous contents
    /// are discarded in that case and fully preserved otherwise.
    pub fn ensure_size(&mut self, width: usize, height: usize) -> bool {
        if self.width == width && self.height == height {
            return false;
        }
        self.width = width;
        self.height = height;
        self.pixels = vec![0; width * height * 4];
        true
    }

    /// Fills the whole surface with an opaque color.
    pub fn fill(&mut self, color: Rgb) {
        for px in self.pixels.chunks_exact_mut(4) {
            px[0] = color.r;
            px[1] = color.g;
            px[2] = color.b;
            px[3] = 0xff;
        }
    }

    /// Fills a rectangle with an opaque color, clipped to the surface.
    pub fn fill_rect(&mut self, x: usize, y: usize, width: usize, height: usize, color: Rgb) {
        if x >= self.width || y >= self.height {
            return;
        }
        let x_end = (x + width).min(self.width);
        let y_end = (y + height).min(self.height);
        for row in y..y_end {
            let start = (row * self.width + x) * 4;
            let end = (row * self.width + x_end) * 4;
            for px in self.pixels[start..end].chunks_exact_mut(4) {
                px[0] = color.r;
                px[1] = color.g;
                px[2] = color.b;
                px[3] = 0xff;
            }
        }
    }

    /// Alpha-blends a rectangle over the surface, clipped to it.
    pub fn blend_rect(
        &mut self,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        color: Rgb,
        alpha: f32,
    ) {
        if x >= self.width || y >= self.height {
            return;
        }
        let x_end = (x + width).min(self.width);
        let y_end = (y + height).min(self.height);
        for row in y..y_end {
            for col in x..x_end {
                self.blend_pixel(col, row, color, alpha);
            }
        }
    }

    /// Alpha-blends one pixel; out-of-bounds coordinates are ignored.
    pub fn blend_pixel(&mut self, x: usize, y: usize, color: Rgb, alpha: f32) {
        if x >= self.width || y >= self.height {
            return;
        }
        let a = alpha.clamp(0.0, 1.0);
        let i = (y * self.width + x) * 4;
        let px = &mut self.pixels[i..i + 4];
        px[0] = blend_channel(px[0], color.r, a);
        px[1] = blend_channel(px[1], color.g, a);
        px[2] = blend_channel(px[2], color.b, a);
        px[3] = 0xff;
    }

    /// Returns the RGBA bytes of one pixel, if in bounds.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y * self.width + x) * 4;
        Some([
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ])
    }

    /// The pixel data with the alpha channel dropped, for encoders that
    /// reject RGBA input.
    pub fn to_rgb(&self) -> Vec<u8> {
        let mut rgb = Vec::with_capacity(self.width * self.height * 3);
        for px in self.pixels.chunks_exact(4) {
            rgb.extend_from_slice(&px[..3]);
        }
        rgb
    }

    /// Copies this raster into `rect` of `target`, scaling with
    /// nearest-neighbor sampling and clipping at the target edge.
    pub fn blit_to(&self, target: &mut Self, rect: Rect) {
        if self.width == 0 || self.height == 0 || rect.width == 0 || rect.height == 0 {
            return;
        }
        for dy in 0..rect.height {
            let ty = rect.y + dy;
            if ty >= target.height {
                break;
            }
            let sy = dy * self.height / rect.height;
            for dx in 0..rect.width {
                let tx = rect.x + dx;
                if tx >= target.width {
                    break;
                }
                let sx = dx * self.width / rect.width;
                let src = (sy * self.width + sx) * 4;
                let dst = (ty * target.width + tx) * 4;
                target.pixels[dst..dst + 4].copy_from_slice(&self.pixels[src..src + 4]);
            }
        }
    }
}

/// One channel of `src` over `dst` at opacity `a`.
fn blend_channel(dst: u8, src: u8, a: f32) -> u8 {
    (f32::from(src) * a + f32::from(dst) * (1.0 - a)).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgb = Rgb { r: 0xff, g: 0xff, b: 0xff };
    const BLACK: Rgb = Rgb { r: 0x00, g: 0x00, b: 0x00 };

    #[test]
    fn fill_covers_every_pixel() {
        let mut raster = Raster::with_size(3, 2);
        raster.fill(WHITE);
        for y in 0..2 {
            for x in 0..3 {
                assert_eq!(raster.pixel(x, y), Some([0xff, 0xff, 0xff, 0xff]));
            }
        }
    }

    #[test]
    fn fill_rect_clips_at_edges() {
        let mut raster = Raster::with_size(4, 4);
        raster.fill(BLACK);
        raster.fill_rect(2, 2, 10, 10, WHITE);
        assert_eq!(raster.pixel(1, 1), Some([0, 0, 0, 0xff]));
        assert_eq!(raster.pixel(2, 2), Some([0xff, 0xff, 0xff, 0xff]));
        assert_eq!(raster.pixel(3, 3), Some([0xff, 0xff, 0xff, 0xff]));
        // Entirely off-surface rectangles are ignored.
        raster.fill_rect(9, 9, 2, 2, WHITE);
        assert_eq!(raster.pixel(1, 1), Some([0, 0, 0, 0xff]));
    }

    #[test]
    fn blend_pixel_mixes_channels() {
        let mut raster = Raster::with_size(1, 1);
        raster.fill(BLACK);
        raster.blend_pixel(0, 0, WHITE, 0.5);
        assert_eq!(raster.pixel(0, 0), Some([128, 128, 128, 0xff]));
    }

    #[test]
    fn blend_alpha_is_clamped() {
        let mut raster = Raster::with_size(1, 1);
        raster.fill(BLACK);
        raster.blend_pixel(0, 0, WHITE, 7.0);
        assert_eq!(raster.pixel(0, 0), Some([0xff, 0xff, 0xff, 0xff]));
    }

    #[test]
    fn ensure_size_keeps_buffer_when_unchanged() {
        let mut raster = Raster::with_size(2, 2);
        raster.fill(WHITE);
        let ptr = raster.pixels().as_ptr();
        assert!(!raster.ensure_size(2, 2));
        assert_eq!(raster.pixels().as_ptr(), ptr);
        assert_eq!(raster.pixel(0, 0), Some([0xff, 0xff, 0xff, 0xff]));
    }

    #[test]
    fn ensure_size_reallocates_on_change() {
        let mut raster = Raster::with_size(2, 2);
        raster.fill(WHITE);
        assert!(raster.ensure_size(3, 2));
        assert_eq!(raster.pixels().len(), 3 * 2 * 4);
        // Fresh buffer, not a copy of the old contents.
        assert_eq!(raster.pixel(0, 0), Some([0, 0, 0, 0]));
    }

    #[test]
    fn to_rgb_drops_alpha() {
        let mut raster = Raster::with_size(2, 1);
        raster.fill(WHITE);
        assert_eq!(raster.to_rgb(), vec![0xff; 6]);
    }

    #[test]
    fn blit_identity_copies_pixels() {
        let mut src = Raster::with_size(2, 2);
        src.fill(WHITE);
        let mut dst = Raster::with_size(4, 4);
        dst.fill(BLACK);
        src.blit_to(&mut dst, Rect { x: 1, y: 1, width: 2, height: 2 });
        assert_eq!(dst.pixel(0, 0), Some([0, 0, 0, 0xff]));
        assert_eq!(dst.pixel(1, 1), Some([0xff, 0xff, 0xff, 0xff]));
        assert_eq!(dst.pixel(2, 2), Some([0xff, 0xff, 0xff, 0xff]));
        assert_eq!(dst.pixel(3, 3), Some([0, 0, 0, 0xff]));
    }

    #[test]
    fn blit_scales_with_nearest_neighbor() {
        let mut src = Raster::with_size(1, 1);
        src.fill(WHITE);
        let mut dst = Raster::with_size(3, 3);
        dst.fill(BLACK);
        src.blit_to(&mut dst, Rect { x: 0, y: 0, width: 3, height: 3 });
        for y in 0..3 {
            for x in 0..3 {
                assert_eq!(dst.pixel(x, y), Some([0xff, 0xff, 0xff, 0xff]), "({x},{y})");
            }
        }
    }

    #[test]
    fn blit_clips_at_target_edge() {
        let mut src = Raster::with_size(4, 4);
        src.fill(WHITE);
        let mut dst = Raster::with_size(2, 2);
        dst.fill(BLACK);
        src.blit_to(&mut dst, Rect { x: 1, y: 0, width: 4, height: 4 });
        assert_eq!(dst.pixel(0, 0), Some([0, 0, 0, 0xff]));
        assert_eq!(dst.pixel(1, 0), Some([0xff, 0xff, 0xff, 0xff]));
    }
}
