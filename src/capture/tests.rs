//! End-to-end tests for the capture facade.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use vte::ansi::{Color, Rgb};

use super::{Dimensions, ScreenCapture};
use crate::cell::Cell;
use crate::error::Error;
use crate::export::{CaptureFormat, CaptureOptions, CaptureOutput};
use crate::grid::MemoryGrid;
use crate::options::OptionsUpdate;
use crate::paint::{GlyphPainter, GlyphRequest};
use crate::raster::{Raster, Rect};
use crate::source::{BufferSource, CellMetrics};

const RED: Rgb = Rgb { r: 0xff, g: 0x00, b: 0x00 };

/// Fills the whole cell box at the request's color and alpha. Whitespace
/// paints nothing, like a real font's empty coverage.
struct BoxPainter;

impl GlyphPainter for BoxPainter {
    fn paint(&mut self, raster: &mut Raster, request: &GlyphRequest) {
        if request.ch.is_whitespace() {
            return;
        }
        for y in request.y..request.y + request.height {
            for x in request.x..request.x + request.width {
                raster.blend_pixel(x, y, request.color, request.alpha);
            }
        }
    }
}

/// A grid with exact 2×2 px cells for simple pixel math. The cursor is
/// parked off-viewport so pixel assertions see pure cell output.
fn grid(cols: usize, rows: usize) -> MemoryGrid {
    let mut grid = MemoryGrid::new(cols, rows);
    grid.set_cell_metrics(Some(CellMetrics { width: 2.0, height: 2.0 }));
    grid.set_cursor(-1, -1);
    grid
}

fn capture(cols: usize, rows: usize) -> ScreenCapture<MemoryGrid> {
    ScreenCapture::with_source(Box::new(BoxPainter), grid(cols, rows))
}

#[test]
fn detached_capture_reports_the_error() {
    let mut capture = ScreenCapture::<MemoryGrid>::new(Box::new(BoxPainter));
    assert!(!capture.is_attached());
    assert!(matches!(capture.raster(), Err(Error::Detached)));
    assert!(matches!(
        capture.capture(&CaptureOptions::default()),
        Err(Error::Detached)
    ));
    let mut target = Raster::with_size(4, 4);
    assert!(matches!(capture.render_to(&mut target, None), Err(Error::Detached)));
}

#[test]
fn attach_displaces_the_previous_source() {
    let mut capture = capture(2, 1);
    let displaced = capture.attach(grid(5, 1));
    assert_eq!(displaced.map(|g| g.grid_size().cols), Some(2));
    assert_eq!(capture.source().map(|g| g.grid_size().cols), Some(5));
}

#[test]
fn detach_leaves_the_capture_empty() {
    let mut capture = capture(2, 1);
    assert!(capture.is_attached());
    assert!(capture.detach().is_some());
    assert!(capture.detach().is_none());
    assert!(matches!(
        capture.capture(&CaptureOptions::default()),
        Err(Error::Detached)
    ));
}

#[test]
fn dimensions_are_zero_before_the_first_render() {
    let capture = capture(3, 2);
    assert_eq!(
        capture.dimensions(),
        Dimensions { width: 0, height: 0, cols: 3, rows: 2 }
    );
}

#[test]
fn dimensions_report_raster_and_grid_after_render() {
    let mut capture = capture(3, 2);
    capture.raster().unwrap();
    assert_eq!(
        capture.dimensions(),
        Dimensions { width: 6, height: 4, cols: 3, rows: 2 }
    );
    // Pixel dimensions keep the last frame; grid dimensions reset.
    capture.detach();
    assert_eq!(
        capture.dimensions(),
        Dimensions { width: 6, height: 4, cols: 0, rows: 0 }
    );
}

#[test]
fn bitmap_capture_copies_the_frame() {
    let mut capture = capture(2, 2);
    if let Some(grid) = capture.source_mut() {
        grid.set_text(0, 0, "hi");
    }
    let output = capture.capture(&CaptureOptions::default()).unwrap();
    let frame = capture.raster().unwrap().clone();
    match output {
        CaptureOutput::Bitmap(bitmap) => assert_eq!(bitmap, frame),
        other => panic!("expected bitmap, got {other:?}"),
    }
}

#[test]
fn blob_capture_encodes_png() {
    let mut capture = capture(2, 1);
    let options = CaptureOptions {
        format: CaptureFormat::Blob,
        ..CaptureOptions::default()
    };
    match capture.capture(&options).unwrap() {
        CaptureOutput::Blob(bytes) => assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n"),
        other => panic!("expected blob, got {other:?}"),
    }
}

#[test]
fn data_url_capture_round_trips_through_base64() {
    let mut capture = capture(2, 1);
    if let Some(grid) = capture.source_mut() {
        grid.set_text(0, 0, "a");
    }
    let options = CaptureOptions {
        format: CaptureFormat::DataUrl,
        ..CaptureOptions::default()
    };
    match capture.capture(&options).unwrap() {
        CaptureOutput::DataUrl(url) => {
            let payload = url.strip_prefix("data:image/png;base64,");
            let payload = payload.unwrap_or_else(|| panic!("bad prefix: {url}"));
            let bytes = STANDARD.decode(payload).unwrap();
            assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
        }
        other => panic!("expected data url, got {other:?}"),
    }
}

#[test]
fn render_to_lands_at_the_origin_at_natural_size() {
    let mut capture = capture(2, 1);
    let mut target = Raster::with_size(6, 4);
    target.fill(RED);
    capture.render_to(&mut target, None).unwrap();
    // The 4x2 frame covers the top-left corner.
    assert_eq!(target.pixel(0, 0), Some([0, 0, 0, 0xff]));
    assert_eq!(target.pixel(3, 1), Some([0, 0, 0, 0xff]));
    // Outside the frame the target keeps its contents.
    assert_eq!(target.pixel(4, 0), Some([0xff, 0, 0, 0xff]));
    assert_eq!(target.pixel(0, 2), Some([0xff, 0, 0, 0xff]));
}

#[test]
fn render_to_scales_into_the_rectangle() {
    let mut capture = capture(2, 1);
    if let Some(grid) = capture.source_mut() {
        grid.set_cell(0, 0, Cell::empty().with_colors(Color::Indexed(7), Color::Spec(RED)));
    }
    let mut target = Raster::with_size(12, 8);
    let rect = Rect { x: 2, y: 2, width: 8, height: 4 };
    capture.render_to(&mut target, Some(rect)).unwrap();
    // The red left cell scales up to cover the rectangle's left half.
    assert_eq!(target.pixel(2, 2), Some([0xff, 0, 0, 0xff]));
    assert_eq!(target.pixel(5, 5), Some([0xff, 0, 0, 0xff]));
    assert_eq!(target.pixel(6, 2), Some([0, 0, 0, 0xff]));
    // Pixels outside the rectangle stay untouched.
    assert_eq!(target.pixel(1, 1), Some([0, 0, 0, 0]));
}

#[test]
fn options_update_applies_to_the_next_frame() {
    let mut capture = capture(2, 1);
    capture.raster().unwrap();
    assert_eq!(capture.dimensions().width, 4);
    capture.set_options(OptionsUpdate {
        scale_factor: Some(2.0),
        ..OptionsUpdate::default()
    });
    assert_eq!(capture.options().scale_factor, 2.0);
    capture.raster().unwrap();
    assert_eq!(
        capture.dimensions(),
        Dimensions { width: 8, height: 4, cols: 2, rows: 1 }
    );
}

#[test]
fn source_edits_show_up_in_the_next_frame() {
    let mut capture = capture(2, 1);
    capture.raster().unwrap();
    if let Some(grid) = capture.source_mut() {
        grid.set_text(0, 0, "x");
    }
    let raster = capture.raster().unwrap();
    // The glyph cell fills with the default white foreground.
    assert_eq!(raster.pixel(0, 0), Some([0xff, 0xff, 0xff, 0xff]));
    assert_eq!(raster.pixel(2, 0), Some([0, 0, 0, 0xff]));
}

#[test]
fn reattached_source_drives_the_frame_size() {
    let mut capture = capture(2, 1);
    capture.raster().unwrap();
    capture.attach(grid(5, 3));
    capture.raster().unwrap();
    assert_eq!(
        capture.dimensions(),
        Dimensions { width: 10, height: 6, cols: 5, rows: 3 }
    );
}
