//! Capture facade tying a buffer source to the renderer and exporters.

use crate::error::{Error, Result};
use crate::export::{self, CaptureOptions, CaptureOutput};
use crate::options::{OptionsUpdate, RenderOptions};
use crate::paint::GlyphPainter;
use crate::raster::{Raster, Rect};
use crate::render::Renderer;
use crate::source::BufferSource;

/// Raster and grid dimensions reported by [`ScreenCapture::dimensions`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dimensions {
    /// Raster width in pixels (0 before the first render).
    pub width: usize,
    /// Raster height in pixels (0 before the first render).
    pub height: usize,
    /// Grid columns (0 while detached).
    pub cols: usize,
    /// Grid rows (0 while detached).
    pub rows: usize,
}

/// Captures frames from an attached [`BufferSource`].
///
/// The capture holds at most one source. Every capture operation renders a
/// fresh frame; with no source attached they fail with
/// [`Error::Detached`].
pub struct ScreenCapture<S> {
    source: Option<S>,
    renderer: Renderer,
}

impl<S: BufferSource> ScreenCapture<S> {
    /// Creates a detached capture.
    pub fn new(painter: Box<dyn GlyphPainter>) -> Self {
        Self {
            source: None,
            renderer: Renderer::new(painter),
        }
    }

    /// Creates a capture already attached to `source`.
    pub fn with_source(painter: Box<dyn GlyphPainter>, source: S) -> Self {
        Self {
            source: Some(source),
            renderer: Renderer::new(painter),
        }
    }

    /// Attaches `source`, returning the previously attached one, if any.
    pub fn attach(&mut self, source: S) -> Option<S> {
        self.source.replace(source)
    }

    /// Detaches and returns the current source.
    pub fn detach(&mut self) -> Option<S> {
        self.source.take()
    }

    /// Whether a source is currently attached.
    pub fn is_attached(&self) -> bool {
        self.source.is_some()
    }

    /// Shared access to the attached source.
    pub fn source(&self) -> Option<&S> {
        self.source.as_ref()
    }

    /// Mutable access to the attached source.
    pub fn source_mut(&mut self) -> Option<&mut S> {
        self.source.as_mut()
    }

    /// Current render options.
    pub fn options(&self) -> &RenderOptions {
        self.renderer.options()
    }

    /// Applies a partial options update to the renderer.
    pub fn set_options(&mut self, update: OptionsUpdate) {
        self.renderer.set_options(update);
    }

    /// Current raster and grid dimensions without rendering.
    ///
    /// Pixel dimensions reflect the most recent render; both pairs are
    /// zero for a capture that never rendered or has no source.
    pub fn dimensions(&self) -> Dimensions {
        let raster = self.renderer.raster();
        let grid = self
            .source
            .as_ref()
            .map(BufferSource::grid_size)
            .unwrap_or_default();
        Dimensions {
            width: raster.width(),
            height: raster.height(),
            cols: grid.cols,
            rows: grid.rows,
        }
    }

    /// Renders a fresh frame and returns it.
    pub fn raster(&mut self) -> Result<&Raster> {
        self.render()
    }

    /// Renders a fresh frame and packages it per `options`.
    pub fn capture(&mut self, options: &CaptureOptions) -> Result<CaptureOutput> {
        let raster = self.render()?;
        export::export(raster, options)
    }

    /// Renders a fresh frame and blits it into `rect` of `target`,
    /// scaling when the rectangle differs from the frame size. Without a
    /// rectangle the frame lands at the target origin at natural size.
    pub fn render_to(&mut self, target: &mut Raster, rect: Option<Rect>) -> Result<()> {
        let raster = self.render()?;
        let rect = rect.unwrap_or(Rect {
            x: 0,
            y: 0,
            width: raster.width(),
            height: raster.height(),
        });
        raster.blit_to(target, rect);
        Ok(())
    }

    fn render(&mut self) -> Result<&Raster> {
        let source = self.source.as_ref().ok_or(Error::Detached)?;
        Ok(self.renderer.render(source))
    }
}

#[cfg(test)]
mod tests;
