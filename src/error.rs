//! Capture error types.

use thiserror::Error;

/// Errors surfaced by the capture pipeline.
///
/// Transient conditions (rows not yet available, missing glyphs) are handled
/// inline by the renderer and never reach this enum.
#[derive(Debug, Error)]
pub enum Error {
    /// A capture was requested while no buffer source is attached.
    #[error("no buffer source is attached")]
    Detached,

    /// The requested capture format is not one of the supported identifiers.
    #[error("unsupported capture format: {0:?}")]
    UnsupportedFormat(String),

    /// Image encoding failed.
    #[error("image encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    /// No usable font could be loaded for the requested family.
    #[error("no usable font found for family {0:?}")]
    FontUnavailable(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
