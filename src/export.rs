//! Raster export: raw bitmap, encoded blob, or base64 data URL.

use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::raster::Raster;

/// Encode quality used when none is supplied.
pub const DEFAULT_QUALITY: f32 = 0.92;
/// MIME type used when none is supplied, and the fallback for unknown ones.
pub const DEFAULT_CONTENT_TYPE: &str = "image/png";

/// Shape of a capture result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureFormat {
    /// Owned copy of the RGBA raster; no encoding.
    #[default]
    Bitmap,
    /// Compressed image bytes per the content type.
    Blob,
    /// Compressed bytes wrapped in a base64 `data:` URL.
    DataUrl,
}

impl FromStr for CaptureFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "bitmap" => Ok(Self::Bitmap),
            "blob" => Ok(Self::Blob),
            "data_url" => Ok(Self::DataUrl),
            _ => Err(Error::UnsupportedFormat(s.to_owned())),
        }
    }
}

impl fmt::Display for CaptureFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bitmap => "bitmap",
            Self::Blob => "blob",
            Self::DataUrl => "data_url",
        };
        f.write_str(name)
    }
}

/// How a capture should be packaged.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureOptions {
    pub format: CaptureFormat,
    /// Encoding MIME type for `Blob` and `DataUrl` captures. Unknown types
    /// fall back to PNG.
    pub content_type: String,
    /// Lossy-encode quality in `[0, 1]`. PNG ignores it.
    pub quality: f32,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            format: CaptureFormat::Bitmap,
            content_type: DEFAULT_CONTENT_TYPE.to_owned(),
            quality: DEFAULT_QUALITY,
        }
    }
}

impl CaptureOptions {
    /// The quality clamped to `[0, 1]`.
    pub fn effective_quality(&self) -> f32 {
        self.quality.clamp(0.0, 1.0)
    }
}

/// A packaged capture.
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureOutput {
    Bitmap(Raster),
    Blob(Vec<u8>),
    DataUrl(String),
}

/// Packages a rendered raster per `options`.
pub fn export(raster: &Raster, options: &CaptureOptions) -> Result<CaptureOutput> {
    match options.format {
        CaptureFormat::Bitmap => Ok(CaptureOutput::Bitmap(raster.clone())),
        CaptureFormat::Blob => Ok(CaptureOutput::Blob(encode(raster, options)?)),
        CaptureFormat::DataUrl => {
            let bytes = encode(raster, options)?;
            let mime = effective_content_type(&options.content_type);
            Ok(CaptureOutput::DataUrl(format!(
                "data:{mime};base64,{}",
                STANDARD.encode(&bytes)
            )))
        }
    }
}

/// Maps a requested MIME type to a supported encoder.
fn effective_content_type(content_type: &str) -> &'static str {
    match content_type {
        "image/png" => "image/png",
        "image/jpeg" | "image/jpg" => "image/jpeg",
        other => {
            log::debug!("unsupported content type {other:?}, encoding as png");
            DEFAULT_CONTENT_TYPE
        }
    }
}

/// Compresses the raster with the encoder behind the content type.
fn encode(raster: &Raster, options: &CaptureOptions) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    let width = raster.width() as u32;
    let height = raster.height() as u32;
    match effective_content_type(&options.content_type) {
        "image/jpeg" => {
            // JPEG has no alpha channel and expects quality in 1–100.
            let quality = (options.effective_quality() * 100.0).round().max(1.0) as u8;
            let encoder = JpegEncoder::new_with_quality(&mut bytes, quality);
            encoder.write_image(&raster.to_rgb(), width, height, ExtendedColorType::Rgb8)?;
        }
        _ => {
            let encoder = PngEncoder::new(&mut bytes);
            encoder.write_image(raster.pixels(), width, height, ExtendedColorType::Rgba8)?;
        }
    }
    Ok(bytes)
}
