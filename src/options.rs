//! Render options and partial updates.

use serde::{Deserialize, Serialize};

/// Options affecting how frames are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Device pixel ratio applied to all cell metrics. Must be a positive
    /// finite number; invalid values fall back to 1.
    pub scale_factor: f32,
    /// Draw the cursor overlay when the cursor is inside the viewport.
    pub show_cursor: bool,
    /// Render bold cells using ANSI 0–7 with the bright band 8–15.
    pub bold_is_bright: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            scale_factor: 1.0,
            show_cursor: true,
            bold_is_bright: false,
        }
    }
}

impl RenderOptions {
    /// The scale factor with invalid values replaced by 1.
    pub fn effective_scale_factor(&self) -> f32 {
        if self.scale_factor.is_finite() && self.scale_factor > 0.0 {
            self.scale_factor
        } else {
            1.0
        }
    }

    /// Applies `update`, keeping current values for fields left `None`.
    ///
    /// An invalid scale factor is rejected with a fallback to 1 and a
    /// warning, rather than poisoning later renders.
    pub fn merge(&mut self, update: OptionsUpdate) {
        if let Some(scale) = update.scale_factor {
            if scale.is_finite() && scale > 0.0 {
                self.scale_factor = scale;
            } else {
                log::warn!("invalid scale_factor {scale}, falling back to 1");
                self.scale_factor = 1.0;
            }
        }
        if let Some(show_cursor) = update.show_cursor {
            self.show_cursor = show_cursor;
        }
        if let Some(bold_is_bright) = update.bold_is_bright {
            self.bold_is_bright = bold_is_bright;
        }
    }
}

/// A partial [`RenderOptions`] change; `None` fields are left untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionsUpdate {
    pub scale_factor: Option<f32>,
    pub show_cursor: Option<bool>,
    pub bold_is_bright: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = RenderOptions::default();
        assert_eq!(options.scale_factor, 1.0);
        assert!(options.show_cursor);
        assert!(!options.bold_is_bright);
    }

    #[test]
    fn merge_keeps_unset_fields() {
        let mut options = RenderOptions::default();
        options.merge(OptionsUpdate {
            show_cursor: Some(false),
            ..OptionsUpdate::default()
        });
        assert!(!options.show_cursor);
        assert_eq!(options.scale_factor, 1.0);
        assert!(!options.bold_is_bright);
    }

    #[test]
    fn merge_rejects_invalid_scale() {
        for bad in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let mut options = RenderOptions {
                scale_factor: 2.0,
                ..RenderOptions::default()
            };
            options.merge(OptionsUpdate {
                scale_factor: Some(bad),
                ..OptionsUpdate::default()
            });
            assert_eq!(options.scale_factor, 1.0, "bad scale {bad}");
        }
    }

    #[test]
    fn effective_scale_guards_direct_construction() {
        let options = RenderOptions {
            scale_factor: f32::NAN,
            ..RenderOptions::default()
        };
        assert_eq!(options.effective_scale_factor(), 1.0);
        let options = RenderOptions {
            scale_factor: 1.5,
            ..RenderOptions::default()
        };
        assert_eq!(options.effective_scale_factor(), 1.5);
    }

    #[test]
    fn update_deserializes_partial_json() {
        let update: OptionsUpdate =
            serde_json::from_str(r#"{"scale_factor": 2.0}"#).unwrap();
        assert_eq!(update.scale_factor, Some(2.0));
        assert_eq!(update.show_cursor, None);
    }
}
