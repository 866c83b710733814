//! Positioned text fragments.

use serde::{Deserialize, Serialize};

/// Font size assumed when the decoder cannot report one.
pub const DEFAULT_FONT_SIZE: f64 = 12.0;

fn default_font_size() -> f64 {
    DEFAULT_FONT_SIZE
}

/// One atomic run of decoded text on a page.
///
/// Coordinates use a top-left origin in decoder units: `y` grows towards the
/// bottom of the page. The unit scale is decoder-defined but consistent within
/// a document. A fragment carries no reading-order information of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextFragment {
    /// X position (left edge)
    pub x: f64,

    /// Y position (top-left origin)
    pub y: f64,

    /// Decoded text content
    pub text: String,

    /// Nominal font size of the run
    #[serde(default = "default_font_size")]
    pub font_size: f64,

    /// Advance width reported by the decoder, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
}

impl TextFragment {
    /// Create a fragment with the default font size.
    pub fn new(x: f64, y: f64, text: impl Into<String>) -> Self {
        Self {
            x,
            y,
            text: text.into(),
            font_size: DEFAULT_FONT_SIZE,
            width: None,
        }
    }

    /// Set the font size. Non-finite or non-positive sizes fall back to the default.
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = if font_size.is_finite() && font_size > 0.0 {
            font_size
        } else {
            DEFAULT_FONT_SIZE
        };
        self
    }

    /// Set the decoder-reported advance width.
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    /// Whether the fragment has no visible text.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Number of characters in the fragment text.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Approximate right edge of the fragment.
    ///
    /// Uses the reported width when present, otherwise `char_count * char_width`.
    pub fn x_end(&self, char_width: f64) -> f64 {
        match self.width {
            Some(w) if w.is_finite() && w >= 0.0 => self.x + w,
            _ => self.x + self.char_count() as f64 * char_width,
        }
    }
}
