//! Layout thresholds and engine configuration.
//!
//! Every threshold is expressed in the decoder's coordinate units. The
//! defaults were calibrated against one decoder's convention and are not
//! physical constants; re-tune them when the fragment source changes.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::normalize::NormalizeOptions;

/// Minimum character count a caller should accept as a usable extraction.
pub const MIN_USABLE_CHARS: usize = 50;

/// Tunable thresholds for column, line and paragraph reconstruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Quantization step for grouping fragments into lines by y
    pub line_tolerance: f64,

    /// Fragments with `x < mid * left_zone_ratio` count towards the left column
    pub left_zone_ratio: f64,

    /// Fragments with `x > mid * right_zone_ratio` count towards the right column
    pub right_zone_ratio: f64,

    /// Both columns need strictly more fragments than this
    pub min_column_fragments: usize,

    /// Minimum `min(left, right) / max(left, right)` for a multi-column page
    pub column_balance_ratio: f64,

    /// A divider gap must end right of `mid * divider_search_ratio`
    pub divider_search_ratio: f64,

    /// Divider used when no qualifying gap exists, as a fraction of `mid`
    pub divider_fallback_ratio: f64,

    /// Estimated width of one character when the decoder reports no width
    pub char_width_factor: f64,

    /// Horizontal gap above which a space separates two fragments
    pub word_gap: f64,

    /// Vertical gap above which a paragraph break is emitted
    pub paragraph_gap: f64,

    /// Vertical gap above which a line break is emitted
    pub line_gap: f64,

    /// Font size growth ratio that starts a new block
    pub heading_size_ratio: f64,

    /// Character count below which the caller should treat extraction as failed
    pub min_usable_chars: usize,

    /// Process pages in parallel
    pub parallel: bool,

    /// Text normalization options
    pub normalize: NormalizeOptions,
}

impl LayoutConfig {
    /// Create a configuration with default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the line grouping tolerance.
    pub fn with_line_tolerance(mut self, tolerance: f64) -> Self {
        self.line_tolerance = tolerance;
        self
    }

    /// Set the column zone ratios.
    pub fn with_column_zones(mut self, left: f64, right: f64) -> Self {
        self.left_zone_ratio = left;
        self.right_zone_ratio = right;
        self
    }

    /// Set the minimum fragment count per column.
    pub fn with_min_column_fragments(mut self, count: usize) -> Self {
        self.min_column_fragments = count;
        self
    }

    /// Set the column balance ratio.
    pub fn with_column_balance(mut self, ratio: f64) -> Self {
        self.column_balance_ratio = ratio;
        self
    }

    /// Set the paragraph and line break gaps.
    pub fn with_gaps(mut self, paragraph_gap: f64, line_gap: f64) -> Self {
        self.paragraph_gap = paragraph_gap;
        self.line_gap = line_gap;
        self
    }

    /// Set the heading font size ratio.
    pub fn with_heading_ratio(mut self, ratio: f64) -> Self {
        self.heading_size_ratio = ratio;
        self
    }

    /// Set the character width estimate.
    pub fn with_char_width(mut self, factor: f64) -> Self {
        self.char_width_factor = factor;
        self
    }

    /// Set the minimum usable character count.
    pub fn with_min_usable_chars(mut self, chars: usize) -> Self {
        self.min_usable_chars = chars;
        self
    }

    /// Enable or disable parallel page processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel page processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set normalization options.
    pub fn with_normalize(mut self, options: NormalizeOptions) -> Self {
        self.normalize = options;
        self
    }

    /// Check that every threshold is in range.
    ///
    /// The engine stays total on out-of-range values, but the output is
    /// meaningless, so user-supplied configuration should go through here.
    pub fn validate(&self) -> Result<()> {
        if !(self.line_tolerance.is_finite() && self.line_tolerance > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "line_tolerance must be a positive number, got {}",
                self.line_tolerance
            )));
        }

        let ratios = [
            ("left_zone_ratio", self.left_zone_ratio),
            ("right_zone_ratio", self.right_zone_ratio),
            ("column_balance_ratio", self.column_balance_ratio),
            ("divider_search_ratio", self.divider_search_ratio),
            ("divider_fallback_ratio", self.divider_fallback_ratio),
            ("char_width_factor", self.char_width_factor),
            ("word_gap", self.word_gap),
            ("paragraph_gap", self.paragraph_gap),
            ("line_gap", self.line_gap),
        ];
        for (name, value) in ratios {
            if !(value.is_finite() && value >= 0.0) {
                return Err(Error::InvalidConfig(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        if !(self.heading_size_ratio.is_finite() && self.heading_size_ratio > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "heading_size_ratio must be a positive number, got {}",
                self.heading_size_ratio
            )));
        }

        if self.line_gap > self.paragraph_gap {
            return Err(Error::InvalidConfig(format!(
                "line_gap ({}) must not exceed paragraph_gap ({})",
                self.line_gap, self.paragraph_gap
            )));
        }

        Ok(())
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            line_tolerance: 0.3,
            left_zone_ratio: 0.7,
            right_zone_ratio: 0.5,
            min_column_fragments: 5,
            column_balance_ratio: 0.15,
            divider_search_ratio: 0.3,
            divider_fallback_ratio: 0.4,
            char_width_factor: 0.1,
            word_gap: 0.5,
            paragraph_gap: 1.5,
            line_gap: 0.8,
            heading_size_ratio: 1.2,
            min_usable_chars: MIN_USABLE_CHARS,
            parallel: true,
            normalize: NormalizeOptions::default(),
        }
    }
}
