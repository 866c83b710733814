//! Page-level types.

use super::TextFragment;
use serde::{Deserialize, Serialize};

/// Page width used when the decoder does not report one.
///
/// The value is unit-less and matches the coordinate scale of the decoder the
/// layout thresholds were calibrated against.
pub const DEFAULT_PAGE_WIDTH: f64 = 50.0;

/// A single page of positioned fragments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Page width in decoder units
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,

    /// Page height in decoder units
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,

    /// Text fragments, in no particular order
    #[serde(default)]
    pub fragments: Vec<TextFragment>,
}

impl Page {
    /// Create a page from fragments, discarding blank ones.
    pub fn new(width: Option<f64>, fragments: Vec<TextFragment>) -> Self {
        let mut page = Self {
            width,
            height: None,
            fragments,
        };
        page.discard_blank_fragments();
        page
    }

    /// Create a page with a known width.
    pub fn with_width(width: f64, fragments: Vec<TextFragment>) -> Self {
        Self::new(Some(width), fragments)
    }

    /// Add a fragment to the page. Blank fragments are ignored.
    pub fn add_fragment(&mut self, fragment: TextFragment) {
        if !fragment.is_blank() {
            self.fragments.push(fragment);
        }
    }

    /// Drop fragments that contain only whitespace.
    pub fn discard_blank_fragments(&mut self) {
        self.fragments.retain(|f| !f.is_blank());
    }

    /// Width used for layout decisions.
    pub fn effective_width(&self) -> f64 {
        match self.width {
            Some(w) if w.is_finite() => w,
            _ => DEFAULT_PAGE_WIDTH,
        }
    }

    /// Check if the page has no fragments.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Get the number of fragments on the page.
    pub fn fragment_count(&self) -> usize {
        self.fragments.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_new_discards_blank() {
        let page = Page::with_width(
            200.0,
            vec![
                TextFragment::new(0.0, 0.0, "Hello"),
                TextFragment::new(5.0, 0.0, "   "),
                TextFragment::new(9.0, 0.0, ""),
            ],
        );
        assert_eq!(page.fragment_count(), 1);
    }

    #[test]
    fn test_effective_width_fallback() {
        let page = Page::new(None, vec![]);
        assert_eq!(page.effective_width(), DEFAULT_PAGE_WIDTH);
        assert!(page.is_empty());

        let page = Page::with_width(612.0, vec![]);
        assert_eq!(page.effective_width(), 612.0);
    }

    #[test]
    fn test_add_fragment_ignores_blank() {
        let mut page = Page::default();
        page.add_fragment(TextFragment::new(0.0, 0.0, "\n"));
        page.add_fragment(TextFragment::new(0.0, 0.0, "Skills"));
        assert_eq!(page.fragment_count(), 1);
    }

    #[test]
    fn test_page_deserialize_without_width() {
        let page: Page =
            serde_json::from_str(r#"{"fragments":[{"x":1,"y":1,"text":"a"}]}"#).unwrap();
        assert!(page.width.is_none());
        assert_eq!(page.fragment_count(), 1);
    }
}
