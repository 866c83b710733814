//! # pagetext
//!
//! Reading-order text reconstruction from positioned text fragments.
//!
//! Document decoders hand out text as an unordered bag of fragments with x/y
//! positions. This library rebuilds readable, normalized plain text from
//! them: it detects sidebar layouts, groups fragments into lines, joins lines
//! into paragraphs and sections, and canonicalizes bullets, list markers,
//! headings and whitespace.
//!
//! ## Quick Start
//!
//! ```
//! use pagetext::{extract, LayoutConfig, Page, SourceDocument, TextFragment};
//!
//! let page = Page::with_width(
//!     200.0,
//!     vec![
//!         TextFragment::new(90.0, 10.0, "engineer."),
//!         TextFragment::new(10.0, 10.0, "Experienced"),
//!         TextFragment::new(10.0, 40.0, "- Rust"),
//!     ],
//! );
//! let source = SourceDocument::from(vec![page]);
//! let extraction = extract(&source, &LayoutConfig::default());
//! assert_eq!(extraction.text, "Experienced engineer.\n\n• Rust");
//! ```
//!
//! ## Features
//!
//! - **Sidebar detection**: two-column pages emit the main column first
//! - **Line and paragraph reconstruction** from vertical gaps and font sizes
//! - **Normalization pipeline**: bullets, numbered and lettered lists, headings
//! - **Parallel processing**: pages are assembled with Rayon
//! - **Flat text input**: text-stream decoders go through normalization only

pub mod assemble;
pub mod detect;
pub mod error;
pub mod layout;
pub mod model;
pub mod normalize;
pub mod render;

// Re-export commonly used types
pub use assemble::{
    assemble_document, assemble_page, PageOutput, PAGE_SEPARATOR, SIDEBAR_SEPARATOR,
};
pub use detect::{detect_format_from_bytes, detect_format_from_path, InputFormat};
pub use error::{Error, Result};
pub use layout::{ColumnLayout, LayoutConfig, MIN_USABLE_CHARS};
pub use model::{Document, Page, PageSelection, SourceDocument, TextFragment};
pub use normalize::{normalize, normalize_with, NormalizeOptions};
pub use render::{Extraction, ExtractionStats, JsonFormat, LayoutReport};

use serde::Deserialize;
use std::fmt::Display;
use std::io::Read;
use std::path::Path;

/// Fragment dump layouts accepted by [`parse_pages_json`].
#[derive(Deserialize)]
#[serde(untagged)]
enum PagesJson {
    List(Vec<Page>),
    Wrapped { pages: Vec<Page> },
}

/// Parse a fragment dump: a JSON array of pages, or an object with a
/// `pages` array. Blank fragments are discarded.
///
/// # Example
///
/// ```
/// let pages = pagetext::parse_pages_json(
///     r#"[{"width": 200, "fragments": [{"x": 10, "y": 10, "text": "Hello"}]}]"#,
/// )
/// .unwrap();
/// assert_eq!(pages[0].fragments[0].font_size, 12.0);
/// ```
pub fn parse_pages_json(json: &str) -> Result<Vec<Page>> {
    let parsed: PagesJson = serde_json::from_str(json)?;
    let mut pages = match parsed {
        PagesJson::List(pages) | PagesJson::Wrapped { pages } => pages,
    };
    for page in &mut pages {
        page.discard_blank_fragments();
    }
    Ok(pages)
}

fn decode(data: &[u8], format: InputFormat) -> Result<SourceDocument> {
    let text = std::str::from_utf8(data).map_err(|_| Error::UnknownFormat)?;
    let text = text.trim_start_matches('\u{feff}');
    match format {
        InputFormat::FragmentJson => Ok(SourceDocument::from(parse_pages_json(text)?)),
        InputFormat::PlainText => Ok(SourceDocument::Flat(text.to_string())),
    }
}

/// Load an input file.
///
/// # Example
///
/// ```no_run
/// use pagetext::load_file;
///
/// let source = load_file("resume.json").unwrap();
/// println!("Pages: {}", source.page_count());
/// ```
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<SourceDocument> {
    let path = path.as_ref();
    let data = std::fs::read(path)?;
    let format = match detect::format_from_extension(path) {
        Some(format) => format,
        None => detect_format_from_bytes(&data)?,
    };
    log::debug!("Loading {} as {}", path.display(), format);
    decode(&data, format)
}

/// Load input from bytes, sniffing the format.
pub fn load_bytes(data: &[u8]) -> Result<SourceDocument> {
    let format = detect_format_from_bytes(data)?;
    decode(data, format)
}

/// Load input from a reader.
pub fn load_reader<R: Read>(mut reader: R) -> Result<SourceDocument> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    load_bytes(&data)
}

/// Reconstruct text from a source document.
///
/// Positioned pages go through the layout stages and normalization; flat
/// text goes through normalization only. This never fails: an empty
/// document gives an empty extraction.
pub fn extract(source: &SourceDocument, config: &LayoutConfig) -> Extraction {
    let mut stats = ExtractionStats::new();

    let text = match source {
        SourceDocument::Positioned(doc) => {
            let outputs = assemble::assemble_pages(&doc.pages, config);
            for output in &outputs {
                stats.add_page(output);
            }
            assemble::join_pages(&outputs)
        }
        SourceDocument::Flat(raw) => {
            let text = normalize_with(raw, &config.normalize);
            stats.page_count = 1;
            if text.is_empty() {
                stats.skipped_pages = 1;
            } else {
                stats.emitted_pages = 1;
            }
            text
        }
    };

    stats.count_text(&text);
    Extraction::new(text, stats)
}

/// Reconstruct text from a decoder result, treating a decoder failure as an
/// empty document.
///
/// The failure is logged and the caller sees an extraction that fails
/// [`Extraction::is_usable`].
pub fn extract_or_empty<E: Display>(
    decoded: std::result::Result<Vec<Page>, E>,
    config: &LayoutConfig,
) -> Extraction {
    match decoded {
        Ok(pages) => extract(&SourceDocument::from(pages), config),
        Err(e) => {
            log::warn!("Decoder failed, treating document as empty: {}", e);
            Extraction::empty()
        }
    }
}

/// Load a file and reconstruct its text with default settings.
///
/// # Example
///
/// ```no_run
/// let text = pagetext::extract_text("resume.json").unwrap();
/// println!("{}", text);
/// ```
pub fn extract_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let source = load_file(path)?;
    Ok(extract(&source, &LayoutConfig::default()).text)
}

/// Load a file and reconstruct its text without blocking the async runtime.
#[cfg(feature = "async")]
pub async fn extract_file_async<P: AsRef<Path>>(
    path: P,
    config: LayoutConfig,
) -> Result<Extraction> {
    let path = path.as_ref().to_path_buf();
    let data = tokio::fs::read(&path).await?;
    let format = detect::format_from_extension(&path);

    tokio::task::spawn_blocking(move || -> Result<Extraction> {
        let format = match format {
            Some(format) => format,
            None => detect_format_from_bytes(&data)?,
        };
        let source = decode(&data, format)?;
        Ok(extract(&source, &config))
    })
    .await
    .map_err(|e| Error::Other(format!("extraction task failed: {}", e)))?
}

/// Builder for loading and reconstructing documents.
///
/// # Example
///
/// ```no_run
/// use pagetext::{PageSelection, Pagetext};
///
/// let extraction = Pagetext::new()
///     .sequential()
///     .with_pages(PageSelection::Range(1..=2))
///     .extract_file("resume.json")?;
/// if !extraction.is_usable(50) {
///     eprintln!("Not enough text, paste it manually");
/// }
/// # Ok::<(), pagetext::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Pagetext {
    config: LayoutConfig,
    pages: PageSelection,
}

impl Pagetext {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the layout configuration.
    pub fn with_config(mut self, config: LayoutConfig) -> Self {
        self.config = config;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.config = self.config.sequential();
        self
    }

    /// Set the minimum usable character count.
    pub fn with_min_chars(mut self, chars: usize) -> Self {
        self.config = self.config.with_min_usable_chars(chars);
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.pages = pages;
        self
    }

    /// Enable NFC composition before normalization.
    pub fn with_nfc(mut self, enabled: bool) -> Self {
        let options = self.config.normalize.clone().with_nfc(enabled);
        self.config = self.config.with_normalize(options);
        self
    }

    /// Get the layout configuration.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Check if an extraction meets the configured minimum.
    pub fn is_usable(&self, extraction: &Extraction) -> bool {
        extraction.is_usable(self.config.min_usable_chars)
    }

    fn select(&self, source: SourceDocument) -> SourceDocument {
        match source {
            SourceDocument::Positioned(doc) => SourceDocument::Positioned(doc.select(&self.pages)),
            flat => flat,
        }
    }

    /// Reconstruct text from an already decoded source.
    pub fn extract_source(&self, source: SourceDocument) -> Extraction {
        extract(&self.select(source), &self.config)
    }

    /// Load and reconstruct a file.
    pub fn extract_file<P: AsRef<Path>>(&self, path: P) -> Result<Extraction> {
        Ok(self.extract_source(load_file(path)?))
    }

    /// Load and reconstruct bytes.
    pub fn extract_bytes(&self, data: &[u8]) -> Result<Extraction> {
        Ok(self.extract_source(load_bytes(data)?))
    }

    /// Per-page layout decisions for a source. Flat text has no layout.
    pub fn layout_report(&self, source: SourceDocument) -> LayoutReport {
        match source {
            SourceDocument::Positioned(doc) => {
                let numbers = doc.selected_page_numbers(&self.pages);
                let doc = doc.select(&self.pages);
                let outputs = assemble::assemble_pages(&doc.pages, &self.config);
                LayoutReport::from_outputs(&numbers, &outputs)
            }
            SourceDocument::Flat(_) => LayoutReport::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGES_JSON: &str = r#"[
        {"width": 200, "fragments": [
            {"x": 10, "y": 10, "text": "Experienced"},
            {"x": 90, "y": 10, "text": "engineer."},
            {"x": 10, "y": 40, "text": "Skills:"},
            {"x": 50, "y": 40, "text": "  "}
        ]},
        {"width": 200, "fragments": [{"x": 10, "y": 10, "text": "Page two"}]}
    ]"#;

    #[test]
    fn test_parse_pages_json_array() {
        let pages = parse_pages_json(PAGES_JSON).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].fragment_count(), 3);
        assert_eq!(pages[0].width, Some(200.0));
    }

    #[test]
    fn test_parse_pages_json_wrapped() {
        let pages = parse_pages_json(r#"{"pages": [{"fragments": []}]}"#).unwrap();
        assert_eq!(pages.len(), 1);
        assert!(pages[0].is_empty());
    }

    #[test]
    fn test_parse_pages_json_invalid() {
        assert!(matches!(parse_pages_json("[1, 2]"), Err(Error::Json(_))));
        assert!(matches!(parse_pages_json("not json"), Err(Error::Json(_))));
    }

    #[test]
    fn test_load_bytes_json_and_text() {
        let source = load_bytes(PAGES_JSON.as_bytes()).unwrap();
        assert_eq!(source.page_count(), 2);

        let source = load_bytes(b"- plain item").unwrap();
        assert_eq!(source, SourceDocument::Flat("- plain item".to_string()));
    }

    #[test]
    fn test_load_bytes_empty() {
        assert!(matches!(load_bytes(b""), Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_load_reader() {
        let source = load_reader(std::io::Cursor::new(PAGES_JSON)).unwrap();
        assert_eq!(source.page_count(), 2);
    }

    #[test]
    fn test_extract_positioned() {
        let source = load_bytes(PAGES_JSON.as_bytes()).unwrap();
        let extraction = extract(&source, &LayoutConfig::default());
        assert_eq!(
            extraction.text,
            "Experienced engineer.\n\nSkills:\n\n---\n\nPage two"
        );
        assert_eq!(extraction.stats.page_count, 2);
        assert_eq!(extraction.stats.emitted_pages, 2);
        assert_eq!(extraction.stats.paragraph_breaks, 1);
    }

    #[test]
    fn test_extract_flat() {
        let source = SourceDocument::Flat("WORK EXPERIENCE\r\n-  Led team".to_string());
        let extraction = extract(&source, &LayoutConfig::default());
        assert_eq!(extraction.text, "## WORK EXPERIENCE\n\n• Led team");
        assert_eq!(extraction.stats.heading_count, 1);
        assert_eq!(extraction.stats.bullet_count, 1);
    }

    #[test]
    fn test_extract_or_empty_on_failure() {
        let decoded: std::result::Result<Vec<Page>, String> = Err("corrupt stream".to_string());
        let extraction = extract_or_empty(decoded, &LayoutConfig::default());
        assert!(extraction.is_empty());
        assert!(!extraction.is_usable(MIN_USABLE_CHARS));
    }

    #[test]
    fn test_extract_or_empty_on_success() {
        let decoded: std::result::Result<Vec<Page>, String> = Ok(vec![]);
        let extraction = extract_or_empty(decoded, &LayoutConfig::default());
        assert_eq!(extraction.text, "");
        assert_eq!(extraction.char_count, 0);
    }

    #[test]
    fn test_pagetext_builder() {
        let builder = Pagetext::new()
            .sequential()
            .with_min_chars(10)
            .with_nfc(true)
            .with_pages(PageSelection::Pages(vec![2]));

        assert!(!builder.config().parallel);
        assert_eq!(builder.config().min_usable_chars, 10);
        assert!(builder.config().normalize.unicode_nfc);
    }

    #[test]
    fn test_pagetext_page_selection() {
        let extraction = Pagetext::new()
            .with_pages(PageSelection::Pages(vec![2]))
            .extract_bytes(PAGES_JSON.as_bytes())
            .unwrap();
        assert_eq!(extraction.text, "Page two");
        assert_eq!(extraction.stats.page_count, 1);
    }

    #[test]
    fn test_pagetext_usable_threshold() {
        let builder = Pagetext::new().with_min_chars(5);
        let extraction = builder.extract_bytes(b"short text").unwrap();
        assert!(builder.is_usable(&extraction));

        let builder = Pagetext::new();
        assert!(!builder.is_usable(&extraction));
    }

    #[test]
    fn test_pagetext_layout_report() {
        let source = load_bytes(PAGES_JSON.as_bytes()).unwrap();
        let report = Pagetext::new().layout_report(source);
        assert_eq!(report.pages.len(), 2);
        assert_eq!(report.pages[0].fragments, 3);
        assert_eq!(report.multi_column_pages(), 0);

        let flat = Pagetext::new().layout_report(SourceDocument::Flat("x".to_string()));
        assert!(flat.pages.is_empty());
    }

    #[test]
    fn test_pagetext_layout_report_keeps_source_page_numbers() {
        let source = load_bytes(PAGES_JSON.as_bytes()).unwrap();
        let report = Pagetext::new()
            .with_pages(PageSelection::parse("2").unwrap())
            .layout_report(source);
        assert_eq!(report.pages.len(), 1);
        assert_eq!(report.pages[0].page, 2);
        assert_eq!(report.pages[0].fragments, 1);
    }

    #[test]
    fn test_pagetext_invalid_bytes() {
        let result = Pagetext::new().extract_bytes(&[0xFF, 0xFE, 0x00]);
        assert!(result.is_err());
    }
}
