//! Document-level types.

use super::{Page, PageSelection};
use serde::{Deserialize, Serialize};

/// A decoded document made of positioned pages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Pages in document order
    pub pages: Vec<Page>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document from pages.
    pub fn from_pages(pages: Vec<Page>) -> Self {
        Self { pages }
    }

    /// Get the number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Get a page by number (1-indexed).
    pub fn get_page(&self, page_num: u32) -> Option<&Page> {
        if page_num == 0 {
            return None;
        }
        self.pages.get((page_num - 1) as usize)
    }

    /// Add a page to the document.
    pub fn add_page(&mut self, page: Page) {
        self.pages.push(page);
    }

    /// Check if the document has any pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// 1-indexed numbers of the pages a selection keeps.
    pub fn selected_page_numbers(&self, selection: &PageSelection) -> Vec<u32> {
        (1..=self.page_count())
            .filter(|n| selection.includes(*n))
            .collect()
    }

    /// Keep only the selected pages, preserving order.
    pub fn select(self, selection: &PageSelection) -> Self {
        if matches!(selection, PageSelection::All) {
            return self;
        }
        let pages = self
            .pages
            .into_iter()
            .enumerate()
            .filter(|(i, _)| selection.includes(*i as u32 + 1))
            .map(|(_, page)| page)
            .collect();
        Self { pages }
    }
}

/// What an external decoder hands to the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceDocument {
    /// Positioned fragments per page (PDF-style decoders).
    Positioned(Document),
    /// A single flat text stream (DOCX-style decoders); only normalization applies.
    Flat(String),
}

impl SourceDocument {
    /// Number of pages, counting a flat stream as one page.
    pub fn page_count(&self) -> u32 {
        match self {
            SourceDocument::Positioned(doc) => doc.page_count(),
            SourceDocument::Flat(_) => 1,
        }
    }
}

impl From<Document> for SourceDocument {
    fn from(doc: Document) -> Self {
        SourceDocument::Positioned(doc)
    }
}

impl From<Vec<Page>> for SourceDocument {
    fn from(pages: Vec<Page>) -> Self {
        SourceDocument::Positioned(Document::from_pages(pages))
    }
}

impl From<String> for SourceDocument {
    fn from(text: String) -> Self {
        SourceDocument::Flat(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TextFragment;

    fn page(text: &str) -> Page {
        Page::with_width(200.0, vec![TextFragment::new(0.0, 0.0, text)])
    }

    #[test]
    fn test_document_pages() {
        let mut doc = Document::new();
        assert!(doc.is_empty());
        doc.add_page(page("one"));
        doc.add_page(page("two"));
        assert_eq!(doc.page_count(), 2);
        assert!(doc.get_page(0).is_none());
        assert_eq!(doc.get_page(2).unwrap().fragments[0].text, "two");
        assert!(doc.get_page(3).is_none());
    }

    #[test]
    fn test_document_select() {
        let doc = Document::from_pages(vec![page("a"), page("b"), page("c")]);
        let selection = PageSelection::Pages(vec![1, 3]);
        assert_eq!(doc.selected_page_numbers(&selection), vec![1, 3]);
        let selected = doc.select(&selection);
        assert_eq!(selected.page_count(), 2);
        assert_eq!(selected.pages[1].fragments[0].text, "c");
    }

    #[test]
    fn test_source_document_conversions() {
        let src: SourceDocument = vec![page("a")].into();
        assert_eq!(src.page_count(), 1);
        let flat: SourceDocument = String::from("plain").into();
        assert!(matches!(flat, SourceDocument::Flat(_)));
    }
}
