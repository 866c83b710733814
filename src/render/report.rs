//! Per-page layout report.

use serde::{Deserialize, Serialize};

use crate::assemble::PageOutput;
use crate::layout::{BreakCounts, ColumnLayout};

/// Layout decisions for one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageLayoutReport {
    /// Page number in the source document (1-indexed)
    pub page: u32,
    /// Fragments on the page
    pub fragments: usize,
    /// Column classification
    pub layout: ColumnLayout,
    /// Fragments in the main column
    pub main_fragments: usize,
    /// Fragments in the sidebar
    pub sidebar_fragments: usize,
    /// Break counts
    pub breaks: BreakCounts,
    /// Characters of normalized page text
    pub chars: usize,
    /// Whether the page was left out of the document text
    pub skipped: bool,
}

impl PageLayoutReport {
    /// Build a report entry from a page's assembly output.
    pub fn from_output(page: u32, output: &PageOutput) -> Self {
        Self {
            page,
            fragments: output.main_fragments + output.sidebar_fragments,
            layout: output.layout,
            main_fragments: output.main_fragments,
            sidebar_fragments: output.sidebar_fragments,
            breaks: output.counts,
            chars: output.text.chars().count(),
            skipped: output.is_blank(),
        }
    }
}

/// Layout decisions for a whole document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutReport {
    /// One entry per processed page
    pub pages: Vec<PageLayoutReport>,
}

impl LayoutReport {
    /// Build a report from page outputs and their source page numbers.
    pub fn from_outputs(page_numbers: &[u32], outputs: &[PageOutput]) -> Self {
        let pages = page_numbers
            .iter()
            .zip(outputs)
            .map(|(page, output)| PageLayoutReport::from_output(*page, output))
            .collect();
        Self { pages }
    }

    /// Number of pages classified as multi-column.
    pub fn multi_column_pages(&self) -> usize {
        self.pages
            .iter()
            .filter(|p| p.layout.is_multi_column())
            .count()
    }
}
