//! Page and document assembly.
//!
//! Runs the layout stages and the normalizer for each page, then joins the
//! page texts. Pages are independent, so documents are processed in parallel
//! with rayon unless the configuration asks for sequential processing.

use rayon::prelude::*;

use crate::layout::{
    assemble_column_with_counts, classify, group_lines, split_page, BreakCounts, ColumnLayout,
    LayoutConfig,
};
use crate::model::{Page, TextFragment};
use crate::normalize::NormalizePipeline;

/// Separator between consecutive emitted pages.
pub const PAGE_SEPARATOR: &str = "\n\n---\n\n";

/// Separator between the main column and the sidebar of a page.
pub const SIDEBAR_SEPARATOR: &str = "\n\n--- Sidebar ---\n\n";

/// Output of assembling one page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageOutput {
    /// Normalized page text, main column first
    pub text: String,
    /// Column classification of the page
    pub layout: ColumnLayout,
    /// Break counts over both columns
    pub counts: BreakCounts,
    /// Fragments assigned to the main column
    pub main_fragments: usize,
    /// Fragments assigned to the sidebar
    pub sidebar_fragments: usize,
}

impl PageOutput {
    /// Whether the page produced no text and is skipped in the document.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

fn column_text(
    fragments: &[TextFragment],
    config: &LayoutConfig,
    pipeline: &NormalizePipeline,
    counts: &mut BreakCounts,
) -> String {
    let lines = group_lines(fragments, config);
    let column = assemble_column_with_counts(&lines, config);
    counts.merge(&column.counts);
    pipeline.process(&column.text)
}

/// Assemble one page into normalized text.
pub fn assemble_page(page: &Page, config: &LayoutConfig) -> PageOutput {
    let pipeline = NormalizePipeline::new(&config.normalize);
    assemble_page_with(page, config, &pipeline)
}

fn assemble_page_with(
    page: &Page,
    config: &LayoutConfig,
    pipeline: &NormalizePipeline,
) -> PageOutput {
    let fragments: Vec<TextFragment> = page
        .fragments
        .iter()
        .filter(|f| !f.is_blank())
        .cloned()
        .collect();

    let layout = classify(&fragments, page.effective_width(), config);
    let split = split_page(&fragments, layout);

    let mut counts = BreakCounts::default();
    let main = column_text(&split.main, config, pipeline, &mut counts);
    let sidebar = column_text(&split.sidebar, config, pipeline, &mut counts);

    let text = match (main.is_empty(), sidebar.is_empty()) {
        (_, true) => main,
        (true, false) => sidebar,
        (false, false) => format!("{}{}{}", main, SIDEBAR_SEPARATOR, sidebar),
    };

    PageOutput {
        text,
        layout,
        counts,
        main_fragments: split.main.len(),
        sidebar_fragments: split.sidebar.len(),
    }
}

/// Assemble every page, keeping page order.
pub fn assemble_pages(pages: &[Page], config: &LayoutConfig) -> Vec<PageOutput> {
    let pipeline = NormalizePipeline::new(&config.normalize);

    if config.parallel && pages.len() > 1 {
        pages
            .par_iter()
            .map(|page| assemble_page_with(page, config, &pipeline))
            .collect()
    } else {
        pages
            .iter()
            .map(|page| assemble_page_with(page, config, &pipeline))
            .collect()
    }
}

/// Join page outputs with [`PAGE_SEPARATOR`], skipping blank pages.
pub fn join_pages(outputs: &[PageOutput]) -> String {
    outputs
        .iter()
        .filter(|output| !output.is_blank())
        .map(|output| output.text.as_str())
        .collect::<Vec<_>>()
        .join(PAGE_SEPARATOR)
}

/// Assemble a whole document into one string. No pages gives an empty string.
pub fn assemble_document(pages: &[Page], config: &LayoutConfig) -> String {
    let outputs = assemble_pages(pages, config);
    let text = join_pages(&outputs);
    log::debug!(
        "Assembled {} pages ({} emitted), {} chars",
        pages.len(),
        outputs.iter().filter(|o| !o.is_blank()).count(),
        text.len()
    );
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sidebar_page() -> Page {
        let mut frags = Vec::new();
        for (i, word) in ["Skills", "Rust", "Go", "Python", "Docker", "Linux", "Git"]
            .iter()
            .enumerate()
        {
            frags.push(TextFragment::new(5.0, i as f64 * 2.0, *word));
        }
        for (i, word) in [
            "Experience",
            "Acme",
            "Globex",
            "Initech",
            "Umbrella",
            "Hooli",
            "Stark",
        ]
        .iter()
        .enumerate()
        {
            frags.push(TextFragment::new(120.0, i as f64 * 2.0, *word));
        }
        Page::with_width(200.0, frags)
    }

    #[test]
    fn test_multi_column_page_main_first() {
        let output = assemble_page(&sidebar_page(), &LayoutConfig::default());
        assert!(output.layout.is_multi_column());
        assert_eq!(output.main_fragments, 7);
        assert_eq!(output.sidebar_fragments, 7);
        assert_eq!(
            output.text,
            "Experience\n\nAcme\n\nGlobex\n\nInitech\n\nUmbrella\n\nHooli\n\nStark\
             \n\n--- Sidebar ---\n\n\
             Skills\n\nRust\n\nGo\n\nPython\n\nDocker\n\nLinux\n\nGit"
        );
    }

    #[test]
    fn test_single_column_page() {
        let page = Page::with_width(
            200.0,
            vec![
                TextFragment::new(10.0, 10.0, "Experienced"),
                TextFragment::new(90.0, 10.0, "engineer."),
                TextFragment::new(10.0, 40.0, "Skills:"),
            ],
        );
        let output = assemble_page(&page, &LayoutConfig::default());
        assert_eq!(output.layout, ColumnLayout::SingleColumn);
        assert_eq!(output.text, "Experienced engineer.\n\nSkills:");
        assert_eq!(output.counts.paragraphs, 1);
    }

    #[test]
    fn test_page_normalizes_bullets() {
        let page = Page::with_width(200.0, vec![TextFragment::new(10.0, 10.0, "- Led team of 5")]);
        let output = assemble_page(&page, &LayoutConfig::default());
        assert_eq!(output.text, "• Led team of 5");
    }

    #[test]
    fn test_document_skips_empty_pages() {
        let pages = vec![
            Page::with_width(200.0, vec![TextFragment::new(0.0, 0.0, "first")]),
            Page::with_width(200.0, vec![]),
            Page::with_width(200.0, vec![TextFragment::new(0.0, 0.0, "second")]),
        ];
        let text = assemble_document(&pages, &LayoutConfig::default());
        assert_eq!(text, "first\n\n---\n\nsecond");
    }

    #[test]
    fn test_document_empty() {
        assert_eq!(assemble_document(&[], &LayoutConfig::default()), "");
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let pages: Vec<Page> = (0..8)
            .map(|i| {
                Page::with_width(
                    200.0,
                    vec![
                        TextFragment::new(0.0, 0.0, format!("page {}", i)),
                        TextFragment::new(0.0, 5.0, "body"),
                    ],
                )
            })
            .collect();
        let parallel = assemble_document(&pages, &LayoutConfig::default());
        let sequential = assemble_document(&pages, &LayoutConfig::default().sequential());
        assert_eq!(parallel, sequential);
        assert!(parallel.starts_with("page 0"));
    }
}
