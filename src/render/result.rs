//! Extraction result with statistics.

use serde::{Deserialize, Serialize};

use crate::assemble::PageOutput;
use crate::normalize::{BULLET_PREFIX, HEADING_PREFIX};

/// Result of extracting a document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Extraction {
    /// The normalized document text
    pub text: String,

    /// Character count of `text` (Unicode scalar values)
    pub char_count: usize,

    /// Extraction statistics
    pub stats: ExtractionStats,
}

impl Extraction {
    /// Create a result from text and statistics.
    pub fn new(text: String, stats: ExtractionStats) -> Self {
        let char_count = text.chars().count();
        Self {
            text,
            char_count,
            stats,
        }
    }

    /// Create an empty result.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check if the text is long enough to be worth using.
    ///
    /// Callers should reject extractions below their threshold and ask for
    /// the text some other way.
    pub fn is_usable(&self, min_chars: usize) -> bool {
        self.char_count >= min_chars
    }

    /// Check if the text is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Statistics collected during extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Pages handed to the engine
    pub page_count: u32,

    /// Pages that produced text
    pub emitted_pages: u32,

    /// Pages skipped because they produced no text
    pub skipped_pages: u32,

    /// Pages classified as multi-column
    pub multi_column_pages: u32,

    /// Assembled lines
    pub line_count: u32,

    /// Paragraph breaks from vertical gaps
    pub paragraph_breaks: u32,

    /// Block breaks from font size jumps
    pub heading_breaks: u32,

    /// Output lines starting with a bullet
    pub bullet_count: u32,

    /// Output lines starting with a numbered marker
    pub numbered_count: u32,

    /// Output lines tagged as headings
    pub heading_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Characters other than whitespace
    pub non_whitespace_chars: u32,
}

impl ExtractionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page's layout decisions.
    pub fn add_page(&mut self, page: &PageOutput) {
        self.page_count += 1;
        if page.is_blank() {
            self.skipped_pages += 1;
        } else {
            self.emitted_pages += 1;
        }
        if page.layout.is_multi_column() {
            self.multi_column_pages += 1;
        }
        self.line_count += page.counts.lines as u32;
        self.paragraph_breaks += page.counts.paragraphs as u32;
        self.heading_breaks += page.counts.headings as u32;
    }

    /// Add line-marker, word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        for line in text.lines() {
            if line.starts_with(BULLET_PREFIX) {
                self.bullet_count += 1;
            } else if line.starts_with(HEADING_PREFIX) {
                self.heading_count += 1;
            } else if is_numbered(line) {
                self.numbered_count += 1;
            }
        }

        self.word_count += text.split_whitespace().count() as u32;
        self.non_whitespace_chars += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &ExtractionStats) {
        self.page_count += other.page_count;
        self.emitted_pages += other.emitted_pages;
        self.skipped_pages += other.skipped_pages;
        self.multi_column_pages += other.multi_column_pages;
        self.line_count += other.line_count;
        self.paragraph_breaks += other.paragraph_breaks;
        self.heading_breaks += other.heading_breaks;
        self.bullet_count += other.bullet_count;
        self.numbered_count += other.numbered_count;
        self.heading_count += other.heading_count;
        self.word_count += other.word_count;
        self.non_whitespace_chars += other.non_whitespace_chars;
    }
}

/// `N. ` at line start.
fn is_numbered(line: &str) -> bool {
    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    digits > 0 && line[digits..].starts_with(". ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{BreakCounts, ColumnLayout};

    #[test]
    fn test_extraction_is_usable() {
        let extraction = Extraction::new("x".repeat(50), ExtractionStats::new());
        assert_eq!(extraction.char_count, 50);
        assert!(extraction.is_usable(50));
        assert!(!extraction.is_usable(51));

        let empty = Extraction::empty();
        assert!(empty.is_empty());
        assert!(!empty.is_usable(1));
        assert!(empty.is_usable(0));
    }

    #[test]
    fn test_char_count_is_unicode_aware() {
        let extraction = Extraction::new("• é".to_string(), ExtractionStats::new());
        assert_eq!(extraction.char_count, 3);
    }

    #[test]
    fn test_count_text() {
        let mut stats = ExtractionStats::new();
        stats.count_text("## SKILLS\n\n• Rust\n• Go\n1. First\n   a. sub\n10. Tenth\n3.5 years");

        assert_eq!(stats.heading_count, 1);
        assert_eq!(stats.bullet_count, 2);
        assert_eq!(stats.numbered_count, 2);
        assert_eq!(stats.word_count, 14);
        assert_eq!(stats.non_whitespace_chars, 44);
    }

    #[test]
    fn test_char_counts_differ_on_whitespace() {
        let mut stats = ExtractionStats::new();
        stats.count_text("• é");
        let extraction = Extraction::new("• é".to_string(), stats);
        assert_eq!(extraction.char_count, 3);
        assert_eq!(extraction.stats.non_whitespace_chars, 2);
    }

    #[test]
    fn test_add_page() {
        let mut stats = ExtractionStats::new();
        let page = PageOutput {
            text: "a".to_string(),
            layout: ColumnLayout::MultiColumn { divider_x: 40.0 },
            counts: BreakCounts {
                lines: 3,
                paragraphs: 1,
                ..Default::default()
            },
            main_fragments: 2,
            sidebar_fragments: 1,
        };
        stats.add_page(&page);
        stats.add_page(&PageOutput {
            text: String::new(),
            layout: ColumnLayout::SingleColumn,
            counts: BreakCounts::default(),
            main_fragments: 0,
            sidebar_fragments: 0,
        });

        assert_eq!(stats.page_count, 2);
        assert_eq!(stats.emitted_pages, 1);
        assert_eq!(stats.skipped_pages, 1);
        assert_eq!(stats.multi_column_pages, 1);
        assert_eq!(stats.line_count, 3);
        assert_eq!(stats.paragraph_breaks, 1);
    }

    #[test]
    fn test_extraction_stats_merge() {
        let mut stats1 = ExtractionStats {
            page_count: 2,
            bullet_count: 3,
            ..Default::default()
        };
        let stats2 = ExtractionStats {
            page_count: 1,
            heading_count: 4,
            non_whitespace_chars: 10,
            ..Default::default()
        };

        stats1.merge(&stats2);

        assert_eq!(stats1.page_count, 3);
        assert_eq!(stats1.non_whitespace_chars, 10);
        assert_eq!(stats1.bullet_count, 3);
        assert_eq!(stats1.heading_count, 4);
    }
}
