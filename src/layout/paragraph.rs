//! Paragraph and section assembly for one column.

use serde::{Deserialize, Serialize};

use super::{Line, LayoutConfig};

/// How two adjacent lines of a column are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineBreak {
    /// Same visual line split by the decoder: joined with a space
    Continue,
    /// Same paragraph, next visual line
    NewLine,
    /// Large vertical jump: new block
    NewParagraph,
    /// Font size jump: new heading-like block
    NewHeading,
}

impl LineBreak {
    /// Classify the boundary between the previous line and the current one.
    ///
    /// A font size jump wins over the gap, so a larger line right below body
    /// text still opens a new block.
    pub fn between(
        last_y: f64,
        last_font_size: f64,
        y: f64,
        font_size: f64,
        config: &LayoutConfig,
    ) -> Self {
        let gap = y - last_y;
        if font_size > last_font_size * config.heading_size_ratio {
            LineBreak::NewHeading
        } else if gap > config.paragraph_gap {
            LineBreak::NewParagraph
        } else if gap > config.line_gap {
            LineBreak::NewLine
        } else {
            LineBreak::Continue
        }
    }

    /// Text inserted before the current line.
    pub fn separator(&self) -> &'static str {
        match self {
            LineBreak::Continue => " ",
            LineBreak::NewLine => "\n",
            LineBreak::NewParagraph | LineBreak::NewHeading => "\n\n",
        }
    }
}

/// Break counts collected while assembling a column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakCounts {
    /// Non-empty lines emitted
    pub lines: usize,
    /// Lines joined with a space
    pub continued: usize,
    /// Line breaks inside a paragraph
    pub line_breaks: usize,
    /// Breaks caused by a vertical gap
    pub paragraphs: usize,
    /// Breaks caused by a font size jump
    pub headings: usize,
}

impl BreakCounts {
    fn record(&mut self, brk: LineBreak) {
        match brk {
            LineBreak::Continue => self.continued += 1,
            LineBreak::NewLine => self.line_breaks += 1,
            LineBreak::NewParagraph => self.paragraphs += 1,
            LineBreak::NewHeading => self.headings += 1,
        }
    }

    /// Add another column's counts.
    pub fn merge(&mut self, other: &BreakCounts) {
        self.lines += other.lines;
        self.continued += other.continued;
        self.line_breaks += other.line_breaks;
        self.paragraphs += other.paragraphs;
        self.headings += other.headings;
    }
}

/// Text of one column with the decisions that produced it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssembledColumn {
    /// Raw (not yet normalized) column text
    pub text: String,
    /// Break statistics
    pub counts: BreakCounts,
}

/// Assemble lines (sorted top to bottom) into column text.
pub fn assemble_column(lines: &[Line], config: &LayoutConfig) -> String {
    assemble_column_with_counts(lines, config).text
}

/// Assemble lines into column text, also returning break counts.
pub fn assemble_column_with_counts(lines: &[Line], config: &LayoutConfig) -> AssembledColumn {
    let mut text = String::new();
    let mut counts = BreakCounts::default();
    let mut last: Option<(f64, f64)> = None;

    for line in lines {
        let line_text = line.text(config);
        if line_text.is_empty() {
            continue;
        }

        let y = line.y_bucket;
        let font_size = line.avg_font_size();

        if let Some((last_y, last_font_size)) = last {
            let brk = LineBreak::between(last_y, last_font_size, y, font_size, config);
            log::trace!(
                "y={:.2} gap={:.2} font={:.1} -> {:?}",
                y,
                y - last_y,
                font_size,
                brk
            );
            counts.record(brk);
            text.push_str(brk.separator());
        }

        text.push_str(&line_text);
        counts.lines += 1;
        last = Some((y, font_size));
    }

    AssembledColumn { text, counts }
}
