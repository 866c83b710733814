//! Line grouping and line text assembly.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use super::LayoutConfig;
use crate::model::{TextFragment, DEFAULT_FONT_SIZE};

/// Fragments judged to lie on the same visual line.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// Quantized y used as the grouping key
    pub y_bucket: f64,
    /// Fragments sorted left to right
    pub fragments: Vec<TextFragment>,
}

impl Line {
    /// Mean font size of the line's fragments.
    pub fn avg_font_size(&self) -> f64 {
        if self.fragments.is_empty() {
            return DEFAULT_FONT_SIZE;
        }
        self.fragments.iter().map(|f| f.font_size).sum::<f64>() / self.fragments.len() as f64
    }

    /// Assembled text of the line.
    pub fn text(&self, config: &LayoutConfig) -> String {
        assemble_line(&self.fragments, config)
    }
}

/// Total reading order within a line: x, then y, then text.
fn reading_order(a: &TextFragment, b: &TextFragment) -> Ordering {
    a.x.total_cmp(&b.x)
        .then_with(|| a.y.total_cmp(&b.y))
        .then_with(|| a.text.cmp(&b.text))
}

/// Group fragments into lines, top of page first.
///
/// Each fragment is keyed by `round(y / tolerance)`; fragments sharing a key
/// form one line. Decoders jitter baselines by sub-unit amounts, so two
/// neighbouring buckets are also merged when their facing fragments are
/// closer than the tolerance, which keeps a jittered line from splitting at a
/// bucket boundary. The result does not depend on input order.
pub fn group_lines(fragments: &[TextFragment], config: &LayoutConfig) -> Vec<Line> {
    let tolerance = config.line_tolerance;

    let mut buckets: BTreeMap<i64, Vec<TextFragment>> = BTreeMap::new();
    for fragment in fragments.iter().filter(|f| !f.is_blank()) {
        // `as` saturates on overflow and maps NaN to 0.
        let key = (fragment.y / tolerance).round() as i64;
        buckets.entry(key).or_default().push(fragment.clone());
    }

    let mut lines: Vec<Line> = Vec::new();
    let mut current: Option<(Line, f64)> = None;

    for (key, bucket) in buckets {
        let min_y = bucket.iter().map(|f| f.y).fold(f64::INFINITY, f64::min);
        let max_y = bucket.iter().map(|f| f.y).fold(f64::NEG_INFINITY, f64::max);

        match current.as_mut() {
            Some((line, line_max_y)) if min_y - *line_max_y < tolerance => {
                line.fragments.extend(bucket);
                *line_max_y = line_max_y.max(max_y);
            }
            _ => {
                if let Some((line, _)) = current.take() {
                    lines.push(line);
                }
                let line = Line {
                    y_bucket: key as f64 * tolerance,
                    fragments: bucket,
                };
                current = Some((line, max_y));
            }
        }
    }
    if let Some((line, _)) = current {
        lines.push(line);
    }

    for line in &mut lines {
        line.fragments.sort_by(reading_order);
    }

    log::trace!(
        "Grouped {} fragments into {} lines",
        fragments.len(),
        lines.len()
    );

    lines
}

/// Join a line's fragments left to right.
///
/// Glyph widths are not part of the fragment model, so the right edge of a
/// fragment is estimated from its character count unless the decoder
/// reported a width. A space goes between two fragments only when the gap
/// exceeds `word_gap`; closer fragments are concatenated, which rejoins words
/// that decoders split into several runs.
pub fn assemble_line(fragments: &[TextFragment], config: &LayoutConfig) -> String {
    let mut ordered: Vec<&TextFragment> = fragments.iter().collect();
    ordered.sort_by(|a, b| reading_order(a, b));

    let mut result = String::new();
    let mut last_x_end: Option<f64> = None;

    for fragment in ordered {
        if let Some(end) = last_x_end {
            if fragment.x - end > config.word_gap {
                result.push(' ');
            }
        }
        result.push_str(&fragment.text);
        last_x_end = Some(fragment.x_end(config.char_width_factor));
    }

    result.trim().to_string()
}
