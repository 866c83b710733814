//! Column layout classification and splitting.
//!
//! Résumé-style pages often carry a narrow sidebar next to the main column.
//! The classifier only has fragment x positions to go on, so it counts how
//! many fragments sit in a left zone and a right zone of the page and calls
//! the page multi-column when both zones are populated and not wildly
//! unbalanced. Sidebars usually hold far fewer items than the main column,
//! which is why the balance threshold is low.

use serde::{Deserialize, Serialize};

use super::LayoutConfig;
use crate::model::TextFragment;

/// Result of column classification for one page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ColumnLayout {
    /// The whole page is one column
    SingleColumn,
    /// The page splits at `divider_x`
    MultiColumn {
        /// Fragments left of this x belong to the sidebar
        divider_x: f64,
    },
}

impl ColumnLayout {
    /// Check if the page was classified as multi-column.
    pub fn is_multi_column(&self) -> bool {
        matches!(self, ColumnLayout::MultiColumn { .. })
    }

    /// Divider position, if any.
    pub fn divider(&self) -> Option<f64> {
        match self {
            ColumnLayout::SingleColumn => None,
            ColumnLayout::MultiColumn { divider_x } => Some(*divider_x),
        }
    }
}

/// Fragment counts in the left and right classification zones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ZoneCounts {
    /// Fragments with `x < mid * left_zone_ratio`
    pub left: usize,
    /// Fragments with `x > mid * right_zone_ratio`
    pub right: usize,
}

impl ZoneCounts {
    /// Count fragments per zone. The zones overlap in the middle of the page.
    pub fn count(fragments: &[TextFragment], page_width: f64, config: &LayoutConfig) -> Self {
        let mid = page_width / 2.0;
        let left_limit = mid * config.left_zone_ratio;
        let right_limit = mid * config.right_zone_ratio;

        let left = fragments.iter().filter(|f| f.x < left_limit).count();
        let right = fragments.iter().filter(|f| f.x > right_limit).count();

        Self { left, right }
    }

    /// `min / max` of the two counts, or 0 when both are empty.
    pub fn balance(&self) -> f64 {
        let max = self.left.max(self.right);
        if max == 0 {
            return 0.0;
        }
        self.left.min(self.right) as f64 / max as f64
    }
}

/// Decide whether a page is single- or multi-column.
pub fn classify(fragments: &[TextFragment], page_width: f64, config: &LayoutConfig) -> ColumnLayout {
    let counts = ZoneCounts::count(fragments, page_width, config);
    let balance = counts.balance();

    log::debug!(
        "Column zones: left={}, right={}, balance={:.3}, page_width={:.1}",
        counts.left,
        counts.right,
        balance,
        page_width
    );

    // The absolute minimums keep small pages single-column.
    if counts.left <= config.min_column_fragments
        || counts.right <= config.min_column_fragments
        || balance <= config.column_balance_ratio
    {
        return ColumnLayout::SingleColumn;
    }

    let divider_x = find_divider(fragments, page_width / 2.0, config);
    log::debug!("Multi-column page, divider at x={:.2}", divider_x);

    ColumnLayout::MultiColumn { divider_x }
}

/// Find the column divider: the midpoint of the widest gap between adjacent
/// sorted x positions that straddles the search window.
fn find_divider(fragments: &[TextFragment], mid: f64, config: &LayoutConfig) -> f64 {
    let mut xs: Vec<f64> = fragments.iter().map(|f| f.x).collect();
    xs.sort_by(|a, b| a.total_cmp(b));

    let lower_bound = mid * config.divider_search_ratio;
    let mut best_gap = 0.0;
    let mut divider = None;

    for pair in xs.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if a < mid && b > lower_bound {
            let gap = b - a;
            if gap > best_gap {
                best_gap = gap;
                divider = Some((a + b) / 2.0);
            }
        }
    }

    divider.unwrap_or_else(|| {
        log::debug!("No divider gap found, using fallback");
        mid * config.divider_fallback_ratio
    })
}

/// A page's fragments partitioned by column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnSplit {
    /// Primary content: the right column, or the whole page
    pub main: Vec<TextFragment>,
    /// Sidebar content: the left column, empty on single-column pages
    pub sidebar: Vec<TextFragment>,
}

/// Partition fragments at `divider_x`: left is `x < divider_x`, right is the rest.
pub fn split_columns(fragments: &[TextFragment], divider_x: f64) -> ColumnSplit {
    let (sidebar, main): (Vec<TextFragment>, Vec<TextFragment>) = fragments
        .iter()
        .cloned()
        .partition(|f| f.x < divider_x);
    ColumnSplit { main, sidebar }
}

/// Apply a classification to a page's fragments.
pub fn split_page(fragments: &[TextFragment], layout: ColumnLayout) -> ColumnSplit {
    match layout {
        ColumnLayout::SingleColumn => ColumnSplit {
            main: fragments.to_vec(),
            sidebar: Vec::new(),
        },
        ColumnLayout::MultiColumn { divider_x } => split_columns(fragments, divider_x),
    }
}
