//! Layout reconstruction for positioned fragments.
//!
//! Turns an unordered bag of fragments into column text: column
//! classification and splitting, line grouping by y, left-to-right line
//! assembly, and paragraph/heading breaks from vertical gaps and font size
//! changes.

mod column;
mod config;
mod line;
mod paragraph;

pub use column::{classify, split_columns, split_page, ColumnLayout, ColumnSplit, ZoneCounts};
pub use config::{LayoutConfig, MIN_USABLE_CHARS};
pub use line::{assemble_line, group_lines, Line};
pub use paragraph::{
    assemble_column, assemble_column_with_counts, AssembledColumn, BreakCounts, LineBreak,
};
