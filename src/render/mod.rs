//! Output types: extraction results, statistics and layout reports.

mod json;
mod report;
mod result;

pub use json::{to_json, JsonFormat};
pub use report::{LayoutReport, PageLayoutReport};
pub use result::{Extraction, ExtractionStats};
