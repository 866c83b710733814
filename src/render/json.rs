//! JSON rendering for extraction output.

use serde::Serialize;

use crate::error::Result;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize an extraction, stats block or layout report to JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value)?,
        JsonFormat::Compact => serde_json::to_string(value)?,
    };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{Extraction, ExtractionStats, LayoutReport};

    #[test]
    fn test_to_json_pretty() {
        let extraction = Extraction::new("Hello".to_string(), ExtractionStats::new());
        let json = to_json(&extraction, JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"text\""));
        assert!(json.contains("Hello"));
        assert!(json.contains('\n')); // Pretty has newlines
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&LayoutReport::default(), JsonFormat::Compact).unwrap();
        assert_eq!(json, r#"{"pages":[]}"#);
    }

    #[test]
    fn test_layout_serializes_tagged() {
        use crate::layout::ColumnLayout;
        let json = to_json(
            &ColumnLayout::MultiColumn { divider_x: 75.0 },
            JsonFormat::Compact,
        )
        .unwrap();
        assert_eq!(json, r#"{"type":"multi_column","divider_x":75.0}"#);
    }
}
