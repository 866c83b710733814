//! Text normalization pipeline.
//!
//! Assembled column text goes through an ordered list of named rewrite rules
//! that canonicalize line endings, bullets, list markers, headings and
//! whitespace. The result is a best-effort reconstruction aid for downstream
//! parsing, not a faithful re-rendering of the source.
//!
//! Running the default pipeline twice gives the same result as running it
//! once.

pub mod rules;

use serde::{Deserialize, Serialize};

pub use rules::{BULLET_PREFIX, HEADING_PREFIX, SUBLIST_INDENT};

/// Options for text normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeOptions {
    /// Compose text to Unicode NFC before the other rules
    pub unicode_nfc: bool,
}

impl NormalizeOptions {
    /// Create default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable NFC composition.
    pub fn with_nfc(mut self, enabled: bool) -> Self {
        self.unicode_nfc = enabled;
        self
    }
}

/// A named rewrite pass.
#[derive(Clone, Copy)]
pub struct Rule {
    name: &'static str,
    apply: fn(&str) -> String,
}

impl Rule {
    /// Create a rule from a name and a rewrite function.
    pub const fn new(name: &'static str, apply: fn(&str) -> String) -> Self {
        Self { name, apply }
    }

    /// Rule name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Run the rule.
    pub fn apply(&self, text: &str) -> String {
        (self.apply)(text)
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Rule").field(&self.name).finish()
    }
}

/// Compose to NFC.
pub const UNICODE_NFC: Rule = Rule::new("unicode_nfc", rules::unicode_nfc);
/// Unify line endings to `\n`.
pub const LINE_ENDINGS: Rule = Rule::new("line_endings", rules::normalize_line_endings);
/// Canonical `"• "` bullets.
pub const BULLETS: Rule = Rule::new("bullets", rules::canonicalize_bullets);
/// Canonical `"N. "` numbered items.
pub const NUMBERED_ITEMS: Rule = Rule::new("numbered_items", rules::canonicalize_numbered_items);
/// Canonical indented `"   a. "` lettered items.
pub const LETTERED_ITEMS: Rule = Rule::new("lettered_items", rules::canonicalize_lettered_items);
/// `## ` markers on all-caps lines.
pub const HEADINGS: Rule = Rule::new("headings", rules::tag_headings);
/// Single spaces.
pub const WHITESPACE: Rule = Rule::new("whitespace", rules::collapse_whitespace);
/// At most one blank line in a row.
pub const BLANK_LINES: Rule = Rule::new("blank_lines", rules::collapse_blank_lines);
/// Trimmed lines and document.
pub const TRIM_LINES: Rule = Rule::new("trim_lines", rules::trim_lines);

/// The default rule order. Number rules run before letter rules, and both
/// before heading tagging, so a marker is never mistaken for a heading.
pub const DEFAULT_RULES: [Rule; 8] = [
    LINE_ENDINGS,
    BULLETS,
    NUMBERED_ITEMS,
    LETTERED_ITEMS,
    HEADINGS,
    WHITESPACE,
    BLANK_LINES,
    TRIM_LINES,
];

/// Ordered normalization pipeline.
#[derive(Debug, Clone)]
pub struct NormalizePipeline {
    rules: Vec<Rule>,
}

impl NormalizePipeline {
    /// Create a pipeline for the given options.
    pub fn new(options: &NormalizeOptions) -> Self {
        let mut rules = Vec::with_capacity(DEFAULT_RULES.len() + 1);
        if options.unicode_nfc {
            rules.push(UNICODE_NFC);
        }
        rules.extend_from_slice(&DEFAULT_RULES);
        Self { rules }
    }

    /// Create a pipeline from an explicit rule list.
    pub fn with_rules(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Rule names in execution order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(Rule::name).collect()
    }

    /// Run every rule in order.
    pub fn process(&self, text: &str) -> String {
        let mut result = text.to_string();
        for rule in &self.rules {
            result = rule.apply(&result);
        }
        result
    }
}

impl Default for NormalizePipeline {
    fn default() -> Self {
        Self::new(&NormalizeOptions::default())
    }
}

/// Normalize text with the default pipeline.
///
/// # Example
///
/// ```
/// let text = pagetext::normalize("- Led team of 5\nWORK EXPERIENCE\nAcme  Corp");
/// assert_eq!(text, "• Led team of 5\n\n## WORK EXPERIENCE\n\nAcme Corp");
/// ```
pub fn normalize(text: &str) -> String {
    NormalizePipeline::default().process(text)
}

/// Normalize text with custom options.
pub fn normalize_with(text: &str, options: &NormalizeOptions) -> String {
    NormalizePipeline::new(options).process(text)
}
