//! Individual rewrite passes of the normalization pipeline.
//!
//! Each pass is a pure `&str -> String` function. "Horizontal whitespace"
//! below means any Unicode whitespace except `\n`, which is the same set
//! `str::trim` removes, so a pass never leaves behind whitespace that a later
//! `trim` would treat differently.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use unicode_normalization::UnicodeNormalization;

/// Canonical bullet prefix.
pub const BULLET_PREFIX: &str = "• ";

/// Indent placed before lettered sub-items.
pub const SUBLIST_INDENT: &str = "   ";

/// Heading marker inserted before all-caps lines.
pub const HEADING_PREFIX: &str = "## ";

static BULLET_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[^\S\n]*[•●○◦▪▸►‣⁃∙·\-–—][^\S\n]*").expect("bullet pattern is valid")
});

static NUMBER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[^\S\n]*(\d+)[.)](?:[^\S\n]+|$|(\p{L}))").expect("number pattern is valid")
});

// `a.` directly followed by a letter is an abbreviation ("e.g.", "J.R."); only `a)` is a marker there.
static LETTER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[^\S\n]*([A-Za-z])(?:[.)](?:[^\S\n]+|$)|\)(\p{L}))")
        .expect("letter pattern is valid")
});

static HSPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\S\n]+").expect("whitespace pattern is valid"));

static BLANK_LINES_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n(?:[^\S\n]*\n){2,}").expect("blank line pattern is valid"));

/// Compose to Unicode NFC.
pub fn unicode_nfc(text: &str) -> String {
    text.nfc().collect()
}

/// `\r\n` and lone `\r` become `\n`.
pub fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// A bullet glyph or leading dash at line start becomes `"• "`.
pub fn canonicalize_bullets(text: &str) -> String {
    BULLET_RE.replace_all(text, BULLET_PREFIX).into_owned()
}

/// `1)`, `1.` at line start become `"1. "`.
///
/// The marker must be followed by whitespace, a letter or the end of the
/// line, so `3.5 years` is left alone.
pub fn canonicalize_numbered_items(text: &str) -> String {
    NUMBER_RE.replace_all(text, "${1}. ${2}").into_owned()
}

/// `a)`, `B.` at line start become an indented `"   a. "`.
pub fn canonicalize_lettered_items(text: &str) -> String {
    LETTER_RE
        .replace_all(text, |caps: &Captures| {
            let rest = caps.get(2).map_or("", |m| m.as_str());
            format!("{}{}. {}", SUBLIST_INDENT, caps[1].to_ascii_lowercase(), rest)
        })
        .into_owned()
}

/// Whether a trimmed line looks like an all-caps section heading.
///
/// Only uppercase letters, whitespace and `&` are allowed; the line must start
/// with a letter and be at least two characters long.
pub fn is_heading_line(line: &str) -> bool {
    let mut chars = line.chars();
    let first_is_upper = chars
        .next()
        .map(|c| c.is_alphabetic() && c.is_uppercase())
        .unwrap_or(false);

    first_is_upper
        && line.chars().count() >= 2
        && chars.all(|c| (c.is_alphabetic() && c.is_uppercase()) || c.is_whitespace() || c == '&')
}

/// All-caps lines become `"\n## LINE\n"`.
pub fn tag_headings(text: &str) -> String {
    text.split('\n')
        .map(|line| {
            let trimmed = line.trim();
            if is_heading_line(trimmed) {
                format!("\n{}{}\n", HEADING_PREFIX, trimmed)
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Split a canonical sub-item line into its indent and the rest.
fn split_sublist_indent(line: &str) -> (&str, &str) {
    if let Some(rest) = line.strip_prefix(SUBLIST_INDENT) {
        let mut chars = rest.chars();
        let letter = chars.next().map(|c| c.is_ascii_lowercase()).unwrap_or(false);
        let dot = chars.next() == Some('.');
        let after = chars.next();
        if letter && dot && (after.is_none() || after == Some(' ')) {
            return (SUBLIST_INDENT, rest);
        }
    }
    ("", line)
}

/// Runs of horizontal whitespace become one space; newlines are kept.
pub fn collapse_whitespace(text: &str) -> String {
    text.split('\n')
        .map(|line| {
            let (indent, rest) = split_sublist_indent(line);
            format!("{}{}", indent, HSPACE_RE.replace_all(rest, " "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Three or more consecutive newlines become two. Whitespace-only lines count as blank.
pub fn collapse_blank_lines(text: &str) -> String {
    BLANK_LINES_RE.replace_all(text, "\n\n").into_owned()
}

/// Trim every line and the document, keeping sub-item indents.
pub fn trim_lines(text: &str) -> String {
    let joined = text
        .split('\n')
        .map(|line| {
            let (indent, rest) = split_sublist_indent(line);
            if indent.is_empty() {
                line.trim().to_string()
            } else {
                format!("{}{}", indent, rest.trim_end())
            }
        })
        .collect::<Vec<_>>()
        .join("\n");

    joined.trim_end().trim_start_matches('\n').to_string()
}
