//! Input format detection.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Input formats the loaders understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// A JSON dump of positioned fragments per page
    FragmentJson,
    /// A flat UTF-8 text stream
    PlainText,
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputFormat::FragmentJson => write!(f, "fragment JSON"),
            InputFormat::PlainText => write!(f, "plain text"),
        }
    }
}

/// Bytes read from a file to sniff its format.
const SNIFF_LEN: usize = 4096;

/// Detect the input format from a file path.
///
/// A known extension decides; otherwise the start of the file is sniffed.
///
/// # Example
/// ```no_run
/// use pagetext::detect::detect_format_from_path;
///
/// let format = detect_format_from_path("resume.json").unwrap();
/// println!("Input: {}", format);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<InputFormat> {
    let path = path.as_ref();
    if let Some(format) = format_from_extension(path) {
        return Ok(format);
    }

    let file = File::open(path)?;
    let mut header = Vec::with_capacity(SNIFF_LEN);
    BufReader::new(file)
        .take(SNIFF_LEN as u64)
        .read_to_end(&mut header)?;
    detect_format_from_bytes(&header)
}

/// Input format implied by the file extension, if it is a known one.
pub fn format_from_extension(path: &Path) -> Option<InputFormat> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "json" => Some(InputFormat::FragmentJson),
        "txt" | "text" | "md" => Some(InputFormat::PlainText),
        _ => None,
    }
}

/// Detect the input format from the first bytes of the input.
///
/// Input whose first non-whitespace byte opens a JSON array or object is
/// fragment JSON; other UTF-8 is plain text. Empty, whitespace-only and
/// non-UTF-8 input is rejected with [`Error::UnknownFormat`].
pub fn detect_format_from_bytes(data: &[u8]) -> Result<InputFormat> {
    let text = match std::str::from_utf8(data) {
        Ok(text) => text,
        // A sniffed prefix may end inside a multi-byte character.
        Err(e) if e.error_len().is_none() && e.valid_up_to() > 0 => {
            std::str::from_utf8(&data[..e.valid_up_to()]).map_err(|_| Error::UnknownFormat)?
        }
        Err(_) => return Err(Error::UnknownFormat),
    };

    let text = text.trim_start_matches('\u{feff}');
    match text.trim_start().chars().next() {
        None => Err(Error::UnknownFormat),
        Some('[') | Some('{') => Ok(InputFormat::FragmentJson),
        Some(_) => Ok(InputFormat::PlainText),
    }
}

/// Check if bytes look like a fragment JSON dump.
pub fn is_fragment_json(data: &[u8]) -> bool {
    matches!(detect_format_from_bytes(data), Ok(InputFormat::FragmentJson))
}
