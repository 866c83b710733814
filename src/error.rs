//! Error types for the pagetext library.
//!
//! The layout engine itself never fails: every stage is a total function over
//! fragment input. Errors only come from the surfaces around it, such as
//! reading input files, decoding fragment dumps and validating configuration.

use std::io;
use thiserror::Error;

/// Result type alias for pagetext operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading input or configuring the engine.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The fragment dump is not valid JSON or does not match the page schema.
    #[error("Invalid fragment JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The input is neither a fragment dump nor UTF-8 text.
    #[error("Unknown input format: expected a JSON fragment dump or UTF-8 text")]
    UnknownFormat,

    /// A layout threshold is out of its valid range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Malformed page range string.
    #[error("Invalid page range: {0}")]
    InvalidPageRange(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}
