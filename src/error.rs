//! Error types for zini parsing.

use thiserror::Error;

/// Result type for zini parsing operations.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Error raised when a document fails to parse.
///
/// There is a single terminal error kind: every failure, structural,
/// syntactic, or semantic, carries the zero-based number and exact text of
/// the line it was detected on, plus an optional detail line for
/// value-specific failures (for example the underlying calendar message
/// when a well-shaped datetime names an impossible date).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("error in line {line}: {text:?}{}", .detail.as_ref().map(|d| format!("\n{d}")).unwrap_or_default())]
pub struct ParseError {
    /// Zero-based physical line number.
    pub line: usize,
    /// The offending line, trailing whitespace already stripped.
    pub text: String,
    /// Optional human-readable detail.
    pub detail: Option<String>,
}

impl ParseError {
    /// Error at a line, with no detail.
    pub fn at(line: usize, text: &str) -> Self {
        Self {
            line,
            text: text.to_string(),
            detail: None,
        }
    }

    /// Error at a line, with a detail message.
    pub fn with_detail(line: usize, text: &str, detail: impl Into<String>) -> Self {
        Self {
            line,
            text: text.to_string(),
            detail: Some(detail.into()),
        }
    }
}

/// Error raised when declaring an inconsistent scheme entry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("default value of kind {actual} does not match declared kind {declared}")]
pub struct SchemeError {
    /// The declared expected kind, rendered.
    pub declared: String,
    /// The default value's kind, rendered.
    pub actual: String,
}

/// Error surface of the file-reading convenience.
#[derive(Error, Debug)]
pub enum ZiniError {
    /// The file could not be read.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The file's content failed to parse.
    #[error(transparent)]
    Parse(#[from] ParseError),
}
