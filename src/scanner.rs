//! Phase 1: Line Normalizer
//!
//! The normalizer converts raw source text into numbered lines. It performs:
//! - Splitting on `\n` boundaries
//! - Trailing-whitespace stripping
//! - Zero-based numbering of every physical line, blanks included
//!
//! This phase has no error conditions; all validation happens downstream.

/// A single physical line after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// Zero-based line number for error reporting.
    pub number: usize,
    /// Content with trailing whitespace removed.
    pub text: String,
}

impl Line {
    /// True if the line is empty or whitespace-only.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// The line's indentation level.
    pub fn indent(&self) -> usize {
        count_indent(&self.text)
    }
}

/// Normalize source text into numbered lines.
pub fn scan(source: &str) -> Vec<Line> {
    source
        .split('\n')
        .enumerate()
        .map(|(number, text)| Line {
            number,
            text: text.trim_end().to_string(),
        })
        .collect()
}

/// Count the number of leading spaces in a line.
///
/// Only the space character counts: a tab-indented line has indent 0.
pub fn count_indent(line: &str) -> usize {
    line.bytes().take_while(|&b| b == b' ').count()
}
