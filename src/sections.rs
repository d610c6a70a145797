//! Phase 2: Section Tokenizer
//!
//! Splits the normalized line stream into named section blocks. A section
//! opens at a `[name]` header and runs until the next header or end of
//! input. Whole-line comments (`#` or `;` in column zero) are dropped;
//! blank lines are kept in the body so the block tokenizer can apply its
//! continuation-run rules to them.

use crate::error::{ParseError, Result};
use crate::scanner::Line;

/// One `[name]` section paired with its body lines, not yet block-tokenized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionBlock {
    pub name: String,
    pub lines: Vec<Line>,
}

/// True for whole-line comments: `#` or `;` as the very first character.
/// Indented markers are content, not comments.
fn is_comment(line: &Line) -> bool {
    matches!(line.text.as_bytes().first(), Some(b'#') | Some(b';'))
}

/// True for `[name]` headers. Malformed header-ish lines (only one of the
/// brackets) are not recognized here; they fall through to the block
/// tokenizer as content and fail key/value parsing there.
fn header_name(line: &Line) -> Option<&str> {
    let t = line.text.as_str();
    if t.len() >= 2 && t.starts_with('[') && t.ends_with(']') {
        Some(&t[1..t.len() - 1])
    } else {
        None
    }
}

/// Split normalized lines into section blocks.
///
/// The first significant line (not blank, not a comment) must be a section
/// header; a key/value line before any header is an error at that line.
pub fn split_sections(lines: &[Line]) -> Result<Vec<SectionBlock>> {
    let mut sections: Vec<SectionBlock> = Vec::new();

    for line in lines {
        if is_comment(line) {
            continue;
        }

        if let Some(name) = header_name(line) {
            sections.push(SectionBlock {
                name: name.to_string(),
                lines: Vec::new(),
            });
            continue;
        }

        match sections.last_mut() {
            Some(section) => section.lines.push(line.clone()),
            None => {
                // Content before the first header.
                if !line.is_blank() {
                    return Err(ParseError::at(line.number, &line.text));
                }
            }
        }
    }

    Ok(sections)
}
