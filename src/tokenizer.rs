//! Phase 3: Block Tokenizer
//!
//! Groups one section's body lines into tokens. A token is a single
//! key/value line, optionally followed by a contiguous run of more-indented
//! continuation lines (a nested block, as used by list values). The run's
//! indentation level is fixed by its first line; anything shallower than
//! that but deeper than the token's own line is an indentation error.

use crate::error::{ParseError, Result};
use crate::scanner::Line;

/// One logical key/value entry: the entry line plus its continuation lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    lines: Vec<Line>,
}

impl Token {
    /// The token's first line, which carries the `key = value` pattern.
    pub fn first(&self) -> &Line {
        &self.lines[0]
    }

    /// Continuation lines, if any.
    pub fn rest(&self) -> &[Line] {
        &self.lines[1..]
    }

    /// True if the token carries continuation lines.
    pub fn is_multiline(&self) -> bool {
        self.lines.len() > 1
    }

    /// The key of the token's first line.
    pub fn key(&self) -> Result<String> {
        Ok(self.key_value()?.0)
    }

    /// Split the first line into a trimmed key and value on the first `=`.
    ///
    /// A missing `=` or an empty key is an error at the first line.
    pub fn key_value(&self) -> Result<(String, String)> {
        let line = self.first();
        let Some((key, value)) = line.text.split_once('=') else {
            return Err(ParseError::at(line.number, &line.text));
        };
        let key = key.trim();
        if key.is_empty() {
            return Err(ParseError::at(line.number, &line.text));
        }
        Ok((key.to_string(), value.trim().to_string()))
    }
}

/// Group a section body into tokens.
pub fn tokenize(lines: &[Line]) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = &lines[i];
        i += 1;

        if line.is_blank() {
            continue;
        }

        let token_indent = line.indent();
        let mut parts = vec![line.clone()];

        // A continuation run opens only if the immediate next line is
        // deeper than the token's own line. Its indent fixes the block
        // level; blank lines read as that level and stay in the run.
        if i < lines.len() {
            let block_indent = lines[i].indent();

            if block_indent > token_indent {
                while i < lines.len() {
                    let l = &lines[i];
                    let indent = if l.is_blank() { block_indent } else { l.indent() };

                    if indent <= token_indent {
                        break;
                    } else if indent < block_indent {
                        // Partial dedent inside the run, e.g. 0 < 1 < 2.
                        return Err(ParseError::at(l.number, &l.text));
                    }

                    parts.push(l.clone());
                    i += 1;
                }

                while parts.len() > 1 && parts.last().is_some_and(Line::is_blank) {
                    parts.pop();
                }
            }
        }

        tokens.push(Token { lines: parts });
    }

    Ok(tokens)
}
