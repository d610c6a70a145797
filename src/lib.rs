//! zini: a typed INI-style configuration parser.
//!
//! zini parses INI-style text into a mapping of section → key → typed
//! value, optionally validating values against a declared scheme (expected
//! kind and/or default) per key. Without a scheme, each value's kind is
//! inferred by trying a fixed priority order: null, string, boolean,
//! integer, float, datetime, duration, and (for indented blocks) list.
//!
//! # Parsing Pipeline
//!
//! The parser operates in four phases:
//!
//! 1. **Line Normalizer**: Splits source text into numbered lines with
//!    trailing whitespace removed.
//!
//! 2. **Section Tokenizer**: Groups lines under their `[name]` headers,
//!    dropping whole-line comments.
//!
//! 3. **Block Tokenizer**: Groups a section's lines into tokens, each one
//!    key/value line plus any more-indented continuation lines.
//!
//! 4. **Value Parsers**: Converts each token's text into a typed value,
//!    either against its declared kind or by priority-order inference.
//!
//! Any failure aborts the parse with a single [`ParseError`] carrying the
//! zero-based number and text of the offending line.

mod error;
mod parsers;
mod scanner;
mod scheme;
mod sections;
mod tokenizer;
mod value;

pub use error::{ParseError, Result, SchemeError, ZiniError};
pub use scheme::{parse, Document, Section, SchemeEntry, Zini};
pub use value::{ItemKind, Kind, Timestamp, Value};
