//! Scheme container and parse entry points.
//!
//! `Zini` aggregates named `Section` schemes: per key, an optional declared
//! kind and an optional default. Parsing a document runs the phase pipeline
//! per section, dispatching each token through its scheme entry (or generic
//! inference when there is none), and merges declared defaults into the
//! result: per-section defaults seed the map before parsed values overwrite
//! them, and scheme'd sections absent from the text contribute their
//! defaults wholesale.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::{ParseError, Result, SchemeError, ZiniError};
use crate::parsers::parse_token;
use crate::scanner::scan;
use crate::sections::split_sections;
use crate::tokenizer::tokenize;
use crate::value::{Kind, Value};

/// A fully parsed document: section name → key → value.
pub type Document = BTreeMap<String, BTreeMap<String, Value>>;

/// One key's declared expectations: a kind, a default, or both.
///
/// When both are present the default's kind family must match the declared
/// kind; the constructors enforce this so parsing never has to.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemeEntry {
    expected: Option<Kind>,
    default: Option<Value>,
}

impl SchemeEntry {
    /// Entry that enforces a kind with no default.
    pub fn of_kind(kind: Kind) -> Self {
        Self {
            expected: Some(kind),
            default: None,
        }
    }

    /// Entry with a default; the expected kind is inferred from it, so
    /// `111` means "integer, defaulting to 111".
    pub fn with_default(default: Value) -> Self {
        Self {
            expected: Some(default.kind()),
            default: Some(default),
        }
    }

    /// Entry from explicit parts, validating that a present default
    /// matches a present declared kind.
    pub fn new(
        expected: Option<Kind>,
        default: Option<Value>,
    ) -> std::result::Result<Self, SchemeError> {
        if let (Some(kind), Some(value)) = (&expected, &default) {
            if !value.kind().same_family(*kind) {
                return Err(SchemeError {
                    declared: kind.to_string(),
                    actual: value.kind().to_string(),
                });
            }
        }
        Ok(Self { expected, default })
    }

    /// The declared kind, if any.
    pub fn expected(&self) -> Option<Kind> {
        self.expected
    }

    /// The declared default, if any.
    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }
}

/// Declared scheme for one section: an ordered map of key → entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Section {
    entries: BTreeMap<String, SchemeEntry>,
}

impl Section {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare one key's entry, replacing any previous declaration.
    pub fn declare(&mut self, key: &str, entry: SchemeEntry) -> &mut Self {
        self.entries.insert(key.to_string(), entry);
        self
    }

    /// Look up a key's entry.
    pub fn get(&self, key: &str) -> Option<&SchemeEntry> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate declared entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SchemeEntry)> {
        self.entries.iter().map(|(k, e)| (k.as_str(), e))
    }

    /// The keys carrying defaults, as a result map.
    pub fn defaults(&self) -> BTreeMap<String, Value> {
        self.entries
            .iter()
            .filter_map(|(key, entry)| {
                entry.default.clone().map(|value| (key.clone(), value))
            })
            .collect()
    }

    /// Parse one section body's tokens against this scheme.
    fn parse_lines(&self, lines: &[crate::scanner::Line]) -> Result<BTreeMap<String, Value>> {
        let mut result = self.defaults();

        for token in tokenize(lines)? {
            let key = token.key()?;
            let expected = self.get(&key).and_then(SchemeEntry::expected);
            let value = parse_token(&token, expected)?;
            result.insert(key, value);
        }

        Ok(result)
    }
}

/// Top-level container of per-section schemes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Zini {
    sections: BTreeMap<String, Section>,
}

impl Zini {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a declared section scheme.
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    /// The named section's scheme, created empty on first use.
    pub fn section_mut(&mut self, name: &str) -> &mut Section {
        self.sections.entry(name.to_string()).or_default()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Parse a document from a string.
    ///
    /// Every section present in the text appears in the result; sections
    /// declared here but absent from the text contribute their defaults.
    pub fn parse(&self, content: &str) -> Result<Document> {
        let lines = scan(content);
        let empty = Section::new();

        let mut result: Document = BTreeMap::new();
        for block in split_sections(&lines)? {
            let scheme = self.section(&block.name).unwrap_or(&empty);
            let values = scheme.parse_lines(&block.lines)?;
            result.insert(block.name, values);
        }

        for (name, scheme) in &self.sections {
            if !result.contains_key(name) {
                result.insert(name.clone(), scheme.defaults());
            }
        }

        Ok(result)
    }

    /// Read and parse a file.
    pub fn read(&self, path: impl AsRef<Path>) -> std::result::Result<Document, ZiniError> {
        let content = fs::read_to_string(path)?;
        Ok(self.parse(&content)?)
    }

    /// The declared defaults alone, equal to parsing an empty document.
    pub fn defaults(&self) -> Document {
        self.sections
            .iter()
            .map(|(name, scheme)| (name.clone(), scheme.defaults()))
            .collect()
    }
}

/// Parse a document with no declared scheme: every value is inferred.
pub fn parse(content: &str) -> std::result::Result<Document, ParseError> {
    Zini::new().parse(content)
}
