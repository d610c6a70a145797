//! Parsed value representation.

use std::fmt;
use std::time::Duration;

use time::{PrimitiveDateTime, UtcOffset};

/// A datetime with an optional UTC offset.
///
/// The format distinguishes `2005-01-13T18:00` (wall-clock, no offset)
/// from `2005-01-13T18:00Z` (anchored to UTC); both carry the same
/// `PrimitiveDateTime`, only the offset differs. A date without a
/// time-of-day parses to midnight with no offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp {
    pub datetime: PrimitiveDateTime,
    pub offset: Option<UtcOffset>,
}

impl Timestamp {
    pub fn new(datetime: PrimitiveDateTime, offset: Option<UtcOffset>) -> Self {
        Self { datetime, offset }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.datetime)?;
        if let Some(offset) = self.offset {
            write!(f, "{offset}")?;
        }
        Ok(())
    }
}

/// A parsed configuration value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Null value (empty right-hand side or `none`).
    Null,
    /// Boolean value.
    Bool(bool),
    /// 64-bit signed integer.
    Int(i64),
    /// 64-bit floating-point number.
    Float(f64),
    /// Quoted string, quotes stripped.
    Str(String),
    /// Datetime with optional offset.
    Datetime(Timestamp),
    /// Duration summed over its unit components.
    Duration(Duration),
    /// Homogeneous or inferred-per-item list of scalars.
    List(Vec<Value>),
}

/// The closed set of value kinds a scheme can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Null,
    Bool,
    Int,
    Float,
    Str,
    Datetime,
    Duration,
    /// A list with the given item kind.
    List(ItemKind),
}

/// Item kinds a list scheme can declare. `Generic` infers each item the
/// way unscheme'd top-level values are inferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Str,
    Int,
    Datetime,
    Generic,
}

impl Kind {
    /// Kind-family equality: any two list kinds match regardless of their
    /// item kind, everything else matches exactly.
    pub fn same_family(self, other: Kind) -> bool {
        match (self, other) {
            (Kind::List(_), Kind::List(_)) => true,
            (a, b) => a == b,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Null => "null",
            Kind::Bool => "boolean",
            Kind::Int => "integer",
            Kind::Float => "float",
            Kind::Str => "string",
            Kind::Datetime => "datetime",
            Kind::Duration => "duration",
            Kind::List(_) => "list",
        };
        f.write_str(name)
    }
}

impl Value {
    /// The kind tag of this value. Lists report a generic item kind since
    /// a value does not remember how its items were declared.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Int(_) => Kind::Int,
            Value::Float(_) => Kind::Float,
            Value::Str(_) => Kind::Str,
            Value::Datetime(_) => Kind::Datetime,
            Value::Duration(_) => Kind::Duration,
            Value::List(_) => Kind::List(ItemKind::Generic),
        }
    }

    /// Returns `true` if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the boolean value if this is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer value if this is an `Int`.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the float value if this is a `Float`.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns a reference to the string if this is a `Str`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the timestamp if this is a `Datetime`.
    pub fn as_datetime(&self) -> Option<Timestamp> {
        match self {
            Value::Datetime(t) => Some(*t),
            _ => None,
        }
    }

    /// Returns the duration if this is a `Duration`.
    pub fn as_duration(&self) -> Option<Duration> {
        match self {
            Value::Duration(d) => Some(*d),
            _ => None,
        }
    }

    /// Returns a reference to the items if this is a `List`.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Timestamp> for Value {
    fn from(t: Timestamp) -> Self {
        Value::Datetime(t)
    }
}

impl From<Duration> for Value {
    fn from(d: Duration) -> Self {
        Value::Duration(d)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_tags() {
        assert_eq!(Value::Null.kind(), Kind::Null);
        assert_eq!(Value::Int(13).kind(), Kind::Int);
        assert_eq!(
            Value::List(vec![Value::Int(1)]).kind(),
            Kind::List(ItemKind::Generic)
        );
    }

    #[test]
    fn test_same_family_for_lists() {
        assert!(Kind::List(ItemKind::Str).same_family(Kind::List(ItemKind::Generic)));
        assert!(!Kind::List(ItemKind::Str).same_family(Kind::Str));
        assert!(Kind::Int.same_family(Kind::Int));
        assert!(!Kind::Int.same_family(Kind::Float));
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert_eq!(Value::Bool(true).as_int(), None);
        assert_eq!(Value::Str("x".into()).as_str(), Some("x"));
        assert!(Value::Null.is_null());
    }
}
