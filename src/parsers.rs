//! Phase 4: Value Parsers
//!
//! Converts a token's textual payload into a typed value. Each kind
//! exposes a validate-then-convert pair over the value text; the generic
//! parser tries the kinds in a fixed priority order (Null, String,
//! Boolean, Integer, Float, Datetime, Duration, then List for multi-line
//! tokens), swallowing per-kind failures and reporting an error only on
//! exhaustion. Scheme-aware dispatch instead runs exactly the declared
//! kind's parser, so a value that is well-formed for a different kind
//! still fails.

use once_cell::sync::Lazy;
use regex::Regex;
use std::time::Duration;

use time::{Date, Month, PrimitiveDateTime, Time, UtcOffset};

use crate::error::{ParseError, Result};
use crate::scanner::Line;
use crate::tokenizer::Token;
use crate::value::{ItemKind, Kind, Timestamp, Value};

/// ISO-8601-like datetimes: date, then optionally a time of day, then
/// optionally either a `Z` marker or a numeric offset (never both; never
/// an offset without a time of day).
static RE_ISO8601: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?x)
        ^(?P<year>\d{4})-(?P<month>\d{2})-(?P<day>\d{2})
        (?:
            [T\ ](?P<hour>\d{2}):(?P<minute>\d{2})
            (?::(?P<second>\d{2})(?:\.(?P<frac>\d+))?)?
            (?:
                (?P<zulu>[zZ])
                | \ ?(?P<osign>[+-])(?P<ohour>\d{2})(?::(?P<ominute>\d{2}))?
            )?
        )?$",
    )
    .expect("datetime pattern is valid")
});

/// Durations: unit components in fixed order, none repeating.
static RE_DURATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?x)
        ^(?:(?P<weeks>\d+)w)?
        (?:(?P<days>\d+)d)?
        (?:(?P<hours>\d+)h)?
        (?:(?P<minutes>\d+)m)?
        (?:(?P<seconds>\d+)s)?
        (?:(?P<millis>\d+)ms)?$",
    )
    .expect("duration pattern is valid")
});

/// Priority order for generic (unscheme'd) dispatch over single-line
/// tokens. Order matters: `true` must be claimed by Boolean before any
/// catch-all, `13` by Integer before Float.
const GENERIC_ORDER: [Kind; 7] = [
    Kind::Null,
    Kind::Str,
    Kind::Bool,
    Kind::Int,
    Kind::Float,
    Kind::Datetime,
    Kind::Duration,
];

// ============================================================================
// Dispatch
// ============================================================================

/// Parse one token, honoring a declared kind when the scheme has one.
pub fn parse_token(token: &Token, expected: Option<Kind>) -> Result<Value> {
    match expected {
        Some(kind) => parse_declared(token, kind),
        None => parse_generic(token),
    }
}

/// Parse a token against its declared kind.
fn parse_declared(token: &Token, kind: Kind) -> Result<Value> {
    match kind {
        Kind::List(item) => parse_list(token, item),
        scalar => parse_scalar(token, scalar),
    }
}

/// Parse a token with no declared kind, trying each candidate in priority
/// order. A multi-line token can only be a list; a single-line token never
/// is.
pub fn parse_generic(token: &Token) -> Result<Value> {
    if token.is_multiline() {
        return parse_list(token, ItemKind::Generic);
    }

    let (_, value) = token.key_value()?;
    let line = token.first();

    match generic_value(&value, line) {
        Some(v) => Ok(v),
        None => Err(ParseError::at(line.number, &line.text)),
    }
}

/// Try the scalar kinds in priority order against one line's value text.
/// A candidate whose validation or conversion fails is skipped.
fn generic_value(text: &str, line: &Line) -> Option<Value> {
    for kind in GENERIC_ORDER {
        if check_scalar(kind, text) {
            if let Ok(v) = convert_scalar(kind, text, line) {
                return Some(v);
            }
        }
    }
    None
}

/// Parse a declared scalar kind: the token must be single-line, the value
/// text must validate for exactly that kind.
fn parse_scalar(token: &Token, kind: Kind) -> Result<Value> {
    require_single_line(token)?;
    let (_, value) = token.key_value()?;
    let line = token.first();

    if !check_scalar(kind, &value) {
        return Err(ParseError::at(line.number, &line.text));
    }
    convert_scalar(kind, &value, line)
}

/// Scalar kinds accept no continuation lines; the error points at the
/// first extra line, not the token's head.
fn require_single_line(token: &Token) -> Result<()> {
    match token.rest().first() {
        Some(extra) => Err(ParseError::at(extra.number, &extra.text)),
        None => Ok(()),
    }
}

// ============================================================================
// Lists
// ============================================================================

/// Parse a token as a list. The head line must have an empty right-hand
/// side; each continuation line is trimmed and parsed independently as one
/// item. An item failure points at that continuation line.
pub fn parse_list(token: &Token, item: ItemKind) -> Result<Value> {
    let (_, value) = token.key_value()?;
    let line = token.first();

    if !value.is_empty() {
        return Err(ParseError::at(line.number, &line.text));
    }

    let mut items = Vec::with_capacity(token.rest().len());
    for item_line in token.rest() {
        items.push(parse_item(item, item_line)?);
    }
    Ok(Value::List(items))
}

/// Parse one list item line according to the declared item kind.
fn parse_item(item: ItemKind, line: &Line) -> Result<Value> {
    let text = line.text.trim();

    match item {
        ItemKind::Generic => generic_value(text, line)
            .ok_or_else(|| ParseError::at(line.number, &line.text)),
        ItemKind::Str | ItemKind::Int | ItemKind::Datetime => {
            let kind = match item {
                ItemKind::Str => Kind::Str,
                ItemKind::Int => Kind::Int,
                _ => Kind::Datetime,
            };
            if !check_scalar(kind, text) {
                return Err(ParseError::at(line.number, &line.text));
            }
            convert_scalar(kind, text, line)
        }
    }
}

// ============================================================================
// Per-kind validate / convert
// ============================================================================

/// Validate one line's value text against a scalar kind.
fn check_scalar(kind: Kind, text: &str) -> bool {
    match kind {
        Kind::Null => text.is_empty() || text == "none",
        Kind::Str => check_string(text),
        Kind::Bool => text == "false" || text == "true",
        Kind::Int => text.parse::<i64>().is_ok(),
        Kind::Float => text.parse::<f64>().is_ok(),
        Kind::Datetime => RE_ISO8601.is_match(text),
        Kind::Duration => check_duration(text),
        Kind::List(_) => false,
    }
}

/// Convert validated value text. Only datetimes and durations can still
/// fail here (impossible calendar dates, component overflow); those
/// failures carry the underlying message as the error detail.
fn convert_scalar(kind: Kind, text: &str, line: &Line) -> Result<Value> {
    match kind {
        Kind::Null => Ok(Value::Null),
        Kind::Str => Ok(Value::Str(text[1..text.len() - 1].to_string())),
        Kind::Bool => Ok(Value::Bool(text == "true")),
        Kind::Int => text
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| ParseError::at(line.number, &line.text)),
        Kind::Float => text
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| ParseError::at(line.number, &line.text)),
        Kind::Datetime => convert_datetime(text, line),
        Kind::Duration => convert_duration(text, line),
        Kind::List(_) => Err(ParseError::at(line.number, &line.text)),
    }
}

/// Quoted strings: at least two characters, matching quote characters at
/// both ends. No escape processing.
fn check_string(text: &str) -> bool {
    text.len() >= 2
        && ((text.starts_with('\'') && text.ends_with('\''))
            || (text.starts_with('"') && text.ends_with('"')))
}

/// Durations must match the unit grammar with at least one component.
fn check_duration(text: &str) -> bool {
    RE_DURATION
        .captures(text)
        .is_some_and(|caps| caps.iter().skip(1).any(|g| g.is_some()))
}

/// Convert a pattern-validated datetime, delegating calendar and clock
/// range checks to `time`.
fn convert_datetime(text: &str, line: &Line) -> Result<Value> {
    let caps = RE_ISO8601
        .captures(text)
        .ok_or_else(|| ParseError::at(line.number, &line.text))?;

    fn digits(caps: &regex::Captures<'_>, name: &str) -> Option<u32> {
        caps.name(name).and_then(|m| m.as_str().parse().ok())
    }
    let detail = |e: &dyn std::fmt::Display| {
        ParseError::with_detail(line.number, &line.text, e.to_string())
    };
    let plain = || ParseError::at(line.number, &line.text);

    // The pattern guarantees the numeric fields are pure digit runs.
    let year = digits(&caps, "year").ok_or_else(plain)? as i32;
    let month_num = digits(&caps, "month").ok_or_else(plain)? as u8;
    let day = digits(&caps, "day").ok_or_else(plain)? as u8;

    let month = Month::try_from(month_num).map_err(|e| detail(&e))?;
    let date = Date::from_calendar_date(year, month, day).map_err(|e| detail(&e))?;

    let clock = match (digits(&caps, "hour"), digits(&caps, "minute")) {
        (Some(hour), Some(minute)) => {
            let second = digits(&caps, "second").unwrap_or(0);
            let nanos = match caps.name("frac") {
                Some(frac) => frac_nanos(frac.as_str()),
                None => 0,
            };
            Time::from_hms_nano(hour as u8, minute as u8, second as u8, nanos)
                .map_err(|e| detail(&e))?
        }
        _ => Time::MIDNIGHT,
    };

    let offset = if caps.name("zulu").is_some() {
        Some(UtcOffset::UTC)
    } else if let Some(sign) = caps.name("osign").map(|m| m.as_str()) {
        let hours = digits(&caps, "ohour").ok_or_else(plain)? as i8;
        let minutes = digits(&caps, "ominute").unwrap_or(0) as i8;
        let (hours, minutes) = if sign == "-" {
            (-hours, -minutes)
        } else {
            (hours, minutes)
        };
        Some(UtcOffset::from_hms(hours, minutes, 0).map_err(|e| detail(&e))?)
    } else {
        None
    };

    let datetime = PrimitiveDateTime::new(date, clock);
    Ok(Value::Datetime(Timestamp::new(datetime, offset)))
}

/// Nanoseconds from a fractional-second digit run of any length.
fn frac_nanos(frac: &str) -> u32 {
    let digits: String = frac.chars().take(9).collect();
    let parsed: u32 = digits.parse().unwrap_or(0);
    parsed * 10u32.pow(9 - digits.len() as u32)
}

/// Convert a pattern-validated duration by summing its unit components.
fn convert_duration(text: &str, line: &Line) -> Result<Value> {
    let caps = RE_DURATION
        .captures(text)
        .ok_or_else(|| ParseError::at(line.number, &line.text))?;

    const UNITS: [(&str, u64); 6] = [
        ("weeks", 7 * 24 * 3600 * 1000),
        ("days", 24 * 3600 * 1000),
        ("hours", 3600 * 1000),
        ("minutes", 60 * 1000),
        ("seconds", 1000),
        ("millis", 1),
    ];

    let mut total_millis: u64 = 0;
    for (name, factor) in UNITS {
        if let Some(m) = caps.name(name) {
            let count: u64 = m.as_str().parse().map_err(|_| {
                ParseError::with_detail(line.number, &line.text, "duration out of range")
            })?;
            total_millis = count
                .checked_mul(factor)
                .and_then(|ms| total_millis.checked_add(ms))
                .ok_or_else(|| {
                    ParseError::with_detail(line.number, &line.text, "duration out of range")
                })?;
        }
    }

    Ok(Value::Duration(Duration::from_millis(total_millis)))
}
