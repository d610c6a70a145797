//! End-to-end scenarios over the public surface.

use std::time::Duration;

use time::macros::{datetime, offset};
use zini::{parse, Kind, SchemeEntry, Timestamp, Value, Zini};

#[test]
fn two_sections_with_scheme_defaults() {
    let content = "\
# first comment
[first]
boolean = false
integer = 13

[second]
; second comment
boolean = true
string = \"some string\"
";

    let mut z = Zini::new();
    z.section_mut("first")
        .declare("def", SchemeEntry::with_default(Value::Int(111)));
    z.section_mut("second")
        .declare("boolean", SchemeEntry::with_default(Value::Bool(false)));

    let doc = z.parse(content).unwrap();

    assert_eq!(doc.len(), 2);
    assert_eq!(doc["first"]["boolean"], Value::Bool(false));
    assert_eq!(doc["first"]["integer"], Value::Int(13));
    assert_eq!(doc["first"]["def"], Value::Int(111));
    assert_eq!(doc["second"]["boolean"], Value::Bool(true));
    assert_eq!(doc["second"]["string"], Value::Str("some string".into()));
    assert_eq!(doc["second"].len(), 2);
}

#[test]
fn datetime_with_and_without_offset() {
    let doc = parse("[s]\ndt = 2005-01-13T18:00:10Z").unwrap();
    assert_eq!(
        doc["s"]["dt"],
        Value::Datetime(Timestamp::new(
            datetime!(2005-01-13 18:00:10),
            Some(offset!(UTC))
        ))
    );

    let doc = parse("[s]\ndt = 2005-01-13").unwrap();
    assert_eq!(
        doc["s"]["dt"],
        Value::Datetime(Timestamp::new(datetime!(2005-01-13 00:00), None))
    );
}

#[test]
fn duration_components_sum() {
    let doc = parse("[s]\ntd = 2h13s").unwrap();
    assert_eq!(
        doc["s"]["td"],
        Value::Duration(Duration::from_secs(2 * 3600 + 13))
    );

    let err = parse("[s]\ntd = 2d100ss").unwrap_err();
    assert_eq!(err.line, 1);
    assert_eq!(err.text, "td = 2d100ss");
}

#[test]
fn key_before_section_header() {
    let err = parse("boolean = false\n[first]\ninteger = 13").unwrap_err();
    assert_eq!(err.line, 0);
    assert_eq!(err.text, "boolean = false");
}

#[test]
fn indentation_jump_is_structural_error() {
    let err = parse("[s]\nkey =\n    a = 1\n  b = 2").unwrap_err();
    assert_eq!(err.line, 3);
    assert_eq!(err.text, "  b = 2");
}

#[test]
fn generic_list_with_inferred_items() {
    let doc = parse("[s]\nitems =\n  13\n  'x'\n  true").unwrap();
    assert_eq!(
        doc["s"]["items"],
        Value::List(vec![
            Value::Int(13),
            Value::Str("x".into()),
            Value::Bool(true),
        ])
    );
}

#[test]
fn list_header_with_inline_content_fails() {
    let err = parse("[s]\nitems = 13\n  14").unwrap_err();
    assert_eq!(err.line, 1);
}

#[test]
fn declared_float_accepts_integral_text() {
    let mut z = Zini::new();
    z.section_mut("s").declare("f", SchemeEntry::of_kind(Kind::Float));
    let doc = z.parse("[s]\nf = 3").unwrap();
    assert_eq!(doc["s"]["f"], Value::Float(3.0));
}

#[test]
fn declared_integer_rejects_float_text() {
    let mut z = Zini::new();
    z.section_mut("s").declare("i", SchemeEntry::of_kind(Kind::Int));
    let err = z.parse("[s]\ni = 3.14").unwrap_err();
    assert_eq!(err.line, 1);
    assert_eq!(err.text, "i = 3.14");
}

#[test]
fn first_error_wins() {
    // Both lines are bad; only the earliest is reported.
    let err = parse("[s]\na = oops\nb = also bad").unwrap_err();
    assert_eq!(err.line, 1);
}

#[test]
fn read_file_round_trip() {
    let dir = std::env::temp_dir().join("zini-read-test");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config.ini");
    std::fs::write(&path, "[s]\nk = 13\n").unwrap();

    let doc = Zini::new().read(&path).unwrap();
    assert_eq!(doc["s"]["k"], Value::Int(13));

    assert!(Zini::new().read(dir.join("missing.ini")).is_err());
}
