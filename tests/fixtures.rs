//! Test harness for the parser against fixture files.
//!
//! Reads all .ini files from tests/fixtures/ok/ and parses them without a
//! scheme, requiring success. Reads all .ini files from tests/fixtures/bad/
//! (expected to fail) and verifies each fails at the zero-based line number
//! recorded in its sidecar .error file.

use std::fs;
use std::path::{Path, PathBuf};

use zini::parse;

/// Root fixture directory.
fn fixture_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// All .ini files in one fixture subdirectory.
fn fixture_files(subdir: &str) -> Vec<PathBuf> {
    let pattern = fixture_root().join(subdir).join("*.ini");
    let mut files: Vec<PathBuf> = glob::glob(pattern.to_str().expect("utf-8 fixture path"))
        .expect("valid glob pattern")
        .filter_map(|entry| entry.ok())
        .collect();
    files.sort();
    assert!(!files.is_empty(), "no fixtures found in {subdir}/");
    files
}

#[test]
fn ok_fixtures_parse() {
    for path in fixture_files("ok") {
        let content = fs::read_to_string(&path).expect("readable fixture");
        if let Err(e) = parse(&content) {
            panic!("{} failed to parse: {e}", path.display());
        }
    }
}

#[test]
fn bad_fixtures_fail_at_expected_line() {
    for path in fixture_files("bad") {
        let content = fs::read_to_string(&path).expect("readable fixture");
        let expected: usize = fs::read_to_string(path.with_extension("error"))
            .expect("sidecar .error file")
            .trim()
            .parse()
            .expect("error file holds a line number");

        match parse(&content) {
            Ok(_) => panic!("{} parsed but should fail", path.display()),
            Err(e) => assert_eq!(
                e.line,
                expected,
                "{} failed at line {} (expected {}): {e}",
                path.display(),
                e.line,
                expected
            ),
        }
    }
}
