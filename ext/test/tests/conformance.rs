//! Conformance tests that run YAML fixtures against attest
//!
//! Run with: cargo test -p attest-test --test conformance
//!
//! Note: This test file requires the `fixtures` feature (on by default).

#![cfg(feature = "fixtures")]

use attest_test::fixture::Fixture;
use std::fs;
use std::path::{Path, PathBuf};

/// The fixtures directory shipped next to this crate's manifest
fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

/// Load and run all fixtures in a directory, returning how many ran
fn run_fixtures_in_dir(dir: &Path) -> usize {
    assert!(dir.exists(), "Fixtures directory does not exist: {}", dir.display());

    let mut paths: Vec<PathBuf> = fs::read_dir(dir)
        .expect("read dir")
        .map(|entry| entry.expect("dir entry").path())
        .filter(|path| path.extension().is_some_and(|e| e == "yaml" || e == "yml"))
        .collect();
    paths.sort();

    let mut ran = 0;
    for path in paths {
        println!("Running fixture file: {}", path.display());
        let yaml = fs::read_to_string(&path).expect("read yaml");

        // Parse potentially multiple fixtures (separated by ---)
        let fixtures = Fixture::from_yaml_multi(&yaml)
            .unwrap_or_else(|e| panic!("Failed to parse {}: {}", path.display(), e));

        for fixture in fixtures {
            println!("  Running: {}", fixture.name);
            fixture.run_and_assert();
            ran += 1;
        }
    }
    ran
}

#[test]
fn test_logic() {
    assert!(run_fixtures_in_dir(&fixtures_dir().join("01_logic")) > 0);
}

#[test]
fn test_matchers() {
    assert!(run_fixtures_in_dir(&fixtures_dir().join("02_matchers")) > 0);
}

#[test]
fn test_reports() {
    assert!(run_fixtures_in_dir(&fixtures_dir().join("03_reports")) > 0);
}
