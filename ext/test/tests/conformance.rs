//! Conformance tests that run YAML fixtures against verimatch
//!
//! Run with: cargo test -p verimatch-test --test conformance --features fixtures
//!
//! Note: This test file requires the `fixtures` feature to be enabled.

#![cfg(feature = "fixtures")]

use std::fs;
use std::path::{Path, PathBuf};
use verimatch_test::fixture::Fixture;

/// The fixtures directory next to this crate's manifest
fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

/// Load and run all fixtures in a directory
fn run_fixtures_in_dir(dir: &Path) {
    assert!(dir.exists(), "Fixtures directory does not exist: {}", dir.display());

    let mut ran = 0;
    for entry in fs::read_dir(dir).expect("read dir") {
        let path = entry.expect("dir entry").path();

        if path
            .extension()
            .is_some_and(|e| e == "yaml" || e == "yml")
        {
            println!("Running fixture: {}", path.display());

            let yaml = fs::read_to_string(&path).expect("read yaml");

            // Parse potentially multiple fixtures (separated by ---)
            let fixtures = Fixture::from_yaml_multi(&yaml).unwrap_or_else(|e| {
                panic!("Failed to parse {}: {}", path.display(), e);
            });

            for fixture in fixtures {
                println!("  Running: {}", fixture.name);
                fixture.run_and_assert();
                ran += 1;
            }
        }
    }
    assert!(ran > 0, "No fixtures found in {}", dir.display());
}

#[test]
fn test_text_matchers() {
    run_fixtures_in_dir(&fixtures_dir().join("01_text"));
}

#[test]
fn test_combinators() {
    run_fixtures_in_dir(&fixtures_dir().join("02_combinators"));
}

#[test]
fn test_limits() {
    run_fixtures_in_dir(&fixtures_dir().join("03_limits"));
}
