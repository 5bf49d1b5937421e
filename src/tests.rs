use crate::{ReaderConfig, ReaderError, TestCaseReader, VerificationTarget};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures").join(name)
}

/// Open a fixture file from the fixtures directory.
fn open_fixture(name: &str) -> TestCaseReader<BufReader<File>> {
    TestCaseReader::open(fixture_path(name), ReaderConfig::default())
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", name, e))
}

#[test]
fn test_multi_source_fixture() {
    let mut reader = open_fixture("multi_source.sol");

    let sources = reader.sources();
    assert_eq!(sources.names().collect::<Vec<_>>(), vec!["A", "B"]);
    assert_eq!(sources.main_source_name, "B");
    assert_eq!(
        sources.get("B"),
        Some("import \"A\";\ncontract B is A {}\n")
    );
    assert!(sources.get("A").unwrap().starts_with("contract A {\n"));

    assert_eq!(reader.string_setting("EVMVersion", ""), ">=byzantium");
    assert!(reader.bool_setting("optimize", false).unwrap());
    assert_eq!(reader.size_setting("optimize-runs", 0).unwrap(), 200);
    reader.ensure_all_settings_read().unwrap();

    assert_eq!(reader.line_number(), 13);
    assert_eq!(
        reader.simple_expectations().unwrap(),
        "TypeError 1234: (0-1): Something.\n\nWarning 2018: (2-3): Function state mutability can be restricted to pure.\n"
    );
}

#[test]
fn test_single_source_fixture() {
    let mut reader = open_fixture("single_source.sol");

    assert_eq!(reader.source().unwrap(), "contract C {\n    uint x;\n}\n");
    assert!(reader.settings().is_empty());
    reader.ensure_all_settings_read().unwrap();
    assert_eq!(reader.simple_expectations().unwrap(), "f() -> 1\n");
}

#[test]
fn test_external_source_fixture() {
    let mut reader = open_fixture("external_source.sol");
    let util = std::fs::read_to_string(fixture_path("_external/lib/util.sol")).unwrap();
    let main = std::fs::read_to_string(fixture_path("_external/main.sol")).unwrap();

    let sources = reader.sources();
    assert_eq!(
        sources.names().collect::<Vec<_>>(),
        vec!["_external/lib/util.sol", "_external/main.sol", "lib/util.sol", "test", "util"]
    );
    assert_eq!(sources.main_source_name, "test");
    assert_eq!(sources.get("_external/main.sol"), Some(main.as_str()));
    assert_eq!(sources.get("lib/util.sol"), Some(util.as_str()));
    assert_eq!(sources.get("_external/lib/util.sol"), Some(util.as_str()));
    assert_eq!(sources.get("util"), Some(util.as_str()));

    assert_eq!(reader.string_setting("SMTEngine", "none"), "chc");
    let targets = reader.target_setting("SMTTargets", "default").unwrap();
    assert_eq!(
        targets.iter().collect::<Vec<_>>(),
        vec![VerificationTarget::Assert, VerificationTarget::Overflow]
    );
    let contracts = reader.contracts_setting("SMTContracts", "default").unwrap();
    assert!(contracts.contains("test", "T"));
    assert!(contracts.contains("_external/main.sol", "Main"));
    reader.ensure_all_settings_read().unwrap();

    assert_eq!(reader.simple_expectations().unwrap(), "");
}

#[test]
fn test_external_source_fixture_without_imports() {
    let config = ReaderConfig {
        follow_imports: false,
        ..ReaderConfig::default()
    };
    let reader = TestCaseReader::open(fixture_path("external_source.sol"), config).unwrap();
    assert_eq!(
        reader.sources().names().collect::<Vec<_>>(),
        vec!["_external/main.sol", "test", "util"]
    );
}

#[test]
fn test_unknown_setting_fixture() {
    let mut reader = open_fixture("unknown_setting.sol");

    assert_eq!(reader.string_setting("compileViaYul", "false"), "also");
    assert!(!reader.bool_setting("optimize", false).unwrap());

    let err = reader.ensure_all_settings_read().unwrap_err();
    assert!(err.is_format());
    insta::assert_snapshot!(err.to_string(), @"unknown setting(s): optimise");
}

#[test]
fn test_fixture_parse_is_repeatable() {
    let first = open_fixture("external_source.sol");
    let second = open_fixture("external_source.sol");
    assert_eq!(first.sources(), second.sources());
    assert_eq!(first.settings(), second.settings());
    assert_eq!(first.line_number(), second.line_number());
}

#[test]
fn test_external_source_in_memory_document() {
    let err = TestCaseReader::from_text(
        "==== ExternalSource: _external/main.sol ====\n",
        ReaderConfig::default(),
    )
    .err()
    .unwrap();
    assert!(matches!(err, ReaderError::Io { .. }));
}
