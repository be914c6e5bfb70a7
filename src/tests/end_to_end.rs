use super::compare_proto::compare_proto;
use crate::{
    catalog::CatalogError,
    cli::{run, Config},
    Error,
};
use pretty_assertions::assert_eq;
use std::path::{Path, PathBuf};

fn fixtures() -> PathBuf {
    let mut fixtures = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    fixtures.push("src/fixtures");
    fixtures
}

fn config(input: &Path, output: &Path, command_line: &str) -> Config {
    Config {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        package: "mysql".to_string(),
        command_line: command_line.to_string(),
        check: true,
    }
}

fn run_on(catalog: &str, dir: &Path) -> Result<String, Error> {
    let input = dir.join("errmsg-utf8.txt");
    let output = dir.join("out.proto");
    std::fs::write(&input, catalog).unwrap();
    run(&config(&input, &output, "errmsg2proto"))?;
    Ok(std::fs::read_to_string(output).unwrap())
}

fn body(text: &str) -> Vec<&str> {
    text.lines()
        .filter(|l| l.starts_with("        "))
        .map(str::trim)
        .collect()
}

#[test]
fn test_fixture() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.proto");
    let fixture = "errmsg-utf8.txt";
    let summary = run(&config(&fixtures().join(fixture), &output, "errmsg2proto --test")).unwrap();
    assert_eq!(summary.symbols, 7);
    let expected =
        std::fs::read_to_string(fixtures().join(fixture).with_extension("expected.proto")).unwrap();
    compare_proto(&expected, &std::fs::read_to_string(&output).unwrap(), fixture);
}

#[test]
fn test_example_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let text = run_on(
        "start-error-number 1000\nER_FOO\nWARN_BAR baz\n# comment\nER_BAZ\n",
        dir.path(),
    )
    .unwrap();
    assert_eq!(
        body(&text),
        vec!["OK = 0;", "ER_FOO = 1000;", "WARN_BAR = 1001;", "ER_BAZ = 1002;"]
    );
}

#[test]
fn test_empty_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let text = run_on("", dir.path()).unwrap();
    assert_eq!(body(&text), vec!["OK = 0;"]);
}

#[test]
fn test_mismatched_start_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let err = run_on("start-error-number 999\nER_FOO\n", dir.path()).unwrap_err();
    assert!(matches!(
        err,
        Error::Catalog(CatalogError::StartNumberMismatch {
            expected: 1000,
            found: 999
        })
    ));
    assert!(!dir.path().join("out.proto").exists());
}

#[test]
fn test_failure_keeps_previous_output() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.proto");
    std::fs::write(&output, "previous").unwrap();
    let err = run_on("start-error-number abc\n", dir.path()).unwrap_err();
    assert!(matches!(
        err,
        Error::Catalog(CatalogError::MalformedStartNumber { .. })
    ));
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "previous");
}

#[test]
fn test_duplicate_fails_check() {
    let dir = tempfile::tempdir().unwrap();
    let err = run_on("ER_A\nER_A\n", dir.path()).unwrap_err();
    assert!(matches!(err, Error::Check(_)));
    assert!(!dir.path().join("out.proto").exists());
}

#[test]
fn test_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let input = fixtures().join("errmsg-utf8.txt");
    let first = dir.path().join("first.proto");
    let second = dir.path().join("second.proto");
    run(&config(&input, &first, "errmsg2proto --a")).unwrap();
    run(&config(&input, &second, "errmsg2proto --b")).unwrap();
    let first = std::fs::read_to_string(first).unwrap();
    let second = std::fs::read_to_string(second).unwrap();
    assert!(first != second);
    compare_proto(&first, &second, "idempotence");
    run(&config(&input, &dir.path().join("again.proto"), "errmsg2proto --a")).unwrap();
    assert_eq!(
        std::fs::read_to_string(dir.path().join("again.proto")).unwrap(),
        first
    );
}

#[test]
fn test_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.proto");
    let err = run(&config(&dir.path().join("nope.txt"), &output, "errmsg2proto")).unwrap_err();
    assert!(matches!(err, Error::Catalog(CatalogError::Open { .. })));
    assert!(!output.exists());
}
