//! Integration tests for xpimport-cli.
//!
//! Note: Tests use `unwrap`/`expect` which is acceptable in test code.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use xpimport_core::test_utils::XpiBuilder;
use xpimport_core::test_utils::create_test_xpi;
use xpimport_core::test_utils::install_rdf;

fn xpimport_cmd() -> Command {
    cargo_bin_cmd!("xpimport")
}

/// Writes a well-formed test package into `dir` and returns its path.
fn sample_xpi(dir: &TempDir) -> PathBuf {
    let rdf = install_rdf("{abc-123}", "2", "Sample Addon", "1.0");
    let xpi = XpiBuilder::new()
        .add_file("install.rdf", rdf.as_bytes())
        .add_directory("chrome/")
        .add_file("chrome/chrome.manifest", b"content chrome/")
        .build();

    let path = dir.path().join("sample.xpi");
    fs::write(&path, xpi).expect("failed to write fixture");
    path
}

#[test]
fn test_version_flag() {
    xpimport_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("xpimport"));
}

#[test]
fn test_help_flag() {
    xpimport_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Command-line utility"));
}

#[test]
fn test_inspect_help() {
    xpimport_cmd()
        .arg("inspect")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Parse a package manifest"));
}

#[test]
fn test_inspect_prints_metadata() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let xpi = sample_xpi(&temp);

    xpimport_cmd()
        .arg("inspect")
        .arg(&xpi)
        .assert()
        .success()
        .stdout(predicate::str::contains("Sample Addon"))
        .stdout(predicate::str::contains("{abc-123}"))
        .stdout(predicate::str::contains("extension"));
}

#[test]
fn test_inspect_json_output() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let xpi = sample_xpi(&temp);

    let output = xpimport_cmd()
        .arg("inspect")
        .arg("--json")
        .arg(&xpi)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).expect("invalid JSON output");
    assert_eq!(json["status"], "success");
    assert_eq!(json["operation"], "inspect");
    assert_eq!(json["data"]["guid"], "{abc-123}");
    assert_eq!(json["data"]["addon_type"], "extension");
    assert_eq!(json["data"]["version"], "1.0");
}

#[test]
fn test_inspect_with_app_versions_file() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let firefox = "{ec8030f7-c20a-464f-9b0e-13a3a9e97384}";
    let rdf = xpimport_core::test_utils::install_rdf_with_apps(
        "{abc-123}",
        "2",
        "Sample Addon",
        "1.0",
        &[(firefox, "3.0", "3.6")],
    );
    let xpi_path = temp.path().join("sample.xpi");
    fs::write(
        &xpi_path,
        create_test_xpi(vec![("install.rdf", rdf.as_bytes())]),
    )
    .unwrap();

    let versions_path = temp.path().join("versions.json");
    fs::write(
        &versions_path,
        r#"[{"application": 1, "version": "3.0"}, {"application": 1, "version": "3.6"}]"#,
    )
    .unwrap();

    let output = xpimport_cmd()
        .arg("inspect")
        .arg("--json")
        .arg("--app-versions")
        .arg(&versions_path)
        .arg(&xpi_path)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).expect("invalid JSON output");
    let apps = json["data"]["target_applications"]
        .as_array()
        .expect("target_applications should be an array");
    assert_eq!(apps.len(), 1);
    assert_eq!(apps[0]["application"], "firefox");
    assert_eq!(apps[0]["min_version"], "3.0");
    assert_eq!(apps[0]["max_version"], "3.6");
}

#[test]
fn test_inspect_missing_manifest() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let xpi_path = temp.path().join("bare.xpi");
    fs::write(
        &xpi_path,
        create_test_xpi(vec![("readme.txt", b"nothing".as_slice())]),
    )
    .unwrap();

    xpimport_cmd()
        .arg("inspect")
        .arg(&xpi_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("install.rdf"));
}

#[test]
fn test_inspect_malicious_package() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let xpi_path = temp.path().join("evil.xpi");
    let xpi = XpiBuilder::new()
        .add_file("../../../etc/evil.conf", b"owned")
        .build();
    fs::write(&xpi_path, xpi).unwrap();

    xpimport_cmd()
        .arg("inspect")
        .arg(&xpi_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Security violation"));
}

#[test]
fn test_inspect_nonexistent_package() {
    xpimport_cmd()
        .arg("inspect")
        .arg("nonexistent.xpi")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to open package"));
}

#[test]
fn test_extract_help() {
    xpimport_cmd()
        .arg("extract")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Extract package contents"));
}

#[test]
fn test_extract_creates_files() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let xpi = sample_xpi(&temp);
    let out = temp.path().join("out");

    xpimport_cmd()
        .arg("extract")
        .arg(&xpi)
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Extracted"));

    assert!(out.join("install.rdf").exists());
    assert!(out.join("chrome/chrome.manifest").exists());
}

#[test]
fn test_extract_json_output() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let xpi = sample_xpi(&temp);
    let out = temp.path().join("out");

    let output = xpimport_cmd()
        .arg("extract")
        .arg("--json")
        .arg(&xpi)
        .arg(&out)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).expect("invalid JSON output");
    assert_eq!(json["status"], "success");
    assert_eq!(json["operation"], "extract");
    assert!(json["data"]["entries_written"].as_u64().unwrap() > 0);
}

#[test]
fn test_extract_quiet_suppresses_output() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let xpi = sample_xpi(&temp);
    let out = temp.path().join("out");

    xpimport_cmd()
        .arg("extract")
        .arg("--quiet")
        .arg(&xpi)
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_quiet_conflicts_with_verbose() {
    xpimport_cmd()
        .arg("inspect")
        .arg("--quiet")
        .arg("--verbose")
        .arg("whatever.xpi")
        .assert()
        .failure();
}
