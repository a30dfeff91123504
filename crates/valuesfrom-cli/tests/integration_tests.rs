//! Integration tests for the helm-valuesfrom binary

use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// Helper to run helm-valuesfrom
fn valuesfrom(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_helm-valuesfrom"))
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("VALUESFROM_VALUES_DIR")
        .env_remove("VALUESFROM_TEMP_DIR")
        .output()
        .expect("Failed to execute helm-valuesfrom")
}

/// Get the fixtures path
fn fixtures_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/../../fixtures")
}

fn fixture(name: &str) -> String {
    format!("{}/{}", fixtures_path(), name)
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

/// Paths following each ` -f ` in the output
fn flag_paths(stdout: &str) -> Vec<String> {
    stdout
        .split(" -f ")
        .skip(1)
        .map(|p| p.trim().to_string())
        .collect()
}

#[test]
fn test_resolves_config_map_and_secret() {
    let temp = TempDir::new().unwrap();
    let output = valuesfrom(&[
        &fixture("helmrelease.yaml"),
        &fixture("values"),
        path_str(temp.path()),
    ]);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with(" -f "));
    assert!(!stdout.ends_with('\n'));

    let paths = flag_paths(&stdout);
    assert_eq!(paths.len(), 2);
    assert_ne!(paths[0], paths[1]);
    for path in &paths {
        assert!(path.ends_with(".yaml"));
        assert!(Path::new(path).starts_with(temp.path()));
        assert_eq!(fs::read_to_string(path).unwrap(), "foo: bar");
    }
}

#[test]
fn test_required_miss_fails_without_output() {
    let temp = TempDir::new().unwrap();
    let output = valuesfrom(&[
        &fixture("helmrelease-required-missing.yaml"),
        &fixture("values"),
        path_str(temp.path()),
    ]);

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(3));
    assert!(output.stdout.is_empty());
    assert!(!output.stderr.is_empty());
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
}

#[test]
fn test_no_values_from_prints_nothing() {
    let temp = TempDir::new().unwrap();
    let output = valuesfrom(&[
        &fixture("helmrelease-no-values-from.yaml"),
        &fixture("values"),
        path_str(temp.path()),
    ]);

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_values_dir_must_be_directory() {
    let temp = TempDir::new().unwrap();
    let output = valuesfrom(&[
        &fixture("helmrelease.yaml"),
        &fixture("helmrelease.yaml"),
        path_str(temp.path()),
    ]);

    assert_eq!(output.status.code(), Some(64));
    assert!(output.stdout.is_empty());
    assert!(!output.stderr.is_empty());
}

#[test]
fn test_values_dir_checked_before_manifest() {
    let temp = TempDir::new().unwrap();
    let output = valuesfrom(&[
        &fixture("does-not-exist.yaml"),
        &fixture("no-such-dir"),
        path_str(temp.path()),
    ]);

    assert_eq!(output.status.code(), Some(64));
}

#[test]
fn test_malformed_manifest() {
    let temp = TempDir::new().unwrap();
    let output = valuesfrom(&[
        &fixture("helmrelease-malformed.yaml"),
        &fixture("values"),
        path_str(temp.path()),
    ]);

    assert_eq!(output.status.code(), Some(4));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_missing_arguments() {
    let output = valuesfrom(&[&fixture("helmrelease.yaml")]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_unwritable_temp_dir() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("missing");
    let output = valuesfrom(&[
        &fixture("helmrelease.yaml"),
        &fixture("values"),
        path_str(&missing),
    ]);

    assert_eq!(output.status.code(), Some(5));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_temp_dir_from_environment() {
    let temp = TempDir::new().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_helm-valuesfrom"))
        .arg(fixture("helmrelease.yaml"))
        .env("VALUESFROM_VALUES_DIR", fixture("values"))
        .env("VALUESFROM_TEMP_DIR", temp.path())
        .output()
        .expect("Failed to execute helm-valuesfrom");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(flag_paths(&stdout).len(), 2);
}
