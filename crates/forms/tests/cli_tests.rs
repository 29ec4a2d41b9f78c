//! End-to-end tests for the `forms` binary.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn forms() -> Command {
    let mut cmd = Command::cargo_bin("forms").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn no_arguments_prints_help() {
    forms()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn names_lists_qualified_names() {
    forms()
        .arg("names")
        .arg(fixture_path("signup.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Language[en][User.name]\n"))
        .stdout(predicate::str::contains("Language[en][User.zip]\n"))
        .stdout(predicate::str::contains("bio[fr][User.about]\n"));
}

#[test]
fn groups_prints_rows() {
    forms()
        .arg("groups")
        .arg(fixture_path("signup.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("row 1: name(6) email(6)"))
        .stdout(predicate::str::contains("row 2: address(10)"))
        .stdout(predicate::str::contains("  [fr] row 1: bio[fr][about](10)"));
}

#[test]
fn text_lists_translatable_strings() {
    forms()
        .arg("text")
        .arg(fixture_path("signup.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Full name"))
        .stdout(predicate::str::contains("Français"))
        .stdout(predicate::str::contains("About you"));
}

#[test]
fn validate_accepts_clean_definition() {
    forms()
        .arg("validate")
        .arg(fixture_path("signup.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("signup.json: ok"));
}

#[test]
fn validate_reports_every_problem() {
    forms()
        .arg("validate")
        .arg(fixture_path("broken.json"))
        .assert()
        .failure()
        .stdout(predicate::str::contains("duplicate element name 'title'"))
        .stdout(predicate::str::contains("invalid name format '%s-%s'"))
        .stderr(predicate::str::contains("2 problem(s) found"));
}

#[test]
fn missing_file_is_an_error() {
    let temp = TempDir::new().unwrap();
    forms()
        .arg("names")
        .arg(temp.path().join("absent.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn merge_writes_output_file() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("merged.json");

    forms()
        .arg("merge")
        .arg(fixture_path("signup.json"))
        .arg(fixture_path("signup_overlay.json"))
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let merged: Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(merged["id"], "signup");
    assert_eq!(merged["template"], "allfields");
    assert_eq!(merged["buttons"], serde_json::json!(["submit", "reset"]));
    let names: Vec<&str> = merged["elements"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|e| e["name"].as_str())
        .collect();
    assert_eq!(
        names,
        vec!["User.name", "User.email", "address", "bio", "User.terms"]
    );
    assert_eq!(merged["elements"][0]["labelCols"], 3);
}

#[test]
fn payload_honours_theme_override() {
    let output = forms()
        .arg("payload")
        .arg(fixture_path("signup.json"))
        .arg("--theme")
        .arg("base")
        .output()
        .unwrap();
    assert!(output.status.success());
    let payload: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(payload["theme"], "base");
    assert_eq!(payload["groups"].as_array().map(Vec::len), Some(3));
}

#[test]
fn render_uses_template_file() {
    forms()
        .arg("render")
        .arg(fixture_path("signup.json"))
        .arg("--template")
        .arg(fixture_path("form.hbs"))
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"<form id="signup""#))
        .stdout(predicate::str::contains(r#"class="bootstrap3""#))
        .stdout(predicate::str::contains("<span data-cols=\"10\">bio</span>"));
}

#[test]
fn render_reports_missing_template() {
    let temp = TempDir::new().unwrap();
    forms()
        .arg("render")
        .arg(fixture_path("signup.json"))
        .arg("--template")
        .arg(temp.path().join("nope.hbs"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("bootstrap3/form/nope"));
}

#[test]
fn schema_describes_config() {
    forms()
        .arg("schema")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"trimNamePrefix\""))
        .stdout(predicate::str::contains("\"elements\""));
}
