//! Command line behavior of the cppglue binary.

#![allow(non_snake_case)]

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const UNIT: &str = r#"{
  "main_file": "/src/shapes.cpp",
  "includes": [ { "name": "shapes.h", "full_path": "/src/shapes.h" } ],
  "declarations": [
    {
      "kind": "record",
      "qualified_name": "geo::Point",
      "plain_name": "Point",
      "namespace": "geo",
      "location": { "file": "/src/shapes.h", "line": 3 },
      "fields": [
        { "name": "x", "type": { "spelling": "double", "canonical": "double" } }
      ]
    }
  ]
}"#;

fn cppglue(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cppglue"))
        .current_dir(dir)
        .args(args)
        .output()
        .unwrap()
}

#[test]
fn generate___sightings_document___writes_package() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("shapes.json"), UNIT).unwrap();

    let output = cppglue(
        dir.path(),
        &["generate", "--module", "shapes", "--output", "out", "shapes.json"],
    );

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let bindings = std::fs::read_to_string(dir.path().join("out/shapes.cpp")).unwrap();
    assert!(bindings.contains(".def_readwrite(\"x\", &geo::Point::x)"));
    assert!(bindings.contains("#include \"shapes.h\""));
    assert!(dir.path().join("out/shapes/shapes/shapes.pyi").is_file());
    assert!(String::from_utf8_lossy(&output.stdout).contains("7 written"));
}

#[test]
fn generate___rerun___reports_unchanged() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("shapes.json"), UNIT).unwrap();
    let args = ["generate", "-m", "shapes", "-o", "out", "shapes.json"];

    cppglue(dir.path(), &args);
    let output = cppglue(dir.path(), &args);

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("0 written, 7 unchanged"));
}

#[test]
fn generate___config_file___supplies_settings() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("shapes.json"), UNIT).unwrap();
    std::fs::write(
        dir.path().join("cppglue.toml"),
        "module_name = \"shapes\"\nversion = \"2.0.0\"\noutput_dir = \"gen\"\nsources = [\"shapes.json\"]\n",
    )
    .unwrap();

    let output = cppglue(dir.path(), &["generate"]);

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let pyproject = std::fs::read_to_string(dir.path().join("gen/shapes/pyproject.toml")).unwrap();
    assert!(pyproject.contains("version = \"2.0.0\""));
}

#[test]
fn generate___without_sources___fails() {
    let dir = TempDir::new().unwrap();

    let output = cppglue(dir.path(), &["generate", "--module", "shapes"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("source"));
}

#[test]
fn generate___missing_source___fails() {
    let dir = TempDir::new().unwrap();

    let output = cppglue(dir.path(), &["generate", "-m", "shapes", "absent.json"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("absent.json"));
}

#[test]
fn check___valid_config___succeeds() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("cppglue.toml"),
        "module_name = \"shapes\"\nsources = [\"shapes.cpp\"]\n",
    )
    .unwrap();

    let output = cppglue(dir.path(), &["check"]);

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Config is valid!"));
}

#[test]
fn check___invalid_module_name___fails() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("bad.toml"),
        "module_name = \"my-module\"\nsources = [\"a.cpp\"]\n",
    )
    .unwrap();

    let output = cppglue(dir.path(), &["check", "--config", "bad.toml"]);

    assert!(!output.status.success());
}
