#![allow(non_snake_case)]

use super::*;
use tempfile::TempDir;

const UNIT: &str = r#"{
  "main_file": "/src/a.cpp",
  "declarations": [
    {
      "kind": "record",
      "qualified_name": "geo::Point",
      "plain_name": "Point",
      "location": { "file": "/src/a.cpp", "line": 1 }
    }
  ]
}"#;

#[test]
fn SightingsFileProvider___reads_document() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("a.json");
    std::fs::write(&path, UNIT).unwrap();

    let unit = SightingsFileProvider.analyze(&path, &[]).unwrap();

    assert_eq!(unit.main_file, "/src/a.cpp");
    assert_eq!(unit.declarations.len(), 1);
}

#[test]
fn SightingsFileProvider___missing_main_file___uses_source_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("b.json");
    std::fs::write(&path, "{}").unwrap();

    let unit = SightingsFileProvider.analyze(&path, &[]).unwrap();

    assert_eq!(unit.main_file, path.display().to_string());
}

#[test]
fn SightingsFileProvider___missing_file___sightings_error() {
    let err = SightingsFileProvider
        .analyze(Path::new("/no/such/unit.json"), &[])
        .unwrap_err();

    assert!(matches!(err, ProviderError::Sightings { .. }));
    assert!(err.to_string().contains("/no/such/unit.json"));
}

#[test]
fn SightingsFileProvider___malformed_document___sightings_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(&path, "not json").unwrap();

    let err = SightingsFileProvider.analyze(&path, &[]).unwrap_err();

    assert!(matches!(err, ProviderError::Sightings { .. }));
}

#[test]
fn FrontendCommandProvider___missing_executable___launch_error() {
    let provider = FrontendCommandProvider::new("/no/such/frontend-binary");

    let err = provider.analyze(Path::new("a.cpp"), &[]).unwrap_err();

    assert!(matches!(err, ProviderError::Launch { .. }));
}

#[cfg(unix)]
mod unix {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    fn script(dir: &Path, body: &str) -> String {
        let path = dir.join("frontend.sh");
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path.display().to_string()
    }

    #[test]
    fn FrontendCommandProvider___success___parses_stdout() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("a.json");
        std::fs::write(&source, UNIT).unwrap();
        let provider = FrontendCommandProvider::new(script(dir.path(), "cat \"$1\""));

        let unit = provider.analyze(&source, &[]).unwrap();

        assert_eq!(unit.declarations.len(), 1);
    }

    #[test]
    fn FrontendCommandProvider___passes_separator_and_args() {
        let dir = TempDir::new().unwrap();
        let log = dir.path().join("args.txt");
        let body = format!(
            "echo \"$@\" > '{}'\necho '{{}}'",
            log.display()
        );
        let provider = FrontendCommandProvider::new(script(dir.path(), &body));

        provider
            .analyze(Path::new("unit.cpp"), &["-std=c++17".to_string(), "-Iinc".to_string()])
            .unwrap();

        assert_eq!(
            std::fs::read_to_string(&log).unwrap().trim(),
            "unit.cpp -- -std=c++17 -Iinc"
        );
    }

    #[test]
    fn FrontendCommandProvider___nonzero_exit___failed_with_stderr() {
        let dir = TempDir::new().unwrap();
        let provider =
            FrontendCommandProvider::new(script(dir.path(), "echo 'parse error' >&2\nexit 3"));

        let err = provider.analyze(Path::new("a.cpp"), &[]).unwrap_err();

        match err {
            ProviderError::Failed { stderr, .. } => assert_eq!(stderr, "parse error"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn FrontendCommandProvider___garbage_stdout___sightings_error() {
        let dir = TempDir::new().unwrap();
        let provider = FrontendCommandProvider::new(script(dir.path(), "echo garbage"));

        let err = provider.analyze(Path::new("a.cpp"), &[]).unwrap_err();

        assert!(matches!(err, ProviderError::Sightings { .. }));
    }
}

#[test]
fn from_config___selects_provider_by_frontend() {
    let with_frontend = GlueConfig {
        frontend: Some("clang-sightings".to_string()),
        ..GlueConfig::default()
    };

    assert_eq!(from_config(&with_frontend).name(), "clang-sightings");
    assert_eq!(from_config(&GlueConfig::default()).name(), "sightings-file");
}
