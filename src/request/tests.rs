//! Tests for request loading and validation.

use crate::error::ScourError;
use crate::request::{CleanupRequest, FilesetSpec};
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_default_request() {
    let request = CleanupRequest::default();

    assert!(request.default_targets.is_empty());
    assert!(request.filesets.is_empty());
    assert!(!request.exclude_default_directories);
    assert!(request.fail_on_error);
    assert!(request.retry_on_error);
    assert!(!request.follow_symlinks);
    assert!(!request.skip);
    assert_eq!(request.parallelism, None);
}

#[test]
fn test_parse_minimal_yaml() {
    let request = CleanupRequest::from_yaml("").unwrap();

    assert_eq!(request, CleanupRequest::default());
}

#[test]
fn test_parse_full_yaml() {
    let yaml = r#"
default_targets: [target, target/site]
exclude_default_directories: true
fail_on_error: false
retry_on_error: false
follow_symlinks: true
skip: true
parallelism: 2
filesets:
  - directory: out
    includes: ["**/*.class"]
    excludes: ["keep/**"]
    follow_symlinks: true
    use_default_excludes: false
"#;
    let request = CleanupRequest::from_yaml(yaml).unwrap();

    assert_eq!(
        request.default_targets,
        vec![PathBuf::from("target"), PathBuf::from("target/site")]
    );
    assert!(request.exclude_default_directories);
    assert!(!request.fail_on_error);
    assert!(!request.retry_on_error);
    assert!(request.follow_symlinks);
    assert!(request.skip);
    assert_eq!(request.parallelism, Some(2));

    let fileset = &request.filesets[0];
    assert_eq!(fileset.directory, PathBuf::from("out"));
    assert_eq!(fileset.includes, vec!["**/*.class"]);
    assert_eq!(fileset.excludes, vec!["keep/**"]);
    assert!(fileset.follow_symlinks);
    assert!(!fileset.use_default_excludes);
}

#[test]
fn test_fileset_defaults_in_yaml() {
    let yaml = r#"
filesets:
  - directory: build
"#;
    let request = CleanupRequest::from_yaml(yaml).unwrap();

    assert_eq!(request.filesets, vec![FilesetSpec::new("build")]);
    assert!(request.filesets[0].use_default_excludes);
}

#[test]
fn test_unknown_fields_are_ignored() {
    let yaml = r#"
default_targets: [target]
some_future_option: 42
"#;
    let request = CleanupRequest::from_yaml(yaml).unwrap();

    assert_eq!(request.default_targets, vec![PathBuf::from("target")]);
}

#[test]
fn test_malformed_yaml_is_user_error() {
    let err = CleanupRequest::from_yaml("default_targets: {").unwrap_err();

    assert!(matches!(err, ScourError::UserError(_)));
}

#[test]
fn test_zero_parallelism_is_rejected() {
    let err = CleanupRequest::from_yaml("parallelism: 0").unwrap_err();

    assert!(matches!(err, ScourError::InvalidRequest(_)));
}

#[test]
fn test_fileset_without_directory_is_rejected() {
    let request = CleanupRequest::new().with_fileset(FilesetSpec::default());

    let err = request.validate().unwrap_err();
    assert!(err.to_string().contains("fileset #1 has no directory"));
}

#[test]
fn test_empty_pattern_is_rejected() {
    let request = CleanupRequest::new().with_fileset(FilesetSpec::new("out").include("  "));

    assert!(matches!(
        request.validate().unwrap_err(),
        ScourError::InvalidRequest(_)
    ));
}

#[test]
fn test_active_default_targets_skip_empty_entries() {
    let request = CleanupRequest::new()
        .with_default_target("target")
        .with_default_target("")
        .with_default_target("out");

    assert_eq!(
        request.active_default_targets(),
        vec![PathBuf::from("target"), PathBuf::from("out")]
    );
}

#[test]
fn test_exclude_default_directories_drops_targets() {
    let mut request = CleanupRequest::new().with_default_target("target");
    request.exclude_default_directories = true;

    assert!(request.active_default_targets().is_empty());
}

#[test]
fn test_effective_parallelism() {
    let request = CleanupRequest::new();
    let workers = request.effective_parallelism();
    assert!((1..=4).contains(&workers));

    assert_eq!(CleanupRequest::new().with_parallelism(7).effective_parallelism(), 7);
}

#[test]
fn test_yaml_roundtrip_preserves_request() {
    let request = CleanupRequest::new()
        .with_default_target("target")
        .with_fileset(FilesetSpec::new("out").include("**/*.o").exclude("vendor/"))
        .fail_on_error(false);

    let yaml = request.to_yaml().unwrap();
    assert_eq!(CleanupRequest::from_yaml(&yaml).unwrap(), request);
}

#[test]
fn test_load_from_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("clean.yaml");
    std::fs::write(&path, "default_targets: [target]\nfail_on_error: false\n").unwrap();

    let request = CleanupRequest::load(&path).unwrap();
    assert_eq!(request.default_targets, vec![PathBuf::from("target")]);
    assert!(!request.fail_on_error);

    let err = CleanupRequest::load(temp.path().join("missing.yaml")).unwrap_err();
    assert!(err.to_string().contains("failed to read request file"));
}
