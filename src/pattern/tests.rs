use super::*;
use std::path::PathBuf;

fn strings(patterns: &[&str]) -> Vec<String> {
    patterns.iter().map(|p| p.to_string()).collect()
}

fn rel(parts: &[&str]) -> PathBuf {
    parts.iter().collect()
}

#[test]
fn test_empty_includes_match_everything() {
    let matcher = PatternMatcher::new(&[], &[], false).unwrap();

    assert!(matcher.matches(Path::new("a.txt")));
    assert!(matcher.matches(&rel(&["deep", "nested", "file.bin"])));
}

#[test]
fn test_star_stays_within_one_segment() {
    let matcher = PatternMatcher::new(&strings(&["*.class"]), &[], false).unwrap();

    assert!(matcher.matches(Path::new("A.class")));
    assert!(!matcher.matches(&rel(&["sub", "B.class"])));
}

#[test]
fn test_question_mark_matches_single_character() {
    let matcher = PatternMatcher::new(&strings(&["file?.txt"]), &[], false).unwrap();

    assert!(matcher.matches(Path::new("file1.txt")));
    assert!(!matcher.matches(Path::new("file.txt")));
    assert!(!matcher.matches(Path::new("file12.txt")));
}

#[test]
fn test_double_star_spans_zero_or_more_segments() {
    let matcher = PatternMatcher::new(&strings(&["**/*.tmp"]), &[], false).unwrap();

    assert!(matcher.matches(Path::new("top.tmp")));
    assert!(matcher.matches(&rel(&["a", "mid.tmp"])));
    assert!(matcher.matches(&rel(&["a", "b", "c", "deep.tmp"])));
    assert!(!matcher.matches(&rel(&["a", "b", "deep.txt"])));
}

#[test]
fn test_excludes_win_over_includes() {
    let matcher =
        PatternMatcher::new(&strings(&["**/*.class"]), &strings(&["keep/**"]), false).unwrap();

    assert!(matcher.matches(&rel(&["out", "A.class"])));
    assert!(!matcher.matches(&rel(&["keep", "A.class"])));
    assert!(!matcher.matches(&rel(&["keep", "nested", "B.class"])));
}

#[test]
fn test_trailing_slash_means_whole_subtree() {
    let matcher = PatternMatcher::new(&strings(&["classes/"]), &[], false).unwrap();

    assert!(matcher.matches(Path::new("classes")));
    assert!(matcher.matches(&rel(&["classes", "Foo.class"])));
    assert!(matcher.matches(&rel(&["classes", "a", "b"])));
    assert!(!matcher.matches(Path::new("test-classes")));
}

#[test]
fn test_double_star_suffix_also_selects_directory_itself() {
    let matcher = PatternMatcher::new(&[], &strings(&["keep/**"]), false).unwrap();

    assert!(matcher.is_excluded(Path::new("keep")));
    assert!(!matcher.matches(Path::new("keep")));
    assert!(matcher.matches(Path::new("keeper")));
}

#[test]
fn test_backslash_patterns_use_segment_matching() {
    let matcher = PatternMatcher::new(&strings(&["sub\\*.log"]), &[], false).unwrap();

    assert!(matcher.matches(&rel(&["sub", "run.log"])));
}

#[test]
fn test_matching_is_case_sensitive() {
    let matcher = PatternMatcher::new(&strings(&["*.CLASS"]), &[], false).unwrap();

    assert!(matcher.matches(Path::new("A.CLASS")));
    assert!(!matcher.matches(Path::new("A.class")));
}

#[test]
fn test_default_excludes_are_appended_not_replacing() {
    let matcher = PatternMatcher::new(&[], &strings(&["*.keep"]), true).unwrap();

    assert!(!matcher.matches(Path::new("notes.keep")));
    assert!(!matcher.matches(Path::new(".git")));
    assert!(!matcher.matches(&rel(&[".git", "HEAD"])));
    assert!(!matcher.matches(&rel(&["src", ".svn", "entries"])));
    assert!(!matcher.matches(Path::new("Main.java~")));
    assert!(!matcher.matches(&rel(&["a", ".DS_Store"])));
    assert!(matcher.matches(Path::new("Main.class")));
}

#[test]
fn test_default_excludes_can_be_disabled() {
    let matcher = PatternMatcher::new(&[], &[], false).unwrap();

    assert!(matcher.matches(Path::new(".git")));
    assert!(matcher.matches(&rel(&[".git", "HEAD"])));
}

#[test]
fn test_invalid_pattern_is_invalid_request() {
    let err = PatternMatcher::new(&strings(&["a[b"]), &[], false).unwrap_err();

    assert!(matches!(err, ScourError::InvalidRequest(_)));
    assert!(err.to_string().contains("'a[b'"));
}

#[test]
fn test_one_shot_matches() {
    let includes = strings(&["**/*.class"]);
    let excludes = strings(&["**/Keep*"]);

    assert!(matches(&rel(&["x", "A.class"]), &includes, &excludes).unwrap());
    assert!(!matches(&rel(&["x", "KeepMe.class"]), &includes, &excludes).unwrap());
    assert!(!matches(Path::new("A.java"), &includes, &excludes).unwrap());
}

#[test]
fn test_segment_path_drops_curdir() {
    assert_eq!(segment_path(&rel(&[".", "a", "b"])), "a/b");
    assert_eq!(segment_path(Path::new("")), "");
}
