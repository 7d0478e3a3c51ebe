use moodlens::{load_labels, LabelError};
use std::fs;
use std::path::PathBuf;

fn fixture(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("moodlens-labels-{}-{}", std::process::id(), name));
    fs::write(&path, contents).expect("Failed to write label fixture");
    path
}

#[test]
fn test_load_valid_labels() -> Result<(), LabelError> {
    let path = fixture("valid.txt", "0 neutral\n1 happy\n2 sad\n3 angry\n");
    let labels = load_labels(&path)?;
    assert_eq!(labels, vec!["neutral", "happy", "sad", "angry"]);
    fs::remove_file(path).ok();
    Ok(())
}

#[test]
fn test_length_matches_non_empty_lines() -> Result<(), LabelError> {
    let path = fixture("blanks.txt", "0 neutral\n\n1 happy\n   \n2 sad\n");
    let labels = load_labels(&path)?;
    assert_eq!(labels.len(), 3);
    fs::remove_file(path).ok();
    Ok(())
}

#[test]
fn test_label_names_keep_embedded_spaces() -> Result<(), LabelError> {
    let path = fixture("embedded.txt", "0 not happy\n1 very   sad\n");
    let labels = load_labels(&path)?;
    assert_eq!(labels, vec!["not happy", "very   sad"]);
    fs::remove_file(path).ok();
    Ok(())
}

#[test]
fn test_tab_separated_labels() -> Result<(), LabelError> {
    let path = fixture("tabs.txt", "0\tneutral\n1\thappy\n");
    let labels = load_labels(&path)?;
    assert_eq!(labels, vec!["neutral", "happy"]);
    fs::remove_file(path).ok();
    Ok(())
}

#[test]
fn test_missing_file() {
    let path = std::env::temp_dir().join("moodlens-labels-definitely-missing.txt");
    let err = load_labels(&path).unwrap_err();
    assert!(matches!(err, LabelError::MissingFile(_)));
}

#[test]
fn test_line_without_separator_is_malformed() {
    let path = fixture("no-separator.txt", "0 neutral\nhappy\n2 sad\n");
    let err = load_labels(&path).unwrap_err();
    match err {
        LabelError::Malformed { line, content } => {
            assert_eq!(line, 2);
            assert_eq!(content, "happy");
        }
        other => panic!("Expected a malformed-label error, got {other:?}"),
    }
    fs::remove_file(path).ok();
}

#[test]
fn test_index_only_line_is_malformed() {
    let path = fixture("index-only.txt", "0 neutral\n1 \n");
    let err = load_labels(&path).unwrap_err();
    assert!(matches!(err, LabelError::Malformed { line: 2, .. }));
    fs::remove_file(path).ok();
}
