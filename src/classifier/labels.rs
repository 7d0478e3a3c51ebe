use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Errors raised while reading a label definition file.
#[derive(Debug, thiserror::Error)]
pub enum LabelError {
    #[error("Labels file not found: {0}")]
    MissingFile(PathBuf),
    #[error("Labels file line {line} is not in the expected format: {content:?}")]
    Malformed { line: usize, content: String },
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Loads class labels from a text file with one `"<index> <name>"` pair per
/// line, discarding the index prefix.
///
/// Each line is split on its first whitespace only, so label names may
/// themselves contain spaces. Blank lines are skipped; a non-empty line
/// without a separable second token is malformed.
///
/// The resulting order matches the file order and is index-aligned with the
/// classifier's output vector. Checking the length against the model's
/// output cardinality is the caller's job, not this function's.
pub fn load_labels(path: impl AsRef<Path>) -> Result<Vec<String>, LabelError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(LabelError::MissingFile(path.to_path_buf()));
    }
    let contents = fs::read_to_string(path)?;

    let mut labels = Vec::new();
    for (index, raw) in contents.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let (_, name) = line
            .split_once(|c: char| c.is_whitespace())
            .ok_or_else(|| LabelError::Malformed {
                line: index + 1,
                content: raw.to_string(),
            })?;
        labels.push(name.trim().to_string());
    }
    Ok(labels)
}
