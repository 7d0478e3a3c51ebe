use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::classifier::{Classify, ClassifierError, Prediction};

/// Extensions accepted by the directory scan, compared case-insensitively.
pub const ACCEPTED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Configuration-level errors that abort a run before or during the scan.
#[derive(Debug, thiserror::Error)]
pub enum EvalError {
    #[error("Image directory not found: {0}")]
    MissingDirectory(PathBuf),
    #[error("IO error while scanning images: {0}")]
    Io(#[from] io::Error),
}

/// Aggregate counters for one evaluation run.
///
/// `total` counts every accepted file, including files later skipped for
/// preprocessing or prediction errors; only cleanly classified files land in
/// `success` or `failure`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub total: u64,
    pub success: u64,
    pub failure: u64,
}

impl RunSummary {
    /// Success percentage over `total`. Files skipped by soft failures stay
    /// in the denominator, matching the harness's historical metric.
    pub fn success_rate(&self) -> f64 {
        if self.total > 0 {
            self.success as f64 / self.total as f64 * 100.0
        } else {
            0.0
        }
    }
}

/// Outcome for a single scanned file: the prediction, or the soft failure
/// that made the runner skip it.
#[derive(Debug)]
pub struct FileRecord {
    pub file_name: String,
    pub outcome: Result<Prediction, ClassifierError>,
}

/// Everything a finished run produced: the per-file records in scan order
/// and the final counters.
#[derive(Debug)]
pub struct RunReport {
    pub records: Vec<FileRecord>,
    pub summary: RunSummary,
}

/// Walks a directory of test images, classifies each one, and tallies the
/// outcomes against a set of failure labels.
///
/// The scan is strictly sequential: each file is fully processed before the
/// next is considered. Per-file errors never abort the run; they are logged,
/// recorded, and excluded from the success/failure counters while still
/// counting toward the total.
pub struct EvaluationRunner<C> {
    classifier: C,
    image_dir: PathBuf,
    failure_labels: HashSet<String>,
}

impl<C: Classify> EvaluationRunner<C> {
    /// Creates a runner over `image_dir`. Predictions whose label is in
    /// `failure_labels` are tallied as failures; everything else is a success.
    pub fn new(
        classifier: C,
        image_dir: impl Into<PathBuf>,
        failure_labels: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            classifier,
            image_dir: image_dir.into(),
            failure_labels: failure_labels.into_iter().map(Into::into).collect(),
        }
    }

    /// Runs the evaluation over every accepted image in the directory.
    ///
    /// Enumeration order is whatever the filesystem yields; only the final
    /// counters are deterministic for a fixed directory snapshot.
    ///
    /// # Errors
    /// [`EvalError::MissingDirectory`] if the image directory does not
    /// exist; [`EvalError::Io`] if the scan itself fails.
    pub fn run(&self) -> Result<RunReport, EvalError> {
        if !self.image_dir.is_dir() {
            return Err(EvalError::MissingDirectory(self.image_dir.clone()));
        }

        info!(
            "Starting classification of test images in {}",
            self.image_dir.display()
        );

        let mut summary = RunSummary::default();
        let mut records = Vec::new();

        for entry in fs::read_dir(&self.image_dir)? {
            let entry = entry?;
            let path = entry.path();
            if !is_accepted_image(&path) {
                continue;
            }
            let file_name = entry.file_name().to_string_lossy().into_owned();
            summary.total += 1;

            let outcome = self.classifier.classify_file(&path);
            match &outcome {
                Ok(prediction) => {
                    if self.failure_labels.contains(&prediction.label) {
                        summary.failure += 1;
                    } else {
                        summary.success += 1;
                    }
                }
                Err(cause) => {
                    warn!("Skipping image '{}': {}", file_name, cause);
                }
            }
            records.push(FileRecord { file_name, outcome });
        }

        info!(
            "Classification finished: {} files, {} successes, {} failures",
            summary.total, summary.success, summary.failure
        );
        Ok(RunReport { records, summary })
    }
}

fn is_accepted_image(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|extension| extension.to_str())
            .map(|extension| {
                ACCEPTED_EXTENSIONS
                    .iter()
                    .any(|accepted| extension.eq_ignore_ascii_case(accepted))
            })
            .unwrap_or(false)
}
