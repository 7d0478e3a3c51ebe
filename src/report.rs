//! Console rendering of evaluation results. Purely presentational; the
//! format strings are the harness's stable console contract.

use std::fmt;

use crate::classifier::ClassifierError;
use crate::eval::{FileRecord, RunReport, RunSummary};

/// One line per scanned file: the prediction with its confidence as a
/// percentage, or the reason the file was skipped.
pub fn render_file_line(record: &FileRecord) -> String {
    match &record.outcome {
        Ok(prediction) => format!(
            "Image: {} | Predicted: {} | Confidence: {:.2}%",
            record.file_name,
            prediction.label,
            prediction.confidence * 100.0
        ),
        Err(ClassifierError::ImageError(_)) => format!(
            "Skipping image '{}' due to preprocessing error.",
            record.file_name
        ),
        Err(_) => format!(
            "Skipping image '{}' due to prediction error.",
            record.file_name
        ),
    }
}

/// The summary block emitted once at the end of a run.
pub fn render_summary(summary: &RunSummary) -> String {
    format!(
        "===== Test Results =====\n\
         Total number of files: {}\n\
         Total number of failures: {}\n\
         Total number of successes: {}\n\
         Success rate: {:.2}%\n\
         ========================",
        summary.total,
        summary.failure,
        summary.success,
        summary.success_rate()
    )
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for record in &self.records {
            writeln!(f, "{}", render_file_line(record))?;
        }
        writeln!(f)?;
        write!(f, "{}", render_summary(&self.summary))
    }
}
