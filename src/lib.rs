//! A batch evaluation harness for an ONNX image classifier.
//!
//! The harness loads a trained classifier and its label set, runs inference
//! over a directory of test images, and tallies each prediction as a success
//! or a failure depending on a configurable set of failure labels.
//!
//! # Basic Usage
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use moodlens::{EvaluationRunner, ImageClassifier};
//!
//! let classifier = ImageClassifier::builder()
//!     .with_model("models/model.onnx")?
//!     .with_labels("models/labels.txt")?
//!     .with_input_size(224, 224)
//!     .build()?;
//!
//! let runner = EvaluationRunner::new(classifier, "images", ["neutral", "happy"]);
//! let report = runner.run()?;
//! println!("{}", report);
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! The classifier is thread-safe and can be shared across threads using
//! `Arc`; the evaluation loop itself is deliberately single-threaded so that
//! two runs over an unchanged directory produce identical summaries.

pub mod classifier;
pub mod eval;
pub mod report;
mod runtime;
pub mod server;

pub use classifier::{
    load_labels, preprocess_bytes, preprocess_file, ClassifierBuilder, ClassifierError,
    ClassifierInfo, Classify, ImageClassifier, LabelError, Prediction, ScorePredictor,
};
pub use eval::{EvalError, EvaluationRunner, FileRecord, RunReport, RunSummary};
pub use runtime::{open_session, RuntimeConfig};

pub fn init_logger() {
    env_logger::init();
}
