use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use ndarray::Array4;
use ort::session::Session;
use ort::value::Tensor;

use super::error::ClassifierError;
use super::preprocess;
use super::ClassifierInfo;

/// A single classification outcome: the predicted label and the raw score
/// the model assigned to it. The score is forwarded unchanged, so it is only
/// a calibrated probability if the model produces one.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: String,
    pub confidence: f32,
}

/// The model seam: anything that can turn a preprocessed batch into a score
/// vector, one score per class.
///
/// The provided [`classify`](ScorePredictor::classify) takes the argmax over
/// the scores and resolves it against an index-aligned label list. Callers
/// are expected to have checked `labels.len()` against
/// [`output_cardinality`](ScorePredictor::output_cardinality) once at
/// startup; it is not re-checked per call.
pub trait ScorePredictor {
    /// Width of the model's output vector.
    fn output_cardinality(&self) -> usize;

    /// Runs inference on a `(1, height, width, 3)` batch.
    fn predict(&self, batch: &Array4<f32>) -> Result<Vec<f32>, ClassifierError>;

    /// Predicts the class of the batch, returning the winning label and its
    /// score.
    fn classify(
        &self,
        batch: &Array4<f32>,
        labels: &[String],
    ) -> Result<Prediction, ClassifierError> {
        let scores = self.predict(batch)?;
        let (index, confidence) = scores
            .iter()
            .copied()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .ok_or_else(|| {
                ClassifierError::PredictionError("Model produced an empty score vector".into())
            })?;
        let label = labels.get(index).cloned().ok_or_else(|| {
            ClassifierError::PredictionError(format!(
                "Predicted index {} is out of range for {} labels",
                index,
                labels.len()
            ))
        })?;
        Ok(Prediction { label, confidence })
    }
}

/// The per-file classification seam the evaluation loop consumes: decode and
/// preprocess a file, then classify it.
pub trait Classify {
    fn classify_file(&self, path: &Path) -> Result<Prediction, ClassifierError>;
}

/// An image classifier backed by an ONNX model.
///
/// # Thread Safety
///
/// This type is automatically `Send + Sync` because all of its fields are
/// thread-safe: `String`, `usize`, and `(u32, u32)` are `Send + Sync`, and
/// the `Session` and label list are wrapped in `Arc`.
///
/// ```no_run
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use moodlens::ImageClassifier;
///
/// let classifier = ImageClassifier::builder()
///     .with_model("models/model.onnx")?
///     .with_labels("models/labels.txt")?
///     .build()?;
///
/// let prediction = classifier.classify_path("images/face.jpg")?;
/// println!("{} ({:.2}%)", prediction.label, prediction.confidence * 100.0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ImageClassifier {
    pub model_path: String,
    pub labels_path: String,
    pub session: Arc<Session>,
    pub labels: Arc<Vec<String>>,
    pub input_size: (u32, u32),
    pub output_cardinality: usize,
}

// Compile-time verification of thread-safety
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    fn verify_thread_safety() {
        assert_send_sync::<ImageClassifier>();
    }
};

impl ImageClassifier {
    /// Creates a new ClassifierBuilder for fluent construction
    pub fn builder() -> super::builder::ClassifierBuilder {
        super::builder::ClassifierBuilder::new()
    }

    /// Returns information about the classifier's current state
    pub fn info(&self) -> ClassifierInfo {
        ClassifierInfo {
            model_path: self.model_path.clone(),
            labels_path: self.labels_path.clone(),
            num_classes: self.labels.len(),
            class_labels: self.labels.as_ref().clone(),
            input_size: self.input_size,
        }
    }

    /// Classifies an already preprocessed batch against this classifier's
    /// own label set.
    pub fn classify_tensor(&self, batch: &Array4<f32>) -> Result<Prediction, ClassifierError> {
        self.classify(batch, &self.labels)
    }

    /// Convenience wrapper over [`Classify::classify_file`] that accepts any
    /// path-like argument.
    pub fn classify_path(&self, path: impl AsRef<Path>) -> Result<Prediction, ClassifierError> {
        self.classify_file(path.as_ref())
    }
}

impl ScorePredictor for ImageClassifier {
    fn output_cardinality(&self) -> usize {
        self.output_cardinality
    }

    fn predict(&self, batch: &Array4<f32>) -> Result<Vec<f32>, ClassifierError> {
        run_scores(&self.session, batch)
    }
}

impl Classify for ImageClassifier {
    fn classify_file(&self, path: &Path) -> Result<Prediction, ClassifierError> {
        let tensor = preprocess::preprocess_file(path, self.input_size)?;
        self.classify_tensor(&tensor)
    }
}

/// Feeds one batch through the session's sole input and flattens the first
/// output into a score vector.
pub(crate) fn run_scores(
    session: &Session,
    batch: &Array4<f32>,
) -> Result<Vec<f32>, ClassifierError> {
    let input_name = session
        .inputs
        .first()
        .map(|input| input.name.clone())
        .ok_or_else(|| ClassifierError::ModelError("Model declares no inputs".into()))?;

    let batch_dyn = batch.clone().into_dyn();
    let pixels = batch_dyn.as_standard_layout();

    let mut input_tensors = HashMap::new();
    input_tensors.insert(
        input_name.as_str(),
        Tensor::from_array(&pixels)
            .map_err(|e| ClassifierError::ModelError(format!("Failed to create input tensor: {}", e)))?,
    );

    let outputs = session
        .run(input_tensors)
        .map_err(|e| ClassifierError::PredictionError(format!("Failed to run model: {}", e)))?;
    let scores = outputs[0]
        .try_extract_tensor::<f32>()
        .map_err(|e| {
            ClassifierError::PredictionError(format!("Failed to extract output tensor: {}", e))
        })?;

    // Batch size is fixed at 1, so a [1, N] output flattens to the row itself.
    Ok(scores.iter().copied().collect())
}
