use std::path::Path;
use std::sync::Arc;

use log::{error, info};
use ndarray::Array4;
use ort::session::Session;

use super::error::ClassifierError;
use super::labels::load_labels;
use super::model::{run_scores, ImageClassifier};
use crate::runtime::{open_session, RuntimeConfig};

/// Input size `(width, height)` assumed when the caller does not override it.
pub const DEFAULT_INPUT_SIZE: (u32, u32) = (224, 224);

/// A builder for constructing an [`ImageClassifier`] with a fluent interface.
///
/// Loading the model and the labels are fallible steps, so both return
/// `Result`; [`build`](ClassifierBuilder::build) performs the final
/// validation that the label count matches the model's output width.
///
/// # Example
/// ```no_run
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use moodlens::ImageClassifier;
///
/// let classifier = ImageClassifier::builder()
///     .with_model("models/model.onnx")?
///     .with_labels("models/labels.txt")?
///     .with_input_size(224, 224)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default, Debug)]
pub struct ClassifierBuilder {
    model_path: Option<String>,
    labels_path: Option<String>,
    session: Option<Session>,
    labels: Option<Vec<String>>,
    input_size: Option<(u32, u32)>,
    runtime_config: RuntimeConfig,
}

impl ClassifierBuilder {
    /// Creates a new empty ClassifierBuilder instance with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the runtime configuration for ONNX model execution
    pub fn with_runtime_config(mut self, config: RuntimeConfig) -> Self {
        self.runtime_config = config;
        self
    }

    /// Sets the input size `(width, height)` the model expects images to be
    /// fitted to. Defaults to [`DEFAULT_INPUT_SIZE`].
    pub fn with_input_size(mut self, width: u32, height: u32) -> Self {
        self.input_size = Some((width, height));
        self
    }

    /// Loads the serialized model from `path`.
    ///
    /// # Errors
    /// Returns a [`ClassifierError::BuildError`] if:
    /// - The path is empty or already set
    /// - The model file does not exist
    /// - The session failed to load
    /// - The model structure is invalid (no inputs or no outputs)
    pub fn with_model(mut self, path: impl AsRef<Path>) -> Result<Self, ClassifierError> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(ClassifierError::BuildError(
                "Model path cannot be empty".to_string(),
            ));
        }
        if self.model_path.is_some() {
            return Err(ClassifierError::BuildError(
                "Model path already set".to_string(),
            ));
        }
        if !path.exists() {
            return Err(ClassifierError::BuildError(format!(
                "Model file not found: {}",
                path.display()
            )));
        }

        let session = open_session(path, &self.runtime_config)?;
        Self::validate_model(&session)?;
        info!("Model structure validated successfully");

        self.model_path = Some(path.to_string_lossy().to_string());
        self.session = Some(session);
        Ok(self)
    }

    /// Loads the class labels from `path`.
    ///
    /// # Errors
    /// Returns a [`ClassifierError::BuildError`] wrapping the underlying
    /// [`LabelError`](super::LabelError) if the file is missing or malformed,
    /// or if the labels path is already set.
    pub fn with_labels(mut self, path: impl AsRef<Path>) -> Result<Self, ClassifierError> {
        let path = path.as_ref();
        if self.labels_path.is_some() {
            return Err(ClassifierError::BuildError(
                "Labels path already set".to_string(),
            ));
        }

        let labels = load_labels(path).map_err(|e| {
            error!("Failed to load labels: {}", e);
            ClassifierError::BuildError(format!("Failed to load labels: {}", e))
        })?;
        info!("Labels loaded successfully: {:?}", labels);

        self.labels_path = Some(path.to_string_lossy().to_string());
        self.labels = Some(labels);
        Ok(self)
    }

    /// Builds and returns the final [`ImageClassifier`] instance.
    ///
    /// Runs a single zero tensor through the model to learn its output
    /// cardinality, then checks that the label count matches it.
    ///
    /// # Errors
    /// - [`ClassifierError::BuildError`] if the model or labels are not set
    /// - [`ClassifierError::PredictionError`] if the probe inference fails
    /// - [`ClassifierError::ValidationError`] if the label count does not
    ///   match the model's output classes
    pub fn build(self) -> Result<ImageClassifier, ClassifierError> {
        let (model_path, session) = match (self.model_path, self.session) {
            (Some(path), Some(session)) => (path, session),
            _ => {
                return Err(ClassifierError::BuildError(
                    "Model path must be set".to_string(),
                ))
            }
        };
        let (labels_path, labels) = match (self.labels_path, self.labels) {
            (Some(path), Some(labels)) => (path, labels),
            _ => {
                return Err(ClassifierError::BuildError(
                    "Labels path must be set".to_string(),
                ))
            }
        };
        let input_size = self.input_size.unwrap_or(DEFAULT_INPUT_SIZE);

        // Infer the output width by running a probe input through the model.
        let (width, height) = input_size;
        let probe = Array4::<f32>::zeros((1, height as usize, width as usize, 3));
        let scores = run_scores(&session, &probe)?;
        let output_cardinality = scores.len();
        info!("Inferred output cardinality from model: {}", output_cardinality);

        if labels.len() != output_cardinality {
            return Err(ClassifierError::ValidationError(format!(
                "The number of labels ({}) does not match the model's output classes ({})",
                labels.len(),
                output_cardinality
            )));
        }

        Ok(ImageClassifier {
            model_path,
            labels_path,
            session: Arc::new(session),
            labels: Arc::new(labels),
            input_size,
            output_cardinality,
        })
    }

    /// Validates that the model has the expected input/output structure
    fn validate_model(session: &Session) -> Result<(), ClassifierError> {
        if session.inputs.is_empty() {
            return Err(ClassifierError::ModelError(
                "Model must have at least 1 input for the image batch".to_string(),
            ));
        }
        if session.outputs.is_empty() {
            return Err(ClassifierError::ModelError(
                "Model must have at least 1 output for class scores".to_string(),
            ));
        }
        Ok(())
    }
}
