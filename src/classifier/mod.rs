pub mod builder;
mod error;
mod labels;
mod model;
mod preprocess;

pub use builder::ClassifierBuilder;
pub use error::ClassifierError;
pub use labels::{load_labels, LabelError};
pub use model::{Classify, ImageClassifier, Prediction, ScorePredictor};
pub use preprocess::{preprocess_bytes, preprocess_file};

/// Information about the current state and configuration of a classifier
#[derive(Debug, Clone)]
pub struct ClassifierInfo {
    /// Path to the ONNX model file
    pub model_path: String,
    /// Path to the labels file
    pub labels_path: String,
    /// Number of classes the classifier is trained on
    pub num_classes: usize,
    /// Labels of the classes, index-aligned with the model's output vector
    pub class_labels: Vec<String>,
    /// Input size `(width, height)` the model expects
    pub input_size: (u32, u32),
}
