//! Inference engine module
//!
//! Provides OpenVINO-based classification with:
//! - Load-once immutable model handle
//! - Grayscale MRI preprocessing
//! - Forward pass and label mapping

pub mod classifier;
pub mod model;
pub mod preprocess;

pub use classifier::{Prediction, TumorClass, TumorClassifier};
pub use model::ClassifierModel;
