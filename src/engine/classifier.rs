//! Brain tumor classifier
//!
//! Runs the pretrained CNN over a preprocessed MRI scan and maps the output
//! distribution to a tumor class with per-class confidence percentages.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use ndarray::Array4;
use openvino::{ElementType, Shape, Tensor};

use super::model::ClassifierModel;
use super::preprocess::{decode_image, preprocess_for_classification, CLASSIFIER_INPUT_SIZE};

/// Tumor classification classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TumorClass {
    Glioma,
    Meningioma,
    Pituitary,
    NoTumor,
}

impl TumorClass {
    /// All classes in model output order:
    /// 0: glioma, 1: meningioma, 2: pituitary, 3: no tumor.
    /// The ordering is a training artifact of the bundled model and is not
    /// validated against it at runtime.
    pub const ALL: [TumorClass; 4] = [
        TumorClass::Glioma,
        TumorClass::Meningioma,
        TumorClass::Pituitary,
        TumorClass::NoTumor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TumorClass::Glioma => "Glioma",
            TumorClass::Meningioma => "Meningioma",
            TumorClass::Pituitary => "Pituitary",
            TumorClass::NoTumor => "No Tumor",
        }
    }
}

/// Labeled classification result.
#[derive(Debug, Clone)]
pub struct Prediction {
    pub label: TumorClass,
    pub confidence_scores: HashMap<String, f32>,
}

impl Prediction {
    /// Map a model output distribution to a labeled prediction.
    ///
    /// The class of maximum probability is always selected, there is no
    /// low-confidence rejection. Scores are probabilities scaled to
    /// percentages.
    pub fn from_probabilities(probs: &[f32]) -> Result<Self> {
        if probs.len() != TumorClass::ALL.len() {
            bail!(
                "Unexpected model output length: {} (expected {})",
                probs.len(),
                TumorClass::ALL.len()
            );
        }

        let max_idx = probs
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap())
            .map(|(idx, _)| idx)
            .unwrap_or(0);

        let confidence_scores = TumorClass::ALL
            .iter()
            .zip(probs.iter())
            .map(|(class, prob)| (class.as_str().to_string(), prob * 100.0))
            .collect();

        Ok(Self {
            label: TumorClass::ALL[max_idx],
            confidence_scores,
        })
    }
}

/// Brain tumor classifier backed by the shared model handle.
#[derive(Clone)]
pub struct TumorClassifier {
    model: Arc<ClassifierModel>,
}

impl TumorClassifier {
    /// Create a new classifier over a loaded model handle.
    pub fn new(model: Arc<ClassifierModel>) -> Self {
        Self { model }
    }

    /// Classify the scan stored at `path`.
    pub fn classify_file(&self, path: &Path) -> Result<Prediction> {
        let data = std::fs::read(path)
            .with_context(|| format!("Failed to read image {}", path.display()))?;
        self.classify_bytes(&data)
    }

    /// Classify an encoded PNG/JPEG scan.
    pub fn classify_bytes(&self, data: &[u8]) -> Result<Prediction> {
        let image = decode_image(data).context("Failed to decode image")?;
        let input_tensor = preprocess_for_classification(&image);

        let probs = self.forward(&input_tensor)?;

        Prediction::from_probabilities(&probs)
    }

    /// Run one forward pass and return the output distribution.
    fn forward(&self, input_tensor: &Array4<f32>) -> Result<Vec<f32>> {
        let mut request = self.model.create_infer_request()?;

        let (target_w, target_h) = CLASSIFIER_INPUT_SIZE;
        let input_shape = Shape::new(&[1, 1, target_h as i64, target_w as i64])?;
        let mut input = Tensor::new(ElementType::F32, &input_shape)?;

        // Copy data to tensor
        let input_data = input_tensor.as_slice().unwrap();
        unsafe {
            let tensor_data = input.get_raw_data_mut()?.as_mut_ptr() as *mut f32;
            std::ptr::copy_nonoverlapping(input_data.as_ptr(), tensor_data, input_data.len());
        }

        request.set_input_tensor(&input)?;
        request.infer()?;

        let output = request.get_output_tensor()?;
        let output_shape = output.get_shape()?;
        let output_len = output_shape.get_dimensions().iter().product::<i64>() as usize;

        let output_data: Vec<f32> = unsafe {
            let ptr = output.get_raw_data()?.as_ptr() as *const f32;
            std::slice::from_raw_parts(ptr, output_len).to_vec()
        };

        Ok(output_data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_order_matches_output_layer() {
        assert_eq!(TumorClass::ALL[0].as_str(), "Glioma");
        assert_eq!(TumorClass::ALL[1].as_str(), "Meningioma");
        assert_eq!(TumorClass::ALL[2].as_str(), "Pituitary");
        assert_eq!(TumorClass::ALL[3].as_str(), "No Tumor");
    }

    #[test]
    fn test_prediction_picks_argmax() {
        let prediction = Prediction::from_probabilities(&[0.1, 0.2, 0.6, 0.1]).unwrap();
        assert_eq!(prediction.label, TumorClass::Pituitary);
    }

    #[test]
    fn test_confidence_scores_are_percentages() {
        let prediction = Prediction::from_probabilities(&[0.25, 0.25, 0.25, 0.25]).unwrap();

        let sum: f32 = prediction.confidence_scores.values().sum();
        assert!((sum - 100.0).abs() < 1e-3);
        assert!((prediction.confidence_scores["Glioma"] - 25.0).abs() < 1e-3);
    }

    #[test]
    fn test_prediction_equals_max_score_key() {
        let prediction = Prediction::from_probabilities(&[0.05, 0.7, 0.2, 0.05]).unwrap();

        let (best, _) = prediction
            .confidence_scores
            .iter()
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap())
            .unwrap();
        assert_eq!(best, prediction.label.as_str());
    }

    #[test]
    fn test_unexpected_output_length_is_rejected() {
        assert!(Prediction::from_probabilities(&[0.5, 0.5]).is_err());
        assert!(Prediction::from_probabilities(&[]).is_err());
    }
}
