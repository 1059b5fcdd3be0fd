//! Scan service - core request orchestration
//!
//! Bridges the async HTTP surface and the blocking inference engine.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use crate::config::Config;
use crate::engine::{ClassifierModel, Prediction, TumorClassifier};

use super::types::HealthResult;

/// MRI scan classification service
pub struct ScanService {
    classifier: TumorClassifier,
    config: Config,
}

impl ScanService {
    /// Create a new scan service around a loaded model handle.
    pub fn new(model: ClassifierModel, config: Config) -> Self {
        let classifier = TumorClassifier::new(Arc::new(model));

        Self { classifier, config }
    }

    /// Get the loaded configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Classify the uploaded scan stored at `path`.
    pub async fn predict(&self, path: PathBuf) -> Result<Prediction> {
        // Run the forward pass in a blocking task
        let classifier = self.classifier.clone();
        let prediction =
            tokio::task::spawn_blocking(move || classifier.classify_file(&path)).await??;

        Ok(prediction)
    }

    /// Get health status
    pub fn health(&self) -> HealthResult {
        HealthResult {
            healthy: true,
            version: env!("CARGO_PKG_VERSION").to_string(),
            model_loaded: true,
        }
    }
}
