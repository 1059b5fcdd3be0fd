//! Compiled model handle
//!
//! Loads the classifier artifact exactly once at startup and shares the
//! compiled model read-only across all requests. There is no unload path:
//! the handle lives for the lifetime of the process.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use openvino::{CompiledModel, Core, InferRequest};
use tracing::info;

/// Wrapper for OpenVINO CompiledModel that implements Send + Sync
#[derive(Clone)]
pub struct SafeCompiledModel(pub Arc<CompiledModel>);
unsafe impl Send for SafeCompiledModel {}
unsafe impl Sync for SafeCompiledModel {}

impl SafeCompiledModel {
    /// Create an inference request
    /// OpenVINO CompiledModel methods are thread-safe in C++, but Rust bindings
    /// require &mut self. We bypass this restriction safely.
    pub fn create_infer_request(&self) -> Result<InferRequest> {
        unsafe {
            let ptr = Arc::as_ptr(&self.0) as *mut CompiledModel;
            (*ptr).create_infer_request().map_err(|e| e.into())
        }
    }
}

/// Immutable handle to the loaded classifier.
///
/// Produced by a single initialization step in `main` and passed explicitly
/// through the application state. No write path exists post-load.
pub struct ClassifierModel {
    compiled: SafeCompiledModel,
}

impl ClassifierModel {
    /// Read and compile the model artifact.
    pub fn load(path: &Path, device: &str) -> Result<Self> {
        info!("Loading model from {}", path.display());
        let start = Instant::now();

        let mut core = Core::new().context("Failed to initialize inference runtime")?;
        let model = core
            .read_model_from_file(
                path.to_str().context("Model path is not valid UTF-8")?,
                "",
            )
            .with_context(|| format!("Failed to read model {}", path.display()))?;
        let compiled = core
            .compile_model(&model, device.into())
            .with_context(|| format!("Failed to compile model for device {}", device))?;

        info!("Model loaded in {:?}", start.elapsed());

        Ok(Self {
            compiled: SafeCompiledModel(Arc::new(compiled)),
        })
    }

    /// Create a per-request inference context over the shared model.
    pub fn create_infer_request(&self) -> Result<InferRequest> {
        self.compiled.create_infer_request()
    }
}
