//! Model registry client
//!
//! Provisions the classifier artifact: when the local copy is missing it is
//! downloaded once from the remote registry using credentials from the
//! environment. Any failure here is fatal, the service never starts without
//! a usable artifact.

use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::ModelConfig;

/// Environment variable holding the registry username.
pub const REGISTRY_USERNAME_VAR: &str = "KAGGLE_USERNAME";

/// Environment variable holding the registry API key.
pub const REGISTRY_KEY_VAR: &str = "KAGGLE_KEY";

/// Authenticated client for the remote model registry.
pub struct RegistryClient {
    base_url: String,
    client: reqwest::Client,
    username: String,
    key: String,
}

impl RegistryClient {
    /// Build a client with credentials from the environment.
    pub fn from_env(config: &ModelConfig) -> Result<Self> {
        let username = env::var(REGISTRY_USERNAME_VAR)
            .with_context(|| format!("{} is not set", REGISTRY_USERNAME_VAR))?;
        let key = env::var(REGISTRY_KEY_VAR)
            .with_context(|| format!("{} is not set", REGISTRY_KEY_VAR))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .context("Failed to build registry HTTP client")?;

        Ok(Self {
            base_url: config.registry_url.clone(),
            client,
            username,
            key,
        })
    }

    /// Download the named artifact into `dest`.
    pub async fn download_model(&self, registry_ref: &str, dest: &Path) -> Result<()> {
        let url = format!("{}/models/{}/download", self.base_url, registry_ref);
        info!("Downloading model {} from registry", registry_ref);

        let response = self
            .client
            .get(&url)
            .basic_auth(&self.username, Some(&self.key))
            .send()
            .await
            .context("Model download request failed")?
            .error_for_status()
            .context("Registry rejected the model download")?;

        let bytes = response
            .bytes()
            .await
            .context("Failed to read model download body")?;

        std::fs::write(dest, &bytes)
            .with_context(|| format!("Failed to write model artifact {}", dest.display()))?;

        info!("Model downloaded to {} ({} bytes)", dest.display(), bytes.len());
        Ok(())
    }
}

/// Return the local path of the model artifact, downloading it from the
/// registry on first use. An existing artifact is returned as-is without any
/// network access or credential lookup.
pub async fn ensure_model(config: &ModelConfig) -> Result<PathBuf> {
    if config.artifact.exists() {
        return Ok(config.artifact.clone());
    }

    let client = RegistryClient::from_env(config)?;
    client.download_model(&config.registry_ref, &config.artifact).await?;

    Ok(config.artifact.clone())
}
