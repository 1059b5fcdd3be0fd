//! Classification service configuration

use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub inference: InferenceConfig,
    pub model: ModelConfig,
    pub uploads: UploadsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub rest_port: u16,
    pub public_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InferenceConfig {
    pub device: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    pub artifact: PathBuf,
    pub registry_url: String,
    pub registry_ref: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadsConfig {
    pub dir: PathBuf,
}

impl Config {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn default_path() -> &'static str {
        "config.toml"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                rest_port: 5000,
                public_url: "http://localhost:5000".to_string(),
            },
            inference: InferenceConfig {
                device: "CPU".to_string(),
            },
            model: ModelConfig {
                artifact: PathBuf::from("brain_tumor_cnn.onnx"),
                registry_url: "https://www.kaggle.com/api/v1".to_string(),
                registry_ref: "esfiam/cnn-brain-tumor-detector".to_string(),
            },
            uploads: UploadsConfig {
                dir: PathBuf::from("static/uploads"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.rest_port, 5000);
        assert_eq!(config.server.public_url, "http://localhost:5000");
        assert_eq!(config.inference.device, "CPU");
        assert_eq!(config.model.artifact, PathBuf::from("brain_tumor_cnn.onnx"));
        assert_eq!(config.uploads.dir, PathBuf::from("static/uploads"));
    }

    #[test]
    fn test_config_parses_from_toml() {
        let raw = r#"
            [server]
            rest_port = 8080
            public_url = "https://scans.example.org"

            [inference]
            device = "GPU"

            [model]
            artifact = "model.onnx"
            registry_url = "https://registry.example.org/api/v1"
            registry_ref = "owner/classifier"

            [uploads]
            dir = "uploads"
        "#;

        let config: Config = toml::from_str(raw).unwrap();
        assert_eq!(config.server.rest_port, 8080);
        assert_eq!(config.inference.device, "GPU");
        assert_eq!(config.model.registry_ref, "owner/classifier");
        assert_eq!(config.uploads.dir, PathBuf::from("uploads"));
    }
}
