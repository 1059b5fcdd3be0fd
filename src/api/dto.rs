//! REST API response data transfer objects

use serde::Serialize;
use std::collections::HashMap;

/// Predict response
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub prediction: String,
    pub confidence_scores: HashMap<String, f32>,
    pub image_url: String,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub healthy: bool,
    pub version: String,
    pub model_loaded: bool,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: &str) -> Self {
        Self {
            error: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predict_response_shape() {
        let mut confidence_scores = HashMap::new();
        confidence_scores.insert("Glioma".to_string(), 92.5f32);

        let response = PredictResponse {
            prediction: "Glioma".to_string(),
            confidence_scores,
            image_url: "http://localhost:5000/api/uploads/scan.png".to_string(),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["prediction"], "Glioma");
        assert_eq!(json["confidence_scores"]["Glioma"], 92.5);
        assert_eq!(json["image_url"], "http://localhost:5000/api/uploads/scan.png");
    }

    #[test]
    fn test_error_response_shape() {
        let json = serde_json::to_value(ErrorResponse::new("Invalid file type")).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "Invalid file type" }));
    }
}
