//! Axum REST API handlers

use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::service::ScanService;
use crate::utils::upload::{has_allowed_extension, sanitize_filename};

use super::dto::*;

/// Maximum accepted upload size.
const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Application state shared across handlers
pub struct AppState {
    pub service: Arc<ScanService>,
}

/// Create the REST API router
pub fn create_rest_router(state: Arc<AppState>) -> Router {
    let uploads_dir = state.service.config().uploads.dir.clone();

    Router::new()
        .route("/api/predict", post(predict_handler))
        .route("/health", get(health_handler))
        // Stored uploads are retrievable by name with no access control
        .nest_service("/api/uploads", ServeDir::new(uploads_dir))
        // Middleware
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Classify an uploaded MRI scan
async fn predict_handler(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<PredictResponse>, (StatusCode, Json<ErrorResponse>)> {
    // Extract the upload from multipart
    let mut file_name: Option<String> = None;
    let mut file_data: Option<Vec<u8>> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(&e.to_string())))
    })? {
        let name = field.name().unwrap_or("").to_string();

        if name == "file" {
            file_name = field.file_name().map(|n| n.to_string());
            file_data = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| {
                        (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(&e.to_string())))
                    })?
                    .to_vec(),
            );
        }
    }

    let file_data = file_data.ok_or_else(|| {
        (StatusCode::BAD_REQUEST, Json(ErrorResponse::new("No file uploaded")))
    })?;

    let file_name = file_name.filter(|n| !n.is_empty()).ok_or_else(|| {
        (StatusCode::BAD_REQUEST, Json(ErrorResponse::new("No file selected")))
    })?;

    if !has_allowed_extension(&file_name) {
        return Err((StatusCode::BAD_REQUEST, Json(ErrorResponse::new("Invalid file type"))));
    }

    let file_name = sanitize_filename(&file_name).ok_or_else(|| {
        (StatusCode::BAD_REQUEST, Json(ErrorResponse::new("No file selected")))
    })?;

    let config = state.service.config();
    let file_path = config.uploads.dir.join(&file_name);

    // Last write wins on name collision
    std::fs::write(&file_path, &file_data).map_err(|e| {
        error!("Failed to store upload: {}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse::new(&e.to_string())))
    })?;

    // Call service
    let prediction = state.service.predict(file_path).await.map_err(|e| {
        error!("Prediction failed: {}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse::new(&e.to_string())))
    })?;

    let image_url = format!("{}/api/uploads/{}", config.server.public_url, file_name);

    Ok(Json(PredictResponse {
        prediction: prediction.label.as_str().to_string(),
        confidence_scores: prediction.confidence_scores,
        image_url,
    }))
}

/// Health check
async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let health = state.service.health();

    Json(HealthResponse {
        healthy: health.healthy,
        version: health.version,
        model_loaded: health.model_loaded,
    })
}
