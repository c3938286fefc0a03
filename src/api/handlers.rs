//! Axum request handlers for the HTTP API.
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::api::routes::AppState;
use crate::error::AppError;
use crate::models::{GenerateRequest, GenerateResponse, ListResponse};

pub async fn root() -> &'static str {
    "Prompt Gallery API"
}

pub async fn health() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

pub async fn generate_image(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::Validation(e.body_text()))?;

    let images = state.pipeline.generate(&request.prompt)
        .await
        .map_err(|e| {
            tracing::error!("Error generating image: {}", e);
            e
        })?;

    Ok(Json(GenerateResponse {
        message: "Image generated".to_string(),
        images,
    }))
}

pub async fn list_images(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ListResponse>, AppError> {
    state.pipeline.list()
        .await
        .map(|images| Json(ListResponse { images }))
        .map_err(|e| {
            tracing::error!("Error listing images: {}", e);
            e
        })
}
