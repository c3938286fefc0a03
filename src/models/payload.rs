//! Request and response bodies for `/api/generator`.
use serde::{Deserialize, Serialize};

use crate::error::ErrorKind;
use crate::models::image::{ImageRecord, NewImage};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub prompt: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub message: String,
    pub images: Vec<NewImage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse {
    pub images: Vec<ImageRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    pub error: String,
    pub kind: ErrorKind,
}
