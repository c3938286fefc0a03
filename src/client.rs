//! Thin HTTP client for a running gallery server.
//!
//! - `generate` posts a prompt to `/api/generator`.
//! - `list` fetches the gallery from `/api/generator`.
//! - `download` fetches image bytes straight from the provider's URL.
use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::models::{ErrorBody, GenerateRequest, GenerateResponse, ImageRecord, ListResponse};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server returned {status}: {message}")]
    Server { status: StatusCode, message: String },
}

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Clone)]
pub struct GalleryClient {
    client: Client,
    base_url: String,
}

impl GalleryClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base = base_url.into().trim_end_matches('/').to_string();
        GalleryClient { client: Client::new(), base_url: base }
    }

    pub async fn generate(&self, prompt: &str) -> ClientResult<GenerateResponse> {
        let url = format!("{}/api/generator", self.base_url);
        let body = GenerateRequest { prompt: prompt.to_string() };
        let response = self.client.post(&url).json(&body).send().await?;
        Self::decode(response).await
    }

    pub async fn list(&self) -> ClientResult<Vec<ImageRecord>> {
        let url = format!("{}/api/generator", self.base_url);
        let response = self.client.get(&url).send().await?;
        let list: ListResponse = Self::decode(response).await?;
        Ok(list.images)
    }

    pub async fn download(&self, image_url: &str) -> ClientResult<Vec<u8>> {
        let response = self.client.get(image_url).send().await?;
        if !response.status().is_success() {
            return Err(ClientError::Server {
                status: response.status(),
                message: format!("Failed to download {}", image_url),
            });
        }
        Ok(response.bytes().await?.to_vec())
    }

    async fn decode<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }
        let text = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ErrorBody>(&text) {
            Ok(body) => body.error,
            Err(_) => text,
        };
        Err(ClientError::Server { status, message })
    }
}

/// Pick a local file name for an image URL: the last path segment, or
/// `image.png` when the URL has none.
pub fn filename_from_url(image_url: &str) -> String {
    reqwest::Url::parse(image_url)
        .ok()
        .and_then(|url| {
            url.path_segments()
                .and_then(|mut segments| segments.next_back().map(str::to_string))
        })
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "image.png".to_string())
}
