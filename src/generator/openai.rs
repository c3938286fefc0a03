//! Thin HTTP client for the OpenAI-compatible `images/generations` endpoint.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::generator::{GeneratedImage, ImageGenerator, IMAGES_PER_PROMPT, IMAGE_SIZE};

#[derive(Clone)]
pub struct OpenAIClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    model: Option<String>,
}

#[derive(Debug, Serialize)]
struct GenerationRequest<'a> {
    prompt: &'a str,
    n: u8,
    size: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct GenerationResponse {
    #[serde(default)]
    data: Vec<GenerationData>,
}

#[derive(Debug, Deserialize)]
struct GenerationData {
    url: Option<String>,
    revised_prompt: Option<String>,
}

impl OpenAIClient {
    pub fn new(base_url: String, api_key: Option<String>) -> Self {
        let base = base_url.trim_end_matches('/').to_string();
        OpenAIClient { client: Client::new(), base_url: base, api_key, model: None }
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.generation_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(AppError::HttpClient)?;
        Ok(OpenAIClient {
            client,
            base_url: config.openai_base_url.trim_end_matches('/').to_string(),
            api_key: config.openai_api_key.clone(),
            model: config.openai_model.clone(),
        })
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

#[async_trait]
impl ImageGenerator for OpenAIClient {
    async fn generate(&self, prompt: &str) -> AppResult<Vec<GeneratedImage>> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::Config("OPENAI_API_KEY is not set".to_string()))?;

        let url = format!("{}/images/generations", self.base_url);
        let body = GenerationRequest {
            prompt,
            n: IMAGES_PER_PROMPT,
            size: IMAGE_SIZE,
            model: self.model.as_deref(),
        };
        tracing::info!("Requesting image generation from {}", url);
        tracing::debug!("Generation payload: {:?}", body);

        let response = self.client.post(&url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(AppError::HttpClient)?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response.text().await.unwrap_or_else(|_| "Unable to read error body".to_string());
            let error_message = format!("Provider returned status {}: {}", status, error_body);
            tracing::error!("{}", error_message);
            return Err(AppError::Generation(error_message));
        }

        let parsed: GenerationResponse = response.json().await.map_err(|e| {
            AppError::Generation(format!("Failed to parse provider response: {}", e))
        })?;
        tracing::info!(candidates = parsed.data.len(), "Provider returned generation results");

        Ok(parsed
            .data
            .into_iter()
            .map(|d| GeneratedImage { url: d.url, revised_prompt: d.revised_prompt })
            .collect())
    }
}
