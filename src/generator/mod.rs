//! Text-to-image generation backends.
//!
//! The pipeline only sees the [`ImageGenerator`] trait, so the provider can be
//! swapped (or faked in tests) without touching request handling.
pub mod openai;

use async_trait::async_trait;

use crate::error::AppResult;

/// Number of images requested per prompt.
pub const IMAGES_PER_PROMPT: u8 = 1;
/// Fixed output resolution.
pub const IMAGE_SIZE: &str = "1024x1024";

/// One candidate returned by the provider. `url` may be missing when the
/// provider answered with inline data or a partial entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedImage {
    pub url: Option<String>,
    pub revised_prompt: Option<String>,
}

impl GeneratedImage {
    pub fn with_url(url: impl Into<String>) -> Self {
        Self { url: Some(url.into()), revised_prompt: None }
    }
}

#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Generate images for `prompt`. Callers are expected to have rejected
    /// empty prompts already.
    async fn generate(&self, prompt: &str) -> AppResult<Vec<GeneratedImage>>;
}
