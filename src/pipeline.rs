//! The generate/list request pipeline.
//!
//! `generate` validates the prompt, makes sure the store is reachable, asks the
//! generator for images, drops candidates without a URL, persists what is left
//! one record at a time, and hands back the new `{url, prompt}` pairs. A record
//! that fails to persist is logged and skipped; it never fails the request.
use std::sync::Arc;

use tracing::Instrument;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::generator::{GeneratedImage, ImageGenerator};
use crate::models::{ImageRecord, NewImage};
use crate::store::ImageStore;

#[derive(Clone)]
pub struct GenerationPipeline {
    generator: Arc<dyn ImageGenerator>,
    store: Arc<dyn ImageStore>,
}

impl GenerationPipeline {
    pub fn new(generator: Arc<dyn ImageGenerator>, store: Arc<dyn ImageStore>) -> Self {
        Self { generator, store }
    }

    pub async fn generate(&self, prompt: &str) -> AppResult<Vec<NewImage>> {
        if prompt.trim().is_empty() {
            return Err(AppError::Validation("prompt must be a non-empty string".to_string()));
        }

        let span = tracing::info_span!("generate", request_id = %Uuid::new_v4());
        async move {
            self.store.ensure_connected().await?;

            let candidates = self.generator.generate(prompt).await?;
            let images = usable_images(candidates, prompt);
            let persisted = self.persist_all(&images).await;

            tracing::info!(generated = images.len(), persisted, "Image generation finished");
            Ok::<_, AppError>(images)
        }
        .instrument(span)
        .await
    }

    pub async fn list(&self) -> AppResult<Vec<ImageRecord>> {
        self.store.ensure_connected().await?;
        let records = self.store.list_all().await?;
        tracing::debug!(count = records.len(), "Listed gallery images");
        Ok(records)
    }

    /// Store each image independently; returns how many were written.
    async fn persist_all(&self, images: &[NewImage]) -> usize {
        let mut persisted = 0;
        for image in images {
            match self.store.create(image).await {
                Ok(record) => {
                    tracing::debug!(id = %record.id, "Persisted generated image");
                    persisted += 1;
                }
                Err(e) => tracing::error!(url = %image.url, "Failed to persist generated image: {}", e),
            }
        }
        persisted
    }
}

/// Keep candidates that carry a URL and pair them with the original prompt.
fn usable_images(candidates: Vec<GeneratedImage>, prompt: &str) -> Vec<NewImage> {
    candidates
        .into_iter()
        .enumerate()
        .filter_map(|(index, candidate)| match candidate.url {
            Some(url) if !url.trim().is_empty() => Some(NewImage::new(url, prompt)),
            _ => {
                tracing::warn!(index, "Skipping generation result without a URL");
                None
            }
        })
        .collect()
}
