//! In-memory test doubles for the generator and the store.
#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use prompt_gallery::api::{self, AppState};
use prompt_gallery::error::{AppError, AppResult};
use prompt_gallery::generator::{GeneratedImage, ImageGenerator};
use prompt_gallery::models::{ImageRecord, NewImage};
use prompt_gallery::store::ImageStore;
use prompt_gallery::GenerationPipeline;

pub struct FakeGenerator {
    outcome: Result<Vec<GeneratedImage>, String>,
    pub calls: AtomicUsize,
    pub prompts: Mutex<Vec<String>>,
}

impl FakeGenerator {
    pub fn returning(urls: &[Option<&str>]) -> Arc<Self> {
        let images = urls
            .iter()
            .map(|u| GeneratedImage { url: u.map(str::to_string), revised_prompt: None })
            .collect();
        Arc::new(Self { outcome: Ok(images), calls: AtomicUsize::new(0), prompts: Mutex::new(Vec::new()) })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            outcome: Err(message.to_string()),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageGenerator for FakeGenerator {
    async fn generate(&self, prompt: &str) -> AppResult<Vec<GeneratedImage>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.outcome {
            Ok(images) => Ok(images.clone()),
            Err(message) => Err(AppError::Generation(message.clone())),
        }
    }
}

#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<Vec<ImageRecord>>,
    failing_urls: HashSet<String>,
    unreachable: bool,
    pub connect_attempts: AtomicUsize,
    connected: Mutex<bool>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Inserts of these URLs fail as if the database rejected them.
    pub fn failing_on(urls: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            failing_urls: urls.iter().map(|u| u.to_string()).collect(),
            ..Self::default()
        })
    }

    pub fn unreachable() -> Arc<Self> {
        Arc::new(Self { unreachable: true, ..Self::default() })
    }

    pub fn records(&self) -> Vec<ImageRecord> {
        self.records.lock().unwrap().clone()
    }

    pub fn connect_count(&self) -> usize {
        self.connect_attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageStore for MemoryStore {
    async fn ensure_connected(&self) -> AppResult<()> {
        let mut connected = self.connected.lock().unwrap();
        if *connected {
            return Ok(());
        }
        self.connect_attempts.fetch_add(1, Ordering::SeqCst);
        if self.unreachable {
            return Err(AppError::Database("connection refused".to_string()));
        }
        *connected = true;
        Ok(())
    }

    async fn create(&self, image: &NewImage) -> AppResult<ImageRecord> {
        if !image.is_complete() {
            return Err(AppError::Validation("incomplete image".to_string()));
        }
        if self.failing_urls.contains(&image.url) {
            return Err(AppError::Database(format!("insert rejected for {}", image.url)));
        }
        let mut records = self.records.lock().unwrap();
        // Strictly increasing timestamps keep ordering deterministic.
        let created_at = Utc::now() + Duration::milliseconds(records.len() as i64);
        let record = ImageRecord {
            id: format!("{:024x}", records.len() + 1),
            url: image.url.clone(),
            prompt: image.prompt.clone(),
            created_at,
        };
        records.push(record.clone());
        Ok(record)
    }

    async fn list_all(&self) -> AppResult<Vec<ImageRecord>> {
        let mut records = self.records();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }
}

pub fn pipeline(generator: Arc<FakeGenerator>, store: Arc<MemoryStore>) -> GenerationPipeline {
    GenerationPipeline::new(generator, store)
}

pub fn app(generator: Arc<FakeGenerator>, store: Arc<MemoryStore>) -> axum::Router {
    api::router(Arc::new(AppState { pipeline: pipeline(generator, store) }))
}
