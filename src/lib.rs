//! Prompt Gallery library
//!
//! Modules:
//! - `api`: Axum HTTP handlers and router setup used by the server binary.
//! - `pipeline`: The generate/list flow behind `/api/generator`.
//! - `generator`: Text-to-image provider trait and the OpenAI client.
//! - `store`: Image record persistence trait and the MongoDB store.
//! - `models`: Records and request/response bodies.
//! - `client`: HTTP client for a running gallery server, used by `galleryctl`.
//! - `config`: Env-driven configuration loader.
//! - `error`: Common error type and alias.
//!
//! Re-exports are provided for common types: `Config`, `GenerationPipeline`,
//! `OpenAIClient`, `MongoImageStore` and `GalleryClient`.
pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod generator;
pub mod models;
pub mod pipeline;
pub mod store;

pub use client::GalleryClient;
pub use config::Config;
pub use error::{AppError, AppResult, ErrorKind};
pub use generator::openai::OpenAIClient;
pub use pipeline::GenerationPipeline;
pub use store::MongoImageStore;
