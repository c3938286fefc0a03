//! Router setup and shared state.
use std::sync::Arc;

use axum::{
    routing::get,
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::api::handlers;
use crate::pipeline::GenerationPipeline;

pub struct AppState {
    pub pipeline: GenerationPipeline,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route(
            "/api/generator",
            get(handlers::list_images).post(handlers::generate_image),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
