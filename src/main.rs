use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use prompt_gallery::{
    api,
    config,
    GenerationPipeline,
    MongoImageStore,
    OpenAIClient,
};

#[tokio::main]
async fn main() {
    // Load configuration
    config::Config::dotenv_load();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("prompt_gallery=info,tower_http=info")),
        )
        .init();

    let config = config::Config::new();
    config.log_summary();

    let generator = match OpenAIClient::from_config(&config) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Failed to build image generation client: {}", e);
            std::process::exit(1);
        }
    };
    // The database connection is established lazily by the first request.
    let store = MongoImageStore::from_config(&config);

    let state = Arc::new(api::AppState {
        pipeline: GenerationPipeline::new(Arc::new(generator), Arc::new(store)),
    });
    let app = api::router(state);

    // Run our application with safe parsing
    let host_str = config.api_host.clone();
    let port_str = config.api_port.clone();
    let ip: std::net::IpAddr = host_str.parse().unwrap_or_else(|_| {
        tracing::warn!("Invalid API_HOST '{}', falling back to 127.0.0.1", host_str);
        std::net::IpAddr::from([127, 0, 0, 1])
    });
    let port: u16 = port_str.parse().unwrap_or_else(|_| {
        tracing::warn!("Invalid API_PORT '{}', falling back to 8080", port_str);
        8080
    });
    let socket_address = SocketAddr::new(ip, port);
    tracing::info!("listening on {}", socket_address);

    let builder = match axum::Server::try_bind(&socket_address) {
        Ok(builder) => builder,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", socket_address, e);
            std::process::exit(1);
        }
    };
    let server = builder
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal());
    if let Err(e) = server.await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
