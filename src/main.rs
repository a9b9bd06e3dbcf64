//! Banter relay server
//!
//! Stateless HTTP relay translating one user message per request into one
//! model completion.

use banter::api::{create_router, AppState};
use banter::llm::{CompletionService, LlmConfig, LoggingService, OpenAIService};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "banter=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(5000);

    let config = LlmConfig::from_env();
    let llm: Option<Arc<dyn CompletionService>> = match config.api_key {
        Some(api_key) => {
            let service = OpenAIService::new(api_key, config.model, config.base_url.as_deref());
            let service: Arc<dyn CompletionService> = Arc::new(service);
            tracing::info!(model = %service.model_id(), "completion backend initialized");
            Some(Arc::new(LoggingService::new(service)))
        }
        None => {
            tracing::warn!("No API key configured. Set OPENAI_API_KEY; /chat will fail until then.");
            None
        }
    };

    // Create application state
    let state = AppState::new(llm);

    // Create router
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Banter relay listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
