//! Hailey chat proxy server
//!
//! Serves `POST /api/chat`, forwarding each message to the configured
//! upstream model under the Hailey persona.

use hailey::api::{create_router, AppState};
use hailey::config::ServerConfig;
use hailey::llm::{find_model, LlmConfig, ModelRegistry};
use tower_http::{
    compression::CompressionLayer,
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
                .unwrap_or_else(|_| "hailey=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let config = ServerConfig::from_env();
    let llm_config = LlmConfig::from_env();

    if let Some(requested) = llm_config.default_model.as_deref() {
        if find_model(requested).is_none() {
            tracing::warn!(model = %requested, "DEFAULT_MODEL is not a known chat model");
        }
    }

    // Pick the single upstream model
    let registry = ModelRegistry::new(&llm_config);
    let llm = registry.default();

    match (&llm, registry.default_model_def()) {
        (Some(_), Some(model)) => tracing::info!(
            model = %model.id,
            provider = model.provider.display_name(),
            description = model.description,
            available = ?registry.available_models(),
            "Upstream model selected"
        ),
        (None, Some(model)) => tracing::warn!(
            model = %model.id,
            provider = model.provider.display_name(),
            api_key_var = model.provider.api_key_env_var(),
            available = ?registry.available_models(),
            "Default model has no credentials; chat requests will fail"
        ),
        _ if registry.has_models() => tracing::warn!(
            requested = ?registry.default_model_id(),
            available = ?registry.available_models(),
            "Default model unavailable; chat requests will fail"
        ),
        _ => tracing::warn!(
            "No LLM credentials configured. Set OPENAI_API_KEY, ANTHROPIC_API_KEY or LLM_GATEWAY."
        ),
    }

    let state = AppState::new(llm, config.max_tokens);

    // Create router
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let compression = CompressionLayer::new()
        .gzip(true)
        .br(true)
        .deflate(true)
        .zstd(true);

    let app = create_router(state)
        .layer(cors)
        .layer(compression)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = config.socket_addr();
    tracing::info!("Hailey chat proxy listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
