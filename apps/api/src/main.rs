mod config;
mod errors;
mod llm_client;
mod pipeline;
mod presets;
mod routes;
mod runs;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::pipeline::analyzer::LlmAnalyzer;
use crate::routes::build_router;
use crate::runs::RunRegistry;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ScreenPilot API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the LLM client behind the analyzer seam
    let llm = LlmClient::new(config.llm_api_url.clone(), config.llm_api_key.clone());
    let analyzer = Arc::new(LlmAnalyzer::new(llm));
    info!(
        "LLM client initialized (scoring model: {}, questions model: {})",
        config.scoring_model, config.questions_model
    );

    // Build app state
    let state = AppState {
        config: config.clone(),
        analyzer,
        runs: RunRegistry::new(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
