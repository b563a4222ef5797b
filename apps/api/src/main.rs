mod analysis;
mod config;
mod errors;
mod extraction;
mod form;
mod llm_client;
mod photo;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::{ChatCompletion, LlmClient};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails only on malformed values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={level},tower_http={level}",
                env!("CARGO_CRATE_NAME"),
                level = &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ProEdge API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client; without a key both flows answer MISSING_API_KEY
    let llm: Option<Arc<dyn ChatCompletion>> = match &config.openai_api_key {
        Some(api_key) => {
            let client = LlmClient::new(
                api_key.clone(),
                &config.openai_base_url,
                Duration::from_secs(config.llm_timeout_secs),
            )?;
            info!(
                "LLM client initialized (model: {}, endpoint: {})",
                llm_client::MODEL,
                config.openai_base_url
            );
            Some(Arc::new(client))
        }
        None => {
            warn!("OPENAI_API_KEY is not set; analysis and photo requests will be rejected");
            None
        }
    };

    info!(
        "Upload limit: {} MiB",
        config.max_upload_bytes / (1024 * 1024)
    );

    // Build app state
    let state = AppState {
        llm,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
