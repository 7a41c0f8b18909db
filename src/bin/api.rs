use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use channel_summary::ai::OllamaClient;
use channel_summary::core::config::AppConfig;
use channel_summary::slack::SlackClient;
use channel_summary::store::SqliteStore;
use channel_summary::{AppState, Summarizer};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    channel_summary::setup_logging();

    let config = AppConfig::from_env().map_err(|e| {
        error!("Config error: {}", e);
        anyhow::anyhow!(e)
    })?;

    let inference = Arc::new(OllamaClient::new(&config.ollama_url, config.ollama_model.clone())?);
    let store = Arc::new(
        SqliteStore::connect(&config.database_url)
            .await
            .context("Failed to open summary store")?,
    );

    info!(
        ollama_url = %config.ollama_url,
        model = %config.ollama_model,
        max_input_chars = config.pipeline.max_input_chars,
        chunk_size = config.pipeline.chunk_size,
        force_heuristic = config.pipeline.force_heuristic,
        "Pipeline configured"
    );

    let summarizer = Arc::new(Summarizer::new(inference, store, config.pipeline.clone()));
    let mut state = AppState::new(summarizer, config.history_limit);
    if let Some(slack_config) = config.slack.clone() {
        let client = Arc::new(SlackClient::new(slack_config.bot_token.clone()));
        state = state.with_slack(client, slack_config);
        info!("Slack slash command endpoint enabled");
    }

    let app = channel_summary::api::router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("Summary API listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutting down");
}
