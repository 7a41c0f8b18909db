/// Channel Summary - condenses Slack channel transcripts with an LLM, falling
/// back to a rule-based summary when the model is slow or unavailable.
///
/// # Architecture
///
/// - `summarize`: clipping, chunking, map-reduce inference and the heuristic fallback
/// - `ai`: the inference client (Ollama-style `/api/generate`) and prompts
/// - `store`: durable summary history (SQLite via sqlx)
/// - `api`: axum routes for `/summary`, `/summaries/{channel}`, `/health` and
///   the Slack slash command
/// - `slack` / `worker`: the Slack side of the slash-command flow
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use channel_summary::ai::OllamaClient;
/// use channel_summary::core::config::PipelineConfig;
/// use channel_summary::core::models::SummaryRequest;
/// use channel_summary::store::SqliteStore;
/// use channel_summary::summarize::Summarizer;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     channel_summary::setup_logging();
///
///     let inference = Arc::new(OllamaClient::new("http://localhost:11434", "llama3")?);
///     let store = Arc::new(SqliteStore::connect("sqlite::memory:").await?);
///     let summarizer = Summarizer::new(inference, store, PipelineConfig::default());
///
///     let request = SummaryRequest::new("<@U1> shipped the release\n<@U2> thanks!", "C123");
///     let outcome = summarizer.summarize_and_store(&request).await?;
///     println!("{} ({})", outcome.formatted, outcome.summary.method);
///     Ok(())
/// }
/// ```
// Module declarations
pub mod ai;
pub mod api;
pub mod core;
pub mod errors;
pub mod slack;
pub mod state;
pub mod store;
pub mod summarize;
pub mod utils;
pub mod worker;

pub use errors::SummaryError;
pub use state::AppState;
pub use summarize::Summarizer;

/// Configure structured JSON logging.
///
/// The level filter comes from `RUST_LOG` and defaults to `info`. Calling this
/// more than once is harmless; later calls leave the first subscriber in place.
///
/// # Example
///
/// ```
/// channel_summary::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
