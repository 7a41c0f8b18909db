use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use super::handler::{create_summary, health_handler, list_summaries};
use super::slash_handler::handle_slash_command;
use crate::state::AppState;

/// Build the HTTP router. The Slack command route is mounted only when Slack
/// credentials are configured.
pub fn router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/health", get(health_handler))
        .route("/summary", post(create_summary))
        .route("/summaries/{channel}", get(list_summaries));

    if state.slack.is_some() {
        router = router.route("/slack/commands", post(handle_slash_command));
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}
