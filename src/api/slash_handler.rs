//! Handler for the `/summary` Slack slash command.
//!
//! Slack expects an answer within three seconds, so the command is
//! acknowledged right away and the summary runs in a background task.

use axum::{
    Json,
    extract::State,
    http::HeaderMap,
};
use serde_json::Value;
use tracing::{error, info};
use uuid::Uuid;

use super::error::{ApiError, ApiResult};
use super::signature::verify_slack_signature;
use crate::errors::SummaryError;
use crate::slack::parse_form_data;
use crate::slack::response_builder::create_ephemeral_payload;
use crate::state::AppState;
use crate::worker::process_command;

const TIMESTAMP_HEADER: &str = "x-slack-request-timestamp";
const SIGNATURE_HEADER: &str = "x-slack-signature";

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// `POST /slack/commands`
pub async fn handle_slash_command(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> ApiResult<Json<Value>> {
    let Some(slack) = state.slack.clone() else {
        return Err(ApiError::internal("Slack integration is not configured"));
    };

    let (Some(timestamp), Some(signature)) = (
        header_str(&headers, TIMESTAMP_HEADER),
        header_str(&headers, SIGNATURE_HEADER),
    ) else {
        error!("Slash command missing signature headers");
        return Err(ApiError::unauthorized("Missing Slack signature headers"));
    };

    if !verify_slack_signature(&body, timestamp, signature, &slack.config.signing_secret) {
        return Err(ApiError::unauthorized("Invalid Slack signature"));
    }

    let event = parse_form_data(&body).map_err(SummaryError::Parse)?;
    if event.channel_id.is_empty() || event.response_url.is_empty() {
        return Err(SummaryError::Parse("channel_id and response_url are required".to_string()).into());
    }

    let correlation_id = Uuid::new_v4().to_string();
    info!(
        channel = %event.channel_id,
        user = %event.user_id,
        correlation_id = %correlation_id,
        "Slash command accepted"
    );

    let summarizer = state.summarizer.clone();
    tokio::spawn(async move {
        process_command(&slack, &summarizer, &event, &correlation_id).await;
    });

    Ok(Json(create_ephemeral_payload(
        "✨ Starting summarization... The summary will be posted to this channel shortly.",
    )))
}
