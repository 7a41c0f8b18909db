use chrono_tz::Tz;
use tracing::{error, info};

use crate::core::models::SummaryOutcome;
use crate::errors::SummaryError;
use crate::slack::SlackClient;
use crate::slack::response_builder::{
    NOT_IN_CHANNEL, create_ephemeral_payload, create_in_channel_payload, error_message,
    summary_message,
};

const NOT_IN_CHANNEL_CODE: &str = "not_in_channel";

/// Post the finished summary to the channel.
pub async fn deliver_summary(
    slack: &SlackClient,
    channel_id: &str,
    outcome: &SummaryOutcome,
    tz: Tz,
) -> Result<(), SummaryError> {
    let message = summary_message(&outcome.formatted, outcome.summary.generated_at, tz);
    slack.post_message(channel_id, &message).await?;
    info!(
        channel_id,
        method = %outcome.summary.method,
        "Summary posted to channel"
    );
    Ok(())
}

/// Tell the invoking user, privately, that the command did not go through.
pub async fn deliver_error(slack: &SlackClient, response_url: &str, err: &SummaryError) {
    let text = user_facing_error(err);
    if let Err(e) = slack
        .respond(response_url, &create_ephemeral_payload(&text))
        .await
    {
        error!("Failed to deliver error message: {}", e);
    }
}

/// Ephemeral notice, logged but not propagated when it cannot be sent.
pub async fn notify_ephemeral(slack: &SlackClient, response_url: &str, text: &str) {
    if let Err(e) = slack
        .respond(response_url, &create_ephemeral_payload(text))
        .await
    {
        error!("Failed to send ephemeral notice: {}", e);
    }
}

/// In-channel notice, logged but not propagated when it cannot be sent.
pub async fn notify_in_channel(slack: &SlackClient, response_url: &str, text: &str) {
    if let Err(e) = slack
        .respond(response_url, &create_in_channel_payload(text))
        .await
    {
        error!("Failed to send in-channel notice: {}", e);
    }
}

#[must_use]
pub fn user_facing_error(err: &SummaryError) -> String {
    match err {
        SummaryError::SlackApi(code) if code == NOT_IN_CHANNEL_CODE => NOT_IN_CHANNEL.to_string(),
        other => error_message(&other.to_string()),
    }
}
