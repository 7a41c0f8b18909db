use tracing::{error, info};

use super::deliver::{deliver_error, deliver_summary, notify_ephemeral, notify_in_channel};
use super::summarize::{Transcript, collect_transcript, summarize_transcript};
use crate::slack::SlackCommandEvent;
use crate::slack::response_builder::{GENERATING, NO_MESSAGES, NO_USER_MESSAGES};
use crate::state::SlackContext;
use crate::summarize::Summarizer;

/// Run the whole slash-command flow for one invocation: fetch history,
/// summarize, post the result. Failures end up as an ephemeral reply.
#[tracing::instrument(level = "info", skip_all, fields(channel = %event.channel_id, correlation_id = %correlation_id))]
pub async fn process_command(
    slack: &SlackContext,
    summarizer: &Summarizer,
    event: &SlackCommandEvent,
    correlation_id: &str,
) {
    let client = slack.client.as_ref();
    let channel_id = event.channel_id.as_str();

    let transcript =
        match collect_transcript(client, channel_id, slack.config.history_limit).await {
            Ok(t) => t,
            Err(e) => {
                error!("Failed to fetch channel history: {}", e);
                deliver_error(client, &event.response_url, &e).await;
                return;
            }
        };

    let text = match transcript {
        Transcript::Empty => {
            notify_ephemeral(client, &event.response_url, NO_MESSAGES).await;
            return;
        }
        Transcript::NoUserMessages => {
            notify_ephemeral(client, &event.response_url, NO_USER_MESSAGES).await;
            return;
        }
        Transcript::Text(text) => text,
    };

    notify_in_channel(client, &event.response_url, GENERATING).await;

    let outcome = match summarize_transcript(summarizer, channel_id, text).await {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("Failed to generate summary: {}", e);
            deliver_error(client, &event.response_url, &e).await;
            return;
        }
    };

    if let Err(e) = deliver_summary(client, channel_id, &outcome, slack.config.display_timezone).await
    {
        error!("Failed to deliver summary: {}", e);
        deliver_error(client, &event.response_url, &e).await;
        return;
    }

    info!(method = %outcome.summary.method, "Slash command completed");
}
