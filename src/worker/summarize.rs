use crate::core::models::{SummaryOutcome, SummaryRequest};
use crate::errors::SummaryError;
use crate::slack::SlackClient;
use crate::summarize::Summarizer;
use crate::utils::filters::{build_transcript, filter_user_messages};

/// What the channel history yielded for summarization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transcript {
    /// The channel has no messages at all.
    Empty,
    /// Every message was a bot post.
    NoUserMessages,
    Text(String),
}

/// Fetch the latest `limit` messages of `channel_id` and assemble the transcript.
pub async fn collect_transcript(
    slack: &SlackClient,
    channel_id: &str,
    limit: u32,
) -> Result<Transcript, SummaryError> {
    let messages = slack.get_recent_messages(channel_id, limit).await?;
    if messages.is_empty() {
        return Ok(Transcript::Empty);
    }

    let user_messages = filter_user_messages(messages);
    if user_messages.is_empty() {
        return Ok(Transcript::NoUserMessages);
    }

    Ok(Transcript::Text(build_transcript(&user_messages)))
}

pub async fn summarize_transcript(
    summarizer: &Summarizer,
    channel_id: &str,
    transcript: String,
) -> Result<SummaryOutcome, SummaryError> {
    let request = SummaryRequest::new(transcript, channel_id);
    summarizer.summarize_and_store(&request).await
}
