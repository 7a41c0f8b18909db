//! Response-related utilities for Slack interactions.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde_json::{Value, json};

pub const NO_MESSAGES: &str = "There are no messages in this channel.";
pub const NO_USER_MESSAGES: &str = "No user messages were found (bot posts are excluded).";
pub const GENERATING: &str = "🧠 Generating a summary. Please wait a moment…";
pub const NOT_IN_CHANNEL: &str = "❌ Error: the bot is not a member of this channel.\n\n\
Invite it by typing `/invite @slack-summary` in the channel.";

/// Payload for a message only the invoking user can see.
///
/// # Examples
///
/// ```
/// use channel_summary::slack::response_builder::create_ephemeral_payload;
///
/// let payload = create_ephemeral_payload("This message is only visible to you");
/// assert_eq!(payload["response_type"], "ephemeral");
/// ```
#[must_use]
pub fn create_ephemeral_payload(text: &str) -> Value {
    json!({
        "text": text,
        "response_type": "ephemeral"
    })
}

/// Payload for a message everyone in the channel can see.
#[must_use]
pub fn create_in_channel_payload(text: &str) -> Value {
    json!({
        "text": text,
        "response_type": "in_channel"
    })
}

/// Ephemeral text shown when the summary flow fails for a reason other than
/// channel membership.
#[must_use]
pub fn error_message(detail: &str) -> String {
    format!("⚠️ An error occurred: {detail}")
}

/// Append the generated-at footer, rendered in `tz`, to a framed summary.
#[must_use]
pub fn summary_message(summary: &str, generated_at: DateTime<Utc>, tz: Tz) -> String {
    let local = generated_at.with_timezone(&tz);
    format!(
        "{}\n━━━━━━━━━━━━━━━\n🕒 Generated at {}",
        summary.trim_end(),
        local.format("%Y/%m/%d %H:%M:%S")
    )
}
