use crate::slack::HistoryMessage;

const BOT_MESSAGE_SUBTYPE: &str = "bot_message";

/// Keeps messages posted by people: drops `bot_message` posts and entries
/// without text.
#[must_use]
pub fn filter_user_messages(messages: Vec<HistoryMessage>) -> Vec<HistoryMessage> {
    messages
        .into_iter()
        .filter(|msg| {
            let is_bot_message = msg.subtype.as_deref() == Some(BOT_MESSAGE_SUBTYPE);
            let has_text = msg.text.as_deref().is_some_and(|t| !t.trim().is_empty());

            !is_bot_message && has_text
        })
        .collect()
}

/// Joins messages into one transcript, oldest first.
///
/// Slack returns history newest first, so the input order is reversed.
#[must_use]
pub fn build_transcript(messages: &[HistoryMessage]) -> String {
    messages
        .iter()
        .rev()
        .filter_map(|msg| msg.text.as_deref())
        .collect::<Vec<_>>()
        .join("\n")
}
