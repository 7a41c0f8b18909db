use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The fields of a slash command invocation that the summary flow uses.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SlackCommandEvent {
    pub team_id: String,
    pub channel_id: String,
    pub channel_name: String,
    pub user_id: String,
    pub command: String,
    pub text: String,
    pub response_url: String,
    pub trigger_id: String,
}

/// Decodes a form-encoded component, treating `+` as a space.
///
/// # Examples
///
/// ```
/// use channel_summary::slack::command_parser::decode_url_component;
///
/// assert_eq!(decode_url_component("hello%20world").unwrap(), "hello world");
/// assert_eq!(decode_url_component("hello+world").unwrap(), "hello world");
/// ```
pub fn decode_url_component(input: &str) -> Result<String, String> {
    let spaced = input.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .map(|s| s.to_string())
        .map_err(|e| format!("Failed to decode URL component: {e}"))
}

/// Parses the URL-encoded body Slack posts for a slash command.
///
/// Missing fields default to empty strings; callers decide which ones they need.
///
/// # Examples
///
/// ```
/// use channel_summary::slack::command_parser::parse_form_data;
///
/// let form_data = "team_id=T123&channel_id=C123&channel_name=general&\
///                  user_id=U123&command=%2Fsummary&text=&\
///                  response_url=https%3A%2F%2Fhooks.slack.com%2F&trigger_id=123.456";
///
/// let event = parse_form_data(form_data).unwrap();
/// assert_eq!(event.command, "/summary");
/// assert_eq!(event.channel_id, "C123");
/// ```
pub fn parse_form_data(form_data: &str) -> Result<SlackCommandEvent, String> {
    let mut map: HashMap<String, String> = HashMap::new();

    for pair in form_data.split('&') {
        if let Some(idx) = pair.find('=') {
            let key = decode_url_component(&pair[..idx])
                .map_err(|e| format!("Failed to decode key: {e}"))?;
            let value = decode_url_component(&pair[idx + 1..])
                .map_err(|e| format!("Failed to decode value: {e}"))?;
            map.insert(key, value);
        }
    }

    let field = |name: &str| map.get(name).cloned().unwrap_or_default();

    Ok(SlackCommandEvent {
        team_id: field("team_id"),
        channel_id: field("channel_id"),
        channel_name: field("channel_name"),
        user_id: field("user_id"),
        command: field("command"),
        text: field("text"),
        response_url: field("response_url"),
        trigger_id: field("trigger_id"),
    })
}
