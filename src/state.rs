use std::sync::Arc;

use crate::core::config::SlackConfig;
use crate::slack::SlackClient;
use crate::summarize::Summarizer;

/// Slack collaborators, present only when the bot credentials are configured.
#[derive(Clone)]
pub struct SlackContext {
    pub client: Arc<SlackClient>,
    pub config: SlackConfig,
}

/// Shared handler state. Cloned per request; everything inside is behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub summarizer: Arc<Summarizer>,
    pub history_limit: u32,
    pub slack: Option<SlackContext>,
}

impl AppState {
    #[must_use]
    pub fn new(summarizer: Arc<Summarizer>, history_limit: u32) -> Self {
        Self {
            summarizer,
            history_limit,
            slack: None,
        }
    }

    #[must_use]
    pub fn with_slack(mut self, client: Arc<SlackClient>, config: SlackConfig) -> Self {
        self.slack = Some(SlackContext { client, config });
        self
    }
}
