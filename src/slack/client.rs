//! Minimal Slack Web API client for the slash-command flow.

use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, error};

use crate::errors::SummaryError;

const SLACK_API_BASE: &str = "https://slack.com/api";

static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .unwrap_or_else(|_| Client::new())
});

/// One entry of `conversations.history`, reduced to what the summary flow reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryMessage {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub subtype: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub bot_id: Option<String>,
    #[serde(default)]
    pub ts: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HistoryResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    messages: Vec<HistoryMessage>,
}

pub struct SlackClient {
    token: String,
    api_base: String,
}

impl SlackClient {
    #[must_use]
    pub fn new(token: String) -> Self {
        Self::with_api_base(token, SLACK_API_BASE)
    }

    #[must_use]
    pub fn with_api_base(token: String, api_base: &str) -> Self {
        Self {
            token,
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    async fn with_retry<F, Fut, T>(&self, operation: F) -> Result<T, SummaryError>
    where
        F: FnMut() -> Fut + Send,
        Fut: std::future::Future<Output = Result<T, SummaryError>> + Send,
        T: Send,
    {
        // 100ms, 200ms, 400ms before jitter
        let strategy = ExponentialBackoff::from_millis(2)
            .factor(50)
            .max_delay(Duration::from_secs(2))
            .map(jitter)
            .take(3);

        Retry::start(strategy, operation).await
    }

    /// Latest `limit` messages of a channel, newest first (Slack's order).
    ///
    /// # Errors
    ///
    /// `SummaryError::SlackApi` carrying Slack's error code (for example
    /// `not_in_channel`) or the transport failure.
    pub async fn get_recent_messages(
        &self,
        channel_id: &str,
        limit: u32,
    ) -> Result<Vec<HistoryMessage>, SummaryError> {
        let url = format!("{}/conversations.history", self.api_base);
        let url = url.as_str();
        let limit = limit.to_string();
        let limit = limit.as_str();

        let body: HistoryResponse = self
            .with_retry(|| async move {
                let resp = HTTP_CLIENT
                    .get(url)
                    .bearer_auth(&self.token)
                    .query(&[("channel", channel_id), ("limit", limit)])
                    .send()
                    .await
                    .map_err(|e| {
                        SummaryError::SlackApi(format!("conversations.history request failed: {e}"))
                    })?;

                if !resp.status().is_success() {
                    return Err(SummaryError::SlackApi(format!(
                        "conversations.history HTTP {}",
                        resp.status()
                    )));
                }

                resp.json::<HistoryResponse>().await.map_err(|e| {
                    SummaryError::SlackApi(format!("conversations.history JSON parse error: {e}"))
                })
            })
            .await?;

        if !body.ok {
            return Err(SummaryError::SlackApi(
                body.error.unwrap_or_else(|| "unknown".to_string()),
            ));
        }

        debug!(channel_id, count = body.messages.len(), "Fetched channel history");
        Ok(body.messages)
    }

    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or Slack returns an error.
    pub async fn post_message(&self, channel_id: &str, text: &str) -> Result<(), SummaryError> {
        let url = format!("{}/chat.postMessage", self.api_base);
        let url = url.as_str();
        let payload = json!({
            "channel": channel_id,
            "text": text,
        });
        let payload = &payload;

        self.with_retry(|| async move {
            let resp = HTTP_CLIENT
                .post(url)
                .bearer_auth(&self.token)
                .json(payload)
                .send()
                .await
                .map_err(|e| SummaryError::SlackApi(format!("Failed to post message: {e}")))?;

            if !resp.status().is_success() {
                return Err(SummaryError::SlackApi(format!(
                    "chat.postMessage HTTP {}",
                    resp.status()
                )));
            }

            let body: Value = resp.json().await.map_err(|e| {
                SummaryError::SlackApi(format!("chat.postMessage JSON parse error: {e}"))
            })?;

            if !body.get("ok").and_then(Value::as_bool).unwrap_or(false) {
                return Err(SummaryError::SlackApi(
                    body.get("error")
                        .and_then(Value::as_str)
                        .unwrap_or("unknown")
                        .to_string(),
                ));
            }

            Ok(())
        })
        .await
    }

    /// Post a payload to a slash command's `response_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent or Slack rejects it.
    pub async fn respond(&self, response_url: &str, payload: &Value) -> Result<(), SummaryError> {
        let resp = HTTP_CLIENT
            .post(response_url)
            .json(payload)
            .send()
            .await
            .map_err(|e| SummaryError::SlackApi(format!("response_url POST failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body_text = resp
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read body>".to_string());
            error!("response_url POST failed: status={} body={}", status, body_text);
            return Err(SummaryError::SlackApi(format!("response_url HTTP {status}")));
        }

        Ok(())
    }
}
