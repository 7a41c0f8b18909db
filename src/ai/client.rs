//! Inference service client
//!
//! Wraps the generate-style endpoint of the external LLM service. One call per
//! `infer`, no retries: fallback policy belongs to the summarization controller.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

use crate::errors::SummaryError;

#[must_use]
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count() / 4 + 1
}

/// A remote text-generation service.
#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// Send `prompt` and return the generated text.
    ///
    /// # Errors
    ///
    /// `SummaryError::InferenceTimeout` when the call outlives `timeout`,
    /// `SummaryError::InferenceUnavailable` for any other failure.
    async fn infer(&self, prompt: &str, timeout: Duration) -> Result<String, SummaryError>;
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Client for an Ollama-compatible `/api/generate` endpoint.
pub struct OllamaClient {
    http: Client,
    endpoint: String,
    model: String,
}

impl OllamaClient {
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(base_url: &str, model: impl Into<String>) -> Result<Self, SummaryError> {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| SummaryError::Internal(format!("Failed to build inference HTTP client: {e}")))?;

        Ok(Self {
            http,
            endpoint: generate_url(base_url),
            model: model.into(),
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl InferenceClient for OllamaClient {
    async fn infer(&self, prompt: &str, timeout: Duration) -> Result<String, SummaryError> {
        #[cfg(feature = "debug-logs")]
        debug!("Inference prompt:\n{}", prompt);

        info!(
            model = %self.model,
            estimated_tokens = estimate_tokens(prompt),
            "Sending inference request"
        );

        let body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        let response = self
            .http
            .post(&self.endpoint)
            .timeout(timeout)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|e| {
                format!("Failed to read error response body (status {status}): {e}")
            });
            return Err(SummaryError::InferenceUnavailable(format!(
                "status {status}: {error_text}"
            )));
        }

        let parsed: GenerateResponse = response.json().await?;
        let text = parsed.response.trim().to_string();
        debug!(chars = text.chars().count(), "Inference response received");

        Ok(text)
    }
}

fn generate_url(base_url: &str) -> String {
    format!("{}/api/generate", base_url.trim_end_matches('/'))
}
