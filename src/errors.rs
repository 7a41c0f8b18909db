use thiserror::Error;

#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Inference call timed out: {0}")]
    InferenceTimeout(String),

    #[error("Inference service unavailable: {0}")]
    InferenceUnavailable(String),

    #[error("Summary store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Failed to parse Slack event: {0}")]
    Parse(String),

    /// Carries Slack's `error` code (e.g. `not_in_channel`) or a transport message.
    #[error("Failed to access Slack API: {0}")]
    SlackApi(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl SummaryError {
    /// True for failures the pipeline absorbs by falling back to the heuristic summary.
    #[must_use]
    pub fn is_inference_failure(&self) -> bool {
        matches!(
            self,
            SummaryError::InferenceTimeout(_) | SummaryError::InferenceUnavailable(_)
        )
    }
}

// reqwest is only used directly for inference calls; Slack calls map their
// errors explicitly.
impl From<reqwest::Error> for SummaryError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            SummaryError::InferenceTimeout(error.to_string())
        } else {
            SummaryError::InferenceUnavailable(error.to_string())
        }
    }
}

impl From<sqlx::Error> for SummaryError {
    fn from(error: sqlx::Error) -> Self {
        SummaryError::StoreUnavailable(error.to_string())
    }
}

impl From<anyhow::Error> for SummaryError {
    fn from(error: anyhow::Error) -> Self {
        SummaryError::Internal(error.to_string())
    }
}
