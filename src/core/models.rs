use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::SummaryError;

/// One summarization job: a transcript and the channel it came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryRequest {
    pub raw_text: String,
    pub channel_id: String,
}

impl SummaryRequest {
    #[must_use]
    pub fn new(raw_text: impl Into<String>, channel_id: impl Into<String>) -> Self {
        Self {
            raw_text: raw_text.into(),
            channel_id: channel_id.into(),
        }
    }

    /// # Errors
    ///
    /// Returns `SummaryError::Validation` when the text or channel is empty.
    pub fn validate(&self) -> Result<(), SummaryError> {
        if self.raw_text.is_empty() {
            return Err(SummaryError::Validation("text is required".to_string()));
        }
        if self.channel_id.trim().is_empty() {
            return Err(SummaryError::Validation("channel is required".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryMethod {
    Llm,
    Heuristic,
    Mixed,
}

impl SummaryMethod {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SummaryMethod::Llm => "llm",
            SummaryMethod::Heuristic => "heuristic",
            SummaryMethod::Mixed => "mixed",
        }
    }
}

impl std::fmt::Display for SummaryMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinalSummary {
    pub text: String,
    pub method: SummaryMethod,
    pub generated_at: DateTime<Utc>,
}

impl FinalSummary {
    #[must_use]
    pub fn new(text: String, method: SummaryMethod) -> Self {
        Self {
            text,
            method,
            generated_at: Utc::now(),
        }
    }
}

/// A stored summary. Rows are never updated after insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct SummaryRecord {
    pub id: i64,
    pub channel_id: String,
    pub summary: String,
    pub created_at: DateTime<Utc>,
}

/// Result of the best-effort write that follows a summarization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Persistence {
    Saved { id: i64 },
    Failed { reason: String },
}

impl Persistence {
    #[must_use]
    pub fn is_saved(&self) -> bool {
        matches!(self, Persistence::Saved { .. })
    }
}

#[derive(Debug, Clone)]
pub struct SummaryOutcome {
    pub summary: FinalSummary,
    /// The channel-framed text that was returned and persisted.
    pub formatted: String,
    pub persistence: Persistence,
}
