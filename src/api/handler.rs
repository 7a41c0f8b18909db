//! Handlers for the summary endpoints.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::info;

use super::error::{ApiError, ApiResult};
use crate::core::models::{SummaryMethod, SummaryRequest};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SummaryBody {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub channel: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub summary: String,
    pub channel: String,
    pub method: SummaryMethod,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: i64,
    pub summary: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub summaries: Vec<HistoryEntry>,
}

pub async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// `POST /summary`
pub async fn create_summary(
    State(state): State<AppState>,
    payload: Result<Json<SummaryBody>, JsonRejection>,
) -> ApiResult<Json<SummaryResponse>> {
    let Json(body) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;

    let text = body
        .text
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::bad_request("text is required"))?;
    let channel = body.channel.unwrap_or_default();

    let request = SummaryRequest::new(text, channel);
    let outcome = state.summarizer.summarize_and_store(&request).await?;

    info!(
        channel = %request.channel_id,
        method = %outcome.summary.method,
        persisted = outcome.persistence.is_saved(),
        "Summary request completed"
    );

    Ok(Json(SummaryResponse {
        summary: outcome.formatted,
        channel: request.channel_id,
        method: outcome.summary.method,
    }))
}

/// `GET /summaries/{channel}`
pub async fn list_summaries(
    State(state): State<AppState>,
    Path(channel): Path<String>,
) -> ApiResult<Json<HistoryResponse>> {
    let records = state
        .summarizer
        .store()
        .history(&channel, state.history_limit)
        .await?;

    Ok(Json(HistoryResponse {
        summaries: records
            .into_iter()
            .map(|r| HistoryEntry {
                id: r.id,
                summary: r.summary,
                created_at: r.created_at,
            })
            .collect(),
    }))
}
