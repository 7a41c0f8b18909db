//! Summary persistence

pub mod sqlite;

use async_trait::async_trait;

use crate::core::models::SummaryRecord;
use crate::errors::SummaryError;

pub use sqlite::SqliteStore;

/// Durable append-and-range-read storage for produced summaries.
#[async_trait]
pub trait SummaryStore: Send + Sync {
    /// Append a summary for `channel_id` and return the stored row.
    ///
    /// # Errors
    ///
    /// `SummaryError::StoreUnavailable` if the write fails.
    async fn save(&self, channel_id: &str, summary: &str) -> Result<SummaryRecord, SummaryError>;

    /// Up to `limit` summaries for `channel_id`, most recent first.
    ///
    /// # Errors
    ///
    /// `SummaryError::StoreUnavailable` if the read fails.
    async fn history(
        &self,
        channel_id: &str,
        limit: u32,
    ) -> Result<Vec<SummaryRecord>, SummaryError>;
}
