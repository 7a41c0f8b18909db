//! SQLite-backed summary store

use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::time::Duration;
use tracing::info;

use super::SummaryStore;
use crate::core::models::SummaryRecord;
use crate::errors::SummaryError;

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS summaries (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        channel_id TEXT NOT NULL,
        summary TEXT NOT NULL,
        created_at TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_summaries_channel_created
        ON summaries (channel_id, created_at)",
];

#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open a pool on `database_url` and make sure the schema exists.
    ///
    /// # Errors
    ///
    /// `SummaryError::StoreUnavailable` if the database cannot be opened or
    /// the schema cannot be created.
    pub async fn connect(database_url: &str) -> Result<Self, SummaryError> {
        // An in-memory database lives per connection, so keep a single one.
        let max_connections = if database_url.contains(":memory:") { 1 } else { 10 };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(10))
            .connect(database_url)
            .await?;

        let store = Self { pool };
        store.init_schema().await?;
        info!(database_url, "Summary store ready");
        Ok(store)
    }

    #[must_use]
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// # Errors
    ///
    /// `SummaryError::StoreUnavailable` if a schema statement fails.
    pub async fn init_schema(&self) -> Result<(), SummaryError> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }

    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl SummaryStore for SqliteStore {
    async fn save(&self, channel_id: &str, summary: &str) -> Result<SummaryRecord, SummaryError> {
        let created_at = Utc::now();
        let result = sqlx::query(
            "INSERT INTO summaries (channel_id, summary, created_at) VALUES (?, ?, ?)",
        )
        .bind(channel_id)
        .bind(summary)
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        Ok(SummaryRecord {
            id: result.last_insert_rowid(),
            channel_id: channel_id.to_string(),
            summary: summary.to_string(),
            created_at,
        })
    }

    async fn history(
        &self,
        channel_id: &str,
        limit: u32,
    ) -> Result<Vec<SummaryRecord>, SummaryError> {
        let rows = sqlx::query_as::<_, SummaryRecord>(
            "SELECT id, channel_id, summary, created_at FROM summaries
             WHERE channel_id = ?
             ORDER BY created_at DESC, id DESC
             LIMIT ?",
        )
        .bind(channel_id)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
