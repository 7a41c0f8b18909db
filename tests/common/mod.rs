#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use channel_summary::ai::InferenceClient;
use channel_summary::core::config::PipelineConfig;
use channel_summary::core::models::SummaryRecord;
use channel_summary::errors::SummaryError;
use channel_summary::store::SummaryStore;
use channel_summary::summarize::Summarizer;

type Behavior = dyn Fn(usize, &str) -> Result<String, SummaryError> + Send + Sync;
type Delay = dyn Fn(&str) -> Duration + Send + Sync;

/// Marker text only present in reduction prompts.
pub const REDUCTION_MARKER: &str = "summaries of consecutive parts";

/// Marker that precedes the transcript in chunk prompts.
pub const CHUNK_MARKER: &str = "# Conversation log:\n";

/// Inference double: answers from a closure and records every prompt.
pub struct ScriptedInference {
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
    behavior: Box<Behavior>,
    delay: Option<Box<Delay>>,
}

impl ScriptedInference {
    pub fn new<F>(behavior: F) -> Self
    where
        F: Fn(usize, &str) -> Result<String, SummaryError> + Send + Sync + 'static,
    {
        Self {
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
            behavior: Box::new(behavior),
            delay: None,
        }
    }

    pub fn with_delay<D>(mut self, delay: D) -> Self
    where
        D: Fn(&str) -> Duration + Send + Sync + 'static,
    {
        self.delay = Some(Box::new(delay));
        self
    }

    /// Answers every call with `llm summary #<call index>`.
    pub fn always_ok() -> Self {
        Self::new(|n, _| Ok(format!("llm summary #{n}")))
    }

    pub fn always_unavailable() -> Self {
        Self::new(|_, _| Err(SummaryError::InferenceUnavailable("connection refused".into())))
    }

    /// Fails the call with index `fail_at` (0-based) with a timeout, answers the rest.
    pub fn fail_on_call(fail_at: usize) -> Self {
        Self::new(move |n, _| {
            if n == fail_at {
                Err(SummaryError::InferenceTimeout("deadline elapsed".into()))
            } else {
                Ok(format!("llm summary #{n}"))
            }
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn reduction_prompts(&self) -> Vec<String> {
        self.prompts()
            .into_iter()
            .filter(|p| p.contains(REDUCTION_MARKER))
            .collect()
    }
}

#[async_trait]
impl InferenceClient for ScriptedInference {
    async fn infer(&self, prompt: &str, _timeout: Duration) -> Result<String, SummaryError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        if let Some(delay) = &self.delay {
            tokio::time::sleep(delay(prompt)).await;
        }
        (self.behavior)(n, prompt)
    }
}

/// Transcript text embedded in a chunk prompt.
pub fn chunk_text(prompt: &str) -> &str {
    prompt
        .split_once(CHUNK_MARKER)
        .map(|(_, rest)| rest.trim_end_matches('\n'))
        .unwrap_or("")
}

/// In-memory store double that counts writes and can be told to fail.
#[derive(Default)]
pub struct RecordingStore {
    fail: bool,
    saves: AtomicUsize,
    records: Mutex<Vec<SummaryRecord>>,
}

impl RecordingStore {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn save_attempts(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn records(&self) -> Vec<SummaryRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl SummaryStore for RecordingStore {
    async fn save(&self, channel_id: &str, summary: &str) -> Result<SummaryRecord, SummaryError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(SummaryError::StoreUnavailable("database is down".into()));
        }
        let mut records = self.records.lock().unwrap();
        let record = SummaryRecord {
            id: i64::try_from(records.len()).unwrap() + 1,
            channel_id: channel_id.to_string(),
            summary: summary.to_string(),
            created_at: Utc::now(),
        };
        records.push(record.clone());
        Ok(record)
    }

    async fn history(
        &self,
        channel_id: &str,
        limit: u32,
    ) -> Result<Vec<SummaryRecord>, SummaryError> {
        if self.fail {
            return Err(SummaryError::StoreUnavailable("database is down".into()));
        }
        Ok(self
            .records()
            .into_iter()
            .rev()
            .filter(|r| r.channel_id == channel_id)
            .take(limit as usize)
            .collect())
    }
}

pub fn pipeline_config(max_input_chars: usize, chunk_size: usize) -> PipelineConfig {
    PipelineConfig {
        max_input_chars,
        chunk_size,
        chunk_timeout: Duration::from_secs(5),
        reduction_timeout: Duration::from_secs(5),
        pipeline_timeout: Duration::from_secs(10),
        ..PipelineConfig::default()
    }
}

pub fn summarizer(
    inference: &Arc<ScriptedInference>,
    store: &Arc<RecordingStore>,
    config: PipelineConfig,
) -> Summarizer {
    Summarizer::new(inference.clone(), store.clone(), config)
}

/// ASCII transcript of exactly `len` characters made of short chat lines.
pub fn transcript_of_len(len: usize) -> String {
    let mut text = String::new();
    let mut i = 0;
    while text.len() < len {
        text.push_str(&format!("<@U{:03}> message {i} about deployment\n", i % 4));
        i += 1;
    }
    text.truncate(len);
    text
}
