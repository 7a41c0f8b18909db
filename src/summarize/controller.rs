//! Map-reduce summarization with heuristic fallback.
//!
//! A run moves through `clip -> chunk -> infer chunks -> reduce` and always ends
//! in a [`FinalSummary`]: inference failures are absorbed here and turned into
//! the rule-based summary, so the only error a caller can see is a validation
//! failure of the request itself.

use futures::future::join_all;
use std::sync::Arc;
use tracing::{error, info, warn};

use super::{chunker, format, heuristic};
use crate::ai::InferenceClient;
use crate::ai::prompt_builder::{chunk_prompt, reduction_prompt};
use crate::core::config::{FallbackPolicy, PipelineConfig};
use crate::core::models::{
    FinalSummary, Persistence, SummaryMethod, SummaryOutcome, SummaryRequest,
};
use crate::errors::SummaryError;
use crate::store::SummaryStore;

/// Partial summaries gathered from the chunk pass, in chunk order.
struct ChunkPass {
    partials: Vec<String>,
    fallbacks: usize,
}

pub struct Summarizer {
    inference: Arc<dyn InferenceClient>,
    store: Arc<dyn SummaryStore>,
    config: PipelineConfig,
}

impl Summarizer {
    #[must_use]
    pub fn new(
        inference: Arc<dyn InferenceClient>,
        store: Arc<dyn SummaryStore>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            inference,
            store,
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    #[must_use]
    pub fn store(&self) -> &Arc<dyn SummaryStore> {
        &self.store
    }

    /// Produce a summary for `request`.
    ///
    /// # Errors
    ///
    /// Only `SummaryError::Validation`, when the request has no text or no
    /// channel. Inference failures resolve to a heuristic summary.
    #[tracing::instrument(level = "info", skip(self, request), fields(channel = %request.channel_id))]
    pub async fn summarize(&self, request: &SummaryRequest) -> Result<FinalSummary, SummaryError> {
        if let Err(e) = request.validate() {
            info!("Rejected summary request: {}", e);
            return Err(e);
        }

        let clipped = chunker::clip(&request.raw_text, self.config.max_input_chars);
        let chunks = chunker::split(clipped, self.config.chunk_size);

        info!(
            input_chars = request.raw_text.chars().count(),
            clipped_chars = clipped.chars().count(),
            chunks = chunks.len(),
            "Summarizing transcript"
        );

        if self.config.force_heuristic {
            info!("Heuristic-only mode; skipping inference");
            return Ok(heuristic_summary(clipped));
        }

        if chunks.is_empty() {
            return Ok(heuristic_summary(clipped));
        }

        let outcome = tokio::time::timeout(self.config.pipeline_timeout, self.run_inference(&chunks))
            .await;

        match outcome {
            Ok(Some((text, method))) => {
                info!(method = %method, "Summary generated");
                Ok(FinalSummary::new(text, method))
            }
            Ok(None) => Ok(heuristic_summary(clipped)),
            Err(_) => {
                warn!(
                    timeout_secs = self.config.pipeline_timeout.as_secs(),
                    "Summarization deadline exceeded; using heuristic summary"
                );
                Ok(heuristic_summary(clipped))
            }
        }
    }

    /// Summarize, frame the text for the channel, and try to persist it.
    ///
    /// A failed write is reported in [`SummaryOutcome::persistence`] and
    /// logged; it never fails the call.
    ///
    /// # Errors
    ///
    /// Same as [`Summarizer::summarize`].
    pub async fn summarize_and_store(
        &self,
        request: &SummaryRequest,
    ) -> Result<SummaryOutcome, SummaryError> {
        let summary = self.summarize(request).await?;
        let formatted = format::format_for_channel(&summary.text);

        let persistence = match self.store.save(&request.channel_id, &formatted).await {
            Ok(record) => {
                info!(id = record.id, channel = %request.channel_id, "Summary saved");
                Persistence::Saved { id: record.id }
            }
            Err(e) => {
                warn!(channel = %request.channel_id, error = %e, "Failed to save summary");
                Persistence::Failed {
                    reason: e.to_string(),
                }
            }
        };

        Ok(SummaryOutcome {
            summary,
            formatted,
            persistence,
        })
    }

    /// `None` means the caller should fall back to the heuristic over the whole clip.
    async fn run_inference(&self, chunks: &[&str]) -> Option<(String, SummaryMethod)> {
        let pass = self.map_chunks(chunks).await?;
        let method = if pass.fallbacks > 0 {
            SummaryMethod::Mixed
        } else {
            SummaryMethod::Llm
        };

        if pass.partials.len() == 1 {
            return pass.partials.into_iter().next().map(|text| (text, method));
        }

        let prompt = reduction_prompt(&pass.partials);
        match self
            .inference
            .infer(&prompt, self.config.reduction_timeout)
            .await
        {
            Ok(text) => Some((text, method)),
            Err(e) => {
                log_inference_error("reduction", None, &e);
                None
            }
        }
    }

    async fn map_chunks(&self, chunks: &[&str]) -> Option<ChunkPass> {
        let mut pass = ChunkPass {
            partials: Vec::with_capacity(chunks.len()),
            fallbacks: 0,
        };

        if self.config.parallel_chunks {
            let results = join_all(
                chunks
                    .iter()
                    .enumerate()
                    .map(|(idx, chunk)| self.infer_chunk(idx, chunk)),
            )
            .await;
            for (idx, (chunk, result)) in chunks.iter().zip(results).enumerate() {
                self.absorb(&mut pass, idx, chunk, result)?;
            }
        } else {
            for (idx, chunk) in chunks.iter().enumerate() {
                let result = self.infer_chunk(idx, chunk).await;
                self.absorb(&mut pass, idx, chunk, result)?;
            }
        }

        if pass.fallbacks == chunks.len() {
            warn!("Every chunk failed inference; using heuristic summary");
            return None;
        }

        Some(pass)
    }

    async fn infer_chunk(&self, idx: usize, chunk: &str) -> Result<String, SummaryError> {
        info!(chunk = idx, chars = chunk.chars().count(), "Inferring chunk");
        self.inference
            .infer(&chunk_prompt(chunk), self.config.chunk_timeout)
            .await
    }

    fn absorb(
        &self,
        pass: &mut ChunkPass,
        idx: usize,
        chunk: &str,
        result: Result<String, SummaryError>,
    ) -> Option<()> {
        match result {
            Ok(text) => {
                pass.partials.push(text);
                Some(())
            }
            Err(e) => {
                log_inference_error("chunk", Some(idx), &e);
                match self.config.fallback_policy {
                    FallbackPolicy::WholePipeline => None,
                    FallbackPolicy::PerChunk => {
                        pass.partials.push(heuristic::extract(chunk));
                        pass.fallbacks += 1;
                        Some(())
                    }
                }
            }
        }
    }
}

fn heuristic_summary(clipped: &str) -> FinalSummary {
    FinalSummary::new(heuristic::extract(clipped), SummaryMethod::Heuristic)
}

/// Timeouts and unreachable models are expected and logged at `warn`; any
/// other error out of the client points at a bug and is logged at `error`.
fn log_inference_error(stage: &str, chunk: Option<usize>, e: &SummaryError) {
    if e.is_inference_failure() {
        warn!(stage, chunk, error = %e, "Inference failed; falling back to heuristic");
    } else {
        error!(stage, chunk, error = %e, "Unexpected inference error; falling back to heuristic");
    }
}
