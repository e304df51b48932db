//! Analyzer coordinating cleaning, chunking, and the LLM calls of one analysis.

use crate::{
    config::Config,
    llm::{CompletionClient, CompletionRequest},
    metrics::{MetricsSnapshot, PipelineMetrics},
    pipeline::{
        chunking::{ChunkingOptions, chunk_text},
        clean::{clean_news_text, collapse_whitespace},
        opinion::{OpinionAnalysis, parse_opinion},
        prompts,
        types::{
            AnalyzeError, AnalyzeOutcome, AnalyzeRequest, MAX_SUMMARY_BULLETS,
            MIN_SUMMARY_BULLETS,
        },
    },
};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, Instant};

const TEMPERATURE: f32 = 0.0;

/// Runs the multi-pass summarization pipeline against an injected completion client.
///
/// The analyzer holds no per-request state; share one instance through an `Arc` across
/// concurrent requests.
pub struct NewsAnalyzer {
    client: Arc<dyn CompletionClient>,
    default_model: String,
    chunking: ChunkingOptions,
    timeout: Duration,
    metrics: Arc<PipelineMetrics>,
}

/// Abstraction over the analyzer used by the HTTP surface.
#[async_trait]
pub trait AnalyzerApi: Send + Sync {
    /// Run the full clean/chunk/summarize/QA/opinion pipeline.
    async fn analyze(&self, request: AnalyzeRequest) -> Result<AnalyzeOutcome, AnalyzeError>;

    /// Produce a single-call five-line summary.
    async fn summarize_news(&self, text: &str) -> Result<String, AnalyzeError>;

    /// Retrieve the current metrics snapshot for diagnostics.
    fn metrics_snapshot(&self) -> MetricsSnapshot;
}

impl NewsAnalyzer {
    /// Build an analyzer with the given client and default settings.
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self::from_config(client, &Config::default())
    }

    /// Build an analyzer whose model, chunking, and timeout come from configuration.
    pub fn from_config(client: Arc<dyn CompletionClient>, config: &Config) -> Self {
        Self {
            client,
            default_model: config.default_model.clone(),
            chunking: ChunkingOptions {
                chunk_size: config.chunk_size,
                overlap: config.chunk_overlap,
            },
            timeout: config.analyze_timeout,
            metrics: Arc::new(PipelineMetrics::new()),
        }
    }

    /// Override the chunking parameters.
    pub fn with_chunking(mut self, chunking: ChunkingOptions) -> Self {
        self.chunking = chunking;
        self
    }

    /// Override the whole-analysis timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Send one prompt to the model. Failures are not retried.
    pub async fn ask(
        &self,
        model: &str,
        prompt: String,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, AnalyzeError> {
        let started = Instant::now();
        let result = self
            .client
            .complete(CompletionRequest {
                model: model.to_string(),
                prompt,
                max_tokens,
                temperature,
            })
            .await;
        let elapsed_ms = started.elapsed().as_millis() as u64;
        self.metrics.record_llm_call(result.is_ok());

        match result {
            Ok(text) => {
                tracing::debug!(model, max_tokens, elapsed_ms, "LLM call completed");
                Ok(text)
            }
            Err(error) => {
                tracing::warn!(model, elapsed_ms, error = %error, "LLM call failed");
                Err(error.into())
            }
        }
    }

    /// Summarize each chunk in order, then merge the partial summaries.
    ///
    /// The merge response is returned verbatim; its structure is not validated.
    pub async fn summarize_chunks(
        &self,
        model: &str,
        chunks: &[String],
        max_bullets: usize,
    ) -> Result<String, AnalyzeError> {
        let total = chunks.len();
        let mut partials = Vec::with_capacity(total);
        for (index, chunk) in chunks.iter().enumerate() {
            let partial = self
                .ask(
                    model,
                    prompts::chunk_summary_prompt(index, total, chunk),
                    prompts::CHUNK_SUMMARY_MAX_TOKENS,
                    TEMPERATURE,
                )
                .await?;
            tracing::debug!(part = index + 1, total, "Chunk summarized");
            partials.push(partial);
        }

        let merged = partials.join("\n");
        self.ask(
            model,
            prompts::merge_summary_prompt(&merged, max_bullets),
            prompts::MERGE_SUMMARY_MAX_TOKENS,
            TEMPERATURE,
        )
        .await
    }

    /// Answer a question using only the given summary.
    pub async fn qa_on_summary(
        &self,
        model: &str,
        summary: &str,
        question: &str,
    ) -> Result<String, AnalyzeError> {
        self.ask(
            model,
            prompts::qa_prompt(summary, question),
            prompts::QA_MAX_TOKENS,
            TEMPERATURE,
        )
        .await
    }

    /// Ask for sentiment and key points as JSON.
    ///
    /// Unparseable output degrades to [`OpinionAnalysis::unknown`]; a failed call is still an
    /// error.
    pub async fn analyze_opinions(
        &self,
        model: &str,
        summary: &str,
    ) -> Result<OpinionAnalysis, AnalyzeError> {
        let raw = self
            .ask(
                model,
                prompts::opinion_prompt(summary),
                prompts::OPINION_MAX_TOKENS,
                TEMPERATURE,
            )
            .await?;
        Ok(parse_opinion(&raw))
    }

    /// Run the full pipeline under the configured wall-clock bound.
    pub async fn analyze(&self, request: AnalyzeRequest) -> Result<AnalyzeOutcome, AnalyzeError> {
        match tokio::time::timeout(self.timeout, self.run_analysis(request)).await {
            Ok(result) => result,
            Err(_) => {
                tracing::error!(
                    timeout_secs = self.timeout.as_secs(),
                    "Analysis exceeded its time limit"
                );
                Err(AnalyzeError::Timeout {
                    seconds: self.timeout.as_secs(),
                })
            }
        }
    }

    async fn run_analysis(&self, request: AnalyzeRequest) -> Result<AnalyzeOutcome, AnalyzeError> {
        let AnalyzeRequest {
            text,
            question,
            max_summary_bullets,
            model,
        } = request;

        if !(MIN_SUMMARY_BULLETS..=MAX_SUMMARY_BULLETS).contains(&max_summary_bullets) {
            return Err(AnalyzeError::InvalidInput(format!(
                "max_summary_bullets must be between {MIN_SUMMARY_BULLETS} and {MAX_SUMMARY_BULLETS}, got {max_summary_bullets}"
            )));
        }
        if text.trim().is_empty() {
            return Err(AnalyzeError::EmptyText);
        }

        let cleaned_text = clean_news_text(&text);
        if cleaned_text.is_empty() {
            return Err(AnalyzeError::NoUsableText);
        }

        let chunks = chunk_text(
            &cleaned_text,
            self.chunking.chunk_size,
            self.chunking.overlap,
        );
        if chunks.is_empty() {
            tracing::error!(
                cleaned_len = cleaned_text.len(),
                "Chunker returned no chunks for non-empty text"
            );
            return Err(AnalyzeError::ChunkingFailed);
        }

        let model = model
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| self.default_model.clone());
        tracing::info!(
            model = %model,
            raw_len = text.len(),
            cleaned_len = cleaned_text.len(),
            chunks = chunks.len(),
            chunk_size = self.chunking.chunk_size,
            overlap = self.chunking.overlap,
            "Analyzing article"
        );

        let summary = self
            .summarize_chunks(&model, &chunks, max_summary_bullets)
            .await?;

        let answer = match question.as_deref().map(str::trim) {
            Some(question) if !question.is_empty() => {
                Some(self.qa_on_summary(&model, &summary, question).await?)
            }
            _ => None,
        };

        let analysis = self.analyze_opinions(&model, &summary).await?;

        self.metrics.record_analysis(chunks.len() as u64);
        tracing::info!(
            chunks = chunks.len(),
            answered = answer.is_some(),
            sentiment = ?analysis.sentiment,
            "Analysis completed"
        );

        Ok(AnalyzeOutcome {
            cleaned_text,
            chunk_count: chunks.len(),
            summary,
            answer,
            analysis,
        })
    }

    /// Single-call summary of whitespace-collapsed text. Blank input returns an empty summary
    /// without calling the model.
    pub async fn summarize_news(&self, text: &str) -> Result<String, AnalyzeError> {
        let collapsed = collapse_whitespace(text);
        if collapsed.is_empty() {
            return Ok(String::new());
        }
        self.ask(
            &self.default_model,
            prompts::quick_summary_prompt(&collapsed),
            prompts::QUICK_SUMMARY_MAX_TOKENS,
            TEMPERATURE,
        )
        .await
    }

    /// Return the current pipeline metrics snapshot.
    pub fn metrics_snapshot(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}

#[async_trait]
impl AnalyzerApi for NewsAnalyzer {
    async fn analyze(&self, request: AnalyzeRequest) -> Result<AnalyzeOutcome, AnalyzeError> {
        NewsAnalyzer::analyze(self, request).await
    }

    async fn summarize_news(&self, text: &str) -> Result<String, AnalyzeError> {
        NewsAnalyzer::summarize_news(self, text).await
    }

    fn metrics_snapshot(&self) -> MetricsSnapshot {
        NewsAnalyzer::metrics_snapshot(self)
    }
}
