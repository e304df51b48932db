//! Request/response types and error definitions for the analysis pipeline.

use crate::llm::CompletionError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::opinion::OpinionAnalysis;

/// Smallest accepted bullet count for the merged summary.
pub const MIN_SUMMARY_BULLETS: usize = 3;
/// Largest accepted bullet count for the merged summary.
pub const MAX_SUMMARY_BULLETS: usize = 12;
/// Bullet count used when a request omits it.
pub const DEFAULT_SUMMARY_BULLETS: usize = 6;

/// Errors emitted by the analysis pipeline.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// Request text was empty or whitespace only.
    #[error("Empty text")]
    EmptyText,
    /// Cleaning removed everything (for example, text that was only a disclaimer).
    #[error("No usable text after cleaning")]
    NoUsableText,
    /// A request parameter was outside its accepted range.
    #[error("Invalid request: {0}")]
    InvalidInput(String),
    /// Chunking produced nothing from non-empty cleaned text.
    #[error("Chunking failed")]
    ChunkingFailed,
    /// A required LLM call failed; the whole analysis is abandoned.
    #[error("LLM call failed: {kind}: {message}")]
    Upstream {
        /// Failure class reported by the completion client.
        kind: &'static str,
        /// Provider or transport message.
        message: String,
    },
    /// The analysis exceeded its wall-clock bound.
    #[error("Analysis timed out after {seconds}s")]
    Timeout {
        /// Configured bound, in seconds.
        seconds: u64,
    },
}

impl AnalyzeError {
    /// Whether the caller caused the failure (bad or empty input).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyText | Self::NoUsableText | Self::InvalidInput(_)
        )
    }
}

impl From<CompletionError> for AnalyzeError {
    fn from(error: CompletionError) -> Self {
        Self::Upstream {
            kind: error.kind(),
            message: error.to_string(),
        }
    }
}

/// Parameters for one full analysis.
#[derive(Debug, Clone)]
pub struct AnalyzeRequest {
    /// Raw article text.
    pub text: String,
    /// Optional question answered from the final summary.
    pub question: Option<String>,
    /// Bullet count requested from the merge call (3..=12).
    pub max_summary_bullets: usize,
    /// Model override; the analyzer's default model is used when `None`.
    pub model: Option<String>,
}

impl AnalyzeRequest {
    /// Request with default bullet count, no question, and the default model.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            question: None,
            max_summary_bullets: DEFAULT_SUMMARY_BULLETS,
            model: None,
        }
    }
}

/// Composite result of a full analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeOutcome {
    /// Text after cleaning, as fed to the chunker.
    pub cleaned_text: String,
    /// Number of chunks summarized.
    pub chunk_count: usize,
    /// Merged summary, verbatim from the model.
    pub summary: String,
    /// Answer to the question, when one was asked.
    pub answer: Option<String>,
    /// Sentiment and key points.
    pub analysis: OpinionAnalysis,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_error_carries_kind_and_message() {
        let error: AnalyzeError = CompletionError::Status {
            status: 401,
            body: "invalid api key".into(),
        }
        .into();
        assert_eq!(
            error.to_string(),
            "LLM call failed: ApiStatusError: provider returned 401: invalid api key"
        );
        assert!(!error.is_client_error());
    }

    #[test]
    fn input_errors_are_client_errors() {
        assert!(AnalyzeError::EmptyText.is_client_error());
        assert!(AnalyzeError::NoUsableText.is_client_error());
        assert!(AnalyzeError::InvalidInput("x".into()).is_client_error());
        assert!(!AnalyzeError::ChunkingFailed.is_client_error());
    }
}
