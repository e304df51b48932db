//! Article analysis pipeline: cleaning, chunking, chunk summaries, merge, QA, and opinion
//! extraction.

pub mod chunking;
pub mod clean;
pub mod opinion;
mod prompts;
mod service;
pub mod types;

pub use chunking::{ChunkingOptions, DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE, chunk_text};
pub use clean::clean_news_text;
pub use opinion::{OpinionAnalysis, Sentiment, parse_opinion};
pub use prompts::NO_INFORMATION_ANSWER;
pub use service::{AnalyzerApi, NewsAnalyzer};
pub use types::{
    AnalyzeError, AnalyzeOutcome, AnalyzeRequest, DEFAULT_SUMMARY_BULLETS, MAX_SUMMARY_BULLETS,
    MIN_SUMMARY_BULLETS,
};
