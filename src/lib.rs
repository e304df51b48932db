#![deny(missing_docs)]

//! Core library for the newsbrief article analysis service.

/// HTTP routing and REST handlers.
pub mod api;
/// Environment-driven configuration management.
pub mod config;
/// Chat-completion client abstraction and the OpenAI adapter.
pub mod llm;
/// Structured logging and tracing setup.
pub mod logging;
/// Pipeline counters.
pub mod metrics;
/// Cleaning, chunking, and multi-pass summarization pipeline.
pub mod pipeline;
