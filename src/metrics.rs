use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters describing pipeline activity.
#[derive(Default)]
pub struct PipelineMetrics {
    analyses_completed: AtomicU64,
    chunks_summarized: AtomicU64,
    llm_calls: AtomicU64,
    upstream_failures: AtomicU64,
}

impl PipelineMetrics {
    /// Create an empty metrics accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed analysis and the number of chunks it summarized.
    pub fn record_analysis(&self, chunk_count: u64) {
        self.analyses_completed.fetch_add(1, Ordering::Relaxed);
        self.chunks_summarized
            .fetch_add(chunk_count, Ordering::Relaxed);
    }

    /// Record one LLM round trip, successful or not.
    pub fn record_llm_call(&self, succeeded: bool) {
        self.llm_calls.fetch_add(1, Ordering::Relaxed);
        if !succeeded {
            self.upstream_failures.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Return a snapshot of the current counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            analyses_completed: self.analyses_completed.load(Ordering::Relaxed),
            chunks_summarized: self.chunks_summarized.load(Ordering::Relaxed),
            llm_calls: self.llm_calls.load(Ordering::Relaxed),
            upstream_failures: self.upstream_failures.load(Ordering::Relaxed),
        }
    }
}

/// Immutable view of pipeline counters used for reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct MetricsSnapshot {
    /// Analyses that returned a result since startup.
    pub analyses_completed: u64,
    /// Chunks summarized across all completed analyses.
    pub chunks_summarized: u64,
    /// LLM calls issued, including failed ones.
    pub llm_calls: u64,
    /// LLM calls that failed.
    pub upstream_failures: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_analyses_and_chunks() {
        let metrics = PipelineMetrics::new();
        metrics.record_analysis(2);
        metrics.record_analysis(3);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.analyses_completed, 2);
        assert_eq!(snapshot.chunks_summarized, 5);
    }

    #[test]
    fn counts_failed_llm_calls_separately() {
        let metrics = PipelineMetrics::new();
        metrics.record_llm_call(true);
        metrics.record_llm_call(false);
        metrics.record_llm_call(true);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.llm_calls, 3);
        assert_eq!(snapshot.upstream_failures, 1);
    }
}
