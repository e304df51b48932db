//! Parsing of the sentiment/key-point JSON returned by the model.

use serde::{Deserialize, Serialize};

/// Overall tone of an article summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Sentiment {
    /// Favourable coverage.
    Positive,
    /// Unfavourable coverage.
    Negative,
    /// Neither clearly favourable nor unfavourable.
    Neutral,
    /// The model gave no usable answer.
    Unknown,
}

impl From<String> for Sentiment {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "positive" => Self::Positive,
            "negative" => Self::Negative,
            "neutral" => Self::Neutral,
            _ => Self::Unknown,
        }
    }
}

/// Sentiment and key points extracted from a final summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpinionAnalysis {
    /// Overall sentiment label.
    pub sentiment: Sentiment,
    /// Key points in the order the model listed them.
    #[serde(default)]
    pub key_points: Vec<String>,
}

impl OpinionAnalysis {
    /// Result used when the model response cannot be parsed.
    pub fn unknown() -> Self {
        Self {
            sentiment: Sentiment::Unknown,
            key_points: Vec::new(),
        }
    }
}

/// Extract the JSON object embedded in a model response.
///
/// The candidate span runs from the first `{` to the last `}`, which tolerates prose or code
/// fences around the object. Any failure yields [`OpinionAnalysis::unknown`].
pub fn parse_opinion(raw: &str) -> OpinionAnalysis {
    let Some(span) = brace_span(raw) else {
        tracing::warn!(response_len = raw.len(), "Opinion response contained no JSON object");
        return OpinionAnalysis::unknown();
    };

    match serde_json::from_str::<OpinionAnalysis>(span) {
        Ok(analysis) => analysis,
        Err(error) => {
            tracing::warn!(error = %error, "Failed to parse opinion JSON; using unknown sentiment");
            OpinionAnalysis::unknown()
        }
    }
}

fn brace_span(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end > start).then(|| &raw[start..=end])
}
