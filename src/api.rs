//! HTTP surface for newsbrief.
//!
//! A compact Axum router with a handful of endpoints:
//!
//! - `POST /analyze` – Clean and chunk article text, summarize it in multiple passes, optionally
//!   answer a question from the summary, and extract sentiment/key points. Accepts `text`,
//!   optional `question`, `max_summary_bullets` (3–12, default 6), and `model`.
//! - `POST /summarize` – Single-call five-line summary of the supplied text.
//! - `GET /metrics` – Pipeline counters (analyses, chunks, LLM calls, upstream failures).
//! - `GET /commands` – Machine-readable command catalog for quick discovery by tools.
//!
//! Pipeline errors map onto status codes: input problems are `400`, a chunking invariant
//! violation is `500`, LLM failures are `502`, and an exceeded time limit is `504`.

use crate::metrics::MetricsSnapshot;
use crate::pipeline::{
    AnalyzeError, AnalyzeOutcome, AnalyzeRequest, AnalyzerApi, DEFAULT_SUMMARY_BULLETS,
};
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::Instrument;

/// Build the HTTP router exposing the analysis API surface.
pub fn create_router<S>(service: Arc<S>) -> Router
where
    S: AnalyzerApi + 'static,
{
    Router::new()
        .route("/analyze", post(analyze_article::<S>))
        .route("/summarize", post(summarize_article::<S>))
        .route("/metrics", get(get_metrics::<S>))
        .route("/commands", get(get_commands))
        .with_state(service)
}

/// Request body for the `POST /analyze` endpoint.
#[derive(Deserialize)]
struct AnalyzeBody {
    /// Raw article text.
    text: String,
    /// Optional question answered from the final summary.
    #[serde(default)]
    question: Option<String>,
    /// Bullet count for the merged summary (defaults to 6).
    #[serde(default = "default_bullets")]
    max_summary_bullets: usize,
    /// Optional model override (defaults to `DEFAULT_MODEL`).
    #[serde(default)]
    model: Option<String>,
}

fn default_bullets() -> usize {
    DEFAULT_SUMMARY_BULLETS
}

/// Run the full analysis pipeline over one article.
async fn analyze_article<S>(
    State(service): State<Arc<S>>,
    Json(body): Json<AnalyzeBody>,
) -> Result<Json<AnalyzeOutcome>, AppError>
where
    S: AnalyzerApi,
{
    let request_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!("analyze", %request_id);
    let AnalyzeBody {
        text,
        question,
        max_summary_bullets,
        model,
    } = body;
    let request = AnalyzeRequest {
        text,
        question,
        max_summary_bullets,
        model,
    };

    let outcome = service.analyze(request).instrument(span.clone()).await?;
    span.in_scope(|| {
        tracing::info!(
            chunks = outcome.chunk_count,
            summary_len = outcome.summary.len(),
            answered = outcome.answer.is_some(),
            "Analyze request completed"
        );
    });
    Ok(Json(outcome))
}

/// Request body for `POST /summarize`.
#[derive(Deserialize)]
struct SummarizeBody {
    text: String,
}

/// Response body for `POST /summarize`.
#[derive(Serialize)]
struct SummarizeResponse {
    summary: String,
}

/// Produce a single-call summary.
async fn summarize_article<S>(
    State(service): State<Arc<S>>,
    Json(body): Json<SummarizeBody>,
) -> Result<Json<SummarizeResponse>, AppError>
where
    S: AnalyzerApi,
{
    let summary = service.summarize_news(&body.text).await?;
    Ok(Json(SummarizeResponse { summary }))
}

/// Return the current pipeline counters.
async fn get_metrics<S>(State(service): State<Arc<S>>) -> Json<MetricsSnapshot>
where
    S: AnalyzerApi,
{
    Json(service.metrics_snapshot())
}

/// Descriptor for a single command in the discovery catalog.
#[derive(Serialize)]
struct CommandDescriptor {
    name: &'static str,
    method: &'static str,
    path: &'static str,
    description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    request_example: Option<serde_json::Value>,
}

/// Response body for `GET /commands`.
#[derive(Serialize)]
struct CommandsResponse {
    commands: Vec<CommandDescriptor>,
}

/// Enumerate supported HTTP commands for discovery.
async fn get_commands() -> Json<CommandsResponse> {
    Json(CommandsResponse {
        commands: vec![
            CommandDescriptor {
                name: "analyze",
                method: "POST",
                path: "/analyze",
                description: "Clean and chunk article text, summarize each chunk, merge into a paragraph + bullets + keywords, optionally answer a question, and extract sentiment. Response returns { \"cleaned_text\", \"chunk_count\", \"summary\", \"answer\", \"analysis\" }.",
                request_example: Some(json!({
                    "text": "기사 본문",
                    "question": "누가 발표했나?",
                    "max_summary_bullets": 6,
                    "model": "gpt-4.1"
                })),
            },
            CommandDescriptor {
                name: "summarize",
                method: "POST",
                path: "/summarize",
                description: "Summarize article text in five lines with a single model call.",
                request_example: Some(json!({ "text": "기사 본문" })),
            },
            CommandDescriptor {
                name: "metrics",
                method: "GET",
                path: "/metrics",
                description: "Return pipeline counters useful for observability dashboards.",
                request_example: None,
            },
        ],
    })
}

struct AppError(AnalyzeError);

impl AppError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            AnalyzeError::EmptyText
            | AnalyzeError::NoUsableText
            | AnalyzeError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AnalyzeError::ChunkingFailed => StatusCode::INTERNAL_SERVER_ERROR,
            AnalyzeError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            AnalyzeError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(%status, error = %self.0, "Request failed");
        } else {
            tracing::info!(%status, error = %self.0, "Request rejected");
        }
        (status, Json(json!({ "detail": self.0.to_string() }))).into_response()
    }
}

impl From<AnalyzeError> for AppError {
    fn from(inner: AnalyzeError) -> Self {
        Self(inner)
    }
}

#[cfg(test)]
mod tests {
    use super::{create_router, get_commands};
    use crate::metrics::MetricsSnapshot;
    use crate::pipeline::{
        AnalyzeError, AnalyzeOutcome, AnalyzeRequest, AnalyzerApi, OpinionAnalysis, Sentiment,
    };
    use async_trait::async_trait;
    use axum::{
        body::{Body, to_bytes},
        http::{Method, Request, StatusCode},
    };
    use serde_json::json;
    use std::sync::{Arc, Mutex};
    use tower::ServiceExt;

    #[tokio::test]
    async fn commands_catalog_exposes_analyze_endpoint() {
        let response = get_commands().await;
        let commands = response.0.commands;
        let analyze = commands
            .iter()
            .find(|cmd| cmd.name == "analyze")
            .expect("analyze command present");

        assert_eq!(analyze.method, "POST");
        assert_eq!(analyze.path, "/analyze");
        assert!(analyze.description.to_lowercase().contains("chunk"));
        assert!(commands.len() >= 3);
    }

    #[tokio::test]
    async fn analyze_route_applies_defaults() {
        let service = Arc::new(StubAnalyzer::succeeding());
        let app = create_router(service.clone());

        let response = app
            .oneshot(post_json("/analyze", json!({ "text": "기사 본문" })))
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["chunk_count"], 1);
        assert_eq!(json["summary"], "stub summary");
        assert_eq!(json["answer"], serde_json::Value::Null);
        assert_eq!(json["analysis"]["sentiment"], "neutral");

        let calls = service.recorded_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].text, "기사 본문");
        assert_eq!(calls[0].max_summary_bullets, 6);
        assert!(calls[0].question.is_none());
        assert!(calls[0].model.is_none());
    }

    #[tokio::test]
    async fn analyze_route_forwards_optional_fields() {
        let service = Arc::new(StubAnalyzer::succeeding());
        let app = create_router(service.clone());

        let response = app
            .oneshot(post_json(
                "/analyze",
                json!({
                    "text": "본문",
                    "question": "언제?",
                    "max_summary_bullets": 9,
                    "model": "gpt-4o-mini"
                }),
            ))
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::OK);
        let calls = service.recorded_calls();
        assert_eq!(calls[0].question.as_deref(), Some("언제?"));
        assert_eq!(calls[0].max_summary_bullets, 9);
        assert_eq!(calls[0].model.as_deref(), Some("gpt-4o-mini"));
    }

    #[tokio::test]
    async fn pipeline_errors_map_to_status_codes() {
        let cases = [
            (AnalyzeError::EmptyText, StatusCode::BAD_REQUEST),
            (AnalyzeError::NoUsableText, StatusCode::BAD_REQUEST),
            (
                AnalyzeError::InvalidInput("bullets".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                AnalyzeError::ChunkingFailed,
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AnalyzeError::Upstream {
                    kind: "TransportError",
                    message: "connection refused".into(),
                },
                StatusCode::BAD_GATEWAY,
            ),
            (
                AnalyzeError::Timeout { seconds: 300 },
                StatusCode::GATEWAY_TIMEOUT,
            ),
        ];

        for (error, expected) in cases {
            let message = error.to_string();
            let service = Arc::new(StubAnalyzer::failing(error));
            let response = create_router(service)
                .oneshot(post_json("/analyze", json!({ "text": "본문" })))
                .await
                .expect("router response");

            assert_eq!(response.status(), expected);
            let json = body_json(response).await;
            assert_eq!(json["detail"], message);
        }
    }

    #[tokio::test]
    async fn summarize_route_returns_summary() {
        let service = Arc::new(StubAnalyzer::succeeding());
        let response = create_router(service)
            .oneshot(post_json("/summarize", json!({ "text": "본문" })))
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["summary"], "quick: 본문");
    }

    #[tokio::test]
    async fn metrics_route_reports_snapshot() {
        let service = Arc::new(StubAnalyzer::succeeding());
        let response = create_router(service)
            .oneshot(
                Request::builder()
                    .method(Method::GET)
                    .uri("/metrics")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["analyses_completed"], 4);
        assert_eq!(json["llm_calls"], 12);
    }

    fn post_json(uri: &str, payload: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(payload.to_string()))
            .expect("request")
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        serde_json::from_slice(&body).expect("json body")
    }

    struct StubAnalyzer {
        calls: Mutex<Vec<AnalyzeRequest>>,
        failure: Mutex<Option<AnalyzeError>>,
    }

    impl StubAnalyzer {
        fn succeeding() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                failure: Mutex::new(None),
            }
        }

        fn failing(error: AnalyzeError) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                failure: Mutex::new(Some(error)),
            }
        }

        fn recorded_calls(&self) -> Vec<AnalyzeRequest> {
            self.calls.lock().expect("calls lock").clone()
        }
    }

    #[async_trait]
    impl AnalyzerApi for StubAnalyzer {
        async fn analyze(&self, request: AnalyzeRequest) -> Result<AnalyzeOutcome, AnalyzeError> {
            self.calls.lock().expect("calls lock").push(request.clone());
            if let Some(error) = self.failure.lock().expect("failure lock").take() {
                return Err(error);
            }
            Ok(AnalyzeOutcome {
                cleaned_text: request.text,
                chunk_count: 1,
                summary: "stub summary".into(),
                answer: None,
                analysis: OpinionAnalysis {
                    sentiment: Sentiment::Neutral,
                    key_points: vec!["point".into()],
                },
            })
        }

        async fn summarize_news(&self, text: &str) -> Result<String, AnalyzeError> {
            Ok(format!("quick: {text}"))
        }

        fn metrics_snapshot(&self) -> MetricsSnapshot {
            MetricsSnapshot {
                analyses_completed: 4,
                chunks_summarized: 9,
                llm_calls: 12,
                upstream_failures: 1,
            }
        }
    }
}
