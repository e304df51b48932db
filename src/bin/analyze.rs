//! Command-line entrypoint: analyze a local article file and print the result as JSON.
//!
//! Shares configuration (`OPENAI_API_KEY`, `OPENAI_BASE_URL`, `DEFAULT_MODEL`, chunking and
//! timeout settings) with the HTTP binary.
use std::{fs, path::PathBuf, sync::Arc};

use anyhow::{Context, Result, bail};
use clap::Parser;
use newsbrief::{
    config,
    llm::OpenAiCompletionClient,
    logging,
    pipeline::{AnalyzeRequest, DEFAULT_SUMMARY_BULLETS, NewsAnalyzer},
};

#[derive(Parser, Debug)]
#[command(
    name = "newsbrief-analyze",
    about = "Summarize a news article file and extract sentiment"
)]
struct Cli {
    /// Path to a UTF-8 text file holding the article body.
    #[arg(long, short)]
    input: PathBuf,
    /// Optional question answered from the summary.
    #[arg(long, short)]
    question: Option<String>,
    /// Number of bullets in the merged summary (3-12).
    #[arg(long, default_value_t = DEFAULT_SUMMARY_BULLETS)]
    bullets: usize,
    /// Model override (defaults to `DEFAULT_MODEL`).
    #[arg(long, short)]
    model: Option<String>,
    /// Only produce the single-call five-line summary.
    #[arg(long)]
    quick: bool,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing();
    let config = config::load_config().context("failed to load configuration")?;

    let text = fs::read_to_string(&cli.input)
        .with_context(|| format!("failed to read article at {}", cli.input.display()))?;

    let client = OpenAiCompletionClient::from_config(&config)
        .context("failed to build completion client")?;
    let analyzer = NewsAnalyzer::from_config(Arc::new(client), &config);

    if cli.quick {
        if cli.question.is_some() {
            bail!("--question cannot be combined with --quick");
        }
        let summary = analyzer.summarize_news(&text).await?;
        let body = serde_json::json!({ "summary": summary });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    let outcome = analyzer
        .analyze(AnalyzeRequest {
            text,
            question: cli.question,
            max_summary_bullets: cli.bullets,
            model: cli.model,
        })
        .await
        .with_context(|| format!("analysis of {} failed", cli.input.display()))?;

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}
