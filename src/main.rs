// src/main.rs
mod engine;
mod extractors;
mod gemini;
mod sources;
mod storage;
mod utils;

use clap::Parser;

use engine::ResearchEngine;
use extractors::{validate_record, Field};
use gemini::GeminiClient;
use sources::{MarketClient, NewsClient};
use storage::StorageManager;
use utils::AppError;

/// Command Line Interface for the AI research extractor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Research topic to analyze
    #[arg(short, long)]
    topic: String,

    /// Output directory for saved results
    #[arg(short, long, default_value = "./output")]
    output_dir: String,

    /// Maximum tokens requested from the generation endpoint
    #[arg(long, default_value = "4096")]
    max_tokens: u32,

    /// Skip the news source even when NEWS_API_KEY is set
    #[arg(long)]
    skip_news: bool,

    /// Skip the market source even when FINNHUB_API_KEY is set
    #[arg(long)]
    skip_market: bool,

    /// Do not write results to disk
    #[arg(long)]
    no_save: bool,

    /// Only verify that the generation endpoint and key work, then exit
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting processing for args: {:?}", args);

    // 3. API keys come from the environment; only the Gemini key is required
    let gemini_key = std::env::var("GEMINI_API_KEY")
        .map_err(|_| AppError::Config("GEMINI_API_KEY is not set".to_string()))?;
    let gemini = GeminiClient::new(gemini_key)?;

    if args.check {
        let reply = gemini.test_connection().await?;
        tracing::info!("Connection check succeeded: {}", reply.trim());
        return Ok(());
    }

    // 4. Assemble the engine with whatever auxiliary sources are configured
    let mut research_engine = ResearchEngine::new(gemini).with_max_tokens(args.max_tokens);

    if !args.skip_news {
        match std::env::var("NEWS_API_KEY") {
            Ok(key) => research_engine = research_engine.with_news(NewsClient::new(key)?),
            Err(_) => tracing::info!("NEWS_API_KEY not set, news source disabled"),
        }
    }
    if !args.skip_market {
        match std::env::var("FINNHUB_API_KEY") {
            Ok(key) => research_engine = research_engine.with_market(MarketClient::new(key)?),
            Err(_) => tracing::info!("FINNHUB_API_KEY not set, market source disabled"),
        }
    }

    // 5. Run the pipeline
    let result = research_engine.research_topic(&args.topic).await?;

    // 6. Report per-field adequacy
    let report = validate_record(&result.analysis);
    for field in Field::ALL {
        if report.is_adequate(field) {
            tracing::info!("Field {}: adequate", field);
        } else {
            tracing::warn!("Field {}: missing or below threshold", field);
        }
    }
    if report.all_adequate() {
        tracing::info!("All fields extracted adequately");
    }
    tracing::info!(
        "Adequate fields: {}/{}, confidence score: {:.0}",
        report.adequate_count(),
        Field::ALL.len(),
        result.confidence_score
    );

    // 7. Persist
    if args.no_save {
        tracing::info!("--no-save given, skipping persistence");
    } else {
        let storage = StorageManager::new(&args.output_dir)?;
        let json_path = storage.save_result(&result)?;
        let report_path = storage.save_report(&result, &report)?;
        tracing::info!("Saved result to: {}", json_path.display());
        tracing::info!("Saved report to: {}", report_path.display());
    }

    if report.adequate_count() == 0 {
        return Err(AppError::Processing(
            "No fields could be extracted from the AI response".to_string(),
        ));
    }

    Ok(())
}
