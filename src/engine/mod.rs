// src/engine/mod.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::extractors::response::{validate_record, ParsedRecord, ResponseParser, ValidationReport};
use crate::gemini::{build_research_prompt, GeminiClient, GEMINI_MAX_TOKENS};
use crate::sources::{MarketClient, MarketSnapshot, NewsArticle, NewsClient};
use crate::utils::error::AppError;

const NEWS_LIMIT: usize = 10;

/// One complete research run: the parsed AI analysis plus whatever the
/// auxiliary sources contributed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchResult {
    pub topic: String,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub analysis: ParsedRecord,
    pub latest_news: Vec<NewsArticle>,
    pub market: Option<MarketSnapshot>,
    pub confidence_score: f64,
    pub sources: Vec<String>,
}

/// Coordinates the Gemini call, the parsing core, and the auxiliary sources.
/// Auxiliary fetches run concurrently and are failure-isolated: a dead
/// source logs a warning and contributes nothing, it never aborts the run.
pub struct ResearchEngine {
    gemini: GeminiClient,
    news: Option<NewsClient>,
    market: Option<MarketClient>,
    parser: ResponseParser,
    max_tokens: u32,
}

impl ResearchEngine {
    pub fn new(gemini: GeminiClient) -> Self {
        Self {
            gemini,
            news: None,
            market: None,
            parser: ResponseParser::new(),
            max_tokens: GEMINI_MAX_TOKENS,
        }
    }

    pub fn with_news(mut self, news: NewsClient) -> Self {
        self.news = Some(news);
        self
    }

    pub fn with_market(mut self, market: MarketClient) -> Self {
        self.market = Some(market);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Runs the full pipeline for one topic. The only hard failure point is
    /// the generation call itself; everything after degrades gracefully.
    pub async fn research_topic(&self, topic: &str) -> Result<ResearchResult, AppError> {
        tracing::info!("Starting research on topic: {}", topic);

        let prompt = build_research_prompt(topic);
        let raw = self.gemini.generate(&prompt, self.max_tokens).await?;

        let analysis = self.parser.parse_research_response(&raw);
        for field in analysis.missing_fields() {
            tracing::warn!("No content recovered for field: {}", field);
        }

        let (latest_news, market) = tokio::join!(self.fetch_news(topic), self.fetch_market(topic));

        let report = validate_record(&analysis);
        let confidence_score = confidence_score(&report, !latest_news.is_empty());

        let result = ResearchResult {
            topic: topic.to_string(),
            timestamp: Utc::now(),
            analysis,
            latest_news,
            market,
            confidence_score,
            sources: self.sources(),
        };
        tracing::info!(
            "Research completed for topic: {} (confidence {:.0})",
            topic,
            result.confidence_score
        );
        Ok(result)
    }

    async fn fetch_news(&self, topic: &str) -> Vec<NewsArticle> {
        let Some(client) = &self.news else {
            return Vec::new();
        };
        match client.get_news(topic, NEWS_LIMIT).await {
            Ok(articles) => articles,
            Err(e) => {
                tracing::warn!("News fetch failed, continuing without articles: {}", e);
                Vec::new()
            }
        }
    }

    async fn fetch_market(&self, topic: &str) -> Option<MarketSnapshot> {
        let client = self.market.as_ref()?;
        match client.get_market_data(topic).await {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                tracing::warn!("Market fetch failed, continuing without snapshot: {}", e);
                None
            }
        }
    }

    fn sources(&self) -> Vec<String> {
        let mut sources = vec!["Google Gemini 1.5 Pro AI Analysis".to_string()];
        if self.news.is_some() {
            sources.push("News API".to_string());
        }
        if self.market.is_some() {
            sources.push("Market Data API".to_string());
        }
        sources
    }
}

/// 20 points per adequate required section, 10 per populated list field,
/// 5 extra when news articles came back; capped at 100.
pub fn confidence_score(report: &ValidationReport, has_news: bool) -> f64 {
    let mut score: f64 = 0.0;
    for ok in [
        report.summary,
        report.market_analysis,
        report.technical_details,
        report.business_opportunities,
    ] {
        if ok {
            score += 20.0;
        }
    }
    if report.key_players {
        score += 10.0;
    }
    if report.trends {
        score += 10.0;
    }
    if has_news {
        score += 5.0;
    }
    score.min(100.0)
}
