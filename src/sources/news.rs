// src/sources/news.rs
use crate::utils::error::SourceError;
use chrono::{Duration as ChronoDuration, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const NEWS_API_URL: &str = "https://newsapi.org/v2";
const NEWS_WINDOW_DAYS: i64 = 7;
const NEWS_PAGE_CAP: usize = 100; // API hard limit
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// One article as carried into the research result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsArticle {
    pub title: String,
    pub description: String,
    pub url: String,
    pub source: String,
    pub published_at: String,
}

// NewsAPI response shapes (only the fields we read).
#[derive(Debug, Deserialize)]
struct EverythingResponse {
    #[serde(default)]
    articles: Vec<RawArticle>,
}

#[derive(Debug, Deserialize)]
struct RawArticle {
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    source: Option<RawSource>,
    #[serde(rename = "publishedAt")]
    published_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawSource {
    name: Option<String>,
}

/// Client for the NewsAPI `/everything` endpoint.
pub struct NewsClient {
    client: reqwest::Client,
    api_key: String,
}

impl NewsClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
        })
    }

    /// Fetches up to `limit` English articles about `topic` from the last
    /// NEWS_WINDOW_DAYS days, sorted by relevancy.
    pub async fn get_news(&self, topic: &str, limit: usize) -> Result<Vec<NewsArticle>, SourceError> {
        let to = Utc::now();
        let from = to - ChronoDuration::days(NEWS_WINDOW_DAYS);
        let from_date = from.format("%Y-%m-%d").to_string();
        let to_date = to.format("%Y-%m-%d").to_string();
        let page_size = limit.min(NEWS_PAGE_CAP).to_string();

        let url = format!("{}/everything", NEWS_API_URL);
        let response = self
            .client
            .get(&url)
            .header("X-Api-Key", &self.api_key)
            .query(&[
                ("q", topic),
                ("from", from_date.as_str()),
                ("to", to_date.as_str()),
                ("sortBy", "relevancy"),
                ("pageSize", page_size.as_str()),
                ("language", "en"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("News API error {}: {}", status, body);
            return Err(SourceError::Http(status));
        }

        let parsed: EverythingResponse = response.json().await?;
        let articles: Vec<NewsArticle> = parsed
            .articles
            .into_iter()
            .take(limit)
            .map(|a| NewsArticle {
                title: a.title.unwrap_or_else(|| "No title".to_string()),
                description: a.description.unwrap_or_default(),
                url: a.url.unwrap_or_default(),
                source: a
                    .source
                    .and_then(|s| s.name)
                    .unwrap_or_else(|| "Unknown".to_string()),
                published_at: a.published_at.unwrap_or_default(),
            })
            .collect();

        tracing::info!("Fetched {} news articles for topic: {}", articles.len(), topic);
        Ok(articles)
    }
}
