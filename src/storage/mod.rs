// src/storage/mod.rs
use std::fs;
use std::path::{Path, PathBuf};

use crate::engine::ResearchResult;
use crate::extractors::response::ValidationReport;
use crate::extractors::Field;
use crate::utils::error::StorageError;

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    /// Saves the full research result as pretty-printed JSON under
    /// `<base>/<topic-slug>/<topic-slug>_<timestamp>.json`.
    pub fn save_result(&self, result: &ResearchResult) -> Result<PathBuf, StorageError> {
        let target_dir = self.topic_dir(&result.topic)?;
        let file_path = target_dir.join(format!(
            "{}_{}.json",
            slugify(&result.topic),
            result.timestamp.format("%Y%m%d%H%M%S")
        ));

        let json = serde_json::to_string_pretty(result)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;
        fs::write(&file_path, json).map_err(StorageError::IoError)?;

        tracing::info!("Saved result to {}", file_path.display());
        Ok(file_path)
    }

    /// Saves a human-readable Markdown report next to the JSON result.
    pub fn save_report(
        &self,
        result: &ResearchResult,
        report: &ValidationReport,
    ) -> Result<PathBuf, StorageError> {
        let target_dir = self.topic_dir(&result.topic)?;
        let file_path = target_dir.join(format!(
            "{}_{}.md",
            slugify(&result.topic),
            result.timestamp.format("%Y%m%d%H%M%S")
        ));

        fs::write(&file_path, render_report(result, report)).map_err(StorageError::IoError)?;

        tracing::info!("Saved report to {}", file_path.display());
        Ok(file_path)
    }

    fn topic_dir(&self, topic: &str) -> Result<PathBuf, StorageError> {
        let target_dir = self.base_dir.join(slugify(topic));
        if !target_dir.exists() {
            fs::create_dir_all(&target_dir).map_err(StorageError::IoError)?;
        }
        Ok(target_dir)
    }
}

/// Lowercase alphanumeric slug with hyphens, safe as a directory name.
fn slugify(topic: &str) -> String {
    let mut slug = String::with_capacity(topic.len());
    let mut last_hyphen = true; // suppress a leading hyphen
    for c in topic.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_hyphen = false;
        } else if !last_hyphen {
            slug.push('-');
            last_hyphen = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    if slug.is_empty() {
        slug.push_str("topic");
    }
    slug
}

fn render_report(result: &ResearchResult, report: &ValidationReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("# Research Report: {}\n\n", result.topic));
    out.push_str(&format!(
        "Generated: {}  \nConfidence: {:.0}/100\n\n",
        result.timestamp.to_rfc3339(),
        result.confidence_score
    ));

    let text_sections = [
        ("Executive Summary", &result.analysis.summary),
        ("Market Analysis", &result.analysis.market_analysis),
        ("Technical Details", &result.analysis.technical_details),
        ("Business Opportunities", &result.analysis.business_opportunities),
    ];
    for (title, body) in text_sections {
        out.push_str(&format!("## {}\n\n", title));
        if body.is_empty() {
            out.push_str("_Not extracted._\n\n");
        } else {
            out.push_str(body);
            out.push_str("\n\n");
        }
    }

    let list_sections = [
        ("Key Players", &result.analysis.key_players),
        ("Trends", &result.analysis.trends),
    ];
    for (title, items) in list_sections {
        out.push_str(&format!("## {}\n\n", title));
        if items.is_empty() {
            out.push_str("_Not extracted._\n\n");
        } else {
            for item in items {
                out.push_str(&format!("- {}\n", item));
            }
            out.push('\n');
        }
    }

    if !result.latest_news.is_empty() {
        out.push_str("## Latest News\n\n");
        for (i, article) in result.latest_news.iter().enumerate() {
            out.push_str(&format!(
                "{}. {} ({}) {}\n",
                i + 1,
                article.title,
                article.source,
                article.url
            ));
        }
        out.push('\n');
    }

    if let Some(market) = &result.market {
        out.push_str("## Market Activity\n\n");
        out.push_str(&market.trend_summary);
        out.push_str("\n\n");
    }

    out.push_str("## Extraction Quality\n\n");
    for field in Field::ALL {
        out.push_str(&format!(
            "- {}: {}\n",
            field,
            if report.is_adequate(field) { "ok" } else { "inadequate" }
        ));
    }

    out.push_str(&format!("\nSources: {}\n", result.sources.join(", ")));
    out
}
