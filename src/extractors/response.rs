// src/extractors/response.rs

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::extractors::list::extract_list_items;
use crate::extractors::patterns::{Field, PatternSet};
use crate::extractors::section::SectionExtractor;

/// Required string fields must exceed this length to validate as adequate.
pub const MIN_VALID_SECTION_CHARS: usize = 50;

// Collapses runs of blank lines to a single blank line before extraction.
static BLANK_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s*\n").expect("Failed to compile BLANK_RUN_RE"));

/// Structured view of one AI research response. Every field is always
/// present; extraction failure leaves a field empty rather than absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedRecord {
    pub summary: String,
    pub market_analysis: String,
    pub technical_details: String,
    pub business_opportunities: String,
    pub key_players: Vec<String>,
    pub trends: Vec<String>,
}

impl ParsedRecord {
    pub fn field_is_empty(&self, field: Field) -> bool {
        match field {
            Field::Summary => self.summary.is_empty(),
            Field::MarketAnalysis => self.market_analysis.is_empty(),
            Field::TechnicalDetails => self.technical_details.is_empty(),
            Field::BusinessOpportunities => self.business_opportunities.is_empty(),
            Field::KeyPlayers => self.key_players.is_empty(),
            Field::Trends => self.trends.is_empty(),
        }
    }

    /// Fields that failed to populate, in extraction order.
    pub fn missing_fields(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|f| self.field_is_empty(*f))
            .collect()
    }
}

/// Per-field adequacy report; advisory only, never alters the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub summary: bool,
    pub market_analysis: bool,
    pub technical_details: bool,
    pub business_opportunities: bool,
    pub key_players: bool,
    pub trends: bool,
}

impl ValidationReport {
    pub fn is_adequate(&self, field: Field) -> bool {
        match field {
            Field::Summary => self.summary,
            Field::MarketAnalysis => self.market_analysis,
            Field::TechnicalDetails => self.technical_details,
            Field::BusinessOpportunities => self.business_opportunities,
            Field::KeyPlayers => self.key_players,
            Field::Trends => self.trends,
        }
    }

    pub fn adequate_count(&self) -> usize {
        Field::ALL.iter().filter(|f| self.is_adequate(**f)).count()
    }

    pub fn all_adequate(&self) -> bool {
        self.adequate_count() == Field::ALL.len()
    }
}

/// Validates a parsed record: the four string fields must be non-empty and
/// longer than MIN_VALID_SECTION_CHARS, the two list fields non-empty.
pub fn validate_record(record: &ParsedRecord) -> ValidationReport {
    let text_ok = |s: &str| s.chars().count() > MIN_VALID_SECTION_CHARS;
    ValidationReport {
        summary: text_ok(&record.summary),
        market_analysis: text_ok(&record.market_analysis),
        technical_details: text_ok(&record.technical_details),
        business_opportunities: text_ok(&record.business_opportunities),
        key_players: !record.key_players.is_empty(),
        trends: !record.trends.is_empty(),
    }
}

/// Turns one raw AI response into a ParsedRecord. Total over all inputs:
/// the worst case is a record with every field empty.
pub struct ResponseParser {
    extractor: SectionExtractor,
}

impl ResponseParser {
    pub fn new() -> Self {
        Self::with_patterns(PatternSet::new())
    }

    pub fn with_patterns(patterns: PatternSet) -> Self {
        Self {
            extractor: SectionExtractor::with_patterns(patterns),
        }
    }

    pub fn parse_research_response(&self, response: &str) -> ParsedRecord {
        if response.trim().is_empty() {
            tracing::warn!("Empty response received, returning empty record");
            return ParsedRecord::default();
        }

        tracing::info!("Parsing response of length {}", response.len());
        let cleaned = clean_response(response);

        let mut record = ParsedRecord::default();
        for field in Field::ALL {
            let content = self.extractor.extract(&cleaned, field);

            if content.is_empty() {
                tracing::warn!("Failed to extract {}", field);
            } else {
                tracing::info!("Extracted {}: {} characters", field, content.len());
            }

            match field {
                Field::Summary => record.summary = content,
                Field::MarketAnalysis => record.market_analysis = content,
                Field::TechnicalDetails => record.technical_details = content,
                Field::BusinessOpportunities => record.business_opportunities = content,
                Field::KeyPlayers => record.key_players = extract_list_items(&content),
                Field::Trends => record.trends = extract_list_items(&content),
            }
        }

        record
    }
}

impl Default for ResponseParser {
    fn default() -> Self {
        Self::new()
    }
}

fn clean_response(response: &str) -> String {
    BLANK_RUN_RE.replace_all(response, "\n\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn six_section_response() -> String {
        "1. EXECUTIVE SUMMARY\n\
         Quantum batteries are storage devices that exploit quantum effects to charge faster than classical cells allow.\n\n\
         2. MARKET ANALYSIS\n\
         The storage market is projected to reach eighty billion dollars by 2032, with double-digit annual growth.\n\n\
         3. TECHNICAL DETAILS\n\
         Prototypes rely on superabsorption in organic microcavities; coherence time remains the binding constraint.\n\n\
         4. BUSINESS OPPORTUNITIES\n\
         Licensing cavity designs to cell manufacturers and selling characterization tooling are the nearest-term plays.\n\n\
         5. KEY PLAYERS\n\
         - CSIRO\n\
         - IIT Genova\n\
         - Quantum Battery Labs\n\n\
         6. TRENDS\n\
         - Superabsorption demonstrations moving from simulation to hardware\n\
         - Growing venture interest in quantum energy startups\n"
            .to_string()
    }

    #[test]
    fn empty_and_whitespace_inputs_yield_empty_record() {
        let parser = ResponseParser::new();
        for input in ["", "   ", "\n\n\t"] {
            let record = parser.parse_research_response(input);
            assert_eq!(record, ParsedRecord::default(), "input: {input:?}");
        }
    }

    #[test]
    fn parsing_is_idempotent() {
        let parser = ResponseParser::new();
        let response = six_section_response();
        assert_eq!(
            parser.parse_research_response(&response),
            parser.parse_research_response(&response)
        );
    }

    #[test]
    fn all_six_fields_populate_from_well_formed_response() {
        let parser = ResponseParser::new();
        let record = parser.parse_research_response(&six_section_response());

        assert!(record.summary.starts_with("Quantum batteries"));
        assert!(record.market_analysis.contains("eighty billion"));
        assert!(record.technical_details.contains("superabsorption"));
        assert!(record.business_opportunities.contains("Licensing"));
        assert_eq!(
            record.key_players,
            vec!["CSIRO", "IIT Genova", "Quantum Battery Labs"]
        );
        assert_eq!(record.trends.len(), 2);
        assert!(record.missing_fields().is_empty());

        let report = validate_record(&record);
        assert!(report.all_adequate(), "report: {report:?}");
    }

    #[test]
    fn header_markup_variants_produce_identical_summaries() {
        let parser = ResponseParser::new();
        let variants = [
            "1. EXECUTIVE SUMMARY\nFoo bar baz qux quux.",
            "## EXECUTIVE SUMMARY\nFoo bar baz qux quux.",
            "EXECUTIVE SUMMARY:\nFoo bar baz qux quux.",
        ];
        for text in variants {
            let record = parser.parse_research_response(text);
            assert_eq!(record.summary, "Foo bar baz qux quux.", "input: {text:?}");
        }
    }

    #[test]
    fn missing_fields_reports_extraction_gaps() {
        let parser = ResponseParser::new();
        let record =
            parser.parse_research_response("1. EXECUTIVE SUMMARY\nA summary and nothing else here.");
        let missing = record.missing_fields();
        assert!(!missing.contains(&Field::Summary));
        assert!(missing.contains(&Field::TechnicalDetails));
        assert!(missing.contains(&Field::KeyPlayers));
    }

    #[test]
    fn blank_line_runs_are_collapsed_before_extraction() {
        let parser = ResponseParser::new();
        let text = "1. EXECUTIVE SUMMARY\n\n\n\n   \nA summary separated by noisy blank lines.\n\n\n\n2. MARKET ANALYSIS\nStill extracted correctly afterwards.";
        let record = parser.parse_research_response(text);
        assert_eq!(record.summary, "A summary separated by noisy blank lines.");
        assert_eq!(record.market_analysis, "Still extracted correctly afterwards.");
    }

    #[test]
    fn validation_threshold_is_strictly_greater_than_fifty() {
        let exactly_50 = "x".repeat(50);
        let exactly_51 = "x".repeat(51);

        let mut record = ParsedRecord {
            summary: exactly_51,
            ..ParsedRecord::default()
        };
        assert!(validate_record(&record).summary);

        record.summary = exactly_50;
        assert!(!validate_record(&record).summary);
    }

    #[test]
    fn validation_of_list_fields_requires_non_empty() {
        let record = ParsedRecord {
            key_players: vec!["Acme".to_string()],
            ..ParsedRecord::default()
        };
        let report = validate_record(&record);
        assert!(report.key_players);
        assert!(!report.trends);
        assert_eq!(report.adequate_count(), 1);
        assert!(!report.all_adequate());
    }

    #[test]
    fn validator_does_not_mutate_the_record() {
        let record = ParsedRecord {
            summary: "short".to_string(),
            ..ParsedRecord::default()
        };
        let before = record.clone();
        let _ = validate_record(&record);
        assert_eq!(record, before);
    }
}
