// src/extractors/patterns.rs

use regex::Regex;
use std::collections::HashMap;
use std::fmt;

/// Minimum trimmed length (in chars) for a captured section body to count
/// as a real match; anything shorter falls through to the next strategy.
pub const MIN_SECTION_CHARS: usize = 10;

/// The closed set of fields recovered from one research response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Summary,
    MarketAnalysis,
    TechnicalDetails,
    BusinessOpportunities,
    KeyPlayers,
    Trends,
}

impl Field {
    /// Extraction order; also the section order the prompt asks for.
    pub const ALL: [Field; 6] = [
        Field::Summary,
        Field::MarketAnalysis,
        Field::TechnicalDetails,
        Field::BusinessOpportunities,
        Field::KeyPlayers,
        Field::Trends,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Field::Summary => "summary",
            Field::MarketAnalysis => "market_analysis",
            Field::TechnicalDetails => "technical_details",
            Field::BusinessOpportunities => "business_opportunities",
            Field::KeyPlayers => "key_players",
            Field::Trends => "trends",
        }
    }

    /// key_players and trends carry list values, the rest plain text.
    pub fn is_list(&self) -> bool {
        matches!(self, Field::KeyPlayers | Field::Trends)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One extraction strategy: a regex that locates the section header and an
/// optional boundary regex that ends the capture. The body runs from the end
/// of the first header match to the start of the first boundary match in the
/// remaining text (or end of text when no boundary is given/found).
///
/// The boundary alternation starts with `\A` so that a header immediately
/// followed by the next section yields an empty body instead of swallowing
/// the neighboring section.
#[derive(Debug)]
pub struct SectionMatcher {
    header: Regex,
    boundary: Option<Regex>,
}

impl SectionMatcher {
    fn new(header: &str, boundary: Option<&str>) -> Option<Self> {
        let header = Regex::new(header).ok()?;
        let boundary = match boundary {
            Some(pat) => Some(Regex::new(pat).ok()?),
            None => None,
        };
        Some(Self { header, boundary })
    }

    /// Captures the trimmed body following the first header occurrence.
    /// Returns None when the header is absent entirely.
    pub fn capture<'t>(&self, text: &'t str) -> Option<&'t str> {
        let start = self.header.find(text)?.end();
        let tail = &text[start..];
        let end = self
            .boundary
            .as_ref()
            .and_then(|re| re.find(tail))
            .map(|m| m.start())
            .unwrap_or(tail.len());
        Some(tail[..end].trim())
    }
}

/// Ordered strategies for one field: the primary cascade (numbered header,
/// markdown header, bare alias) plus header-only fallbacks built from the
/// field's aliases, which capture until the next all-caps header-like line.
#[derive(Debug)]
pub struct FieldPatterns {
    pub matchers: Vec<SectionMatcher>,
    pub fallbacks: Vec<SectionMatcher>,
}

/// Immutable Field -> FieldPatterns table, compiled once and owned by the
/// extractor rather than referenced as global state.
#[derive(Debug)]
pub struct PatternSet {
    fields: HashMap<Field, FieldPatterns>,
}

// Boundary for the fallback scan: the next line consisting only of capitals
// (optionally enumerated / markdown-prefixed, optional trailing colon).
const CAPS_HEADER_BOUNDARY: &str =
    r"(?m)(?:\A|\n)(?:\d+\.\s*|#{1,6}\s*)?[A-Z][A-Z ]{2,}[A-Z]:?[ \t]*$";

impl PatternSet {
    pub fn new() -> Self {
        let mut fields = HashMap::new();
        for field in Field::ALL {
            fields.insert(field, Self::build_field(field));
        }
        Self { fields }
    }

    pub fn field(&self, field: Field) -> &FieldPatterns {
        // Every Field variant is inserted in new(), so the lookup is total.
        &self.fields[&field]
    }

    fn build_field(field: Field) -> FieldPatterns {
        let (specs, aliases): (&[(&str, Option<&str>)], &[&str]) = match field {
            Field::Summary => (
                &[
                    (
                        r"(?i)(?:1\.\s*)?EXECUTIVE SUMMARY[:\n]*",
                        Some(r"(?i)(?:\A|\n)(?:2\.|MARKET ANALYSIS)"),
                    ),
                    (
                        r"(?i)(?:##\s*)?EXECUTIVE SUMMARY[:\n]*",
                        Some(r"(?:\A|\n)##"),
                    ),
                    (
                        r"(?i)SUMMARY[:\n]*",
                        Some(r"(?i)(?:\A|\n)(?:MARKET|ANALYSIS)"),
                    ),
                ],
                &["EXECUTIVE SUMMARY", "SUMMARY"],
            ),
            Field::MarketAnalysis => (
                &[
                    (
                        r"(?i)(?:2\.\s*)?MARKET ANALYSIS[:\n]*",
                        Some(r"(?i)(?:\A|\n)(?:3\.|TECHNICAL DETAILS)"),
                    ),
                    (
                        r"(?i)(?:##\s*)?MARKET ANALYSIS[:\n]*",
                        Some(r"(?:\A|\n)##"),
                    ),
                    (
                        r"(?i)MARKET[:\n]*",
                        Some(r"(?i)(?:\A|\n)(?:TECHNICAL|DETAILS)"),
                    ),
                ],
                &["MARKET ANALYSIS", "MARKET"],
            ),
            Field::TechnicalDetails => (
                &[
                    (
                        r"(?i)(?:3\.\s*)?TECHNICAL DETAILS[:\n]*",
                        Some(r"(?i)(?:\A|\n)(?:4\.|BUSINESS OPPORTUNITIES)"),
                    ),
                    (
                        r"(?i)(?:##\s*)?TECHNICAL DETAILS[:\n]*",
                        Some(r"(?:\A|\n)##"),
                    ),
                    (
                        r"(?i)TECHNICAL[:\n]*",
                        Some(r"(?i)(?:\A|\n)(?:BUSINESS|OPPORTUNITIES)"),
                    ),
                ],
                &["TECHNICAL DETAILS", "TECHNICAL"],
            ),
            Field::BusinessOpportunities => (
                &[
                    (
                        r"(?i)(?:4\.\s*)?BUSINESS OPPORTUNITIES[:\n]*",
                        Some(r"(?i)(?:\A|\n)(?:5\.|KEY PLAYERS)"),
                    ),
                    (
                        r"(?i)(?:##\s*)?BUSINESS OPPORTUNITIES[:\n]*",
                        Some(r"(?:\A|\n)##"),
                    ),
                    (
                        r"(?i)BUSINESS[:\n]*",
                        Some(r"(?i)(?:\A|\n)(?:KEY|PLAYERS)"),
                    ),
                ],
                &["BUSINESS OPPORTUNITIES", "BUSINESS"],
            ),
            Field::KeyPlayers => (
                &[
                    (
                        r"(?i)(?:5\.\s*)?KEY PLAYERS[:\n]*",
                        Some(r"(?i)(?:\A|\n)(?:6\.|TRENDS)"),
                    ),
                    (
                        r"(?i)(?:##\s*)?KEY PLAYERS[:\n]*",
                        Some(r"(?:\A|\n)##"),
                    ),
                    (
                        r"(?i)KEY PLAYERS[:\n]*",
                        Some(r"(?i)(?:\A|\n)TRENDS"),
                    ),
                ],
                &["KEY PLAYERS", "PLAYERS"],
            ),
            Field::Trends => (
                &[
                    (
                        r"(?i)(?:6\.\s*)?TRENDS[:\n]*",
                        Some(r"(?:\A|\n)##"),
                    ),
                    (
                        r"(?i)(?:##\s*)?TRENDS[:\n]*",
                        Some(r"(?:\A|\n)##"),
                    ),
                    (r"(?i)TRENDS[:\n]*", None),
                ],
                &["TRENDS"],
            ),
        };

        let matchers = specs
            .iter()
            .filter_map(|&(header, boundary)| SectionMatcher::new(header, boundary))
            .collect();

        let fallbacks = aliases
            .iter()
            .filter_map(|&alias| {
                SectionMatcher::new(
                    &format!(r"(?i){}[:\n]*", regex::escape(alias)),
                    Some(CAPS_HEADER_BOUNDARY),
                )
            })
            .collect();

        FieldPatterns { matchers, fallbacks }
    }
}

impl Default for PatternSet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_set_covers_every_field() {
        let set = PatternSet::new();
        for field in Field::ALL {
            let fp = set.field(field);
            assert!(!fp.matchers.is_empty(), "no matchers for {}", field);
            assert!(!fp.fallbacks.is_empty(), "no fallbacks for {}", field);
        }
    }

    #[test]
    fn capture_stops_at_boundary() {
        let m = SectionMatcher::new(
            r"(?i)(?:1\.\s*)?EXECUTIVE SUMMARY[:\n]*",
            Some(r"(?i)(?:\A|\n)(?:2\.|MARKET ANALYSIS)"),
        )
        .unwrap();
        let text = "1. EXECUTIVE SUMMARY\nThe summary body.\n\n2. MARKET ANALYSIS\nOther.";
        assert_eq!(m.capture(text), Some("The summary body."));
    }

    #[test]
    fn capture_runs_to_end_without_boundary_match() {
        let m = SectionMatcher::new(r"(?i)TRENDS[:\n]*", None).unwrap();
        assert_eq!(m.capture("TRENDS:\n- one\n- two"), Some("- one\n- two"));
    }

    #[test]
    fn adjacent_header_yields_empty_body() {
        let m = SectionMatcher::new(
            r"(?i)(?:1\.\s*)?EXECUTIVE SUMMARY[:\n]*",
            Some(r"(?i)(?:\A|\n)(?:2\.|MARKET ANALYSIS)"),
        )
        .unwrap();
        // Header directly followed by the next section: body must be empty,
        // not the neighboring section's content.
        let text = "1. EXECUTIVE SUMMARY\n2. MARKET ANALYSIS\nMarket body.";
        assert_eq!(m.capture(text), Some(""));
    }

    #[test]
    fn missing_header_is_none() {
        let m = SectionMatcher::new(r"(?i)KEY PLAYERS[:\n]*", None).unwrap();
        assert_eq!(m.capture("nothing relevant here"), None);
    }

    #[test]
    fn field_keys_are_stable() {
        assert_eq!(Field::Summary.key(), "summary");
        assert_eq!(Field::BusinessOpportunities.key(), "business_opportunities");
        assert!(Field::KeyPlayers.is_list());
        assert!(Field::Trends.is_list());
        assert!(!Field::MarketAnalysis.is_list());
    }
}
