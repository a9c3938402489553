// src/extractors/section.rs

use crate::extractors::patterns::{Field, PatternSet, MIN_SECTION_CHARS};

/// Pulls one field's section out of a cleaned AI response.
///
/// Strategies are tried in priority order: the field's primary matchers
/// first (numbered header, markdown header, bare alias), then a header-only
/// fallback scan over the field's aliases. The first body of at least
/// MIN_SECTION_CHARS wins; a full miss is an empty string, never an error.
pub struct SectionExtractor {
    patterns: PatternSet,
}

impl SectionExtractor {
    pub fn new() -> Self {
        Self::with_patterns(PatternSet::new())
    }

    pub fn with_patterns(patterns: PatternSet) -> Self {
        Self { patterns }
    }

    pub fn extract(&self, text: &str, field: Field) -> String {
        let field_patterns = self.patterns.field(field);

        for (idx, matcher) in field_patterns.matchers.iter().enumerate() {
            if let Some(body) = matcher.capture(text) {
                if adequate(body) {
                    tracing::trace!("{}: matched primary strategy {}", field, idx);
                    return body.to_string();
                }
                tracing::trace!(
                    "{}: strategy {} produced {} chars, below minimum",
                    field,
                    idx,
                    body.chars().count()
                );
            }
        }

        // Fallback: header-alias scan, capture until the next all-caps
        // header-like line or end of text.
        for matcher in &field_patterns.fallbacks {
            if let Some(body) = matcher.capture(text) {
                if adequate(body) {
                    tracing::debug!("{}: recovered via header-alias fallback", field);
                    return body.to_string();
                }
            }
        }

        String::new()
    }
}

impl Default for SectionExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn adequate(body: &str) -> bool {
    body.chars().count() >= MIN_SECTION_CHARS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> SectionExtractor {
        SectionExtractor::new()
    }

    #[test]
    fn numbered_markdown_and_bare_headers_agree() {
        let ex = extractor();
        let expected = "Foo bar baz qux quux.";
        for text in [
            "1. EXECUTIVE SUMMARY\nFoo bar baz qux quux.",
            "## EXECUTIVE SUMMARY\nFoo bar baz qux quux.",
            "EXECUTIVE SUMMARY:\nFoo bar baz qux quux.",
        ] {
            assert_eq!(ex.extract(text, Field::Summary), expected, "input: {text:?}");
        }
    }

    #[test]
    fn capture_ends_at_next_section() {
        let ex = extractor();
        let text = "1. EXECUTIVE SUMMARY\nSummary body with enough length.\n\n\
                    2. MARKET ANALYSIS\nMarket body with enough length.";
        assert_eq!(
            ex.extract(text, Field::Summary),
            "Summary body with enough length."
        );
        assert_eq!(
            ex.extract(text, Field::MarketAnalysis),
            "Market body with enough length."
        );
    }

    #[test]
    fn short_body_is_rejected_everywhere() {
        let ex = extractor();
        // Five chars of body: below the ten-char gate on every strategy,
        // including the alias fallbacks.
        let text = "1. EXECUTIVE SUMMARY\nShort";
        assert_eq!(ex.extract(text, Field::Summary), "");
    }

    #[test]
    fn body_of_exactly_ten_chars_is_accepted() {
        let ex = extractor();
        let text = "1. EXECUTIVE SUMMARY\nabcdefghij";
        assert_eq!(ex.extract(text, Field::Summary), "abcdefghij");
    }

    #[test]
    fn first_header_occurrence_wins() {
        let ex = extractor();
        let text = "EXECUTIVE SUMMARY:\nFirst occurrence content here.\n\n\
                    EXECUTIVE SUMMARY:\nSecond occurrence content here.";
        let got = ex.extract(text, Field::Summary);
        assert!(got.starts_with("First occurrence content here."), "got: {got:?}");
    }

    #[test]
    fn alias_fallback_recovers_unnumbered_header() {
        let ex = extractor();
        // "PLAYERS" is only known as a key_players alias; no primary matcher
        // fires, the fallback scan does, and the next caps line ends it.
        let text = "PLAYERS:\nAcme Corp and Globex dominate.\nSOMETHING ELSE:\nIgnored tail.";
        assert_eq!(
            ex.extract(text, Field::KeyPlayers),
            "Acme Corp and Globex dominate."
        );
    }

    #[test]
    fn absent_section_is_empty_string() {
        let ex = extractor();
        let text = "1. EXECUTIVE SUMMARY\nOnly a summary is present here.";
        assert_eq!(ex.extract(text, Field::TechnicalDetails), "");
        assert_eq!(ex.extract(text, Field::Trends), "");
    }

    #[test]
    fn non_ascii_body_lengths_count_chars_not_bytes() {
        let ex = extractor();
        // Ten scalar values, more bytes than that in UTF-8.
        let text = "1. EXECUTIVE SUMMARY\nzusammenfä";
        assert_eq!(ex.extract(text, Field::Summary), "zusammenfä");
    }
}
