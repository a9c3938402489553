// src/gemini/prompt.rs

/// System prompt that pins the six-section structure the extractors rely on.
pub const SYSTEM_PROMPT: &str = "\
You are an elite AI Research Analyst. Provide structured research analysis in the following format:

1. EXECUTIVE SUMMARY
[Provide 200-300 word comprehensive overview]

2. MARKET ANALYSIS
[Provide detailed market intelligence including size, growth, competitors]

3. TECHNICAL DETAILS
[Explain technical aspects, architecture, implementation]

4. BUSINESS OPPORTUNITIES
[List specific business opportunities and project suggestions]

5. KEY PLAYERS
[List major companies/organizations]

6. TRENDS
[List 3-5 key trends]

IMPORTANT: Always use the exact section headers above. Structure your response clearly with these sections.";

/// Builds the per-topic research prompt submitted alongside SYSTEM_PROMPT.
pub fn build_research_prompt(topic: &str) -> String {
    format!(
        "Provide a comprehensive research analysis for the topic: \"{topic}\"\n\n\
         Please structure your response with exactly these sections:\n\n\
         1. EXECUTIVE SUMMARY\n\
         [Provide a 200-300 word comprehensive overview of the topic, its current state, significance, and key aspects]\n\n\
         2. MARKET ANALYSIS\n\
         [Provide detailed market intelligence including market size, growth rates, major competitors, market trends, and future outlook]\n\n\
         3. TECHNICAL DETAILS\n\
         [Explain technical aspects, architecture, implementation details, key technologies, and technical challenges or innovations]\n\n\
         4. BUSINESS OPPORTUNITIES\n\
         [List specific business opportunities, potential applications, investment prospects, and strategic recommendations]\n\n\
         5. KEY PLAYERS\n\
         [List 5-10 major companies, organizations, or individuals who are key players in this field]\n\n\
         6. TRENDS\n\
         [List 5-7 key current and emerging trends related to this topic]\n\n\
         Please use exactly these section headers and provide detailed, accurate information for each section."
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::Field;

    #[test]
    fn prompt_names_every_section_header() {
        let prompt = build_research_prompt("rust adoption");
        for header in [
            "1. EXECUTIVE SUMMARY",
            "2. MARKET ANALYSIS",
            "3. TECHNICAL DETAILS",
            "4. BUSINESS OPPORTUNITIES",
            "5. KEY PLAYERS",
            "6. TRENDS",
        ] {
            assert!(prompt.contains(header), "missing {header}");
            assert!(SYSTEM_PROMPT.contains(header), "system prompt missing {header}");
        }
        assert!(prompt.contains("rust adoption"));
        // One header per field the parser knows about.
        assert_eq!(Field::ALL.len(), 6);
    }
}
