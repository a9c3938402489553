// src/gemini/models.rs
#![allow(dead_code)]
use serde::{Deserialize, Serialize};

/// Request/response bodies for the Gemini `generateContent` REST endpoint.
/// https://generativelanguage.googleapis.com/v1beta/models/<model>:generateContent

#[derive(Debug, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    pub generation_config: GenerationConfig,
    #[serde(rename = "safetySettings")]
    pub safety_settings: Vec<SafetySetting>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct GenerationConfig {
    #[serde(rename = "maxOutputTokens")]
    pub max_output_tokens: u32,
    pub temperature: f32,
    #[serde(rename = "topK")]
    pub top_k: u32,
    #[serde(rename = "topP")]
    pub top_p: f32,
}

#[derive(Debug, Serialize)]
pub struct SafetySetting {
    pub category: &'static str,
    pub threshold: &'static str,
}

impl SafetySetting {
    /// Block-medium-and-above across the four standard harm categories.
    pub fn defaults() -> Vec<SafetySetting> {
        [
            "HARM_CATEGORY_HARASSMENT",
            "HARM_CATEGORY_HATE_SPEECH",
            "HARM_CATEGORY_SEXUALLY_EXPLICIT",
            "HARM_CATEGORY_DANGEROUS_CONTENT",
        ]
        .into_iter()
        .map(|category| SafetySetting {
            category,
            threshold: "BLOCK_MEDIUM_AND_ABOVE",
        })
        .collect()
    }
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(rename = "usageMetadata")]
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<Content>,
    #[serde(rename = "finishReason")]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UsageMetadata {
    #[serde(rename = "promptTokenCount")]
    pub prompt_token_count: Option<u32>,
    #[serde(rename = "candidatesTokenCount")]
    pub candidates_token_count: Option<u32>,
    #[serde(rename = "totalTokenCount")]
    pub total_token_count: Option<u32>,
}

impl GenerateContentResponse {
    /// Text of the first candidate part, if the model returned any.
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()
            .map(|p| p.text.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_a_typical_response() {
        let body = r#"{
            "candidates": [
                {
                    "content": { "parts": [ { "text": "1. EXECUTIVE SUMMARY\nHello." } ], "role": "model" },
                    "finishReason": "STOP"
                }
            ],
            "usageMetadata": { "promptTokenCount": 12, "candidatesTokenCount": 34, "totalTokenCount": 46 }
        }"#;
        let resp: GenerateContentResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.first_text(), Some("1. EXECUTIVE SUMMARY\nHello."));
        assert_eq!(resp.usage_metadata.unwrap().total_token_count, Some(46));
    }

    #[test]
    fn blocked_response_has_no_candidates() {
        let body = r#"{ "promptFeedback": { "blockReason": "SAFETY" } }"#;
        let resp: GenerateContentResponse = serde_json::from_str(body).unwrap();
        assert!(resp.candidates.is_empty());
        assert!(resp.first_text().is_none());
    }

    #[test]
    fn request_serializes_with_camel_case_config() {
        let req = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: "hi".to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                max_output_tokens: 100,
                temperature: 0.7,
                top_k: 40,
                top_p: 0.95,
            },
            safety_settings: SafetySetting::defaults(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 100);
        assert_eq!(json["safetySettings"].as_array().unwrap().len(), 4);
    }
}
