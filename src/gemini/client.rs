// src/gemini/client.rs
use crate::gemini::models::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part,
    SafetySetting,
};
use crate::gemini::prompt::SYSTEM_PROMPT;
use crate::utils::error::GeminiError;
use std::time::Duration;

const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const GEMINI_MODEL: &str = "gemini-1.5-pro-latest";
pub const GEMINI_MAX_TOKENS: u32 = 8192;
const GEMINI_TEMPERATURE: f32 = 0.7;
// Generation can take a while on long prompts.
const REQUEST_TIMEOUT_SECS: u64 = 120;

/// REST client for the Gemini `generateContent` endpoint. The API key is
/// passed as a query parameter, not a header.
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, GeminiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/{}:generateContent?key={}",
            GEMINI_API_URL, GEMINI_MODEL, self.api_key
        )
    }

    /// Generates a response for the given prompt, prefixed with the research
    /// analyst system prompt.
    pub async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String, GeminiError> {
        let full_prompt = format!("{}\n\nUser Query: {}", SYSTEM_PROMPT, prompt);
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: full_prompt }],
            }],
            generation_config: GenerationConfig {
                max_output_tokens: max_tokens,
                temperature: GEMINI_TEMPERATURE,
                top_k: 40,
                top_p: 0.95,
            },
            safety_settings: SafetySetting::defaults(),
        };

        tracing::info!("Requesting Gemini generation ({} model)", GEMINI_MODEL);
        let response = self
            .client
            .post(self.endpoint())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Gemini API error {}: {}", status, body);
            if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                return Err(GeminiError::RateLimited);
            }
            return Err(GeminiError::Http(status));
        }

        let parsed: GenerateContentResponse = response.json().await?;

        if parsed.candidates.is_empty() {
            tracing::warn!("Gemini returned no candidates (safety filters?)");
            return Err(GeminiError::Blocked);
        }

        let text = parsed
            .first_text()
            .ok_or(GeminiError::EmptyResponse)?
            .to_string();

        if let Some(usage) = &parsed.usage_metadata {
            tracing::debug!(
                "Gemini usage: prompt={:?} candidates={:?} total={:?}",
                usage.prompt_token_count,
                usage.candidates_token_count,
                usage.total_token_count
            );
        }
        tracing::info!("Gemini response length: {} characters", text.len());

        Ok(text)
    }

    /// Cheap round-trip to verify the endpoint and key work.
    pub async fn test_connection(&self) -> Result<String, GeminiError> {
        self.generate("Say 'API Test Successful' if you can read this.", 50)
            .await
    }
}
