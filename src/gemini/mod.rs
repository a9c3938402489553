// src/gemini/mod.rs
pub mod client;
pub mod models;
pub mod prompt;

pub use client::{GeminiClient, GEMINI_MAX_TOKENS};
pub use prompt::build_research_prompt;
