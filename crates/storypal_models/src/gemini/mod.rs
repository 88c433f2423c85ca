//! Gemini REST integration.

mod client;
mod config;
mod dto;

pub use client::GeminiProvider;
pub use config::{GeminiConfig, GeminiConfigBuilder};
pub use dto::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    InlineData, Part,
};
