//! Gemini provider configuration.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Configuration for the Gemini provider.
///
/// Every field has a serde default, so an empty `[provider]` table is valid.
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_")]
#[builder(default, setter(into))]
pub struct GeminiConfig {
    /// Model for narrative text
    #[serde(default = "default_text_model")]
    text_model: String,

    /// Model for illustrations
    #[serde(default = "default_image_model")]
    image_model: String,

    /// API root, without trailing slash
    #[serde(default = "default_base_url")]
    base_url: String,

    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    api_key_env: String,

    /// HTTP request timeout (seconds)
    #[serde(default = "default_request_timeout_secs")]
    request_timeout_secs: u64,
}

fn default_text_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_image_model() -> String {
    "gemini-2.5-flash-image".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

fn default_request_timeout_secs() -> u64 {
    120
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            text_model: default_text_model(),
            image_model: default_image_model(),
            base_url: default_base_url(),
            api_key_env: default_api_key_env(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}
