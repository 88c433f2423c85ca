//! Structured text generation requests.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// A request for structured text constrained by a JSON schema.
///
/// # Examples
///
/// ```
/// use storypal_interface::TextRequestBuilder;
/// use serde_json::json;
///
/// let request = TextRequestBuilder::default()
///     .system_instruction("You write short social stories.")
///     .prompt("Create a social story about: the dentist")
///     .response_schema(json!({"type": "OBJECT"}))
///     .build()
///     .unwrap();
///
/// assert!(request.prompt().contains("dentist"));
/// assert!(request.model().is_none());
/// ```
#[derive(
    Debug, Clone, PartialEq, Serialize, Deserialize, Getters, derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct TextRequest {
    /// Instruction framing every response
    system_instruction: String,
    /// User prompt
    prompt: String,
    /// JSON schema the response must satisfy
    response_schema: serde_json::Value,
    /// Model override; `None` uses the provider default
    #[builder(default)]
    model: Option<String>,
}
