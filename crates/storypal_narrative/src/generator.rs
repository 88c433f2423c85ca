//! Narrative generation.

use crate::{GeneratorConfig, NarrativeDraft, narrative_response_schema, parse_narrative};
use std::sync::Arc;
use storypal_core::Profile;
use storypal_error::{ConfigError, SchemaError, SchemaErrorKind, StorypalResult};
use storypal_interface::{GenerationProvider, TextRequestBuilder};

/// Turns a topic and profile into a validated [`NarrativeDraft`].
///
/// One provider call per attempt; failures are returned to the caller
/// unchanged.
#[derive(Clone)]
pub struct NarrativeGenerator {
    provider: Arc<dyn GenerationProvider>,
    config: GeneratorConfig,
}

impl std::fmt::Debug for NarrativeGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NarrativeGenerator")
            .field("provider", &self.provider.provider_name())
            .field("config", &self.config)
            .finish()
    }
}

impl NarrativeGenerator {
    /// Create a generator.
    pub fn new(provider: Arc<dyn GenerationProvider>, config: GeneratorConfig) -> Self {
        Self { provider, config }
    }

    /// User prompt for a topic and profile.
    pub fn prompt(topic: &str, profile: &Profile) -> String {
        format!(
            "Create a social story about: {} for a child named {} who likes {}.",
            topic.trim(),
            profile.name().trim(),
            profile.interest().trim()
        )
    }

    /// Generate a narrative about `topic` for `profile`.
    ///
    /// # Errors
    ///
    /// - [`SchemaErrorKind::EmptyTopic`] for a blank topic (no provider call)
    /// - Provider errors, unchanged
    /// - [`SchemaError`] if the response does not validate
    #[tracing::instrument(skip(self, profile), fields(provider = self.provider.provider_name()))]
    pub async fn generate(&self, topic: &str, profile: &Profile) -> StorypalResult<NarrativeDraft> {
        if topic.trim().is_empty() {
            return Err(SchemaError::new(SchemaErrorKind::EmptyTopic).into());
        }

        let request = TextRequestBuilder::default()
            .system_instruction(self.config.system_instruction().as_str())
            .prompt(Self::prompt(topic, profile))
            .response_schema(narrative_response_schema())
            .model(self.config.model().clone())
            .build()
            .map_err(|e| ConfigError::new(format!("Invalid narrative request: {}", e)))?;

        tracing::info!("Requesting narrative");
        let response = self.provider.generate_text(&request).await?;

        let draft = parse_narrative(&response, topic).inspect_err(|e| {
            tracing::warn!(error = %e, "Narrative failed validation");
        })?;

        tracing::info!(title = %draft.title(), slides = draft.slides().len(), "Generated narrative");
        Ok(draft)
    }
}
