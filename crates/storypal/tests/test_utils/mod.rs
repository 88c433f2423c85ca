//! Test utilities for facade tests.

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use storypal::{
    GeneratedImage, GenerationProvider, InMemoryStore, ProviderError, ProviderErrorKind,
    ProviderResult, ResolverConfig, Storypal, StorypalConfig, TextRequest,
};

/// Three-slide narrative as the provider would return it.
pub const HAIRCUT_NARRATIVE: &str = r#"{
  "title": "Getting a Haircut",
  "description": "{name} visits the barber.",
  "slides": [
    {"type": "intro", "text": "{name} goes to the barber.", "visualPrompt": "a barber shop", "parentTip": "Preview the visit.", "parentAction": ""},
    {"type": "sensory", "text": "The clippers buzz. {name} can {strategy}.", "visualPrompt": "buzzing clippers", "parentTip": "Name the sound.", "parentAction": ""},
    {"type": "conclusion", "text": "All done! {name} looks like a {interest}.", "visualPrompt": "a mirror", "parentTip": "Praise.", "parentAction": "High five!"}
  ]
}"#;

/// Provider returning a fixed narrative and a tiny image.
pub struct StubProvider {
    narrative: String,
    configured: bool,
    text_calls: AtomicUsize,
    image_calls: AtomicUsize,
}

impl StubProvider {
    pub fn new(narrative: impl Into<String>) -> Self {
        Self {
            narrative: narrative.into(),
            configured: true,
            text_calls: AtomicUsize::new(0),
            image_calls: AtomicUsize::new(0),
        }
    }

    /// A provider without credentials.
    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            ..Self::new("")
        }
    }

    pub fn text_calls(&self) -> usize {
        self.text_calls.load(Ordering::SeqCst)
    }

    pub fn image_calls(&self) -> usize {
        self.image_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GenerationProvider for StubProvider {
    async fn generate_text(&self, _request: &TextRequest) -> ProviderResult<String> {
        self.text_calls.fetch_add(1, Ordering::SeqCst);
        if !self.configured {
            return Err(ProviderError::new(ProviderErrorKind::Unavailable(
                "no API key".to_string(),
            )));
        }
        Ok(self.narrative.clone())
    }

    async fn generate_image(&self, _prompt: &str) -> ProviderResult<GeneratedImage> {
        self.image_calls.fetch_add(1, Ordering::SeqCst);
        Ok(GeneratedImage {
            mime: "image/png".to_string(),
            data: vec![0x89, 0x50, 0x4E, 0x47],
        })
    }

    fn is_configured(&self) -> bool {
        self.configured
    }

    fn provider_name(&self) -> &'static str {
        "stub"
    }
}

/// Fallbacks used by every test app.
pub fn fallback_images() -> Vec<String> {
    (0..4).map(|i| format!("https://fallback.test/{}.png", i)).collect()
}

pub fn config() -> StorypalConfig {
    StorypalConfig::default()
        .with_resolver(ResolverConfig::default().with_fallback_images(fallback_images()))
}

/// App over `backend` and `provider`.
pub async fn open(backend: Arc<InMemoryStore>, provider: Arc<StubProvider>) -> Storypal {
    Storypal::with_parts(backend, provider, &config())
        .await
        .unwrap()
}
