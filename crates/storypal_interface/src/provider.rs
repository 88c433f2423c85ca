//! Generation provider trait.

use async_trait::async_trait;
use storypal_core::GeneratedImage;
use storypal_error::ProviderResult;

use crate::TextRequest;

/// A quota-limited, latency-heavy content generator.
///
/// Both calls are single request/response exchanges; callers decide what to
/// do on failure. Implementations must not retry internally.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Generate text constrained by the request's schema.
    ///
    /// Returns the raw response text; validation is the caller's job.
    async fn generate_text(&self, request: &TextRequest) -> ProviderResult<String>;

    /// Generate a single image for `prompt`.
    async fn generate_image(&self, prompt: &str) -> ProviderResult<GeneratedImage>;

    /// Whether the provider has the credentials it needs.
    ///
    /// When this returns `false`, callers skip the network entirely.
    fn is_configured(&self) -> bool {
        true
    }

    /// Provider name (e.g., "gemini").
    fn provider_name(&self) -> &'static str;
}
