//! Gemini REST client.

use super::{Content, GeminiConfig, GenerateContentRequest, GenerateContentResponse, GenerationConfig};
use async_trait::async_trait;
use base64::Engine;
use reqwest::Client;
use std::time::Duration;
use storypal_core::GeneratedImage;
use storypal_error::{ProviderError, ProviderErrorKind, ProviderResult};
use storypal_interface::{GenerationProvider, TextRequest};
use tracing::{debug, instrument};

/// MIME type assumed when the response omits one.
const DEFAULT_IMAGE_MIME: &str = "image/png";

/// Gemini provider speaking the `generateContent` REST endpoint.
///
/// A provider without an API key is valid but unconfigured: every call
/// fails with [`ProviderErrorKind::Unavailable`] without touching the network.
#[derive(Clone)]
pub struct GeminiProvider {
    client: Client,
    config: GeminiConfig,
    api_key: Option<String>,
}

impl std::fmt::Debug for GeminiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiProvider")
            .field("config", &self.config)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl GeminiProvider {
    /// Create a provider reading its API key from the configured environment
    /// variable.
    ///
    /// A missing or empty variable yields an unconfigured provider.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    #[instrument(name = "gemini_provider_new", skip(config))]
    pub fn new(config: GeminiConfig) -> ProviderResult<Self> {
        let api_key = std::env::var(config.api_key_env())
            .ok()
            .filter(|key| !key.trim().is_empty());
        if api_key.is_none() {
            tracing::warn!(
                env = %config.api_key_env(),
                "API key not set; illustrations will use fallbacks"
            );
        }
        Self::build(config, api_key)
    }

    /// Create a provider with an explicit API key.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn with_api_key(config: GeminiConfig, api_key: impl Into<String>) -> ProviderResult<Self> {
        let api_key = Some(api_key.into()).filter(|key| !key.trim().is_empty());
        Self::build(config, api_key)
    }

    fn build(config: GeminiConfig, api_key: Option<String>) -> ProviderResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(*config.request_timeout_secs()))
            .build()
            .map_err(|e| {
                ProviderError::new(ProviderErrorKind::Request(format!(
                    "Failed to build HTTP client: {}",
                    e
                )))
            })?;

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    /// Provider configuration.
    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    fn endpoint(&self, model: &str) -> String {
        let model = model.strip_prefix("models/").unwrap_or(model);
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url().trim_end_matches('/'),
            model
        )
    }

    #[instrument(skip(self, model, body), fields(model = %model))]
    async fn generate_content(
        &self,
        model: &str,
        body: &GenerateContentRequest,
    ) -> ProviderResult<GenerateContentResponse> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            ProviderError::new(ProviderErrorKind::Unavailable(format!(
                "{} not set",
                self.config.api_key_env()
            )))
        })?;

        let url = self.endpoint(model);
        debug!(url = %url, "Sending Gemini API request");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "Gemini API returned an error");
            return Err(ProviderError::new(ProviderErrorKind::Http {
                status_code: status.as_u16(),
                message,
            }));
        }

        response.json().await.map_err(|e| {
            ProviderError::new(ProviderErrorKind::Decode(format!(
                "Failed to parse response: {}",
                e
            )))
        })
    }

    fn request_error(&self, error: reqwest::Error) -> ProviderError {
        if error.is_timeout() {
            ProviderError::new(ProviderErrorKind::Timeout(*self.config.request_timeout_secs()))
        } else {
            ProviderError::new(ProviderErrorKind::Request(error.to_string()))
        }
    }
}

fn build_request(
    contents: Vec<Content>,
    system_instruction: Option<Content>,
    generation_config: Option<GenerationConfig>,
) -> ProviderResult<GenerateContentRequest> {
    GenerateContentRequest::builder()
        .contents(contents)
        .system_instruction(system_instruction)
        .generation_config(generation_config)
        .build()
        .map_err(|e| ProviderError::new(ProviderErrorKind::Request(e.to_string())))
}

#[async_trait]
impl GenerationProvider for GeminiProvider {
    #[instrument(skip(self, request), fields(prompt_len = request.prompt().len()))]
    async fn generate_text(&self, request: &TextRequest) -> ProviderResult<String> {
        let body = build_request(
            vec![Content::user(request.prompt().as_str())],
            Some(Content::instruction(request.system_instruction().as_str())),
            Some(GenerationConfig::json(request.response_schema().clone())),
        )?;
        let model = request
            .model()
            .as_deref()
            .unwrap_or(self.config.text_model());

        let response = self.generate_content(model, &body).await?;
        let text = response.text().ok_or_else(|| {
            ProviderError::new(ProviderErrorKind::EmptyPayload(format!(
                "no text in response (finish reason: {})",
                response.finish_reason().unwrap_or("unknown")
            )))
        })?;

        debug!(response_len = text.len(), "Received narrative text");
        Ok(text)
    }

    #[instrument(skip(self, prompt), fields(prompt_len = prompt.len()))]
    async fn generate_image(&self, prompt: &str) -> ProviderResult<GeneratedImage> {
        let body = build_request(vec![Content::user(prompt)], None, None)?;
        let response = self
            .generate_content(self.config.image_model(), &body)
            .await?;

        let inline = response.inline_data().ok_or_else(|| {
            ProviderError::new(ProviderErrorKind::EmptyPayload(format!(
                "no image data in response (finish reason: {})",
                response.finish_reason().unwrap_or("unknown")
            )))
        })?;

        let data = base64::engine::general_purpose::STANDARD
            .decode(inline.data().trim())
            .map_err(|e| {
                ProviderError::new(ProviderErrorKind::Decode(format!(
                    "invalid base64 image data: {}",
                    e
                )))
            })?;
        if data.is_empty() {
            return Err(ProviderError::new(ProviderErrorKind::EmptyPayload(
                "image data is empty".to_string(),
            )));
        }

        let mime = inline
            .mime_type()
            .clone()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_IMAGE_MIME.to_string());

        debug!(mime = %mime, bytes = data.len(), "Received illustration");
        Ok(GeneratedImage { mime, data })
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }
}
