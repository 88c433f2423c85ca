//! Scripted generation provider for testing.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use storypal_core::GeneratedImage;
use storypal_error::{ProviderError, ProviderErrorKind, ProviderResult};
use storypal_interface::{GenerationProvider, TextRequest};

/// Text behaviour.
#[derive(Debug, Clone)]
pub enum MockText {
    /// Return this text
    Success(String),
    /// Fail with this error
    Error(ProviderErrorKind),
}

/// Image behaviour for one call.
#[derive(Debug, Clone)]
pub enum MockImage {
    /// Return a small PNG-like payload
    Success,
    /// Fail with this error
    Error(ProviderErrorKind),
}

/// Mock provider.
///
/// Image calls consume `image_sequence` first, then use `default_image`.
/// A prompt containing any of `failing_prompts` fails regardless.
pub struct MockProvider {
    text: MockText,
    default_image: MockImage,
    image_sequence: Mutex<VecDeque<MockImage>>,
    failing_prompts: Vec<String>,
    image_delay: Option<Duration>,
    configured: bool,
    text_calls: AtomicUsize,
    image_calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
    requests: Mutex<Vec<TextRequest>>,
}

impl MockProvider {
    /// Text succeeds with `text`, images succeed.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: MockText::Success(text.into()),
            default_image: MockImage::Success,
            image_sequence: Mutex::new(VecDeque::new()),
            failing_prompts: Vec::new(),
            image_delay: None,
            configured: true,
            text_calls: AtomicUsize::new(0),
            image_calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Text fails with `error`.
    pub fn failing_text(error: ProviderErrorKind) -> Self {
        Self {
            text: MockText::Error(error),
            ..Self::new("")
        }
    }

    /// Default image behaviour.
    pub fn with_default_image(mut self, image: MockImage) -> Self {
        self.default_image = image;
        self
    }

    /// Per-call image behaviours, consumed in order.
    pub fn with_image_sequence(self, sequence: Vec<MockImage>) -> Self {
        *self.image_sequence.lock().unwrap() = sequence.into();
        self
    }

    /// Fail image prompts containing `needle` with HTTP 429.
    pub fn failing_prompt(mut self, needle: impl Into<String>) -> Self {
        self.failing_prompts.push(needle.into());
        self
    }

    /// Delay every image call.
    pub fn with_image_delay(mut self, delay: Duration) -> Self {
        self.image_delay = Some(delay);
        self
    }

    /// Report the provider as unconfigured.
    pub fn unconfigured(mut self) -> Self {
        self.configured = false;
        self
    }

    pub fn text_calls(&self) -> usize {
        self.text_calls.load(Ordering::SeqCst)
    }

    pub fn image_calls(&self) -> usize {
        self.image_calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn requests(&self) -> Vec<TextRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationProvider for MockProvider {
    async fn generate_text(&self, request: &TextRequest) -> ProviderResult<String> {
        self.text_calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        match &self.text {
            MockText::Success(text) => Ok(text.clone()),
            MockText::Error(kind) => Err(ProviderError::new(kind.clone())),
        }
    }

    async fn generate_image(&self, prompt: &str) -> ProviderResult<GeneratedImage> {
        let call = self.image_calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());

        if let Some(delay) = self.image_delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing_prompts.iter().any(|needle| prompt.contains(needle)) {
            return Err(ProviderError::new(ProviderErrorKind::Http {
                status_code: 429,
                message: "Resource exhausted".to_string(),
            }));
        }

        let behaviour = self
            .image_sequence
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.default_image.clone());

        match behaviour {
            MockImage::Success => Ok(GeneratedImage {
                mime: "image/png".to_string(),
                data: vec![0x89, 0x50, 0x4E, 0x47, call as u8],
            }),
            MockImage::Error(kind) => Err(ProviderError::new(kind)),
        }
    }

    fn is_configured(&self) -> bool {
        self.configured
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}
