//! Illustration references.

use base64::Engine;
use serde::{Deserialize, Serialize};

/// A resolved illustration: either a URL or a `data:` URI embedding the bytes.
///
/// # Examples
///
/// ```
/// use storypal_core::ImageReference;
///
/// let url = ImageReference::from("https://example.com/bear.png");
/// assert!(!url.is_embedded());
///
/// let embedded = ImageReference::embed("image/png", &[0x89, 0x50, 0x4E, 0x47]);
/// assert!(embedded.is_embedded());
/// assert!(embedded.as_str().starts_with("data:image/png;base64,"));
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct ImageReference(String);

impl ImageReference {
    /// Wrap a URL or data URI.
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// Embed raw image bytes as a base64 `data:` URI.
    pub fn embed(mime: &str, data: &[u8]) -> Self {
        let encoded = base64::engine::general_purpose::STANDARD.encode(data);
        Self(format!("data:{};base64,{}", mime, encoded))
    }

    /// The reference as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the image bytes are embedded in the reference.
    pub fn is_embedded(&self) -> bool {
        self.0.starts_with("data:")
    }

    /// Whether the reference is empty or whitespace.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<&str> for ImageReference {
    fn from(reference: &str) -> Self {
        Self(reference.to_string())
    }
}

/// Raw image returned by a generation provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    /// MIME type reported by the provider
    pub mime: String,
    /// Decoded image bytes
    pub data: Vec<u8>,
}

impl GeneratedImage {
    /// Convert into an embedded image reference.
    pub fn into_reference(self) -> ImageReference {
        ImageReference::embed(&self.mime, &self.data)
    }
}
