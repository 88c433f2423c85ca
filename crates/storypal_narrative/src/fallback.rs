//! Deterministic fallback illustrations.

use storypal_core::ImageReference;
use storypal_error::{ConfigError, StorypalResult};

/// Non-empty ordered set of fallback illustrations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackImages {
    images: Vec<ImageReference>,
}

impl FallbackImages {
    /// Create a fallback set.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `images` is empty or contains a blank
    /// entry.
    pub fn new<I, S>(images: I) -> StorypalResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<ImageReference>,
    {
        let images: Vec<ImageReference> = images.into_iter().map(Into::into).collect();
        if images.is_empty() {
            return Err(ConfigError::in_section("resolver", "At least one fallback image is required").into());
        }
        if images.iter().any(ImageReference::is_blank) {
            return Err(ConfigError::in_section("resolver", "Fallback images cannot be blank").into());
        }
        Ok(Self { images })
    }

    /// Fallback for a slide: `images[slide_index mod len]`.
    pub fn select(&self, slide_index: usize) -> &ImageReference {
        &self.images[slide_index % self.images.len()]
    }

    /// Fallback used for covers.
    pub fn first(&self) -> &ImageReference {
        self.select(0)
    }

    /// Number of fallbacks.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}
