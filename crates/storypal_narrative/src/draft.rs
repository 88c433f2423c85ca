//! Validated narrative skeletons.

use derive_getters::Getters;
use storypal_core::SlideTemplate;

/// A validated, not yet illustrated narrative.
///
/// Slide order is exactly the order the provider returned.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct NarrativeDraft {
    title: String,
    description: String,
    slides: Vec<SlideTemplate>,
}

impl NarrativeDraft {
    /// Create a draft.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        slides: Vec<SlideTemplate>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            slides,
        }
    }

    /// Split into title, description and slides.
    pub fn into_parts(self) -> (String, String, Vec<SlideTemplate>) {
        (self.title, self.description, self.slides)
    }
}
