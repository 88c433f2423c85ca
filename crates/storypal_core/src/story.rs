//! Stories (collections of slides).

use crate::SlideTemplate;
use serde::{Deserialize, Serialize};

/// Display metadata for a story card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryTags {
    /// Icon name
    pub icon: String,
    /// Short label
    pub label: String,
    /// Foreground colour class
    pub color: String,
    /// Background colour class
    #[serde(rename = "bg")]
    pub background: String,
}

impl StoryTags {
    /// Tag carried by every user-created story.
    pub fn custom() -> Self {
        Self {
            icon: "auto_awesome".to_string(),
            label: "Custom Story".to_string(),
            color: "text-purple-600".to_string(),
            background: "bg-purple-50".to_string(),
        }
    }
}

/// A titled, ordered sequence of slides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    /// Unique across built-in and user-created stories
    pub id: String,
    /// Title
    pub title: String,
    /// Topic the story was written about
    pub topic: String,
    /// One-line summary
    pub description: String,
    /// Cover illustration reference
    pub cover_image: String,
    /// Card metadata
    pub tags: StoryTags,
    /// Slides in reading order
    pub slides: Vec<SlideTemplate>,
    /// Whether the story was created by the user (and is therefore mutable)
    #[serde(default, rename = "isCustom")]
    pub is_user_created: bool,
}

impl Story {
    /// Slide at `index`, if any.
    pub fn slide(&self, index: usize) -> Option<&SlideTemplate> {
        self.slides.get(index)
    }

    /// Number of slides.
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Whether the story has no slides.
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }
}
