//! Built-in story catalog.

use crate::validate_slides;
use storypal_core::Story;
use storypal_error::{JsonError, RepositoryError, RepositoryErrorKind, StorypalResult};

const BUNDLED_CATALOG: &str = include_str!("catalog.json");

/// Immutable set of built-in stories, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    stories: Vec<Story>,
}

impl Catalog {
    /// Load the catalog bundled with the crate.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled data is invalid, which is a build
    /// defect.
    pub fn bundled() -> StorypalResult<Self> {
        Self::from_json(BUNDLED_CATALOG)
    }

    /// Load a catalog from a JSON array of stories.
    ///
    /// Every story is validated and marked as built-in.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid JSON, invalid slides or duplicate ids.
    #[tracing::instrument(skip(json))]
    pub fn from_json(json: &str) -> StorypalResult<Self> {
        let mut stories: Vec<Story> = serde_json::from_str(json)
            .map_err(|e| JsonError::new(format!("Invalid story catalog: {}", e)))?;

        for story in stories.iter_mut() {
            validate_slides(&story.slides)?;
            story.is_user_created = false;
        }

        let mut seen = std::collections::HashSet::new();
        for story in &stories {
            if !seen.insert(story.id.as_str()) {
                return Err(
                    RepositoryError::new(RepositoryErrorKind::DuplicateId(story.id.clone())).into(),
                );
            }
        }

        tracing::debug!(stories = stories.len(), "Loaded story catalog");
        Ok(Self { stories })
    }

    /// Built-in stories in display order.
    pub fn stories(&self) -> &[Story] {
        &self.stories
    }

    /// Built-in story by id.
    pub fn get(&self, id: &str) -> Option<&Story> {
        self.stories.iter().find(|s| s.id == id)
    }

    /// Whether `id` names a built-in story.
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }
}
