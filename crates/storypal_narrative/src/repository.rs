//! Story repository: built-in catalog plus user-created stories.

use crate::Catalog;
use std::sync::Arc;
use storypal_core::Story;
use storypal_error::{RepositoryError, RepositoryErrorKind, StorypalResult};
use storypal_storage::AppStore;

/// Merges the immutable catalog with the user's stories and owns their
/// lifecycle.
///
/// Deleting or updating a user story clears its cached illustrations in the
/// same store operation.
#[derive(Debug, Clone)]
pub struct StoryRepository {
    catalog: Arc<Catalog>,
    store: Arc<AppStore>,
}

impl StoryRepository {
    /// Create a repository.
    pub fn new(catalog: Arc<Catalog>, store: Arc<AppStore>) -> Self {
        Self { catalog, store }
    }

    /// Built-in catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    fn reject_built_in(&self, id: &str) -> StorypalResult<()> {
        if self.catalog.contains(id) {
            return Err(RepositoryError::new(RepositoryErrorKind::BuiltIn(id.to_string())).into());
        }
        Ok(())
    }

    /// Store a new user story.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryErrorKind::DuplicateId`] if any story already uses
    /// the id.
    #[tracing::instrument(skip(self, story), fields(id = %story.id))]
    pub async fn create(&self, mut story: Story) -> StorypalResult<Story> {
        if self.catalog.contains(&story.id) {
            return Err(RepositoryError::new(RepositoryErrorKind::DuplicateId(story.id)).into());
        }
        story.is_user_created = true;
        self.store.insert_story(story.clone()).await?;
        Ok(story)
    }

    /// Replace user story `id`, keeping its id, and drop its cached
    /// illustrations.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryErrorKind::BuiltIn`] for built-in stories and
    /// [`RepositoryErrorKind::NotFound`] for unknown ids.
    #[tracing::instrument(skip(self, story))]
    pub async fn update(&self, id: &str, mut story: Story) -> StorypalResult<Story> {
        self.reject_built_in(id)?;
        story.id = id.to_string();
        story.is_user_created = true;
        self.store.replace_story(id, story.clone()).await?;
        Ok(story)
    }

    /// Delete user story `id` and its cached illustrations.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryErrorKind::BuiltIn`] for built-in stories and
    /// [`RepositoryErrorKind::NotFound`] for unknown ids.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> StorypalResult<Story> {
        self.reject_built_in(id)?;
        self.store.remove_story(id).await
    }

    /// Story by id, built-in or user-created.
    pub async fn get(&self, id: &str) -> Option<Story> {
        match self.catalog.get(id) {
            Some(story) => Some(story.clone()),
            None => self.store.user_story(id).await,
        }
    }

    /// Story by id, or [`RepositoryErrorKind::NotFound`].
    pub async fn require(&self, id: &str) -> StorypalResult<Story> {
        self.get(id)
            .await
            .ok_or_else(|| RepositoryError::new(RepositoryErrorKind::NotFound(id.to_string())).into())
    }

    /// Built-in stories in catalog order, then user stories newest first.
    pub async fn list(&self) -> Vec<Story> {
        let mut stories = self.catalog.stories().to_vec();
        stories.extend(self.store.user_stories().await);
        stories
    }

    /// Whether `id` names a built-in story.
    pub fn is_built_in(&self, id: &str) -> bool {
        self.catalog.contains(id)
    }
}
