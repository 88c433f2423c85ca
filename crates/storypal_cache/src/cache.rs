//! Content cache implementation.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use storypal_core::ImageReference;
use storypal_error::StorypalResult;
use storypal_storage::{AppStore, ImageBucket};

/// Cache key for a slide illustration.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Getters,
    derive_more::Display,
)]
#[display("{}#{}", collection_id, slide_index)]
pub struct CacheKey {
    collection_id: String,
    slide_index: usize,
}

impl CacheKey {
    /// Create a key for `slide_index` of `collection_id`.
    pub fn new(collection_id: impl Into<String>, slide_index: usize) -> Self {
        Self {
            collection_id: collection_id.into(),
            slide_index,
        }
    }
}

/// Durable cache of resolved slide illustrations.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use storypal_cache::ContentCache;
/// use storypal_core::ImageReference;
/// use storypal_storage::{AppStore, InMemoryStore};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = Arc::new(AppStore::load(Arc::new(InMemoryStore::new())).await?);
/// let cache = ContentCache::new(store);
///
/// cache.put("dentist", 0, ImageReference::from("https://example.com/0.png")).await?;
/// assert!(cache.get("dentist", 0).await.is_some());
///
/// cache.delete_collection("dentist").await?;
/// assert!(cache.get("dentist", 0).await.is_none());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ContentCache {
    store: Arc<AppStore>,
}

impl ContentCache {
    /// Create a cache backed by the application store.
    pub fn new(store: Arc<AppStore>) -> Self {
        Self { store }
    }

    /// Cached reference for a slide.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, collection_id: &str, slide_index: usize) -> Option<ImageReference> {
        let reference = self.store.image(collection_id, slide_index).await;
        tracing::debug!(cache_hit = reference.is_some(), "Cache lookup");
        reference
    }

    /// Store a reference, replacing any existing entry for the slide.
    pub async fn put(
        &self,
        collection_id: &str,
        slide_index: usize,
        reference: ImageReference,
    ) -> StorypalResult<()> {
        self.store
            .insert_image(collection_id, slide_index, reference)
            .await
    }

    /// Store a reference unless the slide is already cached or the story's
    /// bucket was invalidated after `epoch` was read.
    ///
    /// Returns whether the entry was written.
    pub async fn put_if_fresh(
        &self,
        collection_id: &str,
        slide_index: usize,
        reference: ImageReference,
        epoch: u64,
    ) -> StorypalResult<bool> {
        self.store
            .insert_image_if_fresh(collection_id, slide_index, reference, epoch)
            .await
    }

    /// Remove every entry for a story.
    #[tracing::instrument(skip(self))]
    pub async fn delete_collection(&self, collection_id: &str) -> StorypalResult<()> {
        self.store.remove_bucket(collection_id).await?;
        tracing::info!("Cleared cached illustrations");
        Ok(())
    }

    /// Current invalidation epoch of a story's bucket.
    pub async fn epoch(&self, collection_id: &str) -> u64 {
        self.store.bucket_epoch(collection_id).await
    }

    /// All entries for a story, ordered by slide index.
    pub async fn entries(&self, collection_id: &str) -> ImageBucket {
        self.store.bucket(collection_id).await
    }
}
