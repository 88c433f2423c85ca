//! Process-wide application store.
//!
//! [`AppStore`] owns the profile, the star counter, the user-created stories
//! and the image cache. State lives in memory behind one async mutex; every
//! mutation writes its affected keys through to the [`KeyValueStore`] before
//! the lock is released.

use crate::{KeyValueStore, StoreKey};
use serde::de::DeserializeOwned;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use storypal_core::{ImageReference, Profile, Story};
use storypal_error::{
    JsonError, RepositoryError, RepositoryErrorKind, StorageError, StorageErrorKind,
    StorypalResult,
};
use tokio::sync::Mutex;

/// Cached illustrations for one story, keyed by slide index.
pub type ImageBucket = BTreeMap<usize, ImageReference>;

#[derive(Debug, Clone, Default)]
struct StoreState {
    profile: Option<Profile>,
    stars: u64,
    /// Newest first
    user_stories: Vec<Story>,
    image_cache: HashMap<String, ImageBucket>,
    /// Bumped whenever a bucket is invalidated. Not persisted.
    epochs: HashMap<String, u64>,
}

impl StoreState {
    fn serialize_key(&self, key: StoreKey) -> StorypalResult<String> {
        let result = match key {
            StoreKey::Profile => serde_json::to_string(&self.profile),
            StoreKey::Stars => serde_json::to_string(&self.stars),
            StoreKey::UserStories => serde_json::to_string(&self.user_stories),
            StoreKey::ImageCache => serde_json::to_string(&self.image_cache),
        };
        result.map_err(|e| JsonError::new(format!("Failed to serialize {}: {}", key, e)).into())
    }

    fn invalidate_bucket(&mut self, id: &str) {
        self.image_cache.remove(id);
        *self.epochs.entry(id.to_string()).or_default() += 1;
    }

    fn story_position(&self, id: &str) -> StorypalResult<usize> {
        self.user_stories
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| RepositoryError::new(RepositoryErrorKind::NotFound(id.to_string())).into())
    }
}

/// The single owner of all persisted application state.
pub struct AppStore {
    backend: Arc<dyn KeyValueStore>,
    state: Mutex<StoreState>,
}

impl std::fmt::Debug for AppStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppStore").finish_non_exhaustive()
    }
}

impl AppStore {
    /// Load every key from `backend`.
    ///
    /// Missing keys start empty.
    ///
    /// # Errors
    ///
    /// Returns a storage error if a key cannot be read or holds a value that
    /// does not decode.
    #[tracing::instrument(skip(backend))]
    pub async fn load(backend: Arc<dyn KeyValueStore>) -> StorypalResult<Self> {
        let mut state = StoreState::default();

        if let Some(profile) = read_key::<Option<Profile>>(backend.as_ref(), StoreKey::Profile).await? {
            state.profile = profile;
        }
        if let Some(stars) = read_key(backend.as_ref(), StoreKey::Stars).await? {
            state.stars = stars;
        }
        if let Some(stories) = read_key(backend.as_ref(), StoreKey::UserStories).await? {
            state.user_stories = stories;
        }
        if let Some(cache) = read_key(backend.as_ref(), StoreKey::ImageCache).await? {
            state.image_cache = cache;
        }

        tracing::info!(
            has_profile = state.profile.is_some(),
            stars = state.stars,
            user_stories = state.user_stories.len(),
            cached_buckets = state.image_cache.len(),
            "Loaded application store"
        );

        Ok(Self {
            backend,
            state: Mutex::new(state),
        })
    }

    /// Apply `f` to the state and persist `keys`.
    ///
    /// If `f` fails or any key fails to persist, the in-memory state is
    /// restored and keys already written are rewritten from the restored state.
    async fn mutate<R>(
        &self,
        keys: &[StoreKey],
        f: impl FnOnce(&mut StoreState) -> StorypalResult<R>,
    ) -> StorypalResult<R> {
        let mut state = self.state.lock().await;
        let snapshot = state.clone();

        let result = match f(&mut state) {
            Ok(result) => result,
            Err(e) => {
                *state = snapshot;
                return Err(e);
            }
        };

        self.commit(&mut state, snapshot, keys).await?;
        Ok(result)
    }

    /// Persist `keys` from `state`; on failure restore `snapshot` and rewrite
    /// the keys already written.
    async fn commit(
        &self,
        state: &mut StoreState,
        snapshot: StoreState,
        keys: &[StoreKey],
    ) -> StorypalResult<()> {
        let mut written = Vec::with_capacity(keys.len());
        for key in keys {
            if let Err(e) = self.persist(state, *key).await {
                tracing::warn!(key = %key, error = %e, "Persist failed, restoring previous state");
                *state = snapshot;
                for key in written {
                    if let Err(e) = self.persist(state, key).await {
                        tracing::error!(key = %key, error = %e, "Failed to restore persisted key");
                    }
                }
                return Err(e);
            }
            written.push(*key);
        }
        Ok(())
    }

    async fn persist(&self, state: &StoreState, key: StoreKey) -> StorypalResult<()> {
        let value = state.serialize_key(key)?;
        self.backend.write(key.as_str(), &value).await
    }

    /// Saved profile, if any.
    pub async fn profile(&self) -> Option<Profile> {
        self.state.lock().await.profile.clone()
    }

    /// Replace the saved profile.
    #[tracing::instrument(skip(self, profile), fields(name = %profile.name()))]
    pub async fn save_profile(&self, profile: Profile) -> StorypalResult<()> {
        self.mutate(&[StoreKey::Profile], |state| {
            state.profile = Some(profile);
            Ok(())
        })
        .await?;
        tracing::info!("Saved profile");
        Ok(())
    }

    /// Current star count.
    pub async fn stars(&self) -> u64 {
        self.state.lock().await.stars
    }

    /// Award one star and return the new total.
    #[tracing::instrument(skip(self))]
    pub async fn award_star(&self) -> StorypalResult<u64> {
        let stars = self
            .mutate(&[StoreKey::Stars], |state| {
                state.stars += 1;
                Ok(state.stars)
            })
            .await?;
        tracing::info!(stars, "Awarded star");
        Ok(stars)
    }

    /// User-created stories, newest first.
    pub async fn user_stories(&self) -> Vec<Story> {
        self.state.lock().await.user_stories.clone()
    }

    /// User-created story by id.
    pub async fn user_story(&self, id: &str) -> Option<Story> {
        self.state
            .lock()
            .await
            .user_stories
            .iter()
            .find(|s| s.id == id)
            .cloned()
    }

    /// Add a user-created story as the newest entry.
    ///
    /// # Errors
    ///
    /// Returns a repository error if a user story with the same id exists.
    #[tracing::instrument(skip(self, story), fields(id = %story.id))]
    pub async fn insert_story(&self, story: Story) -> StorypalResult<()> {
        self.mutate(&[StoreKey::UserStories], |state| {
            if state.user_stories.iter().any(|s| s.id == story.id) {
                return Err(RepositoryError::new(RepositoryErrorKind::DuplicateId(story.id)).into());
            }
            state.user_stories.insert(0, story);
            Ok(())
        })
        .await?;
        tracing::info!("Stored user story");
        Ok(())
    }

    /// Replace the user story `id` and invalidate its image bucket.
    ///
    /// The stored story keeps `id` and its position in the list.
    #[tracing::instrument(skip(self, story))]
    pub async fn replace_story(&self, id: &str, mut story: Story) -> StorypalResult<()> {
        self.mutate(&[StoreKey::UserStories, StoreKey::ImageCache], |state| {
            let position = state.story_position(id)?;
            story.id = id.to_string();
            state.user_stories[position] = story;
            state.invalidate_bucket(id);
            Ok(())
        })
        .await?;
        tracing::info!("Replaced user story and invalidated its images");
        Ok(())
    }

    /// Remove the user story `id` together with its image bucket.
    #[tracing::instrument(skip(self))]
    pub async fn remove_story(&self, id: &str) -> StorypalResult<Story> {
        let removed = self
            .mutate(&[StoreKey::UserStories, StoreKey::ImageCache], |state| {
                let position = state.story_position(id)?;
                state.invalidate_bucket(id);
                Ok(state.user_stories.remove(position))
            })
            .await?;
        tracing::info!("Removed user story and its images");
        Ok(removed)
    }

    /// Cached image for a slide.
    pub async fn image(&self, id: &str, index: usize) -> Option<ImageReference> {
        self.state
            .lock()
            .await
            .image_cache
            .get(id)
            .and_then(|bucket| bucket.get(&index))
            .cloned()
    }

    /// Every cached image for a story.
    pub async fn bucket(&self, id: &str) -> ImageBucket {
        self.state
            .lock()
            .await
            .image_cache
            .get(id)
            .cloned()
            .unwrap_or_default()
    }

    /// Store an image, replacing any existing entry for the slide.
    #[tracing::instrument(skip(self, reference))]
    pub async fn insert_image(
        &self,
        id: &str,
        index: usize,
        reference: ImageReference,
    ) -> StorypalResult<()> {
        self.mutate(&[StoreKey::ImageCache], |state| {
            state
                .image_cache
                .entry(id.to_string())
                .or_default()
                .insert(index, reference);
            Ok(())
        })
        .await
    }

    /// Store an image only if the slide has no entry and the bucket epoch is
    /// still `epoch`.
    ///
    /// Returns whether the write happened.
    #[tracing::instrument(skip(self, reference))]
    pub async fn insert_image_if_fresh(
        &self,
        id: &str,
        index: usize,
        reference: ImageReference,
        epoch: u64,
    ) -> StorypalResult<bool> {
        let mut state = self.state.lock().await;
        let current = state.epochs.get(id).copied().unwrap_or_default();
        let occupied = state
            .image_cache
            .get(id)
            .is_some_and(|bucket| bucket.contains_key(&index));
        if current != epoch || occupied {
            // Nothing changed, so nothing is persisted
            tracing::debug!(current, occupied, "Discarded stale or duplicate image write");
            return Ok(false);
        }

        let snapshot = state.clone();
        state
            .image_cache
            .entry(id.to_string())
            .or_default()
            .insert(index, reference);
        self.commit(&mut state, snapshot, &[StoreKey::ImageCache])
            .await?;
        Ok(true)
    }

    /// Remove every cached image for a story.
    #[tracing::instrument(skip(self))]
    pub async fn remove_bucket(&self, id: &str) -> StorypalResult<()> {
        self.mutate(&[StoreKey::ImageCache], |state| {
            state.invalidate_bucket(id);
            Ok(())
        })
        .await
    }

    /// Invalidation counter for a story's bucket.
    pub async fn bucket_epoch(&self, id: &str) -> u64 {
        self.state
            .lock()
            .await
            .epochs
            .get(id)
            .copied()
            .unwrap_or_default()
    }
}

async fn read_key<T: DeserializeOwned>(
    backend: &dyn KeyValueStore,
    key: StoreKey,
) -> StorypalResult<Option<T>> {
    let Some(raw) = backend.read(key.as_str()).await? else {
        return Ok(None);
    };
    serde_json::from_str(&raw).map(Some).map_err(|e| {
        StorageError::new(StorageErrorKind::Corrupt {
            key: key.to_string(),
            message: e.to_string(),
        })
        .into()
    })
}
