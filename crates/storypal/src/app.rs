//! Application facade wiring every layer together.

use std::sync::Arc;
use storypal_cache::ContentCache;
use storypal_core::{Profile, Story};
use storypal_error::StorypalResult;
use storypal_interface::GenerationProvider;
use storypal_models::GeminiProvider;
use storypal_narrative::{
    Catalog, IllustrationResolver, NarrativeGenerator, ProgressSink, StoryCreator, StoryPlayer,
    StoryRepository,
};
use storypal_storage::{AppStore, FileSystemStore, KeyValueStore};

use crate::StorypalConfig;

/// One Storypal installation: a store, a provider and the services on top.
///
/// # Example
///
/// ```no_run
/// use storypal::{Storypal, StorypalConfig};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let app = Storypal::open(&StorypalConfig::load()?).await?;
/// for story in app.stories().await {
///     println!("{}: {}", story.id, story.title);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Storypal {
    store: Arc<AppStore>,
    repository: StoryRepository,
    resolver: IllustrationResolver,
    creator: StoryCreator,
    configured: bool,
}

impl Storypal {
    /// Open the file-backed store and the Gemini provider described by `config`.
    ///
    /// # Errors
    ///
    /// Fails if the data directory cannot be created, stored data is corrupt,
    /// or the HTTP client cannot be built.
    #[tracing::instrument(skip(config))]
    pub async fn open(config: &StorypalConfig) -> StorypalResult<Self> {
        let data_dir = config.storage().resolve_data_dir();
        tracing::info!(data_dir = %data_dir.display(), "Opening store");
        let backend = Arc::new(FileSystemStore::new(data_dir)?);
        let provider = Arc::new(GeminiProvider::new(config.provider().clone())?);
        Self::with_parts(backend, provider, config).await
    }

    /// Assemble from an explicit backend and provider.
    ///
    /// # Errors
    ///
    /// Fails if stored data is corrupt, the bundled catalog is invalid, or
    /// the fallback set is empty.
    pub async fn with_parts(
        backend: Arc<dyn KeyValueStore>,
        provider: Arc<dyn GenerationProvider>,
        config: &StorypalConfig,
    ) -> StorypalResult<Self> {
        let store = Arc::new(AppStore::load(backend).await?);
        let catalog = Arc::new(Catalog::bundled()?);
        let cache = ContentCache::new(store.clone());

        let configured = provider.is_configured();
        let resolver = IllustrationResolver::new(provider.clone(), cache, config.resolver())?;
        let generator = NarrativeGenerator::new(provider, config.generator().clone());
        let repository = StoryRepository::new(catalog, store.clone());
        let creator = StoryCreator::new(generator, resolver.clone(), repository.clone());

        Ok(Self {
            store,
            repository,
            resolver,
            creator,
            configured,
        })
    }

    /// Whether illustrations and narratives can be generated.
    pub fn is_configured(&self) -> bool {
        self.configured
    }

    /// Stored profile, or the default profile if none was saved.
    pub async fn profile(&self) -> Profile {
        self.store.profile().await.unwrap_or_default()
    }

    /// Whether a profile has been saved.
    pub async fn has_profile(&self) -> bool {
        self.store.profile().await.is_some()
    }

    /// Replace the stored profile.
    pub async fn save_profile(&self, profile: Profile) -> StorypalResult<()> {
        self.store.save_profile(profile).await
    }

    /// Stars earned so far.
    pub async fn stars(&self) -> u64 {
        self.store.stars().await
    }

    /// Award a star for a finished story.
    pub async fn award_star(&self) -> StorypalResult<u64> {
        self.store.award_star().await
    }

    /// Built-in stories followed by user stories, newest first.
    pub async fn stories(&self) -> Vec<Story> {
        self.repository.list().await
    }

    /// Story by id.
    pub async fn story(&self, id: &str) -> StorypalResult<Story> {
        self.repository.require(id).await
    }

    /// Whether `id` names a built-in story.
    pub fn is_built_in(&self, id: &str) -> bool {
        self.repository.is_built_in(id)
    }

    /// Write, illustrate and store a new story about `topic` for the current profile.
    pub async fn create(&self, topic: &str, progress: &dyn ProgressSink) -> StorypalResult<Story> {
        let profile = self.profile().await;
        self.creator.create(topic, &profile, progress).await
    }

    /// Rebuild a user story, optionally about a new topic.
    pub async fn regenerate(
        &self,
        id: &str,
        topic: Option<&str>,
        progress: &dyn ProgressSink,
    ) -> StorypalResult<Story> {
        let profile = self.profile().await;
        self.creator.regenerate(id, topic, &profile, progress).await
    }

    /// Delete a user story and its cached illustrations.
    pub async fn delete(&self, id: &str) -> StorypalResult<Story> {
        self.repository.delete(id).await
    }

    /// Start presenting story `id` for the current profile.
    pub async fn play(&self, id: &str) -> StorypalResult<StoryPlayer> {
        let story = self.story(id).await?;
        let profile = self.profile().await;
        Ok(StoryPlayer::new(story, profile, self.resolver.clone()))
    }
}
