//! Story creation pipeline.

use crate::{
    ILLUSTRATING_PERCENT, IllustrationResolver, NarrativeGenerator, ProgressSink, ProgressStage,
    ProgressTracker, ResolutionSource, StoryRepository, WRITING_PERCENT,
};
use storypal_core::{Profile, SlideTemplate, Story, StoryTags};
use storypal_error::{RepositoryError, RepositoryErrorKind, StorypalResult};

/// Prefix of every user-created story id.
pub const USER_STORY_PREFIX: &str = "custom-";

/// Generates, illustrates and stores user stories.
///
/// Creation is all-or-nothing: a narrative failure stores nothing and makes no
/// image requests, and illustration failures are absorbed by fallbacks.
#[derive(Debug, Clone)]
pub struct StoryCreator {
    generator: NarrativeGenerator,
    resolver: IllustrationResolver,
    repository: StoryRepository,
}

impl StoryCreator {
    /// Create a creator.
    pub fn new(
        generator: NarrativeGenerator,
        resolver: IllustrationResolver,
        repository: StoryRepository,
    ) -> Self {
        Self {
            generator,
            resolver,
            repository,
        }
    }

    /// Create and store a new story about `topic`.
    #[tracing::instrument(skip(self, profile, progress))]
    pub async fn create(
        &self,
        topic: &str,
        profile: &Profile,
        progress: &dyn ProgressSink,
    ) -> StorypalResult<Story> {
        let mut tracker = ProgressTracker::new(progress);
        let id = format!("{}{}", USER_STORY_PREFIX, uuid::Uuid::new_v4());
        let story = self.build(id, topic, profile, &mut tracker).await?;

        let story = self.repository.create(story).await?;
        tracker.complete();
        tracing::info!(id = %story.id, slides = story.len(), "Created story");
        Ok(story)
    }

    /// Rebuild user story `id`, optionally about a new topic.
    ///
    /// The previous topic is reused when `topic` is `None`. Cached
    /// illustrations of the old version are dropped.
    ///
    /// # Errors
    ///
    /// Built-in and unknown ids are rejected before any provider call.
    #[tracing::instrument(skip(self, profile, progress))]
    pub async fn regenerate(
        &self,
        id: &str,
        topic: Option<&str>,
        profile: &Profile,
        progress: &dyn ProgressSink,
    ) -> StorypalResult<Story> {
        if self.repository.is_built_in(id) {
            return Err(RepositoryError::new(RepositoryErrorKind::BuiltIn(id.to_string())).into());
        }
        let existing = self.repository.require(id).await?;
        let topic = topic
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(existing.topic.as_str());

        let mut tracker = ProgressTracker::new(progress);
        let story = self.build(id.to_string(), topic, profile, &mut tracker).await?;

        let story = self.repository.update(id, story).await?;
        tracker.complete();
        tracing::info!(slides = story.len(), "Regenerated story");
        Ok(story)
    }

    async fn build(
        &self,
        id: String,
        topic: &str,
        profile: &Profile,
        tracker: &mut ProgressTracker<'_>,
    ) -> StorypalResult<Story> {
        tracker.advance(WRITING_PERCENT, ProgressStage::Writing);
        let draft = self.generator.generate(topic, profile).await?;
        let (title, description, drafts) = draft.into_parts();

        tracker.advance(ILLUSTRATING_PERCENT, ProgressStage::Illustrating);
        let total = drafts.len();
        let mut slides: Vec<SlideTemplate> = Vec::with_capacity(total);
        for (index, mut slide) in drafts.into_iter().enumerate() {
            let resolution = self.resolver.render(index, &slide, profile).await;
            match resolution.source {
                ResolutionSource::Generated => {
                    slide.pre_generated_image = Some(resolution.reference.to_string());
                }
                _ => {
                    slide.static_image = Some(resolution.reference.to_string());
                }
            }
            slides.push(slide);
            tracker.slides_done(index + 1, total);
        }

        let cover_image = slides
            .first()
            .and_then(|s| s.pre_generated_image().or(s.static_image()))
            .map(str::to_string)
            .unwrap_or_else(|| self.resolver.fallbacks().first().to_string());

        Ok(Story {
            id,
            title,
            topic: topic.trim().to_string(),
            description,
            cover_image,
            tags: StoryTags::custom(),
            slides,
            is_user_created: true,
        })
    }
}
