//! Test utilities for narrative tests.
//!
//! This module provides a scripted provider and fixtures.

#![allow(dead_code)]

pub mod mock_provider;

pub use mock_provider::{MockImage, MockProvider, MockText};

use std::sync::Arc;
use storypal_cache::ContentCache;
use storypal_core::{Avatar, Profile, ProfileBuilder, SlideKind, SlideTemplate, Story, StoryTags};
use storypal_narrative::{
    Catalog, GeneratorConfig, IllustrationResolver, NarrativeGenerator, ResolverConfig,
    StoryCreator, StoryRepository,
};
use storypal_storage::{AppStore, InMemoryStore};

/// Four-slide dentist narrative as the provider would return it.
pub const DENTIST_NARRATIVE: &str = r#"{
  "title": "Visiting the Dentist",
  "description": "{name} gets a check-up.",
  "slides": [
    {"type": "intro", "text": "Today {name} visits the dentist.", "visualPrompt": "scene zero: a friendly dentist office", "parentTip": "Stay calm.", "parentAction": "Ask {name} what they see."},
    {"type": "sensory", "text": "The light is bright. {name} can {strategy}.", "visualPrompt": "scene one: a bright lamp", "parentTip": "Validate feelings.", "parentAction": ""},
    {"type": "interaction", "text": "{name} opens wide like a {interest}!", "visualPrompt": "scene two: open wide", "parentTip": "Use the interest.", "parentAction": "", "choices": [
      {"text": "Open wide", "feedback": "Great job, {name}!"},
      {"text": "Count to three", "feedback": "Counting helps {name} feel calm."}
    ]},
    {"type": "conclusion", "text": "All done! {name} was brave.", "visualPrompt": "scene three: a sparkling tooth", "parentTip": "Praise.", "parentAction": "High five!"}
  ]
}"#;

/// Fallbacks used by every test resolver.
pub fn fallback_images() -> Vec<String> {
    (0..4).map(|i| format!("https://fallback.test/{}.png", i)).collect()
}

pub fn resolver_config() -> ResolverConfig {
    ResolverConfig::default().with_fallback_images(fallback_images())
}

pub fn profile() -> Profile {
    ProfileBuilder::default()
        .name("Alex")
        .interest("dinosaur")
        .strategy("wear headphones")
        .avatar(Avatar::Bear)
        .build()
        .unwrap()
}

/// A user story whose slides have no bundled images.
pub fn user_story(id: &str, slides: usize) -> Story {
    Story {
        id: id.to_string(),
        title: "Test".to_string(),
        topic: "testing".to_string(),
        description: "A test story".to_string(),
        cover_image: String::new(),
        tags: StoryTags::custom(),
        slides: (0..slides)
            .map(|i| {
                let mut slide = SlideTemplate::new(SlideKind::Intro, format!("Slide {} for {{name}}", i));
                slide.visual_prompt = format!("scene {}", ["zero", "one", "two", "three", "four", "five"][i % 6]);
                slide
            })
            .collect(),
        is_user_created: true,
    }
}

/// Everything wired over an in-memory store.
pub struct Harness {
    pub provider: Arc<MockProvider>,
    pub store: Arc<AppStore>,
    pub cache: ContentCache,
    pub resolver: IllustrationResolver,
    pub repository: StoryRepository,
    pub generator: NarrativeGenerator,
    pub creator: StoryCreator,
}

impl Harness {
    pub async fn new(provider: MockProvider) -> Self {
        Self::with_config(provider, resolver_config()).await
    }

    pub async fn with_config(provider: MockProvider, config: ResolverConfig) -> Self {
        let provider = Arc::new(provider);
        let store = Arc::new(AppStore::load(Arc::new(InMemoryStore::new())).await.unwrap());
        let cache = ContentCache::new(store.clone());
        let resolver = IllustrationResolver::new(provider.clone(), cache.clone(), &config).unwrap();
        let repository = StoryRepository::new(Arc::new(Catalog::bundled().unwrap()), store.clone());
        let generator = NarrativeGenerator::new(provider.clone(), GeneratorConfig::default());
        let creator = StoryCreator::new(generator.clone(), resolver.clone(), repository.clone());
        Self {
            provider,
            store,
            cache,
            resolver,
            repository,
            generator,
            creator,
        }
    }
}
