//! Narrative generation and story lifecycle for Storypal.
//!
//! This crate holds the orchestration layer:
//!
//! - [`NarrativeGenerator`] asks the provider for a schema-constrained story
//!   and validates it strictly
//! - [`IllustrationResolver`] resolves each slide's image through the cache,
//!   bundled assets and at most one generation job per slide, falling back
//!   deterministically when generation fails
//! - [`StoryRepository`] merges the built-in [`Catalog`] with user stories and
//!   cascades cache cleanup
//! - [`StoryCreator`] runs creation and regeneration with progress reporting
//! - [`StoryPlayer`] presents a story slide by slide
//!
//! # Example
//!
//! ```rust,ignore
//! use storypal_narrative::{Progress, StoryCreator};
//!
//! let story = creator
//!     .create("the dentist", &profile, &|p: Progress| println!("{}% {}", p.percent(), p.stage()))
//!     .await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod catalog;
mod config;
mod creator;
mod draft;
mod extraction;
mod fallback;
mod generator;
mod illustration;
mod player;
mod progress;
mod prompt;
mod repository;
mod schema;

pub use catalog::Catalog;
pub use config::{GeneratorConfig, GeneratorConfigBuilder, ResolverConfig, ResolverConfigBuilder};
pub use creator::{StoryCreator, USER_STORY_PREFIX};
pub use draft::NarrativeDraft;
pub use extraction::strip_code_fence;
pub use fallback::FallbackImages;
pub use generator::NarrativeGenerator;
pub use illustration::{IllustrationResolver, Resolution, ResolutionSource};
pub use player::{Advance, PresentedSlide, StoryPlayer, ViewEpoch};
pub use progress::{
    ILLUSTRATING_PERCENT, ILLUSTRATION_SPAN, Progress, ProgressSink, ProgressStage,
    ProgressTracker, WRITING_PERCENT,
};
pub use prompt::illustration_prompt;
pub use repository::StoryRepository;
pub use schema::{narrative_response_schema, parse_narrative, validate_slides};
