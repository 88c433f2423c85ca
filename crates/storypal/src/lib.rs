//! Storypal - personalized, illustrated social stories
//!
//! Storypal writes short social stories with a generation provider, swaps the
//! child's name, interest and coping strategy into every slide, and
//! illustrates each slide through a persistent cache so an image is generated
//! at most once.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use storypal::{Progress, Storypal, StorypalConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let app = Storypal::open(&StorypalConfig::load()?).await?;
//!
//!     let story = app
//!         .create("visiting the dentist", &|p: Progress| println!("{}%", p.percent()))
//!         .await?;
//!
//!     let mut player = app.play(&story.id).await?;
//!     while let Some(image) = player.load_active_image().await {
//!         println!("{}", image.reference);
//!         if player.next() == storypal::Advance::Finished {
//!             break;
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Storypal is organized as a workspace with focused crates:
//!
//! - `storypal_error` - Error types
//! - `storypal_core` - Story data model and placeholder engine
//! - `storypal_interface` - `GenerationProvider` trait
//! - `storypal_storage` - Key-value backends and the application store
//! - `storypal_cache` - Collection-scoped illustration cache
//! - `storypal_models` - Gemini provider
//! - `storypal_narrative` - Generation, illustration and story lifecycle
//!
//! This crate (`storypal`) re-exports everything for convenience and adds the
//! layered configuration, log setup and the `storypal` binary.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod app;
mod config;
mod observability;

pub use app::Storypal;
pub use config::{LoggingConfig, StorageConfig, StorypalConfig};
pub use observability::{ObservabilityConfig, init_observability};

pub use storypal_cache::*;
pub use storypal_core::*;
pub use storypal_error::*;
pub use storypal_interface::*;
pub use storypal_models::*;
pub use storypal_narrative::*;
pub use storypal_storage::*;
