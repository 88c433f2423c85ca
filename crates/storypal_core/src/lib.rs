//! Core data types for the Storypal library.
//!
//! This crate provides the story data model shared by every other crate
//! (profiles, slides, stories, image references) and the placeholder engine
//! that personalizes slide text for a profile.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod image;
mod personalize;
mod profile;
mod slide;
mod story;

pub use image::{GeneratedImage, ImageReference};
pub use personalize::{
    DEFAULT_INTEREST, DEFAULT_NAME, DEFAULT_STRATEGY, INTEREST_TOKEN, NAME_TOKEN,
    STRATEGY_TOKEN, contains_token, substitute, substitute_for_illustration,
};
pub use profile::{Avatar, Profile, ProfileBuilder};
pub use slide::{Choice, SlideKind, SlideTemplate};
pub use story::{Story, StoryTags};
