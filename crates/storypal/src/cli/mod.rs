//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the storypal binary.

mod commands;
mod profile;
mod stories;

pub use commands::{Cli, Commands};
pub use profile::handle_profile_command;
pub use stories::{
    create_story, delete_story, list_stories, play_story, regenerate_story, show_stars,
    show_story,
};
