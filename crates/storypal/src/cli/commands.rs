//! CLI command definitions.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use storypal_core::Avatar;

/// Storypal - personalized, illustrated social stories
#[derive(Parser, Debug)]
#[command(name = "storypal")]
#[command(about = "Personalized, illustrated social stories", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Extra configuration file layered over the standard ones
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Profile management commands
    #[command(subcommand)]
    Profile(ProfileCommands),

    /// List built-in and custom stories
    List {
        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// Show a story's slides, personalized for the current profile
    Show {
        /// Story id
        id: String,

        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// Write and illustrate a new story
    Create {
        /// What the story is about (e.g. "getting a haircut")
        topic: String,
    },

    /// Rewrite a custom story
    Regenerate {
        /// Story id
        id: String,

        /// New topic; the previous topic is reused when omitted
        #[arg(long)]
        topic: Option<String>,
    },

    /// Delete a custom story and its cached illustrations
    Delete {
        /// Story id
        id: String,
    },

    /// Read a story slide by slide and earn a star
    Play {
        /// Story id
        id: String,
    },

    /// Show how many stars have been earned
    Stars,
}

/// Profile subcommands
#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    /// Update the profile; omitted fields keep their current value
    Set {
        /// Child's name
        #[arg(long)]
        name: Option<String>,

        /// Special interest (e.g. "dinosaurs")
        #[arg(long)]
        interest: Option<String>,

        /// Coping strategy (e.g. "take deep breaths")
        #[arg(long)]
        strategy: Option<String>,

        /// Illustration character: bear, robot or cat
        #[arg(long)]
        avatar: Option<Avatar>,

        /// Preferred speech voice
        #[arg(long)]
        voice: Option<String>,
    },

    /// Print the current profile
    Show {
        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },
}

/// Output format for listing commands
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
