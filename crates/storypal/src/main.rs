//! Storypal CLI binary.
//!
//! This binary provides command-line access to Storypal's functionality:
//! - Set up the profile stories are personalized for
//! - Browse, create, regenerate and delete stories
//! - Play a story slide by slide and earn stars

use clap::Parser;
use storypal::{ObservabilityConfig, Storypal, StorypalConfig, init_observability};

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{
        Cli, Commands, create_story, delete_story, handle_profile_command, list_stories,
        play_story, regenerate_story, show_stars, show_story,
    };

    // Load .env before anything reads the environment
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();
    let config = StorypalConfig::load_with(cli.config.as_deref())?;

    // Initialize tracing
    let mut observability = ObservabilityConfig::from_logging(config.logging());
    if cli.verbose {
        observability = observability.with_log_level("debug");
    }
    if cli.json_logs {
        observability = observability.with_json_logs(true);
    }
    init_observability(&observability)?;

    let app = Storypal::open(&config).await?;

    // Execute the requested command
    match cli.command {
        Commands::Profile(profile_cmd) => handle_profile_command(&app, profile_cmd).await?,
        Commands::List { format } => list_stories(&app, format).await?,
        Commands::Show { id, format } => show_story(&app, &id, format).await?,
        Commands::Create { topic } => create_story(&app, &topic).await?,
        Commands::Regenerate { id, topic } => {
            regenerate_story(&app, &id, topic.as_deref()).await?
        }
        Commands::Delete { id } => delete_story(&app, &id).await?,
        Commands::Play { id } => play_story(&app, &id).await?,
        Commands::Stars => show_stars(&app).await?,
    }

    Ok(())
}
