//! Profile command handlers.

use storypal::Storypal;
use storypal_core::ProfileBuilder;
use storypal_error::{ConfigError, JsonError, StorypalResult};

use super::commands::{OutputFormat, ProfileCommands};

/// Handle profile commands.
pub async fn handle_profile_command(app: &Storypal, cmd: ProfileCommands) -> StorypalResult<()> {
    match cmd {
        ProfileCommands::Set {
            name,
            interest,
            strategy,
            avatar,
            voice,
        } => {
            let current = app.profile().await;
            let profile = ProfileBuilder::default()
                .name(name.unwrap_or_else(|| current.name().clone()))
                .interest(interest.unwrap_or_else(|| current.interest().clone()))
                .strategy(strategy.unwrap_or_else(|| current.strategy().clone()))
                .avatar(avatar.unwrap_or(*current.avatar()))
                .voice(voice.or_else(|| current.voice().clone()))
                .build()
                .map_err(|e| ConfigError::new(format!("Invalid profile: {}", e)))?;

            app.save_profile(profile).await?;
            println!("Profile saved.");
            show_profile(app, OutputFormat::Human).await
        }
        ProfileCommands::Show { format } => show_profile(app, format).await,
    }
}

async fn show_profile(app: &Storypal, format: OutputFormat) -> StorypalResult<()> {
    let profile = app.profile().await;
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&profile)
                .map_err(|e| JsonError::new(e.to_string()))?;
            println!("{}", json);
        }
        OutputFormat::Human => {
            if !app.has_profile().await {
                println!("No profile saved yet; stories use generic wording.");
            }
            println!("Name:     {}", profile.name());
            println!("Interest: {}", profile.interest());
            println!("Strategy: {}", profile.strategy());
            println!("Avatar:   {}", profile.avatar());
            println!(
                "Voice:    {}",
                profile.voice().as_deref().unwrap_or("default")
            );
        }
    }
    Ok(())
}
