//! Story command handlers.

use storypal::Storypal;
use storypal_core::{ImageReference, Story};
use storypal_error::{JsonError, StorypalResult};
use storypal_narrative::{Advance, Progress, PresentedSlide};

use super::commands::OutputFormat;

/// List every story.
pub async fn list_stories(app: &Storypal, format: OutputFormat) -> StorypalResult<()> {
    let stories = app.stories().await;
    match format {
        OutputFormat::Json => print_json(&stories)?,
        OutputFormat::Human => {
            println!("{:-<80}", "");
            for story in &stories {
                let origin = if story.is_user_created { "custom" } else { "built-in" };
                println!("{:<44} {:<9} {}", story.id, origin, story.title);
            }
            println!("{:-<80}", "");
            println!("Total: {} stories", stories.len());
        }
    }
    Ok(())
}

/// Print a story's slides without loading illustrations.
pub async fn show_story(app: &Storypal, id: &str, format: OutputFormat) -> StorypalResult<()> {
    let player = app.play(id).await?;
    match format {
        OutputFormat::Json => print_json(player.story())?,
        OutputFormat::Human => {
            print_header(player.story());
            for index in 0..player.story().len() {
                if let Some(slide) = player.present(index) {
                    print_slide(&slide, None);
                }
            }
        }
    }
    Ok(())
}

/// Create a story and print a summary.
pub async fn create_story(app: &Storypal, topic: &str) -> StorypalResult<()> {
    warn_if_unconfigured(app);
    let story = app.create(topic, &print_progress).await?;
    println!("Created '{}' ({})", story.title, story.id);
    Ok(())
}

/// Regenerate a custom story.
pub async fn regenerate_story(app: &Storypal, id: &str, topic: Option<&str>) -> StorypalResult<()> {
    warn_if_unconfigured(app);
    let story = app.regenerate(id, topic, &print_progress).await?;
    println!("Regenerated '{}' ({})", story.title, story.id);
    Ok(())
}

/// Delete a custom story.
pub async fn delete_story(app: &Storypal, id: &str) -> StorypalResult<()> {
    let story = app.delete(id).await?;
    println!("Deleted '{}'", story.title);
    Ok(())
}

/// Walk through every slide, resolving illustrations, then award a star.
pub async fn play_story(app: &Storypal, id: &str) -> StorypalResult<()> {
    let mut player = app.play(id).await?;
    print_header(player.story());

    loop {
        let Some(slide) = player.current() else {
            break;
        };
        let image = player.load_active_image().await;
        print_slide(&slide, image.as_ref().map(|r| &r.reference));
        if let Some(feedback) = player.choose(0) {
            println!("  -> {}", feedback);
        }
        if player.next() == Advance::Finished {
            break;
        }
    }
    player.close();

    let stars = app.award_star().await?;
    println!();
    println!("Great job! You earned a star. Stars: {}", stars);
    Ok(())
}

/// Print the star count.
pub async fn show_stars(app: &Storypal) -> StorypalResult<()> {
    println!("Stars: {}", app.stars().await);
    Ok(())
}

fn print_progress(progress: Progress) {
    eprintln!("[{:>3}%] {}", progress.percent(), progress.stage());
}

fn warn_if_unconfigured(app: &Storypal) {
    if !app.is_configured() {
        eprintln!("Warning: no API key configured; stories cannot be written.");
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> StorypalResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| JsonError::new(e.to_string()))?;
    println!("{}", json);
    Ok(())
}

fn print_header(story: &Story) {
    println!("{}", story.title);
    println!("{}", story.description);
    println!("{:=<80}", "");
}

fn print_slide(slide: &PresentedSlide, image: Option<&ImageReference>) {
    println!();
    println!(
        "[{}/{}] {} ({})",
        slide.index() + 1,
        slide.total(),
        slide.tip_title(),
        slide.kind()
    );
    if let Some(image) = image {
        println!("  Image: {}", describe_image(image));
    }
    println!("  {}", slide.text());
    for (i, choice) in slide.choices().iter().enumerate() {
        println!("    {}. {}", i + 1, choice);
    }
    if !slide.parent_tip().is_empty() {
        println!("  Tip: {}", slide.parent_tip());
    }
    if !slide.parent_action().is_empty() {
        println!("  Try: {}", slide.parent_action());
    }
}

/// Embedded images are summarized rather than dumped.
fn describe_image(image: &ImageReference) -> String {
    if image.is_embedded() {
        let mime = image
            .as_str()
            .strip_prefix("data:")
            .and_then(|rest| rest.split(';').next())
            .unwrap_or("image");
        format!("embedded {} ({} bytes encoded)", mime, image.as_str().len())
    } else {
        image.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_url_image() {
        let image = ImageReference::from("https://example.com/bear.png");
        assert_eq!(describe_image(&image), "https://example.com/bear.png");
    }

    #[test]
    fn test_describe_embedded_image() {
        let image = ImageReference::embed("image/png", &[1, 2, 3]);
        let described = describe_image(&image);
        assert!(described.starts_with("embedded image/png"));
    }
}
