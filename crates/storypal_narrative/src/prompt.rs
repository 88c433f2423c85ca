//! Illustration prompts.

use storypal_core::{Profile, SlideTemplate, substitute_for_illustration};

/// Build the image prompt for a slide.
///
/// The scene comes from the slide's visual prompt (or its text), with the
/// profile's name replaced by a neutral phrase so it never reaches the
/// provider.
///
/// # Examples
///
/// ```
/// use storypal_core::{Avatar, ProfileBuilder, SlideKind, SlideTemplate};
/// use storypal_narrative::illustration_prompt;
///
/// let profile = ProfileBuilder::default()
///     .name("Alex")
///     .avatar(Avatar::Robot)
///     .build()
///     .unwrap();
/// let slide = SlideTemplate::new(SlideKind::Intro, "{name} goes to the park.");
///
/// let prompt = illustration_prompt(&slide, &profile, "STYLE: soft");
/// assert!(prompt.contains("round robot"));
/// assert!(prompt.contains("the main character goes to the park"));
/// assert!(!prompt.contains("Alex"));
/// ```
pub fn illustration_prompt(slide: &SlideTemplate, profile: &Profile, style_directive: &str) -> String {
    let scene = substitute_for_illustration(slide.scene_description(), profile);
    format!(
        "Create a flat digital vector art illustration for a children's book.\n\n\
         SUBJECT: {} in a scene about {}.\n\
         {}",
        profile.avatar().description(),
        scene.trim(),
        style_directive.trim()
    )
}
