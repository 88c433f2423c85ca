//! Slide templates.

use serde::{Deserialize, Serialize};

/// Narrative beat a slide plays in the story.
///
/// The set is closed; unknown kinds fail deserialization.
///
/// # Examples
///
/// ```
/// use storypal_core::SlideKind;
///
/// let kind: SlideKind = serde_json::from_str("\"sensory\"").unwrap();
/// assert_eq!(kind, SlideKind::Sensory);
/// assert!(serde_json::from_str::<SlideKind>("\"epilogue\"").is_err());
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SlideKind {
    /// Sets the scene
    Intro,
    /// Describes sights, sounds and feelings
    Sensory,
    /// Offers the reader choices
    Interaction,
    /// Something does not go to plan
    Conflict,
    /// Wraps up with praise
    Conclusion,
}

impl SlideKind {
    /// Heading shown above the guidance for the accompanying adult.
    pub fn tip_title(&self) -> &'static str {
        match self {
            SlideKind::Intro => "Start Together",
            SlideKind::Sensory => "Check Feelings",
            SlideKind::Interaction | SlideKind::Conflict => "Teachable Moment",
            SlideKind::Conclusion => "Great Job!",
        }
    }
}

/// An answer the reader can pick on an interaction slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// Button text
    pub text: String,
    /// Response read back when the choice is picked
    pub feedback: String,
}

/// One slide of a story, before personalization.
///
/// Text fields may contain `{name}`, `{interest}` and `{strategy}` tokens.
/// `static_image` and `pre_generated_image` short-circuit illustration
/// generation when non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideTemplate {
    /// Narrative role
    #[serde(rename = "type")]
    pub kind: SlideKind,
    /// Story text template
    pub text: String,
    /// Scene description for illustration
    #[serde(default)]
    pub visual_prompt: String,
    /// Guidance for the accompanying adult
    #[serde(default)]
    pub parent_tip: String,
    /// Suggested action for the accompanying adult
    #[serde(default)]
    pub parent_action: String,
    /// Ordered choices for interaction slides
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<Choice>,
    /// Shipped illustration
    #[serde(default, rename = "imgUrl", skip_serializing_if = "Option::is_none")]
    pub static_image: Option<String>,
    /// Illustration produced while the story was authored
    #[serde(
        default,
        rename = "generatedImage",
        skip_serializing_if = "Option::is_none"
    )]
    pub pre_generated_image: Option<String>,
}

impl SlideTemplate {
    /// Create a slide with text only.
    pub fn new(kind: SlideKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            visual_prompt: String::new(),
            parent_tip: String::new(),
            parent_action: String::new(),
            choices: Vec::new(),
            static_image: None,
            pre_generated_image: None,
        }
    }

    /// Static illustration, if present and non-blank.
    pub fn static_image(&self) -> Option<&str> {
        non_blank(self.static_image.as_deref())
    }

    /// Pre-generated illustration, if present and non-blank.
    pub fn pre_generated_image(&self) -> Option<&str> {
        non_blank(self.pre_generated_image.as_deref())
    }

    /// Source text for the illustration prompt: the visual prompt, or the
    /// slide text when no visual prompt was written.
    pub fn scene_description(&self) -> &str {
        if self.visual_prompt.trim().is_empty() {
            &self.text
        } else {
            &self.visual_prompt
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
