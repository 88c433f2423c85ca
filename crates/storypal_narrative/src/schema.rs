//! Narrative response schema and strict validation.
//!
//! The provider is asked to follow [`narrative_response_schema`]. Its answer
//! is then parsed into a closed set of fields and validated slide by slide;
//! anything that does not fit is a [`SchemaError`].

use crate::{NarrativeDraft, strip_code_fence};
use serde::Deserialize;
use storypal_core::{Choice, SlideKind, SlideTemplate};
use storypal_error::{SchemaError, SchemaErrorKind, StorypalResult};
use strum::IntoEnumIterator;

/// JSON schema sent with every narrative request.
pub fn narrative_response_schema() -> serde_json::Value {
    let kinds: Vec<String> = SlideKind::iter().map(|k| k.to_string()).collect();
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING" },
            "description": { "type": "STRING" },
            "slides": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "type": { "type": "STRING", "enum": kinds },
                        "text": { "type": "STRING" },
                        "visualPrompt": { "type": "STRING" },
                        "parentTip": { "type": "STRING" },
                        "parentAction": { "type": "STRING" },
                        "choices": {
                            "type": "ARRAY",
                            "items": {
                                "type": "OBJECT",
                                "properties": {
                                    "text": { "type": "STRING" },
                                    "feedback": { "type": "STRING" }
                                }
                            }
                        }
                    },
                    "required": ["type", "text"]
                }
            }
        },
        "required": ["slides"]
    })
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawNarrative {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    slides: Vec<RawSlide>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
struct RawSlide {
    #[serde(rename = "type")]
    kind: SlideKind,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    visual_prompt: Option<String>,
    #[serde(default)]
    parent_tip: Option<String>,
    #[serde(default)]
    parent_action: Option<String>,
    #[serde(default)]
    choices: Option<Vec<RawChoice>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawChoice {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    feedback: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse and validate a narrative response for `topic`.
///
/// A surrounding code fence is stripped first. Missing title and description
/// fall back to the topic.
///
/// # Errors
///
/// Returns a [`SchemaError`] for invalid JSON, unknown fields, unknown slide
/// kinds, an empty slide list, blank slide text or incomplete choices.
#[tracing::instrument(skip(response), fields(response_len = response.len()))]
pub fn parse_narrative(response: &str, topic: &str) -> StorypalResult<NarrativeDraft> {
    let raw: RawNarrative = serde_json::from_str(strip_code_fence(response))
        .map_err(|e| SchemaError::new(SchemaErrorKind::Malformed(e.to_string())))?;

    let mut slides = Vec::with_capacity(raw.slides.len());
    for (index, raw_slide) in raw.slides.into_iter().enumerate() {
        let text = non_blank(raw_slide.text)
            .ok_or_else(|| SchemaError::new(SchemaErrorKind::EmptySlideText(index)))?;

        let mut choices = Vec::new();
        for (choice_index, raw_choice) in raw_slide.choices.unwrap_or_default().into_iter().enumerate() {
            match (non_blank(raw_choice.text), non_blank(raw_choice.feedback)) {
                (Some(text), Some(feedback)) => choices.push(Choice { text, feedback }),
                _ => {
                    return Err(SchemaError::new(SchemaErrorKind::IncompleteChoice {
                        slide: index,
                        choice: choice_index,
                    })
                    .into());
                }
            }
        }

        let mut slide = SlideTemplate::new(raw_slide.kind, text);
        slide.visual_prompt = raw_slide.visual_prompt.unwrap_or_default();
        slide.parent_tip = raw_slide.parent_tip.unwrap_or_default();
        slide.parent_action = raw_slide.parent_action.unwrap_or_default();
        slide.choices = choices;
        slides.push(slide);
    }

    if slides.is_empty() {
        return Err(SchemaError::new(SchemaErrorKind::EmptySlides).into());
    }

    let title = non_blank(raw.title).unwrap_or_else(|| topic.trim().to_string());
    let description =
        non_blank(raw.description).unwrap_or_else(|| format!("A story about {}", topic.trim()));

    tracing::debug!(slides = slides.len(), "Parsed narrative");
    Ok(NarrativeDraft::new(title, description, slides))
}

/// Validate slides that did not come through [`parse_narrative`].
///
/// Applies the same rules: at least one slide, no blank text, complete
/// choices.
pub fn validate_slides(slides: &[SlideTemplate]) -> StorypalResult<()> {
    if slides.is_empty() {
        return Err(SchemaError::new(SchemaErrorKind::EmptySlides).into());
    }
    for (index, slide) in slides.iter().enumerate() {
        if slide.text.trim().is_empty() {
            return Err(SchemaError::new(SchemaErrorKind::EmptySlideText(index)).into());
        }
        if let Some(choice) = slide
            .choices
            .iter()
            .position(|c| c.text.trim().is_empty() || c.feedback.trim().is_empty())
        {
            return Err(SchemaError::new(SchemaErrorKind::IncompleteChoice {
                slide: index,
                choice,
            })
            .into());
        }
    }
    Ok(())
}
