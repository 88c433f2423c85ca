//! Tests for narrative generation and validation.

mod test_utils;

use storypal_core::{SlideKind, substitute};
use storypal_error::{ProviderErrorKind, SchemaErrorKind, StorypalErrorKind};
use storypal_narrative::parse_narrative;
use test_utils::{DENTIST_NARRATIVE, Harness, MockProvider, profile};

fn schema_kind(err: &storypal_error::StorypalError) -> SchemaErrorKind {
    match err.kind() {
        StorypalErrorKind::Schema(e) => e.kind.clone(),
        other => panic!("expected schema error, got {}", other),
    }
}

#[tokio::test]
async fn test_dentist_narrative_for_alex() {
    let harness = Harness::new(MockProvider::new(DENTIST_NARRATIVE)).await;
    let profile = profile();

    let draft = harness.generator.generate("the dentist", &profile).await.unwrap();

    let kinds: Vec<SlideKind> = draft.slides().iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        vec![
            SlideKind::Intro,
            SlideKind::Sensory,
            SlideKind::Interaction,
            SlideKind::Conclusion
        ]
    );
    for slide in draft.slides() {
        let text = substitute(&slide.text, &profile);
        assert!(text.contains("Alex"), "missing name in {:?}", text);
        assert!(!text.contains('{') && !text.contains('}'));
    }
    assert_eq!(draft.title(), "Visiting the Dentist");
    assert_eq!(harness.provider.image_calls(), 0);
}

#[tokio::test]
async fn test_request_carries_topic_profile_and_schema() {
    let harness = Harness::new(MockProvider::new(DENTIST_NARRATIVE)).await;

    harness.generator.generate("the dentist", &profile()).await.unwrap();

    let requests = harness.provider.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(
        request.prompt(),
        "Create a social story about: the dentist for a child named Alex who likes dinosaur."
    );
    assert!(request.system_instruction().contains("{name}"));
    let kinds = &request.response_schema()["properties"]["slides"]["items"]["properties"]["type"]["enum"];
    assert_eq!(kinds.as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_blank_topic_rejected_without_call() {
    let harness = Harness::new(MockProvider::new(DENTIST_NARRATIVE)).await;

    let err = harness.generator.generate("   ", &profile()).await.unwrap_err();

    assert_eq!(schema_kind(&err), SchemaErrorKind::EmptyTopic);
    assert_eq!(harness.provider.text_calls(), 0);
}

#[tokio::test]
async fn test_provider_error_propagates() {
    let harness = Harness::new(MockProvider::failing_text(ProviderErrorKind::Http {
        status_code: 429,
        message: "quota".to_string(),
    }))
    .await;

    let err = harness.generator.generate("the park", &profile()).await.unwrap_err();

    match err.kind() {
        StorypalErrorKind::Provider(e) => assert!(e.kind.is_quota()),
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn test_malformed_response_is_schema_error() {
    let harness = Harness::new(MockProvider::new("I'm sorry, I can't do that.")).await;

    let err = harness.generator.generate("the park", &profile()).await.unwrap_err();

    assert!(err.is_schema());
}

#[test]
fn test_code_fence_tolerated() {
    let fenced = format!("```json\n{}\n```", DENTIST_NARRATIVE);
    let draft = parse_narrative(&fenced, "the dentist").unwrap();
    assert_eq!(draft.slides().len(), 4);
}

#[test]
fn test_unknown_kind_rejected() {
    let response = r#"{"title": "t", "slides": [{"type": "epilogue", "text": "Bye"}]}"#;
    let err = parse_narrative(response, "x").unwrap_err();
    assert!(matches!(schema_kind(&err), SchemaErrorKind::Malformed(_)));
}

#[test]
fn test_unknown_field_rejected() {
    let response = r#"{"title": "t", "slides": [{"type": "intro", "text": "Hi", "mood": "happy"}]}"#;
    let err = parse_narrative(response, "x").unwrap_err();
    assert!(matches!(schema_kind(&err), SchemaErrorKind::Malformed(_)));
}

#[test]
fn test_empty_slides_rejected() {
    let err = parse_narrative(r#"{"title": "t", "slides": []}"#, "x").unwrap_err();
    assert_eq!(schema_kind(&err), SchemaErrorKind::EmptySlides);

    let err = parse_narrative(r#"{"title": "t"}"#, "x").unwrap_err();
    assert_eq!(schema_kind(&err), SchemaErrorKind::EmptySlides);
}

#[test]
fn test_blank_slide_text_rejected() {
    let response = r#"{"slides": [{"type": "intro", "text": "Hi"}, {"type": "conclusion", "text": "  "}]}"#;
    let err = parse_narrative(response, "x").unwrap_err();
    assert_eq!(schema_kind(&err), SchemaErrorKind::EmptySlideText(1));
}

#[test]
fn test_incomplete_choice_rejected() {
    let response = r#"{"slides": [{"type": "interaction", "text": "Pick", "choices": [{"text": "A", "feedback": "ok"}, {"text": "B"}]}]}"#;
    let err = parse_narrative(response, "x").unwrap_err();
    assert_eq!(
        schema_kind(&err),
        SchemaErrorKind::IncompleteChoice { slide: 0, choice: 1 }
    );
}

#[test]
fn test_missing_title_and_description_fall_back_to_topic() {
    let response = r#"{"slides": [{"type": "intro", "text": "Hi {name}"}]}"#;
    let draft = parse_narrative(response, " the zoo ").unwrap();
    assert_eq!(draft.title(), "the zoo");
    assert_eq!(draft.description(), "A story about the zoo");
    assert!(draft.slides()[0].choices.is_empty());
}

#[test]
fn test_slide_order_preserved() {
    let response = r#"{"slides": [
        {"type": "conclusion", "text": "c"},
        {"type": "intro", "text": "a"},
        {"type": "conflict", "text": "b"}
    ]}"#;
    let draft = parse_narrative(response, "x").unwrap();
    let texts: Vec<&str> = draft.slides().iter().map(|s| s.text.as_str()).collect();
    assert_eq!(texts, vec!["c", "a", "b"]);
}
