//! Tests for the bundled catalog.

use storypal_core::SlideKind;
use storypal_narrative::Catalog;

#[test]
fn test_bundled_catalog_loads_in_order() {
    let catalog = Catalog::bundled().unwrap();
    let ids: Vec<&str> = catalog.stories().iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["birthday", "dentist", "park"]);
    assert!(catalog.stories().iter().all(|s| !s.is_user_created));
}

#[test]
fn test_built_in_slides_need_generation() {
    let catalog = Catalog::bundled().unwrap();
    for story in catalog.stories() {
        assert_eq!(story.len(), 4, "{} should have four slides", story.id);
        for slide in &story.slides {
            assert!(slide.static_image().is_none());
            assert!(slide.pre_generated_image().is_none());
            assert!(!slide.visual_prompt.is_empty());
        }
    }
}

#[test]
fn test_park_story_shape() {
    let catalog = Catalog::bundled().unwrap();
    let park = catalog.get("park").unwrap();
    let kinds: Vec<SlideKind> = park.slides.iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        vec![
            SlideKind::Intro,
            SlideKind::Conflict,
            SlideKind::Interaction,
            SlideKind::Conclusion
        ]
    );
    assert_eq!(park.slides[2].choices.len(), 3);
    assert_eq!(park.tags.label, "Social Skills");
}

#[test]
fn test_catalog_rejects_duplicate_ids() {
    let json = r#"[
        {"id": "a", "title": "A", "topic": "t", "description": "d", "coverImage": "",
         "tags": {"icon": "i", "label": "l", "color": "c", "bg": "b"},
         "slides": [{"type": "intro", "text": "hi"}]},
        {"id": "a", "title": "B", "topic": "t", "description": "d", "coverImage": "",
         "tags": {"icon": "i", "label": "l", "color": "c", "bg": "b"},
         "slides": [{"type": "intro", "text": "hi"}]}
    ]"#;
    assert!(Catalog::from_json(json).is_err());
}

#[test]
fn test_catalog_rejects_blank_slide_text() {
    let json = r#"[
        {"id": "a", "title": "A", "topic": "t", "description": "d", "coverImage": "",
         "tags": {"icon": "i", "label": "l", "color": "c", "bg": "b"},
         "slides": [{"type": "intro", "text": " "}]}
    ]"#;
    let err = Catalog::from_json(json).unwrap_err();
    assert!(err.is_schema());
}
