//! Tests for the story repository.

mod test_utils;

use storypal_core::ImageReference;
use storypal_error::{RepositoryErrorKind, StorypalErrorKind};
use test_utils::{Harness, MockProvider, user_story};

fn repository_kind(err: &storypal_error::StorypalError) -> RepositoryErrorKind {
    match err.kind() {
        StorypalErrorKind::Repository(e) => e.kind.clone(),
        other => panic!("expected repository error, got {}", other),
    }
}

#[tokio::test]
async fn test_list_built_ins_then_newest_user_stories() {
    let harness = Harness::new(MockProvider::new("")).await;
    harness.repository.create(user_story("custom-a", 2)).await.unwrap();
    harness.repository.create(user_story("custom-b", 2)).await.unwrap();

    let ids: Vec<String> = harness.repository.list().await.into_iter().map(|s| s.id).collect();

    assert_eq!(ids, vec!["birthday", "dentist", "park", "custom-b", "custom-a"]);
}

#[tokio::test]
async fn test_create_marks_user_created() {
    let harness = Harness::new(MockProvider::new("")).await;
    let mut story = user_story("custom-a", 1);
    story.is_user_created = false;

    let stored = harness.repository.create(story).await.unwrap();

    assert!(stored.is_user_created);
    assert!(harness.repository.get("custom-a").await.unwrap().is_user_created);
}

#[tokio::test]
async fn test_create_rejects_duplicate_ids() {
    let harness = Harness::new(MockProvider::new("")).await;
    harness.repository.create(user_story("custom-a", 1)).await.unwrap();

    let err = harness.repository.create(user_story("custom-a", 1)).await.unwrap_err();
    assert_eq!(repository_kind(&err), RepositoryErrorKind::DuplicateId("custom-a".to_string()));

    let err = harness.repository.create(user_story("dentist", 1)).await.unwrap_err();
    assert_eq!(repository_kind(&err), RepositoryErrorKind::DuplicateId("dentist".to_string()));
}

#[tokio::test]
async fn test_built_ins_are_immutable() {
    let harness = Harness::new(MockProvider::new("")).await;

    let err = harness.repository.delete("birthday").await.unwrap_err();
    assert_eq!(repository_kind(&err), RepositoryErrorKind::BuiltIn("birthday".to_string()));

    let err = harness
        .repository
        .update("park", user_story("park", 1))
        .await
        .unwrap_err();
    assert_eq!(repository_kind(&err), RepositoryErrorKind::BuiltIn("park".to_string()));

    let park = harness.repository.get("park").await.unwrap();
    assert_eq!(park.title, "Fun at the Park");
    assert!(!park.is_user_created);
}

#[tokio::test]
async fn test_unknown_ids_rejected() {
    let harness = Harness::new(MockProvider::new("")).await;

    let err = harness.repository.delete("custom-missing").await.unwrap_err();
    assert_eq!(repository_kind(&err), RepositoryErrorKind::NotFound("custom-missing".to_string()));

    let err = harness
        .repository
        .update("custom-missing", user_story("custom-missing", 1))
        .await
        .unwrap_err();
    assert_eq!(repository_kind(&err), RepositoryErrorKind::NotFound("custom-missing".to_string()));

    assert!(harness.repository.require("custom-missing").await.is_err());
}

#[tokio::test]
async fn test_delete_removes_story_and_cached_images() {
    let harness = Harness::new(MockProvider::new("")).await;
    harness.repository.create(user_story("custom-a", 4)).await.unwrap();
    harness.repository.create(user_story("custom-b", 1)).await.unwrap();
    for index in 0..4 {
        harness
            .cache
            .put("custom-a", index, ImageReference::from(format!("https://img.test/{}.png", index)))
            .await
            .unwrap();
    }
    harness
        .cache
        .put("custom-b", 0, ImageReference::from("https://img.test/b.png"))
        .await
        .unwrap();

    harness.repository.delete("custom-a").await.unwrap();

    for index in 0..4 {
        assert!(harness.cache.get("custom-a", index).await.is_none());
    }
    assert!(harness.repository.get("custom-a").await.is_none());
    assert!(harness.cache.get("custom-b", 0).await.is_some());
}

#[tokio::test]
async fn test_update_keeps_id_and_invalidates_cache() {
    let harness = Harness::new(MockProvider::new("")).await;
    harness.repository.create(user_story("custom-a", 2)).await.unwrap();
    harness
        .cache
        .put("custom-a", 0, ImageReference::from("https://img.test/old.png"))
        .await
        .unwrap();

    let mut replacement = user_story("custom-other", 3);
    replacement.title = "Second draft".to_string();
    let stored = harness.repository.update("custom-a", replacement).await.unwrap();

    assert_eq!(stored.id, "custom-a");
    let fetched = harness.repository.get("custom-a").await.unwrap();
    assert_eq!(fetched.title, "Second draft");
    assert_eq!(fetched.len(), 3);
    assert!(harness.repository.get("custom-other").await.is_none());
    assert!(harness.cache.entries("custom-a").await.is_empty());
}
