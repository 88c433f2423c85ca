//! Tests for story playback.

mod test_utils;

use std::time::Duration;
use storypal_narrative::{Advance, Catalog, ResolutionSource, StoryPlayer};
use test_utils::{Harness, MockProvider, profile};

async fn dentist_player(harness: &Harness) -> StoryPlayer {
    let story = Catalog::bundled().unwrap().get("dentist").unwrap().clone();
    StoryPlayer::new(story, profile(), harness.resolver.clone())
}

#[tokio::test]
async fn test_present_substitutes_everything() {
    let harness = Harness::new(MockProvider::new("")).await;
    let player = dentist_player(&harness).await;

    let intro = player.current().unwrap();
    assert_eq!(*intro.index(), 0);
    assert_eq!(*intro.total(), 4);
    assert_eq!(*intro.tip_title(), "Start Together");
    assert!(intro.text().starts_with("Alex has a beautiful smile!"));

    let interaction = player.present(2).unwrap();
    assert_eq!(*interaction.tip_title(), "Teachable Moment");
    assert!(interaction.text().contains("friendly dinosaur"));
    assert_eq!(interaction.choices().len(), 3);

    let conclusion = player.present(3).unwrap();
    assert!(conclusion.is_last());
    assert_eq!(*conclusion.tip_title(), "Great Job!");
    assert!(player.present(4).is_none());
}

#[tokio::test]
async fn test_choose_returns_feedback() {
    let harness = Harness::new(MockProvider::new("")).await;
    let mut player = dentist_player(&harness).await;

    assert!(player.choose(0).is_none());
    player.go_to(2);
    assert_eq!(
        player.choose(1).as_deref(),
        Some("Cool sunglasses help with the bright light.")
    );
    assert!(player.choose(9).is_none());
}

#[tokio::test]
async fn test_navigation() {
    let harness = Harness::new(MockProvider::new("")).await;
    let mut player = dentist_player(&harness).await;

    assert_eq!(player.previous(), 0);
    assert_eq!(player.next(), Advance::Moved(1));
    assert_eq!(player.next(), Advance::Moved(2));
    assert_eq!(player.next(), Advance::Moved(3));
    assert_eq!(player.next(), Advance::Finished);
    assert_eq!(player.previous(), 2);
    assert!(!player.go_to(7));
    assert_eq!(player.index(), 2);
}

#[tokio::test]
async fn test_load_active_image_applies_and_caches() {
    let harness = Harness::new(MockProvider::new("")).await;
    let player = dentist_player(&harness).await;

    let resolution = player.load_active_image().await.unwrap();

    assert_eq!(resolution.source, ResolutionSource::Generated);
    assert_eq!(player.image(0), Some(resolution.reference.clone()));
    assert_eq!(harness.cache.get("dentist", 0).await, Some(resolution.reference));
}

#[tokio::test]
async fn test_stale_load_is_discarded_but_cached() {
    let provider = MockProvider::new("").with_image_delay(Duration::from_millis(50));
    let harness = Harness::new(provider).await;
    let player = dentist_player(&harness).await;
    let epoch = player.epoch();

    let (loaded, _) = tokio::join!(player.load_active_image(), async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        epoch.bump();
    });

    assert!(loaded.is_none());
    assert!(player.image(0).is_none());
    assert!(harness.cache.get("dentist", 0).await.is_some());
}

#[tokio::test]
async fn test_closed_player_loads_nothing() {
    let harness = Harness::new(MockProvider::new("")).await;
    let mut player = dentist_player(&harness).await;

    player.close();

    assert!(player.is_closed());
    assert!(player.load_active_image().await.is_none());
    assert_eq!(harness.provider.image_calls(), 0);
}
