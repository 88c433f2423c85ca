//! Key-value backend trait and the keys the application uses.

use async_trait::async_trait;
use storypal_error::StorypalResult;

/// Trait for pluggable durable string storage.
///
/// Implementations must make a completed `write` visible to every later
/// `read`, including reads from a new process.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, or `None` if absent.
    async fn read(&self, key: &str) -> StorypalResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    async fn write(&self, key: &str, value: &str) -> StorypalResult<()>;
}

/// Keys owned by the application store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum StoreKey {
    /// Saved profile
    #[display("storypal_profile")]
    Profile,
    /// User-created stories
    #[display("storypal_custom_stories")]
    UserStories,
    /// Image cache buckets
    #[display("storypal_image_cache")]
    ImageCache,
    /// Star counter
    #[display("storypal_stars")]
    Stars,
}

impl StoreKey {
    /// Backend key name.
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreKey::Profile => "storypal_profile",
            StoreKey::UserStories => "storypal_custom_stories",
            StoreKey::ImageCache => "storypal_image_cache",
            StoreKey::Stars => "storypal_stars",
        }
    }
}
