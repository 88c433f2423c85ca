//! Persisted illustration cache.
//!
//! Maps (story id, slide index) to a resolved [`ImageReference`]. Entries are
//! grouped per story so a whole story can be dropped at once, and they never
//! expire. Storage goes through the application store, so every write is
//! durable before the call returns.
//!
//! [`ImageReference`]: storypal_core::ImageReference

#![warn(missing_docs)]

mod cache;

pub use cache::{CacheKey, ContentCache};
