//! Durable storage for Storypal.
//!
//! This crate provides two layers:
//!
//! - **[`KeyValueStore`]**: a pluggable string key-value backend with a
//!   filesystem implementation ([`FileSystemStore`]) and an in-memory one
//!   ([`InMemoryStore`]).
//! - **[`AppStore`]**: the process-wide owner of all persisted state (profile,
//!   star counter, user-created stories and the image cache). It loads every
//!   key once at startup and writes the affected keys through on every
//!   mutation. Nothing else touches the backend.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use storypal_storage::{AppStore, InMemoryStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = AppStore::load(Arc::new(InMemoryStore::new())).await?;
//! assert_eq!(store.stars().await, 0);
//! store.award_star().await?;
//! assert_eq!(store.stars().await, 1);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod filesystem;
mod key_value;
mod memory;
mod store;

pub use filesystem::FileSystemStore;
pub use key_value::{KeyValueStore, StoreKey};
pub use memory::InMemoryStore;
pub use store::{AppStore, ImageBucket};
pub use storypal_error::{StorageError, StorageErrorKind};
