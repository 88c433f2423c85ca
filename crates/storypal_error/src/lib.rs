//! Error types for the Storypal library.
//!
//! This crate provides the foundation error types used throughout the Storypal workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use storypal_error::{StorypalResult, SchemaError, SchemaErrorKind};
//!
//! fn parse_story() -> StorypalResult<String> {
//!     Err(SchemaError::new(SchemaErrorKind::EmptySlides))?
//! }
//!
//! match parse_story() {
//!     Ok(story) => println!("Got: {}", story),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod json;
mod provider;
mod repository;
mod schema;
mod storage;

pub use config::ConfigError;
pub use error::{StorypalError, StorypalErrorKind, StorypalResult};
pub use json::JsonError;
pub use provider::{ProviderError, ProviderErrorKind, ProviderResult};
pub use repository::{RepositoryError, RepositoryErrorKind};
pub use schema::{SchemaError, SchemaErrorKind};
pub use storage::{StorageError, StorageErrorKind};
