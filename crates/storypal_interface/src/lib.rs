//! Trait definitions for generation providers.
//!
//! The orchestration layer only talks to the outside world through
//! [`GenerationProvider`]; concrete providers live in `storypal_models`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod provider;
mod request;

pub use provider::GenerationProvider;
pub use request::{TextRequest, TextRequestBuilder};
