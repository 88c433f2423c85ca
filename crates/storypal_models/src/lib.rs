//! Generation provider integrations for Storypal.
//!
//! The only provider is Google's Generative Language API (Gemini), reached
//! over its REST endpoint. Text requests carry a JSON response schema; image
//! requests go to an image-capable model and return inline base64 data.
//!
//! # Example
//!
//! ```no_run
//! use storypal_interface::GenerationProvider;
//! use storypal_models::{GeminiConfig, GeminiProvider};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = GeminiProvider::new(GeminiConfig::default())?;
//! if provider.is_configured() {
//!     let image = provider.generate_image("a cute friendly teddy bear").await?;
//!     println!("{} bytes of {}", image.data.len(), image.mime);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod gemini;

pub use gemini::{
    Candidate, Content, GeminiConfig, GeminiConfigBuilder, GeminiProvider, GenerateContentRequest,
    GenerateContentResponse, GenerationConfig, InlineData, Part,
};
