//! Generator and resolver configuration.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Configuration for narrative generation (`[generator]`).
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_")]
#[builder(default, setter(into))]
pub struct GeneratorConfig {
    /// System instruction sent with every narrative request
    #[serde(default = "default_system_instruction")]
    system_instruction: String,

    /// Text model override; `None` uses the provider default
    #[serde(default)]
    model: Option<String>,
}

fn default_system_instruction() -> String {
    "You are an expert in creating social stories for children with autism. \
     Create a 4-slide social story about the topic provided. \
     The story should be simple, positive, and reassuring. \
     The slides must be: Intro, Sensory/Conflict, Interaction, Conclusion. \
     Use placeholders {name}, {interest}, {strategy} in the text."
        .to_string()
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            system_instruction: default_system_instruction(),
            model: None,
        }
    }
}

/// Configuration for illustration resolution (`[resolver]`).
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_")]
#[builder(default, setter(into))]
pub struct ResolverConfig {
    /// Upper bound on one image request (seconds)
    #[serde(default = "default_image_timeout_secs")]
    image_timeout_secs: u64,

    /// Illustrations used when generation is impossible or fails
    #[serde(default = "default_fallback_images")]
    fallback_images: Vec<String>,

    /// Art direction appended to every illustration prompt
    #[serde(default = "default_style_directive")]
    style_directive: String,
}

fn default_image_timeout_secs() -> u64 {
    60
}

fn default_fallback_images() -> Vec<String> {
    [
        "photo-1558060370-d644479cb673",
        "photo-1555596873-45521b446f2f",
        "photo-1596461404969-9ae70f2830c1",
        "photo-1515488042361-25f4682f2c33",
    ]
    .iter()
    .map(|id| {
        format!(
            "https://images.unsplash.com/{}?auto=format&fit=crop&w=800&q=80",
            id
        )
    })
    .collect()
}

fn default_style_directive() -> String {
    "STYLE: Minimalist vector art, soft pastel colors, clean thick lines, simple shapes.\n\
     AESTHETIC: Cute, kawaii, warm, safe, comfortable, cartoon style.\n\n\
     NEGATIVE PROMPT: No photorealism, no 3D realistic rendering, no scary elements, \
     no dark colors, no text, no complex details, no blurry photos, no scary faces."
        .to_string()
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            image_timeout_secs: default_image_timeout_secs(),
            fallback_images: default_fallback_images(),
            style_directive: default_style_directive(),
        }
    }
}
