//! Personalization profile.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Character drawn into every illustration.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Avatar {
    /// Teddy bear
    #[default]
    Bear,
    /// Round robot
    Robot,
    /// Soft cat
    Cat,
}

impl Avatar {
    /// Character description used in illustration prompts.
    pub fn description(&self) -> &'static str {
        match self {
            Avatar::Bear => "a cute friendly teddy bear character",
            Avatar::Robot => "a cute friendly round robot character",
            Avatar::Cat => "a cute soft cat character",
        }
    }
}

/// The person a story is personalized for.
///
/// Profiles are plain input to substitution. Empty fields are allowed; the
/// placeholder engine replaces them with generic phrases.
///
/// # Examples
///
/// ```
/// use storypal_core::{Avatar, ProfileBuilder};
///
/// let profile = ProfileBuilder::default()
///     .name("Alex")
///     .interest("dinosaurs")
///     .avatar(Avatar::Robot)
///     .build()
///     .unwrap();
///
/// assert_eq!(profile.name(), "Alex");
/// assert_eq!(profile.strategy(), "wear headphones");
/// assert!(profile.voice().is_none());
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_builder::Builder,
)]
#[builder(default, setter(into))]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Display name
    #[serde(default)]
    name: String,
    /// Special interest woven into the story
    #[serde(default)]
    interest: String,
    /// Coping strategy the story rehearses
    #[serde(default)]
    strategy: String,
    /// Illustration character
    #[serde(default)]
    avatar: Avatar,
    /// Preferred speech voice; `None` selects the default voice
    #[serde(default, rename = "voiceURI")]
    voice: Option<String>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: String::new(),
            interest: String::new(),
            strategy: "wear headphones".to_string(),
            avatar: Avatar::default(),
            voice: None,
        }
    }
}
