//! Placeholder substitution.
//!
//! Story text carries three tokens that are filled from a [`Profile`]:
//! `{name}`, `{interest}` and `{strategy}`. Substitution is total and
//! idempotent: values are stripped of braces before use, and replacement
//! repeats until no token is left, so the output never contains a token.

use crate::Profile;

/// Token replaced with the profile name.
pub const NAME_TOKEN: &str = "{name}";
/// Token replaced with the profile interest.
pub const INTEREST_TOKEN: &str = "{interest}";
/// Token replaced with the profile coping strategy.
pub const STRATEGY_TOKEN: &str = "{strategy}";

/// Used when the profile has no name.
pub const DEFAULT_NAME: &str = "friend";
/// Used when the profile has no interest.
pub const DEFAULT_INTEREST: &str = "things you like";
/// Used when the profile has no strategy.
pub const DEFAULT_STRATEGY: &str = "take a deep breath";

const ILLUSTRATION_NAME: &str = "the main character";
const ILLUSTRATION_STRATEGY: &str = "calming down";

struct TokenValues {
    name: String,
    interest: String,
    strategy: String,
}

/// Replace every personalization token in `template` with profile values.
///
/// # Examples
///
/// ```
/// use storypal_core::{ProfileBuilder, substitute};
///
/// let profile = ProfileBuilder::default()
///     .name("Alex")
///     .interest("trains")
///     .build()
///     .unwrap();
///
/// let text = substitute("{name} loves {interest}!", &profile);
/// assert_eq!(text, "Alex loves trains!");
///
/// let anonymous = substitute("Hi {name}", &Default::default());
/// assert_eq!(anonymous, "Hi friend");
/// ```
pub fn substitute(template: &str, profile: &Profile) -> String {
    let values = TokenValues {
        name: clean(profile.name(), DEFAULT_NAME),
        interest: clean(profile.interest(), DEFAULT_INTEREST),
        strategy: clean(profile.strategy(), DEFAULT_STRATEGY),
    };
    fill(template, &values)
}

/// Substitution for illustration prompts.
///
/// The personal name never reaches the image provider; the character is
/// described generically and the strategy as "calming down".
pub fn substitute_for_illustration(template: &str, profile: &Profile) -> String {
    let values = TokenValues {
        name: ILLUSTRATION_NAME.to_string(),
        interest: clean(profile.interest(), DEFAULT_INTEREST),
        strategy: ILLUSTRATION_STRATEGY.to_string(),
    };
    fill(template, &values)
}

/// Whether `text` still contains a personalization token.
pub fn contains_token(text: &str) -> bool {
    [NAME_TOKEN, INTEREST_TOKEN, STRATEGY_TOKEN]
        .iter()
        .any(|token| text.contains(token))
}

// Each pass removes at least one brace pair while a token remains, so the
// loop ends.
fn fill(template: &str, values: &TokenValues) -> String {
    let mut output = template.to_string();
    while contains_token(&output) {
        output = output
            .replace(NAME_TOKEN, &values.name)
            .replace(INTEREST_TOKEN, &values.interest)
            .replace(STRATEGY_TOKEN, &values.strategy);
    }
    output
}

fn clean(value: &str, fallback: &str) -> String {
    let stripped: String = value.chars().filter(|c| !matches!(c, '{' | '}')).collect();
    let trimmed = stripped.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}
