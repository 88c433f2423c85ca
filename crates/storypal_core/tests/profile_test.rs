//! Tests for profile serialization.

use storypal_core::{Avatar, Profile, ProfileBuilder, substitute};

#[test]
fn test_partial_profile_deserializes() {
    let profile: Profile = serde_json::from_str(r#"{"interest":"trains"}"#).unwrap();

    assert!(profile.name().is_empty());
    assert_eq!(profile.interest(), "trains");
    assert!(profile.strategy().is_empty());
    assert_eq!(*profile.avatar(), Avatar::Bear);
    assert_eq!(
        substitute("{name} likes {interest} and can {strategy}.", &profile),
        "friend likes trains and can take a deep breath."
    );
}

#[test]
fn test_stored_field_names() {
    let profile = ProfileBuilder::default()
        .name("Alex")
        .voice(Some("Samantha".to_string()))
        .build()
        .unwrap();

    let value = serde_json::to_value(&profile).unwrap();

    assert_eq!(value["name"], "Alex");
    assert_eq!(value["voiceURI"], "Samantha");
    assert_eq!(value["avatar"], "bear");
}
