//! Integration tests for the full compose path
//!
//! Drives the composer through the same JSON shapes the web endpoint
//! receives, including sloppy history payloads from older UI versions.

use chatbite_core::{ChatTurn, ComposeError, PromptRequest, Role, compose, prompt};
use serde_json::json;

fn history_from(value: serde_json::Value) -> Vec<ChatTurn> {
    serde_json::from_value(value).unwrap()
}

#[test]
fn browser_payload_composes_in_order() {
    let history = history_from(json!([
        {"role": "user", "content": "I have paneer and spinach"},
        {"role": "assistant", "content": "Palak paneer it is! Want it spicy?"},
        {"role": "system", "content": "should be dropped"},
        {"role": "user", "content": ""}
    ]));

    let request = PromptRequest {
        message: "  yes, medium spicy please  ".to_string(),
        meal_type: Some("Dinner".to_string()),
        dietary_preference: Some("Vegetarian".to_string()),
        skill_level: Some("Beginner".to_string()),
        history,
    };

    let messages = compose(&request).unwrap();

    assert_eq!(messages.len(), 4);
    assert_eq!(messages[0].role, Role::User);
    assert!(messages[0].text.contains(prompt::SYSTEM_PROMPT));
    assert!(messages[0].text.contains("Focus on a dinner style dish."));
    assert!(
        messages[0]
            .text
            .contains("Respect this dietary preference: vegetarian.")
    );
    assert!(
        messages[0]
            .text
            .contains("Tailor the instructions to a beginner home cook.")
    );

    assert_eq!(messages[1].role, Role::User);
    assert_eq!(messages[1].text, "I have paneer and spinach");
    assert_eq!(messages[2].role, Role::Model);
    assert_eq!(messages[2].text, "Palak paneer it is! Want it spicy?");

    assert_eq!(messages[3].role, Role::User);
    assert_eq!(messages[3].text, "yes, medium spicy please");
}

#[test]
fn defaults_produce_guidance_and_message_only() {
    let request = PromptRequest {
        message: "leftover rice".to_string(),
        ..Default::default()
    };

    let messages = compose(&request).unwrap();
    assert_eq!(messages.len(), 2);
    assert!(messages[0].text.starts_with("You are ChatBite"));
    assert_eq!(messages[1].text, "leftover rice");
}

#[test]
fn sentinel_hints_leave_guidance_untouched() {
    let base = compose(&PromptRequest {
        message: "leftover rice".to_string(),
        ..Default::default()
    })
    .unwrap();

    let with_sentinels = compose(&PromptRequest {
        message: "leftover rice".to_string(),
        dietary_preference: Some("none".to_string()),
        skill_level: Some("confident".to_string()),
        ..Default::default()
    })
    .unwrap();

    assert_eq!(base, with_sentinels);
}

#[test]
fn whitespace_only_message_is_a_validation_error() {
    let request = PromptRequest {
        message: " \t\n".to_string(),
        history: vec![ChatTurn::new("user", "real content")],
        ..Default::default()
    };

    assert_eq!(compose(&request), Err(ComposeError::EmptyMessage));
}
