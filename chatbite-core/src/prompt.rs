//! Prompt composition
//!
//! Builds the ordered message sequence sent to the completion provider:
//! guidance first, then the caller's history in original order, then the new
//! user message last. Pure functions of their inputs, no network access.

use crate::error::ComposeError;
use crate::models::{ChatTurn, ComposedMessage, Role};

/// Persona and response-format instruction sent ahead of every conversation
pub const SYSTEM_PROMPT: &str = "You are ChatBite, an enthusiastic Indian home chef who specializes in authentic \
Indian cuisine from various regions including North Indian, South Indian, Bengali, \
Gujarati, Maharashtrian, and more. You craft approachable, step-by-step Indian recipes \
using only the ingredients provided by the guest. Prioritize traditional Indian cooking \
techniques, spices, and flavor profiles. Always acknowledge preferences the user selects \
and stay strictly focused on cooking.\
\n\nRequired response structure:\
\n1. Catchy Indian recipe title (use Hindi/regional names when appropriate).\
\n2. Quick overview mentioning the regional cuisine, serving size, and estimated time.\
\n3. Ingredient list with quantities (OK to estimate), highlighting Indian spices and herbs.\
\n4. Numbered cooking directions in short, clear steps using traditional Indian cooking methods \
(tadka, bhunao, dum, etc. when relevant).\
\n5. Helpful pro tip about spice balance, regional variations, or substitution ideas with Indian alternatives.\
\n6. Optional serving suggestion with Indian accompaniments (roti, rice, raita, pickle, papad, etc.).\
\n\nIf the pantry looks sparse, suggest smart additions using common Indian pantry staples \
(cumin, coriander, turmeric, garam masala, curry leaves, etc.) without leaving the original \
ingredients unused. Keep the tone warm, culturally authentic, and concise.";

/// Closing sentence appended after all directives
const STEER_BACK: &str = "Politely steer back to cooking if the user strays into other topics.";

/// Dietary preference value meaning "no restriction"
const DIETARY_SENTINEL: &str = "none";

/// Skill level treated as the baseline, producing no directive
const SKILL_SENTINEL: &str = "confident";

/// An optional guidance field, made explicit.
///
/// A field is active only when the caller supplied a non-empty value that is
/// not the field's "disabled" sentinel. Active values are lowercased once at
/// construction so directive sentences read uniformly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    Active(String),
    Inactive,
}

impl Directive {
    /// Active for any non-empty value.
    pub fn when_present(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if !v.is_empty() => Directive::Active(v.to_lowercase()),
            _ => Directive::Inactive,
        }
    }

    /// Active for any non-empty value except `sentinel` (case-insensitive).
    pub fn with_sentinel(value: Option<&str>, sentinel: &str) -> Self {
        match Self::when_present(value) {
            Directive::Active(v) if v == sentinel => Directive::Inactive,
            other => other,
        }
    }

    pub fn active(&self) -> Option<&str> {
        match self {
            Directive::Active(v) => Some(v),
            Directive::Inactive => None,
        }
    }
}

/// Everything the composer needs for one request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PromptRequest {
    pub message: String,
    pub meal_type: Option<String>,
    pub dietary_preference: Option<String>,
    pub skill_level: Option<String>,
    pub history: Vec<ChatTurn>,
}

/// Build the guidance text: persona, one sentence per active directive in
/// fixed order, then the steer-back instruction.
fn build_guidance(meal: &Directive, dietary: &Directive, skill: &Directive) -> String {
    let mut parts: Vec<String> = vec![SYSTEM_PROMPT.to_string()];
    if let Some(meal) = meal.active() {
        parts.push(format!("Focus on a {meal} style dish."));
    }
    if let Some(dietary) = dietary.active() {
        parts.push(format!("Respect this dietary preference: {dietary}."));
    }
    if let Some(skill) = skill.active() {
        parts.push(format!("Tailor the instructions to a {skill} home cook."));
    }
    parts.push(STEER_BACK.to_string());
    parts.join(" ")
}

/// Map one history turn to a provider message.
///
/// Turns with an unrecognized role or empty trimmed content are dropped.
fn map_turn(turn: &ChatTurn) -> Option<ComposedMessage> {
    let content = turn.content.trim();
    if content.is_empty() {
        return None;
    }
    match turn.role.as_str() {
        "user" => Some(ComposedMessage::user(content)),
        "assistant" => Some(ComposedMessage::model(content)),
        _ => None,
    }
}

/// Compose the full provider-facing message sequence for one request.
///
/// The guidance goes first as a user-role message: Gemini has no portable
/// system role, so the persona rides along as the opening turn. Fails only
/// when the user message is empty after trimming.
pub fn compose(request: &PromptRequest) -> Result<Vec<ComposedMessage>, ComposeError> {
    let message = request.message.trim();
    if message.is_empty() {
        return Err(ComposeError::EmptyMessage);
    }

    let meal = Directive::when_present(request.meal_type.as_deref());
    let dietary = Directive::with_sentinel(request.dietary_preference.as_deref(), DIETARY_SENTINEL);
    let skill = Directive::with_sentinel(request.skill_level.as_deref(), SKILL_SENTINEL);

    let mut messages = Vec::with_capacity(request.history.len() + 2);
    messages.push(ComposedMessage::user(build_guidance(&meal, &dietary, &skill)));
    messages.extend(request.history.iter().filter_map(map_turn));
    messages.push(ComposedMessage::user(message));

    Ok(messages)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(message: &str) -> PromptRequest {
        PromptRequest {
            message: message.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn empty_message_is_rejected() {
        assert_eq!(compose(&request("")), Err(ComposeError::EmptyMessage));
        assert_eq!(compose(&request("   \n ")), Err(ComposeError::EmptyMessage));
    }

    #[test]
    fn guidance_is_first_and_user_message_is_last() {
        let mut req = request("paneer, peas, rice");
        req.history = vec![
            ChatTurn::new("user", "what can I cook?"),
            ChatTurn::new("assistant", "Tell me your pantry!"),
        ];

        let messages = compose(&req).unwrap();
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0].role, Role::User);
        assert!(messages[0].text.starts_with("You are ChatBite"));
        assert!(messages[0].text.ends_with(STEER_BACK));
        assert_eq!(messages[1], ComposedMessage::user("what can I cook?"));
        assert_eq!(messages[2], ComposedMessage::model("Tell me your pantry!"));
        assert_eq!(messages[3], ComposedMessage::user("paneer, peas, rice"));
    }

    #[test]
    fn unrecognized_roles_and_blank_turns_are_dropped() {
        let mut req = request("dal");
        req.history = vec![
            ChatTurn::new("system", "x"),
            ChatTurn::new("user", "   "),
            ChatTurn::new("tool", "y"),
        ];

        let messages = compose(&req).unwrap();
        // guidance + new user message only
        assert_eq!(messages.len(), 2);
    }

    #[test]
    fn history_content_is_trimmed() {
        let mut req = request("dal");
        req.history = vec![ChatTurn::new("assistant", "  Try a tadka.  ")];

        let messages = compose(&req).unwrap();
        assert_eq!(messages[1], ComposedMessage::model("Try a tadka."));
    }

    #[test]
    fn directives_appear_in_fixed_order_and_lowercased() {
        let req = PromptRequest {
            message: "okra".to_string(),
            meal_type: Some("Dinner".to_string()),
            dietary_preference: Some("Vegan".to_string()),
            skill_level: Some("Beginner".to_string()),
            history: vec![],
        };

        let guidance = &compose(&req).unwrap()[0].text;
        let meal = guidance.find("Focus on a dinner style dish.").unwrap();
        let dietary = guidance
            .find("Respect this dietary preference: vegan.")
            .unwrap();
        let skill = guidance
            .find("Tailor the instructions to a beginner home cook.")
            .unwrap();
        let steer = guidance.find(STEER_BACK).unwrap();
        assert!(meal < dietary && dietary < skill && skill < steer);
    }

    #[test]
    fn sentinel_values_produce_no_directive() {
        let req = PromptRequest {
            message: "okra".to_string(),
            meal_type: None,
            dietary_preference: Some("None".to_string()),
            skill_level: Some("Confident".to_string()),
            history: vec![],
        };

        let guidance = &compose(&req).unwrap()[0].text;
        assert!(!guidance.contains("dietary preference"));
        assert!(!guidance.contains("home cook."));
        assert!(guidance.contains(STEER_BACK));
    }

    #[test]
    fn directive_constructors() {
        assert_eq!(Directive::when_present(None), Directive::Inactive);
        assert_eq!(Directive::when_present(Some("  ")), Directive::Inactive);
        assert_eq!(
            Directive::when_present(Some(" Lunch ")),
            Directive::Active("lunch".to_string())
        );
        assert_eq!(
            Directive::with_sentinel(Some("NONE"), "none"),
            Directive::Inactive
        );
        assert_eq!(
            Directive::with_sentinel(Some("jain"), "none"),
            Directive::Active("jain".to_string())
        );
    }

    #[test]
    fn compose_is_idempotent() {
        let req = PromptRequest {
            message: "chickpeas and spinach".to_string(),
            meal_type: Some("lunch".to_string()),
            dietary_preference: Some("vegetarian".to_string()),
            skill_level: Some("beginner".to_string()),
            history: vec![ChatTurn::new("user", "hello")],
        };

        assert_eq!(compose(&req).unwrap(), compose(&req).unwrap());
    }
}
