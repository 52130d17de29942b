//! Turning model text into quiz items.
//!
//! Models are told to answer with a bare JSON array, but many still wrap it
//! in a markdown code fence. [`strip_code_fence`] removes exactly that
//! wrapper; [`parse_quiz_items`] then requires a non-empty JSON array whose
//! every element is a well-formed [`QuizItem`]. Nothing else is repaired.

use mathgenie_core::QuizItem;
use serde_json::Value;

use crate::error::LlmError;

const FENCE: &str = "```";

/// Remove a surrounding markdown code fence and whitespace.
///
/// Handles a leading fence with or without a `json` language tag
/// (any case) and a trailing fence. Text without fences is only trimmed.
#[must_use]
pub fn strip_code_fence(text: &str) -> &str {
    let mut s = text.trim();

    if let Some(rest) = s.strip_prefix(FENCE) {
        s = match rest.get(..4) {
            Some(tag) if tag.eq_ignore_ascii_case("json") => &rest[4..],
            _ => rest,
        };
    }
    if let Some(rest) = s.strip_suffix(FENCE) {
        s = rest;
    }

    s.trim()
}

/// Parse model text into quiz items.
///
/// # Errors
/// Returns [`LlmError::MalformedResponse`] if the fence-stripped text is not
/// JSON, is not an array, is an empty array, or holds an element that is
/// not a quiz item.
pub fn parse_quiz_items(text: &str) -> Result<Vec<QuizItem>, LlmError> {
    let cleaned = strip_code_fence(text);

    let value: Value = serde_json::from_str(cleaned)
        .map_err(|e| LlmError::MalformedResponse(format!("invalid JSON: {e}")))?;

    let Value::Array(elements) = value else {
        return Err(LlmError::MalformedResponse(format!(
            "expected a JSON array, got {}",
            json_kind(&value)
        )));
    };

    if elements.is_empty() {
        return Err(LlmError::MalformedResponse("the array holds no quiz items".into()));
    }

    elements
        .into_iter()
        .enumerate()
        .map(|(index, element)| {
            serde_json::from_value::<QuizItem>(element)
                .map_err(|e| LlmError::MalformedResponse(format!("item {index}: {e}")))
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
