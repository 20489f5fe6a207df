use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::domain::{common::entities::app_errors::CoreError, menu::entities::Dish};

static CODE_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```[A-Za-z]*\s*(\{.*?\})\s*```").expect("code fence pattern is valid")
});

/// Older prompts named the translated field `japanese_name`.
const LEGACY_TRANSLATED_NAME: &str = "japanese_name";

/// Normalizes a provider's text answer into dish records.
///
/// Dishes that fail conversion are skipped with a warning. An answer that
/// yields no dish at all is an error.
pub fn parse_menu_response(raw: &str) -> Result<Vec<Dish>, CoreError> {
    let json_text = extract_json(raw);
    if json_text.is_empty() {
        return Err(CoreError::InvalidLlmResponse(
            "Empty response from provider".to_string(),
        ));
    }

    let parsed: Value = serde_json::from_str(json_text).map_err(|e| {
        tracing::error!("Failed to parse LLM response: {}", e);
        CoreError::InvalidLlmResponse(format!("Failed to parse JSON response: {}", e))
    })?;

    let object = parsed.as_object().ok_or_else(|| {
        CoreError::InvalidLlmResponse("Response must be a JSON object".to_string())
    })?;

    if object.get("is_menu").and_then(Value::as_bool) == Some(false) {
        return Err(CoreError::InvalidMenuImage(
            "The image does not appear to be a restaurant menu".to_string(),
        ));
    }

    let raw_dishes = object
        .get("dishes")
        .ok_or_else(|| {
            CoreError::InvalidLlmResponse("Response must contain 'dishes' key".to_string())
        })?
        .as_array()
        .ok_or_else(|| CoreError::InvalidLlmResponse("'dishes' must be an array".to_string()))?;

    let dishes: Vec<Dish> = raw_dishes
        .iter()
        .enumerate()
        .filter_map(|(index, value)| match to_dish(value) {
            Ok(dish) if dish.is_valid() => Some(dish),
            Ok(_) => {
                tracing::warn!(index, "Skipping dish with empty original_name");
                None
            }
            Err(e) => {
                tracing::warn!(index, error = %e, "Skipping dish that failed to parse");
                None
            }
        })
        .collect();

    if dishes.is_empty() {
        return Err(CoreError::InvalidLlmResponse(
            "No valid dishes found in response".to_string(),
        ));
    }

    Ok(dishes)
}

fn to_dish(value: &Value) -> Result<Dish, serde_json::Error> {
    let mut value = value.clone();
    if let Some(fields) = value.as_object_mut() {
        if let Some(legacy) = fields.remove(LEGACY_TRANSLATED_NAME) {
            fields.entry("translated_name").or_insert(legacy);
        }
    }
    serde_json::from_value(value)
}

fn extract_json(raw: &str) -> &str {
    let trimmed = raw.trim();

    if let Some(inner) = CODE_FENCE.captures(trimmed).and_then(|c| c.get(1)) {
        return inner.as_str();
    }

    if trimmed.starts_with('{') {
        return trimmed;
    }

    // Prose around the object: keep the outermost braces.
    match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(start), Some(end)) if start < end => &trimmed[start..=end],
        _ => trimmed,
    }
}
