//! Text primitive tools: `normalize` and `edit_distance`.

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::scoring::{levenshtein, normalize};
use crate::server::{ToolCallResult, ToolDefinition};

#[derive(Debug, Deserialize)]
pub struct NormalizeParams {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct EditDistanceParams {
    pub a: String,
    pub b: String,
    /// Normalize both strings before comparing (default: false).
    #[serde(default)]
    pub normalized: bool,
}

pub fn normalize_definition() -> ToolDefinition {
    ToolDefinition {
        name: "normalize".to_owned(),
        description: "Canonicalize text for comparison: lower-case, fold apostrophes, strip \
            punctuation, collapse whitespace."
            .to_owned(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "text": { "type": "string", "description": "Text to normalize" }
            },
            "required": ["text"]
        }),
    }
}

pub fn edit_distance_definition() -> ToolDefinition {
    ToolDefinition {
        name: "edit_distance".to_owned(),
        description: "Levenshtein distance (unit-cost insert/delete/substitute) between two strings."
            .to_owned(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "a": { "type": "string" },
                "b": { "type": "string" },
                "normalized": {
                    "type": "boolean",
                    "description": "Normalize both strings first (default: false)",
                    "default": false
                }
            },
            "required": ["a", "b"]
        }),
    }
}

/// # Errors
///
/// Returns an error if the arguments are malformed.
pub fn execute_normalize(arguments: serde_json::Value) -> Result<ToolCallResult> {
    let params: NormalizeParams =
        serde_json::from_value(arguments).context("invalid normalize parameters")?;
    Ok(ToolCallResult::text(normalize(&params.text)))
}

/// # Errors
///
/// Returns an error if the arguments are malformed.
pub fn execute_edit_distance(arguments: serde_json::Value) -> Result<ToolCallResult> {
    let params: EditDistanceParams =
        serde_json::from_value(arguments).context("invalid edit_distance parameters")?;

    let distance = if params.normalized {
        levenshtein::distance(&normalize(&params.a), &normalize(&params.b))
    } else {
        levenshtein::distance(&params.a, &params.b)
    };
    Ok(ToolCallResult::text(distance.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_tool() {
        let result = execute_normalize(serde_json::json!({ "text": "  Don\u{2019}t STOP!! " }))
            .expect("normalize");
        assert_eq!(result.content[0].text, "don't stop");
    }

    #[test]
    fn test_edit_distance_tool() {
        let result = execute_edit_distance(serde_json::json!({ "a": "kitten", "b": "sitting" }))
            .expect("distance");
        assert_eq!(result.content[0].text, "3");

        let raw = execute_edit_distance(serde_json::json!({ "a": "Cat!", "b": "cat" }))
            .expect("distance");
        assert_eq!(raw.content[0].text, "2");

        let normalized =
            execute_edit_distance(serde_json::json!({ "a": "Cat!", "b": "cat", "normalized": true }))
                .expect("distance");
        assert_eq!(normalized.content[0].text, "0");
    }
}
