//! Language tool — detect the target's language and its speech locales.

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::language::detect_language;
use crate::server::{ToolCallResult, ToolDefinition};

#[derive(Debug, Deserialize)]
pub struct DetectLanguageParams {
    pub text: String,
}

pub fn tool_definition() -> ToolDefinition {
    ToolDefinition {
        name: "detect_language".to_owned(),
        description: "Detect the language of a vocabulary word from its script and return the \
            recognizer and synthesis locales to use."
            .to_owned(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "text": { "type": "string", "description": "Target word or phrase" }
            },
            "required": ["text"]
        }),
    }
}

/// # Errors
///
/// Returns an error if the arguments are malformed.
pub fn execute(arguments: serde_json::Value) -> Result<ToolCallResult> {
    let params: DetectLanguageParams =
        serde_json::from_value(arguments).context("invalid detect_language parameters")?;

    let language = detect_language(&params.text);
    let body = serde_json::json!({
        "language": language,
        "label": language.label(),
        "ttsLocale": language.tts_locale(),
        "sttLocale": language.stt_locale(),
    });
    Ok(ToolCallResult::text(body.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_russian() {
        let result = execute(serde_json::json!({ "text": "спасибо" })).expect("detect");
        let json: serde_json::Value = serde_json::from_str(&result.content[0].text).expect("json");
        assert_eq!(json["language"], "russian");
        assert_eq!(json["sttLocale"], "ru-RU");
    }
}
