//! Score tool — rate one spoken attempt against its target.
//!
//! Returns the score, tier, auto-advance flag, feedback message, meter band
//! and a character diff as a JSON document in the text content.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::feedback::{Feedback, ScoreBand};
use crate::scoring::diff::{DiffSegment, char_diff};
use crate::scoring::{ComparisonInput, ScoreResult, Scorer};
use crate::server::{ToolCallResult, ToolDefinition};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreParams {
    /// Recognizer transcript; empty if nothing was understood.
    pub spoken: String,
    /// Expected word or phrase.
    pub target: String,
    /// Recognizer confidence in [0, 1].
    #[serde(default)]
    pub confidence: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ScoreReport {
    #[serde(flatten)]
    result: ScoreResult,
    feedback: String,
    band: ScoreBand,
    diff: Vec<DiffSegment>,
}

pub fn tool_definition() -> ToolDefinition {
    ToolDefinition {
        name: "score".to_owned(),
        description: "Score a spoken attempt against the target word or phrase. Returns a 0-100 \
            similarity, a feedback tier, whether to auto-advance, and a character diff."
            .to_owned(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "spoken": {
                    "type": "string",
                    "description": "Best transcript from the speech recognizer (empty if nothing was understood)"
                },
                "target": {
                    "type": "string",
                    "description": "The word or phrase the learner was asked to say"
                },
                "confidence": {
                    "type": "number",
                    "minimum": 0,
                    "maximum": 1,
                    "description": "Recognizer confidence for the transcript, if available"
                }
            },
            "required": ["spoken", "target"]
        }),
    }
}

/// Execute the score tool.
///
/// # Errors
///
/// Returns an error if the arguments are malformed.
pub fn execute(scorer: &Scorer, arguments: serde_json::Value) -> Result<ToolCallResult> {
    let params: ScoreParams =
        serde_json::from_value(arguments).context("invalid score parameters")?;

    let diff = char_diff(&params.spoken, &params.target);
    let input = ComparisonInput {
        spoken: params.spoken,
        target: params.target,
        recognizer_confidence: params.confidence,
    };
    let result = scorer.score(&input);

    let report = ScoreReport {
        result,
        feedback: Feedback::for_tier(result.feedback_tier).to_string(),
        band: ScoreBand::from_score(result.similarity),
        diff,
    };
    let text = serde_json::to_string_pretty(&report).context("failed to serialize score report")?;
    Ok(ToolCallResult::text(text))
}
