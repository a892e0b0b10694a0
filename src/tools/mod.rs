//! Tool router — registers and dispatches MCP tool calls.
//!
//! Each tool module provides a `tool_definition()` with its JSON Schema and
//! an `execute()` taking the raw JSON arguments. Invalid arguments surface
//! as `Err`, which the server turns into an `isError` result.

pub mod language;
pub mod score;
pub mod text;

use anyhow::Result;
use tracing::debug;

use crate::scoring::Scorer;
use crate::server::{ToolCallResult, ToolDefinition};

/// Tool router that dispatches MCP tool calls to implementations.
#[derive(Debug, Clone, Default)]
pub struct ToolRouter {
    scorer: Scorer,
}

impl ToolRouter {
    pub fn new(scorer: Scorer) -> Self {
        Self { scorer }
    }

    /// List all available tools with their JSON Schema definitions.
    pub fn list_tools(&self) -> Vec<ToolDefinition> {
        vec![
            score::tool_definition(),
            text::normalize_definition(),
            text::edit_distance_definition(),
            language::tool_definition(),
        ]
    }

    /// Call a tool by name with the given JSON arguments.
    ///
    /// Unknown tool names produce an error result rather than `Err`.
    ///
    /// # Errors
    ///
    /// Returns an error if the arguments do not match the tool's schema.
    pub fn call_tool(&self, name: &str, arguments: serde_json::Value) -> Result<ToolCallResult> {
        debug!(tool = name, "dispatching tool call");

        match name {
            "score" => score::execute(&self.scorer, arguments),
            "normalize" => text::execute_normalize(arguments),
            "edit_distance" => text::execute_edit_distance(arguments),
            "detect_language" => language::execute(arguments),
            _ => Ok(ToolCallResult::error(format!("Unknown tool: {name}"))),
        }
    }
}
