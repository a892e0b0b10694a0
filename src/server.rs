//! MCP server: stdio transport, JSON-RPC 2.0, newline-delimited.
//!
//! Exposes the scoring primitives as Model Context Protocol tools so a
//! tutoring agent or a thin UI bridge can call them out of process. Reads
//! one JSON-RPC request per line and writes one response per line.
//!
//! Protocol flow:
//! 1. Client sends `initialize` → server responds with capabilities
//! 2. Client sends `notifications/initialized`
//! 3. Client sends `tools/list` → scoring tool definitions
//! 4. Client sends `tools/call` → tool result
//! 5. Client closes stdin → server exits

use std::io::{BufRead, Read, Write};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::scoring::{Scorer, ScoringConfig};
use crate::tools::ToolRouter;

/// Maximum size of a single JSON-RPC line (1 MiB). Requests carry a few
/// short strings at most.
const MAX_LINE_BYTES: usize = 1024 * 1024;

const PROTOCOL_VERSION: &str = "2025-06-18";

// ---------------------------------------------------------------------------
// JSON-RPC 2.0 types
// ---------------------------------------------------------------------------

/// JSON-RPC 2.0 request.
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub id: Option<serde_json::Value>,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// JSON-RPC 2.0 response.
#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC 2.0 error object.
#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
}

/// Standard JSON-RPC error codes.
pub mod codes {
    pub const PARSE_ERROR: i64 = -32700;
    pub const INVALID_REQUEST: i64 = -32600;
    pub const METHOD_NOT_FOUND: i64 = -32601;
    pub const INVALID_PARAMS: i64 = -32602;
    pub const INTERNAL_ERROR: i64 = -32603;
}

// ---------------------------------------------------------------------------
// MCP protocol types
// ---------------------------------------------------------------------------

/// MCP tool definition for tools/list.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: serde_json::Value,
}

/// MCP content item in a tools/call response.
#[derive(Debug, Serialize)]
pub struct ContentItem {
    #[serde(rename = "type")]
    pub content_type: String,
    pub text: String,
}

/// MCP tools/call result.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCallResult {
    pub content: Vec<ContentItem>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl ToolCallResult {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentItem {
                content_type: "text".to_owned(),
                text: text.into(),
            }],
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            is_error: true,
            ..Self::text(text)
        }
    }
}

#[derive(Debug, Deserialize)]
struct ToolCallParams {
    name: String,
    #[serde(default)]
    arguments: serde_json::Value,
}

// ---------------------------------------------------------------------------
// Server configuration
// ---------------------------------------------------------------------------

/// Configuration for the MCP server.
#[derive(Debug, Clone, Default)]
pub struct McpServerConfig {
    /// Scoring knobs applied to every `score` call.
    pub scoring: ScoringConfig,
}

// ---------------------------------------------------------------------------
// Server main loop
// ---------------------------------------------------------------------------

/// Run the MCP server on stdin/stdout until stdin closes.
///
/// # Errors
///
/// Returns an error if stdin/stdout I/O fails fatally.
pub fn run_mcp_server(config: McpServerConfig) -> Result<()> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    serve(config, stdin.lock(), stdout.lock())
}

/// Serve requests read from `reader`, writing responses to `writer`.
///
/// # Errors
///
/// Returns an error if reading or writing fails.
pub fn serve(config: McpServerConfig, mut reader: impl BufRead, mut writer: impl Write) -> Result<()> {
    info!(scoring = ?config.scoring, "speak-score MCP server starting");

    let router = ToolRouter::new(Scorer::new(config.scoring));

    loop {
        let line = match read_line_limited(&mut reader)? {
            Line::Eof => {
                info!("input closed, shutting down");
                break;
            }
            Line::TooLong(bytes) => {
                warn!(bytes, "request line too long");
                let resp = error_response(
                    None,
                    codes::PARSE_ERROR,
                    &format!("line exceeds maximum size ({MAX_LINE_BYTES} bytes)"),
                );
                write_response(&mut writer, &resp)?;
                continue;
            }
            Line::Text(text) => text,
        };

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        debug!(raw = trimmed, "received request");

        let request: JsonRpcRequest = match serde_json::from_str(trimmed) {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "invalid JSON-RPC request");
                let resp = error_response(None, codes::PARSE_ERROR, &format!("parse error: {e}"));
                write_response(&mut writer, &resp)?;
                continue;
            }
        };

        if request.jsonrpc != "2.0" {
            warn!(version = request.jsonrpc, "invalid JSON-RPC version");
            // Notifications never get a response, not even an error.
            if request.id.is_none() {
                continue;
            }
            let resp = error_response(
                request.id.clone(),
                codes::INVALID_REQUEST,
                &format!("invalid request: jsonrpc version must be \"2.0\", got \"{}\"", request.jsonrpc),
            );
            write_response(&mut writer, &resp)?;
            continue;
        }

        let response = dispatch(&router, &request);

        // Notifications never get a response.
        if request.id.is_none() {
            debug!(method = request.method, "notification handled");
            continue;
        }

        if let Some(resp) = response {
            write_response(&mut writer, &resp)?;
        }
    }

    info!("speak-score MCP server stopped");
    Ok(())
}

/// Dispatch a JSON-RPC request to the appropriate handler.
pub fn dispatch(router: &ToolRouter, req: &JsonRpcRequest) -> Option<JsonRpcResponse> {
    match req.method.as_str() {
        "initialize" => Some(handle_initialize(req)),
        "notifications/initialized" => {
            info!("client initialized");
            None
        }
        "tools/list" => Some(success_response(
            req.id.clone(),
            &serde_json::json!({ "tools": router.list_tools() }),
        )),
        "tools/call" => Some(handle_tools_call(router, req)),
        "ping" => Some(success_response(req.id.clone(), &serde_json::json!({}))),
        _ => {
            warn!(method = req.method, "unknown method");
            Some(error_response(
                req.id.clone(),
                codes::METHOD_NOT_FOUND,
                &format!("method not found: {}", req.method),
            ))
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

fn handle_initialize(req: &JsonRpcRequest) -> JsonRpcResponse {
    let result = serde_json::json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": { "tools": { "listChanged": false } },
        "serverInfo": {
            "name": "speak-score",
            "version": env!("CARGO_PKG_VERSION"),
        },
    });
    success_response(req.id.clone(), &result)
}

fn handle_tools_call(router: &ToolRouter, req: &JsonRpcRequest) -> JsonRpcResponse {
    let params: ToolCallParams = match serde_json::from_value(req.params.clone()) {
        Ok(p) => p,
        Err(e) => {
            return error_response(
                req.id.clone(),
                codes::INVALID_PARAMS,
                &format!("invalid tools/call params: {e}"),
            );
        }
    };

    match router.call_tool(&params.name, params.arguments) {
        Ok(result) => success_response(req.id.clone(), &result),
        Err(e) => {
            error!(tool = params.name, error = %e, "tool call failed");
            success_response(req.id.clone(), &ToolCallResult::error(format!("Error: {e:#}")))
        }
    }
}

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

fn success_response(id: Option<serde_json::Value>, result: &impl Serialize) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(v) => JsonRpcResponse {
            jsonrpc: "2.0".to_owned(),
            id,
            result: Some(v),
            error: None,
        },
        Err(e) => {
            error!(error = %e, "failed to serialize success response");
            error_response(
                id,
                codes::INTERNAL_ERROR,
                &format!("internal error: failed to serialize result: {e}"),
            )
        }
    }
}

fn error_response(id: Option<serde_json::Value>, code: i64, message: &str) -> JsonRpcResponse {
    JsonRpcResponse {
        jsonrpc: "2.0".to_owned(),
        id,
        result: None,
        error: Some(JsonRpcError {
            code,
            message: message.to_owned(),
        }),
    }
}

/// Write a JSON-RPC response as a single line.
fn write_response(out: &mut impl Write, resp: &JsonRpcResponse) -> Result<()> {
    let json = serde_json::to_string(resp).context("failed to serialize response")?;
    debug!(response = json, "sending response");
    out.write_all(json.as_bytes()).context("failed to write response")?;
    out.write_all(b"\n").context("failed to write newline")?;
    out.flush().context("failed to flush output")?;
    Ok(())
}

/// One framed input line.
enum Line {
    Eof,
    /// Exceeded [`MAX_LINE_BYTES`]; carries the bytes discarded.
    TooLong(usize),
    Text(String),
}

/// Read one line of at most [`MAX_LINE_BYTES`].
///
/// An oversized line is consumed through its newline. Invalid UTF-8 is
/// replaced with U+FFFD instead of ending the session.
fn read_line_limited(reader: &mut impl BufRead) -> Result<Line> {
    let limit = MAX_LINE_BYTES as u64 + 1;
    let mut bytes = Vec::new();
    let read = reader
        .by_ref()
        .take(limit)
        .read_until(b'\n', &mut bytes)
        .context("failed to read request line")?;

    if read == 0 {
        return Ok(Line::Eof);
    }
    if read > MAX_LINE_BYTES && bytes.last() != Some(&b'\n') {
        let skipped = reader
            .skip_until(b'\n')
            .context("failed to discard oversized line")?;
        return Ok(Line::TooLong(read + skipped));
    }
    Ok(Line::Text(String::from_utf8_lossy(&bytes).into_owned()))
}
