//! MCP protocol integration tests.
//!
//! Drives the JSON-RPC 2.0 server through in-memory pipes and checks the
//! tool router directly.

use serde_json::json;
use speak_score::server::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, McpServerConfig, serve};
use speak_score::tools::ToolRouter;

/// Feed `lines` to the server and collect the response lines as JSON.
fn run(lines: &[serde_json::Value]) -> Vec<serde_json::Value> {
    let mut input = String::new();
    for line in lines {
        input.push_str(&line.to_string());
        input.push('\n');
    }
    let mut output = Vec::new();
    serve(McpServerConfig::default(), input.as_bytes(), &mut output).expect("serve");

    String::from_utf8(output)
        .expect("utf-8 output")
        .lines()
        .map(|l| serde_json::from_str(l).expect("response is JSON"))
        .collect()
}

#[test]
fn test_json_rpc_request_parsing() {
    let req: JsonRpcRequest = serde_json::from_value(json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "initialize",
        "params": { "protocolVersion": "2025-06-18", "capabilities": {} }
    }))
    .expect("should parse initialize request");

    assert_eq!(req.method, "initialize");
    assert_eq!(req.id, Some(json!(1)));
}

#[test]
fn test_json_rpc_response_skips_empty_fields() {
    let resp = JsonRpcResponse {
        jsonrpc: "2.0".to_owned(),
        id: Some(json!(2)),
        result: None,
        error: Some(JsonRpcError {
            code: -32601,
            message: "method not found".to_owned(),
        }),
    };

    let json_str = serde_json::to_string(&resp).expect("should serialize");
    assert!(json_str.contains("-32601"));
    assert!(!json_str.contains("result"));
}

#[test]
fn test_initialize_and_list() {
    let responses = run(&[
        json!({ "jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {} }),
        json!({ "jsonrpc": "2.0", "method": "notifications/initialized" }),
        json!({ "jsonrpc": "2.0", "id": 2, "method": "tools/list" }),
    ]);

    // The notification produces no response.
    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0]["result"]["serverInfo"]["name"], "speak-score");
    assert_eq!(responses[0]["result"]["protocolVersion"], "2025-06-18");

    let tools = responses[1]["result"]["tools"].as_array().expect("tools array");
    let names: Vec<&str> = tools.iter().filter_map(|t| t["name"].as_str()).collect();
    assert_eq!(names, ["score", "normalize", "edit_distance", "detect_language"]);
}

#[test]
fn test_tools_call_score() {
    let responses = run(&[json!({
        "jsonrpc": "2.0",
        "id": 7,
        "method": "tools/call",
        "params": {
            "name": "score",
            "arguments": { "spoken": "I like apples", "target": "I like apples", "confidence": 0.92 }
        }
    })]);

    assert_eq!(responses[0]["id"], 7);
    let text = responses[0]["result"]["content"][0]["text"].as_str().expect("text");
    let report: serde_json::Value = serde_json::from_str(text).expect("report");
    assert_eq!(report["similarity"], 100);
    assert_eq!(report["feedbackTier"], "perfect");
    assert_eq!(report["shouldAutoAdvance"], true);
}

#[test]
fn test_protocol_errors() {
    let mut input = String::from("{not json\n");
    input.push_str(&json!({ "jsonrpc": "1.0", "id": 1, "method": "ping" }).to_string());
    input.push('\n');
    input.push_str(&json!({ "jsonrpc": "2.0", "id": 2, "method": "bogus" }).to_string());
    input.push('\n');
    input.push_str(&json!({ "jsonrpc": "2.0", "id": 3, "method": "tools/call", "params": {} }).to_string());
    input.push('\n');

    let mut output = Vec::new();
    serve(McpServerConfig::default(), input.as_bytes(), &mut output).expect("serve");
    let responses: Vec<serde_json::Value> = String::from_utf8(output)
        .expect("utf-8")
        .lines()
        .map(|l| serde_json::from_str(l).expect("json"))
        .collect();

    let codes: Vec<i64> = responses
        .iter()
        .filter_map(|r| r["error"]["code"].as_i64())
        .collect();
    assert_eq!(codes, [-32700, -32600, -32601, -32602]);
}

#[test]
fn test_wrong_version_notification_is_silent() {
    let responses = run(&[
        json!({ "jsonrpc": "1.0", "method": "ping" }),
        json!({ "jsonrpc": "1.0", "method": "notifications/initialized" }),
        json!({ "jsonrpc": "2.0", "id": 5, "method": "ping" }),
    ]);

    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0]["id"], 5);
    assert!(responses[0]["error"].is_null());
}

#[test]
fn test_oversized_line_is_rejected_and_skipped() {
    let mut input = "x".repeat(2 * 1024 * 1024);
    input.push('\n');
    input.push_str(&json!({ "jsonrpc": "2.0", "id": 9, "method": "ping" }).to_string());
    input.push('\n');

    let mut output = Vec::new();
    serve(McpServerConfig::default(), input.as_bytes(), &mut output).expect("serve");
    let responses: Vec<serde_json::Value> = String::from_utf8(output)
        .expect("utf-8")
        .lines()
        .map(|l| serde_json::from_str(l).expect("json"))
        .collect();

    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0]["error"]["code"], -32700);
    assert_eq!(responses[1]["id"], 9);
}

#[test]
fn test_tool_call_unknown() {
    let router = ToolRouter::default();
    let result = router
        .call_tool("nonexistent_tool", json!({}))
        .expect("should not error");

    assert!(result.is_error);
    assert!(result.content[0].text.contains("Unknown tool"));
}

#[test]
fn test_tool_call_bad_arguments_become_error_result() {
    let responses = run(&[json!({
        "jsonrpc": "2.0",
        "id": 4,
        "method": "tools/call",
        "params": { "name": "normalize", "arguments": { "txt": "oops" } }
    })]);

    assert_eq!(responses[0]["result"]["isError"], true);
    let text = responses[0]["result"]["content"][0]["text"].as_str().expect("text");
    assert!(text.contains("invalid normalize parameters"));
}

#[test]
fn test_tool_definitions_complete() {
    let router = ToolRouter::default();
    for tool in router.list_tools() {
        assert!(!tool.description.is_empty(), "tool {} missing description", tool.name);
        assert!(tool.input_schema.is_object(), "tool {} missing input_schema", tool.name);
    }
}
