//! End-to-end dispatcher tests: raw JSON-RPC in, raw JSON-RPC out.

use mcp_sidecar_core::{CoreHandler, ServerConfig};
use serde_json::{Value, json};

fn handler() -> CoreHandler {
    // Default config: no upstream credentials configured. Tools that
    // delegate upstream still answer, with the fault described as text.
    CoreHandler::from_config(&ServerConfig::default()).unwrap()
}

async fn dispatch(handler: &CoreHandler, request: Value) -> Value {
    let raw = handler
        .handle_message(&request.to_string())
        .await
        .expect("expected a response");
    serde_json::from_str(&raw).unwrap()
}

#[tokio::test]
async fn initialize_reports_protocol_and_capabilities() {
    let handler = handler();
    let response = dispatch(
        &handler,
        json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {
            "protocolVersion": "2025-03-26",
            "capabilities": {},
            "clientInfo": {"name": "test", "version": "0.0.1"}
        }}),
    )
    .await;

    let result = &response["result"];
    assert_eq!(result["protocolVersion"], "2025-03-26");
    assert_eq!(result["serverInfo"]["name"], "sidecar");
    assert!(result["capabilities"]["tools"].is_object());
    assert!(result["capabilities"]["prompts"].is_object());
    assert!(result["capabilities"]["completions"].is_object());
}

#[tokio::test]
async fn ping_returns_an_empty_result() {
    let handler = handler();
    let response = dispatch(&handler, json!({"jsonrpc": "2.0", "id": 7, "method": "ping"})).await;
    assert_eq!(response["result"], json!({}));
    assert_eq!(response["id"], 7);
}

#[tokio::test]
async fn notifications_get_no_response() {
    let handler = handler();
    let raw = json!({"jsonrpc": "2.0", "method": "notifications/initialized"});
    assert!(handler.handle_message(&raw.to_string()).await.is_none());
}

#[tokio::test]
async fn malformed_json_is_a_parse_error() {
    let handler = handler();
    let raw = handler.handle_message("{not json").await.unwrap();
    let response: Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(response["error"]["code"], -32700);
}

#[tokio::test]
async fn unknown_method_is_method_not_found() {
    let handler = handler();
    let response = dispatch(
        &handler,
        json!({"jsonrpc": "2.0", "id": 2, "method": "resources/list"}),
    )
    .await;
    assert_eq!(response["error"]["code"], -32601);
}

#[tokio::test]
async fn tools_list_serves_the_catalog() {
    let handler = handler();
    let response = dispatch(
        &handler,
        json!({"jsonrpc": "2.0", "id": 3, "method": "tools/list"}),
    )
    .await;

    let tools = response["result"]["tools"].as_array().unwrap();
    let names: Vec<&str> = tools
        .iter()
        .map(|tool| tool["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        ["addTwoNumbers", "createPost", "calculateBmi", "fetchRealTimeData"]
    );
    for tool in tools {
        assert_eq!(tool["inputSchema"]["type"], "object");
        assert_eq!(tool["inputSchema"]["additionalProperties"], json!(false));
    }
}

#[tokio::test]
async fn add_two_numbers_returns_the_exact_sum_text() {
    let handler = handler();
    let response = dispatch(
        &handler,
        json!({"jsonrpc": "2.0", "id": 4, "method": "tools/call", "params": {
            "name": "addTwoNumbers",
            "arguments": {"a": 2, "b": 3}
        }}),
    )
    .await;

    assert_eq!(
        response["result"]["content"][0]["text"],
        "The sum of 2 and 3 is 5"
    );
}

#[tokio::test]
async fn calculate_bmi_returns_the_quotient_text() {
    let handler = handler();
    let response = dispatch(
        &handler,
        json!({"jsonrpc": "2.0", "id": 5, "method": "tools/call", "params": {
            "name": "calculateBmi",
            "arguments": {"weightKg": 70, "heightM": 1.75}
        }}),
    )
    .await;

    assert_eq!(
        response["result"]["content"][0]["text"],
        "22.857142857142858"
    );
}

#[tokio::test]
async fn unknown_tool_is_a_client_error() {
    let handler = handler();
    let response = dispatch(
        &handler,
        json!({"jsonrpc": "2.0", "id": 6, "method": "tools/call", "params": {
            "name": "doesNotExist",
            "arguments": {}
        }}),
    )
    .await;

    assert_eq!(response["error"]["code"], -32602);
    assert!(
        response["error"]["message"]
            .as_str()
            .unwrap()
            .contains("Unknown tool")
    );
}

#[tokio::test]
async fn invalid_arguments_are_rejected_before_the_handler() {
    let handler = handler();
    let response = dispatch(
        &handler,
        json!({"jsonrpc": "2.0", "id": 8, "method": "tools/call", "params": {
            "name": "addTwoNumbers",
            "arguments": {"a": "two", "b": 3}
        }}),
    )
    .await;

    assert_eq!(response["error"]["code"], -32602);
    assert!(
        response["error"]["message"]
            .as_str()
            .unwrap()
            .contains("expected number")
    );
}

#[tokio::test]
async fn delegating_tool_reports_upstream_fault_as_text() {
    let handler = handler();
    let response = dispatch(
        &handler,
        json!({"jsonrpc": "2.0", "id": 9, "method": "tools/call", "params": {
            "name": "fetchRealTimeData",
            "arguments": {"query": "latest rust release"}
        }}),
    )
    .await;

    // No credential is configured, so the adapter reports the fault inline
    // rather than failing the call.
    let text = response["result"]["content"][0]["text"].as_str().unwrap();
    assert!(text.starts_with("Error fetching real-time data:"));
    assert!(response["error"].is_null());
}

#[tokio::test]
async fn prompts_list_serves_the_catalog() {
    let handler = handler();
    let response = dispatch(
        &handler,
        json!({"jsonrpc": "2.0", "id": 10, "method": "prompts/list"}),
    )
    .await;

    let prompts = response["result"]["prompts"].as_array().unwrap();
    let names: Vec<&str> = prompts
        .iter()
        .map(|prompt| prompt["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["review-code", "team-greeting"]);
    assert_eq!(prompts[1]["arguments"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn prompts_get_renders_review_code() {
    let handler = handler();
    let response = dispatch(
        &handler,
        json!({"jsonrpc": "2.0", "id": 11, "method": "prompts/get", "params": {
            "name": "review-code",
            "arguments": {"code": "fn main() {}"}
        }}),
    )
    .await;

    let message = &response["result"]["messages"][0];
    assert_eq!(message["role"], "user");
    assert_eq!(
        message["content"]["text"],
        "Please review this code:\n\nfn main() {}"
    );
}

#[tokio::test]
async fn prompts_get_renders_team_greeting() {
    let handler = handler();
    let response = dispatch(
        &handler,
        json!({"jsonrpc": "2.0", "id": 12, "method": "prompts/get", "params": {
            "name": "team-greeting",
            "arguments": {"department": "sales", "name": "David"}
        }}),
    )
    .await;

    let message = &response["result"]["messages"][0];
    assert_eq!(message["role"], "assistant");
    assert_eq!(
        message["content"]["text"],
        "Hello David, welcome to the sales team!"
    );
}

#[tokio::test]
async fn prompts_get_missing_argument_is_a_client_error() {
    let handler = handler();
    let response = dispatch(
        &handler,
        json!({"jsonrpc": "2.0", "id": 13, "method": "prompts/get", "params": {
            "name": "team-greeting",
            "arguments": {"department": "sales"}
        }}),
    )
    .await;

    assert_eq!(response["error"]["code"], -32602);
}

#[tokio::test]
async fn completion_filters_departments_by_prefix() {
    let handler = handler();
    let response = dispatch(
        &handler,
        json!({"jsonrpc": "2.0", "id": 14, "method": "completion/complete", "params": {
            "ref": {"type": "ref/prompt", "name": "team-greeting"},
            "argument": {"name": "department", "value": "e"}
        }}),
    )
    .await;

    let completion = &response["result"]["completion"];
    assert_eq!(completion["values"], json!(["engineering"]));
    assert_eq!(completion["hasMore"], json!(false));
}

#[tokio::test]
async fn completion_conditions_names_on_the_resolved_department() {
    let handler = handler();
    let response = dispatch(
        &handler,
        json!({"jsonrpc": "2.0", "id": 15, "method": "completion/complete", "params": {
            "ref": {"type": "ref/prompt", "name": "team-greeting"},
            "argument": {"name": "name", "value": "D"},
            "context": {"arguments": {"department": "sales"}}
        }}),
    )
    .await;

    assert_eq!(
        response["result"]["completion"]["values"],
        json!(["David"])
    );
}

#[tokio::test]
async fn completion_for_unsupported_ref_is_rejected() {
    let handler = handler();
    let response = dispatch(
        &handler,
        json!({"jsonrpc": "2.0", "id": 16, "method": "completion/complete", "params": {
            "ref": {"type": "ref/resource", "name": "whatever"},
            "argument": {"name": "x", "value": ""}
        }}),
    )
    .await;

    assert_eq!(response["error"]["code"], -32602);
}
