//! Transport-agnostic request dispatcher
//!
//! `CoreHandler` owns the tool and prompt registries and routes inbound
//! JSON-RPC messages to them. Both transports (stdio and SSE) drive the same
//! handler; nothing here knows about sessions or sockets.

use crate::config::{SERVER_NAME, ServerConfig};
use crate::error::Result;
use crate::prompts::{self, PromptRegistry, ResolvedArgs};
use crate::protocol::{
    CallToolParams, CompleteParams, CompleteResult, Completion, CompletionsCapability,
    GetPromptParams, InitializeResult, JsonRpcRequest, JsonRpcResponse, PROTOCOL_VERSION,
    PromptsCapability, ServerCapabilities, ServerInfo, ToolDescriptor, ToolsCapability,
};
use crate::tools::{self, ToolRegistry};
use crate::upstream::{PostClient, TavilyClient};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Completion responses carry at most this many candidates
const MAX_COMPLETION_VALUES: usize = 100;

/// Core MCP dispatcher with transport-agnostic business logic
pub struct CoreHandler {
    tools: ToolRegistry,
    prompts: PromptRegistry,
}

impl CoreHandler {
    /// Build a handler with the built-in catalogs wired to the configured
    /// upstream adapters
    pub fn from_config(config: &ServerConfig) -> Result<Self> {
        let search = Arc::new(TavilyClient::new(config.tavily_api_key.clone())?);
        let post = Arc::new(PostClient::new(
            config.post_endpoint.clone(),
            config.post_token.clone(),
        )?);
        Ok(Self {
            tools: tools::builtin(search, post)?,
            prompts: prompts::builtin()?,
        })
    }

    /// Build a handler around custom registries (useful in tests)
    pub fn with_registries(tools: ToolRegistry, prompts: PromptRegistry) -> Self {
        Self { tools, prompts }
    }

    /// Tool catalog, exposed for listings outside a protocol session
    pub fn tool_descriptors(&self) -> Vec<ToolDescriptor> {
        self.tools.descriptors()
    }

    /// Handle one raw JSON-RPC message.
    ///
    /// Returns the serialized response, or `None` for notifications. Never
    /// fails: malformed input becomes a JSON-RPC error response.
    #[instrument(level = "debug", skip(self, raw))]
    pub async fn handle_message(&self, raw: &str) -> Option<String> {
        let request: JsonRpcRequest = match serde_json::from_str(raw) {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, "Failed to parse inbound message");
                return serialize(JsonRpcResponse::error(
                    None,
                    -32700,
                    format!("Parse error: {e}"),
                ));
            }
        };

        // Requests without an id are notifications and get no response.
        let id = match request.id {
            Some(id) => id,
            None => {
                debug!(method = %request.method, "Notification received");
                return None;
            }
        };

        debug!(method = %request.method, "Dispatching request");
        let response = match request.method.as_str() {
            "initialize" => JsonRpcResponse::success(
                Some(id),
                json_value(create_server_details())?,
            ),
            "ping" => JsonRpcResponse::success(Some(id), json!({})),
            "tools/list" => {
                let tools = self.tools.descriptors();
                info!(tool_count = tools.len(), "Listed available tools");
                JsonRpcResponse::success(Some(id), json!({ "tools": tools }))
            }
            "tools/call" => self.handle_tools_call(id, request.params).await,
            "prompts/list" => {
                let prompts = self.prompts.descriptors();
                info!(prompt_count = prompts.len(), "Listed available prompts");
                JsonRpcResponse::success(Some(id), json!({ "prompts": prompts }))
            }
            "prompts/get" => self.handle_prompts_get(id, request.params),
            "completion/complete" => self.handle_completion(id, request.params),
            other => JsonRpcResponse::error(
                Some(id),
                -32601,
                format!("Method not found: {other}"),
            ),
        };

        serialize(response)
    }

    async fn handle_tools_call(&self, id: Value, params: Value) -> JsonRpcResponse {
        let params: CallToolParams = match serde_json::from_value(params) {
            Ok(params) => params,
            Err(e) => {
                return JsonRpcResponse::error(Some(id), -32602, format!("Invalid params: {e}"));
            }
        };

        match self.tools.invoke(&params.name, &params.arguments).await {
            Ok(result) => match json_value(result) {
                Some(result) => JsonRpcResponse::success(Some(id), result),
                None => internal_error(id),
            },
            Err(e) => {
                warn!(tool_name = %params.name, error = %e, "Tool call rejected");
                JsonRpcResponse::error(Some(id), e.jsonrpc_code(), e.to_string())
            }
        }
    }

    fn handle_prompts_get(&self, id: Value, params: Value) -> JsonRpcResponse {
        let params: GetPromptParams = match serde_json::from_value(params) {
            Ok(params) => params,
            Err(e) => {
                return JsonRpcResponse::error(Some(id), -32602, format!("Invalid params: {e}"));
            }
        };

        match self.prompts.get(&params.name, &params.arguments) {
            Ok(result) => match json_value(result) {
                Some(result) => JsonRpcResponse::success(Some(id), result),
                None => internal_error(id),
            },
            Err(e) => {
                warn!(prompt_name = %params.name, error = %e, "Prompt request rejected");
                JsonRpcResponse::error(Some(id), e.jsonrpc_code(), e.to_string())
            }
        }
    }

    fn handle_completion(&self, id: Value, params: Value) -> JsonRpcResponse {
        let params: CompleteParams = match serde_json::from_value(params) {
            Ok(params) => params,
            Err(e) => {
                return JsonRpcResponse::error(Some(id), -32602, format!("Invalid params: {e}"));
            }
        };

        if params.reference.kind != "ref/prompt" {
            return JsonRpcResponse::error(
                Some(id),
                -32602,
                format!("Unsupported completion ref: {}", params.reference.kind),
            );
        }

        let resolved: ResolvedArgs = params
            .context
            .map(|context| context.arguments)
            .unwrap_or_default();

        match self.prompts.complete(
            &params.reference.name,
            &params.argument.name,
            &params.argument.value,
            &resolved,
        ) {
            Ok(mut values) => {
                let total = values.len();
                values.truncate(MAX_COMPLETION_VALUES);
                let result = CompleteResult {
                    completion: Completion {
                        has_more: Some(total > values.len()),
                        total: Some(total),
                        values,
                    },
                };
                match json_value(result) {
                    Some(result) => JsonRpcResponse::success(Some(id), result),
                    None => internal_error(id),
                }
            }
            Err(e) => JsonRpcResponse::error(Some(id), e.jsonrpc_code(), e.to_string()),
        }
    }
}

/// Creates server details for the initialize handshake
pub fn create_server_details() -> InitializeResult {
    InitializeResult {
        protocol_version: PROTOCOL_VERSION.to_string(),
        capabilities: ServerCapabilities {
            tools: Some(ToolsCapability {
                list_changed: Some(false),
            }),
            prompts: Some(PromptsCapability {
                list_changed: Some(false),
            }),
            completions: Some(CompletionsCapability {}),
        },
        server_info: ServerInfo {
            name: SERVER_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        instructions: Some(
            "Sidecar MCP server: arithmetic and BMI helpers, social posting, \
             real-time search, and team prompt templates."
                .to_string(),
        ),
    }
}

fn json_value<T: serde::Serialize>(value: T) -> Option<Value> {
    match serde_json::to_value(value) {
        Ok(value) => Some(value),
        Err(e) => {
            error!(error = %e, "Failed to serialize response payload");
            None
        }
    }
}

fn internal_error(id: Value) -> JsonRpcResponse {
    JsonRpcResponse::error(Some(id), -32603, "Internal error".to_string())
}

fn serialize(response: JsonRpcResponse) -> Option<String> {
    match serde_json::to_string(&response) {
        Ok(serialized) => Some(serialized),
        Err(e) => {
            error!(error = %e, "Failed to serialize response");
            Some(
                r#"{"jsonrpc":"2.0","id":null,"error":{"code":-32603,"message":"Internal error"}}"#
                    .to_string(),
            )
        }
    }
}
