use crate::error::Result;
use crate::protocol::CallToolResult;
use crate::schema::{ArgKind, InputSchema};
use crate::tools::{ToolHandler, ToolRegistry};
use crate::upstream::PostClient;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

const TOOL_NAME: &str = "createPost";

#[derive(Debug, Deserialize)]
struct CreatePostArgs {
    status: String,
}

/// Publishes a status update through the posting adapter
pub struct CreatePostTool {
    client: Arc<PostClient>,
}

impl CreatePostTool {
    pub fn register(registry: &mut ToolRegistry, client: Arc<PostClient>) -> Result<()> {
        let schema = InputSchema::new().field("status", ArgKind::String, "Status text to publish");
        registry.register(
            TOOL_NAME,
            "Create a post on X, formerly known as Twitter",
            schema,
            Arc::new(Self { client }),
        )
    }
}

#[async_trait]
impl ToolHandler for CreatePostTool {
    async fn call(&self, args: Value) -> Result<CallToolResult> {
        let args: CreatePostArgs = serde_json::from_value(args)?;
        // The adapter reports faults inline as text, so this never errors.
        Ok(CallToolResult::text(
            self.client.create_post(&args.status).await,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::ContentBlock;
    use serde_json::json;

    #[tokio::test]
    async fn delegation_fault_is_a_text_payload_not_an_error() {
        let tool = CreatePostTool {
            client: Arc::new(PostClient::new(None, None).unwrap()),
        };
        let result = tool.call(json!({"status": "shipping"})).await.unwrap();
        assert_eq!(result.is_error, None);
        let ContentBlock::Text { text } = &result.content[0];
        assert!(text.starts_with("Error creating post:"));
    }
}
