use crate::error::Result;
use crate::protocol::CallToolResult;
use crate::schema::{ArgKind, InputSchema};
use crate::tools::{ToolHandler, ToolRegistry};
use crate::upstream::TavilyClient;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

const TOOL_NAME: &str = "fetchRealTimeData";

#[derive(Debug, Deserialize)]
struct FetchArgs {
    query: String,
}

/// Answers a query with real-time information from the search adapter
pub struct FetchRealTimeDataTool {
    search: Arc<TavilyClient>,
}

impl FetchRealTimeDataTool {
    pub fn register(registry: &mut ToolRegistry, search: Arc<TavilyClient>) -> Result<()> {
        let schema = InputSchema::new().field("query", ArgKind::String, "Search query");
        registry.register(
            TOOL_NAME,
            "Enter a query and get real-time information about anything",
            schema,
            Arc::new(Self { search }),
        )
    }
}

#[async_trait]
impl ToolHandler for FetchRealTimeDataTool {
    async fn call(&self, args: Value) -> Result<CallToolResult> {
        let args: FetchArgs = serde_json::from_value(args)?;
        // The adapter never fails; faults come back as descriptive text.
        Ok(CallToolResult::text(self.search.search(&args.query).await))
    }
}
