//! Tool registry and the built-in tool catalog
//!
//! A tool is a named, schema-validated async callable. Registration is
//! append-only at startup; the registry is read-only at request time, so
//! invocations need no locking. A handler fault is caught here and turned
//! into a result payload with `isError` set, never a transport error.

mod add;
mod bmi;
mod create_post;
mod realtime;

pub use add::AddTwoNumbersTool;
pub use bmi::CalculateBmiTool;
pub use create_post::CreatePostTool;
pub use realtime::FetchRealTimeDataTool;

use crate::error::{Error, Result};
use crate::protocol::{CallToolResult, ToolDescriptor};
use crate::schema::InputSchema;
use crate::upstream::{PostClient, TavilyClient};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info};

/// A callable exposed through `tools/call`.
///
/// Arguments have already been validated against the declared schema when
/// `call` runs.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    async fn call(&self, args: Value) -> Result<CallToolResult>;
}

struct ToolEntry {
    name: String,
    description: String,
    schema: InputSchema,
    handler: Arc<dyn ToolHandler>,
}

/// Name-keyed tool registry, owned by the server instance
#[derive(Default)]
pub struct ToolRegistry {
    entries: Vec<ToolEntry>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool. Fails with `DuplicateName` when the name is taken;
    /// the original handler is kept.
    pub fn register(
        &mut self,
        name: &str,
        description: &str,
        schema: InputSchema,
        handler: Arc<dyn ToolHandler>,
    ) -> Result<()> {
        if self.entries.iter().any(|entry| entry.name == name) {
            return Err(Error::duplicate_tool(name));
        }
        self.entries.push(ToolEntry {
            name: name.to_string(),
            description: description.to_string(),
            schema,
            handler,
        });
        Ok(())
    }

    /// Catalog served by `tools/list`, in registration order
    pub fn descriptors(&self) -> Vec<ToolDescriptor> {
        self.entries
            .iter()
            .map(|entry| ToolDescriptor {
                name: entry.name.clone(),
                description: entry.description.clone(),
                input_schema: entry.schema.to_json_schema(),
            })
            .collect()
    }

    /// Validate `args` and run the named tool.
    ///
    /// `UnknownTool` and validation failures are returned as errors for the
    /// dispatcher to report; an internal handler fault becomes a result
    /// payload that signals the failure as text.
    pub async fn invoke(&self, name: &str, args: &Value) -> Result<CallToolResult> {
        let entry = self
            .entries
            .iter()
            .find(|entry| entry.name == name)
            .ok_or_else(|| Error::UnknownTool(name.to_string()))?;

        entry.schema.validate(args)?;

        debug!(tool_name = name, "Executing tool");
        match entry.handler.call(args.clone()).await {
            Ok(result) => {
                info!(tool_name = name, "Tool execution completed");
                Ok(result)
            }
            Err(e) => {
                error!(tool_name = name, error = %e, "Tool execution failed");
                Ok(CallToolResult::error(format!("{name}: {e}")))
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Build the registry with the built-in tool catalog
pub fn builtin(search: Arc<TavilyClient>, post: Arc<PostClient>) -> Result<ToolRegistry> {
    let mut registry = ToolRegistry::new();
    AddTwoNumbersTool::register(&mut registry)?;
    CreatePostTool::register(&mut registry, post)?;
    CalculateBmiTool::register(&mut registry)?;
    FetchRealTimeDataTool::register(&mut registry, search)?;
    Ok(registry)
}
