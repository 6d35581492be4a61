use crate::error::Result;
use crate::protocol::CallToolResult;
use crate::schema::{ArgKind, InputSchema};
use crate::tools::{ToolHandler, ToolRegistry};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

const TOOL_NAME: &str = "addTwoNumbers";

#[derive(Debug, Deserialize)]
struct AddArgs {
    a: f64,
    b: f64,
}

/// Adds two numbers and reports the sum as a sentence
pub struct AddTwoNumbersTool;

impl AddTwoNumbersTool {
    pub fn register(registry: &mut ToolRegistry) -> Result<()> {
        let schema = InputSchema::new()
            .field("a", ArgKind::Number, "First addend")
            .field("b", ArgKind::Number, "Second addend");
        registry.register(TOOL_NAME, "Add two numbers", schema, Arc::new(Self))
    }
}

#[async_trait]
impl ToolHandler for AddTwoNumbersTool {
    async fn call(&self, args: Value) -> Result<CallToolResult> {
        let args: AddArgs = serde_json::from_value(args)?;
        // f64 Display prints the shortest round-trip form, so whole sums
        // come out as "5" rather than "5.0".
        Ok(CallToolResult::text(format!(
            "The sum of {} and {} is {}",
            args.a,
            args.b,
            args.a + args.b
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::ContentBlock;
    use serde_json::json;

    async fn call(args: Value) -> String {
        let result = AddTwoNumbersTool.call(args).await.unwrap();
        let ContentBlock::Text { text } = &result.content[0];
        text.clone()
    }

    #[tokio::test]
    async fn whole_numbers_format_without_a_fraction() {
        assert_eq!(call(json!({"a": 2, "b": 3})).await, "The sum of 2 and 3 is 5");
    }

    #[tokio::test]
    async fn fractional_numbers_keep_their_fraction() {
        assert_eq!(
            call(json!({"a": 0.5, "b": 2})).await,
            "The sum of 0.5 and 2 is 2.5"
        );
    }

    #[tokio::test]
    async fn negative_numbers_are_supported() {
        assert_eq!(
            call(json!({"a": -7, "b": 3})).await,
            "The sum of -7 and 3 is -4"
        );
    }
}
