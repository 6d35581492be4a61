use crate::error::Result;
use crate::protocol::CallToolResult;
use crate::schema::{ArgKind, InputSchema};
use crate::tools::{ToolHandler, ToolRegistry};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

const TOOL_NAME: &str = "calculateBmi";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BmiArgs {
    weight_kg: f64,
    height_m: f64,
}

/// Computes body mass index: weight divided by height squared
pub struct CalculateBmiTool;

impl CalculateBmiTool {
    pub fn register(registry: &mut ToolRegistry) -> Result<()> {
        let schema = InputSchema::new()
            .field("weightKg", ArgKind::Number, "Body weight in kilograms")
            .field("heightM", ArgKind::Number, "Height in meters");
        registry.register(
            TOOL_NAME,
            "Calculate body mass index",
            schema,
            Arc::new(Self),
        )
    }
}

#[async_trait]
impl ToolHandler for CalculateBmiTool {
    async fn call(&self, args: Value) -> Result<CallToolResult> {
        let args: BmiArgs = serde_json::from_value(args)?;
        let bmi = args.weight_kg / (args.height_m * args.height_m);
        Ok(CallToolResult::text(bmi.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::ContentBlock;
    use serde_json::json;

    #[tokio::test]
    async fn bmi_is_the_exact_string_form_of_the_quotient() {
        let result = CalculateBmiTool
            .call(json!({"weightKg": 70, "heightM": 1.75}))
            .await
            .unwrap();
        let ContentBlock::Text { text } = &result.content[0];
        assert_eq!(text, "22.857142857142858");
    }

    #[tokio::test]
    async fn whole_quotients_have_no_fraction() {
        let result = CalculateBmiTool
            .call(json!({"weightKg": 80, "heightM": 2.0}))
            .await
            .unwrap();
        let ContentBlock::Text { text } = &result.content[0];
        assert_eq!(text, "20");
    }
}
