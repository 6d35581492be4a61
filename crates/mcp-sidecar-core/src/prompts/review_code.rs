use crate::prompts::{PromptArgSpec, PromptDefinition, ResolvedArgs};
use crate::protocol::{ContentBlock, GetPromptResult, PromptMessage, Role};

/// `review-code`: asks for a review of the given code
pub fn review_code() -> PromptDefinition {
    PromptDefinition {
        name: "review-code",
        description: "Review code and provide feedback",
        args: vec![PromptArgSpec {
            name: "code",
            description: "Code to review",
            required: true,
            suggest: None,
        }],
        generate,
    }
}

fn generate(args: &ResolvedArgs) -> GetPromptResult {
    let code = args.get("code").map(String::as_str).unwrap_or_default();
    GetPromptResult {
        description: Some("Review code and provide feedback".to_string()),
        messages: vec![PromptMessage {
            role: Role::User,
            content: ContentBlock::Text {
                text: format!("Please review this code:\n\n{code}"),
            },
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_a_single_user_message_with_the_code() {
        let mut args = ResolvedArgs::new();
        args.insert("code".to_string(), "fn main() {}".to_string());

        let result = generate(&args);
        assert_eq!(result.messages.len(), 1);
        assert_eq!(result.messages[0].role, Role::User);
        let ContentBlock::Text { text } = &result.messages[0].content;
        assert_eq!(text, "Please review this code:\n\nfn main() {}");
    }
}
