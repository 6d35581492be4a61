use crate::prompts::{PromptArgSpec, PromptDefinition, ResolvedArgs};
use crate::protocol::{ContentBlock, GetPromptResult, PromptMessage, Role};

const DEPARTMENTS: [&str; 4] = ["engineering", "sales", "marketing", "support"];

/// `team-greeting`: greets a team member, with suggestions for both
/// arguments; name candidates depend on the department already chosen
pub fn team_greeting() -> PromptDefinition {
    PromptDefinition {
        name: "team-greeting",
        description: "Generate a greeting for team members",
        args: vec![
            PromptArgSpec {
                name: "department",
                description: "Department the member belongs to",
                required: true,
                suggest: Some(suggest_department),
            },
            PromptArgSpec {
                name: "name",
                description: "Name of the team member",
                required: true,
                suggest: Some(suggest_name),
            },
        ],
        generate,
    }
}

fn generate(args: &ResolvedArgs) -> GetPromptResult {
    let department = args.get("department").map(String::as_str).unwrap_or_default();
    let name = args.get("name").map(String::as_str).unwrap_or_default();
    GetPromptResult {
        description: Some("Generate a greeting for team members".to_string()),
        messages: vec![PromptMessage {
            role: Role::Assistant,
            content: ContentBlock::Text {
                text: format!("Hello {name}, welcome to the {department} team!"),
            },
        }],
    }
}

fn suggest_department(partial: &str, _resolved: &ResolvedArgs) -> Vec<String> {
    prefix_filter(&DEPARTMENTS, partial)
}

fn suggest_name(partial: &str, resolved: &ResolvedArgs) -> Vec<String> {
    let candidates: &[&str] = match resolved.get("department").map(String::as_str) {
        Some("engineering") => &["Alice", "Bob", "Charlie"],
        Some("sales") => &["David", "Eve", "Frank"],
        Some("marketing") => &["Grace", "Henry", "Iris"],
        _ => &["Guest"],
    };
    prefix_filter(candidates, partial)
}

fn prefix_filter(candidates: &[&str], partial: &str) -> Vec<String> {
    candidates
        .iter()
        .filter(|candidate| candidate.starts_with(partial))
        .map(|candidate| candidate.to_string())
        .collect()
}
