//! Prompt registry and the built-in prompt catalog
//!
//! A prompt is a named template generator returning role-tagged messages.
//! Arguments are strings; an argument may carry an advisory suggestion
//! callback that offers candidate values for a partially typed input. The
//! callbacks are pure functions of the partial value and the already
//! resolved sibling arguments, so they are trivially testable and never
//! block invocation.

mod review_code;
mod team_greeting;

pub use review_code::review_code;
pub use team_greeting::team_greeting;

use crate::error::{Error, Result};
use crate::protocol::{GetPromptResult, PromptArgumentDescriptor, PromptDescriptor};
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

/// Resolved argument values for one prompt invocation
pub type ResolvedArgs = HashMap<String, String>;

/// Advisory completion callback: `(partial value, resolved siblings)` to an
/// ordered, finite candidate list
pub type SuggestFn = fn(&str, &ResolvedArgs) -> Vec<String>;

/// Generator from resolved arguments to the rendered message sequence
pub type GenerateFn = fn(&ResolvedArgs) -> GetPromptResult;

/// Declared shape of a single prompt argument
pub struct PromptArgSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub required: bool,
    pub suggest: Option<SuggestFn>,
}

/// A complete prompt registration
pub struct PromptDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub args: Vec<PromptArgSpec>,
    pub generate: GenerateFn,
}

/// Name-keyed prompt registry, owned by the server instance
#[derive(Default)]
pub struct PromptRegistry {
    entries: Vec<PromptDefinition>,
}

impl PromptRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a prompt. Fails with `DuplicateName` when the name is taken.
    pub fn register(&mut self, definition: PromptDefinition) -> Result<()> {
        if self.entries.iter().any(|entry| entry.name == definition.name) {
            return Err(Error::duplicate_prompt(definition.name));
        }
        self.entries.push(definition);
        Ok(())
    }

    /// Catalog served by `prompts/list`, in registration order
    pub fn descriptors(&self) -> Vec<PromptDescriptor> {
        self.entries
            .iter()
            .map(|entry| PromptDescriptor {
                name: entry.name.to_string(),
                description: entry.description.to_string(),
                arguments: entry
                    .args
                    .iter()
                    .map(|arg| PromptArgumentDescriptor {
                        name: arg.name.to_string(),
                        description: Some(arg.description.to_string()),
                        required: Some(arg.required),
                    })
                    .collect(),
            })
            .collect()
    }

    /// Validate raw arguments and render the named prompt
    pub fn get(&self, name: &str, raw_args: &Value) -> Result<GetPromptResult> {
        let entry = self.find(name)?;
        let args = coerce_args(raw_args)?;

        for spec in &entry.args {
            if spec.required && !args.contains_key(spec.name) {
                return Err(Error::validation_field(
                    format!("missing required argument '{}'", spec.name),
                    spec.name,
                ));
            }
        }
        for key in args.keys() {
            if !entry.args.iter().any(|spec| spec.name == key) {
                return Err(Error::validation_field(
                    format!("unknown argument '{key}'"),
                    key.as_str(),
                ));
            }
        }

        debug!(prompt_name = name, "Rendering prompt");
        Ok((entry.generate)(&args))
    }

    /// Candidate completions for a partially typed argument value.
    ///
    /// Empty when the argument carries no suggestion callback; advisory
    /// only, so an unknown argument name is also just an empty list.
    pub fn complete(
        &self,
        name: &str,
        arg_name: &str,
        partial: &str,
        resolved: &ResolvedArgs,
    ) -> Result<Vec<String>> {
        let entry = self.find(name)?;
        let candidates = entry
            .args
            .iter()
            .find(|spec| spec.name == arg_name)
            .and_then(|spec| spec.suggest)
            .map(|suggest| suggest(partial, resolved))
            .unwrap_or_default();
        Ok(candidates)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn find(&self, name: &str) -> Result<&PromptDefinition> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .ok_or_else(|| Error::UnknownPrompt(name.to_string()))
    }
}

/// Build the registry with the built-in prompt catalog
pub fn builtin() -> Result<PromptRegistry> {
    let mut registry = PromptRegistry::new();
    registry.register(review_code())?;
    registry.register(team_greeting())?;
    Ok(registry)
}

/// Prompt arguments arrive as a JSON object of strings
fn coerce_args(raw: &Value) -> Result<ResolvedArgs> {
    match raw {
        Value::Null => Ok(ResolvedArgs::new()),
        Value::Object(map) => map
            .iter()
            .map(|(key, value)| match value {
                Value::String(text) => Ok((key.clone(), text.clone())),
                other => Err(Error::validation_field(
                    format!("argument '{key}' must be a string, got {other}"),
                    key.as_str(),
                )),
            })
            .collect(),
        other => Err(Error::validation(format!(
            "expected an object of arguments, got {other}"
        ))),
    }
}
