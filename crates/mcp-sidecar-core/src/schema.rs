//! Declarative input schemas for tools and prompts
//!
//! A schema is an ordered field map validated before a handler runs. This
//! keeps "what a tool accepts" separate from "how it is invoked": the
//! dispatcher rejects malformed input up front, handlers only ever see
//! conforming arguments. Extra fields are rejected.

use crate::error::{Error, Result};
use serde_json::{Map, Value, json};

/// Expected JSON type of a single argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    Number,
    String,
    Boolean,
}

impl ArgKind {
    /// Name used in the rendered JSON Schema and in validation messages
    pub fn json_name(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::String => "string",
            Self::Boolean => "boolean",
        }
    }

    fn matches(self, value: &Value) -> bool {
        match self {
            Self::Number => value.is_number(),
            Self::String => value.is_string(),
            Self::Boolean => value.is_boolean(),
        }
    }
}

/// Declared shape of a single field
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub kind: ArgKind,
    pub description: Option<String>,
    pub required: bool,
}

/// Ordered mapping from parameter name to its declared shape
#[derive(Debug, Clone, Default)]
pub struct InputSchema {
    fields: Vec<(String, FieldSpec)>,
}

impl InputSchema {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Add a required field
    pub fn field(mut self, name: &str, kind: ArgKind, description: &str) -> Self {
        self.fields.push((
            name.to_string(),
            FieldSpec {
                kind,
                description: Some(description.to_string()),
                required: true,
            },
        ));
        self
    }

    /// Add an optional field
    pub fn optional_field(mut self, name: &str, kind: ArgKind, description: &str) -> Self {
        self.fields.push((
            name.to_string(),
            FieldSpec {
                kind,
                description: Some(description.to_string()),
                required: false,
            },
        ));
        self
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldSpec)> {
        self.fields.iter().map(|(name, spec)| (name.as_str(), spec))
    }

    /// Check raw input against the declared fields.
    ///
    /// Missing required fields, type mismatches, and unknown fields each
    /// produce a distinct validation error. A null input is accepted only
    /// when no field is required.
    pub fn validate(&self, args: &Value) -> Result<()> {
        let object = match args {
            Value::Object(map) => map,
            Value::Null => {
                if let Some((name, _)) = self.fields.iter().find(|(_, spec)| spec.required) {
                    return Err(Error::validation_field(
                        format!("missing required field '{name}'"),
                        name,
                    ));
                }
                return Ok(());
            }
            other => {
                return Err(Error::validation(format!(
                    "expected an object of arguments, got {}",
                    type_name(other)
                )));
            }
        };

        for (name, spec) in &self.fields {
            match object.get(name) {
                Some(value) => {
                    if !spec.kind.matches(value) {
                        return Err(Error::validation_field(
                            format!(
                                "field '{name}' expected {}, got {}",
                                spec.kind.json_name(),
                                type_name(value)
                            ),
                            name,
                        ));
                    }
                }
                None if spec.required => {
                    return Err(Error::validation_field(
                        format!("missing required field '{name}'"),
                        name,
                    ));
                }
                None => {}
            }
        }

        for key in object.keys() {
            if !self.fields.iter().any(|(name, _)| name == key) {
                return Err(Error::validation_field(
                    format!("unknown field '{key}'"),
                    key,
                ));
            }
        }

        Ok(())
    }

    /// Render the standard JSON Schema object served by `tools/list`
    pub fn to_json_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for (name, spec) in &self.fields {
            let mut property = Map::new();
            property.insert("type".to_string(), json!(spec.kind.json_name()));
            if let Some(description) = &spec.description {
                property.insert("description".to_string(), json!(description));
            }
            properties.insert(name.clone(), Value::Object(property));
            if spec.required {
                required.push(json!(name));
            }
        }

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
            "additionalProperties": false,
        })
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
